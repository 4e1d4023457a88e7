//! In-memory backing store
//!
//! All tables live behind one `RwLock`, so a query sees a consistent view of
//! every table it joins. Identifiers come from one sequence shared by all
//! tables.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::errors::{StoreError, StoreResult};
use super::repository::{CrudRepository, QueryRepository};
use crate::domain::{Album, Entity, Photo, Record, Relation, Tag, User};
use crate::executor::{ConditionEvaluator, Page, PageRequest, RelationResolver, ResultSorter};
use crate::planner::Condition;

/// Table set guarded by the store lock
#[derive(Debug, Default)]
pub struct Tables {
    sequence: i64,
    users: BTreeMap<i64, User>,
    albums: BTreeMap<i64, Album>,
    photos: BTreeMap<i64, Photo>,
    tags: BTreeMap<i64, Tag>,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.sequence += 1;
        self.sequence
    }

    /// Keeps the sequence ahead of an explicitly assigned identifier
    fn reserve(&mut self, id: i64) {
        self.sequence = self.sequence.max(id);
    }

    fn require<E: Stored>(&self, id: i64) -> StoreResult<()> {
        if E::table(self).contains_key(&id) {
            Ok(())
        } else {
            Err(StoreError::DanglingReference { kind: E::KIND, id })
        }
    }
}

impl RelationResolver for Tables {
    fn related(&self, relation: Relation, owner_id: i64) -> Vec<&dyn Record> {
        match relation {
            Relation::AlbumUser => self
                .albums
                .get(&owner_id)
                .and_then(|album| album.user_id)
                .and_then(|user_id| self.users.get(&user_id))
                .map(|user| vec![user as &dyn Record])
                .unwrap_or_default(),
            Relation::PhotoAlbum => self
                .photos
                .get(&owner_id)
                .and_then(|photo| photo.album_id)
                .and_then(|album_id| self.albums.get(&album_id))
                .map(|album| vec![album as &dyn Record])
                .unwrap_or_default(),
            Relation::PhotoTags => self
                .photos
                .get(&owner_id)
                .map(|photo| {
                    photo
                        .tag_ids
                        .iter()
                        .filter_map(|tag_id| self.tags.get(tag_id))
                        .map(|tag| tag as &dyn Record)
                        .collect()
                })
                .unwrap_or_default(),
            Relation::TagPhotos => self
                .photos
                .values()
                .filter(|photo| photo.tag_ids.contains(&owner_id))
                .map(|photo| photo as &dyn Record)
                .collect(),
        }
    }
}

/// Maps an entity type to its table and its referential rules
pub trait Stored: Entity {
    fn table(tables: &Tables) -> &BTreeMap<i64, Self>;

    fn table_mut(tables: &mut Tables) -> &mut BTreeMap<i64, Self>;

    /// Checks that every entity this row points at exists
    fn check_references(&self, _tables: &Tables) -> StoreResult<()> {
        Ok(())
    }

    /// Runs before the row `id` is removed; may clean up or refuse
    fn release(_id: i64, _tables: &mut Tables) -> StoreResult<()> {
        Ok(())
    }
}

impl Stored for User {
    fn table(tables: &Tables) -> &BTreeMap<i64, Self> {
        &tables.users
    }

    fn table_mut(tables: &mut Tables) -> &mut BTreeMap<i64, Self> {
        &mut tables.users
    }

    fn release(id: i64, tables: &mut Tables) -> StoreResult<()> {
        if tables.albums.values().any(|album| album.user_id == Some(id)) {
            return Err(StoreError::StillReferenced {
                kind: Self::KIND,
                id,
                by: Album::KIND,
            });
        }
        Ok(())
    }
}

impl Stored for Album {
    fn table(tables: &Tables) -> &BTreeMap<i64, Self> {
        &tables.albums
    }

    fn table_mut(tables: &mut Tables) -> &mut BTreeMap<i64, Self> {
        &mut tables.albums
    }

    fn check_references(&self, tables: &Tables) -> StoreResult<()> {
        match self.user_id {
            Some(user_id) => tables.require::<User>(user_id),
            None => Ok(()),
        }
    }

    fn release(id: i64, tables: &mut Tables) -> StoreResult<()> {
        if tables.photos.values().any(|photo| photo.album_id == Some(id)) {
            return Err(StoreError::StillReferenced {
                kind: Self::KIND,
                id,
                by: Photo::KIND,
            });
        }
        Ok(())
    }
}

impl Stored for Photo {
    fn table(tables: &Tables) -> &BTreeMap<i64, Self> {
        &tables.photos
    }

    fn table_mut(tables: &mut Tables) -> &mut BTreeMap<i64, Self> {
        &mut tables.photos
    }

    fn check_references(&self, tables: &Tables) -> StoreResult<()> {
        if let Some(album_id) = self.album_id {
            tables.require::<Album>(album_id)?;
        }
        self.tag_ids
            .iter()
            .try_for_each(|tag_id| tables.require::<Tag>(*tag_id))
    }
}

impl Stored for Tag {
    fn table(tables: &Tables) -> &BTreeMap<i64, Self> {
        &tables.tags
    }

    fn table_mut(tables: &mut Tables) -> &mut BTreeMap<i64, Self> {
        &mut tables.tags
    }

    /// Refuses while a photo still links to this tag
    fn release(id: i64, tables: &mut Tables) -> StoreResult<()> {
        if tables.photos.values().any(|photo| photo.tag_ids.contains(&id)) {
            return Err(StoreError::StillReferenced {
                kind: Self::KIND,
                id,
                by: Photo::KIND,
            });
        }
        Ok(())
    }
}

/// Thread-safe in-memory store for every gallery entity
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Tables>> {
        self.tables.read().map_err(|_| StoreError::LockPoisoned)
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Tables>> {
        self.tables.write().map_err(|_| StoreError::LockPoisoned)
    }

    /// Filters one table, in ascending identifier order
    fn matching<E: Stored>(tables: &Tables, condition: &Condition) -> Vec<E> {
        let evaluator = ConditionEvaluator::new(tables);
        E::table(tables)
            .values()
            .filter(|entity| evaluator.matches(*entity, condition))
            .cloned()
            .collect()
    }

    /// Returns the number of rows in the table for `E`
    pub fn len<E: Stored>(&self) -> StoreResult<usize> {
        let tables = self.read()?;
        Ok(E::table(&tables).len())
    }

    fn validate<E: Stored>(entity: &E) -> StoreResult<()> {
        entity.validate().map_err(|reason| StoreError::InvalidEntity {
            kind: E::KIND,
            reason,
        })
    }

    /// Checks references, assigns an identifier if missing and inserts
    fn put<E: Stored>(tables: &mut Tables, mut entity: E) -> StoreResult<E> {
        entity.check_references(tables)?;

        let id = match entity.id() {
            Some(id) => {
                tables.reserve(id);
                id
            }
            None => {
                let id = tables.next_id();
                entity.set_id(id);
                id
            }
        };
        E::table_mut(tables).insert(id, entity.clone());
        Ok(entity)
    }
}

impl<E: Stored> QueryRepository<E> for InMemoryStore {
    fn find_all(&self, condition: &Condition) -> StoreResult<Vec<E>> {
        let tables = self.read()?;
        Ok(Self::matching(&tables, condition))
    }

    fn find_page(&self, condition: &Condition, request: &PageRequest) -> StoreResult<Page<E>> {
        let tables = self.read()?;
        let mut rows: Vec<E> = Self::matching(&tables, condition);
        drop(tables);

        ResultSorter::sort(&mut rows, &request.sort);
        Ok(Page::from_sorted(rows, request))
    }

    fn count(&self, condition: &Condition) -> StoreResult<u64> {
        let tables = self.read()?;
        let evaluator = ConditionEvaluator::new(&*tables);
        let count = E::table(&tables)
            .values()
            .filter(|entity| evaluator.matches(*entity, condition))
            .count();
        Ok(count as u64)
    }
}

impl<E: Stored> CrudRepository<E> for InMemoryStore {
    fn find_by_id(&self, id: i64) -> StoreResult<Option<E>> {
        let tables = self.read()?;
        Ok(E::table(&tables).get(&id).cloned())
    }

    fn save(&self, entity: E) -> StoreResult<E> {
        Self::validate(&entity)?;
        let mut tables = self.write()?;
        Self::put(&mut tables, entity)
    }

    fn update(&self, entity: E) -> StoreResult<E> {
        Self::validate(&entity)?;
        let mut tables = self.write()?;
        match entity.id() {
            Some(id) if E::table(&tables).contains_key(&id) => Self::put(&mut tables, entity),
            Some(id) => Err(StoreError::NotFound { kind: E::KIND, id }),
            None => Err(StoreError::InvalidEntity {
                kind: E::KIND,
                reason: "update requires an id".to_string(),
            }),
        }
    }

    fn delete_by_id(&self, id: i64) -> StoreResult<()> {
        let mut tables = self.write()?;
        if !E::table(&tables).contains_key(&id) {
            return Err(StoreError::NotFound { kind: E::KIND, id });
        }
        E::release(id, &mut tables)?;
        E::table_mut(&mut tables).remove(&id);
        Ok(())
    }
}
