//! Entity write and lookup service
//!
//! Every successful write is mirrored into the search index after the
//! store accepts it. A failed store write never reaches the index.

use std::marker::PhantomData;
use std::sync::Arc;

use chrono::Utc;
use serde_json::Value as JsonValue;

use super::errors::{ServiceError, ServiceResult};
use crate::domain::Entity;
use crate::executor::{Page, PageRequest};
use crate::observability::{log_event_with_fields, Event, MetricsRegistry};
use crate::planner::Condition;
use crate::search::SearchIndex;
use crate::storage::{CrudRepository, QueryRepository, StoreError};

/// Create, update, lookup and delete for one entity type
pub struct EntityService<E, R, S>
where
    E: Entity,
    R: CrudRepository<E> + QueryRepository<E>,
    S: SearchIndex<E>,
{
    repository: Arc<R>,
    search: Arc<S>,
    metrics: Arc<MetricsRegistry>,
    _entity: PhantomData<fn() -> E>,
}

impl<E, R, S> EntityService<E, R, S>
where
    E: Entity,
    R: CrudRepository<E> + QueryRepository<E>,
    S: SearchIndex<E>,
{
    pub fn new(repository: Arc<R>, search: Arc<S>, metrics: Arc<MetricsRegistry>) -> Self {
        Self {
            repository,
            search,
            metrics,
            _entity: PhantomData,
        }
    }

    /// Creates a new entity; it must not carry an id
    pub fn save(&self, mut entity: E) -> ServiceResult<E> {
        if entity.id().is_some() {
            return Err(self.reject(ServiceError::IdAlreadySet { kind: E::KIND }));
        }
        entity.on_create(Utc::now());

        let stored = self.persist(entity)?;
        self.metrics.increment_saves();
        self.log_write(Event::EntitySaved, &stored);
        Ok(stored)
    }

    /// Replaces an existing entity; the body id must equal the path id
    pub fn update(&self, id: i64, entity: E) -> ServiceResult<E> {
        self.check_body_id(id, entity.id())?;

        let stored = self.replace(entity)?;
        self.metrics.increment_updates();
        self.log_write(Event::EntityUpdated, &stored);
        Ok(stored)
    }

    /// Merges the non-null fields of a JSON object into an existing entity
    pub fn partial_update(&self, id: i64, patch: JsonValue) -> ServiceResult<E> {
        let JsonValue::Object(fields) = patch else {
            return Err(self.reject(ServiceError::InvalidPatch {
                kind: E::KIND,
                reason: "patch must be a JSON object".to_string(),
            }));
        };
        self.check_body_id(id, fields.get("id").and_then(JsonValue::as_i64))?;

        let Some(existing) = self.repository.find_by_id(id)? else {
            return Err(self.reject(ServiceError::NotFound { kind: E::KIND, id }));
        };

        let merged = self.merge(existing, fields)?;
        let stored = self.replace(merged)?;
        self.metrics.increment_updates();
        self.log_write(Event::EntityUpdated, &stored);
        Ok(stored)
    }

    pub fn find_one(&self, id: i64) -> ServiceResult<Option<E>> {
        Ok(self.repository.find_by_id(id)?)
    }

    /// Returns one page of all entities
    pub fn find_all(&self, request: &PageRequest) -> ServiceResult<Page<E>> {
        Ok(self.repository.find_page(&Condition::All, request)?)
    }

    /// Deletes from the store, then from the search index
    pub fn delete(&self, id: i64) -> ServiceResult<()> {
        self.repository
            .delete_by_id(id)
            .map_err(|e| self.reject(e.into()))?;
        self.metrics.increment_deletes();
        if self.search.remove(id)? {
            self.metrics.increment_index_removals();
        }

        let id = id.to_string();
        log_event_with_fields(
            Event::EntityDeleted,
            &[("entity", E::KIND.as_str()), ("id", id.as_str())],
        );
        Ok(())
    }

    fn persist(&self, entity: E) -> ServiceResult<E> {
        let stored = self
            .repository
            .save(entity)
            .map_err(|e| self.reject(e.into()))?;
        self.mirror(&stored)?;
        Ok(stored)
    }

    /// Writes over an existing row; a row deleted meanwhile stays deleted
    fn replace(&self, entity: E) -> ServiceResult<E> {
        let stored = self.repository.update(entity).map_err(|e| {
            self.reject(match e {
                StoreError::NotFound { kind, id } => ServiceError::NotFound { kind, id },
                other => other.into(),
            })
        })?;
        self.mirror(&stored)?;
        Ok(stored)
    }

    fn mirror(&self, stored: &E) -> ServiceResult<()> {
        if self.search.index(stored)? {
            self.metrics.increment_index_writes();
        }
        Ok(())
    }

    fn check_body_id(&self, path: i64, body: Option<i64>) -> ServiceResult<()> {
        match body {
            None => Err(self.reject(ServiceError::IdMissing { kind: E::KIND })),
            Some(body) if body != path => Err(self.reject(ServiceError::IdMismatch {
                kind: E::KIND,
                path,
                body,
            })),
            Some(_) => Ok(()),
        }
    }

    fn merge(&self, existing: E, patch: serde_json::Map<String, JsonValue>) -> ServiceResult<E> {
        let invalid = |reason: String| ServiceError::InvalidPatch {
            kind: E::KIND,
            reason,
        };

        let mut document = match serde_json::to_value(existing) {
            Ok(JsonValue::Object(document)) => document,
            Ok(_) => return Err(self.reject(invalid("entity is not a JSON object".to_string()))),
            Err(e) => return Err(self.reject(invalid(e.to_string()))),
        };
        for (key, value) in patch {
            if !value.is_null() {
                document.insert(key, value);
            }
        }
        serde_json::from_value(JsonValue::Object(document))
            .map_err(|e| self.reject(invalid(e.to_string())))
    }

    fn reject(&self, err: ServiceError) -> ServiceError {
        self.metrics.increment_writes_rejected();
        log_event_with_fields(
            Event::WriteRejected,
            &[
                ("entity", E::KIND.as_str()),
                ("code", err.code()),
                ("reason", err.to_string().as_str()),
            ],
        );
        err
    }

    fn log_write(&self, event: Event, entity: &E) {
        let id = entity.id().map(|id| id.to_string()).unwrap_or_default();
        log_event_with_fields(event, &[("entity", E::KIND.as_str()), ("id", id.as_str())]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Album, EntityKind, Photo, Tag};
    use crate::search::InMemorySearchIndex;
    use crate::storage::InMemoryStore;
    use serde_json::json;

    type Service<E> = EntityService<E, InMemoryStore, InMemorySearchIndex>;

    struct Fixture {
        store: Arc<InMemoryStore>,
        search: Arc<InMemorySearchIndex>,
        metrics: Arc<MetricsRegistry>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                store: Arc::new(InMemoryStore::new()),
                search: Arc::new(InMemorySearchIndex::new()),
                metrics: Arc::new(MetricsRegistry::new()),
            }
        }

        fn service<E: crate::storage::Stored>(&self) -> Service<E> {
            EntityService::new(
                Arc::clone(&self.store),
                Arc::clone(&self.search),
                Arc::clone(&self.metrics),
            )
        }
    }

    #[test]
    fn test_save_assigns_id_and_indexes() {
        let fx = Fixture::new();
        let tag = fx.service::<Tag>().save(Tag::new("sky")).unwrap();

        let id = tag.id.unwrap();
        assert_eq!(fx.search.document(EntityKind::Tag, id).unwrap()["name"], "sky");
        assert_eq!(fx.metrics.snapshot().entities_saved, 1);
    }

    #[test]
    fn test_save_with_id_rejected() {
        let fx = Fixture::new();
        let mut tag = Tag::new("sky");
        tag.id = Some(4);

        let err = fx.service::<Tag>().save(tag).unwrap_err();
        assert_eq!(err, ServiceError::IdAlreadySet { kind: EntityKind::Tag });
        assert!(fx.search.is_empty());
        assert_eq!(fx.metrics.snapshot().writes_rejected, 1);
    }

    #[test]
    fn test_save_photo_stamps_upload_time() {
        let fx = Fixture::new();
        let photo = fx.service::<Photo>().save(Photo::new("p")).unwrap();
        assert!(photo.uploaded.is_some());
        assert_eq!(photo.taken, photo.uploaded);
    }

    #[test]
    fn test_failed_store_write_not_indexed() {
        let fx = Fixture::new();
        let err = fx
            .service::<Photo>()
            .save(Photo::new("p").with_album(99))
            .unwrap_err();
        assert_eq!(err.code(), "GALLERY_STORE_DANGLING_REFERENCE");
        assert!(fx.search.is_empty());
    }

    #[test]
    fn test_update_id_rules() {
        let fx = Fixture::new();
        let service = fx.service::<Album>();
        let album = service.save(Album::new("trip")).unwrap();
        let id = album.id.unwrap();

        let err = service.update(id, Album::new("no id")).unwrap_err();
        assert_eq!(err.code(), "GALLERY_ID_NULL");

        let mut other = album.clone();
        other.id = Some(id + 1);
        let err = service.update(id, other).unwrap_err();
        assert_eq!(err.code(), "GALLERY_ID_INVALID");

        let mut missing = album.clone();
        missing.id = Some(500);
        assert!(service.update(500, missing).unwrap_err().is_not_found());

        let renamed = Album {
            title: "renamed".to_string(),
            ..album
        };
        let stored = service.update(id, renamed).unwrap();
        assert_eq!(stored.title, "renamed");
        assert_eq!(fx.search.document(EntityKind::Album, id).unwrap()["title"], "renamed");
    }

    #[test]
    fn test_partial_update_merges_non_null_fields() {
        let fx = Fixture::new();
        let service = fx.service::<Album>();
        let album = service
            .save(Album::new("trip").with_description("summer"))
            .unwrap();
        let id = album.id.unwrap();

        let patched = service
            .partial_update(id, json!({"id": id, "title": "trip 2", "description": null}))
            .unwrap();
        assert_eq!(patched.title, "trip 2");
        assert_eq!(patched.description.as_deref(), Some("summer"));
    }

    #[test]
    fn test_partial_update_rejects_bad_patch() {
        let fx = Fixture::new();
        let service = fx.service::<Tag>();
        let id = service.save(Tag::new("sky")).unwrap().id.unwrap();

        let err = service.partial_update(id, json!([1, 2])).unwrap_err();
        assert_eq!(err.code(), "GALLERY_INVALID_PATCH");

        let err = service.partial_update(id, json!({"id": id, "name": 5})).unwrap_err();
        assert_eq!(err.code(), "GALLERY_INVALID_PATCH");

        let err = service.partial_update(id, json!({"name": "x"})).unwrap_err();
        assert_eq!(err.code(), "GALLERY_ID_NULL");
    }

    #[test]
    fn test_delete_removes_from_index() {
        let fx = Fixture::new();
        let service = fx.service::<Tag>();
        let id = service.save(Tag::new("sky")).unwrap().id.unwrap();

        service.delete(id).unwrap();
        assert!(service.find_one(id).unwrap().is_none());
        assert!(fx.search.is_empty());

        let err = service.delete(id).unwrap_err();
        assert_eq!(
            err,
            ServiceError::Store(StoreError::NotFound {
                kind: EntityKind::Tag,
                id
            })
        );
    }

    #[test]
    fn test_linked_tag_delete_keeps_search_in_sync() {
        let fx = Fixture::new();
        let tags = fx.service::<Tag>();
        let photos = fx.service::<Photo>();
        let tag_id = tags.save(Tag::new("sky")).unwrap().id.unwrap();
        let photo = photos.save(Photo::new("p").with_tags([tag_id])).unwrap();
        let photo_id = photo.id.unwrap();

        let err = tags.delete(tag_id).unwrap_err();
        assert_eq!(err.code(), "GALLERY_STORE_STILL_REFERENCED");
        assert!(tags.find_one(tag_id).unwrap().is_some());
        assert!(fx.search.document(EntityKind::Tag, tag_id).is_some());

        let stored: Photo = photos.find_one(photo_id).unwrap().unwrap();
        let document = fx.search.document(EntityKind::Photo, photo_id).unwrap();
        let indexed: Vec<i64> = document["tagIds"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|v| v.as_i64())
            .collect();
        assert_eq!(indexed, stored.tag_ids.iter().copied().collect::<Vec<_>>());

        photos
            .partial_update(photo_id, json!({"id": photo_id, "tagIds": []}))
            .unwrap();
        tags.delete(tag_id).unwrap();
        let document = fx.search.document(EntityKind::Photo, photo_id).unwrap();
        assert_eq!(document["tagIds"], json!([]));
    }

    #[test]
    fn test_update_after_delete_does_not_resurrect() {
        let fx = Fixture::new();
        let service = fx.service::<Album>();
        let album = service.save(Album::new("trip")).unwrap();
        let id = album.id.unwrap();
        service.delete(id).unwrap();

        let err = service.update(id, album).unwrap_err();
        assert_eq!(err, ServiceError::NotFound { kind: EntityKind::Album, id });
        assert!(service.find_one(id).unwrap().is_none());
        assert!(fx.search.document(EntityKind::Album, id).is_none());
    }

    #[test]
    fn test_disabled_index_counts_nothing() {
        let fx = Fixture {
            search: Arc::new(InMemorySearchIndex::disabled()),
            ..Fixture::new()
        };
        let service = fx.service::<Tag>();
        let id = service.save(Tag::new("sky")).unwrap().id.unwrap();
        service.delete(id).unwrap();

        let snapshot = fx.metrics.snapshot();
        assert_eq!(snapshot.entities_saved, 1);
        assert_eq!(snapshot.entities_deleted, 1);
        assert_eq!(snapshot.index_writes, 0);
        assert_eq!(snapshot.index_removals, 0);
    }

    #[test]
    fn test_index_counters_follow_applied_writes() {
        let fx = Fixture::new();
        let service = fx.service::<Tag>();
        let id = service.save(Tag::new("sky")).unwrap().id.unwrap();
        service.delete(id).unwrap();

        let snapshot = fx.metrics.snapshot();
        assert_eq!(snapshot.index_writes, 1);
        assert_eq!(snapshot.index_removals, 1);
    }

    #[test]
    fn test_find_all_pages() {
        let fx = Fixture::new();
        let service = fx.service::<Tag>();
        for name in ["aa", "bb", "cc"] {
            service.save(Tag::new(name)).unwrap();
        }

        let page = service.find_all(&PageRequest::of(1, 2)).unwrap();
        assert_eq!(page.content.len(), 1);
        assert_eq!(page.total_elements, 3);
    }
}
