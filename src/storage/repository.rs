//! Repository traits
//!
//! The query side consumes an opaque [`Condition`]; the write side works on
//! whole entities. A backing store implements both per entity type.

use super::errors::StoreResult;
use crate::domain::Entity;
use crate::executor::{Page, PageRequest};
use crate::planner::Condition;

/// Read-only access by compiled condition
pub trait QueryRepository<E: Entity>: Send + Sync {
    /// Returns every matching row, in ascending identifier order
    fn find_all(&self, condition: &Condition) -> StoreResult<Vec<E>>;

    /// Returns one sorted page of matching rows plus the total match count
    fn find_page(&self, condition: &Condition, request: &PageRequest) -> StoreResult<Page<E>>;

    /// Counts matching rows; always equal to `find_all(..).len()`
    fn count(&self, condition: &Condition) -> StoreResult<u64>;
}

/// Identifier-keyed writes
pub trait CrudRepository<E: Entity>: Send + Sync {
    fn find_by_id(&self, id: i64) -> StoreResult<Option<E>>;

    /// Inserts or replaces an entity. An entity without an identifier gets
    /// the next one from the sequence. Returns the stored entity.
    fn save(&self, entity: E) -> StoreResult<E>;

    /// Replaces an existing entity; fails with `NotFound` if its identifier
    /// is not stored. The existence check and the write are one step.
    fn update(&self, entity: E) -> StoreResult<E>;

    /// Deletes an entity; fails with `NotFound` if it does not exist
    fn delete_by_id(&self, id: i64) -> StoreResult<()>;

    fn exists_by_id(&self, id: i64) -> StoreResult<bool> {
        Ok(self.find_by_id(id)?.is_some())
    }
}
