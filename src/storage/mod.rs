//! Storage subsystem
//!
//! Repository traits consumed by the services, and the in-memory store that
//! implements them for every gallery entity.
//!
//! # Referential rules
//!
//! - Writes naming a missing album, user or tag fail with `DanglingReference`
//! - Deleting an album or user still referenced fails with `StillReferenced`
//! - Deleting a tag drops its photo/tag link rows

mod errors;
mod memory;
mod repository;

pub use errors::{StoreError, StoreResult};
pub use memory::{InMemoryStore, Stored, Tables};
pub use repository::{CrudRepository, QueryRepository};
