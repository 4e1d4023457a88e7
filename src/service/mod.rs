//! Application services
//!
//! - [`QueryService`]: criteria lookups, read-only
//! - [`EntityService`]: create, update, delete with search index fan-out

mod entity;
mod errors;
mod query;

pub use entity::EntityService;
pub use errors::{ServiceError, ServiceResult};
pub use query::QueryService;
