//! Service error types
//!
//! Store and search failures pass through unchanged; the remaining variants
//! are the identifier rules of the write operations.

use thiserror::Error;

use crate::domain::EntityKind;
use crate::search::SearchError;
use crate::storage::StoreError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Search(#[from] SearchError),

    #[error("{kind} {id} not found")]
    NotFound { kind: EntityKind, id: i64 },

    /// Create called with an entity that already has an id
    #[error("a new {kind} cannot already have an id")]
    IdAlreadySet { kind: EntityKind },

    #[error("{kind} id is missing")]
    IdMissing { kind: EntityKind },

    #[error("{kind} id {body} does not match path id {path}")]
    IdMismatch {
        kind: EntityKind,
        path: i64,
        body: i64,
    },

    #[error("invalid patch for {kind}: {reason}")]
    InvalidPatch { kind: EntityKind, reason: String },
}

impl ServiceError {
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::Store(e) => e.code(),
            ServiceError::Search(e) => e.code(),
            ServiceError::NotFound { .. } => "GALLERY_NOT_FOUND",
            ServiceError::IdAlreadySet { .. } => "GALLERY_ID_EXISTS",
            ServiceError::IdMissing { .. } => "GALLERY_ID_NULL",
            ServiceError::IdMismatch { .. } => "GALLERY_ID_INVALID",
            ServiceError::InvalidPatch { .. } => "GALLERY_INVALID_PATCH",
        }
    }

    /// Returns true if the entity addressed by the request does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ServiceError::NotFound { .. } | ServiceError::Store(StoreError::NotFound { .. })
        )
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_codes_pass_through() {
        let err = ServiceError::from(StoreError::LockPoisoned);
        assert_eq!(err.code(), "GALLERY_STORE_LOCK_POISONED");
        assert_eq!(err.to_string(), "store lock poisoned");
    }

    #[test]
    fn test_not_found_detection() {
        let store = ServiceError::from(StoreError::NotFound {
            kind: EntityKind::Tag,
            id: 1,
        });
        assert!(store.is_not_found());
        assert!(!ServiceError::IdMissing {
            kind: EntityKind::Tag
        }
        .is_not_found());
    }
}
