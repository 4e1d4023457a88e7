//! Store error types
//!
//! Error codes:
//! - GALLERY_STORE_LOCK_POISONED
//! - GALLERY_STORE_NOT_FOUND
//! - GALLERY_STORE_DANGLING_REFERENCE
//! - GALLERY_STORE_STILL_REFERENCED
//! - GALLERY_STORE_INVALID_ENTITY

use thiserror::Error;

use crate::domain::EntityKind;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A writer panicked while holding the table lock
    #[error("store lock poisoned")]
    LockPoisoned,

    #[error("{kind} {id} not found")]
    NotFound { kind: EntityKind, id: i64 },

    /// A write names an album, user or tag that does not exist
    #[error("{kind} {id} does not exist")]
    DanglingReference { kind: EntityKind, id: i64 },

    /// A delete would leave rows pointing at a missing entity
    #[error("{kind} {id} is still referenced by {by}")]
    StillReferenced {
        kind: EntityKind,
        id: i64,
        by: EntityKind,
    },

    #[error("invalid {kind}: {reason}")]
    InvalidEntity { kind: EntityKind, reason: String },
}

impl StoreError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::LockPoisoned => "GALLERY_STORE_LOCK_POISONED",
            StoreError::NotFound { .. } => "GALLERY_STORE_NOT_FOUND",
            StoreError::DanglingReference { .. } => "GALLERY_STORE_DANGLING_REFERENCE",
            StoreError::StillReferenced { .. } => "GALLERY_STORE_STILL_REFERENCED",
            StoreError::InvalidEntity { .. } => "GALLERY_STORE_INVALID_ENTITY",
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
