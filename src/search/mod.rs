//! Search index fan-out
//!
//! Entity services mirror every write into a [`SearchIndex`]. The index
//! keeps one JSON document per entity; querying it is out of scope here.

use std::collections::BTreeMap;
use std::sync::RwLock;

use thiserror::Error;

use crate::domain::{Entity, EntityKind};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("search index lock poisoned")]
    LockPoisoned,

    #[error("cannot index {kind} without an id")]
    MissingId { kind: EntityKind },

    #[error("cannot serialize {kind}: {reason}")]
    Serialization { kind: EntityKind, reason: String },
}

impl SearchError {
    pub fn code(&self) -> &'static str {
        match self {
            SearchError::LockPoisoned => "GALLERY_SEARCH_LOCK_POISONED",
            SearchError::MissingId { .. } => "GALLERY_SEARCH_MISSING_ID",
            SearchError::Serialization { .. } => "GALLERY_SEARCH_SERIALIZATION",
        }
    }
}

pub type SearchResult<T> = Result<T, SearchError>;

/// Write side of a full-text index
pub trait SearchIndex<E: Entity>: Send + Sync {
    /// Inserts or replaces the document for `entity`. Returns `false` when
    /// the index dropped the write.
    fn index(&self, entity: &E) -> SearchResult<bool>;

    /// Removes the document for `id`. Returns `true` if a document was
    /// removed; absent documents are ignored.
    fn remove(&self, id: i64) -> SearchResult<bool>;
}

/// Document store keyed by entity kind and id
#[derive(Debug)]
pub struct InMemorySearchIndex {
    enabled: bool,
    documents: RwLock<BTreeMap<(EntityKind, i64), serde_json::Value>>,
}

impl InMemorySearchIndex {
    pub fn new() -> Self {
        Self {
            enabled: true,
            documents: RwLock::new(BTreeMap::new()),
        }
    }

    /// An index that accepts and drops every write
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::new()
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Returns the stored document, if any
    pub fn document(&self, kind: EntityKind, id: i64) -> Option<serde_json::Value> {
        self.documents.read().ok()?.get(&(kind, id)).cloned()
    }

    /// Returns the total number of documents across all kinds
    pub fn len(&self) -> usize {
        self.documents.read().map(|docs| docs.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemorySearchIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity> SearchIndex<E> for InMemorySearchIndex {
    fn index(&self, entity: &E) -> SearchResult<bool> {
        if !self.enabled {
            return Ok(false);
        }
        let id = entity
            .id()
            .ok_or(SearchError::MissingId { kind: E::KIND })?;
        let document = serde_json::to_value(entity).map_err(|e| SearchError::Serialization {
            kind: E::KIND,
            reason: e.to_string(),
        })?;

        self.documents
            .write()
            .map_err(|_| SearchError::LockPoisoned)?
            .insert((E::KIND, id), document);
        Ok(true)
    }

    fn remove(&self, id: i64) -> SearchResult<bool> {
        if !self.enabled {
            return Ok(false);
        }
        let removed = self
            .documents
            .write()
            .map_err(|_| SearchError::LockPoisoned)?
            .remove(&(E::KIND, id));
        Ok(removed.is_some())
    }
}
