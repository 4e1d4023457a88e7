//! Observable events
//!
//! Events are explicit and typed; log lines never use ad hoc event names.

use std::fmt;

use super::logger::Severity;

/// Observable events in the gallery service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Lifecycle
    /// Startup begins
    BootStart,
    /// Configuration loaded and validated
    ConfigLoaded,
    /// Listening for requests
    Serving,
    /// Shutdown complete
    ShutdownComplete,

    // Queries
    /// Criteria compiled, store lookup begins
    QueryBegin,
    /// Store lookup finished
    QueryComplete,
    /// Store lookup failed
    QueryFailed,

    // Writes
    /// Entity created
    EntitySaved,
    /// Entity replaced or patched
    EntityUpdated,
    /// Entity deleted
    EntityDeleted,
    /// Write refused by an id rule or the store
    WriteRejected,

    // Search index
    /// Document written to the search index
    SearchIndexed,
    /// Document removed from the search index
    SearchRemoved,

    // HTTP
    /// Request rejected before reaching a service
    RequestRejected,
}

impl Event {
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::BootStart => "GALLERY_STARTUP_BEGIN",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::Serving => "SERVING",
            Event::ShutdownComplete => "SHUTDOWN_COMPLETE",

            Event::QueryBegin => "QUERY_BEGIN",
            Event::QueryComplete => "QUERY_COMPLETE",
            Event::QueryFailed => "QUERY_FAILED",

            Event::EntitySaved => "ENTITY_SAVED",
            Event::EntityUpdated => "ENTITY_UPDATED",
            Event::EntityDeleted => "ENTITY_DELETED",
            Event::WriteRejected => "WRITE_REJECTED",

            Event::SearchIndexed => "SEARCH_INDEXED",
            Event::SearchRemoved => "SEARCH_REMOVED",

            Event::RequestRejected => "REQUEST_REJECTED",
        }
    }

    /// Returns the severity this event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::QueryFailed => Severity::Error,
            Event::WriteRejected | Event::RequestRejected => Severity::Warn,
            Event::SearchIndexed | Event::SearchRemoved => Severity::Trace,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
