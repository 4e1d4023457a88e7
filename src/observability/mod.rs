//! Observability subsystem
//!
//! - Structured logging: one JSON line per event, keys sorted
//! - Atomic operational counters, served at `/management/metrics`
//! - Paired begin/complete logging around every criteria query
//!
//! Logging and counting never change a query result or a write outcome.
//!
//! ```ignore
//! use gallery::observability::{log_event_with_fields, Event, MetricsRegistry};
//!
//! log_event_with_fields(Event::EntitySaved, &[("entity", "photo"), ("id", "7")]);
//!
//! let registry = MetricsRegistry::new();
//! registry.increment_queries();
//! ```

mod events;
mod logger;
mod metrics;
mod scope;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::{MetricsRegistry, MetricsSnapshot};
pub use scope::QueryScope;

/// Log an event at its own severity
pub fn log_event(event: Event) {
    Logger::log(event.severity(), event.as_str(), &[]);
}

/// Log an event with fields at its own severity
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}
