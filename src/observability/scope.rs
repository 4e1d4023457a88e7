//! Query scope for paired begin/complete logging
//!
//! - Logs `QUERY_BEGIN` on creation
//! - Logs `QUERY_COMPLETE` or `QUERY_FAILED` when finished
//! - Logs `QUERY_INCOMPLETE` if dropped unfinished

use std::cell::Cell;
use std::time::Instant;

use super::events::Event;
use super::logger::{Logger, Severity};
use crate::planner::ExplainCondition;

/// Tracks one store query from compilation to result
pub struct QueryScope {
    entity: &'static str,
    operation: &'static str,
    started: Instant,
    finished: Cell<bool>,
}

impl QueryScope {
    /// Logs `QUERY_BEGIN` with the compiled condition
    pub fn begin(entity: &'static str, operation: &'static str, explain: &ExplainCondition) -> Self {
        let predicates = explain.predicates.to_string();
        let joins = explain.joins.join(",");
        Logger::log(
            Event::QueryBegin.severity(),
            Event::QueryBegin.as_str(),
            &[
                ("entity", entity),
                ("operation", operation),
                ("condition", explain.condition.as_str()),
                ("predicates", predicates.as_str()),
                ("joins", joins.as_str()),
            ],
        );

        Self {
            entity,
            operation,
            started: Instant::now(),
            finished: Cell::new(false),
        }
    }

    /// Logs `QUERY_COMPLETE` with the row count and elapsed time
    pub fn complete(self, rows: u64) {
        self.finished.set(true);
        let rows = rows.to_string();
        let elapsed = self.elapsed_us();
        Logger::log(
            Event::QueryComplete.severity(),
            Event::QueryComplete.as_str(),
            &[
                ("entity", self.entity),
                ("operation", self.operation),
                ("rows", rows.as_str()),
                ("duration_us", elapsed.as_str()),
            ],
        );
    }

    /// Logs `QUERY_FAILED` with the error code
    pub fn fail(self, code: &str, reason: &str) {
        self.finished.set(true);
        Logger::log(
            Event::QueryFailed.severity(),
            Event::QueryFailed.as_str(),
            &[
                ("entity", self.entity),
                ("operation", self.operation),
                ("code", code),
                ("reason", reason),
            ],
        );
    }

    fn elapsed_us(&self) -> String {
        self.started.elapsed().as_micros().to_string()
    }
}

impl Drop for QueryScope {
    fn drop(&mut self) {
        if !self.finished.get() {
            Logger::log(
                Severity::Warn,
                "QUERY_INCOMPLETE",
                &[("entity", self.entity), ("operation", self.operation)],
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::Condition;

    #[test]
    fn test_scope_complete() {
        let explain = ExplainCondition::from_condition(&Condition::All);
        let scope = QueryScope::begin("photo", "find", &explain);
        assert!(!scope.finished.get());
        scope.complete(3);
    }

    #[test]
    fn test_scope_fail() {
        let explain = ExplainCondition::from_condition(&Condition::All);
        QueryScope::begin("tag", "count", &explain).fail("GALLERY_STORE_LOCK_POISONED", "poisoned");
    }
}
