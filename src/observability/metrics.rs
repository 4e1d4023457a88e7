//! Metrics registry
//!
//! - Counters only, monotonic
//! - Reset only on process start
//! - Thread-safe, lock-free

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Operational counters shared by services and the HTTP layer
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    /// Criteria list queries
    queries_executed: AtomicU64,
    /// Criteria count queries
    counts_executed: AtomicU64,
    /// Paged queries
    pages_served: AtomicU64,
    /// Rows returned by list and page queries
    rows_returned: AtomicU64,
    /// Queries that failed in the store
    queries_failed: AtomicU64,
    entities_saved: AtomicU64,
    entities_updated: AtomicU64,
    entities_deleted: AtomicU64,
    /// Writes refused by id rules or the store
    writes_rejected: AtomicU64,
    /// Search index writes
    index_writes: AtomicU64,
    /// Search index removals
    index_removals: AtomicU64,
    /// Requests refused before reaching a service
    requests_rejected: AtomicU64,
}

impl MetricsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn bump(counter: &AtomicU64, by: u64) {
        counter.fetch_add(by, Ordering::Relaxed);
    }

    // Query metrics

    pub fn increment_queries(&self) {
        Self::bump(&self.queries_executed, 1);
    }

    pub fn increment_counts(&self) {
        Self::bump(&self.counts_executed, 1);
    }

    pub fn increment_pages(&self) {
        Self::bump(&self.pages_served, 1);
    }

    pub fn add_rows_returned(&self, rows: u64) {
        Self::bump(&self.rows_returned, rows);
    }

    pub fn increment_queries_failed(&self) {
        Self::bump(&self.queries_failed, 1);
    }

    // Write metrics

    pub fn increment_saves(&self) {
        Self::bump(&self.entities_saved, 1);
    }

    pub fn increment_updates(&self) {
        Self::bump(&self.entities_updated, 1);
    }

    pub fn increment_deletes(&self) {
        Self::bump(&self.entities_deleted, 1);
    }

    pub fn increment_writes_rejected(&self) {
        Self::bump(&self.writes_rejected, 1);
    }

    // Search metrics

    pub fn increment_index_writes(&self) {
        Self::bump(&self.index_writes, 1);
    }

    pub fn increment_index_removals(&self) {
        Self::bump(&self.index_removals, 1);
    }

    // HTTP metrics

    pub fn increment_requests_rejected(&self) {
        Self::bump(&self.requests_rejected, 1);
    }

    /// Returns a point-in-time copy of every counter
    pub fn snapshot(&self) -> MetricsSnapshot {
        let load = |c: &AtomicU64| c.load(Ordering::Relaxed);
        MetricsSnapshot {
            queries_executed: load(&self.queries_executed),
            counts_executed: load(&self.counts_executed),
            pages_served: load(&self.pages_served),
            rows_returned: load(&self.rows_returned),
            queries_failed: load(&self.queries_failed),
            entities_saved: load(&self.entities_saved),
            entities_updated: load(&self.entities_updated),
            entities_deleted: load(&self.entities_deleted),
            writes_rejected: load(&self.writes_rejected),
            index_writes: load(&self.index_writes),
            index_removals: load(&self.index_removals),
            requests_rejected: load(&self.requests_rejected),
        }
    }

    /// Returns every counter as a JSON object, keys in declaration order
    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.snapshot()).unwrap_or_else(|_| "{}".to_string())
    }
}

/// A point-in-time snapshot of all metrics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub queries_executed: u64,
    pub counts_executed: u64,
    pub pages_served: u64,
    pub rows_returned: u64,
    pub queries_failed: u64,
    pub entities_saved: u64,
    pub entities_updated: u64,
    pub entities_deleted: u64,
    pub writes_rejected: u64,
    pub index_writes: u64,
    pub index_removals: u64,
    pub requests_rejected: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_registry_is_zero() {
        assert_eq!(MetricsRegistry::new().snapshot(), MetricsSnapshot::default());
    }

    #[test]
    fn test_counters() {
        let metrics = MetricsRegistry::new();
        metrics.increment_queries();
        metrics.increment_queries();
        metrics.add_rows_returned(5);
        metrics.increment_saves();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.queries_executed, 2);
        assert_eq!(snapshot.rows_returned, 5);
        assert_eq!(snapshot.entities_saved, 1);
        assert_eq!(snapshot.entities_deleted, 0);
    }

    #[test]
    fn test_to_json() {
        let metrics = MetricsRegistry::new();
        metrics.increment_counts();

        let parsed: serde_json::Value = serde_json::from_str(&metrics.to_json()).unwrap();
        assert_eq!(parsed["counts_executed"], 1);
        assert_eq!(parsed["index_writes"], 0);
    }

    #[test]
    fn test_thread_safety() {
        use std::sync::Arc;
        use std::thread;

        let metrics = Arc::new(MetricsRegistry::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let m = Arc::clone(&metrics);
                thread::spawn(move || {
                    for _ in 0..100 {
                        m.increment_queries();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(metrics.snapshot().queries_executed, 400);
    }
}
