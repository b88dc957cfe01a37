use std::sync::atomic::AtomicU64;
use std::sync::Arc;

/// Process-wide registry of named counters.
///
/// Asking twice for the same `(group, id, name)` returns the same counter.
pub trait MetricsRegistry: Send + Sync {
    fn counter(&self, group: &str, id: &str, name: &str) -> Arc<AtomicU64>;
}
