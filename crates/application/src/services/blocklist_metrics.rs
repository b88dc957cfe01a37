use crate::ports::MetricsRegistry;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

const METRICS_GROUP: &str = "router";

/// Allow/deny counters of one blocklist router.
#[derive(Clone, Default)]
pub struct BlocklistMetrics {
    allowed: Arc<AtomicU64>,
    blocked: Arc<AtomicU64>,
}

impl BlocklistMetrics {
    /// Counters that are not registered anywhere.
    pub fn new() -> Self {
        Self::default()
    }

    /// Counters published as `router.<id>.allow` and `router.<id>.deny`.
    pub fn from_registry(registry: &dyn MetricsRegistry, id: &str) -> Self {
        Self {
            allowed: registry.counter(METRICS_GROUP, id, "allow"),
            blocked: registry.counter(METRICS_GROUP, id, "deny"),
        }
    }

    #[inline]
    pub fn record_allowed(&self) {
        self.allowed.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_blocked(&self) {
        self.blocked.fetch_add(1, Ordering::Relaxed);
    }

    pub fn allowed(&self) -> u64 {
        self.allowed.load(Ordering::Relaxed)
    }

    pub fn blocked(&self) -> u64 {
        self.blocked.load(Ordering::Relaxed)
    }
}
