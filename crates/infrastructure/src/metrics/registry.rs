use blockgate_application::ports::MetricsRegistry;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Named counters shared by every component of the process.
///
/// Keys are `<group>.<id>.<name>`, e.g. `router.ads.deny`.
#[derive(Default)]
pub struct InMemoryMetricsRegistry {
    counters: DashMap<String, Arc<AtomicU64>>,
}

impl InMemoryMetricsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<u64> {
        self.counters
            .get(key)
            .map(|counter| counter.load(Ordering::Relaxed))
    }

    /// All counters sorted by key.
    pub fn snapshot(&self) -> Vec<(String, u64)> {
        let mut values: Vec<(String, u64)> = self
            .counters
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().load(Ordering::Relaxed)))
            .collect();
        values.sort_by(|a, b| a.0.cmp(&b.0));
        values
    }
}

impl MetricsRegistry for InMemoryMetricsRegistry {
    fn counter(&self, group: &str, id: &str, name: &str) -> Arc<AtomicU64> {
        let key = format!("{}.{}.{}", group, id, name);
        Arc::clone(self.counters.entry(key).or_default().value())
    }
}
