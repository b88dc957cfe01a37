pub mod registry;

pub use registry::InMemoryMetricsRegistry;
