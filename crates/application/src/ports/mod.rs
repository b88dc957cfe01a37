mod dns_resolver;
mod extended_error_template;
mod metrics_registry;
mod rule_database;

pub use dns_resolver::DnsResolver;
pub use extended_error_template::{ExtendedErrorInput, ExtendedErrorTemplate};
pub use metrics_registry::MetricsRegistry;
pub use rule_database::{RuleDatabase, RuleMatch};

// Re-export for convenience
pub use blockgate_domain::{ClientInfo, MatchResult};
