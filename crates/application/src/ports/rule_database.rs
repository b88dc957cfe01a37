use async_trait::async_trait;
use blockgate_domain::{DomainError, MatchResult};
use hickory_proto::op::Message;
use std::net::IpAddr;
use std::sync::Arc;

/// Outcome of a successful rule lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMatch {
    /// Addresses to answer with instead of the real ones. May be empty.
    pub addresses: Vec<IpAddr>,
    /// Host names for reverse lookups. May be empty.
    pub names: Vec<String>,
    pub result: MatchResult,
}

impl RuleMatch {
    pub fn new(result: MatchResult) -> Self {
        Self {
            addresses: vec![],
            names: vec![],
            result,
        }
    }

    pub fn with_addresses(mut self, addresses: Vec<IpAddr>) -> Self {
        self.addresses = addresses;
        self
    }

    pub fn with_names(mut self, names: Vec<String>) -> Self {
        self.names = names;
        self
    }
}

/// Immutable snapshot of allow or block rules.
///
/// Implementations never change once built; `reload` produces a fresh
/// instance and leaves `self` usable by whoever still holds it.
#[async_trait]
pub trait RuleDatabase: Send + Sync {
    fn match_query(&self, query: &Message) -> Option<RuleMatch>;

    async fn reload(&self) -> Result<Arc<dyn RuleDatabase>, DomainError>;
}
