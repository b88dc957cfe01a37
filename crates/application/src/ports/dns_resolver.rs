use async_trait::async_trait;
use blockgate_domain::{ClientInfo, DomainError};
use hickory_proto::op::Message;

/// A node in the resolver chain. Routing resolvers hold other `DnsResolver`s
/// and hand queries to them, so chains can be nested arbitrarily.
#[async_trait]
pub trait DnsResolver: Send + Sync {
    async fn resolve(&self, query: &Message, client: &ClientInfo)
        -> Result<Message, DomainError>;

    /// Identifier used in logs when this resolver is the forwarding target.
    fn name(&self) -> &str;
}
