use blockgate_domain::{DomainError, MatchResult};
use hickory_proto::op::Message;

#[derive(Debug, Clone, Copy)]
pub struct ExtendedErrorInput<'a> {
    pub query: &'a Message,
    pub matched: &'a MatchResult,
}

/// Attaches an RFC 8914 Extended DNS Error to a response for a blocked query.
pub trait ExtendedErrorTemplate: Send + Sync {
    fn apply(
        &self,
        response: &mut Message,
        input: ExtendedErrorInput<'_>,
    ) -> Result<(), DomainError>;
}
