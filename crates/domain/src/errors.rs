use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Rule database reload failed: {0}")]
    RuleReload(String),

    #[error("Failed to apply extended error: {0}")]
    ExtendedError(String),

    #[error("Invalid extended error template: {0}")]
    InvalidTemplate(String),

    #[error("Upstream resolver {resolver} failed: {reason}")]
    Upstream { resolver: String, reason: String },
}

impl DomainError {
    pub fn no_question() -> Self {
        DomainError::InvalidQuery("no question in query".to_string())
    }
}
