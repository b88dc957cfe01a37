use std::fmt;
use std::sync::Arc;

/// Identifies the rule list and the rule within it that matched a query.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MatchResult {
    pub list: Arc<str>,
    pub rule: Arc<str>,
}

impl MatchResult {
    pub fn new(list: impl Into<Arc<str>>, rule: impl Into<Arc<str>>) -> Self {
        Self {
            list: list.into(),
            rule: rule.into(),
        }
    }
}

impl fmt::Display for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.list, self.rule)
    }
}
