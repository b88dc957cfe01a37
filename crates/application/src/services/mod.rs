pub mod blocklist_metrics;
pub mod response_builder;
pub mod rule_set;

pub use blocklist_metrics::BlocklistMetrics;
pub use response_builder::{
    mark_nxdomain, ptr_response, reply_to, spoofed_answers, MAX_PTR_RESPONSES, SPOOF_TTL,
};
pub use rule_set::{RuleList, RuleSet, RuleSnapshot};
