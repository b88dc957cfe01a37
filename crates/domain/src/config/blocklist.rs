use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Settings for one blocklist router node.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BlocklistConfig {
    /// Identifier used in logs and for scoping the allow/deny counters.
    #[serde(default = "default_id")]
    pub id: String,

    /// Seconds between blocklist reloads. `0` loads the list once.
    #[serde(default)]
    pub blocklist_refresh_secs: u64,

    /// Seconds between allowlist reloads. `0` loads the list once.
    #[serde(default)]
    pub allowlist_refresh_secs: u64,

    /// Extended DNS Error attached to NXDOMAIN answers for blocked queries.
    #[serde(default)]
    pub extended_error: Option<ExtendedErrorConfig>,
}

impl BlocklistConfig {
    pub fn blocklist_refresh(&self) -> Option<Duration> {
        non_zero_secs(self.blocklist_refresh_secs)
    }

    pub fn allowlist_refresh(&self) -> Option<Duration> {
        non_zero_secs(self.allowlist_refresh_secs)
    }
}

impl Default for BlocklistConfig {
    fn default() -> Self {
        Self {
            id: default_id(),
            blocklist_refresh_secs: 0,
            allowlist_refresh_secs: 0,
            extended_error: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ExtendedErrorConfig {
    /// RFC 8914 INFO-CODE, e.g. 15 (Blocked) or 17 (Filtered).
    pub info_code: u16,

    /// EXTRA-TEXT template; may reference `{{ .Name }}`, `{{ .List }}`, `{{ .Rule }}` etc.
    #[serde(default)]
    pub extra_text: String,
}

fn non_zero_secs(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}

fn default_id() -> String {
    "blocklist".to_string()
}
