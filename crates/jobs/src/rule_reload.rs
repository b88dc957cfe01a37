use blockgate_application::services::{RuleList, RuleSet};
use blockgate_application::use_cases::BlocklistResolver;
use blockgate_domain::DomainError;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Background job that periodically replaces one rule list with a freshly
/// loaded instance.
///
///   - Sleeps a full interval before every reload, so the first reload
///     happens one interval after start and a slow reload is always followed
///     by a full pause
///   - A failed reload is logged and the active list stays in place
///   - Runs until the cancellation token fires
pub struct RuleReloadJob {
    id: Arc<str>,
    rules: Arc<RuleSet>,
    list: RuleList,
    interval: Duration,
    shutdown: CancellationToken,
}

impl RuleReloadJob {
    pub fn new(
        id: impl Into<Arc<str>>,
        rules: Arc<RuleSet>,
        list: RuleList,
        interval: Duration,
    ) -> Self {
        Self {
            id: id.into(),
            rules,
            list,
            interval,
            shutdown: CancellationToken::new(),
        }
    }

    /// One job per list of `resolver` that is configured with a non-zero
    /// refresh period.
    pub fn for_resolver(resolver: &BlocklistResolver) -> Vec<Self> {
        [RuleList::Blocklist, RuleList::Allowlist]
            .into_iter()
            .filter_map(|list| {
                resolver
                    .refresh_interval(list)
                    .map(|interval| Self::new(resolver.id(), resolver.rules(), list, interval))
            })
            .collect()
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub fn list(&self) -> RuleList {
        self.list
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub async fn reload_once(&self) -> Result<(), DomainError> {
        debug!(id = %self.id, list = %self.list, "Reloading rules");
        match self.rules.reload(self.list).await {
            Ok(()) => {
                info!(id = %self.id, list = %self.list, "Rules reloaded");
                Ok(())
            }
            Err(e) => {
                error!(id = %self.id, list = %self.list, error = %e, "Failed to load rules");
                Err(e)
            }
        }
    }

    pub fn start(self: Arc<Self>) -> JoinHandle<()> {
        if self.interval.is_zero() {
            warn!(id = %self.id, list = %self.list, "Refresh period is zero, not reloading");
            return tokio::spawn(async {});
        }

        info!(
            id = %self.id,
            list = %self.list,
            interval_secs = self.interval.as_secs_f64(),
            "Starting rule reload job"
        );

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        info!(id = %self.id, list = %self.list, "RuleReloadJob: shutting down");
                        break;
                    }
                    _ = tokio::time::sleep(self.interval) => {
                        let _ = self.reload_once().await;
                    }
                }
            }
        })
    }
}
