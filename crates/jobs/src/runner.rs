use crate::RuleReloadJob;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::info;

fn spawn_job(job: RuleReloadJob, shutdown: &Option<CancellationToken>) -> JoinHandle<()> {
    let job = match shutdown {
        Some(token) => job.with_cancellation(token.clone()),
        None => job,
    };
    Arc::new(job).start()
}

pub struct JobRunner {
    rule_reloads: Vec<RuleReloadJob>,
    shutdown: Option<CancellationToken>,
}

impl JobRunner {
    pub fn new() -> Self {
        Self {
            rule_reloads: Vec::new(),
            shutdown: None,
        }
    }

    pub fn with_rule_reload(mut self, job: RuleReloadJob) -> Self {
        self.rule_reloads.push(job);
        self
    }

    pub fn with_rule_reloads(mut self, jobs: impl IntoIterator<Item = RuleReloadJob>) -> Self {
        self.rule_reloads.extend(jobs);
        self
    }

    pub fn with_shutdown_token(mut self, token: CancellationToken) -> Self {
        self.shutdown = Some(token);
        self
    }

    pub async fn start(self) -> Vec<JoinHandle<()>> {
        info!("Starting background job runner");

        let handles: Vec<JoinHandle<()>> = self
            .rule_reloads
            .into_iter()
            .map(|job| spawn_job(job, &self.shutdown))
            .collect();

        info!(jobs = handles.len(), "All background jobs started");
        handles
    }
}

impl Default for JobRunner {
    fn default() -> Self {
        Self::new()
    }
}
