use crate::ports::{
    DnsResolver, ExtendedErrorInput, ExtendedErrorTemplate, MetricsRegistry, RuleDatabase,
    RuleMatch,
};
use crate::services::{
    mark_nxdomain, ptr_response, reply_to, spoofed_answers, BlocklistMetrics, RuleList, RuleSet,
};
use async_trait::async_trait;
use blockgate_domain::{ClientInfo, DomainError};
use hickory_proto::op::Message;
use hickory_proto::rr::RecordType;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Optional collaborators of a [`BlocklistResolver`].
#[derive(Clone, Default)]
pub struct BlocklistOptions {
    /// Receives blocklist matches instead of answering NXDOMAIN.
    pub blocklist_resolver: Option<Arc<dyn DnsResolver>>,

    /// Without it nothing is ever blocked.
    pub blocklist_db: Option<Arc<dyn RuleDatabase>>,

    /// Reload period of the blocklist. Zero disables reloading.
    pub blocklist_refresh: Duration,

    /// Receives allowlist matches instead of the default upstream.
    pub allowlist_resolver: Option<Arc<dyn DnsResolver>>,

    /// Rules that override the blocklist.
    pub allowlist_db: Option<Arc<dyn RuleDatabase>>,

    /// Reload period of the allowlist. Zero disables reloading.
    pub allowlist_refresh: Duration,

    /// Extended DNS Error attached to NXDOMAIN answers.
    pub ede_template: Option<Arc<dyn ExtendedErrorTemplate>>,
}

/// Resolver that answers NXDOMAIN or a spoofed address for queries matching
/// the blocklist and passes everything else to the next resolver. The
/// allowlist always wins over the blocklist.
pub struct BlocklistResolver {
    id: Arc<str>,
    resolver: Arc<dyn DnsResolver>,
    blocklist_resolver: Option<Arc<dyn DnsResolver>>,
    allowlist_resolver: Option<Arc<dyn DnsResolver>>,
    ede_template: Option<Arc<dyn ExtendedErrorTemplate>>,
    blocklist_refresh: Duration,
    allowlist_refresh: Duration,
    rules: Arc<RuleSet>,
    metrics: BlocklistMetrics,
}

impl BlocklistResolver {
    pub fn new(
        id: impl Into<Arc<str>>,
        resolver: Arc<dyn DnsResolver>,
        options: BlocklistOptions,
    ) -> Self {
        Self {
            id: id.into(),
            resolver,
            blocklist_resolver: options.blocklist_resolver,
            allowlist_resolver: options.allowlist_resolver,
            ede_template: options.ede_template,
            blocklist_refresh: options.blocklist_refresh,
            allowlist_refresh: options.allowlist_refresh,
            rules: Arc::new(RuleSet::new(options.blocklist_db, options.allowlist_db)),
            metrics: BlocklistMetrics::new(),
        }
    }

    pub fn with_metrics(mut self, metrics: BlocklistMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn with_metrics_registry(self, registry: &dyn MetricsRegistry) -> Self {
        let metrics = BlocklistMetrics::from_registry(registry, &self.id);
        self.with_metrics(metrics)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn rules(&self) -> Arc<RuleSet> {
        Arc::clone(&self.rules)
    }

    pub fn metrics(&self) -> &BlocklistMetrics {
        &self.metrics
    }

    /// Reload period of `list`, or `None` when the list is absent or static.
    pub fn refresh_interval(&self, list: RuleList) -> Option<Duration> {
        let period = match list {
            RuleList::Blocklist => self.blocklist_refresh,
            RuleList::Allowlist => self.allowlist_refresh,
        };
        if period.is_zero() || self.rules.database(list).is_none() {
            return None;
        }
        Some(period)
    }
}

#[async_trait]
impl DnsResolver for BlocklistResolver {
    async fn resolve(
        &self,
        query: &Message,
        client: &ClientInfo,
    ) -> Result<Message, DomainError> {
        let Some(question) = query.queries().first() else {
            return Err(DomainError::no_question());
        };
        let qname = question.name();
        let qtype = question.query_type();

        let rules = self.rules.snapshot();

        if let Some(allowlist) = &rules.allowlist {
            if let Some(matched) = allowlist.match_query(query) {
                self.metrics.record_allowed();
                let target = self.allowlist_resolver.as_ref().unwrap_or(&self.resolver);
                debug!(
                    id = %self.id,
                    qname = %qname,
                    qtype = %qtype,
                    client = ?client.source_ip,
                    list = %matched.result.list,
                    rule = %matched.result.rule,
                    resolver = target.name(),
                    "Matched allowlist, forwarding"
                );
                return target.resolve(query, client).await;
            }
        }

        let blocked = rules
            .blocklist
            .as_ref()
            .and_then(|blocklist| blocklist.match_query(query));

        let Some(RuleMatch {
            addresses,
            names,
            result,
        }) = blocked
        else {
            self.metrics.record_allowed();
            debug!(
                id = %self.id,
                qname = %qname,
                qtype = %qtype,
                client = ?client.source_ip,
                resolver = self.resolver.name(),
                "Forwarding unmodified query to resolver"
            );
            return self.resolver.resolve(query, client).await;
        };

        self.metrics.record_blocked();

        if qtype == RecordType::PTR && !names.is_empty() {
            debug!(
                id = %self.id,
                qname = %qname,
                list = %result.list,
                rule = %result.rule,
                names = names.len(),
                "Responding with PTR names from blocklist"
            );
            return Ok(ptr_response(query, &names));
        }

        if let Some(target) = &self.blocklist_resolver {
            debug!(
                id = %self.id,
                qname = %qname,
                qtype = %qtype,
                client = ?client.source_ip,
                list = %result.list,
                rule = %result.rule,
                resolver = target.name(),
                "Matched blocklist, forwarding"
            );
            return target.resolve(query, client).await;
        }

        let mut answer = reply_to(query);

        let spoofed = spoofed_answers(question, &addresses);
        if !spoofed.is_empty() {
            debug!(
                id = %self.id,
                qname = %qname,
                qtype = %qtype,
                list = %result.list,
                rule = %result.rule,
                answers = spoofed.len(),
                "Spoofing response"
            );
            answer.add_answers(spoofed);
            return Ok(answer);
        }

        debug!(
            id = %self.id,
            qname = %qname,
            qtype = %qtype,
            client = ?client.source_ip,
            list = %result.list,
            rule = %result.rule,
            "Blocking request"
        );
        if let Some(template) = &self.ede_template {
            let input = ExtendedErrorInput {
                query,
                matched: &result,
            };
            if let Err(e) = template.apply(&mut answer, input) {
                warn!(
                    id = %self.id,
                    qname = %qname,
                    list = %result.list,
                    rule = %result.rule,
                    error = %e,
                    "Failed to apply extended error template"
                );
            }
        }
        mark_nxdomain(&mut answer);
        Ok(answer)
    }

    fn name(&self) -> &str {
        &self.id
    }
}
