#![allow(dead_code)]

use async_trait::async_trait;
use blockgate_application::ports::{
    DnsResolver, ExtendedErrorInput, ExtendedErrorTemplate, MetricsRegistry, RuleDatabase,
    RuleMatch,
};
use blockgate_application::services::reply_to;
use blockgate_domain::{ClientInfo, DomainError, MatchResult};
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::rdata::A;
use hickory_proto::rr::{Name, RData, Record, RecordType};
use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr};
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

pub fn make_query(name: &str, record_type: RecordType) -> Message {
    let mut message = Message::new(0xbeef, MessageType::Query, OpCode::Query);
    message.set_recursion_desired(true);
    message.add_query(Query::query(Name::from_str(name).unwrap(), record_type));
    message
}

pub fn empty_query() -> Message {
    Message::new(0xbeef, MessageType::Query, OpCode::Query)
}

pub fn client() -> ClientInfo {
    ClientInfo::new(IpAddr::V4(Ipv4Addr::new(192, 168, 1, 100)))
}

pub fn answer_ips(response: &Message) -> Vec<IpAddr> {
    response
        .answers()
        .iter()
        .filter_map(|r| match r.data() {
            RData::A(a) => Some(IpAddr::V4(a.0)),
            RData::AAAA(aaaa) => Some(IpAddr::V6(aaaa.0)),
            _ => None,
        })
        .collect()
}

// ── Resolver ───────────────────────────────────────────────────────────────

/// Answers every query with a single A record pointing at `answer_ip`, so
/// tests can tell which resolver produced a response.
pub struct MockDnsResolver {
    name: String,
    answer_ip: Ipv4Addr,
    call_count: AtomicU64,
    error: Mutex<Option<DomainError>>,
}

impl MockDnsResolver {
    pub fn new(name: &str, answer_ip: Ipv4Addr) -> Self {
        Self {
            name: name.to_string(),
            answer_ip,
            call_count: AtomicU64::new(0),
            error: Mutex::new(None),
        }
    }

    pub fn failing(name: &str, error: DomainError) -> Self {
        let resolver = Self::new(name, Ipv4Addr::UNSPECIFIED);
        *resolver.error.lock().unwrap() = Some(error);
        resolver
    }

    pub fn call_count(&self) -> u64 {
        self.call_count.load(Ordering::SeqCst)
    }

    pub fn answer_ip(&self) -> IpAddr {
        IpAddr::V4(self.answer_ip)
    }
}

#[async_trait]
impl DnsResolver for MockDnsResolver {
    async fn resolve(
        &self,
        query: &Message,
        _client: &ClientInfo,
    ) -> Result<Message, DomainError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.error.lock().unwrap().clone() {
            return Err(err);
        }
        let mut response = reply_to(query);
        let name = query.queries()[0].name().clone();
        response.add_answer(Record::from_rdata(name, 60, RData::A(A(self.answer_ip))));
        Ok(response)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

// ── Rule database ──────────────────────────────────────────────────────────

pub struct MockRuleDatabase {
    list: String,
    rules: HashMap<String, RuleMatch>,
    match_everything: bool,
    match_count: Arc<AtomicU64>,
    reload_count: Arc<AtomicU64>,
    should_fail_reload: AtomicBool,
    next: Mutex<Option<Arc<dyn RuleDatabase>>>,
}

impl MockRuleDatabase {
    pub fn new(list: &str) -> Self {
        Self {
            list: list.to_string(),
            rules: HashMap::new(),
            match_everything: false,
            match_count: Arc::new(AtomicU64::new(0)),
            reload_count: Arc::new(AtomicU64::new(0)),
            should_fail_reload: AtomicBool::new(false),
            next: Mutex::new(None),
        }
    }

    /// Every query matches with an empty rule.
    pub fn matching_everything(list: &str) -> Self {
        Self {
            match_everything: true,
            ..Self::new(list)
        }
    }

    pub fn with_rule(mut self, name: &str) -> Self {
        self.rules.insert(
            name.to_ascii_lowercase(),
            RuleMatch::new(MatchResult::new(self.list.as_str(), name)),
        );
        self
    }

    pub fn with_spoof(mut self, name: &str, addresses: Vec<IpAddr>) -> Self {
        self.rules.insert(
            name.to_ascii_lowercase(),
            RuleMatch::new(MatchResult::new(self.list.as_str(), name)).with_addresses(addresses),
        );
        self
    }

    pub fn with_names(mut self, name: &str, names: Vec<String>) -> Self {
        self.rules.insert(
            name.to_ascii_lowercase(),
            RuleMatch::new(MatchResult::new(self.list.as_str(), name)).with_names(names),
        );
        self
    }

    /// Instance handed out by the next successful `reload`.
    pub fn with_next(self, next: Arc<dyn RuleDatabase>) -> Self {
        *self.next.lock().unwrap() = Some(next);
        self
    }

    pub fn set_should_fail_reload(&self, fail: bool) {
        self.should_fail_reload.store(fail, Ordering::SeqCst);
    }

    pub fn match_count(&self) -> u64 {
        self.match_count.load(Ordering::SeqCst)
    }

    pub fn reload_count(&self) -> u64 {
        self.reload_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RuleDatabase for MockRuleDatabase {
    fn match_query(&self, query: &Message) -> Option<RuleMatch> {
        self.match_count.fetch_add(1, Ordering::SeqCst);
        let name = query.queries().first()?.name().to_string().to_ascii_lowercase();
        if self.match_everything {
            return Some(RuleMatch::new(MatchResult::new(self.list.as_str(), "*")));
        }
        self.rules.get(&name).cloned()
    }

    async fn reload(&self) -> Result<Arc<dyn RuleDatabase>, DomainError> {
        self.reload_count.fetch_add(1, Ordering::SeqCst);
        if self.should_fail_reload.load(Ordering::SeqCst) {
            return Err(DomainError::RuleReload(format!(
                "failed to load {}",
                self.list
            )));
        }
        Ok(self
            .next
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| Arc::new(MockRuleDatabase::new(&self.list))))
    }
}

// ── Extended error template ────────────────────────────────────────────────

pub struct MockEdeTemplate {
    seen: Mutex<Vec<MatchResult>>,
    should_fail: AtomicBool,
}

impl MockEdeTemplate {
    pub fn new() -> Self {
        Self {
            seen: Mutex::new(vec![]),
            should_fail: AtomicBool::new(false),
        }
    }

    pub fn failing() -> Self {
        let template = Self::new();
        template.should_fail.store(true, Ordering::SeqCst);
        template
    }

    pub fn seen(&self) -> Vec<MatchResult> {
        self.seen.lock().unwrap().clone()
    }
}

impl ExtendedErrorTemplate for MockEdeTemplate {
    fn apply(
        &self,
        _response: &mut Message,
        input: ExtendedErrorInput<'_>,
    ) -> Result<(), DomainError> {
        self.seen.lock().unwrap().push(input.matched.clone());
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::ExtendedError("template failed".to_string()));
        }
        Ok(())
    }
}

// ── Metrics registry ───────────────────────────────────────────────────────

#[derive(Default)]
pub struct MockMetricsRegistry {
    counters: Mutex<HashMap<String, Arc<AtomicU64>>>,
}

impl MockMetricsRegistry {
    pub fn value(&self, key: &str) -> u64 {
        self.counters
            .lock()
            .unwrap()
            .get(key)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }
}

impl MetricsRegistry for MockMetricsRegistry {
    fn counter(&self, group: &str, id: &str, name: &str) -> Arc<AtomicU64> {
        let key = format!("{}.{}.{}", group, id, name);
        Arc::clone(self.counters.lock().unwrap().entry(key).or_default())
    }
}
