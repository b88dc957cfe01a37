use crate::ports::RuleDatabase;
use arc_swap::ArcSwap;
use blockgate_domain::DomainError;
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleList {
    Blocklist,
    Allowlist,
}

impl RuleList {
    pub fn to_str(&self) -> &'static str {
        match self {
            RuleList::Blocklist => "blocklist",
            RuleList::Allowlist => "allowlist",
        }
    }
}

impl fmt::Display for RuleList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

/// Both rule databases as seen at one instant.
#[derive(Clone, Default)]
pub struct RuleSnapshot {
    pub blocklist: Option<Arc<dyn RuleDatabase>>,
    pub allowlist: Option<Arc<dyn RuleDatabase>>,
}

impl RuleSnapshot {
    pub fn get(&self, list: RuleList) -> Option<&Arc<dyn RuleDatabase>> {
        match list {
            RuleList::Blocklist => self.blocklist.as_ref(),
            RuleList::Allowlist => self.allowlist.as_ref(),
        }
    }
}

/// Hot-swappable pair of rule databases.
///
/// Readers take the whole pair with one atomic load, so a query never sees
/// the blocklist of one generation next to the allowlist of another. A
/// snapshot already handed out stays valid after a swap.
pub struct RuleSet {
    current: ArcSwap<RuleSnapshot>,
}

impl RuleSet {
    pub fn new(
        blocklist: Option<Arc<dyn RuleDatabase>>,
        allowlist: Option<Arc<dyn RuleDatabase>>,
    ) -> Self {
        Self {
            current: ArcSwap::from_pointee(RuleSnapshot {
                blocklist,
                allowlist,
            }),
        }
    }

    #[inline]
    pub fn snapshot(&self) -> Arc<RuleSnapshot> {
        self.current.load_full()
    }

    pub fn database(&self, list: RuleList) -> Option<Arc<dyn RuleDatabase>> {
        self.current.load().get(list).cloned()
    }

    /// Replaces one list and keeps the other as it is at the time of the swap.
    pub fn replace(&self, list: RuleList, db: Arc<dyn RuleDatabase>) {
        self.current.rcu(|current| {
            let mut next = RuleSnapshot::clone(current);
            match list {
                RuleList::Blocklist => next.blocklist = Some(Arc::clone(&db)),
                RuleList::Allowlist => next.allowlist = Some(Arc::clone(&db)),
            }
            next
        });
    }

    /// Asks the current database of `list` for a fresh instance and swaps it
    /// in. On error the current database stays active.
    pub async fn reload(&self, list: RuleList) -> Result<(), DomainError> {
        let db = self
            .database(list)
            .ok_or_else(|| DomainError::RuleReload(format!("{} is not configured", list)))?;

        let fresh = db.reload().await?;
        self.replace(list, fresh);
        Ok(())
    }
}
