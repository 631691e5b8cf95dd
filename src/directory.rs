/// In-memory provider directory with time-bounded announcements
use crate::routing_key::RoutingKey;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

/// One peer's claim to provide the content behind a routing key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderRecord {
    pub peer_id: String,
    pub addrs: Vec<String>,
    pub protocols: Vec<String>,
}

/// A provider record bounded by its expiry time
#[derive(Debug, Clone)]
struct DirectoryEntry {
    record: ProviderRecord,
    expires_at: DateTime<Utc>,
}

/// Shared provider directory
///
/// Holds at most one entry per canonical routing key; a new announce for the
/// same key replaces the prior entry. The single map guard keeps `announce`
/// and the read-then-evict inside `lookup` atomic with respect to each
/// other. Entries are evicted lazily when a lookup observes expiry; memory
/// is otherwise bounded by the number of distinct keys ever announced, which
/// is what the periodic sweep is for.
pub struct ProviderDirectory {
    entries: Mutex<HashMap<String, DirectoryEntry>>,
    default_ttl: Duration,
}

impl ProviderDirectory {
    /// Create an empty directory with the given default announcement TTL
    pub fn new(default_ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            default_ttl,
        }
    }

    /// Register a provider under the configured default TTL
    pub fn announce(&self, key: &RoutingKey, record: ProviderRecord) {
        self.announce_at(key, record, self.default_ttl, Utc::now());
    }

    /// Register a provider, replacing any previous entry for the key
    pub fn announce_at(
        &self,
        key: &RoutingKey,
        record: ProviderRecord,
        ttl: Duration,
        now: DateTime<Utc>,
    ) {
        let entry = DirectoryEntry {
            record,
            expires_at: now + ttl,
        };

        let mut entries = self.lock_entries();
        entries.insert(key.canonical(), entry);
        debug!("Announced provider for {} ({} entries)", key, entries.len());
    }

    /// Look up the live provider for a key
    pub fn lookup(&self, key: &RoutingKey) -> Option<ProviderRecord> {
        self.lookup_at(key, Utc::now())
    }

    /// Look up at an explicit instant, evicting an expired entry on sight
    ///
    /// A stale entry is never returned, and never observed twice.
    pub fn lookup_at(&self, key: &RoutingKey, now: DateTime<Utc>) -> Option<ProviderRecord> {
        let canonical = key.canonical();

        let mut entries = self.lock_entries();
        let expired = match entries.get(&canonical) {
            Some(entry) if now < entry.expires_at => return Some(entry.record.clone()),
            Some(_) => true,
            None => false,
        };

        if expired {
            entries.remove(&canonical);
            debug!("Evicted expired provider for {}", key);
        }
        None
    }

    /// Drop every expired entry, returning how many were removed
    pub fn sweep_expired(&self, now: DateTime<Utc>) -> usize {
        let mut entries = self.lock_entries();
        let before = entries.len();
        entries.retain(|_, entry| now < entry.expires_at);
        before - entries.len()
    }

    /// Number of entries currently held, expired or not
    pub fn len(&self) -> usize {
        self.lock_entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock_entries().is_empty()
    }

    fn lock_entries(&self) -> MutexGuard<'_, HashMap<String, DirectoryEntry>> {
        // A poisoned guard still wraps a consistent map
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
