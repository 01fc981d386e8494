use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use shared::message::{Record, RrType};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    rtype: RrType,
    name: String,
}

#[derive(Debug)]
struct CacheEntry {
    record: Record,
    first_seen: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

/// In-memory store of recently seen records, keyed by (type, name).
///
/// Insert-only from the monitor's point of view; entries age out on their
/// own TTL. A record arriving with TTL 0 is an mDNS goodbye and evicts the
/// entry immediately.
#[derive(Debug, Default)]
pub struct RecordCache {
    entries: HashMap<CacheKey, CacheEntry>,
}

impl RecordCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_record(&mut self, record: Record) {
        self.insert_at(record, Utc::now());
    }

    fn insert_at(&mut self, record: Record, now: DateTime<Utc>) {
        let key = CacheKey {
            rtype: record.rtype,
            name: record.name.clone(),
        };

        if record.ttl == 0 {
            if self.entries.remove(&key).is_some() {
                tracing::debug!("goodbye for {}, evicting", record.name);
            }
            return;
        }

        let expires_at = now + Duration::seconds(i64::from(record.ttl));
        match self.entries.get_mut(&key) {
            Some(entry) => {
                entry.record = record;
                entry.expires_at = expires_at;
            }
            None => {
                tracing::debug!("caching {} ({:?})", record.name, record.rtype);
                self.entries.insert(
                    key,
                    CacheEntry {
                        record,
                        first_seen: now,
                        expires_at,
                    },
                );
            }
        }
    }

    /// Drop entries whose TTL has elapsed.
    pub fn prune(&mut self, now: DateTime<Utc>) {
        self.entries.retain(|key, entry| {
            if entry.expires_at > now {
                return true;
            }
            tracing::debug!(
                "expiring {} ({:?}), first seen {}",
                key.name,
                key.rtype,
                entry.first_seen
            );
            false
        });
    }

    /// Records still alive in the cache, in no particular order.
    pub fn records(&self) -> impl Iterator<Item = &Record> + '_ {
        self.entries.values().map(|entry| &entry.record)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
