//! In-Memory Strategy Module
//!
//! Map-backed cache store with per-entry TTL expiration. Backed by a
//! sharded concurrent map, so independent keys never contend on a single
//! global lock.

use std::time::Duration;

use dashmap::DashMap;
use tracing::debug;

use crate::error::Result;
use crate::strategy::{validate_key, CacheBackend, CacheEntry, CacheStrategy};

// == In-Memory Strategy ==
/// In-process implementation of the cache strategy contract.
///
/// Expired entries are treated as absent on read and physically removed
/// lazily on the next access, or eagerly via [`InMemoryStrategy::purge_expired`].
#[derive(Debug, Default)]
pub struct InMemoryStrategy {
    /// Key-value storage
    entries: DashMap<String, CacheEntry>,
}

impl InMemoryStrategy {
    // == Constructor ==
    /// Creates a new empty in-memory strategy.
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    // == Purge Expired ==
    /// Removes all expired entries from the store.
    ///
    /// Returns the number of entries removed. Read paths already treat
    /// expired entries as absent; this only reclaims their memory eagerly.
    pub fn purge_expired(&self) -> usize {
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|entry| entry.value().is_expired())
            .map(|entry| entry.key().clone())
            .collect();

        let mut removed = 0;
        for key in expired_keys {
            // Re-checked under the shard lock so a concurrent overwrite
            // with a fresh TTL is not lost
            if self
                .entries
                .remove_if(&key, |_, entry| entry.is_expired())
                .is_some()
            {
                removed += 1;
            }
        }

        if removed > 0 {
            debug!(removed, "Purged expired in-memory entries");
        }
        removed
    }
}

// == Cache Strategy Implementation ==
impl CacheStrategy for InMemoryStrategy {
    /// Stores `(value, now + ttl)` under the key, overwriting any existing
    /// entry and resetting its TTL.
    fn save(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        validate_key(key)?;
        self.entries
            .insert(key.to_string(), CacheEntry::new(value.to_string(), ttl));
        Ok(())
    }

    /// Returns the value if present and not expired.
    ///
    /// An expired entry is removed and reported as absent.
    fn get(&self, key: &str) -> Result<Option<String>> {
        validate_key(key)?;

        // The read guard must be released before removing, or the removal
        // would deadlock on the entry's shard
        let expired = match self.entries.get(key) {
            Some(entry) => {
                if !entry.is_expired() {
                    return Ok(Some(entry.value.clone()));
                }
                true
            }
            None => false,
        };

        if expired {
            // Re-checked under the shard lock so a concurrent overwrite
            // with a fresh TTL is not lost
            self.entries.remove_if(key, |_, entry| entry.is_expired());
        }
        Ok(None)
    }

    /// Removes the entry unconditionally; absent keys are a no-op.
    fn delete(&self, key: &str) -> Result<()> {
        validate_key(key)?;
        self.entries.remove(key);
        Ok(())
    }
}

// == Cache Backend Implementation ==
impl CacheBackend for InMemoryStrategy {
    fn keys(&self) -> Result<Vec<String>> {
        Ok(self
            .entries
            .iter()
            .filter(|entry| !entry.value().is_expired())
            .map(|entry| entry.key().clone())
            .collect())
    }

    fn len(&self) -> Result<usize> {
        Ok(self
            .entries
            .iter()
            .filter(|entry| !entry.value().is_expired())
            .count())
    }

    fn contains_key(&self, key: &str) -> Result<bool> {
        validate_key(key)?;
        Ok(self
            .entries
            .get(key)
            .map_or(false, |entry| !entry.is_expired()))
    }

    fn time_to_live(&self, key: &str) -> Result<Option<Duration>> {
        validate_key(key)?;
        Ok(self.entries.get(key).and_then(|entry| entry.ttl_remaining()))
    }
}
