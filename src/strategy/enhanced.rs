//! Enhanced Strategy Module
//!
//! Wraps a cache backend with a capacity bound, per-key access bookkeeping,
//! hit/miss counters and policy-driven eviction.

use std::sync::atomic::{AtomicU64, AtomicU8, AtomicUsize, Ordering};
use std::time::Duration;

use dashmap::DashMap;
use tracing::debug;

use crate::error::Result;
use crate::strategy::{
    validate_key, CacheBackend, CacheStats, CacheStrategy, EnhancedCacheStrategy, EvictionPolicy,
};

// == Enhanced Cache ==
/// Capacity-bounded wrapper around a [`CacheBackend`].
///
/// Bookkeeping is best-effort: the backend may expire entries out from
/// under the wrapper, leaving stale access rows behind. Stale rows are
/// acceptable and self-correct on the next write or eviction of that key.
pub struct EnhancedCache<B> {
    /// Underlying entry store
    backend: B,
    /// Active eviction policy, stored as its discriminant
    policy: AtomicU8,
    /// Capacity bound enforced lazily on save
    max_size: AtomicUsize,
    /// Per-key access counts, ranked by LFU eviction
    access_count: DashMap<String, u64>,
    /// Per-key last-access ticks, ranked by LRU/FIFO eviction
    last_access: DashMap<String, u64>,
    /// Global hit counter
    hits: AtomicU64,
    /// Global miss counter
    misses: AtomicU64,
    /// Logical clock for last-access ticks.
    ///
    /// Wall-clock milliseconds tie under rapid successive operations; a
    /// monotone tick keeps the smallest-last-access selection well defined.
    clock: AtomicU64,
}

impl<B: CacheBackend> EnhancedCache<B> {
    // == Constructor ==
    /// Wraps `backend` with a capacity bound and the default (TTL)
    /// eviction policy.
    pub fn new(backend: B, max_size: usize) -> Self {
        Self {
            backend,
            policy: AtomicU8::new(policy_to_u8(EvictionPolicy::default())),
            max_size: AtomicUsize::new(max_size),
            access_count: DashMap::new(),
            last_access: DashMap::new(),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            clock: AtomicU64::new(0),
        }
    }

    fn tick(&self) -> u64 {
        self.clock.fetch_add(1, Ordering::Relaxed) + 1
    }

    // == Eviction ==
    /// Evicts at most one entry according to the active policy.
    ///
    /// Selection is a best-effort snapshot over the bookkeeping maps;
    /// concurrent evictions may pick the same victim, which is harmless
    /// because delete is idempotent. No candidate is a logged no-op, and
    /// the caller's save proceeds over capacity.
    fn evict_one(&self) -> Result<()> {
        let policy = self.eviction_policy();
        let victim = match policy {
            // LRU and FIFO share the last-access map: a read refreshes the
            // tick, so FIFO ranks by insertion-or-access age
            EvictionPolicy::Lru | EvictionPolicy::Fifo => self
                .last_access
                .iter()
                .min_by_key(|row| *row.value())
                .map(|row| row.key().clone()),
            EvictionPolicy::Lfu => self
                .access_count
                .iter()
                .min_by_key(|row| *row.value())
                .map(|row| row.key().clone()),
            EvictionPolicy::Ttl => {
                let mut soonest: Option<(String, Duration)> = None;
                for key in self.backend.keys()? {
                    if let Some(remaining) = self.backend.time_to_live(&key)? {
                        let closer = soonest
                            .as_ref()
                            .map_or(true, |(_, best)| remaining < *best);
                        if closer {
                            soonest = Some((key, remaining));
                        }
                    }
                }
                soonest.map(|(key, _)| key)
            }
        };

        match victim {
            Some(key) => {
                debug!(%policy, key = %key, "Evicting cache entry");
                self.delete(&key)
            }
            None => {
                debug!(%policy, "No eviction candidate; save proceeds over capacity");
                Ok(())
            }
        }
    }
}

// == Cache Strategy Implementation ==
impl<B: CacheBackend> CacheStrategy for EnhancedCache<B> {
    /// Evicts one entry first when the backend is at capacity, then
    /// delegates the save and initializes the key's bookkeeping.
    fn save(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        validate_key(key)?;

        if self.backend.len()? >= self.max_size() {
            self.evict_one()?;
        }

        self.backend.save(key, value, ttl)?;
        self.access_count.insert(key.to_string(), 0);
        let tick = self.tick();
        self.last_access.insert(key.to_string(), tick);
        Ok(())
    }

    /// Delegates the lookup and maintains hit/miss counters and per-key
    /// access bookkeeping.
    fn get(&self, key: &str) -> Result<Option<String>> {
        validate_key(key)?;

        match self.backend.get(key)? {
            Some(value) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                self.access_count
                    .entry(key.to_string())
                    .and_modify(|count| *count += 1)
                    .or_insert(1);
                let tick = self.tick();
                self.last_access.insert(key.to_string(), tick);
                Ok(Some(value))
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                Ok(None)
            }
        }
    }

    /// Delegates the delete and drops the key's bookkeeping rows.
    fn delete(&self, key: &str) -> Result<()> {
        validate_key(key)?;
        self.backend.delete(key)?;
        self.access_count.remove(key);
        self.last_access.remove(key);
        Ok(())
    }
}

// == Enhanced Strategy Implementation ==
impl<B: CacheBackend> EnhancedCacheStrategy for EnhancedCache<B> {
    fn eviction_policy(&self) -> EvictionPolicy {
        policy_from_u8(self.policy.load(Ordering::Relaxed))
    }

    fn set_eviction_policy(&self, policy: EvictionPolicy) {
        debug!(%policy, "Eviction policy changed");
        self.policy.store(policy_to_u8(policy), Ordering::Relaxed);
    }

    fn max_size(&self) -> usize {
        self.max_size.load(Ordering::Relaxed)
    }

    /// Shrinking the bound does not evict eagerly; the next save that
    /// finds the backend at or over capacity reclaims one entry.
    fn set_max_size(&self, max_size: usize) {
        self.max_size.store(max_size, Ordering::Relaxed);
    }

    fn current_size(&self) -> Result<usize> {
        self.backend.len()
    }

    fn stats(&self) -> Result<CacheStats> {
        Ok(CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            size: self.backend.len()?,
            max_size: self.max_size(),
        })
    }

    fn all_keys(&self) -> Result<Vec<String>> {
        self.backend.keys()
    }

    /// Deletes every backend key, then resets both bookkeeping maps and
    /// both counters.
    fn clear(&self) -> Result<()> {
        for key in self.backend.keys()? {
            self.backend.delete(&key)?;
        }
        self.access_count.clear();
        self.last_access.clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        Ok(())
    }

    fn contains_key(&self, key: &str) -> Result<bool> {
        validate_key(key)?;
        self.backend.contains_key(key)
    }

    fn time_to_live(&self, key: &str) -> Result<Option<Duration>> {
        validate_key(key)?;
        self.backend.time_to_live(key)
    }
}

// == Policy Discriminant Mapping ==
fn policy_to_u8(policy: EvictionPolicy) -> u8 {
    match policy {
        EvictionPolicy::Lru => 0,
        EvictionPolicy::Lfu => 1,
        EvictionPolicy::Fifo => 2,
        EvictionPolicy::Ttl => 3,
    }
}

fn policy_from_u8(raw: u8) -> EvictionPolicy {
    match raw {
        0 => EvictionPolicy::Lru,
        1 => EvictionPolicy::Lfu,
        2 => EvictionPolicy::Fifo,
        _ => EvictionPolicy::Ttl,
    }
}
