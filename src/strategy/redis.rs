//! Remote Strategy Module
//!
//! Redis-backed cache store. TTLs are enforced provider-side (`SET ... PX`),
//! so expired keys simply stop existing; no local expiry bookkeeping.
//!
//! Backend failures surface as [`CacheError::BackendUnavailable`] rather
//! than being folded into a miss, so callers can tell "not cached" apart
//! from "cache unreachable" and fall back to the system of record.
//!
//! [`CacheError::BackendUnavailable`]: crate::error::CacheError::BackendUnavailable

use std::time::Duration;

use tracing::info;

use crate::error::Result;
use crate::strategy::entry::duration_to_ms;
use crate::strategy::{validate_key, CacheBackend, CacheStrategy};

// == Redis Strategy ==
/// Remote implementation of the cache strategy contract.
///
/// Holds a client handle and opens a connection per operation; operations
/// are synchronous and may block on network I/O.
pub struct RedisStrategy {
    client: redis::Client,
}

impl RedisStrategy {
    // == Constructor ==
    /// Creates a new Redis strategy for the given connection URL.
    ///
    /// The URL is validated here; the first network round-trip happens on
    /// the first operation.
    pub fn new(redis_url: &str) -> Result<Self> {
        let client = redis::Client::open(redis_url)?;
        info!(url = redis_url, "Redis cache strategy initialized");
        Ok(Self { client })
    }

    fn connection(&self) -> Result<redis::Connection> {
        Ok(self.client.get_connection()?)
    }
}

// == Cache Strategy Implementation ==
impl CacheStrategy for RedisStrategy {
    /// Stores the value with a provider-side expiry in milliseconds.
    fn save(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        validate_key(key)?;
        let mut conn = self.connection()?;
        redis::cmd("SET")
            .arg(key)
            .arg(value)
            .arg("PX")
            .arg(duration_to_ms(ttl))
            .query::<()>(&mut conn)?;
        Ok(())
    }

    /// Returns the value if the key exists; `nil` maps to `Ok(None)`.
    fn get(&self, key: &str) -> Result<Option<String>> {
        validate_key(key)?;
        let mut conn = self.connection()?;
        let value: Option<String> = redis::cmd("GET").arg(key).query(&mut conn)?;
        Ok(value)
    }

    /// Removes the key; deleting an absent key is a no-op.
    fn delete(&self, key: &str) -> Result<()> {
        validate_key(key)?;
        let mut conn = self.connection()?;
        redis::cmd("DEL").arg(key).query::<i64>(&mut conn)?;
        Ok(())
    }
}

// == Cache Backend Implementation ==
impl CacheBackend for RedisStrategy {
    /// Enumerates every key in the backing database.
    ///
    /// Uses `KEYS *`, which scans the whole keyspace; cost grows with the
    /// number of keys held by the provider.
    fn keys(&self) -> Result<Vec<String>> {
        let mut conn = self.connection()?;
        let keys: Vec<String> = redis::cmd("KEYS").arg("*").query(&mut conn)?;
        Ok(keys)
    }

    fn len(&self) -> Result<usize> {
        let mut conn = self.connection()?;
        let size: usize = redis::cmd("DBSIZE").query(&mut conn)?;
        Ok(size)
    }

    fn contains_key(&self, key: &str) -> Result<bool> {
        validate_key(key)?;
        let mut conn = self.connection()?;
        let exists: bool = redis::cmd("EXISTS").arg(key).query(&mut conn)?;
        Ok(exists)
    }

    /// Remaining TTL via `PTTL`; negative replies (missing key, or a key
    /// without an expiry) map to `None`.
    fn time_to_live(&self, key: &str) -> Result<Option<Duration>> {
        validate_key(key)?;
        let mut conn = self.connection()?;
        let ttl_ms: i64 = redis::cmd("PTTL").arg(key).query(&mut conn)?;
        if ttl_ms >= 0 {
            Ok(Some(Duration::from_millis(ttl_ms as u64)))
        } else {
            Ok(None)
        }
    }
}
