//! Cache Strategy Module
//!
//! Defines the strategy contracts and the interchangeable backends:
//! an in-process map-backed store, a remote Redis store, and an enhanced
//! wrapper adding capacity bounding, eviction policies and statistics.

mod entry;
mod enhanced;
mod memory;
mod policy;
mod redis;
mod stats;


// Re-export public types
pub use enhanced::EnhancedCache;
pub use entry::CacheEntry;
pub use memory::InMemoryStrategy;
pub use policy::EvictionPolicy;
pub use self::redis::RedisStrategy;
pub use stats::CacheStats;

use std::time::Duration;

use crate::error::{CacheError, Result};

// == Public Constants ==
/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;

// == Cache Strategy ==
/// Contract shared by every interchangeable cache backend.
///
/// Keys are opaque strings; the caller owns the namespacing convention
/// (e.g. `"user:" + id`). Values are opaque serialized payloads that the
/// cache never inspects.
pub trait CacheStrategy: Send + Sync {
    /// Stores `value` under `key` with a time-to-live.
    ///
    /// Overwrites any existing entry for the key; never fails on a key
    /// that does not yet exist.
    fn save(&self, key: &str, value: &str, ttl: Duration) -> Result<()>;

    /// Retrieves the value for `key`.
    ///
    /// Returns `Ok(None)` for an absent or expired key; a missing key is
    /// never an error.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Removes the entry for `key` if present; no-op when absent.
    fn delete(&self, key: &str) -> Result<()>;
}

// == Cache Backend ==
/// Store-level introspection on top of the base contract.
///
/// Implemented by the primitive entry stores so the enhanced strategy can
/// enumerate keys and query remaining TTLs when ranking eviction candidates.
pub trait CacheBackend: CacheStrategy {
    /// Returns every live (non-expired) key in the store.
    fn keys(&self) -> Result<Vec<String>>;

    /// Returns the number of live entries.
    ///
    /// May cost a full key enumeration on remote backends.
    fn len(&self) -> Result<usize>;

    /// Checks whether a live entry exists for `key`.
    fn contains_key(&self, key: &str) -> Result<bool>;

    /// Returns the remaining time-to-live for `key`, or `None` if the key
    /// is absent or already expired.
    fn time_to_live(&self, key: &str) -> Result<Option<Duration>>;
}

// == Enhanced Cache Strategy ==
/// Strategy variant adding a capacity bound, eviction policies and
/// hit/miss statistics on top of the base save/get/delete contract.
pub trait EnhancedCacheStrategy: CacheStrategy {
    /// Returns the eviction policy consulted on the next over-capacity save.
    fn eviction_policy(&self) -> EvictionPolicy;

    /// Replaces the eviction policy.
    ///
    /// Takes effect on the next eviction decision, not retroactively.
    fn set_eviction_policy(&self, policy: EvictionPolicy);

    /// Returns the capacity bound.
    fn max_size(&self) -> usize;

    /// Sets the capacity bound.
    ///
    /// Lowering it does not evict immediately; eviction happens lazily on
    /// the next `save` that would exceed the bound.
    fn set_max_size(&self, max_size: usize);

    /// Returns the number of live entries in the underlying store.
    fn current_size(&self) -> Result<usize>;

    /// Returns a snapshot of hits, misses, size and capacity.
    fn stats(&self) -> Result<CacheStats>;

    /// Returns every live key in the underlying store.
    fn all_keys(&self) -> Result<Vec<String>>;

    /// Deletes every key and resets bookkeeping and counters to zero.
    fn clear(&self) -> Result<()>;

    /// Checks whether a live entry exists for `key`.
    fn contains_key(&self, key: &str) -> Result<bool>;

    /// Returns the remaining time-to-live for `key`.
    fn time_to_live(&self, key: &str) -> Result<Option<Duration>>;
}

// == Key Validation ==
/// Validates a key at the public API boundary, before any backend side
/// effect.
pub(crate) fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(CacheError::InvalidArgument(
            "Key must not be empty".to_string(),
        ));
    }
    if key.len() > MAX_KEY_LENGTH {
        return Err(CacheError::InvalidArgument(format!(
            "Key exceeds maximum length of {} bytes",
            MAX_KEY_LENGTH
        )));
    }
    Ok(())
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_key_accepts_normal_key() {
        assert!(validate_key("user:42").is_ok());
    }

    #[test]
    fn test_validate_key_rejects_empty_key() {
        let result = validate_key("");
        assert!(matches!(result, Err(CacheError::InvalidArgument(_))));
    }

    #[test]
    fn test_validate_key_rejects_oversized_key() {
        let long_key = "x".repeat(MAX_KEY_LENGTH + 1);
        let result = validate_key(&long_key);
        assert!(matches!(result, Err(CacheError::InvalidArgument(_))));
    }

    #[test]
    fn test_validate_key_accepts_boundary_length() {
        let key = "x".repeat(MAX_KEY_LENGTH);
        assert!(validate_key(&key).is_ok());
    }
}
