//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

// == Cache Entry ==
/// Represents a single in-memory cache entry: an opaque value plus its
/// expiry bookkeeping.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored value (opaque serialized payload)
    pub value: String,
    /// Creation timestamp (Unix milliseconds)
    pub stored_at: u64,
    /// Expiration timestamp (Unix milliseconds)
    pub expires_at: u64,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry expiring `ttl` from now.
    ///
    /// TTLs beyond the representable range saturate instead of wrapping,
    /// so an oversized duration means "effectively never expires".
    pub fn new(value: String, ttl: Duration) -> Self {
        let now = current_timestamp_ms();
        Self {
            value,
            stored_at: now,
            expires_at: now.saturating_add(duration_to_ms(ttl)),
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// Boundary condition: an entry is considered expired once the current
    /// time is greater than or equal to the expiration time, so an entry
    /// whose TTL has fully elapsed is immediately treated as absent.
    pub fn is_expired(&self) -> bool {
        current_timestamp_ms() >= self.expires_at
    }

    // == Time To Live ==
    /// Returns the remaining time-to-live, or `None` once the entry has
    /// expired.
    pub fn ttl_remaining(&self) -> Option<Duration> {
        let now = current_timestamp_ms();
        if self.expires_at > now {
            Some(Duration::from_millis(self.expires_at - now))
        } else {
            None
        }
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub(crate) fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

/// Converts a duration to whole milliseconds, saturating at `u64::MAX`.
pub(crate) fn duration_to_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
