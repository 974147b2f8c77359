//! Cache Statistics Module
//!
//! Aggregate hit/miss counters plus size information for the enhanced
//! strategy.

use serde::Serialize;

// == Cache Stats ==
/// Snapshot of cache performance counters.
///
/// Counters are process-lifetime values, reset only by an explicit
/// `clear()` on the owning strategy.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Number of successful cache retrievals
    pub hits: u64,
    /// Number of failed cache retrievals (key not found or expired)
    pub misses: u64,
    /// Current number of live entries in the cache
    pub size: usize,
    /// Capacity bound enforced by eviction
    pub max_size: usize,
}

impl CacheStats {
    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no requests have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
