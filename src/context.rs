//! Cache Context Module
//!
//! Holds the currently active strategy and forwards the cache operations
//! to it. The strategy can be replaced at runtime without touching
//! callers.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use tracing::info;

use crate::error::Result;
use crate::strategy::CacheStrategy;

// == Cache Context ==
/// Forwarding wrapper over the active [`CacheStrategy`].
///
/// Swapping strategies replaces the shared handle for subsequent calls;
/// in-flight operations keep the handle they already cloned, and entries
/// are never migrated between strategies.
pub struct CacheContext {
    strategy: RwLock<Arc<dyn CacheStrategy>>,
}

impl CacheContext {
    // == Constructor ==
    /// Creates a context with a default strategy.
    pub fn new(default_strategy: Arc<dyn CacheStrategy>) -> Self {
        Self {
            strategy: RwLock::new(default_strategy),
        }
    }

    // == Strategy Swap ==
    /// Replaces the active strategy for all subsequent operations.
    pub fn set_cache_strategy(&self, strategy: Arc<dyn CacheStrategy>) {
        info!("Switching active cache strategy");
        let mut current = self
            .strategy
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *current = strategy;
    }

    /// Clones the active strategy handle out of the lock, so forwarded
    /// calls never hold it across backend I/O.
    fn current(&self) -> Arc<dyn CacheStrategy> {
        Arc::clone(
            &self
                .strategy
                .read()
                .unwrap_or_else(|poisoned| poisoned.into_inner()),
        )
    }

    // == Forwarded Operations ==
    /// Saves through the active strategy.
    pub fn save(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        self.current().save(key, value, ttl)
    }

    /// Reads through the active strategy.
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        self.current().get(key)
    }

    /// Deletes through the active strategy.
    pub fn delete(&self, key: &str) -> Result<()> {
        self.current().delete(key)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::InMemoryStrategy;

    const TTL: Duration = Duration::from_secs(300);

    #[test]
    fn test_forwarding() {
        let context = CacheContext::new(Arc::new(InMemoryStrategy::new()));

        context.save("key1", "value1", TTL).unwrap();
        assert_eq!(context.get("key1").unwrap().as_deref(), Some("value1"));

        context.delete("key1").unwrap();
        assert_eq!(context.get("key1").unwrap(), None);
    }

    #[test]
    fn test_swap_isolates_previous_entries() {
        let context = CacheContext::new(Arc::new(InMemoryStrategy::new()));
        context.save("key1", "value1", TTL).unwrap();

        context.set_cache_strategy(Arc::new(InMemoryStrategy::new()));

        // No migration: entries saved into the old strategy are gone
        assert_eq!(context.get("key1").unwrap(), None);
    }

    #[test]
    fn test_old_handle_still_serves_old_entries() {
        let first: Arc<InMemoryStrategy> = Arc::new(InMemoryStrategy::new());
        let context = CacheContext::new(first.clone());
        context.save("key1", "value1", TTL).unwrap();

        context.set_cache_strategy(Arc::new(InMemoryStrategy::new()));

        // A caller holding the old strategy directly is unaffected
        assert_eq!(first.get("key1").unwrap().as_deref(), Some("value1"));
    }
}
