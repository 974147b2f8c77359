//! Cache Factory Module
//!
//! Constructs one strategy instance per supported kind and hands out
//! shared references, so every caller asking for the same kind sees the
//! same entries.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use tracing::info;

use crate::config::CacheConfig;
use crate::error::{CacheError, Result};
use crate::strategy::{
    CacheStrategy, EnhancedCache, EnhancedCacheStrategy, InMemoryStrategy, RedisStrategy,
};

// == Cache Kind ==
/// Closed set of supported strategy kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheKind {
    /// Basic in-process map-backed strategy
    InMemory,
    /// Basic remote (Redis) strategy
    Remote,
    /// Remote strategy with capacity bounding, eviction and statistics
    EnhancedRemote,
}

impl fmt::Display for CacheKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CacheKind::InMemory => "in-memory",
            CacheKind::Remote => "remote",
            CacheKind::EnhancedRemote => "enhanced-remote",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for CacheKind {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "in-memory" | "memory" => Ok(CacheKind::InMemory),
            "remote" | "redis" => Ok(CacheKind::Remote),
            "enhanced-remote" | "enhanced-redis" => Ok(CacheKind::EnhancedRemote),
            other => Err(CacheError::UnsupportedStrategy(other.to_string())),
        }
    }
}

// == Cache Factory ==
/// Holds exactly one instance per strategy kind.
///
/// Instances are constructed explicitly at composition time and reused on
/// every request; there is no ambient global state and no per-call
/// construction.
pub struct CacheFactory {
    in_memory: Arc<InMemoryStrategy>,
    remote: Arc<RedisStrategy>,
    enhanced_remote: Arc<EnhancedCache<RedisStrategy>>,
}

impl CacheFactory {
    // == Constructor ==
    /// Builds the strategy instances from configuration.
    ///
    /// Redis URLs are validated here; network connections are opened per
    /// operation, so this succeeds without a reachable server.
    pub fn new(config: &CacheConfig) -> Result<Self> {
        let factory = Self {
            in_memory: Arc::new(InMemoryStrategy::new()),
            remote: Arc::new(RedisStrategy::new(&config.redis_url)?),
            enhanced_remote: Arc::new(EnhancedCache::new(
                RedisStrategy::new(&config.redis_url)?,
                config.max_entries,
            )),
        };
        info!(
            max_entries = config.max_entries,
            "Cache factory initialized"
        );
        Ok(factory)
    }

    // == Basic Strategies ==
    /// Returns the shared strategy instance for `kind`.
    pub fn cache_strategy(&self, kind: CacheKind) -> Arc<dyn CacheStrategy> {
        match kind {
            CacheKind::InMemory => Arc::clone(&self.in_memory) as Arc<dyn CacheStrategy>,
            CacheKind::Remote => Arc::clone(&self.remote) as Arc<dyn CacheStrategy>,
            CacheKind::EnhancedRemote => {
                Arc::clone(&self.enhanced_remote) as Arc<dyn CacheStrategy>
            }
        }
    }

    // == Enhanced Strategies ==
    /// Returns the shared enhanced strategy instance for `kind`.
    ///
    /// Fails with [`CacheError::UnsupportedStrategy`] for kinds that only
    /// implement the basic contract.
    pub fn enhanced_cache_strategy(
        &self,
        kind: CacheKind,
    ) -> Result<Arc<dyn EnhancedCacheStrategy>> {
        match kind {
            CacheKind::EnhancedRemote => {
                Ok(Arc::clone(&self.enhanced_remote) as Arc<dyn EnhancedCacheStrategy>)
            }
            CacheKind::InMemory | CacheKind::Remote => Err(CacheError::UnsupportedStrategy(
                format!("{} does not implement the enhanced contract", kind),
            )),
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn factory() -> CacheFactory {
        CacheFactory::new(&CacheConfig::default()).unwrap()
    }

    #[test]
    fn test_kind_parse_known_tags() {
        assert_eq!(
            "in-memory".parse::<CacheKind>().unwrap(),
            CacheKind::InMemory
        );
        assert_eq!("redis".parse::<CacheKind>().unwrap(), CacheKind::Remote);
        assert_eq!(
            "enhanced-remote".parse::<CacheKind>().unwrap(),
            CacheKind::EnhancedRemote
        );
    }

    #[test]
    fn test_kind_parse_unknown_tag_fails() {
        let result = "memcached".parse::<CacheKind>();
        assert!(matches!(result, Err(CacheError::UnsupportedStrategy(_))));
    }

    #[test]
    fn test_same_kind_returns_same_instance() {
        let factory = factory();

        let first = factory.cache_strategy(CacheKind::InMemory);
        let second = factory.cache_strategy(CacheKind::InMemory);

        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_distinct_kinds_return_distinct_instances() {
        let factory = factory();

        let memory = factory.cache_strategy(CacheKind::InMemory);
        let remote = factory.cache_strategy(CacheKind::Remote);

        assert!(!Arc::ptr_eq(&memory, &remote));
    }

    #[test]
    fn test_enhanced_for_basic_kind_fails() {
        let factory = factory();

        for kind in [CacheKind::InMemory, CacheKind::Remote] {
            let result = factory.enhanced_cache_strategy(kind);
            assert!(matches!(result, Err(CacheError::UnsupportedStrategy(_))));
        }
    }

    #[test]
    fn test_enhanced_remote_is_available() {
        let factory = factory();
        assert!(factory
            .enhanced_cache_strategy(CacheKind::EnhancedRemote)
            .is_ok());
    }
}
