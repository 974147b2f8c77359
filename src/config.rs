//! Configuration Module
//!
//! Handles loading cache-layer configuration from environment variables.

use std::env;

use tracing::warn;

use crate::factory::CacheKind;

/// Cache layer configuration parameters.
///
/// All values can be configured via environment variables with sensible
/// defaults.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Strategy kind the context starts with
    pub backend: CacheKind,
    /// Capacity bound enforced by the enhanced strategy
    pub max_entries: usize,
    /// Default TTL in seconds applied by the user cache service
    pub default_ttl: u64,
    /// Connection URL for the remote backend
    pub redis_url: String,
}

impl CacheConfig {
    /// Creates a new CacheConfig by loading values from environment
    /// variables.
    ///
    /// # Environment Variables
    /// - `CACHE_BACKEND` - Initial strategy kind (default: enhanced-remote)
    /// - `MAX_ENTRIES` - Maximum cache entries (default: 1000)
    /// - `DEFAULT_TTL` - Default TTL in seconds (default: 60)
    /// - `REDIS_URL` - Remote backend URL (default: redis://127.0.0.1:6379)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            backend: env::var("CACHE_BACKEND")
                .ok()
                .and_then(|v| match v.parse() {
                    Ok(kind) => Some(kind),
                    Err(_) => {
                        // An unknown strategy tag is worth a trace, unlike
                        // a malformed number
                        warn!(value = %v, "Unrecognized CACHE_BACKEND, using default");
                        None
                    }
                })
                .unwrap_or(defaults.backend),
            max_entries: env::var("MAX_ENTRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_entries),
            default_ttl: env::var("DEFAULT_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.default_ttl),
            redis_url: env::var("REDIS_URL").unwrap_or(defaults.redis_url),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: CacheKind::EnhancedRemote,
            max_entries: 1000,
            default_ttl: 60,
            redis_url: "redis://127.0.0.1:6379".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = CacheConfig::default();
        assert_eq!(config.backend, CacheKind::EnhancedRemote);
        assert_eq!(config.max_entries, 1000);
        assert_eq!(config.default_ttl, 60);
        assert_eq!(config.redis_url, "redis://127.0.0.1:6379");
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("CACHE_BACKEND");
        env::remove_var("MAX_ENTRIES");
        env::remove_var("DEFAULT_TTL");
        env::remove_var("REDIS_URL");

        let config = CacheConfig::from_env();
        assert_eq!(config.backend, CacheKind::EnhancedRemote);
        assert_eq!(config.max_entries, 1000);
        assert_eq!(config.default_ttl, 60);

        // A malformed strategy tag falls back to the default kind
        // (checked here rather than in its own test so parallel tests
        // never race on the same env var)
        env::set_var("CACHE_BACKEND", "guava");
        let config = CacheConfig::from_env();
        assert_eq!(config.backend, CacheKind::EnhancedRemote);
        env::remove_var("CACHE_BACKEND");
    }
}
