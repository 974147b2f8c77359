//! User Cache Service Module
//!
//! Caches user-profile projections in front of the system of record.
//! Keys are built as `"user:" + id`; values cross the strategy boundary
//! as opaque JSON strings.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::CacheConfig;
use crate::context::CacheContext;
use crate::error::Result;
use crate::factory::{CacheFactory, CacheKind};

// == Constants ==
/// Namespace prefix for user cache keys
const USER_KEY_PREFIX: &str = "user:";

// == User Profile ==
/// User-profile projection cached by the lookup service.
///
/// The cache layer never inspects this structure; it is serialized to an
/// opaque payload at the service boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: u64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub mobile: String,
    pub address: String,
    pub postal_code: String,
    pub roles: Vec<String>,
}

// == User Cache Service ==
/// Lookup-side cache for user profiles.
///
/// Owns a [`CacheContext`] seeded from the factory and forwards every
/// operation through it, so the active strategy can be swapped at runtime
/// without touching this service's callers.
pub struct UserCacheService {
    context: CacheContext,
    factory: Arc<CacheFactory>,
    ttl: Duration,
}

impl UserCacheService {
    // == Constructor ==
    /// Creates the service with the configured default strategy and TTL.
    pub fn new(factory: Arc<CacheFactory>, config: &CacheConfig) -> Self {
        let context = CacheContext::new(factory.cache_strategy(config.backend));
        Self {
            context,
            factory,
            ttl: Duration::from_secs(config.default_ttl),
        }
    }

    fn user_key(id: u64) -> String {
        format!("{}{}", USER_KEY_PREFIX, id)
    }

    // == Save User ==
    /// Caches a user profile under `"user:" + id` with the service TTL.
    pub fn save_user(&self, user: &UserProfile) -> Result<()> {
        let payload = serde_json::to_string(user)?;
        self.context.save(&Self::user_key(user.id), &payload, self.ttl)
    }

    // == Get User ==
    /// Retrieves a cached user profile by ID.
    ///
    /// Returns `Ok(None)` when the user is not cached. A backend failure
    /// propagates as an error, so the caller can fall back to the system
    /// of record instead of treating the user as uncached.
    pub fn get_user(&self, id: u64) -> Result<Option<UserProfile>> {
        match self.context.get(&Self::user_key(id))? {
            Some(payload) => Ok(Some(serde_json::from_str(&payload)?)),
            None => Ok(None),
        }
    }

    // == Delete User ==
    /// Invalidates the cached profile for `id`; no-op when absent.
    pub fn delete_user(&self, id: u64) -> Result<()> {
        self.context.delete(&Self::user_key(id))
    }

    // == Strategy Swap ==
    /// Switches the caching strategy at runtime.
    ///
    /// Entries held by the previous strategy are not migrated.
    pub fn change_cache_strategy(&self, kind: CacheKind) {
        debug!(%kind, "User cache switching strategy");
        self.context
            .set_cache_strategy(self.factory.cache_strategy(kind));
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user(id: u64) -> UserProfile {
        UserProfile {
            id,
            username: format!("user{}", id),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: format!("user{}@example.com", id),
            mobile: "+44 20 7946 0000".to_string(),
            address: "12 St James's Square, London".to_string(),
            postal_code: "SW1Y 4JH".to_string(),
            roles: vec!["ROLE_USER".to_string()],
        }
    }

    fn in_memory_service() -> UserCacheService {
        let config = CacheConfig {
            backend: CacheKind::InMemory,
            ..CacheConfig::default()
        };
        let factory = Arc::new(CacheFactory::new(&config).unwrap());
        UserCacheService::new(factory, &config)
    }

    #[test]
    fn test_save_and_get_user() {
        let service = in_memory_service();
        let user = sample_user(42);

        service.save_user(&user).unwrap();
        let cached = service.get_user(42).unwrap();

        assert_eq!(cached, Some(user));
    }

    #[test]
    fn test_roundtrip_preserves_contact_fields() {
        let service = in_memory_service();
        let user = sample_user(42);

        service.save_user(&user).unwrap();
        let cached = service.get_user(42).unwrap().unwrap();

        assert_eq!(cached.mobile, user.mobile);
        assert_eq!(cached.address, user.address);
        assert_eq!(cached.postal_code, user.postal_code);
    }

    #[test]
    fn test_get_uncached_user_is_none() {
        let service = in_memory_service();
        assert_eq!(service.get_user(7).unwrap(), None);
    }

    #[test]
    fn test_delete_user_invalidates() {
        let service = in_memory_service();
        let user = sample_user(42);

        service.save_user(&user).unwrap();
        service.delete_user(42).unwrap();

        assert_eq!(service.get_user(42).unwrap(), None);
    }

    #[test]
    fn test_delete_uncached_user_is_noop() {
        let service = in_memory_service();
        assert!(service.delete_user(99).is_ok());
    }

    #[test]
    fn test_overwrite_refreshes_profile() {
        let service = in_memory_service();
        let mut user = sample_user(42);

        service.save_user(&user).unwrap();
        user.email = "new@example.com".to_string();
        service.save_user(&user).unwrap();

        let cached = service.get_user(42).unwrap().unwrap();
        assert_eq!(cached.email, "new@example.com");
    }
}
