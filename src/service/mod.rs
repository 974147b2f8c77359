//! Service Module
//!
//! Consumers of the cache layer. The user cache service is the only
//! in-scope caller; it owns the key-prefixing convention and the payload
//! type, while the cache layer treats both as opaque.

mod user_cache;

pub use user_cache::{UserCacheService, UserProfile};
