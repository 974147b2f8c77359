//! Usercache - a pluggable cache-strategy layer
//!
//! Provides interchangeable cache backends (in-memory, remote) behind a
//! single save/get/delete contract, an enhanced variant with capacity
//! bounding, eviction policies and statistics, and a context that lets
//! the active strategy be swapped at runtime.

pub mod config;
pub mod context;
pub mod error;
pub mod factory;
pub mod service;
pub mod strategy;

pub use config::CacheConfig;
pub use context::CacheContext;
pub use error::{CacheError, Result};
pub use factory::{CacheFactory, CacheKind};
pub use service::{UserCacheService, UserProfile};
pub use strategy::{
    CacheBackend, CacheStats, CacheStrategy, EnhancedCache, EnhancedCacheStrategy,
    EvictionPolicy, InMemoryStrategy, RedisStrategy,
};
