//! Error types for the cache layer
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache layer.
///
/// A cache miss is not an error: `get` returns `Ok(None)` for absent or
/// expired keys. Errors are reserved for rejected arguments, unknown
/// strategy kinds and backend failures, so callers can tell "not cached"
/// apart from "cache unusable for this call".
#[derive(Error, Debug)]
pub enum CacheError {
    /// Empty or over-long key rejected before touching the backend
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Strategy kind is unknown or does not support the requested contract
    #[error("Unsupported cache strategy: {0}")]
    UnsupportedStrategy(String),

    /// Remote backend unreachable or returned a protocol error
    #[error("Cache backend unavailable: {0}")]
    BackendUnavailable(#[from] redis::RedisError),

    /// Cached payload could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

// == Result Type Alias ==
/// Convenience Result type for the cache layer.
pub type Result<T> = std::result::Result<T, CacheError>;
