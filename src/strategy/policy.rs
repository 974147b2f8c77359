//! Eviction Policy Module
//!
//! Enumerates the strategies a capacity-bounded cache may use when full.

use std::fmt;
use std::str::FromStr;

use crate::error::CacheError;

// == Eviction Policy ==
/// Policy consulted by the enhanced strategy when a save would exceed the
/// capacity bound. Exactly one entry is evicted per over-capacity save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EvictionPolicy {
    /// Least Recently Used - evicts the entry with the oldest access
    Lru,
    /// Least Frequently Used - evicts the entry with the fewest accesses
    Lfu,
    /// First In First Out - evicts the entry with the oldest timestamp
    ///
    /// Shares the last-access bookkeeping with LRU, so an entry touched by
    /// a read is treated as re-inserted.
    Fifo,
    /// Time To Live - evicts the entry with the soonest remaining TTL
    #[default]
    Ttl,
}

impl fmt::Display for EvictionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EvictionPolicy::Lru => "lru",
            EvictionPolicy::Lfu => "lfu",
            EvictionPolicy::Fifo => "fifo",
            EvictionPolicy::Ttl => "ttl",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for EvictionPolicy {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lru" => Ok(EvictionPolicy::Lru),
            "lfu" => Ok(EvictionPolicy::Lfu),
            "fifo" => Ok(EvictionPolicy::Fifo),
            "ttl" => Ok(EvictionPolicy::Ttl),
            other => Err(CacheError::InvalidArgument(format!(
                "Unknown eviction policy: {}",
                other
            ))),
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_default_is_ttl() {
        assert_eq!(EvictionPolicy::default(), EvictionPolicy::Ttl);
    }

    #[test]
    fn test_policy_roundtrip_through_str() {
        for policy in [
            EvictionPolicy::Lru,
            EvictionPolicy::Lfu,
            EvictionPolicy::Fifo,
            EvictionPolicy::Ttl,
        ] {
            let parsed: EvictionPolicy = policy.to_string().parse().unwrap();
            assert_eq!(parsed, policy);
        }
    }

    #[test]
    fn test_policy_parse_is_case_insensitive() {
        let parsed: EvictionPolicy = "LRU".parse().unwrap();
        assert_eq!(parsed, EvictionPolicy::Lru);
    }

    #[test]
    fn test_policy_parse_unknown() {
        let result: Result<EvictionPolicy, _> = "mru".parse();
        assert!(matches!(result, Err(CacheError::InvalidArgument(_))));
    }
}
