//! Cache Replacement Policies.
//!
//! Selects the victim way when a read misses in a set with no free way. Both
//! policies read the per-line access timestamps kept by the cache, so they
//! carry no state of their own.
//!
//! # Policies
//!
//! - `Newest`: largest timestamp (default).
//! - `Oldest`: smallest timestamp (least recently used).

/// Largest-timestamp replacement policy.
pub mod newest;

/// Smallest-timestamp (LRU) replacement policy.
pub mod oldest;

pub use newest::NewestPolicy;
pub use oldest::OldestPolicy;

use super::line::CacheLine;
use crate::config::ReplacementPolicy as PolicyType;

/// Trait for cache replacement policies.
pub trait ReplacementPolicy: std::fmt::Debug + Send + Sync {
    /// Selects the way to evict from a full set.
    ///
    /// # Arguments
    ///
    /// * `ways` - The lines of one set, in way order. Never empty.
    ///
    /// # Returns
    ///
    /// The index of the way to evict.
    fn victim(&self, ways: &[CacheLine]) -> usize;
}

/// Builds the policy selected by configuration.
pub fn from_config(policy: PolicyType) -> Box<dyn ReplacementPolicy> {
    match policy {
        PolicyType::Newest => Box::new(NewestPolicy),
        PolicyType::Oldest => Box::new(OldestPolicy),
    }
}
