//! Oldest-Timestamp (LRU) Replacement Policy.
//!
//! Evicts the way whose last-access timestamp is numerically smallest. Ties
//! go to the lowest way index.

use super::ReplacementPolicy;
use crate::cache::line::CacheLine;

/// Smallest-timestamp policy.
#[derive(Clone, Copy, Debug, Default)]
pub struct OldestPolicy;

impl ReplacementPolicy for OldestPolicy {
    fn victim(&self, ways: &[CacheLine]) -> usize {
        let mut victim = 0;
        let mut oldest = u64::MAX;
        for (way, line) in ways.iter().enumerate() {
            if line.last_access < oldest {
                oldest = line.last_access;
                victim = way;
            }
        }
        victim
    }
}
