//! Newest-Timestamp Replacement Policy.
//!
//! Evicts the way whose last-access timestamp is numerically largest, i.e.
//! the line hit most recently. On equal timestamps the lowest way index
//! wins. Freshly filled lines carry a
//! timestamp of zero, so a set that has never been hit always evicts way 0.

use super::ReplacementPolicy;
use crate::cache::line::CacheLine;

/// Largest-timestamp policy.
#[derive(Clone, Copy, Debug, Default)]
pub struct NewestPolicy;

impl ReplacementPolicy for NewestPolicy {
    fn victim(&self, ways: &[CacheLine]) -> usize {
        let mut victim = 0;
        let mut newest = None;
        for (way, line) in ways.iter().enumerate() {
            if newest.is_none_or(|t| line.last_access > t) {
                newest = Some(line.last_access);
                victim = way;
            }
        }
        victim
    }
}
