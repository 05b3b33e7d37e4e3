//! Cache Replacement Policy Tests.
//!
//! Verifies victim selection for the timestamp-based policies in isolation.
//! Each policy implements `ReplacementPolicy::victim(ways) -> usize` over the
//! lines of one set.

use cachesim_core::cache::line::CacheLine;
use cachesim_core::cache::policies::{self, NewestPolicy, OldestPolicy, ReplacementPolicy};
use cachesim_core::config::ReplacementPolicy as PolicyType;

fn set(stamps: &[u64]) -> Vec<CacheLine> {
    stamps
        .iter()
        .enumerate()
        .map(|(i, &t)| CacheLine::new(Some(i as u64), t))
        .collect()
}

// ══════════════════════════════════════════════════════════
// 1. Newest (default) policy
// ══════════════════════════════════════════════════════════

#[test]
fn newest_picks_largest_timestamp() {
    assert_eq!(NewestPolicy.victim(&set(&[3, 9, 4, 1])), 1);
    assert_eq!(NewestPolicy.victim(&set(&[3, 4, 5, 6])), 3);
}

/// Ties resolve to the lowest way, so an unhit set evicts way 0.
#[test]
fn newest_ties_go_to_first_way() {
    assert_eq!(NewestPolicy.victim(&set(&[0, 0, 0, 0])), 0);
    assert_eq!(NewestPolicy.victim(&set(&[2, 7, 7])), 1);
}

#[test]
fn newest_single_way() {
    assert_eq!(NewestPolicy.victim(&set(&[42])), 0);
}

// ══════════════════════════════════════════════════════════
// 2. Oldest (LRU) policy
// ══════════════════════════════════════════════════════════

#[test]
fn oldest_picks_smallest_timestamp() {
    assert_eq!(OldestPolicy.victim(&set(&[3, 9, 4, 1])), 3);
    assert_eq!(OldestPolicy.victim(&set(&[5, 2, 8])), 1);
}

#[test]
fn oldest_ties_go_to_first_way() {
    assert_eq!(OldestPolicy.victim(&set(&[6, 0, 0])), 1);
    assert_eq!(OldestPolicy.victim(&set(&[0, 0])), 0);
}

// ══════════════════════════════════════════════════════════
// 3. Configuration mapping
// ══════════════════════════════════════════════════════════

#[test]
fn from_config_selects_policy() {
    let lines = set(&[1, 5, 3]);
    assert_eq!(policies::from_config(PolicyType::Newest).victim(&lines), 1);
    assert_eq!(policies::from_config(PolicyType::Oldest).victim(&lines), 0);
    assert_eq!(
        policies::from_config(PolicyType::default()).victim(&lines),
        1,
        "largest timestamp is the default"
    );
}
