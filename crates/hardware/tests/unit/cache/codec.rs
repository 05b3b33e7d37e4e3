//! Address Codec Unit Tests.
//!
//! Verifies tag/set/offset extraction with shift-and-mask arithmetic, line
//! base reconstruction, and rejection of non-power-of-two geometry.

use cachesim_core::cache::codec::AddressCodec;
use cachesim_core::common::{ConfigError, SimError};
use proptest::prelude::*;
use rstest::rstest;

/// 64-byte lines, 4 sets: offset = bits [5:0], set = bits [7:6], tag = bits [63:8].
fn codec() -> AddressCodec {
    match AddressCodec::new(64, 4) {
        Ok(c) => c,
        Err(e) => panic!("{e}"),
    }
}

// ══════════════════════════════════════════════════════════
// 1. Field extraction
// ══════════════════════════════════════════════════════════

#[rstest]
#[case(0x000, 0, 0)]
#[case(0x03F, 0, 0)]
#[case(0x040, 1, 0)]
#[case(0x0FF, 3, 0)]
#[case(0x100, 0, 1)]
#[case(0x1C4, 3, 1)]
#[case(0xF00, 0, 0xF)]
fn set_and_tag(#[case] address: u64, #[case] set: usize, #[case] tag: u64) {
    let c = codec();
    assert_eq!(c.set_of(address), set, "set of {address:#x}");
    assert_eq!(c.tag_of(address), tag, "tag of {address:#x}");
}

#[test]
fn offset_and_line_base() {
    let c = codec();
    assert_eq!(c.offset_of(0x46), 6);
    assert_eq!(c.line_base(0x46), 0x40);
    assert_eq!(c.offset_of(0x40), 0);
    assert_eq!(c.line_base(0x7F), 0x40);
}

#[test]
fn address_of_rebuilds_line_base() {
    let c = codec();
    assert_eq!(c.address_of(3, 1), 0x1C0);
    assert_eq!(c.address_of(0, 0), 0);
    assert_eq!(c.address_of(1, 0xF), 0xF40);
}

/// A single set puts every address bit above the offset into the tag.
#[test]
fn single_set_geometry() {
    let c = match AddressCodec::new(16, 1) {
        Ok(c) => c,
        Err(e) => panic!("{e}"),
    };
    assert_eq!(c.set_of(0x30), 0);
    assert_eq!(c.tag_of(0x30), 3);
    assert_eq!(c.address_of(0, 3), 0x30);
}

// ══════════════════════════════════════════════════════════
// 2. Geometry validation
// ══════════════════════════════════════════════════════════

#[rstest]
#[case(48, 4, "line size", 48)]
#[case(0, 4, "line size", 0)]
#[case(64, 3, "set count", 3)]
#[case(64, 0, "set count", 0)]
fn rejects_non_power_of_two(
    #[case] line: usize,
    #[case] sets: usize,
    #[case] what: &'static str,
    #[case] value: usize,
) {
    assert_eq!(
        AddressCodec::new(line, sets),
        Err(SimError::Configuration(ConfigError::NotPowerOfTwo { what, value }))
    );
}

// ══════════════════════════════════════════════════════════
// 3. Round-trip property
// ══════════════════════════════════════════════════════════

proptest! {
    /// Rebuilding from (set, tag) yields the line base, which decodes to the
    /// same set and tag as the original address.
    #[test]
    fn round_trip(address in any::<u64>(), line_shift in 0u32..=12, set_shift in 0u32..=10) {
        let c = AddressCodec::new(1 << line_shift, 1 << set_shift)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        let set = c.set_of(address);
        let tag = c.tag_of(address);
        let rebuilt = c.address_of(set, tag);

        prop_assert_eq!(rebuilt, c.line_base(address));
        prop_assert_eq!(c.tag_of(rebuilt), tag);
        prop_assert_eq!(c.set_of(rebuilt), set);
        prop_assert!(set < c.set_count());
        prop_assert!(c.offset_of(address) < c.line_size());
    }
}
