//! Address decomposition.
//!
//! Splits a byte address into `tag | set | offset` fields and rebuilds a line
//! base address from a `(set, tag)` pair. Line size and set count are powers
//! of two, so every field is extracted with a mask and a shift:
//!
//! ```text
//!  63                 set_shift+tag   line_shift        0
//!  +--------------------+---------------+---------------+
//!  |        tag         |   set index   |    offset     |
//!  +--------------------+---------------+---------------+
//! ```

use crate::common::{ConfigError, SimResult};

/// Tag/set/offset codec for a fixed cache geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddressCodec {
    line_size: usize,
    set_count: usize,
    /// `log2(line_size)`.
    line_shift: u32,
    /// `log2(set_count * line_size)`.
    tag_shift: u32,
    /// `set_count * line_size - 1`.
    index_mask: u64,
}

impl AddressCodec {
    /// Creates a codec for `line_size`-byte lines spread over `set_count` sets.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotPowerOfTwo`] (wrapped in
    /// [`SimError::Configuration`](crate::common::SimError::Configuration))
    /// when either parameter is zero or not a power of two.
    pub fn new(line_size: usize, set_count: usize) -> SimResult<Self> {
        if !line_size.is_power_of_two() {
            return Err(ConfigError::NotPowerOfTwo {
                what: "line size",
                value: line_size,
            }
            .into());
        }
        if !set_count.is_power_of_two() {
            return Err(ConfigError::NotPowerOfTwo {
                what: "set count",
                value: set_count,
            }
            .into());
        }
        let span = (line_size as u64) * (set_count as u64);
        Ok(Self {
            line_size,
            set_count,
            line_shift: line_size.trailing_zeros(),
            tag_shift: span.trailing_zeros(),
            index_mask: span - 1,
        })
    }

    /// Line size in bytes.
    #[inline(always)]
    pub const fn line_size(&self) -> usize {
        self.line_size
    }

    /// Number of sets.
    #[inline(always)]
    pub const fn set_count(&self) -> usize {
        self.set_count
    }

    /// Set index selected by `address`.
    #[inline(always)]
    pub const fn set_of(&self, address: u64) -> usize {
        ((address & self.index_mask) >> self.line_shift) as usize
    }

    /// Tag stored for `address`.
    #[inline(always)]
    pub const fn tag_of(&self, address: u64) -> u64 {
        address >> self.tag_shift
    }

    /// Base address of the line holding `tag` in set `set_index`.
    #[inline(always)]
    pub const fn address_of(&self, set_index: usize, tag: u64) -> u64 {
        (tag << self.tag_shift) | ((set_index as u64) << self.line_shift)
    }

    /// Byte offset of `address` within its line.
    #[inline(always)]
    pub const fn offset_of(&self, address: u64) -> usize {
        (address & (self.line_size as u64 - 1)) as usize
    }

    /// `address` rounded down to its line boundary.
    #[inline(always)]
    pub const fn line_base(&self, address: u64) -> u64 {
        address & !(self.line_size as u64 - 1)
    }
}
