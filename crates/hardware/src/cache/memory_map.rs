//! Byte-granular view of backing memory.
//!
//! Every byte of the simulated memory carries a [`ByteState`] describing what
//! the cache last did with it. Renderers consume the map as a flat slice (or
//! as fixed-width rows) and map the numeric codes to colours.

use std::ops::{Deref, Range};

use serde::Serialize;

/// Simulation status of one byte of backing memory.
///
/// The discriminants are the stable numeric codes exposed to renderers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum ByteState {
    /// Not held by any cache line.
    #[default]
    Empty = 0,
    /// Reserved code; no simulator path assigns it.
    InCache = 1,
    /// Most recently read through a cache hit.
    Hit = 2,
    /// Most recently read through a miss.
    Miss = 3,
    /// Held by an occupied line but not read since the line was filled.
    LineLoaded = 4,
}

impl ByteState {
    /// Every state, in code order.
    pub const ALL: [Self; 5] = [
        Self::Empty,
        Self::InCache,
        Self::Hit,
        Self::Miss,
        Self::LineLoaded,
    ];

    /// Numeric code of this state.
    #[inline(always)]
    pub const fn code(self) -> u8 {
        self as u8
    }
}

/// Number of bytes in each [`ByteState`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct StateCounts {
    /// Bytes in [`ByteState::Empty`].
    pub empty: usize,
    /// Bytes in [`ByteState::InCache`].
    pub in_cache: usize,
    /// Bytes in [`ByteState::Hit`].
    pub hit: usize,
    /// Bytes in [`ByteState::Miss`].
    pub miss: usize,
    /// Bytes in [`ByteState::LineLoaded`].
    pub line_loaded: usize,
}

impl StateCounts {
    /// Sum over all states; always equals the map length.
    pub const fn total(&self) -> usize {
        self.empty + self.in_cache + self.hit + self.miss + self.line_loaded
    }

    /// Count for a single state.
    pub const fn get(&self, state: ByteState) -> usize {
        match state {
            ByteState::Empty => self.empty,
            ByteState::InCache => self.in_cache,
            ByteState::Hit => self.hit,
            ByteState::Miss => self.miss,
            ByteState::LineLoaded => self.line_loaded,
        }
    }
}

/// One [`ByteState`] per byte of backing memory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ByteStateMap {
    bytes: Vec<ByteState>,
}

impl ByteStateMap {
    /// Creates a map of `len` bytes, all [`ByteState::Empty`].
    pub fn new(len: usize) -> Self {
        Self {
            bytes: vec![ByteState::Empty; len],
        }
    }

    /// Sets every byte in `range` to `state`.
    ///
    /// Callers validate the range against the map length first.
    pub(crate) fn mark(&mut self, range: Range<usize>, state: ByteState) {
        self.bytes[range].fill(state);
    }

    /// Per-state byte histogram.
    pub fn counts(&self) -> StateCounts {
        let mut counts = StateCounts::default();
        for state in &self.bytes {
            let slot = match state {
                ByteState::Empty => &mut counts.empty,
                ByteState::InCache => &mut counts.in_cache,
                ByteState::Hit => &mut counts.hit,
                ByteState::Miss => &mut counts.miss,
                ByteState::LineLoaded => &mut counts.line_loaded,
            };
            *slot += 1;
        }
        counts
    }

    /// Numeric codes of every byte, in address order.
    pub fn codes(&self) -> Vec<u8> {
        self.bytes.iter().map(|s| s.code()).collect()
    }

    /// The map split into rows of `width` bytes; a trailing partial row is
    /// dropped. Returns no rows when `width` is zero.
    pub fn rows(&self, width: usize) -> impl Iterator<Item = &[ByteState]> + '_ {
        let width = if width == 0 { self.bytes.len() + 1 } else { width };
        self.bytes.chunks_exact(width)
    }
}

impl Deref for ByteStateMap {
    type Target = [ByteState];

    fn deref(&self) -> &[ByteState] {
        &self.bytes
    }
}
