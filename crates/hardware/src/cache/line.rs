//! Cache line bookkeeping.

/// A single way of a set: the tag it holds and when it was last hit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheLine {
    /// `None` while the way is unoccupied.
    pub(crate) tag: Option<u64>,
    /// Value of the global access counter at the last hit; 0 after a fill.
    pub(crate) last_access: u64,
}

impl CacheLine {
    /// Creates a line holding `tag` with the given access timestamp.
    pub const fn new(tag: Option<u64>, last_access: u64) -> Self {
        Self { tag, last_access }
    }

    /// Tag currently held, or `None` for an unoccupied way.
    #[inline(always)]
    pub const fn tag(&self) -> Option<u64> {
        self.tag
    }

    /// Access timestamp used for victim selection.
    #[inline(always)]
    pub const fn last_access(&self) -> u64 {
        self.last_access
    }

    /// Whether the way holds a line.
    #[inline(always)]
    pub const fn is_occupied(&self) -> bool {
        self.tag.is_some()
    }

    /// Whether the way holds `tag`.
    #[inline(always)]
    pub fn holds(&self, tag: u64) -> bool {
        self.tag == Some(tag)
    }

    /// Returns the way to the unoccupied state.
    pub(crate) const fn clear(&mut self) {
        self.tag = None;
        self.last_access = 0;
    }
}
