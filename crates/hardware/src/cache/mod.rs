//! Set-Associative Cache Simulator.
//!
//! This module implements the cache state machine:
//! address decomposition, associative lookup, line fills, victim selection,
//! and a byte-granular state map mirroring backing memory. Only reads are
//! modelled.
//!
//! Counting is deliberately asymmetric: a miss that lands in a
//! still-unoccupied way is a *cold fill* and leaves both `miss_count` and the
//! access clock untouched, while a miss that forces an eviction bumps both.

/// Tag/set/offset address codec.
pub mod codec;

/// Per-way tag and timestamp bookkeeping.
pub mod line;

/// Byte-granular state map over backing memory.
pub mod memory_map;

/// Victim selection policies.
pub mod policies;

use std::ops::Range;

use serde::Serialize;
use tracing::debug;

use self::codec::AddressCodec;
use self::line::CacheLine;
use self::memory_map::{ByteState, ByteStateMap};
use self::policies::ReplacementPolicy;
use crate::common::{ConfigError, SimError, SimResult};
use crate::config::CacheConfig;

/// How a successful read was served.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AccessOutcome {
    /// The tag was present in `way`.
    Hit {
        /// Way that held the tag.
        way: usize,
    },
    /// Miss served by the unoccupied `way`; not counted as a miss.
    Fill {
        /// Way that received the line.
        way: usize,
    },
    /// Miss that evicted the line at `victim_base` from `way`.
    Evict {
        /// Way that was evicted and refilled.
        way: usize,
        /// Base address of the evicted line.
        victim_base: u64,
    },
}

impl AccessOutcome {
    /// Whether the read hit.
    pub const fn is_hit(&self) -> bool {
        matches!(self, Self::Hit { .. })
    }

    /// Way touched by the read.
    pub const fn way(&self) -> usize {
        match *self {
            Self::Hit { way } | Self::Fill { way } | Self::Evict { way, .. } => way,
        }
    }
}

/// A simulation session: cache lines, counters and the byte-state map.
///
/// The session is the only mutator of its state; drivers interact through
/// [`CacheSim::read`] and the read-only accessors.
#[derive(Debug)]
pub struct CacheSim {
    codec: AddressCodec,
    /// `sets * ways` lines, indexed `set * ways + way`.
    lines: Vec<CacheLine>,
    ways: usize,
    memory: ByteStateMap,
    policy: Box<dyn ReplacementPolicy>,
    time: u64,
    hit_count: u64,
    miss_count: u64,
}

impl CacheSim {
    /// Creates a session over `memory_size` bytes with the default
    /// (largest-timestamp) replacement policy.
    ///
    /// # Errors
    ///
    /// [`SimError::Configuration`] when `line_size` or `set_count` is not a
    /// power of two, `way_count` is zero, or `memory_size` is zero or not a
    /// multiple of `line_size`.
    pub fn new(
        memory_size: usize,
        line_size: usize,
        set_count: usize,
        way_count: usize,
    ) -> SimResult<Self> {
        Self::with_policy(
            memory_size,
            line_size,
            set_count,
            way_count,
            policies::from_config(crate::config::ReplacementPolicy::default()),
        )
    }

    /// Creates a session from a [`CacheConfig`].
    ///
    /// # Errors
    ///
    /// Same as [`CacheSim::new`].
    pub fn from_config(memory_size: usize, config: &CacheConfig) -> SimResult<Self> {
        Self::with_policy(
            memory_size,
            config.line_bytes,
            config.sets,
            config.ways,
            policies::from_config(config.policy),
        )
    }

    /// Creates a session with a caller-supplied replacement policy.
    ///
    /// # Errors
    ///
    /// Same as [`CacheSim::new`].
    pub fn with_policy(
        memory_size: usize,
        line_size: usize,
        set_count: usize,
        way_count: usize,
        policy: Box<dyn ReplacementPolicy>,
    ) -> SimResult<Self> {
        let codec = AddressCodec::new(line_size, set_count)?;
        if way_count == 0 {
            return Err(ConfigError::ZeroWays.into());
        }
        if memory_size == 0 {
            return Err(ConfigError::EmptyMemory.into());
        }
        if memory_size % line_size != 0 {
            return Err(ConfigError::MemoryNotLineAligned {
                memory_size,
                line_size,
            }
            .into());
        }

        Ok(Self {
            codec,
            lines: vec![CacheLine::default(); set_count * way_count],
            ways: way_count,
            memory: ByteStateMap::new(memory_size),
            policy,
            time: 0,
            hit_count: 0,
            miss_count: 0,
        })
    }

    /// Simulates reading `size` bytes starting at `address`.
    ///
    /// Looks the line up in its set; on a hit, stamps the way with the next
    /// clock value. On a miss, installs the tag in the first unoccupied way,
    /// or evicts a victim chosen by the policy when the set is full. The
    /// byte-state map is updated before returning.
    ///
    /// # Errors
    ///
    /// - [`SimError::OutOfBounds`] if any byte lies outside backing memory.
    /// - [`SimError::InvalidAccess`] if `size` is zero or the bytes span two lines.
    /// - [`SimError::InvalidVictim`] if the policy names a way outside the set.
    ///
    /// Nothing is mutated when an error is returned.
    pub fn read(&mut self, address: u64, size: usize) -> SimResult<AccessOutcome> {
        let range = self.check_access(address, size)?;
        let tag = self.codec.tag_of(address);
        let set = self.codec.set_of(address);
        let base = set * self.ways;
        debug!("read addr={address:#x} size={size} tag={tag:#x} set={set}");

        let mut empty = None;
        for way in 0..self.ways {
            let line = &mut self.lines[base + way];
            if line.holds(tag) {
                self.hit_count += 1;
                self.time += 1;
                line.last_access = self.time;
                self.memory.mark(range, ByteState::Hit);
                debug!("hit way={way} time={}", self.time);
                return Ok(AccessOutcome::Hit { way });
            }
            if empty.is_none() && !line.is_occupied() {
                empty = Some(way);
            }
        }

        let outcome = if let Some(way) = empty {
            self.lines[base + way].tag = Some(tag);
            debug!("cold fill way={way}");
            AccessOutcome::Fill { way }
        } else {
            let (way, victim_base) = self.evict_line(set)?;
            self.lines[base + way].tag = Some(tag);
            self.time += 1;
            self.miss_count += 1;
            debug!("miss way={way} evicted={victim_base:#x} time={}", self.time);
            AccessOutcome::Evict { way, victim_base }
        };

        let line_start = self.codec.line_base(address) as usize;
        self.memory.mark(
            line_start..line_start + self.codec.line_size(),
            ByteState::LineLoaded,
        );
        self.memory.mark(range, ByteState::Miss);
        Ok(outcome)
    }

    /// Frees a way in the full set `set_index`.
    ///
    /// Clears the victim's tag and timestamp and resets its bytes to
    /// [`ByteState::Empty`]. Returns the way and the evicted line's base
    /// address.
    ///
    /// Fails with [`SimError::InvalidVictim`], before touching the set, if
    /// the policy names a way outside it.
    fn evict_line(&mut self, set_index: usize) -> SimResult<(usize, u64)> {
        let base = set_index * self.ways;
        let way = self.policy.victim(&self.lines[base..base + self.ways]);
        if way >= self.ways {
            return Err(SimError::InvalidVictim {
                way,
                ways: self.ways,
            });
        }

        let line = &mut self.lines[base + way];
        let victim_base = line
            .tag
            .map_or(0, |tag| self.codec.address_of(set_index, tag));
        line.clear();

        let start = victim_base as usize;
        self.memory
            .mark(start..start + self.codec.line_size(), ByteState::Empty);
        Ok((way, victim_base))
    }

    /// Validates an access and returns its byte range in the map.
    fn check_access(&self, address: u64, size: usize) -> SimResult<Range<usize>> {
        let memory_size = self.memory.len();
        let end = address.checked_add(size as u64);
        if address >= memory_size as u64 || end.is_none_or(|e| e > memory_size as u64) {
            return Err(SimError::OutOfBounds {
                address,
                size,
                memory_size,
            });
        }
        let line_size = self.codec.line_size();
        if size == 0 || self.codec.offset_of(address) + size > line_size {
            return Err(SimError::InvalidAccess {
                address,
                size,
                line_size,
            });
        }
        let start = address as usize;
        Ok(start..start + size)
    }

    /// Whether the line containing `address` is currently cached.
    pub fn contains(&self, address: u64) -> bool {
        let tag = self.codec.tag_of(address);
        self.set(self.codec.set_of(address))
            .iter()
            .any(|line| line.holds(tag))
    }

    /// Read-only view of the byte-state map after the most recent read.
    pub const fn memory_map(&self) -> &ByteStateMap {
        &self.memory
    }

    /// Reads that hit.
    pub const fn hit_count(&self) -> u64 {
        self.hit_count
    }

    /// Reads that missed and evicted a line. Cold fills are not counted.
    pub const fn miss_count(&self) -> u64 {
        self.miss_count
    }

    /// Global access clock; advances on hits and evicting misses.
    pub const fn time(&self) -> u64 {
        self.time
    }

    /// Size of backing memory in bytes.
    pub fn memory_size(&self) -> usize {
        self.memory.len()
    }

    /// Address codec for this geometry.
    pub const fn codec(&self) -> &AddressCodec {
        &self.codec
    }

    /// Associativity.
    pub const fn ways(&self) -> usize {
        self.ways
    }

    /// Lines of set `set_index`, in way order.
    ///
    /// # Panics
    ///
    /// If `set_index` is not below the configured set count.
    pub fn set(&self, set_index: usize) -> &[CacheLine] {
        let base = set_index * self.ways;
        &self.lines[base..base + self.ways]
    }

    /// A single line, or `None` when `set_index` or `way` is out of range.
    pub fn line(&self, set_index: usize, way: usize) -> Option<&CacheLine> {
        if way >= self.ways {
            return None;
        }
        self.lines.get(set_index * self.ways + way)
    }
}
