//! Configuration system for the cache simulator.
//!
//! This module defines the configuration structures used to parameterize a
//! simulation run. It provides:
//! 1. **Defaults:** The baseline geometry (64-byte lines, 4 sets, direct-mapped)
//!    and the 64 x 64 matrix of 4-byte elements the traversal walks by default.
//! 2. **Structures:** Cache geometry and traversal shape, grouped under [`Config`].
//! 3. **Enums:** Replacement policy selection.
//! 4. **Validation:** Geometry checks performed before any simulator is built.
//!
//! Configuration is supplied as JSON by embedding programs or built from CLI
//! flags; use `Config::default()` for the baseline.

use serde::{Deserialize, Serialize};

use crate::common::ConfigError;

/// Default configuration constants for the simulator.
mod defaults {
    /// Default cache line size in bytes.
    pub const LINE_BYTES: usize = 64;

    /// Default number of sets.
    pub const SETS: usize = 4;

    /// Default associativity (1 way = direct-mapped).
    pub const WAYS: usize = 1;

    /// Default side length of the traversed matrix, in elements per row.
    pub const MATRIX_SIDE: usize = 64;

    /// Default matrix element size in bytes.
    pub const ELEMENT_BYTES: usize = 4;
}

/// Victim selection rule used when a full set must make room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReplacementPolicy {
    /// Evict the way with the numerically largest access timestamp.
    ///
    /// The opposite of LRU: the most recently hit line is the first to go.
    #[default]
    #[serde(alias = "Newest")]
    Newest,
    /// Evict the way with the numerically smallest access timestamp (LRU).
    #[serde(alias = "Oldest")]
    Oldest,
}

/// Root configuration structure containing all simulator settings.
///
/// # Examples
///
/// ```
/// use cachesim_core::config::{Config, ReplacementPolicy};
///
/// let json = r#"{
///     "cache": { "line_bytes": 16, "sets": 1, "ways": 2, "policy": "Oldest" },
///     "traversal": { "matrix_side": 16 }
/// }"#;
///
/// let config: Config = serde_json::from_str(json).unwrap();
/// assert_eq!(config.cache.ways, 2);
/// assert_eq!(config.cache.policy, ReplacementPolicy::Oldest);
/// assert_eq!(config.traversal.element_bytes, 4);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Cache geometry and policy.
    #[serde(default)]
    pub cache: CacheConfig,
    /// Matrix traversal shape.
    #[serde(default)]
    pub traversal: TraversalConfig,
}

impl Config {
    /// Checks the cache geometry and that the traversal fits it.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.cache.validate()?;
        self.traversal.validate(self.cache.line_bytes)?;
        let memory_size = self.traversal.memory_bytes();
        if memory_size % self.cache.line_bytes != 0 {
            return Err(ConfigError::MemoryNotLineAligned {
                memory_size,
                line_size: self.cache.line_bytes,
            });
        }
        Ok(())
    }
}

/// Cache geometry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Cache line size in bytes (power of two)
    #[serde(default = "CacheConfig::default_line")]
    pub line_bytes: usize,

    /// Number of sets (power of two)
    #[serde(default = "CacheConfig::default_sets")]
    pub sets: usize,

    /// Associativity (number of ways)
    #[serde(default = "CacheConfig::default_ways")]
    pub ways: usize,

    /// Replacement policy
    #[serde(default)]
    pub policy: ReplacementPolicy,
}

impl CacheConfig {
    /// Returns the default cache line size in bytes.
    const fn default_line() -> usize {
        defaults::LINE_BYTES
    }

    /// Returns the default number of sets.
    const fn default_sets() -> usize {
        defaults::SETS
    }

    /// Returns the default cache associativity (number of ways).
    const fn default_ways() -> usize {
        defaults::WAYS
    }

    /// Total number of bytes the cache can hold.
    pub const fn capacity_bytes(&self) -> usize {
        self.line_bytes.saturating_mul(self.sets).saturating_mul(self.ways)
    }

    /// Checks that line size and set count are powers of two and that
    /// there is at least one way.
    ///
    /// # Errors
    ///
    /// [`ConfigError::NotPowerOfTwo`] or [`ConfigError::ZeroWays`].
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if !self.line_bytes.is_power_of_two() {
            return Err(ConfigError::NotPowerOfTwo {
                what: "line size",
                value: self.line_bytes,
            });
        }
        if !self.sets.is_power_of_two() {
            return Err(ConfigError::NotPowerOfTwo {
                what: "set count",
                value: self.sets,
            });
        }
        if self.ways == 0 {
            return Err(ConfigError::ZeroWays);
        }
        Ok(())
    }
}

impl Default for CacheConfig {
    /// Creates the default geometry: 4 sets of one 64-byte line (256 bytes).
    fn default() -> Self {
        Self {
            line_bytes: defaults::LINE_BYTES,
            sets: defaults::SETS,
            ways: defaults::WAYS,
            policy: ReplacementPolicy::default(),
        }
    }
}

/// Shape of the matrix walked by the column-major traversal.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TraversalConfig {
    /// Matrix side length; also the byte stride between columns
    #[serde(default = "TraversalConfig::default_side")]
    pub matrix_side: usize,

    /// Element size in bytes; also the size of each read
    #[serde(default = "TraversalConfig::default_element")]
    pub element_bytes: usize,
}

impl TraversalConfig {
    /// Returns the default matrix side.
    const fn default_side() -> usize {
        defaults::MATRIX_SIDE
    }

    /// Returns the default element size in bytes.
    const fn default_element() -> usize {
        defaults::ELEMENT_BYTES
    }

    /// Size of the backing memory the traversal needs, in bytes, or `None`
    /// if it overflows `usize`.
    pub const fn checked_memory_bytes(&self) -> Option<usize> {
        match self.matrix_side.checked_mul(self.matrix_side) {
            Some(cells) => cells.checked_mul(self.element_bytes),
            None => None,
        }
    }

    /// Size of the backing memory the traversal needs, in bytes.
    ///
    /// Saturates at `usize::MAX`; [`TraversalConfig::validate`] rejects
    /// matrices whose size overflows.
    pub const fn memory_bytes(&self) -> usize {
        match self.checked_memory_bytes() {
            Some(bytes) => bytes,
            None => usize::MAX,
        }
    }

    /// Number of reads a full traversal issues.
    pub const fn steps(&self) -> usize {
        if self.element_bytes == 0 {
            return 0;
        }
        self.matrix_side.saturating_mul(self.matrix_side) / self.element_bytes
    }

    /// Checks that every element read stays inside one `line_bytes` line.
    ///
    /// # Errors
    ///
    /// [`ConfigError::ZeroMatrix`], [`ConfigError::MatrixTooLarge`],
    /// [`ConfigError::NotPowerOfTwo`], [`ConfigError::ElementTooLarge`] or
    /// [`ConfigError::ElementNotDividingSide`].
    pub const fn validate(&self, line_bytes: usize) -> Result<(), ConfigError> {
        if self.matrix_side == 0 {
            return Err(ConfigError::ZeroMatrix);
        }
        if self.checked_memory_bytes().is_none() {
            return Err(ConfigError::MatrixTooLarge {
                matrix_side: self.matrix_side,
                element_size: self.element_bytes,
            });
        }
        if !self.element_bytes.is_power_of_two() {
            return Err(ConfigError::NotPowerOfTwo {
                what: "element size",
                value: self.element_bytes,
            });
        }
        if self.element_bytes > line_bytes {
            return Err(ConfigError::ElementTooLarge {
                element_size: self.element_bytes,
                line_size: line_bytes,
            });
        }
        if self.matrix_side % self.element_bytes != 0 {
            return Err(ConfigError::ElementNotDividingSide {
                element_size: self.element_bytes,
                matrix_side: self.matrix_side,
            });
        }
        Ok(())
    }
}

impl Default for TraversalConfig {
    /// Creates the default 64 x 64 matrix of 4-byte elements.
    fn default() -> Self {
        Self {
            matrix_side: defaults::MATRIX_SIDE,
            element_bytes: defaults::ELEMENT_BYTES,
        }
    }
}
