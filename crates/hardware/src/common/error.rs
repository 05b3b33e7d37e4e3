//! Error definitions for the cache simulator.
//!
//! This module defines every failure the simulator can report. It provides:
//! 1. **Configuration Errors:** Geometry and sizing problems detected at construction.
//! 2. **Access Errors:** Reads that fall outside backing memory or straddle a cache line.
//! 3. **Error Handling:** Integration with `std::error::Error` through `thiserror`.
//!
//! Every error is raised before the offending call mutates any state, so a
//! session that rejected a call stays usable.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type SimResult<T> = Result<T, SimError>;

/// Invalid cache or traversal geometry.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A parameter that drives shift/mask arithmetic is not a power of two.
    #[error("{what} must be a non-zero power of two, got {value}")]
    NotPowerOfTwo {
        /// Name of the offending parameter.
        what: &'static str,
        /// The rejected value.
        value: usize,
    },

    /// A cache with zero ways per set cannot hold any line.
    #[error("way count must be at least 1")]
    ZeroWays,

    /// Backing memory has no bytes.
    #[error("memory size must be non-zero")]
    EmptyMemory,

    /// Backing memory does not end on a line boundary, so the last line
    /// could not be filled.
    #[error("memory size {memory_size} is not a multiple of the line size {line_size}")]
    MemoryNotLineAligned {
        /// Configured memory size in bytes.
        memory_size: usize,
        /// Configured line size in bytes.
        line_size: usize,
    },

    /// The traversal matrix has no elements.
    #[error("matrix side must be non-zero")]
    ZeroMatrix,

    /// `matrix_side² × element_size` does not fit in `usize`.
    #[error("a {matrix_side} x {matrix_side} matrix of {element_size}-byte elements is too large")]
    MatrixTooLarge {
        /// Configured matrix side.
        matrix_side: usize,
        /// Configured element size in bytes.
        element_size: usize,
    },

    /// Matrix elements would straddle cache lines.
    #[error("element size {element_size} exceeds the line size {line_size}")]
    ElementTooLarge {
        /// Configured element size in bytes.
        element_size: usize,
        /// Configured line size in bytes.
        line_size: usize,
    },

    /// The traversal step would leave elements unaligned.
    #[error("element size {element_size} does not divide the matrix side {matrix_side}")]
    ElementNotDividingSide {
        /// Configured element size in bytes.
        element_size: usize,
        /// Configured matrix side.
        matrix_side: usize,
    },
}

/// Errors reported by the cache simulator.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SimError {
    /// Construction-time geometry or sizing problem.
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),

    /// The access touches bytes outside the backing memory.
    #[error("access of {size} byte(s) at {address:#x} is outside memory of {memory_size} bytes")]
    OutOfBounds {
        /// Start address of the rejected access.
        address: u64,
        /// Size of the rejected access in bytes.
        size: usize,
        /// Size of backing memory in bytes.
        memory_size: usize,
    },

    /// The access is empty or crosses a cache-line boundary.
    #[error("access of {size} byte(s) at {address:#x} does not fit in one {line_size}-byte line")]
    InvalidAccess {
        /// Start address of the rejected access.
        address: u64,
        /// Size of the rejected access in bytes.
        size: usize,
        /// Configured line size in bytes.
        line_size: usize,
    },

    /// The replacement policy named a way outside the set.
    #[error("replacement policy chose way {way} of a {ways}-way set")]
    InvalidVictim {
        /// Way returned by the policy.
        way: usize,
        /// Ways per set.
        ways: usize,
    },
}
