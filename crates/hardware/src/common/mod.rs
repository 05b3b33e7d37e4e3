//! Common types shared by every part of the simulator.
//!
//! Currently this is the error vocabulary: configuration errors raised at
//! construction time and access errors raised by `read`.

/// Error types and the crate-wide result alias.
pub mod error;

pub use error::{ConfigError, SimError, SimResult};
