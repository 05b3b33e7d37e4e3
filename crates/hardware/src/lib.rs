//! Set-associative cache behaviour simulator.
//!
//! This crate models a set-associative cache in front of a linear memory
//! array and classifies every simulated read as a hit, a cold fill or an
//! evicting miss:
//! 1. **Cache:** Address codec, cache lines, lookup/fill/evict engine, and
//!    the byte-state map consumed by renderers.
//! 2. **Policies:** Victim selection behind the `ReplacementPolicy` trait.
//! 3. **Simulation:** Column-major matrix traversal and the driver that runs it.
//! 4. **Configuration and statistics:** Geometry validation and run summaries.

/// Cache state machine (codec, lines, policies, byte-state map).
pub mod cache;
/// Common types (errors).
pub mod common;
/// Simulator configuration (defaults, geometry, policy selection).
pub mod config;
/// Traversal driver and simulator.
pub mod sim;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Cache session; construct with `CacheSim::new` and drive with `read`.
pub use crate::cache::CacheSim;
/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Crate error type.
pub use crate::common::SimError;
/// Traversal-driven simulator.
pub use crate::sim::Simulator;
