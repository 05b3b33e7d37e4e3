//! Simulation drivers.
//!
//! Provides the column-major traversal that generates the access pattern and
//! the simulator that feeds it through a cache session.

/// Top-level simulator driving a cache session with a traversal.
pub mod simulator;

/// Column-major matrix traversal iterator.
pub mod traversal;

pub use simulator::{Simulator, StepRecord};
pub use traversal::{Access, ColumnMajor};
