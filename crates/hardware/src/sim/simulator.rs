//! Simulator: owns a cache session and the traversal that drives it.
//!
//! Each [`Simulator::step`] issues exactly one read, so a front end can
//! advance one access per animation frame and inspect the byte-state map in
//! between, or call [`Simulator::run`] to drain the traversal at once.

use tracing::trace;

use super::traversal::{Access, ColumnMajor};
use crate::cache::{AccessOutcome, CacheSim};
use crate::common::SimResult;
use crate::config::Config;
use crate::stats::SimStats;

/// One completed traversal step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepRecord {
    /// The access that was issued.
    pub access: Access,
    /// How the cache served it.
    pub outcome: AccessOutcome,
}

/// Top-level simulator: cache session + traversal + run statistics.
#[derive(Debug)]
pub struct Simulator {
    cache: CacheSim,
    traversal: ColumnMajor,
    stats: SimStats,
}

impl Simulator {
    /// Validates `config` and builds a simulator over
    /// `matrix_side² × element_bytes` bytes of memory.
    ///
    /// # Errors
    ///
    /// [`SimError::Configuration`](crate::common::SimError::Configuration)
    /// when the geometry is invalid.
    pub fn new(config: &Config) -> SimResult<Self> {
        config.validate()?;
        let cache = CacheSim::from_config(config.traversal.memory_bytes(), &config.cache)?;
        Ok(Self {
            cache,
            traversal: ColumnMajor::from_config(&config.traversal),
            stats: SimStats::default(),
        })
    }

    /// Issues the next read of the traversal.
    ///
    /// Returns `Ok(None)` once the traversal is exhausted.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`CacheSim::read`]; the failed step is not
    /// retried.
    pub fn step(&mut self) -> SimResult<Option<StepRecord>> {
        let Some(access) = self.traversal.next() else {
            return Ok(None);
        };
        trace!(
            "access x={} y={} addr={:#x}",
            access.row, access.column, access.address
        );
        let outcome = self.cache.read(access.address, access.size)?;
        self.stats.record(&outcome);
        Ok(Some(StepRecord { access, outcome }))
    }

    /// Runs up to `limit` steps (all remaining steps when `None`) and returns
    /// the statistics so far.
    ///
    /// # Errors
    ///
    /// Stops at and returns the first read error.
    pub fn run(&mut self, limit: Option<usize>) -> SimResult<SimStats> {
        let mut taken = 0;
        while limit.is_none_or(|l| taken < l) {
            if self.step()?.is_none() {
                break;
            }
            taken += 1;
        }
        Ok(self.stats())
    }

    /// Statistics for the steps issued so far.
    pub fn stats(&self) -> SimStats {
        let mut stats = self.stats.clone();
        stats.sync(&self.cache);
        stats
    }

    /// Read-only view of the cache session.
    ///
    /// Reads go through [`Simulator::step`] so the statistics stay in sync.
    pub const fn cache(&self) -> &CacheSim {
        &self.cache
    }

    /// Steps not yet issued.
    pub fn remaining(&self) -> usize {
        self.traversal.len()
    }
}
