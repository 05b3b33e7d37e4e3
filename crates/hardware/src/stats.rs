//! Simulation statistics collection and reporting.
//!
//! This module summarizes a traversal run. It provides:
//! 1. **Access mix:** Reads split into hits, cold fills and evicting misses.
//! 2. **Counters:** The cache's own `hit_count`, `miss_count` and access clock.
//! 3. **Byte states:** Final histogram of the byte-state map.
//!
//! `miss_count` only counts evicting misses, so `hits + misses` is lower than
//! `reads` by the number of cold fills.

use serde::Serialize;

use crate::cache::memory_map::StateCounts;
use crate::cache::{AccessOutcome, CacheSim};

/// Statistics for one simulation run.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SimStats {
    /// Reads issued successfully.
    pub reads: u64,
    /// Reads that hit (the cache's `hit_count`).
    pub hits: u64,
    /// Evicting misses (the cache's `miss_count`).
    pub misses: u64,
    /// Misses served by an unoccupied way.
    pub cold_fills: u64,
    /// Lines evicted.
    pub evictions: u64,
    /// Final value of the access clock.
    pub time: u64,
    /// Final byte-state histogram.
    pub bytes: StateCounts,
}

impl SimStats {
    /// Accounts for one successful read.
    pub const fn record(&mut self, outcome: &AccessOutcome) {
        self.reads += 1;
        match outcome {
            AccessOutcome::Hit { .. } => {}
            AccessOutcome::Fill { .. } => self.cold_fills += 1,
            AccessOutcome::Evict { .. } => self.evictions += 1,
        }
    }

    /// Copies the counters and byte histogram from `cache`.
    pub fn sync(&mut self, cache: &CacheSim) {
        self.hits = cache.hit_count();
        self.misses = cache.miss_count();
        self.time = cache.time();
        self.bytes = cache.memory_map().counts();
    }

    /// `hits / (hits + misses)`, or `None` before any counted access.
    pub fn hit_rate(&self) -> Option<f64> {
        let total = self.hits + self.misses;
        if total == 0 {
            None
        } else {
            Some(self.hits as f64 / total as f64)
        }
    }

    /// Prints the selected report sections to stdout.
    ///
    /// Known sections are `summary`, `accesses` and `memory`; an empty slice
    /// prints all of them.
    pub fn print_sections(&self, sections: &[String]) {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let reads = if self.reads == 0 { 1 } else { self.reads };

        if want("summary") {
            println!("\n==========================================================");
            println!("CACHE SIMULATION STATISTICS");
            println!("==========================================================");
            println!("sim_reads                {}", self.reads);
            println!("sim_time                 {}", self.time);
            println!("hit_count                {}", self.hits);
            println!("miss_count               {}", self.misses);
            match self.hit_rate() {
                Some(rate) => println!("hit_rate                 {:.4}", rate),
                None => println!("hit_rate                 n/a"),
            }
            println!("----------------------------------------------------------");
        }
        if want("accesses") {
            println!("ACCESS BREAKDOWN");
            println!(
                "  reads.hit              {} ({:.2}%)",
                self.hits,
                (self.hits as f64 / reads as f64) * 100.0
            );
            println!(
                "  reads.cold_fill        {} ({:.2}%)",
                self.cold_fills,
                (self.cold_fills as f64 / reads as f64) * 100.0
            );
            println!(
                "  reads.evict            {} ({:.2}%)",
                self.evictions,
                (self.evictions as f64 / reads as f64) * 100.0
            );
            println!("----------------------------------------------------------");
        }
        if want("memory") {
            let total = self.bytes.total().max(1);
            println!("MEMORY MAP");
            for (name, count) in [
                ("empty", self.bytes.empty),
                ("hit", self.bytes.hit),
                ("miss", self.bytes.miss),
                ("line_loaded", self.bytes.line_loaded),
            ] {
                println!(
                    "  bytes.{:<16} {} ({:.2}%)",
                    name,
                    count,
                    (count as f64 / total as f64) * 100.0
                );
            }
            println!("==========================================================");
        }
    }

    /// Prints the full report.
    pub fn print(&self) {
        self.print_sections(&[]);
    }
}
