//! Cache behaviour simulator CLI.
//!
//! This binary drives a column-major matrix traversal through a simulated
//! set-associative cache. It provides:
//! 1. **Run:** Execute the traversal and print the statistics report (or JSON).
//! 2. **Trace:** Print one line per access with its hit/fill/evict outcome.
//!
//! Per-access debug output is available through `RUST_LOG=cachesim_core=debug`.

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::process;
use tracing_subscriber::EnvFilter;

use cachesim_core::cache::AccessOutcome;
use cachesim_core::config::{CacheConfig, Config, ReplacementPolicy, TraversalConfig};
use cachesim_core::stats::SimStats;
use cachesim_core::{SimError, Simulator};

#[derive(Parser, Debug)]
#[command(
    name = "cachesim",
    author,
    version,
    about = "Set-associative cache behaviour simulator",
    long_about = "Walk a square matrix in column-major order through a simulated set-associative cache.\n\nExamples:\n  cachesim run\n  cachesim run --sets 1 --ways 2 --line-size 16 --matrix-side 16\n  cachesim run --policy oldest --json\n  cachesim trace --steps 32"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the traversal and print statistics.
    Run {
        #[command(flatten)]
        geometry: Geometry,

        /// Stop after this many reads.
        #[arg(long)]
        steps: Option<usize>,

        /// Print a JSON report instead of the text report.
        #[arg(long)]
        json: bool,
    },

    /// Print every access of the traversal with its outcome.
    Trace {
        #[command(flatten)]
        geometry: Geometry,

        /// Stop after this many reads.
        #[arg(long)]
        steps: Option<usize>,
    },
}

/// Cache geometry and traversal shape flags.
#[derive(Args, Debug)]
struct Geometry {
    /// Side of the traversed matrix.
    #[arg(long, default_value_t = TraversalConfig::default().matrix_side)]
    matrix_side: usize,

    /// Matrix element (and read) size in bytes.
    #[arg(long, default_value_t = TraversalConfig::default().element_bytes)]
    element_size: usize,

    /// Cache line size in bytes (power of two).
    #[arg(long, default_value_t = CacheConfig::default().line_bytes)]
    line_size: usize,

    /// Number of sets (power of two).
    #[arg(long, default_value_t = CacheConfig::default().sets)]
    sets: usize,

    /// Ways per set.
    #[arg(long, default_value_t = CacheConfig::default().ways)]
    ways: usize,

    /// Victim selection rule for full sets.
    #[arg(long, value_enum, default_value_t = PolicyArg::Newest)]
    policy: PolicyArg,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PolicyArg {
    /// Evict the most recently hit way (default).
    Newest,
    /// Evict the least recently hit way (LRU).
    Oldest,
}

impl Geometry {
    fn to_config(&self) -> Config {
        Config {
            cache: CacheConfig {
                line_bytes: self.line_size,
                sets: self.sets,
                ways: self.ways,
                policy: match self.policy {
                    PolicyArg::Newest => ReplacementPolicy::Newest,
                    PolicyArg::Oldest => ReplacementPolicy::Oldest,
                },
            },
            traversal: TraversalConfig {
                matrix_side: self.matrix_side,
                element_bytes: self.element_size,
            },
        }
    }
}

/// JSON report emitted by `run --json`.
#[derive(Serialize)]
struct Report<'a> {
    config: &'a Config,
    stats: &'a SimStats,
    hit_rate: Option<f64>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Run {
            geometry,
            steps,
            json,
        } => cmd_run(&geometry.to_config(), steps, json),
        Commands::Trace { geometry, steps } => cmd_trace(&geometry.to_config(), steps),
    };

    if let Err(e) = result {
        eprintln!("[!] {e}");
        process::exit(1);
    }
}

/// Runs the traversal and prints the statistics report.
fn cmd_run(config: &Config, steps: Option<usize>, json: bool) -> Result<(), SimError> {
    let mut sim = Simulator::new(config)?;
    let stats = sim.run(steps)?;

    if json {
        let report = Report {
            config,
            stats: &stats,
            hit_rate: stats.hit_rate(),
        };
        match serde_json::to_string_pretty(&report) {
            Ok(text) => println!("{text}"),
            Err(e) => {
                eprintln!("[!] failed to encode report: {e}");
                process::exit(1);
            }
        }
        return Ok(());
    }

    println!(
        "[*] {} x {} matrix, {}-byte elements, {} bytes of memory",
        config.traversal.matrix_side,
        config.traversal.matrix_side,
        config.traversal.element_bytes,
        config.traversal.memory_bytes()
    );
    println!(
        "[*] Cache: {} sets x {} ways x {}-byte lines ({} bytes), policy {:?}",
        config.cache.sets,
        config.cache.ways,
        config.cache.line_bytes,
        config.cache.capacity_bytes(),
        config.cache.policy
    );
    stats.print();
    Ok(())
}

/// Prints one line per access.
fn cmd_trace(config: &Config, steps: Option<usize>) -> Result<(), SimError> {
    let mut sim = Simulator::new(config)?;
    let limit = steps.unwrap_or(usize::MAX);

    println!("{:>8} {:>6} {:>6} {:>10}  outcome", "step", "x", "y", "addr");
    let mut taken = 0;
    while taken < limit {
        let Some(record) = sim.step()? else {
            break;
        };
        let outcome = match record.outcome {
            AccessOutcome::Hit { way } => format!("hit   way={way}"),
            AccessOutcome::Fill { way } => format!("fill  way={way}"),
            AccessOutcome::Evict { way, victim_base } => {
                format!("evict way={way} victim={victim_base:#x}")
            }
        };
        println!(
            "{:>8} {:>6} {:>6} {:>#10x}  {}",
            record.access.step,
            record.access.row,
            record.access.column,
            record.access.address,
            outcome
        );
        taken += 1;
    }

    let stats = sim.stats();
    println!(
        "hits={} misses={} cold_fills={} evictions={}",
        stats.hits, stats.misses, stats.cold_fills, stats.evictions
    );
    Ok(())
}
