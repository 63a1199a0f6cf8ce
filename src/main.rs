//! # Main — CLI Entry Point
//!
//! Routes CLI subcommands to the engine. Handles the shared concerns:
//! structured logging, the random generator seed, and the Rayon thread pool
//! configuration.
//!
//! ## Subcommands
//!
//! - `test <HEX>`: run the Miller–Rabin tester on a given candidate.
//! - `hunt`: generate random 512-bit candidates until probable primes fall out.
//!
//! ## Global Options
//!
//! - `--mr-rounds`: Miller–Rabin iterations (default 10; false-positive bound
//!   4^-rounds).
//! - `--seed` / `PRIMEFORGE_SEED`: seed the generator for reproducible runs.
//!   Seeded runs are for testing and benchmarking only — key-generation use
//!   needs entropy (the default) and a threat model this tool does not claim.
//! - `--threads`: Rayon thread pool size for parallel witness rounds.
//! - `--json`: JSON logs and machine-readable reports.

mod cli;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
#[command(name = "primeforge", about = "Test and hunt 512-bit probable primes")]
struct Cli {
    /// Miller-Rabin rounds (higher = more certain but slower)
    #[arg(long, default_value_t = 10)]
    mr_rounds: u32,

    /// Random generator seed for reproducible runs (entropy if unset)
    #[arg(long, env = "PRIMEFORGE_SEED")]
    seed: Option<u64>,

    /// Number of rayon worker threads (defaults to all logical cores)
    #[arg(long)]
    threads: Option<usize>,

    /// Emit JSON: structured logs and machine-readable reports
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Test a candidate for probable primality
    Test {
        /// Candidate as big-endian hex (0x prefix optional)
        candidate: String,
    },
    /// Hunt for random 512-bit probable primes
    Hunt {
        /// Number of probable primes to collect before stopping
        #[arg(long, default_value_t = 1)]
        count: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Structured logging: --json (or LOG_FORMAT=json) for machines,
    // human-readable on stderr otherwise
    let json_logs = cli.json || std::env::var("LOG_FORMAT").as_deref() == Ok("json");
    if json_logs {
        tracing_subscriber::fmt()
            .json()
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    }

    cli::configure_rayon(cli.threads)?;

    match &cli.command {
        Commands::Test { candidate } => cli::run_test(&cli, candidate),
        Commands::Hunt { count } => cli::run_hunt(&cli, *count),
    }
}
