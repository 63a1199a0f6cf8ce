//! # CLI Execution Functions
//!
//! Extracted from `main.rs` to keep the entry point slim. Contains the
//! execution logic for each subcommand plus rayon configuration.

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing::info;

use primeforge::hunt;
use primeforge::miller_rabin::{miller_rabin_parallel, Verdict};
use primeforge::progress::Progress;
use primeforge::uint512::U512;

use super::Cli;

pub fn configure_rayon(threads: Option<usize>) -> Result<()> {
    if let Some(n) = threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build_global()
            .context("failed to configure rayon thread pool")?;
    }
    Ok(())
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    }
}

#[derive(Serialize)]
struct TestReport {
    candidate: String,
    rounds: u32,
    verdict: Verdict,
}

/// Run the tester on one explicit candidate. The verdict is data, not an
/// error: the process exits 0 either way.
pub fn run_test(cli: &Cli, candidate: &str) -> Result<()> {
    let n: U512 = candidate
        .parse()
        .with_context(|| format!("invalid candidate {candidate:?}"))?;
    let mut rng = make_rng(cli.seed);
    let verdict = miller_rabin_parallel(&n, cli.mr_rounds, &mut rng);
    info!(candidate = %n, rounds = cli.mr_rounds, %verdict, "test complete");

    if cli.json {
        let report = TestReport {
            candidate: format!("0x{:x}", n),
            rounds: cli.mr_rounds,
            verdict,
        };
        println!("{}", serde_json::to_string(&report)?);
    } else {
        println!("{}", verdict);
    }
    Ok(())
}

#[derive(Serialize)]
struct HuntRecord {
    candidate: String,
    bits: u32,
    rounds: u32,
}

/// Hunt until `count` probable primes are found, printing each to stdout.
pub fn run_hunt(cli: &Cli, count: usize) -> Result<()> {
    let mut rng = make_rng(cli.seed);
    let progress = Progress::new();
    // reporter thread is detached; the shutdown flag stops it and process
    // exit reaps it without waiting out its sleep
    let _reporter = progress.start_reporter();

    let primes = hunt::search(count, cli.mr_rounds, &mut rng, &progress);

    progress.stop();
    progress.print_status();

    for p in &primes {
        if cli.json {
            let record = HuntRecord {
                candidate: format!("0x{:x}", p),
                bits: p.bits(),
                rounds: cli.mr_rounds,
            };
            println!("{}", serde_json::to_string(&record)?);
        } else {
            println!("0x{:x}", p);
        }
    }
    Ok(())
}
