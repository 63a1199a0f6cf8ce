//! # Progress — Atomic Hunt Progress Counters
//!
//! Thread-safe progress tracking shared between the hunt loop and the
//! background status reporter. Counters are atomics so parallel workers
//! update them lock-free.
//!
//! ## Background Reporter
//!
//! A dedicated thread logs progress every 10 seconds: candidates tested,
//! candidates screened out by trial division, probable primes found, and the
//! test rate. Shuts down cleanly via the `shutdown` flag.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::info;

pub struct Progress {
    /// Candidates drawn and examined.
    pub tested: AtomicU64,
    /// Candidates rejected by the trial-division prefilter.
    pub screened_out: AtomicU64,
    /// Probable primes found.
    pub found: AtomicU64,
    start: Instant,
    shutdown: AtomicBool,
}

impl Progress {
    pub fn new() -> Arc<Self> {
        Arc::new(Progress {
            tested: AtomicU64::new(0),
            screened_out: AtomicU64::new(0),
            found: AtomicU64::new(0),
            start: Instant::now(),
            shutdown: AtomicBool::new(false),
        })
    }

    pub fn start_reporter(self: &Arc<Self>) -> thread::JoinHandle<()> {
        let progress = Arc::clone(self);
        thread::spawn(move || loop {
            thread::sleep(Duration::from_secs(10));
            if progress.shutdown.load(Ordering::Relaxed) {
                break;
            }
            progress.print_status();
        })
    }

    pub fn print_status(&self) {
        let elapsed = self.start.elapsed();
        let tested = self.tested.load(Ordering::Relaxed);
        let screened_out = self.screened_out.load(Ordering::Relaxed);
        let found = self.found.load(Ordering::Relaxed);
        let rate = if elapsed.as_secs() > 0 {
            tested as f64 / elapsed.as_secs_f64()
        } else {
            0.0
        };
        info!(
            tested,
            screened_out,
            found,
            rate = format_args!("{:.2}", rate),
            elapsed_secs = elapsed.as_secs(),
            "hunt progress"
        );
    }

    pub fn stop(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }
}
