use rand::Rng;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

use crate::candidate::random_candidate;
use crate::miller_rabin::Verdict;
use crate::progress::Progress;
use crate::uint512::U512;
use crate::{has_small_factor, screened_miller_rabin};

/// Hunt for probable primes: draw random full-width odd candidates and test
/// them until `count` survivors are collected.
///
/// Each candidate runs through the trial-division prefilter and then the
/// screened Miller-Rabin test, so composites fail cheap and early and the
/// full round count is reserved for candidates likely to pass it.
pub fn search<R: Rng + ?Sized>(
    count: usize,
    mr_rounds: u32,
    rng: &mut R,
    progress: &Arc<Progress>,
) -> Vec<U512> {
    let mut found = Vec::with_capacity(count);
    while found.len() < count {
        let n = random_candidate(rng);
        progress.tested.fetch_add(1, Ordering::Relaxed);

        if has_small_factor(&n) {
            progress.screened_out.fetch_add(1, Ordering::Relaxed);
            continue;
        }
        if screened_miller_rabin(&n, mr_rounds, rng) == Verdict::ProbablyPrime {
            progress.found.fetch_add(1, Ordering::Relaxed);
            info!(
                candidate = %n,
                tested = progress.tested.load(Ordering::Relaxed),
                "probable prime found"
            );
            found.push(n);
        }
    }
    found
}
