//! # Miller–Rabin — Probabilistic Primality Testing
//!
//! Witness-based compositeness detection over [`U512`] candidates.
//!
//! ## Algorithm
//!
//! Write `n − 1 = d · 2^s` with `d` odd. For a witness base `a`, compute
//! `x = a^d mod n`; if `x` is 1 or `n − 1` the round passes. Otherwise square
//! `x` up to `s − 1` times, passing if `n − 1` ever appears. A round that
//! exhausts the squarings has produced a proof of compositeness — terminal
//! and authoritative, no further rounds run. If all rounds pass, the verdict
//! is only [`Verdict::ProbablyPrime`]: for independently, uniformly chosen
//! witnesses the false-positive probability is at most 4^−rounds (Rabin's
//! bound). Never treat a pass as a certificate.
//!
//! ## Witness sampling
//!
//! A witness is drawn by reducing a uniform 512-bit draw modulo `n − 2` and
//! adding 2. Two known quirks are kept as-is rather than silently corrected:
//! the usual modulo bias toward the low end of the range, and the endpoint
//! `a = n − 1` (a guaranteed strong liar) being reachable. Both mildly weaken
//! an individual round without affecting classification correctness.
//!
//! ## References
//!
//! - G.L. Miller, "Riemann's Hypothesis and Tests for Primality",
//!   J. Comput. Syst. Sci., 13(3):300–317, 1976.
//! - M.O. Rabin, "Probabilistic Algorithm for Testing Primality",
//!   J. Number Theory, 12(1):128–138, 1980.

use rand::Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::arith::{mulmod, powmod, rem};
use crate::candidate::random_u512;
use crate::uint512::U512;

/// Outcome of a primality test.
///
/// `Composite` is authoritative. `ProbablyPrime` means no witness was found:
/// primality was not disproved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    ProbablyPrime,
    Composite,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::ProbablyPrime => write!(f, "probably prime"),
            Verdict::Composite => write!(f, "composite"),
        }
    }
}

/// Split an even value into `d · 2^s` with `d` odd, counting right shifts.
///
/// Called with `n − 1` for odd `n >= 3`, so the input is nonzero.
pub fn decompose(n_minus_1: &U512) -> (U512, u32) {
    debug_assert!(!n_minus_1.is_zero());
    let mut d = *n_minus_1;
    let mut s = 0;
    while d.is_even() {
        d = d.shr1();
        s += 1;
    }
    (d, s)
}

/// Single-base strong-pseudoprime check: does `n` pass the witness round for
/// base `a`?
///
/// Returns `true` when the round passes (no evidence of compositeness from
/// this base) and `false` when `a` proves `n` composite. `n` must be odd and
/// at least 3.
pub fn strong_probable_prime(n: &U512, a: &U512) -> bool {
    let n_minus_1 = n.sub(&U512::ONE);
    let (d, s) = decompose(&n_minus_1);
    witness_round(n, &n_minus_1, &d, s, a)
}

/// One witness round against a precomputed decomposition.
fn witness_round(n: &U512, n_minus_1: &U512, d: &U512, s: u32, a: &U512) -> bool {
    let mut x = powmod(a, d, n);
    if x == U512::ONE || x == *n_minus_1 {
        return true;
    }
    for _ in 1..s {
        x = mulmod(&x, &x, n);
        if x == *n_minus_1 {
            return true;
        }
    }
    false
}

/// Draw a witness base from `[2, n − 1]` by reducing a uniform 512-bit value
/// modulo `n − 2` and shifting by 2. See the module docs for the sampling
/// quirks this keeps.
fn draw_witness<R: Rng + ?Sized>(rng: &mut R, n_minus_2: &U512) -> U512 {
    rem(&random_u512(rng), n_minus_2).add_u64(2)
}

/// Miller–Rabin probable-prime test with `rounds` independent witness rounds.
///
/// Degenerate inputs are classified, not reported as errors: values below 2
/// and even values other than 2 are `Composite`; 2 itself is prime. The first
/// witness that proves compositeness short-circuits the remaining rounds.
///
/// Pure: no logging, no timing, no side effects beyond consuming randomness
/// from `rng` — external harnesses can wrap it with counters without
/// instrumentation leaking into the algorithm.
pub fn miller_rabin<R: Rng + ?Sized>(n: &U512, rounds: u32, rng: &mut R) -> Verdict {
    if let Some(v) = classify_trivial(n) {
        return v;
    }
    let n_minus_1 = n.sub(&U512::ONE);
    let n_minus_2 = n_minus_1.sub(&U512::ONE);
    let (d, s) = decompose(&n_minus_1);

    for _ in 0..rounds {
        let a = draw_witness(rng, &n_minus_2);
        if !witness_round(n, &n_minus_1, &d, s, &a) {
            return Verdict::Composite;
        }
    }
    Verdict::ProbablyPrime
}

/// Parallel variant: witnesses are drawn up front from the single generator,
/// then the rounds fan out across the rayon pool. Rounds share only the
/// read-only `(n, d, s)` triple; the first round to prove compositeness wins
/// and the short-circuiting `all` abandons the rest, so the verdict matches
/// the serial test's semantics.
pub fn miller_rabin_parallel<R: Rng + ?Sized>(n: &U512, rounds: u32, rng: &mut R) -> Verdict {
    if let Some(v) = classify_trivial(n) {
        return v;
    }
    let n_minus_1 = n.sub(&U512::ONE);
    let n_minus_2 = n_minus_1.sub(&U512::ONE);
    let (d, s) = decompose(&n_minus_1);

    let witnesses: Vec<U512> = (0..rounds).map(|_| draw_witness(rng, &n_minus_2)).collect();
    let all_pass = witnesses
        .par_iter()
        .all(|a| witness_round(n, &n_minus_1, &d, s, a));
    if all_pass {
        Verdict::ProbablyPrime
    } else {
        Verdict::Composite
    }
}

/// Handles `n < 2`, `n == 2`, and even `n` before any arithmetic. Returns
/// `None` for odd `n >= 3`.
fn classify_trivial(n: &U512) -> Option<Verdict> {
    if *n <= U512::ONE {
        return Some(Verdict::Composite);
    }
    if n.is_even() {
        return Some(if *n == U512::from_u64(2) {
            Verdict::ProbablyPrime
        } else {
            Verdict::Composite
        });
    }
    None
}
