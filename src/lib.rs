pub mod arith;
pub mod candidate;
pub mod hunt;
pub mod miller_rabin;
pub mod progress;
pub mod uint512;

use miller_rabin::{miller_rabin, Verdict};
use rand::Rng;
use uint512::U512;

/// Small primes for trial division pre-filter.
const SMALL_PRIMES: [u64; 64] = [
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89, 97,
    101, 103, 107, 109, 113, 127, 131, 137, 139, 149, 151, 157, 163, 167, 173, 179, 181, 191, 193,
    197, 199, 211, 223, 227, 229, 233, 239, 241, 251, 257, 263, 269, 271, 277, 281, 283, 293, 307,
    311,
];

/// Quick check if n is divisible by any small prime.
/// Returns true if n is definitely composite (has a small factor).
/// Returns false if n might be prime (passed trial division).
pub fn has_small_factor(n: &U512) -> bool {
    for &p in &SMALL_PRIMES {
        if n.rem_u64(p) == 0 {
            // If n equals the small prime itself, it's prime, not composite
            return *n > U512::from_u64(p);
        }
    }
    false
}

/// Two-round Miller–Rabin pre-screening: run 2 fast rounds first, full rounds
/// only for survivors. Composites are rejected much faster since most fail
/// within 2 rounds.
pub fn screened_miller_rabin<R: Rng + ?Sized>(n: &U512, rounds: u32, rng: &mut R) -> Verdict {
    if rounds > 2 && miller_rabin(n, 2, rng) == Verdict::Composite {
        return Verdict::Composite;
    }
    miller_rabin(n, rounds, rng)
}
