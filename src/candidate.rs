//! # Candidate — Random Full-Width Odd Candidates
//!
//! Draws the values the primality tester consumes. Every function takes the
//! generator explicitly, so runs are reproducible from a seed and concurrent
//! callers can hold independent generators.
//!
//! The statistical soundness of the downstream test is only as good as the
//! supplied source: any uniform `Rng` is accepted, and nothing here checks
//! its quality. Callers generating keys for real cryptographic use must
//! supply a cryptographically secure generator; a seeded `StdRng` is for
//! reproducible searches and tests.

use rand::Rng;

use crate::uint512::{U512, LIMBS};

/// A uniform draw over the full 512-bit range.
pub fn random_u512<R: Rng + ?Sized>(rng: &mut R) -> U512 {
    let mut limbs = [0u64; LIMBS];
    for limb in limbs.iter_mut() {
        *limb = rng.gen();
    }
    U512::from_limbs(limbs)
}

/// A random candidate for primality testing: uniform over 512 bits, then the
/// top bit is forced (guarantees full bit-width) and the bottom bit is forced
/// (guarantees oddness).
pub fn random_candidate<R: Rng + ?Sized>(rng: &mut R) -> U512 {
    let mut limbs = *random_u512(rng).limbs();
    limbs[LIMBS - 1] |= 1 << 63;
    limbs[0] |= 1;
    U512::from_limbs(limbs)
}
