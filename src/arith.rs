//! # Arith — Modular Multiplication and Exponentiation
//!
//! The hot path of the primality engine: one Miller–Rabin test performs
//! O(bit-width) calls to [`mulmod`], each O(limbs²) word operations.
//!
//! ## Algorithm: schoolbook multiply, subtract-and-compare reduce
//!
//! [`mulmod`] computes the full 1024-bit product with schoolbook
//! multiplication (each partial product `a[i]·b[j]` accumulated through a
//! 128-bit intermediate, carries propagated upward), then reduces by repeated
//! subtraction of the modulus aligned to the product's top bit: subtract
//! `m << k` whenever the running product is at least that large, stepping `k`
//! down to zero. Each bit position needs at most one subtraction, so the
//! reduction is bounded by the bit-width of the product — never an unbounded
//! scan. Deliberately not Barrett or Montgomery reduction; the simple form is
//! the point of comparison for the benchmarks.
//!
//! [`powmod`] is binary square-and-multiply over the exponent's significant
//! bits, least significant first.
//!
//! ## References
//!
//! - Menezes, van Oorschot, Vanstone, "Handbook of Applied Cryptography",
//!   ch. 14 (multiple-precision arithmetic), CRC Press, 1996.

use std::cmp::Ordering;

use crate::uint512::{U512, LIMBS};

/// Limb count of a double-width product.
const WIDE: usize = 2 * LIMBS;

/// Full double-width schoolbook product of two 512-bit values.
pub fn mul_wide(a: &U512, b: &U512) -> [u64; WIDE] {
    let a = a.limbs();
    let b = b.limbs();
    let mut prod = [0u64; WIDE];
    for i in 0..LIMBS {
        let mut carry = 0u128;
        for j in 0..LIMBS {
            let t = prod[i + j] as u128 + a[i] as u128 * b[j] as u128 + carry;
            prod[i + j] = t as u64;
            carry = t >> 64;
        }
        // position i+LIMBS is untouched until now, so the carry fits
        prod[i + LIMBS] = carry as u64;
    }
    prod
}

fn wide_bits(v: &[u64; WIDE]) -> u32 {
    for i in (0..WIDE).rev() {
        if v[i] != 0 {
            return 64 * (i as u32 + 1) - v[i].leading_zeros();
        }
    }
    0
}

fn wide_cmp(a: &[u64; WIDE], b: &[u64; WIDE]) -> Ordering {
    for i in (0..WIDE).rev() {
        match a[i].cmp(&b[i]) {
            Ordering::Equal => continue,
            ord => return ord,
        }
    }
    Ordering::Equal
}

/// `a -= b`, requires `a >= b`.
fn wide_sub_assign(a: &mut [u64; WIDE], b: &[u64; WIDE]) {
    let mut borrow = 0u128;
    for i in 0..WIDE {
        let d = (a[i] as u128).wrapping_sub(b[i] as u128).wrapping_sub(borrow);
        a[i] = d as u64;
        borrow = (d >> 64) & 1;
    }
    debug_assert_eq!(borrow, 0);
}

fn wide_shr1_assign(a: &mut [u64; WIDE]) {
    let mut carry = 0u64;
    for i in (0..WIDE).rev() {
        let low = a[i] & 1;
        a[i] = (a[i] >> 1) | (carry << 63);
        carry = low;
    }
}

/// `m << shift` into a double-width buffer. The shifted value must fit in
/// 1024 bits.
fn wide_shl(m: &U512, shift: u32) -> [u64; WIDE] {
    let mut out = [0u64; WIDE];
    let word = (shift / 64) as usize;
    let bit = shift % 64;
    for (i, &v) in m.limbs().iter().enumerate() {
        if v == 0 {
            continue;
        }
        out[i + word] |= v << bit;
        if bit > 0 && i + word + 1 < WIDE {
            out[i + word + 1] |= v >> (64 - bit);
        }
    }
    out
}

/// Reduce a double-width product into `[0, m)`.
///
/// Requires `prod < m · 2^512`, which holds whenever at least one of the
/// original factors was below `m` (the other is below `2^512` by type).
fn reduce_wide(mut prod: [u64; WIDE], m: &U512) -> U512 {
    let mbits = m.bits();
    let pbits = wide_bits(&prod);
    if pbits >= mbits {
        // m << k has exactly pbits bits at k = pbits - mbits, so the running
        // product stays below twice the aligned modulus and one conditional
        // subtraction per position suffices.
        let mut aligned = wide_shl(m, pbits - mbits);
        for _ in 0..=(pbits - mbits) {
            if wide_cmp(&prod, &aligned) != Ordering::Less {
                wide_sub_assign(&mut prod, &aligned);
            }
            wide_shr1_assign(&mut aligned);
        }
    }
    let mut limbs = [0u64; LIMBS];
    limbs.copy_from_slice(&prod[..LIMBS]);
    U512::from_limbs(limbs)
}

/// `(a · b) mod m`.
///
/// `m` must be nonzero and at least one factor must already be below `m`
/// (every caller maintains the post-reduction invariant, so in practice both
/// are). The result is always in `[0, m)`.
pub fn mulmod(a: &U512, b: &U512, m: &U512) -> U512 {
    debug_assert!(!m.is_zero(), "modulus must be nonzero");
    reduce_wide(mul_wide(a, b), m)
}

/// `a mod m` for a single-width value.
pub fn rem(a: &U512, m: &U512) -> U512 {
    mulmod(a, &U512::ONE, m)
}

/// `base^exp mod m` by square-and-multiply, scanning `exp` from the least
/// significant bit upward.
///
/// `m` must be greater than 1. `powmod(x, 0, m) == 1` for any `x`.
pub fn powmod(base: &U512, exp: &U512, m: &U512) -> U512 {
    debug_assert!(*m > U512::ONE, "modulus must exceed 1");
    let mut result = U512::ONE;
    let mut b = rem(base, m);
    for i in 0..exp.bits() {
        if exp.bit(i) {
            result = mulmod(&result, &b, m);
        }
        b = mulmod(&b, &b, m);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pow2(k: u32) -> U512 {
        let mut limbs = [0u64; LIMBS];
        limbs[(k / 64) as usize] = 1u64 << (k % 64);
        U512::from_limbs(limbs)
    }

    #[test]
    fn mul_wide_small_values() {
        let prod = mul_wide(&U512::from_u64(0xFFFF_FFFF), &U512::from_u64(0xFFFF_FFFF));
        assert_eq!(prod[0], 0xFFFF_FFFE_0000_0001);
        assert!(prod[1..].iter().all(|&l| l == 0));
    }

    #[test]
    fn mul_wide_crosses_the_512_bit_boundary() {
        // 2^511 * 2 = 2^512: lands in the high half
        let prod = mul_wide(&pow2(511), &U512::from_u64(2));
        assert_eq!(prod[LIMBS], 1);
        assert!(prod[..LIMBS].iter().all(|&l| l == 0));
    }

    #[test]
    fn mulmod_small_values_match_u64() {
        for (a, b, m) in [(7u64, 9, 13), (100, 100, 17), (0, 5, 3), (12, 1, 35)] {
            assert_eq!(
                mulmod(&U512::from_u64(a), &U512::from_u64(b), &U512::from_u64(m)),
                U512::from_u64(a * b % m),
                "mulmod({a}, {b}, {m})"
            );
        }
    }

    #[test]
    fn mulmod_by_zero_is_zero() {
        let m = U512::from_u64(97);
        assert_eq!(mulmod(&U512::from_u64(55), &U512::ZERO, &m), U512::ZERO);
    }

    #[test]
    fn mulmod_is_commutative() {
        let m = U512::from_u64(1_000_003);
        let a = U512::from_u64(999_999);
        let b = U512::from_u64(123_456);
        assert_eq!(mulmod(&a, &b, &m), mulmod(&b, &a, &m));
    }

    #[test]
    fn mulmod_reduces_full_width_products() {
        // 2^a * 2^b mod (2^c - 1) = 2^((a+b) mod c): exercises a product with
        // all 1024 bits in play against a full-width modulus.
        let m = pow2(509).sub(&U512::ONE);
        let r = mulmod(&pow2(500), &pow2(500), &m);
        assert_eq!(r, pow2((500 + 500) % 509));

        // and a power-of-two modulus: 2^600 mod 2^505 = 0
        assert_eq!(mulmod(&pow2(300), &pow2(300), &pow2(505)), U512::ZERO);
    }

    #[test]
    fn powmod_zero_exponent_is_one() {
        let m = U512::from_u64(1_000_000_007);
        assert_eq!(powmod(&U512::from_u64(12345), &U512::ZERO, &m), U512::ONE);
        assert_eq!(powmod(&U512::ZERO, &U512::ZERO, &m), U512::ONE);
    }

    #[test]
    fn powmod_matches_repeated_multiplication() {
        let m = U512::from_u64(10_007);
        for base in [2u64, 3, 10, 9_999] {
            let mut expect = U512::ONE;
            for e in 0..40u64 {
                assert_eq!(
                    powmod(&U512::from_u64(base), &U512::from_u64(e), &m),
                    expect,
                    "powmod({base}, {e}, 10007)"
                );
                expect = mulmod(&expect, &U512::from_u64(base), &m);
            }
        }
    }

    #[test]
    fn powmod_fermat_little_theorem() {
        // a^(p-1) = 1 mod p for prime p and a not divisible by p
        let p = U512::from_u64(97);
        for a in [2u64, 3, 5, 10, 96] {
            assert_eq!(powmod(&U512::from_u64(a), &U512::from_u64(96), &p), U512::ONE);
        }
    }

    #[test]
    fn powmod_reduces_oversized_base() {
        // base above the modulus must behave like base mod m
        let m = U512::from_u64(13);
        let big = U512::from_u64(13 * 5 + 7);
        assert_eq!(
            powmod(&big, &U512::from_u64(9), &m),
            powmod(&U512::from_u64(7), &U512::from_u64(9), &m)
        );
    }

    #[test]
    fn rem_matches_u64_remainder() {
        assert_eq!(rem(&U512::from_u64(1000), &U512::from_u64(221)), U512::from_u64(1000 % 221));
        // full-width value against a small modulus
        let r = rem(&pow2(511), &U512::from_u64(97));
        assert_eq!(r, U512::from_u64(powmod_u64(2, 511, 97)));
    }

    fn powmod_u64(b: u64, mut e: u64, m: u64) -> u64 {
        let mut r = 1u128;
        let mut bb = b as u128 % m as u128;
        while e > 0 {
            if e & 1 == 1 {
                r = r * bb % m as u128;
            }
            bb = bb * bb % m as u128;
            e >>= 1;
        }
        r as u64
    }
}
