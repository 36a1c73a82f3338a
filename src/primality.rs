//! Probabilistic primality testing over arbitrary-precision integers.
//!
//! Trial division by the odd primes below 256 rejects most composites before
//! the Miller-Rabin rounds run. A composite survives `c` independent rounds
//! with probability at most `4^-c`; primes are never rejected.

use num_bigint::{BigUint, RandBigInt};
use num_integer::Integer;
use num_traits::{One, ToPrimitive, Zero};
use rand_core::RngCore;

/// Odd primes below 256.
pub(crate) const SMALL_PRIMES: [u32; 53] = [
    3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89, 97,
    101, 103, 107, 109, 113, 127, 131, 137, 139, 149, 151, 157, 163, 167, 173, 179, 181, 191, 193,
    197, 199, 211, 223, 227, 229, 233, 239, 241, 251,
];

/// Returns true if `n` passes trial division and `confidence` Miller-Rabin rounds
/// with witnesses drawn from `rng`. Zero rounds proves nothing, so
/// `confidence == 0` always yields false.
#[must_use]
pub fn is_probable_prime<R: RngCore + ?Sized>(n: &BigUint, confidence: u32, rng: &mut R) -> bool {
    if confidence == 0 {
        return false;
    }
    if let Some(small) = n.to_u32() {
        if small < 2 {
            return false;
        }
        if small == 2 {
            return true;
        }
    }
    if n.is_even() {
        return false;
    }
    let small = n.to_u32();
    for &p in &SMALL_PRIMES {
        if small == Some(p) {
            return true;
        }
        if (n % p).is_zero() {
            return false;
        }
    }
    // Survived trial division and below 256^2: nothing left to test.
    if small.is_some_and(|v| v < 256 * 256) {
        return true;
    }
    miller_rabin(n, confidence, rng)
}

/// True if both `p` and `(p-1)/2` are probable primes.
#[must_use]
pub fn is_safe_prime<R: RngCore + ?Sized>(p: &BigUint, confidence: u32, rng: &mut R) -> bool {
    is_probable_prime(p, confidence, rng) && is_probable_prime(&(p >> 1u32), confidence, rng)
}

/// Miller-Rabin over odd `n > 3`.
pub(crate) fn miller_rabin<R: RngCore + ?Sized>(n: &BigUint, rounds: u32, rng: &mut R) -> bool {
    let one = BigUint::one();
    let two = BigUint::from(2u32);
    let n_minus_one = n - &one;
    let s = n_minus_one.trailing_zeros().unwrap_or(0);
    let d = &n_minus_one >> s;

    'witness: for _ in 0..rounds {
        // a in [2, n-2]
        let a = rng.gen_biguint_range(&two, &n_minus_one);
        let mut x = a.modpow(&d, n);
        if x.is_one() || x == n_minus_one {
            continue 'witness;
        }
        for _ in 1..s {
            x = (&x * &x) % n;
            if x == n_minus_one {
                continue 'witness;
            }
            if x.is_one() {
                return false;
            }
        }
        return false;
    }
    true
}

/// Residue of `n` modulo a small prime.
#[inline]
pub(crate) fn small_residue(n: &BigUint, p: u32) -> u32 {
    (n % p).to_u32().unwrap_or(0)
}
