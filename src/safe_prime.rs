//! Safe-prime generation by rejection sampling.
//!
//! A candidate `q` of `bits - 1` bits is drawn with its two top bits and its
//! low bit set, and `p = 2q + 1` is accepted once both `q` and `p` are
//! probable primes. Setting two top bits makes the product of two `b`-bit
//! safe primes exactly `2b` bits long.

use num_bigint::{BigUint, RandBigInt};
use num_traits::One;
use rand_core::{CryptoRng, RngCore};

use crate::{
    cancel::{Cancel, Never},
    errors::VrfError,
    primality::{is_probable_prime, miller_rabin, small_residue, SMALL_PRIMES},
    types::MIN_SAFE_PRIME_BITS,
};

/// Generate a safe prime of exactly `bits` bits.
///
/// # Errors
/// Returns `VrfError::InvalidBitLength` if `bits <= MIN_SAFE_PRIME_BITS` and
/// `VrfError::InvalidConfidence` if `confidence == 0`.
pub fn generate_safe_prime<R>(bits: usize, confidence: u32, rng: &mut R) -> Result<BigUint, VrfError>
where
    R: RngCore + CryptoRng + ?Sized,
{
    generate_safe_prime_with(bits, confidence, rng, &Never)
}

/// Like [`generate_safe_prime`], polling `cancel` before every candidate.
///
/// # Errors
/// As [`generate_safe_prime`], plus `VrfError::Cancelled` once `cancel` fires.
pub fn generate_safe_prime_with<R, C>(
    bits: usize,
    confidence: u32,
    rng: &mut R,
    cancel: &C,
) -> Result<BigUint, VrfError>
where
    R: RngCore + CryptoRng + ?Sized,
    C: Cancel + ?Sized,
{
    check_params(bits, confidence)?;
    let q_bits = bits - 1;
    let mut candidates: u64 = 0;

    loop {
        if cancel.is_cancelled() {
            tracing::warn!(bits, candidates, "safe prime generation cancelled");
            return Err(VrfError::Cancelled);
        }
        candidates += 1;

        let q = draw_candidate(q_bits, rng);
        if !sieve_pair(&q) {
            continue;
        }
        // One cheap round on each side before paying for full confidence.
        if !miller_rabin(&q, 1, rng) {
            continue;
        }
        let p = (&q << 1u32) + BigUint::one();
        if !miller_rabin(&p, 1, rng) {
            continue;
        }
        if is_probable_prime(&q, confidence, rng) && is_probable_prime(&p, confidence, rng) {
            tracing::debug!(bits, candidates, "safe prime accepted");
            return Ok(p);
        }
    }
}

const fn check_params(bits: usize, confidence: u32) -> Result<(), VrfError> {
    if bits <= MIN_SAFE_PRIME_BITS {
        return Err(VrfError::InvalidBitLength { bits, min: MIN_SAFE_PRIME_BITS });
    }
    if confidence == 0 {
        return Err(VrfError::InvalidConfidence(confidence));
    }
    Ok(())
}

/// Random odd integer of exactly `bits` bits with the two top bits set.
fn draw_candidate<R: RngCore + ?Sized>(bits: usize, rng: &mut R) -> BigUint {
    let bits = bits as u64;
    let mut q = rng.gen_biguint(bits);
    q.set_bit(bits - 1, true);
    q.set_bit(bits - 2, true);
    q.set_bit(0, true);
    q
}

/// False if `q` or `2q + 1` has a small prime factor.
fn sieve_pair(q: &BigUint) -> bool {
    SMALL_PRIMES.iter().all(|&r| {
        let qr = small_residue(q, r);
        qr != 0 && (2 * qr + 1) % r != 0
    })
}
