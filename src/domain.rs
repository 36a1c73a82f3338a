//! Domain mapping from seeds into `Z_N*`, and the output hash.
//!
//! `F(seed, N)`: BLAKE3 in derive-key mode under [`TAG_SEED`] absorbs
//! `LE64(k) || N (k bytes, big-endian) || LE64(|s|) || s`, where `k` is the
//! byte length of `N` and `s` the minimal big-endian seed (`[0x00]` for zero).
//! `k + 16` bytes are squeezed from the XOF and reduced mod `N`; the 128 spare
//! bits keep the reduction bias below `2^-128`. The image must be a unit mod `N`.

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};

use crate::{
    errors::VrfError,
    ser::{be_padded, byte_len, le64},
    types::{VrfOutput, VRF_OUTPUT_LEN},
};

pub const TAG_SEED: &str = "rsa_vrf.v1.seed";
pub const TAG_OUTPUT: &str = "rsa_vrf.v1.output";

const WIDE_EXTRA_BYTES: usize = 16;

/// Map `seed` to a unit of `Z_N`.
///
/// # Errors
///
/// Returns `VrfError::Structural` for a modulus below 2 and `VrfError::Encoding`
/// if the image is zero or shares a factor with `n`.
pub fn hash_to_domain(seed: &BigUint, n: &BigUint) -> Result<BigUint, VrfError> {
    if *n <= BigUint::one() {
        return Err(VrfError::Structural("modulus must be greater than one"));
    }
    let k = byte_len(n);
    let s = seed.to_bytes_be();

    let mut h = blake3::Hasher::new_derive_key(TAG_SEED);
    h.update(&le64(k as u64));
    h.update(&be_padded(n, k));
    h.update(&le64(s.len() as u64));
    h.update(&s);

    let mut wide = vec![0u8; k + WIDE_EXTRA_BYTES];
    h.finalize_xof().fill(&mut wide);
    let m = BigUint::from_bytes_be(&wide) % n;

    if m.is_zero() {
        return Err(VrfError::Encoding("seed maps to zero"));
    }
    if !m.gcd(n).is_one() {
        return Err(VrfError::Encoding("seed image is not invertible modulo N"));
    }
    Ok(m)
}

/// `H_out(value)`: BLAKE3 under [`TAG_OUTPUT`] over `value` padded to the modulus width.
#[must_use]
pub fn output_from_value(value: &BigUint, n: &BigUint) -> VrfOutput {
    let mut h = blake3::Hasher::new_derive_key(TAG_OUTPUT);
    h.update(&be_padded(value, byte_len(n)));
    let mut out = [0u8; VRF_OUTPUT_LEN];
    out.copy_from_slice(h.finalize().as_bytes());
    VrfOutput(out)
}
