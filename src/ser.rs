use num_bigint::BigUint;

use crate::{
    errors::VrfError,
    key::PublicKey,
    types::{VrfOutput, MAX_FIELD_LEN, VRF_OUTPUT_LEN},
    vrf::Proof,
};

/// Largest canonical proof: four framed integers plus the output.
pub const MAX_PROOF_LEN: usize = 4 * (4 + MAX_FIELD_LEN) + VRF_OUTPUT_LEN;

#[inline]
#[must_use]
pub const fn le64(x: u64) -> [u8; 8] {
    x.to_le_bytes()
}

#[inline]
#[must_use]
pub const fn le32(x: u32) -> [u8; 4] {
    x.to_le_bytes()
}

/// Number of bytes needed to hold `n`.
#[inline]
#[must_use]
pub fn byte_len(n: &BigUint) -> usize {
    usize::try_from(n.bits().div_ceil(8)).unwrap_or(usize::MAX)
}

/// Big-endian bytes of `x`, left-padded with zeros to at least `len` bytes.
#[must_use]
pub fn be_padded(x: &BigUint, len: usize) -> Vec<u8> {
    let bytes = x.to_bytes_be();
    let mut out = vec![0u8; len.saturating_sub(bytes.len())];
    out.extend_from_slice(&bytes);
    out
}

/// Canonical proof encoding:
/// `LE32(|N|) || N || LE32(|E|) || E || LE32(|seed|) || seed || LE32(|value|) || value || output`
/// with minimal big-endian integers.
///
/// # Errors
///
/// Returns `VrfError::Structural` if an integer is longer than `MAX_FIELD_LEN` bytes.
pub fn encode_proof(proof: &Proof) -> Result<Vec<u8>, VrfError> {
    let mut v = Vec::with_capacity(4 * 4 + 3 * byte_len(&proof.public_key.n) + VRF_OUTPUT_LEN);
    for x in [&proof.public_key.n, &proof.public_key.e, &proof.seed, &proof.value] {
        put_field(&mut v, x)?;
    }
    v.extend_from_slice(proof.output.as_bytes());
    Ok(v)
}

/// Decode a proof produced by [`encode_proof`].
///
/// # Errors
///
/// Returns `VrfError::Structural` if the data is oversized, truncated, non-canonical, or has trailing bytes.
pub fn decode_proof(b: &[u8]) -> Result<Proof, VrfError> {
    if b.len() > MAX_PROOF_LEN {
        return Err(VrfError::Structural("proof too long"));
    }
    let mut cur = b;
    let n = take_field(&mut cur)?;
    let e = take_field(&mut cur)?;
    let seed = take_field(&mut cur)?;
    let value = take_field(&mut cur)?;
    if cur.len() != VRF_OUTPUT_LEN {
        return Err(VrfError::Structural("output must be the final 32 bytes"));
    }
    let output = VrfOutput::try_from(cur)?;
    Ok(Proof { public_key: PublicKey::new(n, e), seed, value, output })
}

fn put_field(v: &mut Vec<u8>, x: &BigUint) -> Result<(), VrfError> {
    let bytes = x.to_bytes_be();
    if bytes.len() > MAX_FIELD_LEN {
        return Err(VrfError::Structural("integer field too long"));
    }
    v.extend_from_slice(&le32(u32::try_from(bytes.len()).unwrap_or(0)));
    v.extend_from_slice(&bytes);
    Ok(())
}

fn take_field(cur: &mut &[u8]) -> Result<BigUint, VrfError> {
    if cur.len() < 4 {
        return Err(VrfError::Structural("truncated length prefix"));
    }
    let mut len_bytes = [0u8; 4];
    len_bytes.copy_from_slice(&cur[..4]);
    let len = u32::from_le_bytes(len_bytes) as usize;
    if len == 0 {
        return Err(VrfError::Structural("empty integer field"));
    }
    if len > MAX_FIELD_LEN {
        return Err(VrfError::Structural("integer field too long"));
    }
    if cur.len() < 4 + len {
        return Err(VrfError::Structural("truncated integer field"));
    }
    let bytes = &cur[4..4 + len];
    if len > 1 && bytes[0] == 0 {
        return Err(VrfError::Structural("non-canonical integer encoding"));
    }
    *cur = &cur[4 + len..];
    Ok(BigUint::from_bytes_be(bytes))
}
