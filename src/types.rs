use serde::{Deserialize, Serialize};
use crate::errors::VrfError;

pub const MIN_SAFE_PRIME_BITS: usize = 64;                 // safe primes must be strictly longer
pub const MIN_MODULUS_BITS: usize = 2 * MIN_SAFE_PRIME_BITS + 1;  // product of two 65-bit primes
pub const DEFAULT_KEY_BITS: usize = 2048;
pub const DEFAULT_CONFIDENCE: u32 = 64;                    // Miller-Rabin rounds, error <= 4^-64
pub const DEFAULT_PUBLIC_EXPONENT: u32 = 3;
pub const MAX_KEY_ATTEMPTS: usize = 16;
pub const VRF_OUTPUT_LEN: usize = 32;
pub const MAX_FIELD_LEN: usize = 2048;                     // bytes per encoded integer (16384-bit modulus)

/// Pseudo-random output bound to a proof.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct VrfOutput(pub [u8; VRF_OUTPUT_LEN]);

impl VrfOutput {
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; VRF_OUTPUT_LEN] {
        &self.0
    }
}

impl TryFrom<&[u8]> for VrfOutput {
    type Error = VrfError;
    fn try_from(b: &[u8]) -> Result<Self, Self::Error> {
        if b.len() != VRF_OUTPUT_LEN {
            return Err(VrfError::Structural("output must be 32 bytes"));
        }
        let mut arr = [0u8; VRF_OUTPUT_LEN];
        arr.copy_from_slice(b);
        Ok(Self(arr))
    }
}
