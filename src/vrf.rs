use num_bigint::BigUint;
use num_traits::Zero;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{hash_to_domain, output_from_value},
    errors::VrfError,
    key::{PrivateKey, PublicKey},
    types::VrfOutput,
};

/// Proof that `value` is the RSA inverse of the seed's domain image.
///
/// Fields are public: a caller may rewrite `seed` and observe that
/// [`Proof::verify`] then returns `Ok(false)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Proof {
    pub public_key: PublicKey,
    pub seed: BigUint,
    pub value: BigUint,
    pub output: VrfOutput,
}

/// Prover side of the VRF.
pub trait Vrf {
    /// Produce the proof for `seed`. Deterministic in `(self, seed)`.
    ///
    /// # Errors
    /// Returns `VrfError::Encoding` if the seed cannot be mapped into `Z_N*`.
    fn prove(&self, seed: &BigUint) -> Result<Proof, VrfError>;

    /// Key that verifiers check proofs against.
    fn public_key(&self) -> &PublicKey;
}

impl Vrf for PrivateKey {
    fn prove(&self, seed: &BigUint) -> Result<Proof, VrfError> {
        generate(self, seed)
    }

    fn public_key(&self) -> &PublicKey {
        Self::public_key(self)
    }
}

/// Compute `m = F(seed, N)` and `value = m^D mod N`.
///
/// # Errors
/// Returns `VrfError::Encoding` if the seed's image is not a unit mod `N`.
pub fn generate(key: &PrivateKey, seed: &BigUint) -> Result<Proof, VrfError> {
    let public_key = key.public_key();
    let m = hash_to_domain(seed, &public_key.n)?;
    let value = key.invert(&m);
    let output = output_from_value(&value, &public_key.n);
    Ok(Proof { public_key: public_key.clone(), seed: seed.clone(), value, output })
}

impl Proof {
    /// Check `value^E mod N == F(seed, N)` and that `output` is derived from `value`.
    ///
    /// A well-formed proof that fails the check yields `Ok(false)`.
    ///
    /// # Errors
    /// `VrfError::Structural` for a malformed key or a value outside `[1, N)`,
    /// `VrfError::Encoding` if the seed has no image in `Z_N*`.
    pub fn verify(&self) -> Result<bool, VrfError> {
        let pk = &self.public_key;
        pk.validate()?;
        if self.value.is_zero() || self.value >= pk.n {
            return Err(VrfError::Structural("proof value outside [1, N)"));
        }
        let expected = hash_to_domain(&self.seed, &pk.n)?;
        if pk.apply(&self.value) != expected {
            tracing::trace!(bits = pk.bits(), "proof value does not match seed image");
            return Ok(false);
        }
        if output_from_value(&self.value, &pk.n) != self.output {
            tracing::trace!("proof output does not match value");
            return Ok(false);
        }
        Ok(true)
    }

    #[must_use]
    pub const fn output(&self) -> &VrfOutput {
        &self.output
    }
}
