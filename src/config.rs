//! Key-generation parameters with TOML support.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    errors::VrfError,
    key::check_exponent,
    types::{DEFAULT_CONFIDENCE, DEFAULT_KEY_BITS, DEFAULT_PUBLIC_EXPONENT, MIN_SAFE_PRIME_BITS},
};

/// Parameters consumed by [`make_key_with`](crate::key::make_key_with).
///
/// Can be loaded from TOML via [`KeyConfig::from_toml_str`] or built
/// programmatically (e.g. short keys for tests).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyConfig {
    /// Modulus length in bits; each safe prime gets half.
    #[serde(default = "default_key_bits")]
    pub key_bits: usize,

    /// Miller-Rabin rounds per primality test.
    #[serde(default = "default_confidence")]
    pub confidence: u32,

    /// Small odd public exponent.
    #[serde(default = "default_public_exponent")]
    pub public_exponent: u32,
}

const fn default_key_bits() -> usize {
    DEFAULT_KEY_BITS
}

const fn default_confidence() -> u32 {
    DEFAULT_CONFIDENCE
}

const fn default_public_exponent() -> u32 {
    DEFAULT_PUBLIC_EXPONENT
}

impl Default for KeyConfig {
    fn default() -> Self {
        Self {
            key_bits: default_key_bits(),
            confidence: default_confidence(),
            public_exponent: default_public_exponent(),
        }
    }
}

impl KeyConfig {
    /// Smallest modulus whose halves are both longer than `MIN_SAFE_PRIME_BITS`.
    pub const MIN_KEY_BITS: usize = 2 * (MIN_SAFE_PRIME_BITS + 1);

    /// # Errors
    /// Returns the caller error matching the first invalid field.
    pub fn validate(&self) -> Result<(), VrfError> {
        if self.key_bits < Self::MIN_KEY_BITS {
            return Err(VrfError::InvalidBitLength { bits: self.key_bits, min: Self::MIN_KEY_BITS - 1 });
        }
        if self.confidence == 0 {
            return Err(VrfError::InvalidConfidence(self.confidence));
        }
        check_exponent(self.public_exponent)
    }

    /// # Errors
    /// Returns `VrfError::Config` on malformed TOML, or a validation error.
    pub fn from_toml_str(s: &str) -> Result<Self, VrfError> {
        let config: Self = toml::from_str(s).map_err(|e| VrfError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    /// Returns `VrfError::Config` if the file cannot be read, otherwise as [`Self::from_toml_str`].
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, VrfError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| VrfError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&contents)
    }
}
