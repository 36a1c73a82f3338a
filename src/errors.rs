use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VrfError {
    #[error("invalid bit length: {bits} must be greater than {min}")]
    InvalidBitLength { bits: usize, min: usize },

    #[error("invalid confidence: {0} (need at least one round)")]
    InvalidConfidence(u32),

    #[error("invalid public exponent: {0}")]
    InvalidExponent(String),

    #[error("generation cancelled")]
    Cancelled,

    #[error("key generation failed: {0}")]
    KeyGeneration(&'static str),

    #[error("encoding error: {0}")]
    Encoding(&'static str),

    #[error("structural error: {0}")]
    Structural(&'static str),

    #[error("config error: {0}")]
    Config(String),
}

impl VrfError {
    /// True when retrying with the same parameters cannot succeed.
    #[must_use]
    pub const fn is_caller_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidBitLength { .. }
                | Self::InvalidConfidence(_)
                | Self::InvalidExponent(_)
                | Self::Structural(_)
                | Self::Config(_)
        )
    }
}
