#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::cast_possible_truncation,
    clippy::many_single_char_names,
    clippy::similar_names
)]

//! RSA-VRF
//!
//! A verifiable random function built on the RSA trapdoor permutation over a
//! modulus made of two safe primes. Anyone holding the public key can check
//! that a proof's value was produced from its seed by the private-key holder.

// Fixed cryptographic choices:
// - Primality: trial division below 256, then Miller-Rabin (error <= 4^-c)
// - Keys: N = p*q with p, q safe primes, E = 3 by default, D = E^-1 mod (p-1)(q-1)
// - Domain map: BLAKE3-XOF full-domain hash of (N, seed) reduced mod N
// - Output: BLAKE3 of the proof value at modulus width (32 bytes)
//
// Pipeline: primality -> safe_prime -> key -> vrf. All operations are
// synchronous and CPU-bound; randomness and cancellation are passed in.

// Core modules
pub mod types;
pub mod errors;
pub mod ser;
pub mod domain;
pub mod cancel;
pub mod config;
pub mod primality;
pub mod safe_prime;
pub mod key;
pub mod vrf;

// Re-export commonly used types and functions
pub use types::*;
pub use errors::VrfError;
pub use cancel::{Cancel, Deadline, Never};
pub use config::KeyConfig;
pub use primality::{is_probable_prime, is_safe_prime};
pub use safe_prime::{generate_safe_prime, generate_safe_prime_with};
pub use key::{make_key, make_key_with, PrivateKey, PublicKey};
pub use vrf::{generate, Proof, Vrf};
pub use domain::{hash_to_domain, output_from_value};
pub use ser::{decode_proof, encode_proof};

pub use num_bigint::BigUint;

// Version constants
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PROTOCOL_VERSION: u32 = 1;
