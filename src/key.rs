//! RSA keys over safe-prime moduli.

use core::fmt;

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Zero};
use rand_core::{CryptoRng, OsRng, RngCore};
use serde::{Deserialize, Serialize};

use crate::{
    cancel::{Cancel, Never},
    config::KeyConfig,
    errors::VrfError,
    primality::is_safe_prime,
    safe_prime::generate_safe_prime_with,
    types::{DEFAULT_CONFIDENCE, MAX_FIELD_LEN, MAX_KEY_ATTEMPTS, MIN_MODULUS_BITS},
};

/// Modulus and public exponent. Plain data; [`PublicKey::validate`] checks its shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PublicKey {
    pub n: BigUint,
    pub e: BigUint,
}

impl PublicKey {
    #[must_use]
    pub const fn new(n: BigUint, e: BigUint) -> Self {
        Self { n, e }
    }

    /// # Errors
    /// Returns `VrfError::Structural` for a short, oversized or even modulus, or an
    /// exponent that is even, below 3 or not below the modulus.
    pub fn validate(&self) -> Result<(), VrfError> {
        if self.n.bits() < MIN_MODULUS_BITS as u64 {
            return Err(VrfError::Structural("modulus too short"));
        }
        if self.n.bits() > (MAX_FIELD_LEN * 8) as u64 {
            return Err(VrfError::Structural("modulus too long"));
        }
        if self.n.is_even() {
            return Err(VrfError::Structural("modulus must be odd"));
        }
        if self.e < BigUint::from(3u32) || self.e.is_even() {
            return Err(VrfError::Structural("public exponent must be odd and at least 3"));
        }
        if self.e >= self.n {
            return Err(VrfError::Structural("public exponent must be below the modulus"));
        }
        Ok(())
    }

    /// Modulus length in bits.
    #[must_use]
    pub fn bits(&self) -> u64 {
        self.n.bits()
    }

    /// `x^E mod N`
    #[must_use]
    pub fn apply(&self, x: &BigUint) -> BigUint {
        x.modpow(&self.e, &self.n)
    }
}

#[derive(Clone, PartialEq, Eq)]
struct Crt {
    dp: BigUint,
    dq: BigUint,
    qinv: BigUint,
}

/// RSA private key whose modulus is the product of two safe primes.
///
/// Immutable once built; the CRT parameters are computed at construction.
#[derive(Clone, PartialEq, Eq)]
pub struct PrivateKey {
    public: PublicKey,
    d: BigUint,
    primes: [BigUint; 2],
    crt: Crt,
}

impl PrivateKey {
    /// Build a key from two known safe primes and a small public exponent.
    ///
    /// Both primes are re-tested at `DEFAULT_CONFIDENCE`.
    ///
    /// # Errors
    /// `VrfError::InvalidExponent` for an even exponent or one below 3,
    /// `VrfError::KeyGeneration` when the primes are not distinct safe primes or the
    /// exponent has no inverse modulo `(p-1)(q-1)`, `VrfError::Structural` if the
    /// modulus is out of range.
    pub fn from_primes(p: BigUint, q: BigUint, e: u32) -> Result<Self, VrfError> {
        check_exponent(e)?;
        check_primes(&p, &q)?;
        check_safe_primes(&p, &q)?;
        Self::from_generated_primes(p, q, e)
    }

    /// Primes fresh from the generator, already tested at the configured confidence.
    fn from_generated_primes(p: BigUint, q: BigUint, e: u32) -> Result<Self, VrfError> {
        let e = BigUint::from(e);
        let phi = totient(&p, &q);
        let d = mod_inverse(&e, &phi)
            .ok_or(VrfError::KeyGeneration("public exponent has no inverse modulo the totient"))?;
        let n = &p * &q;
        Self::assemble(PublicKey::new(n, e), d, p, q)
    }

    /// Build a key from all of its components, checking that they agree.
    ///
    /// # Errors
    /// `VrfError::KeyGeneration` if `n != p*q`, `e*d != 1 mod (p-1)(q-1)` or a prime
    /// is not safe, `VrfError::Structural` if the public half is malformed.
    pub fn from_parts(n: BigUint, e: BigUint, d: BigUint, p: BigUint, q: BigUint) -> Result<Self, VrfError> {
        check_primes(&p, &q)?;
        if n != &p * &q {
            return Err(VrfError::KeyGeneration("modulus is not the product of the primes"));
        }
        if !((&e * &d) % totient(&p, &q)).is_one() {
            return Err(VrfError::KeyGeneration("exponents are not inverse modulo the totient"));
        }
        check_safe_primes(&p, &q)?;
        Self::assemble(PublicKey::new(n, e), d, p, q)
    }

    fn assemble(public: PublicKey, d: BigUint, p: BigUint, q: BigUint) -> Result<Self, VrfError> {
        public.validate()?;
        let one = BigUint::one();
        let dp = &d % (&p - &one);
        let dq = &d % (&q - &one);
        let qinv = mod_inverse(&q, &p).ok_or(VrfError::KeyGeneration("primes are not coprime"))?;
        Ok(Self { public, d, primes: [p, q], crt: Crt { dp, dq, qinv } })
    }

    #[must_use]
    pub const fn public_key(&self) -> &PublicKey {
        &self.public
    }

    #[must_use]
    pub const fn private_exponent(&self) -> &BigUint {
        &self.d
    }

    #[must_use]
    pub const fn primes(&self) -> &[BigUint; 2] {
        &self.primes
    }

    /// `(p-1)(q-1)`
    #[must_use]
    pub fn totient(&self) -> BigUint {
        totient(&self.primes[0], &self.primes[1])
    }

    /// Check every key invariant: `N = pq`, `E*D = 1 mod (p-1)(q-1)`, and that
    /// `p`, `q`, `(p-1)/2`, `(q-1)/2` are probable primes at `confidence`.
    #[must_use]
    pub fn is_valid<R: RngCore + ?Sized>(&self, confidence: u32, rng: &mut R) -> bool {
        let [p, q] = &self.primes;
        if self.public.validate().is_err() || self.public.n != p * q {
            return false;
        }
        if !((&self.public.e * &self.d) % self.totient()).is_one() {
            return false;
        }
        is_safe_prime(p, confidence, rng) && is_safe_prime(q, confidence, rng)
    }

    /// `c^D mod N` via the CRT.
    #[must_use]
    pub fn invert(&self, c: &BigUint) -> BigUint {
        let [p, q] = &self.primes;
        let m1 = c.modpow(&self.crt.dp, p);
        let m2 = c.modpow(&self.crt.dq, q);
        let m2p = &m2 % p;
        let diff = if m1 >= m2p { m1 - m2p } else { m1 + p - m2p };
        let h = (&self.crt.qinv * diff) % p;
        m2 + h * q
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("public", &self.public)
            .field("d", &"<redacted>")
            .finish_non_exhaustive()
    }
}

/// Generate a key with a modulus of exactly `bits` bits using `OsRng` and the
/// default confidence and exponent.
///
/// # Errors
/// See [`make_key_with`].
pub fn make_key(bits: usize) -> Result<PrivateKey, VrfError> {
    let config = KeyConfig { key_bits: bits, ..KeyConfig::default() };
    make_key_with(&config, &mut OsRng, &Never)
}

/// Generate a key from two fresh safe primes of half the configured length.
///
/// A draw is discarded when the primes coincide, the product is short, or the
/// exponent is not coprime to `(p-1)(q-1)`.
///
/// # Errors
/// Caller errors from [`KeyConfig::validate`], `VrfError::Cancelled` when
/// `cancel` fires, `VrfError::KeyGeneration` after `MAX_KEY_ATTEMPTS` discarded draws.
pub fn make_key_with<R, C>(config: &KeyConfig, rng: &mut R, cancel: &C) -> Result<PrivateKey, VrfError>
where
    R: RngCore + CryptoRng + ?Sized,
    C: Cancel + ?Sized,
{
    config.validate()?;
    let bits = config.key_bits;
    let q_bits = bits / 2;
    let p_bits = bits - q_bits;
    let e = BigUint::from(config.public_exponent);

    for attempt in 1..=MAX_KEY_ATTEMPTS {
        let p = generate_safe_prime_with(p_bits, config.confidence, rng, cancel)?;
        let q = generate_safe_prime_with(q_bits, config.confidence, rng, cancel)?;
        if p == q {
            tracing::warn!(attempt, "drew the same safe prime twice, redrawing");
            continue;
        }
        if (&p * &q).bits() != bits as u64 {
            tracing::warn!(attempt, bits, "modulus shorter than requested, redrawing");
            continue;
        }
        if !e.gcd(&totient(&p, &q)).is_one() {
            tracing::warn!(attempt, e = config.public_exponent, "exponent not coprime to totient, redrawing");
            continue;
        }
        match PrivateKey::from_generated_primes(p, q, config.public_exponent) {
            Ok(key) => {
                tracing::info!(bits, attempt, "generated VRF key");
                return Ok(key);
            }
            Err(err) => tracing::warn!(attempt, %err, "key assembly failed, redrawing"),
        }
    }
    Err(VrfError::KeyGeneration("no valid key after the maximum number of attempts"))
}

pub(crate) fn check_exponent(e: u32) -> Result<(), VrfError> {
    if e < 3 || e.is_even() {
        return Err(VrfError::InvalidExponent(format!("{e} must be odd and at least 3")));
    }
    Ok(())
}

fn check_primes(p: &BigUint, q: &BigUint) -> Result<(), VrfError> {
    let three = BigUint::from(3u32);
    if *p < three || *q < three || p.is_even() || q.is_even() {
        return Err(VrfError::KeyGeneration("primes must be odd and at least 3"));
    }
    if p == q {
        return Err(VrfError::KeyGeneration("primes must differ"));
    }
    Ok(())
}

fn check_safe_primes(p: &BigUint, q: &BigUint) -> Result<(), VrfError> {
    let mut rng = OsRng;
    if is_safe_prime(p, DEFAULT_CONFIDENCE, &mut rng) && is_safe_prime(q, DEFAULT_CONFIDENCE, &mut rng) {
        Ok(())
    } else {
        Err(VrfError::KeyGeneration("primes must be safe primes"))
    }
}

fn totient(p: &BigUint, q: &BigUint) -> BigUint {
    (p - 1u32) * (q - 1u32)
}

/// `a^-1 mod m` by the extended Euclidean algorithm.
pub(crate) fn mod_inverse(a: &BigUint, m: &BigUint) -> Option<BigUint> {
    if m.is_zero() {
        return None;
    }
    let a = BigInt::from(a.clone());
    let m = BigInt::from(m.clone());
    let egcd = a.extended_gcd(&m);
    if !egcd.gcd.is_one() {
        return None;
    }
    egcd.x.mod_floor(&m).to_biguint()
}
