//! Property-based tests for the RSA-VRF

mod common;

use common::small_key;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rsa_vrf::*;

fn naive_is_prime(n: u32) -> bool {
    if n < 2 {
        return false;
    }
    (2..).take_while(|d| d * d <= n).all(|d| n % d != 0)
}

// Property test: every generated proof verifies, and only for its own seed
proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn generated_proofs_verify(seed_bytes in prop::collection::vec(any::<u8>(), 0..64)) {
        let key = small_key();
        let seed = BigUint::from_bytes_be(&seed_bytes);
        let proof = generate(&key, &seed).unwrap();
        prop_assert_eq!(proof.verify(), Ok(true));

        let mut shifted = proof.clone();
        shifted.seed = &seed + 1u32;
        prop_assert_eq!(shifted.verify(), Ok(false));
    }

    #[test]
    fn generation_is_deterministic(seed in any::<u64>()) {
        let key = small_key();
        let seed = BigUint::from(seed);
        let a = generate(&key, &seed).unwrap();
        let b = key.prove(&seed).unwrap();
        prop_assert_eq!(a.output(), b.output());
        prop_assert_eq!(a, b);
    }

    #[test]
    fn encoding_preserves_generated_proofs(seed in any::<u128>()) {
        let key = small_key();
        let proof = generate(&key, &BigUint::from(seed)).unwrap();
        let bytes = encode_proof(&proof).unwrap();
        prop_assert_eq!(decode_proof(&bytes).unwrap(), proof);
    }

    #[test]
    fn tampered_encodings_never_verify(seed in any::<u32>(), index in any::<prop::sample::Index>(), bit in 0u8..8) {
        let key = small_key();
        let proof = generate(&key, &BigUint::from(seed)).unwrap();
        let mut bytes = encode_proof(&proof).unwrap();
        let i = index.index(bytes.len());
        bytes[i] ^= 1 << bit;
        if let Ok(decoded) = decode_proof(&bytes) {
            prop_assert_ne!(decoded.verify(), Ok(true));
        }
    }
}

// Property test: the decoder rejects garbage without panicking
proptest! {
    #[test]
    fn decode_never_panics(data in prop::collection::vec(any::<u8>(), 0..512)) {
        let _ = decode_proof(&data);
    }

    #[test]
    fn short_outputs_are_rejected(data in prop::collection::vec(any::<u8>(), 0..32)) {
        prop_assert!(VrfOutput::try_from(data.as_slice()).is_err());
    }
}

// Property test: Miller-Rabin agrees with trial division on small integers
proptest! {
    #[test]
    fn primality_matches_trial_division(n in 0u32..2_000_000, rng_seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(rng_seed);
        prop_assert_eq!(is_probable_prime(&BigUint::from(n), 20, &mut rng), naive_is_prime(n));
    }

    #[test]
    fn composites_of_two_large_primes_are_rejected(a in 0usize..4, b in 0usize..4) {
        const PRIMES: [u64; 4] = [4_294_967_291, 4_294_967_279, 2_147_483_647, 1_000_000_007];
        let n = BigUint::from(PRIMES[a]) * BigUint::from(PRIMES[b]);
        let mut rng = StdRng::seed_from_u64(0);
        prop_assert!(!is_probable_prime(&n, 20, &mut rng));
    }
}
