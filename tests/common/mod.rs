#![allow(dead_code)]

use std::sync::OnceLock;

use rsa_vrf::{BigUint, PrivateKey};

/// Concatenate 256-bit hex words into one big-endian integer.
pub fn big_from_words(words: &[&str]) -> BigUint {
    for word in words {
        assert_eq!(word.len(), 64, "entries should be 256 bits");
    }
    let bytes = hex::decode(words.concat()).expect("valid hex");
    BigUint::from_bytes_be(&bytes)
}

pub fn big_from_hex(s: &str) -> BigUint {
    BigUint::from_bytes_be(&hex::decode(s).expect("valid hex"))
}

/// 128-bit safe primes; their product is a 255-bit modulus.
pub const SMALL_P: &str = "a6caf4a2820475daa9de24b44b7b4cb3";
pub const SMALL_Q: &str = "c41d2e542bbc9e5b7a71da2cffacd1ef";

pub fn small_key() -> PrivateKey {
    PrivateKey::from_primes(big_from_hex(SMALL_P), big_from_hex(SMALL_Q), 3).expect("fixture key")
}

pub fn full_modulus() -> BigUint {
    big_from_words(&[
        "a1831fe6ce5898008c4fad030d49222dcdec735e5485a0429a2e5d053ce6099f",
        "35b498475c6217cd417c59b149604464f8b3adc0eceaa11fe8d8b40be0d0300d",
        "e34f4c7606399f408599ad2429c407cffbd4513f629966214320df82b7d3b027",
        "f18d5105823d290ab78f6fe794588e241841b337ab1aa3d90092532a8d470722",
        "06d4741ee5b7a97b43ff671b95b9f1432e14e602b6b4530c69f2c2480f8a6835",
        "0ab51d4620f993ab6ca34413a1636e43ddfa5e6947fba3be0a395bf67becdaa5",
        "0f64ed21b3c9cf3a65f99ead07bd57ac4620a5cfa5307bbd2987fdba42ef2e41",
        "144358a4209fc330d76f827f77447ed2e49be25b1e44410ee32562e968cc0e9d",
    ])
}

pub fn full_private_exponent() -> BigUint {
    big_from_words(&[
        "6bacbfef343b10005d8a73575e30c173de9da23ee303c02c66c99358d344066a",
        "23cdbada3d96ba88d652e67630ead8435077c92b489c6b6a9b3b22b295e02009",
        "4234dda404266a2b03bbc8c2c682afdffd38362a41bb996b8215ea572537cac5",
        "4bb38b59017e1b5c7a5f9fefb83b096d658122251cbc6d3b55b6e21c5e2f5a15",
        "a013c182f4e42ca8a2114a2984bffa68b2c02c958135da452ab316ec75fc5337",
        "6dcab7e72797d42d6edff45490751a21082b4f0da3e26d6d5604a2f6450da2f1",
        "92d575ac1b566e952b4a5fba62e89ad5c889b1b7f331d718a4548a61b967503e",
        "cdf6adb5a8dd49f3afebd3aca4177d4aaa369e45a7e311ee7dd88dba2d2b2d13",
    ])
}

pub fn full_primes() -> [BigUint; 2] {
    [
        big_from_words(&[
            "c8b764e9fd0a4acfa28be39cddfb2531f449562c942653a4cc89e14f6168fd6d",
            "21a9a604f42d08ed8b6b7a6eb6a2a1e7181f8d4c38f897fcf5c88a88bb506c2b",
            "a74e3cede3db4cda3578452207d62697ec2f168cdcce3690c7d5606038509d37",
            "2551b45d72ff3be2f577e1a47dbaab03ad0adc69a4f503fba1a2d9599aa3788b",
        ]),
        big_from_words(&[
            "cdff6cf079571baeae599440709ed4742dab4cf5e0bd37ffdd5c3e95fd26edf4",
            "c45b63667168cc79bae7db261211252b3999da88992f679d1369dcfc5907fa0f",
            "0bd67fb1a6ecdc806f91c9f36b8a48d3ad2304aedb9782876b33cdc7748398ab",
            "b9ff9fb6305498605a15e358036697df383f1888fd7aa22d84bdb4f88a67d277",
        ]),
    ]
}

/// Full 2048-bit key; these are slow to generate, and the safe-prime checks
/// on construction are slow enough to build it once per test binary.
pub fn full_key() -> PrivateKey {
    static KEY: OnceLock<PrivateKey> = OnceLock::new();
    KEY.get_or_init(|| {
        let [p, q] = full_primes();
        PrivateKey::from_parts(full_modulus(), BigUint::from(3u32), full_private_exponent(), p, q)
            .expect("full key")
    })
    .clone()
}

/// Every seed in 1..100 verifies, and the proof is rejected once its seed is
/// shifted by one.
pub fn check_key(key: &PrivateKey) {
    for seed in 1u32..100 {
        let mut proof = rsa_vrf::generate(key, &BigUint::from(seed)).expect("generate");
        assert_eq!(proof.verify(), Ok(true), "rejected a valid proof for seed {seed}");
        proof.seed = BigUint::from(seed + 1);
        assert_eq!(proof.verify(), Ok(false), "accepted an invalid proof for seed {seed}");
    }
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
