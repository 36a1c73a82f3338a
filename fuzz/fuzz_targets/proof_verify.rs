#![no_main]

use libfuzzer_sys::fuzz_target;
use rsa_vrf::{decode_proof, encode_proof};

fuzz_target!(|data: &[u8]| {
    let Ok(proof) = decode_proof(data) else { return };
    // Oversized moduli make each case too slow to be useful
    if proof.public_key.bits() > 1024 {
        return;
    }
    // Accepted encodings are canonical
    assert_eq!(encode_proof(&proof).as_deref(), Ok(data));
    let _ = proof.verify();
});
