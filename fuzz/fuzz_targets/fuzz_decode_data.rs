#![no_main]

use fapiao::payload::{CipherService, PayloadEncoder};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(cipher) = CipherService::new("ejCk326UnaZWKisg", "q9jcZX8Ib9LM8wYk") else {
        return;
    };
    let encoder = PayloadEncoder::new(cipher);

    if let Ok(s) = std::str::from_utf8(data) {
        // Arbitrary ciphertext: errors are fine, panics are bugs.
        let _ = encoder.decode_data(s);
    }

    // Arbitrary plaintext behind a valid cipher layer.
    if let Ok(sealed) = encoder.cipher().encrypt(data) {
        let _ = encoder.decode_data(&sealed);
    }
});
