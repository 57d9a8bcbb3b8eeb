#![no_main]

use fapiao::payload::{CipherService, PayloadEncoder, Response, ResponseEnvelope};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(envelope) = serde_json::from_slice::<ResponseEnvelope>(data) else {
        return;
    };
    let Ok(cipher) = CipherService::new("ejCk326UnaZWKisg", "q9jcZX8Ib9LM8wYk") else {
        return;
    };
    let _ = Response::from_envelope(&envelope, &PayloadEncoder::new(cipher));
});
