#![no_main]

use fapiao::payload::translate_url_encoding;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let out = translate_url_encoding(s);
        assert!(out.len() <= s.len());
    }
});
