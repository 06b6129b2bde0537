#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(value) = serde_json::from_slice::<serde_json::Value>(data) {
        // Usage errors are fine, panics are bugs.
        if let Ok(candidate) = partita_iva::Candidate::from_value(&value) {
            if let Some(s) = candidate.as_str() {
                let _ = partita_iva::check_structure(s);
            }
        }
    }
});
