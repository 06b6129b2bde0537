#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Must not panic; every input maps to a verdict.
        let result = partita_iva::check_structure(s);
        if let Ok(digits) = result {
            assert_eq!(digits.to_number_string(), s);
        }
    }
});
