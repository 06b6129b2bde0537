//! Partita IVA structure and check digit validation.

use super::codes::ViolationCode;

/// Required length of an Italian VAT number, check digit included.
pub const VAT_NUMBER_LENGTH: usize = 11;

/// A structurally valid VAT number: 11 ASCII digits with a matching check digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digits([u8; VAT_NUMBER_LENGTH]);

impl Digits {
    /// The 11 digit values, index 10 being the check digit.
    pub fn as_array(&self) -> &[u8; VAT_NUMBER_LENGTH] {
        &self.0
    }

    /// The check digit (11th position).
    pub fn check_digit(&self) -> u8 {
        self.0[VAT_NUMBER_LENGTH - 1]
    }

    /// The 11-character string form.
    pub fn to_number_string(&self) -> String {
        self.0.iter().map(|d| char::from(b'0' + d)).collect()
    }
}

/// Compute the check digit for the first 10 digits of a partita IVA.
///
/// Digits are paired left to right; the first of each pair is added as is,
/// the second is doubled with 9 subtracted when the double exceeds 9. The
/// subtraction is applied as a count of even-position digits `>= 5`.
pub fn check_digit(digits: &[u8; 10]) -> u8 {
    let mut odd_sum = 0u32;
    let mut even_doubled_sum = 0u32;
    let mut carry_count = 0u32;

    for pair in digits.chunks_exact(2) {
        odd_sum += u32::from(pair[0]);
        even_doubled_sum += u32::from(pair[1]) * 2;
        if pair[1] >= 5 {
            carry_count += 1;
        }
    }

    let total = odd_sum + even_doubled_sum + carry_count;
    ((10 - total % 10) % 10) as u8
}

/// Run the structural checks in order: length, character class, check digit.
///
/// The first failing check wins. Lengths are measured in bytes, so any
/// non-ASCII input of 11 bytes fails the character class check.
pub fn check_structure(value: &str) -> Result<Digits, ViolationCode> {
    let bytes = value.as_bytes();

    if bytes.len() < VAT_NUMBER_LENGTH {
        return Err(ViolationCode::TooShort);
    }
    if bytes.len() > VAT_NUMBER_LENGTH {
        return Err(ViolationCode::TooLong);
    }
    if !bytes.iter().all(u8::is_ascii_digit) {
        return Err(ViolationCode::InvalidCharacters);
    }

    let mut digits = [0u8; VAT_NUMBER_LENGTH];
    for (slot, b) in digits.iter_mut().zip(bytes) {
        *slot = b - b'0';
    }

    let mut head = [0u8; 10];
    head.copy_from_slice(&digits[..10]);
    if check_digit(&head) != digits[10] {
        return Err(ViolationCode::ChecksumFailed);
    }

    Ok(Digits(digits))
}

/// Whether `value` passes every structural check (no network call).
pub fn is_structurally_valid(value: &str) -> bool {
    check_structure(value).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn head(s: &str) -> [u8; 10] {
        let mut out = [0u8; 10];
        for (slot, b) in out.iter_mut().zip(s.bytes()) {
            *slot = b - b'0';
        }
        out
    }

    #[test]
    fn check_digit_known_numbers() {
        assert_eq!(check_digit(&head("0174303030")), 4);
        assert_eq!(check_digit(&head("1234567890")), 3);
        assert_eq!(check_digit(&head("0000000000")), 0);
    }

    #[test]
    fn check_digit_counts_carries() {
        // even positions 5,5,5,5,5 -> doubled 50, carries 5
        assert_eq!(check_digit(&head("0505050505")), 5);
        // even positions 9s -> doubled 90, carries 5, odd 0 -> 95
        assert_eq!(check_digit(&head("0909090909")), 5);
    }

    #[test]
    fn valid_number() {
        let digits = check_structure("01743030304").unwrap();
        assert_eq!(digits.check_digit(), 4);
        assert_eq!(digits.to_number_string(), "01743030304");
    }

    #[test]
    fn too_short() {
        assert_eq!(check_structure("1234567890"), Err(ViolationCode::TooShort));
        assert_eq!(check_structure("1"), Err(ViolationCode::TooShort));
    }

    #[test]
    fn too_long() {
        assert_eq!(check_structure("123456789012"), Err(ViolationCode::TooLong));
    }

    #[test]
    fn invalid_characters() {
        assert_eq!(
            check_structure("abcde123456"),
            Err(ViolationCode::InvalidCharacters)
        );
        assert_eq!(
            check_structure("0174303030 "),
            Err(ViolationCode::InvalidCharacters)
        );
    }

    #[test]
    fn length_is_checked_before_characters() {
        assert_eq!(check_structure("abc"), Err(ViolationCode::TooShort));
        assert_eq!(check_structure("abcdefghijkl"), Err(ViolationCode::TooLong));
    }

    #[test]
    fn non_ascii_counts_bytes() {
        // 9 ASCII digits + 'é' (2 bytes) = 11 bytes
        assert_eq!(
            check_structure("123456789é"),
            Err(ViolationCode::InvalidCharacters)
        );
    }

    #[test]
    fn checksum_failed() {
        assert_eq!(
            check_structure("12345678901"),
            Err(ViolationCode::ChecksumFailed)
        );
        assert!(is_structurally_valid("12345678903"));
    }
}
