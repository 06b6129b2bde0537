//! Stable violation codes.
//!
//! Consumers switch on these, so both the UUIDs and the names are frozen.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a candidate was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViolationCode {
    /// Fewer than 11 characters.
    #[serde(rename = "TOO_SHORT_ERROR")]
    TooShort,
    /// More than 11 characters.
    #[serde(rename = "TOO_LONG_ERROR")]
    TooLong,
    /// At least one character is not a decimal digit.
    #[serde(rename = "INVALID_CHARACTERS_ERROR")]
    InvalidCharacters,
    /// The 11th digit does not match the computed check digit.
    #[serde(rename = "CHECKSUM_FAILED_ERROR")]
    ChecksumFailed,
    /// The registry affirmatively reported the number as not valid.
    #[serde(rename = "ONLINE_VALIDATION_FAILED_ERROR")]
    OnlineValidationFailed,
}

/// (code, name, uuid) table.
static CODES: &[(ViolationCode, &str, &str)] = &[
    (
        ViolationCode::TooShort,
        "TOO_SHORT_ERROR",
        "cd0fe857-e33f-4392-9792-1f0ada9082fd",
    ),
    (
        ViolationCode::TooLong,
        "TOO_LONG_ERROR",
        "97a9b32b-29f4-4307-ab1f-58299f024d03",
    ),
    (
        ViolationCode::InvalidCharacters,
        "INVALID_CHARACTERS_ERROR",
        "cf239da4-a7ce-47b4-8f9c-2e16ae8f65d3",
    ),
    (
        ViolationCode::ChecksumFailed,
        "CHECKSUM_FAILED_ERROR",
        "6da32eb5-d6da-4d83-993c-e2dfed8c67a3",
    ),
    (
        ViolationCode::OnlineValidationFailed,
        "ONLINE_VALIDATION_FAILED_ERROR",
        "27f5b3a0-ad06-4f5e-8ccf-2cd2c5841cd9",
    ),
];

impl ViolationCode {
    /// All codes, in pipeline order.
    pub const ALL: [ViolationCode; 5] = [
        Self::TooShort,
        Self::TooLong,
        Self::InvalidCharacters,
        Self::ChecksumFailed,
        Self::OnlineValidationFailed,
    ];

    fn entry(self) -> &'static (ViolationCode, &'static str, &'static str) {
        // CODES holds one row per variant, in declaration order.
        &CODES[self as usize]
    }

    /// Stable symbolic name, e.g. `TOO_SHORT_ERROR`.
    pub fn name(self) -> &'static str {
        self.entry().1
    }

    /// Stable UUID identifying the violation.
    pub fn uuid(self) -> &'static str {
        self.entry().2
    }

    /// Look a code up by its UUID.
    pub fn from_uuid(uuid: &str) -> Option<Self> {
        CODES.iter().find(|(_, _, u)| *u == uuid).map(|(c, _, _)| *c)
    }

    /// Look a code up by its symbolic name.
    pub fn from_name(name: &str) -> Option<Self> {
        CODES.iter().find(|(_, n, _)| *n == name).map(|(c, _, _)| *c)
    }

    /// Whether the code comes from the local structural checks
    /// (as opposed to the remote registry).
    pub fn is_structural(self) -> bool {
        self != Self::OnlineValidationFailed
    }
}

impl fmt::Display for ViolationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
