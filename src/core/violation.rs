//! Adapter from a [`Verdict`] to the (message, code, invalid value) triple a
//! form or constraint framework expects.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::codes::ViolationCode;
use super::validator::{Outcome, Verdict};

/// Message used when the constraint does not set one.
pub const DEFAULT_MESSAGE: &str = "Invalid VAT number";

/// The constraint attached to a field: currently only the user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VatNumberConstraint {
    /// Message reported with every violation.
    pub message: String,
}

impl Default for VatNumberConstraint {
    fn default() -> Self {
        Self {
            message: DEFAULT_MESSAGE.into(),
        }
    }
}

impl VatNumberConstraint {
    /// Constraint with a custom message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A single reported violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Human-readable message from the constraint.
    pub message: String,
    /// Stable violation code.
    pub code: ViolationCode,
    /// The rejected value as the validator saw it.
    pub invalid_value: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: '{}'", self.code, self.message, self.invalid_value)
    }
}

impl Verdict {
    /// The violation to report, or `None` for a valid or absent value.
    pub fn violation(&self, constraint: &VatNumberConstraint) -> Option<Violation> {
        match self.outcome {
            Outcome::Valid => None,
            Outcome::Invalid(code) => Some(Violation {
                message: constraint.message.clone(),
                code,
                invalid_value: self.value.clone().unwrap_or_default(),
            }),
        }
    }
}
