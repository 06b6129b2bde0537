//! Structural validation, violation codes, and the confirmation pipeline.
//!
//! Everything here runs without network access except
//! [`VatNumberValidator`], which calls whatever [`RegistryClient`] it was
//! given.

mod candidate;
mod checksum;
mod codes;
mod config;
mod error;
mod registry;
mod validator;
mod violation;

pub use candidate::Candidate;
pub use checksum::{Digits, VAT_NUMBER_LENGTH, check_digit, check_structure, is_structurally_valid};
pub use codes::ViolationCode;
pub use config::{
    COUNTRY_CODE, DEFAULT_TIMEOUT_MS, VIES_REST_URL, VIES_SOAP_URL, ValidatorConfig,
};
pub use error::{RegistryError, ValidatorError};
pub use registry::{CheckVatResponse, Confirmation, IndeterminateReason, RegistryClient};
pub use validator::{Outcome, VatNumberValidator, Verdict};
pub use violation::{DEFAULT_MESSAGE, VatNumberConstraint, Violation};
