//! Remote registry confirmation: the `checkVat` capability and how its
//! answers are interpreted.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::RegistryError;

/// Body of a successful `checkVat` exchange.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckVatResponse {
    /// Validity flag. `None` when the registry omitted it.
    pub valid: Option<bool>,
    /// Date of the request as reported by the registry.
    pub request_date: Option<String>,
    /// Registered trader name (if disclosed).
    pub name: Option<String>,
    /// Registered trader address (if disclosed).
    pub address: Option<String>,
}

impl CheckVatResponse {
    /// A response carrying only the validity flag.
    pub fn with_valid(valid: bool) -> Self {
        Self {
            valid: Some(valid),
            ..Self::default()
        }
    }
}

/// The "confirm VAT number" capability.
///
/// Implementations perform one request/response exchange per call. They do
/// not retry. `Ok(None)` means the registry answered with an empty body.
#[async_trait]
pub trait RegistryClient: Send + Sync {
    /// Ask the registry whether `vat_number` is issued and active in `country_code`.
    async fn check_vat(
        &self,
        country_code: &str,
        vat_number: &str,
    ) -> Result<Option<CheckVatResponse>, RegistryError>;
}

/// Why a registry lookup produced no usable answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum IndeterminateReason {
    /// Transport error, fault, or undecodable body.
    Unavailable(String),
    /// The call exceeded the configured timeout.
    Timeout,
    /// The caller cancelled the call.
    Cancelled,
    /// The registry returned nothing.
    EmptyResponse,
    /// The registry returned a body without a validity flag.
    UnexpectedResponse,
}

impl fmt::Display for IndeterminateReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable(e) => f.write_str(e),
            Self::Timeout => f.write_str("VAT number on-line validation service timed out"),
            Self::Cancelled => f.write_str("VAT number on-line validation was cancelled"),
            Self::EmptyResponse => {
                f.write_str("Empty response from VAT number on-line validation service")
            }
            Self::UnexpectedResponse => {
                f.write_str("Unexpected response from VAT number on-line validation service")
            }
        }
    }
}

impl From<RegistryError> for IndeterminateReason {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::Timeout(_) => Self::Timeout,
            RegistryError::Cancelled => Self::Cancelled,
            other => Self::Unavailable(other.to_string()),
        }
    }
}

/// Result of the remote confirmation step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum Confirmation {
    /// No lookup was made.
    Skipped,
    /// The registry reported the number as valid.
    Confirmed,
    /// The registry reported the number as not valid.
    Rejected,
    /// No usable answer. Does not fail validation.
    Indeterminate(IndeterminateReason),
}

impl Confirmation {
    /// Interpret the raw outcome of a registry call.
    pub fn from_lookup(lookup: Result<Option<CheckVatResponse>, RegistryError>) -> Self {
        match lookup {
            Err(e) => Self::Indeterminate(e.into()),
            Ok(None) => Self::Indeterminate(IndeterminateReason::EmptyResponse),
            Ok(Some(resp)) => match resp.valid {
                None => Self::Indeterminate(IndeterminateReason::UnexpectedResponse),
                Some(true) => Self::Confirmed,
                Some(false) => Self::Rejected,
            },
        }
    }

    /// Whether the registry affirmatively rejected the number.
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected)
    }
}
