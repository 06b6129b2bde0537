//! Validator configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Country code sent to the registry alongside the number.
pub const COUNTRY_CODE: &str = "IT";

/// VIES REST endpoint.
pub const VIES_REST_URL: &str =
    "https://ec.europa.eu/taxation_customs/vies/rest-api/check-vat-number";

/// VIES SOAP endpoint (the `checkVatService` port of the published WSDL).
pub const VIES_SOAP_URL: &str =
    "https://ec.europa.eu/taxation_customs/vies/services/checkVatService";

/// Default bound on a single registry round trip.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Settings for [`VatNumberValidator`](super::VatNumberValidator) and the
/// registry transports.
///
/// Every field has a default, so a partial document deserializes:
///
/// ```
/// use partita_iva::ValidatorConfig;
///
/// let config: ValidatorConfig = serde_json::from_str(r#"{"timeout_ms": 5000}"#).unwrap();
/// assert_eq!(config.country_code, "IT");
/// assert_eq!(config.timeout().as_secs(), 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Country code passed to the registry. Not derived from the candidate.
    pub country_code: String,
    /// Endpoint used by the REST transport.
    pub rest_endpoint: String,
    /// Endpoint used by the SOAP transport.
    pub soap_endpoint: String,
    /// Timeout for one registry call, in milliseconds.
    pub timeout_ms: u64,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            country_code: COUNTRY_CODE.into(),
            rest_endpoint: VIES_REST_URL.into(),
            soap_endpoint: VIES_SOAP_URL.into(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl ValidatorConfig {
    /// Registry call timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Override the registry timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX).max(1);
        self
    }
}
