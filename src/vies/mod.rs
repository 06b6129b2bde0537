//! EU VIES transports for [`RegistryClient`](crate::core::RegistryClient).
//!
//! Two interchangeable clients are provided. [`ViesRestClient`] talks to the
//! JSON REST API; [`ViesSoapClient`] talks to the `checkVatService` SOAP
//! endpoint described by the VIES WSDL. Both take their endpoint and timeout
//! from [`ValidatorConfig`](crate::core::ValidatorConfig).
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use partita_iva::{ValidatorConfig, VatNumberValidator};
//! use partita_iva::vies::ViesRestClient;
//!
//! let config = ValidatorConfig::default();
//! let client = ViesRestClient::from_config(&config)?;
//! let validator = VatNumberValidator::new(Arc::new(client)).with_config(config);
//! let verdict = validator.validate_str(Some("01743030304")).await;
//! assert!(verdict.is_valid());
//! ```

mod rest;
mod soap;

pub use rest::ViesRestClient;
pub use soap::ViesSoapClient;

use crate::core::{RegistryError, ValidatorConfig};

fn build_http(config: &ValidatorConfig) -> Result<reqwest::Client, RegistryError> {
    reqwest::Client::builder()
        .timeout(config.timeout())
        .build()
        .map_err(|e| RegistryError::Network(e.to_string()))
}

fn transport_error(e: reqwest::Error, timeout_ms: u64) -> RegistryError {
    if e.is_timeout() {
        RegistryError::Timeout(timeout_ms)
    } else {
        RegistryError::Network(e.to_string())
    }
}

/// VIES uses `---` for undisclosed trader details.
fn disclosed(field: Option<String>) -> Option<String> {
    field.filter(|s| s != "---" && !s.trim().is_empty())
}
