//! VIES REST API client.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{build_http, disclosed, transport_error};
use crate::core::{CheckVatResponse, RegistryClient, RegistryError, ValidatorConfig};

/// VIES API response structure.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ViesApiResponse {
    valid: Option<bool>,
    request_date: Option<String>,
    name: Option<String>,
    address: Option<String>,
    // Error fields
    error_wrappers: Option<Vec<ViesErrorWrapper>>,
}

#[derive(Debug, Deserialize)]
struct ViesErrorWrapper {
    error: Option<String>,
    message: Option<String>,
}

/// VIES API request body.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ViesRequest<'a> {
    country_code: &'a str,
    vat_number: &'a str,
}

/// Registry client for the VIES REST API.
#[derive(Debug, Clone)]
pub struct ViesRestClient {
    http: reqwest::Client,
    endpoint: String,
    timeout_ms: u64,
}

impl ViesRestClient {
    /// Client for the endpoint and timeout in `config`.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::Network` if the HTTP client cannot be built
    /// (e.g. no TLS backend).
    pub fn from_config(config: &ValidatorConfig) -> Result<Self, RegistryError> {
        Ok(Self {
            http: build_http(config)?,
            endpoint: config.rest_endpoint.clone(),
            timeout_ms: config.timeout_ms,
        })
    }

    /// Endpoint this client posts to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Decode a VIES REST response body.
fn decode_body(body: &str) -> Result<Option<CheckVatResponse>, RegistryError> {
    if body.trim().is_empty() {
        return Ok(None);
    }

    let Some(api_resp) = serde_json::from_str::<Option<ViesApiResponse>>(body)
        .map_err(|e| RegistryError::Parse(e.to_string()))?
    else {
        return Ok(None);
    };

    // Check for API-level errors
    if let Some(err) = api_resp.error_wrappers.as_ref().and_then(|w| w.first()) {
        let msg = err
            .message
            .clone()
            .or_else(|| err.error.clone())
            .unwrap_or_else(|| "unknown error".into());
        return Err(RegistryError::Fault(msg));
    }

    Ok(Some(CheckVatResponse {
        valid: api_resp.valid,
        request_date: api_resp.request_date,
        name: disclosed(api_resp.name),
        address: disclosed(api_resp.address),
    }))
}

#[async_trait]
impl RegistryClient for ViesRestClient {
    async fn check_vat(
        &self,
        country_code: &str,
        vat_number: &str,
    ) -> Result<Option<CheckVatResponse>, RegistryError> {
        let country_code = country_code.to_uppercase();
        let req = ViesRequest {
            country_code: &country_code,
            vat_number,
        };

        let resp = self
            .http
            .post(&self.endpoint)
            .json(&req)
            .send()
            .await
            .map_err(|e| transport_error(e, self.timeout_ms))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| transport_error(e, self.timeout_ms))?;

        if !status.is_success() {
            return Err(RegistryError::Fault(format!("HTTP {status}: {body}")));
        }

        decode_body(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serialization() {
        let req = ViesRequest {
            country_code: "IT",
            vat_number: "01743030304",
        };
        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains("\"countryCode\":\"IT\""));
        assert!(json.contains("\"vatNumber\":\"01743030304\""));
    }

    #[test]
    fn decodes_valid_response() {
        let json = r#"{"valid":true,"requestDate":"2024-01-15","name":"ACME SRL","address":"VIA ROMA 1\n00100 ROMA"}"#;
        let resp = decode_body(json).unwrap().unwrap();
        assert_eq!(resp.valid, Some(true));
        assert_eq!(resp.name.as_deref(), Some("ACME SRL"));
        assert_eq!(resp.request_date.as_deref(), Some("2024-01-15"));
    }

    #[test]
    fn filters_dashes() {
        let json = r#"{"valid":false,"name":"---","address":"---"}"#;
        let resp = decode_body(json).unwrap().unwrap();
        assert_eq!(resp.valid, Some(false));
        assert!(resp.name.is_none());
        assert!(resp.address.is_none());
    }

    #[test]
    fn missing_valid_field() {
        let resp = decode_body(r#"{"requestDate":"2024-01-15"}"#).unwrap().unwrap();
        assert_eq!(resp.valid, None);
    }

    #[test]
    fn empty_body_is_none() {
        assert_eq!(decode_body("").unwrap(), None);
        assert_eq!(decode_body("  \n").unwrap(), None);
        assert_eq!(decode_body("null").unwrap(), None);
    }

    #[test]
    fn error_wrapper_is_fault() {
        let json = r#"{"actionSucceed":false,"errorWrappers":[{"error":"MS_UNAVAILABLE","message":null}]}"#;
        assert_eq!(
            decode_body(json),
            Err(RegistryError::Fault("MS_UNAVAILABLE".into()))
        );
    }

    #[test]
    fn garbage_is_parse_error() {
        assert!(matches!(
            decode_body("<html>busy</html>"),
            Err(RegistryError::Parse(_))
        ));
    }

    #[test]
    fn endpoint_from_config() {
        let config = ValidatorConfig {
            rest_endpoint: "http://127.0.0.1:9/check".into(),
            ..ValidatorConfig::default()
        };
        let client = ViesRestClient::from_config(&config).unwrap();
        assert_eq!(client.endpoint(), "http://127.0.0.1:9/check");
    }
}
