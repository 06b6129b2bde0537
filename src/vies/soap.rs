//! VIES `checkVatService` SOAP client.

use async_trait::async_trait;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use reqwest::header::CONTENT_TYPE;
use std::io::Cursor;

use super::{build_http, disclosed, transport_error};
use crate::core::{CheckVatResponse, RegistryClient, RegistryError, ValidatorConfig};

const SOAP_ENV_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";
const CHECK_VAT_NS: &str = "urn:ec.europa.eu:taxud:vies:services:checkVat:types";

fn xml_io(e: std::io::Error) -> RegistryError {
    RegistryError::Parse(format!("XML write error: {e}"))
}

/// Build the `checkVat` request envelope.
fn build_envelope(country_code: &str, vat_number: &str) -> Result<String, RegistryError> {
    let mut w = Writer::new(Cursor::new(Vec::new()));
    w.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(xml_io)?;

    let mut envelope = BytesStart::new("soapenv:Envelope");
    envelope.push_attribute(("xmlns:soapenv", SOAP_ENV_NS));
    envelope.push_attribute(("xmlns:urn", CHECK_VAT_NS));
    w.write_event(Event::Start(envelope)).map_err(xml_io)?;
    w.write_event(Event::Empty(BytesStart::new("soapenv:Header")))
        .map_err(xml_io)?;
    w.write_event(Event::Start(BytesStart::new("soapenv:Body")))
        .map_err(xml_io)?;
    w.write_event(Event::Start(BytesStart::new("urn:checkVat")))
        .map_err(xml_io)?;

    for (name, text) in [("urn:countryCode", country_code), ("urn:vatNumber", vat_number)] {
        w.write_event(Event::Start(BytesStart::new(name)))
            .map_err(xml_io)?;
        w.write_event(Event::Text(BytesText::new(text)))
            .map_err(xml_io)?;
        w.write_event(Event::End(BytesEnd::new(name)))
            .map_err(xml_io)?;
    }

    for name in ["urn:checkVat", "soapenv:Body", "soapenv:Envelope"] {
        w.write_event(Event::End(BytesEnd::new(name)))
            .map_err(xml_io)?;
    }

    String::from_utf8(w.into_inner().into_inner())
        .map_err(|e| RegistryError::Parse(format!("XML UTF-8 error: {e}")))
}

/// Fields collected while walking a response envelope.
#[derive(Default)]
struct ParsedEnvelope {
    saw_response: bool,
    fault: Option<String>,
    valid: Option<String>,
    request_date: Option<String>,
    name: Option<String>,
    address: Option<String>,
}

impl ParsedEnvelope {
    fn handle_text(&mut self, path: &[String], text: &str) {
        let Some(current) = path.last() else {
            return;
        };
        let slot = match current.as_str() {
            "faultstring" => &mut self.fault,
            "valid" if self.saw_response => &mut self.valid,
            "requestDate" if self.saw_response => &mut self.request_date,
            "name" if self.saw_response => &mut self.name,
            "address" if self.saw_response => &mut self.address,
            _ => return,
        };
        *slot = Some(text.to_string());
    }
}

/// Decode a `checkVatResponse` envelope.
fn decode_envelope(xml: &str) -> Result<Option<CheckVatResponse>, RegistryError> {
    if xml.trim().is_empty() {
        return Ok(None);
    }

    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut parsed = ParsedEnvelope::default();
    let mut path: Vec<String> = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                let name = std::str::from_utf8(e.local_name().as_ref())
                    .unwrap_or("")
                    .to_string();
                if name == "checkVatResponse" {
                    parsed.saw_response = true;
                }
                path.push(name);
            }
            Ok(Event::Empty(ref e)) => {
                if e.local_name().as_ref() == b"checkVatResponse" {
                    parsed.saw_response = true;
                }
            }
            Ok(Event::Text(ref e)) => {
                let text = e
                    .unescape()
                    .map_err(|e| RegistryError::Parse(e.to_string()))?;
                if !text.is_empty() {
                    parsed.handle_text(&path, &text);
                }
            }
            Ok(Event::End(_)) => {
                path.pop();
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(RegistryError::Parse(e.to_string())),
        }
    }

    if let Some(fault) = parsed.fault {
        return Err(RegistryError::Fault(fault));
    }
    if !parsed.saw_response {
        return Err(RegistryError::Parse("no checkVatResponse in envelope".into()));
    }

    let valid = match parsed.valid.as_deref().map(str::trim) {
        Some("true") | Some("1") => Some(true),
        Some("false") | Some("0") => Some(false),
        _ => None,
    };

    Ok(Some(CheckVatResponse {
        valid,
        request_date: parsed.request_date,
        name: disclosed(parsed.name),
        address: disclosed(parsed.address),
    }))
}

/// Registry client for the VIES SOAP service.
#[derive(Debug, Clone)]
pub struct ViesSoapClient {
    http: reqwest::Client,
    endpoint: String,
    timeout_ms: u64,
}

impl ViesSoapClient {
    /// Client for the endpoint and timeout in `config`.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::Network` if the HTTP client cannot be built.
    pub fn from_config(config: &ValidatorConfig) -> Result<Self, RegistryError> {
        Ok(Self {
            http: build_http(config)?,
            endpoint: config.soap_endpoint.clone(),
            timeout_ms: config.timeout_ms,
        })
    }

    /// Endpoint this client posts to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl RegistryClient for ViesSoapClient {
    async fn check_vat(
        &self,
        country_code: &str,
        vat_number: &str,
    ) -> Result<Option<CheckVatResponse>, RegistryError> {
        let envelope = build_envelope(&country_code.to_uppercase(), vat_number)?;

        let resp = self
            .http
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "text/xml; charset=utf-8")
            .header("SOAPAction", "")
            .body(envelope)
            .send()
            .await
            .map_err(|e| transport_error(e, self.timeout_ms))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| transport_error(e, self.timeout_ms))?;

        // Faults arrive with HTTP 500; prefer the faultstring over the status.
        match decode_envelope(&body) {
            Err(RegistryError::Parse(_)) if !status.is_success() => {
                Err(RegistryError::Fault(format!("HTTP {status}")))
            }
            other => other,
        }
    }
}
