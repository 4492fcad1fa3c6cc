//! `Public-Key-Pins` (HPKP).
//!
//! Grammar:
//! ```text
//! pin-sha256="<d1>"; pin-sha256="<d2>"; max-age=<s>[; includeSubDomains][; report-uri="<uri>"]
//! ```
//! Digests keep the caller's order and duplicates are not removed.

use std::time::Duration;

use axum::http::{HeaderName, HeaderValue};

use super::{format_seconds, header_value, ConfigurationError, HeaderPolicy};

pub const PUBLIC_KEY_PINS: HeaderName = HeaderName::from_static("public-key-pins");

#[derive(Debug, Clone)]
pub struct PublicKeyPins {
    report_uri: Option<String>,
    value: HeaderValue,
}

impl PublicKeyPins {
    pub fn new(
        pins: Vec<String>,
        max_age: Duration,
        include_subdomains: bool,
        report_uri: Option<String>,
    ) -> Result<Self, ConfigurationError> {
        if pins.is_empty() {
            return Err(ConfigurationError::EmptyPinSet);
        }

        let report_uri = report_uri.filter(|uri| !uri.is_empty());
        let encoded = encode(&pins, max_age, include_subdomains, report_uri.as_deref());
        let value = header_value("Public-Key-Pins", encoded)?;

        Ok(Self { report_uri, value })
    }

    pub fn report_uri(&self) -> Option<&str> {
        self.report_uri.as_deref()
    }
}

fn encode(
    pins: &[String],
    max_age: Duration,
    include_subdomains: bool,
    report_uri: Option<&str>,
) -> String {
    let mut clauses: Vec<String> = pins
        .iter()
        .map(|pin| format!("pin-sha256=\"{}\"", pin))
        .collect();

    clauses.push(format!("max-age={}", format_seconds(max_age)));
    if include_subdomains {
        clauses.push("includeSubDomains".to_string());
    }
    if let Some(uri) = report_uri {
        clauses.push(format!("report-uri=\"{}\"", uri));
    }

    clauses.join("; ")
}

impl HeaderPolicy for PublicKeyPins {
    fn name(&self) -> HeaderName {
        PUBLIC_KEY_PINS
    }

    fn value(&self) -> Option<HeaderValue> {
        Some(self.value.clone())
    }
}
