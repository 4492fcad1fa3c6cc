//! `Strict-Transport-Security`.

use std::time::Duration;

use axum::http::{header, HeaderName, HeaderValue};

use super::{format_seconds, header_value, ConfigurationError, HeaderPolicy};

#[derive(Debug, Clone)]
pub struct StrictTransportSecurity {
    value: HeaderValue,
}

impl StrictTransportSecurity {
    pub fn new(max_age: Duration, include_subdomains: bool) -> Result<Self, ConfigurationError> {
        let mut encoded = format!("max-age={}", format_seconds(max_age));
        if include_subdomains {
            encoded.push_str("; includeSubDomains");
        }

        let value = header_value("Strict-Transport-Security", encoded)?;
        Ok(Self { value })
    }
}

impl HeaderPolicy for StrictTransportSecurity {
    fn name(&self) -> HeaderName {
        header::STRICT_TRANSPORT_SECURITY
    }

    fn value(&self) -> Option<HeaderValue> {
        Some(self.value.clone())
    }
}
