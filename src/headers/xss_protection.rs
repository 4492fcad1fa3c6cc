//! `X-XSS-Protection`: legacy browser XSS auditor hints.

use axum::http::{header, HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};

use super::{header_value, ConfigurationError, HeaderPolicy};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "policy", rename_all = "kebab-case")]
pub enum XssFilter {
    Disable,
    EnableSanitized,
    EnableBlocked,
    EnableSanitizedAndReport { uri: String },
}

impl XssFilter {
    pub fn encode(&self) -> String {
        match self {
            XssFilter::Disable => "0".to_string(),
            XssFilter::EnableSanitized => "1".to_string(),
            XssFilter::EnableBlocked => "1; mode=block".to_string(),
            XssFilter::EnableSanitizedAndReport { uri } => format!("1; report={}", uri),
        }
    }
}

#[derive(Debug, Clone)]
pub struct XssProtection {
    value: HeaderValue,
}

impl XssProtection {
    pub fn new(filter: XssFilter) -> Result<Self, ConfigurationError> {
        if let XssFilter::EnableSanitizedAndReport { uri } = &filter {
            if uri.trim().is_empty() {
                return Err(ConfigurationError::MissingXssReportUri);
            }
        }

        let value = header_value("X-XSS-Protection", filter.encode())?;
        Ok(Self { value })
    }
}

impl HeaderPolicy for XssProtection {
    fn name(&self) -> HeaderName {
        header::X_XSS_PROTECTION
    }

    fn value(&self) -> Option<HeaderValue> {
        Some(self.value.clone())
    }
}
