//! `X-Powered-By`: hides or masquerades the server technology.

use axum::http::{HeaderName, HeaderValue};

use super::{header_value, ConfigurationError, HeaderPolicy};

pub const X_POWERED_BY: HeaderName = HeaderName::from_static("x-powered-by");

/// Strips `X-Powered-By`, optionally replacing it with a decoy.
#[derive(Debug, Clone)]
pub struct HidePoweredBy {
    value: Option<HeaderValue>,
}

impl HidePoweredBy {
    /// An empty or all-whitespace `pretend_to_be` removes the header.
    pub fn new(pretend_to_be: impl Into<String>) -> Result<Self, ConfigurationError> {
        let pretend_to_be = pretend_to_be.into();
        let value = if pretend_to_be.trim().is_empty() {
            None
        } else {
            Some(header_value("X-Powered-By", pretend_to_be)?)
        };
        Ok(Self { value })
    }

    pub fn remove() -> Self {
        Self { value: None }
    }
}

impl HeaderPolicy for HidePoweredBy {
    fn name(&self) -> HeaderName {
        X_POWERED_BY
    }

    fn value(&self) -> Option<HeaderValue> {
        self.value.clone()
    }
}
