//! `X-Frame-Options`: controls whether the page may be framed.

use axum::http::{header, HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};

use super::{header_value, ConfigurationError, HeaderPolicy};

/// Frame-embedding policy.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "policy", rename_all = "kebab-case")]
pub enum FrameOptions {
    /// Never render inside a frame.
    Deny,
    /// Only same-origin frames.
    SameOrigin,
    /// A single whitelisted framing origin.
    AllowFrom { origin: String },
}

impl FrameOptions {
    /// Wire value. The origin is passed through without syntax checks.
    pub fn encode(&self) -> String {
        match self {
            FrameOptions::Deny => "DENY".to_string(),
            FrameOptions::SameOrigin => "SAMEORIGIN".to_string(),
            FrameOptions::AllowFrom { origin } => format!("ALLOW-FROM {}", origin),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FrameGuard {
    value: HeaderValue,
}

impl FrameGuard {
    pub fn new(policy: FrameOptions) -> Result<Self, ConfigurationError> {
        if let FrameOptions::AllowFrom { origin } = &policy {
            if origin.trim().is_empty() {
                return Err(ConfigurationError::MissingAllowFromOrigin);
            }
        }

        let value = header_value("X-Frame-Options", policy.encode())?;
        Ok(Self { value })
    }
}

impl HeaderPolicy for FrameGuard {
    fn name(&self) -> HeaderName {
        header::X_FRAME_OPTIONS
    }

    fn value(&self) -> Option<HeaderValue> {
        Some(self.value.clone())
    }
}
