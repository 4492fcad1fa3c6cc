//! `Referrer-Policy`: how much referrer information browsers send.
//!
//! The only family besides `X-Powered-By` that can suppress its header:
//! [`ReferrerPolicy::None`] strips any `Referrer-Policy` set further down
//! the stack and writes nothing.

use axum::http::{header, HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};

use super::{header_value, ConfigurationError, HeaderPolicy};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "policy", rename_all = "kebab-case")]
pub enum ReferrerPolicy {
    /// No header at all.
    None,
    /// Arbitrary value, written verbatim.
    Custom { value: String },
    NoReferrer,
    NoReferrerWhenDowngrade,
    StrictOrigin,
    StrictOriginWhenCrossOrigin,
    SameOrigin,
    Origin,
    OriginWhenCrossOrigin,
    UnsafeUrl,
}

impl ReferrerPolicy {
    pub fn encode(&self) -> Option<&str> {
        let token = match self {
            ReferrerPolicy::None => return None,
            ReferrerPolicy::Custom { value } => value.as_str(),
            ReferrerPolicy::NoReferrer => "no-referrer",
            ReferrerPolicy::NoReferrerWhenDowngrade => "no-referrer-when-downgrade",
            ReferrerPolicy::StrictOrigin => "strict-origin",
            ReferrerPolicy::StrictOriginWhenCrossOrigin => "strict-origin-when-cross-origin",
            ReferrerPolicy::SameOrigin => "same-origin",
            ReferrerPolicy::Origin => "origin",
            ReferrerPolicy::OriginWhenCrossOrigin => "origin-when-cross-origin",
            ReferrerPolicy::UnsafeUrl => "unsafe-url",
        };
        Some(token)
    }
}

#[derive(Debug, Clone)]
pub struct ReferrerPolicyHeader {
    value: Option<HeaderValue>,
}

impl ReferrerPolicyHeader {
    pub fn new(policy: ReferrerPolicy) -> Result<Self, ConfigurationError> {
        if let ReferrerPolicy::Custom { value } = &policy {
            if value.trim().is_empty() {
                return Err(ConfigurationError::MissingCustomReferrerPolicy);
            }
        }

        let value = policy
            .encode()
            .map(|token| header_value("Referrer-Policy", token.to_string()))
            .transpose()?;

        Ok(Self { value })
    }
}

impl HeaderPolicy for ReferrerPolicyHeader {
    fn name(&self) -> HeaderName {
        header::REFERRER_POLICY
    }

    fn value(&self) -> Option<HeaderValue> {
        self.value.clone()
    }
}
