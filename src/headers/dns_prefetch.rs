//! `X-DNS-Prefetch-Control`: toggles browser DNS prefetching.

use axum::http::{header, HeaderName, HeaderValue};

use super::HeaderPolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DnsPrefetchControl {
    allow: bool,
}

impl DnsPrefetchControl {
    pub fn new(allow: bool) -> Self {
        Self { allow }
    }

    pub fn encode(&self) -> &'static str {
        if self.allow {
            "on"
        } else {
            "off"
        }
    }
}

impl HeaderPolicy for DnsPrefetchControl {
    fn name(&self) -> HeaderName {
        header::X_DNS_PREFETCH_CONTROL
    }

    // Written for both settings.
    fn value(&self) -> Option<HeaderValue> {
        Some(HeaderValue::from_static(self.encode()))
    }
}
