//! `X-Content-Type-Options`: disables MIME sniffing.

use axum::http::{header, HeaderName, HeaderValue};

use super::HeaderPolicy;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoSniff;

impl HeaderPolicy for NoSniff {
    fn name(&self) -> HeaderName {
        header::X_CONTENT_TYPE_OPTIONS
    }

    fn value(&self) -> Option<HeaderValue> {
        Some(HeaderValue::from_static("nosniff"))
    }
}
