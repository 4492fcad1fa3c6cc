//! `X-Download-Options`: stops old IE from opening downloads in the
//! site's context.

use axum::http::{HeaderName, HeaderValue};

use super::HeaderPolicy;

pub const X_DOWNLOAD_OPTIONS: HeaderName = HeaderName::from_static("x-download-options");

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IeNoOpen;

impl HeaderPolicy for IeNoOpen {
    fn name(&self) -> HeaderName {
        X_DOWNLOAD_OPTIONS
    }

    fn value(&self) -> Option<HeaderValue> {
        Some(HeaderValue::from_static("noopen"))
    }
}
