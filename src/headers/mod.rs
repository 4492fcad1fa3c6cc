//! Security header families.
//!
//! # Data Flow
//! ```text
//! policy token + scalars
//!     → <family>::new (validate, encode once)
//!     → HeaderPolicy (immutable, shared via Arc)
//!     → pipeline::unit (per-response deferred write)
//! ```
//!
//! # Design Decisions
//! - Every family validates at construction; nothing can fail per response
//! - Encoded values are converted to `HeaderValue` up front
//! - A policy whose value is `None` removes the header instead of writing it

use std::fmt;

use axum::http::{HeaderName, HeaderValue};
use thiserror::Error;

pub mod dns_prefetch;
pub mod frame_options;
pub mod hsts;
pub mod ie_no_open;
pub mod no_sniff;
pub mod powered_by;
pub mod public_key_pins;
pub mod referrer_policy;
pub mod xss_protection;

pub use dns_prefetch::DnsPrefetchControl;
pub use frame_options::{FrameGuard, FrameOptions};
pub use hsts::StrictTransportSecurity;
pub use ie_no_open::IeNoOpen;
pub use no_sniff::NoSniff;
pub use powered_by::HidePoweredBy;
pub use public_key_pins::PublicKeyPins;
pub use referrer_policy::{ReferrerPolicy, ReferrerPolicyHeader};
pub use xss_protection::{XssFilter, XssProtection};

/// One response header family bound to its immutable configuration.
pub trait HeaderPolicy: fmt::Debug + Send + Sync + 'static {
    /// Header owned by this policy.
    ///
    /// `HeaderName` is stored lowercased and compares case-insensitively,
    /// so `X-Frame-Options` goes out as `x-frame-options` on the wire.
    fn name(&self) -> HeaderName;

    /// Value to write, or `None` when the header must be absent.
    fn value(&self) -> Option<HeaderValue>;
}

/// Rejected header configuration. Raised while building the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// Public-Key-Pins needs at least one digest.
    #[error("Public-Key-Pins requires at least one pin-sha256 digest")]
    EmptyPinSet,

    /// ALLOW-FROM without an origin.
    #[error("X-Frame-Options ALLOW-FROM requires a non-empty origin")]
    MissingAllowFromOrigin,

    /// Custom referrer policy without a value.
    #[error("Referrer-Policy custom policy requires a non-empty value")]
    MissingCustomReferrerPolicy,

    /// XSS report mode without a report URI.
    #[error("X-XSS-Protection report mode requires a report URI")]
    MissingXssReportUri,

    /// The encoded value contains bytes not allowed in a header.
    #[error("{header} value {value:?} is not a valid header value")]
    InvalidHeaderValue { header: &'static str, value: String },
}

/// Convert an encoded value, rejecting control characters and the like.
pub(crate) fn header_value(
    header: &'static str,
    value: String,
) -> Result<HeaderValue, ConfigurationError> {
    HeaderValue::from_str(&value)
        .map_err(|_| ConfigurationError::InvalidHeaderValue { header, value })
}

/// Seconds as the shortest decimal that round-trips, `31536000` rather
/// than `31536000.0`.
pub(crate) fn format_seconds(max_age: std::time::Duration) -> String {
    max_age.as_secs_f64().to_string()
}
