//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses and value ranges
//! - Build every header family once to surface configuration errors
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ShieldConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use axum::http::uri::Authority;
use thiserror::Error;

use crate::config::schema::ShieldConfig;
use crate::headers::ConfigurationError;
use crate::pipeline::suite::configured_policies;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address {0:?} is not a socket address")]
    InvalidBindAddress(String),

    #[error("upstream.address {0:?} is not a valid authority")]
    InvalidUpstream(String),

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroRequestTimeout,

    #[error("headers: {0}")]
    Header(#[from] ConfigurationError),
}

pub fn validate_config(config: &ShieldConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if let Some(address) = &config.upstream.address {
        if parse_upstream(address).is_none() {
            errors.push(ValidationError::InvalidUpstream(address.clone()));
        }
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }

    errors.extend(
        configured_policies(&config.headers)
            .into_iter()
            .filter_map(Result::err)
            .map(ValidationError::from),
    );

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Upstream authority, rejecting anything with userinfo.
pub(crate) fn parse_upstream(address: &str) -> Option<Authority> {
    let authority: Authority = address.parse().ok()?;
    if authority.as_str().contains('@') {
        return None;
    }
    Some(authority)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PublicKeyPinsConfig;
    use crate::headers::{FrameOptions, XssFilter};

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&ShieldConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_every_error() {
        let mut config = ShieldConfig::default();
        config.listener.bind_address = "not-an-address".into();
        config.upstream.address = Some("user@backend:80".into());
        config.timeouts.request_secs = 0;
        config.headers.frame_options = Some(FrameOptions::AllowFrom { origin: String::new() });
        config.headers.xss_protection = Some(XssFilter::EnableSanitizedAndReport { uri: String::new() });
        config.headers.public_key_pins = Some(PublicKeyPinsConfig {
            pins: Vec::new(),
            max_age_secs: 60,
            include_subdomains: false,
            report_uri: None,
        });

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::InvalidBindAddress("not-an-address".into()),
                ValidationError::InvalidUpstream("user@backend:80".into()),
                ValidationError::ZeroRequestTimeout,
                ValidationError::Header(ConfigurationError::MissingAllowFromOrigin),
                ValidationError::Header(ConfigurationError::MissingXssReportUri),
                ValidationError::Header(ConfigurationError::EmptyPinSet),
            ]
        );
    }

    #[test]
    fn test_upstream_authority() {
        assert!(parse_upstream("127.0.0.1:3000").is_some());
        assert!(parse_upstream("backend.internal").is_some());
        assert!(parse_upstream("http://backend").is_none());
    }
}
