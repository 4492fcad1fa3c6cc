//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the shield.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::headers::{FrameOptions, ReferrerPolicy, XssFilter};

/// Root configuration for header-shield.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ShieldConfig {
    /// Listener configuration.
    pub listener: ListenerConfig,

    /// Where requests are forwarded.
    pub upstream: UpstreamConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Security header suite.
    pub headers: HeadersConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Upstream configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Upstream authority (e.g., "127.0.0.1:3000").
    /// Without one, the shield answers every request itself.
    pub address: Option<String>,
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins if set.
    pub log_level: String,

    /// Pretty for development, JSON for production.
    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

/// Security header suite.
///
/// Without a `[headers]` table the recommended set from `Default` is used.
/// With one, only the families it names are emitted. Units are composed in
/// field order.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default = "HeadersConfig::empty")]
pub struct HeadersConfig {
    /// `X-Frame-Options`.
    pub frame_options: Option<FrameOptions>,

    /// `X-DNS-Prefetch-Control`: true = on, false = off.
    pub dns_prefetch_control: Option<bool>,

    /// `X-Content-Type-Options: nosniff`.
    pub no_sniff: bool,

    /// `X-Download-Options: noopen`.
    pub ie_no_open: bool,

    /// `Referrer-Policy`.
    pub referrer_policy: Option<ReferrerPolicy>,

    /// `X-XSS-Protection`.
    pub xss_protection: Option<XssFilter>,

    /// `X-Powered-By` replacement. Empty removes the header.
    pub powered_by: Option<String>,

    /// `Strict-Transport-Security`.
    pub strict_transport_security: Option<HstsConfig>,

    /// `Public-Key-Pins`.
    pub public_key_pins: Option<PublicKeyPinsConfig>,
}

impl Default for HeadersConfig {
    fn default() -> Self {
        Self {
            frame_options: Some(FrameOptions::SameOrigin),
            dns_prefetch_control: Some(false),
            no_sniff: true,
            ie_no_open: true,
            referrer_policy: Some(ReferrerPolicy::NoReferrer),
            xss_protection: Some(XssFilter::Disable),
            powered_by: Some(String::new()),
            strict_transport_security: None,
            public_key_pins: None,
        }
    }
}

impl HeadersConfig {
    /// Every family switched off.
    pub fn empty() -> Self {
        Self {
            frame_options: None,
            dns_prefetch_control: None,
            no_sniff: false,
            ie_no_open: false,
            referrer_policy: None,
            xss_protection: None,
            powered_by: None,
            strict_transport_security: None,
            public_key_pins: None,
        }
    }
}

/// `Strict-Transport-Security` settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HstsConfig {
    /// max-age in seconds.
    #[serde(default = "default_hsts_max_age")]
    pub max_age_secs: u64,

    #[serde(default)]
    pub include_subdomains: bool,
}

fn default_hsts_max_age() -> u64 {
    // 180 days
    15_552_000
}

/// `Public-Key-Pins` settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PublicKeyPinsConfig {
    /// Base64 SHA-256 SPKI digests, in emission order.
    pub pins: Vec<String>,

    /// max-age in seconds.
    pub max_age_secs: u64,

    #[serde(default)]
    pub include_subdomains: bool,

    #[serde(default)]
    pub report_uri: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config: ShieldConfig = toml::from_str("").unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert!(config.upstream.address.is_none());
        assert!(config.headers.no_sniff);
        assert_eq!(config.observability.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_full_headers_table() {
        let config: ShieldConfig = toml::from_str(
            r#"
            [upstream]
            address = "127.0.0.1:3000"

            [observability]
            log_format = "json"

            [headers]
            no_sniff = false
            dns_prefetch_control = true
            powered_by = "PHP 4.2.0"

            [headers.frame_options]
            policy = "allow-from"
            origin = "https://example.com"

            [headers.referrer_policy]
            policy = "custom"
            value = "same-origin"

            [headers.xss_protection]
            policy = "enable-sanitized-and-report"
            uri = "https://r.example/xss"

            [headers.strict_transport_security]
            max_age_secs = 31536000
            include_subdomains = true

            [headers.public_key_pins]
            pins = ["AAA", "BBB"]
            max_age_secs = 5184000
            report_uri = "https://r.example/"
            "#,
        )
        .unwrap();

        assert_eq!(config.upstream.address.as_deref(), Some("127.0.0.1:3000"));
        assert_eq!(config.observability.log_format, LogFormat::Json);

        let headers = config.headers;
        assert!(!headers.no_sniff);
        assert!(!headers.ie_no_open);
        assert_eq!(headers.dns_prefetch_control, Some(true));
        assert_eq!(headers.powered_by.as_deref(), Some("PHP 4.2.0"));
        assert_eq!(
            headers.frame_options,
            Some(FrameOptions::AllowFrom {
                origin: "https://example.com".into()
            })
        );
        assert_eq!(
            headers.referrer_policy,
            Some(ReferrerPolicy::Custom {
                value: "same-origin".into()
            })
        );
        assert_eq!(
            headers.xss_protection,
            Some(XssFilter::EnableSanitizedAndReport {
                uri: "https://r.example/xss".into()
            })
        );

        let hsts = headers.strict_transport_security.unwrap();
        assert_eq!(hsts.max_age_secs, 31_536_000);
        assert!(hsts.include_subdomains);

        let pkp = headers.public_key_pins.unwrap();
        assert_eq!(pkp.pins, vec!["AAA", "BBB"]);
        assert!(!pkp.include_subdomains);
    }

    #[test]
    fn test_headers_table_lists_families() {
        let config: ShieldConfig = toml::from_str("[headers]\nno_sniff = true\n").unwrap();
        assert!(config.headers.no_sniff);
        assert!(config.headers.frame_options.is_none());
        assert!(config.headers.powered_by.is_none());
    }

    #[test]
    fn test_unknown_policy_rejected() {
        let result: Result<HeadersConfig, _> = toml::from_str(
            r#"
            [frame_options]
            policy = "allow-all"
            "#,
        );
        assert!(result.is_err());
    }
}
