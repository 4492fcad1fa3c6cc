//! Ordered composition of header units.

use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderMap;
use axum::Router;

use crate::config::HeadersConfig;
use crate::headers::{
    ConfigurationError, DnsPrefetchControl, FrameGuard, HeaderPolicy, HidePoweredBy, IeNoOpen,
    NoSniff, PublicKeyPins, ReferrerPolicyHeader, StrictTransportSecurity, XssProtection,
};
use crate::pipeline::flush::HeaderFlushLayer;
use crate::pipeline::unit::{apply_policy, HeaderUnitLayer};

type PolicyResult = Result<Arc<dyn HeaderPolicy>, ConfigurationError>;

/// Header units in declared order.
///
/// Declared order is registration order, so when two units own the same
/// header the later one wins.
#[derive(Debug, Clone, Default)]
pub struct HeaderSuite {
    policies: Vec<Arc<dyn HeaderPolicy>>,
}

impl HeaderSuite {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a unit.
    pub fn with<P: HeaderPolicy>(mut self, policy: P) -> Self {
        self.policies.push(Arc::new(policy));
        self
    }

    /// Build every configured family, failing on the first invalid one.
    pub fn from_config(config: &HeadersConfig) -> Result<Self, ConfigurationError> {
        let policies = configured_policies(config)
            .into_iter()
            .collect::<Result<Vec<_>, _>>()?;

        for policy in &policies {
            tracing::debug!(header = %policy.name(), "Header unit configured");
        }

        Ok(Self { policies })
    }

    pub fn len(&self) -> usize {
        self.policies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }

    /// Wrap every route of `router` with the units and a flush layer.
    pub fn apply<S>(&self, router: Router<S>) -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        // The last layer added is the outermost, so the first declared unit
        // is added last to register first.
        let router = self
            .policies
            .iter()
            .rev()
            .fold(router, |router, policy| {
                router.layer(HeaderUnitLayer::from_arc(policy.clone()))
            });

        router.layer(HeaderFlushLayer)
    }

    /// Headers one response would end up with, starting from `headers`.
    pub fn render(&self, mut headers: HeaderMap) -> HeaderMap {
        for policy in &self.policies {
            apply_policy(policy.as_ref(), &mut headers);
        }
        headers
    }
}

/// One entry per configured family, in field order.
pub(crate) fn configured_policies(config: &HeadersConfig) -> Vec<PolicyResult> {
    let mut policies: Vec<PolicyResult> = Vec::new();

    if let Some(frame_options) = &config.frame_options {
        policies.push(FrameGuard::new(frame_options.clone()).map(shared));
    }
    if let Some(allow) = config.dns_prefetch_control {
        policies.push(Ok(shared(DnsPrefetchControl::new(allow))));
    }
    if config.no_sniff {
        policies.push(Ok(shared(NoSniff)));
    }
    if config.ie_no_open {
        policies.push(Ok(shared(IeNoOpen)));
    }
    if let Some(referrer_policy) = &config.referrer_policy {
        policies.push(ReferrerPolicyHeader::new(referrer_policy.clone()).map(shared));
    }
    if let Some(filter) = &config.xss_protection {
        policies.push(XssProtection::new(filter.clone()).map(shared));
    }
    if let Some(pretend_to_be) = &config.powered_by {
        policies.push(HidePoweredBy::new(pretend_to_be.clone()).map(shared));
    }
    if let Some(hsts) = &config.strict_transport_security {
        policies.push(
            StrictTransportSecurity::new(
                Duration::from_secs(hsts.max_age_secs),
                hsts.include_subdomains,
            )
            .map(shared),
        );
    }
    if let Some(pkp) = &config.public_key_pins {
        policies.push(
            PublicKeyPins::new(
                pkp.pins.clone(),
                Duration::from_secs(pkp.max_age_secs),
                pkp.include_subdomains,
                pkp.report_uri.clone(),
            )
            .map(shared),
        );
    }

    policies
}

fn shared<P: HeaderPolicy>(policy: P) -> Arc<dyn HeaderPolicy> {
    Arc::new(policy)
}
