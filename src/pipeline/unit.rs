//! Header unit middleware: one policy, one deferred write per response.

use std::sync::Arc;
use std::task::{Context, Poll};

use axum::http::{HeaderMap, Request, Response, StatusCode};
use futures_util::future::{ready, Either, Ready};
use tower::{Layer, Service};

use crate::headers::HeaderPolicy;
use crate::pipeline::hooks::{remove_header, write_header_idempotent, HookError, ResponseHooks};

/// Attaches one [`HeaderPolicy`] to a service stack.
///
/// Must sit inside a [`HeaderFlushLayer`](crate::pipeline::HeaderFlushLayer).
#[derive(Debug, Clone)]
pub struct HeaderUnitLayer {
    policy: Arc<dyn HeaderPolicy>,
}

impl HeaderUnitLayer {
    pub fn new<P: HeaderPolicy>(policy: P) -> Self {
        Self {
            policy: Arc::new(policy),
        }
    }

    pub fn from_arc(policy: Arc<dyn HeaderPolicy>) -> Self {
        Self { policy }
    }
}

impl<S> Layer<S> for HeaderUnitLayer {
    type Service = HeaderUnit<S>;

    fn layer(&self, inner: S) -> Self::Service {
        HeaderUnit {
            inner,
            policy: self.policy.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct HeaderUnit<S> {
    inner: S,
    policy: Arc<dyn HeaderPolicy>,
}

/// Body of the deferred callback: evaluate the policy, then one write.
pub(crate) fn apply_policy(policy: &dyn HeaderPolicy, headers: &mut HeaderMap) {
    let name = policy.name();
    match policy.value() {
        Some(value) => {
            tracing::trace!(header = %name, value = ?value, "Writing security header");
            write_header_idempotent(headers, name, value);
        }
        None => {
            tracing::trace!(header = %name, "Removing security header");
            remove_header(headers, &name);
        }
    }
}

pub(crate) fn register<B>(
    request: &Request<B>,
    policy: Arc<dyn HeaderPolicy>,
) -> Result<(), HookError> {
    let hooks = request
        .extensions()
        .get::<ResponseHooks>()
        .ok_or(HookError::Unavailable)?;

    hooks.on_before_headers_sent(move |headers| apply_policy(policy.as_ref(), headers))
}

pub(crate) fn internal_error<B: Default>() -> Response<B> {
    let mut response = Response::new(B::default());
    *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
    response
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for HeaderUnit<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>>,
    ResBody: Default,
{
    type Response = Response<ResBody>;
    type Error = S::Error;
    type Future = Either<S::Future, Ready<Result<Self::Response, Self::Error>>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<ReqBody>) -> Self::Future {
        match register(&request, self.policy.clone()) {
            Ok(()) => Either::Left(self.inner.call(request)),
            Err(err) => {
                tracing::error!(
                    header = %self.policy.name(),
                    error = %err,
                    "Failed to register security header"
                );
                Either::Right(ready(Ok(internal_error())))
            }
        }
    }
}
