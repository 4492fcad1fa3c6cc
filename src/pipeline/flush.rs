//! Flush point for deferred header callbacks.
//!
//! `HeaderFlushLayer` plays the host's "response starting" event: it gives
//! each request a fresh [`ResponseHooks`], lets the inner stack run, and
//! drains the hooks against the response head before it is returned to
//! hyper. Every [`HeaderUnitLayer`](crate::pipeline::HeaderUnitLayer) must
//! sit inside it.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use axum::http::{Request, Response};
use tower::{Layer, Service};

use crate::pipeline::hooks::ResponseHooks;
use crate::pipeline::unit::internal_error;

#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderFlushLayer;

impl<S> Layer<S> for HeaderFlushLayer {
    type Service = HeaderFlush<S>;

    fn layer(&self, inner: S) -> Self::Service {
        HeaderFlush { inner }
    }
}

#[derive(Debug, Clone)]
pub struct HeaderFlush<S> {
    inner: S,
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for HeaderFlush<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>> + 'static,
    S::Future: Send + 'static,
    S::Error: 'static,
    ReqBody: 'static,
    ResBody: Default + Send + 'static,
{
    type Response = Response<ResBody>;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut request: Request<ReqBody>) -> Self::Future {
        let hooks = ResponseHooks::new();
        request.extensions_mut().insert(hooks.clone());
        let future = self.inner.call(request);

        Box::pin(async move {
            let mut response = future.await?;

            match hooks.fire(response.headers_mut()) {
                Ok(count) => {
                    tracing::trace!(callbacks = count, "Response hooks flushed");
                    Ok(response)
                }
                Err(err) => {
                    tracing::error!(error = %err, "Failed to flush response hooks");
                    Ok(internal_error())
                }
            }
        })
    }
}
