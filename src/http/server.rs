//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the forwarding handler
//! - Wire up middleware (security headers, timeout, request ID, tracing)
//! - Forward requests to the configured upstream
//! - Bind server to listener and shut down gracefully

use std::future::Future;
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::{
        uri::{Authority, PathAndQuery, Scheme},
        HeaderName, Request, StatusCode, Uri,
    },
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use tokio::net::TcpListener;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::{validate_config, ConfigError, ShieldConfig};
use crate::config::validation::parse_upstream;
use crate::pipeline::HeaderSuite;

pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub upstream: Option<Authority>,
    pub client: Client<HttpConnector, Body>,
}

/// Header-injecting HTTP front.
pub struct HttpServer {
    router: Router,
    config: ShieldConfig,
    suite: HeaderSuite,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    ///
    /// Every header family is built here; a bad one stops startup.
    pub fn new(config: ShieldConfig) -> Result<Self, ConfigError> {
        validate_config(&config).map_err(ConfigError::Validation)?;

        let suite = HeaderSuite::from_config(&config.headers)?;
        // Checked by `validate_config`.
        let upstream = config.upstream.address.as_deref().and_then(parse_upstream);

        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());
        let state = AppState { upstream, client };

        let router = Self::build_router(&config, &suite, state);
        Ok(Self {
            router,
            config,
            suite,
        })
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// Anything that can produce a response of its own, such as the timeout,
    /// sits inside the flush point so its responses get headers too.
    #[allow(deprecated)]
    fn build_router(config: &ShieldConfig, suite: &HeaderSuite, state: AppState) -> Router {
        let router = Router::new()
            .route("/{*path}", any(forward_handler))
            .route("/", any(forward_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)));

        suite
            .apply(router)
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuid))
    }

    /// Run the server until `shutdown` resolves.
    pub async fn run<F>(self, listener: TcpListener, shutdown: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            headers = self.suite.len(),
            upstream = ?self.config.upstream.address,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ShieldConfig {
        &self.config
    }

    pub fn suite(&self) -> &HeaderSuite {
        &self.suite
    }

    /// The fully layered router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }
}

/// Forward to the upstream, or answer directly when none is configured.
async fn forward_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let Some(upstream) = state.upstream else {
        return (StatusCode::OK, "OK").into_response();
    };

    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let (mut parts, body) = request.into_parts();

    // URI rewrite
    let mut uri_parts = parts.uri.clone().into_parts();
    uri_parts.scheme = Some(Scheme::HTTP);
    uri_parts.authority = Some(upstream.clone());
    if uri_parts.path_and_query.is_none() {
        uri_parts.path_and_query = Some(PathAndQuery::from_static("/"));
    }
    parts.uri = match Uri::from_parts(uri_parts) {
        Ok(uri) => uri,
        Err(e) => {
            tracing::warn!(path = %path, error = %e, "Could not build upstream URI");
            return (StatusCode::BAD_REQUEST, "Invalid request URI").into_response();
        }
    };

    tracing::debug!(method = %method, path = %path, upstream = %upstream, "Forwarding request");

    match state.client.request(Request::from_parts(parts, body)).await {
        Ok(response) => {
            let (parts, body): (_, hyper::body::Incoming) = response.into_parts();
            Response::from_parts(parts, Body::new(body))
        }
        Err(e) => {
            tracing::error!(upstream = %upstream, error = %e, "Upstream error");
            (StatusCode::BAD_GATEWAY, "Upstream request failed").into_response()
        }
    }
}

/// Wait for shutdown signal (Ctrl+C).
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_standalone_mode_answers_with_headers() {
        let server = HttpServer::new(ShieldConfig::default()).unwrap();

        let response = server
            .router()
            .oneshot(Request::builder().uri("/anything").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers().get("x-content-type-options").unwrap(), "nosniff");
        assert_eq!(response.headers().get("x-frame-options").unwrap(), "SAMEORIGIN");
        assert!(response.headers().get("x-request-id").is_some());
    }

    #[tokio::test]
    async fn test_unreachable_upstream_is_bad_gateway_with_headers() {
        let mut config = ShieldConfig::default();
        // Reserved port, nothing listens there.
        config.upstream.address = Some("127.0.0.1:1".into());
        let server = HttpServer::new(config).unwrap();

        let response = server
            .router()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(response.headers().get("x-download-options").unwrap(), "noopen");
    }

    #[tokio::test]
    async fn test_timeout_response_carries_headers() {
        // Upstream that accepts connections and never answers.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let upstream = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });

        let mut config = ShieldConfig::default();
        config.upstream.address = Some(upstream.to_string());
        config.timeouts.request_secs = 1;
        let server = HttpServer::new(config).unwrap();

        let response = server
            .router()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
        assert_eq!(response.headers().get("x-frame-options").unwrap(), "SAMEORIGIN");
        assert_eq!(response.headers().get("x-content-type-options").unwrap(), "nosniff");
        assert!(response.headers().get("x-request-id").is_some());
    }

    #[test]
    fn test_invalid_headers_stop_startup() {
        let mut config = ShieldConfig::default();
        config.headers.referrer_policy = Some(crate::headers::ReferrerPolicy::Custom {
            value: " ".into(),
        });

        assert!(matches!(
            HttpServer::new(config),
            Err(ConfigError::Validation(_))
        ));
    }
}
