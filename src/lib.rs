//! Security response headers for tower/axum stacks.
//!
//! Each header family is an independent unit configured once at startup.
//! Units register a deferred callback per response; the flush layer runs
//! the callbacks in registration order right before the response head is
//! handed to hyper, replacing any value set further down the stack.
//!
//! ```no_run
//! use axum::{routing::get, Router};
//! use header_shield::headers::{FrameGuard, FrameOptions, NoSniff};
//! use header_shield::pipeline::HeaderSuite;
//!
//! # fn main() -> Result<(), header_shield::headers::ConfigurationError> {
//! let suite = HeaderSuite::new()
//!     .with(FrameGuard::new(FrameOptions::Deny)?)
//!     .with(NoSniff);
//! let app: Router = suite.apply(Router::new().route("/", get(|| async { "hi" })));
//! # let _ = app;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod headers;
pub mod http;
pub mod observability;
pub mod pipeline;

pub use config::ShieldConfig;
pub use http::HttpServer;
pub use pipeline::{HeaderFlushLayer, HeaderSuite, HeaderUnitLayer};
