//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup)
//!     → request ID, tracing, timeout layers
//!     → pipeline (security header units + flush point)
//!     → forward_handler (upstream, or built-in answer)
//!     → Send to client
//! ```

pub mod server;

pub use server::{shutdown_signal, HttpServer, X_REQUEST_ID};
