//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events (header units, flush faults, upstream errors)
//!     → logging.rs (subscriber: filter + pretty/JSON formatter)
//!     → stdout
//! ```
//!
//! # Design Decisions
//! - Structured fields (`header`, `error`) rather than formatted messages
//! - Request ID from tower-http flows through trace spans

pub mod logging;

pub use logging::init_logging;
