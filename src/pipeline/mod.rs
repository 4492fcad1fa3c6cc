//! Deferred header injection.
//!
//! # Data Flow
//! ```text
//! Request
//!     → flush.rs (fresh ResponseHooks in request extensions)
//!     → unit.rs × N (register one callback each, forward unchanged)
//!     → handler / upstream
//! Response
//!     → flush.rs (drain hooks in registration order)
//!     → hyper
//! ```
//!
//! # Design Decisions
//! - Callbacks fire once, after every inner layer has touched the headers
//! - Each write replaces all prior values under the same name
//! - Misuse surfaces as a 500, never as a silently missing header

pub mod flush;
pub mod hooks;
pub mod suite;
pub mod unit;

pub use flush::{HeaderFlush, HeaderFlushLayer};
pub use hooks::{remove_header, write_header_idempotent, HeaderCallback, HookError, ResponseHooks};
pub use suite::HeaderSuite;
pub use unit::{HeaderUnit, HeaderUnitLayer};
