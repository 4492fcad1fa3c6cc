//! Per-response "before headers are sent" hooks.
//!
//! # Responsibilities
//! - Collect header callbacks registered while the request travels inward
//! - Run them once, in registration order, when the response head is ready
//! - Reject registrations that arrive after that point
//!
//! # Design Decisions
//! - One `ResponseHooks` per request; clones share the same list
//! - Callbacks run outside the lock so a callback cannot deadlock the list

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::http::{HeaderMap, HeaderName, HeaderValue};
use thiserror::Error;

/// Deferred header mutation.
pub type HeaderCallback = Box<dyn FnOnce(&mut HeaderMap) + Send + 'static>;

/// Misuse of the hook list. Always a composition bug, never transient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HookError {
    /// Registration after the response head was committed.
    #[error("response headers already sent; callback registered too late")]
    LateRegistration,

    /// The hook list was drained a second time.
    #[error("response hooks already flushed")]
    AlreadyFlushed,

    /// The request carries no hook list (no flush layer outside the unit).
    #[error("no response hooks on request; header units must run inside a HeaderFlushLayer")]
    Unavailable,
}

#[derive(Default)]
struct HookState {
    callbacks: Vec<HeaderCallback>,
    sent: bool,
}

/// Registration list owned by a single response.
#[derive(Clone, Default)]
pub struct ResponseHooks {
    state: Arc<Mutex<HookState>>,
}

impl ResponseHooks {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HookState> {
        // A panicking callback never runs under the lock.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register `callback` to run once, right before the headers are sent.
    pub fn on_before_headers_sent<F>(&self, callback: F) -> Result<(), HookError>
    where
        F: FnOnce(&mut HeaderMap) + Send + 'static,
    {
        let mut state = self.lock();
        if state.sent {
            return Err(HookError::LateRegistration);
        }
        state.callbacks.push(Box::new(callback));
        Ok(())
    }

    /// Run every registered callback against `headers`, in registration
    /// order. Returns how many ran.
    pub fn fire(&self, headers: &mut HeaderMap) -> Result<usize, HookError> {
        let callbacks = {
            let mut state = self.lock();
            if state.sent {
                return Err(HookError::AlreadyFlushed);
            }
            state.sent = true;
            std::mem::take(&mut state.callbacks)
        };

        let count = callbacks.len();
        for callback in callbacks {
            callback(headers);
        }
        Ok(count)
    }

    pub fn is_sent(&self) -> bool {
        self.lock().sent
    }

    pub fn pending(&self) -> usize {
        self.lock().callbacks.len()
    }
}

impl fmt::Debug for ResponseHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.lock();
        f.debug_struct("ResponseHooks")
            .field("pending", &state.callbacks.len())
            .field("sent", &state.sent)
            .finish()
    }
}

/// Replace every value under `name` with exactly one `value`.
pub fn write_header_idempotent(headers: &mut HeaderMap, name: HeaderName, value: HeaderValue) {
    // `insert` drops all previous values for the name.
    headers.insert(name, value);
}

/// Drop every value under `name`. Absent names are fine.
pub fn remove_header(headers: &mut HeaderMap, name: &HeaderName) {
    headers.remove(name);
}
