//! Per-invocation context handed to every handler.
//!
//! The middleware never inspects or alters it; it is passed through to the
//! user handler exactly as the caller built it.

use std::sync::Arc;

/// Immutable metadata for one invocation.
#[derive(Debug, Clone)]
pub struct CallCtx {
    request_id: u64,
    origin: Arc<str>,
}

impl CallCtx {
    pub fn new(request_id: u64, origin: impl Into<Arc<str>>) -> Self {
        Self {
            request_id,
            origin: origin.into(),
        }
    }

    /// Caller-assigned id, used to correlate log lines of one invocation.
    pub fn request_id(&self) -> u64 {
        self.request_id
    }

    /// Which surface issued the call (e.g. `http`).
    pub fn origin(&self) -> &str {
        &self.origin
    }
}

impl Default for CallCtx {
    fn default() -> Self {
        Self::new(0, "local")
    }
}
