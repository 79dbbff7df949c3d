//! Cooperative cancellation.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// A cooperative-cancellation token backed by an [`AtomicBool`].
///
/// Clones share the same flag, so a UI thread can keep one clone and cancel
/// a search running elsewhere. Searches poll [`is_cancelled`](Self::is_cancelled)
/// between node expansions; cancellation is level-triggered and stays
/// raised until [`rearm`](Self::rearm).
#[derive(Clone, Debug)]
pub struct Context {
    cancelled: Arc<AtomicBool>,
}

impl Context {
    /// Create a new, non-cancelled context.
    pub fn new() -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Whether cancellation has been requested.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// Request cancellation.
    #[inline]
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Lower the flag so the token can guard another run.
    #[inline]
    pub fn rearm(&self) {
        self.cancelled.store(false, Ordering::Release);
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}
