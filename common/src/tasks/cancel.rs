//! Explicit cancellation for polling loops.

use std::future::Future;

use futures_util::future::{AbortHandle, AbortRegistration, Abortable, Aborted};

/// Owner side: call [`CancelHandle::cancel`] when the observer goes away.
#[derive(Clone, Debug)]
pub struct CancelHandle(AbortHandle);

/// Loop side: consumed by the loop it stops.
#[derive(Debug)]
pub struct CancelSignal(AbortRegistration);

/// Creates a connected handle/signal pair.
pub fn cancel_pair() -> (CancelHandle, CancelSignal) {
    let (handle, registration) = AbortHandle::new_pair();
    (CancelHandle(handle), CancelSignal(registration))
}

impl CancelHandle {
    /// Stops the loop at its next suspension point. The in-flight request and the
    /// armed timer are dropped. Idempotent.
    pub fn cancel(&self) {
        self.0.abort();
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.is_aborted()
    }
}

impl CancelSignal {
    /// Drives `future` until it completes or the handle is cancelled.
    pub(crate) async fn guard<F: Future>(self, future: F) -> Result<F::Output, Aborted> {
        Abortable::new(future, self.0).await
    }
}
