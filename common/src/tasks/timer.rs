use std::future::Future;
use std::time::Duration;

/// Source of delays for polling loops.
///
/// Dropping the returned future must release the underlying timer, so that a
/// loop that stops early never leaves one armed.
pub trait Timer {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()>;
}
