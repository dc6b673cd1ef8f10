use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

/// The suspension signal.
///
/// A future that hands control back to the scheduler exactly once without
/// producing a value. What happens next is decided by whoever awaited it:
/// a suspension helper has already parked the current task on some
/// resource, while a bare switch leaves the task "current" so that it is
/// re-queued at the back of the ready queue.
pub(crate) struct Switch(bool);

impl Future for Switch {
    type Output = ();

    /// Returns `Poll::Pending` on the first poll and `Poll::Ready` on the
    /// next one.
    fn poll(mut self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Self::Output> {
        if !self.0 {
            self.0 = true;
            return Poll::Pending;
        }

        Poll::Ready(())
    }
}

/// Suspends the calling task once.
pub(crate) fn switch() -> Switch {
    Switch(false)
}

/// Yields execution back to the scheduler.
///
/// Every unit of work that is ready when this is awaited gets to run
/// before the calling task continues. The function yields exactly once.
///
/// # Examples
///
/// ```rust,ignore
/// scheduler.new_task(async {
///     // Allow other tasks to run
///     yield_now().await;
/// });
/// ```
pub async fn yield_now() {
    switch().await
}
