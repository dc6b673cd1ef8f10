use crate::runtime::scheduler::Scheduler;
use crate::runtime::task::Work;
use crate::runtime::yield_now::switch;

use std::time::{Duration, Instant};

impl Scheduler {
    /// Suspends the current task for `delay`.
    ///
    /// The task is parked in the deadline queue and resumed once the
    /// deadline has passed. A zero delay still suspends: the task resumes
    /// on the next loop iteration, after the work that is ready now.
    ///
    /// # Panics
    ///
    /// Panics if awaited outside a task running on this scheduler.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// use std::time::Duration;
    ///
    /// scheduler.sleep(Duration::from_millis(10)).await;
    /// ```
    pub async fn sleep(&self, delay: Duration) {
        self.sleep_until(Instant::now() + delay).await
    }

    /// Suspends the current task until `deadline`.
    ///
    /// # Panics
    ///
    /// Panics if awaited outside a task running on this scheduler.
    pub async fn sleep_until(&self, deadline: Instant) {
        let task = self.suspend_current("sleep");
        self.push_timer(deadline, Work::Resumable(task));

        switch().await
    }
}
