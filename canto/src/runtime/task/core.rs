use crate::runtime::scheduler::Scheduler;

use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};

/// Identifier handed out by the scheduler to every spawned task.
pub(crate) type TaskId = u64;

/// Outcome of resuming a computation once.
///
/// A resumable computation either hands control back without a value
/// ([`Step::Suspended`]) or finishes ([`Step::Completed`]). The task driver
/// interprets this result; it never inspects the computation itself.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Step<T> {
    Suspended,
    Completed(T),
}

impl<T> From<Poll<T>> for Step<T> {
    fn from(poll: Poll<T>) -> Self {
        match poll {
            Poll::Pending => Step::Suspended,
            Poll::Ready(value) => Step::Completed(value),
        }
    }
}

/// A unit of work held by the ready queue, the deadline queue, the
/// readiness registry or a waiter list.
///
/// Callback-style work and suspend/resume-style work share one
/// representation so that the scheduler never needs to know which kind it
/// is driving.
pub(crate) enum Work {
    /// A plain, zero-argument continuation. Runs once and is gone.
    Plain(Box<dyn FnOnce()>),

    /// A task to resume from its last suspension point.
    Resumable(Rc<Task>),
}

impl Work {
    /// Executes exactly one step of this unit of work.
    pub(crate) fn execute(self, scheduler: &Scheduler) {
        match self {
            Work::Plain(step) => step(),
            Work::Resumable(task) => task.resume(scheduler),
        }
    }
}

/// A spawned future, adapted to the scheduler's one-step calling
/// convention.
///
/// The future is polled with a no-op waker: waking happens by moving the
/// task itself between the scheduler's queues, never through `Waker`.
pub(crate) struct Task {
    id: TaskId,

    /// The computation. `None` once it has completed.
    future: RefCell<Option<Pin<Box<dyn Future<Output = ()>>>>>,
}

impl Task {
    pub(crate) fn new<F>(id: TaskId, future: F) -> Self
    where
        F: Future<Output = ()> + 'static,
    {
        Self {
            id,
            future: RefCell::new(Some(Box::pin(future))),
        }
    }

    pub(crate) fn id(&self) -> TaskId {
        self.id
    }

    /// Runs the task until its next suspension point.
    ///
    /// The task installs itself as the scheduler's current task before
    /// resuming. A suspension helper that parks the task somewhere takes it
    /// back out of "current"; if that did not happen, the task suspended on
    /// its own and is pushed to the back of the ready queue so it is not
    /// lost.
    pub(crate) fn resume(self: Rc<Self>, scheduler: &Scheduler) {
        scheduler.set_current(self.clone());

        match self.step() {
            Step::Completed(()) => {
                scheduler.take_current();
                tracing::debug!(task = self.id, "task completed");
            }
            Step::Suspended => {
                if let Some(task) = scheduler.take_current() {
                    scheduler.push_ready(Work::Resumable(task));
                }
            }
        }
    }

    fn step(&self) -> Step<()> {
        let mut slot = self.future.borrow_mut();

        let Some(future) = slot.as_mut() else {
            return Step::Completed(());
        };

        let mut cx = Context::from_waker(Waker::noop());
        let step = Step::from(future.as_mut().poll(&mut cx));

        if step == Step::Completed(()) {
            *slot = None;
        }

        step
    }
}
