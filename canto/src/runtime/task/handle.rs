use crate::runtime::scheduler::Scheduler;
use crate::runtime::task::{Task, Work};

use std::cell::{Cell, RefCell};
use std::future::Future;
use std::mem;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

/// Completion state shared between a task and its [`JoinHandle`].
pub(crate) struct JoinState<T> {
    output: RefCell<Option<T>>,
    finished: Cell<bool>,

    /// Tasks suspended on the handle, resumed when the output is stored.
    waiters: RefCell<Vec<Rc<Task>>>,
}

impl<T> JoinState<T> {
    pub(crate) fn new() -> Self {
        Self {
            output: RefCell::new(None),
            finished: Cell::new(false),
            waiters: RefCell::new(Vec::new()),
        }
    }

    /// Stores the task output and moves every waiter to the ready queue.
    pub(crate) fn complete(&self, value: T, scheduler: &Scheduler) {
        *self.output.borrow_mut() = Some(value);
        self.finished.set(true);

        let waiters = mem::take(&mut *self.waiters.borrow_mut());
        for task in waiters {
            scheduler.push_ready(Work::Resumable(task));
        }
    }
}

/// A handle to a spawned task.
///
/// A `JoinHandle` is a future that resolves to the task's output. It can
/// only be awaited from another task on the same scheduler: awaiting an
/// unfinished task parks the awaiting task until the output is ready.
///
/// Dropping the `JoinHandle` does **not** cancel the task; it only
/// discards the ability to observe its result.
pub struct JoinHandle<T> {
    state: Rc<JoinState<T>>,
    scheduler: Scheduler,
}

impl<T> JoinHandle<T> {
    pub(crate) fn new(state: Rc<JoinState<T>>, scheduler: Scheduler) -> Self {
        Self { state, scheduler }
    }

    /// Returns `true` once the task has produced its output.
    pub fn is_finished(&self) -> bool {
        self.state.finished.get()
    }
}

impl<T> Future for JoinHandle<T> {
    type Output = T;

    /// Polls the join handle.
    ///
    /// If the task has already completed, its output is returned
    /// immediately. Otherwise the current task is registered as a waiter
    /// and suspended.
    ///
    /// # Panics
    ///
    /// Panics if polled outside a task, or again after the output was
    /// returned.
    fn poll(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<T> {
        let output = self.state.output.borrow_mut().take();
        if let Some(value) = output {
            return Poll::Ready(value);
        }

        assert!(
            !self.state.finished.get(),
            "JoinHandle polled after its output was taken"
        );

        let task = self.scheduler.suspend_current("JoinHandle");
        self.state.waiters.borrow_mut().push(task);

        Poll::Pending
    }
}
