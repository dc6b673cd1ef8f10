use crate::error::QueueClosed;
use crate::runtime::scheduler::Scheduler;
use crate::runtime::task::Work;
use crate::runtime::yield_now::switch;

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

/// A FIFO channel between tasks with a closable end.
///
/// `AsyncQueue<T>` is a cheap handle: clones share the same items and
/// waiters, so producers and consumers each keep their own clone. Any
/// number of tasks may [`put`](Self::put) and [`get`](Self::get).
///
/// Waking a consumer only means "try again": the woken task re-checks the
/// queue when it resumes, because another consumer may have taken the item
/// in between.
///
/// # Examples
///
/// ```rust,ignore
/// let queue = AsyncQueue::new(&scheduler);
///
/// let consumer = queue.clone();
/// scheduler.new_task(async move {
///     while let Ok(item) = consumer.get().await {
///         println!("consumed {item}");
///     }
/// });
///
/// queue.put(1)?;
/// queue.close();
/// ```
pub struct AsyncQueue<T> {
    shared: Rc<Shared<T>>,
}

struct Shared<T> {
    scheduler: Scheduler,
    state: RefCell<State<T>>,
}

struct State<T> {
    items: VecDeque<T>,

    /// Consumers parked until an item arrives or the queue closes, oldest
    /// first.
    waiting: VecDeque<Work>,

    closed: bool,
}

impl<T> State<T> {
    /// Pops the next waiter if it has something to observe: either an
    /// item that is still buffered or the closure of the queue.
    fn next_waiter(&mut self) -> Option<Work> {
        if self.items.is_empty() && !self.closed {
            return None;
        }

        self.waiting.pop_front()
    }
}

impl<T> AsyncQueue<T> {
    /// Creates an empty, open queue whose waiters are resumed on
    /// `scheduler`.
    pub fn new(scheduler: &Scheduler) -> Self {
        let state = State {
            items: VecDeque::new(),
            waiting: VecDeque::new(),
            closed: false,
        };

        Self {
            shared: Rc::new(Shared {
                scheduler: scheduler.clone(),
                state: RefCell::new(state),
            }),
        }
    }

    /// Appends `item` and wakes the oldest waiting consumer, if any.
    ///
    /// # Errors
    ///
    /// Returns [`QueueClosed`] if the queue has been closed; `item` is
    /// dropped.
    pub fn put(&self, item: T) -> Result<(), QueueClosed> {
        let waiter = {
            let mut state = self.shared.state.borrow_mut();

            if state.closed {
                return Err(QueueClosed);
            }

            state.items.push_back(item);
            state.waiting.pop_front()
        };

        if let Some(work) = waiter {
            self.shared.scheduler.push_ready(work);
        }

        Ok(())
    }

    /// Removes and returns the oldest item, suspending the current task
    /// while the queue is empty.
    ///
    /// # Errors
    ///
    /// Returns [`QueueClosed`] once the queue is closed and every buffered
    /// item has been taken. A consumer blocked here when the queue closes
    /// is woken and fails immediately.
    ///
    /// # Panics
    ///
    /// Panics if the queue is empty and this is awaited outside a task.
    pub async fn get(&self) -> Result<T, QueueClosed> {
        loop {
            {
                let mut state = self.shared.state.borrow_mut();

                if let Some(item) = state.items.pop_front() {
                    let next = state.next_waiter();
                    drop(state);

                    self.relay(next);
                    return Ok(item);
                }

                if state.closed {
                    let next = state.next_waiter();
                    drop(state);

                    self.relay(next);
                    return Err(QueueClosed);
                }

                let task = self.shared.scheduler.suspend_current("AsyncQueue::get");
                state.waiting.push_back(Work::Resumable(task));
            }

            switch().await;
        }
    }

    /// Delivers the next item, or the closure of the queue, to `callback`.
    ///
    /// This is the callback-style counterpart of [`get`](Self::get). The
    /// callback runs immediately when an item is available or the queue is
    /// closed and drained. Otherwise a retry step is parked among the
    /// waiters and the callback runs once the queue can answer.
    pub fn get_then<F>(&self, callback: F)
    where
        F: FnOnce(Result<T, QueueClosed>) + 'static,
        T: 'static,
    {
        let (result, next) = {
            let mut state = self.shared.state.borrow_mut();

            if let Some(item) = state.items.pop_front() {
                (Ok(item), state.next_waiter())
            } else if state.closed {
                (Err(QueueClosed), state.next_waiter())
            } else {
                let queue = self.clone();
                let retry = move || queue.get_then(callback);

                state.waiting.push_back(Work::Plain(Box::new(retry)));
                return;
            }
        };

        self.relay(next);
        callback(result);
    }

    /// Closes the queue.
    ///
    /// Further [`put`](Self::put) calls fail. If consumers are waiting and
    /// nothing is buffered, one of them is woken to observe the closure; it
    /// passes the news on to the next waiter when it leaves. Closing an
    /// already closed queue does nothing.
    pub fn close(&self) {
        let next = {
            let mut state = self.shared.state.borrow_mut();

            if state.closed {
                return;
            }

            state.closed = true;
            state.next_waiter()
        };

        tracing::debug!(waiters_woken = next.is_some(), "queue closed");
        self.relay(next);
    }

    /// Returns `true` once [`close`](Self::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.shared.state.borrow().closed
    }

    /// Number of buffered items.
    pub fn len(&self) -> usize {
        self.shared.state.borrow().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shared.state.borrow().items.is_empty()
    }

    fn relay(&self, waiter: Option<Work>) {
        if let Some(work) = waiter {
            self.shared.scheduler.push_ready(work);
        }
    }
}

impl<T> Clone for AsyncQueue<T> {
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
        }
    }
}

impl<T> fmt::Debug for AsyncQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.shared.state.borrow();

        f.debug_struct("AsyncQueue")
            .field("items", &state.items.len())
            .field("waiting", &state.waiting.len())
            .field("closed", &state.closed)
            .finish()
    }
}
