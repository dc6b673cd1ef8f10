use super::builder::SchedulerBuilder;
use super::task::{JoinHandle, Task, TaskId, Work, handle::JoinState};
use crate::error::RuntimeError;
use crate::reactor::event::Event;
use crate::reactor::poller::Poller;
use crate::reactor::registry::ReadinessRegistry;
use crate::reactor::timer::DeadlineQueue;

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::future::Future;
use std::os::fd::RawFd;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// State owned by a scheduler and shared by all of its handles.
struct Core {
    name: String,

    /// Work eligible to run, in FIFO order.
    ready: RefCell<VecDeque<Work>>,

    /// Work waiting for a deadline.
    timers: RefCell<DeadlineQueue>,

    /// Work waiting for descriptor readiness.
    registry: RefCell<ReadinessRegistry>,

    poller: RefCell<Poller>,

    /// Reusable buffer for readiness events.
    events: RefCell<Vec<Event>>,

    /// The task being resumed right now, if any.
    ///
    /// Suspension helpers take the task out of here to park it on a
    /// resource; a task that is still here when it suspends gets re-queued.
    current: RefCell<Option<Rc<Task>>>,

    next_task: Cell<TaskId>,
}

/// A single-threaded cooperative scheduler.
///
/// `Scheduler` is a cheap handle: clones refer to the same ready queue,
/// deadline queue and readiness registry. Tasks typically capture a clone
/// to reach the suspension helpers ([`sleep`](Self::sleep),
/// [`receive`](Self::receive), ...).
///
/// Nothing runs until [`run`](Self::run) is called. The scheduler is not
/// `Send`; all work executes on the thread that calls `run`.
///
/// # Examples
///
/// ```rust,ignore
/// let scheduler = Scheduler::new();
///
/// let sched = scheduler.clone();
/// scheduler.new_task(async move {
///     sched.sleep(Duration::from_millis(10)).await;
///     println!("slept");
/// });
///
/// scheduler.schedule_now(|| println!("callback"));
/// scheduler.run()?;
/// ```
#[derive(Clone)]
pub struct Scheduler {
    core: Rc<Core>,
}

impl Scheduler {
    /// Creates a scheduler with the default configuration.
    pub fn new() -> Self {
        SchedulerBuilder::new().build()
    }

    /// Returns a builder to configure a new scheduler.
    pub fn builder() -> SchedulerBuilder {
        SchedulerBuilder::new()
    }

    pub(crate) fn from_builder(builder: SchedulerBuilder) -> Self {
        let core = Core {
            name: builder.name,
            ready: RefCell::new(VecDeque::with_capacity(builder.ready_capacity)),
            timers: RefCell::new(DeadlineQueue::new()),
            registry: RefCell::new(ReadinessRegistry::new()),
            poller: RefCell::new(Poller::with_capacity(builder.event_capacity)),
            events: RefCell::new(Vec::with_capacity(builder.event_capacity)),
            current: RefCell::new(None),
            next_task: Cell::new(0),
        };

        Self {
            core: Rc::new(core),
        }
    }

    /// Name given to this scheduler at construction.
    pub fn name(&self) -> &str {
        &self.core.name
    }

    /// Appends `work` to the ready queue.
    pub fn schedule_now<F>(&self, work: F)
    where
        F: FnOnce() + 'static,
    {
        self.push_ready(Work::Plain(Box::new(work)));
    }

    /// Runs `work` once `delay` has elapsed.
    ///
    /// A zero delay runs `work` on the next loop iteration, after whatever
    /// is ready now.
    pub fn schedule_after<F>(&self, delay: Duration, work: F)
    where
        F: FnOnce() + 'static,
    {
        self.schedule_at(Instant::now() + delay, work);
    }

    /// Runs `work` once `deadline` has passed.
    ///
    /// A deadline in the past counts as already expired.
    pub fn schedule_at<F>(&self, deadline: Instant, work: F)
    where
        F: FnOnce() + 'static,
    {
        self.push_timer(deadline, Work::Plain(Box::new(work)));
    }

    /// Runs `work` once `fd` is readable.
    ///
    /// Only one waiter per descriptor and direction is supported; a second
    /// registration silently replaces the first.
    pub fn wait_readable<F>(&self, fd: RawFd, work: F)
    where
        F: FnOnce() + 'static,
    {
        self.register_read(fd, Work::Plain(Box::new(work)));
    }

    /// Runs `work` once `fd` is writable.
    ///
    /// Only one waiter per descriptor and direction is supported; a second
    /// registration silently replaces the first.
    pub fn wait_writable<F>(&self, fd: RawFd, work: F)
    where
        F: FnOnce() + 'static,
    {
        self.register_write(fd, Work::Plain(Box::new(work)));
    }

    /// Spawns `future` as a task and queues it to run.
    ///
    /// The returned [`JoinHandle`] resolves to the future's output when
    /// awaited from another task.
    pub fn new_task<F>(&self, future: F) -> JoinHandle<F::Output>
    where
        F: Future + 'static,
        F::Output: 'static,
    {
        let id = self.core.next_task.get();
        self.core.next_task.set(id + 1);

        let state = Rc::new(JoinState::new());
        let completion = state.clone();
        let scheduler = self.clone();

        let task = Task::new(id, async move {
            let output = future.await;
            completion.complete(output, &scheduler);
        });

        tracing::debug!(task = id, "task spawned");
        self.push_ready(Work::Resumable(Rc::new(task)));

        JoinHandle::new(state, self.clone())
    }

    /// Returns `true` when no work is ready, no timer is pending and no
    /// descriptor is waited on.
    ///
    /// Tasks parked on an [`AsyncQueue`](crate::sync::AsyncQueue) or a
    /// [`JoinHandle`] are not tracked here.
    pub fn is_idle(&self) -> bool {
        self.core.ready.borrow().is_empty()
            && self.core.timers.borrow().is_empty()
            && self.core.registry.borrow().is_empty()
    }

    /// Runs the scheduler until it is idle.
    ///
    /// Each iteration:
    /// 1. if nothing is ready, waits for descriptor readiness until the
    ///    next deadline (or indefinitely without timers),
    /// 2. moves expired timers to the ready queue,
    /// 3. drains the ready queue, including work queued during the drain.
    ///
    /// A panic raised by a unit of work is not caught and unwinds out of
    /// this call.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::Poll`] if waiting for readiness fails.
    pub fn run(&self) -> Result<(), RuntimeError> {
        let span = tracing::debug_span!("scheduler", name = %self.core.name);
        let _entered = span.enter();

        tracing::debug!("scheduler started");

        while !self.is_idle() {
            tracing::trace!(
                ready = self.core.ready.borrow().len(),
                timers = self.core.timers.borrow().len(),
                readers = self.core.registry.borrow().readers(),
                writers = self.core.registry.borrow().writers(),
                "scheduler iteration"
            );

            if self.core.ready.borrow().is_empty() {
                self.wait_for_readiness()?;
            }

            self.admit_expired_timers();
            self.drain_ready();
        }

        tracing::debug!("scheduler exhausted");
        Ok(())
    }

    /// Blocks in the poller until a descriptor is ready or the next
    /// deadline is due, then moves the woken waiters to the ready queue.
    fn wait_for_readiness(&self) -> Result<(), RuntimeError> {
        let timeout = self
            .core
            .timers
            .borrow()
            .next_deadline()
            .map(|deadline| deadline.saturating_duration_since(Instant::now()));

        let interests = self.core.registry.borrow().interests();
        tracing::trace!(?timeout, descriptors = interests.len(), "waiting for readiness");

        let mut events = self.core.events.take();
        self.core
            .poller
            .borrow_mut()
            .wait(interests, timeout, &mut events)?;

        for event in &events {
            tracing::trace!(
                fd = event.fd,
                readable = event.readable,
                writable = event.writable,
                "descriptor ready"
            );

            let woken = self.core.registry.borrow_mut().take_ready(event);
            self.core.ready.borrow_mut().extend(woken);
        }

        *self.core.events.borrow_mut() = events;
        Ok(())
    }

    fn admit_expired_timers(&self) {
        let now = Instant::now();

        loop {
            let work = self.core.timers.borrow_mut().pop_expired(now);
            let Some(work) = work else {
                break;
            };

            self.push_ready(work);
        }
    }

    fn drain_ready(&self) {
        loop {
            let work = self.core.ready.borrow_mut().pop_front();
            let Some(work) = work else {
                break;
            };

            work.execute(self);
        }
    }

    pub(crate) fn push_ready(&self, work: Work) {
        self.core.ready.borrow_mut().push_back(work);
    }

    pub(crate) fn push_timer(&self, deadline: Instant, work: Work) {
        self.core.timers.borrow_mut().push(deadline, work);
    }

    pub(crate) fn register_read(&self, fd: RawFd, work: Work) {
        let displaced = self.core.registry.borrow_mut().register_read(fd, work);

        if displaced.is_some() {
            tracing::warn!(fd, "replaced an existing read waiter");
        }
    }

    pub(crate) fn register_write(&self, fd: RawFd, work: Work) {
        let displaced = self.core.registry.borrow_mut().register_write(fd, work);

        if displaced.is_some() {
            tracing::warn!(fd, "replaced an existing write waiter");
        }
    }

    pub(crate) fn set_current(&self, task: Rc<Task>) {
        *self.core.current.borrow_mut() = Some(task);
    }

    pub(crate) fn take_current(&self) -> Option<Rc<Task>> {
        self.core.current.borrow_mut().take()
    }

    /// Takes the current task out of "current" so that `operation` can park
    /// it on a resource.
    ///
    /// # Panics
    ///
    /// Panics when no task of this scheduler is being resumed, i.e. when a
    /// suspension helper is awaited outside a task.
    pub(crate) fn suspend_current(&self, operation: &'static str) -> Rc<Task> {
        let Some(task) = self.take_current() else {
            panic!("`{operation}` must be awaited from a task running on this scheduler");
        };

        tracing::trace!(task = task.id(), operation, "task suspended");
        task
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheduler")
            .field("name", &self.core.name)
            .field("ready", &self.core.ready.borrow().len())
            .field("timers", &self.core.timers.borrow().len())
            .field("readers", &self.core.registry.borrow().readers())
            .field("writers", &self.core.registry.borrow().writers())
            .finish()
    }
}
