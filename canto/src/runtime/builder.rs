use super::scheduler::Scheduler;

/// Builder for configuring and creating a scheduler.
///
/// `SchedulerBuilder` allows customizing scheduler parameters before
/// constructing it. None of the options change scheduling semantics; they
/// only size internal buffers and label diagnostics.
///
/// # Examples
///
/// ```rust,ignore
/// let scheduler = SchedulerBuilder::new()
///     .name("echo")
///     .event_capacity(256)
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct SchedulerBuilder {
    /// Label recorded on the scheduler's tracing span.
    pub(crate) name: String,

    /// Initial capacity of the ready queue.
    pub(crate) ready_capacity: usize,

    /// Initial capacity of the poll descriptor and event buffers.
    pub(crate) event_capacity: usize,
}

impl SchedulerBuilder {
    /// Creates a new `SchedulerBuilder` with default configuration.
    pub fn new() -> Self {
        Self {
            name: String::from("canto"),
            ready_capacity: 64,
            event_capacity: 64,
        }
    }

    /// Sets the name used to label the scheduler's tracing span.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the initial capacity of the ready queue.
    pub fn ready_capacity(mut self, n: usize) -> Self {
        self.ready_capacity = n;
        self
    }

    /// Sets the initial capacity of the readiness buffers.
    ///
    /// # Panics
    ///
    /// Panics if `n == 0`.
    pub fn event_capacity(mut self, n: usize) -> Self {
        assert!(n > 0, "event_capacity must be > 0");

        self.event_capacity = n;
        self
    }

    /// Builds the scheduler with the configured options.
    pub fn build(self) -> Scheduler {
        Scheduler::from_builder(self)
    }
}

impl Default for SchedulerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
