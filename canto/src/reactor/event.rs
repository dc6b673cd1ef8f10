use std::os::fd::RawFd;

/// A readiness event reported by the poller.
///
/// An `Event` is produced once per descriptor per wait call and consumed by
/// the scheduler, which moves the matching waiters to the ready queue.
/// Error and hang-up conditions are reported as both readable and writable
/// so that whichever side is waiting gets to observe the failure.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Event {
    /// Descriptor the event refers to.
    pub(crate) fd: RawFd,

    /// The descriptor can be read without blocking.
    pub(crate) readable: bool,

    /// The descriptor can be written without blocking.
    pub(crate) writable: bool,
}
