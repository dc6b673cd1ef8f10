use crate::reactor::event::Event;
use crate::reactor::poller::common::Interest;
use crate::runtime::task::Work;

use std::collections::HashMap;
use std::os::fd::RawFd;

/// Per-descriptor record of the work waiting for readiness.
///
/// Read and write interest are tracked in separate tables, each holding at
/// most one waiter per descriptor. Registering a second waiter for the same
/// descriptor and direction replaces the first one; the displaced work is
/// handed back to the caller, which only logs it. Avoiding that situation
/// is the caller's job.
pub(crate) struct ReadinessRegistry {
    readers: HashMap<RawFd, Work>,
    writers: HashMap<RawFd, Work>,
}

impl ReadinessRegistry {
    pub(crate) fn new() -> Self {
        Self {
            readers: HashMap::new(),
            writers: HashMap::new(),
        }
    }

    /// Records `work` as the read waiter of `fd`, returning any waiter it
    /// replaced.
    pub(crate) fn register_read(&mut self, fd: RawFd, work: Work) -> Option<Work> {
        self.readers.insert(fd, work)
    }

    /// Records `work` as the write waiter of `fd`, returning any waiter it
    /// replaced.
    pub(crate) fn register_write(&mut self, fd: RawFd, work: Work) -> Option<Work> {
        self.writers.insert(fd, work)
    }

    /// Snapshot of every descriptor and direction currently waited on.
    pub(crate) fn interests(&self) -> Vec<(RawFd, Interest)> {
        let readers = self.readers.keys().map(|&fd| (fd, Interest::READABLE));
        let writers = self.writers.keys().map(|&fd| (fd, Interest::WRITABLE));

        readers.chain(writers).collect()
    }

    /// Removes and returns the waiters that `event` makes runnable.
    ///
    /// A direction that was reported but has no waiter is ignored, as is a
    /// waiter whose direction was not reported.
    pub(crate) fn take_ready(&mut self, event: &Event) -> impl Iterator<Item = Work> + use<> {
        let reader = event
            .readable
            .then(|| self.readers.remove(&event.fd))
            .flatten();

        let writer = event
            .writable
            .then(|| self.writers.remove(&event.fd))
            .flatten();

        reader.into_iter().chain(writer)
    }

    pub(crate) fn readers(&self) -> usize {
        self.readers.len()
    }

    pub(crate) fn writers(&self) -> usize {
        self.writers.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.readers.is_empty() && self.writers.is_empty()
    }
}
