//! Readiness-multiplexing backend.
//!
//! The scheduler hands the poller the full set of descriptors it is waiting
//! on at every idle iteration, so the backend is stateless between calls and
//! maps directly onto `poll(2)`. Registrations are one-shot on the scheduler
//! side, which makes the level-triggered, rebuild-per-call model a natural
//! fit.

pub(crate) mod common;

#[cfg(unix)]
pub(crate) mod unix;

#[cfg(unix)]
pub(crate) use unix as platform;

use common::Interest;
use platform::{READ_READY, WRITE_READY, sys_poll, sys_pollfd};

use crate::reactor::event::Event;

use libc::pollfd;
use std::io;
use std::os::fd::RawFd;
use std::time::Duration;

/// `poll(2)` based poller.
///
/// Owns a reusable `pollfd` buffer so that steady-state waits do not
/// allocate.
pub(crate) struct Poller {
    fds: Vec<pollfd>,
}

impl Poller {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            fds: Vec::with_capacity(capacity),
        }
    }

    /// Waits until one of `interests` becomes ready or `timeout` elapses.
    ///
    /// `events` is cleared and then filled with one entry per ready
    /// descriptor. With no interests this degrades into a plain sleep for
    /// `timeout`, which is how the scheduler waits for its next timer.
    pub(crate) fn wait<I>(
        &mut self,
        interests: I,
        timeout: Option<Duration>,
        events: &mut Vec<Event>,
    ) -> io::Result<()>
    where
        I: IntoIterator<Item = (RawFd, Interest)>,
    {
        self.fds.clear();
        events.clear();

        for (fd, interest) in interests {
            if let Some(entry) = self.fds.iter_mut().find(|entry| entry.fd == fd) {
                let merged = sys_pollfd(fd, interest.read, interest.write);
                entry.events |= merged.events;
            } else {
                self.fds.push(sys_pollfd(fd, interest.read, interest.write));
            }
        }

        let ready = sys_poll(&mut self.fds, timeout)?;
        if ready == 0 {
            return Ok(());
        }

        for entry in &self.fds {
            if entry.revents == 0 {
                continue;
            }

            events.push(Event {
                fd: entry.fd,
                readable: entry.revents & READ_READY != 0,
                writable: entry.revents & WRITE_READY != 0,
            });
        }

        Ok(())
    }
}
