//! Timers and descriptor readiness.
//!
//! This module holds the structures the scheduler consults whenever it has
//! nothing ready to run:
//! - the deadline queue of pending timers,
//! - the registry of work waiting on descriptor readiness,
//! - the `poll(2)` backend that blocks until either becomes due.
//!
//! None of these types run work themselves; they only hand units of work
//! back to the scheduler, which owns the ready queue.

pub(crate) mod event;
pub(crate) mod poller;
pub(crate) mod registry;
pub(crate) mod timer;
