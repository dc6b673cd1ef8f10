//! Error types surfaced by the runtime.
//!
//! Two kinds of failure exist:
//! - [`QueueClosed`] is ordinary control flow: consumers use it to learn that
//!   no more items will ever arrive.
//! - [`RuntimeError`] is returned by [`Scheduler::run`](crate::Scheduler::run)
//!   when the host readiness primitive itself fails.
//!
//! A panic raised inside a task is neither: it unwinds straight out of
//! `run()` and takes the runtime down with it.

use std::io;

use thiserror::Error;

/// Returned by [`AsyncQueue::put`](crate::sync::AsyncQueue::put) on a closed
/// queue, and by [`AsyncQueue::get`](crate::sync::AsyncQueue::get) once the
/// queue is closed and drained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("queue is closed")]
pub struct QueueClosed;

/// Fatal failures of the scheduler loop.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// The `poll(2)` call used to wait for descriptor readiness failed.
    #[error("readiness wait failed: {0}")]
    Poll(#[from] io::Error),
}
