//! Synchronization primitives for tasks.
//!
//! This module provides [`AsyncQueue`], a FIFO channel with a closable end.
//! It is built purely on the scheduler's suspend/resume contract: all of
//! its state is touched from scheduler-driven steps on one thread, so no
//! locking is involved.

mod queue;

pub use queue::AsyncQueue;
