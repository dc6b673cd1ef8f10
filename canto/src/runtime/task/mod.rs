//! Task primitives.
//!
//! This module defines how units of work are represented and driven:
//! - [`Work`], the closed set of things the ready queue can hold,
//! - [`Task`], the adapter that drives a future one step at a time,
//! - [`JoinHandle`], the awaitable result of a spawned task.
//!
//! Tasks are created with [`Scheduler::new_task`](crate::Scheduler::new_task).

pub(crate) mod core;
pub(crate) mod handle;

pub(crate) use core::{Task, TaskId, Work};

pub use handle::JoinHandle;
