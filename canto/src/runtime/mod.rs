//! Core runtime components.
//!
//! This module contains the scheduler and the task machinery it drives:
//! - the [`Scheduler`] with its ready queue and central loop,
//! - the task adapter and join handles,
//! - the suspension signal and cooperative yielding.
//!
//! Everything here is single-threaded. Handles are `!Send` and all work
//! runs on the thread that calls [`Scheduler::run`].

pub(crate) mod builder;
pub(crate) mod scheduler;
pub(crate) mod yield_now;

pub mod task;

pub use builder::SchedulerBuilder;
pub use scheduler::Scheduler;
