//! Timer suspension points.
//!
//! This module extends [`Scheduler`](crate::Scheduler) with:
//! - [`sleep`](crate::Scheduler::sleep) for suspending a task for a duration,
//! - [`sleep_until`](crate::Scheduler::sleep_until) for suspending it until a
//!   deadline.

mod sleep;
