//! # Canto
//!
//! **Canto** is a single-threaded cooperative runtime for the **Nebula**
//! ecosystem.
//!
//! It multiplexes many logically-concurrent units of work (timers, queue
//! waits, socket I/O) onto the one thread that calls [`Scheduler::run`].
//! There is no preemption and no worker pool: work interleaves only at
//! explicit suspension points, so code between two `.await`s runs
//! atomically with respect to every other task.
//!
//! Canto drives two styles of work through the same ready queue:
//!
//! - **Callbacks**: plain closures queued with
//!   [`schedule_now`](Scheduler::schedule_now),
//!   [`schedule_after`](Scheduler::schedule_after) or
//!   [`wait_readable`](Scheduler::wait_readable),
//! - **Tasks**: futures spawned with [`new_task`](Scheduler::new_task) that
//!   suspend on [`sleep`](Scheduler::sleep),
//!   [`receive`](Scheduler::receive), [`send_bytes`](Scheduler::send_bytes),
//!   [`accept`](Scheduler::accept) or an [`AsyncQueue`](sync::AsyncQueue).
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use canto::Scheduler;
//! use canto::sync::AsyncQueue;
//! use std::time::Duration;
//!
//! #[canto::main]
//! async fn main(scheduler: Scheduler) {
//!     let queue = AsyncQueue::new(&scheduler);
//!
//!     let consumer = queue.clone();
//!     scheduler.new_task(async move {
//!         while let Ok(item) = consumer.get().await {
//!             println!("consumed {item}");
//!         }
//!     });
//!
//!     for n in 0..3 {
//!         queue.put(n).unwrap();
//!         scheduler.sleep(Duration::from_millis(100)).await;
//!     }
//!     queue.close();
//! }
//! ```
//!
//! ## Modules
//!
//! - [`net`]: Socket suspension points and TCP wrappers
//! - [`sync`]: The closable async queue
//! - [`task`]: Join handles for spawned tasks
//!
//! ## Limitations
//!
//! - A task that never suspends starves every other unit of work.
//! - A panic inside a task or callback unwinds out of [`Scheduler::run`].
//! - Only one waiter per descriptor and direction is supported.
//! - Unix only: readiness is multiplexed with `poll(2)`.

pub mod error;
mod reactor;
mod runtime;
mod time;

pub mod net;
pub mod sync;

pub use error::{QueueClosed, RuntimeError};
pub use runtime::task;
pub use runtime::yield_now::yield_now;
pub use runtime::{Scheduler, SchedulerBuilder};

pub use canto_macros::*;
