//! Example: Callback-style timers on a Canto scheduler
//!
//! Two chains of callbacks share one thread: each callback reschedules its
//! successor with `schedule_after`, so the chains interleave without any
//! blocking sleep.

use canto::Scheduler;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

fn countdown(scheduler: Scheduler, n: u32) {
    if n == 0 {
        return;
    }

    println!("Down {n}");

    let next = scheduler.clone();
    scheduler.schedule_after(Duration::from_millis(400), move || countdown(next, n - 1));
}

fn countup(scheduler: Scheduler, x: u32, stop: u32) {
    if x >= stop {
        return;
    }

    println!("Up {x}");

    let next = scheduler.clone();
    scheduler.schedule_after(Duration::from_millis(100), move || countup(next, x + 1, stop));
}

fn main() -> Result<(), canto::RuntimeError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let scheduler = Scheduler::builder().name("countdown").build();

    let down = scheduler.clone();
    scheduler.schedule_now(move || countdown(down, 5));

    let up = scheduler.clone();
    scheduler.schedule_now(move || countup(up, 0, 20));

    // Returns once both chains have run out.
    scheduler.run()
}
