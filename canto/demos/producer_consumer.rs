//! Example: Producer and consumer tasks sharing an `AsyncQueue`
//!
//! The producer closes the queue when it is done; the consumer stops once
//! `get` reports the closure. A callback-style countdown runs alongside on
//! the same scheduler.

use canto::Scheduler;
use canto::sync::AsyncQueue;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

async fn producer(scheduler: Scheduler, queue: AsyncQueue<u32>, count: u32) {
    for n in 0..count {
        println!("Producing {n}");

        if queue.put(n).is_err() {
            break;
        }

        scheduler.sleep(Duration::from_millis(200)).await;
    }

    println!("Producer done");
    queue.close();
}

async fn consumer(queue: AsyncQueue<u32>) {
    while let Ok(item) = queue.get().await {
        println!("Consuming {item}");
    }

    println!("Consumer done");
}

fn countdown(scheduler: Scheduler, n: u32) {
    if n == 0 {
        return;
    }

    println!("Down {n}");

    let next = scheduler.clone();
    scheduler.schedule_after(Duration::from_millis(500), move || countdown(next, n - 1));
}

#[canto::main(name = "producer-consumer")]
async fn main(scheduler: Scheduler) {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let queue = AsyncQueue::new(&scheduler);

    scheduler.new_task(producer(scheduler.clone(), queue.clone(), 10));
    scheduler.new_task(consumer(queue));

    let down = scheduler.clone();
    scheduler.schedule_now(move || countdown(down, 5));
}
