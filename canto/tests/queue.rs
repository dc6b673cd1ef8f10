mod common;

use canto::sync::AsyncQueue;
use canto::{QueueClosed, Scheduler, yield_now};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

#[test]
fn test_items_come_out_in_fifo_order_then_closed() {
    common::init_tracing();
    let scheduler = Scheduler::new();
    let queue = AsyncQueue::new(&scheduler);

    for n in 1..=3 {
        queue.put(n).unwrap();
    }
    queue.close();
    assert_eq!(queue.len(), 3);

    let results = Rc::new(RefCell::new(Vec::new()));

    let output = results.clone();
    scheduler.new_task(async move {
        for _ in 0..4 {
            output.borrow_mut().push(queue.get().await);
        }
    });

    scheduler.run().unwrap();

    assert_eq!(
        *results.borrow(),
        vec![Ok(1), Ok(2), Ok(3), Err(QueueClosed)]
    );
}

#[test]
fn test_put_after_close_fails() {
    let scheduler = Scheduler::new();
    let queue = AsyncQueue::new(&scheduler);

    queue.close();

    assert_eq!(queue.put("late"), Err(QueueClosed));
    assert!(queue.is_empty());
}

#[test]
fn test_close_is_idempotent() {
    let scheduler = Scheduler::new();
    let queue: AsyncQueue<u8> = AsyncQueue::new(&scheduler);

    queue.close();
    queue.close();

    assert!(queue.is_closed());
    assert!(scheduler.is_idle());
}

#[test]
fn test_blocked_consumer_wakes_on_put() {
    common::init_tracing();
    let scheduler = Scheduler::new();
    let queue = AsyncQueue::new(&scheduler);
    let received = Rc::new(RefCell::new(None));

    let consumer = queue.clone();
    let output = received.clone();
    scheduler.new_task(async move {
        *output.borrow_mut() = Some(consumer.get().await);
    });

    scheduler.schedule_after(Duration::from_millis(10), move || {
        queue.put("hello").unwrap();
    });

    scheduler.run().unwrap();

    assert_eq!(*received.borrow(), Some(Ok("hello")));
}

#[test]
fn test_close_wakes_blocked_consumer_in_same_pass() {
    common::init_tracing();
    let scheduler = Scheduler::new();
    let queue: AsyncQueue<u32> = AsyncQueue::new(&scheduler);
    let log = Rc::new(RefCell::new(Vec::new()));

    let consumer = queue.clone();
    let task_log = log.clone();
    scheduler.new_task(async move {
        let result = consumer.get().await;
        task_log.borrow_mut().push(format!("consumer {result:?}"));
    });

    let closer_log = log.clone();
    let sched = scheduler.clone();
    scheduler.schedule_now(move || {
        queue.close();
        closer_log.borrow_mut().push("closed".to_string());

        // Queued after the close, so it must observe the consumer's exit.
        let later = closer_log.clone();
        sched.schedule_now(move || later.borrow_mut().push("after".to_string()));
    });

    scheduler.run().unwrap();

    assert_eq!(
        *log.borrow(),
        vec!["closed", "consumer Err(QueueClosed)", "after"]
    );
}

#[test]
fn test_close_fails_every_waiting_consumer() {
    common::init_tracing();
    let scheduler = Scheduler::new();
    let queue: AsyncQueue<u32> = AsyncQueue::new(&scheduler);
    let failures = Rc::new(RefCell::new(0));

    for _ in 0..3 {
        let consumer = queue.clone();
        let failures = failures.clone();
        scheduler.new_task(async move {
            if consumer.get().await == Err(QueueClosed) {
                *failures.borrow_mut() += 1;
            }
        });
    }

    scheduler.schedule_after(Duration::from_millis(5), move || queue.close());
    scheduler.run().unwrap();

    assert_eq!(*failures.borrow(), 3);
}

#[test]
fn test_close_with_buffered_items_drains_before_failing() {
    common::init_tracing();
    let scheduler = Scheduler::new();
    let queue = AsyncQueue::new(&scheduler);
    let results = Rc::new(RefCell::new(Vec::new()));

    for _ in 0..3 {
        let consumer = queue.clone();
        let results = results.clone();
        scheduler.new_task(async move {
            let result = consumer.get().await;
            results.borrow_mut().push(result);
        });
    }

    scheduler.schedule_after(Duration::from_millis(5), move || {
        queue.put('x').unwrap();
        queue.put('y').unwrap();
        queue.close();
    });

    scheduler.run().unwrap();

    assert_eq!(
        *results.borrow(),
        vec![Ok('x'), Ok('y'), Err(QueueClosed)]
    );
}

#[test]
fn test_woken_consumer_retries_when_item_was_taken() {
    common::init_tracing();
    let scheduler = Scheduler::new();
    let queue = AsyncQueue::new(&scheduler);
    let log = Rc::new(RefCell::new(Vec::new()));

    let consumer = queue.clone();
    let first_log = log.clone();
    scheduler.new_task(async move {
        let result = consumer.get().await;
        first_log.borrow_mut().push(("first", result));
    });

    let sched = scheduler.clone();
    let second_log = log.clone();
    scheduler.schedule_now(move || {
        // The second consumer is ready before the woken first one, so it
        // takes the item and the first one has to wait again.
        let consumer = queue.clone();
        sched.new_task(async move {
            let result = consumer.get().await;
            second_log.borrow_mut().push(("second", result));
        });

        queue.put(7).unwrap();

        let closer = queue.clone();
        sched.schedule_now(move || closer.close());
    });

    scheduler.run().unwrap();

    assert_eq!(
        *log.borrow(),
        vec![("second", Ok(7)), ("first", Err(QueueClosed))]
    );
}

#[test]
fn test_producer_consumer_delivers_every_item() {
    common::init_tracing();
    let scheduler = Scheduler::new();
    let queue = AsyncQueue::new(&scheduler);
    let consumed = Rc::new(RefCell::new(Vec::new()));

    let producer = queue.clone();
    let sched = scheduler.clone();
    scheduler.new_task(async move {
        for n in 0..20 {
            producer.put(n).unwrap();

            if n % 3 == 0 {
                sched.sleep(Duration::from_millis(1)).await;
            } else {
                yield_now().await;
            }
        }

        producer.close();
    });

    for _ in 0..2 {
        let consumer = queue.clone();
        let consumed = consumed.clone();
        scheduler.new_task(async move {
            while let Ok(item) = consumer.get().await {
                consumed.borrow_mut().push(item);
            }
        });
    }

    scheduler.run().unwrap();

    let mut consumed = consumed.borrow().clone();
    consumed.sort();
    assert_eq!(consumed, (0..20).collect::<Vec<_>>());
}

#[test]
fn test_single_consumer_sees_items_in_order_then_one_closure() {
    common::init_tracing();
    let scheduler = Scheduler::new();
    let queue = AsyncQueue::new(&scheduler);
    let log = Rc::new(RefCell::new(Vec::new()));

    let producer = queue.clone();
    let sched = scheduler.clone();
    scheduler.new_task(async move {
        for n in 0..10 {
            producer.put(n).unwrap();
            sched.sleep(Duration::from_millis(1)).await;
        }
        producer.close();
    });

    let output = log.clone();
    scheduler.new_task(async move {
        loop {
            let result = queue.get().await;
            let done = result.is_err();
            output.borrow_mut().push(result);

            if done {
                break;
            }
        }
    });

    scheduler.run().unwrap();

    let mut expected: Vec<_> = (0..10).map(Ok).collect();
    expected.push(Err(QueueClosed));
    assert_eq!(*log.borrow(), expected);
}

fn consume_with_callbacks(queue: AsyncQueue<u32>, log: Rc<RefCell<Vec<Result<u32, QueueClosed>>>>) {
    let next = queue.clone();
    queue.get_then(move |result| {
        let done = result.is_err();
        log.borrow_mut().push(result);

        if !done {
            consume_with_callbacks(next, log);
        }
    });
}

#[test]
fn test_get_then_delivers_items_and_closure() {
    common::init_tracing();
    let scheduler = Scheduler::new();
    let queue = AsyncQueue::new(&scheduler);
    let log = Rc::new(RefCell::new(Vec::new()));

    queue.put(1).unwrap();
    consume_with_callbacks(queue.clone(), log.clone());
    assert_eq!(*log.borrow(), vec![Ok(1)]);

    scheduler.schedule_after(Duration::from_millis(5), move || {
        queue.put(2).unwrap();
        queue.put(3).unwrap();
        queue.close();
    });

    scheduler.run().unwrap();

    assert_eq!(
        *log.borrow(),
        vec![Ok(1), Ok(2), Ok(3), Err(QueueClosed)]
    );
}

#[test]
fn test_callback_and_task_consumers_share_a_queue() {
    common::init_tracing();
    let scheduler = Scheduler::new();
    let queue = AsyncQueue::new(&scheduler);
    let by_callback = Rc::new(RefCell::new(Vec::new()));
    let by_task = Rc::new(RefCell::new(Vec::new()));

    consume_with_callbacks(queue.clone(), by_callback.clone());

    let consumer = queue.clone();
    let task_results = by_task.clone();
    scheduler.new_task(async move {
        loop {
            let result = consumer.get().await;
            let done = result.is_err();
            task_results.borrow_mut().push(result);

            if done {
                break;
            }
        }
    });

    let sched = scheduler.clone();
    scheduler.new_task(async move {
        for n in 0..6 {
            queue.put(n).unwrap();
            sched.sleep(Duration::from_millis(1)).await;
        }
        queue.close();
    });

    scheduler.run().unwrap();

    let by_callback = by_callback.borrow();
    let by_task = by_task.borrow();

    assert_eq!(by_callback.last(), Some(&Err(QueueClosed)));
    assert_eq!(by_task.last(), Some(&Err(QueueClosed)));

    let mut items: Vec<u32> = by_callback
        .iter()
        .chain(by_task.iter())
        .filter_map(|r| r.ok())
        .collect();
    items.sort();
    assert_eq!(items, (0..6).collect::<Vec<_>>());
}
