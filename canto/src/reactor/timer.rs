use crate::runtime::task::Work;

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::Instant;

/// An entry in the deadline queue.
///
/// `DeadlineEntry` represents a scheduled wake-up at or after a specific
/// deadline. Entries are ordered by deadline first and by insertion
/// sequence second, which keeps equal deadlines FIFO and makes the order
/// total even though the stored work has no natural ordering.
pub(crate) struct DeadlineEntry {
    /// The time at which the entry becomes due.
    pub(crate) deadline: Instant,

    /// Monotonic insertion number used to break deadline ties.
    pub(crate) sequence: u64,

    /// Work moved to the ready queue once the deadline has passed.
    pub(crate) work: Work,
}

impl Eq for DeadlineEntry {}

impl PartialEq for DeadlineEntry {
    fn eq(&self, other: &Self) -> bool {
        self.deadline == other.deadline && self.sequence == other.sequence
    }
}

impl Ord for DeadlineEntry {
    /// Orders entries by `(deadline, sequence)`.
    ///
    /// The comparison is **reversed** so that a `BinaryHeap<DeadlineEntry>`
    /// behaves as a min-heap and pops the earliest entry first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .deadline
            .cmp(&self.deadline)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for DeadlineEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Pending timer entries, earliest first.
pub(crate) struct DeadlineQueue {
    entries: BinaryHeap<DeadlineEntry>,
    sequence: u64,
}

impl DeadlineQueue {
    pub(crate) fn new() -> Self {
        Self {
            entries: BinaryHeap::new(),
            sequence: 0,
        }
    }

    /// Inserts `work` to become due at `deadline`.
    pub(crate) fn push(&mut self, deadline: Instant, work: Work) {
        self.sequence += 1;

        self.entries.push(DeadlineEntry {
            deadline,
            sequence: self.sequence,
            work,
        });
    }

    /// Returns the earliest pending deadline, if any.
    pub(crate) fn next_deadline(&self) -> Option<Instant> {
        self.entries.peek().map(|entry| entry.deadline)
    }

    /// Pops the earliest entry if its deadline is at or before `now`.
    pub(crate) fn pop_expired(&mut self, now: Instant) -> Option<Work> {
        if self.entries.peek()?.deadline > now {
            return None;
        }

        self.entries.pop().map(|entry| entry.work)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::DeadlineQueue;
    use crate::runtime::task::Work;

    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::{Duration, Instant};

    fn record(log: &Rc<RefCell<Vec<&'static str>>>, label: &'static str) -> Work {
        let log = log.clone();
        Work::Plain(Box::new(move || log.borrow_mut().push(label)))
    }

    fn drain(queue: &mut DeadlineQueue, now: Instant) {
        while let Some(work) = queue.pop_expired(now) {
            match work {
                Work::Plain(step) => step(),
                Work::Resumable(_) => unreachable!("only plain work is queued here"),
            }
        }
    }

    #[test]
    fn test_pops_in_deadline_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut queue = DeadlineQueue::new();
        let base = Instant::now();

        queue.push(base + Duration::from_millis(30), record(&log, "c"));
        queue.push(base + Duration::from_millis(10), record(&log, "a"));
        queue.push(base + Duration::from_millis(20), record(&log, "b"));

        assert_eq!(queue.next_deadline(), Some(base + Duration::from_millis(10)));

        drain(&mut queue, base + Duration::from_millis(30));

        assert_eq!(*log.borrow(), vec!["a", "b", "c"]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_equal_deadlines_keep_insertion_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut queue = DeadlineQueue::new();
        let deadline = Instant::now();

        for label in ["first", "second", "third", "fourth"] {
            queue.push(deadline, record(&log, label));
        }

        drain(&mut queue, deadline);

        assert_eq!(*log.borrow(), vec!["first", "second", "third", "fourth"]);
    }

    #[test]
    fn test_future_entries_stay_queued() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut queue = DeadlineQueue::new();
        let base = Instant::now();

        queue.push(base, record(&log, "due"));
        queue.push(base + Duration::from_secs(60), record(&log, "later"));

        drain(&mut queue, base);

        assert_eq!(*log.borrow(), vec!["due"]);
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.next_deadline(), Some(base + Duration::from_secs(60)));
    }
}
