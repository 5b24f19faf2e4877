//! Deterministic timer host for single-threaded tests.

use std::cell::{Cell, RefCell};
use std::time::Duration;

use kea_foundation::lazy::TimerHost;
use web_time::Instant;

struct PendingTimer {
    fire_at: Instant,
    seq: u64,
    callback: Box<dyn FnOnce()>,
}

/// A [`TimerHost`] driven by an explicit virtual clock.
///
/// Nothing fires on its own; tests call [`advance`](Self::advance) to
/// move time forward and run whatever came due, in deadline order with
/// insertion order breaking ties — the same ordering a real event loop
/// gives equal-delay one-shot timers. Callbacks may schedule further
/// timers; those fire in the same pass if they are already due.
pub struct ManualTimers {
    now: Cell<Instant>,
    queue: RefCell<Vec<PendingTimer>>,
    next_seq: Cell<u64>,
}

impl Default for ManualTimers {
    fn default() -> Self {
        Self {
            now: Cell::new(Instant::now()),
            queue: RefCell::new(Vec::new()),
            next_seq: Cell::new(0),
        }
    }
}

impl ManualTimers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of timers not yet fired.
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Moves the virtual clock forward by `by` and fires everything
    /// that came due.
    pub fn advance(&self, by: Duration) {
        let target = self.now.get() + by;
        loop {
            let due = {
                let mut queue = self.queue.borrow_mut();
                let next = queue
                    .iter()
                    .enumerate()
                    .filter(|(_, timer)| timer.fire_at <= target)
                    .min_by_key(|(_, timer)| (timer.fire_at, timer.seq))
                    .map(|(index, _)| index);
                next.map(|index| queue.remove(index))
            };
            let Some(timer) = due else {
                break;
            };
            if timer.fire_at > self.now.get() {
                self.now.set(timer.fire_at);
            }
            (timer.callback)();
        }
        self.now.set(target);
    }
}

impl TimerHost for ManualTimers {
    fn schedule_once(&self, delay: Duration, callback: Box<dyn FnOnce()>) {
        let seq = self.next_seq.get();
        self.next_seq.set(seq + 1);
        self.queue.borrow_mut().push(PendingTimer {
            fire_at: self.now.get() + delay,
            seq,
            callback,
        });
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    use kea_foundation::lazy::TimerHost;

    use super::ManualTimers;

    #[test]
    fn test_fires_in_deadline_order() {
        let timers = ManualTimers::new();
        let order: Rc<RefCell<Vec<u32>>> = Rc::new(RefCell::new(Vec::new()));
        for (delay_ms, tag) in [(30u64, 3u32), (10, 1), (20, 2)] {
            let order = Rc::clone(&order);
            timers.schedule_once(
                Duration::from_millis(delay_ms),
                Box::new(move || order.borrow_mut().push(tag)),
            );
        }
        timers.advance(Duration::from_millis(15));
        assert_eq!(*order.borrow(), vec![1]);
        assert_eq!(timers.pending(), 2);

        timers.advance(Duration::from_millis(100));
        assert_eq!(*order.borrow(), vec![1, 2, 3]);
        assert_eq!(timers.pending(), 0);
    }

    #[test]
    fn test_equal_deadlines_keep_insertion_order() {
        let timers = ManualTimers::new();
        let order: Rc<RefCell<Vec<u32>>> = Rc::new(RefCell::new(Vec::new()));
        for tag in [1u32, 2, 3] {
            let order = Rc::clone(&order);
            timers.schedule_once(
                Duration::from_millis(10),
                Box::new(move || order.borrow_mut().push(tag)),
            );
        }
        timers.advance(Duration::from_millis(10));
        assert_eq!(*order.borrow(), vec![1, 2, 3]);
    }

    #[test]
    fn test_callback_may_schedule_followup() {
        let timers = Rc::new(ManualTimers::new());
        let fired: Rc<RefCell<Vec<&'static str>>> = Rc::new(RefCell::new(Vec::new()));
        let handle = Rc::clone(&timers);
        let log = Rc::clone(&fired);
        timers.schedule_once(
            Duration::from_millis(5),
            Box::new(move || {
                log.borrow_mut().push("first");
                let log = Rc::clone(&log);
                // Scheduled while the clock sits at 5ms; 7ms is still
                // inside the same 20ms advance.
                handle.schedule_once(
                    Duration::from_millis(2),
                    Box::new(move || log.borrow_mut().push("second")),
                );
            }),
        );
        timers.advance(Duration::from_millis(20));
        assert_eq!(*fired.borrow(), vec!["first", "second"]);
    }
}
