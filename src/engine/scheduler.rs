//! Deadline-ordered timer queue with cancellable handles.
//!
//! Plays the role of a UI toolkit's `after`/`after_cancel` pair. Tasks are
//! kept in a `BTreeMap` keyed by `(deadline, id)` so ties fire in
//! scheduling order. Cancelling removes the entry immediately; a cancelled
//! task can never come back out of [`TimerQueue::pop_due`].

use std::collections::{BTreeMap, HashMap};
use std::time::{Duration, Instant};

/// Handle returned when a task is scheduled. Used to cancel it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

/// A task whose deadline has passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expired<T> {
    pub handle: TimerHandle,
    /// When the task was due, which may be earlier than the poll time
    pub deadline: Instant,
    pub task: T,
}

pub struct TimerQueue<T> {
    next_id: u64,
    entries: BTreeMap<(Instant, u64), T>,
    /// id -> deadline, for cancellation by handle
    deadlines: HashMap<u64, Instant>,
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            entries: BTreeMap::new(),
            deadlines: HashMap::new(),
        }
    }

    pub fn schedule_at(&mut self, deadline: Instant, task: T) -> TimerHandle {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.insert((deadline, id), task);
        self.deadlines.insert(id, deadline);
        TimerHandle(id)
    }

    /// Schedule `delay` after `now`. Delays past the end of the clock land on
    /// the latest deadline `Instant` can represent.
    pub fn schedule_after(&mut self, now: Instant, delay: Duration, task: T) -> TimerHandle {
        self.schedule_at(saturating_deadline(now, delay), task)
    }

    /// Remove a task. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        match self.deadlines.remove(&handle.0) {
            Some(deadline) => self.entries.remove(&(deadline, handle.0)).is_some(),
            None => false,
        }
    }

    pub fn is_scheduled(&self, handle: TimerHandle) -> bool {
        self.deadlines.contains_key(&handle.0)
    }

    /// Take the earliest task whose deadline is at or before `now`.
    pub fn pop_due(&mut self, now: Instant) -> Option<Expired<T>> {
        let (&(deadline, id), _) = self.entries.first_key_value()?;
        if deadline > now {
            return None;
        }

        let task = self.entries.remove(&(deadline, id))?;
        self.deadlines.remove(&id);
        Some(Expired {
            handle: TimerHandle(id),
            deadline,
            task,
        })
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.entries.keys().next().map(|&(deadline, _)| deadline)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.deadlines.clear();
    }
}

/// `now + delay`, backing off by halves until the sum fits in an `Instant`.
fn saturating_deadline(now: Instant, delay: Duration) -> Instant {
    let mut delay = delay;
    loop {
        if let Some(deadline) = now.checked_add(delay) {
            return deadline;
        }
        delay /= 2;
    }
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_in_deadline_order() {
        let t0 = Instant::now();
        let mut queue = TimerQueue::new();
        queue.schedule_after(t0, Duration::from_millis(300), "c");
        queue.schedule_after(t0, Duration::from_millis(100), "a");
        queue.schedule_after(t0, Duration::from_millis(200), "b");

        let later = t0 + Duration::from_secs(1);
        let order: Vec<&str> = std::iter::from_fn(|| queue.pop_due(later).map(|e| e.task)).collect();
        assert_eq!(order, vec!["a", "b", "c"]);
        assert!(queue.is_empty());
    }

    #[test]
    fn equal_deadlines_fire_in_scheduling_order() {
        let t0 = Instant::now();
        let mut queue = TimerQueue::new();
        queue.schedule_at(t0, 1);
        queue.schedule_at(t0, 2);

        assert_eq!(queue.pop_due(t0).map(|e| e.task), Some(1));
        assert_eq!(queue.pop_due(t0).map(|e| e.task), Some(2));
    }

    #[test]
    fn nothing_due_before_deadline() {
        let t0 = Instant::now();
        let mut queue = TimerQueue::new();
        queue.schedule_after(t0, Duration::from_secs(5), ());

        assert!(queue.pop_due(t0 + Duration::from_secs(4)).is_none());
        assert_eq!(queue.next_deadline(), Some(t0 + Duration::from_secs(5)));
        assert!(queue.pop_due(t0 + Duration::from_secs(5)).is_some());
    }

    #[test]
    fn cancelled_task_never_fires() {
        let t0 = Instant::now();
        let mut queue = TimerQueue::new();
        let handle = queue.schedule_after(t0, Duration::from_secs(1), "stale");
        queue.schedule_after(t0, Duration::from_secs(2), "fresh");

        assert!(queue.cancel(handle));
        assert!(!queue.is_scheduled(handle));
        assert!(!queue.cancel(handle));

        let later = t0 + Duration::from_secs(10);
        assert_eq!(queue.pop_due(later).map(|e| e.task), Some("fresh"));
        assert!(queue.pop_due(later).is_none());
    }

    #[test]
    fn huge_delay_stays_in_the_future() {
        let t0 = Instant::now();
        let mut queue = TimerQueue::new();
        let handle = queue.schedule_after(t0, Duration::MAX, ());

        assert!(queue.is_scheduled(handle));
        assert!(queue.next_deadline().is_some_and(|d| d > t0));
        assert!(queue.pop_due(t0 + Duration::from_secs(86_400 * 365)).is_none());
    }

    #[test]
    fn cancel_after_fire_is_false() {
        let t0 = Instant::now();
        let mut queue = TimerQueue::new();
        let handle = queue.schedule_at(t0, ());
        let fired = queue.pop_due(t0).unwrap();

        assert_eq!(fired.handle, handle);
        assert_eq!(fired.deadline, t0);
        assert!(!queue.cancel(handle));
        assert_eq!(queue.len(), 0);
    }
}
