//! Single-threaded timer queue.
//!
//! Callers supply the current time, so the same queue runs against the wall
//! clock in production and a virtual clock in tests.

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Identifies one scheduled task. Ordered by deadline, then by scheduling order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskHandle {
    deadline: DateTime<Utc>,
    seq: u64,
}

impl TaskHandle {
    #[must_use]
    pub fn deadline(&self) -> DateTime<Utc> {
        self.deadline
    }
}

/// Deadline-ordered set of pending tasks.
#[derive(Debug, Clone)]
pub struct TimerQueue<T> {
    tasks: BTreeMap<TaskHandle, T>,
    next_seq: u64,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self {
            tasks: BTreeMap::new(),
            next_seq: 0,
        }
    }
}

impl<T> TimerQueue<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule_at(&mut self, deadline: DateTime<Utc>, task: T) -> TaskHandle {
        let handle = TaskHandle {
            deadline,
            seq: self.next_seq,
        };
        self.next_seq += 1;
        self.tasks.insert(handle, task);
        handle
    }

    /// Remove a pending task. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        self.tasks.remove(&handle).is_some()
    }

    #[must_use]
    pub fn contains(&self, handle: TaskHandle) -> bool {
        self.tasks.contains_key(&handle)
    }

    #[must_use]
    pub fn next_deadline(&self) -> Option<DateTime<Utc>> {
        self.tasks.first_key_value().map(|(handle, _)| handle.deadline)
    }

    /// Pop the earliest task if its deadline is at or before `now`.
    pub fn pop_due(&mut self, now: DateTime<Utc>) -> Option<(TaskHandle, T)> {
        let (handle, _) = self.tasks.first_key_value()?;
        if handle.deadline > now {
            return None;
        }
        self.tasks.pop_first()
    }

    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use quiz_core::time::fixed_now;

    #[test]
    fn pops_in_deadline_then_fifo_order() {
        let t0 = fixed_now();
        let mut queue = TimerQueue::new();
        queue.schedule_at(t0 + Duration::seconds(2), "late");
        queue.schedule_at(t0 + Duration::seconds(1), "first");
        queue.schedule_at(t0 + Duration::seconds(1), "second");

        let now = t0 + Duration::seconds(5);
        let fired: Vec<_> = std::iter::from_fn(|| queue.pop_due(now))
            .map(|(_, task)| task)
            .collect();
        assert_eq!(fired, vec!["first", "second", "late"]);
    }

    #[test]
    fn nothing_fires_before_deadline() {
        let t0 = fixed_now();
        let mut queue = TimerQueue::new();
        queue.schedule_at(t0 + Duration::seconds(1), ());
        assert!(queue.pop_due(t0).is_none());
        assert_eq!(queue.next_deadline(), Some(t0 + Duration::seconds(1)));
        assert!(queue.pop_due(t0 + Duration::seconds(1)).is_some());
        assert!(queue.is_empty());
    }

    #[test]
    fn cancel_is_idempotent() {
        let t0 = fixed_now();
        let mut queue = TimerQueue::new();
        let handle = queue.schedule_at(t0, 1);
        assert!(queue.contains(handle));
        assert!(queue.cancel(handle));
        assert!(!queue.cancel(handle));
        assert!(queue.pop_due(t0).is_none());
    }
}
