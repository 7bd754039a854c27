//! Clock and timer queue driving every delayed effect in a session.
//!
//! Nothing here sleeps: the host advances time by calling
//! [`TimerQueue::pop_due`] with the current instant on each tick.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};

pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Handle to one scheduled task, usable for cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskHandle(u64);

/// Pending tasks ordered by due instant, ties broken by scheduling order.
#[derive(Debug)]
pub struct TimerQueue<T> {
    next_seq: u64,
    pending: BTreeMap<(DateTime<Utc>, u64), T>,
    due_by_seq: HashMap<u64, DateTime<Utc>>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self {
            next_seq: 0,
            pending: BTreeMap::new(),
            due_by_seq: HashMap::new(),
        }
    }
}

impl<T> TimerQueue<T> {
    pub fn schedule(&mut self, due: DateTime<Utc>, task: T) -> TaskHandle {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.insert((due, seq), task);
        self.due_by_seq.insert(seq, due);
        TaskHandle(seq)
    }

    /// Removes a task that has not fired yet.
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn cancel(&mut self, handle: TaskHandle) -> Option<T> {
        let due = self.due_by_seq.remove(&handle.0)?;
        self.pending.remove(&(due, handle.0))
    }

    /// Removes every pending task matching `predicate`, in due order.
    pub fn cancel_where(&mut self, mut predicate: impl FnMut(&T) -> bool) -> Vec<T> {
        let keys: Vec<_> = self
            .pending
            .iter()
            .filter(|entry| predicate(entry.1))
            .map(|(key, _)| *key)
            .collect();

        keys.into_iter()
            .filter_map(|key| {
                self.due_by_seq.remove(&key.1);
                self.pending.remove(&key)
            })
            .collect()
    }

    /// Pops the earliest task due at or before `now`.
    pub fn pop_due(&mut self, now: DateTime<Utc>) -> Option<(TaskHandle, T)> {
        let (&(due, seq), _) = self.pending.first_key_value()?;
        if due > now {
            return None;
        }

        self.due_by_seq.remove(&seq);
        self.pending
            .remove(&(due, seq))
            .map(|task| (TaskHandle(seq), task))
    }

    pub fn next_due(&self) -> Option<DateTime<Utc>> {
        self.pending.keys().next().map(|(due, _)| *due)
    }

    pub fn contains(&self, handle: TaskHandle) -> bool {
        self.due_by_seq.contains_key(&handle.0)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.pending.values()
    }
}
