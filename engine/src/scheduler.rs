//! Deterministic virtual-time timers.
//!
//! The host advances time explicitly; nothing here sleeps or spawns. Timers
//! fire in due-time order and timers due at the same instant fire in the
//! order they were scheduled. A handler may schedule new timers while the
//! host is draining a window, and those fire in the same window if due.

use std::collections::BTreeMap;
use std::time::Duration;

/// Handle for cancelling a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Debug, Clone)]
struct Entry<T> {
    id: TimerId,
    period: Option<Duration>,
    payload: T,
}

/// A timer that came due.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fired<T> {
    pub id: TimerId,
    /// Virtual time the timer was due at.
    pub at: Duration,
    pub payload: T,
}

#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    now: Duration,
    next_id: u64,
    next_seq: u64,
    queue: BTreeMap<(Duration, u64), Entry<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            next_seq: 0,
            queue: BTreeMap::new(),
        }
    }
}

impl<T: Clone> Scheduler<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn schedule_once(&mut self, delay: Duration, payload: T) -> TimerId {
        let id = self.allocate_id();
        self.enqueue(self.now + delay, id, None, payload);
        id
    }

    /// Fire every `period`, first at `now + period`, until cancelled.
    pub fn schedule_every(&mut self, period: Duration, payload: T) -> TimerId {
        let id = self.allocate_id();
        self.enqueue(self.now + period, id, Some(period), payload);
        id
    }

    /// Returns false if the timer already fired (one-shot) or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.queue.len();
        self.queue.retain(|_, entry| entry.id != id);
        self.queue.len() != before
    }

    #[must_use]
    pub fn is_scheduled(&self, id: TimerId) -> bool {
        self.queue.values().any(|entry| entry.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Pop the earliest timer due at or before `deadline`, moving `now` to
    /// its due time. Periodic timers are re-armed before returning.
    pub fn pop_due(&mut self, deadline: Duration) -> Option<Fired<T>> {
        let (&(due, _), _) = self.queue.first_key_value()?;
        if due > deadline {
            return None;
        }
        let ((due, _), entry) = self.queue.pop_first()?;
        self.now = self.now.max(due);
        if let Some(period) = entry.period {
            self.enqueue(due + period, entry.id, Some(period), entry.payload.clone());
        }
        Some(Fired {
            id: entry.id,
            at: due,
            payload: entry.payload,
        })
    }

    /// Move `now` forward to `deadline` once nothing more is due.
    pub fn settle(&mut self, deadline: Duration) {
        self.now = self.now.max(deadline);
    }

    fn allocate_id(&mut self) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        id
    }

    fn enqueue(&mut self, due: Duration, id: TimerId, period: Option<Duration>, payload: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.insert((due, seq), Entry {
            id,
            period,
            payload,
        });
    }
}
