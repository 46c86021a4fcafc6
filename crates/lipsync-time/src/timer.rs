//! Deferred continuations
//!
//! The host event loop, made explicit. Each continuation is tagged with the
//! session that scheduled it. Cancelling a session purges its pending
//! entries, and the consumer checks the tag again on delivery, so a stale
//! continuation can never touch a newer session's state.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use lipsync_core::{PlaybackTime, SessionToken};

/// Identifier of one scheduled continuation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(pub u64);

/// A due continuation
#[derive(Debug, Clone)]
pub struct Timer<T> {
    pub id: TimerId,
    pub deadline: PlaybackTime,
    pub session: SessionToken,
    pub payload: T,
}

struct Pending<T>(Timer<T>);

impl<T> PartialEq for Pending<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0.id == other.0.id
    }
}

impl<T> Eq for Pending<T> {}

impl<T> PartialOrd for Pending<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Pending<T> {
    // min-heap on (deadline, id): earliest first, FIFO among equal deadlines
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .0
            .deadline
            .cmp(&self.0.deadline)
            .then_with(|| other.0.id.cmp(&self.0.id))
    }
}

/// Queue of deferred continuations ordered by deadline
pub struct TimerQueue<T> {
    heap: BinaryHeap<Pending<T>>,
    next_id: u64,
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        TimerQueue {
            heap: BinaryHeap::new(),
            next_id: 0,
        }
    }

    /// Schedule `payload` for `session` at `deadline`
    pub fn schedule(
        &mut self,
        deadline: PlaybackTime,
        session: SessionToken,
        payload: T,
    ) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.heap.push(Pending(Timer {
            id,
            deadline,
            session,
            payload,
        }));
        id
    }

    /// Pop the earliest continuation whose deadline has passed
    pub fn pop_due(&mut self, now: PlaybackTime) -> Option<Timer<T>> {
        if self.heap.peek()?.0.deadline <= now {
            self.heap.pop().map(|p| p.0)
        } else {
            None
        }
    }

    /// Deadline of the earliest pending continuation
    pub fn next_deadline(&self) -> Option<PlaybackTime> {
        self.heap.peek().map(|p| p.0.deadline)
    }

    /// Drop every pending continuation of `session`, returning how many
    pub fn cancel_session(&mut self, session: SessionToken) -> usize {
        let before = self.heap.len();
        self.heap.retain(|p| p.0.session != session);
        before - self.heap.len()
    }

    /// Number of pending continuations of `session`
    pub fn pending_for(&self, session: SessionToken) -> usize {
        self.heap.iter().filter(|p| p.0.session == session).count()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
