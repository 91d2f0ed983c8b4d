use std::cmp::Reverse;
use std::collections::{BTreeMap, BinaryHeap};

use crate::clock::timer::{Fired, TimerHandle, TimerHost};
use crate::foundation::core::TimeMs;

/// Deterministic single-threaded timer queue.
///
/// Determinism rule: due timers fire in `(deadline, arm order)` order. While a timer is being
/// dispatched, [`VirtualClock::now`] reports that timer's deadline, so a timer re-armed from
/// inside a dispatch is scheduled relative to the instant it logically ran at. Advancing far
/// past several deadlines therefore replays them in strict order instead of collapsing them.
pub struct VirtualClock<T> {
    now: TimeMs,
    next_seq: u64,
    queue: BinaryHeap<Reverse<(TimeMs, u64)>>,
    live: BTreeMap<u64, (TimeMs, T)>,
}

impl<T> Default for VirtualClock<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> VirtualClock<T> {
    /// Create a clock at [`TimeMs::ZERO`] with nothing armed.
    pub fn new() -> Self {
        Self {
            now: TimeMs::ZERO,
            next_seq: 0,
            queue: BinaryHeap::new(),
            live: BTreeMap::new(),
        }
    }

    /// Current clock time.
    pub fn now(&self) -> TimeMs {
        self.now
    }

    /// Number of armed, uncancelled timers.
    pub fn pending(&self) -> usize {
        self.live.len()
    }

    /// Whether `handle` is still armed.
    pub fn is_armed(&self, handle: TimerHandle) -> bool {
        self.live.contains_key(&handle.0)
    }

    /// Earliest live deadline, if any timer is armed.
    pub fn next_deadline(&mut self) -> Option<TimeMs> {
        self.prune();
        self.queue.peek().map(|Reverse((at, _))| *at)
    }

    /// Pop the next timer due at or before `until`, moving the clock to its deadline.
    pub fn pop_due(&mut self, until: TimeMs) -> Option<Fired<T>> {
        self.prune();
        let Reverse((at, seq)) = *self.queue.peek()?;
        if at > until {
            return None;
        }
        self.queue.pop();
        let (at, payload) = self.live.remove(&seq)?;
        self.now = self.now.max(at);
        Some(Fired {
            handle: TimerHandle(seq),
            at,
            payload,
        })
    }

    /// Move the clock forward to `until` without dispatching anything.
    ///
    /// Call after draining [`VirtualClock::pop_due`]; never moves time backwards.
    pub fn settle(&mut self, until: TimeMs) {
        self.now = self.now.max(until);
    }

    /// Dispatch every timer due at or before `until`, including timers armed during dispatch,
    /// then settle the clock at `until`. Returns the number of dispatched timers.
    pub fn advance_to<F>(&mut self, until: TimeMs, mut dispatch: F) -> usize
    where
        F: FnMut(&mut Self, Fired<T>),
    {
        let mut n = 0usize;
        while let Some(fired) = self.pop_due(until) {
            dispatch(self, fired);
            n += 1;
        }
        self.settle(until);
        n
    }

    /// Advance by `delta_ms` relative to the current time.
    pub fn advance_by<F>(&mut self, delta_ms: u64, dispatch: F) -> usize
    where
        F: FnMut(&mut Self, Fired<T>),
    {
        let until = self.now.after(delta_ms);
        self.advance_to(until, dispatch)
    }

    // Cancelled entries stay in the heap until they surface.
    fn prune(&mut self) {
        while let Some(Reverse((_, seq))) = self.queue.peek() {
            if self.live.contains_key(seq) {
                break;
            }
            self.queue.pop();
        }
    }
}

impl<T> TimerHost<T> for VirtualClock<T> {
    fn now(&self) -> TimeMs {
        self.now
    }

    fn arm(&mut self, after_ms: u64, payload: T) -> TimerHandle {
        let seq = self.next_seq;
        self.next_seq += 1;
        let at = self.now.after(after_ms);
        self.queue.push(Reverse((at, seq)));
        self.live.insert(seq, (at, payload));
        tracing::trace!(handle = seq, %at, "timer armed");
        TimerHandle(seq)
    }

    fn cancel(&mut self, handle: TimerHandle) -> bool {
        let removed = self.live.remove(&handle.0).is_some();
        if removed {
            tracing::trace!(handle = handle.0, "timer cancelled");
        }
        removed
    }
}

#[cfg(test)]
#[path = "../../tests/unit/clock/virtual_clock.rs"]
mod tests;
