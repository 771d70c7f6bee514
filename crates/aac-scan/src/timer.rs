//! Timers
//!
//! Clock sources and the timer queue that drives auto-advance and
//! long-press detection. Timers are plain data: the owner polls for due
//! entries and dispatches them itself, so a cancelled timer simply stops
//! existing and can never call back.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// Time source in milliseconds
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Hand-advanced clock for deterministic tests; clones share the same time
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<u64>>,
}

impl ManualClock {
    pub fn new() -> Self { Self::default() }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + ms);
    }

    pub fn set(&self, ms: u64) {
        self.now.set(ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

/// Wall clock measured from construction
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }

    /// Instant corresponding to a clock reading
    pub fn instant_at(&self, ms: u64) -> Instant {
        self.origin + std::time::Duration::from_millis(ms)
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

/// Timer handle
pub type TimerId = u64;

/// What a timer is for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Repeating scan tick
    AutoAdvance,
    /// One-shot hold detection
    LongPress,
}

#[derive(Debug, Clone)]
struct Timer {
    id: TimerId,
    kind: TimerKind,
    deadline_ms: u64,
    period_ms: Option<u64>,
}

/// Pending timers ordered by deadline
#[derive(Debug, Default)]
pub struct TimerQueue {
    timers: Vec<Timer>,
    next_id: TimerId,
}

impl TimerQueue {
    pub fn new() -> Self { Self::default() }

    fn push(&mut self, kind: TimerKind, deadline_ms: u64, period_ms: Option<u64>) -> TimerId {
        self.next_id += 1;
        let id = self.next_id;
        self.timers.push(Timer { id, kind, deadline_ms, period_ms });
        id
    }

    /// Fire once after `delay_ms`
    pub fn schedule_once(&mut self, kind: TimerKind, now_ms: u64, delay_ms: u64) -> TimerId {
        self.push(kind, now_ms + delay_ms, None)
    }

    /// Fire every `period_ms` (at least 1 ms)
    pub fn schedule_repeating(&mut self, kind: TimerKind, now_ms: u64, period_ms: u64) -> TimerId {
        let period = period_ms.max(1);
        self.push(kind, now_ms + period, Some(period))
    }

    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        self.timers.len() != before
    }

    pub fn cancel_all(&mut self) {
        self.timers.clear();
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.timers.iter().any(|t| t.id == id)
    }

    /// Take the earliest due timer, rescheduling it if it repeats.
    ///
    /// Callers loop until `None`; an overdue repeating timer fires once per
    /// missed period.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<(TimerId, TimerKind)> {
        let pos = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.deadline_ms <= now_ms)
            .min_by_key(|(_, t)| (t.deadline_ms, t.id))
            .map(|(i, _)| i)?;

        let timer = &mut self.timers[pos];
        let fired = (timer.id, timer.kind);
        match timer.period_ms {
            Some(period) => timer.deadline_ms += period,
            None => {
                self.timers.swap_remove(pos);
            }
        }
        Some(fired)
    }

    /// Earliest pending deadline
    pub fn next_deadline(&self) -> Option<u64> {
        self.timers.iter().map(|t| t.deadline_ms).min()
    }

    pub fn len(&self) -> usize { self.timers.len() }
    pub fn is_empty(&self) -> bool { self.timers.is_empty() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_shared() {
        let clock = ManualClock::new();
        let view = clock.clone();
        clock.advance(1500);
        assert_eq!(view.now_ms(), 1500);
    }

    #[test]
    fn test_one_shot() {
        let mut queue = TimerQueue::new();
        let id = queue.schedule_once(TimerKind::LongPress, 0, 1000);
        assert_eq!(queue.pop_due(999), None);
        assert_eq!(queue.pop_due(1000), Some((id, TimerKind::LongPress)));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_repeating_catches_up() {
        let mut queue = TimerQueue::new();
        let id = queue.schedule_repeating(TimerKind::AutoAdvance, 0, 100);
        let mut fired = 0;
        while let Some((fid, _)) = queue.pop_due(350) {
            assert_eq!(fid, id);
            fired += 1;
        }
        assert_eq!(fired, 3);
        assert_eq!(queue.next_deadline(), Some(400));
    }

    #[test]
    fn test_cancel() {
        let mut queue = TimerQueue::new();
        let id = queue.schedule_repeating(TimerKind::AutoAdvance, 0, 100);
        assert!(queue.cancel(id));
        assert!(!queue.cancel(id));
        assert_eq!(queue.pop_due(10_000), None);
    }

    #[test]
    fn test_earliest_first() {
        let mut queue = TimerQueue::new();
        let slow = queue.schedule_once(TimerKind::AutoAdvance, 0, 300);
        let fast = queue.schedule_once(TimerKind::LongPress, 0, 100);
        assert_eq!(queue.pop_due(500).map(|(id, _)| id), Some(fast));
        assert_eq!(queue.pop_due(500).map(|(id, _)| id), Some(slow));
    }

    #[test]
    fn test_zero_period_is_clamped() {
        let mut queue = TimerQueue::new();
        queue.schedule_repeating(TimerKind::AutoAdvance, 0, 0);
        assert_eq!(queue.next_deadline(), Some(1));
    }
}
