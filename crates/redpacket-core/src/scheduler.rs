//! Delayed callbacks, modeled as data.
//!
//! The screen never sleeps. It hands a [`Timer`] to a [`Scheduler`] and gets
//! it back through [`crate::screen::RedeemScreen::on_timer`] once the delay
//! has elapsed. [`VirtualScheduler`] keeps its own notion of time so the TUI
//! can drive it from real elapsed time while tests jump straight to deadlines.

use std::collections::VecDeque;
use std::time::Duration;

use crate::biometric::BiometricMethod;

/// A pending effect the screen asked to be woken up for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timer {
    /// A biometric attempt has finished "scanning".
    BiometricSettled { attempt: u64, method: BiometricMethod },
    /// The simulated redemption call has returned.
    RedemptionSettled { seq: u64 },
    /// The celebration started by redemption `generation` is over.
    CelebrationOver { generation: u64 },
}

/// Handle for cancelling a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

pub trait Scheduler {
    /// Arrange for `timer` to fire after `delay`.
    fn schedule(&mut self, delay: Duration, timer: Timer) -> TimerId;

    /// Drop a timer that has not fired yet. Returns `false` if it already
    /// fired, was already cancelled, or never existed.
    fn cancel(&mut self, id: TimerId) -> bool;

    /// Number of timers still waiting.
    fn pending(&self) -> usize;
}

// ---------------------------------------------------------------------------
// VirtualScheduler
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct Entry {
    deadline: Duration,
    id: TimerId,
    timer: Timer,
}

/// Timer queue over virtual time.
#[derive(Debug, Default)]
pub struct VirtualScheduler {
    now: Duration,
    next_id: u64,
    queue: Vec<Entry>,
}

impl VirtualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time elapsed since creation.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Deadline of the earliest pending timer.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.queue.iter().map(|e| e.deadline).min()
    }

    /// Move time forward and return every timer that became due, earliest
    /// first. Timers with the same deadline come out in scheduling order.
    pub fn advance(&mut self, by: Duration) -> Vec<Timer> {
        self.now += by;
        self.take_due()
    }

    /// Jump to the next deadline and return what fires there.
    pub fn advance_to_next(&mut self) -> Vec<Timer> {
        match self.next_deadline() {
            Some(deadline) => {
                self.now = self.now.max(deadline);
                self.take_due()
            }
            None => Vec::new(),
        }
    }

    fn take_due(&mut self) -> Vec<Timer> {
        let now = self.now;
        let mut due: Vec<Entry> = Vec::new();
        self.queue.retain(|e| {
            if e.deadline <= now {
                due.push(e.clone());
                false
            } else {
                true
            }
        });
        due.sort_by_key(|e| (e.deadline, e.id));
        due.into_iter().map(|e| e.timer).collect()
    }
}

impl Scheduler for VirtualScheduler {
    fn schedule(&mut self, delay: Duration, timer: Timer) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.queue.push(Entry {
            deadline: self.now + delay,
            id,
            timer,
        });
        id
    }

    fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.queue.len();
        self.queue.retain(|e| e.id != id);
        self.queue.len() != before
    }

    fn pending(&self) -> usize {
        self.queue.len()
    }
}

// ---------------------------------------------------------------------------
// ImmediateScheduler
// ---------------------------------------------------------------------------

/// Ignores delays: every timer is ready as soon as it is scheduled.
#[derive(Debug, Default)]
pub struct ImmediateScheduler {
    next_id: u64,
    ready: VecDeque<(TimerId, Timer)>,
}

impl ImmediateScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every ready timer in scheduling order.
    pub fn drain(&mut self) -> Vec<Timer> {
        self.ready.drain(..).map(|(_, t)| t).collect()
    }

    /// Take the oldest ready timer.
    pub fn pop(&mut self) -> Option<Timer> {
        self.ready.pop_front().map(|(_, t)| t)
    }
}

impl Scheduler for ImmediateScheduler {
    fn schedule(&mut self, _delay: Duration, timer: Timer) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.ready.push_back((id, timer));
        id
    }

    fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.ready.len();
        self.ready.retain(|(i, _)| *i != id);
        self.ready.len() != before
    }

    fn pending(&self) -> usize {
        self.ready.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    // -----------------------------------------------------------------------
    // VirtualScheduler
    // -----------------------------------------------------------------------

    #[test]
    fn nothing_fires_before_deadline() {
        let mut s = VirtualScheduler::new();
        s.schedule(ms(900), Timer::RedemptionSettled { seq: 1 });
        assert!(s.advance(ms(899)).is_empty());
        assert_eq!(s.pending(), 1);
        assert_eq!(s.advance(ms(1)), vec![Timer::RedemptionSettled { seq: 1 }]);
        assert_eq!(s.pending(), 0);
    }

    #[test]
    fn due_timers_come_out_in_deadline_order() {
        let mut s = VirtualScheduler::new();
        s.schedule(ms(300), Timer::CelebrationOver { generation: 3 });
        s.schedule(ms(100), Timer::CelebrationOver { generation: 1 });
        s.schedule(ms(100), Timer::CelebrationOver { generation: 2 });
        let fired = s.advance(ms(1000));
        assert_eq!(
            fired,
            vec![
                Timer::CelebrationOver { generation: 1 },
                Timer::CelebrationOver { generation: 2 },
                Timer::CelebrationOver { generation: 3 },
            ]
        );
    }

    #[test]
    fn deadlines_are_relative_to_virtual_now() {
        let mut s = VirtualScheduler::new();
        s.advance(ms(500));
        s.schedule(ms(100), Timer::RedemptionSettled { seq: 9 });
        assert_eq!(s.next_deadline(), Some(ms(600)));
    }

    #[test]
    fn advance_to_next_jumps_exactly() {
        let mut s = VirtualScheduler::new();
        s.schedule(ms(1150), Timer::RedemptionSettled { seq: 1 });
        s.schedule(ms(5000), Timer::CelebrationOver { generation: 1 });
        assert_eq!(s.advance_to_next(), vec![Timer::RedemptionSettled { seq: 1 }]);
        assert_eq!(s.now(), ms(1150));
        assert_eq!(s.advance_to_next().len(), 1);
        assert!(s.advance_to_next().is_empty());
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let mut s = VirtualScheduler::new();
        let id = s.schedule(ms(10), Timer::RedemptionSettled { seq: 1 });
        assert!(s.cancel(id));
        assert!(!s.cancel(id));
        assert!(s.advance(ms(100)).is_empty());
    }

    // -----------------------------------------------------------------------
    // ImmediateScheduler
    // -----------------------------------------------------------------------

    #[test]
    fn immediate_is_ready_at_once() {
        let mut s = ImmediateScheduler::new();
        let a = s.schedule(ms(10_000), Timer::RedemptionSettled { seq: 1 });
        s.schedule(ms(1), Timer::RedemptionSettled { seq: 2 });
        assert_eq!(s.pending(), 2);
        assert!(s.cancel(a));
        assert_eq!(s.drain(), vec![Timer::RedemptionSettled { seq: 2 }]);
        assert!(s.pop().is_none());
    }
}
