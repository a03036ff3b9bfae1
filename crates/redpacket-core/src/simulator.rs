//! Drives a [`RedeemScreen`] over virtual time.
//!
//! The simulator owns the screen together with its timer queue, random
//! source and clock. Front ends feed it user actions and elapsed time; it
//! dispatches due timers into the screen one at a time.

use std::time::Duration;

use crate::biometric::BiometricMethod;
use crate::clock::{Clock, SystemClock};
use crate::config::ScreenConfig;
use crate::random::{RandomSource, RngSource};
use crate::scheduler::{Scheduler, Timer, TimerId, VirtualScheduler};
use crate::screen::{Env, RedeemScreen, SubmitBlocked};

pub struct Simulator {
    screen: RedeemScreen,
    scheduler: VirtualScheduler,
    rng: Box<dyn RandomSource>,
    clock: Box<dyn Clock>,
    celebration_started: Option<Duration>,
}

impl Simulator {
    pub fn new(screen: RedeemScreen, rng: Box<dyn RandomSource>, clock: Box<dyn Clock>) -> Self {
        Self {
            screen,
            scheduler: VirtualScheduler::new(),
            rng,
            clock,
            celebration_started: None,
        }
    }

    /// Fresh screen on the system clock. `seed` makes outcomes reproducible.
    pub fn from_config(config: ScreenConfig, seed: Option<u64>) -> Self {
        let rng: Box<dyn RandomSource> = match seed {
            Some(seed) => Box::new(RngSource::seeded(seed)),
            None => Box::new(RngSource::thread()),
        };
        Self::new(RedeemScreen::new(config), rng, Box::new(SystemClock))
    }

    pub fn screen(&self) -> &RedeemScreen {
        &self.screen
    }

    /// Direct access for input edits, which need no timers.
    pub fn screen_mut(&mut self) -> &mut RedeemScreen {
        &mut self.screen
    }

    pub fn authenticate(&mut self, method: BiometricMethod) {
        self.screen.authenticate(method, &mut self.scheduler);
    }

    pub fn submit(&mut self) -> Result<TimerId, SubmitBlocked> {
        self.screen.submit(&mut self.scheduler)
    }

    /// Virtual time since the simulator was created.
    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    pub fn pending(&self) -> usize {
        self.scheduler.pending()
    }

    /// Move time forward by `by`, dispatching everything that falls due.
    /// Returns the dispatched timers in order.
    pub fn advance(&mut self, by: Duration) -> Vec<Timer> {
        let target = self.scheduler.now() + by;
        let mut fired = Vec::new();
        // Step deadline by deadline so timers scheduled by a dispatch (the
        // celebration end) are honored within the same advance.
        while let Some(deadline) = self.scheduler.next_deadline() {
            if deadline > target {
                break;
            }
            let step = deadline.saturating_sub(self.scheduler.now());
            let due = self.scheduler.advance(step);
            self.dispatch(&due);
            fired.extend(due);
        }
        let rest = target.saturating_sub(self.scheduler.now());
        self.scheduler.advance(rest);
        fired
    }

    /// Run timers until none are left.
    pub fn run_until_idle(&mut self) -> Vec<Timer> {
        let mut fired = Vec::new();
        while self.scheduler.pending() > 0 {
            let due = self.scheduler.advance_to_next();
            self.dispatch(&due);
            fired.extend(due);
        }
        fired
    }

    /// Run timers until `stop` holds for the screen or nothing is pending.
    pub fn run_until(&mut self, mut stop: impl FnMut(&RedeemScreen) -> bool) -> Vec<Timer> {
        let mut fired = Vec::new();
        while !stop(&self.screen) && self.scheduler.pending() > 0 {
            let due = self.scheduler.advance_to_next();
            self.dispatch(&due);
            fired.extend(due);
        }
        fired
    }

    /// Time into the current celebration, if one is running.
    pub fn celebration_elapsed(&self) -> Option<Duration> {
        if !self.screen.is_celebrating() {
            return None;
        }
        self.celebration_started
            .map(|start| self.scheduler.now().saturating_sub(start))
    }

    fn dispatch(&mut self, due: &[Timer]) {
        for &timer in due {
            let generation = self.screen.celebration_generation();
            let mut env = Env {
                scheduler: &mut self.scheduler,
                rng: self.rng.as_mut(),
                clock: self.clock.as_ref(),
            };
            self.screen.on_timer(timer, &mut env);
            if self.screen.celebration_generation() != generation {
                self.celebration_started = Some(self.scheduler.now());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::biometric::BiometricStatus;
    use crate::clock::FixedClock;
    use crate::random::ScriptedRandom;

    fn sim(values: &[f64]) -> Simulator {
        Simulator::new(
            RedeemScreen::new(ScreenConfig::default()),
            Box::new(ScriptedRandom::new(values.iter().copied())),
            Box::new(FixedClock::new(0)),
        )
    }

    #[test]
    fn advance_dispatches_chained_timers() {
        let mut s = sim(&[0.0, 0.5]);
        s.authenticate(BiometricMethod::Face);
        s.advance(Duration::from_millis(900));
        s.screen_mut().set_input("AAAAAAAAAAAA");
        s.submit().unwrap();
        // Redemption at +1150, celebration end at +1150+4200.
        let fired = s.advance(Duration::from_millis(10_000));
        assert_eq!(fired.len(), 2);
        assert!(matches!(fired[0], Timer::RedemptionSettled { .. }));
        assert!(matches!(fired[1], Timer::CelebrationOver { .. }));
        assert!(!s.screen().is_celebrating());
        assert_eq!(s.now(), Duration::from_millis(10_900));
    }

    #[test]
    fn celebration_elapsed_tracks_virtual_time() {
        let mut s = sim(&[0.0]);
        s.authenticate(BiometricMethod::Touch);
        s.advance(Duration::from_millis(900));
        s.screen_mut().set_input("AAAAAAAAAAAA");
        s.submit().unwrap();
        assert!(s.celebration_elapsed().is_none());
        s.advance(Duration::from_millis(1150 + 300));
        assert_eq!(s.celebration_elapsed(), Some(Duration::from_millis(300)));
    }

    #[test]
    fn run_until_stops_on_condition() {
        let mut s = sim(&[0.0]);
        s.authenticate(BiometricMethod::Face);
        s.run_until(|screen| screen.status().is_settled());
        assert_eq!(s.screen().status(), BiometricStatus::Success);
        assert_eq!(s.now(), Duration::from_millis(900));
    }

    #[test]
    fn run_until_idle_drains() {
        let mut s = sim(&[0.0]);
        s.authenticate(BiometricMethod::Face);
        s.run_until_idle();
        s.screen_mut().set_input("AAAAAAAAAAAA");
        s.submit().unwrap();
        s.run_until_idle();
        assert_eq!(s.pending(), 0);
        assert_eq!(s.screen().history().len(), 4);
    }
}
