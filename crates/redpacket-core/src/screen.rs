//! The redemption screen: one state object, transitions as plain methods.
//!
//! ```text
//!   set_input ──► code check ─┐
//!                            ├─► submit ──► RedemptionSettled ──► CelebrationOver
//!   authenticate ──► BiometricSettled ─┘
//! ```
//!
//! User actions ([`RedeemScreen::authenticate`], [`RedeemScreen::submit`],
//! input edits) change state immediately and may schedule a [`Timer`].
//! Fired timers come back through [`RedeemScreen::on_timer`], which is the
//! only place randomness and the wall clock are consulted.

use crate::biometric::{self, AuthError, BiometricMethod, BiometricStatus};
use crate::clock::Clock;
use crate::code::{self, CodeCheck};
use crate::config::ScreenConfig;
use crate::confetti::{self, Particle};
use crate::format::Amount;
use crate::history::{History, RedemptionRecord};
use crate::random::RandomSource;
use crate::scheduler::{Scheduler, Timer, TimerId};

/// Dependencies a fired timer may need.
pub struct Env<'a> {
    pub scheduler: &'a mut dyn Scheduler,
    pub rng: &'a mut dyn RandomSource,
    pub clock: &'a dyn Clock,
}

/// Why the submit action is disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SubmitBlocked {
    #[error("Enter a valid {}-character code first.", code::CODE_LEN)]
    InvalidCode,
    #[error("Verify with Face ID or Touch ID first.")]
    NotVerified,
    #[error("A redemption is already in progress.")]
    Busy,
}

/// The confirmation panel for the most recent redemption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedemptionSuccess {
    pub id: u64,
    pub code: String,
    pub amount: Amount,
    pub timestamp_ms: u64,
}

impl From<&RedemptionRecord> for RedemptionSuccess {
    fn from(r: &RedemptionRecord) -> Self {
        Self {
            id: r.id,
            code: r.code.clone(),
            amount: r.amount,
            timestamp_ms: r.timestamp_ms,
        }
    }
}

/// Draw a reward in `[reward_min, reward_max)`, rounded to cents.
pub fn sample_reward(config: &ScreenConfig, rng: &mut dyn RandomSource) -> Amount {
    let min_cents = (config.reward_min * 100.0).ceil() as u64;
    let max_cents = ((config.reward_max * 100.0).ceil() as u64)
        .saturating_sub(1)
        .max(min_cents);
    let raw = Amount::from_value(rng.range(config.reward_min, config.reward_max));
    Amount::from_cents(raw.cents().clamp(min_cents, max_cents))
}

pub struct RedeemScreen {
    config: ScreenConfig,

    input: String,
    touched: bool,

    status: BiometricStatus,
    method: Option<BiometricMethod>,
    auth_error: Option<AuthError>,
    attempt: u64,
    pending_auth: Option<TimerId>,

    redeeming: bool,
    in_flight_code: Option<String>,
    redemption_seq: u64,
    last_success: Option<RedemptionSuccess>,

    celebrating: bool,
    celebration_generation: u64,
    confetti: Vec<Particle>,

    history: History,
}

impl RedeemScreen {
    pub fn new(config: ScreenConfig) -> Self {
        let history = if config.seed_history {
            History::seeded()
        } else {
            History::empty()
        };
        Self::with_history(config, history)
    }

    pub fn with_history(config: ScreenConfig, history: History) -> Self {
        Self {
            config,
            input: String::new(),
            touched: false,
            status: BiometricStatus::Idle,
            method: None,
            auth_error: None,
            attempt: 0,
            pending_auth: None,
            redeeming: false,
            in_flight_code: None,
            redemption_seq: 0,
            last_success: None,
            celebrating: false,
            celebration_generation: 0,
            confetti: Vec::new(),
            history,
        }
    }

    // -----------------------------------------------------------------------
    // Code input
    // -----------------------------------------------------------------------

    /// Replace the field contents. Input is kept uppercased as typed.
    pub fn set_input(&mut self, raw: &str) {
        self.input = raw.to_uppercase();
        self.touched = true;
    }

    pub fn push_char(&mut self, c: char) {
        let mut next = self.input.clone();
        next.push(c);
        self.set_input(&next);
    }

    pub fn pop_char(&mut self) {
        let mut next = self.input.clone();
        next.pop();
        self.set_input(&next);
    }

    pub fn clear_input(&mut self) {
        self.set_input("");
    }

    /// Strip everything that can't be part of a code.
    pub fn normalize_input(&mut self) {
        let normalized = code::normalize(&self.input);
        self.set_input(&normalized);
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn is_touched(&self) -> bool {
        self.touched
    }

    pub fn code_check(&self) -> CodeCheck {
        code::check(&self.input)
    }

    /// Inline help text, shown only once the field has been edited.
    pub fn validation_message(&self) -> Option<String> {
        if self.touched {
            self.code_check().message()
        } else {
            None
        }
    }

    // -----------------------------------------------------------------------
    // Biometrics
    // -----------------------------------------------------------------------

    /// Start a new attempt with `method`. Always allowed, including while a
    /// previous attempt is still processing.
    pub fn authenticate(&mut self, method: BiometricMethod, scheduler: &mut dyn Scheduler) {
        if let Some(id) = self.pending_auth.take() {
            if self.config.cancel_stale_attempts && scheduler.cancel(id) {
                log::debug!("cancelled biometric attempt #{}", self.attempt);
            }
        }

        self.attempt += 1;
        self.status = BiometricStatus::Processing;
        self.method = Some(method);
        self.auth_error = None;

        let timer = Timer::BiometricSettled {
            attempt: self.attempt,
            method,
        };
        self.pending_auth = Some(scheduler.schedule(self.config.biometric_delay(), timer));
        log::debug!("biometric attempt #{} started ({method})", self.attempt);
    }

    pub fn status(&self) -> BiometricStatus {
        self.status
    }

    pub fn status_label(&self) -> &'static str {
        self.status.label()
    }

    pub fn method(&self) -> Option<BiometricMethod> {
        self.method
    }

    pub fn auth_error(&self) -> Option<&AuthError> {
        self.auth_error.as_ref()
    }

    /// Number of attempts started so far.
    pub fn attempts(&self) -> u64 {
        self.attempt
    }

    // -----------------------------------------------------------------------
    // Redemption
    // -----------------------------------------------------------------------

    pub fn submit_blocked(&self) -> Option<SubmitBlocked> {
        if self.redeeming {
            Some(SubmitBlocked::Busy)
        } else if !self.code_check().is_valid() {
            Some(SubmitBlocked::InvalidCode)
        } else if self.status != BiometricStatus::Success {
            Some(SubmitBlocked::NotVerified)
        } else {
            None
        }
    }

    pub fn can_submit(&self) -> bool {
        self.submit_blocked().is_none()
    }

    /// Start redeeming the current code. A blocked submit changes nothing.
    pub fn submit(&mut self, scheduler: &mut dyn Scheduler) -> Result<TimerId, SubmitBlocked> {
        if let Some(blocked) = self.submit_blocked() {
            log::debug!("submit ignored: {blocked}");
            return Err(blocked);
        }

        self.redeeming = true;
        self.last_success = None;
        self.redemption_seq += 1;
        self.in_flight_code = Some(self.input.clone());

        let timer = Timer::RedemptionSettled {
            seq: self.redemption_seq,
        };
        log::debug!("redemption #{} submitted", self.redemption_seq);
        Ok(scheduler.schedule(self.config.redeem_delay(), timer))
    }

    pub fn is_redeeming(&self) -> bool {
        self.redeeming
    }

    pub fn last_success(&self) -> Option<&RedemptionSuccess> {
        self.last_success.as_ref()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn config(&self) -> &ScreenConfig {
        &self.config
    }

    // -----------------------------------------------------------------------
    // Celebration
    // -----------------------------------------------------------------------

    pub fn is_celebrating(&self) -> bool {
        self.celebrating
    }

    /// Particles of the current celebration, empty when not celebrating.
    pub fn confetti(&self) -> &[Particle] {
        &self.confetti
    }

    /// Bumped every time a celebration starts.
    pub fn celebration_generation(&self) -> u64 {
        self.celebration_generation
    }

    // -----------------------------------------------------------------------
    // Timers
    // -----------------------------------------------------------------------

    pub fn on_timer(&mut self, timer: Timer, env: &mut Env<'_>) {
        match timer {
            Timer::BiometricSettled { attempt, method } => self.settle_biometric(attempt, method, env),
            Timer::RedemptionSettled { seq } => self.settle_redemption(seq, env),
            Timer::CelebrationOver { generation } => {
                if generation == self.celebration_generation {
                    self.celebrating = false;
                    self.confetti.clear();
                }
            }
        }
    }

    fn settle_biometric(&mut self, attempt: u64, method: BiometricMethod, env: &mut Env<'_>) {
        let current = attempt == self.attempt;
        if !current && self.config.cancel_stale_attempts {
            log::warn!(
                "ignoring stale biometric attempt #{attempt} (current #{})",
                self.attempt
            );
            return;
        }
        if current {
            self.pending_auth = None;
        }

        match biometric::sample_outcome(method, self.config.biometric_success_rate, env.rng) {
            Ok(()) => {
                self.status = BiometricStatus::Success;
                self.auth_error = None;
                log::info!("biometric attempt #{attempt} verified ({method})");
            }
            Err(e) => {
                self.status = BiometricStatus::Error;
                self.auth_error = Some(e);
                log::info!("biometric attempt #{attempt} failed ({method})");
            }
        }
    }

    fn settle_redemption(&mut self, seq: u64, env: &mut Env<'_>) {
        let Some(code) = self.in_flight_code.take() else {
            log::warn!("redemption #{seq} settled with nothing in flight");
            return;
        };

        let amount = sample_reward(&self.config, env.rng);
        let record = self.history.record(&code, amount, env.clock.now_ms());
        log::info!(
            "redemption #{seq} credited {} to record #{}",
            amount.credited(&self.config.currency),
            record.id
        );
        self.last_success = Some(RedemptionSuccess::from(record));

        self.input.clear();
        self.touched = false;
        self.redeeming = false;

        self.celebrating = true;
        self.celebration_generation += 1;
        self.confetti = confetti::burst(self.config.confetti_particles, env.rng);
        env.scheduler.schedule(
            self.config.celebration(),
            Timer::CelebrationOver {
                generation: self.celebration_generation,
            },
        );
    }
}
