//! # redpacket-core
//!
//! State machine behind the red packet redemption screen: enter a
//! 12-character code, unlock with a (simulated) Face ID or Touch ID check,
//! and redeem for a (simulated) random reward.
//!
//! ## Quick Start
//!
//! ```
//! use std::time::Duration;
//! use redpacket_core::{BiometricMethod, ScreenConfig, Simulator};
//!
//! let config = ScreenConfig {
//!     biometric_success_rate: 1.0,
//!     ..Default::default()
//! };
//! let mut sim = Simulator::from_config(config, Some(42));
//!
//! sim.screen_mut().set_input("q9tm8h4w2zl5");
//! sim.authenticate(BiometricMethod::Face);
//! sim.advance(Duration::from_millis(900));
//!
//! sim.submit().unwrap();
//! sim.advance(Duration::from_millis(1150));
//!
//! let redeemed = sim.screen().last_success().unwrap();
//! assert_eq!(redeemed.code, "Q9TM8H4W2ZL5");
//! assert_eq!(sim.screen().history().len(), 4);
//! ```
//!
//! ## Architecture
//!
//! User action → [`RedeemScreen`] transition → [`Timer`] on a [`Scheduler`]
//! → [`RedeemScreen::on_timer`] (samples a [`RandomSource`], reads a
//! [`Clock`]) → new state.
//!
//! Nothing sleeps and nothing talks to the network. Every outcome comes
//! from the injected random source, so tests pin results with
//! [`ScriptedRandom`] and skip delays with [`VirtualScheduler`].

pub mod biometric;
pub mod clock;
pub mod code;
pub mod config;
pub mod confetti;
pub mod error;
pub mod format;
pub mod history;
pub mod random;
pub mod scheduler;
pub mod screen;
pub mod simulator;

pub use biometric::{AuthError, BiometricMethod, BiometricStatus};
pub use clock::{Clock, FixedClock, SystemClock};
pub use code::{CODE_LEN, CodeCheck, Validity, check, is_valid, normalize};
pub use config::ScreenConfig;
pub use confetti::Particle;
pub use error::{Error, Result};
pub use format::{Amount, format_timestamp, format_timestamp_long};
pub use history::{History, RedemptionRecord};
pub use random::{RandomSource, RngSource, ScriptedRandom};
pub use scheduler::{ImmediateScheduler, Scheduler, Timer, TimerId, VirtualScheduler};
pub use screen::{Env, RedeemScreen, RedemptionSuccess, SubmitBlocked, sample_reward};
pub use simulator::Simulator;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
