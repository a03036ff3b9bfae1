//! Screen configuration: delays, odds, reward range and display options.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Tunables for a [`crate::screen::RedeemScreen`]. Every field has a default,
/// so a config file only needs the fields it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScreenConfig {
    /// Fake sensor latency before an attempt resolves.
    pub biometric_delay_ms: u64,
    /// Fake round trip of the redemption call.
    pub redeem_delay_ms: u64,
    /// How long the celebration (confetti) lasts.
    pub celebration_ms: u64,
    /// Probability that a biometric attempt passes.
    pub biometric_success_rate: f64,
    /// Lower bound of the reward, inclusive.
    pub reward_min: f64,
    /// Upper bound of the reward, exclusive.
    pub reward_max: f64,
    pub confetti_particles: usize,
    pub currency: String,
    /// Wall clock offset for displayed timestamps.
    pub utc_offset_minutes: i32,
    /// Cancel an in-flight attempt's timer when a new attempt starts.
    /// With `false` the older timer still fires and overwrites the status.
    pub cancel_stale_attempts: bool,
    /// Start with the three sample history entries.
    pub seed_history: bool,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            biometric_delay_ms: 900,
            redeem_delay_ms: 1150,
            celebration_ms: 4200,
            biometric_success_rate: 0.92,
            reward_min: 8.0,
            reward_max: 100.0,
            confetti_particles: 40,
            currency: "USDT".to_string(),
            utc_offset_minutes: 0,
            cancel_stale_attempts: true,
            seed_history: true,
        }
    }
}

impl ScreenConfig {
    /// Read a JSON config file and validate it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.biometric_success_rate) {
            return Err(Error::InvalidConfig(format!(
                "biometric_success_rate must be within [0, 1], got {}",
                self.biometric_success_rate
            )));
        }
        if !self.reward_min.is_finite() || !self.reward_max.is_finite() {
            return Err(Error::InvalidConfig("reward bounds must be finite".into()));
        }
        if self.reward_min < 0.0 || self.reward_min >= self.reward_max {
            return Err(Error::InvalidConfig(format!(
                "reward range must satisfy 0 <= min < max, got [{}, {})",
                self.reward_min, self.reward_max
            )));
        }
        if self.currency.trim().is_empty() {
            return Err(Error::InvalidConfig("currency must not be empty".into()));
        }
        if self.utc_offset_minutes.abs() > 14 * 60 {
            return Err(Error::InvalidConfig(format!(
                "utc_offset_minutes must be within ±840, got {}",
                self.utc_offset_minutes
            )));
        }
        Ok(())
    }

    pub fn biometric_delay(&self) -> Duration {
        Duration::from_millis(self.biometric_delay_ms)
    }

    pub fn redeem_delay(&self) -> Duration {
        Duration::from_millis(self.redeem_delay_ms)
    }

    pub fn celebration(&self) -> Duration {
        Duration::from_millis(self.celebration_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        let c = ScreenConfig::default();
        assert!(c.validate().is_ok());
        assert_eq!(c.biometric_delay(), Duration::from_millis(900));
        assert_eq!(c.redeem_delay(), Duration::from_millis(1150));
        assert_eq!(c.celebration(), Duration::from_millis(4200));
    }

    #[test]
    fn bad_rate_rejected() {
        let c = ScreenConfig {
            biometric_success_rate: 1.5,
            ..Default::default()
        };
        assert!(matches!(c.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn inverted_range_rejected() {
        let c = ScreenConfig {
            reward_min: 100.0,
            reward_max: 8.0,
            ..Default::default()
        };
        assert!(c.validate().is_err());
    }

    #[test]
    fn empty_currency_rejected() {
        let c = ScreenConfig {
            currency: "  ".into(),
            ..Default::default()
        };
        assert!(c.validate().is_err());
    }

    #[test]
    fn load_partial_file_fills_defaults() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, r#"{{"currency": "CNY", "biometric_success_rate": 1.0}}"#).unwrap();
        let c = ScreenConfig::load(f.path()).unwrap();
        assert_eq!(c.currency, "CNY");
        assert_eq!(c.biometric_success_rate, 1.0);
        assert_eq!(c.redeem_delay_ms, 1150);
    }

    #[test]
    fn load_rejects_unknown_fields() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, r#"{{"lockout_after": 3}}"#).unwrap();
        assert!(matches!(ScreenConfig::load(f.path()), Err(Error::Json(_))));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = ScreenConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn load_validates() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, r#"{{"reward_min": -1.0}}"#).unwrap();
        assert!(matches!(
            ScreenConfig::load(f.path()),
            Err(Error::InvalidConfig(_))
        ));
    }
}
