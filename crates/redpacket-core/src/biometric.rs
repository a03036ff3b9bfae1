//! Simulated biometric unlock: methods, status and the single failure kind.

use serde::{Deserialize, Serialize};

use crate::random::RandomSource;

/// Which (pretend) sensor the user chose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BiometricMethod {
    Face,
    Touch,
}

impl BiometricMethod {
    pub fn label(self) -> &'static str {
        match self {
            Self::Face => "Face ID",
            Self::Touch => "Touch ID",
        }
    }

    /// The method to suggest after this one fails.
    pub fn other(self) -> Self {
        match self {
            Self::Face => Self::Touch,
            Self::Touch => Self::Face,
        }
    }

    /// Parse a CLI-style name (`face`, `touch`, and a few aliases).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "face" | "faceid" | "face_id" => Some(Self::Face),
            "touch" | "touchid" | "touch_id" | "fingerprint" => Some(Self::Touch),
            _ => None,
        }
    }
}

impl std::fmt::Display for BiometricMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Face => write!(f, "face"),
            Self::Touch => write!(f, "touch"),
        }
    }
}

/// Visible state of the unlock step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BiometricStatus {
    #[default]
    Idle,
    Processing,
    Success,
    Error,
}

impl BiometricStatus {
    /// Status indicator text.
    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "Locked",
            Self::Processing => "Verifying…",
            Self::Success => "Verified",
            Self::Error => "Failed",
        }
    }

    pub fn is_settled(self) -> bool {
        matches!(self, Self::Success | Self::Error)
    }
}

/// Biometric authentication failed. The only user-facing error there is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("{}", rejection_message(.method))]
    Rejected { method: BiometricMethod },
}

impl AuthError {
    pub fn method(&self) -> BiometricMethod {
        match self {
            Self::Rejected { method } => *method,
        }
    }
}

fn rejection_message(method: &BiometricMethod) -> String {
    let what = match method {
        BiometricMethod::Face => "Face not recognized",
        BiometricMethod::Touch => "Fingerprint not recognized",
    };
    format!("{what}. Try again or switch to {}.", method.other().label())
}

/// Sample one attempt's outcome.
pub fn sample_outcome(
    method: BiometricMethod,
    success_rate: f64,
    rng: &mut dyn RandomSource,
) -> Result<(), AuthError> {
    if rng.chance(success_rate) {
        Ok(())
    } else {
        Err(AuthError::Rejected { method })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::ScriptedRandom;

    #[test]
    fn status_labels() {
        assert_eq!(BiometricStatus::Idle.label(), "Locked");
        assert_eq!(BiometricStatus::Processing.label(), "Verifying…");
        assert_eq!(BiometricStatus::Success.label(), "Verified");
        assert_eq!(BiometricStatus::Error.label(), "Failed");
        assert_eq!(BiometricStatus::default(), BiometricStatus::Idle);
    }

    #[test]
    fn failure_wording_depends_on_method() {
        let face = AuthError::Rejected {
            method: BiometricMethod::Face,
        }
        .to_string();
        let touch = AuthError::Rejected {
            method: BiometricMethod::Touch,
        }
        .to_string();
        assert_eq!(face, "Face not recognized. Try again or switch to Touch ID.");
        assert_eq!(
            touch,
            "Fingerprint not recognized. Try again or switch to Face ID."
        );
    }

    #[test]
    fn parse_method_names() {
        assert_eq!(BiometricMethod::parse("face"), Some(BiometricMethod::Face));
        assert_eq!(BiometricMethod::parse(" Touch "), Some(BiometricMethod::Touch));
        assert_eq!(
            BiometricMethod::parse("fingerprint"),
            Some(BiometricMethod::Touch)
        );
        assert_eq!(BiometricMethod::parse("iris"), None);
    }

    #[test]
    fn outcome_threshold() {
        let mut rng = ScriptedRandom::new([0.0, 0.919, 0.92, 0.99]);
        let m = BiometricMethod::Face;
        assert!(sample_outcome(m, 0.92, &mut rng).is_ok());
        assert!(sample_outcome(m, 0.92, &mut rng).is_ok());
        assert!(sample_outcome(m, 0.92, &mut rng).is_err());
        assert_eq!(
            sample_outcome(m, 0.92, &mut rng),
            Err(AuthError::Rejected { method: m })
        );
    }
}
