//! Red packet code normalization and validation.
//!
//! A code is exactly [`CODE_LEN`] characters from `[A-Z0-9]`. Validation runs
//! against the uppercased input as typed, so stray punctuation is reported
//! instead of silently dropped; [`normalize`] is the explicit cleanup step.

use std::sync::LazyLock;

use regex::Regex;

/// Number of characters in a red packet code.
pub const CODE_LEN: usize = 12;

static CODE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z0-9]{12}$").expect("static code pattern"));

/// Uppercase the input and strip everything outside `[A-Z0-9]`.
pub fn normalize(raw: &str) -> String {
    raw.chars()
        .flat_map(char::to_uppercase)
        .filter(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        .collect()
}

/// Strict pattern match on an already-normalized code.
pub fn is_valid(code: &str) -> bool {
    CODE_PATTERN.is_match(code)
}

/// Why a code is (or isn't) acceptable yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validity {
    Empty,
    /// First character outside `[A-Z0-9]`.
    InvalidCharacters(char),
    TooShort { remaining: usize },
    Malformed,
    Valid,
}

impl Validity {
    /// Help text for the field, `None` once the code is valid.
    pub fn message(&self) -> Option<String> {
        match self {
            Self::Empty => Some(format!("Enter your {CODE_LEN}-character red packet code.")),
            Self::InvalidCharacters(c) => Some(format!(
                "\"{c}\" is not allowed. Codes use letters A-Z and digits 0-9 only."
            )),
            Self::TooShort { remaining: 1 } => Some("1 more character required.".to_string()),
            Self::TooShort { remaining } => Some(format!("{remaining} more characters required.")),
            Self::Malformed => Some(format!(
                "Codes are exactly {CODE_LEN} letters or digits. Check the code and try again."
            )),
            Self::Valid => None,
        }
    }
}

/// Result of checking a piece of raw input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeCheck {
    /// Cleaned-up form of the input (see [`normalize`]).
    pub normalized: String,
    pub validity: Validity,
}

impl CodeCheck {
    pub fn is_valid(&self) -> bool {
        self.validity == Validity::Valid
    }

    pub fn message(&self) -> Option<String> {
        self.validity.message()
    }
}

/// Validate raw input. Rules apply in priority order: empty, disallowed
/// characters, too short, pattern mismatch.
pub fn check(raw: &str) -> CodeCheck {
    let upper = raw.to_uppercase();
    let normalized = normalize(&upper);

    let validity = if upper.is_empty() {
        Validity::Empty
    } else if let Some(bad) = upper
        .chars()
        .find(|c| !(c.is_ascii_uppercase() || c.is_ascii_digit()))
    {
        Validity::InvalidCharacters(bad)
    } else if upper.chars().count() < CODE_LEN {
        Validity::TooShort {
            remaining: CODE_LEN - upper.chars().count(),
        }
    } else if !is_valid(&upper) {
        Validity::Malformed
    } else {
        Validity::Valid
    };

    CodeCheck {
        normalized,
        validity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // normalize
    // -----------------------------------------------------------------------

    #[test]
    fn normalize_uppercases_and_strips() {
        assert_eq!(normalize("q9tm-8h4w 2zl5"), "Q9TM8H4W2ZL5");
        assert_eq!(normalize("  a!b@c#  "), "ABC");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn normalize_drops_non_ascii_letters() {
        assert_eq!(normalize("ÄBC红包12"), "BC12");
    }

    #[test]
    fn normalize_is_idempotent() {
        for s in [
            "q9tm8h4w2zl5",
            "ABC",
            "ABCDEFGHIJK!",
            "  --  ",
            "ß straße",
            "mixed-Case_123",
            "ÿ",
        ] {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "input {s:?}");
        }
    }

    // -----------------------------------------------------------------------
    // check
    // -----------------------------------------------------------------------

    #[test]
    fn lowercase_code_is_valid() {
        let c = check("q9tm8h4w2zl5");
        assert_eq!(c.normalized, "Q9TM8H4W2ZL5");
        assert!(c.is_valid());
        assert!(c.message().is_none());
    }

    #[test]
    fn empty_prompts_for_entry() {
        let c = check("");
        assert_eq!(c.validity, Validity::Empty);
        assert!(c.message().unwrap().contains("Enter your 12-character"));
    }

    #[test]
    fn short_code_counts_remaining() {
        let c = check("ABC");
        assert_eq!(c.validity, Validity::TooShort { remaining: 9 });
        assert_eq!(c.message().unwrap(), "9 more characters required.");
    }

    #[test]
    fn one_remaining_is_singular() {
        let c = check("ABCDEFGHIJK");
        assert_eq!(c.message().unwrap(), "1 more character required.");
    }

    #[test]
    fn punctuation_is_a_charset_error() {
        let c = check("ABCDEFGHIJK!");
        assert_eq!(c.validity, Validity::InvalidCharacters('!'));
        assert!(c.message().unwrap().contains('!'));
    }

    #[test]
    fn charset_error_wins_over_length() {
        assert_eq!(check("a b").validity, Validity::InvalidCharacters(' '));
    }

    #[test]
    fn too_long_is_malformed() {
        assert_eq!(check("ABCDEFGHIJKLM").validity, Validity::Malformed);
    }

    #[test]
    fn accepted_iff_twelve_alphanumerics() {
        assert!(is_valid("ABCDEFGHIJKL"));
        assert!(is_valid("000000000000"));
        assert!(!is_valid("ABCDEFGHIJK"));
        assert!(!is_valid("ABCDEFGHIJKLM"));
        assert!(!is_valid("abcdefghijkl"));
        assert!(!is_valid("ABCDEFGHIJK-"));
        for raw in ["ABCDEFGHIJKL", "abc", "ABCDEFGHIJK!", "1234567890AB", "x"] {
            let upper = raw.to_uppercase();
            let expect = upper.len() == CODE_LEN
                && upper.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit());
            assert_eq!(check(raw).is_valid(), expect, "input {raw:?}");
        }
    }
}
