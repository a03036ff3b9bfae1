//! `redpacket validate`: check codes without redeeming them.

use redpacket_core::code;

/// One line of output per code: mark, normalized form, help text.
pub fn describe(raw: &str) -> (bool, String) {
    let check = code::check(raw);
    let ok = check.is_valid();
    let mark = if ok { "\u{2705}" } else { "\u{274C}" };
    let normalized = if check.normalized.is_empty() {
        "—".to_string()
    } else {
        check.normalized.clone()
    };
    let detail = check.message().unwrap_or_else(|| "valid".to_string());
    (ok, format!("  {mark} {raw:<20} {normalized:<14} {detail}"))
}

pub fn run(codes: &[String]) {
    let mut all_ok = true;
    println!("  {:<22} {:<14} {}", "Input", "Normalized", "Result");
    println!("  {}", "-".repeat(60));
    for raw in codes {
        let (ok, line) = describe(raw);
        all_ok &= ok;
        println!("{line}");
    }
    if !all_ok {
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_code_line() {
        let (ok, line) = describe("q9tm8h4w2zl5");
        assert!(ok);
        assert!(line.contains("Q9TM8H4W2ZL5"));
        assert!(line.ends_with("valid"));
    }

    #[test]
    fn short_code_line() {
        let (ok, line) = describe("ABC");
        assert!(!ok);
        assert!(line.contains("9 more characters required."));
    }

    #[test]
    fn punctuation_only_has_placeholder() {
        let (ok, line) = describe("!!");
        assert!(!ok);
        assert!(line.contains('—'));
    }
}
