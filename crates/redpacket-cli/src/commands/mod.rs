pub mod config;
pub mod history;
pub mod screen;
pub mod simulate;
pub mod validate;

use std::fs::File;

use log::LevelFilter;
use redpacket_core::{BiometricMethod, ScreenConfig};

/// Default log filter for the headless commands.
const DEFAULT_FILTER: &str = "warn";

/// Set up env_logger.
///
/// With `--log-file` everything goes to the file and `RUST_LOG` applies.
/// Without it the interactive screen only lets errors through so log lines
/// can't tear the alternate screen.
pub fn init_logging(log_file: Option<&str>, interactive: bool) {
    let env = env_logger::Env::default().default_filter_or(DEFAULT_FILTER);

    if let Some(path) = log_file {
        match File::create(path) {
            Ok(file) => {
                env_logger::Builder::from_env(env)
                    .target(env_logger::Target::Pipe(Box::new(file)))
                    .init();
                return;
            }
            Err(e) => {
                eprintln!("Cannot open log file {path}: {e}");
                std::process::exit(1);
            }
        }
    }

    if interactive {
        env_logger::Builder::new()
            .filter_level(LevelFilter::Error)
            .init();
    } else {
        env_logger::Builder::from_env(env).init();
    }
}

/// Load `--config`, or fall back to defaults. Exits on a bad file.
pub fn load_config(path: Option<&str>) -> ScreenConfig {
    match path {
        None => ScreenConfig::default(),
        Some(path) => match ScreenConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load config {path}: {e}");
                std::process::exit(1);
            }
        },
    }
}

/// Parse a biometric method name, defaulting to face.
pub fn parse_method(s: &str) -> BiometricMethod {
    match BiometricMethod::parse(s) {
        Some(m) => m,
        None => {
            eprintln!("Unknown biometric method '{s}', using face");
            BiometricMethod::Face
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_method() {
        assert_eq!(parse_method("face"), BiometricMethod::Face);
        assert_eq!(parse_method("touch"), BiometricMethod::Touch);
        assert_eq!(parse_method("TOUCH"), BiometricMethod::Touch);
    }

    #[test]
    fn test_parse_unknown_method_defaults_face() {
        assert_eq!(parse_method("retina"), BiometricMethod::Face);
        assert_eq!(parse_method(""), BiometricMethod::Face);
    }

    #[test]
    fn test_load_config_default() {
        assert_eq!(load_config(None), ScreenConfig::default());
    }
}
