//! Display formatting for amounts and timestamps.

use serde::{Deserialize, Serialize};

/// A currency value in hundredths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(u64);

impl Amount {
    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    /// Round a non-negative value to the nearest cent.
    pub fn from_value(value: f64) -> Self {
        Self((value.max(0.0) * 100.0).round() as u64)
    }

    pub fn cents(self) -> u64 {
        self.0
    }

    pub fn as_f64(self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// `+X.XX <currency>`, as shown in the history list.
    pub fn credited(self, currency: &str) -> String {
        format!("+{self} {currency}")
    }
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Short month/day/hour/minute, e.g. `Oct 14, 09:32`.
///
/// `utc_offset_minutes` shifts the wall clock away from UTC.
pub fn format_timestamp(unix_ms: u64, utc_offset_minutes: i32) -> String {
    let secs = (unix_ms / 1000) as i64 + i64::from(utc_offset_minutes) * 60;
    let (_, month, day, hour, min, _) = secs_to_utc(secs.max(0) as u64);
    format!("{} {}, {:02}:{:02}", MONTHS[(month - 1) as usize], day, hour, min)
}

/// Full `Oct 14, 2026 09:32` form for the confirmation panel.
pub fn format_timestamp_long(unix_ms: u64, utc_offset_minutes: i32) -> String {
    let secs = (unix_ms / 1000) as i64 + i64::from(utc_offset_minutes) * 60;
    let (year, month, day, hour, min, _) = secs_to_utc(secs.max(0) as u64);
    format!(
        "{} {}, {} {:02}:{:02}",
        MONTHS[(month - 1) as usize],
        day,
        year,
        hour,
        min
    )
}

/// Convert seconds since Unix epoch to (year, month, day, hour, minute, second).
/// No leap second handling.
fn secs_to_utc(secs: u64) -> (u64, u64, u64, u64, u64, u64) {
    let sec = secs % 60;
    let min = (secs / 60) % 60;
    let hour = (secs / 3600) % 24;

    let mut days = secs / 86400;
    let mut year = 1970u64;

    loop {
        let days_in_year = if is_leap(year) { 366 } else { 365 };
        if days < days_in_year {
            break;
        }
        days -= days_in_year;
        year += 1;
    }

    let months_days: [u64; 12] = if is_leap(year) {
        [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31]
    } else {
        [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31]
    };

    let mut month = 12u64;
    for (i, &md) in months_days.iter().enumerate() {
        if days < md {
            month = i as u64 + 1;
            break;
        }
        days -= md;
    }

    (year, month, days + 1, hour, min, sec)
}

fn is_leap(year: u64) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}
