//! Short human-readable renderings used in responses and console output.

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDateTime;
use std::fmt::Write;

/// Default rendering for free-slot responses, e.g. `2024-01-01T10:00`.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Whether `format` is a strftime string chrono can render.
pub fn is_valid_date_format(format: &str) -> bool {
    !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}

/// Renders an instant with a strftime-style format, falling back to
/// [`DEFAULT_DATE_FORMAT`] when the format is invalid.
pub fn format_instant(instant: &NaiveDateTime, format: &str) -> String {
    let mut rendered = String::new();
    if write!(rendered, "{}", instant.format(format)).is_err() {
        return instant.format(DEFAULT_DATE_FORMAT).to_string();
    }
    rendered
}

/// Formats a number of seconds as `1d 2h 30m`, dropping zero parts.
///
/// Remaining seconds are only shown for durations under a minute.
pub fn format_duration(seconds: i64) -> String {
    let seconds = seconds.max(0);
    if seconds < 60 {
        return format!("{}s", seconds);
    }
    let days = seconds / 86_400;
    let hours = seconds % 86_400 / 3_600;
    let minutes = seconds % 3_600 / 60;

    let parts: Vec<String> = [(days, "d"), (hours, "h"), (minutes, "m")]
        .iter()
        .filter(|(amount, _)| *amount > 0)
        .map(|(amount, unit)| format!("{}{}", amount, unit))
        .collect();
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(45), "45s");
        assert_eq!(format_duration(1800), "30m");
        assert_eq!(format_duration(5400), "1h 30m");
        assert_eq!(format_duration(93_600), "1d 2h");
        assert_eq!(format_duration(-5), "0s");
    }

    #[test]
    fn test_format_instant() {
        let instant = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(10, 0, 0).unwrap();
        assert_eq!(format_instant(&instant, DEFAULT_DATE_FORMAT), "2024-01-01T10:00");
        assert_eq!(format_instant(&instant, "%d.%m %H:%M"), "01.01 10:00");
    }

    #[test]
    fn test_invalid_format_falls_back() {
        let instant = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(10, 0, 0).unwrap();
        assert!(!is_valid_date_format("%Q"));
        assert!(!is_valid_date_format("%Y-%"));
        assert!(is_valid_date_format(DEFAULT_DATE_FORMAT));
        assert_eq!(format_instant(&instant, "%Q"), "2024-01-01T10:00");
    }
}
