//! Date, time and duration handling for message commands.
//!
//! Every temporal value that reaches the store or the free-slot resolver is
//! normalized into one canonical encoding, `YYYY-MM-DDTHH:MM:SS`, whose
//! lexicographic order equals chronological order. Ranges are stored as two
//! canonical endpoints joined by a slash.
//!
//! ## Accepted input
//!
//! - **Instants**: `2024-01-05T10:30[:00]`, `2024-01-05 10:30[:00]`,
//!   `10:30[:00]` (today), `now`, and any whole-day form (its midnight)
//! - **Whole days**: `2024-01-05`, `today`, `tomorrow`, `yesterday`
//! - **Intervals**: `<instant>/<instant>` or a whole day, which covers
//!   `[00:00, next day 00:00)`
//! - **Durations**: `90` (minutes), `1:30`, `2h`, `1h30m`, `1d 4h`, `45s`
//!
//! Relative words resolve against the clock captured by [`TemporalParser`],
//! so parsing stays deterministic under test.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

/// Canonical sortable encoding for stored instants.
pub const DB_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Separator between the two endpoints of a stored range.
pub const RANGE_SEPARATOR: char = '/';

const DATETIME_FORMATS: [&str; 4] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];
const TIME_FORMATS: [&str; 2] = ["%H:%M:%S", "%H:%M"];
const DATE_FORMAT: &str = "%Y-%m-%d";

/// A half-open span of time `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Interval {
    /// Builds an interval, refusing spans that end before they start.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    /// Covers one calendar day from midnight to the following midnight.
    pub fn whole_day(date: NaiveDate) -> Self {
        let start = date.and_time(NaiveTime::MIN);
        Self {
            start,
            end: start + Duration::days(1),
        }
    }

    pub fn contains(&self, instant: &NaiveDateTime) -> bool {
        self.start <= *instant && *instant < self.end
    }
}

/// Formats an instant in the canonical stored encoding.
pub fn format_for_db(instant: &NaiveDateTime) -> String {
    instant.format(DB_FORMAT).to_string()
}

/// Formats an interval as `start/end` in the canonical stored encoding.
pub fn format_interval_for_db(interval: &Interval) -> String {
    format!("{}{}{}", format_for_db(&interval.start), RANGE_SEPARATOR, format_for_db(&interval.end))
}

/// Parses a canonical stored instant.
pub fn parse_from_db(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value.trim(), DB_FORMAT).ok()
}

/// Resolves user-typed temporal values relative to a fixed "now".
#[derive(Debug, Clone, Copy)]
pub struct TemporalParser {
    now: NaiveDateTime,
}

impl TemporalParser {
    pub fn new(now: NaiveDateTime) -> Self {
        Self { now }
    }

    pub fn now(&self) -> NaiveDateTime {
        self.now
    }

    /// Parses a single point in time.
    ///
    /// Whole-day forms are accepted and resolve to that day's midnight, which
    /// lets them act as interval endpoints (`2024-01-01/2024-01-03`).
    pub fn parse_instant(&self, value: &str) -> Option<NaiveDateTime> {
        let value = value.trim();
        if value.eq_ignore_ascii_case("now") {
            return Some(self.now);
        }
        if let Some(instant) = DATETIME_FORMATS.iter().find_map(|f| NaiveDateTime::parse_from_str(value, f).ok()) {
            return Some(instant);
        }
        if let Some(time) = TIME_FORMATS.iter().find_map(|f| NaiveTime::parse_from_str(value, f).ok()) {
            return Some(self.now.date().and_time(time));
        }
        self.parse_day(value).map(|date| date.and_time(NaiveTime::MIN))
    }

    /// Parses a span of time: either `start/end` or a whole day.
    pub fn parse_interval(&self, value: &str) -> Option<Interval> {
        let value = value.trim();
        match value.split_once(RANGE_SEPARATOR) {
            Some((start, end)) => Interval::new(self.parse_instant(start)?, self.parse_instant(end)?),
            None => self.parse_day(value).map(Interval::whole_day),
        }
    }

    fn parse_day(&self, value: &str) -> Option<NaiveDate> {
        let today = self.now.date();
        match value.to_ascii_lowercase().as_str() {
            "today" => Some(today),
            "tomorrow" => today.succ_opt(),
            "yesterday" => today.pred_opt(),
            other => NaiveDate::parse_from_str(other, DATE_FORMAT).ok(),
        }
    }
}

/// Parses a duration into whole seconds.
///
/// A bare integer counts minutes; `H:MM` counts hours and minutes; otherwise
/// the value is a sequence of `<n><unit>` parts with units `d`, `h`, `m`, `s`.
pub fn parse_duration(value: &str) -> Option<i64> {
    let value = value.trim().to_ascii_lowercase();
    if value.is_empty() {
        return None;
    }
    if let Ok(minutes) = value.parse::<i64>() {
        if minutes < 0 {
            return None;
        }
        return minutes.checked_mul(60);
    }
    if let Some((hours, minutes)) = value.split_once(':') {
        let hours: u32 = hours.parse().ok()?;
        let minutes: u32 = minutes.parse().ok()?;
        if minutes >= 60 {
            return None;
        }
        return Some(i64::from(hours) * 3600 + i64::from(minutes) * 60);
    }

    let mut total = 0i64;
    let mut digits = String::new();
    for c in value.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
            continue;
        }
        if c.is_whitespace() {
            continue;
        }
        let amount: i64 = digits.parse().ok()?;
        digits.clear();
        let unit = match c {
            'd' => 86_400,
            'h' => 3_600,
            'm' => 60,
            's' => 1,
            _ => return None,
        };
        total = total.checked_add(amount.checked_mul(unit)?)?;
    }

    // A trailing number without a unit is ambiguous
    if !digits.is_empty() {
        return None;
    }
    Some(total)
}
