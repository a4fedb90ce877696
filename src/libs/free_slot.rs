//! Free-slot search over a date-range column.
//!
//! Occupied ranges come from the stored rows plus the query's own
//! constraints on the range column. The ranges are sorted, merged, and the
//! gaps between them are reported.
//!
//! ```text
//! occupied:  [10:00, 11:00)  [11:30, 12:00)
//! min:       30m
//!
//!   ... 10:00 ████ 11:00 ░░ 11:30 ██ 12:00 ...
//!   before 10:00          11:00-11:30      after 12:00
//!                         (kept if >= min)
//! ```
//!
//! Search-window bounds are modelled as occupied ranges reaching to an
//! unbounded end, so the sweep needs no special cases for them.

use crate::libs::datetime::{self, Interval, RANGE_SEPARATOR};
use crate::libs::messages::Message;
use crate::libs::query::{Comparator, Constraint};
use crate::msg_debug;
use chrono::NaiveDateTime;

/// Start of a range; `Unbounded` sorts before every instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Lower {
    Unbounded,
    At(NaiveDateTime),
}

/// End of a range; `Unbounded` sorts after every instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Upper {
    At(NaiveDateTime),
    Unbounded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    pub start: Lower,
    pub end: Upper,
}

impl Range {
    pub fn bounded(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            start: Lower::At(start),
            end: Upper::At(end),
        }
    }

    /// Whether this range begins no later than `end`.
    fn starts_by(&self, end: Upper) -> bool {
        match (self.start, end) {
            (_, Upper::Unbounded) | (Lower::Unbounded, _) => true,
            (Lower::At(start), Upper::At(end)) => start <= end,
        }
    }
}

impl From<Interval> for Range {
    fn from(interval: Interval) -> Self {
        Range::bounded(interval.start, interval.end)
    }
}

/// A free interval between occupied ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gap {
    Before(NaiveDateTime),
    Between(NaiveDateTime, NaiveDateTime),
    After(NaiveDateTime),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Availability {
    /// Nothing is occupied.
    Anytime,
    /// The whole horizon is occupied or no gap is long enough.
    Booked,
    Free(Vec<Gap>),
}

/// Constraints on the range column, sorted into occupied ranges and a window.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlotBounds {
    pub occupied: Vec<Range>,
    pub early: Option<NaiveDateTime>,
    pub late: Option<NaiveDateTime>,
}

impl SlotBounds {
    fn raise_early(&mut self, instant: NaiveDateTime) {
        self.early = Some(self.early.map_or(instant, |current| current.max(instant)));
    }

    fn lower_late(&mut self, instant: NaiveDateTime) {
        self.late = Some(self.late.map_or(instant, |current| current.min(instant)));
    }
}

/// Parses a stored `start/end` value.
pub fn parse_stored_range(value: &str) -> Option<Range> {
    let (start, end) = value.split_once(RANGE_SEPARATOR)?;
    Interval::new(datetime::parse_from_db(start)?, datetime::parse_from_db(end)?).map(Range::from)
}

/// Sorts the range column's own constraints into occupied ranges and bounds.
///
/// `!=` ranges and either-pairs are occupied; an `=` range is the search
/// window (its start raises `early`, its end lowers `late`); `<` lowers
/// `late`; `>` and `>=` raise `early`.
pub fn partition_bounds(constraints: &[Constraint]) -> SlotBounds {
    let mut bounds = SlotBounds::default();
    for constraint in constraints {
        match constraint {
            Constraint::Either { first, second, .. } => {
                if let (Some(start), Some(end)) = (datetime::parse_from_db(&first.1), datetime::parse_from_db(&second.1)) {
                    bounds.occupied.push(Range::bounded(start, end));
                }
            }
            Constraint::Single { comparator, value, .. } => match comparator {
                Comparator::Ne => bounds.occupied.extend(parse_stored_range(value)),
                Comparator::Eq => {
                    if let Some(Range {
                        start: Lower::At(start),
                        end: Upper::At(end),
                    }) = parse_stored_range(value)
                    {
                        bounds.raise_early(start);
                        bounds.lower_late(end);
                    }
                }
                Comparator::Lt => {
                    if let Some(instant) = datetime::parse_from_db(value) {
                        bounds.lower_late(instant);
                    }
                }
                Comparator::Gt | Comparator::Gte => {
                    if let Some(instant) = datetime::parse_from_db(value) {
                        bounds.raise_early(instant);
                    }
                }
            },
        }
    }
    bounds
}

/// Merges overlapping and touching ranges.
///
/// A range with an unbounded end swallows everything after it.
pub fn merge(mut ranges: Vec<Range>) -> Vec<Range> {
    ranges.sort_by_key(|range| (range.start, range.end));
    let mut merged: Vec<Range> = Vec::with_capacity(ranges.len());
    for range in ranges {
        match merged.last_mut() {
            Some(last) if last.end == Upper::Unbounded => break,
            Some(last) if range.starts_by(last.end) => last.end = last.end.max(range.end),
            _ => merged.push(range),
        }
    }
    merged
}

/// Gaps around and between merged ranges.
///
/// Interior gaps shorter than `min_seconds` are dropped; the leading and
/// trailing gaps are unbounded and always kept.
pub fn free_gaps(merged: &[Range], min_seconds: i64) -> Vec<Gap> {
    let mut gaps = Vec::new();
    if let Some(Range { start: Lower::At(start), .. }) = merged.first() {
        gaps.push(Gap::Before(*start));
    }
    for pair in merged.windows(2) {
        if let (Upper::At(end), Lower::At(start)) = (pair[0].end, pair[1].start) {
            if (start - end).num_seconds() >= min_seconds {
                gaps.push(Gap::Between(end, start));
            }
        }
    }
    if let Some(Range { end: Upper::At(end), .. }) = merged.last() {
        gaps.push(Gap::After(*end));
    }
    gaps
}

/// Computes free slots from stored range values and the range column's
/// constraints.
pub fn resolve<I>(stored: I, constraints: &[Constraint], min_seconds: i64) -> Availability
where
    I: IntoIterator<Item = String>,
{
    let mut bounds = partition_bounds(constraints);
    for value in stored {
        match parse_stored_range(&value) {
            Some(range) => bounds.occupied.push(range),
            None => msg_debug!(Message::SkippedStoredRange(value)),
        }
    }
    if let Some(early) = bounds.early {
        bounds.occupied.push(Range {
            start: Lower::Unbounded,
            end: Upper::At(early),
        });
    }
    if let Some(late) = bounds.late {
        bounds.occupied.push(Range {
            start: Lower::At(late),
            end: Upper::Unbounded,
        });
    }
    if bounds.occupied.is_empty() {
        return Availability::Anytime;
    }

    let gaps = free_gaps(&merge(bounds.occupied), min_seconds);
    if gaps.is_empty() {
        Availability::Booked
    } else {
        Availability::Free(gaps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(h, m, 0).unwrap()
    }

    fn stored(a: &str, b: &str) -> String {
        format!("2024-01-01T{}:00/2024-01-01T{}:00", a, b)
    }

    #[test]
    fn test_short_gap_is_suppressed() {
        let rows = vec![stored("10:00", "11:00"), stored("11:30", "12:00")];
        let availability = resolve(rows, &[], 1800 + 1);
        assert_eq!(availability, Availability::Free(vec![Gap::Before(at(10, 0)), Gap::After(at(12, 0))]));

        let rows = vec![stored("10:00", "11:00"), stored("11:30", "12:00")];
        let availability = resolve(rows, &[], 1800);
        assert_eq!(
            availability,
            Availability::Free(vec![Gap::Before(at(10, 0)), Gap::Between(at(11, 0), at(11, 30)), Gap::After(at(12, 0))])
        );
    }

    #[test]
    fn test_nothing_occupied_is_anytime() {
        assert_eq!(resolve(Vec::new(), &[], 60), Availability::Anytime);
    }

    #[test]
    fn test_unreadable_rows_are_skipped() {
        let rows = vec!["garbage".to_string(), stored("10:00", "11:00")];
        assert_eq!(resolve(rows, &[], 60), Availability::Free(vec![Gap::Before(at(10, 0)), Gap::After(at(11, 0))]));
    }

    #[test]
    fn test_merge_overlapping_and_touching() {
        let merged = merge(vec![
            Range::bounded(at(11, 0), at(12, 0)),
            Range::bounded(at(9, 0), at(10, 0)),
            Range::bounded(at(10, 0), at(10, 30)),
            Range::bounded(at(11, 30), at(11, 45)),
        ]);
        assert_eq!(merged, vec![Range::bounded(at(9, 0), at(10, 30)), Range::bounded(at(11, 0), at(12, 0))]);
    }

    #[test]
    fn test_merge_is_order_independent() {
        let ranges = vec![
            Range::bounded(at(8, 0), at(9, 0)),
            Range::bounded(at(8, 30), at(10, 0)),
            Range::bounded(at(13, 0), at(14, 0)),
            Range {
                start: Lower::Unbounded,
                end: Upper::At(at(7, 0)),
            },
            Range {
                start: Lower::At(at(18, 0)),
                end: Upper::Unbounded,
            },
        ];
        let expected = free_gaps(&merge(ranges.clone()), 1800);
        let mut rotated = ranges.clone();
        for _ in 0..ranges.len() {
            rotated.rotate_left(1);
            assert_eq!(free_gaps(&merge(rotated.clone()), 1800), expected);
        }
        let mut reversed = ranges;
        reversed.reverse();
        assert_eq!(free_gaps(&merge(reversed), 1800), expected);
        assert_eq!(
            expected,
            vec![Gap::Between(at(7, 0), at(8, 0)), Gap::Between(at(10, 0), at(13, 0)), Gap::Between(at(14, 0), at(18, 0))]
        );
    }

    #[test]
    fn test_window_bounds_close_the_horizon() {
        let window = Constraint::single("slot", Comparator::Eq, stored("08:00", "18:00"));
        let rows = vec![stored("10:00", "11:00")];
        assert_eq!(
            resolve(rows, &[window], 3600),
            Availability::Free(vec![Gap::Between(at(8, 0), at(10, 0)), Gap::Between(at(11, 0), at(18, 0))])
        );
    }

    #[test]
    fn test_single_sided_bounds_keep_tightest() {
        let constraints = vec![
            Constraint::single("slot", Comparator::Gte, "2024-01-01T08:00:00".to_string()),
            Constraint::single("slot", Comparator::Gt, "2024-01-01T09:00:00".to_string()),
            Constraint::single("slot", Comparator::Lt, "2024-01-01T17:00:00".to_string()),
            Constraint::single("slot", Comparator::Lt, "2024-01-01T16:00:00".to_string()),
        ];
        let bounds = partition_bounds(&constraints);
        assert_eq!(bounds.early, Some(at(9, 0)));
        assert_eq!(bounds.late, Some(at(16, 0)));
    }

    #[test]
    fn test_partition_roles() {
        let constraints = vec![
            Constraint::single("slot", Comparator::Eq, stored("08:00", "18:00")),
            Constraint::single("slot", Comparator::Ne, stored("12:00", "13:00")),
        ];
        let bounds = partition_bounds(&constraints);
        assert_eq!(bounds.early, Some(at(8, 0)));
        assert_eq!(bounds.late, Some(at(18, 0)));
        assert_eq!(bounds.occupied, vec![Range::bounded(at(12, 0), at(13, 0))]);
    }

    #[test]
    fn test_excluded_interval_is_occupied() {
        let outside = Constraint::Either {
            column: "slot".to_string(),
            first: (Comparator::Lt, "2024-01-01T12:00:00".to_string()),
            second: (Comparator::Gte, "2024-01-01T13:00:00".to_string()),
        };
        assert_eq!(
            resolve(Vec::new(), &[outside], 60),
            Availability::Free(vec![Gap::Before(at(12, 0)), Gap::After(at(13, 0))])
        );
    }

    #[test]
    fn test_fully_booked() {
        let constraints = vec![Constraint::single("slot", Comparator::Eq, stored("10:00", "12:00"))];
        let rows = vec![stored("09:00", "12:30")];
        assert_eq!(resolve(rows, &constraints, 60), Availability::Booked);
    }
}
