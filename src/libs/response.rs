//! Renders query results and free-slot listings as SMS text.

use crate::libs::column::ColumnRef;
use crate::libs::formatter;
use crate::libs::free_slot::{Availability, Gap};
use crate::libs::messages::Message;

const ROW_SEPARATOR: &str = ";";
const FIELD_SEPARATOR: &str = ",";

/// Formats up to `limit` rows as `label:value,label:value;...`.
///
/// `columns` are the projected columns, in the same order as each row's
/// values. Missing values render as empty strings.
pub fn format_rows(columns: &[&ColumnRef], rows: &[Vec<Option<String>>], limit: usize) -> String {
    if rows.is_empty() {
        return Message::NoRowsFound.to_string();
    }
    rows.iter()
        .take(limit)
        .map(|row| {
            columns
                .iter()
                .zip(row)
                .map(|(column, value)| format!("{}:{}", column.response_label(), value.as_deref().unwrap_or_default()))
                .collect::<Vec<_>>()
                .join(FIELD_SEPARATOR)
        })
        .collect::<Vec<_>>()
        .join(ROW_SEPARATOR)
}

fn format_gap(gap: &Gap, date_format: &str) -> String {
    match gap {
        Gap::Before(end) => format!("before {}", formatter::format_instant(end, date_format)),
        Gap::Between(start, end) => format!(
            "{}-{}",
            formatter::format_instant(start, date_format),
            formatter::format_instant(end, date_format)
        ),
        Gap::After(start) => format!("after {}", formatter::format_instant(start, date_format)),
    }
}

/// Formats a free-slot result, e.g. `before 2024-01-01T10:00;after 2024-01-01T12:00`.
pub fn format_availability(availability: &Availability, date_format: &str) -> String {
    match availability {
        Availability::Anytime => Message::Anytime.to_string(),
        Availability::Booked => Message::NoFreeSlots.to_string(),
        Availability::Free(gaps) => gaps
            .iter()
            .map(|gap| format_gap(gap, date_format))
            .collect::<Vec<_>>()
            .join(ROW_SEPARATOR),
    }
}
