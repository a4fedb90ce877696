//! Table and column metadata as seen by the message interpreter.
//!
//! The definitions are owned by the metadata store and reloaded for every
//! inbound message; the interpreter only reads them.

use crate::libs::datetime::{self, TemporalParser};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;

/// Declared semantic type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ColumnType {
    Text,
    Number,
    Date,
    #[value(name = "datetime")]
    #[serde(rename = "datetime")]
    DateTime,
    Time,
    DateRange,
}

impl ColumnType {
    /// Date, datetime, time and date-range columns use the temporal grammar.
    pub fn is_temporal(&self) -> bool {
        matches!(self, ColumnType::Date | ColumnType::DateTime | ColumnType::Time | ColumnType::DateRange)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Text => "text",
            ColumnType::Number => "number",
            ColumnType::Date => "date",
            ColumnType::DateTime => "datetime",
            ColumnType::Time => "time",
            ColumnType::DateRange => "date-range",
        }
    }

    /// SQLite column affinity; numeric columns compare as numbers.
    pub fn sql_affinity(&self) -> &'static str {
        match self {
            ColumnType::Number => "NUMERIC",
            _ => "TEXT",
        }
    }
}

impl Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColumnType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(ColumnType::Text),
            "number" => Ok(ColumnType::Number),
            "date" => Ok(ColumnType::Date),
            "datetime" => Ok(ColumnType::DateTime),
            "time" => Ok(ColumnType::Time),
            "date-range" => Ok(ColumnType::DateRange),
            other => Err(format!("unknown column type '{}'", other)),
        }
    }
}

/// A column of a data table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnRef {
    /// Stable identity; also the physical column name.
    pub key: String,
    /// Name shown in management views.
    pub display_name: String,
    /// Label users type in messages (`?label`, `+label`).
    pub label: String,
    pub column_type: ColumnType,
    /// Whether ADD messages may write this column.
    pub sms_in: bool,
    /// Short label used in query responses instead of the display name.
    pub sms_label: Option<String>,
    /// Whether the column is stored and can be retrieved.
    pub persisted: bool,
}

impl ColumnRef {
    pub fn new(key: &str, label: &str, column_type: ColumnType) -> Self {
        Self {
            key: key.to_string(),
            display_name: label.to_string(),
            label: label.to_string(),
            column_type,
            sms_in: true,
            sms_label: None,
            persisted: true,
        }
    }

    /// Label rendered in query responses.
    pub fn response_label(&self) -> &str {
        self.sms_label.as_deref().filter(|l| !l.is_empty()).unwrap_or(&self.display_name)
    }

    /// Validates a user-supplied value and converts it to its stored form.
    ///
    /// Temporal values are canonicalized; date-range columns require an
    /// interval. Returns `None` when the value does not fit the type.
    pub fn coerce(&self, value: &str, parser: &TemporalParser) -> Option<String> {
        match self.column_type {
            ColumnType::Text => Some(value.to_string()),
            ColumnType::Number => {
                let trimmed = value.trim();
                trimmed.parse::<f64>().ok().filter(|n| n.is_finite()).map(|_| trimmed.to_string())
            }
            ColumnType::Date | ColumnType::DateTime | ColumnType::Time => {
                parser.parse_instant(value).map(|instant| datetime::format_for_db(&instant))
            }
            ColumnType::DateRange => parser.parse_interval(value).map(|interval| datetime::format_interval_for_db(&interval)),
        }
    }
}

/// A queryable data table with its columns in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableDef {
    pub id: String,
    pub display_name: String,
    /// Name of the password list guarding this table, if any.
    pub access_control: Option<String>,
    pub columns: Vec<ColumnRef>,
}

impl TableDef {
    pub fn new(id: &str, display_name: &str) -> Self {
        Self {
            id: id.to_string(),
            display_name: display_name.to_string(),
            access_control: None,
            columns: Vec::new(),
        }
    }

    pub fn column_by_label(&self, label: &str) -> Option<&ColumnRef> {
        self.columns.iter().find(|c| c.label == label)
    }

    pub fn column_by_key(&self, key: &str) -> Option<&ColumnRef> {
        self.columns.iter().find(|c| c.key == key)
    }
}
