//! Store-level query model and the constraint compiler.
//!
//! A [`Query`] is an immutable conjunction of [`Constraint`]s plus an
//! optional ordering. Temporal operands are canonicalized here, so every
//! constraint value compares correctly as a plain string.

use crate::libs::column::{ColumnRef, ColumnType};
use crate::libs::datetime::{self, Interval, TemporalParser};
use crate::libs::error::{Outcome, Rejection};
use crate::libs::messages::Message;
use chrono::NaiveDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
    Eq,
    Lt,
    Gt,
    Gte,
    Ne,
}

impl Comparator {
    pub fn sql(&self) -> &'static str {
        match self {
            Comparator::Eq => "=",
            Comparator::Lt => "<",
            Comparator::Gt => ">",
            Comparator::Gte => ">=",
            Comparator::Ne => "<>",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    Single {
        column: String,
        comparator: Comparator,
        value: String,
    },
    /// Holds when either alternative holds.
    Either {
        column: String,
        first: (Comparator, String),
        second: (Comparator, String),
    },
}

impl Constraint {
    pub fn single(column: &str, comparator: Comparator, value: String) -> Self {
        Constraint::Single {
            column: column.to_string(),
            comparator,
            value,
        }
    }

    /// Key of the constrained column.
    pub fn column(&self) -> &str {
        match self {
            Constraint::Single { column, .. } | Constraint::Either { column, .. } => column,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    pub column: String,
    pub order: SortOrder,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    pub constraints: Vec<Constraint>,
    pub order_by: Option<OrderBy>,
}

impl Query {
    /// Splits off the constraints on `column`, returning them and the query
    /// that remains without them.
    pub fn partition(&self, column: &str) -> (Vec<Constraint>, Query) {
        let (pulled, rest): (Vec<Constraint>, Vec<Constraint>) =
            self.constraints.iter().cloned().partition(|constraint| constraint.column() == column);
        (
            pulled,
            Query {
                constraints: rest,
                order_by: self.order_by.clone(),
            },
        )
    }
}

/// Compiles `column <comparator> value` into store constraints.
///
/// `comparator` is one of the user operators (`Eq`, `Lt`, `Gt`, `Ne`).
pub fn compile_constraint(column: &ColumnRef, comparator: Comparator, value: &str, parser: &TemporalParser) -> Outcome<Vec<Constraint>> {
    if !column.column_type.is_temporal() {
        let coerced = column
            .coerce(value, parser)
            .ok_or_else(|| Rejection::Malformed(Message::InvalidValue(column.label.clone(), value.to_string())))?;
        return Ok(vec![Constraint::single(&column.key, comparator, coerced)]);
    }

    if let Some(interval) = parser.parse_interval(value) {
        return Ok(compile_interval(column, comparator, &interval));
    }
    match parser.parse_instant(value) {
        Some(instant) => compile_instant(column, comparator, &instant),
        None => Err(Rejection::Malformed(Message::InvalidValue(column.label.clone(), value.to_string()))),
    }
}

fn compile_instant(column: &ColumnRef, comparator: Comparator, instant: &NaiveDateTime) -> Outcome<Vec<Constraint>> {
    let is_range = column.column_type == ColumnType::DateRange;
    match comparator {
        Comparator::Eq if is_range => Err(Rejection::Malformed(Message::RangeExactInstant(column.label.clone()))),
        Comparator::Ne if is_range => Err(Rejection::Malformed(Message::RangeInstantInequality(column.label.clone()))),
        _ => Ok(vec![Constraint::single(&column.key, comparator, datetime::format_for_db(instant))]),
    }
}

fn compile_interval(column: &ColumnRef, comparator: Comparator, interval: &Interval) -> Vec<Constraint> {
    let key = column.key.as_str();
    let start = datetime::format_for_db(&interval.start);
    let end = datetime::format_for_db(&interval.end);
    let is_range = column.column_type == ColumnType::DateRange;

    match comparator {
        Comparator::Eq if is_range => vec![Constraint::single(key, Comparator::Eq, datetime::format_interval_for_db(interval))],
        Comparator::Eq => vec![
            Constraint::single(key, Comparator::Gte, start),
            Constraint::single(key, Comparator::Lt, end),
        ],
        Comparator::Lt => vec![Constraint::single(key, Comparator::Lt, start)],
        Comparator::Gt | Comparator::Gte => vec![Constraint::single(key, Comparator::Gte, end)],
        Comparator::Ne if is_range => vec![Constraint::single(key, Comparator::Ne, datetime::format_interval_for_db(interval))],
        Comparator::Ne => vec![Constraint::Either {
            column: key.to_string(),
            first: (Comparator::Lt, start),
            second: (Comparator::Gte, end),
        }],
    }
}
