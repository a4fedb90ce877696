//! Command parsing for ADD and QUERY messages.
//!
//! ADD messages are a list of `+label value` segments. QUERY messages are
//! scanned into [`Tokens`] first and compiled afterwards, so tokenizing can
//! be tested on its own.
//!
//! | Operator | Meaning                                  |
//! |----------|------------------------------------------|
//! | `?col`   | project `col` (in order of appearance)   |
//! | `~col d` | order by `col`, descending if `d...`     |
//! | `/col 1h`| free slots of at least 1h in `col`       |
//! | `=col v` | equal / inside interval                  |
//! | `<col v` | before / less than                       |
//! | `>col v` | after / greater than                     |
//! | `!col v` | not equal / outside interval             |

use crate::libs::classifier::CommandKind;
use crate::libs::column::{ColumnRef, ColumnType, TableDef};
use crate::libs::datetime::{self, TemporalParser};
use crate::libs::error::{Outcome, Rejection};
use crate::libs::messages::Message;
use crate::libs::query::{self, Comparator, OrderBy, Query, SortOrder};
use std::collections::BTreeMap;

const OPERATOR_TAGS: &[u8] = b"=<>!/~?";
const ADD_DELIMITER: &str = " +";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Compare(Comparator),
    FreeSlot,
    Order,
    Project,
}

impl Operator {
    fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            b'=' => Some(Operator::Compare(Comparator::Eq)),
            b'<' => Some(Operator::Compare(Comparator::Lt)),
            b'>' => Some(Operator::Compare(Comparator::Gt)),
            b'!' => Some(Operator::Compare(Comparator::Ne)),
            b'/' => Some(Operator::FreeSlot),
            b'~' => Some(Operator::Order),
            b'?' => Some(Operator::Project),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub operator: Operator,
    pub label: &'a str,
    pub operand: Option<&'a str>,
}

impl<'a> Token<'a> {
    /// Parses `<tag><label>[ <operand>]`.
    fn parse(raw: &'a str) -> Option<Self> {
        let operator = Operator::from_tag(*raw.as_bytes().first()?)?;
        let body = &raw[1..];
        let (label, operand) = match body.char_indices().skip(1).find(|(_, c)| *c == ' ') {
            Some((idx, _)) => (body[..idx].trim(), Some(body[idx..].trim()).filter(|v| !v.is_empty())),
            None => (body.trim(), None),
        };
        Some(Self { operator, label, operand })
    }
}

/// Lazy scanner over the operator tokens of a query message.
///
/// Scanning starts after the target token. A token runs from its operator
/// tag up to the space of the next ` <tag>` pair or the end of the message.
/// A clone scans independently from the same position.
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    message: &'a str,
    cursor: usize,
}

impl<'a> Tokens<'a> {
    pub fn new(message: &'a str) -> Self {
        Self {
            message,
            cursor: message.find(' ').unwrap_or(message.len()),
        }
    }

    fn next_operator(&self, from: usize) -> Option<usize> {
        let bytes = self.message.as_bytes();
        (from..bytes.len().saturating_sub(1)).find(|&i| bytes[i] == b' ' && OPERATOR_TAGS.contains(&bytes[i + 1]))
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.next_operator(self.cursor)? + 1;
        let end = self.next_operator(start).unwrap_or(self.message.len());
        self.cursor = end;
        Token::parse(&self.message[start..end])
    }
}

/// Free-slot request: the range column and the minimum gap in seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct FreeSlot {
    pub column: ColumnRef,
    pub min_seconds: i64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParsedQuery {
    pub projections: Vec<ColumnRef>,
    pub query: Query,
    pub free_slot: Option<FreeSlot>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParsedCommand {
    Add(BTreeMap<String, String>),
    Query(ParsedQuery),
}

fn malformed(message: Message) -> Rejection {
    Rejection::Malformed(message)
}

fn resolve<'t>(table: &'t TableDef, label: &str) -> Outcome<&'t ColumnRef> {
    table.column_by_label(label).ok_or_else(|| malformed(Message::UnknownColumn(label.to_string())))
}

/// Parses a classified, password-stripped message.
pub fn parse(kind: CommandKind, message: &str, table: &TableDef, parser: &TemporalParser) -> Outcome<ParsedCommand> {
    match kind {
        CommandKind::Add => parse_add(message, table, parser).map(ParsedCommand::Add),
        CommandKind::Query => parse_query(message, table, parser).map(ParsedCommand::Query),
    }
}

/// Splits `... +label value +label value` into `(label, value)` pairs.
pub fn split_add_segments(message: &str) -> Outcome<Vec<(&str, &str)>> {
    let starts: Vec<usize> = message.match_indices(ADD_DELIMITER).map(|(idx, _)| idx).collect();
    let mut segments = Vec::with_capacity(starts.len());
    for (n, &at) in starts.iter().enumerate() {
        let end = starts.get(n + 1).copied().unwrap_or(message.len());
        let segment = &message[at + ADD_DELIMITER.len()..end];
        match segment.split_once(' ') {
            Some((label, value)) if !label.is_empty() => segments.push((label, value.trim())),
            _ => return Err(malformed(Message::MalformedAddSegment)),
        }
    }
    Ok(segments)
}

/// Builds the column-key to stored-value map for an insert.
///
/// Columns that are not SMS-insertable are dropped without error.
pub fn parse_add(message: &str, table: &TableDef, parser: &TemporalParser) -> Outcome<BTreeMap<String, String>> {
    let mut values = BTreeMap::new();
    for (label, value) in split_add_segments(message)? {
        let column = resolve(table, label)?;
        let stored = column
            .coerce(value, parser)
            .ok_or_else(|| malformed(Message::InvalidValue(label.to_string(), value.to_string())))?;
        if column.sms_in {
            values.insert(column.key.clone(), stored);
        }
    }
    Ok(values)
}

pub fn parse_query(message: &str, table: &TableDef, parser: &TemporalParser) -> Outcome<ParsedQuery> {
    let mut parsed = ParsedQuery::default();

    for token in Tokens::new(message) {
        let column = resolve(table, token.label)?;
        match token.operator {
            Operator::Project => parsed.projections.push(column.clone()),
            Operator::Order => {
                let order = match token.operand {
                    Some(value) if value.starts_with('d') => SortOrder::Desc,
                    _ => SortOrder::Asc,
                };
                parsed.query.order_by = Some(OrderBy {
                    column: column.key.clone(),
                    order,
                });
            }
            Operator::FreeSlot => {
                if parsed.free_slot.is_some() {
                    return Err(malformed(Message::FreeSlotAlreadySet));
                }
                if column.column_type != ColumnType::DateRange {
                    return Err(malformed(Message::FreeSlotNotRange(column.label.clone())));
                }
                let value = token.operand.unwrap_or_default();
                let min_seconds = datetime::parse_duration(value).ok_or_else(|| malformed(Message::InvalidDuration(value.to_string())))?;
                parsed.free_slot = Some(FreeSlot {
                    column: column.clone(),
                    min_seconds,
                });
            }
            Operator::Compare(comparator) => {
                let value = token.operand.ok_or_else(|| malformed(Message::MissingOperand(column.label.clone())))?;
                let compiled = query::compile_constraint(column, comparator, value, parser)?;
                parsed.query.constraints.extend(compiled);
            }
        }
    }
    Ok(parsed)
}
