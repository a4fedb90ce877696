//! Collaborators the message pipeline reads from and writes to.
//!
//! The SQLite implementations live in [`crate::db`]; tests substitute
//! in-memory doubles.

use crate::libs::column::TableDef;
use crate::libs::query::Query;
use crate::libs::shortcut::ShortcutDefinition;
use anyhow::Result;
use chrono::NaiveDateTime;
use std::collections::BTreeMap;

/// Sender metadata stored with every inserted row.
#[derive(Debug, Clone, PartialEq)]
pub struct RowOrigin {
    pub phone: String,
    pub timestamp: NaiveDateTime,
}

/// Table and shortcut definitions, read fresh for every message.
pub trait MetadataProvider {
    fn data_tables(&self) -> Result<Vec<TableDef>>;

    /// Shortcuts in table order.
    fn shortcuts(&self) -> Result<Vec<ShortcutDefinition>>;
}

pub trait RowStore {
    /// Returns the values of `columns` (keys) for every row matching `query`.
    fn query(&self, table: &TableDef, columns: &[&str], query: &Query) -> Result<Vec<Vec<Option<String>>>>;

    /// Inserts a row of column-key to value pairs and returns its id.
    fn insert(&self, table: &TableDef, values: &BTreeMap<String, String>, origin: &RowOrigin) -> Result<i64>;
}

pub trait PasswordStore {
    /// Committed passwords of `access_table` issued to `phone`.
    fn passwords(&self, access_table: &str, phone: &str) -> Result<Vec<String>>;
}
