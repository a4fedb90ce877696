//! Row storage for data tables.
//!
//! Queries are assembled from the compiled [`Query`]: every constraint is an
//! `AND` term, an either-constraint becomes a parenthesized `OR` pair, and
//! all operands are bound parameters. Column names come from the table
//! definition only.

use crate::db::db::Db;
use crate::db::tables::{physical_name, quoted, SAVED_COMPLETE};
use crate::libs::column::TableDef;
use crate::libs::datetime;
use crate::libs::messages::Message;
use crate::libs::query::{Constraint, Query};
use crate::libs::store::{RowOrigin, RowStore};
use crate::msg_error_anyhow;
use anyhow::Result;
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection};
use std::collections::BTreeMap;

/// Resolves a column key to its quoted SQL name, refusing unknown or
/// non-persisted columns.
fn column_sql(table: &TableDef, key: &str) -> Result<String> {
    match table.column_by_key(key) {
        Some(column) if column.persisted => Ok(quoted(&column.key)),
        _ => Err(msg_error_anyhow!(Message::UnknownColumn(key.to_string()))),
    }
}

/// Builds the SELECT statement and its parameters.
pub fn build_select(table: &TableDef, columns: &[&str], query: &Query) -> Result<(String, Vec<String>)> {
    let projection = columns.iter().map(|key| column_sql(table, key)).collect::<Result<Vec<_>>>()?;
    let mut sql = format!("SELECT {} FROM {} WHERE _saved = ?", projection.join(", "), physical_name(&table.id));
    let mut params = vec![SAVED_COMPLETE.to_string()];

    for constraint in &query.constraints {
        let column = column_sql(table, constraint.column())?;
        match constraint {
            Constraint::Single { comparator, value, .. } => {
                sql.push_str(&format!(" AND {} {} ?", column, comparator.sql()));
                params.push(value.clone());
            }
            Constraint::Either { first, second, .. } => {
                sql.push_str(&format!(" AND ({} {} ? OR {} {} ?)", column, first.0.sql(), column, second.0.sql()));
                params.push(first.1.clone());
                params.push(second.1.clone());
            }
        }
    }

    match &query.order_by {
        Some(order_by) => sql.push_str(&format!(" ORDER BY {} {}, _id", column_sql(table, &order_by.column)?, order_by.order.sql())),
        None => sql.push_str(" ORDER BY _id"),
    }
    Ok((sql, params))
}

fn value_to_string(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Integer(i) => Some(i.to_string()),
        Value::Real(f) => Some(f.to_string()),
        Value::Text(s) => Some(s),
        Value::Blob(b) => Some(String::from_utf8_lossy(&b).into_owned()),
    }
}

pub struct Rows {
    conn: Connection,
}

impl Rows {
    pub fn new() -> Result<Self> {
        Ok(Self::with_db(Db::new()?))
    }

    pub fn with_db(db: Db) -> Self {
        Rows { conn: db.conn }
    }
}

impl RowStore for Rows {
    fn query(&self, table: &TableDef, columns: &[&str], query: &Query) -> Result<Vec<Vec<Option<String>>>> {
        let (sql, params) = build_select(table, columns, query)?;
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params_from_iter(params.iter()), |row| {
                (0..columns.len())
                    .map(|i| row.get::<_, Value>(i).map(value_to_string))
                    .collect::<rusqlite::Result<Vec<_>>>()
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    fn insert(&self, table: &TableDef, values: &BTreeMap<String, String>, origin: &RowOrigin) -> Result<i64> {
        let mut names = vec!["_saved".to_string(), "_phone".to_string(), "_timestamp".to_string()];
        let mut params = vec![
            SAVED_COMPLETE.to_string(),
            origin.phone.clone(),
            datetime::format_for_db(&origin.timestamp),
        ];
        for (key, value) in values {
            names.push(column_sql(table, key)?);
            params.push(value.clone());
        }

        let placeholders = vec!["?"; names.len()].join(", ");
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            physical_name(&table.id),
            names.join(", "),
            placeholders
        );
        self.conn.execute(&sql, params_from_iter(params.iter()))?;
        Ok(self.conn.last_insert_rowid())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::column::{ColumnRef, ColumnType};
    use crate::libs::query::{Comparator, OrderBy, SortOrder};

    fn table() -> TableDef {
        let mut table = TableDef::new("visits", "visits");
        let mut note = ColumnRef::new("note", "note", ColumnType::Text);
        note.persisted = false;
        table.columns = vec![ColumnRef::new("name", "name", ColumnType::Text), ColumnRef::new("age", "age", ColumnType::Number), note];
        table
    }

    #[test]
    fn test_build_select() {
        let query = Query {
            constraints: vec![
                Constraint::single("age", Comparator::Gt, "30".to_string()),
                Constraint::Either {
                    column: "name".to_string(),
                    first: (Comparator::Lt, "B".to_string()),
                    second: (Comparator::Gte, "C".to_string()),
                },
            ],
            order_by: Some(OrderBy {
                column: "age".to_string(),
                order: SortOrder::Desc,
            }),
        };
        let (sql, params) = build_select(&table(), &["name"], &query).unwrap();
        assert_eq!(
            sql,
            "SELECT \"name\" FROM \"t_visits\" WHERE _saved = ? AND \"age\" > ? AND (\"name\" < ? OR \"name\" >= ?) ORDER BY \"age\" DESC, _id"
        );
        assert_eq!(params, vec!["COMPLETE", "30", "B", "C"]);
    }

    #[test]
    fn test_unknown_or_transient_columns_are_refused() {
        assert!(build_select(&table(), &["height"], &Query::default()).is_err());
        assert!(build_select(&table(), &["note"], &Query::default()).is_err());
    }
}
