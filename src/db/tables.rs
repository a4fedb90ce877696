//! Data table and column definitions.
//!
//! Definitions live in `data_tables` and `data_columns`. Each table's rows
//! live in a physical table `t_<id>` with the system columns below plus one
//! column per persisted element key.
//!
//! | Column       | Meaning                                   |
//! |--------------|-------------------------------------------|
//! | `_id`        | row id                                    |
//! | `_saved`     | row status; only `COMPLETE` rows are read |
//! | `_phone`     | sender of the inserting message           |
//! | `_timestamp` | receive time, canonical encoding          |

use crate::db::db::Db;
use crate::libs::column::{ColumnRef, ColumnType, TableDef};
use crate::libs::messages::Message;
use crate::libs::shortcut::ShortcutDefinition;
use crate::libs::store::MetadataProvider;
use crate::{msg_bail_anyhow, msg_error_anyhow};
use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension};

/// Status of a committed row.
pub const SAVED_COMPLETE: &str = "COMPLETE";

const INSERT_TABLE: &str = "INSERT INTO data_tables (id, display_name, access_control) VALUES (?1, ?2, ?3)";

const INSERT_COLUMN: &str = "INSERT INTO data_columns
    (table_id, element_key, display_name, label, column_type, sms_in, sms_label, persisted)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)";

const SELECT_TABLES: &str = "SELECT id, display_name, access_control FROM data_tables ORDER BY display_name";

const SELECT_TABLE: &str = "SELECT id, display_name, access_control FROM data_tables WHERE id = ?1";

const SELECT_COLUMNS: &str = "SELECT element_key, display_name, label, column_type, sms_in, sms_label, persisted
    FROM data_columns WHERE table_id = ?1 ORDER BY id";

const UPDATE_ACCESS_CONTROL: &str = "UPDATE data_tables SET access_control = ?2 WHERE id = ?1";

const DELETE_TABLE: &str = "DELETE FROM data_tables WHERE id = ?1";

/// Name of the physical row table for a table id.
pub fn physical_name(table_id: &str) -> String {
    format!("\"t_{}\"", table_id)
}

/// Quotes a validated column key for SQL.
pub fn quoted(key: &str) -> String {
    format!("\"{}\"", key)
}

/// Identifiers become SQL names: ASCII letters, digits and `_`, not
/// starting with `_` (reserved for system columns).
pub fn validate_identifier(name: &str) -> Result<()> {
    let valid = !name.is_empty() && !name.starts_with('_') && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if !valid {
        msg_bail_anyhow!(Message::InvalidIdentifier(name.to_string()));
    }
    Ok(())
}

fn validate_display_name(name: &str) -> Result<()> {
    if name.is_empty() || name.contains(char::is_whitespace) {
        msg_bail_anyhow!(Message::InvalidIdentifier(name.to_string()));
    }
    Ok(())
}

fn read_columns(conn: &Connection, table_id: &str) -> Result<Vec<ColumnRef>> {
    let mut stmt = conn.prepare(SELECT_COLUMNS)?;
    let rows = stmt.query_map(params![table_id], |row| {
        let column_type: String = row.get(3)?;
        Ok((
            ColumnRef {
                key: row.get(0)?,
                display_name: row.get(1)?,
                label: row.get(2)?,
                column_type: ColumnType::Text,
                sms_in: row.get(4)?,
                sms_label: row.get(5)?,
                persisted: row.get(6)?,
            },
            column_type,
        ))
    })?;

    let mut columns = Vec::new();
    for row in rows {
        let (mut column, column_type) = row?;
        column.column_type = column_type.parse().map_err(anyhow::Error::msg)?;
        columns.push(column);
    }
    Ok(columns)
}

fn read_table(row: &rusqlite::Row) -> rusqlite::Result<TableDef> {
    Ok(TableDef {
        id: row.get(0)?,
        display_name: row.get(1)?,
        access_control: row.get(2)?,
        columns: Vec::new(),
    })
}

/// Loads every table definition with its columns.
pub fn load_tables(conn: &Connection) -> Result<Vec<TableDef>> {
    let mut stmt = conn.prepare(SELECT_TABLES)?;
    let mut tables = stmt.query_map([], read_table)?.collect::<Result<Vec<_>, _>>()?;
    for table in &mut tables {
        table.columns = read_columns(conn, &table.id)?;
    }
    Ok(tables)
}

pub struct Tables {
    conn: Connection,
}

impl Tables {
    pub fn new() -> Result<Self> {
        Ok(Self::with_db(Db::new()?))
    }

    pub fn with_db(db: Db) -> Self {
        Tables { conn: db.conn }
    }

    /// Registers a table and creates its row table, including any columns
    /// already listed in `def`.
    pub fn create(&mut self, def: &TableDef) -> Result<()> {
        validate_identifier(&def.id)?;
        validate_display_name(&def.display_name)?;
        if self.get(&def.id)?.is_some() {
            msg_bail_anyhow!(Message::TableAlreadyExists(def.id.clone()));
        }

        let tx = self.conn.transaction()?;
        tx.execute(INSERT_TABLE, params![def.id, def.display_name, def.access_control])?;
        tx.execute(
            &format!(
                "CREATE TABLE {} (
                    _id INTEGER PRIMARY KEY,
                    _saved TEXT NOT NULL DEFAULT '{}',
                    _phone TEXT,
                    _timestamp TEXT
                )",
                physical_name(&def.id),
                SAVED_COMPLETE
            ),
            [],
        )?;
        for column in &def.columns {
            insert_column(&tx, &def.id, column)?;
        }
        tx.commit()?;
        Ok(())
    }

    pub fn add_column(&mut self, table_id: &str, column: &ColumnRef) -> Result<()> {
        let def = self.get(table_id)?.ok_or_else(|| msg_error_anyhow!(Message::TableNotFound(table_id.to_string())))?;
        if def.column_by_key(&column.key).is_some() || def.column_by_label(&column.label).is_some() {
            msg_bail_anyhow!(Message::ColumnAlreadyExists(table_id.to_string(), column.key.clone()));
        }
        let tx = self.conn.transaction()?;
        insert_column(&tx, table_id, column)?;
        tx.commit()?;
        Ok(())
    }

    /// Guards the table with a password list, or removes the guard.
    pub fn set_access_control(&mut self, table_id: &str, access_table: Option<&str>) -> Result<()> {
        let affected = self.conn.execute(UPDATE_ACCESS_CONTROL, params![table_id, access_table])?;
        if affected == 0 {
            msg_bail_anyhow!(Message::TableNotFound(table_id.to_string()));
        }
        Ok(())
    }

    pub fn get_all(&self) -> Result<Vec<TableDef>> {
        load_tables(&self.conn)
    }

    pub fn get(&self, table_id: &str) -> Result<Option<TableDef>> {
        let table = self.conn.query_row(SELECT_TABLE, params![table_id], read_table).optional()?;
        match table {
            Some(mut table) => {
                table.columns = read_columns(&self.conn, &table.id)?;
                Ok(Some(table))
            }
            None => Ok(None),
        }
    }

    /// Removes a table's definition and all of its rows.
    pub fn delete(&mut self, table_id: &str) -> Result<()> {
        validate_identifier(table_id)?;
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM data_columns WHERE table_id = ?1", params![table_id])?;
        let affected = tx.execute(DELETE_TABLE, params![table_id])?;
        if affected == 0 {
            msg_bail_anyhow!(Message::TableNotFound(table_id.to_string()));
        }
        tx.execute(&format!("DROP TABLE IF EXISTS {}", physical_name(table_id)), [])?;
        tx.commit()?;
        Ok(())
    }
}

fn insert_column(conn: &Connection, table_id: &str, column: &ColumnRef) -> Result<()> {
    validate_identifier(&column.key)?;
    validate_display_name(&column.label)?;
    conn.execute(
        INSERT_COLUMN,
        params![
            table_id,
            column.key,
            column.display_name,
            column.label,
            column.column_type.as_str(),
            column.sms_in,
            column.sms_label,
            column.persisted
        ],
    )?;
    if column.persisted {
        conn.execute(
            &format!(
                "ALTER TABLE {} ADD COLUMN {} {}",
                physical_name(table_id),
                quoted(&column.key),
                column.column_type.sql_affinity()
            ),
            [],
        )?;
    }
    Ok(())
}

/// Reads table and shortcut definitions for the message pipeline.
pub struct Metadata {
    conn: Connection,
}

impl Metadata {
    pub fn new() -> Result<Self> {
        Ok(Self::with_db(Db::new()?))
    }

    pub fn with_db(db: Db) -> Self {
        Metadata { conn: db.conn }
    }
}

impl MetadataProvider for Metadata {
    fn data_tables(&self) -> Result<Vec<TableDef>> {
        load_tables(&self.conn)
    }

    fn shortcuts(&self) -> Result<Vec<ShortcutDefinition>> {
        crate::db::shortcuts::load_definitions(&self.conn)
    }
}
