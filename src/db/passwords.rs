//! Password lists for guarded tables.
//!
//! A list is identified by its access-table name. Each entry binds a
//! password to one phone number; revoking an entry changes its status so
//! it no longer authenticates but stays on record.

use crate::db::db::Db;
use crate::db::tables::SAVED_COMPLETE;
use crate::libs::messages::Message;
use crate::libs::store::PasswordStore;
use crate::msg_bail_anyhow;
use anyhow::Result;
use rusqlite::{params, Connection};

pub const SAVED_REVOKED: &str = "REVOKED";

const INSERT_PASSWORD: &str = "INSERT INTO passwords (access_table, phone, password, saved) VALUES (?1, ?2, ?3, ?4)";

const SELECT_LIST: &str = "SELECT id, access_table, phone, password, saved FROM passwords WHERE access_table = ?1 ORDER BY id";

const SELECT_VALID: &str = "SELECT password FROM passwords WHERE access_table = ?1 AND phone = ?2 AND saved = ?3";

const REVOKE_PASSWORD: &str = "UPDATE passwords SET saved = ?2 WHERE id = ?1 AND saved <> ?2";

#[derive(Debug, Clone, PartialEq)]
pub struct PasswordEntry {
    pub id: i64,
    pub access_table: String,
    pub phone: String,
    pub password: String,
    pub saved: String,
}

pub struct Passwords {
    conn: Connection,
}

impl Passwords {
    pub fn new() -> Result<Self> {
        Ok(Self::with_db(Db::new()?))
    }

    pub fn with_db(db: Db) -> Self {
        Passwords { conn: db.conn }
    }

    pub fn add(&mut self, access_table: &str, phone: &str, password: &str) -> Result<i64> {
        self.conn.execute(INSERT_PASSWORD, params![access_table, phone, password, SAVED_COMPLETE])?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn list(&self, access_table: &str) -> Result<Vec<PasswordEntry>> {
        let mut stmt = self.conn.prepare(SELECT_LIST)?;
        let entries = stmt
            .query_map(params![access_table], |row| {
                Ok(PasswordEntry {
                    id: row.get(0)?,
                    access_table: row.get(1)?,
                    phone: row.get(2)?,
                    password: row.get(3)?,
                    saved: row.get(4)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }

    pub fn revoke(&mut self, id: i64) -> Result<()> {
        let affected = self.conn.execute(REVOKE_PASSWORD, params![id, SAVED_REVOKED])?;
        if affected == 0 {
            msg_bail_anyhow!(Message::PasswordNotFound(id));
        }
        Ok(())
    }
}

impl PasswordStore for Passwords {
    fn passwords(&self, access_table: &str, phone: &str) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare(SELECT_VALID)?;
        let passwords = stmt
            .query_map(params![access_table, phone, SAVED_COMPLETE], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(passwords)
    }
}
