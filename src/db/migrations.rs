//! Versioned schema migrations.
//!
//! Every migration has a version, a name and an `up` function. Pending
//! migrations run in order inside one transaction, and each applied version
//! is recorded in the `migrations` table, so a failed run leaves the schema
//! untouched.
//!
//! | Version | Name                  | Adds                               |
//! |---------|-----------------------|------------------------------------|
//! | 1       | create_data_tables    | `data_tables`, `data_columns`      |
//! | 2       | add_shortcuts         | `shortcuts`                        |
//! | 3       | add_passwords         | `passwords`                        |
//!
//! Physical row tables (`t_<id>`) are created on demand by
//! [`Tables`](crate::db::tables::Tables), not by migrations.

use crate::libs::messages::Message;
use crate::{msg_debug, msg_error};
use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension, Transaction};

const MIGRATIONS_TABLE: &str = "
CREATE TABLE IF NOT EXISTS migrations (
    id INTEGER PRIMARY KEY,
    version INTEGER NOT NULL UNIQUE,
    name TEXT NOT NULL,
    applied_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)";

#[derive(Debug, Clone)]
struct Migration {
    version: u32,
    name: &'static str,
    up: fn(&Transaction) -> Result<()>,
}

pub struct MigrationManager {
    migrations: Vec<Migration>,
}

impl MigrationManager {
    pub fn new() -> Self {
        let mut manager = Self { migrations: Vec::new() };
        manager.register_migrations();
        manager
    }

    fn register_migrations(&mut self) {
        self.add_migration(1, "create_data_tables", |tx| {
            tx.execute(
                "CREATE TABLE IF NOT EXISTS data_tables (
                    id TEXT NOT NULL PRIMARY KEY,
                    display_name TEXT NOT NULL UNIQUE,
                    access_control TEXT,
                    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
                )",
                [],
            )?;
            tx.execute(
                "CREATE TABLE IF NOT EXISTS data_columns (
                    id INTEGER PRIMARY KEY,
                    table_id TEXT NOT NULL,
                    element_key TEXT NOT NULL,
                    display_name TEXT NOT NULL,
                    label TEXT NOT NULL,
                    column_type TEXT NOT NULL,
                    sms_in BOOLEAN NOT NULL DEFAULT TRUE,
                    sms_label TEXT,
                    persisted BOOLEAN NOT NULL DEFAULT TRUE,
                    UNIQUE (table_id, element_key),
                    UNIQUE (table_id, label),
                    FOREIGN KEY (table_id) REFERENCES data_tables(id) ON DELETE CASCADE
                )",
                [],
            )?;
            tx.execute("CREATE INDEX IF NOT EXISTS idx_data_columns_table ON data_columns(table_id)", [])?;
            Ok(())
        });

        // Row order is significant: shortcuts sharing a name are tried by id
        self.add_migration(2, "add_shortcuts", |tx| {
            tx.execute(
                "CREATE TABLE IF NOT EXISTS shortcuts (
                    id INTEGER PRIMARY KEY,
                    name TEXT NOT NULL,
                    input_pattern TEXT NOT NULL,
                    output_pattern TEXT NOT NULL,
                    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
                )",
                [],
            )?;
            Ok(())
        });

        self.add_migration(3, "add_passwords", |tx| {
            tx.execute(
                "CREATE TABLE IF NOT EXISTS passwords (
                    id INTEGER PRIMARY KEY,
                    access_table TEXT NOT NULL,
                    phone TEXT NOT NULL,
                    password TEXT NOT NULL,
                    saved TEXT NOT NULL DEFAULT 'COMPLETE',
                    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
                )",
                [],
            )?;
            tx.execute("CREATE INDEX IF NOT EXISTS idx_passwords_lookup ON passwords(access_table, phone)", [])?;
            Ok(())
        });
    }

    fn add_migration(&mut self, version: u32, name: &'static str, up: fn(&Transaction) -> Result<()>) {
        self.migrations.push(Migration { version, name, up });
    }

    /// Applies every migration newer than the recorded schema version.
    pub fn run_migrations(&self, conn: &mut Connection) -> Result<()> {
        conn.execute(MIGRATIONS_TABLE, [])?;
        let current_version = self.get_current_version(conn)?;
        let pending: Vec<&Migration> = self.migrations.iter().filter(|m| m.version > current_version).collect();

        if pending.is_empty() {
            msg_debug!(Message::DatabaseUpToDate);
            return Ok(());
        }
        msg_debug!(Message::MigrationsFound(pending.len()));

        let tx = conn.transaction()?;
        for migration in pending {
            msg_debug!(Message::RunningMigration(migration.version, migration.name.to_string()));
            if let Err(e) = (migration.up)(&tx) {
                msg_error!(Message::MigrationFailed(migration.version, e.to_string()));
                return Err(e);
            }
            tx.execute(
                "INSERT INTO migrations (version, name) VALUES (?1, ?2)",
                params![migration.version, migration.name],
            )?;
            msg_debug!(Message::MigrationCompleted(migration.version));
        }
        tx.commit()?;
        msg_debug!(Message::AllMigrationsCompleted);

        Ok(())
    }

    fn get_current_version(&self, conn: &Connection) -> Result<u32> {
        let version: Option<u32> = conn
            .query_row("SELECT MAX(version) FROM migrations", [], |row| row.get(0))
            .optional()?
            .flatten();
        Ok(version.unwrap_or(0))
    }

    pub fn latest_version(&self) -> u32 {
        self.migrations.last().map(|m| m.version).unwrap_or(0)
    }

    /// Applied migrations as `(version, name)`, oldest first.
    pub fn get_migration_history(&self, conn: &Connection) -> Result<Vec<(u32, String)>> {
        let mut stmt = conn.prepare("SELECT version, name FROM migrations ORDER BY version")?;
        let history = stmt
            .query_map([], |row| Ok((row.get::<_, u32>(0)?, row.get::<_, String>(1)?)))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(history)
    }
}

impl Default for MigrationManager {
    fn default() -> Self {
        Self::new()
    }
}

pub fn init_with_migrations(conn: &mut Connection) -> Result<()> {
    MigrationManager::new().run_migrations(conn)
}

pub fn get_db_version(conn: &Connection) -> Result<u32> {
    MigrationManager::new().get_current_version(conn)
}
