use crate::db::db::Db;
use crate::libs::messages::Message;
use crate::libs::shortcut::ShortcutDefinition;
use crate::msg_bail_anyhow;
use anyhow::Result;
use rusqlite::{params, Connection};

const INSERT_SHORTCUT: &str = "INSERT INTO shortcuts (name, input_pattern, output_pattern) VALUES (?1, ?2, ?3)";

const SELECT_SHORTCUTS: &str = "SELECT id, name, input_pattern, output_pattern FROM shortcuts ORDER BY id";

const DELETE_SHORTCUT: &str = "DELETE FROM shortcuts WHERE id = ?1";

fn read_shortcuts(conn: &Connection) -> Result<Vec<(i64, ShortcutDefinition)>> {
    let mut stmt = conn.prepare(SELECT_SHORTCUTS)?;
    let shortcuts = stmt
        .query_map([], |row| {
            Ok((
                row.get(0)?,
                ShortcutDefinition {
                    name: row.get(1)?,
                    input_pattern: row.get(2)?,
                    output_pattern: row.get(3)?,
                },
            ))
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(shortcuts)
}

/// Shortcut definitions in insertion order.
pub fn load_definitions(conn: &Connection) -> Result<Vec<ShortcutDefinition>> {
    Ok(read_shortcuts(conn)?.into_iter().map(|(_, shortcut)| shortcut).collect())
}

pub struct Shortcuts {
    conn: Connection,
}

impl Shortcuts {
    pub fn new() -> Result<Self> {
        Ok(Self::with_db(Db::new()?))
    }

    pub fn with_db(db: Db) -> Self {
        Shortcuts { conn: db.conn }
    }

    pub fn create(&mut self, shortcut: &ShortcutDefinition) -> Result<i64> {
        self.conn.execute(
            INSERT_SHORTCUT,
            params![shortcut.name, shortcut.input_pattern, shortcut.output_pattern],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Every shortcut with its id, in the order they are tried.
    pub fn get_all(&self) -> Result<Vec<(i64, ShortcutDefinition)>> {
        read_shortcuts(&self.conn)
    }

    pub fn delete(&mut self, id: i64) -> Result<()> {
        let affected = self.conn.execute(DELETE_SHORTCUT, params![id])?;
        if affected == 0 {
            msg_bail_anyhow!(Message::ShortcutNotFound(id));
        }
        Ok(())
    }
}
