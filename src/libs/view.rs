use crate::db::passwords::PasswordEntry;
use crate::libs::column::TableDef;
use crate::libs::shortcut::ShortcutDefinition;
use anyhow::Result;
use prettytable::{row, Cell, Row, Table};

pub struct View {}

impl View {
    pub fn tables(tables: &[TableDef]) -> Result<()> {
        let mut table = Table::new();
        table.add_row(row!["ID", "NAME", "ACCESS CONTROL", "COLUMNS"]);
        for def in tables {
            table.add_row(row![
                def.id,
                def.display_name,
                def.access_control.as_deref().unwrap_or("-"),
                def.columns.len()
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn columns(def: &TableDef) -> Result<()> {
        let mut table = Table::new();
        table.add_row(row!["KEY", "LABEL", "NAME", "TYPE", "SMS IN", "SMS LABEL", "PERSISTED"]);
        for column in &def.columns {
            table.add_row(row![
                column.key,
                column.label,
                column.display_name,
                column.column_type,
                column.sms_in,
                column.sms_label.as_deref().unwrap_or("-"),
                column.persisted
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn shortcuts(shortcuts: &[(i64, ShortcutDefinition)]) -> Result<()> {
        let mut table = Table::new();
        table.add_row(row!["ID", "NAME", "INPUT", "OUTPUT"]);
        for (id, shortcut) in shortcuts {
            table.add_row(row![id, shortcut.name, shortcut.input_pattern, shortcut.output_pattern]);
        }
        table.printstd();

        Ok(())
    }

    pub fn passwords(entries: &[PasswordEntry]) -> Result<()> {
        let mut table = Table::new();
        table.add_row(row!["ID", "PHONE", "PASSWORD", "STATUS"]);
        for entry in entries {
            // Passwords are never printed in full
            let masked: String = entry.password.chars().take(1).chain("***".chars()).collect();
            table.add_row(row![entry.id, entry.phone, masked, entry.saved]);
        }
        table.printstd();

        Ok(())
    }

    /// Prints raw rows under the given column headers.
    pub fn rows(headers: &[&str], rows: &[Vec<Option<String>>]) -> Result<()> {
        let mut table = Table::new();
        table.add_row(Row::new(headers.iter().map(|header| Cell::new(&header.to_uppercase())).collect()));
        for values in rows {
            table.add_row(Row::new(
                values.iter().map(|value| Cell::new(value.as_deref().unwrap_or(""))).collect(),
            ));
        }
        table.printstd();

        Ok(())
    }
}
