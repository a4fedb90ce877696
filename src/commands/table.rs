use crate::{
    db::{rows::Rows, tables::Tables},
    libs::{
        column::{ColumnRef, ColumnType, TableDef},
        messages::Message,
        query::Query,
        store::RowStore,
        view::View,
    },
    msg_bail_anyhow, msg_info, msg_print, msg_success,
};
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct TableArgs {
    #[command(subcommand)]
    command: TableCommand,
}

#[derive(Debug, Subcommand)]
enum TableCommand {
    /// Create a data table
    Create {
        /// Table id (letters, digits and '_')
        id: String,
        /// Name used in messages; defaults to the id
        #[arg(short, long)]
        name: Option<String>,
    },
    /// Add a column to a table
    AddColumn {
        table: String,
        /// Column key (letters, digits and '_')
        key: String,
        #[arg(short = 't', long = "type", value_enum, default_value_t = ColumnType::Text)]
        column_type: ColumnType,
        /// Label typed in messages; defaults to the key
        #[arg(short, long)]
        label: Option<String>,
        /// Name shown in listings and responses; defaults to the label
        #[arg(short, long)]
        display_name: Option<String>,
        /// Short label used in responses
        #[arg(short, long)]
        sms_label: Option<String>,
        /// Refuse values for this column in ADD messages
        #[arg(long)]
        no_sms_in: bool,
        /// Do not store this column
        #[arg(long)]
        transient: bool,
    },
    /// Guard a table with a password list, or remove the guard
    Protect {
        table: String,
        /// Password list name; omit to make the table public
        access_table: Option<String>,
    },
    /// List tables
    List,
    /// Show a table's columns and rows
    Show { table: String },
    /// Delete a table and its rows
    Drop { table: String },
}

pub fn cmd(args: TableArgs) -> Result<()> {
    match args.command {
        TableCommand::Create { id, name } => handle_create(id, name),
        TableCommand::AddColumn {
            table,
            key,
            column_type,
            label,
            display_name,
            sms_label,
            no_sms_in,
            transient,
        } => {
            let label = label.unwrap_or_else(|| key.clone());
            let mut column = ColumnRef::new(&key, &label, column_type);
            column.display_name = display_name.unwrap_or(label);
            column.sms_label = sms_label;
            column.sms_in = !no_sms_in;
            column.persisted = !transient;
            Tables::new()?.add_column(&table, &column)?;
            msg_success!(Message::ColumnAdded(table, key));
            Ok(())
        }
        TableCommand::Protect { table, access_table } => {
            Tables::new()?.set_access_control(&table, access_table.as_deref())?;
            match access_table {
                Some(access_table) => msg_success!(Message::AccessControlSet(table, access_table)),
                None => msg_success!(Message::AccessControlCleared(table)),
            }
            Ok(())
        }
        TableCommand::List => handle_list(),
        TableCommand::Show { table } => handle_show(&table),
        TableCommand::Drop { table } => {
            Tables::new()?.delete(&table)?;
            msg_success!(Message::TableDropped(table));
            Ok(())
        }
    }
}

fn handle_create(id: String, name: Option<String>) -> Result<()> {
    let name = name.unwrap_or_else(|| id.clone());
    Tables::new()?.create(&TableDef::new(&id, &name))?;
    msg_success!(Message::TableCreated(name));
    Ok(())
}

fn handle_list() -> Result<()> {
    let tables = Tables::new()?.get_all()?;
    if tables.is_empty() {
        msg_info!(Message::NoTablesFound);
        return Ok(());
    }
    msg_print!(Message::TablesHeader, true);
    View::tables(&tables)
}

fn handle_show(table_id: &str) -> Result<()> {
    let Some(def) = Tables::new()?.get(table_id)? else {
        msg_bail_anyhow!(Message::TableNotFound(table_id.to_string()));
    };
    msg_print!(Message::ColumnsHeader(def.display_name.clone()), true);
    View::columns(&def)?;

    let keys: Vec<&str> = def.columns.iter().filter(|c| c.persisted).map(|c| c.key.as_str()).collect();
    if keys.is_empty() {
        msg_info!(Message::NoRowsInTable(def.display_name.clone()));
        return Ok(());
    }
    let rows = Rows::new()?.query(&def, &keys, &Query::default())?;
    if rows.is_empty() {
        msg_info!(Message::NoRowsInTable(def.display_name.clone()));
        return Ok(());
    }
    msg_print!(Message::RowsHeader(def.display_name.clone()), true);
    View::rows(&keys, &rows)
}
