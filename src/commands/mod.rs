//! Command-line interface.
//!
//! | Command    | Purpose                                              |
//! |------------|------------------------------------------------------|
//! | `init`     | configuration wizard                                 |
//! | `table`    | create tables, add columns, guard, list, show, drop  |
//! | `shortcut` | manage shortcut macros                               |
//! | `password` | manage password lists                                |
//! | `handle`   | process one message: `handle <phone> <text...>`      |
//! | `listen`   | process `phone<TAB>text` lines from stdin            |

pub mod handle;
pub mod init;
pub mod listen;
pub mod password;
pub mod shortcut;
pub mod table;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "Manage data tables and columns")]
    Table(table::TableArgs),
    #[command(about = "Manage shortcut macros")]
    Shortcut(shortcut::ShortcutArgs),
    #[command(about = "Manage password lists")]
    Password(password::PasswordArgs),
    #[command(about = "Handle one inbound message", arg_required_else_help = true)]
    Handle(handle::HandleArgs),
    #[command(about = "Handle messages read from stdin")]
    Listen,
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Table(args) => table::cmd(args),
            Commands::Shortcut(args) => shortcut::cmd(args),
            Commands::Password(args) => password::cmd(args),
            Commands::Handle(args) => handle::cmd(args).await,
            Commands::Listen => listen::cmd().await,
        }
    }
}
