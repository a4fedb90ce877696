use crate::{
    db::shortcuts::Shortcuts,
    libs::{messages::Message, shortcut::ShortcutDefinition, view::View},
    msg_info, msg_print, msg_success,
};
use anyhow::Result;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Input};

#[derive(Debug, Args)]
pub struct ShortcutArgs {
    #[command(subcommand)]
    command: ShortcutCommand,
}

#[derive(Debug, Subcommand)]
enum ShortcutCommand {
    /// Add a shortcut; missing parts are prompted for
    Add {
        name: Option<String>,
        #[arg(short, long)]
        input: Option<String>,
        #[arg(short, long)]
        output: Option<String>,
    },
    /// List shortcuts in the order they are tried
    List,
    /// Delete a shortcut by id
    Delete { id: i64 },
}

pub fn cmd(args: ShortcutArgs) -> Result<()> {
    match args.command {
        ShortcutCommand::Add { name, input, output } => handle_add(name, input, output),
        ShortcutCommand::List => handle_list(),
        ShortcutCommand::Delete { id } => {
            Shortcuts::new()?.delete(id)?;
            msg_success!(Message::ShortcutDeleted(id));
            Ok(())
        }
    }
}

fn prompt_or(value: Option<String>, prompt: Message) -> Result<String> {
    match value {
        Some(value) => Ok(value),
        None => Ok(Input::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt.to_string())
            .interact_text()?),
    }
}

fn handle_add(name: Option<String>, input: Option<String>, output: Option<String>) -> Result<()> {
    let name = prompt_or(name, Message::PromptShortcutName)?;
    let input = prompt_or(input, Message::PromptShortcutInput)?;
    let output = prompt_or(output, Message::PromptShortcutOutput)?;

    Shortcuts::new()?.create(&ShortcutDefinition::new(&name, &input, &output))?;
    msg_success!(Message::ShortcutCreated(name));
    Ok(())
}

fn handle_list() -> Result<()> {
    let shortcuts = Shortcuts::new()?.get_all()?;
    if shortcuts.is_empty() {
        msg_info!(Message::NoShortcutsFound);
        return Ok(());
    }
    msg_print!(Message::ShortcutsHeader, true);
    View::shortcuts(&shortcuts)
}
