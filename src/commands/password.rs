use crate::{
    db::passwords::Passwords,
    libs::{messages::Message, view::View},
    msg_info, msg_print, msg_success,
};
use anyhow::Result;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Password};

#[derive(Debug, Args)]
pub struct PasswordArgs {
    #[command(subcommand)]
    command: PasswordCommand,
}

#[derive(Debug, Subcommand)]
enum PasswordCommand {
    /// Issue a password to a phone number; prompts when omitted
    Add {
        access_table: String,
        phone: String,
        #[arg(short, long)]
        password: Option<String>,
    },
    /// List the entries of a password list
    List { access_table: String },
    /// Revoke a password by id
    Revoke { id: i64 },
}

pub fn cmd(args: PasswordArgs) -> Result<()> {
    match args.command {
        PasswordCommand::Add {
            access_table,
            phone,
            password,
        } => {
            let password = match password {
                Some(password) => password,
                None => Password::with_theme(&ColorfulTheme::default())
                    .with_prompt(Message::PromptPassword.to_string())
                    .interact()?,
            };
            Passwords::new()?.add(&access_table, &phone, &password)?;
            msg_success!(Message::PasswordAdded(access_table, phone));
            Ok(())
        }
        PasswordCommand::List { access_table } => {
            let entries = Passwords::new()?.list(&access_table)?;
            if entries.is_empty() {
                msg_info!(Message::NoPasswordsFound(access_table));
                return Ok(());
            }
            msg_print!(Message::PasswordsHeader(access_table), true);
            View::passwords(&entries)
        }
        PasswordCommand::Revoke { id } => {
            Passwords::new()?.revoke(id)?;
            msg_success!(Message::PasswordRevoked(id));
            Ok(())
        }
    }
}
