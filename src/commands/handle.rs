use crate::{
    db::{passwords::Passwords, rows::Rows, tables::Metadata},
    libs::{
        config::{Config, SmsConfig},
        handler::MsgHandler,
        messages::Message,
        transport::{self, Outbox, Outgoing},
    },
    msg_info,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct HandleArgs {
    /// Sender phone number
    phone: String,
    /// Message text
    #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
    message: Vec<String>,
}

/// Stores and outbox shared by every message of one CLI invocation.
pub struct Session {
    metadata: Metadata,
    rows: Rows,
    passwords: Passwords,
    outbox: Outbox,
    settings: SmsConfig,
}

impl Session {
    pub fn open(config: &Config) -> Result<Self> {
        Ok(Self {
            metadata: Metadata::new()?,
            rows: Rows::new()?,
            passwords: Passwords::new()?,
            outbox: Outbox::new(config.transport().max_length),
            settings: config.sms(),
        })
    }

    /// Runs one message through the pipeline and returns the responses it
    /// produced.
    pub fn handle(&self, message: &str, phone: &str) -> (bool, Vec<Outgoing>) {
        let handler = MsgHandler::new(&self.metadata, &self.rows, &self.passwords, &self.outbox, self.settings.clone());
        let handled = handler.handle(message, phone);
        (handled, self.outbox.drain())
    }
}

pub async fn cmd(args: HandleArgs) -> Result<()> {
    let config = Config::read()?;
    let session = Session::open(&config)?;
    let message = args.message.join(" ");

    let (handled, outgoing) = session.handle(&message, &args.phone);
    if !handled {
        msg_info!(Message::MessageNotHandled(message));
    }
    transport::deliver_all(outgoing, &config.transport()).await
}
