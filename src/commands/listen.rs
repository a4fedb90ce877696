use crate::{
    commands::handle::Session,
    libs::{config::Config, messages::Message, transport},
    msg_debug, msg_error, msg_info, msg_warning,
};
use anyhow::Result;
use tokio::io::{self, AsyncBufReadExt, BufReader};

/// Splits a `phone<TAB>message` line.
pub fn parse_line(line: &str) -> Option<(&str, &str)> {
    let (phone, message) = line.split_once('\t')?;
    let phone = phone.trim();
    (!phone.is_empty()).then_some((phone, message))
}

/// Handles messages read from stdin until end of input.
///
/// A failing delivery is reported and the loop moves on to the next line.
pub async fn cmd() -> Result<()> {
    let config = Config::read()?;
    let transport_config = config.transport();
    let session = Session::open(&config)?;
    msg_info!(Message::ListenStarted);

    let mut lines = BufReader::new(io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let Some((phone, message)) = parse_line(&line) else {
            if !line.trim().is_empty() {
                msg_warning!(Message::InvalidListenLine(line.clone()));
            }
            continue;
        };
        let (handled, outgoing) = session.handle(message, phone);
        if !handled {
            msg_debug!(Message::MessageNotHandled(message.to_string()));
        }
        if let Err(e) = transport::deliver_all(outgoing, &transport_config).await {
            msg_error!(e);
        }
    }
    Ok(())
}
