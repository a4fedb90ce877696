//! Outbound responses.
//!
//! The pipeline only sees [`Sender`]. The CLI hands it an [`Outbox`] that
//! collects responses in memory, then delivers them once the message has
//! been handled: POSTed as JSON to a webhook when one is configured, printed
//! otherwise.

use crate::libs::config::TransportConfig;
use crate::libs::messages::Message;
use crate::{msg_bail_anyhow, msg_debug, msg_print};
use anyhow::Result;
use parking_lot::Mutex;
use reqwest::Client;
use serde::Serialize;

pub trait Sender {
    fn send(&self, phone: &str, text: &str) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outgoing {
    pub phone: String,
    pub text: String,
}

/// Truncates `text` to `max_length` characters; 0 means no limit.
pub fn cutoff(text: &str, max_length: usize) -> String {
    if max_length == 0 {
        return text.to_string();
    }
    text.chars().take(max_length).collect()
}

/// In-memory sender that applies the length cutoff.
#[derive(Debug, Default)]
pub struct Outbox {
    max_length: usize,
    queue: Mutex<Vec<Outgoing>>,
}

impl Outbox {
    pub fn new(max_length: usize) -> Self {
        Self {
            max_length,
            queue: Mutex::new(Vec::new()),
        }
    }

    /// Takes every queued response, leaving the outbox empty.
    pub fn drain(&self) -> Vec<Outgoing> {
        std::mem::take(&mut *self.queue.lock())
    }
}

impl Sender for Outbox {
    fn send(&self, phone: &str, text: &str) -> Result<()> {
        self.queue.lock().push(Outgoing {
            phone: phone.to_string(),
            text: cutoff(text, self.max_length),
        });
        Ok(())
    }
}

#[derive(Debug)]
pub struct Webhook {
    client: Client,
    url: String,
    auth_token: String,
}

impl Webhook {
    /// `None` when no webhook URL is configured.
    pub fn new(config: &TransportConfig) -> Option<Self> {
        if config.webhook_url.is_empty() {
            return None;
        }
        Some(Self {
            client: Client::new(),
            url: config.webhook_url.clone(),
            auth_token: config.auth_token.clone(),
        })
    }

    pub async fn post(&self, outgoing: &Outgoing) -> Result<()> {
        let mut request = self.client.post(&self.url).json(outgoing);
        if !self.auth_token.is_empty() {
            request = request.bearer_auth(&self.auth_token);
        }
        let response = request.send().await?;
        if !response.status().is_success() {
            msg_bail_anyhow!(Message::DeliveryFailed(response.status().to_string()));
        }
        msg_debug!(Message::WebhookDelivered(outgoing.phone.clone()));
        Ok(())
    }
}

/// Delivers drained responses through the configured channel.
pub async fn deliver_all(outgoing: Vec<Outgoing>, config: &TransportConfig) -> Result<()> {
    match Webhook::new(config) {
        Some(webhook) => {
            for message in &outgoing {
                webhook.post(message).await?;
            }
        }
        None => {
            for message in outgoing {
                msg_print!(Message::OutgoingSms {
                    phone: message.phone,
                    text: message.text,
                });
            }
        }
    }
    Ok(())
}
