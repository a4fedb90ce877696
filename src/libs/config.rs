//! Application configuration stored as `config.json` in the data directory.
//!
//! ```json
//! {
//!   "sms": { "sentinel": "@", "row_limit": 25, "date_format": "%Y-%m-%dT%H:%M" },
//!   "transport": { "max_length": 160, "webhook_url": "", "auth_token": "" }
//! }
//! ```
//!
//! Both sections are optional; missing sections fall back to defaults.

use super::data_storage::DataStorage;
use crate::libs::formatter::{self, DEFAULT_DATE_FORMAT};
use crate::libs::messages::Message;
use crate::{msg_print, msg_warning};
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input, MultiSelect};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};

pub const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Debug, Clone)]
pub struct ConfigModule {
    pub key: String,
    pub name: String,
}

/// How inbound messages are recognized and answered.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SmsConfig {
    /// First character of every command.
    pub sentinel: char,
    /// Maximum number of rows in a query response.
    pub row_limit: usize,
    /// strftime format for free-slot responses.
    pub date_format: String,
}

impl Default for SmsConfig {
    fn default() -> Self {
        SmsConfig {
            sentinel: '@',
            row_limit: 25,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

impl SmsConfig {
    /// Replaces unusable settings with their defaults, warning about each.
    pub fn sanitized(self) -> Self {
        let defaults = SmsConfig::default();
        let mut config = self;
        if let Err(e) = validate_sentinel(&config.sentinel) {
            msg_warning!(e);
            config.sentinel = defaults.sentinel;
        }
        if let Err(e) = validate_row_limit(&config.row_limit) {
            msg_warning!(e);
            config.row_limit = defaults.row_limit;
        }
        if let Err(e) = validate_date_format(&config.date_format) {
            msg_warning!(e);
            config.date_format = defaults.date_format;
        }
        config
    }
}

/// The sentinel must be visible; messages are split on whitespace.
fn validate_sentinel(sentinel: &char) -> std::result::Result<(), Message> {
    if sentinel.is_whitespace() || sentinel.is_control() {
        return Err(Message::InvalidSentinel(*sentinel));
    }
    Ok(())
}

fn validate_row_limit(row_limit: &usize) -> std::result::Result<(), Message> {
    if *row_limit == 0 {
        return Err(Message::InvalidRowLimit);
    }
    Ok(())
}

fn validate_date_format(format: &str) -> std::result::Result<(), Message> {
    if !formatter::is_valid_date_format(format) {
        return Err(Message::InvalidDateFormat(format.to_string()));
    }
    Ok(())
}

/// Where responses go.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct TransportConfig {
    /// Responses are cut to this many characters; 0 disables the cutoff.
    pub max_length: usize,
    /// Responses are POSTed here as JSON; printed when empty.
    pub webhook_url: String,
    /// Sent as a bearer token when non-empty.
    pub auth_token: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        TransportConfig {
            max_length: 160,
            webhook_url: String::new(),
            auth_token: String::new(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sms: Option<SmsConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub transport: Option<TransportConfig>,
}

impl Config {
    /// Reads the config file, or returns defaults when it does not exist.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        if !config_file_path.exists() {
            return Ok(Config::default());
        }
        let config_str = fs::read_to_string(config_file_path)?;
        let mut config: Config = serde_json::from_str(&config_str)?;
        config.sms = config.sms.map(SmsConfig::sanitized);
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    pub fn sms(&self) -> SmsConfig {
        self.sms.clone().unwrap_or_default()
    }

    pub fn transport(&self) -> TransportConfig {
        self.transport.clone().unwrap_or_default()
    }

    /// Interactive wizard over the selected config sections.
    pub fn init() -> Result<Self> {
        let mut config = Config::read()?;
        let modules = vec![
            ConfigModule {
                key: "sms".to_string(),
                name: Message::ConfigModuleSms.to_string(),
            },
            ConfigModule {
                key: "transport".to_string(),
                name: Message::ConfigModuleTransport.to_string(),
            },
        ];

        let selected = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptSelectModules.to_string())
            .items(&modules.iter().map(|module| &module.name).collect::<Vec<_>>())
            .interact()?;

        for &selection in &selected {
            match modules[selection].key.as_str() {
                "sms" => {
                    let default = config.sms();
                    msg_print!(Message::ConfigModuleSms);
                    config.sms = Some(SmsConfig {
                        sentinel: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptSentinel.to_string())
                            .default(default.sentinel)
                            .validate_with(|sentinel: &char| validate_sentinel(sentinel))
                            .interact_text()?,
                        row_limit: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptRowLimit.to_string())
                            .default(default.row_limit)
                            .validate_with(|row_limit: &usize| validate_row_limit(row_limit))
                            .interact_text()?,
                        date_format: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptDateFormat.to_string())
                            .default(default.date_format)
                            .validate_with(|format: &String| validate_date_format(format))
                            .interact_text()?,
                    });
                }
                "transport" => {
                    let default = config.transport();
                    msg_print!(Message::ConfigModuleTransport);
                    config.transport = Some(TransportConfig {
                        max_length: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptMaxLength.to_string())
                            .default(default.max_length)
                            .interact_text()?,
                        webhook_url: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptWebhookUrl.to_string())
                            .default(default.webhook_url)
                            .allow_empty(true)
                            .interact_text()?,
                        auth_token: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptWebhookToken.to_string())
                            .default(default.auth_token)
                            .allow_empty(true)
                            .interact_text()?,
                    });
                }
                _ => {}
            }
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validators() {
        assert!(validate_sentinel(&'@').is_ok());
        assert!(validate_sentinel(&' ').is_err());
        assert!(validate_sentinel(&'\t').is_err());
        assert!(validate_row_limit(&1).is_ok());
        assert_eq!(validate_row_limit(&0), Err(Message::InvalidRowLimit));
        assert!(validate_date_format("%d.%m %H:%M").is_ok());
        assert_eq!(validate_date_format("%Q"), Err(Message::InvalidDateFormat("%Q".to_string())));
    }

    #[test]
    fn test_sanitized_replaces_unusable_settings() {
        let broken = SmsConfig {
            sentinel: ' ',
            row_limit: 0,
            date_format: "%Q".to_string(),
        };
        assert_eq!(broken.sanitized(), SmsConfig::default());

        let custom = SmsConfig {
            sentinel: '#',
            row_limit: 5,
            date_format: "%H:%M".to_string(),
        };
        assert_eq!(custom.clone().sanitized(), custom);
    }
}
