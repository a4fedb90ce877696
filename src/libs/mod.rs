//! Core library modules for smstab.
//!
//! The message interpreter is split into one module per pipeline stage:
//!
//! - [`shortcut`]: macro expansion
//! - [`classifier`]: candidate check, target table, ADD or QUERY
//! - [`auth`]: password extraction and check
//! - [`parser`]: ADD segments and the QUERY tokenizer
//! - [`query`]: constraint compiler and query model
//! - [`free_slot`]: occupied-range merge and gap search
//! - [`response`]: SMS response rendering
//! - [`handler`]: the pipeline itself
//!
//! The remaining modules carry configuration, storage paths, console output
//! and transport.
//!
//! ```rust,no_run
//! use smstab::db::{passwords::Passwords, rows::Rows, tables::Metadata};
//! use smstab::libs::{config::SmsConfig, handler::MsgHandler, transport::Outbox};
//!
//! let (metadata, rows, passwords) = (Metadata::new()?, Rows::new()?, Passwords::new()?);
//! let outbox = Outbox::new(160);
//! let handler = MsgHandler::new(&metadata, &rows, &passwords, &outbox, SmsConfig::default());
//! handler.handle("@visits ?patient =slot today", "+15550100");
//! # anyhow::Ok(())
//! ```

pub mod auth;
pub mod classifier;
pub mod column;
pub mod config;
pub mod data_storage;
pub mod datetime;
pub mod error;
pub mod formatter;
pub mod free_slot;
pub mod handler;
pub mod messages;
pub mod parser;
pub mod query;
pub mod response;
pub mod shortcut;
pub mod store;
pub mod transport;
pub mod view;
