//! # smstab - tables over text messages
//!
//! Lets field users insert into and query local data tables by sending
//! short text messages such as:
//!
//! ```text
//! @visits +patient Ann +slot 2024-01-05T10:00/2024-01-05T10:30 #pw
//! @visits ?patient ?slot =slot today ~slot
//! @visits /slot 30m =slot tomorrow
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use smstab::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod commands;
pub mod db;
pub mod libs;
