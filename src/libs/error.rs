//! Per-message outcomes of the interpreter pipeline.
//!
//! None of these are fatal to the process. They decide what
//! [`MsgHandler::handle`](crate::libs::handler::MsgHandler::handle) reports
//! to its caller and are logged at debug level, never sent to the sender.

use crate::libs::messages::Message;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Rejection {
    /// Missing sentinel, wrong shape, or unknown target table.
    #[error("message is not addressed to a known table")]
    NotRecognized,

    /// The command could not be tokenized, resolved or coerced.
    #[error("{0}")]
    Malformed(Message),

    /// Password missing or not valid for the sender.
    #[error("authentication failed")]
    AuthFailure,

    /// A collaborator (metadata, store, transport) failed.
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

/// Result of one pipeline stage.
pub type Outcome<T> = Result<T, Rejection>;
