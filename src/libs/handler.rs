//! The message pipeline.
//!
//! ```text
//! raw ─▶ expand shortcuts ─▶ find table ─▶ classify ─▶ authenticate
//!     ─▶ strip password ─▶ parse ─┬─ ADD   ─▶ insert row
//!                                 ├─ QUERY ─▶ select ─▶ rows response
//!                                 └─ /slot ─▶ select ─▶ free-slot response
//! ```
//!
//! Metadata and shortcuts are reloaded for every message. Rejections are
//! logged at debug level and never answered.

use crate::libs::auth;
use crate::libs::classifier;
use crate::libs::column::{ColumnRef, TableDef};
use crate::libs::config::SmsConfig;
use crate::libs::datetime::TemporalParser;
use crate::libs::error::{Outcome, Rejection};
use crate::libs::formatter;
use crate::libs::free_slot;
use crate::libs::messages::Message;
use crate::libs::parser::{self, FreeSlot, ParsedCommand, ParsedQuery};
use crate::libs::query::{OrderBy, Query, SortOrder};
use crate::libs::response;
use crate::libs::shortcut::Expander;
use crate::libs::store::{MetadataProvider, PasswordStore, RowOrigin, RowStore};
use crate::libs::transport::Sender;
use crate::msg_debug;
use chrono::{Local, NaiveDateTime};
use std::collections::BTreeMap;

pub struct MsgHandler<'a> {
    metadata: &'a dyn MetadataProvider,
    rows: &'a dyn RowStore,
    passwords: &'a dyn PasswordStore,
    sender: &'a dyn Sender,
    settings: SmsConfig,
    clock: Box<dyn Fn() -> NaiveDateTime + 'a>,
}

impl<'a> MsgHandler<'a> {
    pub fn new(
        metadata: &'a dyn MetadataProvider,
        rows: &'a dyn RowStore,
        passwords: &'a dyn PasswordStore,
        sender: &'a dyn Sender,
        settings: SmsConfig,
    ) -> Self {
        Self {
            metadata,
            rows,
            passwords,
            sender,
            settings,
            clock: Box::new(|| Local::now().naive_local()),
        }
    }

    /// Replaces the wall clock used for `now`, `today` and row timestamps.
    pub fn with_clock(mut self, clock: impl Fn() -> NaiveDateTime + 'a) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Handles one inbound message.
    ///
    /// Returns `true` when the message was addressed to a known table and
    /// processed, including when authentication failed. Returns `false` for
    /// messages that are not commands, malformed commands, and collaborator
    /// failures.
    pub fn handle(&self, raw: &str, phone: &str) -> bool {
        msg_debug!(Message::HandlingMessage(raw.to_string()));
        match self.process(raw, phone) {
            Ok(()) => true,
            Err(Rejection::AuthFailure) => {
                msg_debug!(Message::AuthenticationRejected(phone.to_string()));
                true
            }
            Err(rejection) => {
                msg_debug!(Message::MessageRejected(rejection.to_string()));
                false
            }
        }
    }

    fn process(&self, raw: &str, phone: &str) -> Outcome<()> {
        let sentinel = self.settings.sentinel;
        let trimmed = raw.trim();
        if !classifier::is_candidate(trimmed, sentinel) {
            msg_debug!(Message::NotACandidate);
            return Err(Rejection::NotRecognized);
        }

        let shortcuts = self.metadata.shortcuts()?;
        let message = Expander::new(&shortcuts, sentinel).expand(trimmed);
        if message != trimmed {
            msg_debug!(Message::ShortcutExpanded(message.clone()));
        }

        let tables = self.metadata.data_tables()?;
        let Some(table) = classifier::find_target(&message, sentinel, &tables) else {
            msg_debug!(Message::UnknownTable(message.split(' ').next().unwrap_or_default().to_string()));
            return Err(Rejection::NotRecognized);
        };
        let Some(kind) = classifier::classify(&message) else {
            msg_debug!(Message::UnclassifiedCommand);
            return Err(Rejection::NotRecognized);
        };

        auth::authenticate(table, &message, phone, self.passwords)?;
        let message = auth::strip_password(&message);

        let now = (self.clock)();
        let temporal = TemporalParser::new(now);
        match parser::parse(kind, message, table, &temporal)? {
            ParsedCommand::Add(values) => self.insert(table, &values, phone, now),
            ParsedCommand::Query(ParsedQuery {
                query, free_slot: Some(slot), ..
            }) => self.respond_free_slots(table, &query, &slot, phone),
            ParsedCommand::Query(parsed) => self.respond_rows(table, &parsed, phone),
        }
    }

    fn insert(&self, table: &TableDef, values: &BTreeMap<String, String>, phone: &str, now: NaiveDateTime) -> Outcome<()> {
        let origin = RowOrigin {
            phone: phone.to_string(),
            timestamp: now,
        };
        let id = self.rows.insert(table, values, &origin)?;
        msg_debug!(Message::RowInserted(table.display_name.clone(), id));
        Ok(())
    }

    fn respond_rows(&self, table: &TableDef, parsed: &ParsedQuery, phone: &str) -> Outcome<()> {
        let columns: Vec<&ColumnRef> = parsed.projections.iter().filter(|column| column.persisted).collect();
        if columns.is_empty() {
            return Err(Rejection::Malformed(Message::NoProjection));
        }
        let keys: Vec<&str> = columns.iter().map(|column| column.key.as_str()).collect();
        let rows = self.rows.query(table, &keys, &parsed.query)?;
        msg_debug!(Message::QueryResponded(table.display_name.clone(), rows.len()));

        let text = response::format_rows(&columns, &rows, self.settings.row_limit);
        self.sender.send(phone, &text)?;
        Ok(())
    }

    fn respond_free_slots(&self, table: &TableDef, query: &Query, slot: &FreeSlot, phone: &str) -> Outcome<()> {
        let key = slot.column.key.as_str();
        msg_debug!(Message::FreeSlotSearch(slot.column.label.clone(), formatter::format_duration(slot.min_seconds)));

        let (own, others) = query.partition(key);
        let others = Query {
            order_by: Some(OrderBy {
                column: key.to_string(),
                order: SortOrder::Asc,
            }),
            ..others
        };
        let rows = self.rows.query(table, &[key], &others)?;
        let stored = rows.into_iter().filter_map(|row| row.into_iter().next().flatten());
        let availability = free_slot::resolve(stored, &own, slot.min_seconds);

        let text = response::format_availability(&availability, &self.settings.date_format);
        self.sender.send(phone, &text)?;
        msg_debug!(Message::FreeSlotResponded(table.display_name.clone()));
        Ok(())
    }
}
