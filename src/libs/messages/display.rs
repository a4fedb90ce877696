//! Display implementation for smstab messages.
//!
//! All user-facing text, including the fixed SMS responses, is defined here
//! so that wording stays in one place.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === PIPELINE MESSAGES ===
            Message::HandlingMessage(msg) => format!("Handling message: {}", msg),
            Message::NotACandidate => "Message is not addressed to smstab".to_string(),
            Message::ShortcutExpanded(msg) => format!("Shortcut expanded to: {}", msg),
            Message::UnknownTable(name) => format!("No queryable table named '{}'", name),
            Message::UnclassifiedCommand => "Message has no command after the table name".to_string(),
            Message::AuthenticationRejected(phone) => format!("Authentication failed for {}", phone),
            Message::MessageRejected(reason) => format!("Message rejected: {}", reason),
            Message::RowInserted(table, id) => format!("Row {} inserted into '{}'", id, table),
            Message::QueryResponded(table, count) => format!("Query on '{}' matched {} row(s)", table, count),
            Message::FreeSlotResponded(table) => format!("Free-slot response sent for '{}'", table),
            Message::FreeSlotSearch(column, duration) => format!("Searching free slots in '{}' of at least {}", column, duration),
            Message::SkippedStoredRange(value) => format!("Skipping unreadable range value '{}'", value),

            // === MALFORMED COMMAND REASONS ===
            Message::MalformedAddSegment => "ADD segment has a label but no value".to_string(),
            Message::UnknownColumn(label) => format!("Unknown column '{}'", label),
            Message::InvalidValue(column, value) => format!("Value '{}' is not valid for column '{}'", value, column),
            Message::MissingOperand(column) => format!("Constraint on '{}' has no value", column),
            Message::RangeExactInstant(column) => format!("Range column '{}' cannot equal a single instant", column),
            Message::RangeInstantInequality(column) => format!("Range column '{}' cannot differ from a single instant", column),
            Message::FreeSlotAlreadySet => "Only one free-slot column may be requested".to_string(),
            Message::FreeSlotNotRange(column) => format!("Free-slot column '{}' is not a date range", column),
            Message::InvalidDuration(value) => format!("'{}' is not a duration", value),
            Message::NoProjection => "Query selects no columns".to_string(),

            // === SMS RESPONSES ===
            Message::NoRowsFound => "No rows found.".to_string(),
            Message::Anytime => "anytime".to_string(),
            Message::NoFreeSlots => "no free slots".to_string(),

            // === TRANSPORT MESSAGES ===
            Message::OutgoingSms { phone, text } => format!("To {}: {}", phone, text),
            Message::WebhookDelivered(phone) => format!("Response for {} delivered to webhook", phone),
            Message::DeliveryFailed(status) => format!("Failed to deliver response. Status: {}", status),
            Message::MessageNotHandled(msg) => format!("Message not handled: {}", msg),
            Message::ListenStarted => "Listening for messages on stdin (phone<TAB>message per line)".to_string(),
            Message::InvalidListenLine(line) => format!("Ignoring line without a phone number: {}", line),

            // === TABLE MESSAGES ===
            Message::TableCreated(name) => format!("Table '{}' created successfully.", name),
            Message::TableDropped(name) => format!("Table '{}' dropped.", name),
            Message::TableNotFound(name) => format!("Table '{}' not found.", name),
            Message::TableAlreadyExists(name) => format!("Table '{}' already exists.", name),
            Message::ColumnAdded(table, column) => format!("Column '{}' added to '{}'.", column, table),
            Message::ColumnAlreadyExists(table, column) => format!("Column '{}' already exists in '{}'.", column, table),
            Message::AccessControlSet(table, access) => format!("Table '{}' is now guarded by password list '{}'.", table, access),
            Message::AccessControlCleared(table) => format!("Table '{}' no longer requires a password.", table),
            Message::NoTablesFound => "No tables found.".to_string(),
            Message::NoRowsInTable(name) => format!("Table '{}' has no rows.", name),
            Message::InvalidIdentifier(name) => format!("'{}' is not a valid identifier (use letters, digits and '_')", name),
            Message::TablesHeader => "Tables:".to_string(),
            Message::ColumnsHeader(name) => format!("Columns of '{}':", name),
            Message::RowsHeader(name) => format!("Rows of '{}':", name),

            // === SHORTCUT MESSAGES ===
            Message::ShortcutCreated(name) => format!("Shortcut '{}' created successfully.", name),
            Message::ShortcutDeleted(id) => format!("Shortcut {} deleted.", id),
            Message::ShortcutNotFound(id) => format!("Shortcut {} not found.", id),
            Message::NoShortcutsFound => "No shortcuts found.".to_string(),
            Message::ShortcutsHeader => "Shortcuts:".to_string(),

            // === PASSWORD MESSAGES ===
            Message::PasswordAdded(access, phone) => format!("Password for {} added to '{}'.", phone, access),
            Message::PasswordRevoked(id) => format!("Password {} revoked.", id),
            Message::PasswordNotFound(id) => format!("Password {} not found.", id),
            Message::NoPasswordsFound(access) => format!("No passwords found in '{}'.", access),
            Message::PasswordsHeader(access) => format!("Passwords in '{}':", access),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigModuleSms => "SMS settings".to_string(),
            Message::ConfigModuleTransport => "Transport settings".to_string(),
            Message::InvalidSentinel(c) => format!("Command prefix '{}' must be a visible character", c.escape_default()),
            Message::InvalidRowLimit => "Row limit must be at least 1".to_string(),
            Message::InvalidDateFormat(f) => format!("Invalid date format '{}'", f),

            // === PROMPTS ===
            Message::PromptSelectModules => "Select modules to configure".to_string(),
            Message::PromptSentinel => "Command prefix character".to_string(),
            Message::PromptRowLimit => "Maximum rows per query response".to_string(),
            Message::PromptDateFormat => "Date format for free-slot responses".to_string(),
            Message::PromptMaxLength => "Maximum response length in characters".to_string(),
            Message::PromptWebhookUrl => "Webhook URL (empty to print responses)".to_string(),
            Message::PromptWebhookToken => "Webhook auth token (optional)".to_string(),
            Message::PromptShortcutName => "Shortcut name".to_string(),
            Message::PromptShortcutInput => "Input pattern (placeholders as %name%)".to_string(),
            Message::PromptShortcutOutput => "Output pattern (placeholders as %name%)".to_string(),
            Message::PromptPassword => "Password".to_string(),

            // === MIGRATION MESSAGES ===
            Message::MigrationsFound(count) => format!("Found {} pending migration(s)", count),
            Message::RunningMigration(version, name) => format!("Running migration v{}: {}", version, name),
            Message::MigrationCompleted(version) => format!("Migration v{} completed", version),
            Message::MigrationFailed(version, error) => format!("Migration v{} failed: {}", version, error),
            Message::AllMigrationsCompleted => "All migrations completed successfully".to_string(),
            Message::DatabaseUpToDate => "Database is up to date".to_string(),
        };
        write!(f, "{}", text)
    }
}
