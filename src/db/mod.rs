//! SQLite storage for smstab.
//!
//! One database file holds the table and column definitions, the shortcut
//! table, the password lists and one physical row table per data table.

/// Connection setup; opening a database applies pending migrations.
pub mod db;

/// Versioned schema migrations.
pub mod migrations;

/// Password lists used to authenticate guarded tables.
pub mod passwords;

/// Row queries and inserts against the physical row tables.
pub mod rows;

/// Shortcut macro definitions, kept in insertion order.
pub mod shortcuts;

/// Table and column definitions, and the metadata provider.
pub mod tables;
