//! Password check for tables guarded by an access-control list.
//!
//! The password is the text after the last `#` in the message, provided the
//! `#` follows a space and is not the final character.

use crate::libs::column::TableDef;
use crate::libs::error::{Outcome, Rejection};
use crate::libs::store::PasswordStore;

fn password_delimiter(message: &str) -> Option<usize> {
    let idx = message.rfind('#')?;
    (message[..idx].ends_with(' ') && idx + 1 < message.len()).then_some(idx)
}

/// Returns the candidate password, or `""` when none is present.
pub fn extract_password(message: &str) -> &str {
    password_delimiter(message).map_or("", |idx| &message[idx + 1..])
}

/// Removes a trailing password token.
pub fn strip_password(message: &str) -> &str {
    match password_delimiter(message) {
        Some(idx) => message[..idx].trim_end(),
        None => message,
    }
}

/// Passes when the table is unguarded or the password is on the sender's list.
pub fn authenticate(table: &TableDef, message: &str, phone: &str, store: &dyn PasswordStore) -> Outcome<()> {
    let Some(access_table) = &table.access_control else {
        return Ok(());
    };
    let candidate = extract_password(message);
    let accepted = store.passwords(access_table, phone)?;
    if accepted.iter().any(|password| password == candidate) {
        Ok(())
    } else {
        Err(Rejection::AuthFailure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    struct FixedPasswords;

    impl PasswordStore for FixedPasswords {
        fn passwords(&self, access_table: &str, phone: &str) -> Result<Vec<String>> {
            match (access_table, phone) {
                ("staff", "+100") => Ok(vec!["secret".to_string(), "spare".to_string()]),
                _ => Ok(Vec::new()),
            }
        }
    }

    fn guarded() -> TableDef {
        let mut table = TableDef::new("1", "t");
        table.access_control = Some("staff".to_string());
        table
    }

    #[test]
    fn test_extract_and_strip() {
        assert_eq!(extract_password("@t +age 5 #secret"), "secret");
        assert_eq!(strip_password("@t +age 5 #secret"), "@t +age 5");
        assert_eq!(extract_password("@t +tag #1#2"), "");
        assert_eq!(strip_password("@t +tag #1 #2"), "@t +tag #1");
    }

    #[test]
    fn test_invalid_delimiters_are_ignored() {
        assert_eq!(extract_password("@t +age 5#secret"), "");
        assert_eq!(strip_password("@t +age 5#secret"), "@t +age 5#secret");
        assert_eq!(extract_password("@t +age 5 #"), "");
        assert_eq!(strip_password("@t +age 5 #"), "@t +age 5 #");
    }

    #[test]
    fn test_unguarded_table_always_passes() {
        let table = TableDef::new("1", "t");
        assert!(authenticate(&table, "@t ?age", "+999", &FixedPasswords).is_ok());
    }

    #[test]
    fn test_guarded_table() {
        assert!(authenticate(&guarded(), "@t ?age #spare", "+100", &FixedPasswords).is_ok());
        assert!(matches!(
            authenticate(&guarded(), "@t ?age #wrong", "+100", &FixedPasswords),
            Err(Rejection::AuthFailure)
        ));
        assert!(matches!(
            authenticate(&guarded(), "@t ?age #secret", "+200", &FixedPasswords),
            Err(Rejection::AuthFailure)
        ));
        assert!(matches!(authenticate(&guarded(), "@t ?age", "+100", &FixedPasswords), Err(Rejection::AuthFailure)));
    }
}
