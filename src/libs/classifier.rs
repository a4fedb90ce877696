//! Recognizes messages addressed to smstab and tells inserts from queries.

use crate::libs::column::TableDef;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Add,
    Query,
}

/// A command starts with the sentinel and has a space after the first token.
pub fn is_candidate(message: &str, sentinel: char) -> bool {
    message.starts_with(sentinel) && message.find(' ').is_some_and(|i| i > 0)
}

/// Finds the table whose display name equals the first token.
pub fn find_target<'t>(message: &str, sentinel: char, tables: &'t [TableDef]) -> Option<&'t TableDef> {
    let name = message.split(' ').next()?.strip_prefix(sentinel)?;
    tables.iter().find(|table| table.display_name == name)
}

/// `+label` as the second token means ADD, anything else is a query.
pub fn classify(message: &str) -> Option<CommandKind> {
    let second = message.split(' ').nth(1)?;
    if second.starts_with('+') {
        Some(CommandKind::Add)
    } else {
        Some(CommandKind::Query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_candidate() {
        assert!(is_candidate("@t ?name", '@'));
        assert!(!is_candidate("@t", '@'));
        assert!(!is_candidate("t ?name", '@'));
        assert!(is_candidate("!t ?name", '!'));
    }

    #[test]
    fn test_find_target_matches_display_name_exactly() {
        let tables = vec![TableDef::new("1", "visits"), TableDef::new("2", "Visits")];
        assert_eq!(find_target("@Visits ?x", '@', &tables).map(|t| t.id.as_str()), Some("2"));
        assert!(find_target("@visit ?x", '@', &tables).is_none());
        assert!(find_target("visits ?x", '@', &tables).is_none());
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify("@t +age 5"), Some(CommandKind::Add));
        assert_eq!(classify("@t ?age"), Some(CommandKind::Query));
        assert_eq!(classify("@t"), None);
    }
}
