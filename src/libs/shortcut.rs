//! Shortcut macros.
//!
//! A shortcut rewrites `@name rest` into a longer command. Both patterns are
//! split on `%`: even segments are literal text, odd segments name a
//! placeholder. Matching the input pattern binds each placeholder to the
//! text between its surrounding literals; the output pattern is then filled
//! from those bindings.
//!
//! ```text
//! name:   visit
//! input:  %who% at %when%
//! output: @visits +patient %who% +slot %when%
//!
//! @visit Ann at today  ->  @visits +patient Ann +slot today
//! ```

use crate::libs::classifier;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Separates literal segments from placeholder names in a pattern.
pub const PLACEHOLDER: char = '%';

/// A user-defined macro, as stored in the shortcut table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortcutDefinition {
    pub name: String,
    pub input_pattern: String,
    pub output_pattern: String,
}

impl ShortcutDefinition {
    pub fn new(name: &str, input_pattern: &str, output_pattern: &str) -> Self {
        Self {
            name: name.to_string(),
            input_pattern: input_pattern.to_string(),
            output_pattern: output_pattern.to_string(),
        }
    }

    /// Expands the text following the shortcut name.
    ///
    /// Returns `None` on any miss: a literal not found, an output placeholder
    /// without a binding, or an output that is not itself a command.
    fn apply(&self, rest: &str, sentinel: char) -> Option<String> {
        let bindings = match_pattern(&self.input_pattern, rest)?;
        let expanded = render_pattern(&self.output_pattern, &bindings)?;
        let expanded = expanded.trim();
        classifier::is_candidate(expanded, sentinel).then(|| expanded.to_string())
    }
}

/// Binds the placeholders of `pattern` against `text`.
///
/// The first literal must prefix the text; later literals are found by
/// forward search. Text left after the last literal binds to a trailing
/// placeholder when the pattern ends in one.
pub fn match_pattern(pattern: &str, text: &str) -> Option<HashMap<String, String>> {
    let segments: Vec<&str> = pattern.split(PLACEHOLDER).collect();
    let mut bindings = HashMap::new();
    let mut pending: Option<&str> = None;
    let mut pos = 0;

    for (i, &segment) in segments.iter().enumerate() {
        if i % 2 == 1 {
            pending = Some(segment);
            continue;
        }
        if i == 0 {
            if !text.starts_with(segment) {
                return None;
            }
            pos = segment.len();
            continue;
        }
        // An empty closing literal leaves the last placeholder open
        if segment.is_empty() && i == segments.len() - 1 {
            break;
        }
        let found = text[pos..].find(segment)?;
        if let Some(name) = pending.take() {
            bindings.insert(name.to_string(), text[pos..pos + found].to_string());
        }
        pos += found + segment.len();
    }

    if let Some(name) = pending {
        let remainder = &text[pos..];
        if !remainder.is_empty() {
            bindings.insert(name.to_string(), remainder.to_string());
        }
    }
    Some(bindings)
}

/// Fills an output pattern; `None` if a placeholder has no binding.
pub fn render_pattern(pattern: &str, bindings: &HashMap<String, String>) -> Option<String> {
    let mut output = String::with_capacity(pattern.len());
    for (i, segment) in pattern.split(PLACEHOLDER).enumerate() {
        if i % 2 == 0 {
            output.push_str(segment);
        } else {
            output.push_str(bindings.get(segment)?);
        }
    }
    Some(output)
}

/// Applies shortcuts to a message until it stops changing.
pub struct Expander<'a> {
    shortcuts: &'a [ShortcutDefinition],
    sentinel: char,
}

impl<'a> Expander<'a> {
    pub fn new(shortcuts: &'a [ShortcutDefinition], sentinel: char) -> Self {
        Self { shortcuts, sentinel }
    }

    /// Expands `message`, performing at most one substitution per shortcut
    /// definition. Shortcuts sharing a name are tried in table order.
    pub fn expand(&self, message: &str) -> String {
        let mut current = message.trim().to_string();
        for _ in 0..self.shortcuts.len() {
            if !classifier::is_candidate(&current, self.sentinel) {
                break;
            }
            match self.expand_once(&current) {
                Some(next) => current = next,
                None => break,
            }
        }
        current
    }

    fn expand_once(&self, message: &str) -> Option<String> {
        let (head, rest) = message.split_once(' ')?;
        let name = head.strip_prefix(self.sentinel)?;
        self.shortcuts
            .iter()
            .filter(|shortcut| shortcut.name == name)
            .find_map(|shortcut| shortcut.apply(rest, self.sentinel))
    }
}
