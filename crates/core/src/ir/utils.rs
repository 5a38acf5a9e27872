//! Naming and quoting helpers shared by the compiler and the emitter.

use crate::extract::{OPERATIONS_KEY, PathKey, RESPONSES_KEY, SCHEMA_KEY};

/// Used when a name source has no usable characters.
const FALLBACK_NAME: &str = "Schema";

/// Check if a property name must be quoted when used as a member key.
///
/// Returns true if the name:
/// - Is empty
/// - Doesn't start with a letter, underscore, or dollar sign
/// - Contains characters other than alphanumeric, underscore, or dollar sign
pub fn needs_quoting(name: &str) -> bool {
    name.is_empty()
        || !name
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        || !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Escape a string for use in a double-quoted literal.
pub fn escape_double_quoted(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Escape a string for use in a single-quoted literal.
pub fn escape_single_quoted(s: &str) -> String {
    s.replace('\\', "\\\\").replace('\'', "\\'")
}

/// Quote a member key if it is not a valid identifier.
pub fn quote_if_needed(name: &str) -> String {
    if needs_quoting(name) {
        format!("\"{}\"", escape_double_quoted(name))
    } else {
        name.to_string()
    }
}

/// Capitalize the first letter of a string.
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// Interface name from a schema `title`: whitespace is removed and every
/// word starts upper-case.
///
/// `"pet store"` becomes `PetStore`.
pub fn name_from_title(title: &str) -> String {
    let words: String = title.split_whitespace().map(capitalize_first).collect();
    type_identifier(&words)
}

/// Interface name for an untitled object nested under `property` of `outer`.
pub fn name_from_property(outer: &str, property: &str) -> String {
    let words: String = property.split_whitespace().map(capitalize_first).collect();
    type_identifier(&format!("{outer}{words}"))
}

/// Interface name for an untitled top-level definition, from its location.
///
/// The `paths`, `responses` and `schema` markers are dropped and every
/// remaining segment is capitalized, so `paths:/pets:get:responses:200:schema`
/// becomes `PetsGet200`.
pub fn name_from_path(path: &PathKey) -> String {
    let joined: String = path
        .segments()
        .iter()
        .map(String::as_str)
        .filter(|s| !s.is_empty() && ![OPERATIONS_KEY, RESPONSES_KEY, SCHEMA_KEY].contains(s))
        .map(capitalize_first)
        .collect();
    type_identifier(&joined)
}

/// Make `raw` a TypeScript identifier.
///
/// Characters that cannot appear in an identifier (`/`, `-`, `{`, `.`, …) are
/// dropped and the character after them is upper-cased. A leading digit gets
/// an `_` prefix.
pub fn type_identifier(raw: &str) -> String {
    let mut result = String::with_capacity(raw.len());
    let mut upper_next = false;

    for c in raw.chars() {
        if c.is_alphanumeric() || c == '_' || c == '$' {
            if upper_next {
                result.extend(c.to_uppercase());
            } else {
                result.push(c);
            }
            upper_next = false;
        } else {
            upper_next = true;
        }
    }

    if result.is_empty() {
        return FALLBACK_NAME.to_string();
    }
    if result.starts_with(|c: char| c.is_ascii_digit()) {
        result.insert(0, '_');
    }
    result
}
