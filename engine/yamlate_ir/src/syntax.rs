//! Lexical rules shared by the parser and the evaluator.
//!
//! These decide, from the text of a String node alone, whether it is an
//! inline expression, a variable reference or a plain literal. Both crates
//! must agree on this or a document could validate at parse time and then
//! be interpreted differently at evaluation time.

/// Marker that introduces an inline expression.
pub const INLINE_MARKER: &str = "~>";

/// Sigil that introduces a variable reference.
pub const REFERENCE_SIGIL: char = '$';

// Branch form keys
pub const CASE: &str = "case";
pub const DEFAULT: &str = "default";
pub const WHEN: &str = "when";
pub const IF: &str = "if";
pub const THEN: &str = "then";
pub const ELSE: &str = "else";

/// Keys that open a branch form when they come first in a hash.
pub const BRANCH_KEYS: [&str; 3] = [CASE, WHEN, IF];

/// Body of an inline expression, or `None` if `text` is not one.
///
/// The body is a suffix of `text`, so its byte offset in `text` is
/// `text.len() - body.len()`.
pub fn inline_body(text: &str) -> Option<&str> {
    text.trim_start().strip_prefix(INLINE_MARKER)
}

/// Whether `text` is an inline expression.
pub fn is_inline(text: &str) -> bool {
    inline_body(text).is_some()
}

/// `[A-Za-z_][A-Za-z0-9_]*`
pub fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Variable named by a `$name` reference, or `None` if `text` is not one.
pub fn reference_name(text: &str) -> Option<&str> {
    text.strip_prefix(REFERENCE_SIGIL)
        .filter(|name| is_identifier(name))
}

/// Variable named by a name operand. The `$` sigil is optional there.
pub fn target_name(text: &str) -> Option<&str> {
    let name = text.strip_prefix(REFERENCE_SIGIL).unwrap_or(text);
    is_identifier(name).then_some(name)
}

/// Whether `key` opens a branch form when it is the first key of a hash.
pub fn is_branch_key(key: &str) -> bool {
    BRANCH_KEYS.contains(&key)
}
