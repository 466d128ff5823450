//! Shell-style variable expansion.
//!
//! Recognises `$NAME`, `${NAME}`, `${NAME:-default}`, `${NAME:+alternate}`,
//! and `${NAME-default}` against an [`EnvView`]. A single call to
//! [`expand`] is not recursive: the substituted text is never re-scanned
//! for further `$` sequences. Chained references across multiple keys work
//! anyway, because [`crate::core::post_process`] re-expands each entry
//! against a view that already contains the previous entries' expanded
//! values.

use std::collections::HashMap;

/// Lookup consulted by [`expand`]. Holds a snapshot of the process
/// environment plus the entries expanded so far, which take precedence on
/// key collision. The Post-Processor inserts each entry's expanded value
/// after computing it, so later entries in the same file see it.
pub struct EnvView {
    entries: HashMap<String, String>,
    process_env: HashMap<String, String>,
}

impl EnvView {
    pub fn new(process_env: HashMap<String, String>) -> Self {
        Self { entries: HashMap::new(), process_env }
    }

    /// Record an entry's expanded value so subsequent lookups see it ahead
    /// of the process-environment snapshot.
    pub fn insert(&mut self, key: String, value: String) {
        self.entries.insert(key, value);
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .get(name)
            .or_else(|| self.process_env.get(name))
            .map(String::as_str)
    }
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Expand every `$NAME` / `${...}` reference in `input` against `view`.
pub fn expand(input: &str, view: &EnvView) -> String {
    let bytes = input.as_bytes();
    let mut out = String::with_capacity(input.len());
    let mut i = 0usize;

    while i < bytes.len() {
        if bytes[i] != b'$' {
            // Advance by one UTF-8 scalar, not one byte, so multi-byte
            // characters are not split.
            let ch = input[i..].chars().next().unwrap();
            out.push(ch);
            i += ch.len_utf8();
            continue;
        }

        // bytes[i] == '$'
        if i + 1 >= bytes.len() {
            // Lone '$' at end of input: literal.
            out.push('$');
            i += 1;
            continue;
        }

        if bytes[i + 1] == b'{' {
            match expand_braced(bytes, i, view) {
                Some((replacement, next)) => {
                    out.push_str(&replacement);
                    i = next;
                }
                None => {
                    // Unmatched '${' — emit '$' literally and keep scanning
                    // from the very next byte (the '{' will be emitted
                    // plainly on the following loop iteration).
                    out.push('$');
                    i += 1;
                }
            }
            continue;
        }

        if is_name_byte(bytes[i + 1]) {
            let start = i + 1;
            let mut end = start;
            while end < bytes.len() && is_name_byte(bytes[end]) {
                end += 1;
            }
            let name = &input[start..end];
            out.push_str(view.get(name).unwrap_or(""));
            i = end;
            continue;
        }

        // '$' followed by something that isn't '{' or a name byte: literal.
        out.push('$');
        i += 1;
    }

    out
}

/// Expand a `${...}` form starting at `start` (the index of `$`). Returns
/// the replacement text and the index just past the closing `}`, or `None`
/// if there is no closing `}` before end-of-input.
fn expand_braced(bytes: &[u8], start: usize, view: &EnvView) -> Option<(String, usize)> {
    // bytes[start] == '$', bytes[start+1] == '{'
    let body_start = start + 2;
    let close = bytes[body_start..].iter().position(|&b| b == b'}')? + body_start;
    let body = std::str::from_utf8(&bytes[body_start..close]).ok()?;
    let next = close + 1;

    // Scan left to right for the first operator: ":-", ":+", or bare "-".
    let mut op_pos = None;
    let mut op_kind = OpKind::None;
    let mut chars = body.char_indices().peekable();
    while let Some((idx, ch)) = chars.next() {
        if ch == ':' {
            match chars.peek() {
                Some(&(_, '-')) => {
                    op_pos = Some(idx);
                    op_kind = OpKind::DefaultIfUnsetOrEmpty;
                    break;
                }
                Some(&(_, '+')) => {
                    op_pos = Some(idx);
                    op_kind = OpKind::AlternateIfSetAndNonEmpty;
                    break;
                }
                _ => {}
            }
        } else if ch == '-' {
            op_pos = Some(idx);
            op_kind = OpKind::DefaultIfUnset;
            break;
        }
    }

    let replacement = match op_pos {
        None => view.get(body).unwrap_or("").to_string(),
        Some(pos) => {
            let name = &body[..pos];
            let skip = match op_kind {
                OpKind::DefaultIfUnsetOrEmpty | OpKind::AlternateIfSetAndNonEmpty => 2,
                OpKind::DefaultIfUnset => 1,
                OpKind::None => 0,
            };
            let literal = &body[pos + skip..];
            match op_kind {
                OpKind::DefaultIfUnsetOrEmpty => match view.get(name) {
                    Some(v) if !v.is_empty() => v.to_string(),
                    _ => literal.to_string(),
                },
                OpKind::AlternateIfSetAndNonEmpty => match view.get(name) {
                    Some(v) if !v.is_empty() => literal.to_string(),
                    _ => String::new(),
                },
                OpKind::DefaultIfUnset => match view.get(name) {
                    Some(v) => v.to_string(),
                    None => literal.to_string(),
                },
                OpKind::None => unreachable!(),
            }
        }
    };

    Some((replacement, next))
}

enum OpKind {
    None,
    DefaultIfUnsetOrEmpty,
    AlternateIfSetAndNonEmpty,
    DefaultIfUnset,
}
