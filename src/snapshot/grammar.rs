//! Line grammar for indented accessibility snapshots.
//!
//! ```text
//! line     := indent "-" ws+ body
//! body     := "'" entry "'" | entry          ('' inside quotes is a literal ')
//! entry    := role [ ":" rest | ws+ name [ ":" ] rest | ws+ rest ]
//! role     := word-char+
//! name     := '"' ( '\' any | not-quote )* '"'
//! rest     := any*                           (trimmed, leading ':' dropped)
//! ```
//!
//! Anything else is not a node line and yields `None`.

use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotLine {
    /// Leading whitespace, in characters.
    pub indent: usize,
    pub role: String,
    pub name: Option<String>,
    pub trailing: Option<String>,
}

pub fn parse_line(line: &str) -> Option<SnapshotLine> {
    let indent = line.chars().take_while(|c| c.is_whitespace()).count();
    let rest = line.trim_start().strip_prefix('-')?;

    if !rest.starts_with(char::is_whitespace) {
        return None;
    }

    let unquoted;
    let mut body = rest.trim();
    if body.len() >= 2 && body.starts_with('\'') && body.ends_with('\'') {
        unquoted = body[1..body.len() - 1].replace("''", "'");
        body = unquoted.as_str();
    }

    let role_len: usize = body
        .chars()
        .take_while(|c| is_word_char(*c))
        .map(char::len_utf8)
        .sum();
    if role_len == 0 {
        return None;
    }

    let (role, after_role) = body.split_at(role_len);

    // `- text: Hello`
    if let Some(after_colon) = after_role.strip_prefix(':') {
        return Some(SnapshotLine {
            indent,
            role: role.to_string(),
            name: None,
            trailing: clean_trailing(after_colon),
        });
    }

    if !after_role.is_empty() && !after_role.starts_with(char::is_whitespace) {
        return None;
    }

    let remainder = after_role.trim_start();
    let (name, trailing) = match split_quoted_name(remainder) {
        Some((name, tail)) => (Some(name), clean_trailing(tail)),
        None => (None, clean_trailing(remainder)),
    };

    Some(SnapshotLine {
        indent,
        role: role.to_string(),
        name,
        trailing,
    })
}

/// Split `"name" tail` into the unescaped name and the tail.
///
/// Returns `None` when the input does not open with a terminated quoted
/// name followed by whitespace, `:` or end of line.
fn split_quoted_name(input: &str) -> Option<(String, &str)> {
    let mut chars = input.char_indices();
    match chars.next() {
        Some((_, '"')) => {}
        _ => return None,
    }

    let mut name = String::new();
    while let Some((idx, c)) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some((_, escaped)) => name.push(escaped),
                None => return None,
            },
            '"' => {
                let tail = &input[idx + 1..];
                if tail.is_empty() || tail.starts_with(':') || tail.starts_with(char::is_whitespace)
                {
                    return Some((name, tail));
                }
                return None;
            }
            other => name.push(other),
        }
    }

    None
}

fn clean_trailing(raw: &str) -> Option<String> {
    let text = raw.trim();
    let text = text.strip_prefix(':').unwrap_or(text).trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Bracketed flags found in trailing text, e.g. `[checked]` or `[level=2]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Flags {
    pub states: BTreeMap<String, bool>,
    pub attributes: BTreeMap<String, String>,
}

pub fn parse_flags(trailing: &str) -> Flags {
    let mut flags = Flags::default();
    let mut rest = trailing;

    while let Some(open) = rest.find('[') {
        let after = &rest[open + 1..];
        let Some(close) = after.find(']') else { break };
        let inner = after[..close].trim();
        rest = &after[close + 1..];

        let (key, value) = match inner.split_once('=') {
            Some((k, v)) => (k.trim(), Some(v.trim())),
            None => (inner, None),
        };
        if key.is_empty() || !key.chars().all(|c| is_word_char(c) || c == '-') {
            continue;
        }

        match value {
            None | Some("true") => {
                flags.states.insert(key.to_string(), true);
            }
            Some("false") => {
                flags.states.insert(key.to_string(), false);
            }
            Some(v) => {
                flags.attributes.insert(key.to_string(), v.to_string());
            }
        }
    }

    flags
}
