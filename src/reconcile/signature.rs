use crate::element::element_model::{Element, is_input_role};

/// Matching key used to recognise the same node across snapshots.
///
/// `role|name` with surrounding quotes removed. For input roles the name is
/// cut at the first `": "` so a changing value suffix does not break the match.
pub fn stable_signature(el: &Element) -> String {
    signature_of(&el.role, &el.name)
}

pub fn signature_of(role: &str, name: &str) -> String {
    let mut clean = strip_quotes(name);
    if is_input_role(role) {
        if let Some((label, _value)) = clean.split_once(": ") {
            clean = strip_quotes(label);
        }
    }
    format!("{role}|{clean}")
}

fn strip_quotes(s: &str) -> &str {
    s.trim_matches(|c| c == '"' || c == '\'')
}
