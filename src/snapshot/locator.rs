/// Escape a name for embedding inside `[name="..."]`.
pub fn escape_name(name: &str) -> String {
    name.replace('\\', "\\\\").replace('"', "\\\"")
}

/// `role=<role>[name="<name>"] >> nth=<n>`, or `role=<role> >> nth=<n>` when unnamed.
///
/// Only valid for the page state it was built from.
pub fn build_locator(role: &str, name: &str, nth: usize) -> String {
    if name.is_empty() {
        format!("role={role} >> nth={nth}")
    } else {
        format!("role={role}[name=\"{}\"] >> nth={nth}", escape_name(name))
    }
}
