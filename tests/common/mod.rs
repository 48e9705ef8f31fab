#![allow(dead_code)]

use form_perception::Element;
use form_perception::browser::ScriptedSource;
use form_perception::perception::{Perception, PerceptionConfig};

pub const LOGIN_PAGE: &str = r#"
- heading "Sign in" [level=1]
- text: Email
- textbox "Email"
- text: Password
- textbox "Password"
- checkbox "Remember me"
- button "Sign in"
- link "Forgot password?"
"#;

pub const LOGIN_FILLED: &str = r#"
- heading "Sign in" [level=1]
- text: Email
- textbox "Email": jane@example.com
- text: Password
- textbox "Password": secret
- checkbox "Remember me" [checked]
- button "Sign in"
- link "Forgot password?"
"#;

pub const LOGIN_WITH_ERROR: &str = r#"
- heading "Sign in" [level=1]
- text: Email
- textbox "Email"
- text: Invalid email
- text: Password
- textbox "Password"
- checkbox "Remember me"
- button "Sign in"
- link "Forgot password?"
"#;

pub const THANK_YOU_PAGE: &str = r#"
- heading "Thank you" [level=1]
- text: Your application was received.
- link "Back to jobs"
"#;

pub const APPLY_FORM: &str = r#"
- main:
  - form "Apply":
    - textbox "Name"
    - combobox "Country":
      - option "Canada"
      - option "Chile" [selected]
    - button "Submit"
"#;

pub fn button(id: &str, name: &str) -> Element {
    Element::new(id, "button", name)
}

/// `count` buttons named `B0..` with ids `1..=count`.
pub fn buttons(count: usize) -> Vec<Element> {
    (0..count)
        .map(|i| button(&(i + 1).to_string(), &format!("B{i}")))
        .collect()
}

/// Raw snapshot text listing the given buttons by name.
pub fn button_lines(names: &[String]) -> String {
    names
        .iter()
        .map(|n| format!("- button \"{n}\""))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn names(prefix: &str, range: std::ops::Range<usize>) -> Vec<String> {
    range.map(|i| format!("{prefix}{i}")).collect()
}

pub fn session(snapshots: &[&str]) -> Perception<ScriptedSource> {
    Perception::new(
        ScriptedSource::new(snapshots.iter().copied()),
        PerceptionConfig::default(),
    )
    .unwrap()
}

pub fn ids(elements: &[Element]) -> Vec<String> {
    elements.iter().map(|e| e.id.clone()).collect()
}

pub fn temp_path(name: &str) -> std::path::PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!("form-perception-{}-{}", std::process::id(), name));
    let _ = std::fs::remove_file(&path);
    path
}
