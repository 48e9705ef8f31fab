use form_perception::browser::ScriptedSource;
use form_perception::perception::format::{format_planner_line, render_lines};
use form_perception::perception::{Perception, PerceptionConfig};
use form_perception::trace::trace::snapshot_fingerprint;
use form_perception::{Element, Observation};

use crate::common::{
    APPLY_FORM, LOGIN_FILLED, LOGIN_PAGE, LOGIN_WITH_ERROR, THANK_YOU_PAGE, session, temp_path,
};

mod common;

fn store_ids<D>(p: &Perception<D>) -> Vec<String> {
    p.store().ids().map(str::to_string).collect()
}

// =========================================================================
// Compact rendering
// =========================================================================

#[test]
fn planner_line_format() {
    let el = Element::new("12", "textbox", "First name").with_parent("3");
    assert_eq!(format_planner_line(&el), "12:textbox|First name|p=3");

    let unnamed = Element::new("4", "text", "").with_text("Line one\nLine | two");
    assert_eq!(format_planner_line(&unnamed), "4:text|Line one Line  two");

    let long = Element::new("5", "link", "x".repeat(60));
    assert_eq!(format_planner_line(&long), format!("5:link|{}", "x".repeat(40)));
}

#[test]
fn options_fold_into_their_combobox() {
    let elements = vec![
        Element::new("1", "combobox", "Country"),
        Element::new("2", "option", "Canada").with_parent("1"),
        Element::new("3", "option", "Chile").with_parent("1"),
        Element::new("4", "button", "Next"),
        Element::new("5", "option", "Orphan"),
    ];

    let lines = render_lines(&elements, true, 40);
    assert_eq!(
        lines,
        vec![
            "1:combobox|Country | options[2:Canada, 3:Chile]",
            "4:button|Next",
            "5:option|Orphan",
        ]
    );

    let flat = render_lines(&elements, false, 40);
    assert_eq!(flat.len(), 5, "No folding when disabled");
}

// =========================================================================
// take_snapshot
// =========================================================================

#[test]
fn snapshot_numbers_from_one() {
    let mut p = session(&[LOGIN_PAGE]);
    let obs = p.take_snapshot();

    assert_eq!(
        obs.render(),
        "status: success\nsnapshot_type: full\nelements:\n\
         1:heading|Sign in\n\
         2:textbox|Email\n\
         3:textbox|Password\n\
         4:checkbox|Remember me\n\
         5:button|Sign in\n\
         6:link|Forgot password?"
    );
    assert_eq!(store_ids(&p), vec!["1", "2", "3", "4", "5", "6"]);
    assert_eq!(
        p.element("5").unwrap().locator,
        r#"role=button[name="Sign in"] >> nth=0"#
    );
}

#[test]
fn snapshot_always_resets_ids() {
    let mut p = session(&[LOGIN_PAGE, LOGIN_WITH_ERROR, LOGIN_PAGE]);
    p.take_snapshot();
    p.observe();
    assert!(p.store().contains("7"));

    p.take_snapshot();
    assert_eq!(store_ids(&p), vec!["1", "2", "3", "4", "5", "6"]);
}

#[test]
fn snapshot_renders_nested_form_with_parents() {
    let mut p = session(&[APPLY_FORM]);
    let obs = p.take_snapshot();
    let text = obs.render();

    assert!(text.contains("2:form|Apply|p=1"), "got:\n{text}");
    assert!(text.contains("4:combobox|Country|p=2 | options[5:Canada, 6:Chile]"));
    assert!(text.contains("7:button|Submit|p=2"));
}

// =========================================================================
// observe
// =========================================================================

#[test]
fn identical_snapshot_changes_nothing() {
    let mut p = session(&[LOGIN_PAGE, LOGIN_PAGE]);
    p.take_snapshot();
    let before = p.store().all();

    let obs = p.observe();
    let summary = obs.summary().expect("incremental summary");
    assert!(summary.is_unchanged());
    assert!(summary.updated_ids.is_empty());
    assert_eq!(p.store().all(), before, "Ids and content stay put");
    assert_eq!(
        obs.render(),
        "status: success\nobservation: No significant visual changes."
    );
}

#[test]
fn typed_values_are_reported_as_updates() {
    let mut p = session(&[LOGIN_PAGE, LOGIN_FILLED]);
    p.take_snapshot();
    let obs = p.observe();

    match &obs {
        Observation::Incremental { summary, new_lines } => {
            assert_eq!(summary.updated_ids, vec!["2", "3", "4"]);
            assert!(new_lines.is_empty());
            assert_eq!(summary.stability, 1.0);
        }
        other => panic!("Expected incremental, got {other:?}"),
    }
    assert_eq!(
        obs.render(),
        "status: success\nobservation: Values updated in 3 fields."
    );
    assert_eq!(p.element("2").unwrap().text.as_deref(), Some("jane@example.com"));
    assert!(p.element("4").unwrap().state("checked"));
}

#[test]
fn new_elements_are_listed_with_fresh_ids() {
    let mut p = session(&[LOGIN_PAGE, LOGIN_WITH_ERROR]);
    p.take_snapshot();
    let obs = p.observe();

    assert_eq!(
        obs.render(),
        "status: success\nobservation: Layout updated: 1 new items, 0 removed. \
         New Elements (Use these IDs):\n7:text|Invalid email"
    );
    assert_eq!(store_ids(&p), vec!["1", "2", "7", "3", "4", "5", "6"]);
}

#[test]
fn removed_elements_leave_the_store() {
    let mut p = session(&[LOGIN_WITH_ERROR, LOGIN_PAGE, LOGIN_WITH_ERROR]);
    p.take_snapshot();
    assert_eq!(p.element("3").unwrap().text.as_deref(), Some("Invalid email"));

    let obs = p.observe();
    assert!(obs.render().contains("Layout updated: 0 new items, 1 removed."));
    assert!(p.element("3").is_err());

    // The error reappears as a different node; its old id is not reused.
    p.observe();
    assert_eq!(p.element("8").unwrap().text.as_deref(), Some("Invalid email"));
}

#[test]
fn navigation_resets_ids() {
    let mut p = session(&[LOGIN_PAGE, THANK_YOU_PAGE]);
    p.take_snapshot();
    let obs = p.observe();

    assert!(matches!(obs, Observation::Navigation { .. }));
    assert_eq!(
        obs.render(),
        "status: success\nobservation: Major page content change detected (Navigation). IDs reset.\n\
         elements:\n\
         1:heading|Thank you\n\
         2:text|Your application was received.\n\
         3:link|Back to jobs"
    );
    assert_eq!(store_ids(&p), vec!["1", "2", "3"]);
}

#[test]
fn new_option_attaches_to_existing_combobox() {
    let expanded = APPLY_FORM.replace(
        "      - option \"Chile\" [selected]",
        "      - option \"Chile\" [selected]\n      - option \"Peru\"",
    );
    let mut p = session(&[APPLY_FORM, expanded.as_str()]);
    p.take_snapshot();
    p.observe();

    let peru = p.element("8").unwrap();
    assert_eq!(peru.name, "Peru");
    assert_eq!(peru.parent.as_deref(), Some("4"));
}

// =========================================================================
// Driver failures
// =========================================================================

#[test]
fn driver_failure_becomes_error_status() {
    let mut p = session(&[LOGIN_PAGE]);
    p.take_snapshot();

    let obs = p.observe();
    assert!(obs.is_error());

    let json: serde_json::Value = serde_json::from_str(&obs.render()).unwrap();
    assert_eq!(json["status"], "error");
    assert_eq!(json["reason"], "snapshot source exhausted after 1 snapshots");
    assert_eq!(p.store().len(), 6, "Store untouched on failure");
}

#[test]
fn snapshot_failure_on_empty_source() {
    let mut p = session(&[]);
    let obs = p.take_snapshot();
    assert!(matches!(obs, Observation::Error { .. }));
    assert!(p.store().is_empty());
}

#[test]
fn invalid_thresholds_refuse_to_build() {
    let mut config = PerceptionConfig::default();
    config.thresholds.navigation_ceiling = 0.9;
    assert!(Perception::new(ScriptedSource::default(), config).is_err());
}

// =========================================================================
// Trace
// =========================================================================

#[test]
fn trace_records_one_line_per_call() {
    let path = temp_path("trace.jsonl");
    let config = PerceptionConfig {
        trace_path: Some(path.to_string_lossy().into_owned()),
        ..Default::default()
    };

    let mut p = Perception::new(ScriptedSource::new([LOGIN_PAGE, LOGIN_PAGE]), config).unwrap();
    p.take_snapshot();
    p.observe();
    p.observe();
    drop(p);

    let content = std::fs::read_to_string(&path).unwrap();
    let events: Vec<serde_json::Value> = content
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();

    assert_eq!(events.len(), 3);
    assert_eq!(events[0]["kind"], "snapshot");
    assert_eq!(events[1]["kind"], "observe");
    assert_eq!(events[1]["kept"], 6);
    assert_eq!(events[1]["navigation"], false);
    assert_eq!(events[0]["fingerprint"], events[1]["fingerprint"]);
    assert!(events[2]["error"].is_string());

    let _ = std::fs::remove_file(&path);
}

#[test]
fn fingerprint_is_sha1_hex() {
    assert_eq!(
        snapshot_fingerprint("abc"),
        "a9993e364706816aba3e25717850c26c9cd0d89d"
    );
}
