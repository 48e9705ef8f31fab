use form_perception::action::{
    ActionStatus, TypeEntry, click_elements, normalize_entries, normalize_ids, type_in_elements,
};
use form_perception::browser::RecordedAction;
use serde_json::json;

use crate::common::{LOGIN_FILLED, LOGIN_PAGE, THANK_YOU_PAGE, session};

mod common;

// =========================================================================
// click / type
// =========================================================================

#[test]
fn click_resolves_locator_and_observes() {
    let mut p = session(&[LOGIN_PAGE, THANK_YOU_PAGE]);
    p.take_snapshot();

    let report = click_elements(&mut p, &["5".to_string()]);

    assert_eq!(report.status, ActionStatus::Ok);
    assert_eq!(report.results.len(), 1);
    assert_eq!(
        p.driver().actions,
        vec![
            RecordedAction::Click {
                locator: r#"role=button[name="Sign in"] >> nth=0"#.into()
            },
            RecordedAction::Wait { ms: 500 },
        ]
    );

    let observation = report.observation.unwrap();
    assert!(
        observation.starts_with("Major page content change detected (Navigation). IDs reset."),
        "got: {observation}"
    );
}

#[test]
fn stale_id_fails_only_its_item() {
    let mut p = session(&[LOGIN_PAGE, LOGIN_PAGE]);
    p.take_snapshot();

    let report = click_elements(&mut p, &["99".to_string(), "4".to_string()]);

    assert_eq!(report.status, ActionStatus::Partial);
    assert_eq!(report.results[0].status, ActionStatus::Error);
    assert!(report.results[0].reason.as_deref().unwrap().contains("99"));
    assert_eq!(report.results[1].status, ActionStatus::Ok);
    assert_eq!(
        report.observation.as_deref(),
        Some("No significant visual changes.")
    );
}

#[test]
fn driver_rejection_is_reported_per_item() {
    let mut p = session(&[LOGIN_PAGE, LOGIN_PAGE]);
    p.take_snapshot();
    p.driver_mut()
        .break_locator(r#"role=link[name="Forgot password?"] >> nth=0"#);

    let report = click_elements(&mut p, &["6".to_string()]);
    assert_eq!(report.status, ActionStatus::Partial);
    assert!(
        report.results[0]
            .reason
            .as_deref()
            .unwrap()
            .contains("no element matches locator")
    );
}

#[test]
fn type_fills_each_field_then_observes() {
    let mut p = session(&[LOGIN_PAGE, LOGIN_FILLED]);
    p.take_snapshot();

    let entries = vec![
        TypeEntry::new("2", "jane@example.com"),
        TypeEntry::new("3", "secret"),
    ];
    let report = type_in_elements(&mut p, &entries);

    assert_eq!(report.status, ActionStatus::Ok);
    assert_eq!(
        p.driver().actions[..2],
        [
            RecordedAction::Fill {
                locator: r#"role=textbox[name="Email"] >> nth=0"#.into(),
                text: "jane@example.com".into(),
            },
            RecordedAction::Fill {
                locator: r#"role=textbox[name="Password"] >> nth=0"#.into(),
                text: "secret".into(),
            },
        ]
    );
    assert_eq!(
        report.observation.as_deref(),
        Some("Values updated in 3 fields.")
    );
}

#[test]
fn failed_observation_is_attached_not_raised() {
    let mut p = session(&[LOGIN_PAGE]);
    p.take_snapshot();

    let report = click_elements(&mut p, &["5".to_string()]);
    assert_eq!(report.status, ActionStatus::Ok);
    assert!(
        report
            .observation
            .as_deref()
            .unwrap()
            .starts_with("error taking observation:")
    );

    let json = report.to_json();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["results"][0]["element_id"], "5");
}

// =========================================================================
// Argument normalization
// =========================================================================

#[test]
fn ids_from_many_shapes() {
    assert_eq!(normalize_ids(&json!(null)), Vec::<String>::new());
    assert_eq!(normalize_ids(&json!(5)), vec!["5"]);
    assert_eq!(normalize_ids(&json!([1, "2", " 3 "])), vec!["1", "2", "3"]);
    assert_eq!(normalize_ids(&json!("[1, 2]")), vec!["1", "2"]);
    assert_eq!(normalize_ids(&json!("['7', '8']")), vec!["7", "8"]);
    assert_eq!(normalize_ids(&json!("```json\n[\"3\",\"4\"]\n```")), vec!["3", "4"]);
    assert_eq!(normalize_ids(&json!("1, 2 ,3")), vec!["1", "2", "3"]);
    assert_eq!(normalize_ids(&json!("12")), vec!["12"]);
    assert_eq!(normalize_ids(&json!("")), Vec::<String>::new());
}

#[test]
fn entries_from_many_shapes() {
    let single = normalize_entries(&json!({"element_id": "5", "text": "Jane"})).unwrap();
    assert_eq!(single, vec![TypeEntry::new("5", "Jane")]);

    let map = normalize_entries(&json!({"2": "Jane", "3": "Doe"})).unwrap();
    assert_eq!(map, vec![TypeEntry::new("2", "Jane"), TypeEntry::new("3", "Doe")]);

    let encoded = normalize_entries(&json!("[{\"element_id\": 2, \"text\": \"x\"}]")).unwrap();
    assert_eq!(encoded, vec![TypeEntry::new("2", "x")]);

    let pairs = normalize_entries(&json!("2: Jane, 3: Doe")).unwrap();
    assert_eq!(pairs, vec![TypeEntry::new("2", "Jane"), TypeEntry::new("3", "Doe")]);

    let mixed = normalize_entries(&json!([{"element_id": "1", "text": "a"}, {"oops": 1}, "x"])).unwrap();
    assert_eq!(mixed, vec![TypeEntry::new("1", "a")], "Malformed items are dropped");
}

#[test]
fn undecodable_entries_are_an_error() {
    assert!(normalize_entries(&json!("hello")).is_err());
    assert!(normalize_entries(&json!(true)).is_err());
    assert_eq!(normalize_entries(&json!(null)).unwrap(), vec![]);
}
