use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::browser::driver::PageDriver;
use crate::perception::facade::Perception;
use crate::trace::trace::{TraceEvent, TraceKind};

/// One field to type into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeEntry {
    pub element_id: String,
    pub text: String,
}

impl TypeEntry {
    pub fn new(element_id: impl Into<String>, text: impl Into<String>) -> Self {
        TypeEntry {
            element_id: element_id.into(),
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionStatus {
    Ok,
    Partial,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemResult {
    pub element_id: String,
    pub status: ActionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl ItemResult {
    fn ok(element_id: &str) -> Self {
        ItemResult {
            element_id: element_id.to_string(),
            status: ActionStatus::Ok,
            reason: None,
        }
    }

    fn failed(element_id: &str, reason: impl ToString) -> Self {
        ItemResult {
            element_id: element_id.to_string(),
            status: ActionStatus::Error,
            reason: Some(reason.to_string()),
        }
    }
}

/// Per-item outcomes plus what the page looked like afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionReport {
    pub status: ActionStatus,
    pub results: Vec<ItemResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observation: Option<String>,
}

impl ActionReport {
    fn from_results(results: Vec<ItemResult>) -> Self {
        let status = if results.iter().any(|r| r.status == ActionStatus::Error) {
            ActionStatus::Partial
        } else {
            ActionStatus::Ok
        };
        ActionReport {
            status,
            results,
            observation: None,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_else(|e| {
            serde_json::json!({ "status": "error", "reason": e.to_string() })
        })
    }
}

/// Click each id in order. Stale ids fail their own item only.
pub fn click_elements<D: PageDriver>(perception: &mut Perception<D>, ids: &[String]) -> ActionReport {
    let mut results = Vec::with_capacity(ids.len());

    for id in ids {
        let locator = match perception.element(id) {
            Ok(el) => el.locator.clone(),
            Err(e) => {
                results.push(ItemResult::failed(id, e));
                continue;
            }
        };

        info!("click [{}] {}", id, locator);
        match perception.driver_mut().click(&locator) {
            Ok(()) => results.push(ItemResult::ok(id)),
            Err(e) => results.push(ItemResult::failed(id, e)),
        }
    }

    finish(perception, "click", results)
}

/// Clear and type into each field in order.
pub fn type_in_elements<D: PageDriver>(
    perception: &mut Perception<D>,
    entries: &[TypeEntry],
) -> ActionReport {
    let mut results = Vec::with_capacity(entries.len());

    for entry in entries {
        let id = entry.element_id.as_str();
        let locator = match perception.element(id) {
            Ok(el) => el.locator.clone(),
            Err(e) => {
                results.push(ItemResult::failed(id, e));
                continue;
            }
        };

        info!("fill [{}] {} ({} chars)", id, locator, entry.text.chars().count());
        match perception.driver_mut().fill(&locator, &entry.text) {
            Ok(()) => results.push(ItemResult::ok(id)),
            Err(e) => results.push(ItemResult::failed(id, e)),
        }
    }

    finish(perception, "type", results)
}

fn finish<D: PageDriver>(
    perception: &mut Perception<D>,
    action: &str,
    results: Vec<ItemResult>,
) -> ActionReport {
    let mut report = ActionReport::from_results(results);

    let settle_ms = perception.config().settle_ms;
    if settle_ms > 0 {
        if let Err(e) = perception.driver_mut().wait_idle(settle_ms) {
            warn!("page did not settle after {action}: {e}");
        }
    }

    let step = perception.next_step();
    let failed = report
        .results
        .iter()
        .filter(|r| r.status == ActionStatus::Error)
        .count();
    perception.trace(
        &TraceEvent::now(step, TraceKind::Action)
            .with_elements(report.results.len())
            .with_detail(format!("{action}: {failed} failed")),
    );

    let observation = perception.observe();
    report.observation = Some(match &observation {
        obs if obs.is_error() => format!("error taking observation: {}", obs.render()),
        obs => obs.observation_text(),
    });

    report
}
