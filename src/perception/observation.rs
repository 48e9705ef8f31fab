use std::fmt;

use serde::Serialize;

use crate::reconcile::reconciler::Reconciliation;

/// Counts and ids from one reconciliation, as reported to the agent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangeSummary {
    pub stability: f64,
    pub kept: usize,
    pub updated_ids: Vec<String>,
    pub new_ids: Vec<String>,
    pub removed_ids: Vec<String>,
}

impl From<&Reconciliation> for ChangeSummary {
    fn from(r: &Reconciliation) -> Self {
        ChangeSummary {
            stability: r.stability,
            kept: r.kept_ids.len(),
            updated_ids: r.updated_ids.clone(),
            new_ids: r.new_ids.clone(),
            removed_ids: r.removed_ids(),
        }
    }
}

impl ChangeSummary {
    pub fn is_unchanged(&self) -> bool {
        self.updated_ids.is_empty() && self.new_ids.is_empty() && self.removed_ids.is_empty()
    }
}

/// What `take_snapshot` / `observe` hand back to the orchestration layer.
#[derive(Debug, Clone, PartialEq)]
pub enum Observation {
    /// Full reset, ids renumbered from 1.
    Snapshot { lines: Vec<String> },

    /// Page judged to be a different page; ids reset.
    Navigation {
        summary: ChangeSummary,
        lines: Vec<String>,
    },

    /// Same page; only new elements are rendered.
    Incremental {
        summary: ChangeSummary,
        new_lines: Vec<String>,
    },

    /// The driver failed; store untouched.
    Error { reason: String },
}

impl Observation {
    pub fn is_error(&self) -> bool {
        matches!(self, Observation::Error { .. })
    }

    pub fn summary(&self) -> Option<&ChangeSummary> {
        match self {
            Observation::Navigation { summary, .. } | Observation::Incremental { summary, .. } => {
                Some(summary)
            }
            _ => None,
        }
    }

    /// The text after `observation:`, or the whole rendering when there is none.
    pub fn observation_text(&self) -> String {
        let rendered = self.render();
        match rendered.split_once("observation:") {
            Some((_, rest)) => rest.trim().to_string(),
            None => rendered,
        }
    }

    pub fn render(&self) -> String {
        match self {
            Observation::Snapshot { lines } => format!(
                "status: success\nsnapshot_type: full\nelements:\n{}",
                lines.join("\n")
            ),

            Observation::Navigation { lines, .. } => format!(
                "status: success\nobservation: Major page content change detected (Navigation). IDs reset.\nelements:\n{}",
                lines.join("\n")
            ),

            Observation::Incremental { summary, new_lines } => {
                let mut parts = Vec::new();

                if !summary.updated_ids.is_empty() {
                    parts.push(format!(
                        "Values updated in {} fields.",
                        summary.updated_ids.len()
                    ));
                }

                if !summary.new_ids.is_empty() || !summary.removed_ids.is_empty() {
                    parts.push(format!(
                        "Layout updated: {} new items, {} removed.",
                        summary.new_ids.len(),
                        summary.removed_ids.len()
                    ));

                    if !new_lines.is_empty() {
                        parts.push(format!(
                            "New Elements (Use these IDs):\n{}",
                            new_lines.join("\n")
                        ));
                    }
                }

                if parts.is_empty() {
                    "status: success\nobservation: No significant visual changes.".to_string()
                } else {
                    format!("status: success\nobservation: {}", parts.join(" "))
                }
            }

            Observation::Error { reason } => {
                serde_json::json!({ "status": "error", "reason": reason }).to_string()
            }
        }
    }
}

impl fmt::Display for Observation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
