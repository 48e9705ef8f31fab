use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::reconcile::reconciler::Reconciliation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceKind {
    Snapshot,
    Observe,
    Action,
}

/// One line of the perception trace.
#[derive(Debug, Serialize)]
pub struct TraceEvent {
    pub timestamp_ms: u128,
    pub step: u64,
    pub kind: TraceKind,

    /// sha1 of the raw snapshot text
    pub fingerprint: Option<String>,

    pub stability: Option<f64>,
    pub navigation: Option<bool>,

    pub elements: usize,
    pub kept: usize,
    pub updated: usize,
    pub new: usize,
    pub removed: usize,

    pub detail: Option<String>,
    pub error: Option<String>,
}

impl TraceEvent {
    pub fn now(step: u64, kind: TraceKind) -> Self {
        Self {
            timestamp_ms: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or(0),
            step,
            kind,
            fingerprint: None,
            stability: None,
            navigation: None,
            elements: 0,
            kept: 0,
            updated: 0,
            new: 0,
            removed: 0,
            detail: None,
            error: None,
        }
    }

    pub fn with_fingerprint(mut self, fingerprint: impl Into<String>) -> Self {
        self.fingerprint = Some(fingerprint.into());
        self
    }

    pub fn with_elements(mut self, count: usize) -> Self {
        self.elements = count;
        self
    }

    pub fn with_reconciliation(mut self, r: &Reconciliation) -> Self {
        self.stability = Some(r.stability);
        self.navigation = Some(r.is_navigation());
        self.elements = r.elements.len();
        self.kept = r.kept_ids.len();
        self.updated = r.updated_ids.len();
        self.new = r.new_ids.len();
        self.removed = r.removed.len();
        self
    }

    pub fn with_detail(mut self, detail: impl ToString) -> Self {
        self.detail = Some(detail.to_string());
        self
    }

    pub fn with_error(mut self, error: impl ToString) -> Self {
        self.error = Some(error.to_string());
        self
    }
}

/// Hex sha1 of a raw snapshot, used to spot byte-identical snapshots in traces.
pub fn snapshot_fingerprint(raw: &str) -> String {
    use sha1::{Digest, Sha1};

    let mut hasher = Sha1::new();
    hasher.update(raw.as_bytes());
    format!("{:x}", hasher.finalize())
}
