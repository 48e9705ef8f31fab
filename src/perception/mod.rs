pub mod facade;
pub mod format;
pub mod observation;

use serde::{Deserialize, Serialize};

use crate::reconcile::thresholds::Thresholds;
use crate::snapshot::parser::ParseOptions;

pub use facade::Perception;
pub use observation::{ChangeSummary, Observation};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerceptionConfig {
    #[serde(default)]
    pub thresholds: Thresholds,

    #[serde(default)]
    pub parse: ParseOptions,

    /// Fold option lines into their combobox/listbox line
    #[serde(default = "default_true")]
    pub compress_options: bool,

    /// JSONL trace output; tracing is off when unset
    #[serde(default)]
    pub trace_path: Option<String>,

    #[serde(default = "default_label_chars")]
    pub max_label_chars: usize,

    /// Wait after actions before observing
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,
}

fn default_true() -> bool { true }
fn default_label_chars() -> usize { format::DEFAULT_LABEL_CHARS }
fn default_settle_ms() -> u64 { 500 }

impl Default for PerceptionConfig {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::default(),
            parse: ParseOptions::default(),
            compress_options: true,
            trace_path: None,
            max_label_chars: format::DEFAULT_LABEL_CHARS,
            settle_ms: default_settle_ms(),
        }
    }
}
