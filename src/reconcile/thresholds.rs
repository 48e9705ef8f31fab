use serde::{Deserialize, Serialize};

use crate::error::PerceptionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Incremental,
    Navigation,
}

/// Stability cut-offs for navigation detection.
///
/// Empirically tuned, not derived. At or above `incremental_floor` the page
/// only changed in place; below `navigation_ceiling` it is a new page. In
/// between, it counts as navigation only when more elements disappeared than
/// appeared. The asymmetry is intentional.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    #[serde(default = "default_incremental_floor")]
    pub incremental_floor: f64,

    #[serde(default = "default_navigation_ceiling")]
    pub navigation_ceiling: f64,
}

pub const DEFAULT_INCREMENTAL_FLOOR: f64 = 0.8;
pub const DEFAULT_NAVIGATION_CEILING: f64 = 0.6;

fn default_incremental_floor() -> f64 { DEFAULT_INCREMENTAL_FLOOR }
fn default_navigation_ceiling() -> f64 { DEFAULT_NAVIGATION_CEILING }

impl Default for Thresholds {
    fn default() -> Self {
        Thresholds {
            incremental_floor: DEFAULT_INCREMENTAL_FLOOR,
            navigation_ceiling: DEFAULT_NAVIGATION_CEILING,
        }
    }
}

impl Thresholds {
    pub fn new(incremental_floor: f64, navigation_ceiling: f64) -> Result<Self, PerceptionError> {
        let t = Thresholds {
            incremental_floor,
            navigation_ceiling,
        };
        t.validate()?;
        Ok(t)
    }

    pub fn validate(&self) -> Result<(), PerceptionError> {
        let in_range = |v: f64| (0.0..=1.0).contains(&v);

        if !in_range(self.incremental_floor) || !in_range(self.navigation_ceiling) {
            return Err(PerceptionError::InvalidThresholds(format!(
                "values must lie in [0, 1] (incremental_floor={}, navigation_ceiling={})",
                self.incremental_floor, self.navigation_ceiling
            )));
        }

        if self.navigation_ceiling > self.incremental_floor {
            return Err(PerceptionError::InvalidThresholds(format!(
                "navigation_ceiling {} exceeds incremental_floor {}",
                self.navigation_ceiling, self.incremental_floor
            )));
        }

        Ok(())
    }

    pub fn classify(&self, stability: f64, removed: usize, added: usize) -> ChangeKind {
        if stability >= self.incremental_floor {
            ChangeKind::Incremental
        } else if stability < self.navigation_ceiling {
            ChangeKind::Navigation
        } else if removed > added {
            ChangeKind::Navigation
        } else {
            ChangeKind::Incremental
        }
    }
}
