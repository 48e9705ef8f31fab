use std::collections::{HashSet, VecDeque};
use std::path::Path;

use crate::browser::driver::{PageDriver, SnapshotSource};
use crate::error::DriverError;

/// Serves recorded snapshots in order, one per call.
///
/// Actions are recorded rather than executed, which makes it usable both for
/// replaying captured sessions and as a stand-in page in tests.
#[derive(Debug, Default)]
pub struct ScriptedSource {
    snapshots: VecDeque<String>,
    served: usize,
    broken_locators: HashSet<String>,
    pub actions: Vec<RecordedAction>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedAction {
    Click { locator: String },
    Fill { locator: String, text: String },
    Wait { ms: u64 },
}

impl ScriptedSource {
    pub fn new<I, S>(snapshots: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ScriptedSource {
            snapshots: snapshots.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn from_files<P: AsRef<Path>>(paths: &[P]) -> std::io::Result<Self> {
        let mut snapshots = Vec::with_capacity(paths.len());
        for path in paths {
            snapshots.push(std::fs::read_to_string(path)?);
        }
        Ok(Self::new(snapshots))
    }

    pub fn push(&mut self, snapshot: impl Into<String>) {
        self.snapshots.push_back(snapshot.into());
    }

    /// Make every action on `locator` fail, as if the node vanished.
    pub fn break_locator(&mut self, locator: impl Into<String>) {
        self.broken_locators.insert(locator.into());
    }

    pub fn remaining(&self) -> usize {
        self.snapshots.len()
    }

    fn check(&self, action: &str, locator: &str) -> Result<(), DriverError> {
        if self.broken_locators.contains(locator) {
            return Err(DriverError::Action {
                action: action.into(),
                locator: locator.into(),
                reason: "no element matches locator".into(),
            });
        }
        Ok(())
    }
}

impl SnapshotSource for ScriptedSource {
    fn aria_snapshot(&mut self) -> Result<String, DriverError> {
        let next = self
            .snapshots
            .pop_front()
            .ok_or(DriverError::SourceExhausted { served: self.served })?;
        self.served += 1;
        Ok(next)
    }
}

impl PageDriver for ScriptedSource {
    fn click(&mut self, locator: &str) -> Result<(), DriverError> {
        self.check("click", locator)?;
        self.actions.push(RecordedAction::Click {
            locator: locator.into(),
        });
        Ok(())
    }

    fn fill(&mut self, locator: &str, text: &str) -> Result<(), DriverError> {
        self.check("fill", locator)?;
        self.actions.push(RecordedAction::Fill {
            locator: locator.into(),
            text: text.into(),
        });
        Ok(())
    }

    fn wait_idle(&mut self, ms: u64) -> Result<(), DriverError> {
        self.actions.push(RecordedAction::Wait { ms });
        Ok(())
    }
}
