use crate::error::DriverError;

/// Anything that can hand out the current accessibility snapshot as
/// indented-tree text.
pub trait SnapshotSource {
    fn aria_snapshot(&mut self) -> Result<String, DriverError>;
}

/// A page the action layer can act on through locator expressions.
pub trait PageDriver: SnapshotSource {
    fn click(&mut self, locator: &str) -> Result<(), DriverError>;

    /// Clear the field, then type `text`.
    fn fill(&mut self, locator: &str, text: &str) -> Result<(), DriverError>;

    /// Let the page settle after an action.
    fn wait_idle(&mut self, _ms: u64) -> Result<(), DriverError> {
        Ok(())
    }
}

impl<T: SnapshotSource + ?Sized> SnapshotSource for &mut T {
    fn aria_snapshot(&mut self) -> Result<String, DriverError> {
        (**self).aria_snapshot()
    }
}

impl<T: PageDriver + ?Sized> PageDriver for &mut T {
    fn click(&mut self, locator: &str) -> Result<(), DriverError> {
        (**self).click(locator)
    }

    fn fill(&mut self, locator: &str, text: &str) -> Result<(), DriverError> {
        (**self).fill(locator, text)
    }

    fn wait_idle(&mut self, ms: u64) -> Result<(), DriverError> {
        (**self).wait_idle(ms)
    }
}
