pub mod driver;
pub mod replay;
pub mod session;

pub use driver::{PageDriver, SnapshotSource};
pub use replay::{RecordedAction, ScriptedSource};
pub use session::{BrowserSession, LaunchOptions};
