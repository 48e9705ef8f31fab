pub mod reconciler;
pub mod signature;
pub mod thresholds;

pub use reconciler::{Reconciliation, reconcile, renumber};
pub use signature::stable_signature;
pub use thresholds::{ChangeKind, Thresholds};
