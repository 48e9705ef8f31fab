//! Stable element addressing for LLM-driven form filling.
//!
//! A browser driver hands over the page's accessibility snapshot as indented
//! text. This crate turns it into addressable elements, keeps their ids stable
//! across in-place page changes, resets them on navigation, and renders a
//! compact line per element for the agent.
//!
//! ```text
//! driver text -> snapshot::parser -> snapshot::filter -> reconcile -> ElementStore
//!                                                                 \-> perception (report)
//! ```

pub mod action;
pub mod browser;
pub mod cli;
pub mod element;
pub mod error;
pub mod perception;
pub mod reconcile;
pub mod snapshot;
pub mod trace;

pub use browser::{PageDriver, SnapshotSource};
pub use element::element_model::Element;
pub use element::store::ElementStore;
pub use error::{ConfigError, DriverError, PerceptionError};
pub use perception::{ChangeSummary, Observation, Perception, PerceptionConfig};
pub use reconcile::{ChangeKind, Reconciliation, Thresholds, reconcile};
