pub mod executor;
pub mod normalize;

pub use executor::{ActionReport, ActionStatus, ItemResult, TypeEntry, click_elements, type_in_elements};
pub use normalize::{normalize_entries, normalize_ids};
