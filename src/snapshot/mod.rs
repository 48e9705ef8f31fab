pub mod filter;
pub mod grammar;
pub mod locator;
pub mod parser;

use crate::element::element_model::Element;

pub use parser::ParseOptions;

/// Parse a raw snapshot and drop redundant label nodes.
pub fn parse_candidates(text: &str, options: &ParseOptions) -> Vec<Element> {
    filter::filter_redundant(parser::parse_snapshot(text, options))
}
