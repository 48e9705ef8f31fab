use std::collections::{BTreeSet, HashMap};

use log::trace;
use serde::{Deserialize, Serialize};

use crate::element::element_model::{Element, Scope};
use crate::snapshot::grammar::{parse_flags, parse_line};
use crate::snapshot::locator::build_locator;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParseOptions {
    /// Structural roles that are not emitted. Their children attach to the
    /// nearest emitted ancestor.
    #[serde(default)]
    pub skip_roles: BTreeSet<String>,
}

impl ParseOptions {
    pub fn skipping<I, S>(roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ParseOptions {
            skip_roles: roles.into_iter().map(Into::into).collect(),
        }
    }
}

/// Parse an indented accessibility snapshot into elements in document order.
///
/// Ids are provisional (`"1"`, `"2"`, ...) and get replaced during
/// reconciliation. Lines that are not node lines are skipped.
pub fn parse_snapshot(text: &str, options: &ParseOptions) -> Vec<Element> {
    let mut elements = Vec::new();
    let mut stack: Vec<(usize, String)> = Vec::new();
    let mut seen: HashMap<(String, String), usize> = HashMap::new();
    let mut next_id: u64 = 1;

    for raw in text.lines() {
        if raw.trim().is_empty() {
            continue;
        }

        let Some(line) = parse_line(raw) else {
            trace!("skipping non-node line: {raw:?}");
            continue;
        };

        while stack.last().is_some_and(|(level, _)| *level >= line.indent) {
            stack.pop();
        }

        if options.skip_roles.contains(&line.role) {
            continue;
        }

        let parent = stack.last().map(|(_, id)| id.clone());
        let name = line.name.unwrap_or_default();
        let trailing = line.trailing.filter(|t| *t != name);

        let nth = seen.entry((line.role.clone(), name.clone())).or_insert(0);
        let locator = build_locator(&line.role, &name, *nth);
        *nth += 1;

        let flags = trailing.as_deref().map(parse_flags).unwrap_or_default();

        let id = next_id.to_string();
        next_id += 1;

        stack.push((line.indent, id.clone()));
        elements.push(Element {
            id,
            role: line.role,
            name,
            text: trailing,
            locator,
            scope: Scope::Global,
            parent,
            states: flags.states,
            attributes: flags.attributes,
        });
    }

    elements
}
