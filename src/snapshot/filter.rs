use std::collections::HashMap;

use crate::element::element_model::{Element, is_interactive_role, is_static_role};

/// Drop static label nodes that repeat the name of the interactive node
/// right after them.
///
/// Single forward pass over the unfiltered sequence. Children of a dropped
/// node are re-attached to its nearest surviving ancestor.
pub fn filter_redundant(elements: Vec<Element>) -> Vec<Element> {
    let mut dropped: HashMap<String, Option<String>> = HashMap::new();

    for pair in elements.windows(2) {
        let (curr, next) = (&pair[0], &pair[1]);
        if is_redundant_label(curr, next) {
            dropped.insert(curr.id.clone(), curr.parent.clone());
        }
    }

    if dropped.is_empty() {
        return elements;
    }

    elements
        .into_iter()
        .filter(|el| !dropped.contains_key(&el.id))
        .map(|mut el| {
            el.parent = surviving_ancestor(el.parent.take(), &dropped);
            el
        })
        .collect()
}

pub fn is_redundant_label(curr: &Element, next: &Element) -> bool {
    if !is_static_role(&curr.role) || !is_interactive_role(&next.role) {
        return false;
    }

    let c = normalize(curr.primary_text());
    let n = normalize(next.primary_text());
    if c.is_empty() || n.is_empty() {
        return false;
    }

    c == n || (c.chars().count() > 2 && n.contains(&c))
}

fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

fn surviving_ancestor(
    mut parent: Option<String>,
    dropped: &HashMap<String, Option<String>>,
) -> Option<String> {
    while let Some(grandparent) = parent.as_ref().and_then(|id| dropped.get(id)) {
        parent = grandparent.clone();
    }
    parent
}
