use std::collections::{HashMap, HashSet, VecDeque};

use log::debug;

use crate::element::element_model::Element;
use crate::element::store::ElementStore;
use crate::reconcile::signature::stable_signature;
use crate::reconcile::thresholds::{ChangeKind, Thresholds};

/// Outcome of matching a fresh candidate list against the stored elements.
///
/// `elements` is the complete next store state. On navigation it is already
/// renumbered `1..N` and the id lists refer to the new numbering.
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciliation {
    pub elements: Vec<Element>,
    pub kept_ids: Vec<String>,
    pub updated_ids: Vec<String>,
    pub new_ids: Vec<String>,
    pub removed: Vec<Element>,
    pub stability: f64,
    pub kind: ChangeKind,
}

impl Reconciliation {
    pub fn is_navigation(&self) -> bool {
        self.kind == ChangeKind::Navigation
    }

    pub fn removed_count(&self) -> usize {
        self.removed.len()
    }

    pub fn removed_ids(&self) -> Vec<String> {
        self.removed.iter().map(|el| el.id.clone()).collect()
    }

    pub fn is_unchanged(&self) -> bool {
        self.updated_ids.is_empty() && self.new_ids.is_empty() && self.removed.is_empty()
    }

    /// Write the next state into the store.
    pub fn commit(&self, store: &mut ElementStore) {
        match self.kind {
            ChangeKind::Navigation => store.reset(self.elements.iter().cloned()),
            ChangeKind::Incremental => store.replace(self.elements.iter().cloned()),
        }
    }
}

/// Match `candidates` (parsed, filtered, provisional ids) against `old`.
///
/// Pure: nothing is written anywhere. `id_floor` is the highest id issued so
/// far in this page state; fresh ids start above it and above every old id.
pub fn reconcile(
    old: &[Element],
    id_floor: u64,
    candidates: Vec<Element>,
    thresholds: &Thresholds,
) -> Reconciliation {
    let mut lookup: HashMap<String, VecDeque<&Element>> = HashMap::new();
    for el in old {
        lookup.entry(stable_signature(el)).or_default().push_back(el);
    }

    let max_old = old.iter().filter_map(Element::numeric_id).max().unwrap_or(0);
    let mut next_id = id_floor.max(max_old) + 1;

    let mut id_map: HashMap<String, String> = HashMap::new();
    let mut consumed: HashSet<&str> = HashSet::new();
    let mut kept_ids = Vec::new();
    let mut updated_ids = Vec::new();
    let mut new_ids = Vec::new();
    let mut elements = Vec::with_capacity(candidates.len());

    for mut candidate in candidates {
        let matched = lookup
            .get_mut(&stable_signature(&candidate))
            .and_then(VecDeque::pop_front);

        let final_id = match matched {
            Some(prev) => {
                consumed.insert(prev.id.as_str());
                if prev.name != candidate.name || prev.text != candidate.text {
                    updated_ids.push(prev.id.clone());
                } else {
                    kept_ids.push(prev.id.clone());
                }
                prev.id.clone()
            }
            None => {
                let id = next_id.to_string();
                next_id += 1;
                new_ids.push(id.clone());
                id
            }
        };

        let provisional = std::mem::replace(&mut candidate.id, final_id.clone());
        id_map.insert(provisional, final_id);
        elements.push(candidate);
    }

    for el in &mut elements {
        el.parent = el.parent.take().and_then(|p| id_map.get(&p).cloned());
    }

    let removed: Vec<Element> = old
        .iter()
        .filter(|el| !consumed.contains(el.id.as_str()))
        .cloned()
        .collect();

    let stability = if old.is_empty() {
        1.0
    } else {
        consumed.len() as f64 / old.len() as f64
    };

    let kind = thresholds.classify(stability, removed.len(), new_ids.len());

    debug!(
        "reconciled: stability={:.2} kind={:?} kept={} updated={} new={} removed={}",
        stability,
        kind,
        kept_ids.len(),
        updated_ids.len(),
        new_ids.len(),
        removed.len()
    );

    let mut result = Reconciliation {
        elements,
        kept_ids,
        updated_ids,
        new_ids,
        removed,
        stability,
        kind,
    };

    if kind == ChangeKind::Navigation {
        let (renumbered, mapping) = renumber(std::mem::take(&mut result.elements));
        let remap = |ids: &mut Vec<String>| {
            for id in ids.iter_mut() {
                if let Some(n) = mapping.get(id.as_str()) {
                    *id = n.clone();
                }
            }
        };
        remap(&mut result.kept_ids);
        remap(&mut result.updated_ids);
        remap(&mut result.new_ids);
        result.elements = renumbered;
    }

    result
}

/// Assign ids `1..N` in document order and rewrite parent links to match.
///
/// Returns the elements and the old-id to new-id mapping.
pub fn renumber(elements: Vec<Element>) -> (Vec<Element>, HashMap<String, String>) {
    let mapping: HashMap<String, String> = elements
        .iter()
        .enumerate()
        .map(|(i, el)| (el.id.clone(), (i + 1).to_string()))
        .collect();

    let renumbered = elements
        .into_iter()
        .map(|mut el| {
            if let Some(n) = mapping.get(&el.id) {
                el.id = n.clone();
            }
            el.parent = el.parent.take().and_then(|p| mapping.get(&p).cloned());
            el
        })
        .collect();

    (renumbered, mapping)
}
