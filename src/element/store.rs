use indexmap::IndexMap;

use crate::element::element_model::Element;
use crate::error::PerceptionError;

/// Elements keyed by stable id, in insertion order.
///
/// Owned by the perception session for writes; the action layer reads it
/// between writes to resolve ids into locators.
#[derive(Debug, Clone, Default)]
pub struct ElementStore {
    elements: IndexMap<String, Element>,

    /// Highest numeric id issued since the last full reset.
    high_water: u64,
}

impl ElementStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite by id.
    pub fn add(&mut self, element: Element) {
        if let Some(n) = element.numeric_id() {
            self.high_water = self.high_water.max(n);
        }
        self.elements.insert(element.id.clone(), element);
    }

    pub fn get(&self, id: &str) -> Result<&Element, PerceptionError> {
        self.elements
            .get(id)
            .ok_or_else(|| PerceptionError::ElementNotFound { id: id.to_string() })
    }

    /// No-op when the id is absent.
    pub fn remove(&mut self, id: &str) {
        self.elements.shift_remove(id);
    }

    /// Empty the store and forget issued ids.
    pub fn clear(&mut self) {
        self.elements.clear();
        self.high_water = 0;
    }

    /// Swap in a new element set, keeping the id high-water mark.
    pub fn replace(&mut self, elements: impl IntoIterator<Item = Element>) {
        self.elements.clear();
        for el in elements {
            self.add(el);
        }
    }

    /// Clear, then add. Ids restart from whatever the new set carries.
    pub fn reset(&mut self, elements: impl IntoIterator<Item = Element>) {
        self.clear();
        for el in elements {
            self.add(el);
        }
    }

    pub fn all(&self) -> Vec<Element> {
        self.elements.values().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.elements.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.elements.keys().map(String::as_str)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.elements.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn high_water(&self) -> u64 {
        self.high_water
    }
}
