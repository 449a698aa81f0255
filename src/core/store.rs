//! core::store
//!
//! Owning container for scene elements, keyed by [`Id`].
//!
//! The store is deliberately dumb: it does not know about cross-references
//! or selection. Referential integrity is the document's job.
//!
//! # Typed iteration
//!
//! Elements live in a single map regardless of kind. [`ObjectStore::iter_kind`]
//! filters that map down to one concrete kind, so callers get `&Body`,
//! `&Joint`, ... directly:
//!
//! ```
//! use meshgraph::core::element::{Body, Element, Ground};
//! use meshgraph::core::store::ObjectStore;
//!
//! let mut store = ObjectStore::new();
//! store.insert(Element::from(Ground::new())).unwrap();
//! store.insert(Element::from(Body::new("a"))).unwrap();
//! store.insert(Element::from(Body::new("b"))).unwrap();
//!
//! let labels: Vec<&str> = store.iter_kind::<Body>().map(|b| b.label()).collect();
//! assert_eq!(labels, vec!["a", "b"]);
//! ```

use std::collections::BTreeMap;
use thiserror::Error;

use super::element::{Element, ElementVariant};
use super::types::Id;

/// Errors from store operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("an element with id {0} already exists")]
    DuplicateId(Id),
}

/// Elements owned by id.
///
/// Iteration is in ascending id order, which for generated ids is
/// creation order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectStore {
    elements: BTreeMap<Id, Element>,
}

impl ObjectStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of `element`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::DuplicateId` if the id is already taken; the
    /// store is left unchanged.
    pub fn insert(&mut self, element: Element) -> Result<&Element, StoreError> {
        use std::collections::btree_map::Entry;

        match self.elements.entry(element.id()) {
            Entry::Occupied(_) => Err(StoreError::DuplicateId(element.id())),
            Entry::Vacant(slot) => Ok(slot.insert(element)),
        }
    }

    pub fn get(&self, id: Id) -> Option<&Element> {
        self.elements.get(&id)
    }

    pub fn get_mut(&mut self, id: Id) -> Option<&mut Element> {
        self.elements.get_mut(&id)
    }

    /// Look up `id` and view it as kind `K`.
    pub fn get_as<K: ElementVariant>(&self, id: Id) -> Option<&K> {
        self.get(id).and_then(K::from_element)
    }

    pub fn get_as_mut<K: ElementVariant>(&mut self, id: Id) -> Option<&mut K> {
        self.get_mut(id).and_then(K::from_element_mut)
    }

    pub fn contains(&self, id: Id) -> bool {
        self.elements.contains_key(&id)
    }

    /// Whether `id` exists and is of kind `K`.
    pub fn contains_kind<K: ElementVariant>(&self, id: Id) -> bool {
        self.get_as::<K>(id).is_some()
    }

    /// Unlink `id` and hand back ownership without dropping it.
    pub fn remove(&mut self, id: Id) -> Option<Element> {
        self.elements.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// All elements.
    pub fn iter(&self) -> impl Iterator<Item = &Element> + Clone + '_ {
        self.elements.values()
    }

    /// All element ids.
    pub fn ids(&self) -> impl Iterator<Item = Id> + Clone + '_ {
        self.elements.keys().copied()
    }

    /// All elements of kind `K`.
    pub fn iter_kind<K: ElementVariant>(&self) -> impl Iterator<Item = &K> + Clone + '_ {
        self.elements.values().filter_map(K::from_element)
    }
}

impl FromIterator<Element> for ObjectStore {
    /// Collect elements by id; a later element replaces an earlier one with
    /// the same id.
    fn from_iter<I: IntoIterator<Item = Element>>(iter: I) -> Self {
        Self {
            elements: iter.into_iter().map(|el| (el.id(), el)).collect(),
        }
    }
}
