//! core::document
//!
//! The scene-graph document: every element of a mesh-import scene, the
//! user's selection, and the elements deleted since the last collection.
//!
//! # Invariants
//!
//! After every public mutation:
//!
//! - Exactly one ground element exists, under [`Id::GROUND`], and it is
//!   never removed
//! - Every cross-reference of every element resolves to an element in the
//!   document (referential closure)
//! - The selection only contains present, selectable elements
//!
//! Insertion enforces closure up front; deletion preserves it by cascading
//! to everything that depends on the deleted element.
//!
//! # Deferred destruction
//!
//! Deleted elements are moved into a pending buffer rather than dropped.
//! They stay there until [`Document::garbage_collect`] is called, which is
//! the only place they are destroyed.
//!
//! # Value semantics
//!
//! `Document` is `Clone` and owns everything it refers to, so a clone is a
//! fully independent snapshot (e.g. for an undo buffer).
//!
//! # Example
//!
//! ```
//! use meshgraph::core::document::Document;
//! use meshgraph::core::element::{Body, Joint, JointType, Mesh};
//! use meshgraph::core::types::Id;
//!
//! let mut doc = Document::new();
//! let femur = Body::new("femur");
//! let femur_id = femur.id();
//! doc.add(femur).unwrap();
//! doc.add(Joint::new(JointType::Pin, Id::GROUND, femur_id)).unwrap();
//! doc.add(Mesh::new(femur_id, "femur.obj")).unwrap();
//! assert_eq!(doc.len(), 4);
//!
//! // deleting the body takes its joint and mesh with it
//! assert!(doc.delete(femur_id));
//! assert_eq!(doc.len(), 1);
//! assert_eq!(doc.garbage_collect(), 3);
//! ```

use std::collections::{BTreeSet, HashSet};
use thiserror::Error;
use tracing::{debug, warn};

use super::element::{Element, ElementError, ElementKind, ElementVariant, Ground};
use super::graph;
use super::scene::SceneFile;
use super::store::{ObjectStore, StoreError};
use super::types::{Fingerprint, Id, TypeError};

/// Errors from document operations.
///
/// The document is left unchanged whenever one of these is returned.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DocumentError {
    #[error(
        "cannot add '{element}' (id = {id}) to the document because it contains a cross \
         reference (label = {reference}) to an element ({target}) that does not exist in the document"
    )]
    DanglingReference {
        /// Label of the element being added or modified.
        element: String,
        id: Id,
        /// Label of the offending cross-reference.
        reference: String,
        /// The unresolved id.
        target: Id,
    },

    #[error("an element with id {0} already exists in the document")]
    DuplicateId(Id),

    #[error("ground is reserved and cannot be added to the document (id = {0})")]
    GroundReserved(Id),

    #[error("id {0} is reserved for \"no element\" and cannot be added to the document")]
    ReservedId(Id),

    #[error(transparent)]
    InvalidId(#[from] TypeError),

    #[error("no element with id {0} exists in the document")]
    NotFound(Id),

    #[error("element {id} is a {found}, not a {expected}")]
    KindMismatch {
        id: Id,
        expected: ElementKind,
        found: ElementKind,
    },

    #[error("an update may not change an element's id ({id})")]
    IdentityChanged { id: Id },

    #[error(transparent)]
    InvalidCrossReference(#[from] ElementError),

    #[error("unsupported scene version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },
}

impl From<StoreError> for DocumentError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateId(id) => DocumentError::DuplicateId(id),
        }
    }
}

/// A mesh-import scene.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "SceneFile", into = "SceneFile")]
pub struct Document {
    store: ObjectStore,
    selected: HashSet<Id>,
    pending_destruction: Vec<Element>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// Documents compare by content: elements and selection. Elements awaiting
/// collection are not part of a document's value.
impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.store == other.store && self.selected == other.selected
    }
}

impl Document {
    /// Create a document that contains only ground.
    pub fn new() -> Self {
        Self {
            store: std::iter::once(Element::from(Ground::new())).collect(),
            selected: HashSet::new(),
            pending_destruction: Vec::new(),
        }
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    pub fn get(&self, id: Id) -> Option<&Element> {
        self.store.get(id)
    }

    /// Look up `id` as a specific kind.
    pub fn get_as<K: ElementVariant>(&self, id: Id) -> Option<&K> {
        self.store.get_as(id)
    }

    pub fn contains(&self, id: Id) -> bool {
        self.store.contains(id)
    }

    pub fn contains_kind<K: ElementVariant>(&self, id: Id) -> bool {
        self.store.contains_kind::<K>(id)
    }

    /// Number of live elements, ground included.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// A document always contains ground, so this is never true.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Element> + Clone + '_ {
        self.store.iter()
    }

    /// Every live element of kind `K`, in id order.
    pub fn iter_kind<K: ElementVariant>(&self) -> impl Iterator<Item = &K> + Clone + '_ {
        self.store.iter_kind::<K>()
    }

    /// Read-only access to the underlying store.
    pub fn store(&self) -> &ObjectStore {
        &self.store
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Add an element.
    ///
    /// # Errors
    ///
    /// - `DanglingReference` if any of its cross-references is not in the
    ///   document
    /// - `DuplicateId` if its id is already taken
    /// - `GroundReserved` if it is a ground element
    /// - `ReservedId` if it is stored under [`Id::EMPTY`]
    pub fn add(&mut self, element: impl Into<Element>) -> Result<&Element, DocumentError> {
        let element = element.into();

        if element.kind() == ElementKind::Ground {
            return Err(DocumentError::GroundReserved(element.id()));
        }

        if element.id().is_empty() {
            return Err(DocumentError::ReservedId(element.id()));
        }

        if let Some(missing) = element
            .cross_references()
            .find(|r| !self.store.contains(r.id))
        {
            warn!(
                id = %element.id(),
                label = element.label(),
                reference = missing.label,
                target = %missing.id,
                "rejected element with dangling cross reference"
            );
            return Err(DocumentError::DanglingReference {
                element: element.label().to_string(),
                id: element.id(),
                reference: missing.label.to_string(),
                target: missing.id,
            });
        }

        debug!(id = %element.id(), kind = %element.kind(), label = element.label(), "adding element");
        Ok(self.store.insert(element)?)
    }

    /// Rename an element. Returns `false` if it doesn't exist.
    pub fn set_label(&mut self, id: Id, label: impl Into<String>) -> bool {
        match self.store.get_mut(id) {
            Some(element) => {
                element.set_label(label);
                true
            }
            None => false,
        }
    }

    /// Re-point the `index`th cross-reference of `id` at `target`.
    ///
    /// # Errors
    ///
    /// - `NotFound` if `id` is not in the document
    /// - `InvalidCrossReference` if `index` is out of range
    /// - `DanglingReference` if `target` is not in the document
    pub fn set_cross_reference(
        &mut self,
        id: Id,
        index: usize,
        target: Id,
    ) -> Result<(), DocumentError> {
        let element = self.store.get(id).ok_or(DocumentError::NotFound(id))?;
        let reference =
            element
                .cross_reference(index)
                .ok_or_else(|| ElementError::CrossReferenceOutOfRange {
                    label: element.label().to_string(),
                    index,
                    len: element.num_cross_references(),
                })?;

        if !self.store.contains(target) {
            return Err(DocumentError::DanglingReference {
                element: element.label().to_string(),
                id,
                reference: reference.label.to_string(),
                target,
            });
        }

        debug!(%id, reference = reference.label, from = %reference.id, to = %target, "reassigning cross reference");
        if let Some(element) = self.store.get_mut(id) {
            element.set_cross_reference(index, target)?;
        }
        Ok(())
    }

    /// Edit the kind-specific payload of `id` in place.
    ///
    /// The closure sees the concrete kind. Replacing the value wholesale is
    /// allowed as long as the id is kept and every cross-reference still
    /// resolves; otherwise the edit is rolled back.
    ///
    /// # Errors
    ///
    /// - `NotFound` / `KindMismatch` if `id` is not a live `K`
    /// - `IdentityChanged` / `DanglingReference` if the edit was rolled back
    pub fn update<K, F>(&mut self, id: Id, edit: F) -> Result<(), DocumentError>
    where
        K: ElementVariant,
        F: FnOnce(&mut K),
    {
        let before = self
            .store
            .get(id)
            .ok_or(DocumentError::NotFound(id))?
            .clone();
        if before.kind() != K::KIND {
            return Err(DocumentError::KindMismatch {
                id,
                expected: K::KIND,
                found: before.kind(),
            });
        }

        if let Some(inner) = self.store.get_as_mut::<K>(id) {
            edit(inner);
        }

        let Some(after) = self.store.get(id) else {
            return Err(DocumentError::NotFound(id));
        };
        let error = if after.id() != id {
            Some(DocumentError::IdentityChanged { id })
        } else {
            after
                .cross_references()
                .find(|r| !self.store.contains(r.id))
                .map(|missing| DocumentError::DanglingReference {
                    element: after.label().to_string(),
                    id,
                    reference: missing.label.to_string(),
                    target: missing.id,
                })
        };

        match error {
            Some(error) => {
                if let Some(slot) = self.store.get_mut(id) {
                    *slot = before;
                }
                Err(error)
            }
            None => Ok(()),
        }
    }

    // =========================================================================
    // Deletion
    // =========================================================================

    /// Compute everything that deleting `id` would remove, without removing
    /// anything.
    ///
    /// # Panics
    ///
    /// Panics if the cross-reference graph contains a cycle reachable from
    /// `id`. Insertion cannot create one, so this indicates a broken
    /// invariant rather than bad input.
    pub fn deletion_set(&self, id: Id) -> BTreeSet<Id> {
        let mut out = BTreeSet::new();
        if let Some(target) = self.store.get(id) {
            self.populate_deletion_set(target, &mut out);
        }
        out
    }

    /// Delete `id` and everything that (transitively) depends on it.
    ///
    /// Returns `true` if anything was removed. Deleting an absent id, or
    /// ground, is a no-op that returns `false`.
    ///
    /// Removed elements are deselected and parked until the next
    /// [`Document::garbage_collect`].
    ///
    /// # Panics
    ///
    /// See [`Document::deletion_set`].
    pub fn delete(&mut self, id: Id) -> bool {
        // Phase 1: find everything to remove before touching the store.
        let deletion_set = self.deletion_set(id);

        // Phase 2: commit.
        for &deleted in &deletion_set {
            self.deselect(deleted);
            if let Some(element) = self.store.remove(deleted) {
                self.pending_destruction.push(element);
            }
        }

        if !deletion_set.is_empty() {
            debug!(%id, removed = deletion_set.len(), "deleted elements");
        }
        !deletion_set.is_empty()
    }

    /// Delete every selected element, then clear the selection.
    pub fn delete_selected(&mut self) {
        let mut selected: Vec<Id> = self.selected.iter().copied().collect();
        selected.sort();

        for id in selected {
            self.delete(id);
        }

        self.deselect_all();
    }

    /// Destroy every element deleted since the last collection.
    ///
    /// Returns how many were destroyed.
    pub fn garbage_collect(&mut self) -> usize {
        let count = self.pending_destruction.len();
        self.pending_destruction.clear();
        if count > 0 {
            debug!(count, "garbage collected deleted elements");
        }
        count
    }

    /// Elements deleted but not yet collected.
    pub fn pending_destruction(&self) -> &[Element] {
        &self.pending_destruction
    }

    fn populate_deletion_set(&self, target: &Element, out: &mut BTreeSet<Id>) {
        // non-deletable elements (ground) neither join the set nor cascade
        if !target.can_delete() {
            return;
        }

        let deleted_id = target.id();
        if !out.insert(deleted_id) {
            panic!(
                "cannot populate deletion set - cycle detected at '{}' (id = {})",
                target.label(),
                deleted_id
            );
        }

        for element in self.store.iter() {
            if element.is_cross_referencing(deleted_id) {
                self.populate_deletion_set(element, out);
            }
        }
    }

    // =========================================================================
    // Selection
    // =========================================================================

    pub fn has_selection(&self) -> bool {
        !self.selected.is_empty()
    }

    pub fn selected(&self) -> &HashSet<Id> {
        &self.selected
    }

    pub fn is_selected(&self, id: Id) -> bool {
        self.selected.contains(&id)
    }

    /// Select `id` if it exists and is selectable; otherwise do nothing.
    pub fn select(&mut self, id: Id) {
        if self.store.get(id).is_some_and(Element::can_select) {
            self.selected.insert(id);
        }
    }

    /// Replace the selection with `id`.
    pub fn select_only(&mut self, id: Id) {
        self.deselect_all();
        self.select(id);
    }

    pub fn deselect(&mut self, id: Id) {
        self.selected.remove(&id);
    }

    pub fn select_all(&mut self) {
        let selectable = self
            .store
            .iter()
            .filter(|el| el.can_select())
            .map(Element::id);
        self.selected.extend(selectable);
    }

    pub fn deselect_all(&mut self) {
        self.selected.clear();
    }

    /// Select everything in the selection group of `id`.
    ///
    /// See [`graph::in_selection_group_of`].
    pub fn select_group_of(&mut self, id: Id) {
        for other in graph::selection_group_of(self, id) {
            self.select(other);
        }
    }

    // =========================================================================
    // Snapshots
    // =========================================================================

    /// Content hash over elements (in id order) and the selection.
    pub fn fingerprint(&self) -> Fingerprint {
        let elements = self.store.iter().map(|el| {
            let refs: Vec<String> = el
                .cross_references()
                .map(|r| format!("{}={}", r.label, r.id))
                .collect();
            format!(
                "{}\t{}\t{}\t{}\t{}",
                el.id(),
                el.kind(),
                el.label(),
                refs.join(","),
                el.payload_summary()
            )
        });

        let mut selected: Vec<Id> = self.selected.iter().copied().collect();
        selected.sort();
        let selection = selected
            .iter()
            .map(Id::to_string)
            .collect::<Vec<_>>()
            .join(",");

        Fingerprint::compute(elements.chain(std::iter::once(format!("selected\t{selection}"))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::element::{Body, Joint, JointType, Mesh, Station};

    fn add_body(doc: &mut Document, label: &str) -> Id {
        let body = Body::new(label);
        let id = body.id();
        doc.add(body).unwrap();
        id
    }

    fn add_joint(doc: &mut Document, parent: Id, child: Id) -> Id {
        let joint = Joint::new(JointType::Pin, parent, child);
        let id = joint.id();
        doc.add(joint).unwrap();
        id
    }

    #[test]
    fn new_document_contains_only_ground() {
        let doc = Document::new();
        assert_eq!(doc.len(), 1);
        assert!(doc.contains_kind::<Ground>(Id::GROUND));
        assert!(!doc.has_selection());
        assert!(doc.pending_destruction().is_empty());
    }

    #[test]
    fn add_rejects_dangling_reference() {
        let mut doc = Document::new();
        let body = add_body(&mut doc, "b");
        let before = doc.clone();

        let missing = Id::generate();
        let joint = Joint::new(JointType::Pin, missing, body).with_label("j");
        let joint_id = joint.id();
        let err = doc.add(joint).unwrap_err();

        assert_eq!(
            err,
            DocumentError::DanglingReference {
                element: "j".to_string(),
                id: joint_id,
                reference: "parent".to_string(),
                target: missing,
            }
        );
        assert_eq!(doc, before);
        assert!(!doc.contains(joint_id));
    }

    #[test]
    fn add_rejects_duplicate_and_ground() {
        let mut doc = Document::new();
        let body = add_body(&mut doc, "b");

        assert_eq!(
            doc.add(Body::with_id(body, "again")).unwrap_err(),
            DocumentError::DuplicateId(body)
        );
        assert_eq!(
            doc.add(Ground::new()).unwrap_err(),
            DocumentError::GroundReserved(Id::GROUND)
        );
        assert_eq!(doc.len(), 2);
    }

    #[test]
    fn add_rejects_empty_id() {
        let mut doc = Document::new();
        let before = doc.clone();

        assert_eq!(
            doc.add(Body::with_id(Id::EMPTY, "nothing")).unwrap_err(),
            DocumentError::ReservedId(Id::EMPTY)
        );
        assert_eq!(doc, before);
        assert!(!doc.contains(Id::EMPTY));
    }

    #[test]
    fn add_accepts_garbage_joint() {
        // garbage joints are diagnosed later, not prevented here
        let mut doc = Document::new();
        let body = add_body(&mut doc, "b");
        assert!(doc.add(Joint::new(JointType::Weld, body, body)).is_ok());
    }

    #[test]
    fn delete_cascades_to_dependents() {
        let mut doc = Document::new();
        let body = add_body(&mut doc, "b");
        let joint = add_joint(&mut doc, Id::GROUND, body);
        let mesh = Mesh::new(body, "b.stl");
        let mesh_id = mesh.id();
        doc.add(mesh).unwrap();

        assert!(doc.delete(body));
        assert!(!doc.contains(body));
        assert!(!doc.contains(joint));
        assert!(!doc.contains(mesh_id));
        assert!(doc.contains(Id::GROUND));
        assert_eq!(doc.pending_destruction().len(), 3);
    }

    #[test]
    fn delete_leaf_leaves_parent() {
        let mut doc = Document::new();
        let body = add_body(&mut doc, "b");
        let joint = add_joint(&mut doc, Id::GROUND, body);

        assert!(doc.delete(joint));
        assert!(doc.contains(body));
        assert!(!doc.contains(joint));
    }

    #[test]
    fn delete_ground_is_rejected() {
        let mut doc = Document::new();
        let body = add_body(&mut doc, "b");
        add_joint(&mut doc, Id::GROUND, body);

        assert!(!doc.delete(Id::GROUND));
        assert_eq!(doc.len(), 3);
        assert!(doc.deletion_set(Id::GROUND).is_empty());
    }

    #[test]
    fn delete_absent_is_noop() {
        let mut doc = Document::new();
        let body = add_body(&mut doc, "b");

        assert!(doc.delete(body));
        assert!(!doc.delete(body));
        assert!(!doc.delete(Id::generate()));
        assert_eq!(doc.pending_destruction().len(), 1);
    }

    #[test]
    fn delete_deselects_removed_elements() {
        let mut doc = Document::new();
        let body = add_body(&mut doc, "b");
        let joint = add_joint(&mut doc, Id::GROUND, body);
        doc.select(body);
        doc.select(joint);

        doc.delete(body);
        assert!(!doc.is_selected(body));
        assert!(!doc.is_selected(joint));
        assert!(!doc.has_selection());
    }

    #[test]
    fn deletion_set_previews_without_mutating() {
        let mut doc = Document::new();
        let a = add_body(&mut doc, "a");
        let b = add_body(&mut doc, "b");
        let j = add_joint(&mut doc, a, b);

        let set = doc.deletion_set(a);
        assert_eq!(set, BTreeSet::from([a, j]));
        assert_eq!(doc.len(), 4);
    }

    #[test]
    #[should_panic(expected = "cycle detected")]
    fn delete_panics_on_reference_cycle() {
        let mut doc = Document::new();
        let a = add_body(&mut doc, "a");
        let b = add_body(&mut doc, "b");
        let j1 = add_joint(&mut doc, Id::GROUND, a);
        let j2 = add_joint(&mut doc, Id::GROUND, b);
        doc.set_cross_reference(j1, 0, j2).unwrap();
        doc.set_cross_reference(j2, 0, j1).unwrap();

        doc.delete(j1);
    }

    #[test]
    fn garbage_collect_empties_pending() {
        let mut doc = Document::new();
        let body = add_body(&mut doc, "b");
        add_joint(&mut doc, Id::GROUND, body);
        doc.delete(body);

        assert_eq!(doc.pending_destruction()[0].id(), body);
        assert_eq!(doc.garbage_collect(), 2);
        assert!(doc.pending_destruction().is_empty());
        assert_eq!(doc.garbage_collect(), 0);
    }

    #[test]
    fn delete_selected_removes_selection() {
        let mut doc = Document::new();
        let a = add_body(&mut doc, "a");
        let b = add_body(&mut doc, "b");
        let c = add_body(&mut doc, "c");
        doc.select(a);
        doc.select(b);

        doc.delete_selected();
        assert!(!doc.contains(a));
        assert!(!doc.contains(b));
        assert!(doc.contains(c));
        assert!(!doc.has_selection());
    }

    #[test]
    fn select_filters_unknown_and_unselectable() {
        let mut doc = Document::new();
        let body = add_body(&mut doc, "b");

        doc.select(Id::GROUND);
        doc.select(Id::generate());
        assert!(!doc.has_selection());

        doc.select(body);
        assert!(doc.is_selected(body));
        doc.deselect(body);
        assert!(!doc.is_selected(body));
    }

    #[test]
    fn select_all_and_select_only() {
        let mut doc = Document::new();
        let a = add_body(&mut doc, "a");
        let b = add_body(&mut doc, "b");

        doc.select_all();
        assert_eq!(doc.selected().len(), 2);
        assert!(!doc.is_selected(Id::GROUND));

        doc.select_only(b);
        assert!(!doc.is_selected(a));
        assert!(doc.is_selected(b));

        doc.deselect_all();
        assert!(!doc.has_selection());
    }

    #[test]
    fn set_cross_reference_validates() {
        let mut doc = Document::new();
        let a = add_body(&mut doc, "a");
        let b = add_body(&mut doc, "b");
        let station = Station::new("s", a, [0.0; 3]);
        let s = station.id();
        doc.add(station).unwrap();

        doc.set_cross_reference(s, 0, b).unwrap();
        assert_eq!(doc.get(s).unwrap().cross_reference(0).unwrap().id, b);

        let missing = Id::generate();
        assert!(matches!(
            doc.set_cross_reference(s, 0, missing),
            Err(DocumentError::DanglingReference { target, .. }) if target == missing
        ));
        assert!(matches!(
            doc.set_cross_reference(s, 1, a),
            Err(DocumentError::InvalidCrossReference(_))
        ));
        assert_eq!(
            doc.set_cross_reference(missing, 0, a),
            Err(DocumentError::NotFound(missing))
        );
        assert_eq!(doc.get(s).unwrap().cross_reference(0).unwrap().id, b);
    }

    #[test]
    fn update_edits_payload() {
        let mut doc = Document::new();
        let body = add_body(&mut doc, "b");

        doc.update::<Body, _>(body, |b| b.set_mass(4.0)).unwrap();
        assert_eq!(doc.get_as::<Body>(body).unwrap().mass(), 4.0);
    }

    #[test]
    fn update_rolls_back_identity_change() {
        let mut doc = Document::new();
        let body = add_body(&mut doc, "b");

        let err = doc
            .update::<Body, _>(body, |b| *b = Body::new("impostor"))
            .unwrap_err();
        assert_eq!(err, DocumentError::IdentityChanged { id: body });
        assert_eq!(doc.get(body).unwrap().label(), "b");
    }

    #[test]
    fn update_rolls_back_dangling_reference() {
        let mut doc = Document::new();
        let body = add_body(&mut doc, "b");
        let joint = add_joint(&mut doc, Id::GROUND, body);

        let err = doc
            .update::<Joint, _>(joint, |j| {
                *j = Joint::with_id(joint, JointType::Pin, Id::generate(), body)
            })
            .unwrap_err();
        assert!(matches!(err, DocumentError::DanglingReference { .. }));
        assert_eq!(doc.get_as::<Joint>(joint).unwrap().parent(), Id::GROUND);
    }

    #[test]
    fn update_checks_kind() {
        let mut doc = Document::new();
        let body = add_body(&mut doc, "b");

        assert_eq!(
            doc.update::<Joint, _>(body, |_| {}).unwrap_err(),
            DocumentError::KindMismatch {
                id: body,
                expected: ElementKind::Joint,
                found: ElementKind::Body,
            }
        );
    }

    #[test]
    fn clone_is_independent() {
        let mut doc = Document::new();
        let body = add_body(&mut doc, "b");
        let snapshot = doc.clone();

        doc.set_label(body, "renamed");
        doc.select(body);
        assert_eq!(snapshot.get(body).unwrap().label(), "b");
        assert!(!snapshot.is_selected(body));
        assert_ne!(doc, snapshot);
    }

    #[test]
    fn fingerprint_tracks_content() {
        let mut doc = Document::new();
        let body = add_body(&mut doc, "b");
        let fp = doc.fingerprint();

        assert_eq!(doc.clone().fingerprint(), fp);

        doc.select(body);
        let selected_fp = doc.fingerprint();
        assert_ne!(selected_fp, fp);

        doc.set_label(body, "c");
        assert_ne!(doc.fingerprint(), selected_fp);
    }

    #[test]
    fn pending_elements_do_not_affect_equality() {
        let mut doc = Document::new();
        let a = add_body(&mut doc, "a");
        let collected = {
            let mut d = doc.clone();
            d.delete(a);
            d.garbage_collect();
            d
        };

        doc.delete(a);
        assert_eq!(doc, collected);
        assert_eq!(doc.fingerprint(), collected.fingerprint());
    }
}
