//! core::graph
//!
//! Graph algorithms over a [`Document`].
//!
//! # Architecture
//!
//! The document is a graph where:
//! - Nodes are scene elements
//! - Edges are cross-references (a joint points at its parent and child,
//!   meshes and stations point at what they are attached to)
//! - Ground is the root every body should eventually reach through joints
//!
//! # Invariants
//!
//! - Joint topology is *not* guaranteed acyclic, so every traversal here
//!   carries an explicit visited set
//! - Nothing in this module mutates the document

use std::collections::HashSet;

use super::document::Document;
use super::element::{Body, Element, Joint};
use super::types::Id;

/// Label shown for ids that don't resolve.
pub const MISSING_LABEL: &str = "(not found)";

/// Whether `joint` is structurally nonsensical.
///
/// A joint is garbage if its child is ground, it joins something to
/// itself, its parent is neither ground nor a body, or its child is not a
/// body. A correctly working document never contains one.
pub fn is_garbage_joint(doc: &Document, joint: &Joint) -> bool {
    if joint.child() == Id::GROUND {
        return true;
    }

    if joint.parent() == joint.child() {
        return true;
    }

    if joint.parent() != Id::GROUND && !doc.contains_kind::<Body>(joint.parent()) {
        return true;
    }

    !doc.contains_kind::<Body>(joint.child())
}

/// Ids of every garbage joint in the document.
pub fn garbage_joints(doc: &Document) -> Vec<Id> {
    doc.iter_kind::<Joint>()
        .filter(|joint| is_garbage_joint(doc, joint))
        .map(Joint::id)
        .collect()
}

/// How a body that is the child of no joint is judged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FloatingBodies {
    /// Unconstrained bodies count as attached.
    Attached,
    /// Unconstrained bodies count as detached.
    Detached,
}

/// Whether `joint` reaches ground through its parent.
///
/// `visited` must be shared across the whole traversal; see
/// [`is_body_attached_to_ground`].
pub fn is_joint_attached_to_ground(doc: &Document, joint: &Joint, visited: &mut HashSet<Id>) -> bool {
    joint_attached(doc, joint, visited, FloatingBodies::Attached)
}

/// Whether `body` reaches ground by walking joints from child to parent.
///
/// A body that is the child of no joint at all is treated as attached:
/// a freshly added, not-yet-jointed body is not an error.
///
/// Joints are recorded in `visited` as they are explored and skipped when
/// seen again, so cyclic joint topologies terminate.
///
/// # Example
///
/// ```
/// use std::collections::HashSet;
/// use meshgraph::core::document::Document;
/// use meshgraph::core::element::{Body, Joint, JointType};
/// use meshgraph::core::graph::is_body_attached_to_ground;
/// use meshgraph::core::types::Id;
///
/// let mut doc = Document::new();
/// let a = Body::new("a");
/// let b = Body::new("b");
/// let (a_id, b_id) = (a.id(), b.id());
/// doc.add(a).unwrap();
/// doc.add(b).unwrap();
/// doc.add(Joint::new(JointType::Pin, Id::GROUND, a_id)).unwrap();
/// doc.add(Joint::new(JointType::Pin, a_id, b_id)).unwrap();
///
/// let b = doc.get_as::<Body>(b_id).unwrap();
/// assert!(is_body_attached_to_ground(&doc, b, &mut HashSet::new()));
/// ```
pub fn is_body_attached_to_ground(doc: &Document, body: &Body, visited: &mut HashSet<Id>) -> bool {
    body_attached(doc, body, visited, FloatingBodies::Attached)
}

fn joint_attached(
    doc: &Document,
    joint: &Joint,
    visited: &mut HashSet<Id>,
    floating: FloatingBodies,
) -> bool {
    if joint.parent() == Id::GROUND {
        return true;
    }

    match doc.get_as::<Body>(joint.parent()) {
        Some(parent) => body_attached(doc, parent, visited, floating),
        None => false,
    }
}

pub(crate) fn body_attached(
    doc: &Document,
    body: &Body,
    visited: &mut HashSet<Id>,
    floating: FloatingBodies,
) -> bool {
    let mut child_in_at_least_one_joint = false;

    for joint in doc.iter_kind::<Joint>() {
        if joint.child() != body.id() {
            continue;
        }
        child_in_at_least_one_joint = true;

        if !visited.insert(joint.id()) {
            continue;
        }

        if joint_attached(doc, joint, visited, floating) {
            return true;
        }
    }

    !child_in_at_least_one_joint && floating == FloatingBodies::Attached
}

/// Whether `body` is the child of at least one joint.
pub fn is_jointed(doc: &Document, body: Id) -> bool {
    doc.iter_kind::<Joint>().any(|joint| joint.child() == body)
}

/// The body a selection group is anchored on, if any.
fn selection_anchor(doc: &Document, id: Id) -> Option<Id> {
    match doc.get(id)? {
        Element::Body(body) => Some(body.id()),
        Element::Mesh(mesh) => doc.get_as::<Body>(mesh.parent()).map(Body::id),
        Element::Station(station) => doc.get_as::<Body>(station.parent()).map(Body::id),
        _ => None,
    }
}

/// Whether `id` belongs to the selection group of `parent`.
///
/// Selecting a body implicitly selects what is rigidly attached to it:
/// the group of a body (or of a mesh/station on a body) is that body plus
/// every mesh and station attached to it. Anything else only groups with
/// itself. The empty id is never in a group.
pub fn in_selection_group_of(doc: &Document, parent: Id, id: Id) -> bool {
    if id.is_empty() || parent.is_empty() {
        return false;
    }

    if id == parent {
        return true;
    }

    let Some(anchor) = selection_anchor(doc, parent) else {
        return false;
    };

    match doc.get(id) {
        Some(Element::Body(body)) => body.id() == anchor,
        Some(Element::Mesh(mesh)) => mesh.parent() == anchor,
        Some(Element::Station(station)) => station.parent() == anchor,
        _ => false,
    }
}

/// Every element id in the selection group of `parent`, in id order.
pub fn selection_group_of(doc: &Document, parent: Id) -> Vec<Id> {
    doc.iter()
        .map(Element::id)
        .filter(|&id| in_selection_group_of(doc, parent, id))
        .collect()
}

/// Label of `id`, or [`MISSING_LABEL`].
pub fn label_of(doc: &Document, id: Id) -> &str {
    doc.get(id).map_or(MISSING_LABEL, Element::label)
}

/// Short parenthesised summary of an element, for menus and listings.
pub fn describe(doc: &Document, element: &Element) -> String {
    match element {
        Element::Ground(_) => "(scene origin)".to_string(),
        Element::Mesh(mesh) => {
            let file = mesh
                .path()
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            format!(
                "({}, {}, attached to {})",
                element.kind(),
                file,
                label_of(doc, mesh.parent())
            )
        }
        Element::Body(_) => format!("({})", element.kind()),
        Element::Joint(joint) => format!(
            "({}, {} --> {})",
            joint.joint_type(),
            label_of(doc, joint.child()),
            label_of(doc, joint.parent())
        ),
        Element::Station(station) => format!(
            "({}, attached to {})",
            element.kind(),
            label_of(doc, station.parent())
        ),
    }
}
