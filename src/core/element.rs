//! core::element
//!
//! Scene elements: the nodes of a document's graph.
//!
//! # Kinds
//!
//! Every element is one of a closed set of kinds:
//!
//! - [`Ground`] - the sentinel origin, present once per document
//! - [`Body`] - a rigid body; referenced by joints, meshes and stations
//! - [`Joint`] - connects a parent (a body or ground) to a child body
//! - [`Mesh`] - a mesh file attached to a body or ground
//! - [`Station`] - a point of interest attached to a body or ground
//!
//! # Cross-references
//!
//! Elements depend on each other by [`Id`]. Those dependencies are exposed
//! generically (by index) so that code which doesn't care about the
//! concrete kind can still follow, display, and reassign them.
//!
//! # Example
//!
//! ```
//! use meshgraph::core::element::{Body, Element, ElementKind, Joint, JointType};
//! use meshgraph::core::types::Id;
//!
//! let body = Body::new("femur");
//! let joint = Joint::new(JointType::Pin, Id::GROUND, body.id());
//!
//! let el = Element::from(joint);
//! assert_eq!(el.kind(), ElementKind::Joint);
//! assert_eq!(el.label(), "PinJoint");
//! assert_eq!(el.num_cross_references(), 2);
//! assert_eq!(el.cross_reference(1).unwrap().id, body.id());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

use super::types::Id;

/// Label every ground element reports.
pub const GROUND_LABEL: &str = "ground";

/// Errors from element-level operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ElementError {
    #[error("cross reference index {index} out of range for '{label}' ({len} cross references)")]
    CrossReferenceOutOfRange {
        label: String,
        index: usize,
        len: usize,
    },

    #[error("unknown element kind: {0}")]
    UnknownKind(String),
}

/// Discriminant of an [`Element`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Ground,
    Body,
    Joint,
    Mesh,
    Station,
}

impl ElementKind {
    /// Every kind, in declaration order.
    pub const ALL: [ElementKind; 5] = [
        ElementKind::Ground,
        ElementKind::Body,
        ElementKind::Joint,
        ElementKind::Mesh,
        ElementKind::Station,
    ];

    /// Human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            ElementKind::Ground => "Ground",
            ElementKind::Body => "Body",
            ElementKind::Joint => "Joint",
            ElementKind::Mesh => "Mesh",
            ElementKind::Station => "Station",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ElementKind {
    type Err = ElementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ElementKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ElementError::UnknownKind(s.to_string()))
    }
}

/// Which way a cross-reference points in the parent/child topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrossRefDirection {
    /// Towards whatever this element hangs off (the usual case).
    ToParent,
    /// Towards something that hangs off this element (a joint's child).
    ToChild,
}

/// One outbound dependency of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrossRef {
    /// The element depended upon.
    pub id: Id,
    /// What the dependency is called (e.g. "parent", "child").
    pub label: &'static str,
    pub direction: CrossRefDirection,
}

const PARENT: &str = "parent";
const CHILD: &str = "child";

/// The scene origin.
///
/// Always lives under [`Id::GROUND`]; cannot be renamed, selected, or deleted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Ground {}

impl Ground {
    pub fn new() -> Self {
        Self {}
    }

    pub fn id(&self) -> Id {
        Id::GROUND
    }
}

fn default_mass() -> f64 {
    1.0
}

/// A rigid body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    id: Id,
    label: String,
    #[serde(default = "default_mass")]
    mass: f64,
}

impl Body {
    /// Create a body with a freshly generated id and unit mass.
    pub fn new(label: impl Into<String>) -> Self {
        Self::with_id(Id::generate(), label)
    }

    pub fn with_id(id: Id, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            mass: default_mass(),
        }
    }

    /// Builder-style mass override.
    pub fn with_mass(mut self, mass: f64) -> Self {
        self.mass = mass;
        self
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Mass in kilograms.
    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn set_mass(&mut self, mass: f64) {
        self.mass = mass;
    }
}

/// Physical joint flavours understood by model conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JointType {
    /// Six degrees of freedom.
    #[default]
    Free,
    /// One rotational degree of freedom.
    Pin,
    /// Rigid attachment.
    Weld,
}

impl JointType {
    pub fn name(self) -> &'static str {
        match self {
            JointType::Free => "FreeJoint",
            JointType::Pin => "PinJoint",
            JointType::Weld => "WeldJoint",
        }
    }
}

impl fmt::Display for JointType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A joint between a parent (body or ground) and a child body.
///
/// Without a user-assigned label, a joint is labelled by its type name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Joint {
    id: Id,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    label: Option<String>,
    #[serde(default)]
    joint_type: JointType,
    parent: Id,
    child: Id,
}

impl Joint {
    pub fn new(joint_type: JointType, parent: Id, child: Id) -> Self {
        Self::with_id(Id::generate(), joint_type, parent, child)
    }

    pub fn with_id(id: Id, joint_type: JointType, parent: Id, child: Id) -> Self {
        Self {
            id,
            label: None,
            joint_type,
            parent,
            child,
        }
    }

    /// Builder-style user-assigned label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn label(&self) -> &str {
        self.label
            .as_deref()
            .filter(|label| !label.is_empty())
            .unwrap_or_else(|| self.joint_type.name())
    }

    pub fn joint_type(&self) -> JointType {
        self.joint_type
    }

    pub fn set_joint_type(&mut self, joint_type: JointType) {
        self.joint_type = joint_type;
    }

    /// Parent side of the joint; may be [`Id::GROUND`].
    pub fn parent(&self) -> Id {
        self.parent
    }

    pub fn child(&self) -> Id {
        self.child
    }

    /// Whether the joint touches `body` on either side.
    pub fn is_attached_to(&self, body: Id) -> bool {
        self.parent == body || self.child == body
    }
}

/// A mesh file placed in the scene and attached to a body or ground.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    id: Id,
    label: String,
    parent: Id,
    path: PathBuf,
}

impl Mesh {
    /// Create a mesh labelled after its file stem.
    pub fn new(parent: Id, path: impl Into<PathBuf>) -> Self {
        Self::with_id(Id::generate(), parent, path)
    }

    pub fn with_id(id: Id, parent: Id, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let label = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .filter(|stem| !stem.is_empty())
            .unwrap_or_else(|| "mesh".to_string());
        Self {
            id,
            label,
            parent,
            path,
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// The body (or ground) the mesh is attached to.
    pub fn parent(&self) -> Id {
        self.parent
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// A point of interest attached to a body or ground.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    id: Id,
    label: String,
    parent: Id,
    #[serde(default)]
    location: [f64; 3],
}

impl Station {
    pub fn new(label: impl Into<String>, parent: Id, location: [f64; 3]) -> Self {
        Self::with_id(Id::generate(), label, parent, location)
    }

    pub fn with_id(id: Id, label: impl Into<String>, parent: Id, location: [f64; 3]) -> Self {
        Self {
            id,
            label: label.into(),
            parent,
            location,
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn parent(&self) -> Id {
        self.parent
    }

    /// Location in ground coordinates.
    pub fn location(&self) -> [f64; 3] {
        self.location
    }

    pub fn set_location(&mut self, location: [f64; 3]) {
        self.location = location;
    }
}

/// A node in the scene graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Element {
    Ground(Ground),
    Body(Body),
    Joint(Joint),
    Mesh(Mesh),
    Station(Station),
}

impl Element {
    pub fn id(&self) -> Id {
        match self {
            Element::Ground(g) => g.id(),
            Element::Body(b) => b.id,
            Element::Joint(j) => j.id,
            Element::Mesh(m) => m.id,
            Element::Station(s) => s.id,
        }
    }

    pub fn kind(&self) -> ElementKind {
        match self {
            Element::Ground(_) => ElementKind::Ground,
            Element::Body(_) => ElementKind::Body,
            Element::Joint(_) => ElementKind::Joint,
            Element::Mesh(_) => ElementKind::Mesh,
            Element::Station(_) => ElementKind::Station,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Element::Ground(_) => GROUND_LABEL,
            Element::Body(b) => b.label(),
            Element::Joint(j) => j.label(),
            Element::Mesh(m) => m.label(),
            Element::Station(s) => s.label(),
        }
    }

    /// Rename the element. Ground ignores this.
    pub fn set_label(&mut self, label: impl Into<String>) {
        let label = label.into();
        match self {
            Element::Ground(_) => {}
            Element::Body(b) => b.label = label,
            Element::Joint(j) => j.label = Some(label),
            Element::Mesh(m) => m.label = label,
            Element::Station(s) => s.label = label,
        }
    }

    pub fn can_change_label(&self) -> bool {
        !matches!(self, Element::Ground(_))
    }

    pub fn can_select(&self) -> bool {
        !matches!(self, Element::Ground(_))
    }

    pub fn can_delete(&self) -> bool {
        !matches!(self, Element::Ground(_))
    }

    pub fn num_cross_references(&self) -> usize {
        match self {
            Element::Ground(_) | Element::Body(_) => 0,
            Element::Joint(_) => 2,
            Element::Mesh(_) | Element::Station(_) => 1,
        }
    }

    /// The `index`th cross-reference, if there is one.
    pub fn cross_reference(&self, index: usize) -> Option<CrossRef> {
        let parent = |id| CrossRef {
            id,
            label: PARENT,
            direction: CrossRefDirection::ToParent,
        };

        match (self, index) {
            (Element::Joint(j), 0) => Some(parent(j.parent)),
            (Element::Joint(j), 1) => Some(CrossRef {
                id: j.child,
                label: CHILD,
                direction: CrossRefDirection::ToChild,
            }),
            (Element::Mesh(m), 0) => Some(parent(m.parent)),
            (Element::Station(s), 0) => Some(parent(s.parent)),
            _ => None,
        }
    }

    /// All cross-references, in index order.
    pub fn cross_references(&self) -> impl Iterator<Item = CrossRef> + '_ {
        (0..self.num_cross_references()).filter_map(|i| self.cross_reference(i))
    }

    /// Whether any cross-reference points at `id`.
    pub fn is_cross_referencing(&self, id: Id) -> bool {
        self.cross_references().any(|r| r.id == id)
    }

    /// Re-point the `index`th cross-reference.
    ///
    /// Crate-private: the document is responsible for keeping references
    /// resolvable, see [`crate::core::document::Document::set_cross_reference`].
    pub(crate) fn set_cross_reference(&mut self, index: usize, id: Id) -> Result<(), ElementError> {
        match (self, index) {
            (Element::Joint(j), 0) => j.parent = id,
            (Element::Joint(j), 1) => j.child = id,
            (Element::Mesh(m), 0) => m.parent = id,
            (Element::Station(s), 0) => s.parent = id,
            (other, index) => {
                return Err(ElementError::CrossReferenceOutOfRange {
                    label: other.label().to_string(),
                    index,
                    len: other.num_cross_references(),
                })
            }
        }
        Ok(())
    }

    /// Kind-specific payload, rendered canonically for fingerprinting.
    pub(crate) fn payload_summary(&self) -> String {
        match self {
            Element::Ground(_) => String::new(),
            Element::Body(b) => format!("mass={:?}", b.mass),
            Element::Joint(j) => format!("type={}", j.joint_type.name()),
            Element::Mesh(m) => format!("path={}", m.path.display()),
            Element::Station(s) => format!("location={:?}", s.location),
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}' ({})", self.kind(), self.label(), self.id())
    }
}

/// A concrete element kind that can be viewed through an [`Element`].
///
/// This is what makes kind-filtered iteration possible without manual
/// matching at every call site.
pub trait ElementVariant: Sized + 'static {
    const KIND: ElementKind;

    fn from_element(element: &Element) -> Option<&Self>;

    fn from_element_mut(element: &mut Element) -> Option<&mut Self>;
}

macro_rules! element_variant {
    ($ty:ident) => {
        impl ElementVariant for $ty {
            const KIND: ElementKind = ElementKind::$ty;

            fn from_element(element: &Element) -> Option<&Self> {
                match element {
                    Element::$ty(inner) => Some(inner),
                    _ => None,
                }
            }

            fn from_element_mut(element: &mut Element) -> Option<&mut Self> {
                match element {
                    Element::$ty(inner) => Some(inner),
                    _ => None,
                }
            }
        }

        impl From<$ty> for Element {
            fn from(inner: $ty) -> Self {
                Element::$ty(inner)
            }
        }
    };
}

element_variant!(Ground);
element_variant!(Body);
element_variant!(Joint);
element_variant!(Mesh);
element_variant!(Station);
