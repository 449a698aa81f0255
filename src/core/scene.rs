//! core::scene
//!
//! Plain-data snapshot of a [`Document`].
//!
//! # Format
//!
//! A scene is a version number, a flat list of elements, and the selected
//! ids. Ground is implicit and omitted on output; elements may appear in
//! any order on input.
//!
//! ```toml
//! version = 1
//! selected = [2]
//!
//! [[elements]]
//! kind = "body"
//! id = 2
//! label = "femur"
//!
//! [[elements]]
//! kind = "joint"
//! id = 3
//! joint_type = "pin"
//! parent = 1
//! child = 2
//! ```
//!
//! Loading goes through the same checks as [`Document::add`], so a scene
//! that loads is a scene that satisfies the document's invariants.
//!
//! # Example
//!
//! ```
//! use meshgraph::core::document::Document;
//! use meshgraph::core::element::Body;
//!
//! let mut doc = Document::new();
//! doc.add(Body::new("femur")).unwrap();
//!
//! let json = serde_json::to_string(&doc).unwrap();
//! let back: Document = serde_json::from_str(&json).unwrap();
//! assert_eq!(back, doc);
//! ```

use serde::{Deserialize, Serialize};

use super::document::{Document, DocumentError};
use super::element::{Element, ElementKind};
use super::types::Id;

/// Current scene format version.
pub const SCENE_VERSION: u32 = 1;

fn default_version() -> u32 {
    SCENE_VERSION
}

/// Serialisable snapshot of a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneFile {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default)]
    pub selected: Vec<Id>,

    #[serde(default)]
    pub elements: Vec<Element>,
}

impl Default for SceneFile {
    fn default() -> Self {
        Self {
            version: SCENE_VERSION,
            selected: Vec::new(),
            elements: Vec::new(),
        }
    }
}

impl Document {
    /// Snapshot the document: elements in id order (ground omitted) and
    /// the sorted selection.
    pub fn to_scene(&self) -> SceneFile {
        let mut selected: Vec<Id> = self.selected().iter().copied().collect();
        selected.sort();

        SceneFile {
            version: SCENE_VERSION,
            selected,
            elements: self
                .iter()
                .filter(|el| el.kind() != ElementKind::Ground)
                .cloned()
                .collect(),
        }
    }

    /// Rebuild a document from a snapshot.
    ///
    /// Elements are inserted in dependency order, so the snapshot need not
    /// list referenced elements first. Selected ids that don't resolve to
    /// selectable elements are dropped.
    ///
    /// # Errors
    ///
    /// - `UnsupportedVersion` for an unknown format version
    /// - `GroundReserved` for a non-ground element under [`Id::GROUND`]
    /// - `ReservedId` for an element under [`Id::EMPTY`]
    /// - `InvalidId` for an id the generator cannot be advanced past
    /// - `DuplicateId` if two elements share an id
    /// - `DanglingReference` if a cross-reference never resolves
    pub fn from_scene(scene: SceneFile) -> Result<Document, DocumentError> {
        if scene.version != SCENE_VERSION {
            return Err(DocumentError::UnsupportedVersion {
                found: scene.version,
                expected: SCENE_VERSION,
            });
        }

        let mut pending = Vec::with_capacity(scene.elements.len());
        for element in scene.elements {
            if element.kind() == ElementKind::Ground {
                continue;
            }
            if element.id().is_empty() {
                return Err(DocumentError::ReservedId(element.id()));
            }
            if element.id() == Id::GROUND {
                return Err(DocumentError::GroundReserved(element.id()));
            }
            Id::reserve_through(element.id())?;
            pending.push(element);
        }

        let mut doc = Document::new();

        // repeatedly add whatever has all its references satisfied
        while !pending.is_empty() {
            let before = pending.len();
            let mut deferred = Vec::new();

            for element in pending {
                if element.cross_references().all(|r| doc.contains(r.id)) {
                    doc.add(element)?;
                } else {
                    deferred.push(element);
                }
            }

            if deferred.len() == before {
                // no progress: report the first unresolvable element
                for element in deferred {
                    doc.add(element)?;
                }
                break;
            }
            pending = deferred;
        }

        for id in scene.selected {
            doc.select(id);
        }

        Ok(doc)
    }
}

impl From<Document> for SceneFile {
    fn from(doc: Document) -> Self {
        doc.to_scene()
    }
}

impl TryFrom<SceneFile> for Document {
    type Error = DocumentError;

    fn try_from(scene: SceneFile) -> Result<Self, Self::Error> {
        Document::from_scene(scene)
    }
}
