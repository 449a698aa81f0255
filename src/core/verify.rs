//! core::verify
//!
//! Document-wide validation.
//!
//! # Checks
//!
//! - **Garbage joints**: a joint whose endpoints make no sense. Insertion
//!   and deletion never produce one, so finding one is a bug and panics.
//! - **Ground attachment**: every body must reach ground by walking joints
//!   from child to parent. Each body is checked with a fresh visited set.
//!
//! A body that is the child of no joint passes by default. Setting
//! `validation.floating_bodies_attached = false` reports it instead.
//!
//! # Invariants
//!
//! - Never mutates the document
//! - Must be deterministic (bodies are checked in id order)

use serde::Serialize;
use std::collections::HashSet;
use thiserror::Error;

use super::config::schema::ValidationConfig;
use super::document::Document;
use super::element::{Body, Joint};
use super::graph::{self, FloatingBodies};
use super::types::Id;

/// A problem that blocks model conversion.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize)]
#[serde(tag = "issue", rename_all = "snake_case")]
pub enum Issue {
    #[error("{body}: body is not attached to ground: it is connected by a joint that, itself, does not connect to ground")]
    NotAttachedToGround { body: String, id: Id },

    #[error("{body}: body is not attached to ground: it is not the child of any joint")]
    Floating { body: String, id: Id },
}

impl Issue {
    /// The body the issue is about.
    pub fn id(&self) -> Id {
        match self {
            Issue::NotAttachedToGround { id, .. } | Issue::Floating { id, .. } => *id,
        }
    }
}

/// Result of validating a document.
#[derive(Debug)]
pub struct VerifyResult {
    pub ok: bool,
    pub issues: Vec<Issue>,
}

impl VerifyResult {
    pub fn success() -> Self {
        Self {
            ok: true,
            issues: vec![],
        }
    }

    pub fn failure(issues: Vec<Issue>) -> Self {
        Self { ok: false, issues }
    }
}

/// Validate `doc` under `config`.
///
/// # Panics
///
/// Panics if the document contains a garbage joint.
pub fn verify(doc: &Document, config: &ValidationConfig) -> VerifyResult {
    let issues = find_issues(doc, config);
    if issues.is_empty() {
        VerifyResult::success()
    } else {
        VerifyResult::failure(issues)
    }
}

/// Every issue in `doc`, bodies in id order.
///
/// # Panics
///
/// Panics if the document contains a garbage joint.
pub fn find_issues(doc: &Document, config: &ValidationConfig) -> Vec<Issue> {
    for joint in doc.iter_kind::<Joint>() {
        if graph::is_garbage_joint(doc, joint) {
            panic!(
                "{}: joint is garbage (this is an implementation error)",
                joint.label()
            );
        }
    }

    let floating = if config.floating_bodies_are_attached() {
        FloatingBodies::Attached
    } else {
        FloatingBodies::Detached
    };

    doc.iter_kind::<Body>()
        .filter(|body| !graph::body_attached(doc, body, &mut HashSet::new(), floating))
        .map(|body| {
            let (body_label, id) = (body.label().to_string(), body.id());
            if graph::is_jointed(doc, id) {
                Issue::NotAttachedToGround {
                    body: body_label,
                    id,
                }
            } else {
                Issue::Floating {
                    body: body_label,
                    id,
                }
            }
        })
        .collect()
}

/// Human-readable issues under the default configuration. Empty means the
/// document is ready for conversion.
///
/// # Panics
///
/// Panics if the document contains a garbage joint.
pub fn collect_issues(doc: &Document) -> Vec<String> {
    collect_issues_with(doc, &ValidationConfig::default())
}

/// [`collect_issues`] under an explicit configuration.
pub fn collect_issues_with(doc: &Document, config: &ValidationConfig) -> Vec<String> {
    find_issues(doc, config)
        .iter()
        .map(ToString::to_string)
        .collect()
}

pub fn has_issues(doc: &Document) -> bool {
    !collect_issues(doc).is_empty()
}
