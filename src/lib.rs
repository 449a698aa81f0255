//! Meshgraph - the scene-graph document behind a mesh importer
//!
//! A scene is a graph of bodies, joints, meshes and stations hanging off a
//! single ground element. Meshgraph keeps that graph referentially closed
//! while it is edited, and checks that it can be converted into a physical
//! model (every body reaches ground through joints).
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface layer (parses args, loads scenes, prints results)
//! - [`core`] - Domain types, the document, graph algorithms, validation, config
//! - [`ui`] - User-facing output
//!
//! # Correctness Invariants
//!
//! Meshgraph maintains the following invariants:
//!
//! 1. A document always contains exactly one ground element
//! 2. Every cross-reference resolves to an element in the same document
//! 3. Deletion cascades to every dependent element
//! 4. The selection only ever names present, selectable elements

pub mod cli;
pub mod core;
pub mod ui;
