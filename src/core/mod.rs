//! core
//!
//! Core domain types, the scene-graph document, and the algorithms over it.
//!
//! # Modules
//!
//! - [`types`] - Strong types: Id, Fingerprint
//! - [`element`] - Scene element kinds and their cross-references
//! - [`store`] - Id-keyed element storage with typed iteration
//! - [`document`] - The document: insertion, cascading deletion, selection
//! - [`graph`] - Graph algorithms: garbage joints, ground attachment, selection groups
//! - [`verify`] - Document-wide validation before model conversion
//! - [`scene`] - Serialisable document snapshots
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Every public mutation leaves the document referentially closed
//! - Schemas are strict and self-describing
//! - No I/O outside [`config`]

pub mod config;
pub mod document;
pub mod element;
pub mod graph;
pub mod scene;
pub mod store;
pub mod types;
pub mod verify;
