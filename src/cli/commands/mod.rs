//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Loads configuration and the scene file
//! 2. Runs document operations
//! 3. Formats and displays output
//!
//! Scene files ending in `.json` are JSON; anything else is TOML.

mod check;
mod completion;
mod delete;
mod list;

// Re-export command functions for testing and direct invocation
pub use check::check;
pub use completion::completion;
pub use delete::delete;
pub use list::list;

use anyhow::{bail, Context as _, Result};
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::cli::args::Command;
use crate::cli::Context;
use crate::core::document::Document;
use crate::core::graph;
use crate::core::scene::SceneFile;
use crate::ui::output;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Check { scene, json } => check::check(ctx, &scene, json),
        Command::List { scene, kind, json } => list::list(ctx, &scene, kind, json),
        Command::Delete { scene, id, output } => {
            delete::delete(ctx, &scene, id, output.as_deref())
        }
        Command::Completion { shell } => completion::completion(shell),
    }
}

/// On-disk scene encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneFormat {
    Json,
    Toml,
}

impl SceneFormat {
    /// Pick the encoding from a file extension.
    pub fn for_path(path: &Path) -> Self {
        match path.extension() {
            Some(ext) if ext.eq_ignore_ascii_case("json") => SceneFormat::Json,
            _ => SceneFormat::Toml,
        }
    }
}

/// Read a scene file into a document.
pub fn load_scene(path: &Path) -> Result<Document> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read scene file '{}'", path.display()))?;

    let scene: SceneFile = match SceneFormat::for_path(path) {
        SceneFormat::Json => serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse JSON scene '{}'", path.display()))?,
        SceneFormat::Toml => toml::from_str(&contents)
            .with_context(|| format!("Failed to parse TOML scene '{}'", path.display()))?,
    };

    let doc = Document::from_scene(scene)
        .with_context(|| format!("Invalid scene '{}'", path.display()))?;
    debug!(path = %path.display(), elements = doc.len(), "loaded scene");
    Ok(doc)
}

/// Fail if the scene holds any garbage joint (see [`graph::is_garbage_joint`]).
///
/// Validation and deletion both assume there are none.
pub fn ensure_no_garbage_joints(doc: &Document, path: &Path) -> Result<()> {
    let garbage = graph::garbage_joints(doc);
    if garbage.is_empty() {
        return Ok(());
    }

    let joints: Vec<String> = garbage
        .iter()
        .map(|&id| format!("{} ({})", graph::label_of(doc, id), id))
        .collect();
    bail!(
        "Scene '{}' contains garbage joints:\n{}",
        path.display(),
        output::format_list(&joints, "  ")
    );
}

/// Write a document to a scene file, encoded according to its extension.
pub fn write_scene(doc: &Document, path: &Path) -> Result<()> {
    let scene = doc.to_scene();
    let contents = match SceneFormat::for_path(path) {
        SceneFormat::Json => {
            let mut json = serde_json::to_string_pretty(&scene).context("Failed to encode scene")?;
            json.push('\n');
            json
        }
        SceneFormat::Toml => toml::to_string_pretty(&scene).context("Failed to encode scene")?,
    };

    fs::write(path, contents)
        .with_context(|| format!("Failed to write scene file '{}'", path.display()))?;
    debug!(path = %path.display(), elements = doc.len(), "wrote scene");
    Ok(())
}
