//! delete command - Cascading delete of a scene element
//!
//! Deleting an element removes everything that depends on it. The command
//! always prints what was removed; the resulting scene is only written
//! when `--output` is given.
//!
//! # Integrity Contract
//!
//! - Ground can never be deleted
//! - Scenes with garbage joints are refused before anything is removed
//! - The written scene is referentially closed

use anyhow::{bail, Result};
use std::path::Path;

use super::{ensure_no_garbage_joints, load_scene, write_scene};
use crate::cli::Context;
use crate::core::types::Id;
use crate::ui::output;

/// Delete an element and its dependents.
///
/// # Arguments
///
/// * `ctx` - Execution context
/// * `scene` - Scene file to read
/// * `id` - Element to delete
/// * `output_path` - Where to write the resulting scene, if anywhere
pub fn delete(ctx: &Context, scene: &Path, id: Id, output_path: Option<&Path>) -> Result<()> {
    let mut doc = load_scene(scene)?;
    let verbosity = ctx.verbosity();
    ensure_no_garbage_joints(&doc, scene)?;

    let Some(target) = doc.get(id) else {
        bail!("No element with id {} in '{}'", id, scene.display());
    };
    if !target.can_delete() {
        bail!("'{}' ({}) cannot be deleted", target.label(), id);
    }
    let target_label = target.label().to_string();

    doc.delete(id);

    let removed: Vec<String> = doc
        .pending_destruction()
        .iter()
        .map(ToString::to_string)
        .collect();
    output::print(
        format!(
            "Deleting '{}' ({}) removes {} element(s):\n{}",
            target_label,
            id,
            removed.len(),
            output::format_list(&removed, "  ")
        ),
        verbosity,
    );
    doc.garbage_collect();

    match output_path {
        Some(path) => {
            write_scene(&doc, path)?;
            output::success(
                format!("Wrote {} element(s) to '{}'", doc.len(), path.display()),
                verbosity,
            );
        }
        None => output::warn("dry run: pass --output to write the result", verbosity),
    }

    Ok(())
}
