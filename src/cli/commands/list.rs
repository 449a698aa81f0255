//! list command - Print the elements of a scene

use anyhow::{Context as _, Result};
use serde::Serialize;
use std::path::Path;

use super::load_scene;
use crate::cli::Context;
use crate::core::element::ElementKind;
use crate::core::graph;
use crate::core::types::Id;
use crate::ui::output;

#[derive(Debug, Serialize)]
struct Entry<'a> {
    id: Id,
    kind: ElementKind,
    label: &'a str,
    description: String,
    selected: bool,
}

/// List elements, one per line: id, kind, label, description.
///
/// # Arguments
///
/// * `ctx` - Execution context
/// * `scene` - Scene file to list
/// * `kind` - Only list elements of this kind
/// * `json` - Print as JSON (also enabled by `output.json`)
pub fn list(ctx: &Context, scene: &Path, kind: Option<ElementKind>, json: bool) -> Result<()> {
    let config = ctx.load_config(scene)?;
    let doc = load_scene(scene)?;

    let entries: Vec<Entry<'_>> = doc
        .iter()
        .filter(|el| kind.map_or(true, |k| el.kind() == k))
        .map(|el| Entry {
            id: el.id(),
            kind: el.kind(),
            label: el.label(),
            description: graph::describe(&doc, el),
            selected: doc.is_selected(el.id()),
        })
        .collect();

    if json || config.json() {
        let rendered =
            output::to_json(&entries, config.indent()).context("Failed to encode elements")?;
        println!("{}", rendered);
        return Ok(());
    }

    for entry in &entries {
        let marker = if entry.selected { "*" } else { "" };
        println!(
            "{}{}\t{}\t{}\t{}",
            entry.id, marker, entry.kind, entry.label, entry.description
        );
    }

    Ok(())
}
