//! check command - Validate a scene before model conversion
//!
//! Garbage joints are reported as an error on their own: validation
//! treats them as a bug and would panic.

use anyhow::{bail, Context as _, Result};
use std::path::Path;

use super::{ensure_no_garbage_joints, load_scene};
use crate::cli::Context;
use crate::core::verify;
use crate::ui::output;

/// Check that every body in a scene reaches ground.
///
/// # Arguments
///
/// * `ctx` - Execution context
/// * `scene` - Scene file to check
/// * `json` - Print issues as JSON (also enabled by `output.json`)
pub fn check(ctx: &Context, scene: &Path, json: bool) -> Result<()> {
    let config = ctx.load_config(scene)?;
    let doc = load_scene(scene)?;
    let verbosity = ctx.verbosity();

    ensure_no_garbage_joints(&doc, scene)?;

    let result = verify::verify(&doc, &config.validation());

    if json || config.json() {
        let rendered =
            output::to_json(&result.issues, config.indent()).context("Failed to encode issues")?;
        println!("{}", rendered);
    } else if result.ok {
        output::success(
            format!("{}: no issues ({} elements)", scene.display(), doc.len()),
            verbosity,
        );
    } else {
        for issue in &result.issues {
            println!("{}", issue);
        }
    }

    if !result.ok {
        bail!(
            "{} issue(s) found in '{}'",
            result.issues.len(),
            scene.display()
        );
    }

    Ok(())
}
