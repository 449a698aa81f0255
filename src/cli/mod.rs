//! cli
//!
//! Command-line interface layer for Meshgraph.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Initialise logging
//! - Delegate to command handlers
//!
//! # Architecture
//!
//! The CLI layer is thin. Scene files are read into a
//! [`crate::core::document::Document`], and every edit goes through the
//! document's own operations so its invariants hold for whatever gets
//! written back out.

pub mod args;
pub mod commands;

pub use args::{Cli, Shell};

use anyhow::{Context as _, Result};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use crate::core::config::Config;
use crate::ui::output::Verbosity;

/// Execution context shared by every command.
#[derive(Debug, Clone, Default)]
pub struct Context {
    pub debug: bool,
    pub quiet: bool,
    /// Replacement for the global config file
    pub config_path: Option<PathBuf>,
}

impl Context {
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.debug)
    }

    /// Load configuration for a scene, picking up the project config next
    /// to it.
    pub fn load_config(&self, scene: &Path) -> Result<Config> {
        let project_dir = scene.parent().filter(|dir| !dir.as_os_str().is_empty());
        let project_dir = project_dir.unwrap_or_else(|| Path::new("."));
        Config::load(Some(project_dir), self.config_path.as_deref())
            .context("Failed to load configuration")
    }
}

/// Install the global tracing subscriber.
///
/// `--debug` forces debug level; otherwise `RUST_LOG` applies, defaulting to
/// warnings only. Logs go to stderr so they never mix with command output.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    // a subscriber may already be installed when embedded
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();
    init_tracing(cli.debug);

    let ctx = Context {
        debug: cli.debug,
        quiet: cli.quiet,
        config_path: cli.config.clone(),
    };

    commands::dispatch(cli.command, &ctx)
}
