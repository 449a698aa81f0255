//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output
//! - `--config <path>`: Use this file instead of the global config

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::core::element::ElementKind;
use crate::core::types::Id;

/// Meshgraph - inspect and edit mesh-importer scenes
#[derive(Parser, Debug)]
#[command(name = "meshgraph")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Config file to use instead of the global one
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check that a scene can be converted into a model
    #[command(
        long_about = "Check that a scene can be converted into a model.\n\n\
            Every body must reach ground by following joints from child to parent. \
            Exits with a non-zero status if any issue is found.",
        after_help = "\
EXAMPLES:
    meshgraph check leg.toml
    meshgraph check leg.json --json"
    )]
    Check {
        /// Scene file (.json, otherwise TOML)
        scene: PathBuf,

        /// Print issues as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the elements of a scene
    List {
        /// Scene file (.json, otherwise TOML)
        scene: PathBuf,

        /// Only list elements of this kind
        #[arg(long, value_name = "KIND")]
        kind: Option<ElementKind>,

        /// Print elements as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show (and optionally apply) a cascading delete
    #[command(
        long_about = "Show what deleting an element removes.\n\n\
            Deleting an element also deletes everything that depends on it: \
            deleting a body deletes its joints, meshes and stations. \
            Nothing is written unless --output is given.",
        after_help = "\
EXAMPLES:
    # Preview
    meshgraph delete leg.toml 4

    # Write the result
    meshgraph delete leg.toml 4 --output leg-trimmed.toml"
    )]
    Delete {
        /// Scene file (.json, otherwise TOML)
        scene: PathBuf,

        /// Id of the element to delete
        id: Id,

        /// Write the resulting scene here
        #[arg(long, short, value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// Generate shell completion scripts
    #[command(after_help = "\
EXAMPLES:
    # Bash
    meshgraph completion bash > ~/.local/share/bash-completion/completions/meshgraph

    # Zsh
    meshgraph completion zsh > ~/.zfunc/_meshgraph

    # Fish
    meshgraph completion fish > ~/.config/fish/completions/meshgraph.fish")]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}
