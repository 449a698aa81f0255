//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! Meshgraph has two configuration scopes:
//! - **Global**: User-level settings
//! - **Project**: Settings next to a scene file
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Global config file (or the file passed with `--config`)
//! 3. Project config file
//!
//! # Global Config Locations
//!
//! Searched in order:
//! 1. An explicit override path, if given
//! 2. `$MESHGRAPH_CONFIG` if set
//! 3. `<config dir>/meshgraph/config.toml`
//!
//! # Example
//!
//! ```no_run
//! use meshgraph::core::config::Config;
//! use std::path::Path;
//!
//! let config = Config::load(Some(Path::new("/path/to/scenes")), None).unwrap();
//! println!("floating bodies attached: {}", config.floating_bodies_attached());
//! println!("json: {}", config.json());
//! ```

pub mod schema;

pub use schema::{FileConfig, GlobalConfig, OutputConfig, ProjectConfig, ValidationConfig};

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Environment variable naming a global config file.
pub const CONFIG_ENV: &str = "MESHGRAPH_CONFIG";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("config file not found: {0}")]
    NotFound(PathBuf),

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Merged configuration from all sources.
///
/// Accessor methods apply precedence rules: project config overrides
/// global config, which overrides defaults.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Global configuration
    pub global: GlobalConfig,
    /// Project configuration (if a project file was found)
    pub project: Option<ProjectConfig>,
    global_path: Option<PathBuf>,
    project_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration.
    ///
    /// `project_dir` is the directory holding the scene file. `override_path`
    /// replaces the global config search and must exist.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be read, parsed,
    /// or validated, or if `override_path` does not exist. Missing default
    /// files are not an error.
    pub fn load(
        project_dir: Option<&Path>,
        override_path: Option<&Path>,
    ) -> Result<Config, ConfigError> {
        let (global, global_path) = match override_path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound(path.to_path_buf()));
                }
                (Self::read_config(path)?, Some(path.to_path_buf()))
            }
            None => Self::load_global()?,
        };

        let (project, project_path) = match project_dir {
            Some(dir) => Self::load_project(dir)?,
            None => (None, None),
        };

        global.validate()?;
        if let Some(ref p) = project {
            p.validate()?;
        }

        debug!(global = ?global_path, project = ?project_path, "loaded configuration");

        Ok(Config {
            global,
            project,
            global_path,
            project_path,
        })
    }

    /// Load global configuration from standard locations.
    fn load_global() -> Result<(GlobalConfig, Option<PathBuf>), ConfigError> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            let path = PathBuf::from(path);
            if path.exists() {
                let config = Self::read_config(&path)?;
                return Ok((config, Some(path)));
            }
        }

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                let config = Self::read_config(&path)?;
                return Ok((config, Some(path)));
            }
        }

        Ok((GlobalConfig::default(), None))
    }

    fn load_project(dir: &Path) -> Result<(Option<ProjectConfig>, Option<PathBuf>), ConfigError> {
        let path = Self::project_config_path(dir);
        if !path.exists() {
            return Ok((None, None));
        }
        let config = Self::read_config(&path)?;
        Ok((Some(config), Some(path)))
    }

    /// Read and parse a config file.
    fn read_config(path: &Path) -> Result<FileConfig, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Default location of the global config file, if the platform has a
    /// config directory.
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("meshgraph/config.toml"))
    }

    /// Location of the project config file for scenes in `dir`.
    pub fn project_config_path(dir: &Path) -> PathBuf {
        dir.join(".meshgraph/config.toml")
    }

    // =========================================================================
    // Accessor methods with precedence
    // =========================================================================

    fn pick<T>(&self, get: impl Fn(&FileConfig) -> Option<T>) -> Option<T> {
        self.project
            .as_ref()
            .and_then(&get)
            .or_else(|| get(&self.global))
    }

    /// Whether bodies that are the child of no joint count as attached.
    ///
    /// Defaults to `true` if not configured.
    pub fn floating_bodies_attached(&self) -> bool {
        self.pick(|c| c.validation.as_ref()?.floating_bodies_attached)
            .unwrap_or(true)
    }

    /// Resolved validation settings.
    pub fn validation(&self) -> ValidationConfig {
        ValidationConfig {
            floating_bodies_attached: Some(self.floating_bodies_attached()),
        }
    }

    /// Whether output should be JSON.
    ///
    /// Defaults to `false` if not configured.
    pub fn json(&self) -> bool {
        self.pick(|c| c.output.as_ref()?.json).unwrap_or(false)
    }

    /// JSON indentation width.
    ///
    /// Defaults to 2 if not configured.
    pub fn indent(&self) -> usize {
        self.pick(|c| c.output.as_ref()?.indent).unwrap_or(2)
    }

    /// Path of the loaded global config file.
    pub fn global_config_loaded_from(&self) -> Option<&Path> {
        self.global_path.as_deref()
    }

    /// Path of the loaded project config file.
    pub fn project_config_loaded_from(&self) -> Option<&Path> {
        self.project_path.as_deref()
    }
}
