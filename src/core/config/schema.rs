//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Global Config
//!
//! Located at (in order of precedence):
//! 1. `--config <path>` on the command line
//! 2. `$MESHGRAPH_CONFIG` if set
//! 3. `<config dir>/meshgraph/config.toml` (e.g. `~/.config/meshgraph/config.toml`)
//!
//! # Project Config
//!
//! Located at `.meshgraph/config.toml` in the directory holding the scene
//! file.
//!
//! Both scopes share the same schema. Every key is optional so that a
//! project file only needs to mention what it overrides.

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Settings read from a config file.
///
/// # Example
///
/// ```toml
/// [validation]
/// floating_bodies_attached = true
///
/// [output]
/// json = false
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Validation rules
    pub validation: Option<ValidationConfig>,

    /// Output formatting
    pub output: Option<OutputConfig>,
}

impl FileConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(output) = &self.output {
            output.validate()?;
        }
        Ok(())
    }
}

/// Global configuration (user scope).
pub type GlobalConfig = FileConfig;

/// Project configuration (scene directory scope).
pub type ProjectConfig = FileConfig;

/// Validation rules for [`crate::core::verify`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ValidationConfig {
    /// Whether a body that is the child of no joint counts as attached to
    /// ground (default: true)
    pub floating_bodies_attached: Option<bool>,
}

impl ValidationConfig {
    pub fn floating_bodies_are_attached(&self) -> bool {
        self.floating_bodies_attached.unwrap_or(true)
    }
}

/// Output formatting defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Emit JSON instead of text
    pub json: Option<bool>,

    /// Indentation width for JSON output (default: 2)
    pub indent: Option<usize>,
}

impl OutputConfig {
    /// Largest accepted indent.
    pub const MAX_INDENT: usize = 8;

    /// Validate the output configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(indent) = self.indent {
            if indent > Self::MAX_INDENT {
                return Err(ConfigError::InvalidValue(format!(
                    "output.indent must be at most {}, got {}",
                    Self::MAX_INDENT,
                    indent
                )));
            }
        }
        Ok(())
    }
}
