//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/tree-mwis/tree-mwis.toml`
//! 3. Explicit config file passed with `--config`
//! 4. Environment variables: `TREE_MWIS_*` prefix
//!
//! Command line flags are applied on top by the CLI layer.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;
use crate::domain::{IndexBase, Recurrence};

/// Prefix of environment variable overrides.
pub const ENV_PREFIX: &str = "TREE_MWIS";

/// Unified configuration for tree-mwis.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Numbering of vertex ids in the input (default: one)
    pub index_base: IndexBase,
    /// Reject inputs that are not a tree (default: true)
    pub validate: bool,
    /// Traversal root in input numbering (default: first vertex)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<usize>,
    /// Recurrence used to fill the DP table
    pub recurrence: Recurrence,
    /// Print the chosen vertices after the total
    pub show_set: bool,
    /// Deepest tree the `tree` command will draw
    pub max_render_height: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            index_base: IndexBase::One,
            validate: true,
            root: None,
            recurrence: Recurrence::IncludeExclude,
            show_set: false,
            max_render_height: 256,
        }
    }
}

/// Raw settings for intermediate parsing (`None` means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub index_base: Option<IndexBase>,
    pub validate: Option<bool>,
    pub root: Option<usize>,
    pub recurrence: Option<Recurrence>,
    pub show_set: Option<bool>,
    pub max_render_height: Option<usize>,
}

/// Get the XDG config directory for tree-mwis.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "tree-mwis").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("tree-mwis.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Overlay wins wherever it specifies a value.
    pub fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            index_base: overlay.index_base.unwrap_or(self.index_base),
            validate: overlay.validate.unwrap_or(self.validate),
            root: overlay.root.or(self.root),
            recurrence: overlay.recurrence.unwrap_or(self.recurrence),
            show_set: overlay.show_set.unwrap_or(self.show_set),
            max_render_height: overlay.max_render_height.unwrap_or(self.max_render_height),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Optional explicit config file, must exist when given
    pub fn load(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        let global = global_config_path().filter(|p| p.exists());
        Self::load_layers(global.as_deref(), config_file)
    }

    /// Load from explicit layer files, skipping the XDG lookup.
    pub fn load_layers(
        global: Option<&Path>,
        config_file: Option<&Path>,
    ) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global {
            debug!("loading global config: {}", global_path.display());
            current = current.merge_with(&load_raw_settings(global_path)?);
        }

        // 3. Explicit config file
        if let Some(path) = config_file {
            if !path.exists() {
                return Err(ApplicationError::Config {
                    message: format!("config file not found: {}", path.display()),
                });
            }
            debug!("loading config file: {}", path.display());
            current = current.merge_with(&load_raw_settings(path)?);
        }

        // 4. Environment variables
        Self::apply_env_overrides(current)
    }

    /// Apply TREE_MWIS_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        // Use config crate just for env var parsing
        let config = Config::builder()
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Some(val) = env_value::<String>(&config, "index_base")? {
            settings.index_base = val.parse().map_err(env_err("index_base"))?;
        }
        if let Some(val) = env_value::<String>(&config, "recurrence")? {
            settings.recurrence = val.parse().map_err(env_err("recurrence"))?;
        }
        if let Some(val) = env_value(&config, "validate")? {
            settings.validate = val;
        }
        if let Some(val) = env_value(&config, "root")? {
            settings.root = Some(val);
        }
        if let Some(val) = env_value(&config, "show_set")? {
            settings.show_set = val;
        }
        if let Some(val) = env_value(&config, "max_render_height")? {
            settings.max_render_height = val;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# tree-mwis configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/tree-mwis/tree-mwis.toml
#   File:   --config <FILE>
#   Env:    TREE_MWIS_* environment variables
#   Flags:  command line options

# Numbering of vertex ids in the input: "one" or "zero"
# index_base = "one"

# Reject edge lists that do not form a tree
# validate = true

# Traversal root, in input numbering (default: first vertex)
# root = 1

# DP recurrence: "include-exclude" or "grandchildren"
# recurrence = "include-exclude"

# Print the chosen vertices after the total
# show_set = false

# Deepest tree the `tree` command will draw
# max_render_height = 256
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

/// Unset keys yield `None`; values that do not parse are errors.
fn env_value<T: DeserializeOwned>(
    config: &Config,
    key: &'static str,
) -> Result<Option<T>, ApplicationError> {
    match config.get::<T>(key) {
        Ok(val) => Ok(Some(val)),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(env_err(key)(e.to_string())),
    }
}

fn env_err(key: &'static str) -> impl Fn(String) -> ApplicationError {
    move |message| ApplicationError::Config {
        message: format!("{}_{}: {}", ENV_PREFIX, key.to_ascii_uppercase(), message),
    }
}
