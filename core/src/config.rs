//! Console configuration (console.toml)
//!
//! Holds the console settings and the ordered command list. Every field has
//! a default so a partial file is valid.
//!
//! ```toml
//! [console]
//! unknown_command = "keep-input"
//! toggle_console_key = "Tab"
//!
//! [[commands]]
//! id = "setval"
//! format = "setval <int>"
//! description = "Set the test value"
//! target = "TestClass.SetValue"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::RegistryError;
use crate::registry::{CommandDescriptor, CommandRegistry};

/// File name looked up in [`config_dir`]
pub const CONFIG_FILE_NAME: &str = "console.toml";

/// What happens to the input line when the typed command id is unknown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum UnknownCommandPolicy {
    /// Leave the text in place so a typo can be corrected
    #[default]
    KeepInput,
    /// Clear the input line
    ClearInput,
}

/// Console behavior and key bindings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsoleSettings {
    /// Input handling after an unknown command (default: keep-input)
    #[serde(default)]
    pub unknown_command: UnknownCommandPolicy,
    /// Show/hide the console (default: Tab)
    #[serde(default = "default_toggle_console_key")]
    pub toggle_console_key: String,
    /// Show/hide command help (default: F1)
    #[serde(default = "default_toggle_help_key")]
    pub toggle_help_key: String,
    /// Submit the input line (default: Enter)
    #[serde(default = "default_commit_key")]
    pub commit_key: String,
    /// Whether the console starts visible (default: false)
    #[serde(default)]
    pub start_visible: bool,
}

/// Full console configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ConsoleConfig {
    #[serde(default)]
    pub console: ConsoleSettings,
    /// Commands in help display order
    #[serde(default)]
    pub commands: Vec<CommandDescriptor>,
}

/// Error loading a configuration file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid console config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize console config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

fn default_toggle_console_key() -> String {
    "Tab".to_string()
}
fn default_toggle_help_key() -> String {
    "F1".to_string()
}
fn default_commit_key() -> String {
    "Enter".to_string()
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            unknown_command: UnknownCommandPolicy::default(),
            toggle_console_key: default_toggle_console_key(),
            toggle_help_key: default_toggle_help_key(),
            commit_key: default_commit_key(),
            start_visible: false,
        }
    }
}

impl ConsoleConfig {
    /// Parse a configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Read and parse a configuration file
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        tracing::info!(
            "Loaded {} console commands from {}",
            config.commands.len(),
            path.display()
        );
        Ok(config)
    }

    /// Write the configuration as TOML, creating parent directories
    pub fn save_to_path(&self, path: &Path) -> Result<(), ConfigError> {
        let io_error = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).map_err(io_error)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(io_error)?;
        Ok(())
    }

    /// Build the command registry, rejecting duplicate ids
    pub fn registry(&self) -> Result<CommandRegistry, ConfigError> {
        Ok(CommandRegistry::from_descriptors(
            self.commands.iter().cloned(),
        )?)
    }
}

/// Returns the platform-specific configuration directory.
///
/// On Windows: `%APPDATA%\Nethercore\config`
/// On macOS: `~/Library/Application Support/io.nethercore.Nethercore`
/// On Linux: `~/.config/Nethercore`
///
/// Returns `None` if the home directory cannot be determined.
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("io.nethercore", "", "Nethercore")
        .map(|dirs| dirs.config_dir().to_path_buf())
}

/// Default location of the console configuration file
pub fn default_config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(CONFIG_FILE_NAME))
}
