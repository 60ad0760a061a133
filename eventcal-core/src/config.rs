//! eventcal configuration.

use std::path::{Path, PathBuf};

use config::{Config, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::error::{EventCalError, EventCalResult};
use crate::filter::FilterMode;

fn default_true() -> bool {
    true
}

/// Configuration at ~/.config/eventcal/config.toml
///
/// Every field is optional in the file; a missing file means defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventCalConfig {
    /// Filter applied when a session starts
    #[serde(default)]
    pub default_filter: FilterMode,

    /// Show event locations next to titles
    #[serde(default = "default_true")]
    pub show_locations: bool,

    /// Colored terminal output
    #[serde(default = "default_true")]
    pub color: bool,
}

impl Default for EventCalConfig {
    fn default() -> Self {
        EventCalConfig {
            default_filter: FilterMode::All,
            show_locations: true,
            color: true,
        }
    }
}

impl EventCalConfig {
    pub fn config_path() -> EventCalResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| EventCalError::Config("Could not determine config directory".into()))?
            .join("eventcal");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location.
    pub fn load() -> EventCalResult<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load from `path`, falling back to defaults if the file does not exist.
    pub fn load_from(path: &Path) -> EventCalResult<Self> {
        if !path.exists() {
            log::debug!("no config at {}, using defaults", path.display());
        }

        Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(false))
            .build()
            .map_err(|e| EventCalError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| EventCalError::Config(e.to_string()))
    }

    pub fn to_toml(&self) -> EventCalResult<String> {
        toml::to_string_pretty(self).map_err(|e| EventCalError::Config(e.to_string()))
    }
}
