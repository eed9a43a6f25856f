// Configuration loading
// Optional TOML file with always-excluded directories and prompt behavior

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::cleaner::{CleanError, ExclusionSet};

pub const CONFIG_DIR: &str = "logless";
pub const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directory names excluded on every run, in addition to the defaults
    pub exclude: Vec<String>,
    /// Ask for confirmation before rewriting files
    pub confirm: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            exclude: Vec::new(),
            confirm: true,
        }
    }
}

impl Config {
    /// `<config_dir>/logless/config.toml`, if the platform has a config dir
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// Load from an explicit path, or from the default location.
    ///
    /// A missing default file yields the default config; a missing explicit
    /// file is an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self, CleanError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        match Self::default_path() {
            Some(path) if path.is_file() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, CleanError> {
        let content = fs::read_to_string(path).map_err(|e| {
            CleanError::from_io_error(e, "reading config file", Some(path.to_path_buf()))
        })?;
        Self::parse(&content, path)
    }

    /// Parse TOML content; `path` is only used for error messages
    pub fn parse(content: &str, path: &Path) -> Result<Self, CleanError> {
        toml::from_str(content).map_err(|e| CleanError::InvalidConfig {
            path: path.to_path_buf(),
            reason: e.message().to_string(),
        })
    }

    /// Exclusion set from this config, optionally seeded with the defaults
    pub fn exclusions(&self, with_defaults: bool) -> ExclusionSet {
        let mut set = if with_defaults {
            ExclusionSet::with_defaults()
        } else {
            ExclusionSet::new()
        };
        set.extend(self.exclude.iter().cloned());
        set
    }
}
