//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.datasummary.toml` files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name looked up in the current directory.
pub const DEFAULT_CONFIG_FILE: &str = ".datasummary.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Field names the analyzer reads.
    #[serde(default)]
    pub fields: FieldNames,

    /// Summary report settings.
    #[serde(default)]
    pub summary: SummaryOptions,
}

/// General application settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,

    /// Treat unparseable input as a fatal error instead of an empty dataset.
    #[serde(default)]
    pub strict: bool,
}

/// Names of the conventional record fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldNames {
    #[serde(default = "default_name_field")]
    pub name: String,

    #[serde(default = "default_role_field")]
    pub role: String,

    #[serde(default = "default_age_field")]
    pub age: String,

    #[serde(default = "default_city_field")]
    pub city: String,
}

impl Default for FieldNames {
    fn default() -> Self {
        Self {
            name: default_name_field(),
            role: default_role_field(),
            age: default_age_field(),
            city: default_city_field(),
        }
    }
}

fn default_name_field() -> String {
    "name".to_string()
}

fn default_role_field() -> String {
    "role".to_string()
}

fn default_age_field() -> String {
    "age".to_string()
}

fn default_city_field() -> String {
    "city".to_string()
}

/// Which subset the summary report calls out by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryOptions {
    /// City matched case-insensitively.
    #[serde(default = "default_highlight_city")]
    pub highlight_city: String,

    /// Role matched exactly.
    #[serde(default = "default_highlight_role")]
    pub highlight_role: String,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            highlight_city: default_highlight_city(),
            highlight_role: default_highlight_role(),
        }
    }
}

fn default_highlight_city() -> String {
    "New York".to_string()
}

fn default_highlight_role() -> String {
    "engineer".to_string()
}

/// Where the effective configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOrigin {
    /// Given with `--config`.
    Explicit(PathBuf),
    /// Found as `.datasummary.toml` in the working directory.
    Discovered(PathBuf),
    /// No file present; built-in defaults.
    Builtin,
    /// The discovered file could not be used; built-in defaults.
    Fallback(String),
}

impl Config {
    /// Find and load the configuration before logging is set up.
    ///
    /// An explicit path must load. A discovered file that fails to load
    /// falls back to defaults, and the reason is kept in the origin so the
    /// caller can log it once logging is running.
    pub fn resolve(explicit: Option<&Path>, dir: &Path) -> Result<(Self, ConfigOrigin)> {
        if let Some(path) = explicit {
            let config = Self::load(path)?;
            return Ok((config, ConfigOrigin::Explicit(path.to_path_buf())));
        }

        match Self::load_from_dir(dir) {
            Ok(Some(config)) => {
                let path = dir.join(DEFAULT_CONFIG_FILE);
                Ok((config, ConfigOrigin::Discovered(path)))
            }
            Ok(None) => Ok((Self::default(), ConfigOrigin::Builtin)),
            Err(e) => Ok((Self::default(), ConfigOrigin::Fallback(format!("{:#}", e)))),
        }
    }

    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load `.datasummary.toml` from a directory.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let config_path = dir.join(DEFAULT_CONFIG_FILE);

        if config_path.exists() {
            Ok(Some(Self::load(&config_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings, but only
    /// when the CLI provides an explicit value.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref city) = args.highlight_city {
            self.summary.highlight_city = city.clone();
        }
        if let Some(ref role) = args.highlight_role {
            self.summary.highlight_role = role.clone();
        }

        if args.strict {
            self.general.strict = true;
        }
        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
