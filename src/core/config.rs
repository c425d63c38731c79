//! Configuration module for photomerge
//!
//! Supports loading configuration from a TOML file.
//! Configuration is stored in a standard location:
//! - Windows: %APPDATA%\photomerge\config.toml
//! - Linux: ~/.config/photomerge/config.toml
//! - macOS: ~/Library/Application Support/photomerge/config.toml
//!
//! Unlike most settings files, a missing config is never papered over with
//! defaults: the allowed extensions decide what gets merged, so the run stops.

use crate::files::{ExtensionFilter, IgnoreSet};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Application name used for config directory
const APP_NAME: &str = "photomerge";

/// Default config file name
const CONFIG_FILE_NAME: &str = "config.toml";

/// Config files checked in the working directory before the standard location
const LOCAL_CONFIG_PATHS: &[&str] = &["./photomerge.toml", "./config.toml"];

/// Get the standard configuration directory for the application.
pub fn get_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_NAME))
}

/// Get the standard configuration file path.
pub fn get_config_path() -> Option<PathBuf> {
    get_config_dir().map(|dir| dir.join(CONFIG_FILE_NAME))
}

/// Ensure the configuration directory exists.
pub fn ensure_config_dir() -> Result<PathBuf, ConfigError> {
    let config_dir = get_config_dir().ok_or(ConfigError::ConfigDirNotFound)?;

    if !config_dir.exists() {
        fs::create_dir_all(&config_dir)
            .map_err(|e| ConfigError::WriteError(config_dir.clone(), e.to_string()))?;
    }

    Ok(config_dir)
}

/// Initialize the configuration file if it doesn't exist.
///
/// Creates the config directory and writes the example config into it.
/// Returns the path to the config file.
pub fn init_config() -> Result<PathBuf, ConfigError> {
    let config_dir = ensure_config_dir()?;
    let config_path = config_dir.join(CONFIG_FILE_NAME);

    if !config_path.exists() {
        fs::write(&config_path, Config::generate_default_config())
            .map_err(|e| ConfigError::WriteError(config_path.clone(), e.to_string()))?;
    }

    Ok(config_path)
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Which file suffixes take part in a merge
    pub extensions: ExtensionsConfig,

    /// File names that are never merged
    #[serde(default)]
    pub files: FilesConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// `[extensions]` table
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExtensionsConfig {
    /// Dot-prefixed suffixes, e.g. `.jpg`. Matched case-insensitively.
    pub allowed: Vec<String>,
}

/// `[files]` table
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FilesConfig {
    /// Exact basenames to skip on the source side
    pub ignored: Vec<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log file path (always written; the console only sees output with --verbose)
    pub log_file: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            log_file: PathBuf::from("./photomerge.log"),
        }
    }
}

/// Where the configuration for this run comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Given explicitly on the command line
    Custom(PathBuf),
    /// Found (or expected) at a default location
    Default(PathBuf),
}

impl ConfigSource {
    /// Resolve the config path: an explicit path wins, otherwise the first
    /// existing default location, otherwise the standard location.
    pub fn resolve(cli_path: Option<&Path>) -> Self {
        match cli_path {
            Some(path) => ConfigSource::Custom(path.to_path_buf()),
            None => ConfigSource::Default(Config::get_active_config_path()),
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            ConfigSource::Custom(path) | ConfigSource::Default(path) => path,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(path.to_path_buf(), e.to_string()))?;

        Self::from_toml_str(&content)
            .map_err(|e| ConfigError::ParseError(path.to_path_buf(), e.to_string()))
    }

    /// Allowed suffixes as a filter (lowercased, dot-prefixed)
    pub fn extension_filter(&self) -> ExtensionFilter {
        ExtensionFilter::new(&self.extensions.allowed)
    }

    /// Ignored basenames as a set
    pub fn ignore_set(&self) -> IgnoreSet {
        IgnoreSet::new(self.files.ignored.iter().cloned())
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Get the path where the config file is (or would be) located.
    ///
    /// Returns the first existing config file path, or the standard location if none exists.
    pub fn get_active_config_path() -> PathBuf {
        for path in LOCAL_CONFIG_PATHS {
            let path = PathBuf::from(path);
            if path.exists() {
                return path;
            }
        }

        get_config_path().unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_PATHS[1]))
    }

    /// Generate a default config file with comments
    pub fn generate_default_config() -> String {
        include_str!("../../config.example.toml").to_string()
    }
}

/// Configuration error types
#[derive(Debug)]
pub enum ConfigError {
    /// Configuration file was not found at the specified path
    FileNotFound(PathBuf),
    /// Failed to read the configuration file
    ReadError(PathBuf, String),
    /// Failed to parse the configuration file (invalid TOML or missing keys)
    ParseError(PathBuf, String),
    /// Failed to write configuration file
    WriteError(PathBuf, String),
    /// Could not determine config directory
    ConfigDirNotFound,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::FileNotFound(path) => {
                write!(f, "Configuration file not found: {}", path.display())
            }
            ConfigError::ReadError(path, err) => {
                write!(
                    f,
                    "Failed to read config file '{}': {}",
                    path.display(),
                    err
                )
            }
            ConfigError::ParseError(path, err) => {
                write!(
                    f,
                    "Failed to parse config file '{}': {}",
                    path.display(),
                    err
                )
            }
            ConfigError::WriteError(path, err) => {
                write!(
                    f,
                    "Failed to write config file '{}': {}",
                    path.display(),
                    err
                )
            }
            ConfigError::ConfigDirNotFound => {
                write!(f, "Could not determine configuration directory")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
