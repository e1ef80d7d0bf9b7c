//! Configuration types for NexoStamp printing.
//!
//! All types implement [`serde::Deserialize`] and are normally read from a
//! TOML file:
//!
//! ```toml
//! [print]
//! margin = 12.5
//! copies = 4
//! ```
//!
//! Missing sections and keys fall back to their defaults.
//!
//! # Example
//!
//! ```
//! # use nexostamp::config::AppConfig;
//! let config = AppConfig::from_toml_str("[print]\ncopies = 4").unwrap();
//! assert_eq!(config.print().copies(), 4);
//! assert_eq!(config.print().margin(), 20.0);
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use log::{debug, info};
use serde::Deserialize;
use thiserror::Error;

use crate::layout::{DEFAULT_MARGIN, PrintLayoutEngine};

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),

    #[error("Failed to read configuration file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Top-level application configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AppConfig {
    /// Print section.
    #[serde(default)]
    print: PrintConfig,
}

impl AppConfig {
    pub fn new(print: PrintConfig) -> Self {
        Self { print }
    }

    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML and
    /// [`ConfigError::Validation`] for out-of-range values.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Returns the print configuration.
    pub fn print(&self) -> &PrintConfig {
        &self.print
    }

    /// Checks every section.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] naming the first offending value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.print.validate()
    }
}

/// Print job defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PrintConfig {
    /// Gutter between copies, in surface units.
    #[serde(default = "default_margin")]
    margin: f32,

    /// Copies per page when the caller does not ask for a specific count.
    #[serde(default = "default_copies")]
    copies: u32,
}

impl Default for PrintConfig {
    fn default() -> Self {
        Self {
            margin: default_margin(),
            copies: default_copies(),
        }
    }
}

impl PrintConfig {
    pub fn new(margin: f32, copies: u32) -> Self {
        Self { margin, copies }
    }

    pub fn margin(&self) -> f32 {
        self.margin
    }

    pub fn copies(&self) -> u32 {
        self.copies
    }

    /// Builds a layout engine using the configured margin.
    pub fn layout_engine(&self) -> PrintLayoutEngine {
        PrintLayoutEngine::new().with_margin(self.margin)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !self.margin.is_finite() || self.margin < 0.0 {
            return Err(ConfigError::Validation(format!(
                "print.margin must be a finite, non-negative number, got {}",
                self.margin
            )));
        }
        if self.copies == 0 {
            return Err(ConfigError::Validation(String::from(
                "print.copies must be at least 1",
            )));
        }
        Ok(())
    }
}

fn default_margin() -> f32 {
    DEFAULT_MARGIN
}

fn default_copies() -> u32 {
    1
}

/// Loads configuration from `explicit_path`, or returns the defaults.
///
/// # Errors
///
/// Returns error if:
/// - An explicit path is provided but the file doesn't exist
/// - The file cannot be read or parsed
/// - A value fails validation
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, ConfigError> {
    let Some(path) = explicit_path else {
        debug!("No configuration file given, using default configuration");
        return Ok(AppConfig::default());
    };

    let path = path.as_ref();
    info!(path:% = path.display(); "Loading configuration");

    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()));
    }
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    AppConfig::from_toml_str(&content)
}
