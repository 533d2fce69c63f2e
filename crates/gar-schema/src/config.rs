//! Configuration for schema tooling.
//!
//! Provides configuration file support via `gar.toml`, environment variables,
//! and runtime overrides.
//!
//! # Priority (highest to lowest)
//!
//! 1. Runtime overrides (CLI flags)
//! 2. Environment variables (`GAR_*`)
//! 3. Configuration file (`gar.toml`)
//! 4. Default values

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::types::{FileType, FormatVersion};

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to parse configuration.
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// Invalid configuration value.
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue {
        /// Configuration key that failed validation.
        key: String,
        /// Validation error message.
        message: String,
    },
}

/// Defaults applied when tools scaffold new schemas.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Vertices per chunk.
    pub vertex_chunk_size: i64,
    /// Edges per chunk.
    pub edge_chunk_size: i64,
    /// Physical file format for new groups and adjacency lists.
    pub file_type: FileType,
    /// Format version stamped on new schemas.
    pub version: FormatVersion,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            vertex_chunk_size: 262_144,
            edge_chunk_size: 4_194_304,
            file_type: FileType::Parquet,
            version: FormatVersion::V1,
        }
    }
}

/// Persistence policy section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Refuse to save schemas that fail validation.
    pub require_validated: bool,
    /// Base directory relative schema paths are resolved against.
    pub root: Option<String>,
}

/// Logging configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace).
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GarConfig {
    /// Scaffolding defaults.
    pub defaults: DefaultsConfig,
    /// Persistence policy.
    pub storage: StorageConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

impl GarConfig {
    /// Loads configuration from default sources.
    ///
    /// Priority: defaults < file < environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration parsing fails.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_path("gar.toml")
    }

    /// Loads configuration from a specific file path.
    ///
    /// A missing file is not an error; defaults and environment still apply.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration parsing fails.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let figment = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed("GAR_").split("__"));

        figment
            .extract()
            .map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Creates a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let figment = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::string(toml_str));

        figment
            .extract()
            .map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.defaults.vertex_chunk_size <= 0 {
            return Err(ConfigError::InvalidValue {
                key: "defaults.vertex_chunk_size".to_string(),
                message: format!("value {} must be positive", self.defaults.vertex_chunk_size),
            });
        }

        if self.defaults.edge_chunk_size <= 0 {
            return Err(ConfigError::InvalidValue {
                key: "defaults.edge_chunk_size".to_string(),
                message: format!("value {} must be positive", self.defaults.edge_chunk_size),
            });
        }

        let valid_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::InvalidValue {
                key: "logging.level".to_string(),
                message: format!(
                    "value '{}' is invalid, expected one of: {:?}",
                    self.logging.level, valid_levels
                ),
            });
        }

        Ok(())
    }

    /// Persistence options derived from the storage section.
    #[must_use]
    pub fn save_options(&self) -> SaveOptions {
        SaveOptions {
            require_validated: self.storage.require_validated,
        }
    }

    /// Serializes the configuration to TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}

/// Options consumed by `SchemaInfo::save_with`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SaveOptions {
    /// Run `validate()` first and refuse to write on failure.
    pub require_validated: bool,
}

impl SaveOptions {
    /// Options that refuse to persist unvalidated schemas.
    #[must_use]
    pub const fn strict() -> Self {
        Self {
            require_validated: true,
        }
    }
}
