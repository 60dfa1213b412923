//! Configuration schema types
//!
//! This module defines the configuration structure for the preprocessor.
//! Every section has defaults, so an empty file (or no file) is valid.

use serde::{Deserialize, Serialize};

/// Main preprocessor configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PreprocessorConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Pipeline limits
    #[serde(default)]
    pub pipeline: PipelineConfig,

    /// External index builder settings
    #[serde(default)]
    pub index: IndexConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl PreprocessorConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.pipeline.validate()?;
        self.index.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Limits applied by a single pipeline run
///
/// Passed explicitly into the orchestrator so two runs in one process can use
/// different limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Maximum number of layers a source document may contain
    #[serde(default = "default_max_layer_count")]
    pub max_layer_count: usize,

    /// Output documents at or above this size in bytes get a spatial index
    #[serde(default = "default_index_worthy_size")]
    pub index_worthy_size: u64,
}

impl PipelineConfig {
    fn validate(&self) -> Result<(), String> {
        if self.max_layer_count == 0 || self.max_layer_count > 1000 {
            return Err(format!(
                "pipeline.max_layer_count must be between 1 and 1000, got {}",
                self.max_layer_count
            ));
        }
        Ok(())
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_layer_count: default_max_layer_count(),
            index_worthy_size: default_index_worthy_size(),
        }
    }
}

/// External index builder configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Path (or name on `PATH`) of the `mapnik-index` binary
    #[serde(default = "default_mapnik_index_path")]
    pub mapnik_index_path: String,

    /// Pass `--validate-features` to the index builder
    #[serde(default = "default_true")]
    pub validate_features: bool,

    /// Substring in the builder's stderr that marks a failed job
    #[serde(default = "default_error_marker")]
    pub error_marker: String,
}

impl IndexConfig {
    fn validate(&self) -> Result<(), String> {
        if self.mapnik_index_path.trim().is_empty() {
            return Err("index.mapnik_index_path cannot be empty".to_string());
        }
        if self.error_marker.is_empty() {
            return Err("index.error_marker cannot be empty".to_string());
        }
        Ok(())
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            mapnik_index_path: default_mapnik_index_path(),
            validate_features: true,
            error_marker: default_error_marker(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable JSON file logging next to console output
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for log files
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Rotation policy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.is_empty() {
            return Err("logging.local_path cannot be empty when local logging is enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_max_layer_count() -> usize {
    15
}

fn default_index_worthy_size() -> u64 {
    10 * 1024 * 1024
}

fn default_mapnik_index_path() -> String {
    "mapnik-index".to_string()
}

fn default_error_marker() -> String {
    "Error".to_string()
}

fn default_local_path() -> String {
    "/var/log/kml-preprocessor".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
