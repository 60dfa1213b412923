//! Configuration management for the preprocessor.
//!
//! # Overview
//!
//! The preprocessor reads an optional TOML configuration file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `KMLPRE_*` environment overrides
//! - Default values for every setting
//! - Validation on load
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level
//! - [`PipelineConfig`] - Layer cap and index-worthiness threshold
//! - [`IndexConfig`] - External `mapnik-index` invocation
//! - [`LoggingConfig`] - Local file logging
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [pipeline]
//! max_layer_count = 15
//! index_worthy_size = 10485760
//!
//! [index]
//! mapnik_index_path = "${MAPNIK_INDEX}"
//! validate_features = true
//!
//! [logging]
//! local_enabled = false
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::{load_config, load_config_or_default};
pub use schema::{
    ApplicationConfig, IndexConfig, LoggingConfig, PipelineConfig, PreprocessorConfig,
};
