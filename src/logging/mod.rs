//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Configurable log levels (`RUST_LOG` wins over the configured level)
//! - Console output
//! - JSON-formatted local file logging with rotation
//!
//! # Example
//!
//! ```no_run
//! use kml_preprocessor::logging::init_logging;
//! use kml_preprocessor::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log entry into a pipeline stage
///
/// # Example
///
/// ```no_run
/// use kml_preprocessor::log_stage;
///
/// log_stage!("indexing", files = 3);
/// ```
#[macro_export]
macro_rules! log_stage {
    ($stage:expr) => {
        tracing::debug!(stage = $stage, "Entering stage");
    };
    ($stage:expr, $($field:tt)+) => {
        tracing::debug!(stage = $stage, $($field)+, "Entering stage");
    };
}

/// Log the outcome of a single layer conversion
///
/// # Example
///
/// ```no_run
/// use kml_preprocessor::log_layer_converted;
///
/// log_layer_converted!("roads", "/tmp/out/roads.geojson", 42, 3);
/// ```
#[macro_export]
macro_rules! log_layer_converted {
    ($layer:expr, $path:expr, $written:expr, $skipped:expr) => {
        tracing::info!(
            layer = %$layer,
            path = %$path,
            features_written = $written,
            features_skipped = $skipped,
            "Layer converted"
        );
    };
}
