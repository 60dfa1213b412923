//! Spatial index builder backed by the `mapnik-index` binary
//!
//! `mapnik-index <layerfile> --validate-features` writes `<layerfile>.index`
//! next to the input. Validation problems are reported on stderr while the
//! process may still exit with status 0, so the captured stderr decides the
//! outcome.

use crate::config::IndexConfig;
use crate::domain::{PreprocessError, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

/// Builds a spatial index for one output document
#[async_trait]
pub trait IndexBuilder: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Build the index for `layer_file`
    ///
    /// # Errors
    ///
    /// Returns `PreprocessError::IndexBuildFailed` carrying the builder's
    /// diagnostics when the job fails.
    async fn build(&self, layer_file: &Path) -> Result<()>;
}

/// Runs the external `mapnik-index` program
#[derive(Debug, Clone)]
pub struct MapnikIndexBuilder {
    binary: PathBuf,
    validate_features: bool,
    error_marker: String,
}

impl MapnikIndexBuilder {
    /// Create a builder for the given binary path
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            validate_features: true,
            error_marker: "Error".to_string(),
        }
    }

    /// Create a builder from the `[index]` configuration section
    pub fn from_config(config: &IndexConfig) -> Self {
        Self {
            binary: PathBuf::from(&config.mapnik_index_path),
            validate_features: config.validate_features,
            error_marker: config.error_marker.clone(),
        }
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    /// Whether the configured binary can be found
    ///
    /// Bare names are looked up on `PATH`.
    pub fn is_available(&self) -> bool {
        if self.binary.components().count() > 1 {
            return self.binary.is_file();
        }
        std::env::var_os("PATH")
            .map(|paths| {
                std::env::split_paths(&paths).any(|dir| dir.join(&self.binary).is_file())
            })
            .unwrap_or(false)
    }

    /// Path of the index file the builder produces for `layer_file`
    pub fn index_path_for(layer_file: &Path) -> PathBuf {
        let mut name = layer_file.as_os_str().to_owned();
        name.push(".index");
        PathBuf::from(name)
    }
}

#[async_trait]
impl IndexBuilder for MapnikIndexBuilder {
    fn name(&self) -> &str {
        "mapnik-index"
    }

    async fn build(&self, layer_file: &Path) -> Result<()> {
        let mut command = Command::new(&self.binary);
        command.arg(layer_file);
        if self.validate_features {
            command.arg("--validate-features");
        }
        command
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        tracing::debug!(
            binary = %self.binary.display(),
            layer_file = %layer_file.display(),
            "Spawning index builder"
        );

        let output = command.output().await.map_err(|e| {
            PreprocessError::IndexBuildFailed(format!(
                "failed to run {} for {}: {}",
                self.binary.display(),
                layer_file.display(),
                e
            ))
        })?;

        let diagnostics = String::from_utf8_lossy(&output.stderr);
        if diagnostics.contains(&self.error_marker) {
            return Err(PreprocessError::IndexBuildFailed(diagnostics.into_owned()));
        }

        if !output.status.success() {
            tracing::warn!(
                layer_file = %layer_file.display(),
                status = %output.status,
                "Index builder exited with non-zero status without reporting an error"
            );
        }

        Ok(())
    }
}
