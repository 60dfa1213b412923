//! Convert command implementation
//!
//! This module implements the `convert` command, which runs the full
//! pipeline on one KML file.

use crate::adapters::mapnik::MapnikIndexBuilder;
use crate::config::load_config_or_default;
use crate::core::pipeline::{accepts, KmlPreprocessor};
use crate::domain::{FileInfo, PreprocessError};
use clap::Args;
use std::path::PathBuf;

/// Arguments for the convert command
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// KML file to convert
    pub input: PathBuf,

    /// Directory the outputs are written to (created if missing)
    pub output_dir: PathBuf,

    /// Override the maximum number of layers
    #[arg(long, value_name = "N")]
    pub max_layers: Option<usize>,

    /// Override the minimum output size in bytes that gets a spatial index
    #[arg(long, value_name = "BYTES")]
    pub index_size: Option<u64>,

    /// Override the path of the mapnik-index binary
    #[arg(long, value_name = "PATH")]
    pub mapnik_index: Option<String>,
}

impl ConvertArgs {
    /// Execute the convert command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(input = %self.input.display(), "Starting convert command");

        let mut config = match load_config_or_default(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to load configuration");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        // Apply CLI overrides
        if let Some(max_layers) = self.max_layers {
            tracing::info!(max_layers, "Overriding max layer count from CLI");
            config.pipeline.max_layer_count = max_layers;
        }
        if let Some(index_size) = self.index_size {
            tracing::info!(index_size, "Overriding index threshold from CLI");
            config.pipeline.index_worthy_size = index_size;
        }
        if let Some(binary) = &self.mapnik_index {
            tracing::info!(binary = %binary, "Overriding mapnik-index path from CLI");
            config.index.mapnik_index_path = binary.clone();
        }

        if let Err(e) = config.validate() {
            println!("❌ Configuration validation failed");
            println!("   Error: {e}");
            return Ok(2);
        }

        // Unreadable input is reported by the pipeline itself
        if let Ok(info) = FileInfo::from_path(&self.input) {
            if !accepts(&info) {
                tracing::warn!(
                    filetype = %info.filetype,
                    "Input does not look like KML, converting anyway"
                );
            }
        }

        if !MapnikIndexBuilder::from_config(&config.index).is_available() {
            tracing::warn!(
                binary = %config.index.mapnik_index_path,
                "mapnik-index not found, indexing outputs above the threshold will fail"
            );
        }

        println!("🗺️  Converting {}", self.input.display());

        let preprocessor = KmlPreprocessor::from_config(&config);
        match preprocessor
            .orchestrator()
            .run_with_report(&self.input, &self.output_dir)
            .await
        {
            Ok(report) => {
                println!(
                    "✅ Wrote {} features from {} of {} layers",
                    report.features_written, report.layers_converted, report.layers_total
                );
                for output in &report.outputs {
                    let marker = if report.indexed.contains(output) {
                        " (indexed)"
                    } else {
                        ""
                    };
                    println!("   {}{marker}", output.display());
                }
                if report.features_skipped > 0 {
                    println!(
                        "⚠️  Skipped {} features without usable geometry",
                        report.features_skipped
                    );
                }
                println!("   Archived original: {}", report.archive.path.display());
                Ok(0)
            }
            Err(e) => {
                if e.is_invalid_input() {
                    println!("❌ Input rejected");
                } else {
                    println!("❌ Conversion failed");
                }
                println!("   Error: {e}");
                Ok(exit_code_for(&e))
            }
        }
    }
}

/// Exit code for a failed run
pub fn exit_code_for(error: &PreprocessError) -> i32 {
    if error.is_invalid_input() {
        3 // Invalid input exit code
    } else {
        5 // Processing failure exit code
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::InvalidInputError;

    #[test]
    fn test_exit_code_for_invalid_input() {
        let errors = [
            InvalidInputError::OpenFailure("bad xml".into()),
            InvalidInputError::NoLayers,
            InvalidInputError::TooManyLayers { found: 20, max: 15 },
            InvalidInputError::DuplicateLayerNames(vec![("a".into(), 2)]),
        ];
        for error in errors {
            assert_eq!(exit_code_for(&PreprocessError::from(error)), 3);
        }
    }

    #[test]
    fn test_exit_code_for_processing_failure() {
        assert_eq!(exit_code_for(&PreprocessError::NoUsableFeatures), 5);
        assert_eq!(
            exit_code_for(&PreprocessError::IndexBuildFailed("Error".into())),
            5
        );
    }

    #[tokio::test]
    async fn test_convert_bad_override_is_config_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let args = ConvertArgs {
            input: dir.path().join("in.kml"),
            output_dir: dir.path().join("out"),
            max_layers: Some(0),
            index_size: None,
            mapnik_index: None,
        };

        let code = args
            .execute(&dir.path().join("missing.toml").to_string_lossy())
            .await
            .unwrap();
        assert_eq!(code, 2);
        assert!(!dir.path().join("out").exists());
    }
}
