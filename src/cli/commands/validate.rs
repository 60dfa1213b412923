//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the preprocessor configuration file.

use crate::adapters::mapnik::MapnikIndexBuilder;
use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates as part of loading
        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration is valid");
                c
            }
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Max Layers: {}", config.pipeline.max_layer_count);
        println!(
            "  Index Threshold: {} bytes",
            config.pipeline.index_worthy_size
        );
        println!("  mapnik-index: {}", config.index.mapnik_index_path);
        println!("  Validate Features: {}", config.index.validate_features);
        if config.logging.local_enabled {
            println!(
                "  Log Files: {} ({})",
                config.logging.local_path, config.logging.local_rotation
            );
        }

        if !MapnikIndexBuilder::from_config(&config.index).is_available() {
            println!();
            println!(
                "⚠️  mapnik-index binary not found: {}",
                config.index.mapnik_index_path
            );
            println!("   Outputs at or above the index threshold will fail to index");
        }
        println!();

        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_validate_missing_file() {
        let code = ValidateArgs {}
            .execute("/nonexistent/kml-preprocessor.toml")
            .await
            .unwrap();
        assert_eq!(code, 2);
    }

    #[tokio::test]
    async fn test_validate_good_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[pipeline]\nmax_layer_count = 5").unwrap();

        let code = ValidateArgs {}
            .execute(&file.path().to_string_lossy())
            .await
            .unwrap();
        assert_eq!(code, 0);
    }

    #[tokio::test]
    async fn test_validate_bad_value() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[logging]\nlocal_rotation = \"weekly\"").unwrap();

        let code = ValidateArgs {}
            .execute(&file.path().to_string_lossy())
            .await
            .unwrap();
        assert_eq!(code, 2);
    }
}
