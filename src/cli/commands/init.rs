//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "kml-preprocessor.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing KML preprocessor configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2); // Configuration error exit code
        }

        match fs::write(&self.output, Self::generate_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Make sure mapnik-index is installed or set [index] mapnik_index_path");
                println!("  3. Validate configuration: kml-preprocessor validate-config");
                println!("  4. Convert a file: kml-preprocessor convert <INPUT> <OUTPUT_DIR>");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(5) // Fatal error exit code
            }
        }
    }

    /// Generate the sample configuration
    fn generate_config() -> String {
        r#"# KML Preprocessor Configuration File
# Values of the form ${VAR} are read from the environment.
# Any value can also be overridden with KMLPRE_<SECTION>_<KEY>.

[application]
log_level = "info"  # trace | debug | info | warn | error

[pipeline]
# Documents with more layers than this are rejected
max_layer_count = 15
# Output files at or above this size (bytes) get a spatial index
index_worthy_size = 10485760

[index]
mapnik_index_path = "mapnik-index"
validate_features = true
# Diagnostics containing this text fail the index job
error_marker = "Error"

[logging]
local_enabled = false
local_path = "/var/log/kml-preprocessor"
local_rotation = "daily"  # daily | hourly | never
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PreprocessorConfig;

    #[test]
    fn test_generated_config_is_valid() {
        let config: PreprocessorConfig = toml::from_str(&InitArgs::generate_config()).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.pipeline.max_layer_count, 15);
        assert_eq!(config.pipeline.index_worthy_size, 10 * 1024 * 1024);
    }

    #[tokio::test]
    async fn test_init_refuses_overwrite() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let args = InitArgs {
            output: file.path().to_string_lossy().into_owned(),
            force: false,
        };
        assert_eq!(args.execute().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_init_force_overwrites() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let args = InitArgs {
            output: file.path().to_string_lossy().into_owned(),
            force: true,
        };
        assert_eq!(args.execute().await.unwrap(), 0);
        let written = std::fs::read_to_string(file.path()).unwrap();
        assert!(written.contains("[pipeline]"));
    }
}
