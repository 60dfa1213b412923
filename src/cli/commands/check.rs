//! Check command implementation
//!
//! Sniffs a file and reports whether the KML preprocessor would take it.

use crate::config::PreprocessorConfig;
use crate::core::pipeline::{KmlPreprocessor, Preprocessor};
use crate::domain::FileInfo;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the check command
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// File to inspect
    pub input: PathBuf,
}

impl CheckArgs {
    /// Execute the check command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        let info = match FileInfo::from_path(&self.input) {
            Ok(info) => info,
            Err(e) => {
                println!("❌ Cannot read {}: {e}", self.input.display());
                return Ok(1);
            }
        };

        let preprocessor = KmlPreprocessor::from_config(&PreprocessorConfig::default());
        println!("File: {}", self.input.display());
        println!("  Type: {}", info.filetype);
        println!("  Size: {} bytes", info.size);

        if preprocessor.accepts(&info) {
            println!("✅ Accepted: {}", preprocessor.description());
            Ok(0)
        } else {
            println!("❌ Not accepted by the KML preprocessor");
            Ok(1)
        }
    }
}
