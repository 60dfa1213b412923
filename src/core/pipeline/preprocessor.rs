//! Preprocessor surface for the outer job framework
//!
//! A job runner holds a set of preprocessors, asks each whether it
//! [`accepts`](Preprocessor::accepts) an uploaded file, and runs the first
//! that does.

use super::orchestrator::ConversionOrchestrator;
use crate::config::PreprocessorConfig;
use crate::domain::{FileInfo, Result};
use async_trait::async_trait;
use std::path::Path;

/// A file-type specific conversion
#[async_trait]
pub trait Preprocessor: Send + Sync {
    /// Human readable summary of the conversion
    fn description(&self) -> &str;

    /// Whether this preprocessor handles the described file
    fn accepts(&self, info: &FileInfo) -> bool;

    /// Convert `input` into `output_dir`
    async fn run(&self, input: &Path, output_dir: &Path) -> Result<()>;
}

/// True iff the sniffed file type is `kml`
pub fn accepts(info: &FileInfo) -> bool {
    info.filetype == "kml"
}

/// KML to GeoJSON preprocessor
#[derive(Clone)]
pub struct KmlPreprocessor {
    orchestrator: ConversionOrchestrator,
}

impl KmlPreprocessor {
    pub fn new(orchestrator: ConversionOrchestrator) -> Self {
        Self { orchestrator }
    }

    pub fn from_config(config: &PreprocessorConfig) -> Self {
        Self::new(ConversionOrchestrator::kml(config))
    }

    pub fn orchestrator(&self) -> &ConversionOrchestrator {
        &self.orchestrator
    }
}

#[async_trait]
impl Preprocessor for KmlPreprocessor {
    fn description(&self) -> &str {
        "Convert KML to GeoJSON"
    }

    fn accepts(&self, info: &FileInfo) -> bool {
        accepts(info)
    }

    async fn run(&self, input: &Path, output_dir: &Path) -> Result<()> {
        self.orchestrator.run(input, output_dir).await
    }
}
