//! Run summary

use crate::core::provenance::ArchiveReceipt;
use std::path::PathBuf;
use std::time::Duration;

/// Summary of a successful conversion run
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Number of layers in the source
    pub layers_total: usize,

    /// Layers that produced an output with at least one feature
    pub layers_converted: usize,

    pub features_written: usize,
    pub features_skipped: usize,

    /// Output files carrying features, in layer order
    pub outputs: Vec<PathBuf>,

    /// Outputs that received a spatial index
    pub indexed: Vec<PathBuf>,

    pub metadata_path: PathBuf,
    pub archive: ArchiveReceipt,
    pub duration: Duration,
}

impl RunReport {
    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            layers_total = self.layers_total,
            layers_converted = self.layers_converted,
            features_written = self.features_written,
            features_skipped = self.features_skipped,
            indexed = self.indexed.len(),
            archive_sha256 = %self.archive.sha256,
            duration_ms = self.duration.as_millis() as u64,
            "Conversion completed"
        );

        if self.features_skipped > 0 {
            tracing::warn!(
                features_skipped = self.features_skipped,
                "Features without usable geometry were skipped"
            );
        }
    }
}
