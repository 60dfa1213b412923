//! Archival of the original input next to its outputs

use super::checksum::calculate_checksum_bytes;
use crate::domain::{PreprocessError, Result};
use std::path::{Path, PathBuf};

/// File name the original KML is archived under
pub const ARCHIVE_FILE: &str = "archived.kml";

/// What was archived, and where
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveReceipt {
    pub path: PathBuf,
    pub bytes: u64,
    pub sha256: String,
}

/// Copy `input` byte-for-byte to `<output_dir>/<archive_name>`
///
/// # Errors
///
/// Returns [`PreprocessError::ArchiveWriteFailed`] if the input cannot be
/// read or the copy cannot be written.
pub async fn archive_original(
    input: &Path,
    output_dir: &Path,
    archive_name: &str,
) -> Result<ArchiveReceipt> {
    let contents = tokio::fs::read(input).await.map_err(|e| {
        PreprocessError::ArchiveWriteFailed(format!("failed to read {}: {}", input.display(), e))
    })?;

    let path = output_dir.join(archive_name);
    tokio::fs::write(&path, &contents).await.map_err(|e| {
        PreprocessError::ArchiveWriteFailed(format!("failed to write {}: {}", path.display(), e))
    })?;

    let receipt = ArchiveReceipt {
        path,
        bytes: contents.len() as u64,
        sha256: calculate_checksum_bytes(&contents),
    };

    tracing::debug!(
        path = %receipt.path.display(),
        bytes = receipt.bytes,
        sha256 = %receipt.sha256,
        "Original archived"
    );

    Ok(receipt)
}
