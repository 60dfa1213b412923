//! Persistence of the metadata digest

use crate::adapters::digest::MetadataDigester;
use crate::domain::{PreprocessError, Result};
use std::path::{Path, PathBuf};

/// File name of the persisted digest
pub const METADATA_FILE: &str = "metadata.json";

/// Digest `input` and write the record to `<output_dir>/metadata.json`
///
/// # Errors
///
/// Returns [`PreprocessError::MetadataWriteFailed`] if the digest fails or
/// the file cannot be written.
pub async fn capture_metadata(
    digester: &dyn MetadataDigester,
    input: &Path,
    output_dir: &Path,
) -> Result<PathBuf> {
    let record = digester
        .digest(input)
        .await
        .map_err(|e| PreprocessError::MetadataWriteFailed(format!("digest failed: {e}")))?;

    let json = serde_json::to_vec(&record)
        .map_err(|e| PreprocessError::MetadataWriteFailed(e.to_string()))?;

    let path = output_dir.join(METADATA_FILE);
    tokio::fs::write(&path, json).await.map_err(|e| {
        PreprocessError::MetadataWriteFailed(format!("failed to write {}: {}", path.display(), e))
    })?;

    tracing::debug!(path = %path.display(), layers = record.layers.len(), "Metadata written");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::digest::MetadataRecord;
    use async_trait::async_trait;
    use tempfile::TempDir;

    struct FixedDigester;

    #[async_trait]
    impl MetadataDigester for FixedDigester {
        async fn digest(&self, path: &Path) -> Result<MetadataRecord> {
            Ok(MetadataRecord {
                filename: path.display().to_string(),
                filesize: 6,
                sha256: "abc".to_string(),
                layers: vec!["roads".to_string()],
                ..Default::default()
            })
        }
    }

    struct BrokenDigester;

    #[async_trait]
    impl MetadataDigester for BrokenDigester {
        async fn digest(&self, _path: &Path) -> Result<MetadataRecord> {
            Err(PreprocessError::Io("unreadable".to_string()))
        }
    }

    #[tokio::test]
    async fn test_capture_writes_record() {
        let dir = TempDir::new().unwrap();
        let path = capture_metadata(&FixedDigester, Path::new("in.kml"), dir.path())
            .await
            .unwrap();

        assert_eq!(path, dir.path().join("metadata.json"));
        let record: MetadataRecord =
            serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(record.filename, "in.kml");
        assert_eq!(record.layers, vec!["roads"]);
    }

    #[tokio::test]
    async fn test_capture_digest_failure() {
        let dir = TempDir::new().unwrap();
        let err = capture_metadata(&BrokenDigester, Path::new("in.kml"), dir.path())
            .await
            .unwrap_err();

        assert!(matches!(err, PreprocessError::MetadataWriteFailed(_)));
        assert!(!dir.path().join("metadata.json").exists());
    }
}
