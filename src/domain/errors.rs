//! Domain error types
//!
//! This module defines the error hierarchy for the preprocessor.
//! Structural problems with the input file are kept in their own enum,
//! [`InvalidInputError`], so callers can reject the file without retrying.
//! Everything else is a processing failure carried by [`PreprocessError`].

use thiserror::Error;

/// Main preprocessor error type
///
/// This is the single terminal error value a pipeline run reports.
#[derive(Debug, Error)]
pub enum PreprocessError {
    /// The input file is structurally unusable
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),

    /// Output directory could not be created
    #[error("Failed to create output directory {path}: {cause}")]
    DirCreate { path: String, cause: String },

    /// An output document for a layer could not be created or written
    #[error("Failed to create output for layer '{layer_name}': {cause}")]
    OutputCreateFailed { layer_name: String, cause: String },

    /// Every layer ended up with zero usable features
    #[error("KML does not contain any valid features")]
    NoUsableFeatures,

    /// Metadata capture or `metadata.json` persistence failed
    #[error("Failed to write metadata: {0}")]
    MetadataWriteFailed(String),

    /// One of the index jobs failed
    #[error("Failed to build index: {0}")]
    IndexBuildFailed(String),

    /// Copying the original input into the output directory failed
    #[error("Failed to archive original: {0}")]
    ArchiveWriteFailed(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// I/O errors outside of a specific pipeline stage
    #[error("I/O error: {0}")]
    Io(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A worker task panicked or was aborted
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Structural input failures
///
/// All of these are detected before any output is written and are
/// non-retryable rejections of the input file.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidInputError {
    /// Source document could not be opened or parsed
    #[error("Failed to open source dataset: {0}")]
    OpenFailure(String),

    /// Source document has no layers
    #[error("KML does not contain any layers.")]
    NoLayers,

    /// Source document has more layers than allowed
    #[error("{found} layers found. Maximum of {max} layers allowed.")]
    TooManyLayers { found: usize, max: usize },

    /// Two or more layers share a raw name
    ///
    /// Entries are `(name, count)` in order of first appearance.
    #[error("Duplicate layer names: {}", format_duplicates(.0))]
    DuplicateLayerNames(Vec<(String, usize)>),
}

fn format_duplicates(duplicates: &[(String, usize)]) -> String {
    duplicates
        .iter()
        .map(|(name, count)| format!("'{name}' found {count} times"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Flat error taxonomy used for reporting and exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    OpenFailure,
    NoLayers,
    TooManyLayers,
    DuplicateLayerNames,
    DirCreate,
    OutputCreateFailed,
    NoUsableFeatures,
    MetadataWriteFailed,
    IndexBuildFailed,
    ArchiveWriteFailed,
    Configuration,
    Io,
    Serialization,
    Internal,
}

impl PreprocessError {
    /// Returns the taxonomy entry for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            PreprocessError::InvalidInput(inner) => match inner {
                InvalidInputError::OpenFailure(_) => ErrorKind::OpenFailure,
                InvalidInputError::NoLayers => ErrorKind::NoLayers,
                InvalidInputError::TooManyLayers { .. } => ErrorKind::TooManyLayers,
                InvalidInputError::DuplicateLayerNames(_) => ErrorKind::DuplicateLayerNames,
            },
            PreprocessError::DirCreate { .. } => ErrorKind::DirCreate,
            PreprocessError::OutputCreateFailed { .. } => ErrorKind::OutputCreateFailed,
            PreprocessError::NoUsableFeatures => ErrorKind::NoUsableFeatures,
            PreprocessError::MetadataWriteFailed(_) => ErrorKind::MetadataWriteFailed,
            PreprocessError::IndexBuildFailed(_) => ErrorKind::IndexBuildFailed,
            PreprocessError::ArchiveWriteFailed(_) => ErrorKind::ArchiveWriteFailed,
            PreprocessError::Configuration(_) => ErrorKind::Configuration,
            PreprocessError::Io(_) => ErrorKind::Io,
            PreprocessError::Serialization(_) => ErrorKind::Serialization,
            PreprocessError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Whether this error rejects the input itself rather than reporting a fault
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, PreprocessError::InvalidInput(_))
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for PreprocessError {
    fn from(err: std::io::Error) -> Self {
        PreprocessError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for PreprocessError {
    fn from(err: serde_json::Error) -> Self {
        PreprocessError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for PreprocessError {
    fn from(err: toml::de::Error) -> Self {
        PreprocessError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_layers_message() {
        let err = PreprocessError::from(InvalidInputError::NoLayers);
        assert_eq!(
            err.to_string(),
            "Invalid input: KML does not contain any layers."
        );
        assert!(err.is_invalid_input());
        assert_eq!(err.kind(), ErrorKind::NoLayers);
    }

    #[test]
    fn test_too_many_layers_message() {
        let err = InvalidInputError::TooManyLayers { found: 16, max: 15 };
        assert_eq!(
            err.to_string(),
            "16 layers found. Maximum of 15 layers allowed."
        );
    }

    #[test]
    fn test_duplicate_layer_names_message() {
        let err = InvalidInputError::DuplicateLayerNames(vec![
            ("roads".to_string(), 2),
            ("rivers".to_string(), 3),
        ]);
        assert_eq!(
            err.to_string(),
            "Duplicate layer names: 'roads' found 2 times, 'rivers' found 3 times"
        );
    }

    #[test]
    fn test_processing_errors_are_not_invalid_input() {
        let errors = [
            PreprocessError::NoUsableFeatures,
            PreprocessError::IndexBuildFailed("Error: bad".to_string()),
            PreprocessError::MetadataWriteFailed("disk full".to_string()),
            PreprocessError::ArchiveWriteFailed("disk full".to_string()),
            PreprocessError::OutputCreateFailed {
                layer_name: "roads".to_string(),
                cause: "permission denied".to_string(),
            },
        ];
        for err in &errors {
            assert!(!err.is_invalid_input(), "{err} should be a processing error");
        }
    }

    #[test]
    fn test_open_failure_is_invalid_input() {
        let err: PreprocessError = InvalidInputError::OpenFailure("bad xml".to_string()).into();
        assert!(err.is_invalid_input());
        assert_eq!(err.kind(), ErrorKind::OpenFailure);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: PreprocessError = io_err.into();
        assert!(matches!(err, PreprocessError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: PreprocessError = json_err.into();
        assert!(matches!(err, PreprocessError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: PreprocessError = toml_err.into();
        assert!(matches!(err, PreprocessError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }
}
