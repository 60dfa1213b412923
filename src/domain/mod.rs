//! Domain models and types for the preprocessor.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Source records** ([`SourceLayer`], [`SourceFeature`], [`GeometryType`])
//! - **Output declaration** ([`TargetCrs`])
//! - **File descriptors** ([`FileInfo`]) for the selecting framework
//! - **Error types** ([`PreprocessError`], [`InvalidInputError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, PreprocessError>`]. Structural
//! input failures are wrapped so callers can tell them apart:
//!
//! ```rust
//! use kml_preprocessor::domain::{InvalidInputError, PreprocessError};
//!
//! let err: PreprocessError = InvalidInputError::NoLayers.into();
//! assert!(err.is_invalid_input());
//! ```

pub mod errors;
pub mod feature;
pub mod file_info;
pub mod result;

// Re-export commonly used types for convenience
pub use errors::{ErrorKind, InvalidInputError, PreprocessError};
pub use feature::{GeometryType, SourceFeature, SourceLayer, TargetCrs};
pub use file_info::FileInfo;
pub use result::Result;
