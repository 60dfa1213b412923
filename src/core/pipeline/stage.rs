//! Pipeline stages

use crate::domain::{ErrorKind, PreprocessError};
use std::fmt;

/// Stages of a conversion run, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Opening,
    Validating,
    Converting,
    TotalZeroCheck,
    MetadataCapture,
    Indexing,
    Archiving,
    Done,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Opening => "opening",
            Stage::Validating => "validating",
            Stage::Converting => "converting",
            Stage::TotalZeroCheck => "total_zero_check",
            Stage::MetadataCapture => "metadata_capture",
            Stage::Indexing => "indexing",
            Stage::Archiving => "archiving",
            Stage::Done => "done",
        }
    }

    /// Stage a failure from the open/validate/convert block belongs to
    pub(crate) fn of_conversion_error(error: &PreprocessError) -> Self {
        match error {
            PreprocessError::DirCreate { .. } => Stage::Opening,
            _ if error.kind() == ErrorKind::OpenFailure => Stage::Opening,
            PreprocessError::InvalidInput(_) => Stage::Validating,
            _ => Stage::Converting,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
