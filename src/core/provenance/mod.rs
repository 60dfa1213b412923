//! Provenance of a run
//!
//! The metadata digest of the original file and the archived copy of it.

pub mod archive;
pub mod checksum;
pub mod metadata;

pub use archive::{archive_original, ArchiveReceipt, ARCHIVE_FILE};
pub use checksum::calculate_checksum_bytes;
pub use metadata::{capture_metadata, METADATA_FILE};
