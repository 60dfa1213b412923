//! Checksum calculation for provenance records
//!
//! SHA-256 over raw bytes, hex-encoded. Used for the metadata digest and
//! for the archive receipt.

use sha2::{Digest, Sha256};

/// Calculate SHA-256 checksum of raw bytes
///
/// # Returns
///
/// Returns a hex-encoded SHA-256 checksum string (64 characters).
///
/// # Examples
///
/// ```
/// use kml_preprocessor::core::provenance::checksum::calculate_checksum_bytes;
///
/// let checksum = calculate_checksum_bytes(b"<kml/>");
/// assert_eq!(checksum.len(), 64);
/// ```
pub fn calculate_checksum_bytes(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    format!("{result:x}")
}
