//! Metadata digest of the original input file
//!
//! The digest describes the source file independently of the converted
//! output: size, checksum, extent, layer names and fields.

pub mod file;

pub use file::FileDigester;

use crate::domain::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Inspects an input file and describes it
#[async_trait]
pub trait MetadataDigester: Send + Sync {
    /// Produce the metadata record for `path`
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or inspected.
    async fn digest(&self, path: &Path) -> Result<MetadataRecord>;
}

/// Descriptor persisted as `metadata.json`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetadataRecord {
    /// File name of the original input
    pub filename: String,

    /// Size of the original input in bytes
    pub filesize: u64,

    /// Extension of the original input, with leading dot
    pub filetype: String,

    /// Datasource type
    pub dstype: String,

    /// proj4 definition of the source reference system
    pub projection: String,

    /// `[minx, miny, maxx, maxy]` over every geometry, when any exist
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extent: Option<[f64; 4]>,

    /// `[lon, lat]` centre of the extent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub center: Option<[f64; 2]>,

    /// Raw layer names in dataset order
    pub layers: Vec<String>,

    /// Vector layer descriptions keyed to the output layer ids
    pub json: VectorLayers,

    /// Hex SHA-256 of the original bytes
    pub sha256: String,
}

/// Container for the per-layer descriptions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VectorLayers {
    pub vector_layers: Vec<VectorLayer>,
}

/// Description of one layer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VectorLayer {
    /// Output file stem: the sanitized name, suffixed when it collides
    pub id: String,

    /// Raw layer name
    pub description: String,

    /// Field name to field type
    pub fields: BTreeMap<String, String>,
}
