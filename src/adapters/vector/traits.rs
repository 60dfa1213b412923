//! Vector reader/writer abstraction traits
//!
//! The pipeline never touches a concrete file format directly. It opens a
//! [`SourceDataset`] through a [`VectorSource`] and writes layers through an
//! [`OutputDriver`].

use crate::domain::{GeometryType, Result, SourceFeature, SourceLayer, TargetCrs};
use std::path::Path;

/// An opened source document
///
/// Implementations hold whatever resources the format needs. `close` must be
/// safe to call more than once; only the first call releases anything.
pub trait SourceDataset: Send {
    /// Layers in the dataset's native order
    fn layers(&self) -> &[SourceLayer];

    /// Number of layers
    fn layer_count(&self) -> usize {
        self.layers().len()
    }

    /// Release the handle
    fn close(&mut self);

    /// Whether `close` has been called
    fn is_closed(&self) -> bool;
}

/// Opens source documents of one format
pub trait VectorSource: Send + Sync {
    /// Short driver name used in logs
    fn driver_name(&self) -> &str;

    /// Open a dataset for reading
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    fn open(&self, path: &Path) -> Result<Box<dyn SourceDataset>>;
}

/// Declaration of the single layer an output document carries
#[derive(Debug, Clone, Copy)]
pub struct OutputLayerSpec<'a> {
    /// Output layer name (sanitized)
    pub name: &'a str,

    /// Reference system the layer is declared in
    pub crs: &'a TargetCrs,

    /// Geometry type copied from the source layer
    pub geometry_type: GeometryType,
}

/// Creates output documents of one format
pub trait OutputDriver: Send + Sync {
    /// File extension without the leading dot
    fn extension(&self) -> &str;

    /// Create a new output document at `path`, replacing any existing file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created.
    fn create(&self, path: &Path, layer: &OutputLayerSpec<'_>) -> Result<Box<dyn OutputDocument>>;
}

/// An output document open for writing
pub trait OutputDocument {
    /// Append one feature to the output layer
    ///
    /// # Errors
    ///
    /// Returns an error if the feature cannot be encoded or written.
    fn add_feature(&mut self, feature: &SourceFeature) -> Result<()>;

    /// Flush and close the document, releasing the file handle
    ///
    /// # Errors
    ///
    /// Returns an error if the trailer cannot be written or the flush fails.
    fn close(self: Box<Self>) -> Result<()>;
}
