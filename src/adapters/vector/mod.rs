//! Vector format abstraction
//!
//! Traits the pipeline uses to read source layers and write output layers.

pub mod traits;

#[cfg(test)]
pub(crate) mod memory;

pub use traits::{OutputDocument, OutputDriver, OutputLayerSpec, SourceDataset, VectorSource};
