//! Single layer conversion

use super::filter::is_usable;
use super::sanitize::sanitize;
use crate::adapters::vector::{OutputDriver, OutputLayerSpec};
use crate::domain::{PreprocessError, Result, SourceLayer, TargetCrs};
use crate::log_layer_converted;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Outcome of converting one layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerOutput {
    /// Raw source layer name
    pub layer_name: String,

    /// File created for the layer, `None` if the layer was empty
    pub file: Option<PathBuf>,

    pub features_written: usize,
    pub features_skipped: usize,
}

impl LayerOutput {
    fn empty(layer_name: &str) -> Self {
        Self {
            layer_name: layer_name.to_string(),
            file: None,
            features_written: 0,
            features_skipped: 0,
        }
    }

    /// Output path, only if at least one feature was written
    pub fn output_path(&self) -> Option<&Path> {
        if self.features_written > 0 {
            self.file.as_deref()
        } else {
            None
        }
    }
}

/// Writes source layers to single-layer output documents
#[derive(Clone)]
pub struct LayerConverter {
    driver: Arc<dyn OutputDriver>,
}

impl LayerConverter {
    pub fn new(driver: Arc<dyn OutputDriver>) -> Self {
        Self { driver }
    }

    /// Convert a layer into `<output_dir>/<sanitized name>.<ext>`
    pub fn convert(
        &self,
        layer: &SourceLayer,
        output_dir: &Path,
        crs: &TargetCrs,
    ) -> Result<LayerOutput> {
        self.convert_as(layer, &sanitize(layer.name()), output_dir, crs)
    }

    /// Convert a layer under an explicit file stem
    ///
    /// A layer with zero features produces no file. Features without a
    /// usable geometry are counted as skipped.
    ///
    /// # Errors
    ///
    /// Returns [`PreprocessError::OutputCreateFailed`] if the output document
    /// cannot be created, written or closed.
    pub fn convert_as(
        &self,
        layer: &SourceLayer,
        stem: &str,
        output_dir: &Path,
        crs: &TargetCrs,
    ) -> Result<LayerOutput> {
        if layer.feature_count() == 0 {
            tracing::debug!(layer = %layer.name(), "Layer has no features, no output written");
            return Ok(LayerOutput::empty(layer.name()));
        }

        let failed = |cause: PreprocessError| PreprocessError::OutputCreateFailed {
            layer_name: layer.name().to_string(),
            cause: cause.to_string(),
        };

        let path = output_dir.join(format!("{stem}.{}", self.driver.extension()));
        let spec = OutputLayerSpec {
            name: stem,
            crs,
            geometry_type: layer.geometry_type(),
        };
        let mut document = self.driver.create(&path, &spec).map_err(failed)?;

        let mut written = 0;
        let mut skipped = 0;
        for feature in layer.features() {
            if !is_usable(feature) {
                skipped += 1;
                continue;
            }
            document.add_feature(feature).map_err(failed)?;
            written += 1;
        }
        document.close().map_err(failed)?;

        log_layer_converted!(layer.name(), path.display(), written, skipped);

        Ok(LayerOutput {
            layer_name: layer.name().to_string(),
            file: Some(path),
            features_written: written,
            features_skipped: skipped,
        })
    }
}
