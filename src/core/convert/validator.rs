//! Structural checks on an opened dataset
//!
//! Runs before any output file is written. The first failing check wins:
//! no layers, then too many layers, then duplicate layer names.

use crate::adapters::vector::SourceDataset;
use crate::config::PipelineConfig;
use crate::domain::{InvalidInputError, SourceLayer};
use std::collections::HashMap;

/// Validates layer structure against the configured limits
#[derive(Debug, Clone, Copy)]
pub struct LayerValidator {
    max_layer_count: usize,
}

impl LayerValidator {
    pub fn new(max_layer_count: usize) -> Self {
        Self { max_layer_count }
    }

    pub fn from_config(config: &PipelineConfig) -> Self {
        Self::new(config.max_layer_count)
    }

    pub fn max_layer_count(&self) -> usize {
        self.max_layer_count
    }

    /// Check the dataset's layers
    ///
    /// # Errors
    ///
    /// - [`InvalidInputError::NoLayers`] if the dataset has zero layers
    /// - [`InvalidInputError::TooManyLayers`] if it has more than the maximum
    /// - [`InvalidInputError::DuplicateLayerNames`] if any raw name repeats
    pub fn validate(&self, dataset: &dyn SourceDataset) -> Result<(), InvalidInputError> {
        let layers = dataset.layers();

        if layers.is_empty() {
            return Err(InvalidInputError::NoLayers);
        }

        if layers.len() > self.max_layer_count {
            return Err(InvalidInputError::TooManyLayers {
                found: layers.len(),
                max: self.max_layer_count,
            });
        }

        let duplicates = duplicate_layer_names(layers);
        if !duplicates.is_empty() {
            return Err(InvalidInputError::DuplicateLayerNames(duplicates));
        }

        Ok(())
    }
}

/// Names occurring more than once, with counts, in order of first appearance
pub fn duplicate_layer_names(layers: &[SourceLayer]) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();

    for layer in layers {
        let count = counts.entry(layer.name()).or_insert(0);
        if *count == 0 {
            order.push(layer.name());
        }
        *count += 1;
    }

    order
        .into_iter()
        .filter_map(|name| {
            let count = counts[name];
            (count > 1).then(|| (name.to_string(), count))
        })
        .collect()
}
