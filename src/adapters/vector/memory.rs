//! In-memory vector source for unit tests

use super::traits::{SourceDataset, VectorSource};
use crate::domain::{Result, SourceLayer};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Dataset that counts every `close` call
pub struct MemoryDataset {
    layers: Vec<SourceLayer>,
    closes: Arc<AtomicUsize>,
    closed: bool,
}

impl MemoryDataset {
    pub fn new(layers: Vec<SourceLayer>) -> Self {
        Self {
            layers,
            closes: Arc::new(AtomicUsize::new(0)),
            closed: false,
        }
    }

    pub fn close_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.closes)
    }
}

impl SourceDataset for MemoryDataset {
    fn layers(&self) -> &[SourceLayer] {
        &self.layers
    }

    fn close(&mut self) {
        self.closes.fetch_add(1, Ordering::SeqCst);
        self.closed = true;
    }

    fn is_closed(&self) -> bool {
        self.closed
    }
}

/// Source that hands out copies of a fixed set of layers
pub struct MemorySource {
    layers: Vec<SourceLayer>,
    closes: Arc<AtomicUsize>,
}

impl MemorySource {
    pub fn new(layers: Vec<SourceLayer>) -> Self {
        Self {
            layers,
            closes: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Total `close` calls across every dataset this source opened
    pub fn closes(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }
}

impl VectorSource for MemorySource {
    fn driver_name(&self) -> &str {
        "memory"
    }

    fn open(&self, _path: &Path) -> Result<Box<dyn SourceDataset>> {
        Ok(Box::new(MemoryDataset {
            layers: self.layers.clone(),
            closes: Arc::clone(&self.closes),
            closed: false,
        }))
    }
}
