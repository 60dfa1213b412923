//! Scoped ownership of an opened dataset

use crate::adapters::vector::SourceDataset;

/// Closes the wrapped dataset exactly once, on every exit path
///
/// Call [`DatasetGuard::close`] on the success path; any early return or
/// error drops the guard, which closes the dataset if it is still open.
pub struct DatasetGuard {
    dataset: Box<dyn SourceDataset>,
}

impl DatasetGuard {
    pub fn new(dataset: Box<dyn SourceDataset>) -> Self {
        Self { dataset }
    }

    pub fn dataset(&self) -> &dyn SourceDataset {
        self.dataset.as_ref()
    }

    /// Close the dataset now
    pub fn close(mut self) {
        self.dataset.close();
    }
}

impl Drop for DatasetGuard {
    fn drop(&mut self) {
        if !self.dataset.is_closed() {
            tracing::trace!("Closing dataset on drop");
            self.dataset.close();
        }
    }
}
