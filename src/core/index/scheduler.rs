//! Concurrent spatial index scheduling
//!
//! One job per output file, all running at once. A file smaller than the
//! index-worthy threshold completes without invoking the builder. The run
//! fails if any job fails; the first failure to arrive is the one reported,
//! and the remaining jobs are still awaited so no work outlives the run.

use crate::adapters::mapnik::IndexBuilder;
use crate::domain::{PreprocessError, Result};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::task::JoinSet;

/// Which files were indexed and which were below the threshold
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexReport {
    pub indexed: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
}

enum JobOutcome {
    Indexed(PathBuf),
    Skipped(PathBuf),
}

/// Fans index jobs out over the runtime
#[derive(Clone)]
pub struct IndexScheduler {
    builder: Arc<dyn IndexBuilder>,
    index_worthy_size: u64,
}

impl IndexScheduler {
    pub fn new(builder: Arc<dyn IndexBuilder>, index_worthy_size: u64) -> Self {
        Self {
            builder,
            index_worthy_size,
        }
    }

    /// Build indexes for every file at least `index_worthy_size` bytes long
    ///
    /// # Errors
    ///
    /// Returns the first [`PreprocessError::IndexBuildFailed`] reported by
    /// any job, after all jobs have finished.
    pub async fn build_indexes(&self, files: &[PathBuf]) -> Result<IndexReport> {
        let mut jobs = JoinSet::new();
        for file in files {
            let builder = Arc::clone(&self.builder);
            let threshold = self.index_worthy_size;
            let file = file.clone();
            jobs.spawn(async move { run_job(builder.as_ref(), threshold, file).await });
        }

        tracing::debug!(
            jobs = files.len(),
            builder = self.builder.name(),
            threshold = self.index_worthy_size,
            "Index jobs scheduled"
        );

        let mut report = IndexReport::default();
        let mut first_error: Option<PreprocessError> = None;

        while let Some(joined) = jobs.join_next().await {
            let outcome = joined
                .map_err(|e| PreprocessError::IndexBuildFailed(format!("index job aborted: {e}")))
                .and_then(|result| result);

            match outcome {
                Ok(JobOutcome::Indexed(file)) => report.indexed.push(file),
                Ok(JobOutcome::Skipped(file)) => report.skipped.push(file),
                Err(e) if first_error.is_none() => {
                    tracing::error!(error = %e, "Index job failed");
                    first_error = Some(e);
                }
                Err(e) => tracing::debug!(error = %e, "Additional index job failure"),
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(report),
        }
    }
}

async fn run_job(builder: &dyn IndexBuilder, threshold: u64, file: PathBuf) -> Result<JobOutcome> {
    let metadata = tokio::fs::metadata(&file).await.map_err(|e| {
        PreprocessError::IndexBuildFailed(format!("failed to stat {}: {}", file.display(), e))
    })?;

    if metadata.len() < threshold {
        tracing::trace!(file = %file.display(), size = metadata.len(), "Below index threshold");
        return Ok(JobOutcome::Skipped(file));
    }

    builder.build(&file).await.map_err(|e| match e {
        PreprocessError::IndexBuildFailed(_) => e,
        other => PreprocessError::IndexBuildFailed(other.to_string()),
    })?;

    tracing::debug!(file = %file.display(), size = metadata.len(), "Index built");
    Ok(JobOutcome::Indexed(file))
}
