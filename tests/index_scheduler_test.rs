//! Integration tests for the concurrent index stage

use async_trait::async_trait;
use kml_preprocessor::adapters::mapnik::IndexBuilder;
use kml_preprocessor::core::index::IndexScheduler;
use kml_preprocessor::domain::{PreprocessError, Result};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

/// Fails for files whose name contains `bad`, after a short delay for the rest
#[derive(Default)]
struct SelectiveBuilder {
    started: AtomicUsize,
    finished: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

#[async_trait]
impl IndexBuilder for SelectiveBuilder {
    fn name(&self) -> &str {
        "selective"
    }

    async fn build(&self, layer_file: &Path) -> Result<()> {
        self.started.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let failing = layer_file.to_string_lossy().contains("bad");
        if !failing {
            tokio::time::sleep(Duration::from_millis(50)).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.finished.fetch_add(1, Ordering::SeqCst);

        if failing {
            Err(PreprocessError::IndexBuildFailed(format!(
                "Error: {}",
                layer_file.display()
            )))
        } else {
            Ok(())
        }
    }
}

fn write_files(dir: &Path, names: &[&str], size: usize) -> Vec<PathBuf> {
    names
        .iter()
        .map(|name| {
            let path = dir.join(name);
            std::fs::write(&path, vec![b'{'; size]).unwrap();
            path
        })
        .collect()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_jobs_run_concurrently() {
    let dir = TempDir::new().unwrap();
    let files = write_files(dir.path(), &["a.geojson", "b.geojson", "c.geojson", "d.geojson"], 16);

    let builder = Arc::new(SelectiveBuilder::default());
    let report = IndexScheduler::new(builder.clone(), 1)
        .build_indexes(&files)
        .await
        .unwrap();

    assert_eq!(report.indexed.len(), 4);
    assert!(builder.max_in_flight.load(Ordering::SeqCst) > 1);
}

#[tokio::test]
async fn test_failure_waits_for_remaining_jobs() {
    let dir = TempDir::new().unwrap();
    let files = write_files(
        dir.path(),
        &["ok1.geojson", "bad.geojson", "ok2.geojson", "ok3.geojson"],
        16,
    );

    let builder = Arc::new(SelectiveBuilder::default());
    let err = IndexScheduler::new(builder.clone(), 1)
        .build_indexes(&files)
        .await
        .unwrap_err();

    assert!(matches!(err, PreprocessError::IndexBuildFailed(_)));
    assert!(err.to_string().contains("bad.geojson"));
    // Nothing is cancelled: every dispatched job ran to completion
    assert_eq!(builder.started.load(Ordering::SeqCst), 4);
    assert_eq!(builder.finished.load(Ordering::SeqCst), 4);
}

#[tokio::test]
async fn test_only_large_files_dispatched() {
    let dir = TempDir::new().unwrap();
    let mut files = write_files(dir.path(), &["small.geojson"], 10);
    files.extend(write_files(dir.path(), &["big.geojson"], 2048));

    let builder = Arc::new(SelectiveBuilder::default());
    let report = IndexScheduler::new(builder.clone(), 1024)
        .build_indexes(&files)
        .await
        .unwrap();

    assert_eq!(report.indexed, vec![dir.path().join("big.geojson")]);
    assert_eq!(report.skipped, vec![dir.path().join("small.geojson")]);
    assert_eq!(builder.started.load(Ordering::SeqCst), 1);
}
