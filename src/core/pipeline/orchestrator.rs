//! Conversion orchestrator - top-level driver of a run
//!
//! Opens the source, gates it through the validator, converts every layer,
//! then captures metadata, builds indexes and archives the original, in that
//! order. The first failure from any stage ends the run. Files already
//! written are left in place.

use super::guard::DatasetGuard;
use super::report::RunReport;
use super::stage::Stage;
use crate::adapters::digest::{FileDigester, MetadataDigester};
use crate::adapters::geojson::GeoJsonDriver;
use crate::adapters::kml::KmlSource;
use crate::adapters::mapnik::{IndexBuilder, MapnikIndexBuilder};
use crate::adapters::vector::{OutputDriver, VectorSource};
use crate::config::{PipelineConfig, PreprocessorConfig};
use crate::core::convert::{sanitize, LayerConverter, LayerValidator, UniqueNames};
use crate::core::index::IndexScheduler;
use crate::core::provenance::{archive_original, capture_metadata, ARCHIVE_FILE};
use crate::domain::{InvalidInputError, PreprocessError, Result, TargetCrs};
use crate::log_stage;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

/// What the blocking open/validate/convert block produced
#[derive(Debug, Default)]
struct ConversionOutcome {
    layers_total: usize,
    layers_converted: usize,
    features_written: usize,
    features_skipped: usize,
    outputs: Vec<PathBuf>,
}

/// Conversion orchestrator
#[derive(Clone)]
pub struct ConversionOrchestrator {
    config: PipelineConfig,
    source: Arc<dyn VectorSource>,
    driver: Arc<dyn OutputDriver>,
    digester: Arc<dyn MetadataDigester>,
    index_builder: Arc<dyn IndexBuilder>,
    crs: TargetCrs,
    archive_name: String,
}

impl ConversionOrchestrator {
    /// Create an orchestrator over explicit collaborators
    pub fn new(
        config: PipelineConfig,
        source: Arc<dyn VectorSource>,
        driver: Arc<dyn OutputDriver>,
        digester: Arc<dyn MetadataDigester>,
        index_builder: Arc<dyn IndexBuilder>,
    ) -> Self {
        Self {
            config,
            source,
            driver,
            digester,
            index_builder,
            crs: TargetCrs::wgs84(),
            archive_name: ARCHIVE_FILE.to_string(),
        }
    }

    /// KML in, GeoJSON out, `mapnik-index` for spatial indexes
    pub fn kml(config: &PreprocessorConfig) -> Self {
        let source: Arc<dyn VectorSource> = Arc::new(KmlSource::new());
        Self::new(
            config.pipeline.clone(),
            Arc::clone(&source),
            Arc::new(GeoJsonDriver::new()),
            Arc::new(FileDigester::new(source)),
            Arc::new(MapnikIndexBuilder::from_config(&config.index)),
        )
    }

    /// Name the archived copy of the input is written under
    pub fn with_archive_name(mut self, archive_name: impl Into<String>) -> Self {
        self.archive_name = archive_name.into();
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Convert `input` into `output_dir`
    pub async fn run(&self, input: &Path, output_dir: &Path) -> Result<()> {
        self.run_with_report(input, output_dir).await.map(|_| ())
    }

    /// Convert `input` into `output_dir` and return the run summary
    ///
    /// # Errors
    ///
    /// Returns the first failure of the run. Structural problems with the
    /// input surface as [`PreprocessError::InvalidInput`].
    pub async fn run_with_report(&self, input: &Path, output_dir: &Path) -> Result<RunReport> {
        let start_time = Instant::now();

        tracing::info!(
            input = %input.display(),
            output_dir = %output_dir.display(),
            driver = self.source.driver_name(),
            "Starting conversion"
        );

        tokio::fs::create_dir_all(output_dir).await.map_err(|e| {
            failed(
                Stage::Opening,
                PreprocessError::DirCreate {
                    path: output_dir.display().to_string(),
                    cause: e.to_string(),
                },
            )
        })?;

        // Parsing and layer writes are synchronous file I/O
        let source = Arc::clone(&self.source);
        let converter = LayerConverter::new(Arc::clone(&self.driver));
        let validator = LayerValidator::from_config(&self.config);
        let crs = self.crs.clone();
        let input_path = input.to_path_buf();
        let out_path = output_dir.to_path_buf();
        let conversion = tokio::task::spawn_blocking(move || {
            convert_dataset(
                source.as_ref(),
                &validator,
                &converter,
                &input_path,
                &out_path,
                &crs,
            )
        })
        .await
        .map_err(|e| {
            failed(
                Stage::Converting,
                PreprocessError::Internal(format!("conversion task failed: {e}")),
            )
        })?
        .map_err(|e| failed(Stage::of_conversion_error(&e), e))?;

        log_stage!(Stage::TotalZeroCheck.as_str(), features = conversion.features_written);
        if conversion.features_written == 0 {
            return Err(failed(Stage::TotalZeroCheck, PreprocessError::NoUsableFeatures));
        }

        log_stage!(Stage::MetadataCapture.as_str());
        let metadata_path = capture_metadata(self.digester.as_ref(), input, output_dir)
            .await
            .map_err(|e| failed(Stage::MetadataCapture, e))?;

        log_stage!(Stage::Indexing.as_str(), files = conversion.outputs.len());
        let scheduler =
            IndexScheduler::new(Arc::clone(&self.index_builder), self.config.index_worthy_size);
        let index_report = scheduler
            .build_indexes(&conversion.outputs)
            .await
            .map_err(|e| failed(Stage::Indexing, e))?;

        log_stage!(Stage::Archiving.as_str());
        let archive = archive_original(input, output_dir, &self.archive_name)
            .await
            .map_err(|e| failed(Stage::Archiving, e))?;

        log_stage!(Stage::Done.as_str());
        let report = RunReport {
            layers_total: conversion.layers_total,
            layers_converted: conversion.layers_converted,
            features_written: conversion.features_written,
            features_skipped: conversion.features_skipped,
            outputs: conversion.outputs,
            indexed: index_report.indexed,
            metadata_path,
            archive,
            duration: start_time.elapsed(),
        };
        report.log_summary();

        Ok(report)
    }
}

/// Open, validate and convert every layer, closing the dataset before return
fn convert_dataset(
    source: &dyn VectorSource,
    validator: &LayerValidator,
    converter: &LayerConverter,
    input: &Path,
    output_dir: &Path,
    crs: &TargetCrs,
) -> Result<ConversionOutcome> {
    log_stage!(Stage::Opening.as_str(), input = %input.display());
    let dataset = source.open(input).map_err(|e| match e {
        PreprocessError::InvalidInput(_) => e,
        other => PreprocessError::InvalidInput(InvalidInputError::OpenFailure(other.to_string())),
    })?;
    let guard = DatasetGuard::new(dataset);

    log_stage!(Stage::Validating.as_str(), layers = guard.dataset().layer_count());
    validator.validate(guard.dataset())?;

    log_stage!(Stage::Converting.as_str());
    let mut outcome = ConversionOutcome {
        layers_total: guard.dataset().layer_count(),
        ..Default::default()
    };
    let mut names = UniqueNames::new();

    for layer in guard.dataset().layers() {
        let safe = sanitize(layer.name());
        let stem = names.claim(&safe);
        if stem != safe {
            tracing::warn!(
                layer = %layer.name(),
                stem = %stem,
                "Sanitized layer name already in use, writing under a suffixed name"
            );
        }

        let output = converter.convert_as(layer, &stem, output_dir, crs)?;
        outcome.features_written += output.features_written;
        outcome.features_skipped += output.features_skipped;
        if let Some(path) = output.output_path() {
            outcome.layers_converted += 1;
            outcome.outputs.push(path.to_path_buf());
        }
    }

    guard.close();
    Ok(outcome)
}

fn failed(stage: Stage, error: PreprocessError) -> PreprocessError {
    tracing::error!(
        stage = %stage,
        kind = ?error.kind(),
        error = %error,
        "Conversion failed"
    );
    error
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::digest::MetadataRecord;
    use crate::adapters::vector::memory::MemorySource;
    use crate::domain::{SourceFeature, SourceLayer};
    use async_trait::async_trait;
    use geo::{point, Geometry};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    #[derive(Default)]
    struct CountingBuilder {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl IndexBuilder for CountingBuilder {
        fn name(&self) -> &str {
            "counting"
        }

        async fn build(&self, _layer_file: &Path) -> Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct StubDigester;

    #[async_trait]
    impl MetadataDigester for StubDigester {
        async fn digest(&self, _path: &Path) -> Result<MetadataRecord> {
            Ok(MetadataRecord::default())
        }
    }

    fn point_layer(name: &str, points: usize) -> SourceLayer {
        let features = (0..points)
            .map(|i| SourceFeature::new(Some(Geometry::Point(point!(x: i as f64, y: 0.0)))))
            .collect();
        SourceLayer::new(name, features)
    }

    fn orchestrator(
        source: Arc<MemorySource>,
        builder: Arc<CountingBuilder>,
    ) -> ConversionOrchestrator {
        ConversionOrchestrator::new(
            PipelineConfig {
                max_layer_count: 15,
                index_worthy_size: 0,
            },
            source,
            Arc::new(GeoJsonDriver::new()),
            Arc::new(StubDigester),
            builder,
        )
    }

    fn input_file(dir: &Path) -> PathBuf {
        let input = dir.join("input.kml");
        std::fs::write(&input, "<kml/>").unwrap();
        input
    }

    #[tokio::test]
    async fn test_colliding_sanitized_names_get_distinct_files() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("out");
        let source = Arc::new(MemorySource::new(vec![
            point_layer("a b", 1),
            point_layer("a_b", 2),
        ]));
        let builder = Arc::new(CountingBuilder::default());

        let report = orchestrator(source.clone(), builder.clone())
            .run_with_report(&input_file(dir.path()), &out)
            .await
            .unwrap();

        assert_eq!(
            report.outputs,
            vec![out.join("a_b.geojson"), out.join("a_b_2.geojson")]
        );
        assert_eq!(report.features_written, 3);
        assert_eq!(builder.calls.load(Ordering::SeqCst), 2);
        assert_eq!(source.closes(), 1);
    }

    #[tokio::test]
    async fn test_empty_and_filtered_layers_not_indexed() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("out");
        let source = Arc::new(MemorySource::new(vec![
            point_layer("empty", 0),
            SourceLayer::new("ghosts", vec![SourceFeature::new(None)]),
            point_layer("real", 2),
        ]));
        let builder = Arc::new(CountingBuilder::default());

        let report = orchestrator(source.clone(), builder.clone())
            .run_with_report(&input_file(dir.path()), &out)
            .await
            .unwrap();

        assert_eq!(report.layers_total, 3);
        assert_eq!(report.layers_converted, 1);
        assert_eq!(report.features_skipped, 1);
        assert_eq!(report.outputs, vec![out.join("real.geojson")]);
        assert!(!out.join("empty.geojson").exists());
        assert!(out.join("ghosts.geojson").exists());
        assert_eq!(builder.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_validation_failure_closes_dataset() {
        let dir = TempDir::new().unwrap();
        let source = Arc::new(MemorySource::new(vec![]));

        let err = orchestrator(source.clone(), Arc::new(CountingBuilder::default()))
            .run(&input_file(dir.path()), &dir.path().join("out"))
            .await
            .unwrap_err();

        assert!(err.is_invalid_input());
        assert_eq!(source.closes(), 1);
    }

    #[tokio::test]
    async fn test_custom_archive_name() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("out");
        let source = Arc::new(MemorySource::new(vec![point_layer("a", 1)]));

        let report = orchestrator(source, Arc::new(CountingBuilder::default()))
            .with_archive_name("original.kml")
            .run_with_report(&input_file(dir.path()), &out)
            .await
            .unwrap();

        assert_eq!(report.archive.path, out.join("original.kml"));
        assert!(!out.join("archived.kml").exists());
    }
}
