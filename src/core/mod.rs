//! Core pipeline logic for the KML preprocessor.
//!
//! # Modules
//!
//! - [`convert`] - Validation, name sanitization and per-layer conversion
//! - [`index`] - Concurrent spatial index scheduling
//! - [`provenance`] - Metadata capture, checksums and archival of the original
//! - [`pipeline`] - Orchestration of a run and the [`Preprocessor`](pipeline::Preprocessor) trait
//!
//! # Conversion Workflow
//!
//! 1. **Open**: Create the output directory and open the source document
//! 2. **Validate**: Reject documents with no layers, too many layers or duplicate names
//! 3. **Convert**: Write one GeoJSON file per non-empty layer
//! 4. **Check**: Fail if no usable feature survived in any layer
//! 5. **Metadata**: Digest the original and write `metadata.json`
//! 6. **Index**: Build spatial indexes for large outputs, concurrently
//! 7. **Archive**: Copy the original into the output directory
//!
//! # Example
//!
//! ```rust,no_run
//! use kml_preprocessor::config::load_config_or_default;
//! use kml_preprocessor::core::pipeline::ConversionOrchestrator;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config_or_default("kml-preprocessor.toml")?;
//! let orchestrator = ConversionOrchestrator::kml(&config);
//! let report = orchestrator
//!     .run_with_report(Path::new("places.kml"), Path::new("out"))
//!     .await?;
//! println!("{} features written", report.features_written);
//! # Ok(())
//! # }
//! ```

pub mod convert;
pub mod index;
pub mod pipeline;
pub mod provenance;
