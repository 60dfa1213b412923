// KML Preprocessor - KML to GeoJSON conversion pipeline
// Copyright (c) 2025 KML Preprocessor Contributors
// Licensed under the MIT License

//! # KML Preprocessor
//!
//! Converts a single KML document into one GeoJSON file per layer, ready to
//! be served as map tiles, and records where the data came from.
//!
//! ## Overview
//!
//! A run of the pipeline:
//! - **Validates** the document's layer structure before writing anything
//! - **Converts** every non-empty layer into `<layer>.geojson` in WGS84
//! - **Indexes** large outputs with `mapnik-index`, concurrently
//! - **Records** a `metadata.json` digest and an `archived.kml` copy of the input
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Pipeline logic (convert, index, provenance, orchestration)
//! - [`adapters`] - External integrations (KML reader, GeoJSON writer, mapnik-index)
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use kml_preprocessor::config::PreprocessorConfig;
//! use kml_preprocessor::core::pipeline::{KmlPreprocessor, Preprocessor};
//! use kml_preprocessor::domain::FileInfo;
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let preprocessor = KmlPreprocessor::from_config(&PreprocessorConfig::default());
//!
//!     let input = Path::new("places.kml");
//!     if preprocessor.accepts(&FileInfo::from_path(input)?) {
//!         preprocessor.run(input, Path::new("out")).await?;
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Every run ends in a single [`domain::PreprocessError`]. Structural problems
//! with the input are grouped under [`domain::InvalidInputError`] so a caller
//! can tell a rejected file from a failed run:
//!
//! ```rust,no_run
//! use kml_preprocessor::core::pipeline::ConversionOrchestrator;
//! use kml_preprocessor::config::PreprocessorConfig;
//! use std::path::Path;
//!
//! # async fn example() {
//! let orchestrator = ConversionOrchestrator::kml(&PreprocessorConfig::default());
//! match orchestrator.run(Path::new("places.kml"), Path::new("out")).await {
//!     Ok(()) => println!("converted"),
//!     Err(e) if e.is_invalid_input() => println!("rejected: {e}"),
//!     Err(e) => println!("failed: {e}"),
//! }
//! # }
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
