//! External integrations
//!
//! Everything the pipeline treats as a collaborator lives here behind a trait:
//!
//! - [`vector`] - reader/writer traits ([`VectorSource`](vector::VectorSource),
//!   [`OutputDriver`](vector::OutputDriver))
//! - [`kml`] - KML reader
//! - [`geojson`] - GeoJSON writer
//! - [`mapnik`] - `mapnik-index` spatial index builder
//! - [`digest`] - metadata digest of the original file

pub mod digest;
pub mod geojson;
pub mod kml;
pub mod mapnik;
pub mod vector;
