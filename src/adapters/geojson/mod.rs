//! GeoJSON output adapter

pub mod writer;

pub use writer::{GeoJsonDocument, GeoJsonDriver};
