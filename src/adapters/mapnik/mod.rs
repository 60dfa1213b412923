//! Mapnik spatial index adapter

pub mod index;

pub use index::{IndexBuilder, MapnikIndexBuilder};
