//! KML source adapter
//!
//! Reads KML 2.2 documents into [`SourceLayer`](crate::domain::SourceLayer)s.

pub mod charset;
pub mod parser;
pub mod source;

pub use charset::decode_document;
pub use parser::parse_kml;
pub use source::{KmlDataset, KmlSource};
