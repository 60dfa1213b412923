//! Layer conversion
//!
//! Validation of the opened dataset, name sanitization and the per-layer
//! copy from source features to an output document.

pub mod filter;
pub mod layer;
pub mod sanitize;
pub mod validator;

pub use filter::is_usable;
pub use layer::{LayerConverter, LayerOutput};
pub use sanitize::{sanitize, UniqueNames};
pub use validator::{duplicate_layer_names, LayerValidator};
