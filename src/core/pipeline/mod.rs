//! Conversion pipeline
//!
//! [`ConversionOrchestrator`] drives one run; [`KmlPreprocessor`] exposes it
//! through the [`Preprocessor`] trait.

pub mod guard;
pub mod orchestrator;
pub mod preprocessor;
pub mod report;
pub mod stage;

pub use guard::DatasetGuard;
pub use orchestrator::ConversionOrchestrator;
pub use preprocessor::{accepts, KmlPreprocessor, Preprocessor};
pub use report::RunReport;
pub use stage::Stage;
