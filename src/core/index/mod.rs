//! Spatial index stage

pub mod scheduler;

pub use scheduler::{IndexReport, IndexScheduler};
