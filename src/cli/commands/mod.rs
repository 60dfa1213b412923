//! CLI command implementations
//!
//! This module contains all CLI command implementations. Each returns the
//! process exit code.

pub mod check;
pub mod convert;
pub mod init;
pub mod validate;
