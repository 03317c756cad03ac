//! Core orchestration logic
//!
//! # Submodules
//!
//! - [`specifier`] - Dependency specifier parsing
//! - [`input`] - Named option/argument pairs from the command layer
//! - [`config`] - Project manifest and source-root resolution
//! - [`add`] - Add orchestration
//! - [`info`] - Environment report

pub mod add;
pub mod config;
pub mod info;
pub mod input;
pub mod specifier;
