//! Error types for graft
//!
//! Domain-specific error types using thiserror.

use std::path::PathBuf;
use thiserror::Error;

/// Project configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Manifest not found
    #[error("No graft.toml found at '{path}'. Create one to describe your project layout.")]
    NotFound { path: PathBuf },

    /// Manifest parse error
    #[error("Failed to parse '{path}': {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// IO error while reading the manifest
    #[error("IO error for '{path}': {error}")]
    Io { path: PathBuf, error: String },
}

/// Package manager errors
#[derive(Error, Debug)]
pub enum ManagerError {
    /// Manager binary is not on PATH
    #[error("Package manager '{name}' was not found on PATH")]
    NotFound { name: String },

    /// The install command exited with a failure
    #[error("'{command}' failed: {detail}")]
    CommandFailed { command: String, detail: String },

    /// The manager process could not be spawned
    #[error("Failed to run '{command}': {error}")]
    Io { command: String, error: String },
}

/// Schematic execution errors
#[derive(Error, Debug)]
pub enum SchematicError {
    /// The generator reported a failure, optionally with a message
    #[error("Schematic execution failed{}", message.as_deref().map_or_else(String::new, |m| format!(": {m}")))]
    ExecutionFailed { message: Option<String> },

    /// The schematics runner could not be spawned
    #[error("Failed to run '{command}': {error}")]
    Io { command: String, error: String },
}

/// Project selection errors
#[derive(Error, Debug)]
pub enum SelectionError {
    /// Cannot prompt without a terminal
    #[error("Cannot prompt for a project in non-interactive mode. Pass --project to choose one.")]
    NotInteractive,

    /// The answer matched none of the offered projects
    #[error("'{answer}' is not one of the offered projects")]
    UnknownChoice { answer: String },

    /// Reading the answer failed
    #[error("Failed to read selection: {0}")]
    Io(String),
}

/// Errors surfaced by the add operation
#[derive(Error, Debug)]
pub enum AddError {
    /// A required input was not supplied
    #[error("Required input '{name}' was not provided")]
    MissingInput { name: String },

    /// Package installation failed
    #[error("Installation failed: {0}")]
    Install(#[from] ManagerError),

    /// Project selection failed
    #[error("Project selection failed: {0}")]
    Selection(#[from] SelectionError),

    /// Schematic execution failed
    #[error("{0}")]
    Generation(#[from] SchematicError),
}
