//! Error types for element management.
//!
//! This module defines [`ElementsError`], the primary error type used
//! throughout the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `ElementsError` for domain failures callers need to tell apart
//!   (missing element, clone failure, missing directory on uninstall)
//! - Low-level fetchers return `anyhow::Result`; the engine maps those onto
//!   domain variants, anything left over travels as `ElementsError::Other`
//! - Build failures inside a best-effort install are recorded in the
//!   install report rather than raised

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for element operations.
#[derive(Debug, Error)]
pub enum ElementsError {
    /// A mandatory setting was not supplied.
    #[error("Missing configuration: {key} is not set")]
    ConfigMissing { key: String },

    /// Failed to parse the settings file or a setting value.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Requested element is not in the catalog.
    #[error("{element} not found")]
    ElementNotFound { element: String },

    /// Catalog source unreachable or answered with a non-success status.
    #[error("Element catalog unavailable at {location}: {message}")]
    CatalogUnavailable { location: String, message: String },

    /// Catalog source answered 404.
    #[error("Elements list file not found at {location}")]
    CatalogMissing { location: String },

    /// Catalog payload could not be parsed.
    #[error("Malformed element catalog: {message}")]
    CatalogMalformed { message: String },

    /// Version-control clone exited non-zero.
    #[error("Cloning of repository for {element} failed: {message}")]
    CloneFailed { element: String, message: String },

    /// Resetting a fresh clone to the requested commit failed.
    #[error("Resetting {element} to commit {commit} failed: {message}")]
    CommitResetFailed {
        element: String,
        commit: String,
        message: String,
    },

    /// Build of an element failed under a fail-fast policy.
    #[error("Building {element} failed: {message}")]
    BuildFailed { element: String, message: String },

    /// Element directory is absent during uninstall.
    #[error("{element} not found in {}", dir.display())]
    DirectoryMissing { element: String, dir: PathBuf },

    /// No README could be located for an element.
    #[error("No information found on {element}")]
    ElementInfoNotFound { element: String },

    /// Tests were requested for an element that is not registered.
    #[error("No tests found on {element}")]
    TestsNotFound { element: String },

    /// The registry tool failed.
    #[error("sst-register failed ({action}): {message}")]
    RegistryCommandFailed { action: String, message: String },

    /// A subprocess could not be started.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ElementsError {
    /// Process exit code the CLI reports for this error.
    ///
    /// Clone failures and missing directories keep the status `2` the
    /// installer has always used for them; everything else exits `1`.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::CloneFailed { .. } | Self::DirectoryMissing { .. } => 2,
            _ => 1,
        }
    }
}

/// Result type alias for element operations.
pub type Result<T> = std::result::Result<T, ElementsError>;
