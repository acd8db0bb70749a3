//! Error types for rvprobe operations.
//!
//! This module defines [`ProbeError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - A failed `riscv_hwprobe` call is fatal for the run (`QueryFailed`)
//! - A missing base behavior or extension is a report outcome, not an error
//! - An unparsable kernel release is logged and degraded, never returned here
//! - Use `anyhow::Error` (via `ProbeError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for rvprobe operations.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// The capability-query syscall reported an error.
    #[error("sys_riscv_hwprobe failed: {source}")]
    QueryFailed {
        #[source]
        source: std::io::Error,
    },

    /// The kernel answered a different key than the one requested.
    #[error("hwprobe answered key {returned} where key {requested} was requested")]
    UnexpectedKey { requested: i64, returned: i64 },

    /// The same key was requested twice in one query.
    #[error("hwprobe key {key} requested more than once")]
    DuplicateKey { key: i64 },

    /// Profile file not found at the given location.
    #[error("Profile not found: {path}")]
    ProfileNotFound { path: PathBuf },

    /// Failed to parse a profile file.
    #[error("Failed to parse profile at {path}: {message}")]
    ProfileParseError { path: PathBuf, message: String },

    /// Profile parsed but its contents are invalid.
    #[error("Invalid profile: {message}")]
    ProfileValidationError { message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for rvprobe operations.
pub type Result<T> = std::result::Result<T, ProbeError>;
