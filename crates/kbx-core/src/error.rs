//! # Error Hierarchy
//!
//! Structured error types for the navigation and search paths, built with
//! `thiserror`. No `Box<dyn Error>`, no `.unwrap()` outside tests.
//!
//! Recoverable conditions (an unreadable file in the middle of a scan, a
//! directory that vanished mid-traversal) are handled where they occur and
//! never reach this type. The validation pipeline carries its own richer
//! taxonomy in the schema crate.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for the kbx workspace tools.
#[derive(Error, Debug)]
pub enum KbxError {
    /// A directory, file, or schema that was asked for does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// A file or directory exists but could not be read.
    #[error("cannot read {path}: {reason}")]
    Unreadable {
        /// The path that failed to read.
        path: PathBuf,
        /// Human-readable reason for the failure.
        reason: String,
    },
}
