#![deny(missing_docs)]

//! # kbx-core — Foundational Types for the kbx Workspace Tools
//!
//! This crate defines the types every other crate in the workspace depends
//! on. It has no internal crate dependencies — only `thiserror` and
//! `tracing` from the external ecosystem.
//!
//! ## Design Principles
//!
//! 1. **Explicit configuration.** The workspace root and schema directory
//!    travel together in a [`WorkspaceContext`] that is passed into every
//!    entry point. There is no ambient global state.
//!
//! 2. **One naming convention.** Entity files are named
//!    `<name>.<SchemaName>.yml`. The convention lives in [`entity`] and is
//!    consumed by browsing, search, and validation alike.
//!
//! 3. **[`KbxError`] hierarchy.** Structured errors with `thiserror` — no
//!    `Box<dyn Error>`, no `.unwrap()` outside tests. Filesystem trouble
//!    during browsing or searching is recovered locally; only configuration
//!    problems surface as process-level failures.

pub mod entity;
pub mod error;
pub mod workspace;

// Re-export primary types at crate root for ergonomic imports.
pub use entity::{is_entity_file, schema_name, ENTITY_EXTENSION};
pub use error::KbxError;
pub use workspace::{find_entity_files, WorkspaceContext};
