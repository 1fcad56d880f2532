//! # Workspace Context & Entity Discovery
//!
//! [`WorkspaceContext`] is the explicit configuration value threaded through
//! every entry point: the workspace root holding entity files and the schema
//! directory holding `<SchemaName>.json` documents. It replaces ambient
//! mutable path state with a value the caller owns.
//!
//! Discovery tolerates partial filesystem visibility: a directory that
//! cannot be listed is skipped with a warning, never an error. A single bad
//! subtree must not abort browsing, searching, or validation.

use std::path::{Path, PathBuf};

use crate::entity::is_entity_file;
use crate::error::KbxError;

/// Name of the schema directory that sits beside the workspace root.
pub const SCHEMA_DIR_NAME: &str = "schema";

/// Explicit workspace configuration: the entity root and schema directory.
///
/// Constructed once at startup and passed by reference into every
/// operation. The schema directory defaults to the `schema/` sibling of the
/// root; callers with a different layout override it via
/// [`WorkspaceContext::with_schema_dir`].
#[derive(Debug, Clone)]
pub struct WorkspaceContext {
    root: PathBuf,
    schema_dir: PathBuf,
}

impl WorkspaceContext {
    /// Create a context for the given workspace root.
    ///
    /// # Errors
    ///
    /// Returns [`KbxError::NotFound`] if `root` is not an existing
    /// directory. An invalid root is a configuration problem, not a
    /// recoverable scan condition.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, KbxError> {
        let root = root.into();
        if !root.is_dir() {
            return Err(KbxError::NotFound(format!(
                "workspace root is not a directory: {}",
                root.display()
            )));
        }
        let schema_dir = match root.parent() {
            Some(parent) => parent.join(SCHEMA_DIR_NAME),
            None => root.join(SCHEMA_DIR_NAME),
        };
        Ok(Self { root, schema_dir })
    }

    /// Replace the default schema directory.
    #[must_use]
    pub fn with_schema_dir(mut self, schema_dir: impl Into<PathBuf>) -> Self {
        self.schema_dir = schema_dir.into();
        self
    }

    /// The workspace root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The directory holding `<SchemaName>.json` schema documents.
    pub fn schema_dir(&self) -> &Path {
        &self.schema_dir
    }
}

/// Recursively collect every entity file under `root`.
///
/// Entries are visited in name order within each directory, so the result
/// is deterministic for a given tree. Directories that cannot be listed are
/// skipped with a warning.
pub fn find_entity_files(root: &Path) -> Vec<PathBuf> {
    let mut results = Vec::new();
    walk_entities(root, &mut results);
    results
}

fn walk_entities(dir: &Path, acc: &mut Vec<PathBuf>) {
    let mut entries = match sorted_entries(dir) {
        Some(entries) => entries,
        None => return,
    };
    for path in entries.drain(..) {
        if path.is_dir() {
            walk_entities(&path, acc);
        } else if is_entity_file(&path) {
            acc.push(path);
        }
    }
}

/// List a directory's entries sorted by file name.
///
/// Returns `None` if the directory cannot be listed; callers treat that as
/// an empty directory. Entries that fail to resolve individually are
/// dropped the same way.
pub fn sorted_entries(dir: &Path) -> Option<Vec<PathBuf>> {
    let reader = match std::fs::read_dir(dir) {
        Ok(reader) => reader,
        Err(e) => {
            tracing::warn!(dir = %dir.display(), error = %e, "failed to list directory");
            return None;
        }
    };
    let mut entries: Vec<PathBuf> = Vec::new();
    for entry in reader {
        match entry {
            Ok(e) => entries.push(e.path()),
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "failed to read directory entry");
            }
        }
    }
    entries.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Some(entries)
}
