//! # Entity Filename Convention
//!
//! Entity files encode their schema in the filename:
//! `<name>.<SchemaName>.yml` pairs with `<SchemaName>.json` in the schema
//! directory. These helpers are the single place that convention lives;
//! browsing, search, and validation all consume them.

use std::path::Path;

/// File extension of entity files, without the leading dot.
pub const ENTITY_EXTENSION: &str = "yml";

/// Returns true if `path` names an entity file by extension.
pub fn is_entity_file(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(ENTITY_EXTENSION)
}

/// Derive the schema name from an entity filename.
///
/// The schema name is the second-to-last dot-delimited segment:
/// `crispus-attucks.Person.yml` resolves to `Person`. Filenames with fewer
/// than three segments carry no schema name and yield `None`.
pub fn schema_name(filename: &str) -> Option<&str> {
    let parts: Vec<&str> = filename.split('.').collect();
    if parts.len() >= 3 {
        Some(parts[parts.len() - 2])
    } else {
        None
    }
}
