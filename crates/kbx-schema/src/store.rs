//! # Schema Store
//!
//! Loads every schema document from the schema directory and its
//! `subtypes/` subdirectory into one mapping, keyed four ways: by filename
//! (`Person.json`), by subtype-relative path (`subtypes/address.json`), by
//! the document's declared `$id` when present, and by the synthesized local
//! `file://` URI the localized cross-references resolve through. Every
//! stored document is stored in localized form.
//!
//! A store is assembled fresh for each validation run and discarded
//! afterwards, so it always reflects the current on-disk definitions.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::localize::localize_refs;
use crate::validate::SchemaError;

/// Subdirectory of the schema dir holding shared sub-schemas.
pub const SUBTYPES_DIR_NAME: &str = "subtypes";

/// A mapping from schema identifier to localized schema document.
#[derive(Debug, Clone)]
pub struct SchemaStore {
    schema_dir: PathBuf,
    base_uri: String,
    schemas: HashMap<String, Value>,
}

impl SchemaStore {
    /// Assemble a store from `schema_dir`.
    ///
    /// Loads every `.json` file directly in `schema_dir` and in its
    /// `subtypes/` subdirectory. A missing schema directory yields an empty
    /// store; individual schemas are only reported missing at validation
    /// time.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::SchemaLoad`] if a schema file exists but
    /// cannot be read or parsed as JSON.
    pub fn load(schema_dir: &Path) -> Result<Self, SchemaError> {
        let base_uri = base_uri_for(schema_dir);
        let mut store = Self {
            schema_dir: schema_dir.to_path_buf(),
            base_uri,
            schemas: HashMap::new(),
        };

        if !schema_dir.is_dir() {
            tracing::warn!(dir = %schema_dir.display(), "schema directory not found; store is empty");
            return Ok(store);
        }

        store.load_dir(schema_dir, None)?;
        let subtypes = schema_dir.join(SUBTYPES_DIR_NAME);
        if subtypes.is_dir() {
            store.load_dir(&subtypes, Some(SUBTYPES_DIR_NAME))?;
        }
        Ok(store)
    }

    fn load_dir(&mut self, dir: &Path, prefix: Option<&str>) -> Result<(), SchemaError> {
        let Some(entries) = kbx_core::workspace::sorted_entries(dir) else {
            return Ok(());
        };
        for path in entries {
            if path.is_dir() || path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let content =
                std::fs::read_to_string(&path).map_err(|e| SchemaError::SchemaLoad {
                    path: path.display().to_string(),
                    reason: e.to_string(),
                })?;
            let raw: Value =
                serde_json::from_str(&content).map_err(|e| SchemaError::SchemaLoad {
                    path: path.display().to_string(),
                    reason: e.to_string(),
                })?;
            let localized = localize_refs(&raw, &self.base_uri);

            let filename = path
                .file_name()
                .map(|f| f.to_string_lossy().into_owned())
                .unwrap_or_default();
            let rel_key = match prefix {
                Some(prefix) => format!("{prefix}/{filename}"),
                None => filename,
            };

            if let Some(id) = raw.get("$id").and_then(|v| v.as_str()) {
                self.schemas.insert(id.to_string(), localized.clone());
            }
            self.schemas
                .insert(format!("{}{rel_key}", self.base_uri), localized.clone());
            self.schemas.insert(rel_key, localized);
        }
        Ok(())
    }

    /// The directory the store was assembled from.
    pub fn schema_dir(&self) -> &Path {
        &self.schema_dir
    }

    /// The `file://` base URI relative references are localized against.
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// Number of distinct identifiers registered.
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// True when no schemas were loaded.
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Look up a schema by any of its identifiers.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.schemas.get(key)
    }

    /// Look up the schema for a logical name: `Person` resolves through
    /// `Person.json`.
    pub fn by_schema_name(&self, name: &str) -> Option<&Value> {
        self.schemas.get(&format!("{name}.json"))
    }

    /// The full identifier → document mapping, for `$ref` retrieval.
    pub fn documents(&self) -> &HashMap<String, Value> {
        &self.schemas
    }
}

/// The `file://` URI of a schema directory, with a trailing slash so
/// relative references concatenate cleanly.
pub fn base_uri_for(schema_dir: &Path) -> String {
    let abs = if schema_dir.is_absolute() {
        schema_dir.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(schema_dir))
            .unwrap_or_else(|_| schema_dir.to_path_buf())
    };
    format!("file://{}/", abs.display())
}
