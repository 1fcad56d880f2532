//! # Entity Validation
//!
//! Resolves an entity file's schema by the filename convention, compiles
//! the localized schema with the localized store behind a `$ref` retriever,
//! and validates the entity's content. Batch validation collects every
//! file's outcome in discovery order; one failing file never halts the run.

use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

use kbx_core::workspace::{find_entity_files, WorkspaceContext};
use kbx_core::entity::schema_name;

use crate::store::SchemaStore;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// One schema violation, with enough context to act on.
#[derive(Debug, Clone)]
pub struct ValidationDetail {
    /// Identifier of the schema that was violated.
    pub schema: String,
    /// JSON Pointer to the violating field.
    pub instance_path: String,
    /// Human-readable description of the violation.
    pub message: String,
}

impl std::fmt::Display for ValidationDetail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "schema={}, path={}: {}",
            self.schema, self.instance_path, self.message
        )
    }
}

/// Errors from the validation pipeline.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// A schema file could not be read or parsed as JSON.
    #[error("failed to load schema {path}: {reason}")]
    SchemaLoad {
        /// Path of the schema that failed to load.
        path: String,
        /// Human-readable reason.
        reason: String,
    },

    /// The entity file could not be read or parsed as YAML.
    #[error("failed to load entity {path}: {reason}")]
    EntityLoad {
        /// Path of the entity that failed to load.
        path: String,
        /// Human-readable reason.
        reason: String,
    },

    /// The entity filename does not encode a schema name.
    #[error("cannot determine schema for {0}: expected <name>.<SchemaName>.yml")]
    Undeterminable(String),

    /// No schema document exists for the resolved schema name.
    #[error("schema not found: {0}")]
    NotFound(String),

    /// The schema (or one of its references) could not be compiled.
    #[error("failed to compile schema {schema}: {reason}")]
    Compile {
        /// The schema name or identifier.
        schema: String,
        /// Human-readable reason, including unresolved reference targets.
        reason: String,
    },

    /// The entity parsed cleanly but violated its schema.
    #[error("{count} validation error(s) against {schema}")]
    Invalid {
        /// The violated schema's name.
        schema: String,
        /// Number of violations.
        count: usize,
        /// Individual violation details.
        details: Vec<ValidationDetail>,
    },

    /// I/O error during pipeline assembly.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// ---------------------------------------------------------------------------
// $ref retrieval over the store
// ---------------------------------------------------------------------------

/// Resolves `$ref` URIs by looking them up in the localized store. Every
/// relative reference has already been rewritten to a `file://` URI keyed
/// here, so retrieval is a pure map lookup — no filesystem or network
/// access during validation.
struct LocalStoreRetriever {
    schemas: std::collections::HashMap<String, Value>,
}

impl jsonschema::Retrieve for LocalStoreRetriever {
    fn retrieve(
        &self,
        uri: &jsonschema::Uri<&str>,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        let uri_str = uri.as_str();
        self.schemas
            .get(uri_str)
            .cloned()
            .ok_or_else(|| format!("schema not found for URI: {uri_str}").into())
    }
}

// ---------------------------------------------------------------------------
// EntityValidator
// ---------------------------------------------------------------------------

/// Validates entity files against the workspace's schema store.
///
/// Construct one per validation run: the store is assembled fresh so it
/// reflects the schema files currently on disk.
#[derive(Debug)]
pub struct EntityValidator {
    store: SchemaStore,
}

impl EntityValidator {
    /// Assemble a validator over `schema_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::SchemaLoad`] if a schema document exists but
    /// cannot be read or parsed.
    pub fn new(schema_dir: &Path) -> Result<Self, SchemaError> {
        let store = SchemaStore::load(schema_dir)?;
        tracing::debug!(
            schemas = store.len(),
            dir = %schema_dir.display(),
            "assembled schema store"
        );
        Ok(Self { store })
    }

    /// The store backing this validator.
    pub fn store(&self) -> &SchemaStore {
        &self.store
    }

    /// Validate one entity file.
    ///
    /// # Errors
    ///
    /// - [`SchemaError::Undeterminable`] when the filename encodes no
    ///   schema name.
    /// - [`SchemaError::NotFound`] when no schema document matches the
    ///   resolved name.
    /// - [`SchemaError::EntityLoad`] when the file is unreadable or not
    ///   parseable YAML.
    /// - [`SchemaError::Compile`] when the schema or one of its localized
    ///   references cannot be resolved — a missing subtype schema surfaces
    ///   here, never as a silent pass.
    /// - [`SchemaError::Invalid`] carrying every violation found.
    pub fn validate_entity(&self, path: &Path) -> Result<(), SchemaError> {
        let filename = path
            .file_name()
            .map(|f| f.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let name = schema_name(&filename)
            .ok_or_else(|| SchemaError::Undeterminable(filename.clone()))?
            .to_string();

        let schema = self
            .store
            .by_schema_name(&name)
            .ok_or_else(|| SchemaError::NotFound(name.clone()))?;

        let content = std::fs::read_to_string(path).map_err(|e| SchemaError::EntityLoad {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let value: Value =
            serde_yaml::from_str(&content).map_err(|e| SchemaError::EntityLoad {
                path: path.display().to_string(),
                reason: format!("YAML parse error: {e}"),
            })?;

        let retriever = LocalStoreRetriever {
            schemas: self.store.documents().clone(),
        };
        let validator = jsonschema::options()
            .with_draft(jsonschema::Draft::Draft7)
            .with_retriever(retriever)
            .build(schema)
            .map_err(|e| SchemaError::Compile {
                schema: name.clone(),
                reason: e.to_string(),
            })?;

        let details: Vec<ValidationDetail> = validator
            .iter_errors(&value)
            .map(|err| ValidationDetail {
                schema: name.clone(),
                instance_path: err.instance_path.to_string(),
                message: err.to_string(),
            })
            .collect();

        if details.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::Invalid {
                schema: name,
                count: details.len(),
                details,
            })
        }
    }
}

// ---------------------------------------------------------------------------
// Batch validation
// ---------------------------------------------------------------------------

/// The outcome of validating one entity file.
#[derive(Debug)]
pub struct EntityOutcome {
    /// The entity file that was validated.
    pub path: PathBuf,
    /// `Ok` on pass; the pipeline error on fail.
    pub result: Result<(), SchemaError>,
}

impl EntityOutcome {
    /// True when the entity passed validation.
    pub fn passed(&self) -> bool {
        self.result.is_ok()
    }
}

/// Every file's outcome for one run, in discovery order.
#[derive(Debug)]
pub struct ValidationReport {
    /// Per-file outcomes, in discovery order.
    pub outcomes: Vec<EntityOutcome>,
}

impl ValidationReport {
    /// Total number of entity files examined.
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    /// Number of entities that passed.
    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed()).count()
    }

    /// Number of entities that failed.
    pub fn failed(&self) -> usize {
        self.total() - self.passed()
    }
}

/// Validate every entity file in the workspace.
///
/// Assembles a fresh store, then validates each discovered entity in
/// order. A failing file is recorded and the batch continues.
///
/// # Errors
///
/// Returns [`SchemaError::SchemaLoad`] only when the store itself cannot
/// be assembled; per-entity failures live in the report.
pub fn validate_workspace(ctx: &WorkspaceContext) -> Result<ValidationReport, SchemaError> {
    let validator = EntityValidator::new(ctx.schema_dir())?;
    let mut outcomes = Vec::new();
    for path in find_entity_files(ctx.root()) {
        let result = validator.validate_entity(&path);
        outcomes.push(EntityOutcome { path, result });
    }
    Ok(ValidationReport { outcomes })
}
