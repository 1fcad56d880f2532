#![deny(missing_docs)]

//! # kbx-schema — Entity Validation Pipeline
//!
//! Maps entity files to schema documents by the filename convention,
//! assembles a schema store from the workspace's schema directory, rewrites
//! relative cross-references to local `file://` identifiers, and validates
//! entity content with the `jsonschema` crate (Draft 7).
//!
//! ## Design
//!
//! The store is rebuilt fresh on every validation run so it always reflects
//! the current on-disk schema definitions — no caching across runs.
//! Localization is applied uniformly to every stored schema and to the
//! schema under validation, so relative references resolve against one
//! consistent base regardless of which file declared them. The pipeline is
//! responsible for reference resolution and store assembly only; structural
//! type-checking is the `jsonschema` crate's job.

pub mod localize;
pub mod store;
pub mod validate;

pub use localize::localize_refs;
pub use store::SchemaStore;
pub use validate::{
    validate_workspace, EntityOutcome, EntityValidator, SchemaError, ValidationDetail,
    ValidationReport,
};
