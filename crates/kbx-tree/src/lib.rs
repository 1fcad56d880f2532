#![deny(missing_docs)]

//! # kbx-tree — Lazy Workspace Directory Model
//!
//! A session-local, lazily materialized view over the filesystem. Directory
//! nodes start *Unloaded* with a single synthetic placeholder child, so an
//! unexpanded directory is always distinguishable from a genuinely empty,
//! already-expanded one. Expansion is a one-way `Unloaded → Loaded`
//! transition.
//!
//! Two projections exist over the same node type:
//!
//! - [`WorkspaceTree::build`] materializes one level and defers the rest.
//! - [`WorkspaceTree::build_filtered`] constructs only the ancestor chains
//!   of a set of matched files, fully loaded up front.
//!
//! Nodes are transient: built when a root is opened or a filtered rebuild
//! runs, mutated only by expansion, discarded at session end. A directory
//! that cannot be listed yields zero children rather than an error —
//! navigation tolerates partial filesystem visibility.

pub mod model;

pub use model::{NodeKind, WorkspaceNode, WorkspaceTree};
