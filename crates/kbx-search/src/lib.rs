#![deny(missing_docs)]

//! # kbx-search — Property-Aware Text Search
//!
//! Line-oriented search over entity files. The scanner is intentionally an
//! approximation of YAML structure: lines are split once on the first
//! key/value delimiter, a key with an empty value becomes the *context* for
//! the indented entries that follow, and list items inherit the last
//! remembered context. Multi-colon lines, multi-line scalars, and inline
//! nested structures are not structurally parsed — that is the contract,
//! not a shortcut to fix.
//!
//! Also provides [`highlight`] (non-overlapping case-insensitive marking of
//! every term occurrence) and [`format_content`] (recursive rendering of a
//! loaded document for display), both consumed by the CLI surface.

pub mod format;
pub mod highlight;
pub mod scan;

pub use format::format_content;
pub use highlight::{highlight, match_spans};
pub use scan::{locate, scan_file, scan_workspace, FileMatches, MatchRecord};
