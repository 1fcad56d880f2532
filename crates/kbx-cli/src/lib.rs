//! # kbx-cli — Command-Line Interface for kbx Workspaces
//!
//! Provides the `kbx` binary over the navigation, search, and validation
//! engines.
//!
//! ## Subcommands
//!
//! - `kbx browse` — Print the workspace tree, optionally filtered to the
//!   ancestor chains of files matching a term.
//! - `kbx show` — Render one entity file with optional term highlighting.
//! - `kbx search` — Property-aware text search across all entity files.
//! - `kbx validate` — Validate every entity against its schema.
//!
//! Global options (`--workspace`, `--schema-dir`, `-v`) are resolved once
//! in `main` into a [`kbx_core::WorkspaceContext`] that every handler
//! receives explicitly.

pub mod browse;
pub mod search;
pub mod show;
pub mod validate;

use std::path::Path;

use colored::Colorize;
use kbx_search::match_spans;

/// Render `path` for display: relative to `base` by default, absolute when
/// `full` is set or the path is not under `base`.
pub fn display_path(path: &Path, base: &Path, full: bool) -> String {
    if full {
        return path.display().to_string();
    }
    path.strip_prefix(base)
        .unwrap_or(path)
        .display()
        .to_string()
}

/// Paint every occurrence of `term` in `text` bold red, preserving the
/// surrounding text as-is. Coloring is delegated to `colored`, which
/// respects tty detection and `NO_COLOR`.
pub fn paint_matches(text: &str, term: &str) -> String {
    let spans = match_spans(text, term);
    if spans.is_empty() {
        return text.to_string();
    }
    let mut out = String::new();
    let mut cursor = 0;
    for span in spans {
        out.push_str(&text[cursor..span.start]);
        out.push_str(&text[span.clone()].red().bold().to_string());
        cursor = span.end;
    }
    out.push_str(&text[cursor..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn display_path_relative_by_default() {
        let base = PathBuf::from("/ws");
        let path = PathBuf::from("/ws/people/a.Person.yml");
        assert_eq!(display_path(&path, &base, false), "people/a.Person.yml");
    }

    #[test]
    fn display_path_absolute_when_requested() {
        let base = PathBuf::from("/ws");
        let path = PathBuf::from("/ws/a.Person.yml");
        assert_eq!(display_path(&path, &base, true), "/ws/a.Person.yml");
    }

    #[test]
    fn display_path_outside_base_falls_back_to_absolute() {
        let base = PathBuf::from("/ws");
        let path = PathBuf::from("/elsewhere/a.Person.yml");
        assert_eq!(display_path(&path, &base, false), "/elsewhere/a.Person.yml");
    }

    #[test]
    fn paint_matches_no_term_occurrence_leaves_text() {
        assert_eq!(paint_matches("plain", "zzz"), "plain");
    }
}
