//! # Term Location & Line-Heuristic Scanning
//!
//! [`locate`] answers "which entity files mention this term at all";
//! [`scan_file`] answers "where, and under which property". The scan is a
//! deliberate line-level approximation of YAML: one split on the first
//! colon, a key with an empty value remembered as context for the indented
//! entries below it, list items inheriting that context. Lines with
//! multiple colons, multi-line scalars, and inline nesting are not parsed
//! structurally; downstream expectations are defined against exactly this
//! behavior.

use std::path::{Path, PathBuf};

use kbx_core::{find_entity_files, KbxError};

use crate::highlight::fold;

/// One text hit: where it was found and under which property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRecord {
    /// The entity file containing the hit.
    pub path: PathBuf,
    /// 1-based line number.
    pub line: usize,
    /// The last key seen with an empty value before this hit, if any.
    pub property: Option<String>,
    /// The matched text (the value or list item, trimmed).
    pub text: String,
}

/// All hits within one file, in ascending line order.
#[derive(Debug, Clone)]
pub struct FileMatches {
    /// The scanned entity file.
    pub path: PathBuf,
    /// Hits in ascending line-number order.
    pub matches: Vec<MatchRecord>,
}

/// Absolute paths of every entity file under `root` whose raw content
/// contains `term`, case-insensitively, in traversal order.
///
/// Unreadable files are skipped with a warning; one bad file never aborts
/// the batch.
pub fn locate(root: &Path, term: &str) -> Vec<PathBuf> {
    let needle = fold(term);
    let mut matched = Vec::new();
    for path in find_entity_files(root) {
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!(file = %path.display(), error = %e, "skipping unreadable file");
                continue;
            }
        };
        if fold(&content).contains(&needle) {
            matched.push(path);
        }
    }
    matched
}

/// Scan one entity file for `term`, producing hits in line order.
///
/// # Errors
///
/// Returns [`KbxError::Unreadable`] if the file cannot be read. Callers
/// running a batch are expected to skip and continue.
pub fn scan_file(path: &Path, term: &str) -> Result<Vec<MatchRecord>, KbxError> {
    let content = std::fs::read_to_string(path).map_err(|e| KbxError::Unreadable {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    Ok(scan_lines(path, &content, term))
}

/// The line heuristic itself, split out so it can be exercised without
/// touching the filesystem.
fn scan_lines(path: &Path, content: &str, term: &str) -> Vec<MatchRecord> {
    let needle = fold(term);
    let mut matches = Vec::new();
    let mut last_key: Option<String> = None;

    for (idx, line) in content.lines().enumerate() {
        let lineno = idx + 1;
        let stripped = line.trim();
        if stripped.is_empty() || stripped.starts_with('#') {
            continue;
        }
        if let Some((key, value)) = line.split_once(':') {
            let key = key.trim();
            let value = value.trim();
            if value.is_empty() {
                // A bare key opens a context for the indented entries below.
                last_key = Some(key.to_string());
            } else {
                if fold(value).contains(&needle) {
                    matches.push(MatchRecord {
                        path: path.to_path_buf(),
                        line: lineno,
                        property: Some(key.to_string()),
                        text: value.to_string(),
                    });
                }
                last_key = None;
            }
        } else if let Some(item) = stripped.strip_prefix("- ") {
            let item = item.trim();
            if fold(item).contains(&needle) {
                matches.push(MatchRecord {
                    path: path.to_path_buf(),
                    line: lineno,
                    property: last_key.clone(),
                    text: item.to_string(),
                });
            }
        }
    }
    matches
}

/// Scan every entity file under `root` for `term`.
///
/// Files are visited in traversal order; files with no hits are omitted.
/// Unreadable files are skipped with a warning, never aborting the batch.
pub fn scan_workspace(root: &Path, term: &str) -> Vec<FileMatches> {
    let mut results = Vec::new();
    for path in find_entity_files(root) {
        match scan_file(&path, term) {
            Ok(matches) if !matches.is_empty() => {
                results.push(FileMatches { path, matches });
            }
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(file = %path.display(), error = %e, "skipping unreadable file");
            }
        }
    }
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "name: Alice Smith\ntags:\n- blue\n- green\n";

    #[test]
    fn list_item_inherits_context_of_empty_valued_key() {
        let records = scan_lines(Path::new("s.Person.yml"), SAMPLE, "green");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].line, 4);
        assert_eq!(records[0].property.as_deref(), Some("tags"));
        assert_eq!(records[0].text, "green");
    }

    #[test]
    fn simple_key_value_match_is_case_insensitive() {
        let records = scan_lines(Path::new("s.Person.yml"), SAMPLE, "alice");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].line, 1);
        assert_eq!(records[0].property.as_deref(), Some("name"));
        assert_eq!(records[0].text, "Alice Smith");
    }

    #[test]
    fn non_empty_value_clears_context() {
        let content = "tags:\n- blue\nname: Bob\n- blue again\n";
        let records = scan_lines(Path::new("x.Note.yml"), content, "blue");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].property.as_deref(), Some("tags"));
        // The list item after `name: Bob` has no remembered context.
        assert_eq!(records[1].property, None);
    }

    #[test]
    fn unicode_value_matches_across_case() {
        let content = "name: JOSÉ Martí\n";
        let records = scan_lines(Path::new("x.Person.yml"), content, "josé");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].property.as_deref(), Some("name"));
        assert_eq!(records[0].text, "JOSÉ Martí");
    }

    #[test]
    fn blank_and_comment_lines_skipped() {
        let content = "# green in a comment\n\nname: green field\n";
        let records = scan_lines(Path::new("x.Note.yml"), content, "green");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].line, 3);
    }

    #[test]
    fn multi_colon_line_splits_on_first_colon_only() {
        let content = "url: http://example.com/page\n";
        let records = scan_lines(Path::new("x.Note.yml"), content, "example");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].property.as_deref(), Some("url"));
        assert_eq!(records[0].text, "http://example.com/page");
    }

    #[test]
    fn list_item_containing_colon_treated_as_key_value() {
        // The colon check runs before the list-item check, matching the
        // established scan behavior for inline `- key: value` lines.
        let content = "- color: green\n";
        let records = scan_lines(Path::new("x.Note.yml"), content, "green");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].property.as_deref(), Some("- color"));
    }

    #[test]
    fn matches_are_in_ascending_line_order() {
        let content = "a: green one\nb: nothing\nc: green two\n";
        let records = scan_lines(Path::new("x.Note.yml"), content, "green");
        let lines: Vec<usize> = records.iter().map(|r| r.line).collect();
        assert_eq!(lines, vec![1, 3]);
    }

    #[test]
    fn scan_file_unreadable_is_an_error() {
        let result = scan_file(Path::new("/tmp/kbx-no-such-file.Person.yml"), "x");
        assert!(matches!(result, Err(KbxError::Unreadable { .. })));
    }

    #[test]
    fn locate_finds_files_containing_term() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("people");
        std::fs::create_dir_all(&sub).unwrap();
        std::fs::write(sub.join("a.Person.yml"), "name: Alice\n").unwrap();
        std::fs::write(sub.join("b.Person.yml"), "name: Bob\n").unwrap();
        std::fs::write(dir.path().join("skip.txt"), "Alice everywhere").unwrap();

        let found = locate(dir.path(), "ALICE");
        assert_eq!(found.len(), 1);
        assert!(found[0].ends_with("a.Person.yml"));
    }

    #[test]
    fn locate_is_unicode_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("j.Person.yml"), "name: JOSÉ\n").unwrap();

        let found = locate(dir.path(), "josé");
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn scan_workspace_collects_per_file_matches() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("a.Person.yml"),
            "name: Alice Smith\ntags:\n- green\n",
        )
        .unwrap();
        std::fs::write(dir.path().join("b.Person.yml"), "name: Bob\n").unwrap();

        let results = scan_workspace(dir.path(), "green");
        assert_eq!(results.len(), 1);
        assert!(results[0].path.ends_with("a.Person.yml"));
        assert_eq!(results[0].matches.len(), 1);
        assert_eq!(results[0].matches[0].property.as_deref(), Some("tags"));
    }

    #[test]
    fn scan_workspace_skips_missing_files_without_aborting() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("ok.Person.yml"), "name: green\n").unwrap();

        // Nothing unreadable here; this asserts the batch shape holds even
        // when some files produce no matches.
        std::fs::write(dir.path().join("empty.Person.yml"), "").unwrap();
        let results = scan_workspace(dir.path(), "green");
        assert_eq!(results.len(), 1);
    }
}
