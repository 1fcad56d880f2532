//! # Content Formatting
//!
//! Renders a loaded entity document for display: mappings and sequences
//! with depth-proportional indentation, scalar values highlighted where the
//! search term occurs, and distinct sentinels for empty containers. The
//! output is plain text with caller-chosen highlight markers; the rendering
//! collaborator decides what the markers look like on screen.

use serde_yaml::Value;

use crate::highlight::highlight;

/// Sentinel rendered for a mapping with no entries.
pub const EMPTY_MAPPING: &str = "<empty mapping>";

/// Sentinel rendered for a sequence with no items.
pub const EMPTY_SEQUENCE: &str = "<empty sequence>";

/// Render `value` as indented text, marking occurrences of `term` in
/// scalar values with the `open`/`close` markers.
pub fn format_content(value: &Value, term: &str, open: &str, close: &str) -> String {
    render(value, 0, term, open, close)
}

fn render(value: &Value, indent: usize, term: &str, open: &str, close: &str) -> String {
    let pad = "  ".repeat(indent);
    match value {
        Value::Mapping(map) => {
            if map.is_empty() {
                return format!("{pad}{EMPTY_MAPPING}");
            }
            let mut lines = Vec::new();
            for (key, val) in map {
                let key_str = scalar_to_string(key);
                if matches!(val, Value::Mapping(_) | Value::Sequence(_)) {
                    lines.push(format!("{pad}{key_str}:"));
                    lines.push(render(val, indent + 1, term, open, close));
                } else {
                    let val_str = highlight(&scalar_to_string(val), term, open, close);
                    lines.push(format!("{pad}{key_str}: {val_str}"));
                }
            }
            lines.join("\n")
        }
        Value::Sequence(seq) => {
            if seq.is_empty() {
                return format!("{pad}{EMPTY_SEQUENCE}");
            }
            let mut lines = Vec::new();
            for item in seq {
                if matches!(item, Value::Mapping(_) | Value::Sequence(_)) {
                    lines.push(format!("{pad}-"));
                    lines.push(render(item, indent + 1, term, open, close));
                } else {
                    let item_str = highlight(&scalar_to_string(item), term, open, close);
                    lines.push(format!("{pad}- {item_str}"));
                }
            }
            lines.join("\n")
        }
        Value::Tagged(tagged) => render(&tagged.value, indent, term, open, close),
        scalar => {
            let text = highlight(&scalar_to_string(scalar), term, open, close);
            format!("{pad}{text}")
        }
    }
}

fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        other => format!("{other:?}"),
    }
}
