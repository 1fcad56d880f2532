//! # Match Highlighting
//!
//! Marks every non-overlapping, case-insensitive occurrence of a term in a
//! piece of display text, scanning left to right and advancing strictly
//! past each matched span. Case folding is Unicode-aware; byte offsets
//! always refer to the original text, so the marked segments preserve
//! original casing.

use std::ops::Range;

/// Lowercase fold used for case-insensitive comparison, applied per
/// character so `JOSÉ` and `josé` compare equal.
pub(crate) fn fold(text: &str) -> String {
    text.chars().flat_map(char::to_lowercase).collect()
}

/// Byte ranges of every non-overlapping case-insensitive occurrence of
/// `term` in `text`, left to right. An empty term yields no spans.
pub fn match_spans(text: &str, term: &str) -> Vec<Range<usize>> {
    let needle: Vec<char> = term.chars().flat_map(char::to_lowercase).collect();
    if needle.is_empty() {
        return Vec::new();
    }
    let mut spans = Vec::new();
    let mut start = 0;
    while start < text.len() {
        match folded_prefix_len(&text[start..], &needle) {
            Some(len) => {
                spans.push(start..start + len);
                start += len;
            }
            None => {
                start += text[start..].chars().next().map_or(1, char::len_utf8);
            }
        }
    }
    spans
}

/// Byte length of the shortest prefix of `text` whose lowercase fold is
/// exactly `needle`, if any. The prefix always ends on a character
/// boundary of `text`, so the returned length indexes the original
/// safely.
fn folded_prefix_len(text: &str, needle: &[char]) -> Option<usize> {
    let mut remaining = needle.iter();
    let mut len = 0;
    for ch in text.chars() {
        for low in ch.to_lowercase() {
            match remaining.next() {
                Some(&want) if want == low => {}
                _ => return None,
            }
        }
        len += ch.len_utf8();
        if remaining.as_slice().is_empty() {
            return Some(len);
        }
    }
    None
}

/// Wrap every occurrence of `term` in `text` with the `open`/`close`
/// markers. With an empty term the text is returned unchanged.
pub fn highlight(text: &str, term: &str, open: &str, close: &str) -> String {
    let spans = match_spans(text, term);
    if spans.is_empty() {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len() + spans.len() * (open.len() + close.len()));
    let mut cursor = 0;
    for span in spans {
        out.push_str(&text[cursor..span.start]);
        out.push_str(open);
        out.push_str(&text[span.clone()]);
        out.push_str(close);
        cursor = span.end;
    }
    out.push_str(&text[cursor..]);
    out
}
