use std::sync::LazyLock;

use regex::Regex;

// Optional `json` tag, lazy capture, surrounding whitespace trimmed by the pattern.
static FENCED_BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```(?:json)?\s*([\s\S]*?)\s*```").expect("valid regex"));

/// Return the body of the first fenced code block in `text`.
///
/// Only the first fence counts, even when a later one holds better JSON.
/// An empty body is treated the same as no fence at all.
pub fn extract_fenced_json(text: &str) -> Option<&str> {
    FENCED_BLOCK_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|body| body.as_str())
        .filter(|body| !body.is_empty())
}
