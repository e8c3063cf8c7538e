//! Header region extraction.
//!
//! Splitting at the first blank line that follows visible content gives the
//! metadata pass a small region to parse instead of the whole document. This
//! is only an optimization: if the boundary lands mid-document, the caller's
//! structured parse still isolates the header (or falls back to the full
//! content).

use regex::Regex;
use std::sync::OnceLock;

static BOUNDARY_RE: OnceLock<Regex> = OnceLock::new();

/// First non-whitespace character directly followed by a blank line.
fn boundary_regex() -> &'static Regex {
    BOUNDARY_RE.get_or_init(|| Regex::new(r"\S\n\n").unwrap())
}

/// Return the portion of `content` before the first blank-line boundary
/// that follows non-whitespace content.
///
/// Returns the entire content when no boundary exists (including empty
/// content). Pure function, no I/O.
pub fn extract(content: &str) -> &str {
    match boundary_regex().find(content) {
        // Keep the matched graphic character, cut at the blank line.
        Some(m) => &content[..m.end() - 2],
        None => content,
    }
}
