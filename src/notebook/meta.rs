//! Metadata promotion: decode a notebook's header cell and merge it into a
//! page's metadata record.
//!
//! The header cell holds a YAML mapping (`title: Hello`, `liquid: false`,
//! ...). Promotion copies those keys into the page record so templates and
//! listings can use them without a separate front-matter file. Merged keys
//! always overwrite prior defaults, never the reverse, and merging is a pure
//! overwrite so repeating the pass yields the same record.

use super::{document::Notebook, header};
use serde_yaml::{Mapping, Value};
use std::collections::HashMap;

/// Per-page metadata record, owned by the page and mutated in place.
pub type MetadataRecord = HashMap<String, Value>;

/// Key a page sets to control whether downstream templating runs over it.
pub const TEMPLATING_KEY: &str = "liquid";

/// Extract the header cell's text from raw notebook content.
///
/// Tries the blank-line fast path first, then the full content: the
/// extractor is a heuristic and may truncate a pretty-printed document
/// mid-JSON. Returns `None` when the content is not a parseable notebook or
/// has no cells; callers treat that as "no metadata to promote".
pub fn load_header(content: &str) -> Option<String> {
    let region = header::extract(content);

    Notebook::from_str(region)
        .ok()
        .or_else(|| {
            if region.len() == content.len() {
                return None;
            }
            Notebook::from_str(content).ok()
        })?
        .header_source()
}

/// Decode header text as a YAML mapping.
///
/// Returns `None` for invalid YAML or non-mapping documents (a header cell
/// holding plain prose is not metadata).
pub fn decode_header(text: &str) -> Option<Mapping> {
    match serde_yaml::from_str::<Value>(text).ok()? {
        Value::Mapping(mapping) => Some(mapping),
        _ => None,
    }
}

/// Merge a decoded mapping into a page record, overwriting existing keys.
///
/// A non-empty `prefix` is applied to every promoted key as `<prefix>-<key>`,
/// except the reserved templating key, which stays stable so the gate can
/// find it. Non-string YAML keys are skipped. Safe to call with an empty
/// mapping.
pub fn merge(record: &mut MetadataRecord, mapping: Mapping, prefix: &str) {
    for (key, value) in mapping {
        let Some(key) = key.as_str() else { continue };
        let key = if prefix.is_empty() || key == TEMPLATING_KEY {
            key.to_owned()
        } else {
            format!("{prefix}-{key}")
        };
        record.insert(key, value);
    }
}

/// Whether a later templating stage should process the page.
///
/// Templating runs by default; a page opts out by declaring `liquid: false`
/// (or null) in its promoted metadata.
pub fn should_template(record: &MetadataRecord) -> bool {
    match record.get(TEMPLATING_KEY) {
        None => true,
        Some(value) => !matches!(value, Value::Null | Value::Bool(false)),
    }
}
