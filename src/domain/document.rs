//! Entity extraction from a parsed configuration document
//!
//! A document is the top-level YAML mapping. Every mapping-valued key that
//! is neither a reserved global keyword nor a hidden template is a job.

use serde_yaml::{Mapping, Value};

/// Top-level keywords with global meaning; never job definitions.
pub const RESERVED_KEYWORDS: [&str; 12] = [
    "image",
    "services",
    "stages",
    "types",
    "before_script",
    "after_script",
    "variables",
    "cache",
    "include",
    "workflow",
    "default",
    "pages",
];

/// Keys starting with this prefix are hidden templates, not runnable jobs.
pub const HIDDEN_PREFIX: char = '.';

/// Returns true if `key` is one of the reserved global keywords.
pub fn is_reserved(key: &str) -> bool {
    RESERVED_KEYWORDS.contains(&key)
}

/// Returns true if `key` names a hidden template.
pub fn is_hidden(key: &str) -> bool {
    key.starts_with(HIDDEN_PREFIX)
}

/// The top-level key as a string, if it is one.
///
/// Non-string keys cannot name jobs or templates and are skipped by the
/// semantic checks.
pub fn key_str(key: &Value) -> Option<&str> {
    key.as_str()
}

/// Extracts the concrete jobs from a document, in document order.
///
/// Hidden templates, reserved keywords, and non-mapping values are
/// excluded. Each qualifying key appears exactly once (the document is
/// itself a mapping).
pub fn extract_jobs(doc: &Mapping) -> Vec<(&str, &Mapping)> {
    doc.iter()
        .filter_map(|(key, value)| {
            let name = key_str(key)?;
            if is_hidden(name) || is_reserved(name) {
                return None;
            }
            value.as_mapping().map(|def| (name, def))
        })
        .collect()
}
