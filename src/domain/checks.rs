//! Cross-referential checks over a parsed configuration
//!
//! Each check reads the document without mutating it and returns the
//! diagnostics it found, in document order. They are independent and can
//! run in any order.

use std::collections::HashSet;

use serde_yaml::{Mapping, Value};

use super::diagnostic::Diagnostic;
use super::document::{extract_jobs, key_str};

/// Stage set used when the document declares no `stages` key.
pub const DEFAULT_STAGES: [&str; 3] = ["build", "test", "deploy"];

/// Verifies that every local `needs` reference names a job in this file.
///
/// A reference is either a bare job name or a mapping with an optional
/// `job` key. Mappings carrying a `project` key point at another
/// pipeline and are exempt. A `needs` value that is not a sequence is
/// left to schema validation.
pub fn check_needs(doc: &Mapping) -> Vec<Diagnostic> {
    let jobs = extract_jobs(doc);
    let names: HashSet<&str> = jobs.iter().map(|(name, _)| *name).collect();

    let mut diagnostics = Vec::new();
    for (job, def) in &jobs {
        let Some(needs) = def.get("needs").and_then(Value::as_sequence) else {
            continue;
        };

        for need in needs {
            let (target, local) = match need {
                Value::String(name) => (Some(name.as_str()), true),
                Value::Mapping(reference) => (
                    reference.get("job").and_then(Value::as_str),
                    !reference.contains_key("project"),
                ),
                _ => (None, false),
            };

            if let Some(target) = target {
                if local && !target.is_empty() && !names.contains(target) {
                    diagnostics.push(Diagnostic::UnknownNeed {
                        job: (*job).to_string(),
                        target: target.to_string(),
                    });
                }
            }
        }
    }

    diagnostics
}

/// Verifies that every job's `stage` is in the effective stage set.
///
/// The effective set is the document's `stages` sequence, or
/// [`DEFAULT_STAGES`] when absent (or malformed, which the schema flags
/// separately).
pub fn check_stages(doc: &Mapping) -> Vec<Diagnostic> {
    let stages: HashSet<&str> = match doc.get("stages").and_then(Value::as_sequence) {
        Some(declared) => declared.iter().filter_map(Value::as_str).collect(),
        None => DEFAULT_STAGES.into_iter().collect(),
    };

    let mut diagnostics = Vec::new();
    for (job, def) in extract_jobs(doc) {
        if let Some(stage) = def.get("stage").and_then(Value::as_str) {
            if !stage.is_empty() && !stages.contains(stage) {
                diagnostics.push(Diagnostic::UndefinedStage {
                    job: job.to_string(),
                    stage: stage.to_string(),
                });
            }
        }
    }

    diagnostics
}

/// Verifies that every `extends` parent names an existing top-level key.
///
/// Anything can extend and anything can be extended: the check runs over
/// all mapping-valued keys (hidden templates included) and the valid
/// parent universe is the full top-level key set.
pub fn check_extends(doc: &Mapping) -> Vec<Diagnostic> {
    let all_keys: HashSet<&str> = doc.keys().filter_map(key_str).collect();

    let mut diagnostics = Vec::new();
    for (key, value) in doc {
        let (Some(name), Some(def)) = (key_str(key), value.as_mapping()) else {
            continue;
        };

        for parent in extends_parents(def) {
            if !all_keys.contains(parent) {
                diagnostics.push(Diagnostic::UnknownExtends {
                    job: name.to_string(),
                    parent: parent.to_string(),
                });
            }
        }
    }

    diagnostics
}

/// The parent names declared by a definition's `extends` field.
///
/// A bare string normalizes to a one-element sequence; an empty string or
/// empty sequence declares nothing.
pub fn extends_parents(def: &Mapping) -> Vec<&str> {
    match def.get("extends") {
        Some(Value::String(parent)) if !parent.is_empty() => vec![parent.as_str()],
        Some(Value::Sequence(parents)) => parents.iter().filter_map(Value::as_str).collect(),
        _ => Vec::new(),
    }
}
