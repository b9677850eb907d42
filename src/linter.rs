//! Validation orchestrator
//!
//! Runs the full pipeline for one document: YAML decoding, structure
//! gate, schema validation, then the semantic checks. Decode and
//! structure failures are fatal; everything else accumulates.

use std::fs;
use std::path::Path;

use serde_yaml::Value;

use crate::domain::{
    check_circular_extends, check_extends, check_needs, check_stages, Diagnostic,
};
use crate::schema::{SchemaError, SchemaValidator};

/// Lints configuration documents against the bundled schema and the
/// semantic checks.
///
/// Construct once and reuse; the compiled schema is immutable and the
/// lint operations take `&self`.
pub struct Linter {
    schema: SchemaValidator,
}

impl Linter {
    /// A linter backed by the bundled GitLab CI schema.
    pub fn new() -> Result<Self, SchemaError> {
        Ok(Self {
            schema: SchemaValidator::bundled()?,
        })
    }

    /// A linter backed by a caller-provided schema.
    pub fn with_schema(schema: SchemaValidator) -> Self {
        Self { schema }
    }

    /// Lints one document's text, returning every diagnostic found.
    ///
    /// Order: schema violations, then needs, stages, extends, and
    /// circular-extends diagnostics. Unparseable or non-mapping input
    /// yields exactly one diagnostic.
    pub fn lint(&self, content: &str) -> Vec<Diagnostic> {
        let value: Value = match serde_yaml::from_str(content) {
            Ok(value) => value,
            Err(e) => {
                return vec![Diagnostic::YamlParse {
                    message: e.to_string(),
                }]
            }
        };

        let Value::Mapping(doc) = value else {
            return vec![Diagnostic::EmptyOrNotMapping];
        };
        if doc.is_empty() {
            return vec![Diagnostic::EmptyOrNotMapping];
        }

        let mut diagnostics = self.schema.validate(&doc);
        diagnostics.extend(check_needs(&doc));
        diagnostics.extend(check_stages(&doc));
        diagnostics.extend(check_extends(&doc));
        diagnostics.extend(check_circular_extends(&doc));
        diagnostics
    }

    /// Lints a file from disk.
    ///
    /// A read failure becomes a diagnostic rather than an error, so one
    /// unreadable file never aborts a multi-file run.
    pub fn lint_file(&self, path: &Path) -> Vec<Diagnostic> {
        match fs::read_to_string(path) {
            Ok(content) => self.lint(&content),
            Err(e) => vec![Diagnostic::Unreadable {
                path: path.display().to_string(),
                message: e.to_string(),
            }],
        }
    }
}
