//! Structural validation against the bundled GitLab CI schema
//!
//! The schema is compiled once into a [`SchemaValidator`] and shared by
//! reference; it is immutable after construction. Tests can inject an
//! alternate schema through [`SchemaValidator::from_json`].

use jsonschema::{Draft, Validator};
use serde_json::Value as Json;
use serde_yaml::{Mapping, Value as Yaml};
use thiserror::Error;

use crate::domain::Diagnostic;

/// The schema document shipped with the binary.
static BUNDLED_SCHEMA: &str = include_str!("gitlab-ci.json");

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("schema is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("schema failed to compile: {0}")]
    Compile(String),
}

/// A compiled JSON schema for configuration documents.
pub struct SchemaValidator {
    validator: Validator,
}

impl SchemaValidator {
    /// Compiles the bundled GitLab CI schema.
    pub fn bundled() -> Result<Self, SchemaError> {
        let schema: Json = serde_json::from_str(BUNDLED_SCHEMA)?;
        Self::from_json(&schema)
    }

    /// Compiles a caller-provided schema document.
    pub fn from_json(schema: &Json) -> Result<Self, SchemaError> {
        let validator = jsonschema::options()
            .with_draft(Draft::Draft202012)
            .build(schema)
            .map_err(|e| SchemaError::Compile(e.to_string()))?;
        Ok(Self { validator })
    }

    /// Validates a parsed document, one diagnostic per violation.
    ///
    /// Paths render dotted (`job.artifacts.paths`); a violation at the
    /// document root carries no path.
    pub fn validate(&self, doc: &Mapping) -> Vec<Diagnostic> {
        let instance = mapping_to_json(doc);
        self.validator
            .iter_errors(&instance)
            .map(|error| {
                let path = dotted_path(&error.instance_path.to_string());
                let message = error.to_string();
                if path.is_empty() {
                    Diagnostic::SchemaViolation { message }
                } else {
                    Diagnostic::SchemaViolationAt { path, message }
                }
            })
            .collect()
    }
}

/// Renders a JSON pointer (`/build/artifacts/paths`) as a dotted path.
fn dotted_path(pointer: &str) -> String {
    pointer.trim_start_matches('/').replace('/', ".")
}

/// The JSON representation of a parsed YAML mapping.
///
/// YAML permits non-string scalar keys; those are coerced to their scalar
/// rendering so the validator always sees a JSON object.
fn mapping_to_json(doc: &Mapping) -> Json {
    Json::Object(
        doc.iter()
            .map(|(key, value)| (scalar_key(key), yaml_to_json(value)))
            .collect(),
    )
}

fn yaml_to_json(value: &Yaml) -> Json {
    match value {
        Yaml::Null => Json::Null,
        Yaml::Bool(b) => Json::Bool(*b),
        Yaml::Number(n) => {
            if let Some(i) = n.as_i64() {
                Json::from(i)
            } else if let Some(u) = n.as_u64() {
                Json::from(u)
            } else {
                n.as_f64()
                    .and_then(serde_json::Number::from_f64)
                    .map(Json::Number)
                    .unwrap_or(Json::Null)
            }
        }
        Yaml::String(s) => Json::String(s.clone()),
        Yaml::Sequence(seq) => Json::Array(seq.iter().map(yaml_to_json).collect()),
        Yaml::Mapping(m) => mapping_to_json(m),
        Yaml::Tagged(tagged) => yaml_to_json(&tagged.value),
    }
}

fn scalar_key(key: &Yaml) -> String {
    match key {
        Yaml::String(s) => s.clone(),
        Yaml::Bool(b) => b.to_string(),
        Yaml::Number(n) => n.to_string(),
        Yaml::Null => "null".to_string(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}
