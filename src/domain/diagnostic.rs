//! Diagnostic records produced by validation
//!
//! Each variant carries the offending identifiers; the human-readable
//! message is rendered only through `Display`, so text lives in exactly
//! one place and JSON consumers get the structured fields.

use thiserror::Error;

/// One violation found in a configuration document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Diagnostic {
    /// The input text is not well-formed YAML.
    #[error("YAML parsing error: {message}")]
    YamlParse { message: String },

    /// The input parsed, but is empty or not a mapping.
    #[error("Invalid configuration: File is empty or not a dictionary")]
    EmptyOrNotMapping,

    /// A schema violation at a specific location in the document.
    #[error("Schema error at '{path}': {message}")]
    SchemaViolationAt { path: String, message: String },

    /// A schema violation at the document root.
    #[error("Schema error: {message}")]
    SchemaViolation { message: String },

    /// A `needs` entry referencing a job that is not in this file.
    #[error("Job '{job}' needs '{target}', which does not exist in this file.")]
    UnknownNeed { job: String, target: String },

    /// A job assigned to a stage outside the effective stage set.
    #[error("Job '{job}' assignment to stage '{stage}' which is not defined.")]
    UndefinedStage { job: String, stage: String },

    /// An `extends` entry referencing a key that is not in this file.
    #[error("Job '{job}' extends '{parent}', which does not exist.")]
    UnknownExtends { job: String, parent: String },

    /// A cycle in the `extends` inheritance graph, framed as the walk
    /// that discovered it.
    #[error("Circular dependency detected in 'extends': {}", .path.join(" -> "))]
    CircularExtends { path: Vec<String> },

    /// The input file could not be read.
    #[error("Could not read file '{path}': {message}")]
    Unreadable { path: String, message: String },
}

impl Diagnostic {
    /// Taxonomy label for machine consumption (JSON output).
    pub fn kind(&self) -> &'static str {
        match self {
            Diagnostic::YamlParse { .. } => "decode_error",
            Diagnostic::EmptyOrNotMapping => "structure_error",
            Diagnostic::SchemaViolationAt { .. } | Diagnostic::SchemaViolation { .. } => {
                "schema_violation"
            }
            Diagnostic::UnknownNeed { .. } | Diagnostic::UnknownExtends { .. } => {
                "dangling_reference"
            }
            Diagnostic::UndefinedStage { .. } => "undefined_stage",
            Diagnostic::CircularExtends { .. } => "cycle_detected",
            Diagnostic::Unreadable { .. } => "io_error",
        }
    }

    /// True for the kinds that stop validation of the document.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Diagnostic::YamlParse { .. } | Diagnostic::EmptyOrNotMapping
        )
    }
}
