//! cilint - Offline validation for GitLab CI configuration files
//!
//! Catches malformed YAML, schema violations against the bundled
//! configuration grammar, and cross-referential semantic errors (dangling
//! `needs` references, undefined stages, broken or cyclic `extends`
//! inheritance) before a pipeline ever reaches the server.

pub mod cli;
pub mod domain;
pub mod linter;
pub mod schema;

pub use domain::Diagnostic;
pub use linter::Linter;
pub use schema::{SchemaError, SchemaValidator};
