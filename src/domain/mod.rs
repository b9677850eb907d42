//! Semantic core of the linter
//!
//! Contains the cross-referential validation logic without any I/O
//! concerns. Everything here is a pure function of the parsed document.

mod checks;
mod diagnostic;
mod document;
mod graph;

pub use checks::{check_extends, check_needs, check_stages, extends_parents, DEFAULT_STAGES};
pub use diagnostic::Diagnostic;
pub use document::{extract_jobs, is_hidden, is_reserved, HIDDEN_PREFIX, RESERVED_KEYWORDS};
pub use graph::{check_circular_extends, InheritanceGraph};
