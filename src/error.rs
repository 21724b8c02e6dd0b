//! Error types for the transpiler boundary
//!
//! The core pipeline itself never fails: the lexer emits ILLEGAL tokens,
//! the parser records diagnostics, generators emit best-effort text.
//! These types exist for the convenience entry points that refuse to
//! generate from a broken parse.

use thiserror::Error;

/// An unrecognized target-language identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown target language: {id}")]
pub struct UnknownTargetError {
    pub id: String,
}

/// Error returned by the `transpile` convenience entry point.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranspileError {
    #[error("parsing produced {} diagnostic(s): {}", .diagnostics.len(), .diagnostics.join("; "))]
    Parse { diagnostics: Vec<String> },

    #[error("no statements could be parsed from the input")]
    EmptyProgram,
}

impl TranspileError {
    /// The parser diagnostics behind this error, if any.
    pub fn diagnostics(&self) -> &[String] {
        match self {
            TranspileError::Parse { diagnostics } => diagnostics,
            TranspileError::EmptyProgram => &[],
        }
    }
}
