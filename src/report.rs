//! Parse summaries for embedding layers
//!
//! The web and CLI layers around the core persist the outcome of a parse
//! as JSON before deciding whether to run code generation. `ParseReport`
//! is that record: a cheap, serializable snapshot of what the parser
//! produced, without the AST itself.

use serde::{Deserialize, Serialize};

use crate::ast::Program;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseReport {
    /// Length of the source text in bytes.
    pub source_len: usize,
    pub statement_count: usize,
    /// True when parsing produced at least one statement and no
    /// diagnostics.
    pub parsed_ok: bool,
    /// Variant names of the parsed top-level statements, in order.
    pub statement_kinds: Vec<String>,
    pub diagnostics: Vec<String>,
}

impl ParseReport {
    pub fn new(source: &str, program: &Program, diagnostics: &[String]) -> Self {
        Self {
            source_len: source.len(),
            statement_count: program.body.len(),
            parsed_ok: diagnostics.is_empty() && !program.body.is_empty(),
            statement_kinds: program
                .body
                .iter()
                .map(|s| s.kind_name().to_string())
                .collect(),
            diagnostics: diagnostics.to_vec(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
