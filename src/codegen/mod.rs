//! Code generation engine
//!
//! One generator per target language. All generators share the same
//! statement/expression dispatch shape but differ in their semantic
//! mapping: type handling, literal spelling, console-call translation,
//! container syntax and default-parameter policy. Generation is pure and
//! deterministic; a node kind a target cannot express produces empty
//! output (or an explicit placeholder comment), never an error.

mod csharp;
mod golang;
mod java;
mod javascript;
mod python;

pub use csharp::CSharpGenerator;
pub use golang::GoGenerator;
pub use java::JavaGenerator;
pub use javascript::JavaScriptGenerator;
pub use python::PythonGenerator;

use std::str::FromStr;

use crate::ast::{CallExpression, Expression, Program};
use crate::error::UnknownTargetError;

/// Supported output dialects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetLanguage {
    JavaScript,
    Java,
    Python,
    CSharp,
    Go,
    Rust,
    Swift,
    Php,
}

impl TargetLanguage {
    pub const ALL: [TargetLanguage; 8] = [
        TargetLanguage::JavaScript,
        TargetLanguage::Java,
        TargetLanguage::Python,
        TargetLanguage::CSharp,
        TargetLanguage::Go,
        TargetLanguage::Rust,
        TargetLanguage::Swift,
        TargetLanguage::Php,
    ];

    pub fn id(self) -> &'static str {
        match self {
            TargetLanguage::JavaScript => "javascript",
            TargetLanguage::Java => "java",
            TargetLanguage::Python => "python",
            TargetLanguage::CSharp => "csharp",
            TargetLanguage::Go => "go",
            TargetLanguage::Rust => "rust",
            TargetLanguage::Swift => "swift",
            TargetLanguage::Php => "php",
        }
    }
}

impl std::fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for TargetLanguage {
    type Err = UnknownTargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "javascript" | "js" => Ok(TargetLanguage::JavaScript),
            "java" => Ok(TargetLanguage::Java),
            "python" | "py" => Ok(TargetLanguage::Python),
            "csharp" | "cs" => Ok(TargetLanguage::CSharp),
            "go" => Ok(TargetLanguage::Go),
            "rust" => Ok(TargetLanguage::Rust),
            "swift" => Ok(TargetLanguage::Swift),
            "php" => Ok(TargetLanguage::Php),
            other => Err(UnknownTargetError {
                id: other.to_string(),
            }),
        }
    }
}

/// Generate target-language source text for a parsed program.
///
/// Pure and deterministic: the same AST and target always produce
/// byte-identical output. The AST is borrowed read-only, so independent
/// (AST, target) pairs can be generated concurrently.
pub fn generate(program: &Program, target: TargetLanguage) -> String {
    match target {
        TargetLanguage::JavaScript => JavaScriptGenerator::generate(program),
        TargetLanguage::Java => JavaGenerator::generate(program),
        TargetLanguage::Python => PythonGenerator::generate(program),
        TargetLanguage::CSharp => CSharpGenerator::generate(program),
        TargetLanguage::Go => GoGenerator::generate(program),
        TargetLanguage::Rust | TargetLanguage::Swift | TargetLanguage::Php => {
            format!("// {} code generation is not implemented yet\n", target)
        }
    }
}

/// Growable output buffer with indentation tracking. Each generator owns
/// one per pass, keeping emission linear in AST size.
pub(crate) struct Emitter {
    buf: String,
    depth: usize,
    unit: &'static str,
}

impl Emitter {
    pub(crate) fn new(unit: &'static str) -> Self {
        Self {
            buf: String::new(),
            depth: 0,
            unit,
        }
    }

    /// Writes one indented line. Multi-line text is written as-is after
    /// the first-line indent.
    pub(crate) fn line(&mut self, text: &str) {
        for _ in 0..self.depth {
            self.buf.push_str(self.unit);
        }
        self.buf.push_str(text);
        self.buf.push('\n');
    }

    pub(crate) fn blank(&mut self) {
        self.buf.push('\n');
    }

    pub(crate) fn indent(&mut self) {
        self.depth += 1;
    }

    pub(crate) fn dedent(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    pub(crate) fn finish(self) -> String {
        self.buf
    }
}

/// Returns the arguments of a `console.log(...)` call, if that is what
/// the call expression is. Every generator with a console translation
/// keys off this.
pub(crate) fn console_log_args(call: &CallExpression) -> Option<&[Expression]> {
    if let Expression::Member(member) = call.callee.as_ref() {
        if !member.computed {
            if let (Expression::Identifier(object), Expression::Identifier(property)) =
                (member.object.as_ref(), member.property.as_ref())
            {
                if object == "console" && property == "log" {
                    return Some(&call.arguments);
                }
            }
        }
    }
    None
}
