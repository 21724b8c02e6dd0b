//! TypeScript-surface transpiler
//!
//! Tokenizes a TypeScript-like source, parses it into an AST and
//! re-emits it as JavaScript, Java, Python, C# or Go-like source text.
//! The whole pipeline is synchronous and stateless: parse once, then fan
//! the read-only AST out to as many generator calls as needed.
//!
//! # Example
//!
//! ```
//! use tspile::{transpile, TargetLanguage};
//!
//! let js = transpile("const x: number = 1;", TargetLanguage::JavaScript).unwrap();
//! assert_eq!(js, "const x = 1;\n");
//!
//! let py = transpile("const x: number = 1;", TargetLanguage::Python).unwrap();
//! assert_eq!(py, "x = 1  # const\n");
//! ```

pub mod ast;
pub mod codegen;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod report;

pub use ast::Program;
pub use codegen::{generate, TargetLanguage};
pub use error::{TranspileError, UnknownTargetError};
pub use lexer::{Lexer, Token, TokenKind};
pub use parser::Parser;
pub use report::ParseReport;

/// Tokenize a source string.
///
/// The returned lexer is the pull-based token stream: call
/// [`Lexer::next_token`] until end-of-input, or iterate it.
pub fn tokenize(source: &str) -> Lexer<'_> {
    Lexer::new(source)
}

/// Parse a source string into an AST plus parse diagnostics.
///
/// Never fails: malformed input yields a partial AST and a non-empty
/// diagnostics list.
pub fn parse(source: &str) -> (Program, Vec<String>) {
    let mut parser = Parser::new(Lexer::new(source));
    let program = parser.parse_program();
    (program, parser.into_diagnostics())
}

/// Parse and generate in one step, refusing to generate from a broken or
/// empty parse.
pub fn transpile(source: &str, target: TargetLanguage) -> Result<String, TranspileError> {
    let (program, diagnostics) = parse(source);
    if !diagnostics.is_empty() {
        return Err(TranspileError::Parse { diagnostics });
    }
    if program.body.is_empty() {
        return Err(TranspileError::EmptyProgram);
    }
    Ok(codegen::generate(&program, target))
}
