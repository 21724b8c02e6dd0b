//! Lexer for TypeScript-like source code
//!
//! Converts source text into a stream of tokens. Comments are tokenized,
//! not dropped, so downstream consumers decide what to do with them.

use std::iter::Peekable;
use std::str::CharIndices;
use std::sync::LazyLock;

use rustc_hash::FxHashSet;

/// Reserved words of the surface language. Type names are keywords too,
/// which is how `let x: number` lexes without a dedicated type grammar.
static KEYWORDS: LazyLock<FxHashSet<&'static str>> = LazyLock::new(|| {
    [
        // Declarations
        "let", "const", "var", "function", "class", "interface", "type", "enum", "namespace",
        // Control flow
        "if", "else", "for", "while", "do", "switch", "case", "default", "break", "continue",
        "return",
        // Literal values
        "true", "false", "null", "undefined",
        // Functions and objects
        "new", "this", "super", "static",
        // Modifiers
        "public", "private", "protected", "readonly", "abstract",
        // Async
        "async", "await",
        // Modules
        "import", "export", "from", "as",
        // Error handling
        "try", "catch", "throw", "finally",
        // Type names
        "string", "number", "boolean", "object", "any", "void", "never",
        // Other
        "typeof", "instanceof", "in", "of", "extends", "implements",
    ]
    .into_iter()
    .collect()
});

/// Returns true if `literal` is a reserved word.
pub fn is_keyword(literal: &str) -> bool {
    KEYWORDS.contains(literal)
}

/// Token types for the surface language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Eof,
    Illegal,

    // Identifiers & literals
    Ident,
    Keyword,
    Number,
    String,
    Template,
    Comment,

    // Operators
    Assign,      // =
    Plus,        // +
    Minus,       // -
    Star,        // *
    Slash,       // /
    Percent,     // %
    Eq,          // ==
    NotEq,       // !=
    Lt,          // <
    Gt,          // >
    LtEq,        // <=
    GtEq,        // >=
    And,         // &&
    Or,          // ||
    Bang,        // !
    PlusAssign,  // +=
    MinusAssign, // -=
    StarAssign,  // *=
    SlashAssign, // /=
    Increment,   // ++
    Decrement,   // --

    // Delimiters
    Comma,     // ,
    Semicolon, // ;
    Colon,     // :
    Dot,       // .
    Question,  // ?
    Optional,  // ?:
    LParen,    // (
    RParen,    // )
    LBrace,    // {
    RBrace,    // }
    LBracket,  // [
    RBracket,  // ]

    // TypeScript symbols
    Arrow,    // =>
    Ellipsis, // ...
    Pipe,     // |
    Amp,      // &
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TokenKind::Eof => "EOF",
            TokenKind::Illegal => "ILLEGAL",
            TokenKind::Ident => "IDENT",
            TokenKind::Keyword => "KEYWORD",
            TokenKind::Number => "NUMBER",
            TokenKind::String => "STRING",
            TokenKind::Template => "TEMPLATE",
            TokenKind::Comment => "COMMENT",
            TokenKind::Assign => "=",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Percent => "%",
            TokenKind::Eq => "==",
            TokenKind::NotEq => "!=",
            TokenKind::Lt => "<",
            TokenKind::Gt => ">",
            TokenKind::LtEq => "<=",
            TokenKind::GtEq => ">=",
            TokenKind::And => "&&",
            TokenKind::Or => "||",
            TokenKind::Bang => "!",
            TokenKind::PlusAssign => "+=",
            TokenKind::MinusAssign => "-=",
            TokenKind::StarAssign => "*=",
            TokenKind::SlashAssign => "/=",
            TokenKind::Increment => "++",
            TokenKind::Decrement => "--",
            TokenKind::Comma => ",",
            TokenKind::Semicolon => ";",
            TokenKind::Colon => ":",
            TokenKind::Dot => ".",
            TokenKind::Question => "?",
            TokenKind::Optional => "?:",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::Arrow => "=>",
            TokenKind::Ellipsis => "...",
            TokenKind::Pipe => "|",
            TokenKind::Amp => "&",
        };
        f.write_str(s)
    }
}

/// A token with its literal text and source position.
///
/// String and template tokens carry their contents without the delimiting
/// quotes; escape sequences are preserved verbatim, not decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub line: u32,
    pub column: u32,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            kind,
            text: text.into(),
            line,
            column,
        }
    }

    pub fn eof(line: u32, column: u32) -> Self {
        Self::new(TokenKind::Eof, "", line, column)
    }

    /// True for a keyword token with the given literal text.
    pub fn is_keyword(&self, literal: &str) -> bool {
        self.kind == TokenKind::Keyword && self.text == literal
    }
}

/// Lexer for tokenizing source code
pub struct Lexer<'a> {
    source: &'a str,
    chars: Peekable<CharIndices<'a>>,
    current_pos: usize,
    line: u32,
    column: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            current_pos: 0,
            line: 1,
            column: 0,
        }
    }

    /// Get the next token from the source.
    ///
    /// Safe to call indefinitely: once the input is exhausted it returns
    /// an end-of-input token on every call.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let start = self.current_pos;
        let Some((_, ch)) = self.advance() else {
            return Token::eof(self.line, self.column);
        };
        let line = self.line;
        let column = self.column;

        let kind = match ch {
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            ',' => TokenKind::Comma,
            ';' => TokenKind::Semicolon,
            ':' => TokenKind::Colon,
            '%' => TokenKind::Percent,

            '=' => self.scan_equals(),
            '+' => self.scan_plus(),
            '-' => self.scan_minus(),
            '*' => {
                if self.match_char('=') {
                    TokenKind::StarAssign
                } else {
                    TokenKind::Star
                }
            }
            '/' => self.scan_slash(),
            '!' => {
                if self.match_char('=') {
                    TokenKind::NotEq
                } else {
                    TokenKind::Bang
                }
            }
            '<' => {
                if self.match_char('=') {
                    TokenKind::LtEq
                } else {
                    TokenKind::Lt
                }
            }
            '>' => {
                if self.match_char('=') {
                    TokenKind::GtEq
                } else {
                    TokenKind::Gt
                }
            }
            '&' => {
                if self.match_char('&') {
                    TokenKind::And
                } else {
                    TokenKind::Amp
                }
            }
            '|' => {
                if self.match_char('|') {
                    TokenKind::Or
                } else {
                    TokenKind::Pipe
                }
            }
            '?' => {
                if self.match_char(':') {
                    TokenKind::Optional
                } else {
                    TokenKind::Question
                }
            }
            '.' => {
                if self.peek() == Some('.') && self.peek_next() == Some('.') {
                    self.advance();
                    self.advance();
                    TokenKind::Ellipsis
                } else {
                    TokenKind::Dot
                }
            }

            '"' | '\'' => return self.scan_string(ch, line, column),
            '`' => return self.scan_template(line, column),

            '0'..='9' => self.scan_number(),

            c if is_letter(c) => return self.scan_identifier(start, line, column),

            _ => TokenKind::Illegal,
        };

        Token::new(kind, self.slice_from(start), line, column)
    }

    fn advance(&mut self) -> Option<(usize, char)> {
        let result = self.chars.next();
        if let Some((pos, ch)) = result {
            self.current_pos = pos + ch.len_utf8();
            if ch == '\n' {
                self.line += 1;
                self.column = 0;
            } else {
                self.column += 1;
            }
        }
        result
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, ch)| *ch)
    }

    fn peek_next(&self) -> Option<char> {
        let slice = self.source.get(self.current_pos..)?;
        let mut iter = slice.chars();
        iter.next();
        iter.next()
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn slice_from(&self, start: usize) -> &'a str {
        self.source.get(start..self.current_pos).unwrap_or_default()
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(' ' | '\t' | '\r' | '\n')) {
            self.advance();
        }
    }

    fn scan_equals(&mut self) -> TokenKind {
        if self.match_char('=') {
            TokenKind::Eq
        } else if self.match_char('>') {
            TokenKind::Arrow
        } else {
            TokenKind::Assign
        }
    }

    fn scan_plus(&mut self) -> TokenKind {
        if self.match_char('+') {
            TokenKind::Increment
        } else if self.match_char('=') {
            TokenKind::PlusAssign
        } else {
            TokenKind::Plus
        }
    }

    fn scan_minus(&mut self) -> TokenKind {
        if self.match_char('-') {
            TokenKind::Decrement
        } else if self.match_char('=') {
            TokenKind::MinusAssign
        } else {
            TokenKind::Minus
        }
    }

    fn scan_slash(&mut self) -> TokenKind {
        if self.peek() == Some('/') {
            while !matches!(self.peek(), Some('\n') | None) {
                self.advance();
            }
            TokenKind::Comment
        } else if self.peek() == Some('*') {
            self.advance();
            loop {
                match self.advance() {
                    Some((_, '*')) if self.peek() == Some('/') => {
                        self.advance();
                        break;
                    }
                    Some(_) => {}
                    None => break,
                }
            }
            TokenKind::Comment
        } else if self.match_char('=') {
            TokenKind::SlashAssign
        } else {
            TokenKind::Slash
        }
    }

    fn scan_string(&mut self, delimiter: char, line: u32, column: u32) -> Token {
        let content_start = self.current_pos;
        let content_end;
        loop {
            match self.peek() {
                Some(c) if c == delimiter => {
                    content_end = self.current_pos;
                    self.advance();
                    break;
                }
                Some('\\') => {
                    // Skip the escaped character without validating it
                    self.advance();
                    self.advance();
                }
                Some(_) => {
                    self.advance();
                }
                None => {
                    content_end = self.current_pos;
                    break;
                }
            }
        }
        let text = self.source.get(content_start..content_end).unwrap_or_default();
        Token::new(TokenKind::String, text, line, column)
    }

    /// Template literals are captured as raw text between backticks; any
    /// `${...}` interpolation inside is resolved later by the parser.
    fn scan_template(&mut self, line: u32, column: u32) -> Token {
        let content_start = self.current_pos;
        let content_end;
        loop {
            match self.peek() {
                Some('`') => {
                    content_end = self.current_pos;
                    self.advance();
                    break;
                }
                Some('\\') => {
                    self.advance();
                    self.advance();
                }
                Some(_) => {
                    self.advance();
                }
                None => {
                    content_end = self.current_pos;
                    break;
                }
            }
        }
        let text = self.source.get(content_start..content_end).unwrap_or_default();
        Token::new(TokenKind::Template, text, line, column)
    }

    fn scan_number(&mut self) -> TokenKind {
        while matches!(self.peek(), Some('0'..='9')) {
            self.advance();
        }
        // A dot is part of the number only when followed by a digit
        if self.peek() == Some('.') && matches!(self.peek_next(), Some('0'..='9')) {
            self.advance();
            while matches!(self.peek(), Some('0'..='9')) {
                self.advance();
            }
        }
        TokenKind::Number
    }

    fn scan_identifier(&mut self, start: usize, line: u32, column: u32) -> Token {
        while matches!(self.peek(), Some(c) if is_letter(c) || c.is_ascii_digit()) {
            self.advance();
        }
        let text = self.slice_from(start);
        let kind = if KEYWORDS.contains(text) {
            TokenKind::Keyword
        } else {
            TokenKind::Ident
        };
        Token::new(kind, text, line, column)
    }
}

/// The lexer is itself the pull-based token stream; iteration ends just
/// before the end-of-input token.
impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let token = self.next_token();
        if token.kind == TokenKind::Eof {
            None
        } else {
            Some(token)
        }
    }
}

fn is_letter(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_' || ch == '$'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::new(source).map(|t| t.kind).collect()
    }

    #[test]
    fn test_multi_char_operators() {
        assert_eq!(
            kinds("== != <= >= && || => ... ++ -- += -="),
            vec![
                TokenKind::Eq,
                TokenKind::NotEq,
                TokenKind::LtEq,
                TokenKind::GtEq,
                TokenKind::And,
                TokenKind::Or,
                TokenKind::Arrow,
                TokenKind::Ellipsis,
                TokenKind::Increment,
                TokenKind::Decrement,
                TokenKind::PlusAssign,
                TokenKind::MinusAssign,
            ]
        );
    }

    #[test]
    fn test_keyword_reclassification() {
        let tokens: Vec<Token> = Lexer::new("let x: number = y").collect();
        assert_eq!(tokens[0].kind, TokenKind::Keyword);
        assert_eq!(tokens[0].text, "let");
        assert_eq!(tokens[1].kind, TokenKind::Ident);
        assert_eq!(tokens[3].kind, TokenKind::Keyword);
        assert_eq!(tokens[3].text, "number");
        assert_eq!(tokens[5].kind, TokenKind::Ident);
    }

    #[test]
    fn test_string_contents_without_quotes() {
        let tokens: Vec<Token> = Lexer::new(r#""hello" 'world' "say \"hi\"""#).collect();
        assert_eq!(tokens[0].text, "hello");
        assert_eq!(tokens[1].text, "world");
        assert_eq!(tokens[2].text, r#"say \"hi\""#);
    }

    #[test]
    fn test_comment_is_a_token() {
        let tokens: Vec<Token> = Lexer::new("// note\nx /* block */ y").collect();
        assert_eq!(tokens[0].kind, TokenKind::Comment);
        assert_eq!(tokens[0].text, "// note");
        assert_eq!(tokens[2].kind, TokenKind::Comment);
        assert_eq!(tokens[2].text, "/* block */");
    }

    #[test]
    fn test_number_with_trailing_dot_is_member_access() {
        assert_eq!(
            kinds("1.toString"),
            vec![TokenKind::Number, TokenKind::Dot, TokenKind::Ident]
        );
        assert_eq!(kinds("45.67"), vec![TokenKind::Number]);
    }

    #[test]
    fn test_line_and_column_positions() {
        let tokens: Vec<Token> = Lexer::new("let x\n  = 1").collect();
        assert_eq!((tokens[0].line, tokens[0].column), (1, 1));
        assert_eq!((tokens[1].line, tokens[1].column), (1, 5));
        assert_eq!((tokens[2].line, tokens[2].column), (2, 3));
        assert_eq!((tokens[3].line, tokens[3].column), (2, 5));
    }

    #[test]
    fn test_eof_is_sticky() {
        let mut lexer = Lexer::new("x");
        lexer.next_token();
        assert_eq!(lexer.next_token().kind, TokenKind::Eof);
        assert_eq!(lexer.next_token().kind, TokenKind::Eof);
    }

    #[test]
    fn test_illegal_byte_does_not_halt() {
        assert_eq!(
            kinds("a # b"),
            vec![TokenKind::Ident, TokenKind::Illegal, TokenKind::Ident]
        );
    }
}
