//! Tests for the lexer
//!
//! These tests verify tokenization of the TypeScript-like surface syntax.

use tspile::lexer::{Lexer, Token, TokenKind};

fn lex(source: &str) -> Vec<Token> {
    Lexer::new(source).collect()
}

fn kinds(source: &str) -> Vec<TokenKind> {
    Lexer::new(source).map(|t| t.kind).collect()
}

#[test]
fn test_variable_declaration_tokens() {
    let tokens = lex("let age: number = 17;");
    let expected = [
        (TokenKind::Keyword, "let"),
        (TokenKind::Ident, "age"),
        (TokenKind::Colon, ":"),
        (TokenKind::Keyword, "number"),
        (TokenKind::Assign, "="),
        (TokenKind::Number, "17"),
        (TokenKind::Semicolon, ";"),
    ];
    assert_eq!(tokens.len(), expected.len());
    for (token, (kind, text)) in tokens.iter().zip(expected) {
        assert_eq!(token.kind, kind);
        assert_eq!(token.text, text);
    }
}

#[test]
fn test_operators() {
    assert_eq!(
        kinds("+ - * / % = == != < > <= >= && || ! ++ -- += -= *= /="),
        vec![
            TokenKind::Plus,
            TokenKind::Minus,
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::Percent,
            TokenKind::Assign,
            TokenKind::Eq,
            TokenKind::NotEq,
            TokenKind::Lt,
            TokenKind::Gt,
            TokenKind::LtEq,
            TokenKind::GtEq,
            TokenKind::And,
            TokenKind::Or,
            TokenKind::Bang,
            TokenKind::Increment,
            TokenKind::Decrement,
            TokenKind::PlusAssign,
            TokenKind::MinusAssign,
            TokenKind::StarAssign,
            TokenKind::SlashAssign,
        ]
    );
}

#[test]
fn test_arrow_and_ellipsis() {
    assert_eq!(
        kinds("(a, b) => ...rest"),
        vec![
            TokenKind::LParen,
            TokenKind::Ident,
            TokenKind::Comma,
            TokenKind::Ident,
            TokenKind::RParen,
            TokenKind::Arrow,
            TokenKind::Ellipsis,
            TokenKind::Ident,
        ]
    );
}

#[test]
fn test_optional_marker() {
    // `?:` lexes as one token, a bare `?` as another
    assert_eq!(
        kinds("name?: string"),
        vec![TokenKind::Ident, TokenKind::Optional, TokenKind::Keyword]
    );
    assert_eq!(
        kinds("a ? b : c"),
        vec![
            TokenKind::Ident,
            TokenKind::Question,
            TokenKind::Ident,
            TokenKind::Colon,
            TokenKind::Ident,
        ]
    );
}

#[test]
fn test_string_quoting_styles() {
    let tokens = lex(r#""double" 'single'"#);
    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].text, "double");
    assert_eq!(tokens[1].kind, TokenKind::String);
    assert_eq!(tokens[1].text, "single");
}

#[test]
fn test_string_escapes_are_preserved_verbatim() {
    let tokens = lex(r#""a\"b\nc""#);
    assert_eq!(tokens[0].text, r#"a\"b\nc"#);
}

#[test]
fn test_template_literal_raw_capture() {
    let tokens = lex("`Hello ${name}!`");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::Template);
    assert_eq!(tokens[0].text, "Hello ${name}!");
}

#[test]
fn test_numbers() {
    let tokens = lex("123 45.67 0");
    assert_eq!(tokens[0].text, "123");
    assert_eq!(tokens[1].text, "45.67");
    assert_eq!(tokens[2].text, "0");
    assert!(tokens.iter().all(|t| t.kind == TokenKind::Number));
}

#[test]
fn test_comments_are_tokens_not_dropped() {
    let tokens = lex("let x = 1; // trailing\n/* block\ncomment */ let y = 2;");
    let comments: Vec<&Token> = tokens
        .iter()
        .filter(|t| t.kind == TokenKind::Comment)
        .collect();
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0].text, "// trailing");
    assert_eq!(comments[1].text, "/* block\ncomment */");
}

#[test]
fn test_keywords_cover_type_names() {
    for word in ["string", "number", "boolean", "any", "void", "never", "true", "false"] {
        let tokens = lex(word);
        assert_eq!(tokens[0].kind, TokenKind::Keyword, "{word} should be a keyword");
    }
    assert_eq!(lex("stringly")[0].kind, TokenKind::Ident);
}

#[test]
fn test_illegal_token_does_not_stop_the_stream() {
    let tokens = lex("a @ b");
    assert_eq!(tokens[1].kind, TokenKind::Illegal);
    assert_eq!(tokens[1].text, "@");
    assert_eq!(tokens[2].kind, TokenKind::Ident);
}

#[test]
fn test_retokenization_is_idempotent() {
    let source = r#"
function greet(name: string = "world"): void {
  console.log(`Hello ${name}`); // greeting
}
"#;
    let first = lex(source);
    let second = lex(source);
    assert_eq!(first, second);
}

#[test]
fn test_positions_track_lines_and_columns() {
    let tokens = lex("let a = 1;\nlet b = 2;");
    assert_eq!((tokens[0].line, tokens[0].column), (1, 1));
    assert_eq!((tokens[5].line, tokens[5].column), (2, 1));
    assert_eq!((tokens[6].line, tokens[6].column), (2, 5));
}

#[test]
fn test_eof_forever_after_end() {
    let mut lexer = Lexer::new("x");
    assert_eq!(lexer.next_token().kind, TokenKind::Ident);
    for _ in 0..10 {
        assert_eq!(lexer.next_token().kind, TokenKind::Eof);
    }
}
