//! Parser for the surface language
//!
//! Recursive descent for statements, precedence climbing (Pratt parsing)
//! for expressions. The parser never fails hard: unexpected tokens are
//! recorded as diagnostics and parsing continues with the next statement,
//! so callers always get a (possibly partial) AST plus a diagnostics list.

use crate::ast::*;
use crate::lexer::{Lexer, Token, TokenKind};

/// Operator binding strength. Logical `&&`/`||` deliberately share the
/// equality level; precedence here is not short-circuit-aware.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Precedence {
    Lowest,
    Equality,
    Relational,
    Additive,
    Multiplicative,
    Prefix,
    Call,
    Index,
}

fn precedence_of(kind: TokenKind) -> Precedence {
    match kind {
        TokenKind::Eq | TokenKind::NotEq | TokenKind::And | TokenKind::Or => Precedence::Equality,
        TokenKind::Lt | TokenKind::Gt | TokenKind::LtEq | TokenKind::GtEq => Precedence::Relational,
        TokenKind::Plus | TokenKind::Minus => Precedence::Additive,
        TokenKind::Star | TokenKind::Slash | TokenKind::Percent => Precedence::Multiplicative,
        TokenKind::LParen => Precedence::Call,
        TokenKind::LBracket | TokenKind::Dot => Precedence::Index,
        _ => Precedence::Lowest,
    }
}

/// Parser over a token stream with two-token lookahead.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    peek: Token,
    diagnostics: Vec<String>,
}

impl<'a> Parser<'a> {
    pub fn new(mut lexer: Lexer<'a>) -> Self {
        let current = next_meaningful(&mut lexer);
        let peek = next_meaningful(&mut lexer);
        Self {
            lexer,
            current,
            peek,
            diagnostics: Vec::new(),
        }
    }

    /// Parse a complete program. Diagnostics accumulate on the parser.
    pub fn parse_program(&mut self) -> Program {
        let mut body = Vec::new();
        while self.current.kind != TokenKind::Eof {
            if let Some(statement) = self.parse_statement() {
                body.push(statement);
            }
            // Unconditional advance: guarantees progress on malformed input
            self.advance();
        }
        Program { body }
    }

    pub fn diagnostics(&self) -> &[String] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<String> {
        self.diagnostics
    }

    // ============ STATEMENTS ============

    /// Parses one statement, leaving the last token of the statement as
    /// the current token. Returns None after recording a diagnostic.
    fn parse_statement(&mut self) -> Option<Statement> {
        match self.current.kind {
            TokenKind::Keyword => self.parse_keyword_statement(),
            TokenKind::Ident => match self.peek.kind {
                TokenKind::Assign => self.parse_assignment_statement(),
                TokenKind::PlusAssign
                | TokenKind::MinusAssign
                | TokenKind::StarAssign
                | TokenKind::SlashAssign => self.parse_compound_assignment(),
                TokenKind::Increment | TokenKind::Decrement => self.parse_update_statement(),
                _ => self.parse_expression_statement(),
            },
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_keyword_statement(&mut self) -> Option<Statement> {
        match self.current.text.as_str() {
            "let" | "const" | "var" => self
                .parse_variable_declaration(false)
                .map(Statement::Variable),
            "function" => self
                .parse_function_declaration(false, false)
                .map(Statement::Function),
            "async" if self.peek.is_keyword("function") => {
                self.advance();
                self.parse_function_declaration(true, false)
                    .map(Statement::Function)
            }
            "if" => self.parse_if_statement(),
            "for" => self.parse_for_statement(),
            "while" => self.parse_while_statement(),
            "return" => self.parse_return_statement(),
            "type" => self.parse_type_alias(),
            "interface" => self.parse_interface(),
            "class" => self.parse_class_declaration(),
            "export" => self.parse_export_statement(),
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_export_statement(&mut self) -> Option<Statement> {
        self.advance();
        match self.current.text.as_str() {
            "let" | "const" | "var" => {
                self.parse_variable_declaration(true).map(Statement::Variable)
            }
            "function" => self
                .parse_function_declaration(false, true)
                .map(Statement::Function),
            "async" if self.peek.is_keyword("function") => {
                self.advance();
                self.parse_function_declaration(true, true)
                    .map(Statement::Function)
            }
            _ => self.parse_statement(),
        }
    }

    /// `let/const/var name: Type = value;`
    fn parse_variable_declaration(&mut self, exported: bool) -> Option<VariableDeclaration> {
        let kind = match self.current.text.as_str() {
            "const" => VariableKind::Const,
            "var" => VariableKind::Var,
            _ => VariableKind::Let,
        };

        if !self.expect_peek(TokenKind::Ident) {
            return None;
        }
        let name = self.current.text.clone();

        let mut type_annotation = None;
        if self.peek.kind == TokenKind::Colon {
            self.advance();
            if !self.expect_peek_type_name() {
                return None;
            }
            type_annotation = Some(self.parse_type_text());
        }

        let mut init = None;
        if self.peek.kind == TokenKind::Assign {
            self.advance();
            self.advance();
            init = self.parse_expression(Precedence::Lowest);
        }

        if self.peek.kind == TokenKind::Semicolon {
            self.advance();
        }

        Some(VariableDeclaration {
            kind,
            name,
            type_annotation,
            init,
            exported,
        })
    }

    /// `function name(params): ReturnType { body }`
    fn parse_function_declaration(
        &mut self,
        is_async: bool,
        exported: bool,
    ) -> Option<FunctionDeclaration> {
        if !self.expect_peek(TokenKind::Ident) {
            return None;
        }
        let name = self.current.text.clone();

        if !self.expect_peek(TokenKind::LParen) {
            return None;
        }
        let params = self.parse_function_parameters()?;

        let mut return_type = None;
        if self.peek.kind == TokenKind::Colon {
            self.advance();
            if !self.expect_peek_type_name() {
                return None;
            }
            return_type = Some(self.parse_type_text());
        }

        if !self.expect_peek(TokenKind::LBrace) {
            return None;
        }
        let body = self.parse_block_statement();

        Some(FunctionDeclaration {
            name,
            params,
            return_type,
            body,
            is_async,
            exported,
        })
    }

    /// Comma-separated parameters; each with optional `?`, `: Type` and
    /// `= default`. Current token must be the opening parenthesis.
    fn parse_function_parameters(&mut self) -> Option<Vec<Parameter>> {
        let mut params = Vec::new();

        if self.peek.kind == TokenKind::RParen {
            self.advance();
            return Some(params);
        }

        loop {
            if !self.expect_peek(TokenKind::Ident) {
                return None;
            }
            let mut param = Parameter {
                name: self.current.text.clone(),
                type_annotation: None,
                default: None,
                optional: false,
            };

            // `name?: Type` lexes `?:` as a single token
            if self.peek.kind == TokenKind::Optional {
                param.optional = true;
                self.advance();
                if !self.expect_peek_type_name() {
                    return None;
                }
                param.type_annotation = Some(self.parse_type_text());
            } else if self.peek.kind == TokenKind::Question {
                param.optional = true;
                self.advance();
            } else if self.peek.kind == TokenKind::Colon {
                self.advance();
                if !self.expect_peek_type_name() {
                    return None;
                }
                param.type_annotation = Some(self.parse_type_text());
            }

            if self.peek.kind == TokenKind::Assign {
                self.advance();
                self.advance();
                param.default = self.parse_expression(Precedence::Lowest);
            }

            params.push(param);

            if self.peek.kind != TokenKind::Comma {
                break;
            }
            self.advance();
            if self.peek.kind == TokenKind::RParen {
                break;
            }
        }

        if !self.expect_peek(TokenKind::RParen) {
            return None;
        }
        Some(params)
    }

    fn parse_if_statement(&mut self) -> Option<Statement> {
        if !self.expect_peek(TokenKind::LParen) {
            return None;
        }
        self.advance();
        let condition = self.parse_expression(Precedence::Lowest)?;
        if !self.expect_peek(TokenKind::RParen) {
            return None;
        }
        if !self.expect_peek(TokenKind::LBrace) {
            return None;
        }
        let then_branch = Box::new(Statement::Block(self.parse_block_statement()));

        let mut else_branch = None;
        if self.peek.is_keyword("else") {
            self.advance();
            if self.peek.is_keyword("if") {
                self.advance();
                else_branch = self.parse_if_statement().map(Box::new);
            } else if self.expect_peek(TokenKind::LBrace) {
                else_branch = Some(Box::new(Statement::Block(self.parse_block_statement())));
            } else {
                return None;
            }
        }

        Some(Statement::If(IfStatement {
            condition,
            then_branch,
            else_branch,
        }))
    }

    fn parse_for_statement(&mut self) -> Option<Statement> {
        if !self.expect_peek(TokenKind::LParen) {
            return None;
        }

        self.advance();
        let mut init = None;
        if self.current.kind != TokenKind::Semicolon {
            init = self.parse_statement().map(Box::new);
            // Declarations and assignments consume an optional trailing
            // semicolon, leaving the separator as the current token
            if self.current.kind != TokenKind::Semicolon && !self.expect_peek(TokenKind::Semicolon)
            {
                return None;
            }
        }

        self.advance();
        let mut condition = None;
        if self.current.kind != TokenKind::Semicolon {
            condition = self.parse_expression(Precedence::Lowest);
            if !self.expect_peek(TokenKind::Semicolon) {
                return None;
            }
        }

        self.advance();
        let mut update = None;
        if self.current.kind != TokenKind::RParen {
            update = self.parse_statement().map(Box::new);
        }

        if !self.expect_peek(TokenKind::RParen) {
            return None;
        }
        if !self.expect_peek(TokenKind::LBrace) {
            return None;
        }
        let body = Box::new(Statement::Block(self.parse_block_statement()));

        Some(Statement::For(ForStatement {
            init,
            condition,
            update,
            body,
        }))
    }

    fn parse_while_statement(&mut self) -> Option<Statement> {
        if !self.expect_peek(TokenKind::LParen) {
            return None;
        }
        self.advance();
        let condition = self.parse_expression(Precedence::Lowest)?;
        if !self.expect_peek(TokenKind::RParen) {
            return None;
        }
        if !self.expect_peek(TokenKind::LBrace) {
            return None;
        }
        let body = Box::new(Statement::Block(self.parse_block_statement()));

        Some(Statement::While(WhileStatement { condition, body }))
    }

    fn parse_return_statement(&mut self) -> Option<Statement> {
        if matches!(
            self.peek.kind,
            TokenKind::Semicolon | TokenKind::RBrace | TokenKind::Eof
        ) {
            if self.peek.kind == TokenKind::Semicolon {
                self.advance();
            }
            return Some(Statement::Return(ReturnStatement { value: None }));
        }

        self.advance();
        let value = self.parse_expression(Precedence::Lowest);
        if self.peek.kind == TokenKind::Semicolon {
            self.advance();
        }

        Some(Statement::Return(ReturnStatement { value }))
    }

    /// `{ statements... }`: current token must be the opening brace.
    /// Every iteration advances at least one token, so this terminates
    /// even on fully malformed input.
    fn parse_block_statement(&mut self) -> BlockStatement {
        let mut body = Vec::new();

        self.advance();
        while !matches!(self.current.kind, TokenKind::RBrace | TokenKind::Eof) {
            if let Some(statement) = self.parse_statement() {
                body.push(statement);
            }
            self.advance();
        }

        if self.current.kind == TokenKind::Eof {
            self.diagnostics.push(format!(
                "expected next token to be {}, got {} instead",
                TokenKind::RBrace,
                TokenKind::Eof
            ));
        }

        BlockStatement { body }
    }

    fn parse_assignment_statement(&mut self) -> Option<Statement> {
        let name = self.current.text.clone();
        if !self.expect_peek(TokenKind::Assign) {
            return None;
        }
        self.advance();
        let value = self.parse_expression(Precedence::Lowest)?;
        if self.peek.kind == TokenKind::Semicolon {
            self.advance();
        }

        Some(Statement::Assignment(AssignmentStatement { name, value }))
    }

    /// `x += e` and friends desugar to `x = x <op> e`, keeping the
    /// statement model down to plain assignment.
    fn parse_compound_assignment(&mut self) -> Option<Statement> {
        let name = self.current.text.clone();
        self.advance();
        let operator = match self.current.kind {
            TokenKind::PlusAssign => "+",
            TokenKind::MinusAssign => "-",
            TokenKind::StarAssign => "*",
            _ => "/",
        };
        self.advance();
        let right = self.parse_expression(Precedence::Lowest)?;
        if self.peek.kind == TokenKind::Semicolon {
            self.advance();
        }

        Some(Statement::Assignment(AssignmentStatement {
            name: name.clone(),
            value: Expression::Infix(InfixExpression {
                left: Some(Box::new(Expression::Identifier(name))),
                operator: operator.to_string(),
                right: Box::new(right),
            }),
        }))
    }

    /// Postfix `x++`/`x--` desugars to `x = x + 1` / `x = x - 1`.
    fn parse_update_statement(&mut self) -> Option<Statement> {
        let name = self.current.text.clone();
        self.advance();
        let operator = if self.current.kind == TokenKind::Increment {
            "+"
        } else {
            "-"
        };
        if self.peek.kind == TokenKind::Semicolon {
            self.advance();
        }

        Some(Statement::Assignment(AssignmentStatement {
            name: name.clone(),
            value: Expression::Infix(InfixExpression {
                left: Some(Box::new(Expression::Identifier(name))),
                operator: operator.to_string(),
                right: Box::new(Expression::NumberLiteral("1".to_string())),
            }),
        }))
    }

    fn parse_expression_statement(&mut self) -> Option<Statement> {
        let mut expression = self.parse_expression(Precedence::Lowest)?;

        // Assignment to a member or index target (`this.x = v`, `a[i] += v`)
        // stays an expression statement with an `=` infix node
        if matches!(
            self.peek.kind,
            TokenKind::Assign
                | TokenKind::PlusAssign
                | TokenKind::MinusAssign
                | TokenKind::StarAssign
                | TokenKind::SlashAssign
        ) {
            self.advance();
            let compound = match self.current.kind {
                TokenKind::PlusAssign => Some("+"),
                TokenKind::MinusAssign => Some("-"),
                TokenKind::StarAssign => Some("*"),
                TokenKind::SlashAssign => Some("/"),
                _ => None,
            };
            self.advance();
            let right = self.parse_expression(Precedence::Lowest)?;
            let value = match compound {
                Some(op) => Expression::Infix(InfixExpression {
                    left: Some(Box::new(expression.clone())),
                    operator: op.to_string(),
                    right: Box::new(right),
                }),
                None => right,
            };
            expression = Expression::Infix(InfixExpression {
                left: Some(Box::new(expression)),
                operator: "=".to_string(),
                right: Box::new(value),
            });
        }

        if self.peek.kind == TokenKind::Semicolon {
            self.advance();
        }

        Some(Statement::Expression(ExpressionStatement { expression }))
    }

    /// `type Name = ...;`: the right-hand side is kept as text only.
    fn parse_type_alias(&mut self) -> Option<Statement> {
        if !self.expect_peek(TokenKind::Ident) {
            return None;
        }
        let name = self.current.text.clone();
        if !self.expect_peek(TokenKind::Assign) {
            return None;
        }
        if !self.expect_peek_type_name() {
            return None;
        }
        let aliased = self.parse_type_text();
        if self.peek.kind == TokenKind::Semicolon {
            self.advance();
        }

        Some(Statement::TypeAlias(TypeAliasDeclaration { name, aliased }))
    }

    fn parse_interface(&mut self) -> Option<Statement> {
        if !self.expect_peek(TokenKind::Ident) {
            return None;
        }
        let name = self.current.text.clone();
        if !self.expect_peek(TokenKind::LBrace) {
            return None;
        }

        let mut fields = Vec::new();
        self.advance();
        while !matches!(self.current.kind, TokenKind::RBrace | TokenKind::Eof) {
            if matches!(self.current.kind, TokenKind::Semicolon | TokenKind::Comma) {
                self.advance();
                continue;
            }

            if matches!(self.current.kind, TokenKind::Ident | TokenKind::Keyword) {
                let field_name = self.current.text.clone();
                let mut optional = false;
                let ok = if self.peek.kind == TokenKind::Optional {
                    optional = true;
                    self.advance();
                    self.expect_peek_type_name()
                } else if self.peek.kind == TokenKind::Colon {
                    self.advance();
                    self.expect_peek_type_name()
                } else {
                    self.peek_error(TokenKind::Colon);
                    false
                };
                if ok {
                    let type_annotation = self.parse_type_text();
                    fields.push(InterfaceField {
                        name: field_name,
                        type_annotation,
                        optional,
                    });
                }
            } else {
                self.diagnostics.push(format!(
                    "expected next token to be {}, got {} instead",
                    TokenKind::Ident,
                    self.current.kind
                ));
            }
            self.advance();
        }

        Some(Statement::Interface(InterfaceDeclaration { name, fields }))
    }

    fn parse_class_declaration(&mut self) -> Option<Statement> {
        if !self.expect_peek(TokenKind::Ident) {
            return None;
        }
        let name = self.current.text.clone();

        let mut super_class = None;
        if self.peek.is_keyword("extends") {
            self.advance();
            if !self.expect_peek(TokenKind::Ident) {
                return None;
            }
            super_class = Some(self.current.text.clone());
        }

        if !self.expect_peek(TokenKind::LBrace) {
            return None;
        }

        let mut fields = Vec::new();
        let mut methods = Vec::new();
        self.advance();
        while !matches!(self.current.kind, TokenKind::RBrace | TokenKind::Eof) {
            if self.current.kind == TokenKind::Semicolon {
                self.advance();
                continue;
            }
            self.parse_class_member(&mut fields, &mut methods);
            self.advance();
        }

        Some(Statement::Class(ClassDeclaration {
            name,
            super_class,
            fields,
            methods,
        }))
    }

    /// One class member: modifiers, then a field or a method, told apart
    /// by whether a `(` follows the name.
    fn parse_class_member(&mut self, fields: &mut Vec<ClassField>, methods: &mut Vec<ClassMethod>) {
        let mut is_static = false;
        let mut is_private = false;
        let mut is_readonly = false;

        while self.current.kind == TokenKind::Keyword {
            match self.current.text.as_str() {
                "public" => {}
                "private" | "protected" => is_private = true,
                "readonly" => is_readonly = true,
                "static" => is_static = true,
                _ => break,
            }
            self.advance();
        }

        if self.current.kind != TokenKind::Ident {
            self.diagnostics.push(format!(
                "expected next token to be {}, got {} instead",
                TokenKind::Ident,
                self.current.kind
            ));
            return;
        }
        let name = self.current.text.clone();

        if self.peek.kind == TokenKind::LParen {
            self.advance();
            let Some(params) = self.parse_function_parameters() else {
                return;
            };
            let mut return_type = None;
            if self.peek.kind == TokenKind::Colon {
                self.advance();
                if !self.expect_peek_type_name() {
                    return;
                }
                return_type = Some(self.parse_type_text());
            }
            if !self.expect_peek(TokenKind::LBrace) {
                return;
            }
            let body = self.parse_block_statement();
            methods.push(ClassMethod {
                name,
                params,
                return_type,
                body,
                is_static,
                is_private,
            });
        } else {
            let mut type_annotation = None;
            if matches!(self.peek.kind, TokenKind::Colon | TokenKind::Optional) {
                self.advance();
                if self.expect_peek_type_name() {
                    type_annotation = Some(self.parse_type_text());
                }
            }
            let mut value = None;
            if self.peek.kind == TokenKind::Assign {
                self.advance();
                self.advance();
                value = self.parse_expression(Precedence::Lowest);
            }
            if self.peek.kind == TokenKind::Semicolon {
                self.advance();
            }
            fields.push(ClassField {
                name,
                type_annotation,
                value,
                is_private,
                is_readonly,
                is_static,
            });
        }
    }

    // ============ TYPE TEXT ============

    /// Reads a type annotation as provenance text: a name, `[]` array
    /// suffixes and `|` unions. Current token must be the first token of
    /// the type.
    fn parse_type_text(&mut self) -> String {
        let mut text = self.parse_type_component();
        while self.peek.kind == TokenKind::Pipe {
            self.advance();
            if matches!(
                self.peek.kind,
                TokenKind::Ident | TokenKind::Keyword | TokenKind::String
            ) {
                self.advance();
                text.push_str(" | ");
                text.push_str(&self.parse_type_component());
            } else {
                self.peek_error(TokenKind::Ident);
                break;
            }
        }
        text
    }

    fn parse_type_component(&mut self) -> String {
        let mut text = if self.current.kind == TokenKind::String {
            format!("\"{}\"", self.current.text)
        } else {
            self.current.text.clone()
        };
        while self.peek.kind == TokenKind::LBracket {
            self.advance();
            if self.expect_peek(TokenKind::RBracket) {
                text.push_str("[]");
            } else {
                break;
            }
        }
        text
    }

    // ============ EXPRESSIONS ============

    fn parse_expression(&mut self, precedence: Precedence) -> Option<Expression> {
        let mut left = self.parse_prefix()?;

        while self.peek.kind != TokenKind::Semicolon && precedence < self.peek_precedence() {
            left = match self.peek.kind {
                TokenKind::Plus
                | TokenKind::Minus
                | TokenKind::Star
                | TokenKind::Slash
                | TokenKind::Percent
                | TokenKind::Eq
                | TokenKind::NotEq
                | TokenKind::Lt
                | TokenKind::Gt
                | TokenKind::LtEq
                | TokenKind::GtEq
                | TokenKind::And
                | TokenKind::Or => {
                    self.advance();
                    self.parse_infix_expression(left)?
                }
                TokenKind::LParen => {
                    self.advance();
                    self.parse_call_expression(left)?
                }
                TokenKind::LBracket => {
                    self.advance();
                    self.parse_index_expression(left)?
                }
                TokenKind::Dot => {
                    self.advance();
                    self.parse_member_expression(left)?
                }
                _ => break,
            };
        }

        Some(left)
    }

    fn parse_prefix(&mut self) -> Option<Expression> {
        match self.current.kind {
            TokenKind::Ident => Some(Expression::Identifier(self.current.text.clone())),
            TokenKind::Number => Some(Expression::NumberLiteral(self.current.text.clone())),
            TokenKind::String => Some(Expression::StringLiteral(self.current.text.clone())),
            TokenKind::Template => Some(self.parse_template_literal()),
            TokenKind::Keyword => self.parse_keyword_expression(),
            TokenKind::Bang | TokenKind::Minus => self.parse_prefix_expression(),
            TokenKind::LParen => self.parse_grouped_expression(),
            TokenKind::LBracket => self.parse_array_literal(),
            TokenKind::LBrace => self.parse_object_literal(),
            _ => {
                self.diagnostics.push(format!(
                    "no prefix parse function for {} found",
                    self.current.kind
                ));
                None
            }
        }
    }

    fn parse_keyword_expression(&mut self) -> Option<Expression> {
        match self.current.text.as_str() {
            "true" => Some(Expression::BooleanLiteral(true)),
            "false" => Some(Expression::BooleanLiteral(false)),
            "new" => {
                self.advance();
                let right = self.parse_expression(Precedence::Prefix)?;
                Some(Expression::Infix(InfixExpression {
                    left: None,
                    operator: "new ".to_string(),
                    right: Box::new(right),
                }))
            }
            _ => Some(Expression::Identifier(self.current.text.clone())),
        }
    }

    /// Prefix `-x` / `!x` become infix nodes with an absent left side.
    fn parse_prefix_expression(&mut self) -> Option<Expression> {
        let operator = self.current.text.clone();
        self.advance();
        let right = self.parse_expression(Precedence::Prefix)?;

        Some(Expression::Infix(InfixExpression {
            left: None,
            operator,
            right: Box::new(right),
        }))
    }

    fn parse_infix_expression(&mut self, left: Expression) -> Option<Expression> {
        let operator = self.current.text.clone();
        let precedence = self.current_precedence();
        self.advance();
        let right = self.parse_expression(precedence)?;

        Some(Expression::Infix(InfixExpression {
            left: Some(Box::new(left)),
            operator,
            right: Box::new(right),
        }))
    }

    fn parse_grouped_expression(&mut self) -> Option<Expression> {
        self.advance();
        let expression = self.parse_expression(Precedence::Lowest)?;
        if !self.expect_peek(TokenKind::RParen) {
            return None;
        }
        Some(expression)
    }

    fn parse_array_literal(&mut self) -> Option<Expression> {
        let elements = self.parse_expression_list(TokenKind::RBracket)?;
        Some(Expression::Array(elements))
    }

    /// `{ key: value, ... }`: keys are identifiers, keywords or string
    /// literals; insertion order is preserved.
    fn parse_object_literal(&mut self) -> Option<Expression> {
        let mut properties = indexmap::IndexMap::new();

        if self.peek.kind == TokenKind::RBrace {
            self.advance();
            return Some(Expression::Object(ObjectLiteral { properties }));
        }

        self.advance();
        loop {
            let key = match self.current.kind {
                TokenKind::Ident | TokenKind::Keyword | TokenKind::String => {
                    self.current.text.clone()
                }
                _ => {
                    self.diagnostics.push(format!(
                        "expected next token to be {}, got {} instead",
                        TokenKind::Ident,
                        self.current.kind
                    ));
                    return None;
                }
            };

            if !self.expect_peek(TokenKind::Colon) {
                return None;
            }
            self.advance();
            let value = self.parse_expression(Precedence::Lowest)?;
            properties.insert(key, value);

            if self.peek.kind != TokenKind::Comma {
                break;
            }
            self.advance();
            if self.peek.kind == TokenKind::RBrace {
                break;
            }
            self.advance();
        }

        if !self.expect_peek(TokenKind::RBrace) {
            return None;
        }

        Some(Expression::Object(ObjectLiteral { properties }))
    }

    fn parse_call_expression(&mut self, callee: Expression) -> Option<Expression> {
        let arguments = self.parse_expression_list(TokenKind::RParen)?;
        Some(Expression::Call(CallExpression {
            callee: Box::new(callee),
            arguments,
        }))
    }

    fn parse_index_expression(&mut self, object: Expression) -> Option<Expression> {
        self.advance();
        let property = self.parse_expression(Precedence::Lowest)?;
        if !self.expect_peek(TokenKind::RBracket) {
            return None;
        }

        Some(Expression::Member(MemberExpression {
            object: Box::new(object),
            property: Box::new(property),
            computed: true,
        }))
    }

    fn parse_member_expression(&mut self, object: Expression) -> Option<Expression> {
        if !matches!(self.peek.kind, TokenKind::Ident | TokenKind::Keyword) {
            self.peek_error(TokenKind::Ident);
            return None;
        }
        self.advance();
        let property = Expression::Identifier(self.current.text.clone());

        Some(Expression::Member(MemberExpression {
            object: Box::new(object),
            property: Box::new(property),
            computed: false,
        }))
    }

    /// Comma-separated expressions up to `end`; tolerates a trailing
    /// comma by looking ahead to the closing delimiter.
    fn parse_expression_list(&mut self, end: TokenKind) -> Option<Vec<Expression>> {
        let mut items = Vec::new();

        if self.peek.kind == end {
            self.advance();
            return Some(items);
        }

        self.advance();
        items.push(self.parse_expression(Precedence::Lowest)?);

        while self.peek.kind == TokenKind::Comma {
            self.advance();
            if self.peek.kind == end {
                break;
            }
            self.advance();
            items.push(self.parse_expression(Precedence::Lowest)?);
        }

        if !self.expect_peek(end) {
            return None;
        }
        Some(items)
    }

    /// Splits the raw template text into alternating literal and
    /// interpolation parts. Each `${...}` chunk is re-lexed and parsed by
    /// a nested parser; its diagnostics join the outer list, and a chunk
    /// that fails to parse degrades back to literal text.
    fn parse_template_literal(&mut self) -> Expression {
        let raw = self.current.text.clone();
        let mut parts = Vec::new();
        let mut literal = String::new();

        let mut iter = raw.chars().peekable();
        while let Some(ch) = iter.next() {
            if ch == '$' && iter.peek() == Some(&'{') {
                iter.next();
                let mut inner = String::new();
                let mut depth = 1;
                for c in iter.by_ref() {
                    match c {
                        '{' => {
                            depth += 1;
                            inner.push(c);
                        }
                        '}' => {
                            depth -= 1;
                            if depth == 0 {
                                break;
                            }
                            inner.push(c);
                        }
                        _ => inner.push(c),
                    }
                }
                if depth != 0 {
                    self.diagnostics
                        .push("unterminated ${ interpolation in template literal".to_string());
                    literal.push_str("${");
                    literal.push_str(&inner);
                    continue;
                }

                if !literal.is_empty() {
                    parts.push(TemplatePart::Text(std::mem::take(&mut literal)));
                }

                let mut sub = Parser::new(Lexer::new(&inner));
                let expression = sub.parse_expression(Precedence::Lowest);
                self.diagnostics.append(&mut sub.diagnostics);
                match expression {
                    Some(expression) => parts.push(TemplatePart::Interpolation(expression)),
                    None => parts.push(TemplatePart::Text(format!("${{{inner}}}"))),
                }
            } else {
                literal.push(ch);
            }
        }

        if !literal.is_empty() || parts.is_empty() {
            parts.push(TemplatePart::Text(literal));
        }

        Expression::Template(TemplateLiteral { parts })
    }

    // ============ HELPERS ============

    fn advance(&mut self) {
        self.current = std::mem::replace(&mut self.peek, next_meaningful(&mut self.lexer));
    }

    fn expect_peek(&mut self, kind: TokenKind) -> bool {
        if self.peek.kind == kind {
            self.advance();
            true
        } else {
            self.peek_error(kind);
            false
        }
    }

    /// Type names may be identifiers, keywords (`number`, `string`, ...)
    /// or string-literal types.
    fn expect_peek_type_name(&mut self) -> bool {
        if matches!(
            self.peek.kind,
            TokenKind::Ident | TokenKind::Keyword | TokenKind::String
        ) {
            self.advance();
            true
        } else {
            self.peek_error(TokenKind::Ident);
            false
        }
    }

    fn peek_error(&mut self, kind: TokenKind) {
        self.diagnostics.push(format!(
            "expected next token to be {}, got {} instead",
            kind, self.peek.kind
        ));
    }

    fn current_precedence(&self) -> Precedence {
        precedence_of(self.current.kind)
    }

    fn peek_precedence(&self) -> Precedence {
        precedence_of(self.peek.kind)
    }
}

/// Refills lookahead, transparently skipping comment tokens so no parsing
/// rule ever observes one.
fn next_meaningful(lexer: &mut Lexer<'_>) -> Token {
    loop {
        let token = lexer.next_token();
        if token.kind != TokenKind::Comment {
            return token;
        }
    }
}
