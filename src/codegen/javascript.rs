//! JavaScript code generator
//!
//! The closest target to the source language: type annotations, interfaces
//! and type aliases are erased, everything else passes through.

use std::sync::LazyLock;

use rustc_hash::FxHashSet;

use super::Emitter;
use crate::ast::*;

/// Reserved words that force quoting when used as object keys.
static RESERVED_WORDS: LazyLock<FxHashSet<&'static str>> = LazyLock::new(|| {
    [
        "break", "case", "catch", "class", "const", "continue", "debugger", "default", "delete",
        "do", "else", "export", "extends", "finally", "for", "function", "if", "import", "in",
        "instanceof", "new", "return", "super", "switch", "this", "throw", "try", "typeof", "var",
        "void", "while", "with", "yield",
    ]
    .into_iter()
    .collect()
});

pub struct JavaScriptGenerator {
    out: Emitter,
}

impl JavaScriptGenerator {
    pub fn generate(program: &Program) -> String {
        let mut generator = Self {
            out: Emitter::new("    "),
        };
        for statement in &program.body {
            generator.statement(statement);
        }
        generator.out.finish()
    }

    fn statement(&mut self, statement: &Statement) {
        match statement {
            Statement::Variable(decl) => {
                let text = self.variable_declaration(decl);
                self.out.line(&text);
            }
            Statement::Function(decl) => self.function_declaration(decl),
            Statement::If(stmt) => self.if_statement(stmt, ""),
            Statement::For(stmt) => self.for_statement(stmt),
            Statement::While(stmt) => {
                let header = format!("while ({}) {{", self.expression(&stmt.condition));
                self.out.line(&header);
                self.body(&stmt.body);
                self.out.line("}");
            }
            Statement::Block(block) => {
                self.out.line("{");
                self.out.indent();
                for inner in &block.body {
                    self.statement(inner);
                }
                self.out.dedent();
                self.out.line("}");
            }
            Statement::Return(stmt) => match &stmt.value {
                Some(value) => {
                    let text = format!("return {};", self.expression(value));
                    self.out.line(&text);
                }
                None => self.out.line("return;"),
            },
            Statement::Expression(stmt) => {
                let text = format!("{};", self.expression(&stmt.expression));
                self.out.line(&text);
            }
            Statement::Assignment(stmt) => {
                let text = format!("{} = {};", stmt.name, self.expression(&stmt.value));
                self.out.line(&text);
            }
            // TypeScript-only constructs disappear in JavaScript
            Statement::TypeAlias(_) => {}
            Statement::Interface(_) => {}
            Statement::Class(decl) => self.class_declaration(decl),
        }
    }

    fn variable_declaration(&mut self, decl: &VariableDeclaration) -> String {
        let keyword = if decl.kind == VariableKind::Const {
            "const"
        } else {
            "let"
        };
        let export = if decl.exported { "export " } else { "" };
        match &decl.init {
            Some(init) => format!("{export}{keyword} {} = {};", decl.name, self.expression(init)),
            None => format!("{export}{keyword} {};", decl.name),
        }
    }

    fn function_declaration(&mut self, decl: &FunctionDeclaration) {
        let export = if decl.exported { "export " } else { "" };
        let keyword = if decl.is_async {
            "async function"
        } else {
            "function"
        };
        let params = self.parameter_list(&decl.params);
        let header = format!("{export}{keyword} {}({params}) {{", decl.name);
        self.out.line(&header);
        self.block_body(&decl.body);
        self.out.line("}");
    }

    /// Parameters keep their default values; type annotations are erased.
    fn parameter_list(&mut self, params: &[Parameter]) -> String {
        let mut out = String::new();
        for (i, param) in params.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push_str(&param.name);
            if let Some(default) = &param.default {
                out.push_str(" = ");
                out.push_str(&self.expression(default));
            }
        }
        out
    }

    fn if_statement(&mut self, stmt: &IfStatement, head: &str) {
        let header = format!("{head}if ({}) {{", self.expression(&stmt.condition));
        self.out.line(&header);
        self.body(&stmt.then_branch);
        match &stmt.else_branch {
            None => self.out.line("}"),
            Some(else_branch) => match else_branch.as_ref() {
                Statement::If(nested) => self.if_statement(nested, "} else "),
                other => {
                    self.out.line("} else {");
                    self.body(other);
                    self.out.line("}");
                }
            },
        }
    }

    fn for_statement(&mut self, stmt: &ForStatement) {
        let init = stmt
            .init
            .as_ref()
            .map(|s| self.inline_statement(s))
            .unwrap_or_default();
        let condition = stmt
            .condition
            .as_ref()
            .map(|c| self.expression(c))
            .unwrap_or_default();
        let update = stmt
            .update
            .as_ref()
            .map(|s| self.inline_statement(s))
            .unwrap_or_default();
        let header = format!("for ({init}; {condition}; {update}) {{");
        self.out.line(&header);
        self.body(&stmt.body);
        self.out.line("}");
    }

    /// Statement text without a trailing semicolon, for for-loop headers.
    fn inline_statement(&mut self, statement: &Statement) -> String {
        match statement {
            Statement::Variable(decl) => {
                let text = self.variable_declaration(decl);
                text.trim_end_matches(';').to_string()
            }
            Statement::Assignment(stmt) => {
                format!("{} = {}", stmt.name, self.expression(&stmt.value))
            }
            Statement::Expression(stmt) => self.expression(&stmt.expression),
            _ => String::new(),
        }
    }

    fn body(&mut self, statement: &Statement) {
        match statement {
            Statement::Block(block) => self.block_body(block),
            other => {
                self.out.indent();
                self.statement(other);
                self.out.dedent();
            }
        }
    }

    fn block_body(&mut self, block: &BlockStatement) {
        self.out.indent();
        for statement in &block.body {
            self.statement(statement);
        }
        self.out.dedent();
    }

    fn class_declaration(&mut self, decl: &ClassDeclaration) {
        let header = match &decl.super_class {
            Some(super_class) => format!("class {} extends {super_class} {{", decl.name),
            None => format!("class {} {{", decl.name),
        };
        self.out.line(&header);
        self.out.indent();

        // Only initialized fields survive type erasure
        for field in &decl.fields {
            if let Some(value) = &field.value {
                let prefix = if field.is_static { "static " } else { "" };
                let text = format!("{prefix}{} = {};", field.name, self.expression(value));
                self.out.line(&text);
            }
        }

        for (i, method) in decl.methods.iter().enumerate() {
            if i > 0 || decl.fields.iter().any(|f| f.value.is_some()) {
                self.out.blank();
            }
            let prefix = if method.is_static { "static " } else { "" };
            let params = self.parameter_list(&method.params);
            let header = format!("{prefix}{}({params}) {{", method.name);
            self.out.line(&header);
            self.block_body(&method.body);
            self.out.line("}");
        }

        self.out.dedent();
        self.out.line("}");
    }

    fn expression(&mut self, expression: &Expression) -> String {
        match expression {
            Expression::Identifier(name) => name.clone(),
            Expression::StringLiteral(value) => format!("\"{value}\""),
            Expression::NumberLiteral(value) => value.clone(),
            Expression::BooleanLiteral(value) => value.to_string(),
            Expression::Array(elements) => {
                let items: Vec<String> = elements.iter().map(|e| self.expression(e)).collect();
                format!("[{}]", items.join(", "))
            }
            Expression::Object(object) => self.object_literal(object),
            Expression::Call(call) => {
                let callee = self.expression(&call.callee);
                let args: Vec<String> =
                    call.arguments.iter().map(|a| self.expression(a)).collect();
                format!("{callee}({})", args.join(", "))
            }
            Expression::Member(member) => {
                let object = self.expression(&member.object);
                let property = self.expression(&member.property);
                if member.computed {
                    format!("{object}[{property}]")
                } else {
                    format!("{object}.{property}")
                }
            }
            Expression::Infix(infix) => match &infix.left {
                Some(left) => format!(
                    "{} {} {}",
                    self.expression(left),
                    infix.operator,
                    self.expression(&infix.right)
                ),
                None => format!("{}{}", infix.operator, self.expression(&infix.right)),
            },
            Expression::Template(template) => {
                let mut out = String::from("`");
                for part in &template.parts {
                    match part {
                        TemplatePart::Text(text) => out.push_str(text),
                        TemplatePart::Interpolation(expression) => {
                            out.push_str("${");
                            out.push_str(&self.expression(expression));
                            out.push('}');
                        }
                    }
                }
                out.push('`');
                out
            }
        }
    }

    fn object_literal(&mut self, object: &ObjectLiteral) -> String {
        if object.properties.is_empty() {
            return "{}".to_string();
        }
        let mut out = String::from("{\n");
        for (i, (key, value)) in object.properties.iter().enumerate() {
            if i > 0 {
                out.push_str(",\n");
            }
            out.push_str("    ");
            if needs_quotes(key) {
                out.push('"');
                out.push_str(key);
                out.push('"');
            } else {
                out.push_str(key);
            }
            out.push_str(": ");
            out.push_str(&self.expression(value));
        }
        out.push_str("\n}");
        out
    }
}

/// Object keys need quoting when they are not valid identifiers or when
/// they collide with a reserved word.
fn needs_quotes(key: &str) -> bool {
    if !is_valid_identifier(key) {
        return true;
    }
    RESERVED_WORDS.contains(key)
}

fn is_valid_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' || first == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}
