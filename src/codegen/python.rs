//! Python code generator
//!
//! No braces, no static types: blocks become indentation, booleans are
//! capitalized, `const` survives only as a trailing comment marker, and
//! C-style `for` loops are emulated with `while`. `this` maps to `self`
//! and `null`/`undefined` to `None`.

use super::{console_log_args, Emitter};
use crate::ast::*;

pub struct PythonGenerator {
    out: Emitter,
}

impl PythonGenerator {
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
                let marker = if decl.kind == VariableKind::Const {
                    "  # const"
                } else {
                    ""
                };
                let text = match &decl.init {
                    Some(init) => {
                        format!("{} = {}{marker}", decl.name, self.expression(init))
                    }
                    None => format!("{} = None{marker}", decl.name),
                };
                self.out.line(&text);
            }
            Statement::Function(decl) => {
                let keyword = if decl.is_async { "async def" } else { "def" };
                let params = self.parameter_list(&decl.params, false);
                let header = format!("{keyword} {}({params}):", decl.name);
                self.out.line(&header);
                self.block_body(&decl.body);
            }
            Statement::If(stmt) => self.if_statement(stmt, "if"),
            Statement::For(stmt) => self.for_statement(stmt),
            Statement::While(stmt) => {
                let header = format!("while {}:", self.expression(&stmt.condition));
                self.out.line(&header);
                self.body(&stmt.body);
            }
            Statement::Block(block) => {
                // Python has no bare block statement; inline the contents
                for inner in &block.body {
                    self.statement(inner);
                }
            }
            Statement::Return(stmt) => match &stmt.value {
                Some(value) => {
                    let text = format!("return {}", self.expression(value));
                    self.out.line(&text);
                }
                None => self.out.line("return"),
            },
            Statement::Expression(stmt) => {
                let text = self.expression(&stmt.expression);
                self.out.line(&text);
            }
            Statement::Assignment(stmt) => {
                let text = format!("{} = {}", stmt.name, self.expression(&stmt.value));
                self.out.line(&text);
            }
            Statement::TypeAlias(_) => {}
            Statement::Interface(_) => {}
            Statement::Class(decl) => self.class_declaration(decl),
        }
    }

    /// Default values are native; `self` is prepended for methods.
    fn parameter_list(&mut self, params: &[Parameter], method: bool) -> String {
        let mut out = String::new();
        if method {
            out.push_str("self");
        }
        for (i, param) in params.iter().enumerate() {
            if i > 0 || method {
                out.push_str(", ");
            }
            out.push_str(&param.name);
            if let Some(default) = &param.default {
                out.push('=');
                out.push_str(&self.expression(default));
            }
        }
        out
    }

    fn if_statement(&mut self, stmt: &IfStatement, keyword: &str) {
        let header = format!("{keyword} {}:", self.expression(&stmt.condition));
        self.out.line(&header);
        self.body(&stmt.then_branch);
        match &stmt.else_branch {
            None => {}
            Some(else_branch) => match else_branch.as_ref() {
                Statement::If(nested) => self.if_statement(nested, "elif"),
                other => {
                    self.out.line("else:");
                    self.body(other);
                }
            },
        }
    }

    /// `for (init; cond; update)` has no Python counterpart; emit the
    /// init, then a `while` with the update at the end of the body.
    fn for_statement(&mut self, stmt: &ForStatement) {
        if let Some(init) = &stmt.init {
            self.statement(init);
        }
        let condition = match &stmt.condition {
            Some(condition) => self.expression(condition),
            None => "True".to_string(),
        };
        let header = format!("while {condition}:");
        self.out.line(&header);
        self.out.indent();
        match stmt.body.as_ref() {
            Statement::Block(block) => {
                for inner in &block.body {
                    self.statement(inner);
                }
            }
            other => self.statement(other),
        }
        if let Some(update) = &stmt.update {
            self.statement(update);
        }
        if is_empty_body(&stmt.body) && stmt.update.is_none() {
            self.out.line("pass");
        }
        self.out.dedent();
    }

    fn body(&mut self, statement: &Statement) {
        self.out.indent();
        match statement {
            Statement::Block(block) => {
                if is_empty_block(block) {
                    self.out.line("pass");
                } else {
                    for inner in &block.body {
                        self.statement(inner);
                    }
                }
            }
            other => self.statement(other),
        }
        self.out.dedent();
    }

    fn block_body(&mut self, block: &BlockStatement) {
        self.out.indent();
        if is_empty_block(block) {
            self.out.line("pass");
        } else {
            for statement in &block.body {
                self.statement(statement);
            }
        }
        self.out.dedent();
    }

    fn class_declaration(&mut self, decl: &ClassDeclaration) {
        let header = match &decl.super_class {
            Some(super_class) => format!("class {}({super_class}):", decl.name),
            None => format!("class {}:", decl.name),
        };
        self.out.line(&header);
        self.out.indent();

        let mut emitted = false;
        for field in &decl.fields {
            if let Some(value) = &field.value {
                let text = format!("{} = {}", field.name, self.expression(value));
                self.out.line(&text);
                emitted = true;
            }
        }

        for method in &decl.methods {
            if emitted {
                self.out.blank();
            }
            emitted = true;
            let name = if method.name == "constructor" {
                "__init__"
            } else {
                method.name.as_str()
            };
            if method.is_static {
                self.out.line("@staticmethod");
            }
            let params = self.parameter_list(&method.params, !method.is_static);
            let header = format!("def {name}({params}):");
            self.out.line(&header);
            self.block_body(&method.body);
        }

        if !emitted {
            self.out.line("pass");
        }
        self.out.dedent();
    }

    fn expression(&mut self, expression: &Expression) -> String {
        match expression {
            Expression::Identifier(name) => match name.as_str() {
                "this" => "self".to_string(),
                "null" | "undefined" => "None".to_string(),
                other => other.to_string(),
            },
            Expression::StringLiteral(value) => format!("\"{value}\""),
            Expression::NumberLiteral(value) => value.clone(),
            Expression::BooleanLiteral(value) => {
                if *value {
                    "True".to_string()
                } else {
                    "False".to_string()
                }
            }
            Expression::Array(elements) => {
                let items: Vec<String> = elements.iter().map(|e| self.expression(e)).collect();
                format!("[{}]", items.join(", "))
            }
            Expression::Object(object) => {
                let mut pairs = Vec::new();
                for (key, value) in &object.properties {
                    pairs.push(format!("\"{key}\": {}", self.expression(value)));
                }
                format!("{{{}}}", pairs.join(", "))
            }
            Expression::Call(call) => self.call_expression(call),
            Expression::Member(member) => {
                let object = self.expression(&member.object);
                let property = self.expression(&member.property);
                if member.computed {
                    format!("{object}[{property}]")
                } else {
                    format!("{object}.{property}")
                }
            }
            Expression::Infix(infix) => self.infix_expression(infix),
            Expression::Template(template) => self.template_literal(template),
        }
    }

    fn call_expression(&mut self, call: &CallExpression) -> String {
        if let Some(arguments) = console_log_args(call) {
            let parts: Vec<String> = arguments.iter().map(|a| self.expression(a)).collect();
            return format!("print({})", parts.join(", "));
        }
        let callee = self.expression(&call.callee);
        let args: Vec<String> = call.arguments.iter().map(|a| self.expression(a)).collect();
        format!("{callee}({})", args.join(", "))
    }

    fn infix_expression(&mut self, infix: &InfixExpression) -> String {
        match &infix.left {
            Some(left) => {
                let operator = match infix.operator.as_str() {
                    "&&" => "and",
                    "||" => "or",
                    other => other,
                };
                format!(
                    "{} {operator} {}",
                    self.expression(left),
                    self.expression(&infix.right)
                )
            }
            None => match infix.operator.as_str() {
                "!" => format!("not {}", self.expression(&infix.right)),
                // `new` has no Python spelling; calling the class suffices
                "new " => self.expression(&infix.right),
                operator => format!("{operator}{}", self.expression(&infix.right)),
            },
        }
    }

    /// Interpolated templates become f-strings.
    fn template_literal(&mut self, template: &TemplateLiteral) -> String {
        let interpolated = template
            .parts
            .iter()
            .any(|p| matches!(p, TemplatePart::Interpolation(_)));
        let mut out = String::new();
        if interpolated {
            out.push('f');
        }
        out.push('"');
        for part in &template.parts {
            match part {
                TemplatePart::Text(text) => out.push_str(text),
                TemplatePart::Interpolation(expression) => {
                    out.push('{');
                    out.push_str(&self.expression(expression));
                    out.push('}');
                }
            }
        }
        out.push('"');
        out
    }
}

fn is_empty_block(block: &BlockStatement) -> bool {
    block
        .body
        .iter()
        .all(|s| matches!(s, Statement::TypeAlias(_) | Statement::Interface(_)))
}

fn is_empty_body(statement: &Statement) -> bool {
    match statement {
        Statement::Block(block) => is_empty_block(block),
        _ => false,
    }
}
