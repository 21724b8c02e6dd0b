//! Go-like code generator
//!
//! Brace-style control flow without parentheses, `const`/`var`
//! declarations typed from the initializer's literal kind with an
//! `interface{}` fallback, `fmt.Println` for console calls and
//! `fmt.Sprintf` for templates. Classes have no Go counterpart and
//! degrade to a placeholder comment.

use super::{console_log_args, Emitter};
use crate::ast::*;

pub struct GoGenerator {
    out: Emitter,
}

impl GoGenerator {
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
                // Go spells `while` as a bare `for`
                let header = format!("for {} {{", self.expression(&stmt.condition));
                self.out.line(&header);
                self.body(&stmt.body);
                self.out.line("}");
            }
            Statement::Block(block) => {
                self.out.line("{");
                self.block_body(block);
                self.out.line("}");
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
            Statement::Class(decl) => {
                // Graceful degradation: no class construct in this target
                let text = format!("// class {} is not supported in the Go target", decl.name);
                self.out.line(&text);
            }
        }
    }

    fn variable_declaration(&mut self, decl: &VariableDeclaration) -> String {
        let keyword = if decl.kind == VariableKind::Const {
            "const"
        } else {
            "var"
        };
        match &decl.init {
            Some(init) => {
                let value = self.expression(init);
                match infer_type(init) {
                    Some(go_type) => format!("{keyword} {} {go_type} = {value}", decl.name),
                    None => format!("{keyword} {} = {value}", decl.name),
                }
            }
            None => format!("var {} interface{{}}", decl.name),
        }
    }

    fn function_declaration(&mut self, decl: &FunctionDeclaration) {
        let params = self.parameter_list(&decl.params);
        let return_type = match decl.return_type.as_deref() {
            None | Some("void") => String::new(),
            Some(annotation) => format!(" {}", map_type(annotation)),
        };
        let header = format!("func {}({params}){return_type} {{", decl.name);
        self.out.line(&header);
        self.out.indent();
        for param in &decl.params {
            if param.default.is_some() {
                let note = format!(
                    "// parameter '{}' has a default value in the source; Go has no default parameters",
                    param.name
                );
                self.out.line(&note);
            }
        }
        self.out.dedent();
        self.block_body(&decl.body);
        self.out.line("}");
    }

    fn parameter_list(&mut self, params: &[Parameter]) -> String {
        let mut out = String::new();
        for (i, param) in params.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push_str(&param.name);
            out.push(' ');
            out.push_str(map_type(param.type_annotation.as_deref().unwrap_or("any")));
        }
        out
    }

    fn if_statement(&mut self, stmt: &IfStatement, head: &str) {
        let header = format!("{head}if {} {{", self.expression(&stmt.condition));
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
        let header = format!("for {init}; {condition}; {update} {{");
        self.out.line(&header);
        self.body(&stmt.body);
        self.out.line("}");
    }

    /// Loop-header form: declarations use `:=`, no semicolons.
    fn inline_statement(&mut self, statement: &Statement) -> String {
        match statement {
            Statement::Variable(decl) => match &decl.init {
                Some(init) => format!("{} := {}", decl.name, self.expression(init)),
                None => String::new(),
            },
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

    fn expression(&mut self, expression: &Expression) -> String {
        match expression {
            Expression::Identifier(name) => match name.as_str() {
                "null" | "undefined" => "nil".to_string(),
                other => other.to_string(),
            },
            Expression::StringLiteral(value) => format!("\"{value}\""),
            Expression::NumberLiteral(value) => value.clone(),
            Expression::BooleanLiteral(value) => value.to_string(),
            Expression::Array(elements) => {
                let items: Vec<String> = elements.iter().map(|e| self.expression(e)).collect();
                format!("[]interface{{}}{{{}}}", items.join(", "))
            }
            Expression::Object(object) => self.object_literal(object),
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
            Expression::Infix(infix) => match &infix.left {
                Some(left) => format!(
                    "{} {} {}",
                    self.expression(left),
                    infix.operator,
                    self.expression(&infix.right)
                ),
                None => match infix.operator.as_str() {
                    // No `new`: calling the identifier is the closest spelling
                    "new " => self.expression(&infix.right),
                    operator => format!("{operator}{}", self.expression(&infix.right)),
                },
            },
            Expression::Template(template) => self.template_literal(template),
        }
    }

    fn call_expression(&mut self, call: &CallExpression) -> String {
        if let Some(arguments) = console_log_args(call) {
            let parts: Vec<String> = arguments.iter().map(|a| self.expression(a)).collect();
            return format!("fmt.Println({})", parts.join(", "));
        }
        let callee = self.expression(&call.callee);
        let args: Vec<String> = call.arguments.iter().map(|a| self.expression(a)).collect();
        format!("{callee}({})", args.join(", "))
    }

    fn object_literal(&mut self, object: &ObjectLiteral) -> String {
        if object.properties.is_empty() {
            return "map[string]interface{}{}".to_string();
        }
        let mut out = String::from("map[string]interface{}{\n");
        for (key, value) in &object.properties {
            out.push_str("    \"");
            out.push_str(key);
            out.push_str("\": ");
            out.push_str(&self.expression(value));
            out.push_str(",\n");
        }
        out.push('}');
        out
    }

    /// Templates become a `fmt.Sprintf` with `%v` verbs.
    fn template_literal(&mut self, template: &TemplateLiteral) -> String {
        let mut format_string = String::new();
        let mut args = Vec::new();
        for part in &template.parts {
            match part {
                TemplatePart::Text(text) => format_string.push_str(text),
                TemplatePart::Interpolation(expression) => {
                    format_string.push_str("%v");
                    args.push(self.expression(expression));
                }
            }
        }
        if args.is_empty() {
            format!("\"{format_string}\"")
        } else {
            format!("fmt.Sprintf(\"{format_string}\", {})", args.join(", "))
        }
    }
}

/// Go type spelled from the initializer's literal kind; None means the
/// initializer expression already carries its type.
fn infer_type(init: &Expression) -> Option<&'static str> {
    match init {
        Expression::StringLiteral(_) => Some("string"),
        Expression::NumberLiteral(text) => {
            if text.contains('.') {
                Some("float64")
            } else {
                Some("int")
            }
        }
        Expression::BooleanLiteral(_) => Some("bool"),
        Expression::Array(_) | Expression::Object(_) => None,
        Expression::Template(_) => Some("string"),
        _ => Some("interface{}"),
    }
}

fn map_type(annotation: &str) -> &'static str {
    match annotation {
        "number" => "float64",
        "string" => "string",
        "boolean" => "bool",
        "number[]" => "[]float64",
        "string[]" => "[]string",
        "boolean[]" => "[]bool",
        annotation if annotation.ends_with("[]") => "[]interface{}",
        _ => "interface{}",
    }
}
