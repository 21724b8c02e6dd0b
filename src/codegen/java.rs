//! Java code generator
//!
//! Java needs concrete static types, which are inferred from the
//! initializer's literal kind rather than from the source annotation.
//! `console.log` becomes `System.out.println` with arguments joined by a
//! `", "` concatenation; object literals become anonymous `HashMap`
//! double-brace initializers. Default parameter values cannot be
//! expressed in a fixed-arity language and are dropped with an
//! explanatory comment, never silently kept as required parameters.

use super::{console_log_args, Emitter};
use crate::ast::*;

pub struct JavaGenerator {
    out: Emitter,
}

impl JavaGenerator {
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
                self.block_body(block);
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
            Statement::TypeAlias(_) => {}
            Statement::Interface(_) => {}
            Statement::Class(decl) => self.class_declaration(decl),
        }
    }

    fn variable_declaration(&mut self, decl: &VariableDeclaration) -> String {
        let prefix = if decl.kind == VariableKind::Const {
            "final "
        } else {
            ""
        };
        let java_type = infer_type(decl.init.as_ref());
        match &decl.init {
            Some(init) => format!(
                "{prefix}{java_type} {} = {};",
                decl.name,
                self.expression(init)
            ),
            None => format!("{prefix}{java_type} {};", decl.name),
        }
    }

    fn function_declaration(&mut self, decl: &FunctionDeclaration) {
        let return_type = map_type(decl.return_type.as_deref().unwrap_or("void"));
        let params = self.parameter_list(&decl.params);
        let header = format!("public static {return_type} {}({params}) {{", decl.name);
        self.out.line(&header);
        self.default_parameter_notes(&decl.params);
        self.block_body(&decl.body);
        self.out.line("}");
    }

    /// Typed parameter list; default values are not representable in Java.
    fn parameter_list(&mut self, params: &[Parameter]) -> String {
        let mut out = String::new();
        for (i, param) in params.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push_str(map_type(param.type_annotation.as_deref().unwrap_or("any")));
            out.push(' ');
            out.push_str(&param.name);
        }
        out
    }

    fn default_parameter_notes(&mut self, params: &[Parameter]) {
        self.out.indent();
        for param in params {
            if param.default.is_some() {
                let note = format!(
                    "// parameter '{}' has a default value in the source; Java has no default parameters",
                    param.name
                );
                self.out.line(&note);
            }
        }
        self.out.dedent();
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

        for field in &decl.fields {
            let visibility = if field.is_private { "private" } else { "public" };
            let static_ = if field.is_static { " static" } else { "" };
            let final_ = if field.is_readonly { " final" } else { "" };
            let java_type = match &field.type_annotation {
                Some(annotation) => map_type(annotation).to_string(),
                None => infer_type(field.value.as_ref()).to_string(),
            };
            let text = match &field.value {
                Some(value) => format!(
                    "{visibility}{static_}{final_} {java_type} {} = {};",
                    field.name,
                    self.expression(value)
                ),
                None => format!("{visibility}{static_}{final_} {java_type} {};", field.name),
            };
            self.out.line(&text);
        }

        for (i, method) in decl.methods.iter().enumerate() {
            if i > 0 || !decl.fields.is_empty() {
                self.out.blank();
            }
            let visibility = if method.is_private { "private" } else { "public" };
            let static_ = if method.is_static { " static" } else { "" };
            let params = self.parameter_list(&method.params);
            // The constructor takes the class name and has no return type
            let header = if method.name == "constructor" {
                format!("{visibility} {}({params}) {{", decl.name)
            } else {
                let return_type = map_type(method.return_type.as_deref().unwrap_or("void"));
                format!("{visibility}{static_} {return_type} {}({params}) {{", method.name)
            };
            self.out.line(&header);
            self.default_parameter_notes(&method.params);
            self.block_body(&method.body);
            self.out.line("}");
        }

        self.out.dedent();
        self.out.line("}");
    }

    fn expression(&mut self, expression: &Expression) -> String {
        match expression {
            Expression::Identifier(name) => match name.as_str() {
                "undefined" => "null".to_string(),
                other => other.to_string(),
            },
            Expression::StringLiteral(value) => format!("\"{value}\""),
            Expression::NumberLiteral(value) => value.clone(),
            Expression::BooleanLiteral(value) => value.to_string(),
            Expression::Array(elements) => {
                let items: Vec<String> = elements.iter().map(|e| self.expression(e)).collect();
                format!("new Object[]{{{}}}", items.join(", "))
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
                None => format!("{}{}", infix.operator, self.expression(&infix.right)),
            },
            Expression::Template(template) => self.template_literal(template),
        }
    }

    fn call_expression(&mut self, call: &CallExpression) -> String {
        if let Some(arguments) = console_log_args(call) {
            let parts: Vec<String> = arguments.iter().map(|a| self.expression(a)).collect();
            return format!("System.out.println({})", parts.join(" + \", \" + "));
        }
        let callee = self.expression(&call.callee);
        let args: Vec<String> = call.arguments.iter().map(|a| self.expression(a)).collect();
        format!("{callee}({})", args.join(", "))
    }

    /// Anonymous `HashMap` subclass with an instance-initializer block.
    fn object_literal(&mut self, object: &ObjectLiteral) -> String {
        if object.properties.is_empty() {
            return "new HashMap<String, Object>()".to_string();
        }
        let mut out = String::from("new HashMap<String, Object>() {{\n");
        for (key, value) in &object.properties {
            out.push_str("    put(\"");
            out.push_str(key);
            out.push_str("\", ");
            out.push_str(&self.expression(value));
            out.push_str(");\n");
        }
        out.push_str("}}");
        out
    }

    /// Templates become plain `+` concatenation of the quoted parts.
    fn template_literal(&mut self, template: &TemplateLiteral) -> String {
        let mut parts = Vec::new();
        for part in &template.parts {
            match part {
                TemplatePart::Text(text) => parts.push(format!("\"{text}\"")),
                TemplatePart::Interpolation(expression) => {
                    parts.push(self.expression(expression));
                }
            }
        }
        if parts.is_empty() {
            "\"\"".to_string()
        } else {
            parts.join(" + ")
        }
    }
}

/// Declared type for a variable, derived from the initializer's node
/// kind: the source annotation is deliberately not consulted.
fn infer_type(init: Option<&Expression>) -> &'static str {
    match init {
        Some(Expression::StringLiteral(_)) => "String",
        Some(Expression::NumberLiteral(text)) => {
            if text.contains('.') {
                "double"
            } else {
                "int"
            }
        }
        Some(Expression::BooleanLiteral(_)) => "boolean",
        Some(Expression::Array(_)) => "Object[]",
        Some(Expression::Object(_)) => "HashMap<String, Object>",
        Some(Expression::Template(_)) => "String",
        _ => "Object",
    }
}

/// Maps a source type annotation to a Java type for signatures, where
/// there is no initializer to infer from.
fn map_type(annotation: &str) -> &'static str {
    match annotation {
        "number" => "double",
        "string" => "String",
        "boolean" => "boolean",
        "void" => "void",
        "number[]" => "double[]",
        "string[]" => "String[]",
        "boolean[]" => "boolean[]",
        annotation if annotation.ends_with("[]") => "Object[]",
        _ => "Object",
    }
}
