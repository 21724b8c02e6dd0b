//! C# code generator
//!
//! Declarations are typed from the initializer's literal kind, falling
//! back to `var`. C# has native default parameters and string
//! interpolation, so both are re-emitted directly.

use super::{console_log_args, Emitter};
use crate::ast::*;

pub struct CSharpGenerator {
    out: Emitter,
}

impl CSharpGenerator {
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
            Statement::Function(decl) => {
                let return_type = map_type(decl.return_type.as_deref().unwrap_or("void"));
                let params = self.parameter_list(&decl.params);
                let header = format!("static {return_type} {}({params}) {{", decl.name);
                self.out.line(&header);
                self.block_body(&decl.body);
                self.out.line("}");
            }
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
        let cs_type = infer_type(decl.init.as_ref());
        match &decl.init {
            Some(init) => format!("{cs_type} {} = {};", decl.name, self.expression(init)),
            None => format!("object {};", decl.name),
        }
    }

    /// Typed parameters; default values are valid C# and kept.
    fn parameter_list(&mut self, params: &[Parameter]) -> String {
        let mut out = String::new();
        for (i, param) in params.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push_str(map_type(param.type_annotation.as_deref().unwrap_or("any")));
            out.push(' ');
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
            Some(super_class) => format!("class {} : {super_class} {{", decl.name),
            None => format!("class {} {{", decl.name),
        };
        self.out.line(&header);
        self.out.indent();

        for field in &decl.fields {
            let visibility = if field.is_private { "private" } else { "public" };
            let static_ = if field.is_static { " static" } else { "" };
            let readonly = if field.is_readonly { " readonly" } else { "" };
            let cs_type = match &field.type_annotation {
                Some(annotation) => map_type(annotation),
                None => infer_type(field.value.as_ref()),
            };
            let text = match &field.value {
                Some(value) => format!(
                    "{visibility}{static_}{readonly} {cs_type} {} = {};",
                    field.name,
                    self.expression(value)
                ),
                None => format!("{visibility}{static_}{readonly} {cs_type} {};", field.name),
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
            let header = if method.name == "constructor" {
                format!("{visibility} {}({params}) {{", decl.name)
            } else {
                let return_type = map_type(method.return_type.as_deref().unwrap_or("void"));
                format!("{visibility}{static_} {return_type} {}({params}) {{", method.name)
            };
            self.out.line(&header);
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
                format!("new object[] {{ {} }}", items.join(", "))
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
            return format!("Console.WriteLine({})", parts.join(" + \", \" + "));
        }
        let callee = self.expression(&call.callee);
        let args: Vec<String> = call.arguments.iter().map(|a| self.expression(a)).collect();
        format!("{callee}({})", args.join(", "))
    }

    fn object_literal(&mut self, object: &ObjectLiteral) -> String {
        if object.properties.is_empty() {
            return "new Dictionary<string, object>()".to_string();
        }
        let mut out = String::from("new Dictionary<string, object> {\n");
        for (i, (key, value)) in object.properties.iter().enumerate() {
            if i > 0 {
                out.push_str(",\n");
            }
            out.push_str("    { \"");
            out.push_str(key);
            out.push_str("\", ");
            out.push_str(&self.expression(value));
            out.push_str(" }");
        }
        out.push_str("\n}");
        out
    }

    /// Templates map to interpolated strings.
    fn template_literal(&mut self, template: &TemplateLiteral) -> String {
        let mut out = String::from("$\"");
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

fn infer_type(init: Option<&Expression>) -> &'static str {
    match init {
        Some(Expression::StringLiteral(_)) => "string",
        Some(Expression::NumberLiteral(text)) => {
            if text.contains('.') {
                "double"
            } else {
                "int"
            }
        }
        Some(Expression::BooleanLiteral(_)) => "bool",
        Some(Expression::Template(_)) => "string",
        _ => "var",
    }
}

fn map_type(annotation: &str) -> &'static str {
    match annotation {
        "number" => "double",
        "string" => "string",
        "boolean" => "bool",
        "void" => "void",
        "number[]" => "double[]",
        "string[]" => "string[]",
        "boolean[]" => "bool[]",
        annotation if annotation.ends_with("[]") => "object[]",
        _ => "object",
    }
}
