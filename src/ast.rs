//! Abstract syntax tree for the surface language
//!
//! Pure data: nodes are built bottom-up by the parser, never mutated
//! afterwards, and carry no back-references. The `Display` impls give the
//! structural printing used by tests and diagnostics; they are not a code
//! generator.

use indexmap::IndexMap;

/// A complete parsed program
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub body: Vec<Statement>,
}

impl std::fmt::Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for statement in &self.body {
            write!(f, "{statement}")?;
        }
        Ok(())
    }
}

// ============ STATEMENTS ============

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Variable(VariableDeclaration),
    Function(FunctionDeclaration),
    If(IfStatement),
    For(ForStatement),
    While(WhileStatement),
    Block(BlockStatement),
    Return(ReturnStatement),
    Expression(ExpressionStatement),
    Assignment(AssignmentStatement),
    TypeAlias(TypeAliasDeclaration),
    Interface(InterfaceDeclaration),
    Class(ClassDeclaration),
}

impl Statement {
    /// Stable name of the statement variant, used in parse reports.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Statement::Variable(_) => "VariableDeclaration",
            Statement::Function(_) => "FunctionDeclaration",
            Statement::If(_) => "IfStatement",
            Statement::For(_) => "ForStatement",
            Statement::While(_) => "WhileStatement",
            Statement::Block(_) => "BlockStatement",
            Statement::Return(_) => "ReturnStatement",
            Statement::Expression(_) => "ExpressionStatement",
            Statement::Assignment(_) => "AssignmentStatement",
            Statement::TypeAlias(_) => "TypeAlias",
            Statement::Interface(_) => "Interface",
            Statement::Class(_) => "ClassDeclaration",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableKind {
    Let,
    Const,
    Var,
}

impl VariableKind {
    pub fn as_str(self) -> &'static str {
        match self {
            VariableKind::Let => "let",
            VariableKind::Const => "const",
            VariableKind::Var => "var",
        }
    }
}

/// `let/const/var name: Type = value;`
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclaration {
    pub kind: VariableKind,
    pub name: String,
    pub type_annotation: Option<String>,
    pub init: Option<Expression>,
    pub exported: bool,
}

/// `function name(params): ReturnType { body }`
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDeclaration {
    pub name: String,
    pub params: Vec<Parameter>,
    pub return_type: Option<String>,
    pub body: BlockStatement,
    pub is_async: bool,
    pub exported: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub type_annotation: Option<String>,
    pub default: Option<Expression>,
    pub optional: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStatement {
    pub condition: Expression,
    pub then_branch: Box<Statement>,
    pub else_branch: Option<Box<Statement>>,
}

/// `for (init; condition; update) body`: every slot but the body optional
#[derive(Debug, Clone, PartialEq)]
pub struct ForStatement {
    pub init: Option<Box<Statement>>,
    pub condition: Option<Expression>,
    pub update: Option<Box<Statement>>,
    pub body: Box<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStatement {
    pub condition: Expression,
    pub body: Box<Statement>,
}

/// Statement order is significant and preserved verbatim from the source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockStatement {
    pub body: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStatement {
    pub value: Option<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStatement {
    pub expression: Expression,
}

/// `name = value;`
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentStatement {
    pub name: String,
    pub value: Expression,
}

/// `type Name = ...;`: the right-hand side is provenance text, erased by
/// every code generator.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeAliasDeclaration {
    pub name: String,
    pub aliased: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceDeclaration {
    pub name: String,
    pub fields: Vec<InterfaceField>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceField {
    pub name: String,
    pub type_annotation: String,
    pub optional: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassDeclaration {
    pub name: String,
    pub super_class: Option<String>,
    pub fields: Vec<ClassField>,
    pub methods: Vec<ClassMethod>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassField {
    pub name: String,
    pub type_annotation: Option<String>,
    pub value: Option<Expression>,
    pub is_private: bool,
    pub is_readonly: bool,
    pub is_static: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassMethod {
    pub name: String,
    pub params: Vec<Parameter>,
    pub return_type: Option<String>,
    pub body: BlockStatement,
    pub is_static: bool,
    pub is_private: bool,
}

// ============ EXPRESSIONS ============

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Identifier(String),
    StringLiteral(String),
    /// Stored as source text to preserve the exact lexical form.
    NumberLiteral(String),
    BooleanLiteral(bool),
    Array(Vec<Expression>),
    Object(ObjectLiteral),
    Call(CallExpression),
    Member(MemberExpression),
    Infix(InfixExpression),
    Template(TemplateLiteral),
}

/// `{ key: value, ... }`: insertion order is significant and must
/// round-trip through code generation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectLiteral {
    pub properties: IndexMap<String, Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CallExpression {
    pub callee: Box<Expression>,
    pub arguments: Vec<Expression>,
}

/// `object.property` or `object[property]`, distinguished by `computed`.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberExpression {
    pub object: Box<Expression>,
    pub property: Box<Expression>,
    pub computed: bool,
}

/// Binary expression; `left` is absent for prefix forms like `-x` and `!x`.
#[derive(Debug, Clone, PartialEq)]
pub struct InfixExpression {
    pub left: Option<Box<Expression>>,
    pub operator: String,
    pub right: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TemplateLiteral {
    pub parts: Vec<TemplatePart>,
}

/// Alternating literal-text / interpolated-expression parts of a template.
#[derive(Debug, Clone, PartialEq)]
pub enum TemplatePart {
    Text(String),
    Interpolation(Expression),
}

// ============ STRUCTURAL PRINTING ============

impl std::fmt::Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Statement::Variable(decl) => {
                write!(f, "{} {}", decl.kind.as_str(), decl.name)?;
                if let Some(annotation) = &decl.type_annotation {
                    write!(f, ": {annotation}")?;
                }
                if let Some(init) = &decl.init {
                    write!(f, " = {init}")?;
                }
                write!(f, ";")
            }
            Statement::Function(decl) => {
                write!(f, "function {}(", decl.name)?;
                for (i, param) in decl.params.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{param}")?;
                }
                write!(f, ")")?;
                if let Some(return_type) = &decl.return_type {
                    write!(f, ": {return_type}")?;
                }
                write!(f, " {}", decl.body)
            }
            Statement::If(stmt) => {
                write!(f, "if ({}) {}", stmt.condition, stmt.then_branch)?;
                if let Some(else_branch) = &stmt.else_branch {
                    write!(f, " else {else_branch}")?;
                }
                Ok(())
            }
            Statement::For(stmt) => {
                write!(f, "for (")?;
                if let Some(init) = &stmt.init {
                    write!(f, "{init}")?;
                }
                write!(f, "; ")?;
                if let Some(condition) = &stmt.condition {
                    write!(f, "{condition}")?;
                }
                write!(f, "; ")?;
                if let Some(update) = &stmt.update {
                    write!(f, "{update}")?;
                }
                write!(f, ") {}", stmt.body)
            }
            Statement::While(stmt) => write!(f, "while ({}) {}", stmt.condition, stmt.body),
            Statement::Block(block) => write!(f, "{block}"),
            Statement::Return(stmt) => match &stmt.value {
                Some(value) => write!(f, "return {value};"),
                None => write!(f, "return;"),
            },
            Statement::Expression(stmt) => write!(f, "{};", stmt.expression),
            Statement::Assignment(stmt) => write!(f, "{} = {};", stmt.name, stmt.value),
            Statement::TypeAlias(decl) => write!(f, "type {} = {};", decl.name, decl.aliased),
            Statement::Interface(decl) => {
                writeln!(f, "interface {} {{", decl.name)?;
                for field in &decl.fields {
                    write!(f, "  {}", field.name)?;
                    if field.optional {
                        write!(f, "?")?;
                    }
                    writeln!(f, ": {};", field.type_annotation)?;
                }
                write!(f, "}}")
            }
            Statement::Class(decl) => {
                write!(f, "class {}", decl.name)?;
                if let Some(super_class) = &decl.super_class {
                    write!(f, " extends {super_class}")?;
                }
                writeln!(f, " {{")?;
                for field in &decl.fields {
                    write!(f, "  {}", field.name)?;
                    if let Some(annotation) = &field.type_annotation {
                        write!(f, ": {annotation}")?;
                    }
                    if let Some(value) = &field.value {
                        write!(f, " = {value}")?;
                    }
                    writeln!(f, ";")?;
                }
                for method in &decl.methods {
                    write!(f, "  {}(", method.name)?;
                    for (i, param) in method.params.iter().enumerate() {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{param}")?;
                    }
                    write!(f, ")")?;
                    if let Some(return_type) = &method.return_type {
                        write!(f, ": {return_type}")?;
                    }
                    writeln!(f, " {}", method.body)?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl std::fmt::Display for Parameter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)?;
        if self.optional {
            write!(f, "?")?;
        }
        if let Some(annotation) = &self.type_annotation {
            write!(f, ": {annotation}")?;
        }
        if let Some(default) = &self.default {
            write!(f, " = {default}")?;
        }
        Ok(())
    }
}

impl std::fmt::Display for BlockStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{ ")?;
        for statement in &self.body {
            write!(f, "{statement} ")?;
        }
        write!(f, "}}")
    }
}

impl std::fmt::Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expression::Identifier(name) => f.write_str(name),
            Expression::StringLiteral(value) => write!(f, "\"{value}\""),
            Expression::NumberLiteral(value) => f.write_str(value),
            Expression::BooleanLiteral(value) => write!(f, "{value}"),
            Expression::Array(elements) => {
                write!(f, "[")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{element}")?;
                }
                write!(f, "]")
            }
            Expression::Object(object) => {
                write!(f, "{{ ")?;
                for (i, (key, value)) in object.properties.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                write!(f, " }}")
            }
            Expression::Call(call) => {
                write!(f, "{}(", call.callee)?;
                for (i, argument) in call.arguments.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{argument}")?;
                }
                write!(f, ")")
            }
            Expression::Member(member) => {
                if member.computed {
                    write!(f, "{}[{}]", member.object, member.property)
                } else {
                    write!(f, "{}.{}", member.object, member.property)
                }
            }
            Expression::Infix(infix) => match &infix.left {
                Some(left) => write!(f, "({} {} {})", left, infix.operator, infix.right),
                None => write!(f, "({}{})", infix.operator, infix.right),
            },
            Expression::Template(template) => {
                write!(f, "`")?;
                for part in &template.parts {
                    match part {
                        TemplatePart::Text(text) => f.write_str(text)?,
                        TemplatePart::Interpolation(expression) => {
                            write!(f, "${{{expression}}}")?;
                        }
                    }
                }
                write!(f, "`")
            }
        }
    }
}
