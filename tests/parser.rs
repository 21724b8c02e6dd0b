//! Tests for the parser
//!
//! Structural assertions go through the AST's Display printing, which
//! parenthesizes every infix expression.

use tspile::ast::{Expression, Statement, TemplatePart, VariableKind};
use tspile::parse;

fn parse_ok(source: &str) -> tspile::Program {
    let (program, diagnostics) = parse(source);
    assert!(
        diagnostics.is_empty(),
        "unexpected diagnostics for {source:?}: {diagnostics:?}"
    );
    program
}

fn printed(source: &str) -> String {
    parse_ok(source).to_string()
}

#[test]
fn test_variable_declarations() {
    let program = parse_ok("const nom: string = \"Lucie\"; let age: number = 17; var ok = false;");
    assert_eq!(program.body.len(), 3);

    let Statement::Variable(decl) = &program.body[0] else {
        panic!("expected a variable declaration");
    };
    assert_eq!(decl.kind, VariableKind::Const);
    assert_eq!(decl.name, "nom");
    assert_eq!(decl.type_annotation.as_deref(), Some("string"));
    assert_eq!(decl.init, Some(Expression::StringLiteral("Lucie".into())));

    let Statement::Variable(decl) = &program.body[2] else {
        panic!("expected a variable declaration");
    };
    assert_eq!(decl.kind, VariableKind::Var);
    assert!(decl.type_annotation.is_none());
}

#[test]
fn test_array_type_shorthand() {
    let program = parse_ok("let notes: number[] = [12, 15, 9];");
    let Statement::Variable(decl) = &program.body[0] else {
        panic!("expected a variable declaration");
    };
    assert_eq!(decl.type_annotation.as_deref(), Some("number[]"));
}

#[test]
fn test_operator_precedence() {
    assert_eq!(printed("1 + 2 * 3"), "(1 + (2 * 3));");
    assert_eq!(printed("a + b * c - d"), "((a + (b * c)) - d);");
    assert_eq!(printed("a * b + c / d"), "((a * b) + (c / d));");
    assert_eq!(printed("-x * y"), "((-x) * y);");
    assert_eq!(printed("!a == b"), "((!a) == b);");
    assert_eq!(printed("a < b == c > d"), "((a < b) == (c > d));");
}

#[test]
fn test_logical_operators_share_equality_level() {
    assert_eq!(printed("a < b && c > d"), "((a < b) && (c > d));");
    assert_eq!(printed("a && b || c"), "((a && b) || c);");
}

#[test]
fn test_grouped_expressions() {
    assert_eq!(printed("(1 + 2) * 3"), "((1 + 2) * 3);");
}

#[test]
fn test_call_member_and_index() {
    assert_eq!(printed("console.log(notes[i])"), "console.log(notes[i]);");
    assert_eq!(printed("a.b.c"), "a.b.c;");
    assert_eq!(printed("f(1, 2)(3)"), "f(1, 2)(3);");
}

#[test]
fn test_assignment_statement() {
    let program = parse_ok("majeur = true;");
    let Statement::Assignment(stmt) = &program.body[0] else {
        panic!("expected an assignment");
    };
    assert_eq!(stmt.name, "majeur");
    assert_eq!(stmt.value, Expression::BooleanLiteral(true));
}

#[test]
fn test_compound_assignment_desugars() {
    assert_eq!(printed("x += 2;"), "x = (x + 2);");
    assert_eq!(printed("x -= 2;"), "x = (x - 2);");
    assert_eq!(printed("i++;"), "i = (i + 1);");
    assert_eq!(printed("i--;"), "i = (i - 1);");
}

#[test]
fn test_member_assignment_stays_an_expression() {
    assert_eq!(printed("obj.count = 5;"), "(obj.count = 5);");
    assert_eq!(printed("this.total += n;"), "(this.total = (this.total + n));");
}

#[test]
fn test_function_declaration() {
    let program = parse_ok("function add(a: number, b: number): number { return a + b; }");
    let Statement::Function(decl) = &program.body[0] else {
        panic!("expected a function declaration");
    };
    assert_eq!(decl.name, "add");
    assert_eq!(decl.params.len(), 2);
    assert_eq!(decl.params[0].type_annotation.as_deref(), Some("number"));
    assert_eq!(decl.return_type.as_deref(), Some("number"));
    assert_eq!(decl.body.body.len(), 1);
}

#[test]
fn test_default_and_optional_parameters() {
    let program = parse_ok("function f(a: number = 1, b?: string) { return a; }");
    let Statement::Function(decl) = &program.body[0] else {
        panic!("expected a function declaration");
    };
    assert_eq!(decl.params[0].default, Some(Expression::NumberLiteral("1".into())));
    assert!(decl.params[1].optional);
    assert_eq!(decl.params[1].type_annotation.as_deref(), Some("string"));
}

#[test]
fn test_export_and_async_flags() {
    let program = parse_ok("export const limit = 10; export async function run() { return 1; }");
    let Statement::Variable(decl) = &program.body[0] else {
        panic!("expected a variable declaration");
    };
    assert!(decl.exported);
    let Statement::Function(decl) = &program.body[1] else {
        panic!("expected a function declaration");
    };
    assert!(decl.exported);
    assert!(decl.is_async);
}

#[test]
fn test_if_else_chain() {
    let program = parse_ok("if (a > 1) { x = 1; } else if (a > 0) { x = 2; } else { x = 3; }");
    let Statement::If(stmt) = &program.body[0] else {
        panic!("expected an if statement");
    };
    let Some(else_branch) = &stmt.else_branch else {
        panic!("expected an else branch");
    };
    let Statement::If(nested) = else_branch.as_ref() else {
        panic!("expected else-if to nest");
    };
    assert!(nested.else_branch.is_some());
}

#[test]
fn test_for_statement_slots() {
    let program = parse_ok("for (let i = 0; i < 3; i++) { console.log(i); }");
    let Statement::For(stmt) = &program.body[0] else {
        panic!("expected a for statement");
    };
    assert!(stmt.init.is_some());
    assert!(stmt.condition.is_some());
    assert!(stmt.update.is_some());
}

#[test]
fn test_while_statement() {
    let program = parse_ok("while (c > 0) { c--; }");
    let Statement::While(stmt) = &program.body[0] else {
        panic!("expected a while statement");
    };
    assert_eq!(stmt.condition.to_string(), "(c > 0)");
}

#[test]
fn test_array_literal_with_trailing_comma() {
    assert_eq!(printed("[1, 2, 3, ]"), "[1, 2, 3];");
    assert_eq!(printed("[]"), "[];");
}

#[test]
fn test_object_literal_preserves_insertion_order() {
    let program = parse_ok("let p = { b: 1, a: 2, \"c-d\": 3 };");
    let Statement::Variable(decl) = &program.body[0] else {
        panic!("expected a variable declaration");
    };
    let Some(Expression::Object(object)) = &decl.init else {
        panic!("expected an object literal");
    };
    let keys: Vec<&str> = object.properties.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["b", "a", "c-d"]);
}

#[test]
fn test_template_interpolation_parts() {
    let program = parse_ok("let m = `Hello ${name}! You are ${age + 1}.`;");
    let Statement::Variable(decl) = &program.body[0] else {
        panic!("expected a variable declaration");
    };
    let Some(Expression::Template(template)) = &decl.init else {
        panic!("expected a template literal");
    };
    assert_eq!(template.parts.len(), 5);
    assert_eq!(template.parts[0], TemplatePart::Text("Hello ".into()));
    assert!(matches!(&template.parts[1], TemplatePart::Interpolation(Expression::Identifier(n)) if n == "name"));
    assert_eq!(template.parts[2], TemplatePart::Text("! You are ".into()));
    assert!(matches!(&template.parts[3], TemplatePart::Interpolation(Expression::Infix(_))));
    assert_eq!(template.parts[4], TemplatePart::Text(".".into()));
}

#[test]
fn test_template_without_interpolation_is_one_part() {
    let program = parse_ok("let m = `plain text`;");
    let Statement::Variable(decl) = &program.body[0] else {
        panic!("expected a variable declaration");
    };
    let Some(Expression::Template(template)) = &decl.init else {
        panic!("expected a template literal");
    };
    assert_eq!(template.parts, vec![TemplatePart::Text("plain text".into())]);
}

#[test]
fn test_type_alias_and_interface() {
    let program = parse_ok("type Id = number | string;\ninterface User { name: string; age?: number }");
    let Statement::TypeAlias(alias) = &program.body[0] else {
        panic!("expected a type alias");
    };
    assert_eq!(alias.name, "Id");
    assert_eq!(alias.aliased, "number | string");

    let Statement::Interface(decl) = &program.body[1] else {
        panic!("expected an interface");
    };
    assert_eq!(decl.name, "User");
    assert_eq!(decl.fields.len(), 2);
    assert_eq!(decl.fields[0].type_annotation, "string");
    assert!(decl.fields[1].optional);
}

#[test]
fn test_class_declaration() {
    let source = r#"
class Counter extends Base {
  private value: number;
  static instances: number = 0;

  constructor(start: number = 0) {
    this.value = start;
  }

  increment(step: number): void {
    this.value += step;
  }
}
"#;
    let program = parse_ok(source);
    let Statement::Class(decl) = &program.body[0] else {
        panic!("expected a class declaration");
    };
    assert_eq!(decl.name, "Counter");
    assert_eq!(decl.super_class.as_deref(), Some("Base"));
    assert_eq!(decl.fields.len(), 2);
    assert!(decl.fields[0].is_private);
    assert!(decl.fields[1].is_static);
    assert_eq!(decl.methods.len(), 2);
    assert_eq!(decl.methods[0].name, "constructor");
    assert_eq!(
        decl.methods[0].params[0].default,
        Some(Expression::NumberLiteral("0".into()))
    );
}

#[test]
fn test_comments_are_invisible_to_the_grammar() {
    let program = parse_ok("let a = 1; // comment\n/* another */ let b = 2;");
    assert_eq!(program.body.len(), 2);
}

#[test]
fn test_diagnostics_use_expected_got_wording() {
    let (_, diagnostics) = parse("let = 5;");
    assert!(!diagnostics.is_empty());
    assert_eq!(
        diagnostics[0],
        "expected next token to be IDENT, got = instead"
    );
}

#[test]
fn test_partial_ast_with_diagnostics() {
    let (program, diagnostics) = parse("let = 5;\nlet ok = 1;");
    assert!(!diagnostics.is_empty());
    // The second statement still parses
    assert!(program
        .body
        .iter()
        .any(|s| matches!(s, Statement::Variable(d) if d.name == "ok")));
}

#[test]
fn test_no_prefix_rule_diagnostic() {
    let (_, diagnostics) = parse("* 2;");
    assert!(diagnostics
        .iter()
        .any(|d| d == "no prefix parse function for * found"));
}

#[test]
fn test_parser_terminates_on_malformed_input() {
    for source in [
        "((((",
        "function f(",
        "{ { { let",
        "if (x",
        "class",
        "let x = ;;;;",
        "}}}}",
        "for (;;",
    ] {
        let (_, _) = parse(source);
    }
}

#[test]
fn test_unterminated_block_reports_missing_brace() {
    let (_, diagnostics) = parse("function f() { let x = 1;");
    assert!(diagnostics
        .iter()
        .any(|d| d == "expected next token to be }, got EOF instead"));
}
