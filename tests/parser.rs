use std::fs;

use mica::compiler::parser::node::{ExprKind, StmtKind};
use mica::compiler::parser::{ParseError, Parser};

fn parse_source(source: &str) -> Result<Vec<String>, ParseError> {
    let mut parser = Parser::new(source, "test.mc")?;
    let program = parser.parse_program()?;
    let ast = parser.ast();
    Ok(program.functions.iter().map(|f| ast.display_function(f)).collect())
}

fn parse_expr(source: &str) -> String {
    let mut parser = Parser::new(source, "test.mc").unwrap();
    let expr = parser.parse_expr().unwrap();
    parser.ast().display_expr(expr)
}

#[test]
fn test_parse_precedence() {
    assert_eq!(parse_expr("a + b * c"), "(+ a (* b c))");
    assert_eq!(parse_expr("(a + b) * c"), "(* (+ a b) c)");
    assert_eq!(parse_expr("a - b - c"), "(- (- a b) c)");
    assert_eq!(parse_expr("a || b && c == d"), "(|| a (&& b (== c d)))");
    assert_eq!(parse_expr("a + 1 < b * 2"), "(< (+ a 1) (* b 2))");
    assert_eq!(parse_expr("-a % 3"), "(% (- a) 3)");
    assert_eq!(parse_expr("!!done"), "(! (! done))");
}

#[test]
fn test_parse_desugared_comparisons() {
    assert_eq!(parse_expr("a != b"), "(! (== a b))");
    assert_eq!(parse_expr("a > b"), "(< b a)");
    assert_eq!(parse_expr("a <= b"), "(! (< b a))");
    assert_eq!(parse_expr("a >= b"), "(! (< a b))");
}

#[test]
fn test_parse_primaries() {
    assert_eq!(parse_expr("f(1, 2.5, true, \"s\")"), "(call f 1 2.5 true \"s\")");
    assert_eq!(parse_expr("g()"), "(call g)");
    assert_eq!(parse_expr("s[i + 1]"), "(index s (+ i 1))");
}

#[test]
fn test_parse_statements() {
    let functions = parse_source(
        "void f(int a, string s) {
            int x;
            float y = 1.5;
            x = a;
            s[0] = 65;
            if (x < 1) return; else { print(\"%d\", x); }
            while (x) x = x - 1;
            g(x);
        }",
    )
    .unwrap();
    assert_eq!(
        functions,
        vec![
            "(fn void f (Int a, String s) {(decl Int x) (decl Float y 1.5) (= x a) (= (index s 0) 65) \
             (if (< x 1) (return) {(print \"%d\" x)}) (while x (= x (- x 1))) (call g x)})"
        ]
    );
}

fn parse_fixture(name: &str) -> String {
    let source = fs::read_to_string(format!("tests/fixtures/valid/{}.mc", name)).unwrap();
    let result = parse_source(&source);
    assert!(result.is_ok(), "{}: expected success, got: {:?}", name, result);
    result.unwrap().join("\n")
}

#[test]
fn test_parse_fixture_arithmetic() {
    insta::assert_snapshot!(parse_fixture("arithmetic"));
}

#[test]
fn test_parse_fixture_control_flow() {
    insta::assert_snapshot!(parse_fixture("control_flow"));
}

#[test]
fn test_parse_fixture_strings() {
    insta::assert_snapshot!(parse_fixture("strings"));
}

#[test]
fn test_parse_fixture_coercions() {
    insta::assert_snapshot!(parse_fixture("coercions"));
}

#[test]
fn test_parse_fixture_scopes() {
    insta::assert_snapshot!(parse_fixture("scopes"));
}

#[test]
fn test_parse_spans_cover_nodes() {
    let mut parser = Parser::new("int main() {\n    return 1 + 2;\n}", "test.mc").unwrap();
    let program = parser.parse_program().unwrap();
    let ast = parser.ast();

    let function = &program.functions[0];
    assert_eq!(function.span.start, (1, 1));
    assert_eq!(function.span.end, (3, 1));

    let StmtKind::Block { stmts } = &ast.stmt(function.body).unwrap().kind else {
        panic!("function body should be a block");
    };
    let ret = ast.stmt(stmts[0]).unwrap();
    assert_eq!((ret.span.start, ret.span.end), ((2, 5), (2, 17)));

    let StmtKind::Return { value: Some(value) } = ret.kind else {
        panic!("expected return with value");
    };
    let sum = ast.expr(value).unwrap();
    assert!(matches!(sum.kind, ExprKind::BinOp { .. }));
    assert_eq!((sum.span.start, sum.span.end), ((2, 12), (2, 16)));
}

#[test]
fn test_parse_error_has_line() {
    let source = fs::read_to_string("tests/fixtures/invalid/syntax_error.mc").unwrap();
    let err = parse_source(&source).unwrap_err();
    assert!(matches!(err, ParseError::Expected { .. }));
    assert_eq!(err.span().start, (3, 13));
    assert_eq!(err.to_string(), "Expected expression, got `;`");
}

#[test]
fn test_parse_missing_semicolon() {
    let err = parse_source("int main() { return 1 }").unwrap_err();
    assert_eq!(err.to_string(), "Expected `;`, got `}`");
}

#[test]
fn test_parse_function_needs_block_body() {
    let err = parse_source("int main() return 1;").unwrap_err();
    assert_eq!(err.to_string(), "Expected function body, got keyword `return`");
}

#[test]
fn test_parse_lex_errors_pass_through() {
    let err = parse_source("int main() { return 0x; }").unwrap_err();
    assert!(matches!(err, ParseError::Lex(_)));
}

#[test]
fn test_parse_statement_then_end_of_file() {
    let mut parser = Parser::new("{ return 1; } garbage", "test.mc").unwrap();
    parser.parse_statement().unwrap();
    let err = parser.expect_end().unwrap_err();
    assert_eq!(err.to_string(), "Expected end of file, got identifier `garbage`");
    assert_eq!(err.span().start, (1, 15));

    let mut parser = Parser::new("{ return 1; }", "test.mc").unwrap();
    parser.parse_statement().unwrap();
    assert!(parser.expect_end().is_ok());
}

#[test]
fn test_parse_int_minimum_spelling() {
    assert_eq!(parse_expr("-2147483647 - 1"), "(- (- 2147483647) 1)");

    let err = Parser::new("2147483648", "test.mc").err().unwrap();
    assert!(matches!(err, ParseError::Lex(_)));
    assert_eq!(err.to_string(), "Invalid integer '2147483648'");
}
