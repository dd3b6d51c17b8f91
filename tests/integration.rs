use std::fs;
use std::path::PathBuf;

use mica::compiler::codegen::{CodegenErrorKind, IrModule};
use mica::compiler::error::{CompileError, CompilerPhase, format_error};
use mica::compiler::{Config, compile_source, run};

fn compile_fixture(path: &str) -> Result<IrModule, CompileError> {
    let source = fs::read_to_string(path).unwrap();
    compile_source(&source, path)
}

fn function_names(module: &IrModule) -> Vec<&str> {
    module.functions().iter().map(|f| f.name.as_str()).collect()
}

fn dump_text(module: &IrModule) -> String {
    let mut out = Vec::new();
    module.dump(&mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_end_to_end_arithmetic() {
    let result = compile_fixture("tests/fixtures/valid/arithmetic.mc");
    assert!(result.is_ok(), "Compilation failed: {:?}", result.err());
    let module = result.unwrap();
    assert_eq!(function_names(&module), vec!["add", "average", "main"]);

    let average = &module.function("average").unwrap().clif;
    assert!(average.contains("fcvt_from_sint"));
    assert!(average.contains("fdiv"));

    let main = &module.function("main").unwrap().clif;
    assert!(main.contains("call fn"));
    assert!(main.contains("srem"));

    insta::assert_snapshot!(dump_text(&module));
}

#[test]
fn test_end_to_end_control_flow() {
    let result = compile_fixture("tests/fixtures/valid/control_flow.mc");
    assert!(result.is_ok(), "Compilation failed: {:?}", result.err());
    let module = result.unwrap();
    assert_eq!(function_names(&module), vec!["abs", "sum_to", "report", "main"]);
    assert!(module.function("report").unwrap().clif.contains("function %report(i32)"));

    insta::assert_snapshot!(dump_text(&module));
}

#[test]
fn test_end_to_end_strings() {
    let result = compile_fixture("tests/fixtures/valid/strings.mc");
    assert!(result.is_ok(), "Compilation failed: {:?}", result.err());
    let module = result.unwrap();
    assert_eq!(function_names(&module), vec!["length", "main"]);
    assert!(module.function("main").unwrap().clif.contains("ireduce.i8"));

    insta::assert_snapshot!(dump_text(&module));
}

#[test]
fn test_end_to_end_coercions() {
    let result = compile_fixture("tests/fixtures/valid/coercions.mc");
    assert!(result.is_ok(), "Compilation failed: {:?}", result.err());
    let module = result.unwrap();
    let main = &module.function("main").unwrap().clif;
    assert!(main.contains("icmp_imm ne"));
    assert!(main.contains("fcvt_to_sint_sat"));
    assert!(main.contains("fcvt_from_uint"));

    insta::assert_snapshot!(dump_text(&module));
}

#[test]
fn test_end_to_end_scopes() {
    let result = compile_fixture("tests/fixtures/valid/scopes.mc");
    assert!(result.is_ok(), "Compilation failed: {:?}", result.err());
    let module = result.unwrap();
    assert_eq!(function_names(&module), vec!["main"]);

    // the print sees the Float binding, the return the Int one
    insta::assert_snapshot!(dump_text(&module));
}

#[test]
fn test_end_to_end_dump_separates_functions() {
    let module = compile_fixture("tests/fixtures/valid/arithmetic.mc").unwrap();
    let text = dump_text(&module);

    assert!(text.contains("function %add"));
    assert!(text.contains("function %main"));
    assert_eq!(text.matches("\n\nfunction %").count(), 2);
}

#[test]
fn test_end_to_end_undefined_variable_error() {
    let err = compile_fixture("tests/fixtures/invalid/undefined_variable.mc").unwrap_err();
    assert_eq!(err.phase(), CompilerPhase::Codegen);
    assert_eq!(err.line(), Some(3));
    assert_eq!(err.to_string(), "undefined variable 'y'");
}

#[test]
fn test_end_to_end_forward_call_error() {
    let err = compile_fixture("tests/fixtures/invalid/forward_call.mc").unwrap_err();
    assert_eq!(err.line(), Some(2));
    match err {
        CompileError::Codegen(err) => {
            assert!(matches!(&err.kind, CodegenErrorKind::UndefinedFunction { name } if name == "later"));
            assert_eq!(err.function.as_deref(), Some("main"));
        }
        other => panic!("expected codegen error, got: {}", other),
    }
}

#[test]
fn test_end_to_end_missing_return_error() {
    let err = compile_fixture("tests/fixtures/invalid/missing_return.mc").unwrap_err();
    assert_eq!(err.phase(), CompilerPhase::Codegen);
    assert_eq!(err.line(), Some(1));
    assert_eq!(err.to_string(), "every path must have return statement");
}

#[test]
fn test_end_to_end_syntax_error() {
    let path = "tests/fixtures/invalid/syntax_error.mc";
    let source = fs::read_to_string(path).unwrap();
    let err = compile_source(&source, path).unwrap_err();
    assert_eq!(err.phase(), CompilerPhase::Parsing);
    assert_eq!(err.line(), Some(3));

    colored::control::set_override(false);
    let rendered = format_error(&err, path, Some(&source));
    assert!(rendered.starts_with("error[Parsing]: Expected expression, got `;`"));
    assert!(rendered.contains("--> tests/fixtures/invalid/syntax_error.mc:3:13"));
    assert!(rendered.contains("3 |     x = x + ;"));
}

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("mica-{}-{}", std::process::id(), name))
}

#[test]
fn test_run_writes_dump_to_output() {
    let output = temp_path("control_flow.clif");
    let config = Config {
        input: PathBuf::from("tests/fixtures/valid/control_flow.mc"),
        output: Some(output.clone()),
        verbosity: 0,
    };

    let result = run(&config);
    assert!(result.is_ok(), "Run failed: {:?}", result.err());

    let text = fs::read_to_string(&output).unwrap();
    fs::remove_file(&output).unwrap();
    let abs = text.find("function %abs").unwrap();
    let main = text.find("function %main").unwrap();
    assert!(abs < main);
}

#[test]
fn test_run_reports_missing_input() {
    let config = Config {
        input: PathBuf::from("tests/fixtures/does_not_exist.mc"),
        output: None,
        verbosity: 0,
    };

    let err = run(&config).unwrap_err();
    assert_eq!(err.phase(), CompilerPhase::Io);
    assert!(err.line().is_none());
    assert!(err.to_string().contains("does_not_exist.mc"));
}

#[test]
fn test_run_does_not_write_output_on_error() {
    let output = temp_path("missing_return.clif");
    let config = Config {
        input: PathBuf::from("tests/fixtures/invalid/missing_return.mc"),
        output: Some(output.clone()),
        verbosity: 0,
    };

    assert!(run(&config).is_err());
    assert!(!output.exists());
}
