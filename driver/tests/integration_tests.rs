use driver::playground::{compile_source, samples};
use driver::{compile, CompileError};
use model::{BinaryOp, Expr, Stmt};
use serde_json::Value;
use std::io::Write;
use std::process::{Command, Output, Stdio};

const FACTORIAL: &str = "
/* iterative factorial */
int fact(int n) {
  int acc = 1;
  while (n > 1) {
    acc = acc * n;
    n = n - 1;
  }
  return acc;
}

int main() {
  // 5! = 120
  return fact(5);
}
";

fn toyc(args: &[&str], stdin: Option<&str>) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_toyc"))
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to run toyc");

    {
        let mut pipe = child.stdin.take().expect("stdin is piped");
        if let Some(source) = stdin {
            pipe.write_all(source.as_bytes()).expect("Failed to write stdin");
        }
    }

    child.wait_with_output().expect("Failed to wait for toyc")
}

fn stdout_json(output: &Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

#[test]
fn compile_factorial() {
    let program = compile(FACTORIAL).expect("factorial should compile");
    let names: Vec<_> = program.functions.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["fact", "main"]);
    assert_eq!(program.functions[0].params[0].name, "n");

    let Stmt::While { cond, .. } = &program.functions[0].body.statements[1] else {
        panic!("Expected While");
    };
    assert_eq!(*cond, Expr::binary(BinaryOp::Greater, Expr::ident("n"), Expr::number(1)));
}

#[test]
fn compile_is_repeatable() {
    assert_eq!(compile(FACTORIAL).unwrap(), compile(FACTORIAL).unwrap());
}

#[test]
fn compile_surfaces_lex_and_parse_errors() {
    assert!(matches!(compile("int x = @;"), Err(CompileError::Lex(_))));
    assert!(matches!(compile("int main() { return 1 }"), Err(CompileError::Parse(_))));
}

#[test]
fn compile_response_counts_nodes() {
    // program, 2 functions, 3 blocks, 6 statements, 13 expressions
    let response = compile_source(FACTORIAL);
    assert!(response.ok);
    assert_eq!(response.ast_size, Some(25));
}

#[test]
fn compile_response_json_shape() {
    let ok = serde_json::to_value(compile_source("int main() { return 0; }")).unwrap();
    assert_eq!(ok, serde_json::json!({ "ok": true, "astSize": 5 }));

    let failed = serde_json::to_value(compile_source("int main() {")).unwrap();
    assert_eq!(failed["ok"], false);
    assert!(failed.get("astSize").is_none());
    assert_eq!(failed["error"], "Parse error: unexpected end of input at 1:13");
}

#[test]
fn cli_default_prints_compile_response() {
    let output = toyc(&["-"], Some(FACTORIAL));
    assert!(output.status.success());
    assert_eq!(stdout_json(&output), serde_json::json!({ "ok": true, "astSize": 25 }));
}

#[test]
fn cli_compile_failure_exits_nonzero() {
    let output = toyc(&["-"], Some("int x = @;"));
    assert!(!output.status.success());
    assert_eq!(stdout_json(&output)["error"], "Lex error (1:9): Unknown char: @");
}

#[test]
fn cli_run_hello_sample() {
    let output = toyc(&["--sample", "hello", "--run"], None);
    assert!(output.status.success());
    assert_eq!(stdout_json(&output), serde_json::json!({ "ok": true, "stdout": "Hello World" }));
}

#[test]
fn cli_parse_json_emits_tagged_ast() {
    let output = toyc(&["--sample", "max", "--parse", "--json"], None);
    assert!(output.status.success());
    let ast = stdout_json(&output);
    assert_eq!(ast["type"], "Program");
    assert_eq!(ast["functions"][0]["name"], "max");
    assert_eq!(ast["functions"][0]["body"]["statements"][0]["type"], "If");
    assert_eq!(ast["functions"][1]["body"]["statements"][0]["value"]["type"], "Call");
}

#[test]
fn cli_lex_prints_positions() {
    let output = toyc(&["--lex", "-"], Some("int x;"));
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<_> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec!["1:1\tkeyword 'int'", "1:5\tidentifier 'x'", "1:6\t';'", "1:7\tend of input"]
    );
}

#[test]
fn cli_lex_error_exits_nonzero() {
    let output = toyc(&["--lex", "-"], Some("\"open"));
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Lex error (1:1): Unterminated string literal"));
}

#[test]
fn cli_list_samples() {
    let output = toyc(&["--list-samples"], None);
    assert!(output.status.success());
    let listed = stdout_json(&output);
    for (name, source) in samples() {
        assert_eq!(listed[name], source);
    }
}

#[test]
fn cli_unknown_sample() {
    let output = toyc(&["--sample", "missing"], None);
    assert!(!output.status.success());
    assert!(String::from_utf8(output.stderr).unwrap().contains("unknown sample: missing"));
}
