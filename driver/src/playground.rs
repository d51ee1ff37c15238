// Response shapes served to the browser playground.
//
// Both endpoints answer with an `ok` flag; success carries the payload and
// failure carries a single human-readable `error` string.

use regex_lite::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::LazyLock;
use tracing::debug;

use crate::compile;

static PRINTF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"printf\(["'](.*)["']\)"#).expect("printf pattern is valid"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompileResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ast_size: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CompileResponse {
    pub fn success(ast_size: usize) -> Self {
        CompileResponse { ok: true, ast_size: Some(ast_size), error: None }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        CompileResponse { ok: false, ast_size: None, error: Some(error.into()) }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stdout: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RunResponse {
    pub fn success(stdout: impl Into<String>) -> Self {
        RunResponse { ok: true, stdout: Some(stdout.into()), error: None }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        RunResponse { ok: false, stdout: None, error: Some(error.into()) }
    }
}

/// Lex and parse `source`, reporting the AST node count on success.
pub fn compile_source(source: &str) -> CompileResponse {
    match compile(source) {
        Ok(program) => CompileResponse::success(program.node_count()),
        Err(err) => {
            debug!(error = %err, "compile request failed");
            CompileResponse::failure(err.to_string())
        }
    }
}

/// Stand-in runner: echoes the first `printf("...")` literal it finds.
///
/// This does not look at the AST and performs no format or escape handling.
pub fn run_source(source: &str) -> RunResponse {
    let stdout = PRINTF
        .captures(source)
        .and_then(|captures| captures.get(1))
        .map_or("", |m| m.as_str());
    RunResponse::success(stdout)
}

/// Built-in sample programs, keyed by name.
pub fn samples() -> BTreeMap<&'static str, &'static str> {
    BTreeMap::from([
        (
            "hello",
            "#include <stdio.h>\nint main() {\n  printf(\"Hello World\");\n  return 0;\n}",
        ),
        (
            "max",
            "int max(int a, int b) {\n  if (a > b) { return a; } else { return b; }\n}\n\nint main() {\n  return max(3, 7);\n}",
        ),
        (
            "sum",
            "// sum of 1..10\nint main() {\n  int total = 0;\n  int i = 1;\n  while (i <= 10) {\n    total = total + i;\n    i = i + 1;\n  }\n  return total;\n}",
        ),
        (
            "countdown",
            "int main() {\n  int n = 3;\n  while (n > 0) {\n    printf(\"tick\");\n    n = n - 1;\n  }\n  return 0;\n}",
        ),
    ])
}

/// Look up a sample by name.
pub fn sample(name: &str) -> Option<&'static str> {
    samples().get(name).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::Stmt;

    #[test]
    fn compile_reports_node_count() {
        // program, function, block, return, 0
        assert_eq!(compile_source("int main() { return 0; }"), CompileResponse::success(5));
    }

    #[test]
    fn compile_reports_lex_error() {
        let response = compile_source("int x = @;");
        assert!(!response.ok);
        assert_eq!(response.error.as_deref(), Some("Lex error (1:9): Unknown char: @"));
    }

    #[test]
    fn compile_reports_parse_error() {
        let response = compile_source("int main() { foo(1) = 2; }");
        assert_eq!(
            response,
            CompileResponse::failure("Parse error: Left side of assignment must be identifier")
        );
    }

    #[test]
    fn run_echoes_printf_literal() {
        assert_eq!(
            run_source("int main() { printf(\"Hello World\"); return 0; }"),
            RunResponse::success("Hello World")
        );
    }

    #[test]
    fn run_accepts_single_quotes() {
        assert_eq!(run_source("printf('hi')"), RunResponse::success("hi"));
    }

    #[test]
    fn run_without_printf_is_empty() {
        assert_eq!(run_source("int main() { return 0; }"), RunResponse::success(""));
    }

    #[test]
    fn run_does_not_need_valid_c() {
        assert_eq!(run_source("@@ printf(\"x\") @@"), RunResponse::success("x"));
    }

    #[test]
    fn run_capture_is_greedy() {
        assert_eq!(
            run_source("printf(\"a\"); printf(\"b\");"),
            RunResponse::success("a\"); printf(\"b")
        );
    }

    #[test]
    fn hello_sample_fails_to_lex() {
        let hello = sample("hello").unwrap();
        assert_eq!(compile_source(hello).error.as_deref(), Some("Lex error (1:1): Unknown char: #"));
        assert_eq!(run_source(hello), RunResponse::success("Hello World"));
    }

    #[test]
    fn other_samples_compile() {
        for (name, source) in samples() {
            if name == "hello" {
                continue;
            }
            let response = compile_source(source);
            assert!(response.ok, "sample {name} failed: {:?}", response.error);
        }
    }

    #[test]
    fn sum_sample_advances_its_counter() {
        let program = compile(sample("sum").unwrap()).unwrap();
        let Some(Stmt::While { body, .. }) = program.functions[0].body.statements.get(2) else {
            panic!("Expected While");
        };
        let Stmt::Block(block) = &**body else {
            panic!("Expected Block");
        };
        assert!(
            block
                .statements
                .iter()
                .any(|stmt| matches!(stmt, Stmt::Assign { name, .. } if name == "i"))
        );
    }

    #[test]
    fn run_is_repeatable() {
        let source = "printf(\"again\")";
        assert_eq!(run_source(source), run_source(source));
        assert_eq!(run_source(source), RunResponse::success("again"));
    }

    #[test]
    fn unknown_sample() {
        assert_eq!(sample("nope"), None);
    }
}
