//! Front-end pipeline for the toy C playground.
//!
//! `compile` runs source text through the lexer and parser and hands back the
//! AST. The `playground` module wraps that pipeline in the response shapes the
//! web playground expects.

pub mod error;
pub mod playground;

pub use error::CompileError;

use model::Program;
use tracing::{debug, info_span};

/// Lex and parse `source` into a `Program`.
pub fn compile(source: &str) -> Result<Program, CompileError> {
    let _span = info_span!("compile", bytes = source.len()).entered();
    let tokens = lexer::lex(source)?;
    let program = parser::parse_tokens(&tokens)?;
    debug!(functions = program.functions.len(), nodes = program.node_count(), "compiled source");
    Ok(program)
}
