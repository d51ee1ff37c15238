// Parser module: Converts a list of tokens into an abstract syntax tree (AST)
//
// Module organization:
// - parser.rs: Core Parser struct, token cursor and top-level parsing (program, functions)
// - statements.rs: Statement parsing (declarations, if, while, for, return, assignment)
// - expressions.rs: Expression parsing with precedence climbing
// - error.rs: ParseError

mod error;
mod expressions;
mod parser;
mod statements;

pub use error::ParseError;

use expressions::ExpressionParser;
use model::{Expr, Program, Token};
use parser::Parser;

/// Parse a list of tokens into a Program AST
///
/// # Arguments
/// * `tokens` - Slice of tokens from the lexer, normally ending in `TokenKind::Eof`
///
/// # Returns
/// * `Ok(Program)` - Every function definition, in source order
/// * `Err(ParseError)` - The first grammar violation; no partial tree is returned
pub fn parse_tokens(tokens: &[Token]) -> Result<Program, ParseError> {
    let mut parser = Parser::new(tokens);
    parser.parse_program()
}

/// Parse a standalone expression that must span the whole token list.
pub fn parse_expression(tokens: &[Token]) -> Result<Expr, ParseError> {
    let mut parser = Parser::new(tokens);
    let expr = parser.parse_expr()?;
    parser.expect(|t| matches!(t, model::TokenKind::Eof), "end of input")?;
    Ok(expr)
}
