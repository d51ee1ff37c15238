mod error;
mod keywords;
mod literals;
mod state_machine;

pub use error::LexError;

use model::Token;
use state_machine::StateMachineLexer;
use tracing::debug;

/// Scan `input` into tokens. The result always ends with exactly one
/// `TokenKind::Eof`; the first unknown character or unterminated string
/// aborts the scan.
pub fn lex(input: &str) -> Result<Vec<Token>, LexError> {
    let mut lexer = StateMachineLexer::new(input);
    match lexer.tokenize() {
        Ok(tokens) => {
            debug!(bytes = input.len(), tokens = tokens.len(), "scanned source");
            Ok(tokens)
        }
        Err(err) => {
            debug!(line = err.line, column = err.column, message = %err.message, "scan failed");
            Err(err)
        }
    }
}
