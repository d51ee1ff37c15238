use model::Position;
use thiserror::Error;

/// Fatal scanning failure. The lexer never resynchronizes after one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Lex error ({line}:{column}): {message}")]
pub struct LexError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl LexError {
    pub fn new(message: impl Into<String>, position: Position) -> Self {
        LexError {
            message: message.into(),
            line: position.line,
            column: position.column,
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }
}
