use model::{Position, Token};
use thiserror::Error;

/// First grammar violation found; parsing stops there.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("expected {expected} but got {found} at {position}")]
    Expected {
        expected: String,
        found: String,
        position: Position,
    },

    #[error("Left side of assignment must be identifier")]
    InvalidAssignTarget { position: Position },

    #[error("expected function declaration but got {found} at {position}")]
    ExpectedFunction { found: String, position: Position },

    #[error("unexpected {found} at {position}")]
    UnexpectedToken { found: String, position: Position },

    #[error("nesting too deep at {position}")]
    NestingTooDeep { position: Position },
}

impl ParseError {
    pub(crate) fn expected(expected: impl Into<String>, found: &Token) -> Self {
        ParseError::Expected {
            expected: expected.into(),
            found: found.kind.to_string(),
            position: found.position,
        }
    }

    pub(crate) fn unexpected(found: &Token) -> Self {
        ParseError::UnexpectedToken {
            found: found.kind.to_string(),
            position: found.position,
        }
    }

    /// Position of the token that triggered the error.
    pub fn position(&self) -> Position {
        match self {
            ParseError::Expected { position, .. }
            | ParseError::InvalidAssignTarget { position }
            | ParseError::ExpectedFunction { position, .. }
            | ParseError::UnexpectedToken { position, .. }
            | ParseError::NestingTooDeep { position } => *position,
        }
    }
}
