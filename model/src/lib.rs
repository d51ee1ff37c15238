mod ast;

pub use ast::*;

use serde::Serialize;
use std::fmt;

/// 1-based source location of the first character of a lexeme.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub const fn new(line: usize, column: usize) -> Self {
        Position { line, column }
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::new(1, 1)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[derive(PartialEq, Debug, Clone, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub position: Position,
}

impl Token {
    pub const fn new(kind: TokenKind, position: Position) -> Self {
        Token { kind, position }
    }

    /// Literal text form of the token's value; empty for the end marker.
    pub fn lexeme(&self) -> String {
        match &self.kind {
            TokenKind::Number(value) => value.to_string(),
            TokenKind::Str(value) | TokenKind::Ident(value) => value.clone(),
            TokenKind::Keyword(keyword) => keyword.as_str().to_string(),
            TokenKind::Op(op) => op.as_str().to_string(),
            TokenKind::Eof => String::new(),
            punct => punct.punctuation().unwrap_or_default().to_string(),
        }
    }
}

#[derive(PartialEq, Debug, Clone, Serialize)]
pub enum TokenKind {
    Number(i64),
    /// Decoded string literal contents.
    Str(String),
    Ident(String),
    Keyword(Keyword),
    Op(Op),
    Semicolon,
    Comma,
    LParen,
    RParen,
    LBrace,
    RBrace,
    Eof,
}

impl TokenKind {
    fn punctuation(&self) -> Option<&'static str> {
        match self {
            TokenKind::Semicolon => Some(";"),
            TokenKind::Comma => Some(","),
            TokenKind::LParen => Some("("),
            TokenKind::RParen => Some(")"),
            TokenKind::LBrace => Some("{"),
            TokenKind::RBrace => Some("}"),
            _ => None,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Number(value) => write!(f, "number {value}"),
            TokenKind::Str(value) => write!(f, "string {value:?}"),
            TokenKind::Ident(name) => write!(f, "identifier '{name}'"),
            TokenKind::Keyword(keyword) => write!(f, "keyword '{}'", keyword.as_str()),
            TokenKind::Op(op) => write!(f, "'{}'", op.as_str()),
            TokenKind::Eof => f.write_str("end of input"),
            punct => write!(f, "'{}'", punct.punctuation().unwrap_or_default()),
        }
    }
}

#[derive(PartialEq, Eq, Debug, Clone, Copy, Serialize)]
pub enum Keyword {
    Int,
    Return,
    If,
    Else,
    While,
    For,
    Printf,
}

impl Keyword {
    pub const ALL: [Keyword; 7] = [
        Keyword::Int,
        Keyword::Return,
        Keyword::If,
        Keyword::Else,
        Keyword::While,
        Keyword::For,
        Keyword::Printf,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::Int => "int",
            Keyword::Return => "return",
            Keyword::If => "if",
            Keyword::Else => "else",
            Keyword::While => "while",
            Keyword::For => "for",
            Keyword::Printf => "printf",
        }
    }
}

/// Every operator shares the generic OP token kind; the variant keeps its text.
#[derive(PartialEq, Eq, Debug, Clone, Copy, Serialize)]
pub enum Op {
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Less,
    Greater,
    Assign,
    EqualEqual,
    BangEqual,
    LessEqual,
    GreaterEqual,
    AndAnd,
    OrOr,
}

impl Op {
    pub fn as_str(self) -> &'static str {
        match self {
            Op::Plus => "+",
            Op::Minus => "-",
            Op::Star => "*",
            Op::Slash => "/",
            Op::Percent => "%",
            Op::Less => "<",
            Op::Greater => ">",
            Op::Assign => "=",
            Op::EqualEqual => "==",
            Op::BangEqual => "!=",
            Op::LessEqual => "<=",
            Op::GreaterEqual => ">=",
            Op::AndAnd => "&&",
            Op::OrOr => "||",
        }
    }
}
