use model::{Op, Position, Token, TokenKind};
use crate::error::LexError;
use crate::keywords::keyword_or_identifier;
use crate::literals::{decode_escape, parse_int_constant};

/// Single-pass scanner. All cursor state lives in the value, so every call
/// to `lex` owns its own lexer.
pub struct StateMachineLexer<'a> {
    input: &'a str,
    pos: usize,
    line: usize,
    column: usize,
}

impl<'a> StateMachineLexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        while !self.is_at_end() {
            match self.lex_next_token()? {
                Some(token) => tokens.push(token),
                None => continue, // Whitespace or comment consumed
            }
        }

        tokens.push(Token::new(TokenKind::Eof, self.position()));
        Ok(tokens)
    }

    fn lex_next_token(&mut self) -> Result<Option<Token>, LexError> {
        let start = self.position();
        let Some(ch) = self.current_char() else {
            return Ok(None);
        };

        match ch {
            ' ' | '\t' | '\r' | '\n' => {
                self.bump();
                Ok(None)
            }
            // Comments
            '/' if self.peek(1) == Some('/') => {
                self.skip_line_comment();
                Ok(None)
            }
            '/' if self.peek(1) == Some('*') => {
                self.skip_block_comment();
                Ok(None)
            }
            '"' => self.lex_string(start).map(Some),
            '0'..='9' => self.lex_number(start).map(Some),
            'a'..='z' | 'A'..='Z' | '_' => Ok(Some(self.lex_identifier(start))),
            _ => self.lex_operator_or_punctuation(ch, start).map(Some),
        }
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    fn current_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek(&self, offset: usize) -> Option<char> {
        self.input[self.pos..].chars().nth(offset)
    }

    /// Consume one character, keeping line and column in step.
    fn bump(&mut self) -> Option<char> {
        let ch = self.current_char()?;
        self.pos += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn bump_while(&mut self, predicate: impl Fn(char) -> bool) -> &'a str {
        let start = self.pos;
        while self.current_char().is_some_and(&predicate) {
            self.bump();
        }
        let input = self.input;
        &input[start..self.pos]
    }

    fn skip_line_comment(&mut self) {
        // The newline itself is left for the whitespace rule.
        self.bump_while(|ch| ch != '\n');
    }

    fn skip_block_comment(&mut self) {
        self.bump(); // '/'
        self.bump(); // '*'

        while !self.is_at_end() {
            if self.current_char() == Some('*') && self.peek(1) == Some('/') {
                self.bump();
                self.bump();
                return;
            }
            self.bump();
        }
        // An unterminated block comment silently runs to end of input.
    }

    fn lex_string(&mut self, start: Position) -> Result<Token, LexError> {
        self.bump(); // Skip opening quote
        let mut value = String::new();

        loop {
            match self.current_char() {
                None => return Err(LexError::new("Unterminated string literal", start)),
                Some('"') => {
                    self.bump();
                    return Ok(Token::new(TokenKind::Str(value), start));
                }
                Some('\\') if self.peek(1).is_some() => {
                    self.bump();
                    if let Some(escaped) = self.bump() {
                        value.push(decode_escape(escaped));
                    }
                }
                Some(ch) => {
                    self.bump();
                    value.push(ch);
                }
            }
        }
    }

    fn lex_number(&mut self, start: Position) -> Result<Token, LexError> {
        let text = self.bump_while(|ch| ch.is_ascii_digit());
        let value = parse_int_constant(text).map_err(|message| LexError::new(message, start))?;
        Ok(Token::new(TokenKind::Number(value), start))
    }

    fn lex_identifier(&mut self, start: Position) -> Token {
        let text = self.bump_while(|ch| ch.is_ascii_alphanumeric() || ch == '_');
        Token::new(keyword_or_identifier(text), start)
    }

    /// `ch` is the unconsumed character under the cursor.
    fn lex_operator_or_punctuation(&mut self, ch: char, start: Position) -> Result<Token, LexError> {
        // Two-character operators win over their one-character prefixes
        let two_char_op = match (ch, self.peek(1)) {
            ('=', Some('=')) => Some(Op::EqualEqual),
            ('!', Some('=')) => Some(Op::BangEqual),
            ('<', Some('=')) => Some(Op::LessEqual),
            ('>', Some('=')) => Some(Op::GreaterEqual),
            ('&', Some('&')) => Some(Op::AndAnd),
            ('|', Some('|')) => Some(Op::OrOr),
            _ => None,
        };

        if let Some(op) = two_char_op {
            self.bump();
            self.bump();
            return Ok(Token::new(TokenKind::Op(op), start));
        }

        let kind = match ch {
            '+' => TokenKind::Op(Op::Plus),
            '-' => TokenKind::Op(Op::Minus),
            '*' => TokenKind::Op(Op::Star),
            '/' => TokenKind::Op(Op::Slash),
            '%' => TokenKind::Op(Op::Percent),
            '<' => TokenKind::Op(Op::Less),
            '>' => TokenKind::Op(Op::Greater),
            '=' => TokenKind::Op(Op::Assign),
            ';' => TokenKind::Semicolon,
            ',' => TokenKind::Comma,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            _ => return Err(LexError::new(format!("Unknown char: {}", ch), start)),
        };

        self.bump();
        Ok(Token::new(kind, start))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn positions(input: &str) -> Vec<(usize, usize)> {
        let mut lexer = StateMachineLexer::new(input);
        lexer
            .tokenize()
            .expect("Should tokenize")
            .iter()
            .map(|t| (t.position.line, t.position.column))
            .collect()
    }

    #[test]
    fn test_state_machine_basic() {
        let input = "int x = 123;";
        let mut lexer = StateMachineLexer::new(input);
        let tokens = lexer.tokenize().expect("Should tokenize");

        assert_eq!(tokens.len(), 6);
        assert!(matches!(tokens[0].kind, TokenKind::Keyword(model::Keyword::Int)));
        assert!(matches!(tokens[1].kind, TokenKind::Ident(_)));
        assert!(matches!(tokens[2].kind, TokenKind::Op(Op::Assign)));
        assert!(matches!(tokens[3].kind, TokenKind::Number(123)));
        assert!(matches!(tokens[4].kind, TokenKind::Semicolon));
        assert!(matches!(tokens[5].kind, TokenKind::Eof));
    }

    #[test]
    fn test_positions_on_one_line() {
        assert_eq!(positions("int x = 123;"), vec![(1, 1), (1, 5), (1, 7), (1, 9), (1, 12), (1, 13)]);
    }

    #[test]
    fn test_positions_across_lines() {
        assert_eq!(positions("a\n  b\r\n\tc"), vec![(1, 1), (2, 3), (3, 2), (3, 3)]);
    }

    #[test]
    fn test_block_comment_tracks_newlines() {
        assert_eq!(positions("/* one\ntwo */ x"), vec![(2, 8), (2, 9)]);
    }

    #[test]
    fn test_two_char_operator_advances_two_columns() {
        assert_eq!(positions("a<=b"), vec![(1, 1), (1, 2), (1, 4), (1, 5)]);
    }

    #[test]
    fn test_string_position_is_opening_quote() {
        assert_eq!(positions("  \"hi\" x"), vec![(1, 3), (1, 8), (1, 9)]);
    }

    #[test]
    fn test_non_ascii_is_unknown_char() {
        let mut lexer = StateMachineLexer::new("x = é;");
        let err = lexer.tokenize().unwrap_err();
        assert_eq!(err.message, "Unknown char: é");
        assert_eq!((err.line, err.column), (1, 5));
    }

    #[test]
    fn test_operator_as_last_char() {
        let mut lexer = StateMachineLexer::new("x <");
        let kinds: Vec<_> = lexer.tokenize().unwrap().into_iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![TokenKind::Ident("x".to_string()), TokenKind::Op(Op::Less), TokenKind::Eof]
        );

        let err = StateMachineLexer::new("a &").tokenize().unwrap_err();
        assert_eq!(err.message, "Unknown char: &");
        assert_eq!((err.line, err.column), (1, 3));
    }
}
