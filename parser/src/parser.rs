use model::{Function, Keyword, Op, Param, Position, Program, Token, TokenKind, Type};
use crate::error::ParseError;
use crate::statements::StatementParser;
use tracing::{debug, trace};

/// Stand-in returned once the cursor runs past the token slice, so a stream
/// missing its end marker still parses like a terminated one.
static EOF: Token = Token::new(TokenKind::Eof, Position::new(1, 1));

/// Deepest nesting of statements and expressions accepted before giving up.
pub(crate) const MAX_DEPTH: usize = 128;

/// Core parser struct that maintains parsing state
pub(crate) struct Parser<'a> {
    pub(crate) tokens: &'a [Token],
    pub(crate) pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Parser { tokens, pos: 0, depth: 0 }
    }

    /// program := function*
    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        let mut functions = Vec::new();

        while !self.is_at_end() {
            let function = self.parse_function()?;
            trace!(name = %function.name, params = function.params.len(), "parsed function");
            functions.push(function);
        }

        debug!(functions = functions.len(), "parsed program");
        Ok(Program { functions })
    }

    /// function := 'int' IDENT '(' ( 'int' IDENT (',' 'int' IDENT)* )? ')' block
    fn parse_function(&mut self) -> Result<Function, ParseError> {
        if !self.match_keyword(Keyword::Int) {
            let found = self.peek();
            return Err(ParseError::ExpectedFunction {
                found: found.kind.to_string(),
                position: found.position,
            });
        }

        let name = self.expect_identifier()?;
        self.expect(|t| matches!(t, TokenKind::LParen), "'('")?;

        let mut params = Vec::new();
        if !self.check(|t| matches!(t, TokenKind::RParen)) {
            loop {
                self.expect_keyword(Keyword::Int)?;
                let name = self.expect_identifier()?;
                params.push(Param { name, ty: Type::Int });
                if !self.match_token(|t| matches!(t, TokenKind::Comma)) {
                    break;
                }
            }
        }
        self.expect(|t| matches!(t, TokenKind::RParen), "')'")?;

        let body = self.parse_block()?;
        Ok(Function { name, params, body })
    }

    /// Run `parse` one nesting level deeper, failing once `MAX_DEPTH` is reached.
    pub(crate) fn nested<T, F>(&mut self, parse: F) -> Result<T, ParseError>
    where
        F: FnOnce(&mut Self) -> Result<T, ParseError>,
    {
        if self.depth >= MAX_DEPTH {
            let position = self.peek().position;
            debug!(depth = self.depth, %position, "nesting limit reached");
            return Err(ParseError::NestingTooDeep { position });
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    pub(crate) fn is_at_end(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Eof)
    }

    pub(crate) fn peek(&self) -> &'a Token {
        self.tokens.get(self.pos).unwrap_or(&EOF)
    }

    pub(crate) fn peek_at(&self, offset: usize) -> &'a Token {
        self.tokens.get(self.pos + offset).unwrap_or(&EOF)
    }

    /// Consume the current token. The end marker is never stepped over.
    pub(crate) fn advance(&mut self) -> &'a Token {
        let token = self.peek();
        if !matches!(token.kind, TokenKind::Eof) {
            self.pos += 1;
        }
        token
    }

    pub(crate) fn check<F>(&self, predicate: F) -> bool
    where
        F: Fn(&TokenKind) -> bool,
    {
        predicate(&self.peek().kind)
    }

    pub(crate) fn match_token<F>(&mut self, predicate: F) -> bool
    where
        F: Fn(&TokenKind) -> bool,
    {
        if self.check(predicate) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn check_keyword(&self, keyword: Keyword) -> bool {
        self.check(|t| *t == TokenKind::Keyword(keyword))
    }

    pub(crate) fn match_keyword(&mut self, keyword: Keyword) -> bool {
        self.match_token(|t| *t == TokenKind::Keyword(keyword))
    }

    pub(crate) fn check_op(&self, op: Op) -> bool {
        self.check(|t| *t == TokenKind::Op(op))
    }

    pub(crate) fn expect<F>(&mut self, predicate: F, expected: &str) -> Result<&'a Token, ParseError>
    where
        F: Fn(&TokenKind) -> bool,
    {
        if self.check(predicate) {
            Ok(self.advance())
        } else {
            let found = self.peek();
            debug!(pos = self.pos, %expected, found = %found.kind, "parse error");
            Err(ParseError::expected(expected, found))
        }
    }

    pub(crate) fn expect_keyword(&mut self, keyword: Keyword) -> Result<&'a Token, ParseError> {
        let expected = format!("keyword '{}'", keyword.as_str());
        self.expect(|t| *t == TokenKind::Keyword(keyword), &expected)
    }

    pub(crate) fn expect_identifier(&mut self) -> Result<String, ParseError> {
        match &self.expect(|t| matches!(t, TokenKind::Ident(_)), "identifier")?.kind {
            TokenKind::Ident(name) => Ok(name.clone()),
            _ => Err(ParseError::expected("identifier", self.peek())),
        }
    }

    pub(crate) fn expect_semicolon(&mut self) -> Result<(), ParseError> {
        self.expect(|t| matches!(t, TokenKind::Semicolon), "';'")?;
        Ok(())
    }
}
