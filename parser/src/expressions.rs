use model::{BinaryOp, Expr, Keyword, Op, TokenKind, UnaryOp};
use crate::error::ParseError;
use crate::parser::Parser;

/// Expression parsing functionality using precedence climbing
pub(crate) trait ExpressionParser {
    fn parse_expr(&mut self) -> Result<Expr, ParseError>;
}

impl<'a> ExpressionParser for Parser<'a> {
    fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        // Parenthesized groups and call arguments re-enter here.
        self.nested(Self::parse_equality)
    }
}

const EQUALITY_OPS: &[(Op, BinaryOp)] = &[
    (Op::EqualEqual, BinaryOp::EqualEqual),
    (Op::BangEqual, BinaryOp::NotEqual),
];

const RELATIONAL_OPS: &[(Op, BinaryOp)] = &[
    (Op::Less, BinaryOp::Less),
    (Op::Greater, BinaryOp::Greater),
    (Op::LessEqual, BinaryOp::LessEqual),
    (Op::GreaterEqual, BinaryOp::GreaterEqual),
];

const ADDITIVE_OPS: &[(Op, BinaryOp)] = &[(Op::Plus, BinaryOp::Add), (Op::Minus, BinaryOp::Sub)];

const MULTIPLICATIVE_OPS: &[(Op, BinaryOp)] = &[
    (Op::Star, BinaryOp::Mul),
    (Op::Slash, BinaryOp::Div),
    (Op::Percent, BinaryOp::Mod),
];

impl<'a> Parser<'a> {
    /// Consume the current token if it is one of the operators in `table`.
    fn match_binary_op(&mut self, table: &[(Op, BinaryOp)]) -> Option<BinaryOp> {
        let TokenKind::Op(op) = self.peek().kind else {
            return None;
        };
        let (_, binary) = table.iter().find(|(candidate, _)| *candidate == op)?;
        self.advance();
        Some(*binary)
    }

    // Equality (== !=)
    pub(crate) fn parse_equality(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_relational()?;
        while let Some(op) = self.match_binary_op(EQUALITY_OPS) {
            let right = self.parse_relational()?;
            expr = Expr::binary(op, expr, right);
        }
        Ok(expr)
    }

    // Relational (< > <= >=)
    pub(crate) fn parse_relational(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_additive()?;
        while let Some(op) = self.match_binary_op(RELATIONAL_OPS) {
            let right = self.parse_additive()?;
            expr = Expr::binary(op, expr, right);
        }
        Ok(expr)
    }

    // Additive (+ -)
    pub(crate) fn parse_additive(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_multiplicative()?;
        while let Some(op) = self.match_binary_op(ADDITIVE_OPS) {
            let right = self.parse_multiplicative()?;
            expr = Expr::binary(op, expr, right);
        }
        Ok(expr)
    }

    // Multiplicative (* / %)
    pub(crate) fn parse_multiplicative(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_unary()?;
        while let Some(op) = self.match_binary_op(MULTIPLICATIVE_OPS) {
            let right = self.parse_unary()?;
            expr = Expr::binary(op, expr, right);
        }
        Ok(expr)
    }

    // Unary (+ -), right-recursive so `--x` nests
    pub(crate) fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        let op = match self.peek().kind {
            TokenKind::Op(Op::Plus) => UnaryOp::Plus,
            TokenKind::Op(Op::Minus) => UnaryOp::Minus,
            _ => return self.parse_primary(),
        };
        self.advance();
        let operand = self.nested(Self::parse_unary)?;
        Ok(Expr::unary(op, operand))
    }

    // Primary: literals, identifiers, calls and parenthesized expressions
    pub(crate) fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let token = self.peek();
        match &token.kind {
            TokenKind::Number(value) => {
                self.advance();
                Ok(Expr::number(*value))
            }
            TokenKind::Str(value) => {
                self.advance();
                Ok(Expr::string(value.clone()))
            }
            TokenKind::Ident(name) => {
                self.advance();
                if self.check(|t| matches!(t, TokenKind::LParen)) {
                    self.parse_call(name.clone())
                } else {
                    Ok(Expr::ident(name.clone()))
                }
            }
            TokenKind::Keyword(Keyword::Printf)
                if matches!(self.peek_at(1).kind, TokenKind::LParen) =>
            {
                self.advance();
                self.parse_call(Keyword::Printf.as_str().to_string())
            }
            TokenKind::LParen => {
                self.advance();
                let expr = self.parse_expr()?;
                self.expect(|t| matches!(t, TokenKind::RParen), "')'")?;
                Ok(expr)
            }
            _ => Err(ParseError::unexpected(token)),
        }
    }

    /// Argument list of a call; the cursor sits on '('.
    fn parse_call(&mut self, callee: String) -> Result<Expr, ParseError> {
        self.expect(|t| matches!(t, TokenKind::LParen), "'('")?;
        let mut args = Vec::new();
        if !self.check(|t| matches!(t, TokenKind::RParen)) {
            loop {
                args.push(self.parse_expr()?);
                if !self.match_token(|t| matches!(t, TokenKind::Comma)) {
                    break;
                }
            }
        }
        self.expect(|t| matches!(t, TokenKind::RParen), "')'")?;
        Ok(Expr::Call { callee, args })
    }
}
