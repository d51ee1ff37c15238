use model::{Block, Expr, ForInit, Keyword, Op, Stmt, TokenKind, VarDecl};
use crate::error::ParseError;
use crate::expressions::ExpressionParser;
use crate::parser::Parser;

/// Statement parsing functionality
pub(crate) trait StatementParser {
    fn parse_stmt(&mut self) -> Result<Stmt, ParseError>;
    fn parse_block(&mut self) -> Result<Block, ParseError>;
}

impl<'a> StatementParser for Parser<'a> {
    fn parse_block(&mut self) -> Result<Block, ParseError> {
        self.expect(|t| matches!(t, TokenKind::LBrace), "'{'")?;
        let mut statements = Vec::new();
        // A missing '}' surfaces as an error from parse_stmt at end of input.
        while !self.check(|t| matches!(t, TokenKind::RBrace)) {
            statements.push(self.parse_stmt()?);
        }
        self.expect(|t| matches!(t, TokenKind::RBrace), "'}'")?;
        Ok(Block { statements })
    }

    fn parse_stmt(&mut self) -> Result<Stmt, ParseError> {
        self.nested(Self::parse_stmt_kind)
    }
}

impl<'a> Parser<'a> {
    fn parse_stmt_kind(&mut self) -> Result<Stmt, ParseError> {
        match self.peek().kind {
            TokenKind::Keyword(Keyword::Int) => self.parse_var_decl().map(Stmt::VarDecl),
            TokenKind::Keyword(Keyword::Return) => self.parse_return_stmt(),
            TokenKind::Keyword(Keyword::If) => self.parse_if_stmt(),
            TokenKind::Keyword(Keyword::While) => self.parse_while_stmt(),
            TokenKind::Keyword(Keyword::For) => self.parse_for_stmt(),
            TokenKind::LBrace => self.parse_block().map(Stmt::Block),
            _ => self.parse_assign_or_expr_stmt(),
        }
    }

    /// varDecl := 'int' IDENT ('=' expr)? ';'
    fn parse_var_decl(&mut self) -> Result<VarDecl, ParseError> {
        self.expect_keyword(Keyword::Int)?;
        let name = self.expect_identifier()?;
        let init = if self.match_token(|t| *t == TokenKind::Op(Op::Assign)) {
            Some(self.parse_expr()?)
        } else {
            None
        };
        self.expect_semicolon()?;
        Ok(VarDecl { name, init })
    }

    fn parse_return_stmt(&mut self) -> Result<Stmt, ParseError> {
        self.expect_keyword(Keyword::Return)?;
        let value = self.parse_expr()?;
        self.expect_semicolon()?;
        Ok(Stmt::Return { value })
    }

    fn parse_if_stmt(&mut self) -> Result<Stmt, ParseError> {
        self.expect_keyword(Keyword::If)?;
        let cond = self.parse_paren_condition()?;
        let then_branch = Box::new(self.parse_stmt()?);
        // A dangling else binds to the nearest if.
        let else_branch = if self.match_keyword(Keyword::Else) {
            Some(Box::new(self.parse_stmt()?))
        } else {
            None
        };
        Ok(Stmt::If {
            cond,
            then_branch,
            else_branch,
        })
    }

    fn parse_while_stmt(&mut self) -> Result<Stmt, ParseError> {
        self.expect_keyword(Keyword::While)?;
        let cond = self.parse_paren_condition()?;
        let body = Box::new(self.parse_stmt()?);
        Ok(Stmt::While { cond, body })
    }

    /// forStmt := 'for' '(' (varDecl | expr? ';') expr? ';' expr? ')' statement
    fn parse_for_stmt(&mut self) -> Result<Stmt, ParseError> {
        self.expect_keyword(Keyword::For)?;
        self.expect(|t| matches!(t, TokenKind::LParen), "'('")?;

        // Init clause; a declaration consumes its own ';'
        let init = if self.check_keyword(Keyword::Int) {
            Some(ForInit::Decl(self.parse_var_decl()?))
        } else if self.match_token(|t| matches!(t, TokenKind::Semicolon)) {
            None
        } else {
            let expr = self.parse_expr()?;
            self.expect_semicolon()?;
            Some(ForInit::Expr { expr })
        };

        // Condition clause
        let cond = if self.check(|t| matches!(t, TokenKind::Semicolon)) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        self.expect_semicolon()?;

        // Update clause
        let update = if self.check(|t| matches!(t, TokenKind::RParen)) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        self.expect(|t| matches!(t, TokenKind::RParen), "')'")?;

        let body = Box::new(self.parse_stmt()?);
        Ok(Stmt::For {
            init,
            cond,
            update,
            body,
        })
    }

    /// assignOrExprStmt := expr ('=' expr)? ';'
    fn parse_assign_or_expr_stmt(&mut self) -> Result<Stmt, ParseError> {
        let expr = self.parse_expr()?;

        if self.check_op(Op::Assign) {
            let name = match expr {
                Expr::Identifier { name } => name,
                _ => {
                    return Err(ParseError::InvalidAssignTarget {
                        position: self.peek().position,
                    });
                }
            };
            self.advance(); // '='
            let value = self.parse_expr()?;
            self.expect_semicolon()?;
            return Ok(Stmt::Assign { name, value });
        }

        self.expect_semicolon()?;
        Ok(Stmt::Expr { expr })
    }

    fn parse_paren_condition(&mut self) -> Result<Expr, ParseError> {
        self.expect(|t| matches!(t, TokenKind::LParen), "'('")?;
        let cond = self.parse_expr()?;
        self.expect(|t| matches!(t, TokenKind::RParen), "')'")?;
        Ok(cond)
    }
}
