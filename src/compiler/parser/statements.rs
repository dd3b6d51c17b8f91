use crate::compiler::tokens::{Keyword, Punctuation, TokenKind};

use super::{
    ParseError, Parser,
    node::{Call, ExprId, StmtId, StmtKind},
};

impl Parser {
    pub fn parse_statement(&mut self) -> Result<StmtId, ParseError> {
        let start = self.current.span;
        let kind = match self.current.kind {
            TokenKind::Punctuation(Punctuation::OpenBrace) => {
                self.advance()?;
                let mut stmts = Vec::new();
                while !self.check(Punctuation::CloseBrace) {
                    if self.current.kind == TokenKind::Eof {
                        return Err(self.unexpected("`}`"));
                    }
                    stmts.push(self.parse_statement()?);
                }
                self.advance()?;
                StmtKind::Block { stmts }
            }
            TokenKind::Keyword(Keyword::If) => {
                self.advance()?;
                let cond = self.parse_condition()?;
                let then = self.parse_statement()?;
                let else_ = if self.current.kind == TokenKind::Keyword(Keyword::Else) {
                    self.advance()?;
                    Some(self.parse_statement()?)
                } else {
                    None
                };
                StmtKind::If { cond, then, else_ }
            }
            TokenKind::Keyword(Keyword::While) => {
                self.advance()?;
                let cond = self.parse_condition()?;
                let body = self.parse_statement()?;
                StmtKind::While { cond, body }
            }
            TokenKind::Keyword(Keyword::Return) => {
                self.advance()?;
                let value = if self.check(Punctuation::Semicolon) {
                    None
                } else {
                    Some(self.parse_expr()?)
                };
                self.expect(Punctuation::Semicolon)?;
                StmtKind::Return { value }
            }
            TokenKind::Keyword(Keyword::Print) => {
                self.advance()?;
                let args = self.parse_args()?;
                self.expect(Punctuation::Semicolon)?;
                StmtKind::Print { args }
            }
            TokenKind::TypeLiteral(ty) => {
                self.advance()?;
                let name = self.expect_identifier("variable name")?;
                let init = if self.eat(Punctuation::Eq)? {
                    Some(self.parse_expr()?)
                } else {
                    None
                };
                self.expect(Punctuation::Semicolon)?;
                StmtKind::VarDecl { name, ty, init }
            }
            TokenKind::Identifier(name) => {
                self.advance()?;
                let kind = match self.current.kind {
                    TokenKind::Punctuation(Punctuation::Eq) => {
                        self.advance()?;
                        let value = self.parse_expr()?;
                        StmtKind::Assign { name, value }
                    }
                    TokenKind::Punctuation(Punctuation::OpenBracket) => {
                        self.advance()?;
                        let index = self.parse_expr()?;
                        self.expect(Punctuation::CloseBracket)?;
                        self.expect(Punctuation::Eq)?;
                        let value = self.parse_expr()?;
                        StmtKind::IndexAssign { array: name, index, value }
                    }
                    TokenKind::Punctuation(Punctuation::OpenParen) => {
                        let args = self.parse_args()?;
                        StmtKind::Call(Call { name, args })
                    }
                    _ => return Err(self.unexpected("`=`, `[` or `(`")),
                };
                self.expect(Punctuation::Semicolon)?;
                kind
            }
            _ => return Err(self.unexpected("statement")),
        };

        let span = self.span_from(start);
        Ok(self.ast.push_stmt(kind, span))
    }

    fn parse_condition(&mut self) -> Result<ExprId, ParseError> {
        self.expect(Punctuation::OpenParen)?;
        let cond = self.parse_expr()?;
        self.expect(Punctuation::CloseParen)?;
        Ok(cond)
    }
}
