use crate::compiler::{
    tokens::{Keyword, Punctuation, TokenKind},
    types::ExpressionType,
};

use super::{
    ParseError, Parser,
    node::{Function, Program},
};

impl Parser {
    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        let mut functions = Vec::new();
        while self.current.kind != TokenKind::Eof {
            functions.push(self.parse_function()?);
        }
        Ok(Program { functions })
    }

    /// Fails unless every token has been consumed.
    pub fn expect_end(&mut self) -> Result<(), ParseError> {
        if self.current.kind != TokenKind::Eof {
            return Err(self.unexpected("end of file"));
        }
        Ok(())
    }

    /// `('void' | type) IDENT '(' [type IDENT (',' type IDENT)*] ')' block`
    fn parse_function(&mut self) -> Result<Function, ParseError> {
        let start = self.current.span;
        let return_type = match self.current.kind {
            TokenKind::Keyword(Keyword::Void) => None,
            TokenKind::TypeLiteral(ty) => Some(ty),
            _ => return Err(self.unexpected("function return type")),
        };
        self.advance()?;

        let name = self.expect_identifier("function name")?;

        self.expect(Punctuation::OpenParen)?;
        let mut params = Vec::new();
        if !self.check(Punctuation::CloseParen) {
            loop {
                let ty = self.parse_type()?;
                let param = self.expect_identifier("parameter name")?;
                params.push((param, ty));
                if !self.eat(Punctuation::Comma)? {
                    break;
                }
            }
        }
        self.expect(Punctuation::CloseParen)?;

        if !self.check(Punctuation::OpenBrace) {
            return Err(self.unexpected("function body"));
        }
        let body = self.parse_statement()?;

        Ok(Function {
            return_type,
            name,
            params,
            body,
            span: self.span_from(start),
        })
    }

    pub(super) fn parse_type(&mut self) -> Result<ExpressionType, ParseError> {
        match self.current.kind {
            TokenKind::TypeLiteral(ty) => {
                self.advance()?;
                Ok(ty)
            }
            _ => Err(self.unexpected("type")),
        }
    }
}
