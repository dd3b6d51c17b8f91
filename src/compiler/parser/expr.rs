use crate::compiler::tokens::{Punctuation, Span, TokenKind};

use super::{
    ParseError, Parser,
    node::{BinOpKind, Call, ExprId, ExprKind, Literal, UnaryOpKind},
};

impl Parser {
    pub fn parse_expr(&mut self) -> Result<ExprId, ParseError> {
        self.parse_or()
    }

    fn parse_or(&mut self) -> Result<ExprId, ParseError> {
        let mut left = self.parse_and()?;
        while self.eat(Punctuation::PipePipe)? {
            let right = self.parse_and()?;
            left = self.binop(BinOpKind::Or, left, right);
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<ExprId, ParseError> {
        let mut left = self.parse_equality()?;
        while self.eat(Punctuation::AmpAmp)? {
            let right = self.parse_equality()?;
            left = self.binop(BinOpKind::And, left, right);
        }
        Ok(left)
    }

    fn parse_equality(&mut self) -> Result<ExprId, ParseError> {
        let mut left = self.parse_relation()?;
        loop {
            let negate = match self.current.kind {
                TokenKind::Punctuation(Punctuation::EqEq) => false,
                TokenKind::Punctuation(Punctuation::NotEq) => true,
                _ => return Ok(left),
            };
            self.advance()?;
            let right = self.parse_relation()?;
            left = self.binop(BinOpKind::Equals, left, right);
            if negate {
                left = self.negate(left);
            }
        }
    }

    /// Only `<` exists in the tree: `a > b` is `b < a`, `a <= b` is
    /// `!(b < a)` and `a >= b` is `!(a < b)`.
    fn parse_relation(&mut self) -> Result<ExprId, ParseError> {
        let left = self.parse_additive()?;
        let (swap, negate) = match self.current.kind {
            TokenKind::Punctuation(Punctuation::LessThan) => (false, false),
            TokenKind::Punctuation(Punctuation::GreaterThan) => (true, false),
            TokenKind::Punctuation(Punctuation::LessThanOrEq) => (true, true),
            TokenKind::Punctuation(Punctuation::GreaterThanOrEq) => (false, true),
            _ => return Ok(left),
        };
        self.advance()?;
        let right = self.parse_additive()?;
        let less = if swap {
            self.binop(BinOpKind::Less, right, left)
        } else {
            self.binop(BinOpKind::Less, left, right)
        };
        Ok(if negate { self.negate(less) } else { less })
    }

    fn parse_additive(&mut self) -> Result<ExprId, ParseError> {
        let mut left = self.parse_term()?;
        loop {
            let op = match self.current.kind {
                TokenKind::Punctuation(Punctuation::Plus) => BinOpKind::Plus,
                TokenKind::Punctuation(Punctuation::Minus) => BinOpKind::Minus,
                _ => return Ok(left),
            };
            self.advance()?;
            let right = self.parse_term()?;
            left = self.binop(op, left, right);
        }
    }

    fn parse_term(&mut self) -> Result<ExprId, ParseError> {
        let mut left = self.parse_unary()?;
        loop {
            let op = match self.current.kind {
                TokenKind::Punctuation(Punctuation::Star) => BinOpKind::Mul,
                TokenKind::Punctuation(Punctuation::Slash) => BinOpKind::Div,
                TokenKind::Punctuation(Punctuation::Percent) => BinOpKind::Mod,
                _ => return Ok(left),
            };
            self.advance()?;
            let right = self.parse_unary()?;
            left = self.binop(op, left, right);
        }
    }

    fn parse_unary(&mut self) -> Result<ExprId, ParseError> {
        let op = match self.current.kind {
            TokenKind::Punctuation(Punctuation::Minus) => UnaryOpKind::Minus,
            TokenKind::Punctuation(Punctuation::Plus) => UnaryOpKind::Plus,
            TokenKind::Punctuation(Punctuation::Bang) => UnaryOpKind::Negation,
            _ => return self.parse_primary(),
        };
        let start = self.advance()?.span;
        let operand = self.parse_unary()?;
        let span = self.span_from(start);
        Ok(self.ast.push_expr(ExprKind::UnaryOp { op, operand }, span))
    }

    fn parse_primary(&mut self) -> Result<ExprId, ParseError> {
        let start = self.current.span;
        let kind = match self.current.kind {
            TokenKind::IntLiteral(v) => {
                self.advance()?;
                ExprKind::Literal(Literal::Int(v))
            }
            TokenKind::FloatLiteral(v) => {
                self.advance()?;
                ExprKind::Literal(Literal::Float(v))
            }
            TokenKind::BoolLiteral(v) => {
                self.advance()?;
                ExprKind::Literal(Literal::Bool(v))
            }
            TokenKind::StringLiteral(sym) => {
                self.advance()?;
                ExprKind::Literal(Literal::String(sym))
            }
            TokenKind::Punctuation(Punctuation::OpenParen) => {
                self.advance()?;
                let inner = self.parse_expr()?;
                self.expect(Punctuation::CloseParen)?;
                return Ok(inner);
            }
            TokenKind::Identifier(name) => {
                self.advance()?;
                if self.check(Punctuation::OpenParen) {
                    let args = self.parse_args()?;
                    ExprKind::Call(Call { name, args })
                } else if self.eat(Punctuation::OpenBracket)? {
                    let index = self.parse_expr()?;
                    self.expect(Punctuation::CloseBracket)?;
                    ExprKind::Index { array: name, index }
                } else {
                    ExprKind::Identifier(name)
                }
            }
            _ => return Err(self.unexpected("expression")),
        };
        let span = self.span_from(start);
        Ok(self.ast.push_expr(kind, span))
    }

    /// `'(' [expr (',' expr)*] ')'`
    pub(super) fn parse_args(&mut self) -> Result<Vec<ExprId>, ParseError> {
        self.expect(Punctuation::OpenParen)?;
        let mut args = Vec::new();
        if !self.check(Punctuation::CloseParen) {
            loop {
                args.push(self.parse_expr()?);
                if !self.eat(Punctuation::Comma)? {
                    break;
                }
            }
        }
        self.expect(Punctuation::CloseParen)?;
        Ok(args)
    }

    fn binop(&mut self, op: BinOpKind, left: ExprId, right: ExprId) -> ExprId {
        let span = self.span_of(left).connect_new(&self.span_of(right));
        self.ast.push_expr(ExprKind::BinOp { op, left, right }, span)
    }

    fn negate(&mut self, operand: ExprId) -> ExprId {
        let span = self.span_of(operand);
        self.ast.push_expr(
            ExprKind::UnaryOp {
                op: UnaryOpKind::Negation,
                operand,
            },
            span,
        )
    }

    fn span_of(&self, id: ExprId) -> Span {
        self.ast.expr(id).map_or(self.prev_span, |e| e.span)
    }
}
