use string_interner::symbol::SymbolUsize;

use super::{
    Interner,
    lexer::Lexer,
    tokens::{Punctuation, Span, Token, TokenKind},
};

mod definitions;
mod display;
mod error;
mod expr;
pub mod node;
mod statements;

pub use error::ParseError;
use node::Ast;

/// Recursive-descent parser over a pulled token stream with a single token of
/// lookahead. Nodes are pushed into the [`Ast`] arenas as they are completed.
pub struct Parser {
    lexer: Lexer,
    current: Token,
    prev_span: Span,
    ast: Ast,
}

impl Parser {
    pub fn new(source: &str, file_name: &str) -> Result<Self, ParseError> {
        let mut interner = Interner::new();
        let file = interner.get_or_intern(file_name);
        let mut lexer = Lexer::new(source, file);
        let current = lexer.next_token(&mut interner)?;
        Ok(Self {
            lexer,
            current,
            prev_span: current.span,
            ast: Ast::new(interner),
        })
    }

    pub fn ast(&self) -> &Ast {
        &self.ast
    }

    pub fn into_ast(self) -> Ast {
        self.ast
    }

    /// Consumes the current token and pulls the next one.
    fn advance(&mut self) -> Result<Token, ParseError> {
        let next = self.lexer.next_token(&mut self.ast.interner)?;
        let prev = std::mem::replace(&mut self.current, next);
        self.prev_span = prev.span;
        Ok(prev)
    }

    fn check(&self, punct: Punctuation) -> bool {
        self.current.kind == TokenKind::Punctuation(punct)
    }

    fn eat(&mut self, punct: Punctuation) -> Result<bool, ParseError> {
        if self.check(punct) {
            self.advance()?;
            return Ok(true);
        }
        Ok(false)
    }

    fn expect(&mut self, punct: Punctuation) -> Result<Token, ParseError> {
        if self.check(punct) {
            return self.advance();
        }
        Err(self.unexpected(format!("`{}`", punct)))
    }

    fn expect_identifier(&mut self, what: &str) -> Result<SymbolUsize, ParseError> {
        match self.current.kind {
            TokenKind::Identifier(sym) => {
                self.advance()?;
                Ok(sym)
            }
            _ => Err(self.unexpected(what)),
        }
    }

    fn unexpected(&self, expected: impl Into<String>) -> ParseError {
        ParseError::Expected {
            expected: expected.into(),
            found: self.current.kind.describe(&self.ast.interner),
            span: self.current.span,
        }
    }

    /// Span from `start` to the end of the last consumed token.
    fn span_from(&self, start: Span) -> Span {
        start.connect_new(&self.prev_span)
    }
}
