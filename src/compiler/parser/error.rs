use thiserror::Error;

use crate::compiler::{lexer::LexError, tokens::Span};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("Expected {expected}, got {found}")]
    Expected { expected: String, found: String, span: Span },
}

impl ParseError {
    pub fn span(&self) -> &Span {
        match self {
            ParseError::Lex(err) => err.span(),
            ParseError::Expected { span, .. } => span,
        }
    }
}
