use thiserror::Error;

use crate::compiler::tokens::Span;

use super::NumberBase;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LexError {
    #[error("Invalid character '{character}'")]
    InvalidCharacter { character: char, span: Span },

    #[error("Unterminated string literal")]
    UnterminatedString { span: Span },

    #[error("Unterminated block comment")]
    UnterminatedComment { span: Span },

    #[error("Unknown escape sequence '\\{character}'")]
    InvalidEscape { character: char, span: Span },

    #[error("Invalid float '{value}'")]
    InvalidFloat {
        value: String,
        span: Span,
        #[source]
        source: std::num::ParseFloatError,
    },

    #[error("Invalid integer '{value}'")]
    InvalidInteger {
        value: String,
        span: Span,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("Float literals must be decimal, found {base:?} prefix")]
    NonDecimalFloat { base: NumberBase, span: Span },
}

impl LexError {
    pub fn span(&self) -> &Span {
        match self {
            LexError::InvalidCharacter { span, .. }
            | LexError::UnterminatedString { span }
            | LexError::UnterminatedComment { span }
            | LexError::InvalidEscape { span, .. }
            | LexError::InvalidFloat { span, .. }
            | LexError::InvalidInteger { span, .. }
            | LexError::NonDecimalFloat { span, .. } => span,
        }
    }
}
