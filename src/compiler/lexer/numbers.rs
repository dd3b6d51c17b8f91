use crate::compiler::tokens::TokenKind;

use super::{Lexer, error::LexError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberBase {
    Decimal,
    Hex,
    Binary,
    Octal,
}

impl NumberBase {
    fn radix(self) -> u32 {
        match self {
            NumberBase::Decimal => 10,
            NumberBase::Hex => 16,
            NumberBase::Binary => 2,
            NumberBase::Octal => 8,
        }
    }

    fn accepts(self, c: char) -> bool {
        c.is_digit(self.radix())
    }
}

impl Lexer {
    /// Lexes an integer or float literal. `_` separators are allowed anywhere
    /// after the first digit and are dropped before parsing.
    pub(super) fn lex_number(&mut self, start: (usize, usize)) -> Result<TokenKind, LexError> {
        let base = match (self.peek(), self.peek_nth(1)) {
            (Some('0'), Some('x')) => NumberBase::Hex,
            (Some('0'), Some('b')) => NumberBase::Binary,
            (Some('0'), Some('o')) => NumberBase::Octal,
            _ => NumberBase::Decimal,
        };
        if base != NumberBase::Decimal {
            self.bump();
            self.bump();
        }

        let mut digits = String::new();
        let mut float = false;
        while let Some(c) = self.peek() {
            if c == '_' {
                self.bump();
            } else if c == '.' && !float {
                float = true;
                digits.push(c);
                self.bump();
            } else if base.accepts(c) || (float && c.is_ascii_digit()) {
                digits.push(c);
                self.bump();
            } else {
                break;
            }
        }

        if float {
            if base != NumberBase::Decimal {
                return Err(LexError::NonDecimalFloat {
                    base,
                    span: self.span_from(start),
                });
            }
            return digits
                .parse::<f64>()
                .map(TokenKind::FloatLiteral)
                .map_err(|source| LexError::InvalidFloat {
                    value: digits.clone(),
                    span: self.span_from(start),
                    source,
                });
        }

        i32::from_str_radix(&digits, base.radix())
            .map(TokenKind::IntLiteral)
            .map_err(|source| LexError::InvalidInteger {
                value: digits.clone(),
                span: self.span_from(start),
                source,
            })
    }
}
