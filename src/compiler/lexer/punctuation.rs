use crate::compiler::tokens::{Punctuation, TokenKind};

use super::{Lexer, error::LexError};

impl Lexer {
    /// Two-character operators are matched before their one-character
    /// prefixes.
    pub(super) fn lex_punctuation(&mut self, start: (usize, usize)) -> Result<TokenKind, LexError> {
        use Punctuation::*;

        let double = match (self.peek(), self.peek_nth(1)) {
            (Some('&'), Some('&')) => Some(AmpAmp),
            (Some('|'), Some('|')) => Some(PipePipe),
            (Some('='), Some('=')) => Some(EqEq),
            (Some('!'), Some('=')) => Some(NotEq),
            (Some('<'), Some('=')) => Some(LessThanOrEq),
            (Some('>'), Some('=')) => Some(GreaterThanOrEq),
            _ => None,
        };
        if let Some(punct) = double {
            self.bump();
            self.bump();
            return Ok(TokenKind::Punctuation(punct));
        }

        let Some(c) = self.bump() else {
            return Ok(TokenKind::Eof);
        };
        let punct = match c {
            '(' => OpenParen,
            ')' => CloseParen,
            '{' => OpenBrace,
            '}' => CloseBrace,
            '[' => OpenBracket,
            ']' => CloseBracket,
            ',' => Comma,
            ';' => Semicolon,
            '!' => Bang,
            '+' => Plus,
            '-' => Minus,
            '*' => Star,
            '/' => Slash,
            '%' => Percent,
            '=' => Eq,
            '<' => LessThan,
            '>' => GreaterThan,
            character => {
                return Err(LexError::InvalidCharacter {
                    character,
                    span: self.span_from(start),
                });
            }
        };
        Ok(TokenKind::Punctuation(punct))
    }
}
