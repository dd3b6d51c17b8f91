use crate::compiler::{Interner, tokens::TokenKind};

use super::{Lexer, error::LexError};

impl Lexer {
    /// Lexes a double-quoted literal. Escapes are resolved here so the
    /// interned text is exactly the bytes the program will see.
    pub(super) fn lex_string(&mut self, start: (usize, usize), interner: &mut Interner) -> Result<TokenKind, LexError> {
        self.bump();
        let mut text = String::new();
        loop {
            let escape_start = self.next_position();
            match self.bump() {
                None | Some('\n') => {
                    return Err(LexError::UnterminatedString {
                        span: self.span_from(start),
                    });
                }
                Some('"') => break,
                Some('\\') => {
                    let escaped = match self.bump() {
                        Some('n') => '\n',
                        Some('t') => '\t',
                        Some('r') => '\r',
                        Some('0') => '\0',
                        Some('\\') => '\\',
                        Some('"') => '"',
                        Some(character) => {
                            return Err(LexError::InvalidEscape {
                                character,
                                span: self.span_from(escape_start),
                            });
                        }
                        None => {
                            return Err(LexError::UnterminatedString {
                                span: self.span_from(start),
                            });
                        }
                    };
                    text.push(escaped);
                }
                Some(c) => text.push(c),
            }
        }
        Ok(TokenKind::StringLiteral(interner.get_or_intern(text)))
    }
}
