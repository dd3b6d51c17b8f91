use string_interner::symbol::SymbolUsize;

use super::{
    Interner,
    tokens::{Span, Token, TokenKind},
};

mod error;
mod keywords;
mod numbers;
mod punctuation;
mod strings;

pub use error::LexError;
pub use numbers::NumberBase;

/// Pull-based tokenizer: every call to [`Lexer::next_token`] produces exactly
/// one token, ending with an endless stream of `Eof`.
#[derive(Debug)]
pub struct Lexer {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    col: usize,
    file: SymbolUsize,
}

impl Lexer {
    pub fn new(source: &str, file: SymbolUsize) -> Self {
        Lexer {
            chars: source.chars().collect(),
            pos: 0,
            line: 1,
            col: 0,
            file,
        }
    }

    pub fn next_token(&mut self, interner: &mut Interner) -> Result<Token, LexError> {
        self.skip_trivia()?;
        let start = self.next_position();

        let Some(c) = self.peek() else {
            return Ok(Token::new(TokenKind::Eof, self.span_from(start)));
        };

        let kind = if c.is_ascii_digit() {
            self.lex_number(start)?
        } else if c == '"' {
            self.lex_string(start, interner)?
        } else if c.is_alphabetic() || c == '_' {
            self.lex_word(interner)
        } else {
            self.lex_punctuation(start)?
        };

        Ok(Token::new(kind, self.span_from(start)))
    }

    /// Drains the lexer, returning every token up to and including `Eof`.
    pub fn tokenize(mut self, interner: &mut Interner) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::with_capacity(self.chars.len() / 4);
        loop {
            let token = self.next_token(interner)?;
            tokens.push(token);
            if token.kind == TokenKind::Eof {
                return Ok(tokens);
            }
        }
    }

    fn skip_trivia(&mut self) -> Result<(), LexError> {
        loop {
            match (self.peek(), self.peek_nth(1)) {
                (Some(c), _) if c.is_whitespace() => {
                    self.bump();
                }
                (Some('/'), Some('/')) => {
                    while let Some(c) = self.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.bump();
                    }
                }
                (Some('/'), Some('*')) => {
                    let start = self.next_position();
                    self.bump();
                    self.bump();
                    loop {
                        match (self.peek(), self.peek_nth(1)) {
                            (Some('*'), Some('/')) => {
                                self.bump();
                                self.bump();
                                break;
                            }
                            (Some(_), _) => {
                                self.bump();
                            }
                            (None, _) => {
                                return Err(LexError::UnterminatedComment {
                                    span: self.span_from(start),
                                });
                            }
                        }
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_nth(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
            self.col = 0;
        } else {
            self.col += 1;
        }
        Some(c)
    }

    /// Position of the character that the next `bump` returns.
    fn next_position(&self) -> (usize, usize) {
        (self.line, self.col + 1)
    }

    /// Span from `start` to the last consumed character.
    fn span_from(&self, start: (usize, usize)) -> Span {
        let end = if self.col == 0 { start } else { (self.line, self.col.max(start.1)) };
        Span::new(self.file, start.0, start.1, end.0, end.1)
    }
}
