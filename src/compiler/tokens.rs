use std::fmt;

use string_interner::symbol::SymbolUsize;

use crate::compiler::{Interner, types::ExpressionType};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Keyword {
    If,
    Else,
    While,
    Return,
    Print,
    Void,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Punctuation {
    OpenParen,
    CloseParen,
    OpenBrace,
    CloseBrace,
    OpenBracket,
    CloseBracket,
    Comma,
    Semicolon,
    Bang,
    AmpAmp,
    PipePipe,

    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Eq,
    EqEq,
    NotEq,
    LessThan,
    LessThanOrEq,
    GreaterThan,
    GreaterThanOrEq,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TokenKind {
    IntLiteral(i32),
    FloatLiteral(f64),
    BoolLiteral(bool),
    StringLiteral(SymbolUsize),
    Keyword(Keyword),
    TypeLiteral(ExpressionType),
    Punctuation(Punctuation),
    Identifier(SymbolUsize),
    Eof,
}

/// A span of text in a file. Start and end are inclusive `(line, column)`
/// pairs, both 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Copy)]
pub struct Span {
    pub file: SymbolUsize,
    pub start: (usize, usize),
    pub end: (usize, usize),
}

#[derive(Debug, Clone, PartialEq, Copy)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

impl Span {
    pub fn new(file: SymbolUsize, start_line: usize, start_col: usize, end_line: usize, end_col: usize) -> Self {
        Self {
            file,
            start: (start_line, start_col),
            end: (end_line, end_col),
        }
    }

    /// The smallest span covering both `self` and `other`.
    pub fn connect_new(&self, other: &Self) -> Self {
        Self {
            file: self.file,
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

/// A span with its file name resolved, ready to be shown to a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplaySpan {
    pub file: String,
    pub start: (usize, usize),
    pub end: (usize, usize),
}

impl fmt::Display for DisplaySpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.start.0, self.start.1)
    }
}

impl fmt::Display for Punctuation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Punctuation::*;
        let text = match self {
            OpenParen => "(",
            CloseParen => ")",
            OpenBrace => "{",
            CloseBrace => "}",
            OpenBracket => "[",
            CloseBracket => "]",
            Comma => ",",
            Semicolon => ";",
            Bang => "!",
            AmpAmp => "&&",
            PipePipe => "||",
            Plus => "+",
            Minus => "-",
            Star => "*",
            Slash => "/",
            Percent => "%",
            Eq => "=",
            EqEq => "==",
            NotEq => "!=",
            LessThan => "<",
            LessThanOrEq => "<=",
            GreaterThan => ">",
            GreaterThanOrEq => ">=",
        };
        write!(f, "{}", text)
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Keyword::If => "if",
            Keyword::Else => "else",
            Keyword::While => "while",
            Keyword::Return => "return",
            Keyword::Print => "print",
            Keyword::Void => "void",
        };
        write!(f, "{}", text)
    }
}

impl TokenKind {
    /// Human readable description used in syntax errors.
    pub fn describe(&self, interner: &Interner) -> String {
        match self {
            TokenKind::IntLiteral(v) => format!("integer `{}`", v),
            TokenKind::FloatLiteral(v) => format!("float `{}`", v),
            TokenKind::BoolLiteral(v) => format!("`{}`", v),
            TokenKind::StringLiteral(_) => "string literal".to_string(),
            TokenKind::Keyword(k) => format!("keyword `{}`", k),
            TokenKind::TypeLiteral(t) => format!("type `{}`", t),
            TokenKind::Punctuation(p) => format!("`{}`", p),
            TokenKind::Identifier(sym) => format!("identifier `{}`", interner.resolve(*sym).unwrap_or("?")),
            TokenKind::Eof => "end of file".to_string(),
        }
    }
}
