use crate::compiler::{
    Interner,
    tokens::{Keyword, TokenKind},
    types::ExpressionType,
};

use super::Lexer;

pub trait IdentChar {
    fn is_valid_ident_char(&self) -> bool;
}

impl IdentChar for char {
    fn is_valid_ident_char(&self) -> bool {
        self.is_alphanumeric() || *self == '_'
    }
}

impl Lexer {
    /// Lexes an identifier, then reclassifies it if it is a reserved word.
    pub(super) fn lex_word(&mut self, interner: &mut Interner) -> TokenKind {
        let mut word = String::new();
        while let Some(c) = self.peek() {
            if !c.is_valid_ident_char() {
                break;
            }
            word.push(c);
            self.bump();
        }

        match word.as_str() {
            "if" => TokenKind::Keyword(Keyword::If),
            "else" => TokenKind::Keyword(Keyword::Else),
            "while" => TokenKind::Keyword(Keyword::While),
            "return" => TokenKind::Keyword(Keyword::Return),
            "print" => TokenKind::Keyword(Keyword::Print),
            "void" => TokenKind::Keyword(Keyword::Void),
            "int" => TokenKind::TypeLiteral(ExpressionType::Int),
            "float" => TokenKind::TypeLiteral(ExpressionType::Float),
            "bool" => TokenKind::TypeLiteral(ExpressionType::Bool),
            "string" => TokenKind::TypeLiteral(ExpressionType::String),
            "true" => TokenKind::BoolLiteral(true),
            "false" => TokenKind::BoolLiteral(false),
            _ => TokenKind::Identifier(interner.get_or_intern(word)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::tokens::Keyword::*;
    use crate::compiler::tokens::TokenKind::*;

    #[test]
    fn test_lex_keywords() {
        let mut interner = Interner::new();
        let file = interner.get_or_intern("");
        let contents = "if else while return print void int float bool string true false";
        let tokens = Lexer::new(contents, file).tokenize(&mut interner).unwrap();

        let expected_tokens = vec![
            (Keyword(If), (1, 1), (1, 2)),
            (Keyword(Else), (1, 4), (1, 7)),
            (Keyword(While), (1, 9), (1, 13)),
            (Keyword(Return), (1, 15), (1, 20)),
            (Keyword(Print), (1, 22), (1, 26)),
            (Keyword(Void), (1, 28), (1, 31)),
            (TypeLiteral(ExpressionType::Int), (1, 33), (1, 35)),
            (TypeLiteral(ExpressionType::Float), (1, 37), (1, 41)),
            (TypeLiteral(ExpressionType::Bool), (1, 43), (1, 46)),
            (TypeLiteral(ExpressionType::String), (1, 48), (1, 53)),
            (BoolLiteral(true), (1, 55), (1, 58)),
            (BoolLiteral(false), (1, 60), (1, 64)),
            (Eof, (1, 65), (1, 65)),
        ];

        assert_eq!(tokens.len(), expected_tokens.len());
        for (token, (kind, start, end)) in tokens.iter().zip(expected_tokens) {
            assert_eq!(token.kind, kind);
            assert_eq!(token.span.start, start);
            assert_eq!(token.span.end, end);
        }
    }

    #[test]
    fn test_lex_identifiers() {
        let mut interner = Interner::new();
        let file = interner.get_or_intern("");
        let tokens = Lexer::new("_tmp x1 iff", file).tokenize(&mut interner).unwrap();

        let names: Vec<_> = tokens
            .iter()
            .filter_map(|t| match t.kind {
                Identifier(sym) => interner.resolve(sym),
                _ => None,
            })
            .collect();
        assert_eq!(names, vec!["_tmp", "x1", "iff"]);
    }
}
