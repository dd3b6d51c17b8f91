use std::fmt;

use generational_arena::{Arena, Index};
use string_interner::symbol::SymbolUsize;

use crate::compiler::{Interner, tokens::Span, types::ExpressionType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExprId(pub Index);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StmtId(pub Index);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOpKind {
    Or,
    And,
    Equals,
    Less,
    Plus,
    Minus,
    Mul,
    Div,
    Mod,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOpKind {
    Plus,
    Minus,
    Negation,
}

impl fmt::Display for BinOpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            BinOpKind::Or => "||",
            BinOpKind::And => "&&",
            BinOpKind::Equals => "==",
            BinOpKind::Less => "<",
            BinOpKind::Plus => "+",
            BinOpKind::Minus => "-",
            BinOpKind::Mul => "*",
            BinOpKind::Div => "/",
            BinOpKind::Mod => "%",
        };
        write!(f, "{}", text)
    }
}

impl fmt::Display for UnaryOpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            UnaryOpKind::Plus => "+",
            UnaryOpKind::Minus => "-",
            UnaryOpKind::Negation => "!",
        };
        write!(f, "{}", text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Literal {
    Int(i32),
    Float(f64),
    Bool(bool),
    String(SymbolUsize),
}

impl Literal {
    pub fn ty(&self) -> ExpressionType {
        match self {
            Literal::Int(_) => ExpressionType::Int,
            Literal::Float(_) => ExpressionType::Float,
            Literal::Bool(_) => ExpressionType::Bool,
            Literal::String(_) => ExpressionType::String,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub name: SymbolUsize,
    pub args: Vec<ExprId>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    BinOp { op: BinOpKind, left: ExprId, right: ExprId },
    Literal(Literal),
    UnaryOp { op: UnaryOpKind, operand: ExprId },
    Identifier(SymbolUsize),
    Call(Call),
    Index { array: SymbolUsize, index: ExprId },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StmtKind {
    VarDecl {
        name: SymbolUsize,
        ty: ExpressionType,
        init: Option<ExprId>,
    },
    Assign {
        name: SymbolUsize,
        value: ExprId,
    },
    IndexAssign {
        array: SymbolUsize,
        index: ExprId,
        value: ExprId,
    },
    Return {
        value: Option<ExprId>,
    },
    If {
        cond: ExprId,
        then: StmtId,
        else_: Option<StmtId>,
    },
    While {
        cond: ExprId,
        body: StmtId,
    },
    Block {
        stmts: Vec<StmtId>,
    },
    Print {
        args: Vec<ExprId>,
    },
    Call(Call),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    /// `None` for `void` functions.
    pub return_type: Option<ExpressionType>,
    pub name: SymbolUsize,
    pub params: Vec<(SymbolUsize, ExpressionType)>,
    /// Always a `StmtKind::Block`.
    pub body: StmtId,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub functions: Vec<Function>,
}

/// Node storage for one translation unit. Children are referenced by id, so
/// the tree is dropped in one go with the arenas.
#[derive(Debug)]
pub struct Ast {
    exprs: Arena<Expr>,
    stmts: Arena<Stmt>,
    pub interner: Interner,
}

impl Ast {
    pub fn new(interner: Interner) -> Self {
        Self {
            exprs: Arena::new(),
            stmts: Arena::new(),
            interner,
        }
    }

    pub fn push_expr(&mut self, kind: ExprKind, span: Span) -> ExprId {
        ExprId(self.exprs.insert(Expr { kind, span }))
    }

    pub fn push_stmt(&mut self, kind: StmtKind, span: Span) -> StmtId {
        StmtId(self.stmts.insert(Stmt { kind, span }))
    }

    pub fn expr(&self, id: ExprId) -> Option<&Expr> {
        self.exprs.get(id.0)
    }

    pub fn stmt(&self, id: StmtId) -> Option<&Stmt> {
        self.stmts.get(id.0)
    }

    pub fn resolve(&self, sym: SymbolUsize) -> &str {
        self.interner.resolve(sym).unwrap_or("<unknown>")
    }
}
