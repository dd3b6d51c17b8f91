use cranelift::module::ModuleError;
use thiserror::Error;

use crate::compiler::{
    tokens::Span,
    types::{ExpressionType, SameTypeConversion},
};

#[derive(Error, Debug)]
pub enum CodegenErrorKind {
    #[error("undefined variable '{name}'")]
    UndefinedVariable { name: String },

    #[error("undefined function '{name}'")]
    UndefinedFunction { name: String },

    #[error("function '{function}' expects {expected} argument(s), got {found}")]
    ArgumentCount {
        function: String,
        expected: usize,
        found: usize,
    },

    #[error("argument {position} of '{function}': cannot convert {found} to {expected}")]
    ArgumentType {
        function: String,
        position: usize,
        expected: ExpressionType,
        found: ExpressionType,
    },

    #[error("operator '{op}' cannot combine {left} and {right}")]
    NoPreferredType {
        op: String,
        left: ExpressionType,
        right: ExpressionType,
    },

    #[error("operator '{op}' is not supported for {ty}")]
    UnsupportedOperator { op: String, ty: ExpressionType },

    #[error("cannot convert {from} to {to}")]
    InvalidCast { from: ExpressionType, to: ExpressionType },

    #[error("cannot assign {found} to '{name}' of type {expected}")]
    VariableType {
        name: String,
        expected: ExpressionType,
        found: ExpressionType,
    },

    #[error("cannot return {found} from a function returning {expected}")]
    ReturnType { expected: ExpressionType, found: ExpressionType },

    #[error("print requires a format string argument")]
    PrintMissingFormat,

    #[error("first argument of print must be a String, got {found}")]
    PrintFormat { found: ExpressionType },

    #[error("function '{function}' returns void - you can't store the result")]
    VoidValue { function: String },

    #[error("variable '{name}' is already declared in this scope")]
    Redeclaration { name: String },

    #[error("every path must have return statement")]
    MissingReturn,

    #[error("void function cannot return a value of type {found}")]
    ReturnValueFromVoid { found: ExpressionType },

    #[error("missing return value of type {expected}")]
    MissingReturnValue { expected: ExpressionType },

    #[error("'{name}' of type {ty} cannot be indexed")]
    NotIndexable { name: String, ty: ExpressionType },

    #[error("function '{name}' is already defined")]
    FunctionRedefinition { name: String },

    #[error("'{name}' is reserved for print")]
    ReservedName { name: String },

    #[error("internal codegen error: {0}")]
    Internal(String),

    #[error("cranelift module error: {0}")]
    Module(#[from] ModuleError),
}

/// A codegen failure plus where it happened. The span is that of the
/// innermost node being lowered when the error surfaced.
#[derive(Error, Debug)]
#[error("{kind}")]
pub struct CodegenError {
    pub kind: CodegenErrorKind,
    pub span: Option<Span>,
    pub function: Option<String>,
}

impl CodegenError {
    /// Attaches `span` unless a more precise one is already set.
    pub fn at(mut self, span: Span) -> Self {
        self.span.get_or_insert(span);
        self
    }

    pub fn in_function(mut self, name: &str) -> Self {
        self.function.get_or_insert_with(|| name.to_string());
        self
    }
}

impl From<CodegenErrorKind> for CodegenError {
    fn from(kind: CodegenErrorKind) -> Self {
        Self {
            kind,
            span: None,
            function: None,
        }
    }
}

impl From<ModuleError> for CodegenError {
    fn from(err: ModuleError) -> Self {
        CodegenErrorKind::Module(err).into()
    }
}

impl From<SameTypeConversion> for CodegenError {
    fn from(err: SameTypeConversion) -> Self {
        CodegenErrorKind::Internal(err.to_string()).into()
    }
}
