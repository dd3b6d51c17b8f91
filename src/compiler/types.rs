use std::fmt;

use thiserror::Error;

/// The four primitive value kinds of the language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpressionType {
    Int,
    Float,
    Bool,
    String,
}

/// Asking whether a type converts to itself is a bug in the caller, not a
/// "no" answer.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("trying to convert from '{0}' to itself")]
pub struct SameTypeConversion(pub ExpressionType);

impl ExpressionType {
    pub const ALL: [ExpressionType; 4] = [Self::Int, Self::Float, Self::Bool, Self::String];

    /// Whether a value of `self` can be implicitly cast to `to`.
    pub fn convertible(self, to: ExpressionType) -> Result<bool, SameTypeConversion> {
        use ExpressionType::*;
        if self == to {
            return Err(SameTypeConversion(self));
        }
        Ok(matches!(
            (self, to),
            (Int, Float) | (Int, Bool) | (Float, Int) | (Float, Bool) | (Bool, Int) | (Bool, Float)
        ))
    }

    /// The type both operands of a binary operation are cast to when their
    /// types differ. `None` means the operation is rejected.
    pub fn preferred_type(left: ExpressionType, right: ExpressionType) -> Option<ExpressionType> {
        use ExpressionType::*;
        if left == right {
            return Some(left);
        }
        match (left, right) {
            (Int, Float) => Some(Float),
            (Int, Bool) => Some(Int),
            (Float, Int) => Some(Float),
            (Float, Bool) => Some(Float),
            (Bool, Int) => Some(Int),
            (Bool, Float) => Some(Float),
            _ => None,
        }
    }
}

impl fmt::Display for ExpressionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExpressionType::Int => "Int",
            ExpressionType::Float => "Float",
            ExpressionType::Bool => "Bool",
            ExpressionType::String => "String",
        };
        write!(f, "{}", name)
    }
}
