use cranelift::prelude::{FloatCC, FunctionBuilder, InstBuilder, IntCC, Value};

use crate::compiler::{
    parser::node::{BinOpKind, ExprId},
    types::ExpressionType,
};

use super::{
    CodegenContext, CodegenErrorKind, CodegenResult,
    cast::{cast_value, to_bool},
    expr::lower_expr,
};

/// Both operands are always evaluated, left first.
pub fn lower_binop(
    op: BinOpKind,
    left: ExprId,
    right: ExprId,
    fn_builder: &mut FunctionBuilder,
    cx: &mut CodegenContext,
) -> CodegenResult<(Value, ExpressionType)> {
    let (lhs, left_ty) = lower_expr(left, fn_builder, cx)?;
    let (rhs, right_ty) = lower_expr(right, fn_builder, cx)?;

    let ty = ExpressionType::preferred_type(left_ty, right_ty).ok_or_else(|| CodegenErrorKind::NoPreferredType {
        op: op.to_string(),
        left: left_ty,
        right: right_ty,
    })?;
    let lhs = cast_value(lhs, left_ty, ty, fn_builder)?;
    let rhs = cast_value(rhs, right_ty, ty, fn_builder)?;

    match ty {
        ExpressionType::Int => int_binop(op, lhs, rhs, fn_builder),
        ExpressionType::Float => float_binop(op, lhs, rhs, fn_builder),
        ExpressionType::Bool => bool_binop(op, lhs, rhs, fn_builder),
        ExpressionType::String => Err(CodegenErrorKind::UnsupportedOperator {
            op: op.to_string(),
            ty,
        }
        .into()),
    }
}

fn int_binop(
    op: BinOpKind,
    lhs: Value,
    rhs: Value,
    fn_builder: &mut FunctionBuilder,
) -> CodegenResult<(Value, ExpressionType)> {
    let result = match op {
        BinOpKind::Plus => (fn_builder.ins().iadd(lhs, rhs), ExpressionType::Int),
        BinOpKind::Minus => (fn_builder.ins().isub(lhs, rhs), ExpressionType::Int),
        BinOpKind::Mul => (fn_builder.ins().imul(lhs, rhs), ExpressionType::Int),
        BinOpKind::Div => (fn_builder.ins().sdiv(lhs, rhs), ExpressionType::Int),
        BinOpKind::Mod => (fn_builder.ins().srem(lhs, rhs), ExpressionType::Int),
        BinOpKind::Equals => (fn_builder.ins().icmp(IntCC::Equal, lhs, rhs), ExpressionType::Bool),
        BinOpKind::Less => (fn_builder.ins().icmp(IntCC::SignedLessThan, lhs, rhs), ExpressionType::Bool),
        BinOpKind::Or | BinOpKind::And => return logical(op, lhs, rhs, ExpressionType::Int, fn_builder),
    };
    Ok(result)
}

fn float_binop(
    op: BinOpKind,
    lhs: Value,
    rhs: Value,
    fn_builder: &mut FunctionBuilder,
) -> CodegenResult<(Value, ExpressionType)> {
    let result = match op {
        BinOpKind::Plus => (fn_builder.ins().fadd(lhs, rhs), ExpressionType::Float),
        BinOpKind::Minus => (fn_builder.ins().fsub(lhs, rhs), ExpressionType::Float),
        BinOpKind::Mul => (fn_builder.ins().fmul(lhs, rhs), ExpressionType::Float),
        BinOpKind::Div => (fn_builder.ins().fdiv(lhs, rhs), ExpressionType::Float),
        BinOpKind::Mod => {
            // fmod: lhs - trunc(lhs / rhs) * rhs
            let quotient = fn_builder.ins().fdiv(lhs, rhs);
            let whole = fn_builder.ins().trunc(quotient);
            let product = fn_builder.ins().fmul(whole, rhs);
            (fn_builder.ins().fsub(lhs, product), ExpressionType::Float)
        }
        BinOpKind::Equals => (fn_builder.ins().fcmp(FloatCC::Equal, lhs, rhs), ExpressionType::Bool),
        BinOpKind::Less => (fn_builder.ins().fcmp(FloatCC::LessThan, lhs, rhs), ExpressionType::Bool),
        BinOpKind::Or | BinOpKind::And => return logical(op, lhs, rhs, ExpressionType::Float, fn_builder),
    };
    Ok(result)
}

fn bool_binop(
    op: BinOpKind,
    lhs: Value,
    rhs: Value,
    fn_builder: &mut FunctionBuilder,
) -> CodegenResult<(Value, ExpressionType)> {
    let value = match op {
        BinOpKind::Or => fn_builder.ins().bor(lhs, rhs),
        BinOpKind::And => fn_builder.ins().band(lhs, rhs),
        BinOpKind::Equals => fn_builder.ins().icmp(IntCC::Equal, lhs, rhs),
        BinOpKind::Less => fn_builder.ins().icmp(IntCC::UnsignedLessThan, lhs, rhs),
        BinOpKind::Plus | BinOpKind::Minus | BinOpKind::Mul | BinOpKind::Div | BinOpKind::Mod => {
            return Err(CodegenErrorKind::UnsupportedOperator {
                op: op.to_string(),
                ty: ExpressionType::Bool,
            }
            .into());
        }
    };
    Ok((value, ExpressionType::Bool))
}

/// `||` and `&&` on numbers: both sides become Bool first.
fn logical(
    op: BinOpKind,
    lhs: Value,
    rhs: Value,
    ty: ExpressionType,
    fn_builder: &mut FunctionBuilder,
) -> CodegenResult<(Value, ExpressionType)> {
    let lhs = to_bool(lhs, ty, fn_builder)?;
    let rhs = to_bool(rhs, ty, fn_builder)?;
    bool_binop(op, lhs, rhs, fn_builder)
}
