use cranelift::prelude::{FunctionBuilder, InstBuilder, IntCC, Value};

use crate::compiler::{
    parser::node::{ExprId, UnaryOpKind},
    types::ExpressionType,
};

use super::{CodegenContext, CodegenErrorKind, CodegenResult, cast::to_bool, expr::lower_expr};

pub fn lower_unary(
    op: UnaryOpKind,
    operand: ExprId,
    fn_builder: &mut FunctionBuilder,
    cx: &mut CodegenContext,
) -> CodegenResult<(Value, ExpressionType)> {
    let (value, ty) = lower_expr(operand, fn_builder, cx)?;

    match (op, ty) {
        (UnaryOpKind::Plus, _) => Ok((value, ty)),
        (UnaryOpKind::Minus, ExpressionType::Int) => Ok((fn_builder.ins().ineg(value), ty)),
        (UnaryOpKind::Minus, ExpressionType::Float) => Ok((fn_builder.ins().fneg(value), ty)),
        // -1 == 1 in one-bit arithmetic
        (UnaryOpKind::Minus, ExpressionType::Bool) => Ok((value, ty)),
        (UnaryOpKind::Minus, ExpressionType::String) => Err(CodegenErrorKind::UnsupportedOperator {
            op: op.to_string(),
            ty,
        }
        .into()),
        (UnaryOpKind::Negation, _) => {
            let value = to_bool(value, ty, fn_builder)?;
            Ok((fn_builder.ins().icmp_imm(IntCC::Equal, value, 0), ExpressionType::Bool))
        }
    }
}
