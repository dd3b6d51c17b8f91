use cranelift::prelude::{
    FunctionBuilder, InstBuilder, MemFlags, Value,
    types::{I8, I32},
};
use string_interner::symbol::SymbolUsize;

use crate::compiler::{
    parser::node::{ExprId, ExprKind},
    types::ExpressionType,
};

use super::{
    CodegenContext, CodegenErrorKind, CodegenResult,
    binary_ops::lower_binop,
    cast::{to_clif, to_int},
    function_call::lower_call,
    literal::lower_literal,
    unary_ops::lower_unary,
};

/// Lowers an expression to a single value and reports its type.
pub fn lower_expr(
    id: ExprId,
    fn_builder: &mut FunctionBuilder,
    cx: &mut CodegenContext,
) -> CodegenResult<(Value, ExpressionType)> {
    let expr = cx.expr(id)?;

    let result = match &expr.kind {
        ExprKind::BinOp { op, left, right } => lower_binop(*op, *left, *right, fn_builder, cx),
        ExprKind::Literal(literal) => Ok(lower_literal(literal, fn_builder, cx)),
        ExprKind::UnaryOp { op, operand } => lower_unary(*op, *operand, fn_builder, cx),
        ExprKind::Identifier(name) => lower_identifier(*name, fn_builder, cx),
        ExprKind::Call(call) => lower_call(call, fn_builder, cx).and_then(|value| {
            value.ok_or_else(|| {
                CodegenErrorKind::VoidValue {
                    function: cx.name(call.name),
                }
                .into()
            })
        }),
        ExprKind::Index { array, index } => {
            element_address(*array, *index, fn_builder, cx).map(|addr| {
                let byte = fn_builder.ins().load(I8, MemFlags::new(), addr, 0);
                (fn_builder.ins().uextend(I32, byte), ExpressionType::Int)
            })
        }
    };

    result.map_err(|e| e.at(expr.span))
}

fn lower_identifier(
    name: SymbolUsize,
    fn_builder: &mut FunctionBuilder,
    cx: &CodegenContext,
) -> CodegenResult<(Value, ExpressionType)> {
    let var = cx.lookup(name)?;
    let value = fn_builder.ins().stack_load(to_clif(var.ty, cx.ptr_ty), var.slot, 0);
    Ok((value, var.ty))
}

/// Address of byte `index` of the string held by `array`.
pub fn element_address(
    array: SymbolUsize,
    index: ExprId,
    fn_builder: &mut FunctionBuilder,
    cx: &mut CodegenContext,
) -> CodegenResult<Value> {
    let var = cx.lookup(array)?;
    if var.ty != ExpressionType::String {
        return Err(CodegenErrorKind::NotIndexable {
            name: cx.name(array),
            ty: var.ty,
        }
        .into());
    }

    let (offset, offset_ty) = lower_expr(index, fn_builder, cx)?;
    let offset = to_int(offset, offset_ty, fn_builder)?;
    let offset = if cx.ptr_ty.bits() > 32 {
        fn_builder.ins().sextend(cx.ptr_ty, offset)
    } else {
        offset
    };

    let base = fn_builder.ins().stack_load(cx.ptr_ty, var.slot, 0);
    Ok(fn_builder.ins().iadd(base, offset))
}
