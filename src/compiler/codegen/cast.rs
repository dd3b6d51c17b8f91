use cranelift::prelude::{
    FloatCC, FunctionBuilder, InstBuilder, IntCC, Type, Value,
    types::{F64, I8, I32},
};

use crate::compiler::types::ExpressionType;

use super::{CodegenErrorKind, CodegenResult};

pub fn to_clif(ty: ExpressionType, ptr_ty: Type) -> Type {
    match ty {
        ExpressionType::Int => I32,
        ExpressionType::Float => F64,
        ExpressionType::Bool => I8,
        ExpressionType::String => ptr_ty,
    }
}

/// Size and alignment shift of a stack slot holding `ty`.
pub fn slot_layout(ty: ExpressionType, ptr_ty: Type) -> (u32, u8) {
    let bytes = to_clif(ty, ptr_ty).bytes();
    (bytes, bytes.trailing_zeros() as u8)
}

/// Converts `value` from `from` to `to`. Float → Int truncates toward zero
/// and saturates, with NaN becoming 0.
pub fn cast_value(
    value: Value,
    from: ExpressionType,
    to: ExpressionType,
    fn_builder: &mut FunctionBuilder,
) -> CodegenResult<Value> {
    use ExpressionType::*;

    if from == to {
        return Ok(value);
    }
    if !from.convertible(to)? {
        return Err(CodegenErrorKind::InvalidCast { from, to }.into());
    }

    let result = match (from, to) {
        (Float, Int) => fn_builder.ins().fcvt_to_sint_sat(I32, value),
        (Bool, Int) => fn_builder.ins().uextend(I32, value),
        (Int, Float) => fn_builder.ins().fcvt_from_sint(F64, value),
        (Bool, Float) => {
            let wide = fn_builder.ins().uextend(I32, value);
            fn_builder.ins().fcvt_from_uint(F64, wide)
        }
        (Int, Bool) => fn_builder.ins().icmp_imm(IntCC::NotEqual, value, 0),
        (Float, Bool) => {
            let zero = fn_builder.ins().f64const(0.0);
            fn_builder.ins().fcmp(FloatCC::NotEqual, value, zero)
        }
        _ => return Err(CodegenErrorKind::InvalidCast { from, to }.into()),
    };
    Ok(result)
}

pub fn to_bool(value: Value, from: ExpressionType, fn_builder: &mut FunctionBuilder) -> CodegenResult<Value> {
    cast_value(value, from, ExpressionType::Bool, fn_builder)
}

pub fn to_int(value: Value, from: ExpressionType, fn_builder: &mut FunctionBuilder) -> CodegenResult<Value> {
    cast_value(value, from, ExpressionType::Int, fn_builder)
}
