use cranelift::prelude::{
    FunctionBuilder, InstBuilder, StackSlotData, StackSlotKind, Type, Value,
    types::{I8, I32},
};

use crate::compiler::{parser::node::Literal, types::ExpressionType};

use super::CodegenContext;

pub fn lower_literal(
    literal: &Literal,
    fn_builder: &mut FunctionBuilder,
    cx: &CodegenContext,
) -> (Value, ExpressionType) {
    let value = match literal {
        Literal::Int(v) => fn_builder.ins().iconst(I32, i64::from(*v)),
        Literal::Float(v) => fn_builder.ins().f64const(*v),
        Literal::Bool(v) => fn_builder.ins().iconst(I8, i64::from(*v)),
        Literal::String(sym) => string_literal(cx.ast.resolve(*sym).as_bytes(), cx.ptr_ty, fn_builder),
    };
    (value, literal.ty())
}

/// Copies `bytes` plus a NUL terminator into a fresh stack slot and returns
/// its address.
pub fn string_literal(bytes: &[u8], ptr_ty: Type, fn_builder: &mut FunctionBuilder) -> Value {
    let size = bytes.len() as u32 + 1;
    let slot = fn_builder.create_sized_stack_slot(StackSlotData::new(StackSlotKind::ExplicitSlot, size, 0));

    for (offset, byte) in bytes.iter().chain(std::iter::once(&0)).enumerate() {
        let byte = fn_builder.ins().iconst(I8, i64::from(*byte));
        fn_builder.ins().stack_store(byte, slot, offset as i32);
    }
    fn_builder.ins().stack_addr(ptr_ty, slot, 0)
}
