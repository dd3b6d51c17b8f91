use cranelift::prelude::{
    FunctionBuilder, InstBuilder, MemFlags, StackSlotData, StackSlotKind, Type, Value,
    codegen::ir::StackSlot,
    types::{I8, I32},
};
use string_interner::symbol::SymbolUsize;

use crate::compiler::{parser::node::ExprId, types::ExpressionType};

use super::{
    CodegenContext, CodegenErrorKind, CodegenResult, VarSlot,
    cast::{cast_value, slot_layout, to_int},
    expr::{element_address, lower_expr},
    literal::string_literal,
};

pub fn alloc_slot(ty: ExpressionType, ptr_ty: Type, fn_builder: &mut FunctionBuilder) -> StackSlot {
    let (size, align_shift) = slot_layout(ty, ptr_ty);
    fn_builder.create_sized_stack_slot(StackSlotData::new(StackSlotKind::ExplicitSlot, size, align_shift))
}

/// The value a declared variable holds before its initializer runs. Strings
/// start out empty rather than null.
fn zero_value(ty: ExpressionType, ptr_ty: Type, fn_builder: &mut FunctionBuilder) -> Value {
    match ty {
        ExpressionType::Int => fn_builder.ins().iconst(I32, 0),
        ExpressionType::Float => fn_builder.ins().f64const(0.0),
        ExpressionType::Bool => fn_builder.ins().iconst(I8, 0),
        ExpressionType::String => string_literal(b"", ptr_ty, fn_builder),
    }
}

pub fn lower_var_decl(
    name: SymbolUsize,
    ty: ExpressionType,
    init: Option<ExprId>,
    fn_builder: &mut FunctionBuilder,
    cx: &mut CodegenContext,
) -> CodegenResult<()> {
    if cx.scopes.is_defined_in_innermost(name) {
        return Err(CodegenErrorKind::Redeclaration { name: cx.name(name) }.into());
    }

    let slot = alloc_slot(ty, cx.ptr_ty, fn_builder);
    let zero = zero_value(ty, cx.ptr_ty, fn_builder);
    fn_builder.ins().stack_store(zero, slot, 0);
    cx.scopes
        .define(name, VarSlot { ty, slot })
        .map_err(|_| CodegenErrorKind::Redeclaration { name: cx.name(name) })?;

    if let Some(init) = init {
        let (value, value_ty) = lower_expr(init, fn_builder, cx)?;
        let value = cast_for_variable(name, value, value_ty, ty, fn_builder, cx)?;
        fn_builder.ins().stack_store(value, slot, 0);
    }
    Ok(())
}

pub fn lower_assign(
    name: SymbolUsize,
    value: ExprId,
    fn_builder: &mut FunctionBuilder,
    cx: &mut CodegenContext,
) -> CodegenResult<()> {
    let var = cx.lookup(name)?;
    let (value, value_ty) = lower_expr(value, fn_builder, cx)?;
    let value = cast_for_variable(name, value, value_ty, var.ty, fn_builder, cx)?;
    fn_builder.ins().stack_store(value, var.slot, 0);
    Ok(())
}

/// `s[i] = v`: the value is converted to Int and its low byte stored.
pub fn lower_index_assign(
    array: SymbolUsize,
    index: ExprId,
    value: ExprId,
    fn_builder: &mut FunctionBuilder,
    cx: &mut CodegenContext,
) -> CodegenResult<()> {
    let addr = element_address(array, index, fn_builder, cx)?;
    let (value, value_ty) = lower_expr(value, fn_builder, cx)?;
    let value = to_int(value, value_ty, fn_builder)?;
    let byte = fn_builder.ins().ireduce(I8, value);
    fn_builder.ins().store(MemFlags::new(), byte, addr, 0);
    Ok(())
}

fn cast_for_variable(
    name: SymbolUsize,
    value: Value,
    from: ExpressionType,
    to: ExpressionType,
    fn_builder: &mut FunctionBuilder,
    cx: &CodegenContext,
) -> CodegenResult<Value> {
    if from != to && !from.convertible(to)? {
        return Err(CodegenErrorKind::VariableType {
            name: cx.name(name),
            expected: to,
            found: from,
        }
        .into());
    }
    cast_value(value, from, to, fn_builder)
}
