use cranelift::{
    module::Module,
    prelude::{AbiParam, FunctionBuilder, InstBuilder, Signature, types::I32},
};

use crate::compiler::{parser::node::ExprId, types::ExpressionType};

use super::{
    CodegenContext, CodegenErrorKind, CodegenResult,
    cast::{cast_value, to_clif},
    expr::lower_expr,
};

/// `print(fmt, args...)` becomes a `printf` call. `printf` is variadic, so
/// every call site imports a signature matching its own arguments and calls
/// through the function's address.
pub fn lower_print(args: &[ExprId], fn_builder: &mut FunctionBuilder, cx: &mut CodegenContext) -> CodegenResult<()> {
    if args.is_empty() {
        return Err(CodegenErrorKind::PrintMissingFormat.into());
    }

    let mut values = Vec::with_capacity(args.len());
    let mut types = Vec::with_capacity(args.len());
    for (position, &arg) in args.iter().enumerate() {
        let (value, ty) = lower_expr(arg, fn_builder, cx)?;
        if position == 0 && ty != ExpressionType::String {
            return Err(CodegenErrorKind::PrintFormat { found: ty }.into());
        }
        let (value, ty) = match ty {
            ExpressionType::Bool => (cast_value(value, ty, ExpressionType::Int, fn_builder)?, ExpressionType::Int),
            _ => (value, ty),
        };
        values.push(value);
        types.push(ty);
    }

    let mut sig = Signature::new(cx.call_conv);
    sig.params
        .extend(types.iter().map(|&ty| AbiParam::new(to_clif(ty, cx.ptr_ty))));
    sig.returns.push(AbiParam::new(I32));
    let sig_ref = fn_builder.import_signature(sig);

    let printf = cx.module.declare_func_in_func(cx.printf, fn_builder.func);
    let callee = fn_builder.ins().func_addr(cx.ptr_ty, printf);
    fn_builder.ins().call_indirect(sig_ref, callee, &values);
    Ok(())
}
