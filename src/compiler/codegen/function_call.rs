use cranelift::{
    module::Module,
    prelude::{FunctionBuilder, InstBuilder, Value},
};

use crate::compiler::{parser::node::Call, types::ExpressionType};

use super::{CodegenContext, CodegenErrorKind, CodegenResult, cast::cast_value, expr::lower_expr};

/// Calls a previously generated function. Yields `None` for void callees.
pub fn lower_call(
    call: &Call,
    fn_builder: &mut FunctionBuilder,
    cx: &mut CodegenContext,
) -> CodegenResult<Option<(Value, ExpressionType)>> {
    let function = cx.name(call.name);
    let entry = cx
        .functions
        .get(call.name)
        .cloned()
        .ok_or_else(|| CodegenErrorKind::UndefinedFunction { name: function.clone() })?;

    if call.args.len() != entry.params.len() {
        return Err(CodegenErrorKind::ArgumentCount {
            function,
            expected: entry.params.len(),
            found: call.args.len(),
        }
        .into());
    }

    let mut args = Vec::with_capacity(call.args.len());
    for (position, (&arg, &param_ty)) in call.args.iter().zip(&entry.params).enumerate() {
        let (value, ty) = lower_expr(arg, fn_builder, cx)?;
        if ty != param_ty && !ty.convertible(param_ty)? {
            return Err(CodegenErrorKind::ArgumentType {
                function,
                position: position + 1,
                expected: param_ty,
                found: ty,
            }
            .into());
        }
        args.push(cast_value(value, ty, param_ty, fn_builder)?);
    }

    let func_ref = cx.module.declare_func_in_func(entry.id, fn_builder.func);
    let inst = fn_builder.ins().call(func_ref, &args);

    Ok(entry
        .return_type
        .and_then(|ty| fn_builder.inst_results(inst).first().map(|&value| (value, ty))))
}
