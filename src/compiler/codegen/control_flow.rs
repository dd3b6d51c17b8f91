use cranelift::prelude::{FunctionBuilder, InstBuilder};
use tracing::trace;

use crate::compiler::parser::node::{ExprId, StmtId};

use super::{
    CodegenContext, CodegenErrorKind, CodegenResult, cast::cast_value, cast::to_bool, expr::lower_expr,
    is_terminated, stmt::lower_stmt,
};

/// The merge block is only created when at least one branch falls through.
/// When both branches return, the insertion point stays terminated.
pub fn lower_if(
    cond: ExprId,
    then: StmtId,
    else_: Option<StmtId>,
    fn_builder: &mut FunctionBuilder,
    cx: &mut CodegenContext,
) -> CodegenResult<()> {
    let (cond_val, cond_ty) = lower_expr(cond, fn_builder, cx)?;
    let cond_val = to_bool(cond_val, cond_ty, fn_builder)?;

    let then_block = fn_builder.create_block();
    let else_block = fn_builder.create_block();
    fn_builder.ins().brif(cond_val, then_block, &[], else_block, &[]);

    let mut merge_block = None;

    fn_builder.switch_to_block(then_block);
    lower_stmt(then, fn_builder, cx)?;
    if !is_terminated(fn_builder) {
        let merge = *merge_block.get_or_insert_with(|| fn_builder.create_block());
        fn_builder.ins().jump(merge, &[]);
    }

    fn_builder.switch_to_block(else_block);
    if let Some(else_) = else_ {
        lower_stmt(else_, fn_builder, cx)?;
    }
    if !is_terminated(fn_builder) {
        let merge = *merge_block.get_or_insert_with(|| fn_builder.create_block());
        fn_builder.ins().jump(merge, &[]);
    }

    match merge_block {
        Some(merge) => {
            fn_builder.switch_to_block(merge);
            cx.frame.continuations.push(merge);
        }
        None => trace!("both branches of if terminate"),
    }
    Ok(())
}

pub fn lower_return(
    value: Option<ExprId>,
    fn_builder: &mut FunctionBuilder,
    cx: &mut CodegenContext,
) -> CodegenResult<()> {
    match (cx.frame.return_type, value) {
        (None, None) => {
            fn_builder.ins().return_(&[]);
        }
        (None, Some(value)) => {
            let (_, found) = lower_expr(value, fn_builder, cx)?;
            return Err(CodegenErrorKind::ReturnValueFromVoid { found }.into());
        }
        (Some(expected), None) => {
            return Err(CodegenErrorKind::MissingReturnValue { expected }.into());
        }
        (Some(expected), Some(value)) => {
            let (value, found) = lower_expr(value, fn_builder, cx)?;
            if found != expected && !found.convertible(expected)? {
                return Err(CodegenErrorKind::ReturnType { expected, found }.into());
            }
            let value = cast_value(value, found, expected, fn_builder)?;
            fn_builder.ins().return_(&[value]);
        }
    }
    Ok(())
}
