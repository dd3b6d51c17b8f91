use cranelift::prelude::{FunctionBuilder, InstBuilder};

use crate::compiler::parser::node::{ExprId, StmtId};

use super::{CodegenContext, CodegenResult, cast::to_bool, expr::lower_expr, is_terminated, stmt::lower_stmt};

/// The condition is emitted twice: once before entering the loop and again
/// at the end of the body as the back edge.
pub fn lower_while(
    cond: ExprId,
    body: StmtId,
    fn_builder: &mut FunctionBuilder,
    cx: &mut CodegenContext,
) -> CodegenResult<()> {
    let body_block = fn_builder.create_block();
    let after_block = fn_builder.create_block();

    let (cond_val, cond_ty) = lower_expr(cond, fn_builder, cx)?;
    let cond_val = to_bool(cond_val, cond_ty, fn_builder)?;
    fn_builder.ins().brif(cond_val, body_block, &[], after_block, &[]);

    fn_builder.switch_to_block(body_block);
    lower_stmt(body, fn_builder, cx)?;
    if !is_terminated(fn_builder) {
        let (cond_val, cond_ty) = lower_expr(cond, fn_builder, cx)?;
        let cond_val = to_bool(cond_val, cond_ty, fn_builder)?;
        fn_builder.ins().brif(cond_val, body_block, &[], after_block, &[]);
    }

    fn_builder.switch_to_block(after_block);
    cx.frame.continuations.push(after_block);
    Ok(())
}
