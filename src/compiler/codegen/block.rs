use cranelift::prelude::FunctionBuilder;
use tracing::trace;

use crate::compiler::parser::node::StmtId;

use super::{CodegenContext, CodegenResult, is_terminated, scope, stmt::lower_stmt};

/// Lowers a `{ ... }` in its own scope frame. Statements after a terminator
/// are unreachable and skipped.
pub fn lower_block(stmts: &[StmtId], fn_builder: &mut FunctionBuilder, cx: &mut CodegenContext) -> CodegenResult<()> {
    let mut cx = scope::enter(cx);

    for (i, &stmt) in stmts.iter().enumerate() {
        if is_terminated(fn_builder) {
            trace!(skipped = stmts.len() - i, "unreachable statements");
            break;
        }
        lower_stmt(stmt, fn_builder, &mut cx)?;
    }
    Ok(())
}
