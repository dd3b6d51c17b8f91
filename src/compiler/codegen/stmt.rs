use cranelift::prelude::FunctionBuilder;

use crate::compiler::parser::node::{StmtId, StmtKind};

use super::{
    CodegenContext, CodegenResult,
    block::lower_block,
    control_flow::{lower_if, lower_return},
    function_call::lower_call,
    print::lower_print,
    variable::{lower_assign, lower_index_assign, lower_var_decl},
    r#while::lower_while,
};

pub fn lower_stmt(id: StmtId, fn_builder: &mut FunctionBuilder, cx: &mut CodegenContext) -> CodegenResult<()> {
    let stmt = cx.stmt(id)?;

    let result = match &stmt.kind {
        StmtKind::VarDecl { name, ty, init } => lower_var_decl(*name, *ty, *init, fn_builder, cx),
        StmtKind::Assign { name, value } => lower_assign(*name, *value, fn_builder, cx),
        StmtKind::IndexAssign { array, index, value } => lower_index_assign(*array, *index, *value, fn_builder, cx),
        StmtKind::Return { value } => lower_return(*value, fn_builder, cx),
        StmtKind::If { cond, then, else_ } => lower_if(*cond, *then, *else_, fn_builder, cx),
        StmtKind::While { cond, body } => lower_while(*cond, *body, fn_builder, cx),
        StmtKind::Block { stmts } => lower_block(stmts, fn_builder, cx),
        StmtKind::Print { args } => lower_print(args, fn_builder, cx),
        // void callees yield no value, so there is nothing to discard
        StmtKind::Call(call) => lower_call(call, fn_builder, cx).map(|_| ()),
    };

    result.map_err(|e| e.at(stmt.span))
}
