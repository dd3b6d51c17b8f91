use cranelift::{
    codegen::{
        Context,
        ir::{Function, UserFuncName},
    },
    module::{Linkage, Module},
    prelude::{AbiParam, Block, FunctionBuilder, FunctionBuilderContext, InstBuilder, Signature},
};
use string_interner::symbol::SymbolUsize;
use tracing::{debug, trace};

use crate::compiler::{
    parser::node::{self, StmtId},
    tokens::Span,
    types::ExpressionType,
};

use super::{
    CodegenContext, CodegenError, CodegenErrorKind, CodegenResult, FunctionEntry, FunctionFrame, IrFunction,
    PRINTF, VarSlot, block_is_terminated, cast::to_clif, implicit_return, is_terminated, scope,
    stmt::lower_stmt, variable::alloc_slot,
};

/// What a function shell is built from. Single-statement mode builds one
/// without a declaration in the source.
struct Shell<'f> {
    name: &'f str,
    params: &'f [(SymbolUsize, ExpressionType)],
    return_type: Option<ExpressionType>,
    body: StmtId,
    span: Span,
}

/// Generates one declared function and registers it once it compiled, so
/// only earlier functions are callable from its body.
pub fn lower_fn(function: &node::Function, cx: &mut CodegenContext) -> CodegenResult<()> {
    let ast = cx.ast;
    let name = ast.resolve(function.name);

    if name == PRINTF {
        return Err(CodegenError::from(CodegenErrorKind::ReservedName { name: name.to_string() })
            .at(function.span)
            .in_function(name));
    }
    if cx.functions.contains(function.name) {
        return Err(CodegenError::from(CodegenErrorKind::FunctionRedefinition { name: name.to_string() })
            .at(function.span)
            .in_function(name));
    }

    let shell = Shell {
        name,
        params: &function.params,
        return_type: function.return_type,
        body: function.body,
        span: function.span,
    };
    let entry = lower_shell(&shell, cx).map_err(|e| e.in_function(name))?;
    cx.functions.insert(function.name, entry);
    Ok(())
}

/// Wraps `stmt` in `int main()`.
pub fn lower_main_shell(stmt: StmtId, cx: &mut CodegenContext) -> CodegenResult<()> {
    let span = cx.stmt(stmt)?.span;
    let shell = Shell {
        name: "main",
        params: &[],
        return_type: Some(ExpressionType::Int),
        body: stmt,
        span,
    };
    lower_shell(&shell, cx).map(|_| ()).map_err(|e| e.in_function("main"))
}

fn lower_shell(shell: &Shell, cx: &mut CodegenContext) -> CodegenResult<FunctionEntry> {
    let mut sig = Signature::new(cx.call_conv);
    for &(_, ty) in shell.params {
        sig.params.push(AbiParam::new(to_clif(ty, cx.ptr_ty)));
    }
    if let Some(ty) = shell.return_type {
        sig.returns.push(AbiParam::new(to_clif(ty, cx.ptr_ty)));
    }

    let func_id = cx
        .module
        .declare_function(shell.name, Linkage::Export, &sig)
        .map_err(|e| CodegenError::from(e).at(shell.span))?;

    let mut func = Function::with_name_signature(UserFuncName::testcase(shell.name), sig);
    let mut fn_builder_ctx = FunctionBuilderContext::new();
    let mut fn_builder = FunctionBuilder::new(&mut func, &mut fn_builder_ctx);

    let entry = fn_builder.create_block();
    fn_builder.append_block_params_for_function_params(entry);
    fn_builder.switch_to_block(entry);

    cx.frame = FunctionFrame {
        return_type: shell.return_type,
        continuations: Vec::new(),
    };
    lower_body(shell, entry, &mut fn_builder, cx)?;
    check_termination(&fn_builder, cx).map_err(|e| e.at(shell.span))?;

    fn_builder.seal_all_blocks();
    fn_builder.finalize();

    let clif = func.display().to_string();
    debug!(function = shell.name, "lowered function");
    trace!("{}", clif);

    let mut ctx = Context::for_function(func);
    cx.module
        .define_function(func_id, &mut ctx)
        .map_err(|e| CodegenError::from(e).at(shell.span))?;

    cx.output.push(IrFunction {
        name: shell.name.to_string(),
        clif,
    });

    Ok(FunctionEntry {
        id: func_id,
        params: shell.params.iter().map(|&(_, ty)| ty).collect(),
        return_type: shell.return_type,
    })
}

/// Binds the parameters in a function-level frame, then lowers the body.
fn lower_body(shell: &Shell, entry: Block, fn_builder: &mut FunctionBuilder, cx: &mut CodegenContext) -> CodegenResult<()> {
    let mut cx = scope::enter(cx);

    let values = fn_builder.block_params(entry).to_vec();
    for (&(name, ty), value) in shell.params.iter().zip(values) {
        let slot = alloc_slot(ty, cx.ptr_ty, fn_builder);
        fn_builder.ins().stack_store(value, slot, 0);
        cx.scopes
            .define(name, VarSlot { ty, slot })
            .map_err(|_| CodegenError::from(CodegenErrorKind::Redeclaration { name: cx.name(name) }).at(shell.span))?;
    }

    lower_stmt(shell.body, fn_builder, &mut cx)?;

    if !is_terminated(fn_builder) {
        match shell.return_type {
            None => implicit_return(fn_builder),
            Some(_) => return Err(CodegenError::from(CodegenErrorKind::MissingReturn).at(shell.span)),
        }
    }
    Ok(())
}

/// Every block that received instructions, and every merge or after-loop
/// block, must end in a terminator.
fn check_termination(fn_builder: &FunctionBuilder, cx: &CodegenContext) -> CodegenResult<()> {
    let func = &*fn_builder.func;
    let open = func
        .layout
        .blocks()
        .chain(cx.frame.continuations.iter().copied())
        .find(|&block| !block_is_terminated(func, block));

    match open {
        Some(block) => {
            debug!(%block, "block without terminator");
            Err(CodegenErrorKind::MissingReturn.into())
        }
        None => Ok(()),
    }
}
