use std::{
    collections::HashMap,
    io::{self, Write},
};

use cranelift::{
    codegen::ir::{Block, Function, StackSlot},
    module::{FuncId, Linkage, Module, default_libcall_names},
    object::{ObjectBuilder, ObjectModule},
    prelude::{
        AbiParam, FunctionBuilder, InstBuilder, Signature, Type,
        isa::{self, CallConv, OwnedTargetIsa},
        settings::{self, Flags},
        types::I32,
    },
};
use string_interner::symbol::SymbolUsize;
use target_lexicon::Triple;
use tracing::debug;

use crate::compiler::{
    parser::node::{Ast, Expr, ExprId, Program, Stmt, StmtId},
    types::ExpressionType,
};

mod binary_ops;
mod block;
mod cast;
mod control_flow;
mod error;
mod expr;
mod function;
mod function_call;
mod literal;
mod print;
pub mod scope;
mod stmt;
mod unary_ops;
mod variable;
mod r#while;

pub use error::{CodegenError, CodegenErrorKind};
use scope::{ScopeChain, ScopeOwner};

pub type CodegenResult<T> = Result<T, CodegenError>;

/// Symbol `print` lowers to. User functions may not take this name.
pub const PRINTF: &str = "printf";

/// Storage of a variable or parameter: a stack slot holding a value of `ty`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VarSlot {
    pub ty: ExpressionType,
    pub slot: StackSlot,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionEntry {
    pub id: FuncId,
    pub params: Vec<ExpressionType>,
    pub return_type: Option<ExpressionType>,
}

/// Generated functions by name, in generation order.
#[derive(Debug, Default)]
pub struct FunctionTable {
    entries: Vec<(SymbolUsize, FunctionEntry)>,
    index: HashMap<SymbolUsize, usize>,
}

impl FunctionTable {
    /// Returns `false` and leaves the table untouched if `name` is taken.
    pub fn insert(&mut self, name: SymbolUsize, entry: FunctionEntry) -> bool {
        if self.index.contains_key(&name) {
            return false;
        }
        self.index.insert(name, self.entries.len());
        self.entries.push((name, entry));
        true
    }

    pub fn get(&self, name: SymbolUsize) -> Option<&FunctionEntry> {
        self.index.get(&name).map(|&i| &self.entries[i].1)
    }

    pub fn contains(&self, name: SymbolUsize) -> bool {
        self.index.contains_key(&name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// CLIF text of one generated function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IrFunction {
    pub name: String,
    pub clif: String,
}

/// The output of a successful translation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IrModule {
    functions: Vec<IrFunction>,
}

impl IrModule {
    pub fn functions(&self) -> &[IrFunction] {
        &self.functions
    }

    pub fn function(&self, name: &str) -> Option<&IrFunction> {
        self.functions.iter().find(|f| f.name == name)
    }

    /// Writes every function's CLIF text in generation order.
    pub fn dump(&self, out: &mut impl Write) -> io::Result<()> {
        for (i, function) in self.functions.iter().enumerate() {
            if i > 0 {
                writeln!(out)?;
            }
            write!(out, "{}", function.clif)?;
        }
        Ok(())
    }
}

/// Per-function state, reset when a new function shell is opened.
#[derive(Debug, Default)]
struct FunctionFrame {
    return_type: Option<ExpressionType>,
    /// Merge blocks of `if` and after-loop blocks of `while`, audited for
    /// termination once the body is done.
    continuations: Vec<Block>,
}

pub struct CodegenContext<'a> {
    ast: &'a Ast,
    module: ObjectModule,
    call_conv: CallConv,
    ptr_ty: Type,
    scopes: ScopeChain<VarSlot>,
    functions: FunctionTable,
    printf: FuncId,
    frame: FunctionFrame,
    output: Vec<IrFunction>,
}

impl<'a> CodegenContext<'a> {
    pub fn new(ast: &'a Ast) -> CodegenResult<Self> {
        let target_isa = isa()?;
        let call_conv = target_isa.default_call_conv();
        let builder = ObjectBuilder::new(target_isa, "mica", default_libcall_names())?;
        let mut module = ObjectModule::new(builder);
        let ptr_ty = module.target_config().pointer_type();

        // Declared with the fixed part of its signature only; each call site
        // imports its own variadic signature.
        let mut printf_sig = Signature::new(call_conv);
        printf_sig.params.push(AbiParam::new(ptr_ty));
        printf_sig.returns.push(AbiParam::new(I32));
        let printf = module.declare_function(PRINTF, Linkage::Import, &printf_sig)?;

        Ok(Self {
            ast,
            module,
            call_conv,
            ptr_ty,
            scopes: ScopeChain::new(),
            functions: FunctionTable::default(),
            printf,
            frame: FunctionFrame::default(),
            output: Vec::new(),
        })
    }

    pub fn generate(mut self, program: &Program) -> CodegenResult<IrModule> {
        for function in &program.functions {
            function::lower_fn(function, &mut self)?;
        }
        debug!(functions = self.functions.len(), "generated module");
        Ok(IrModule { functions: self.output })
    }

    /// Wraps a lone statement in `int main()`.
    pub fn generate_statement(mut self, stmt: StmtId) -> CodegenResult<IrModule> {
        function::lower_main_shell(stmt, &mut self)?;
        Ok(IrModule { functions: self.output })
    }

    pub fn functions(&self) -> &FunctionTable {
        &self.functions
    }

    fn expr(&self, id: ExprId) -> CodegenResult<&'a Expr> {
        let ast = self.ast;
        ast.expr(id)
            .ok_or_else(|| CodegenErrorKind::Internal("dangling expression id".to_string()).into())
    }

    fn stmt(&self, id: StmtId) -> CodegenResult<&'a Stmt> {
        let ast = self.ast;
        ast.stmt(id)
            .ok_or_else(|| CodegenErrorKind::Internal("dangling statement id".to_string()).into())
    }

    fn name(&self, sym: SymbolUsize) -> String {
        self.ast.resolve(sym).to_string()
    }

    fn lookup(&self, name: SymbolUsize) -> CodegenResult<VarSlot> {
        self.scopes.get(name).copied().ok_or_else(|| {
            CodegenErrorKind::UndefinedVariable {
                name: self.name(name),
            }
            .into()
        })
    }
}

impl ScopeOwner for CodegenContext<'_> {
    type Binding = VarSlot;

    fn scope_chain(&mut self) -> &mut ScopeChain<VarSlot> {
        &mut self.scopes
    }
}

/// Whether the builder's insertion block already ends in a terminator.
fn is_terminated(fn_builder: &FunctionBuilder) -> bool {
    fn_builder
        .current_block()
        .is_none_or(|block| block_is_terminated(&*fn_builder.func, block))
}

fn block_is_terminated(func: &Function, block: Block) -> bool {
    func.layout
        .last_inst(block)
        .is_some_and(|inst| func.dfg.insts[inst].opcode().is_terminator())
}

fn isa() -> CodegenResult<OwnedTargetIsa> {
    let triple = Triple::host();
    let flags = Flags::new(settings::builder());

    let isa_builder = isa::lookup(triple.clone())
        .map_err(|e| CodegenErrorKind::Internal(format!("target {} is not supported: {}", triple, e)))?;
    isa_builder
        .finish(flags)
        .map_err(|e| CodegenErrorKind::Internal(format!("failed to create ISA for {}: {}", triple, e)).into())
}

/// Emits `return` with no value; used for void functions that fall off the
/// end of their body.
fn implicit_return(fn_builder: &mut FunctionBuilder) {
    fn_builder.ins().return_(&[]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::parser::Parser;

    fn parse(source: &str) -> (Ast, Program) {
        let mut parser = Parser::new(source, "test.mc").unwrap();
        let program = parser.parse_program().unwrap();
        (parser.into_ast(), program)
    }

    #[test]
    fn scopes_are_balanced_after_a_failed_function() {
        let (ast, program) = parse("int f(int a) { { { return b; } } }\nint g() { return 1; }");
        let mut cx = CodegenContext::new(&ast).unwrap();

        assert!(function::lower_fn(&program.functions[0], &mut cx).is_err());
        assert_eq!(cx.scopes.depth(), 0);
        assert!(cx.functions().is_empty());

        function::lower_fn(&program.functions[1], &mut cx).unwrap();
        assert_eq!(cx.scopes.depth(), 0);
        assert_eq!(cx.functions().len(), 1);
    }

    #[test]
    fn function_table_keeps_first_definition() {
        let (ast, program) = parse("int f() { return 1; }\nfloat f() { return 2.0; }");
        let mut cx = CodegenContext::new(&ast).unwrap();
        function::lower_fn(&program.functions[0], &mut cx).unwrap();

        let name = program.functions[1].name;
        let first = cx.functions().get(name).cloned().unwrap();
        let duplicate = FunctionEntry {
            return_type: Some(ExpressionType::Float),
            ..first.clone()
        };
        assert!(!cx.functions.insert(name, duplicate));
        assert_eq!(cx.functions().get(name), Some(&first));
        assert_eq!(first.return_type, Some(ExpressionType::Int));
    }

    #[test]
    fn continuations_are_reset_per_function() {
        let (ast, program) = parse("void f(int x) { while (x) { x = x - 1; } }\nint g() { return 0; }");
        let mut cx = CodegenContext::new(&ast).unwrap();
        function::lower_fn(&program.functions[0], &mut cx).unwrap();
        assert_eq!(cx.frame.continuations.len(), 1);
        function::lower_fn(&program.functions[1], &mut cx).unwrap();
        assert!(cx.frame.continuations.is_empty());
    }
}
