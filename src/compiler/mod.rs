use std::{fs, io::Write, path::PathBuf};

use string_interner::{StringInterner, backend::BucketBackend, symbol::SymbolUsize};
use tracing::{debug, info, trace};

pub mod codegen;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod tokens;
pub mod types;

use codegen::{CodegenContext, IrModule};
use error::CompileError;
use parser::Parser;

pub type Interner = StringInterner<BucketBackend<SymbolUsize>>;

/// Everything a run needs to know, built once from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub input: PathBuf,
    /// Where the IR dump goes. `None` writes to stdout.
    pub output: Option<PathBuf>,
    pub verbosity: u8,
}

/// Lexes, parses and lowers a whole program.
pub fn compile_source(source: &str, file_name: &str) -> Result<IrModule, CompileError> {
    let mut parser = Parser::new(source, file_name)?;
    let program = parser.parse_program()?;
    let ast = parser.into_ast();
    debug!(functions = program.functions.len(), "parsed program");
    for function in &program.functions {
        trace!("{}", ast.display_function(function));
    }

    let module = CodegenContext::new(&ast)?.generate(&program)?;
    Ok(module)
}

/// Single-statement mode: the statement becomes the body of `int main()`.
pub fn compile_statement(source: &str, file_name: &str) -> Result<IrModule, CompileError> {
    let mut parser = Parser::new(source, file_name)?;
    let stmt = parser.parse_statement()?;
    parser.expect_end()?;
    let ast = parser.into_ast();

    let module = CodegenContext::new(&ast)?.generate_statement(stmt)?;
    Ok(module)
}

pub fn run(config: &Config) -> Result<(), CompileError> {
    let source = fs::read_to_string(&config.input).map_err(|source| CompileError::Io {
        path: config.input.clone(),
        source,
    })?;

    let file_name = config.input.display().to_string();
    info!(file = %file_name, "compiling");
    let module = compile_source(&source, &file_name)?;

    match &config.output {
        Some(path) => {
            let mut file = fs::File::create(path).map_err(|source| CompileError::Io {
                path: path.clone(),
                source,
            })?;
            module.dump(&mut file).map_err(|source| CompileError::Io {
                path: path.clone(),
                source,
            })?;
            info!(output = %path.display(), "wrote IR");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            module
                .dump(&mut stdout)
                .and_then(|_| stdout.flush())
                .map_err(|source| CompileError::Io {
                    path: PathBuf::from("<stdout>"),
                    source,
                })?;
        }
    }
    Ok(())
}
