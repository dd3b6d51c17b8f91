use std::{fmt, io, path::PathBuf};

use colored::Colorize;
use thiserror::Error;

use crate::compiler::{
    codegen::CodegenError,
    parser::ParseError,
    tokens::{DisplaySpan, Span},
};

/// The phase of compilation where an error occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompilerPhase {
    Io,
    Lexing,
    Parsing,
    Codegen,
}

impl fmt::Display for CompilerPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CompilerPhase::Io => "I/O",
            CompilerPhase::Lexing => "Lexing",
            CompilerPhase::Parsing => "Parsing",
            CompilerPhase::Codegen => "Code Generation",
        };
        write!(f, "{}", name)
    }
}

#[derive(Error, Debug)]
pub enum CompileError {
    #[error("cannot access '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Codegen(#[from] CodegenError),
}

impl CompileError {
    pub fn phase(&self) -> CompilerPhase {
        match self {
            CompileError::Io { .. } => CompilerPhase::Io,
            CompileError::Parse(ParseError::Lex(_)) => CompilerPhase::Lexing,
            CompileError::Parse(_) => CompilerPhase::Parsing,
            CompileError::Codegen(_) => CompilerPhase::Codegen,
        }
    }

    pub fn span(&self) -> Option<&Span> {
        match self {
            CompileError::Io { .. } => None,
            CompileError::Parse(err) => Some(err.span()),
            CompileError::Codegen(err) => err.span.as_ref(),
        }
    }

    /// Line of the offending token or statement, 1-based.
    pub fn line(&self) -> Option<usize> {
        self.span().map(|span| span.start.0)
    }
}

/// Renders an error the way the binary prints it: a header, a `-->` locator
/// and, when `source` is given, the offending line with a caret underline.
pub fn format_error(err: &CompileError, file: &str, source: Option<&str>) -> String {
    let mut out = format!(
        "{}{}: {}",
        "error".red().bold(),
        format!("[{}]", err.phase()).dimmed(),
        err.to_string().bright_white().bold()
    );

    if let Some(span) = err.span() {
        let span = DisplaySpan {
            file: file.to_string(),
            start: span.start,
            end: span.end,
        };
        out.push_str(&format!("\n {} {}", "-->".blue().bold(), span));
        if let Some(snippet) = source.and_then(|source| snippet(&span, source)) {
            out.push('\n');
            out.push_str(&snippet);
        }
    }

    if let CompileError::Codegen(CodegenError {
        function: Some(function), ..
    }) = err
    {
        out.push_str(&format!("\n{} in function `{}`", "note:".blue().bold(), function));
    }

    out
}

fn snippet(span: &DisplaySpan, source: &str) -> Option<String> {
    let line = source.lines().nth(span.start.0.checked_sub(1)?)?;

    let line_num = span.start.0.to_string();
    let padding = " ".repeat(line_num.len());
    let col_start = span.start.1.saturating_sub(1);
    let len = if span.end.0 == span.start.0 {
        span.end.1.saturating_sub(span.start.1).saturating_add(1).max(1)
    } else {
        line.chars().count().saturating_sub(col_start).max(1)
    };

    Some(format!(
        "{} {}\n{} {} {}\n{} {} {}{}",
        padding,
        "|".blue(),
        line_num.blue(),
        "|".blue(),
        line,
        padding,
        "|".blue(),
        " ".repeat(col_start),
        "^".repeat(len).red().bold()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::compile_source;

    #[test]
    fn renders_locator_and_caret() {
        colored::control::set_override(false);
        let source = "int main() {\n    return y;\n}\n";
        let err = compile_source(source, "main.mc").unwrap_err();
        let rendered = format_error(&err, "main.mc", Some(source));

        assert!(rendered.starts_with("error[Code Generation]: undefined variable 'y'"));
        assert!(rendered.contains("--> main.mc:2:12"));
        assert!(rendered.contains("2 |     return y;"));
        assert!(rendered.contains("  |            ^"));
        assert!(rendered.contains("note: in function `main`"));
    }

    #[test]
    fn lexing_errors_report_their_phase() {
        let err = compile_source("int main() { return 1 # 2; }", "main.mc").unwrap_err();
        assert_eq!(err.phase(), CompilerPhase::Lexing);
        assert_eq!(err.line(), Some(1));
    }

    #[test]
    fn io_errors_have_no_location() {
        let err = CompileError::Io {
            path: PathBuf::from("missing.mc"),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(err.phase(), CompilerPhase::Io);
        assert!(err.span().is_none());
    }
}
