use std::{fs, path::PathBuf, process::ExitCode};

use clap::{ArgAction, Parser};
use mica::compiler::{self, Config, error::format_error};
use tracing::Level;

#[derive(Parser)]
#[command(name = "mica")]
#[command(about = "Compile a mica program to Cranelift IR")]
struct Cli {
    /// Source file to compile
    file: PathBuf,

    /// Write the IR dump here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log more (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = Config {
        input: cli.file,
        output: cli.output,
        verbosity: cli.verbose,
    };

    let level = match config.verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match compiler::run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let source = fs::read_to_string(&config.input).ok();
            eprintln!(
                "{}",
                format_error(&err, &config.input.display().to_string(), source.as_deref())
            );
            ExitCode::FAILURE
        }
    }
}
