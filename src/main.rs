use std::fs;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use log::LevelFilter;
use simple_logger::SimpleLogger;

use indium::{compile, repl};

#[derive(Parser)]
#[command(version, about = "Compiler and REPL for the indium language")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compile a source file and print target source on stdout
    Compile { file: PathBuf },
    /// Start an interactive session
    Repl,
}

fn main() -> anyhow::Result<()> {
    SimpleLogger::new().with_level(LevelFilter::Warn).init()?;

    let cli = Cli::parse();
    match cli.command {
        Command::Compile { file } => {
            let source = fs::read_to_string(&file)?;
            match compile::compile(&source) {
                Ok(target) => print!("{}", target),
                Err(e) => {
                    eprintln!("{}", e);
                    process::exit(1);
                }
            }
        }
        Command::Repl => repl::run()?,
    }
    Ok(())
}
