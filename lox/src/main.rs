mod cli;
mod repl;
mod rlpl;
mod rppl;

use std::{path::PathBuf, process::ExitCode, rc::Rc};

use clap::Parser;
use cli::{print_finished, print_running};
use lox_core::{
    runner::prelude::Session,
    utils::prelude::{Error, ErrorEmitter, ErrorEmitterIO}
};

/// Exit status for a script that could not be read.
const EXIT_IO_ERROR: u8 = 74;

#[derive(Parser)]
enum Command {
    /// Runs a script file
    Run {
        /// Path of source file
        path: PathBuf,
        /// Print the parsed program before running it
        #[arg(long, default_value_t = false)]
        print_ast: bool,
        /// Do not print status lines
        #[arg(short, long, default_value_t = false)]
        quiet: bool,
        /// Increase logging verbosity, may be repeated
        #[arg(short, long, action = clap::ArgAction::Count)]
        verbose: u8,
    },
    /// Runs Read Eval Print Loop
    Repl {
        /// Increase logging verbosity, may be repeated
        #[arg(short, long, action = clap::ArgAction::Count)]
        verbose: u8,
    },
    /// Runs Read Lex Print Loop
    Rlpl,
    /// Runs Read Parse Print Loop
    Rppl
}

fn main() -> ExitCode {
    match Command::parse() {
        Command::Run { path, print_ast, quiet, verbose } => {
            cli::init_logger(verbose);
            run_file(path, print_ast, quiet)
        },
        Command::Repl { verbose } => {
            cli::init_logger(verbose);
            exit_on_io_error(repl::start())
        },
        Command::Rlpl => {
            cli::init_logger(0);
            exit_on_io_error(rlpl::start())
        },
        Command::Rppl => {
            cli::init_logger(0);
            exit_on_io_error(rppl::start())
        },
    }
}

fn run_file(path: PathBuf, print_ast: bool, quiet: bool) -> ExitCode {
    let emitter = ErrorEmitter::new(Rc::new(ConsoleErrorEmitter));
    let mut session = Session::new(std::io::stdout().lock(), emitter);
    session.set_print_ast(print_ast);

    if !quiet {
        print_running(&path.to_string_lossy());
    }
    let start = std::time::Instant::now();

    let code = match session.run_file(path) {
        Ok(result) => result.exit_code() as u8,
        // already reported by the emitter
        Err(_) => EXIT_IO_ERROR,
    };

    if !quiet && code == 0 {
        print_finished(std::time::Instant::now() - start);
    }

    ExitCode::from(code)
}

fn exit_on_io_error(result: std::io::Result<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::from(EXIT_IO_ERROR)
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ConsoleErrorEmitter;

impl ErrorEmitterIO for ConsoleErrorEmitter {
    fn emit_error(&self, error: Error) {
        let buffer_writer = crate::cli::stderr_buffer_writer();
        let mut buffer = buffer_writer.buffer();
        error.pretty(&mut buffer);
        buffer_writer
            .print(&buffer)
            .expect("Writing error to stderr");
    }
}
