
pub mod prelude {
    pub use super::{
        run,
        RunResult,
        Session
    };
}

use std::{io::Write, path::PathBuf};

use utf8_chars::BufReadCharsExt;

use crate::{
    eval::prelude::{Interpreter, RuntimeError},
    lexer::prelude::{scan, scan_stream, LexicalError, Token},
    parser::prelude::{parse, ParseError},
    utils::prelude::{Error, ErrorEmitter}
};

/// Outcome of running one piece of source text.
#[derive(Debug, Clone, PartialEq)]
pub enum RunResult {
    Ok,
    LexicalErrors(Vec<LexicalError>),
    ParseErrors(Vec<ParseError>),
    RuntimeError(RuntimeError),
}

impl RunResult {
    pub fn is_ok(&self) -> bool {
        matches!(self, RunResult::Ok)
    }

    /// Process exit status conventionally used for this outcome.
    pub fn exit_code(&self) -> i32 {
        match self {
            RunResult::Ok => 0,
            RunResult::LexicalErrors(_) | RunResult::ParseErrors(_) => 65,
            RunResult::RuntimeError(_) => 70,
        }
    }
}

/// Runs `source` once against `out`, discarding the diagnostics.
pub fn run<W: Write>(source: &str, out: W) -> RunResult {
    Session::new(out, ErrorEmitter::null()).run(source)
}

/// Lexes, parses and interprets source text, reporting every error to the emitter.
///
/// The interpreter lives as long as the session, so globals defined by one
/// [`Session::run`] are visible to the next.
pub struct Session<W: Write> {
    interpreter: Interpreter<W>,
    emitter: ErrorEmitter,
    path: PathBuf,
    print_ast: bool,
}

impl<W: Write> Session<W> {
    pub fn new(out: W, emitter: ErrorEmitter) -> Self {
        Self {
            interpreter: Interpreter::new(out),
            emitter,
            path: PathBuf::from("<input>"),
            print_ast: false,
        }
    }

    /// Path shown in diagnostics for sources passed to [`Session::run`].
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = path.into();
        self
    }

    pub fn set_repl(&mut self, repl: bool) {
        self.interpreter.set_repl(repl);
    }

    /// Writes the canonical form of the parsed program to the output before running it.
    pub fn set_print_ast(&mut self, print_ast: bool) {
        self.print_ast = print_ast;
    }

    pub fn interpreter(&self) -> &Interpreter<W> {
        &self.interpreter
    }

    pub fn emitter(&self) -> &ErrorEmitter {
        &self.emitter
    }

    pub fn into_output(self) -> W {
        self.interpreter.into_output()
    }

    pub fn run(&mut self, src: &str) -> RunResult {
        let (tokens, errors) = scan(src);

        self.run_scanned(src, tokens, errors)
    }

    /// Streams the file at `path` through the lexer and runs it. The file
    /// becomes the session's path for diagnostics.
    pub fn run_file(&mut self, path: impl Into<PathBuf>) -> Result<RunResult, Error> {
        self.path = path.into();

        let file = std::fs::File::open(&self.path)
            .map_err(|err| self.io_error(err.kind()))?;

        let file_size = file.metadata()
            .map_err(|err| self.io_error(err.kind()))?.len() as usize;

        let mut src = String::with_capacity(file_size);
        let mut read_error = None;
        let mut reader = std::io::BufReader::new(file);

        let stream = reader.chars()
            .map_while(|ch| match ch {
                Ok(ch) => {
                    src.push(ch);
                    Some(ch)
                },
                Err(err) => {
                    read_error = Some(err.kind());
                    None
                }
            });

        let (tokens, errors) = scan_stream(stream);

        if let Some(kind) = read_error {
            return Err(self.io_error(kind));
        }

        Ok(self.run_scanned(&src, tokens, errors))
    }

    fn run_scanned(&mut self, src: &str, tokens: Vec<Token>, errors: Vec<LexicalError>) -> RunResult {
        log::debug!("lexed {} tokens from {}", tokens.len(), self.path.display());

        if !errors.is_empty() {
            for error in &errors {
                self.emit(Error::Lexical { path: self.path.clone(), src: src.to_string(), error: *error });
            }

            return RunResult::LexicalErrors(errors);
        }

        let statements = match parse(tokens).into_result() {
            Ok(statements) => statements,
            Err(errors) => {
                for error in &errors {
                    self.emit(Error::Parse { path: self.path.clone(), src: src.to_string(), error: error.clone() });
                }

                return RunResult::ParseErrors(errors);
            }
        };

        log::debug!("parsed {} statements", statements.len());

        let result = if self.print_ast {
            self.interpreter.write_ast(&statements)
                .and_then(|()| self.interpreter.interpret(&statements))
        } else {
            self.interpreter.interpret(&statements)
        };

        match result {
            Ok(()) => {
                log::debug!("finished without errors");
                RunResult::Ok
            },
            Err(error) => {
                self.emit(Error::Runtime { path: self.path.clone(), src: src.to_string(), error: error.clone() });
                RunResult::RuntimeError(error)
            }
        }
    }

    fn io_error(&self, err: std::io::ErrorKind) -> Error {
        let error = Error::StdIo { path: self.path.clone(), err };
        self.emit(error.clone());

        error
    }

    fn emit(&self, error: Error) {
        self.emitter.emit(error);
    }
}
