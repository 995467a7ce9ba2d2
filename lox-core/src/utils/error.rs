use std::path::PathBuf;

use termcolor::Buffer;
use thiserror::Error;

use crate::{
    eval::prelude::RuntimeError,
    lexer::prelude::LexicalError,
    parser::prelude::ParseError
};
use super::diagnostic::{Diagnostic, Label, Location};

/// One reported problem together with the source it was found in.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("{error}")]
    Lexical {
        path: PathBuf,
        src: String,
        error: LexicalError
    },
    #[error("{error}")]
    Parse {
        path: PathBuf,
        src: String,
        error: ParseError
    },
    #[error("{error}")]
    Runtime {
        path: PathBuf,
        src: String,
        error: RuntimeError
    },
    #[error("IO operation failed: {err}")]
    StdIo {
        path: PathBuf,
        err: std::io::ErrorKind
    }
}

impl Error {
    pub fn pretty_string(&self) -> String {
        let mut nocolor = Buffer::no_color();
        self.pretty(&mut nocolor);
        String::from_utf8_lossy(&nocolor.into_inner()).into_owned()
    }

    pub fn pretty(&self, buf: &mut Buffer) {
        use std::io::Write;

        for diagnostic in self.to_diagnostics() {
            diagnostic.write(buf);
            writeln!(buf).expect("write new line diagnostic");
        }
    }

    pub fn to_diagnostics(&self) -> Vec<Diagnostic<'_>> {
        match self {
            Error::Lexical { path, src, error } => {
                let (label, extra) = error.details();

                vec![Diagnostic {
                    title: "Lexical error".into(),
                    text: extra.join("\n"),
                    location: Some(Location {
                        src,
                        path: path.clone(),
                        line: error.line,
                        label: Label {
                            text: Some(label.to_string()),
                            span: error.location,
                        },
                    }),
                }]
            },
            Error::Parse { path, src, error } => {
                let (label, extra) = error.details();

                vec![Diagnostic {
                    title: "Syntax error".into(),
                    text: extra.join("\n"),
                    location: Some(Location {
                        src,
                        path: path.clone(),
                        line: error.token.line,
                        label: Label {
                            text: Some(label.to_string()),
                            span: error.token.location,
                        },
                    }),
                }]
            },
            Error::Runtime { path, src, error } => {
                let (label, extra) = error.details();

                vec![Diagnostic {
                    title: "Runtime error".into(),
                    text: extra.join("\n"),
                    location: Some(Location {
                        src,
                        path: path.clone(),
                        line: error.token.line,
                        label: Label {
                            text: Some(label),
                            span: error.token.location,
                        },
                    }),
                }]
            },
            Error::StdIo { path, err } => {
                vec![Diagnostic {
                    title: "Standard IO error".into(),
                    text: format!("{}: {err}", path.display()),
                    location: None,
                }]
            }
        }
    }
}
