use thiserror::Error;

use crate::utils::prelude::SrcSpan;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexicalErrorType {
    UnexpectedCharacter { ch: char },
    UnterminatedString,
}

impl LexicalErrorType {
    pub fn message(&self) -> &'static str {
        match self {
            LexicalErrorType::UnexpectedCharacter { .. } => "Unexpected character",
            LexicalErrorType::UnterminatedString => "Unterminated string",
        }
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("[line {line}] Error: {}", .error.message())]
pub struct LexicalError {
    pub error: LexicalErrorType,
    pub line: u32,
    pub location: SrcSpan
}

impl LexicalError {
    pub fn details(&self) -> (&'static str, Vec<String>) {
        match self.error {
            LexicalErrorType::UnexpectedCharacter { ch } => {
                (self.error.message(), vec![format!("Found `{}` which does not start any token", ch.escape_default())])
            },
            LexicalErrorType::UnterminatedString => {
                (self.error.message(), vec!["Add a closing `\"` before the end of the file".into()])
            }
        }
    }
}
