use thiserror::Error;

use crate::lexer::prelude::{Token, TokenKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorType {
    ExpectedExpression,
    /// A specific token was required, e.g. the `;` closing a statement.
    ExpectedToken {
        expected: TokenKind,
        message: &'static str,
    },
    InvalidAssignmentTarget,
}

impl ParseErrorType {
    pub fn message(&self) -> &'static str {
        match self {
            ParseErrorType::ExpectedExpression => "Expect expression.",
            ParseErrorType::ExpectedToken { message, .. } => message,
            ParseErrorType::InvalidAssignmentTarget => "Invalid assignment target.",
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
#[error("[line {}] Error {}: {}", .token.line, error_location(.token), .error.message())]
pub struct ParseError {
    pub error: ParseErrorType,
    pub token: Token
}

/// Where the error was found: the offending lexeme, or the end of input.
fn error_location(token: &Token) -> String {
    if token.is_eof() {
        "at end".to_string()
    } else {
        format!("at '{}'", token.lexeme)
    }
}

impl ParseError {
    pub fn details(&self) -> (&'static str, Vec<String>) {
        let found = match self.token.kind {
            TokenKind::Eof => "the end of file".to_string(),
            TokenKind::Identifier => format!("the identifier `{}`", self.token.lexeme),
            TokenKind::Number => format!("the number `{}`", self.token.lexeme),
            TokenKind::String => format!("the string {}", self.token.lexeme),
            kind if kind.is_keyword() => format!("the keyword `{}`", self.token.lexeme),
            _ => format!("`{}`", self.token.lexeme),
        };

        match &self.error {
            ParseErrorType::ExpectedExpression => {
                (self.error.message(), vec![format!("Found {found}, expected a literal, an identifier, `-`, `!` or `(`")])
            },
            ParseErrorType::ExpectedToken { expected, .. } => {
                (self.error.message(), vec![format!("Found {found}, expected `{}`", expected.as_literal())])
            },
            ParseErrorType::InvalidAssignmentTarget => {
                (self.error.message(), vec!["Only a variable can be assigned to".into()])
            },
        }
    }
}
