use thiserror::Error;

use crate::environment::prelude::ValueType;
use crate::lexer::prelude::Token;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeErrorType {
    OperandMustBeNumber {
        got: ValueType,
    },
    OperandsMustBeNumbers {
        left: ValueType,
        right: ValueType,
    },
    OperandsMustBeNumbersOrStrings {
        left: ValueType,
        right: ValueType,
    },
    DivisionByZero,
    UndefinedVariable {
        name: String,
    },
    Output {
        kind: std::io::ErrorKind,
    },
}

impl RuntimeErrorType {
    pub fn message(&self) -> String {
        match self {
            Self::OperandMustBeNumber { .. } => "Operand must be a number.".into(),
            Self::OperandsMustBeNumbers { .. } => "Operands must be numbers.".into(),
            Self::OperandsMustBeNumbersOrStrings { .. } => "Operands must be two numbers or two strings.".into(),
            Self::DivisionByZero => "Division by zero.".into(),
            Self::UndefinedVariable { name } => format!("Undefined variable '{name}'."),
            Self::Output { .. } => "Could not write output.".into(),
        }
    }
}

/// A failure while evaluating, located at the token whose evaluation failed.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("[line {}] RuntimeError: {}", .token.line, .error.message())]
pub struct RuntimeError {
    pub error: RuntimeErrorType,
    pub token: Token,
}

impl RuntimeError {
    pub fn details(&self) -> (String, Vec<String>) {
        let notes = match &self.error {
            RuntimeErrorType::OperandMustBeNumber { got } => {
                vec![format!("`{}` expects a Number, but got `{got:?}`", self.token.lexeme)]
            },
            RuntimeErrorType::OperandsMustBeNumbers { left, right }
            | RuntimeErrorType::OperandsMustBeNumbersOrStrings { left, right } => {
                vec![format!("Got `{left:?}` and `{right:?}` on the sides of `{}`", self.token.lexeme)]
            },
            RuntimeErrorType::DivisionByZero => vec!["The right operand evaluated to 0".into()],
            RuntimeErrorType::UndefinedVariable { .. } => {
                vec!["Declare it with `var` before using or assigning it".into()]
            },
            RuntimeErrorType::Output { kind } => vec![format!("{kind}")],
        };

        (self.error.message(), notes)
    }
}
