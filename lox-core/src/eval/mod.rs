pub mod error;

pub mod prelude {
    pub use super::{
        error::*,
        Interpreter
    };
}

#[cfg(test)]
mod tests;

use std::{fmt::Display, io::Write};

use crate::{
    environment::prelude::{Environment, Value, NIL},
    lexer::prelude::{Token, TokenKind},
    parser::prelude::{Expr, Stmt}
};

use error::{RuntimeError, RuntimeErrorType};

/// Tree-walking evaluator. Owns the global environment, so bindings persist
/// across successive calls to [`Interpreter::interpret`].
pub struct Interpreter<W: Write> {
    environment: Environment,
    out: W,
    repl: bool,
}

impl<W: Write> Interpreter<W> {
    pub fn new(out: W) -> Self {
        Self {
            environment: Environment::new(),
            out,
            repl: false,
        }
    }

    /// In REPL mode the value of every expression statement is echoed to the output.
    pub fn set_repl(&mut self, repl: bool) {
        self.repl = repl;
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Executes `statements` in order, stopping at the first runtime error.
    pub fn interpret(&mut self, statements: &[Stmt]) -> Result<(), RuntimeError> {
        log::debug!("interpreting {} statements", statements.len());

        for statement in statements {
            self.eval_statement(statement)?;
        }

        Ok(())
    }

    fn eval_statement(&mut self, statement: &Stmt) -> Result<(), RuntimeError> {
        match statement {
            Stmt::Expression(expression) => {
                let value = self.eval_expression(expression)?;

                if self.repl {
                    let token = leading_token(expression);
                    self.write_line(&value, token)?;
                }
            },
            Stmt::Print { keyword, expression } => {
                let value = self.eval_expression(expression)?;
                self.write_line(&value, Some(keyword))?;
            },
            Stmt::Var { name, initializer } => {
                let value = match initializer {
                    Some(initializer) => self.eval_expression(initializer)?,
                    None => NIL,
                };

                self.environment.define(name.lexeme.clone(), value);
            },
            Stmt::Block(statements) => self.eval_block(statements)?,
            Stmt::If { condition, then_branch, else_branch } => {
                if self.eval_expression(condition)?.is_truthy() {
                    self.eval_statement(then_branch)?;
                } else if let Some(else_branch) = else_branch {
                    self.eval_statement(else_branch)?;
                }
            },
            Stmt::While { condition, body } => {
                while self.eval_expression(condition)?.is_truthy() {
                    self.eval_statement(body)?;
                }
            },
        }

        Ok(())
    }

    /// Runs `statements` in a fresh child scope. The scope is dropped on every
    /// exit path, including errors.
    fn eval_block(&mut self, statements: &[Stmt]) -> Result<(), RuntimeError> {
        self.environment.push_scope();

        let result = statements.iter()
            .try_for_each(|statement| self.eval_statement(statement));

        self.environment.pop_scope();

        result
    }

    /// Writes the canonical form of each statement to the output, one per line.
    pub fn write_ast(&mut self, statements: &[Stmt]) -> Result<(), RuntimeError> {
        statements.iter()
            .try_for_each(|statement| self.write_line(statement, None))
    }

    fn write_line(&mut self, item: &impl Display, token: Option<&Token>) -> Result<(), RuntimeError> {
        writeln!(self.out, "{item}").map_err(|err| RuntimeError {
            error: RuntimeErrorType::Output { kind: err.kind() },
            token: token.cloned().unwrap_or_else(|| Token::eof(0, 0)),
        })
    }

    pub fn eval_expression(&mut self, expression: &Expr) -> Result<Value, RuntimeError> {
        match expression {
            Expr::Literal(primitive) => Ok(Value::from(primitive)),
            Expr::Grouping(expression) => self.eval_expression(expression),
            Expr::Unary { operator, right } => {
                let right = self.eval_expression(right)?;
                eval_prefix(operator, right)
            },
            Expr::Binary { left, operator, right } => {
                let left = self.eval_expression(left)?;
                let right = self.eval_expression(right)?;
                eval_infix(operator, left, right)
            },
            Expr::Logical { left, operator, right } => {
                let left = self.eval_expression(left)?;

                let short_circuits = match operator.kind {
                    TokenKind::Or => left.is_truthy(),
                    TokenKind::And => !left.is_truthy(),
                    _ => unreachable!("`{}` is not a logical operator", operator.lexeme),
                };

                if short_circuits {
                    Ok(left)
                } else {
                    self.eval_expression(right)
                }
            },
            Expr::Ternary { condition, then_branch, else_branch } => {
                if self.eval_expression(condition)?.is_truthy() {
                    self.eval_expression(then_branch)
                } else {
                    self.eval_expression(else_branch)
                }
            },
            Expr::Variable(name) => self.environment.get(name),
            Expr::Assignment { name, value } => {
                let value = self.eval_expression(value)?;
                self.environment.assign(name, value.clone())?;

                Ok(value)
            },
        }
    }
}

fn eval_prefix(operator: &Token, right: Value) -> Result<Value, RuntimeError> {
    match operator.kind {
        TokenKind::Bang => Ok(Value::from(!right.is_truthy())),
        TokenKind::Minus => match right {
            Value::Number { value } => Ok(Value::from(-value)),
            right => runtime_error(
                RuntimeErrorType::OperandMustBeNumber { got: right._type() },
                operator
            ),
        },
        _ => unreachable!("`{}` is not a prefix operator", operator.lexeme),
    }
}

fn eval_infix(operator: &Token, left: Value, right: Value) -> Result<Value, RuntimeError> {
    match operator.kind {
        TokenKind::EqualEqual => return Ok(Value::from(left == right)),
        TokenKind::BangEqual => return Ok(Value::from(left != right)),
        TokenKind::Plus => return eval_plus(operator, left, right),
        _ => {}
    }

    let (left_value, right_value) = match (&left, &right) {
        (Value::Number { value: left }, Value::Number { value: right }) => (*left, *right),
        _ => return runtime_error(
            RuntimeErrorType::OperandsMustBeNumbers { left: left._type(), right: right._type() },
            operator
        ),
    };

    let value = match operator.kind {
        TokenKind::Minus => Value::from(left_value - right_value),
        TokenKind::Star => Value::from(left_value * right_value),
        TokenKind::Slash if right_value == 0.0 => {
            return runtime_error(RuntimeErrorType::DivisionByZero, operator);
        },
        TokenKind::Slash => Value::from(left_value / right_value),
        TokenKind::Less => Value::from(left_value < right_value),
        TokenKind::LessEqual => Value::from(left_value <= right_value),
        TokenKind::Greater => Value::from(left_value > right_value),
        TokenKind::GreaterEqual => Value::from(left_value >= right_value),
        _ => unreachable!("`{}` is not an infix operator", operator.lexeme),
    };

    Ok(value)
}

// Numbers add; a string joins with another string or a number.
fn eval_plus(operator: &Token, left: Value, right: Value) -> Result<Value, RuntimeError> {
    match (left, right) {
        (Value::Number { value: left }, Value::Number { value: right }) => {
            Ok(Value::from(left + right))
        },
        (
            left @ (Value::String { .. } | Value::Number { .. }),
            right @ (Value::String { .. } | Value::Number { .. })
        ) => Ok(Value::String { value: format!("{left}{right}") }),
        (left, right) => runtime_error(
            RuntimeErrorType::OperandsMustBeNumbersOrStrings { left: left._type(), right: right._type() },
            operator
        ),
    }
}

/// First token of an expression in source order, if it has one.
fn leading_token(expression: &Expr) -> Option<&Token> {
    match expression {
        Expr::Literal(_) => None,
        Expr::Grouping(expression) => leading_token(expression),
        Expr::Unary { operator, .. } => Some(operator),
        Expr::Binary { left, .. } | Expr::Logical { left, .. } => leading_token(left),
        Expr::Ternary { condition, .. } => leading_token(condition),
        Expr::Variable(name) | Expr::Assignment { name, .. } => Some(name),
    }
}

fn runtime_error<T>(error: RuntimeErrorType, token: &Token) -> Result<T, RuntimeError> {
    Err(RuntimeError { error, token: token.clone() })
}
