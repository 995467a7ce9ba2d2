use std::collections::HashMap;

use crate::eval::prelude::{RuntimeError, RuntimeErrorType};
use crate::lexer::prelude::Token;

use super::prelude::Value;

/// Chain of lexical scopes kept as a stack: the first scope is the global one,
/// the last is the innermost block currently executing.
#[derive(Debug, Clone, PartialEq)]
pub struct Environment {
    scopes: Vec<HashMap<String, Value>>,
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment {
    pub fn new() -> Self {
        Self {
            scopes: vec![HashMap::new()]
        }
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    pub fn push_scope(&mut self) {
        self.scopes.push(HashMap::new());
        log::trace!("entered scope {}", self.scopes.len());
    }

    /// Drops the innermost scope. The global scope is never dropped.
    pub fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            log::trace!("left scope {}", self.scopes.len());
            let _ = self.scopes.pop();
        }
    }

    /// Binds `name` in the innermost scope, replacing any previous binding there.
    pub fn define(&mut self, name: impl Into<String>, value: Value) {
        if let Some(scope) = self.scopes.last_mut() {
            let _ = scope.insert(name.into(), value);
        }
    }

    pub fn get(&self, name: &Token) -> Result<Value, RuntimeError> {
        self.scopes.iter()
            .rev()
            .find_map(|scope| scope.get(&name.lexeme))
            .cloned()
            .ok_or_else(|| undefined_variable(name))
    }

    /// Updates the nearest existing binding of `name`. Never creates a binding.
    pub fn assign(&mut self, name: &Token, value: Value) -> Result<(), RuntimeError> {
        match self.scopes.iter_mut().rev().find_map(|scope| scope.get_mut(&name.lexeme)) {
            Some(slot) => {
                *slot = value;
                Ok(())
            },
            None => Err(undefined_variable(name)),
        }
    }
}

fn undefined_variable(name: &Token) -> RuntimeError {
    RuntimeError {
        error: RuntimeErrorType::UndefinedVariable { name: name.lexeme.clone() },
        token: name.clone(),
    }
}
