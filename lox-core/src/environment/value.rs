use std::fmt::Display;

use crate::parser::prelude::Primitive;

pub const TRUE: Value = Value::Boolean { value: true };
pub const FALSE: Value = Value::Boolean { value: false };
pub const NIL: Value = Value::Nil;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Nil,
    Boolean {
        value: bool
    },
    Number {
        value: f64,
    },
    String {
        value: String,
    },
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Boolean { value } => write!(f, "{value}"),
            Value::Number { value } => write!(f, "{value}"),
            Value::String { value } => write!(f, "{value}"),
        }
    }
}

impl From<&Primitive> for Value {
    fn from(value: &Primitive) -> Self {
        match value {
            Primitive::Number(value) => Value::Number { value: *value },
            Primitive::String(value) => Value::String { value: value.clone() },
            Primitive::Bool(value) => Value::Boolean { value: *value },
            Primitive::Nil => Value::Nil,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean { value }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number { value }
    }
}

impl Value {
    pub fn _type(&self) -> ValueType {
        match self {
            Self::Nil => ValueType::Nil,
            Self::Boolean { .. } => ValueType::Boolean,
            Self::Number { .. } => ValueType::Number,
            Self::String { .. } => ValueType::String,
        }
    }

    /// `nil`, `false`, `0` and `""` are falsy; everything else is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Nil => false,
            Self::Boolean { value } => *value,
            Self::Number { value } => *value != 0.0,
            Self::String { value } => !value.is_empty(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Nil,
    Boolean,
    Number,
    String,
}
