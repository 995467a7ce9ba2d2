use std::fmt::Display;

use crate::lexer::prelude::{Literal, Token};

/// Renders an expression as fully parenthesized infix source text.
///
/// Groupings are transparent, so parsing the rendered text and rendering it
/// again yields the same string.
pub trait Parenthesize {
    fn parenthesize(&self) -> String;
}

// primitive -> NUMBER | STRING | true | false | nil
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Number(f64),
    String(String),
    Bool(bool),
    Nil,
}

impl From<Literal> for Primitive {
    fn from(value: Literal) -> Self {
        match value {
            Literal::Number(value) => Self::Number(value),
            Literal::String(value) => Self::String(value),
        }
    }
}

impl Display for Primitive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::String(value) => write!(f, "{value}"),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Nil => write!(f, "nil"),
        }
    }
}

impl Parenthesize for Primitive {
    fn parenthesize(&self) -> String {
        match self {
            Self::String(value) => format!("\"{value}\""),
            primitive => primitive.to_string(),
        }
    }
}

// expression -> assignment
// assignment -> IDENTIFIER "=" assignment | ternary
// ternary    -> logic_or ( "?" expression ":" ternary )?
// logic_or   -> logic_and ( "or" logic_and )*
// logic_and  -> equality ( "and" equality )*
// equality   -> comparison ( ( "!=" | "==" ) comparison )*
// comparison -> term ( ( ">" | ">=" | "<" | "<=" ) term )*
// term       -> factor ( ( "-" | "+" ) factor )*
// factor     -> unary ( ( "/" | "*" ) unary )*
// unary      -> ( "!" | "-" ) unary | primary
// primary    -> NUMBER | STRING | "true" | "false" | "nil" | IDENTIFIER | "(" expression ")"
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Primitive),
    Grouping(Box<Expr>),
    Unary {
        operator: Token,
        right: Box<Expr>,
    },
    Binary {
        left: Box<Expr>,
        operator: Token,
        right: Box<Expr>,
    },
    Logical {
        left: Box<Expr>,
        operator: Token,
        right: Box<Expr>,
    },
    Ternary {
        condition: Box<Expr>,
        then_branch: Box<Expr>,
        else_branch: Box<Expr>,
    },
    Variable(Token),
    Assignment {
        name: Token,
        value: Box<Expr>,
    },
}

impl Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Literal(primitive) => write!(f, "{primitive}"),
            Self::Grouping(expression) => write!(f, "(group {expression})"),
            Self::Unary { operator, right } => write!(f, "({} {right})", operator.lexeme),
            Self::Binary { left, operator, right }
            | Self::Logical { left, operator, right } => {
                write!(f, "({} {left} {right})", operator.lexeme)
            },
            Self::Ternary { condition, then_branch, else_branch } => {
                write!(f, "(? {condition} {then_branch} {else_branch})")
            },
            Self::Variable(name) => write!(f, "{}", name.lexeme),
            Self::Assignment { name, value } => write!(f, "(= {} {value})", name.lexeme),
        }
    }
}

impl Parenthesize for Expr {
    fn parenthesize(&self) -> String {
        match self {
            Self::Literal(primitive) => primitive.parenthesize(),
            Self::Grouping(expression) => expression.parenthesize(),
            Self::Unary { operator, right } => {
                format!("({}{})", operator.lexeme, right.parenthesize())
            },
            Self::Binary { left, operator, right }
            | Self::Logical { left, operator, right } => {
                format!("({} {} {})", left.parenthesize(), operator.lexeme, right.parenthesize())
            },
            Self::Ternary { condition, then_branch, else_branch } => format!(
                "({} ? {} : {})",
                condition.parenthesize(),
                then_branch.parenthesize(),
                else_branch.parenthesize()
            ),
            Self::Variable(name) => name.lexeme.clone(),
            Self::Assignment { name, value } => {
                format!("({} = {})", name.lexeme, value.parenthesize())
            },
        }
    }
}

// program     -> declaration* EOF
// declaration -> var_decl | statement
// var_decl    -> "var" IDENTIFIER ( "=" expression )? ";"
// statement   -> if_stmt | print_stmt | while_stmt | for_stmt | block | expr_stmt
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Expression(Expr),
    Print {
        keyword: Token,
        expression: Expr,
    },
    Var {
        name: Token,
        initializer: Option<Expr>,
    },
    Block(Vec<Stmt>),
    If {
        condition: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },
    While {
        condition: Expr,
        body: Box<Stmt>,
    },
}

impl Display for Stmt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Expression(expression) => write!(f, "(expr {expression})"),
            Self::Print { expression, .. } => write!(f, "(print {expression})"),
            Self::Var { name, initializer: Some(initializer) } => {
                write!(f, "(var {} {initializer})", name.lexeme)
            },
            Self::Var { name, initializer: None } => write!(f, "(var {})", name.lexeme),
            Self::Block(statements) => {
                let statements = statements.iter()
                    .map(|statement| format!(" {statement}"))
                    .collect::<String>();

                write!(f, "(block{statements})")
            },
            Self::If { condition, then_branch, else_branch: Some(else_branch) } => {
                write!(f, "(if {condition} {then_branch} {else_branch})")
            },
            Self::If { condition, then_branch, else_branch: None } => {
                write!(f, "(if {condition} {then_branch})")
            },
            Self::While { condition, body } => write!(f, "(while {condition} {body})"),
        }
    }
}
