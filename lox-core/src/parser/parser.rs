use crate::lexer::prelude::{Token, TokenKind};
use super::error::{ParseError, ParseErrorType};
use super::ast::{Expr, Primitive, Stmt};

/// Result of a full parse: every statement that parsed cleanly plus every
/// syntax error found along the way.
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed {
    pub statements: Vec<Stmt>,
    pub errors: Vec<ParseError>,
}

impl Parsed {
    pub fn had_error(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn into_result(self) -> Result<Vec<Stmt>, Vec<ParseError>> {
        if self.errors.is_empty() {
            Ok(self.statements)
        } else {
            Err(self.errors)
        }
    }
}

pub fn parse(tokens: impl IntoIterator<Item = Token>) -> Parsed {
    Parser::new(tokens.into_iter()).parse()
}

type ExprResult = Result<Expr, ParseError>;
type StmtResult = Result<Stmt, ParseError>;

pub struct Parser<T: Iterator<Item = Token>> {
    pub current_token: Token,
    pub previous_kind: Option<TokenKind>,
    errors: Vec<ParseError>,
    block_depth: usize,

    tokens: T,
}

impl<T: Iterator<Item = Token>> Parser<T> {
    pub fn new(mut input: T) -> Self {
        let current_token = input.next().unwrap_or_else(|| Token::eof(1, 0));

        Self {
            current_token,
            previous_kind: None,
            errors: vec![],
            block_depth: 0,

            tokens: input,
        }
    }

    pub fn parse(mut self) -> Parsed {
        let mut statements = vec![];

        while !self.current_token.is_eof() {
            if let Some(statement) = self.declaration_or_recover() {
                statements.push(statement);
            }
        }

        Parsed {
            statements,
            errors: self.errors,
        }
    }

    /// Consumes the current token and returns it. The end of input is never consumed.
    pub fn next_token(&mut self) -> Token {
        let next = if self.current_token.is_eof() {
            self.current_token.clone()
        } else {
            let Token { line, location, .. } = &self.current_token;
            let (line, end) = (*line, location.end);

            self.tokens.next().unwrap_or_else(|| Token::eof(line, end))
        };

        self.previous_kind = Some(self.current_token.kind);
        std::mem::replace(&mut self.current_token, next)
    }

    pub fn step(&mut self) {
        let _ = self.next_token();
    }

    pub fn check(&self, kind: TokenKind) -> bool {
        self.current_token.kind == kind
    }

    /// Consumes the current token if it is any of `kinds`.
    pub fn eat(&mut self, kinds: &[TokenKind]) -> Option<Token> {
        if kinds.contains(&self.current_token.kind) {
            Some(self.next_token())
        } else {
            None
        }
    }

    pub fn expect_one(&mut self, kind: TokenKind, message: &'static str) -> Result<Token, ParseError> {
        if self.check(kind) {
            return Ok(self.next_token());
        }

        parse_error(
            ParseErrorType::ExpectedToken { expected: kind, message },
            self.current_token.clone()
        )
    }

    /// Skips ahead to the next likely statement boundary after a syntax error.
    /// Inside a block the closing `}` is left for the block to consume.
    pub fn synchronize(&mut self) {
        if self.current_token.is_eof() || self.at_declaration_start() || self.at_block_end() {
            return;
        }

        self.step();

        while !self.current_token.is_eof() {
            if self.previous_kind == Some(TokenKind::Semicolon)
                || self.current_token.kind.starts_statement()
                || self.at_block_end()
            {
                return;
            }

            self.step();
        }
    }

    fn at_declaration_start(&self) -> bool {
        matches!(
            self.current_token.kind,
            TokenKind::Var | TokenKind::If | TokenKind::While | TokenKind::For | TokenKind::Print
        )
    }

    fn at_block_end(&self) -> bool {
        self.block_depth > 0 && self.check(TokenKind::RightBrace)
    }

    fn declaration_or_recover(&mut self) -> Option<Stmt> {
        match self.declaration() {
            Ok(statement) => Some(statement),
            Err(err) => {
                log::trace!("recovering from `{err}`");
                self.errors.push(err);
                self.synchronize();

                None
            }
        }
    }

    fn declaration(&mut self) -> StmtResult {
        match self.eat(&[TokenKind::Var]) {
            Some(_) => self.var_declaration(),
            None => self.statement(),
        }
    }

    fn var_declaration(&mut self) -> StmtResult {
        let name = self.expect_one(TokenKind::Identifier, "Expect variable name.")?;

        let initializer = match self.eat(&[TokenKind::Equal]) {
            Some(_) => Some(self.expression()?),
            None => None,
        };

        self.expect_one(TokenKind::Semicolon, "Expect ';' after variable declaration.")?;

        Ok(Stmt::Var { name, initializer })
    }

    fn statement(&mut self) -> StmtResult {
        match self.current_token.kind {
            TokenKind::If => self.if_statement(),
            TokenKind::Print => self.print_statement(),
            TokenKind::LeftBrace => {
                self.step();
                Ok(Stmt::Block(self.block()?))
            },
            TokenKind::While => self.while_statement(),
            TokenKind::For => self.for_statement(),
            _ => self.expression_statement(),
        }
    }

    fn if_statement(&mut self) -> StmtResult {
        self.step();
        self.expect_one(TokenKind::LeftParen, "Expect '(' after 'if'.")?;
        let condition = self.expression()?;
        self.expect_one(TokenKind::RightParen, "Expect ')' after if condition.")?;

        let then_branch = Box::new(self.statement()?);
        let else_branch = match self.eat(&[TokenKind::Else]) {
            Some(_) => Some(Box::new(self.statement()?)),
            None => None,
        };

        Ok(Stmt::If { condition, then_branch, else_branch })
    }

    fn print_statement(&mut self) -> StmtResult {
        let keyword = self.next_token();
        let expression = self.expression()?;
        self.expect_one(TokenKind::Semicolon, "Expect ';' after value.")?;

        Ok(Stmt::Print { keyword, expression })
    }

    /// Parses the statements of a block whose `{` was already consumed.
    fn block(&mut self) -> Result<Vec<Stmt>, ParseError> {
        let mut statements = vec![];

        self.block_depth += 1;
        while !self.check(TokenKind::RightBrace) && !self.current_token.is_eof() {
            if let Some(statement) = self.declaration_or_recover() {
                statements.push(statement);
            }
        }
        self.block_depth -= 1;

        self.expect_one(TokenKind::RightBrace, "Expect '}' after block.")?;

        Ok(statements)
    }

    fn while_statement(&mut self) -> StmtResult {
        self.step();
        self.expect_one(TokenKind::LeftParen, "Expect '(' after 'while'.")?;
        let condition = self.expression()?;
        self.expect_one(TokenKind::RightParen, "Expect ')' after condition.")?;

        let body = Box::new(self.statement()?);

        Ok(Stmt::While { condition, body })
    }

    // for (init; cond; incr) body  =>  { init; while (cond) { body; incr; } }
    fn for_statement(&mut self) -> StmtResult {
        self.step();
        self.expect_one(TokenKind::LeftParen, "Expect '(' after 'for'.")?;

        let initializer = if self.eat(&[TokenKind::Semicolon]).is_some() {
            None
        } else if self.eat(&[TokenKind::Var]).is_some() {
            Some(self.var_declaration()?)
        } else {
            Some(self.expression_statement()?)
        };

        let condition = match self.check(TokenKind::Semicolon) {
            true => Expr::Literal(Primitive::Bool(true)),
            false => self.expression()?,
        };
        self.expect_one(TokenKind::Semicolon, "Expect ';' after loop condition.")?;

        let increment = match self.check(TokenKind::RightParen) {
            true => None,
            false => Some(self.expression()?),
        };
        self.expect_one(TokenKind::RightParen, "Expect ')' after for clauses.")?;

        let mut body = self.statement()?;

        if let Some(increment) = increment {
            body = Stmt::Block(vec![body, Stmt::Expression(increment)]);
        }

        let mut desugared = Stmt::While { condition, body: Box::new(body) };

        if let Some(initializer) = initializer {
            desugared = Stmt::Block(vec![initializer, desugared]);
        }

        Ok(desugared)
    }

    fn expression_statement(&mut self) -> StmtResult {
        let expression = self.expression()?;
        self.expect_one(TokenKind::Semicolon, "Expect ';' after expression.")?;

        Ok(Stmt::Expression(expression))
    }

    pub fn expression(&mut self) -> ExprResult {
        self.assignment()
    }

    fn assignment(&mut self) -> ExprResult {
        let expr = self.ternary()?;

        let Some(equals) = self.eat(&[TokenKind::Equal]) else {
            return Ok(expr);
        };

        let value = self.assignment()?;

        match expr {
            Expr::Variable(name) => Ok(Expr::Assignment { name, value: Box::new(value) }),
            expr => {
                // Reported without unwinding: the statement itself is still well formed.
                self.errors.push(ParseError {
                    error: ParseErrorType::InvalidAssignmentTarget,
                    token: equals,
                });

                Ok(expr)
            }
        }
    }

    fn ternary(&mut self) -> ExprResult {
        let condition = self.or()?;

        if self.eat(&[TokenKind::Question]).is_none() {
            return Ok(condition);
        }

        let then_branch = self.expression()?;
        self.expect_one(TokenKind::Colon, "Expect ':' after then branch of ternary expression.")?;
        let else_branch = self.ternary()?;

        Ok(Expr::Ternary {
            condition: Box::new(condition),
            then_branch: Box::new(then_branch),
            else_branch: Box::new(else_branch),
        })
    }

    fn or(&mut self) -> ExprResult {
        let mut expr = self.and()?;

        while let Some(operator) = self.eat(&[TokenKind::Or]) {
            let right = self.and()?;
            expr = Expr::Logical { left: Box::new(expr), operator, right: Box::new(right) };
        }

        Ok(expr)
    }

    fn and(&mut self) -> ExprResult {
        let mut expr = self.equality()?;

        while let Some(operator) = self.eat(&[TokenKind::And]) {
            let right = self.equality()?;
            expr = Expr::Logical { left: Box::new(expr), operator, right: Box::new(right) };
        }

        Ok(expr)
    }

    fn equality(&mut self) -> ExprResult {
        self.binary(&[TokenKind::BangEqual, TokenKind::EqualEqual], Self::comparison)
    }

    fn comparison(&mut self) -> ExprResult {
        self.binary(
            &[TokenKind::Greater, TokenKind::GreaterEqual, TokenKind::Less, TokenKind::LessEqual],
            Self::term
        )
    }

    fn term(&mut self) -> ExprResult {
        self.binary(&[TokenKind::Minus, TokenKind::Plus], Self::factor)
    }

    fn factor(&mut self) -> ExprResult {
        self.binary(&[TokenKind::Slash, TokenKind::Star], Self::unary)
    }

    /// One left-associative precedence level: `operand ( op operand )*`.
    fn binary(&mut self, operators: &[TokenKind], operand: fn(&mut Self) -> ExprResult) -> ExprResult {
        let mut expr = operand(self)?;

        while let Some(operator) = self.eat(operators) {
            let right = operand(self)?;
            expr = Expr::Binary { left: Box::new(expr), operator, right: Box::new(right) };
        }

        Ok(expr)
    }

    fn unary(&mut self) -> ExprResult {
        match self.eat(&[TokenKind::Bang, TokenKind::Minus]) {
            Some(operator) => {
                let right = self.unary()?;
                Ok(Expr::Unary { operator, right: Box::new(right) })
            },
            None => self.primary(),
        }
    }

    fn primary(&mut self) -> ExprResult {
        let expr = match self.current_token.kind {
            TokenKind::False => Expr::Literal(Primitive::Bool(false)),
            TokenKind::True => Expr::Literal(Primitive::Bool(true)),
            TokenKind::Nil => Expr::Literal(Primitive::Nil),
            TokenKind::Number | TokenKind::String => {
                let literal = self.next_token().literal;
                return Ok(Expr::Literal(literal.map(Primitive::from).unwrap_or(Primitive::Nil)));
            },
            TokenKind::Identifier => return Ok(Expr::Variable(self.next_token())),
            TokenKind::LeftParen => {
                self.step();
                let expression = self.expression()?;
                self.expect_one(TokenKind::RightParen, "Expect ')' after expression.")?;

                return Ok(Expr::Grouping(Box::new(expression)));
            },
            _ => return parse_error(ParseErrorType::ExpectedExpression, self.current_token.clone()),
        };

        self.step();

        Ok(expr)
    }
}

pub fn parse_error<T>(error: ParseErrorType, token: Token) -> Result<T, ParseError> {
    Err(ParseError { error, token })
}
