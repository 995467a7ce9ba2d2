use super::error::{LexicalError, LexicalErrorType};
use super::token::{str_to_keyword, Literal, Token, TokenKind};
use std::fmt::Display;
use crate::utils::prelude::SrcSpan;

pub type LexResult = std::result::Result<Token, LexicalError>;

/// Scans the whole source, collecting every token and every lexical error in one pass.
/// The token list always ends with a single EOF token.
pub fn scan(src: &str) -> (Vec<Token>, Vec<LexicalError>) {
	scan_stream(src.chars())
}

pub fn scan_stream(stream: impl Iterator<Item = char>) -> (Vec<Token>, Vec<LexicalError>) {
	let mut tokens = vec![];
	let mut errors = vec![];

	for result in Lexer::new(stream) {
		match result {
			Ok(token) => tokens.push(token),
			Err(err) => errors.push(err),
		}
	}

	log::trace!("scanned {} tokens with {} lexical errors", tokens.len(), errors.len());

	(tokens, errors)
}

#[derive(Debug)]
pub struct Lexer<T: Iterator<Item = char>> {
	position: u32,
	line: u32,
	ch: Option<char>,
	next_ch: Option<char>,
	lexeme: String,
	finished: bool,
	input: T,
}

impl<T: Iterator<Item = char>> Display for Lexer<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f,
			"Lexer {{\n\tposition: {},\n\tline: {},\n\tch: {:?}, next_ch: {:?}\n}}",
			self.position, self.line, self.ch, self.next_ch
		)
	}
}

impl<T: Iterator<Item = char>> Lexer<T> {
	pub fn new(mut input: T) -> Self {
		let ch = input.next();
		let next_ch = input.next();

		Self {
			position: 0,
			line: 1,
			ch,
			next_ch,
			lexeme: String::new(),
			finished: false,
			input,
		}
	}

	pub fn next_token(&mut self) -> LexResult {
		loop {
			self.lexeme.clear();
			let start = self.position;
			let line = self.line;

			let ch = match self.next_char() {
				Some(ch) => ch,
				None => return Ok(Token::eof(self.line, self.position)),
			};

			let kind = match ch {
				'(' => TokenKind::LeftParen,
				')' => TokenKind::RightParen,
				'{' => TokenKind::LeftBrace,
				'}' => TokenKind::RightBrace,
				',' => TokenKind::Comma,
				'.' => TokenKind::Dot,
				'-' => TokenKind::Minus,
				'+' => TokenKind::Plus,
				';' => TokenKind::Semicolon,
				'*' => TokenKind::Star,
				'?' => TokenKind::Question,
				':' => TokenKind::Colon,
				'!' => self.eat_either('=', TokenKind::BangEqual, TokenKind::Bang),
				'=' => self.eat_either('=', TokenKind::EqualEqual, TokenKind::Equal),
				'<' => self.eat_either('=', TokenKind::LessEqual, TokenKind::Less),
				'>' => self.eat_either('=', TokenKind::GreaterEqual, TokenKind::Greater),
				'/' if self.ch == Some('/') => {
					self.skip_comment();
					continue;
				},
				'/' => TokenKind::Slash,
				'"' => return self.lex_string(start, line),
				' ' | '\r' | '\t' | '\n' => continue,
				c if c.is_ascii_digit() => return Ok(self.lex_number(start, line)),
				c if is_ident_start(c) => return Ok(self.lex_ident(start, line)),
				c => {
					return Err(LexicalError {
						error: LexicalErrorType::UnexpectedCharacter { ch: c },
						line,
						location: SrcSpan::from(start, self.position),
					});
				}
			};

			return Ok(self.make_token(kind, start, line));
		}
	}

	fn next_char(&mut self) -> Option<char> {
		let ch = self.ch?;

		self.lexeme.push(ch);
		self.position += ch.len_utf8() as u32;
		if ch == '\n' {
			self.line += 1;
		}

		self.ch = self.next_ch.take();
		self.next_ch = self.input.next();

		Some(ch)
	}

	fn eat_either(&mut self, expected: char, matched: TokenKind, otherwise: TokenKind) -> TokenKind {
		if self.ch == Some(expected) {
			self.next_char();
			matched
		} else {
			otherwise
		}
	}

	fn make_token(&self, kind: TokenKind, start: u32, line: u32) -> Token {
		Token::new(kind, self.lexeme.clone(), line, SrcSpan::from(start, self.position))
	}

	fn skip_comment(&mut self) {
		while !matches!(self.ch, Some('\n') | None) {
			self.next_char();
		}
	}

	fn lex_ident(&mut self, start: u32, line: u32) -> Token {
		while matches!(self.ch, Some(ch) if is_ident_continue(ch)) {
			self.next_char();
		}

		let kind = str_to_keyword(&self.lexeme).unwrap_or(TokenKind::Identifier);

		self.make_token(kind, start, line)
	}

	fn lex_number(&mut self, start: u32, line: u32) -> Token {
		while matches!(self.ch, Some(ch) if ch.is_ascii_digit()) {
			self.next_char();
		}

		// A trailing `.` stays a separate token unless a digit follows it.
		if self.ch == Some('.') && matches!(self.next_ch, Some(ch) if ch.is_ascii_digit()) {
			self.next_char();

			while matches!(self.ch, Some(ch) if ch.is_ascii_digit()) {
				self.next_char();
			}
		}

		// ascii digits with at most one inner `.` always parse
		let value = self.lexeme.parse::<f64>().unwrap_or_default();

		self.make_token(TokenKind::Number, start, line)
			.with_literal(Literal::Number(value))
	}

	fn lex_string(&mut self, start: u32, line: u32) -> LexResult {
		loop {
			match self.next_char() {
				Some('"') => break,
				Some(_) => {},
				None => {
					return Err(LexicalError {
						error: LexicalErrorType::UnterminatedString,
						line: self.line,
						location: SrcSpan::from(start, self.position),
					});
				}
			}
		}

		let value = self.lexeme[1..self.lexeme.len() - 1].to_string();

		Ok(self.make_token(TokenKind::String, start, line)
			.with_literal(Literal::String(value)))
	}
}

fn is_ident_start(ch: char) -> bool {
	ch.is_ascii_alphabetic() || ch == '_'
}

fn is_ident_continue(ch: char) -> bool {
	ch.is_ascii_alphanumeric() || ch == '_'
}

impl<T: Iterator<Item = char>> Iterator for Lexer<T> {
	type Item = LexResult;

	fn next(&mut self) -> Option<Self::Item> {
		if self.finished {
			return None;
		}

		let result = self.next_token();

		if matches!(&result, Ok(token) if token.is_eof()) {
			self.finished = true;
		}

		Some(result)
	}
}
