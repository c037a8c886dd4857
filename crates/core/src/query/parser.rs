//! Tokenizer and recursive-descent parser for the query dialect.

use thiserror::Error;

use crate::query::{Axis, NameTest, Path, Predicate, Step};

/// Syntax error in a structural query.
#[derive(Debug, Error)]
#[error("{message} at offset {offset}")]
pub(crate) struct ParseError {
	message: String,
	offset: usize,
}

impl ParseError {
	fn new(message: impl Into<String>, offset: usize) -> Self {
		Self { message: message.into(), offset }
	}
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
	Slash,
	DoubleSlash,
	Dot,
	Star,
	At,
	Eq,
	Comma,
	LBracket,
	RBracket,
	LParen,
	RParen,
	Name(String),
	Literal(String),
	Number(usize),
}

fn tokenize(input: &str) -> Result<Vec<(Token, usize)>, ParseError> {
	let mut tokens = Vec::new();
	let bytes = input.as_bytes();
	let mut i = 0;

	while i < bytes.len() {
		let start = i;
		match bytes[i] {
			b' ' | b'\t' | b'\n' | b'\r' => i += 1,
			b'/' => {
				if bytes.get(i + 1) == Some(&b'/') {
					tokens.push((Token::DoubleSlash, start));
					i += 2;
				} else {
					tokens.push((Token::Slash, start));
					i += 1;
				}
			}
			b'.' => {
				tokens.push((Token::Dot, start));
				i += 1;
			}
			b'*' => {
				tokens.push((Token::Star, start));
				i += 1;
			}
			b'@' => {
				tokens.push((Token::At, start));
				i += 1;
			}
			b'=' => {
				tokens.push((Token::Eq, start));
				i += 1;
			}
			b',' => {
				tokens.push((Token::Comma, start));
				i += 1;
			}
			b'[' => {
				tokens.push((Token::LBracket, start));
				i += 1;
			}
			b']' => {
				tokens.push((Token::RBracket, start));
				i += 1;
			}
			b'(' => {
				tokens.push((Token::LParen, start));
				i += 1;
			}
			b')' => {
				tokens.push((Token::RParen, start));
				i += 1;
			}
			quote @ (b'\'' | b'"') => {
				i += 1;
				let literal_start = i;
				while i < bytes.len() && bytes[i] != quote {
					i += 1;
				}
				if i >= bytes.len() {
					return Err(ParseError::new("unterminated string literal", start));
				}
				tokens.push((Token::Literal(input[literal_start..i].to_string()), start));
				i += 1;
			}
			b'0'..=b'9' => {
				while i < bytes.len() && bytes[i].is_ascii_digit() {
					i += 1;
				}
				let number = input[start..i]
					.parse()
					.map_err(|_| ParseError::new("number out of range", start))?;
				tokens.push((Token::Number(number), start));
			}
			c if c.is_ascii_alphabetic() || c == b'_' => {
				while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'-' || bytes[i] == b'_') {
					i += 1;
				}
				tokens.push((Token::Name(input[start..i].to_string()), start));
			}
			c => {
				return Err(ParseError::new(format!("unexpected character {:?}", c as char), start));
			}
		}
	}

	Ok(tokens)
}

struct Parser {
	tokens: Vec<(Token, usize)>,
	pos: usize,
	end: usize,
}

impl Parser {
	fn peek(&self) -> Option<&Token> {
		self.tokens.get(self.pos).map(|(t, _)| t)
	}

	fn offset(&self) -> usize {
		self.tokens.get(self.pos).map_or(self.end, |(_, o)| *o)
	}

	fn advance(&mut self) -> Option<Token> {
		let token = self.tokens.get(self.pos).map(|(t, _)| t.clone());
		if token.is_some() {
			self.pos += 1;
		}
		token
	}

	fn expect(&mut self, expected: Token, what: &str) -> Result<(), ParseError> {
		let offset = self.offset();
		match self.advance() {
			Some(token) if token == expected => Ok(()),
			_ => Err(ParseError::new(format!("expected {what}"), offset)),
		}
	}

	fn parse_path(&mut self) -> Result<Path, ParseError> {
		let (absolute, mut axis) = match self.peek() {
			Some(Token::Slash) => {
				self.advance();
				(true, Axis::Child)
			}
			Some(Token::DoubleSlash) => {
				self.advance();
				(true, Axis::Descendant)
			}
			_ => (false, Axis::Child),
		};

		let mut steps = Vec::new();
		if absolute && self.peek().is_none() {
			if axis == Axis::Descendant {
				return Err(ParseError::new("expected node test", self.end));
			}
			// A bare "/" selects the document root.
			return Ok(Path { absolute, steps });
		}

		loop {
			steps.push(self.parse_step(axis)?);
			match self.peek() {
				None => break,
				Some(Token::Slash) => {
					self.advance();
					axis = Axis::Child;
				}
				Some(Token::DoubleSlash) => {
					self.advance();
					axis = Axis::Descendant;
				}
				Some(_) => {
					return Err(ParseError::new("expected '/' or '//' between steps", self.offset()));
				}
			}
			if self.peek().is_none() {
				return Err(ParseError::new("trailing path separator", self.end));
			}
		}

		Ok(Path { absolute, steps })
	}

	fn parse_step(&mut self, axis: Axis) -> Result<Step, ParseError> {
		let offset = self.offset();
		let (axis, test) = match self.advance() {
			Some(Token::Dot) => (Axis::SelfNode, NameTest::Any),
			Some(Token::Star) => (axis, NameTest::Any),
			Some(Token::Name(name)) => {
				if self.peek() == Some(&Token::LParen) {
					return Err(ParseError::new(format!("unsupported node test {name}()"), offset));
				}
				(axis, NameTest::Name(name.to_ascii_lowercase()))
			}
			Some(Token::At) => {
				return Err(ParseError::new("attribute selection is not supported", offset));
			}
			_ => return Err(ParseError::new("expected node test", offset)),
		};

		let mut predicates = Vec::new();
		while self.peek() == Some(&Token::LBracket) {
			self.advance();
			predicates.push(self.parse_predicate()?);
			self.expect(Token::RBracket, "']'")?;
		}

		Ok(Step { axis, test, predicates })
	}

	fn parse_predicate(&mut self) -> Result<Predicate, ParseError> {
		let offset = self.offset();
		match self.advance() {
			Some(Token::Number(position)) => Ok(Predicate::Position(position)),
			Some(Token::At) => {
				let attr = self.parse_attr_name()?;
				if self.peek() == Some(&Token::Eq) {
					self.advance();
					let value = self.parse_literal()?;
					Ok(Predicate::AttrEq(attr, value))
				} else {
					Ok(Predicate::HasAttr(attr))
				}
			}
			Some(Token::Name(name)) if name == "contains" => {
				self.expect(Token::LParen, "'('")?;
				self.expect(Token::At, "'@'")?;
				let attr = self.parse_attr_name()?;
				self.expect(Token::Comma, "','")?;
				let value = self.parse_literal()?;
				self.expect(Token::RParen, "')'")?;
				Ok(Predicate::AttrContains(attr, value))
			}
			Some(Token::Name(name)) => Err(ParseError::new(format!("unsupported predicate {name}"), offset)),
			_ => Err(ParseError::new("expected predicate", offset)),
		}
	}

	fn parse_attr_name(&mut self) -> Result<String, ParseError> {
		let offset = self.offset();
		match self.advance() {
			Some(Token::Name(name)) => Ok(name.to_ascii_lowercase()),
			_ => Err(ParseError::new("expected attribute name", offset)),
		}
	}

	fn parse_literal(&mut self) -> Result<String, ParseError> {
		let offset = self.offset();
		match self.advance() {
			Some(Token::Literal(value)) => Ok(value),
			_ => Err(ParseError::new("expected string literal", offset)),
		}
	}
}

/// Parses a structural query into a location path.
pub(crate) fn parse(input: &str) -> Result<Path, ParseError> {
	let tokens = tokenize(input)?;
	if tokens.is_empty() {
		return Err(ParseError::new("empty query", 0));
	}
	let mut parser = Parser { tokens, pos: 0, end: input.len() };
	let path = parser.parse_path()?;
	if parser.peek().is_some() {
		return Err(ParseError::new("unexpected trailing input", parser.offset()));
	}
	Ok(path)
}
