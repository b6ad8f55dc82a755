//! Turns source text into tokens.
//!
//! Keywords are part of the shape of the language's grammar, so the parser
//! wants to know not just that it has a lexeme for some identifier, but that it
//! has a reserved word, and which keyword it is. The type keywords (`int`,
//! `double`, ...) are reserved words too, they start declarations.
//!
//! Literal values are decoded here: the scanner has to walk each character of
//! the literal anyway. A number takes the narrowest type that holds it
//! exactly, `int` before `long` before `double`, and that choice is the static
//! type of the literal for the rest of the pipeline.
//!
//! `(` is ambiguous. `(int)x` is a cast and `(x)` a grouping, so on `(` the
//! scanner looks ahead over an alphanumeric run. If a `)` follows right away
//! and the run names a type, the three pieces collapse into one `TypeCast`
//! token. Otherwise the scanner rewinds and emits a plain `(`.
//!
//! The scanner never stops on an error. Each one is reported into the returned
//! [`Diagnostics`] and scanning resumes with the next character.
mod token;

use std::{iter::Peekable, str::CharIndices};

pub use token::*;

use crate::error::{
	diagnostic::Diagnostics,
	scanner::{ScanError, ScanErrorType},
};

/// Type names every scanner recognises in a cast.
pub const BUILTIN_TYPE_NAMES: [&str; 7] = ["int", "long", "double", "bool", "string", "char", "object"];

/// Scan `source` into tokens. The token list always ends in `Eof`.
pub fn lex(source: &str) -> (Vec<Token<'_>>, Diagnostics) { Scanner::new(source).scan_tokens() }

/// A scanner for source code
pub struct Scanner<'a> {
	/// User input source code
	source:      &'a str,
	/// User input source code iterator
	source_iter: Peekable<CharIndices<'a>>,
	/// Points at the beginning of the current lexeme
	start:       usize,
	/// Points at the character currently being considered
	cursor:      usize,
	/// Tracks what source line `current` is on so we can produce tokens that know
	/// their location.
	line:        usize,
	/// Non built-in names accepted inside a cast.
	type_names:  Vec<String>,
}

impl<'a> Scanner<'a> {
	pub fn new(source: &'a str) -> Self {
		let source_iter = source.char_indices().peekable();

		Self { source, source_iter, start: 0, cursor: 0, line: 1, type_names: Vec::new() }
	}

	/// Accept extra type names in casts. Nothing registers user types yet, this
	/// is where class declarations will hook in.
	pub fn with_type_names<I, S>(mut self, names: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.type_names.extend(names.into_iter().map(Into::into));
		self
	}

	/// Scan all tokens from the source code
	pub fn scan_tokens(mut self) -> (Vec<Token<'a>>, Diagnostics) {
		let mut tokens = Vec::new();
		let mut diagnostics = Diagnostics::new();
		while let Some(&(index, _)) = self.source_iter.peek() {
			// We are at the beginning of the next lexeme.
			self.start = index;
			self.cursor = self.start;
			if let Err(e) = self.scan_token(&mut tokens) {
				diagnostics.report(e);
			}
		}
		tokens.push(Token::new(TokenType::Eof, "", self.line));
		tracing::debug!(tokens = tokens.len(), errors = diagnostics.len(), "scanning finished");
		(tokens, diagnostics)
	}

	/// Scan a single token from the source code
	fn scan_token(&mut self, tokens: &mut Vec<Token<'a>>) -> Result<(), ScanError> {
		use TokenType::*;

		let Some(next_char) = self.advance() else { return Ok(()) };
		#[rustfmt::skip]
		let r#type = match next_char {
			'(' => match self.type_cast() {
				Some(cast) => { tokens.push(cast); return Ok(()); }
				None => LeftParen,
			},
			')' => RightParen,
			'{' => LeftBrace,
			'}' => RightBrace,
			'[' => LeftBracket,
			']' => RightBracket,
			',' => Comma,
			';' => Semicolon,
			'~' => BitNot,
			'^' => BitXor,
			'&' => if self.match_next('&') { And } else { BitAnd },
			'|' => if self.match_next('|') { Or } else { BitOr },
			'+' => if self.match_next('+') { Increment } else if self.match_next('=') { PlusEqual } else { Plus },
			'-' => if self.match_next('-') { Decrement } else if self.match_next('=') { MinusEqual } else { Minus },
			'*' => if self.match_next('*') {
				if self.match_next('=') { PowerEqual } else { Power }
			} else if self.match_next('=') { StarEqual } else { Star },
			'%' => if self.match_next('=') { PercentEqual } else { Percent },
			'!' => if self.match_next('=') { BangEqual } else { Bang },
			'=' => if self.match_next('=') { EqualEqual } else { Equal },
			'<' => if self.match_next('=') { LessEqual } else if self.match_next('<') { LeftShift } else { Less },
			'>' => if self.match_next('=') { GreaterEqual } else if self.match_next('>') { RightShift } else { Greater },
			'/' => if self.match_next('/') {
				while self.peek().is_some_and(|c| c != '\n') { self.advance(); }
				Comment
			} else if self.match_next('*') {
				self.block_comment()?
			} else if self.match_next('=') { SlashEqual } else { Slash },
			'.' => if self.peek().is_some_and(|c| c.is_ascii_digit()) {
				tokens.push(self.number(true)?);
				return Ok(());
			} else { Dot },
			' ' | '\r' | '\t' => EmptyChar,
			'\n' => { self.line += 1; NewLine }
			'"' => { tokens.push(self.string()?); return Ok(()); }
			'\'' => { tokens.push(self.character()?); return Ok(()); }
			c if c.is_ascii_digit() => { tokens.push(self.number(false)?); return Ok(()); }
			c if c.is_ascii_alphabetic() || c == '_' => self.identifier(),
			_ => return Err(ScanError::new(self.line, ScanErrorType::UnexpectedCharacter(next_char))),
		};

		if !r#type.is_ignored() {
			tokens.push(Token::new(r#type, self.lexeme(), self.line));
		}

		Ok(())
	}

	/// Match the next character if it is the expected one
	fn match_next(&mut self, expected: char) -> bool {
		matches!(self.peek(), Some(c) if c == expected && { self.advance(); true })
	}

	/// Advance to the next character
	fn advance(&mut self) -> Option<char> {
		let (i, c) = self.source_iter.next()?;
		self.cursor = i + c.len_utf8();
		Some(c)
	}

	/// Peek the current character
	fn peek(&mut self) -> Option<char> { self.source_iter.peek().map(|&(_, c)| c) }

	/// Peek the second character ahead
	fn peek_second(&mut self) -> Option<char> {
		let mut it = self.source_iter.clone();
		it.next()?;
		it.peek().map(|&(_, c)| c)
	}

	fn lexeme(&self) -> &'a str { &self.source[self.start..self.cursor] }

	/// Try to read `type)` right after a `(`. Rewinds and returns `None` when the
	/// parenthesis is not a cast.
	fn type_cast(&mut self) -> Option<Token<'a>> {
		let checkpoint = (self.source_iter.clone(), self.cursor);
		let name_start = self.cursor;
		while self.peek().is_some_and(|c| c.is_ascii_alphanumeric() || c == '_') {
			self.advance();
		}
		let name = &self.source[name_start..self.cursor];
		if self.peek() == Some(')') && self.is_type_name(name) {
			self.advance(); // consume ')'
			return Some(Token::new(TokenType::TypeCast, name, self.line));
		}
		(self.source_iter, self.cursor) = checkpoint;
		None
	}

	fn is_type_name(&self, name: &str) -> bool {
		BUILTIN_TYPE_NAMES.contains(&name) || self.type_names.iter().any(|known| known == name)
	}

	/// Skip a `/* ... */` comment, the opening pair is already consumed.
	fn block_comment(&mut self) -> Result<TokenType, ScanError> {
		while let Some(c) = self.peek() {
			if c == '*' && self.peek_second().is_some_and(|c| c == '/') {
				self.advance(); // consume '*'
				self.advance(); // consume '/'
				return Ok(TokenType::Comment);
			}
			if c == '\n' {
				self.line += 1;
			}
			self.advance();
		}
		Err(ScanError::new(self.line, ScanErrorType::UnterminatedBlockComment))
	}

	/// Scan a string literal, decoding escapes.
	fn string(&mut self) -> Result<Token<'a>, ScanError> {
		let mut value = String::new();
		let mut invalid_escape = None;
		loop {
			match self.advance() {
				None => return Err(ScanError::new(self.line, ScanErrorType::UnterminatedString)),
				Some('"') => break,
				Some('\\') => match self.advance() {
					Some('n') => value.push('\n'),
					Some('t') => value.push('\t'),
					Some('r') => value.push('\r'),
					Some('0') => value.push('\0'),
					Some('"') => value.push('"'),
					Some('\'') => value.push('\''),
					Some('\\') => value.push('\\'),
					Some(other) => {
						if other == '\n' {
							self.line += 1;
						}
						invalid_escape.get_or_insert(other);
					}
					None => return Err(ScanError::new(self.line, ScanErrorType::UnterminatedString)),
				},
				Some(c) => {
					if c == '\n' {
						self.line += 1;
					}
					value.push(c);
				}
			}
		}

		if let Some(escape) = invalid_escape {
			return Err(ScanError::new(self.line, ScanErrorType::InvalidStringEscape(escape)));
		}
		Ok(Token::with_literal(TokenType::String, self.lexeme(), Literal::Str(value), self.line))
	}

	/// Scan a character literal, the opening quote is already consumed.
	fn character(&mut self) -> Result<Token<'a>, ScanError> {
		let unterminated = |line| ScanError::new(line, ScanErrorType::UnterminatedCharacter);
		let value = match self.advance() {
			None | Some('\'') => return Err(unterminated(self.line)),
			Some('\\') => match self.advance() {
				Some('t') => '\t',
				Some('n') => '\n',
				Some('r') => '\r',
				Some('0') => '\0',
				Some('\'') => '\'',
				Some('\\') => '\\',
				Some(_) => {
					// Drop the rest of the literal so it is not scanned again.
					self.match_next('\'');
					return Err(ScanError::new(self.line, ScanErrorType::InvalidCharacterEscape));
				}
				None => return Err(unterminated(self.line)),
			},
			Some(c) => {
				if c == '\n' {
					self.line += 1;
				}
				c
			}
		};

		if !self.match_next('\'') {
			return Err(unterminated(self.line));
		}
		Ok(Token::with_literal(TokenType::Character, self.lexeme(), Literal::Char(value), self.line))
	}

	/// Scan a number literal. `fractional` is set when the literal started with
	/// its decimal point, as in `.5`.
	fn number(&mut self, fractional: bool) -> Result<Token<'a>, ScanError> {
		while self.peek().is_some_and(|c| c.is_ascii_digit()) {
			self.advance();
		}

		// Look for a fractional part.
		if !fractional && self.peek() == Some('.') {
			self.advance(); // consume '.'
			if !self.peek().is_some_and(|c| c.is_ascii_digit()) {
				return Err(ScanError::new(self.line, ScanErrorType::TrailingDecimalPoint));
			}
			while self.peek().is_some_and(|c| c.is_ascii_digit()) {
				self.advance();
			}
		}

		if self.peek() == Some('.') {
			while self.peek().is_some_and(|c| c == '.' || c.is_ascii_digit()) {
				self.advance();
			}
			return Err(ScanError::new(self.line, ScanErrorType::MultipleDecimalPoints));
		}

		let text = self.lexeme();
		let literal = Literal::parse_number(text)
			.ok_or_else(|| ScanError::new(self.line, ScanErrorType::InvalidNumber(text.to_string())))?;
		Ok(Token::with_literal(TokenType::Number, text, literal, self.line))
	}

	/// Scan an identifier or keyword
	fn identifier(&mut self) -> TokenType {
		while self.peek().is_some_and(|c| c.is_ascii_alphanumeric() || c == '_') {
			self.advance();
		}
		TokenType::keyword_or_identifier(self.lexeme())
	}
}
