//! Recursive-descent parser over the token list. Each precedence level below
//! is one method, lowest first; a level calls the next higher one for its
//! operands.
//!
//! |Name|Operators|Associates
//! --|--|--
//! Assignment|= += -= *= /= %= **=|Right
//! Or|\|\||Left
//! And|&&|Left
//! Equality|== !=|Left
//! Comparison|< > <= >=|Left
//! BitOr|\||Left
//! BitXor|^|Left
//! BitAnd|&|Left
//! Shift|<< >>|Left
//! Term|+ -|Left
//! Factor|* / %|Left
//! Exponent|**|Left
//! Unary|! - ~ ++ --|Right
//! Postfix|++ --|Left
//!
//! Grammar:
//!
//! ``` BNF
//! program        → declaration* EOF ;
//! declaration    → varDecl | statement ;
//! varDecl        → TYPE IDENTIFIER ( "=" expression )? ";" ;
//! statement      → "print" expression ";" | "{" declaration* "}" | expression ";" ;
//! expression     → assignment ;
//! assignment     → IDENTIFIER ( "=" | "+=" | "-=" | "*=" | "/=" | "%=" | "**=" ) assignment | or ;
//! or             → and ( "||" and )* ;
//! and            → equality ( "&&" equality )* ;
//! equality       → comparison ( ( "!=" | "==" ) comparison )* ;
//! comparison     → bit_or ( ( ">" | ">=" | "<" | "<=" ) bit_or )* ;
//! bit_or         → bit_xor ( "|" bit_xor )* ;
//! bit_xor        → bit_and ( "^" bit_and )* ;
//! bit_and        → shift ( "&" shift )* ;
//! shift          → term ( ( "<<" | ">>" ) term )* ;
//! term           → factor ( ( "-" | "+" ) factor )* ;
//! factor         → exponent ( ( "/" | "*" | "%" ) exponent )* ;
//! exponent       → unary ( "**" unary )* ;
//! unary          → ( "!" | "-" | "~" ) unary | ( "++" | "--" ) IDENTIFIER | postfix ;
//! postfix        → primary ( "++" | "--" )? ;
//! primary        → NUMBER | STRING | CHAR | "true" | "false" | "null" | IDENTIFIER
//!                | TYPECAST unary | "(" expression ")" ;
//! ```
//!
//! Compound assignment never reaches the emitter: `a += 1` is desugared here
//! into `a = a + 1`.
//!
//! A declaration that fails to parse reports one diagnostic and is dropped.
//! The parser then skips ahead to the next statement boundary so the rest of
//! the program still gets checked in the same pass.

pub mod expression;

use TokenType::*;

use crate::{
	emitter::SemanticType,
	error::{
		diagnostic::Diagnostics,
		parser::{ParseError, ParseErrorType},
	},
	parser::expression::{Expression, LiteralValue},
	scanner::{Token, TokenType},
	statement::Statement,
};

type ParseResult<'a> = Result<Box<Expression<'a>>, ParseError>;

/// Parse a token list ending in `Eof` into statements.
pub fn parse(tokens: Vec<Token<'_>>) -> (Vec<Statement<'_>>, Diagnostics) { Parser::new(tokens).parse() }

pub struct Parser<'a> {
	/// The tokens to parse, always ending in `Eof`.
	tokens:      Vec<Token<'a>>,
	current:     usize,
	diagnostics: Diagnostics,
}

impl<'a> Parser<'a> {
	pub fn new(mut tokens: Vec<Token<'a>>) -> Self {
		if tokens.last().is_none_or(|token| token.r#type != Eof) {
			let line = tokens.last().map_or(1, |token| token.line);
			tokens.push(Token::new(Eof, "", line));
		}
		Self { tokens, current: 0, diagnostics: Diagnostics::new() }
	}

	/// Parse the whole program. Statements that failed to parse are left out,
	/// their errors are in the returned diagnostics.
	pub fn parse(mut self) -> (Vec<Statement<'a>>, Diagnostics) {
		let mut statements = Vec::new();
		while !self.is_at_end() {
			if let Some(statement) = self.declaration() {
				statements.push(statement);
			}
		}
		tracing::debug!(statements = statements.len(), errors = self.diagnostics.len(), "parsing finished");
		(statements, self.diagnostics)
	}

	/// Parse one declaration, recovering on error.
	fn declaration(&mut self) -> Option<Statement<'a>> {
		let result = match SemanticType::from_keyword(self.peek().r#type) {
			Some(r#type) => {
				self.advance(); // consume type keyword
				self.var_declaration(r#type)
			}
			None => self.statement(),
		};

		match result {
			Ok(statement) => Some(statement),
			Err(error) => {
				self.diagnostics.report(error);
				self.synchronize();
				None
			}
		}
	}

	fn var_declaration(&mut self, r#type: SemanticType) -> Result<Statement<'a>, ParseError> {
		let name = self.consume(Identifier, "Expect variable name.")?;
		let initializer = if self.match_next(Equal) { Some(*self.expression()?) } else { None };
		self.consume(Semicolon, "Expect ';' after variable declaration.")?;
		Ok(Statement::Var { r#type, name, initializer })
	}

	fn statement(&mut self) -> Result<Statement<'a>, ParseError> {
		if self.match_next(Print) {
			let value = self.expression()?;
			self.consume(Semicolon, "Expect ';' after value.")?;
			return Ok(Statement::Print(*value));
		}
		if self.match_next(LeftBrace) {
			return Ok(Statement::Block(self.block()?));
		}

		let expression = self.expression()?;
		self.consume(Semicolon, "Expect ';' after expression.")?;
		Ok(Statement::Expression(*expression))
	}

	/// The statements of a block, the `{` is already consumed.
	fn block(&mut self) -> Result<Vec<Statement<'a>>, ParseError> {
		let mut statements = Vec::new();
		while !self.check(RightBrace) && !self.is_at_end() {
			if let Some(statement) = self.declaration() {
				statements.push(statement);
			}
		}
		self.consume(RightBrace, "Expect '}' after block.")?;
		Ok(statements)
	}

	fn expression(&mut self) -> ParseResult<'a> { self.assignment() }

	fn assignment(&mut self) -> ParseResult<'a> {
		let expression = self.or()?;

		if matches!(
			self.peek().r#type,
			Equal | PlusEqual | MinusEqual | StarEqual | SlashEqual | PercentEqual | PowerEqual
		) {
			let operator = self.advance();
			let value = self.assignment()?;

			if let Expression::Variable(name) = expression.as_ref() {
				let value = match compound_base(operator.r#type) {
					Some(base) => {
						let lexeme = operator.lexeme.strip_suffix('=').unwrap_or(operator.lexeme);
						let operator = Token::new(base, lexeme, operator.line);
						Expression::binary(Box::new(Expression::Variable(name.clone())), operator, value)
					}
					None => value,
				};
				return Ok(Expression::assign(name.clone(), value));
			}

			// Reported without unwinding, the left side stands in for the assignment.
			self.diagnostics.report(ParseError::at(&operator, ParseErrorType::InvalidAssignmentTarget));
		}

		Ok(expression)
	}

	fn or(&mut self) -> ParseResult<'a> {
		let mut expression = self.and()?;
		while self.check(Or) {
			expression = Expression::logical(expression, self.advance(), self.and()?)
		}
		Ok(expression)
	}

	fn and(&mut self) -> ParseResult<'a> {
		let mut expression = self.equality()?;
		while self.check(And) {
			expression = Expression::logical(expression, self.advance(), self.equality()?)
		}
		Ok(expression)
	}

	/// Parse equality expressions.
	fn equality(&mut self) -> ParseResult<'a> {
		let mut expression = self.comparison()?;
		while matches!(self.peek().r#type, BangEqual | EqualEqual) {
			expression = Expression::binary(expression, self.advance(), self.comparison()?)
		}
		Ok(expression)
	}

	/// Parse comparison expressions.
	fn comparison(&mut self) -> ParseResult<'a> {
		let mut expression = self.bit_or()?;
		while matches!(self.peek().r#type, Greater | GreaterEqual | Less | LessEqual) {
			expression = Expression::binary(expression, self.advance(), self.bit_or()?)
		}
		Ok(expression)
	}

	fn bit_or(&mut self) -> ParseResult<'a> {
		let mut expression = self.bit_xor()?;
		while self.check(BitOr) {
			expression = Expression::binary(expression, self.advance(), self.bit_xor()?)
		}
		Ok(expression)
	}

	fn bit_xor(&mut self) -> ParseResult<'a> {
		let mut expression = self.bit_and()?;
		while self.check(BitXor) {
			expression = Expression::binary(expression, self.advance(), self.bit_and()?)
		}
		Ok(expression)
	}

	fn bit_and(&mut self) -> ParseResult<'a> {
		let mut expression = self.shift()?;
		while self.check(BitAnd) {
			expression = Expression::binary(expression, self.advance(), self.shift()?)
		}
		Ok(expression)
	}

	fn shift(&mut self) -> ParseResult<'a> {
		let mut expression = self.term()?;
		while matches!(self.peek().r#type, LeftShift | RightShift) {
			expression = Expression::binary(expression, self.advance(), self.term()?)
		}
		Ok(expression)
	}

	/// Parse term expressions.
	fn term(&mut self) -> ParseResult<'a> {
		let mut expression = self.factor()?;
		while matches!(self.peek().r#type, Minus | Plus) {
			expression = Expression::binary(expression, self.advance(), self.factor()?)
		}
		Ok(expression)
	}

	/// Parse factor expressions.
	fn factor(&mut self) -> ParseResult<'a> {
		let mut expression = self.exponent()?;
		while matches!(self.peek().r#type, Slash | Star | Percent) {
			expression = Expression::binary(expression, self.advance(), self.exponent()?)
		}
		Ok(expression)
	}

	/// `**` loops at its own level, so `2 ** 3 ** 2` is `(2 ** 3) ** 2`.
	fn exponent(&mut self) -> ParseResult<'a> {
		let mut expression = self.unary()?;
		while self.check(Power) {
			expression = Expression::binary(expression, self.advance(), self.unary()?)
		}
		Ok(expression)
	}

	/// Parse unary expressions.
	fn unary(&mut self) -> ParseResult<'a> {
		if matches!(self.peek().r#type, Increment | Decrement) {
			let operator = self.advance();
			let right = self.unary()?;
			return match *right {
				Expression::Variable(target) => Ok(Expression::inc_dec(operator, target, true)),
				_ => Err(ParseError::at(&operator, ParseErrorType::InvalidIncDecTarget)),
			};
		}
		if matches!(self.peek().r#type, Bang | Minus | BitNot) {
			return Ok(Expression::unary(self.advance(), self.unary()?));
		}
		self.postfix()
	}

	fn postfix(&mut self) -> ParseResult<'a> {
		let expression = self.primary()?;
		if !matches!(self.peek().r#type, Increment | Decrement) {
			return Ok(expression);
		}

		let operator = self.advance();
		match *expression {
			Expression::Variable(target) => Ok(Expression::inc_dec(operator, target, false)),
			_ => Err(ParseError::at(&operator, ParseErrorType::InvalidIncDecTarget)),
		}
	}

	/// Parse primary expressions.
	fn primary(&mut self) -> ParseResult<'a> {
		let literal = |value: LiteralValue| -> ParseResult<'a> { Ok(Box::new(Expression::Literal(value))) };
		match self.peek().r#type {
			False => {
				self.advance();
				literal(LiteralValue::Boolean(false))
			}
			True => {
				self.advance();
				literal(LiteralValue::Boolean(true))
			}
			Null => {
				self.advance();
				literal(LiteralValue::Null)
			}
			Number | String | Character => {
				let token = self.advance();
				let Some(value) = token.literal.clone() else {
					return Err(ParseError::at(&token, ParseErrorType::ExpectedExpression));
				};
				literal(value.into())
			}
			Identifier => Ok(Box::new(Expression::Variable(self.advance()))),
			TypeCast => {
				let target = self.advance();
				Ok(Expression::type_cast(target, self.unary()?))
			}
			LeftParen => {
				self.advance(); // consume '('
				let expression = self.expression()?;
				self.consume(RightParen, "Expect ')' after expression.")?;
				Ok(Expression::grouping(expression))
			}
			_ => Err(ParseError::at(self.peek(), ParseErrorType::ExpectedExpression)),
		}
	}

	/// Consume a token of the expected type or fail with `message`.
	fn consume(&mut self, r#type: TokenType, message: &'static str) -> Result<Token<'a>, ParseError> {
		if self.check(r#type) {
			return Ok(self.advance());
		}
		Err(ParseError::at(self.peek(), ParseErrorType::Expected(message)))
	}

	fn match_next(&mut self, r#type: TokenType) -> bool {
		let matched = self.check(r#type);
		if matched {
			self.advance();
		}
		matched
	}

	fn check(&self, r#type: TokenType) -> bool { !self.is_at_end() && self.peek().r#type == r#type }

	/// Advance to the next token, returning the consumed one. `Eof` is never
	/// consumed.
	fn advance(&mut self) -> Token<'a> {
		let token = self.tokens[self.current].clone();
		if !self.is_at_end() {
			self.current += 1;
		}
		token
	}

	fn is_at_end(&self) -> bool { self.peek().r#type == Eof }

	/// Peek at the current token.
	fn peek(&self) -> &Token<'a> { &self.tokens[self.current] }

	fn previous(&self) -> Option<TokenType> { self.current.checked_sub(1).map(|i| self.tokens[i].r#type) }

	/// Skip tokens until just after a `;` or to the start of a declaration.
	fn synchronize(&mut self) {
		self.advance();
		while !self.is_at_end() {
			if self.previous() == Some(Semicolon) {
				return;
			}
			let next = self.peek().r#type;
			if next.is_type_keyword()
				|| matches!(next, If | Elif | Else | For | While | Class | Return | Break | Continue)
			{
				return;
			}
			self.advance();
		}
	}
}

/// Operator a compound assignment applies before storing.
fn compound_base(r#type: TokenType) -> Option<TokenType> {
	match r#type {
		PlusEqual => Some(Plus),
		MinusEqual => Some(Minus),
		StarEqual => Some(Star),
		SlashEqual => Some(Slash),
		PercentEqual => Some(Percent),
		PowerEqual => Some(Power),
		_ => None,
	}
}
