//! Expression AST nodes
//! An `Expression` is a tree structure representing code like `-123 *
//! (45.67)` as nested nodes.

use Expression::*;

use crate::scanner::{Literal as TokenLiteral, Token};

/// Expression AST nodes
#[derive(Debug, Clone, PartialEq)]
pub enum Expression<'a> {
	Literal(LiteralValue),
	Variable(Token<'a>),
	Unary { operator: Token<'a>, right: Box<Expression<'a>> },
	Binary { left: Box<Expression<'a>>, operator: Token<'a>, right: Box<Expression<'a>> },
	/// `&&` and `||`, the right side is only evaluated when it decides the result.
	Logical { left: Box<Expression<'a>>, operator: Token<'a>, right: Box<Expression<'a>> },
	Assign { target: Token<'a>, value: Box<Expression<'a>> },
	Grouping(Box<Expression<'a>>),
	/// `(type)expression`, the token is the `TypeCast` token naming the type.
	TypeCast { target: Token<'a>, expression: Box<Expression<'a>> },
	/// `++x`, `x++`, `--x` and `x--`. The target is always a variable name.
	IncDec { operator: Token<'a>, target: Token<'a>, is_prefix: bool },
}

impl<'a> Expression<'a> {
	pub fn unary(operator: Token<'a>, right: Box<Self>) -> Box<Self> { Box::new(Unary { operator, right }) }

	pub fn binary(left: Box<Self>, operator: Token<'a>, right: Box<Self>) -> Box<Self> {
		Box::new(Binary { left, operator, right })
	}

	pub fn logical(left: Box<Self>, operator: Token<'a>, right: Box<Self>) -> Box<Self> {
		Box::new(Logical { left, operator, right })
	}

	pub fn grouping(expr: Box<Self>) -> Box<Self> { Box::new(Grouping(expr)) }

	pub fn assign(target: Token<'a>, value: Box<Self>) -> Box<Self> { Box::new(Assign { target, value }) }

	pub fn type_cast(target: Token<'a>, expression: Box<Self>) -> Box<Self> {
		Box::new(TypeCast { target, expression })
	}

	pub fn inc_dec(operator: Token<'a>, target: Token<'a>, is_prefix: bool) -> Box<Self> {
		Box::new(IncDec { operator, target, is_prefix })
	}
}

/// Literal values in the AST
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
	Int(i32),
	Long(i64),
	Double(f64),
	Boolean(bool),
	Str(String),
	Char(char),
	Null,
}

impl From<TokenLiteral> for LiteralValue {
	fn from(literal: TokenLiteral) -> Self {
		match literal {
			TokenLiteral::Int(n) => LiteralValue::Int(n),
			TokenLiteral::Long(n) => LiteralValue::Long(n),
			TokenLiteral::Double(n) => LiteralValue::Double(n),
			TokenLiteral::Str(s) => LiteralValue::Str(s),
			TokenLiteral::Char(c) => LiteralValue::Char(c),
		}
	}
}

impl std::fmt::Display for Expression<'_> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Literal(lit) => write!(f, "{lit}"),
			Unary { operator, right } => write!(f, "({} {right})", operator.lexeme),
			Binary { left, operator, right } => write!(f, "({} {left} {right})", operator.lexeme),
			Logical { left, operator, right } => write!(f, "({} {left} {right})", operator.lexeme),
			Grouping(expression) => write!(f, "(group {expression})"),
			Variable(token) => write!(f, "{}", token.lexeme),
			Assign { target, value } => write!(f, "(= {} {value})", target.lexeme),
			TypeCast { target, expression } => write!(f, "(({}) {expression})", target.lexeme),
			IncDec { operator, target, is_prefix: true } => write!(f, "({}{})", operator.lexeme, target.lexeme),
			IncDec { operator, target, is_prefix: false } => write!(f, "({}{})", target.lexeme, operator.lexeme),
		}
	}
}

impl std::fmt::Display for LiteralValue {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			LiteralValue::Int(n) => write!(f, "{n}"),
			LiteralValue::Long(n) => write!(f, "{n}"),
			LiteralValue::Double(n) => write!(f, "{n}"),
			LiteralValue::Boolean(b) => write!(f, "{b}"),
			LiteralValue::Str(s) => write!(f, "\"{s}\""),
			LiteralValue::Char(c) => write!(f, "'{c}'"),
			LiteralValue::Null => write!(f, "null"),
		}
	}
}
