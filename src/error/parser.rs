use crate::{error::diagnostic::{Diagnostic, Location}, scanner::Token};

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("line {line}: {type}")]
pub struct ParseError {
	line:     usize,
	location: Location,
	r#type:   ParseErrorType,
}

impl ParseError {
	/// An error reported against `token`.
	pub fn at(token: &Token, r#type: ParseErrorType) -> Self {
		Self { line: token.line, location: Location::of(token), r#type }
	}
}

impl From<ParseError> for Diagnostic {
	fn from(error: ParseError) -> Self {
		Diagnostic { line: error.line, location: error.location, message: error.r#type.to_string() }
	}
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorType {
	ExpectedExpression,
	/// A required token is missing; carries the full message.
	Expected(&'static str),
	InvalidAssignmentTarget,
	InvalidIncDecTarget,
}

impl std::fmt::Display for ParseErrorType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		use ParseErrorType::*;
		match self {
			ExpectedExpression => {
				write!(f, "Expect expression.")
			}
			Expected(message) => {
				write!(f, "{message}")
			}
			InvalidAssignmentTarget => {
				write!(f, "Invalid assignment target.")
			}
			InvalidIncDecTarget => {
				write!(f, "Invalid increment/decrement target.")
			}
		}
	}
}
