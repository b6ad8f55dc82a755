use crate::{emitter::SemanticType, error::diagnostic::Location, scanner::Token};

/// Emission failure, tied to the token that caused it.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("[line {line}] {category} error {location}: {kind}", category = .kind.category())]
pub struct EmitError {
	pub line:     usize,
	pub location: Location,
	pub kind:     EmitErrorKind,
}

impl EmitError {
	pub fn at(token: &Token, kind: EmitErrorKind) -> Self {
		Self { line: token.line, location: Location::of(token), kind }
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
	Resolution,
	Type,
}

impl std::fmt::Display for ErrorCategory {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			ErrorCategory::Resolution => write!(f, "Resolution"),
			ErrorCategory::Type => write!(f, "Type"),
		}
	}
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum EmitErrorKind {
	#[error("Undefined variable '{0}'.")]
	UndefinedVariable(String),
	#[error("Variable '{0}' already declared in this scope.")]
	DuplicateDeclaration(String),
	#[error("Cannot resolve type '{0}'.")]
	UnresolvableType(String),
	#[error("Cannot promote types {0} and {1} to a numeric type.")]
	UnsupportedPromotion(SemanticType, SemanticType),
	#[error("Cannot promote types {0} and {1} to an integer type.")]
	UnsupportedIntegralPromotion(SemanticType, SemanticType),
	#[error("Cannot compare types {0} and {1}.")]
	UnsupportedComparison(SemanticType, SemanticType),
	#[error("Cannot assign value of type '{value}' to variable '{name}' of type '{target}'.")]
	AssignmentTypeMismatch { name: String, value: SemanticType, target: SemanticType },
	#[error("Operand is not a numeric type: {0}")]
	NotNumeric(SemanticType),
	#[error("Operand is not an integer type: {0}")]
	NotIntegral(SemanticType),
	#[error("Cannot convert type {0} to bool")]
	NotBoolean(SemanticType),
	#[error("Cannot convert type {0} to {1}.")]
	InvalidConversion(SemanticType, SemanticType),
	#[error("Unsupported binary operator: {0}")]
	UnsupportedOperator(String),
	#[error("Expression has no value.")]
	NoValue,
	#[error("Unsupported statement: {0}")]
	UnsupportedStatement(&'static str),
}

impl EmitErrorKind {
	pub fn category(&self) -> ErrorCategory {
		use EmitErrorKind::*;
		match self {
			UndefinedVariable(_) | DuplicateDeclaration(_) | UnresolvableType(_) => ErrorCategory::Resolution,
			_ => ErrorCategory::Type,
		}
	}
}
