//! Diagnostics collected by the scanner and the parser.
//!
//! Lexical and syntax errors don't stop their phase. Each one is pushed into a
//! [`Diagnostics`] value that travels back to the caller together with the
//! phase output, so the caller decides whether to carry on.

use std::fmt::Display;

use crate::scanner::{Token, TokenType};

/// Where on its line a diagnostic points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
	/// The error was found at the end of input.
	AtEnd,
	/// The error was found at a specific lexeme.
	AtLexeme(String),
	/// No better position than the line itself.
	Nowhere,
}

impl Location {
	/// Location of an error reported against `token`.
	pub fn of(token: &Token) -> Self {
		if token.r#type == TokenType::Eof { Location::AtEnd } else { Location::AtLexeme(token.lexeme.to_string()) }
	}
}

impl Display for Location {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Location::AtEnd => write!(f, "at end"),
			Location::AtLexeme(lexeme) => write!(f, "at '{lexeme}'"),
			Location::Nowhere => Ok(()),
		}
	}
}

/// One reported error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
	pub line:     usize,
	pub location: Location,
	pub message:  String,
}

impl Display for Diagnostic {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self.location {
			Location::Nowhere => write!(f, "[line {}] Error: {}", self.line, self.message),
			_ => write!(f, "[line {}] Error {}: {}", self.line, self.location, self.message),
		}
	}
}

/// Accumulates diagnostics for a single phase.
#[derive(Debug, Default, Clone)]
pub struct Diagnostics {
	entries: Vec<Diagnostic>,
}

impl Diagnostics {
	pub fn new() -> Self { Self::default() }

	pub fn report(&mut self, diagnostic: impl Into<Diagnostic>) {
		let diagnostic = diagnostic.into();
		tracing::debug!(line = diagnostic.line, message = %diagnostic.message, "diagnostic reported");
		self.entries.push(diagnostic);
	}

	pub fn has_errors(&self) -> bool { !self.is_empty() }

	pub fn len(&self) -> usize { self.entries.len() }

	pub fn is_empty(&self) -> bool { self.entries.is_empty() }

	pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> { self.entries.iter() }

	/// Append every diagnostic of `other`.
	pub fn extend(&mut self, other: Diagnostics) { self.entries.extend(other.entries) }
}

impl Display for Diagnostics {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let lines = self.entries.iter().map(|d| d.to_string()).collect::<Vec<String>>();
		write!(f, "{}", lines.join("\n"))
	}
}
