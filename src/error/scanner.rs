use crate::error::diagnostic::{Diagnostic, Location};

/// A specific scanning error with line number and type.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("line {line}: {type}")]
pub struct ScanError {
	/// The line number where the error occurred.
	line:   usize,
	/// The type of scanning error.
	r#type: ScanErrorType,
}

impl ScanError {
	pub fn new(line: usize, r#type: ScanErrorType) -> Self { Self { line, r#type } }
}

impl From<ScanError> for Diagnostic {
	fn from(error: ScanError) -> Self {
		Diagnostic { line: error.line, location: Location::Nowhere, message: error.r#type.to_string() }
	}
}

/// Types of scanning errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanErrorType {
	/// Error for unterminated block comments.
	UnterminatedBlockComment,
	/// Error for unexpected characters.
	UnexpectedCharacter(char),
	/// Error for unterminated strings.
	UnterminatedString,
	/// A backslash escape a string literal doesn't know.
	InvalidStringEscape(char),
	/// Character literal that never closes, or holds nothing.
	UnterminatedCharacter,
	/// A backslash escape a character literal doesn't know.
	InvalidCharacterEscape,
	/// `1.`
	TrailingDecimalPoint,
	/// `1.2.3`
	MultipleDecimalPoints,
	/// Digits that fit none of the number types.
	InvalidNumber(String),
}

impl std::fmt::Display for ScanErrorType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		use ScanErrorType::*;
		match self {
			UnterminatedBlockComment => {
				write!(f, "Unterminated block comment.")
			}
			UnexpectedCharacter(c) => {
				write!(f, "Unexpected character '{c}'.")
			}
			UnterminatedString => {
				write!(f, "Unterminated string.")
			}
			InvalidStringEscape(c) => {
				write!(f, "Invalid escape sequence '\\{c}' in string literal.")
			}
			UnterminatedCharacter => {
				write!(f, "Unterminated character literal.")
			}
			InvalidCharacterEscape => {
				write!(f, "Invalid escape sequence in character literal.")
			}
			TrailingDecimalPoint => {
				write!(f, "Invalid number format (trailing decimal point).")
			}
			MultipleDecimalPoints => {
				write!(f, "Invalid number format (multiple decimal points).")
			}
			InvalidNumber(text) => {
				write!(f, "Invalid number format: {text}")
			}
		}
	}
}
