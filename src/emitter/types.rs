use std::fmt::Display;

use crate::scanner::TokenType;

/// Static type of a declared variable or of an IR node.
///
/// `Int`, `Long` and `Double` form the numeric lattice, in that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SemanticType {
	Int,
	Long,
	Double,
	Bool,
	String,
	Char,
	Object,
}

impl SemanticType {
	/// The type a declaration keyword introduces.
	pub fn from_keyword(r#type: TokenType) -> Option<Self> {
		Some(match r#type {
			TokenType::Int => Self::Int,
			TokenType::Long => Self::Long,
			TokenType::Double => Self::Double,
			TokenType::Bool => Self::Bool,
			TokenType::StringType => Self::String,
			TokenType::CharType => Self::Char,
			TokenType::Object => Self::Object,
			_ => return None,
		})
	}

	/// Look a type up by the name used in a cast.
	pub fn from_name(name: &str) -> Option<Self> {
		Some(match name {
			"int" => Self::Int,
			"long" => Self::Long,
			"double" => Self::Double,
			"bool" => Self::Bool,
			"string" => Self::String,
			"char" => Self::Char,
			"object" => Self::Object,
			_ => return None,
		})
	}

	pub fn name(self) -> &'static str {
		match self {
			Self::Int => "int",
			Self::Long => "long",
			Self::Double => "double",
			Self::Bool => "bool",
			Self::String => "string",
			Self::Char => "char",
			Self::Object => "object",
		}
	}

	pub fn is_numeric(self) -> bool { matches!(self, Self::Int | Self::Long | Self::Double) }

	pub fn is_integral(self) -> bool { matches!(self, Self::Int | Self::Long) }

	/// Position in the numeric lattice.
	pub(crate) fn rank(self) -> Option<u8> {
		match self {
			Self::Int => Some(0),
			Self::Long => Some(1),
			Self::Double => Some(2),
			_ => None,
		}
	}
}

impl Display for SemanticType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "{}", self.name()) }
}
