/// A token produced by the scanner
#[derive(Debug, Clone, PartialEq)]
pub struct Token<'a> {
	pub r#type:  TokenType,
	pub lexeme:  &'a str,
	/// Decoded value of number, string and character literals.
	pub literal: Option<Literal>,
	pub line:    usize,
}

impl<'a> Token<'a> {
	pub fn new(r#type: TokenType, lexeme: &'a str, line: usize) -> Self { Self { r#type, lexeme, literal: None, line } }

	pub fn with_literal(r#type: TokenType, lexeme: &'a str, literal: Literal, line: usize) -> Self {
		Self { r#type, lexeme, literal: Some(literal), line }
	}
}

/// Value carried by a literal token. Numbers get the narrowest type that holds
/// them exactly: `int`, then `long`, then `double`.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
	Int(i32),
	Long(i64),
	Double(f64),
	Str(String),
	Char(char),
}

impl Literal {
	/// Parse the text of a number literal.
	pub fn parse_number(text: &str) -> Option<Self> {
		if let Ok(n) = text.parse::<i32>() {
			return Some(Literal::Int(n));
		}
		if let Ok(n) = text.parse::<i64>() {
			return Some(Literal::Long(n));
		}
		text.parse::<f64>().ok().map(Literal::Double)
	}
}

/// The different types of tokens, The copying is lightweight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
	/// New Line Character `\n`.
	NewLine,
	/// Empty Character: ` `, `\r`, `\t`.
	EmptyChar,
	/// Comment `//` or /* ... */
	Comment,
	/// Left parenthesis `(`.
	LeftParen,
	/// Right parenthesis `)`.
	RightParen,
	/// Left brace `{`.
	LeftBrace,
	/// Right brace `}`.
	RightBrace,
	/// Left bracket `[`.
	LeftBracket,
	/// Right bracket `]`.
	RightBracket,
	/// `(int)`, `(double)`... The lexeme is the type name alone.
	TypeCast,
	/// Comma `,`.
	Comma,
	/// Dot `.`.
	Dot,
	/// Semicolon `;`.
	Semicolon,
	Minus,
	MinusEqual,
	Decrement,
	Plus,
	PlusEqual,
	Increment,
	Slash,
	SlashEqual,
	Star,
	StarEqual,
	Power,
	PowerEqual,
	Percent,
	PercentEqual,
	/// Bitwise `&`.
	BitAnd,
	/// Bitwise `|`.
	BitOr,
	/// Bitwise `^`.
	BitXor,
	/// Bitwise `~`.
	BitNot,
	LeftShift,
	RightShift,
	/// Logical `&&`.
	And,
	/// Logical `||`.
	Or,
	Bang,
	BangEqual,
	Equal,
	EqualEqual,
	Greater,
	GreaterEqual,
	Less,
	LessEqual,
	Identifier,
	String,
	Character,
	Number,
	If,
	Elif,
	Else,
	While,
	For,
	Continue,
	Break,
	Return,
	Class,
	Super,
	This,
	Null,
	True,
	False,
	Print,
	/// Type keywords.
	Int,
	Long,
	Double,
	Bool,
	StringType,
	CharType,
	Object,
	/// End of file/input.
	Eof,
}

impl TokenType {
	pub fn is_ignored(&self) -> bool { matches!(self, TokenType::EmptyChar | TokenType::NewLine | TokenType::Comment) }

	pub fn is_type_keyword(&self) -> bool {
		use TokenType::*;
		matches!(self, Int | Long | Double | Bool | StringType | CharType | Object)
	}

	pub fn keyword_or_identifier(value: &str) -> Self {
		use TokenType::*;
		match value {
			"if" => If,
			"elif" => Elif,
			"else" => Else,
			"while" => While,
			"for" => For,
			"continue" => Continue,
			"break" => Break,
			"return" => Return,
			"class" => Class,
			"super" => Super,
			"this" => This,
			"null" => Null,
			"true" => True,
			"false" => False,
			"print" => Print,
			"int" => Int,
			"long" => Long,
			"double" => Double,
			"bool" => Bool,
			"string" => StringType,
			"char" => CharType,
			"object" => Object,
			_ => Identifier,
		}
	}
}
