//! There is no place in the grammar where both an expression and a statement
//! are allowed. The operands of, say, `+` are always expressions, never
//! statements. The body of a block is always a list of statements.

use crate::{emitter::SemanticType, parser::expression::Expression, scanner::Token};

/// A statement in the programming language.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement<'a> {
	/// An expression used as a statement.
	Expression(Expression<'a>),
	/// A print statement.
	Print(Expression<'a>),
	/// A block of statements.
	Block(Vec<Statement<'a>>),
	/// A typed variable declaration statement.
	Var {
		/// The declared type, taken from the leading type keyword.
		r#type:      SemanticType,
		/// The token of the variable being declared.
		name:        Token<'a>,
		/// An optional initializer expression.
		initializer: Option<Expression<'a>>,
	},
	If {
		keyword:       Token<'a>,
		condition:     Expression<'a>,
		then_branch:   Box<Statement<'a>>,
		/// Only ever `Statement::Elif`.
		elif_branches: Vec<Statement<'a>>,
		else_branch:   Option<Box<Statement<'a>>>,
	},
	Elif {
		keyword:   Token<'a>,
		condition: Expression<'a>,
		branch:    Box<Statement<'a>>,
	},
}

impl Statement<'_> {
	/// Name used when a statement kind cannot be lowered.
	pub fn kind(&self) -> &'static str {
		match self {
			Statement::Expression(_) => "expression",
			Statement::Print(_) => "print",
			Statement::Block(_) => "block",
			Statement::Var { .. } => "var",
			Statement::If { .. } => "if",
			Statement::Elif { .. } => "elif",
		}
	}
}
