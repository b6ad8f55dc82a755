//! Typed IR produced by the emitter.
//!
//! Every node carries its static type, `None` for nodes without a value such
//! as `Print`. Conversions are explicit nodes, so by the time a tree reaches
//! the runner each operator sees operands of exactly the type it expects.

use std::fmt::Display;

use crate::{emitter::SemanticType, interpreter::value::Value};

/// A storage location for one declared variable or temporary.
#[derive(Debug, Clone, PartialEq)]
pub struct Slot {
	pub index:  usize,
	pub r#type: SemanticType,
	pub name:   String,
}

/// A whole lowered program: one block holding the globals and every
/// top-level statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
	pub root:       Ir,
	/// Slots the machine must provide, temporaries included.
	pub slot_count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ir {
	pub kind:   IrKind,
	pub r#type: Option<SemanticType>,
	/// Source line of the node that produced it.
	pub line:   usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum IrKind {
	Constant(Value),
	Load(Slot),
	/// Stores and yields the stored value.
	Store { slot: Slot, value: Box<Ir> },
	Convert(Box<Ir>),
	Binary { operator: BinaryOp, left: Box<Ir>, right: Box<Ir> },
	/// Short-circuit `&&` / `||` over two booleans.
	Logical { operator: LogicalOp, left: Box<Ir>, right: Box<Ir> },
	Unary { operator: UnaryOp, operand: Box<Ir> },
	Condition { test: Box<Ir>, then_branch: Box<Ir>, else_branch: Box<Ir> },
	Call { helper: Helper, arguments: Vec<Ir> },
	Print(Box<Ir>),
	/// Slots declared directly in this block, then its children in order.
	Block { slots: Vec<Slot>, body: Vec<Ir> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
	Add,
	Subtract,
	Multiply,
	Divide,
	Remainder,
	BitAnd,
	BitOr,
	BitXor,
	LeftShift,
	RightShift,
	Equal,
	NotEqual,
	Less,
	LessEqual,
	Greater,
	GreaterEqual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
	And,
	Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
	Negate,
	Not,
	Complement,
}

/// Operations the IR calls out to instead of expressing inline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Helper {
	IntPow,
	LongPow,
	FloatPow,
	/// Display forms of both arguments, joined.
	Concat,
}

/// Which promotion rule a binary operator uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorCategory {
	Arithmetic,
	Bitwise,
	Comparison,
}

impl BinaryOp {
	pub fn category(self) -> OperatorCategory {
		use BinaryOp::*;
		match self {
			Add | Subtract | Multiply | Divide | Remainder => OperatorCategory::Arithmetic,
			BitAnd | BitOr | BitXor | LeftShift | RightShift => OperatorCategory::Bitwise,
			Equal | NotEqual | Less | LessEqual | Greater | GreaterEqual => OperatorCategory::Comparison,
		}
	}

	pub fn is_relational(self) -> bool {
		matches!(self, BinaryOp::Less | BinaryOp::LessEqual | BinaryOp::Greater | BinaryOp::GreaterEqual)
	}
}

impl Display for BinaryOp {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		use BinaryOp::*;
		let symbol = match self {
			Add => "+",
			Subtract => "-",
			Multiply => "*",
			Divide => "/",
			Remainder => "%",
			BitAnd => "&",
			BitOr => "|",
			BitXor => "^",
			LeftShift => "<<",
			RightShift => ">>",
			Equal => "==",
			NotEqual => "!=",
			Less => "<",
			LessEqual => "<=",
			Greater => ">",
			GreaterEqual => ">=",
		};
		write!(f, "{symbol}")
	}
}

impl Display for UnaryOp {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			UnaryOp::Negate => write!(f, "-"),
			UnaryOp::Not => write!(f, "!"),
			UnaryOp::Complement => write!(f, "~"),
		}
	}
}

impl Ir {
	pub fn new(kind: IrKind, r#type: Option<SemanticType>, line: usize) -> Self { Self { kind, r#type, line } }

	pub fn constant(value: Value, r#type: SemanticType, line: usize) -> Self {
		Self::new(IrKind::Constant(value), Some(r#type), line)
	}

	pub fn load(slot: Slot, line: usize) -> Self {
		let r#type = Some(slot.r#type);
		Self::new(IrKind::Load(slot), r#type, line)
	}

	pub fn store(slot: Slot, value: Ir, line: usize) -> Self {
		let r#type = Some(slot.r#type);
		Self::new(IrKind::Store { slot, value: Box::new(value) }, r#type, line)
	}

	/// Wrap in a conversion to `target`, or return unchanged when already there.
	pub fn convert(self, target: SemanticType) -> Self {
		if self.r#type == Some(target) {
			return self;
		}
		let line = self.line;
		Self::new(IrKind::Convert(Box::new(self)), Some(target), line)
	}

	pub fn block(slots: Vec<Slot>, body: Vec<Ir>, line: usize) -> Self {
		let r#type = body.last().and_then(|last| last.r#type);
		Self::new(IrKind::Block { slots, body }, r#type, line)
	}
}
