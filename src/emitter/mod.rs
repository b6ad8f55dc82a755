//! Lowers the AST to typed IR.
//!
//! The emitter walks every statement in order and every expression left to
//! right, producing one IR node per AST node. Variables are resolved against
//! a [`ScopeStack`] that is pushed and popped as blocks are entered and left,
//! and each declaration gets its own slot index. Operand types are reconciled
//! here through the promotion rules in [`promotion`], so the IR only ever
//! applies an operator to two values of one type.
//!
//! Emission fails fast: the first resolution or type error ends the run.

pub mod ir;
pub mod promotion;
mod types;

use ir::{BinaryOp, Helper, Ir, IrKind, LogicalOp, OperatorCategory, Program, Slot, UnaryOp};
use promotion::{
	can_convert, ensure_boolean, ensure_integral, ensure_numeric, explicit_conversion, promotion_for, value_type,
};
pub use types::SemanticType;

use crate::{
	environment::ScopeStack,
	error::emitter::{EmitError, EmitErrorKind},
	interpreter::value::Value,
	parser::expression::{Expression, LiteralValue},
	scanner::{Token, TokenType},
	statement::Statement,
};

type EmitResult = Result<Ir, EmitError>;

/// Lowers statements to IR, one program per emitter.
#[derive(Debug, Default)]
pub struct Emitter {
	scopes:     ScopeStack,
	/// Next free slot index.
	slot_count: usize,
	/// Line of the last token seen, for nodes that carry none.
	line:       usize,
}

impl Emitter {
	pub fn new() -> Self { Self { scopes: ScopeStack::new(), slot_count: 0, line: 1 } }

	/// Lower a whole program into one block that owns the global slots.
	pub fn emit_program(mut self, statements: &[Statement<'_>]) -> Result<Program, EmitError> {
		let body = statements.iter().map(|statement| self.emit(statement)).collect::<Result<Vec<_>, _>>()?;
		let root = Ir::block(self.scopes.global_slots(), body, 1);
		tracing::debug!(slots = self.slot_count, result = ?root.r#type, "emission finished");
		Ok(Program { root, slot_count: self.slot_count })
	}

	/// Lower one statement.
	pub fn emit(&mut self, statement: &Statement<'_>) -> EmitResult {
		match statement {
			Statement::Expression(expression) => self.expression(expression),
			Statement::Print(expression) => {
				let value = self.expression(expression)?;
				let line = value.line;
				Ok(Ir::new(IrKind::Print(Box::new(value)), None, line))
			}
			Statement::Var { r#type, name, initializer } => {
				self.line = name.line;
				let slot = self.allocate(name.lexeme, *r#type);
				self.scopes.declare(slot.clone()).map_err(|kind| EmitError::at(name, kind))?;

				let value = match initializer {
					Some(initializer) => {
						let value = self.expression(initializer)?;
						coerce_assignment(value, &slot, name)?
					}
					None => Ir::constant(Value::default_for(*r#type), *r#type, name.line),
				};
				Ok(Ir::store(slot, value, name.line))
			}
			Statement::Block(children) => {
				self.scopes.push();
				let body = children.iter().map(|child| self.emit(child)).collect::<Result<Vec<_>, _>>();
				let frame = self.scopes.pop();
				let body = body?;

				let mut slots = frame.map(|frame| frame.into_values().collect::<Vec<_>>()).unwrap_or_default();
				slots.sort_by_key(|slot| slot.index);
				let line = body.first().map_or(self.line, |first| first.line);
				Ok(Ir::block(slots, body, line))
			}
			Statement::If { keyword, .. } | Statement::Elif { keyword, .. } => {
				Err(EmitError::at(keyword, EmitErrorKind::UnsupportedStatement(statement.kind())))
			}
		}
	}

	fn expression(&mut self, expression: &Expression<'_>) -> EmitResult {
		match expression {
			Expression::Literal(literal) => Ok(self.literal(literal)),
			Expression::Grouping(inner) => self.expression(inner),
			Expression::Variable(name) => {
				self.line = name.line;
				Ok(Ir::load(self.resolve(name)?, name.line))
			}
			Expression::Assign { target, value } => {
				self.line = target.line;
				let slot = self.resolve(target)?;
				let value = self.expression(value)?;
				let value = coerce_assignment(value, &slot, target)?;
				Ok(Ir::store(slot, value, target.line))
			}
			Expression::Unary { operator, right } => {
				self.line = operator.line;
				let operand = self.expression(right)?;
				let at = |kind| EmitError::at(operator, kind);
				let (operator, operand) = match operator.r#type {
					TokenType::Minus => (UnaryOp::Negate, ensure_numeric(operand).map_err(at)?),
					TokenType::Bang => (UnaryOp::Not, ensure_boolean(operand).map_err(at)?),
					TokenType::BitNot => (UnaryOp::Complement, ensure_integral(operand).map_err(at)?),
					_ => return Err(at(EmitErrorKind::UnsupportedOperator(operator.lexeme.to_string()))),
				};
				let r#type = operand.r#type;
				let line = self.line;
				Ok(Ir::new(IrKind::Unary { operator, operand: Box::new(operand) }, r#type, line))
			}
			Expression::Binary { left, operator, right } => {
				self.line = operator.line;
				let left = self.expression(left)?;
				let right = self.expression(right)?;
				self.binary(left, operator, right)
			}
			Expression::Logical { left, operator, right } => {
				self.line = operator.line;
				let at = |kind| EmitError::at(operator, kind);
				let left = ensure_boolean(self.expression(left)?).map_err(at)?;
				let right = ensure_boolean(self.expression(right)?).map_err(at)?;
				let operator = if operator.r#type == TokenType::Or { LogicalOp::Or } else { LogicalOp::And };
				let kind = IrKind::Logical { operator, left: Box::new(left), right: Box::new(right) };
				Ok(Ir::new(kind, Some(SemanticType::Bool), self.line))
			}
			Expression::TypeCast { target, expression } => {
				self.line = target.line;
				let inner = self.expression(expression)?;
				let at = |kind| EmitError::at(target, kind);
				let to = SemanticType::from_name(target.lexeme)
					.ok_or_else(|| at(EmitErrorKind::UnresolvableType(target.lexeme.to_string())))?;
				let from = value_type(&inner).map_err(at)?;
				if !explicit_conversion(from, to) {
					return Err(at(EmitErrorKind::InvalidConversion(from, to)));
				}
				if from == to {
					return Ok(inner);
				}
				Ok(Ir::new(IrKind::Convert(Box::new(inner)), Some(to), target.line))
			}
			Expression::IncDec { operator, target, is_prefix } => {
				self.line = operator.line;
				self.inc_dec(operator, target, *is_prefix)
			}
		}
	}

	fn literal(&self, literal: &LiteralValue) -> Ir {
		let (value, r#type) = match literal {
			LiteralValue::Int(n) => (Value::Int(*n), SemanticType::Int),
			LiteralValue::Long(n) => (Value::Long(*n), SemanticType::Long),
			LiteralValue::Double(n) => (Value::Double(*n), SemanticType::Double),
			LiteralValue::Boolean(b) => (Value::Bool(*b), SemanticType::Bool),
			LiteralValue::Str(s) => (Value::Str(s.clone()), SemanticType::String),
			LiteralValue::Char(c) => (Value::Char(*c), SemanticType::Char),
			LiteralValue::Null => (Value::Null, SemanticType::Object),
		};
		Ir::constant(value, r#type, self.line)
	}

	fn binary(&self, left: Ir, operator: &Token<'_>, right: Ir) -> EmitResult {
		let at = |kind| EmitError::at(operator, kind);
		let line = operator.line;
		let left_type = value_type(&left).map_err(at)?;
		let right_type = value_type(&right).map_err(at)?;

		if operator.r#type == TokenType::Power {
			return power(left, right, line).map_err(at);
		}
		let is_string = |r#type: SemanticType| r#type == SemanticType::String;
		if operator.r#type == TokenType::Plus && (is_string(left_type) || is_string(right_type)) {
			let kind = IrKind::Call { helper: Helper::Concat, arguments: vec![left, right] };
			return Ok(Ir::new(kind, Some(SemanticType::String), line));
		}

		let op = binary_operator(operator.r#type)
			.ok_or_else(|| at(EmitErrorKind::UnsupportedOperator(operator.lexeme.to_string())))?;
		let category = op.category();
		let promoted = promotion_for(category)(left_type, right_type).map_err(at)?;
		if op.is_relational() && !(promoted.is_numeric() || promoted == SemanticType::Char) {
			return Err(at(EmitErrorKind::UnsupportedComparison(left_type, right_type)));
		}

		let r#type = if category == OperatorCategory::Comparison { SemanticType::Bool } else { promoted };
		let (left, right) = (Box::new(left.convert(promoted)), Box::new(right.convert(promoted)));
		let kind = IrKind::Binary { operator: op, left, right };
		Ok(Ir::new(kind, Some(r#type), line))
	}

	/// `x = x ± 1`. A postfix form keeps the old value in a temporary and
	/// yields that.
	fn inc_dec(&mut self, operator: &Token<'_>, target: &Token<'_>, is_prefix: bool) -> EmitResult {
		let line = operator.line;
		let slot = self.resolve(target)?;
		let r#type = slot.r#type;
		let one = match r#type {
			SemanticType::Int => Value::Int(1),
			SemanticType::Long => Value::Long(1),
			SemanticType::Double => Value::Double(1.0),
			other => return Err(EmitError::at(operator, EmitErrorKind::NotNumeric(other))),
		};

		let op = if operator.r#type == TokenType::Increment { BinaryOp::Add } else { BinaryOp::Subtract };
		let kind = IrKind::Binary {
			operator: op,
			left:     Box::new(Ir::load(slot.clone(), line)),
			right:    Box::new(Ir::constant(one, r#type, line)),
		};
		let update = Ir::store(slot.clone(), Ir::new(kind, Some(r#type), line), line);
		if is_prefix {
			return Ok(update);
		}

		let temp = self.allocate("temp", r#type);
		let body = vec![Ir::store(temp.clone(), Ir::load(slot, line), line), update, Ir::load(temp.clone(), line)];
		Ok(Ir::block(vec![temp], body, line))
	}

	fn resolve(&self, name: &Token<'_>) -> Result<Slot, EmitError> {
		self.scopes.resolve(name.lexeme).cloned().map_err(|kind| EmitError::at(name, kind))
	}

	fn allocate(&mut self, name: &str, r#type: SemanticType) -> Slot {
		let slot = Slot { index: self.slot_count, r#type, name: name.to_string() };
		self.slot_count += 1;
		slot
	}
}

/// Convert `value` for storing into `slot`, widening only.
fn coerce_assignment(value: Ir, slot: &Slot, name: &Token<'_>) -> EmitResult {
	let from = value_type(&value).map_err(|kind| EmitError::at(name, kind))?;
	if !can_convert(from, slot.r#type) {
		let kind = EmitErrorKind::AssignmentTypeMismatch { name: slot.name.clone(), value: from, target: slot.r#type };
		return Err(EmitError::at(name, kind));
	}
	Ok(value.convert(slot.r#type))
}

/// `**`: integer power when both sides are integral, at the width integral
/// promotion picks, otherwise a float power.
fn power(left: Ir, right: Ir, line: usize) -> Result<Ir, EmitErrorKind> {
	let left_type = value_type(&left)?;
	let right_type = value_type(&right)?;

	let (helper, r#type, arguments) = if left_type.is_integral() && right_type.is_integral() {
		let width = promotion::promote_integral(left_type, right_type)?;
		let helper = if width == SemanticType::Int { Helper::IntPow } else { Helper::LongPow };
		(helper, width, vec![left.convert(width), right.convert(width)])
	} else {
		let left = ensure_numeric(left)?.convert(SemanticType::Double);
		let right = ensure_numeric(right)?.convert(SemanticType::Double);
		(Helper::FloatPow, SemanticType::Double, vec![left, right])
	};
	Ok(Ir::new(IrKind::Call { helper, arguments }, Some(r#type), line))
}

fn binary_operator(r#type: TokenType) -> Option<BinaryOp> {
	use TokenType::*;
	Some(match r#type {
		Plus => BinaryOp::Add,
		Minus => BinaryOp::Subtract,
		Star => BinaryOp::Multiply,
		Slash => BinaryOp::Divide,
		Percent => BinaryOp::Remainder,
		BitAnd => BinaryOp::BitAnd,
		BitOr => BinaryOp::BitOr,
		BitXor => BinaryOp::BitXor,
		LeftShift => BinaryOp::LeftShift,
		RightShift => BinaryOp::RightShift,
		EqualEqual => BinaryOp::Equal,
		BangEqual => BinaryOp::NotEqual,
		Less => BinaryOp::Less,
		LessEqual => BinaryOp::LessEqual,
		Greater => BinaryOp::Greater,
		GreaterEqual => BinaryOp::GreaterEqual,
		_ => return None,
	})
}
