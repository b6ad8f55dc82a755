use std::fmt::Display;

use Value::*;

use crate::emitter::{
	SemanticType,
	ir::{BinaryOp, UnaryOp},
};

/// Value represents a runtime value held in a slot or produced by an IR node.
///
/// Operands reaching [`Value::binary_op`] have already been promoted to one
/// common type by the emitter, so only same-typed pairs are handled there.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	Int(i32),
	Long(i64),
	Double(f64),
	Bool(bool),
	Str(String),
	Char(char),
	/// Default of `string` and `object` slots.
	Null,
	/// Result of a node that has no value.
	Unit,
}

impl Display for Value {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Int(n) => write!(f, "{n}"),
			Long(n) => write!(f, "{n}"),
			Double(n) => write!(f, "{n}"),
			Bool(b) => write!(f, "{b}"),
			Str(s) => write!(f, "{s}"),
			Char(c) => write!(f, "{c}"),
			Null | Unit => Ok(()),
		}
	}
}

const DIVIDE_BY_ZERO: &str = "Attempted to divide by zero.";
const OVERFLOW: &str = "Arithmetic operation resulted in an overflow.";

impl Value {
	/// Value a slot of type `r#type` holds before its first store.
	pub fn default_for(r#type: SemanticType) -> Self {
		match r#type {
			SemanticType::Int => Int(0),
			SemanticType::Long => Long(0),
			SemanticType::Double => Double(0.0),
			SemanticType::Bool => Bool(false),
			SemanticType::Char => Char('\0'),
			SemanticType::String | SemanticType::Object => Null,
		}
	}

	/// Name of the type this value carries at run time.
	pub fn type_name(&self) -> &'static str {
		match self {
			Int(_) => "int",
			Long(_) => "long",
			Double(_) => "double",
			Bool(_) => "bool",
			Str(_) => "string",
			Char(_) => "char",
			Null => "null",
			Unit => "void",
		}
	}

	/// Performs a binary operation between two values of the same type.
	pub fn binary_op(&self, op: BinaryOp, right: &Self) -> Result<Value, String> {
		use BinaryOp::*;

		match op {
			Equal => return Ok(Bool(self == right)),
			NotEqual => return Ok(Bool(self != right)),
			Less | LessEqual | Greater | GreaterEqual => return self.compare(op, right).map(Bool),
			_ => {}
		}

		Ok(match (self, right) {
			(Int(l), Int(r)) => Int(match op {
				Add => l.wrapping_add(*r),
				Subtract => l.wrapping_sub(*r),
				Multiply => l.wrapping_mul(*r),
				Divide => checked(l.checked_div(*r), *r == 0)?,
				Remainder => checked(l.checked_rem(*r), *r == 0)?,
				BitAnd => l & r,
				BitOr => l | r,
				BitXor => l ^ r,
				LeftShift => l.wrapping_shl(*r as u32),
				RightShift => l.wrapping_shr(*r as u32),
				_ => return Err(self.unsupported(op, right)),
			}),
			(Long(l), Long(r)) => Long(match op {
				Add => l.wrapping_add(*r),
				Subtract => l.wrapping_sub(*r),
				Multiply => l.wrapping_mul(*r),
				Divide => checked(l.checked_div(*r), *r == 0)?,
				Remainder => checked(l.checked_rem(*r), *r == 0)?,
				BitAnd => l & r,
				BitOr => l | r,
				BitXor => l ^ r,
				LeftShift => l.wrapping_shl(*r as u32),
				RightShift => l.wrapping_shr(*r as u32),
				_ => return Err(self.unsupported(op, right)),
			}),
			(Double(l), Double(r)) => Double(match op {
				Add => l + r,
				Subtract => l - r,
				Multiply => l * r,
				Divide => l / r,
				Remainder => l % r,
				_ => return Err(self.unsupported(op, right)),
			}),
			_ => return Err(self.unsupported(op, right)),
		})
	}

	fn compare(&self, op: BinaryOp, right: &Self) -> Result<bool, String> {
		let ordering = match (self, right) {
			(Int(l), Int(r)) => l.partial_cmp(r),
			(Long(l), Long(r)) => l.partial_cmp(r),
			(Double(l), Double(r)) => l.partial_cmp(r),
			(Char(l), Char(r)) => l.partial_cmp(r),
			_ => return Err(self.unsupported(op, right)),
		};
		// NaN compares false against everything.
		Ok(ordering.is_some_and(|ordering| match op {
			BinaryOp::Less => ordering.is_lt(),
			BinaryOp::LessEqual => ordering.is_le(),
			BinaryOp::Greater => ordering.is_gt(),
			_ => ordering.is_ge(),
		}))
	}

	/// Performs a unary operation.
	pub fn unary_op(&self, op: UnaryOp) -> Result<Value, String> {
		Ok(match (op, self) {
			(UnaryOp::Negate, Int(n)) => Int(n.wrapping_neg()),
			(UnaryOp::Negate, Long(n)) => Long(n.wrapping_neg()),
			(UnaryOp::Negate, Double(n)) => Double(-n),
			(UnaryOp::Not, Bool(b)) => Bool(!b),
			(UnaryOp::Complement, Int(n)) => Int(!n),
			(UnaryOp::Complement, Long(n)) => Long(!n),
			_ => return Err(format!("Operator {op} is not defined for {}.", self.type_name())),
		})
	}

	/// Converts to `target`. Narrowing numeric conversions truncate, reading a
	/// typed value out of an `object` checks the carried type.
	pub fn convert(self, target: SemanticType) -> Result<Value, String> {
		use SemanticType as T;

		Ok(match (self, target) {
			(value, T::Object) => value,
			(Null, T::String) => Null,
			(Str(s), T::String) => Str(s),
			(value @ (Int(_) | Long(_) | Double(_) | Bool(_) | Char(_)), T::String) => Str(value.to_string()),

			(Int(n), T::Int) => Int(n),
			(Long(n), T::Int) => Int(n as i32),
			(Double(n), T::Int) => Int(n as i32),
			(Char(c), T::Int) => Int(c as i32),

			(Int(n), T::Long) => Long(n.into()),
			(Long(n), T::Long) => Long(n),
			(Double(n), T::Long) => Long(n as i64),
			(Char(c), T::Long) => Long(u32::from(c).into()),

			(Int(n), T::Double) => Double(n.into()),
			(Long(n), T::Double) => Double(n as f64),
			(Double(n), T::Double) => Double(n),
			(Char(c), T::Double) => Double(u32::from(c).into()),

			(Char(c), T::Char) => Char(c),
			(Int(n), T::Char) => Char(code_point(n.into())?),
			(Long(n), T::Char) => Char(code_point(n)?),
			(Double(n), T::Char) => Char(code_point(n as i64)?),

			(Bool(b), T::Bool) => Bool(b),

			(value, target) => {
				return Err(format!("Unable to cast value of type '{}' to type '{target}'.", value.type_name()));
			}
		})
	}

	/// `base ** exponent` at 32-bit width, wrapping on overflow.
	pub fn int_pow(base: i32, exponent: i32) -> i32 {
		match u32::try_from(exponent) {
			Ok(exponent) => base.wrapping_pow(exponent),
			Err(_) => negative_power(base.into(), exponent.into()) as i32,
		}
	}

	/// `base ** exponent` at 64-bit width, wrapping on overflow.
	pub fn long_pow(base: i64, exponent: i64) -> i64 {
		let Ok(mut exponent) = u64::try_from(exponent) else { return negative_power(base, exponent) };
		let (mut base, mut result) = (base, 1i64);
		while exponent > 0 {
			if exponent & 1 == 1 {
				result = result.wrapping_mul(base);
			}
			base = base.wrapping_mul(base);
			exponent >>= 1;
		}
		result
	}

	fn unsupported(&self, op: BinaryOp, right: &Self) -> String {
		format!("Operator {op} is not defined for {} and {}.", self.type_name(), right.type_name())
	}
}

/// Integer result of a negative exponent: the fraction truncates to zero
/// unless the base is 1 or -1.
fn negative_power(base: i64, exponent: i64) -> i64 {
	match base {
		1 => 1,
		-1 => if exponent % 2 == 0 { 1 } else { -1 },
		_ => 0,
	}
}

fn checked<T>(result: Option<T>, divide_by_zero: bool) -> Result<T, String> {
	result.ok_or_else(|| if divide_by_zero { DIVIDE_BY_ZERO } else { OVERFLOW }.to_string())
}

fn code_point(n: i64) -> Result<char, String> {
	u32::try_from(n).ok().and_then(char::from_u32).ok_or_else(|| format!("{n} is not a valid character code."))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn display() {
		assert_eq!(Int(-3).to_string(), "-3");
		assert_eq!(Double(2.0).to_string(), "2");
		assert_eq!(Double(0.5).to_string(), "0.5");
		assert_eq!(Bool(true).to_string(), "true");
		assert_eq!(Char('x').to_string(), "x");
		assert_eq!(Str("hi".into()).to_string(), "hi");
		assert_eq!(Null.to_string(), "");
	}

	#[test]
	fn integer_arithmetic() {
		assert_eq!(Int(7).binary_op(BinaryOp::Divide, &Int(2)), Ok(Int(3)));
		assert_eq!(Int(-7).binary_op(BinaryOp::Remainder, &Int(2)), Ok(Int(-1)));
		assert_eq!(Int(i32::MAX).binary_op(BinaryOp::Add, &Int(1)), Ok(Int(i32::MIN)));
		assert_eq!(Long(1).binary_op(BinaryOp::LeftShift, &Long(40)), Ok(Long(1 << 40)));
		assert_eq!(Int(1).binary_op(BinaryOp::LeftShift, &Int(33)), Ok(Int(2)));
		assert_eq!(Int(-8).binary_op(BinaryOp::RightShift, &Int(1)), Ok(Int(-4)));
		assert_eq!(Int(6).binary_op(BinaryOp::BitXor, &Int(3)), Ok(Int(5)));
	}

	#[test]
	fn division_failures() {
		assert_eq!(Int(7).binary_op(BinaryOp::Divide, &Int(0)), Err(DIVIDE_BY_ZERO.to_string()));
		assert_eq!(Long(7).binary_op(BinaryOp::Remainder, &Long(0)), Err(DIVIDE_BY_ZERO.to_string()));
		assert_eq!(Int(i32::MIN).binary_op(BinaryOp::Divide, &Int(-1)), Err(OVERFLOW.to_string()));
		assert_eq!(Double(1.0).binary_op(BinaryOp::Divide, &Double(0.0)), Ok(Double(f64::INFINITY)));
	}

	#[test]
	fn comparisons() {
		assert_eq!(Int(1).binary_op(BinaryOp::Less, &Int(2)), Ok(Bool(true)));
		assert_eq!(Char('a').binary_op(BinaryOp::GreaterEqual, &Char('b')), Ok(Bool(false)));
		assert_eq!(Double(f64::NAN).binary_op(BinaryOp::LessEqual, &Double(1.0)), Ok(Bool(false)));
		assert_eq!(Str("a".into()).binary_op(BinaryOp::Equal, &Str("a".into())), Ok(Bool(true)));
		assert_eq!(Null.binary_op(BinaryOp::NotEqual, &Str("a".into())), Ok(Bool(true)));
		assert!(Str("a".into()).binary_op(BinaryOp::Less, &Str("b".into())).is_err());
	}

	#[test]
	fn conversions() {
		assert_eq!(Double(1.9).convert(SemanticType::Int), Ok(Int(1)));
		assert_eq!(Double(-1.9).convert(SemanticType::Long), Ok(Long(-1)));
		assert_eq!(Long(1 << 32 | 5).convert(SemanticType::Int), Ok(Int(5)));
		assert_eq!(Char('A').convert(SemanticType::Int), Ok(Int(65)));
		assert_eq!(Int(97).convert(SemanticType::Char), Ok(Char('a')));
		assert_eq!(Int(5).convert(SemanticType::String), Ok(Str("5".into())));
		assert_eq!(Int(5).convert(SemanticType::Object), Ok(Int(5)));
		assert_eq!(Null.convert(SemanticType::String), Ok(Null));
		assert!(Int(-1).convert(SemanticType::Char).is_err());
		assert!(Str("5".into()).convert(SemanticType::Int).is_err());
		assert!(Null.convert(SemanticType::Int).is_err());
	}

	#[test]
	fn integer_powers() {
		assert_eq!(Value::int_pow(2, 10), 1024);
		assert_eq!(Value::int_pow(2, 31), i32::MIN);
		assert_eq!(Value::int_pow(5, 0), 1);
		assert_eq!(Value::int_pow(2, -1), 0);
		assert_eq!(Value::int_pow(-1, -3), -1);
		assert_eq!(Value::long_pow(3, 3), 27);
		assert_eq!(Value::long_pow(2, 40), 1 << 40);
		assert_eq!(Value::long_pow(1, i64::MAX), 1);
		assert_eq!(Value::long_pow(-1, -2), 1);
	}
}
