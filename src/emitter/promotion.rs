//! Type promotion rules.
//!
//! The numeric lattice is `int ⊂ long ⊂ double`. Binary operators pick one
//! common operand type from it according to their category, and the emitter
//! wraps each side in a conversion to that type. `bool`, `char`, `string` and
//! `object` sit outside the lattice.

use crate::{
	emitter::{
		SemanticType,
		ir::{BinaryOp, Ir, IrKind, OperatorCategory},
	},
	error::emitter::EmitErrorKind,
	interpreter::value::Value,
};

type Promotion = fn(SemanticType, SemanticType) -> Result<SemanticType, EmitErrorKind>;

/// Highest common lattice type of two numeric types.
pub fn promote_numeric(left: SemanticType, right: SemanticType) -> Result<SemanticType, EmitErrorKind> {
	match (left.rank(), right.rank()) {
		(Some(l), Some(r)) => Ok(if l >= r { left } else { right }),
		_ => Err(EmitErrorKind::UnsupportedPromotion(left, right)),
	}
}

/// Common type for bitwise and shift operators. A `double` is rejected rather
/// than narrowed.
pub fn promote_integral(left: SemanticType, right: SemanticType) -> Result<SemanticType, EmitErrorKind> {
	if !left.is_integral() || !right.is_integral() {
		return Err(EmitErrorKind::UnsupportedIntegralPromotion(left, right));
	}
	promote_numeric(left, right)
}

/// Common type for equality and relational operators.
pub fn promote_comparison(left: SemanticType, right: SemanticType) -> Result<SemanticType, EmitErrorKind> {
	if left == right {
		return Ok(left);
	}
	promote_numeric(left, right).map_err(|_| EmitErrorKind::UnsupportedComparison(left, right))
}

pub fn promotion_for(category: OperatorCategory) -> Promotion {
	match category {
		OperatorCategory::Arithmetic => promote_numeric,
		OperatorCategory::Bitwise => promote_integral,
		OperatorCategory::Comparison => promote_comparison,
	}
}

/// Whether a value of type `from` may be stored in a `to` slot without a cast.
/// Only widening along the lattice is implicit.
pub fn can_convert(from: SemanticType, to: SemanticType) -> bool {
	use SemanticType::*;
	from == to || matches!((from, to), (Int, Long) | (Int, Double) | (Long, Double))
}

/// Whether `(to)value` is a legal cast from `from`.
pub fn explicit_conversion(from: SemanticType, to: SemanticType) -> bool {
	use SemanticType::*;
	let numeric_or_char = |t: SemanticType| t.is_numeric() || t == Char;
	from == to || to == Object || from == Object || to == String || (numeric_or_char(from) && numeric_or_char(to))
}

/// Static type of `ir`, failing when the node has no value.
pub fn value_type(ir: &Ir) -> Result<SemanticType, EmitErrorKind> { ir.r#type.ok_or(EmitErrorKind::NoValue) }

/// Numeric operand; `bool` becomes 1 or 0.
pub fn ensure_numeric(ir: Ir) -> Result<Ir, EmitErrorKind> {
	match value_type(&ir)? {
		r#type if r#type.is_numeric() => Ok(ir),
		SemanticType::Bool => Ok(bool_to_int(ir)),
		other => Err(EmitErrorKind::NotNumeric(other)),
	}
}

/// Integral operand; `double` truncates to `int`, `bool` becomes 1 or 0.
pub fn ensure_integral(ir: Ir) -> Result<Ir, EmitErrorKind> {
	match value_type(&ir)? {
		SemanticType::Int | SemanticType::Long => Ok(ir),
		SemanticType::Double => Ok(ir.convert(SemanticType::Int)),
		SemanticType::Bool => Ok(bool_to_int(ir)),
		other => Err(EmitErrorKind::NotIntegral(other)),
	}
}

/// Boolean operand; a number is true when it is not zero.
pub fn ensure_boolean(ir: Ir) -> Result<Ir, EmitErrorKind> {
	let line = ir.line;
	match value_type(&ir)? {
		SemanticType::Bool => Ok(ir),
		r#type if r#type.is_numeric() => {
			let zero = Ir::constant(Value::default_for(r#type), r#type, line);
			let kind = IrKind::Binary { operator: BinaryOp::NotEqual, left: Box::new(ir), right: Box::new(zero) };
			Ok(Ir::new(kind, Some(SemanticType::Bool), line))
		}
		other => Err(EmitErrorKind::NotBoolean(other)),
	}
}

fn bool_to_int(ir: Ir) -> Ir {
	let line = ir.line;
	let kind = IrKind::Condition {
		test:        Box::new(ir),
		then_branch: Box::new(Ir::constant(Value::Int(1), SemanticType::Int, line)),
		else_branch: Box::new(Ir::constant(Value::Int(0), SemanticType::Int, line)),
	};
	Ir::new(kind, Some(SemanticType::Int), line)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::emitter::SemanticType::*;

	const NUMERIC: [SemanticType; 3] = [Int, Long, Double];
	const ALL: [SemanticType; 7] = [Int, Long, Double, Bool, String, Char, Object];

	fn constant(r#type: SemanticType) -> Ir { Ir::constant(Value::default_for(r#type), r#type, 1) }

	#[test]
	fn numeric_promotion_is_symmetric() {
		for a in NUMERIC {
			for b in NUMERIC {
				assert_eq!(promote_numeric(a, b), promote_numeric(b, a), "{a} {b}");
			}
		}
		assert_eq!(promote_numeric(Int, Long), Ok(Long));
		assert_eq!(promote_numeric(Long, Double), Ok(Double));
		assert_eq!(promote_numeric(Int, Int), Ok(Int));
	}

	#[test]
	fn numeric_promotion_rejects_non_numeric() {
		for other in [Bool, String, Char, Object] {
			assert_eq!(promote_numeric(Int, other), Err(EmitErrorKind::UnsupportedPromotion(Int, other)));
		}
	}

	#[test]
	fn integral_promotion_never_narrows() {
		assert_eq!(promote_integral(Int, Long), Ok(Long));
		assert_eq!(promote_integral(Int, Int), Ok(Int));
		assert_eq!(promote_integral(Double, Int), Err(EmitErrorKind::UnsupportedIntegralPromotion(Double, Int)));
		assert!(promote_integral(Bool, Int).is_err());
	}

	#[test]
	fn comparison_promotion() {
		for t in ALL {
			assert_eq!(promote_comparison(t, t), Ok(t));
		}
		assert_eq!(promote_comparison(Int, Double), Ok(Double));
		assert_eq!(promote_comparison(String, Int), Err(EmitErrorKind::UnsupportedComparison(String, Int)));
		assert_eq!(promote_comparison(Bool, Int), Err(EmitErrorKind::UnsupportedComparison(Bool, Int)));
	}

	#[test]
	fn strategy_by_category() {
		assert_eq!(promotion_for(OperatorCategory::Arithmetic)(Int, Double), Ok(Double));
		assert!(promotion_for(OperatorCategory::Bitwise)(Int, Double).is_err());
		assert_eq!(promotion_for(OperatorCategory::Comparison)(Bool, Bool), Ok(Bool));
	}

	#[test]
	fn assignment_only_widens() {
		assert!(can_convert(Int, Long));
		assert!(can_convert(Int, Double));
		assert!(can_convert(Long, Double));
		assert!(can_convert(String, String));
		assert!(!can_convert(Double, Int));
		assert!(!can_convert(Long, Int));
		assert!(!can_convert(Int, String));
		assert!(!can_convert(Int, Object));
		assert!(!can_convert(Bool, Int));
	}

	#[test]
	fn legal_casts() {
		assert!(explicit_conversion(Double, Int));
		assert!(explicit_conversion(Char, Int));
		assert!(explicit_conversion(Int, Char));
		assert!(explicit_conversion(Bool, String));
		assert!(explicit_conversion(Object, Long));
		assert!(explicit_conversion(Bool, Object));
		assert!(!explicit_conversion(Bool, Int));
		assert!(!explicit_conversion(String, Int));
		assert!(!explicit_conversion(Int, Bool));
	}

	#[test]
	fn coercions() {
		assert_eq!(ensure_numeric(constant(Long)).unwrap().r#type, Some(Long));
		assert_eq!(ensure_numeric(constant(Bool)).unwrap().r#type, Some(Int));
		assert_eq!(ensure_numeric(constant(String)), Err(EmitErrorKind::NotNumeric(String)));

		let truncated = ensure_integral(constant(Double)).unwrap();
		assert_eq!(truncated.r#type, Some(Int));
		assert!(matches!(truncated.kind, IrKind::Convert(_)));
		assert_eq!(ensure_integral(constant(Char)), Err(EmitErrorKind::NotIntegral(Char)));

		let tested = ensure_boolean(constant(Double)).unwrap();
		assert_eq!(tested.r#type, Some(Bool));
		assert!(matches!(tested.kind, IrKind::Binary { operator: BinaryOp::NotEqual, .. }));
		assert_eq!(ensure_boolean(constant(String)), Err(EmitErrorKind::NotBoolean(String)));

		let void = Ir::new(IrKind::Print(Box::new(constant(Int))), None, 1);
		assert_eq!(ensure_boolean(void), Err(EmitErrorKind::NoValue));
	}
}
