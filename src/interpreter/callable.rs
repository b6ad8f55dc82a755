use std::fmt::Debug;

use crate::{
	emitter::ir::{Helper, Ir, IrKind, LogicalOp, Program},
	error::runtime::RuntimeFailure,
	interpreter::{Machine, value::Value},
};

type Compiled = Box<dyn Fn(&mut Machine<'_>) -> Result<Value, RuntimeFailure>>;

/// A program compiled into a tree of closures, one per IR node.
pub struct CompiledCallable {
	body:       Compiled,
	slot_count: usize,
}

impl Debug for CompiledCallable {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("CompiledCallable").field("body", &"Closure").field("slot_count", &self.slot_count).finish()
	}
}

impl CompiledCallable {
	pub fn compile(program: Program) -> Self { Self { body: compile(program.root), slot_count: program.slot_count } }

	/// Slots a machine needs to run this callable.
	pub fn slot_count(&self) -> usize { self.slot_count }

	pub fn invoke(&self, machine: &mut Machine<'_>) -> Result<Value, RuntimeFailure> { (self.body)(machine) }
}

fn compile(ir: Ir) -> Compiled {
	let line = ir.line;
	match ir.kind {
		IrKind::Constant(value) => Box::new(move |_| Ok(value.clone())),
		IrKind::Load(slot) => Box::new(move |machine| machine.load(slot.index)),
		IrKind::Store { slot, value } => {
			let value = compile(*value);
			Box::new(move |machine| {
				let value = value(machine)?;
				machine.store(slot.index, value.clone())?;
				Ok(value)
			})
		}
		IrKind::Convert(inner) => {
			let inner = compile(*inner);
			let Some(target) = ir.r#type else { return inner };
			Box::new(move |machine| inner(machine)?.convert(target).map_err(at(line)))
		}
		IrKind::Binary { operator, left, right } => {
			let (left, right) = (compile(*left), compile(*right));
			Box::new(move |machine| {
				let left = left(machine)?;
				let right = right(machine)?;
				left.binary_op(operator, &right).map_err(at(line))
			})
		}
		IrKind::Logical { operator, left, right } => {
			let (left, right) = (compile(*left), compile(*right));
			Box::new(move |machine| {
				let left = is_true(&left(machine)?);
				match operator {
					LogicalOp::And if !left => Ok(Value::Bool(false)),
					LogicalOp::Or if left => Ok(Value::Bool(true)),
					_ => right(machine),
				}
			})
		}
		IrKind::Unary { operator, operand } => {
			let operand = compile(*operand);
			Box::new(move |machine| operand(machine)?.unary_op(operator).map_err(at(line)))
		}
		IrKind::Condition { test, then_branch, else_branch } => {
			let (test, then_branch, else_branch) = (compile(*test), compile(*then_branch), compile(*else_branch));
			Box::new(move |machine| if is_true(&test(machine)?) { then_branch(machine) } else { else_branch(machine) })
		}
		IrKind::Call { helper, arguments } => {
			let arguments = arguments.into_iter().map(compile).collect::<Vec<_>>();
			Box::new(move |machine| {
				let values = arguments.iter().map(|argument| argument(machine)).collect::<Result<Vec<_>, _>>()?;
				call_helper(helper, &values).map_err(at(line))
			})
		}
		IrKind::Print(inner) => {
			let inner = compile(*inner);
			Box::new(move |machine| {
				let value = inner(machine)?;
				machine.print(&value).map_err(|e| RuntimeFailure::new(line, format!("Failed write output: {e}")))?;
				Ok(Value::Unit)
			})
		}
		IrKind::Block { slots, body } => {
			let defaults =
				slots.into_iter().map(|slot| (slot.index, Value::default_for(slot.r#type))).collect::<Vec<_>>();
			let body = body.into_iter().map(compile).collect::<Vec<_>>();
			Box::new(move |machine| {
				for (index, default) in &defaults {
					machine.store(*index, default.clone())?;
				}
				let mut last = Value::Unit;
				for child in &body {
					last = child(machine)?;
				}
				Ok(last)
			})
		}
	}
}

fn at(line: usize) -> impl Fn(String) -> RuntimeFailure { move |message| RuntimeFailure::new(line, message) }

fn is_true(value: &Value) -> bool { matches!(value, Value::Bool(true)) }

fn call_helper(helper: Helper, arguments: &[Value]) -> Result<Value, String> {
	match (helper, arguments) {
		(Helper::IntPow, [Value::Int(base), Value::Int(exponent)]) => Ok(Value::Int(Value::int_pow(*base, *exponent))),
		(Helper::LongPow, [Value::Long(base), Value::Long(exponent)]) => {
			Ok(Value::Long(Value::long_pow(*base, *exponent)))
		}
		(Helper::FloatPow, [Value::Double(base), Value::Double(exponent)]) => Ok(Value::Double(base.powf(*exponent))),
		(Helper::Concat, [left, right]) => Ok(Value::Str(format!("{left}{right}"))),
		_ => {
			let types = arguments.iter().map(Value::type_name).collect::<Vec<_>>();
			Err(format!("Invalid arguments to {helper:?}: {}", types.join(", ")))
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::emitter::{
		SemanticType,
		ir::{BinaryOp, Slot},
	};

	fn run(root: Ir, slot_count: usize) -> (Result<Value, RuntimeFailure>, String) {
		let mut out = Vec::new();
		let callable = CompiledCallable::compile(Program { root, slot_count });
		let result = callable.invoke(&mut Machine::new(callable.slot_count(), &mut out));
		(result, String::from_utf8(out).unwrap())
	}

	fn int(n: i32) -> Ir { Ir::constant(Value::Int(n), SemanticType::Int, 1) }

	#[test]
	fn store_then_load() {
		let slot = Slot { index: 0, r#type: SemanticType::Int, name: "x".into() };
		let body = vec![Ir::store(slot.clone(), int(7), 1), Ir::load(slot.clone(), 1)];
		let (result, _) = run(Ir::block(vec![slot], body, 1), 1);
		assert_eq!(result, Ok(Value::Int(7)));
	}

	#[test]
	fn load_past_the_slot_count_fails() {
		let slot = Slot { index: 2, r#type: SemanticType::Int, name: "x".into() };
		let failure = run(Ir::load(slot, 1), 2).0.unwrap_err();
		assert_eq!(failure.message, "Slot 2 is out of range.");
	}

	#[test]
	fn block_resets_its_slots() {
		let slot = Slot { index: 0, r#type: SemanticType::Long, name: "x".into() };
		let inner = Ir::block(vec![slot.clone()], vec![Ir::load(slot.clone(), 1)], 1);
		let outer = Ir::store(slot.clone(), Ir::constant(Value::Long(3), SemanticType::Long, 1), 1);
		let root = Ir::block(Vec::new(), vec![outer, inner], 1);
		assert_eq!(run(root, 1).0, Ok(Value::Long(0)));
	}

	#[test]
	fn logical_short_circuits() {
		let failing = Ir::new(
			IrKind::Binary { operator: BinaryOp::Divide, left: Box::new(int(1)), right: Box::new(int(0)) },
			Some(SemanticType::Int),
			4,
		);
		let tested = Ir::new(
			IrKind::Binary { operator: BinaryOp::NotEqual, left: Box::new(failing), right: Box::new(int(0)) },
			Some(SemanticType::Bool),
			4,
		);
		let bool_constant = |b| Ir::constant(Value::Bool(b), SemanticType::Bool, 1);
		let logical = |operator, left| {
			let kind = IrKind::Logical { operator, left: Box::new(left), right: Box::new(tested.clone()) };
			Ir::new(kind, Some(SemanticType::Bool), 1)
		};

		assert_eq!(run(logical(LogicalOp::And, bool_constant(false)), 0).0, Ok(Value::Bool(false)));
		assert_eq!(run(logical(LogicalOp::Or, bool_constant(true)), 0).0, Ok(Value::Bool(true)));
		let failure = run(logical(LogicalOp::And, bool_constant(true)), 0).0.unwrap_err();
		assert_eq!(failure.line, Some(4));
	}

	#[test]
	fn print_writes_a_line() {
		let print = |value| Ir::new(IrKind::Print(Box::new(value)), None, 1);
		let two = Ir::constant(Value::Str("two".into()), SemanticType::String, 1);
		let root = Ir::block(Vec::new(), vec![print(int(1)), print(two)], 1);
		let (result, out) = run(root, 0);
		assert_eq!(result, Ok(Value::Unit));
		assert_eq!(out, "1\ntwo\n");
	}

	#[test]
	fn helpers() {
		assert_eq!(call_helper(Helper::IntPow, &[Value::Int(2), Value::Int(10)]), Ok(Value::Int(1024)));
		assert_eq!(call_helper(Helper::LongPow, &[Value::Long(2), Value::Long(40)]), Ok(Value::Long(1 << 40)));
		assert_eq!(call_helper(Helper::FloatPow, &[Value::Double(4.0), Value::Double(0.5)]), Ok(Value::Double(2.0)));
		assert_eq!(call_helper(Helper::Concat, &[Value::Str("a".into()), Value::Int(1)]), Ok(Value::Str("a1".into())));
		assert_eq!(call_helper(Helper::Concat, &[Value::Null, Value::Bool(true)]), Ok(Value::Str("true".into())));
		assert!(call_helper(Helper::IntPow, &[Value::Long(2), Value::Int(1)]).is_err());
	}

	#[test]
	fn failed_unboxing_carries_the_line() {
		let boxed = Ir::constant(Value::Str("5".into()), SemanticType::Object, 9);
		let cast = Ir::new(IrKind::Convert(Box::new(boxed)), Some(SemanticType::Int), 9);
		let failure = run(cast, 0).0.unwrap_err();
		assert_eq!(failure.line, Some(9));
	}
}
