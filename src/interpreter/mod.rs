//! Runs lowered programs.
//!
//! The whole program is emitted into one IR block, compiled into a single
//! [`CompiledCallable`] and invoked once against a fresh [`Machine`]. When the
//! program's last statement leaves a value, that value is printed after the
//! run.

pub mod callable;
pub mod value;

use std::io::Write;

use callable::CompiledCallable;
use value::Value;

use crate::{
	emitter::Emitter,
	error::{RunError, runtime::RuntimeFailure},
	statement::Statement,
};

/// Slot storage and output sink a compiled callable runs against.
pub struct Machine<'w> {
	slots: Vec<Value>,
	out:   &'w mut dyn Write,
}

impl<'w> Machine<'w> {
	pub fn new(slot_count: usize, out: &'w mut dyn Write) -> Self { Self { slots: vec![Value::Unit; slot_count], out } }

	pub fn load(&self, index: usize) -> Result<Value, RuntimeFailure> {
		self.slots.get(index).cloned().ok_or_else(|| out_of_range(index))
	}

	pub fn store(&mut self, index: usize, value: Value) -> Result<(), RuntimeFailure> {
		let slot = self.slots.get_mut(index).ok_or_else(|| out_of_range(index))?;
		*slot = value;
		Ok(())
	}

	pub fn print(&mut self, value: &Value) -> std::io::Result<()> { writeln!(self.out, "{value}") }
}

fn out_of_range(index: usize) -> RuntimeFailure { RuntimeFailure::unlocated(format!("Slot {index} is out of range.")) }

/// Lower, compile and run `statements`, writing printed output to `out`.
pub fn compile_and_run(statements: &[Statement<'_>], out: &mut dyn Write) -> Result<(), RunError> {
	let program = Emitter::new().emit_program(statements)?;
	let has_value = program.root.r#type.is_some();
	let callable = CompiledCallable::compile(program);
	tracing::debug!(slots = callable.slot_count(), "program compiled");

	let mut machine = Machine::new(callable.slot_count(), out);
	let value = callable.invoke(&mut machine)?;
	if has_value {
		machine.print(&value).map_err(|e| RuntimeFailure::unlocated(format!("Failed write output: {e}")))?;
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{
		error::emitter::{EmitErrorKind, ErrorCategory},
		parser::parse,
		scanner::lex,
	};

	fn run(source: &str) -> Result<String, RunError> {
		let (tokens, diagnostics) = lex(source);
		assert!(!diagnostics.has_errors(), "{diagnostics}");
		let (statements, diagnostics) = parse(tokens);
		assert!(!diagnostics.has_errors(), "{diagnostics}");
		let mut out = Vec::new();
		compile_and_run(&statements, &mut out)?;
		Ok(String::from_utf8(out).unwrap())
	}

	fn output(source: &str) -> String { run(source).unwrap() }

	fn emit_error(source: &str) -> EmitErrorKind {
		match run(source) {
			Err(RunError::Emit(e)) => e.kind,
			other => panic!("expected an emit error, got {other:?}"),
		}
	}

	fn runtime_failure(source: &str) -> RuntimeFailure {
		match run(source) {
			Err(RunError::Runtime(failure)) => failure,
			other => panic!("expected a runtime failure, got {other:?}"),
		}
	}

	#[test]
	fn slots_outside_the_machine_fail() {
		let mut out = Vec::new();
		let mut machine = Machine::new(1, &mut out);
		assert_eq!(machine.store(0, Value::Int(4)), Ok(()));
		assert_eq!(machine.load(0), Ok(Value::Int(4)));
		assert_eq!(machine.load(1), Err(RuntimeFailure::unlocated("Slot 1 is out of range.")));
		assert_eq!(machine.store(1, Value::Int(5)), Err(RuntimeFailure::unlocated("Slot 1 is out of range.")));
	}

	#[test]
	fn arithmetic() {
		assert_eq!(output("int x = 5; print x + 1;"), "6\n");
		assert_eq!(output("double y = 1; print y / 2;"), "0.5\n");
		assert_eq!(output("print 7 / 2;"), "3\n");
		assert_eq!(output("print 7 % 3;"), "1\n");
		assert_eq!(output("print 1 + 3000000000;"), "3000000001\n");
		assert_eq!(output("print 2147483647 + 1;"), "-2147483648\n");
	}

	#[test]
	fn concatenation() {
		assert_eq!(output("string s = \"a\" + 1; print s;"), "a1\n");
		assert_eq!(output("print 1.5 + \"x\" + true;"), "1.5xtrue\n");
		assert_eq!(output("print 'c' + \"d\";"), "cd\n");
	}

	#[test]
	fn shadowing() {
		assert_eq!(output("{ int x = 1; { int x = 2; print x; } print x; }"), "2\n1\n");
	}

	#[test]
	fn duplicate_declaration_is_a_resolution_error() {
		let kind = emit_error("int x = 1; int x = 2;");
		assert_eq!(kind, EmitErrorKind::DuplicateDeclaration("x".into()));
		assert_eq!(kind.category(), ErrorCategory::Resolution);
	}

	#[test]
	fn emission_errors_stop_before_anything_runs() {
		let (tokens, _) = lex("print 1; print y;");
		let (statements, _) = parse(tokens);
		let mut out = Vec::new();
		assert!(compile_and_run(&statements, &mut out).is_err());
		assert!(out.is_empty());
	}

	#[test]
	fn increment_and_decrement() {
		assert_eq!(output("int x = 1; print x++; print x;"), "1\n2\n");
		assert_eq!(output("int x = 1; print ++x; print x;"), "2\n2\n");
		assert_eq!(output("double d = 0.5; d--; print d;"), "-0.5\n");
		assert_eq!(output("long l = 9; print --l;"), "8\n");
	}

	#[test]
	fn exponent_is_left_associative() {
		assert_eq!(output("print 2 ** 3 ** 2;"), "64\n");
		assert_eq!(output("print 2 ** -1;"), "0\n");
		assert_eq!(output("print 4 ** 0.5;"), "2\n");
		assert_eq!(output("long e = 40; print 2 ** e;"), "1099511627776\n");
	}

	#[test]
	fn compound_assignment() {
		assert_eq!(output("int a = 2; a **= 3; print a;"), "8\n");
		assert_eq!(output("long l = 5; l += 1; print l;"), "6\n");
		assert_eq!(output("int a = 10; a -= 4; a *= 2; a /= 3; a %= 3; print a;"), "1\n");
		assert_eq!(emit_error("int a = 1; a += 0.5;"), EmitErrorKind::AssignmentTypeMismatch {
			name:   "a".into(),
			value:  crate::emitter::SemanticType::Double,
			target: crate::emitter::SemanticType::Int,
		});
	}

	#[test]
	fn division_by_zero_fails_at_run_time() {
		let failure = runtime_failure("print 7 / 0;");
		assert_eq!(failure.line, Some(1));
		assert_eq!(failure.message, "Attempted to divide by zero.");

		let failure = runtime_failure("int x = 1;\n\nprint x % 0;");
		assert_eq!(failure.line, Some(3));
		let failure = runtime_failure("int min = -2147483647 - 1; print min / -1;");
		assert_eq!(failure.message, "Arithmetic operation resulted in an overflow.");
		assert_eq!(output("print 1.0 / 0;"), "inf\n");
	}

	#[test]
	fn output_before_a_failure_is_kept() {
		let (tokens, _) = lex("print 1; print 1 / 0; print 2;");
		let (statements, _) = parse(tokens);
		let mut out = Vec::new();
		assert!(matches!(compile_and_run(&statements, &mut out), Err(RunError::Runtime(_))));
		assert_eq!(out, b"1\n");
	}

	#[test]
	fn casts() {
		assert_eq!(output("int x = (int)1.5; print x;"), "1\n");
		assert_eq!(output("print (int)-2.7;"), "-2\n");
		assert_eq!(output("print (char)65;"), "A\n");
		assert_eq!(output("print (int)'a';"), "97\n");
		assert_eq!(output("print (string)true + \"!\";"), "true!\n");
		assert_eq!(output("object o = (object)5; print (long)o + 1;"), "6\n");
		assert_eq!(runtime_failure("object o = (object)\"5\"; print (int)o;").line, Some(1));
		assert_eq!(emit_error("int x = 1; print (bool)x;"), EmitErrorKind::InvalidConversion(
			crate::emitter::SemanticType::Int,
			crate::emitter::SemanticType::Bool,
		));
	}

	#[test]
	fn type_errors() {
		assert!(matches!(emit_error("int x = 1.5;"), EmitErrorKind::AssignmentTypeMismatch { .. }));
		assert!(matches!(emit_error("print 1.5 & 1;"), EmitErrorKind::UnsupportedIntegralPromotion(..)));
		assert!(matches!(emit_error("print \"a\" - 1;"), EmitErrorKind::UnsupportedPromotion(..)));
		assert_eq!(emit_error("print x;").category(), ErrorCategory::Resolution);
	}

	#[test]
	fn logic_and_bits() {
		assert_eq!(output("print true && 0;"), "false\n");
		assert_eq!(output("print 0 || 2.5;"), "true\n");
		assert_eq!(output("print !0;"), "true\n");
		assert_eq!(output("print ~5;"), "-6\n");
		assert_eq!(output("print 6 & 3 | 8 ^ 1;"), "11\n");
		assert_eq!(output("print 1 << 33;"), "2\n");
		assert_eq!(output("print -16 >> 2;"), "-4\n");
	}

	#[test]
	fn comparisons() {
		assert_eq!(output("print 1 < 2.5;"), "true\n");
		assert_eq!(output("print 2 >= 2;"), "true\n");
		assert_eq!(output("print \"a\" == \"a\";"), "true\n");
		assert_eq!(output("print 'a' < 'b';"), "true\n");
		assert_eq!(output("print 1 != 1.0;"), "false\n");
	}

	#[test]
	fn defaults() {
		assert_eq!(output("int i; double d; bool b; print i; print d; print b;"), "0\n0\nfalse\n");
		assert_eq!(output("string s; print s;"), "\n");
		assert_eq!(output("{ int x = 3; } { int y; print y; }"), "0\n");
	}

	#[test]
	fn last_value_is_printed() {
		assert_eq!(output("int x = 5;"), "5\n");
		assert_eq!(output("1 + 2;"), "3\n");
		assert_eq!(output("int x = 5; print x;"), "5\n");
		assert_eq!(output("{ 1; 2; }"), "2\n");
		assert_eq!(output(""), "");
	}

	#[test]
	fn self_reference_in_initializer_sees_the_default() {
		assert_eq!(output("int x = x + 1; print x;"), "1\n");
	}
}
