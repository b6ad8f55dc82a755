use std::{collections::HashMap, iter};

use crate::{emitter::ir::Slot, error::emitter::EmitErrorKind};

type Frame = HashMap<String, Slot>;

/// Lexical scopes seen while emitting: a stack of frames mapping names to
/// slots. The global frame sits at the bottom and stays for the whole run.
#[derive(Debug, Clone, Default)]
pub struct ScopeStack {
	globals: Frame,
	/// Block frames, innermost last.
	blocks:  Vec<Frame>,
}

impl ScopeStack {
	pub fn new() -> Self { Self::default() }

	/// Enter a block.
	pub fn push(&mut self) { self.blocks.push(Frame::new()) }

	/// Leave a block. The global frame is never popped, `None` then.
	pub fn pop(&mut self) -> Option<Frame> { self.blocks.pop() }

	/// Declare in the innermost frame. Shadowing an outer frame is fine, a
	/// second declaration in the same frame is not.
	pub fn declare(&mut self, slot: Slot) -> Result<(), EmitErrorKind> {
		let frame = self.blocks.last_mut().unwrap_or(&mut self.globals);
		if frame.contains_key(&slot.name) {
			return Err(EmitErrorKind::DuplicateDeclaration(slot.name));
		}
		frame.insert(slot.name.clone(), slot);
		Ok(())
	}

	/// Find `name`, innermost frame first.
	pub fn resolve(&self, name: &str) -> Result<&Slot, EmitErrorKind> {
		self
			.blocks
			.iter()
			.rev()
			.chain(iter::once(&self.globals))
			.find_map(|frame| frame.get(name))
			.ok_or_else(|| EmitErrorKind::UndefinedVariable(name.to_string()))
	}

	/// Slots of the global frame, in declaration order.
	pub fn global_slots(&self) -> Vec<Slot> {
		let mut slots = self.globals.values().cloned().collect::<Vec<_>>();
		slots.sort_by_key(|slot| slot.index);
		slots
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::emitter::SemanticType;

	fn slot(index: usize, name: &str) -> Slot { Slot { index, r#type: SemanticType::Int, name: name.to_string() } }

	#[test]
	fn declare_and_resolve() {
		let mut scopes = ScopeStack::new();
		scopes.declare(slot(0, "x")).unwrap();
		assert_eq!(scopes.resolve("x").unwrap().index, 0);
		assert_eq!(scopes.resolve("y"), Err(EmitErrorKind::UndefinedVariable("y".into())));
	}

	#[test]
	fn duplicate_in_same_frame() {
		let mut scopes = ScopeStack::new();
		scopes.declare(slot(0, "x")).unwrap();
		assert_eq!(scopes.declare(slot(1, "x")), Err(EmitErrorKind::DuplicateDeclaration("x".into())));
	}

	#[test]
	fn shadowing() {
		let mut scopes = ScopeStack::new();
		scopes.declare(slot(0, "x")).unwrap();
		scopes.push();
		scopes.declare(slot(1, "x")).unwrap();
		assert_eq!(scopes.resolve("x").unwrap().index, 1);
		let popped = scopes.pop().unwrap();
		assert!(popped.contains_key("x"));
		assert_eq!(scopes.resolve("x").unwrap().index, 0);
	}

	#[test]
	fn inner_frame_sees_outer() {
		let mut scopes = ScopeStack::new();
		scopes.declare(slot(0, "x")).unwrap();
		scopes.push();
		scopes.push();
		assert_eq!(scopes.resolve("x").unwrap().index, 0);
	}

	#[test]
	fn global_frame_is_never_popped() {
		let mut scopes = ScopeStack::new();
		assert!(scopes.pop().is_none());
		scopes.declare(slot(0, "x")).unwrap();
		assert!(scopes.pop().is_none());
		assert_eq!(scopes.resolve("x").unwrap().index, 0);
	}

	#[test]
	fn globals_in_declaration_order() {
		let mut scopes = ScopeStack::new();
		for (index, name) in ["c", "a", "b"].into_iter().enumerate() {
			scopes.declare(slot(index, name)).unwrap();
		}
		scopes.push();
		scopes.declare(slot(3, "inner")).unwrap();
		let names = scopes.global_slots().into_iter().map(|slot| slot.name).collect::<Vec<_>>();
		assert_eq!(names, vec!["c", "a", "b"]);
	}
}
