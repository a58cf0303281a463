//! Structural equality across container implementations.
//!
//! # Role
//!
//! [`CollectionEquality`] decides whether two containers hold the same data
//! regardless of their concrete types: a `Vec` and a `LinkedList` with the
//! same elements in the same order are equal here, though never under
//! [`EqualityRegistry::equals`]. Leaves are compared through the registry;
//! nested containers recurse into the structural rules.
//!
//! # Invariants
//!
//! - Both operands of [`CollectionEquality::equals`] must be containers; a
//!   non-container is an error naming the operand, never a plain `false`.
//! - Containers of different [`ContainerKind`]s are unequal.
//! - Set and map membership uses registry-aware pairwise comparison, never
//!   the second container's own lookup.

use crate::compare::identity_equal;
use crate::error::{EqualityError, Operand};
use crate::registry::EqualityRegistry;
use crate::value::{Comparable, Component, Item, Items, Shape, shape_of};

/// Structural comparison bound to a registry.
#[derive(Clone, Copy)]
pub struct CollectionEquality<'r> {
	registry: &'r EqualityRegistry,
}

/// One position of a value coerced to a list.
enum Slot<'a> {
	Item(Item<'a>),
	Entry(Item<'a>, Item<'a>),
}

impl<'r> CollectionEquality<'r> {
	pub fn new(registry: &'r EqualityRegistry) -> Self {
		Self { registry }
	}

	pub fn registry(&self) -> &'r EqualityRegistry {
		self.registry
	}

	/// Whether `item` is a non-null container.
	pub fn is_container(&self, item: Item<'_>) -> bool {
		shape_of(item).is_some()
	}

	/// Structural equality of two containers.
	pub fn equals(&self, x: Item<'_>, y: Item<'_>) -> Result<bool, EqualityError> {
		let (x, y) = match (x, y) {
			(None, None) => return Ok(true),
			(Some(x), Some(y)) => (x, y),
			_ => return Ok(false),
		};
		if same_object(x, y) {
			return Ok(true);
		}
		let xs = classify(x, Operand::First)?;
		let ys = classify(y, Operand::Second)?;
		Ok(self.shapes_equal(x, y, xs, ys))
	}

	/// Compares two values as ordered lists.
	///
	/// Maps become lists of entries, every other container its elements in
	/// iteration order, and a non-container a single-element list.
	pub fn equals_as_list(&self, x: Item<'_>, y: Item<'_>) -> bool {
		let (x, y) = match (x, y) {
			(None, None) => return true,
			(Some(x), Some(y)) => (x, y),
			_ => return false,
		};
		if same_object(x, y) {
			return true;
		}
		let xs = as_list(x);
		let ys = as_list(y);
		xs.len() == ys.len() && xs.iter().zip(&ys).all(|(a, b)| self.slots_equal(a, b))
	}

	/// Element comparison: structural when both sides are containers,
	/// registry dispatch otherwise.
	pub fn child_equals(&self, a: Item<'_>, b: Item<'_>) -> bool {
		match (a, b) {
			(Some(x), Some(y)) => match (x.shape(), y.shape()) {
				(Some(xs), Some(ys)) => same_object(x, y) || self.shapes_equal(x, y, xs, ys),
				_ => self.registry.equals(x, y),
			},
			_ => self.registry.are_equal(a, b),
		}
	}

	fn shapes_equal(&self, x: &dyn Comparable, y: &dyn Comparable, xs: Shape<'_>, ys: Shape<'_>) -> bool {
		if xs.kind() != ys.kind() {
			return false;
		}
		match (xs, ys) {
			(Shape::List(a), Shape::List(b)) => a.len() == b.len() && self.sequences_equal(a.items(), b.items()),
			(Shape::Set(a), Shape::Set(b)) => a.len() == b.len() && self.unordered_equal(a.items(), b.items()),
			(Shape::Map(a), Shape::Map(b)) => {
				a.len() == b.len() && self.entries_equal(a.entries().collect(), b.entries().collect())
			}
			(Shape::Array(a), Shape::Array(b)) => {
				if a.component() == Component::Container && b.component() == Component::Container {
					a.len() == b.len() && self.sequences_equal(a.items(), b.items())
				} else {
					self.registry.equals(x, y)
				}
			}
			(Shape::Iterator(a), Shape::Iterator(b))
			| (Shape::Iterable(a), Shape::Iterable(b))
			| (Shape::Enumeration(a), Shape::Enumeration(b)) => self.sequences_equal(a.items(), b.items()),
			_ => false,
		}
	}

	/// Pairwise comparison; both sequences must end together.
	fn sequences_equal(&self, mut xs: Items<'_>, mut ys: Items<'_>) -> bool {
		loop {
			match (xs.next(), ys.next()) {
				(None, None) => return true,
				(Some(x), Some(y)) if self.child_equals(x, y) => {}
				_ => return false,
			}
		}
	}

	/// Every element of `xs` matches a distinct element of `ys`.
	fn unordered_equal(&self, xs: Items<'_>, ys: Items<'_>) -> bool {
		let ys: Vec<Item<'_>> = ys.collect();
		let mut matched = vec![false; ys.len()];
		for x in xs {
			match (0..ys.len()).find(|&index| !matched[index] && self.child_equals(x, ys[index])) {
				Some(index) => matched[index] = true,
				None => return false,
			}
		}
		true
	}

	/// Every key of `xs` is present in `ys` with an equal value. A key mapped
	/// to null only matches a key mapped to null.
	fn entries_equal(&self, xs: Vec<(Item<'_>, Item<'_>)>, ys: Vec<(Item<'_>, Item<'_>)>) -> bool {
		xs.iter().all(|(key, value)| {
			ys.iter()
				.find(|(other, _)| self.child_equals(*key, *other))
				.is_some_and(|(_, other)| self.child_equals(*value, *other))
		})
	}

	fn slots_equal(&self, a: &Slot<'_>, b: &Slot<'_>) -> bool {
		match (a, b) {
			(Slot::Item(x), Slot::Item(y)) => self.child_equals(*x, *y),
			(Slot::Entry(xk, xv), Slot::Entry(yk, yv)) => self.child_equals(*xk, *yk) && self.child_equals(*xv, *yv),
			_ => false,
		}
	}
}

/// Identity that also requires matching runtime types: an array shares its
/// address with its first element, a struct with its first field.
fn same_object(x: &dyn Comparable, y: &dyn Comparable) -> bool {
	x.type_key() == y.type_key() && identity_equal(x, y)
}

fn classify(value: &dyn Comparable, operand: Operand) -> Result<Shape<'_>, EqualityError> {
	value.shape().ok_or_else(|| EqualityError::NotAContainer {
		operand,
		type_name: value.type_key().name(),
	})
}

fn as_list(value: &dyn Comparable) -> Vec<Slot<'_>> {
	match value.shape() {
		Some(Shape::Map(map)) => map.entries().map(|(key, val)| Slot::Entry(key, val)).collect(),
		Some(shape) => match shape.items() {
			Some(items) => items.map(Slot::Item).collect(),
			None => vec![Slot::Item(Some(value))],
		},
		None => vec![Slot::Item(Some(value))],
	}
}

impl std::fmt::Debug for CollectionEquality<'_> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("CollectionEquality").finish_non_exhaustive()
	}
}
