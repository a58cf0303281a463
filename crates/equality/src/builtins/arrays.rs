//! Element-wise rules for arrays of scalars, one per [`ScalarKind`].

use std::hash::{Hash, Hasher};
use std::sync::Arc;

use super::numeric::{canonical_f32, canonical_f64};
use crate::compare::{self, ScalarEq};
use crate::error::EqualityError;
use crate::hash::{HashRegistrar, HashRegistry, HashRule};
use crate::registry::{EqualityRegistrar, EqualityRegistry, EqualityRule};
use crate::value::{Comparable, ScalarKind, Scalars, Shape};

/// Compares two scalar arrays of one element kind.
struct ScalarArrayRule {
	kind: ScalarKind,
}

impl EqualityRule for ScalarArrayRule {
	fn are_equal(&self, _registry: &EqualityRegistry, a: &dyn Comparable, b: &dyn Comparable) -> bool {
		match (scalars_of(a), scalars_of(b)) {
			(Some(x), Some(y)) if x.kind() == self.kind && y.kind() == self.kind => scalars_equal(x, y),
			_ => a.native_eq(b),
		}
	}
}

impl HashRule for ScalarArrayRule {
	fn hash(&self, _registry: &HashRegistry, value: &dyn Comparable, state: &mut dyn Hasher) {
		match scalars_of(value) {
			Some(scalars) if scalars.kind() == self.kind => hash_scalars(scalars, state),
			_ => value.native_hash(state),
		}
	}
}

pub(super) fn array_equality(registrar: &EqualityRegistrar<'_>) -> Result<(), EqualityError> {
	for kind in ScalarKind::ALL {
		registrar.register_array(kind, Arc::new(ScalarArrayRule { kind }));
	}
	Ok(())
}

pub(super) fn array_hash(registrar: &HashRegistrar<'_>) -> Result<(), EqualityError> {
	for kind in ScalarKind::ALL {
		registrar.register_array(kind, Arc::new(ScalarArrayRule { kind }));
	}
	Ok(())
}

fn scalars_of(value: &dyn Comparable) -> Option<Scalars<'_>> {
	match value.shape()? {
		Shape::Array(array) => array.scalars(),
		_ => None,
	}
}

fn slices_equal<T: ScalarEq>(a: &[T], b: &[T]) -> bool {
	a.len() == b.len() && a.iter().zip(b).all(|(x, y)| compare::equals(*x, *y))
}

fn scalars_equal(a: Scalars<'_>, b: Scalars<'_>) -> bool {
	match (a, b) {
		(Scalars::Bool(a), Scalars::Bool(b)) => slices_equal(a, b),
		(Scalars::Char(a), Scalars::Char(b)) => slices_equal(a, b),
		(Scalars::I8(a), Scalars::I8(b)) => slices_equal(a, b),
		(Scalars::I16(a), Scalars::I16(b)) => slices_equal(a, b),
		(Scalars::I32(a), Scalars::I32(b)) => slices_equal(a, b),
		(Scalars::I64(a), Scalars::I64(b)) => slices_equal(a, b),
		(Scalars::Isize(a), Scalars::Isize(b)) => slices_equal(a, b),
		(Scalars::U8(a), Scalars::U8(b)) => slices_equal(a, b),
		(Scalars::U16(a), Scalars::U16(b)) => slices_equal(a, b),
		(Scalars::U32(a), Scalars::U32(b)) => slices_equal(a, b),
		(Scalars::U64(a), Scalars::U64(b)) => slices_equal(a, b),
		(Scalars::Usize(a), Scalars::Usize(b)) => slices_equal(a, b),
		(Scalars::F32(a), Scalars::F32(b)) => slices_equal(a, b),
		(Scalars::F64(a), Scalars::F64(b)) => slices_equal(a, b),
		_ => false,
	}
}

fn hash_scalars(scalars: Scalars<'_>, mut state: &mut dyn Hasher) {
	match scalars {
		Scalars::Bool(values) => values.hash(&mut state),
		Scalars::Char(values) => values.hash(&mut state),
		Scalars::I8(values) => values.hash(&mut state),
		Scalars::I16(values) => values.hash(&mut state),
		Scalars::I32(values) => values.hash(&mut state),
		Scalars::I64(values) => values.hash(&mut state),
		Scalars::Isize(values) => values.hash(&mut state),
		Scalars::U8(values) => values.hash(&mut state),
		Scalars::U16(values) => values.hash(&mut state),
		Scalars::U32(values) => values.hash(&mut state),
		Scalars::U64(values) => values.hash(&mut state),
		Scalars::Usize(values) => values.hash(&mut state),
		Scalars::F32(values) => {
			state.write_usize(values.len());
			for value in values {
				state.write_u32(canonical_f32(*value));
			}
		}
		Scalars::F64(values) => {
			state.write_usize(values.len());
			for value in values {
				state.write_u64(canonical_f64(*value));
			}
		}
	}
}
