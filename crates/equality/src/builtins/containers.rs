//! Structural rules on the container interfaces.
//!
//! Registered on interfaces, so any container type without its own equality
//! inherits them, and any type with its own equality keeps it.

use std::hash::Hasher;
use std::sync::Arc;

use rustc_hash::FxHasher;

use crate::error::EqualityError;
use crate::hash::{HashRegistrar, HashRegistry, HashRule};
use crate::markers;
use crate::registry::{EqualityRegistrar, EqualityRegistry, EqualityRule};
use crate::value::{Comparable, Shape, TypeKey};

struct Structural;

impl EqualityRule for Structural {
	fn are_equal(&self, registry: &EqualityRegistry, a: &dyn Comparable, b: &dyn Comparable) -> bool {
		match registry.collections().equals(Some(a), Some(b)) {
			Ok(equal) => equal,
			Err(_) => a.native_eq(b),
		}
	}
}

impl HashRule for Structural {
	fn hash(&self, registry: &HashRegistry, value: &dyn Comparable, state: &mut dyn Hasher) {
		match value.shape() {
			Some(Shape::Set(set)) => {
				let sum = set
					.items()
					.fold(0u64, |sum, item| sum.wrapping_add(registry.hash_code(item)));
				state.write_u64(sum);
			}
			Some(Shape::Map(map)) => {
				let sum = map.entries().fold(0u64, |sum, (key, value)| {
					let mut entry = FxHasher::default();
					registry.hash_into(key, &mut entry);
					registry.hash_into(value, &mut entry);
					sum.wrapping_add(entry.finish())
				});
				state.write_u64(sum);
			}
			Some(shape) => {
				for item in shape.items().into_iter().flatten() {
					registry.hash_into(item, state);
				}
			}
			None => value.native_hash(state),
		}
	}
}

fn interfaces() -> [TypeKey; 5] {
	[
		TypeKey::interface::<markers::Collection>(),
		TypeKey::interface::<markers::Map>(),
		TypeKey::interface::<markers::Iterator>(),
		TypeKey::interface::<markers::Iterable>(),
		TypeKey::interface::<markers::Enumeration>(),
	]
}

pub(super) fn container_equality(registrar: &EqualityRegistrar<'_>) -> Result<(), EqualityError> {
	let rule: Arc<dyn EqualityRule> = Arc::new(Structural);
	for key in interfaces() {
		registrar.register(key, Arc::clone(&rule))?;
	}
	Ok(())
}

pub(super) fn container_hash(registrar: &HashRegistrar<'_>) -> Result<(), EqualityError> {
	let rule: Arc<dyn HashRule> = Arc::new(Structural);
	for key in interfaces() {
		registrar.register(key, Arc::clone(&rule))?;
	}
	Ok(())
}
