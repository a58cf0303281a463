//! Atomics compare by their current value.

use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicBool, AtomicI32, AtomicI64, AtomicU32, AtomicU64, AtomicUsize, Ordering};

use crate::error::EqualityError;
use crate::hash::HashRegistrar;
use crate::registry::EqualityRegistrar;

macro_rules! atomic_rules {
	($($atomic:ty),* $(,)?) => {
		pub(super) fn atomic_equality(registrar: &EqualityRegistrar<'_>) -> Result<(), EqualityError> {
			$(
				registrar.register_fn(|a: &$atomic, b: &$atomic| {
					a.load(Ordering::SeqCst) == b.load(Ordering::SeqCst)
				})?;
			)*
			Ok(())
		}

		pub(super) fn atomic_hash(registrar: &HashRegistrar<'_>) -> Result<(), EqualityError> {
			$(
				registrar.register_fn(|value: &$atomic, mut state: &mut dyn Hasher| {
					value.load(Ordering::SeqCst).hash(&mut state)
				})?;
			)*
			Ok(())
		}
	};
}

atomic_rules!(AtomicBool, AtomicI32, AtomicI64, AtomicU32, AtomicU64, AtomicUsize);
