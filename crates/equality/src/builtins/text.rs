//! Text buffers compare by content, locales by normalized tag.

use std::hash::{Hash, Hasher};

use commons_primitives::Locale;
use parking_lot::{Mutex, RwLock};

use crate::error::EqualityError;
use crate::hash::HashRegistrar;
use crate::registry::EqualityRegistrar;

/// Buffers are snapshotted one at a time; no two locks are ever held
/// together.
pub(super) fn buffer_equality(registrar: &EqualityRegistrar<'_>) -> Result<(), EqualityError> {
	registrar.register_fn(|a: &Mutex<String>, b: &Mutex<String>| {
		let left = a.lock().clone();
		left == *b.lock()
	})?;
	registrar.register_fn(|a: &RwLock<String>, b: &RwLock<String>| {
		let left = a.read().clone();
		left == *b.read()
	})?;
	Ok(())
}

pub(super) fn buffer_hash(registrar: &HashRegistrar<'_>) -> Result<(), EqualityError> {
	registrar.register_fn(|value: &Mutex<String>, mut state: &mut dyn Hasher| value.lock().hash(&mut state))?;
	registrar.register_fn(|value: &RwLock<String>, mut state: &mut dyn Hasher| value.read().hash(&mut state))?;
	Ok(())
}

/// `en-us` equals `en_US`.
pub(super) fn locale_equality(registrar: &EqualityRegistrar<'_>) -> Result<(), EqualityError> {
	registrar.register_fn(|a: &Locale, b: &Locale| a.normalized() == b.normalized())?;
	Ok(())
}

pub(super) fn locale_hash(registrar: &HashRegistrar<'_>) -> Result<(), EqualityError> {
	registrar.register_fn(|value: &Locale, mut state: &mut dyn Hasher| value.normalized().hash(&mut state))?;
	Ok(())
}
