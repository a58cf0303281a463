//! URLs compare by serialized form. Nothing here resolves hosts.

use std::hash::{Hash, Hasher};

use url::Url;

use crate::error::EqualityError;
use crate::hash::HashRegistrar;
use crate::registry::EqualityRegistrar;

pub(super) fn url_equality(registrar: &EqualityRegistrar<'_>) -> Result<(), EqualityError> {
	registrar.register_fn(|a: &Url, b: &Url| a.as_str() == b.as_str())?;
	Ok(())
}

pub(super) fn url_hash(registrar: &HashRegistrar<'_>) -> Result<(), EqualityError> {
	registrar.register_fn(|value: &Url, mut state: &mut dyn Hasher| value.as_str().hash(&mut state))?;
	Ok(())
}
