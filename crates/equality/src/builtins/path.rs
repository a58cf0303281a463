//! Paths compare by what they point at rather than how they are spelled.
//!
//! Resolution tries the canonical form first, then a lexically normalized
//! absolute form. When neither is available for one side, the raw paths
//! are compared.

use std::hash::{Hash, Hasher};
use std::path::{Component, Path, PathBuf};

use crate::error::EqualityError;
use crate::hash::HashRegistrar;
use crate::registry::EqualityRegistrar;

pub(super) fn path_equality(registrar: &EqualityRegistrar<'_>) -> Result<(), EqualityError> {
	registrar.register_fn(|a: &PathBuf, b: &PathBuf| match (resolve(a), resolve(b)) {
		(Some(a), Some(b)) => a == b,
		_ => a == b,
	})?;
	Ok(())
}

pub(super) fn path_hash(registrar: &HashRegistrar<'_>) -> Result<(), EqualityError> {
	registrar.register_fn(|value: &PathBuf, mut state: &mut dyn Hasher| match resolve(value) {
		Some(resolved) => resolved.hash(&mut state),
		None => value.hash(&mut state),
	})?;
	Ok(())
}

fn resolve(path: &Path) -> Option<PathBuf> {
	if let Ok(canonical) = path.canonicalize() {
		return Some(canonical);
	}
	std::path::absolute(path).ok().map(|absolute| normalize_lexically(&absolute))
}

/// Drops `.` components and folds `..` into its parent without touching
/// the filesystem.
fn normalize_lexically(path: &Path) -> PathBuf {
	let mut normalized = PathBuf::new();
	for component in path.components() {
		match component {
			Component::CurDir => {}
			Component::ParentDir => {
				if !normalized.pop() {
					normalized.push(component);
				}
			}
			other => normalized.push(other),
		}
	}
	normalized
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn lexical_normalization_folds_dots() {
		assert_eq!(normalize_lexically(Path::new("/a/./b/../c")), PathBuf::from("/a/c"));
		assert_eq!(normalize_lexically(Path::new("/a/b/..")), PathBuf::from("/a"));
	}

	#[test]
	fn existing_paths_resolve_through_the_filesystem() {
		let dir = tempfile::tempdir().unwrap();
		let nested = dir.path().join("nested");
		std::fs::create_dir(&nested).unwrap();

		let direct = resolve(&nested).unwrap();
		let roundabout = resolve(&nested.join("..").join("nested")).unwrap();
		assert_eq!(direct, roundabout);
	}
}
