//! Type-directed rule dispatch shared by the equality and hash registries.
//!
//! # Role
//!
//! [`Dispatch`] maps a value's runtime type to the rule that governs it,
//! honoring the precomputed supertype chain in [`TypeDesc`]. It is generic
//! over the rule trait object so both registries run the exact same lookup.
//!
//! # Invariants
//!
//! - The root type never owns a rule.
//! - The first rule registered for a key wins; later conflicting rules are
//!   reported and dropped.
//! - A key in the bypass set had, when recorded, neither an exact rule nor
//!   an inherited rule it does not shadow. Registering a rule for that
//!   exact key removes it; rules added for its ancestors later do not.
//! - Arrays resolve by component and are never written to the rule table.
//! - No lock is held when [`Dispatch::lookup`] returns, so rules may
//!   re-enter the owning registry.

use std::collections::hash_map::Entry;
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, trace, warn};

use crate::error::{Change, EqualityError, RegisterOutcome};
use crate::value::{Comparable, Component, ScalarKind, TypeDesc, TypeKey};

/// Rules that may step aside for a type's own equality.
pub(crate) trait Overridable {
	/// Whether a type that defines its own equality bypasses this rule when
	/// the rule was found on one of its interfaces.
	fn yields_to_own_equality(&self) -> bool;
}

/// Outcome of [`Dispatch::lookup`].
pub(crate) enum Resolution<R: ?Sized> {
	/// A registered rule, exact or inherited.
	Rule(Arc<R>),
	/// An array type with no scalar rule; compare element-wise.
	Array(Component),
	/// No rule applies; use the value's native implementation.
	Direct,
}

pub(crate) struct DispatchState<R: ?Sized> {
	rules: FxHashMap<TypeKey, Arc<R>>,
	array_rules: FxHashMap<ScalarKind, Arc<R>>,
	direct: FxHashSet<TypeKey>,
	descriptors: FxHashMap<TypeKey, Arc<TypeDesc>>,
}

impl<R: ?Sized> Default for DispatchState<R> {
	fn default() -> Self {
		Self {
			rules: FxHashMap::default(),
			array_rules: FxHashMap::default(),
			direct: FxHashSet::default(),
			descriptors: FxHashMap::default(),
		}
	}
}

pub(crate) struct Dispatch<R: ?Sized> {
	label: &'static str,
	state: RwLock<DispatchState<R>>,
}

impl<R: ?Sized> Dispatch<R> {
	pub(crate) fn new(label: &'static str) -> Self {
		Self {
			label,
			state: RwLock::new(DispatchState::default()),
		}
	}

	pub(crate) fn label(&self) -> &'static str {
		self.label
	}

	pub(crate) fn register(&self, key: TypeKey, rule: Arc<R>) -> Result<RegisterOutcome, EqualityError> {
		if key.is_root() {
			return Err(EqualityError::RootRegistration {
				registry: self.label,
				type_name: key.name(),
			});
		}

		let mut guard = self.state.write();
		let state = &mut *guard;
		let outcome = match state.rules.entry(key) {
			Entry::Occupied(existing) if Arc::ptr_eq(existing.get(), &rule) => RegisterOutcome::Unchanged,
			Entry::Occupied(_) => RegisterOutcome::KeptExisting,
			Entry::Vacant(slot) => {
				slot.insert(rule);
				state.direct.remove(&key);
				RegisterOutcome::Inserted
			}
		};
		drop(guard);

		if outcome == RegisterOutcome::KeptExisting {
			warn!(
				registry = self.label,
				type_name = key.name(),
				"a different rule is already registered; keeping the existing rule"
			);
		}
		Ok(outcome)
	}

	pub(crate) fn register_array(&self, kind: ScalarKind, rule: Arc<R>) -> RegisterOutcome {
		let outcome = match self.state.write().array_rules.entry(kind) {
			Entry::Occupied(existing) if Arc::ptr_eq(existing.get(), &rule) => RegisterOutcome::Unchanged,
			Entry::Occupied(_) => RegisterOutcome::KeptExisting,
			Entry::Vacant(slot) => {
				slot.insert(rule);
				RegisterOutcome::Inserted
			}
		};

		if outcome == RegisterOutcome::KeptExisting {
			warn!(
				registry = self.label,
				component = ?kind,
				"a different array rule is already registered; keeping the existing rule"
			);
		}
		outcome
	}

	/// Removes the rule registered for exactly `key`.
	pub(crate) fn unregister(&self, key: TypeKey) -> Change {
		match self.state.write().rules.remove(&key) {
			Some(_) => Change::Changed,
			None => Change::Unchanged,
		}
	}

	pub(crate) fn len(&self) -> usize {
		self.state.read().rules.len()
	}

	pub(crate) fn is_registered(&self, key: TypeKey) -> bool {
		self.state.read().rules.contains_key(&key)
	}

	pub(crate) fn has_array_rule(&self, kind: ScalarKind) -> bool {
		self.state.read().array_rules.contains_key(&kind)
	}

	/// Swaps in a fully built state, dropping every rule and cache entry.
	pub(crate) fn replace(&self, staged: Dispatch<R>) {
		let fresh = staged.state.into_inner();
		*self.state.write() = fresh;
	}

	/// Descriptor of `value`'s type, computed at most once per type.
	fn descriptor(&self, key: TypeKey, value: &dyn Comparable) -> Arc<TypeDesc> {
		if let Some(desc) = self.state.read().descriptors.get(&key) {
			return Arc::clone(desc);
		}
		let mut state = self.state.write();
		Arc::clone(state.descriptors.entry(key).or_insert_with(|| Arc::new(value.describe())))
	}

	/// Copies an inherited rule onto the exact key. Keeps whatever rule the
	/// key gained concurrently.
	fn promote(&self, key: TypeKey, ancestor: TypeKey, rule: Arc<R>) -> Arc<R> {
		let promoted = Arc::clone(self.state.write().rules.entry(key).or_insert(rule));
		debug!(
			registry = self.label,
			type_name = key.name(),
			ancestor = ancestor.name(),
			"promoted inherited rule"
		);
		promoted
	}
}

impl<R: ?Sized + Overridable> Dispatch<R> {
	/// Resolves the rule governing `value`'s runtime type.
	pub(crate) fn lookup(&self, value: &dyn Comparable) -> Resolution<R> {
		let key = value.type_key();
		let cached = {
			let state = self.state.read();
			if state.direct.contains(&key) {
				return Resolution::Direct;
			}
			if let Some(rule) = state.rules.get(&key) {
				return Resolution::Rule(Arc::clone(rule));
			}
			state.descriptors.get(&key).cloned()
		};
		let desc = match cached {
			Some(desc) => desc,
			None => self.descriptor(key, value),
		};

		let inherited = {
			let state = self.state.read();
			desc.supertypes()
				.iter()
				.find_map(|ancestor| state.rules.get(ancestor).map(|rule| (*ancestor, Arc::clone(rule))))
		};

		if let Some((ancestor, rule)) = inherited {
			if shadows(&desc, ancestor, &rule) {
				self.bypass(&desc, "own equality shadows interface rule");
				return Resolution::Direct;
			}
			return Resolution::Rule(self.promote(key, ancestor, rule));
		}

		if let Some(component) = desc.array_component() {
			let scalar_rule = match component {
				Component::Scalar(kind) => self.state.read().array_rules.get(&kind).cloned(),
				Component::Object | Component::Container => None,
			};
			return match scalar_rule {
				Some(rule) => Resolution::Rule(rule),
				None => Resolution::Array(component),
			};
		}

		self.bypass(&desc, "no rule in type or supertypes");
		Resolution::Direct
	}

	/// Records the type as having no applicable rule. The table is walked
	/// again under the write lock, so a rule registered or swapped in since
	/// the lookup began is never hidden.
	fn bypass(&self, desc: &TypeDesc, reason: &'static str) {
		let key = desc.key();
		let mut guard = self.state.write();
		let state = &mut *guard;
		if state.rules.contains_key(&key) {
			return;
		}
		let inherited = desc
			.supertypes()
			.iter()
			.find_map(|ancestor| state.rules.get(ancestor).map(|rule| (*ancestor, rule)));
		if inherited.is_some_and(|(ancestor, rule)| !shadows(desc, ancestor, rule)) {
			return;
		}
		if state.direct.insert(key) {
			trace!(registry = self.label, type_name = key.name(), reason, "using native implementation");
		}
	}
}

/// Whether a rule inherited from `ancestor` steps aside for the type's own
/// equality.
fn shadows<R: ?Sized + Overridable>(desc: &TypeDesc, ancestor: TypeKey, rule: &Arc<R>) -> bool {
	ancestor.is_interface() && desc.own_equality() && rule.yields_to_own_equality()
}

/// Registration handle given to builtin groups and plugins.
///
/// Exposes only additive operations: a registrar can neither remove nor
/// inspect rules.
pub struct Registrar<'a, R: ?Sized> {
	dispatch: &'a Dispatch<R>,
}

impl<'a, R: ?Sized> Registrar<'a, R> {
	pub(crate) fn new(dispatch: &'a Dispatch<R>) -> Self {
		Self { dispatch }
	}

	/// Registers `rule` for exactly `key`. See the owning registry's
	/// `register` for the conflict policy.
	pub fn register(&self, key: TypeKey, rule: Arc<R>) -> Result<RegisterOutcome, EqualityError> {
		self.dispatch.register(key, rule)
	}

	/// Registers `rule` for arrays whose elements are scalars of `kind`.
	pub fn register_array(&self, kind: ScalarKind, rule: Arc<R>) -> RegisterOutcome {
		self.dispatch.register_array(kind, rule)
	}

	/// Label of the registry being populated.
	pub fn registry(&self) -> &'static str {
		self.dispatch.label()
	}
}

#[cfg(test)]
mod tests;
