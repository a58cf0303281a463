//! Type-directed equality registry.
//!
//! # Role
//!
//! [`EqualityRegistry`] answers "are these two values equal" for arbitrary
//! [`Comparable`] values. Each runtime type is governed by the most specific
//! registered [`EqualityRule`], falling back to the type's own
//! [`Comparable::native_eq`].
//!
//! # Invariants
//!
//! - Values of different runtime types are never equal, whatever their
//!   content. Cross-type structural comparison is opt-in through
//!   [`CollectionEquality`].
//! - Two nulls are equal; a null is never equal to a value.
//! - Rules run without any registry lock held and may call back into the
//!   registry.

use std::marker::PhantomData;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::collections::CollectionEquality;
use crate::compare::identity_equal;
use crate::config::RegistryConfig;
use crate::dispatch::{Dispatch, Overridable, Registrar, Resolution};
use crate::error::{Change, EqualityError, RegisterOutcome};
use crate::value::{Comparable, Item, ScalarKind, TypeKey, downcast, shape_of};
use crate::{builtins, plugin};

/// A specialized equality for one runtime type or interface.
pub trait EqualityRule: Send + Sync {
	/// Compares two values that share a runtime type.
	fn are_equal(&self, registry: &EqualityRegistry, a: &dyn Comparable, b: &dyn Comparable) -> bool;

	/// Whether a type that defines its own equality bypasses this rule when
	/// the rule is registered on one of its interfaces.
	fn yields_to_own_equality(&self) -> bool {
		true
	}
}

impl Overridable for dyn EqualityRule {
	fn yields_to_own_equality(&self) -> bool {
		EqualityRule::yields_to_own_equality(self)
	}
}

/// An [`EqualityRule`] backed by a closure over concrete values. Values of
/// any other type fall back to their native equality.
pub struct FnRule<T, F> {
	compare: F,
	yields: bool,
	_values: PhantomData<fn(&T, &T)>,
}

impl<T, F> FnRule<T, F>
where
	T: Comparable,
	F: Fn(&EqualityRegistry, &T, &T) -> bool + Send + Sync + 'static,
{
	pub fn new(compare: F) -> Self {
		Self {
			compare,
			yields: true,
			_values: PhantomData,
		}
	}

	/// Makes the rule apply even to types that define their own equality.
	pub fn strict(mut self) -> Self {
		self.yields = false;
		self
	}
}

impl<T, F> EqualityRule for FnRule<T, F>
where
	T: Comparable,
	F: Fn(&EqualityRegistry, &T, &T) -> bool + Send + Sync + 'static,
{
	fn are_equal(&self, registry: &EqualityRegistry, a: &dyn Comparable, b: &dyn Comparable) -> bool {
		match (downcast::<T>(a), downcast::<T>(b)) {
			(Some(a), Some(b)) => (self.compare)(registry, a, b),
			_ => a.native_eq(b),
		}
	}

	fn yields_to_own_equality(&self) -> bool {
		self.yields
	}
}

/// Wraps a comparison of concrete values as a shareable rule.
pub fn typed_rule<T, F>(compare: F) -> Arc<dyn EqualityRule>
where
	T: Comparable,
	F: Fn(&T, &T) -> bool + Send + Sync + 'static,
{
	Arc::new(FnRule::new(move |_: &EqualityRegistry, a: &T, b: &T| compare(a, b)))
}

/// Like [`typed_rule`], for comparisons that recurse into the registry.
pub fn typed_rule_with<T, F>(compare: F) -> Arc<dyn EqualityRule>
where
	T: Comparable,
	F: Fn(&EqualityRegistry, &T, &T) -> bool + Send + Sync + 'static,
{
	Arc::new(FnRule::new(compare))
}

/// Element-wise comparison for arrays with no scalar rule.
struct ElementwiseArrays;

impl EqualityRule for ElementwiseArrays {
	fn are_equal(&self, registry: &EqualityRegistry, a: &dyn Comparable, b: &dyn Comparable) -> bool {
		let (Some(mut xs), Some(mut ys)) = (a.shape().and_then(|s| s.items()), b.shape().and_then(|s| s.items()))
		else {
			return a.native_eq(b);
		};
		loop {
			match (xs.next(), ys.next()) {
				(None, None) => return true,
				(Some(x), Some(y)) if registry.are_equal(x, y) => {}
				_ => return false,
			}
		}
	}
}

pub type EqualityRegistrar<'a> = Registrar<'a, dyn EqualityRule>;

impl Registrar<'_, dyn EqualityRule> {
	/// Registers a closure comparing values of type `T`.
	pub fn register_fn<T, F>(&self, compare: F) -> Result<RegisterOutcome, EqualityError>
	where
		T: Comparable,
		F: Fn(&T, &T) -> bool + Send + Sync + 'static,
	{
		self.register(TypeKey::class::<T>(), typed_rule(compare))
	}
}

/// Registry of equality rules keyed by runtime type.
///
/// Owned by the application and passed by reference to whatever needs
/// equality dispatch. Thread-safe; share it behind an `Arc` or a static.
pub struct EqualityRegistry {
	dispatch: Dispatch<dyn EqualityRule>,
	arrays: Arc<dyn EqualityRule>,
	config: RegistryConfig,
}

impl EqualityRegistry {
	pub(crate) const LABEL: &'static str = "equality";

	/// A registry with no rules at all.
	pub fn empty() -> Self {
		Self {
			dispatch: Dispatch::new(Self::LABEL),
			arrays: Arc::new(ElementwiseArrays),
			config: RegistryConfig::bare(),
		}
	}

	/// A registry with every builtin group and every discovered plugin.
	///
	/// Plugin failures are logged and the failing plugin is skipped.
	pub fn new() -> Self {
		let config = RegistryConfig::default();
		let dispatch = Dispatch::new(Self::LABEL);
		if let Err(error) = populate(&dispatch, &config, plugin::OnFailure::Skip) {
			warn!(registry = Self::LABEL, %error, "registry populated partially");
		}
		Self {
			dispatch,
			arrays: Arc::new(ElementwiseArrays),
			config,
		}
	}

	/// A registry populated according to `config`. A failing plugin aborts
	/// construction.
	pub fn with_config(config: RegistryConfig) -> Result<Self, EqualityError> {
		let dispatch = Dispatch::new(Self::LABEL);
		populate(&dispatch, &config, plugin::OnFailure::Abort)?;
		Ok(Self {
			dispatch,
			arrays: Arc::new(ElementwiseArrays),
			config,
		})
	}

	pub fn config(&self) -> &RegistryConfig {
		&self.config
	}

	/// Registers `rule` for exactly `key`.
	///
	/// The first rule for a key wins: registering the same rule again is a
	/// silent no-op, registering a different one logs a warning and keeps
	/// the original. Fails only for the root type.
	pub fn register(&self, key: TypeKey, rule: Arc<dyn EqualityRule>) -> Result<RegisterOutcome, EqualityError> {
		self.dispatch.register(key, rule)
	}

	/// Registers a closure comparing values of type `T`.
	pub fn register_fn<T, F>(&self, compare: F) -> Result<RegisterOutcome, EqualityError>
	where
		T: Comparable,
		F: Fn(&T, &T) -> bool + Send + Sync + 'static,
	{
		self.registrar().register_fn(compare)
	}

	/// Registers `rule` for arrays of scalars of `kind`.
	pub fn register_array(&self, kind: ScalarKind, rule: Arc<dyn EqualityRule>) -> RegisterOutcome {
		self.dispatch.register_array(kind, rule)
	}

	/// Removes the rule registered for exactly `key`. Rules for ancestors
	/// and rules already promoted to subtypes stay in place.
	pub fn unregister(&self, key: TypeKey) -> Change {
		self.dispatch.unregister(key)
	}

	/// The rule governing `value`'s runtime type, or `None` when its native
	/// equality applies.
	pub fn lookup(&self, value: &dyn Comparable) -> Option<Arc<dyn EqualityRule>> {
		match self.dispatch.lookup(value) {
			Resolution::Rule(rule) => Some(rule),
			Resolution::Array(_) => Some(Arc::clone(&self.arrays)),
			Resolution::Direct => None,
		}
	}

	/// Null-aware equality of two possibly-null values.
	pub fn are_equal(&self, a: Item<'_>, b: Item<'_>) -> bool {
		match (a, b) {
			(None, None) => true,
			(Some(a), Some(b)) => self.equals(a, b),
			_ => false,
		}
	}

	/// Equality of two values under registry dispatch.
	pub fn equals(&self, a: &dyn Comparable, b: &dyn Comparable) -> bool {
		if a.type_key() != b.type_key() {
			return false;
		}
		if identity_equal(a, b) {
			return true;
		}
		match self.lookup(a) {
			Some(rule) => rule.are_equal(self, a, b),
			None => a.native_eq(b),
		}
	}

	/// Structural comparison that ignores concrete container types.
	pub fn collections(&self) -> CollectionEquality<'_> {
		CollectionEquality::new(self)
	}

	/// Whether `item` is a container the structural helpers can classify.
	pub fn is_container(&self, item: Item<'_>) -> bool {
		shape_of(item).is_some()
	}

	/// Drops every rule and cache entry, then repopulates from the
	/// configuration.
	///
	/// The new table is built before the lock is taken, so concurrent
	/// lookups see either the old or the new rules, never a partial set.
	pub fn reinitialize(&self) -> Result<(), EqualityError> {
		let staged = Dispatch::new(Self::LABEL);
		populate(&staged, &self.config, plugin::OnFailure::Abort)?;
		let rules = staged.len();
		self.dispatch.replace(staged);
		debug!(registry = Self::LABEL, rules, "reinitialized");
		Ok(())
	}

	/// Number of type-keyed rules, including promoted ones.
	pub fn len(&self) -> usize {
		self.dispatch.len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Whether a rule is registered for exactly `key`.
	pub fn is_registered(&self, key: TypeKey) -> bool {
		self.dispatch.is_registered(key)
	}

	pub fn has_array_rule(&self, kind: ScalarKind) -> bool {
		self.dispatch.has_array_rule(kind)
	}

	/// An additive registration handle.
	pub fn registrar(&self) -> EqualityRegistrar<'_> {
		Registrar::new(&self.dispatch)
	}
}

impl Default for EqualityRegistry {
	fn default() -> Self {
		Self::new()
	}
}

fn populate(
	dispatch: &Dispatch<dyn EqualityRule>,
	config: &RegistryConfig,
	on_failure: plugin::OnFailure,
) -> Result<(), EqualityError> {
	let registrar = Registrar::new(dispatch);
	builtins::install_equality(&registrar, config.enabled_groups())?;
	plugin::run_equality_plugins(&registrar, config, on_failure)
}
