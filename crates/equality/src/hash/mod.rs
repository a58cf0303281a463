//! Type-directed hashing, consistent with the equality registry.
//!
//! # Role
//!
//! [`HashRegistry`] mirrors [`EqualityRegistry`](crate::EqualityRegistry):
//! the same dispatch, the same builtin groups and plugin discovery, with
//! [`HashRule`]s in place of equality rules. [`HashCodeGenerator`] folds
//! several values into one hash code.
//!
//! # Invariants
//!
//! - With the same configuration on both registries, values the equality
//!   registry considers equal produce equal hash codes.
//! - Hash codes use [`FxHasher`] and are deterministic within a build. They
//!   are not stable across builds and must not be persisted.

use std::hash::Hasher;
use std::marker::PhantomData;
use std::sync::Arc;

use rustc_hash::FxHasher;
use tracing::{debug, warn};

use crate::config::RegistryConfig;
use crate::dispatch::{Dispatch, Overridable, Registrar, Resolution};
use crate::error::{Change, EqualityError, RegisterOutcome};
use crate::value::{Comparable, Item, ScalarKind, TypeKey, downcast};
use crate::{builtins, plugin};

/// A specialized hash for one runtime type or interface.
pub trait HashRule: Send + Sync {
	fn hash(&self, registry: &HashRegistry, value: &dyn Comparable, state: &mut dyn Hasher);

	/// See [`EqualityRule::yields_to_own_equality`](crate::EqualityRule::yields_to_own_equality).
	fn yields_to_own_equality(&self) -> bool {
		true
	}
}

impl Overridable for dyn HashRule {
	fn yields_to_own_equality(&self) -> bool {
		HashRule::yields_to_own_equality(self)
	}
}

/// A [`HashRule`] backed by a closure over concrete values.
pub struct FnHashRule<T, F> {
	hash: F,
	yields: bool,
	_values: PhantomData<fn(&T)>,
}

impl<T, F> FnHashRule<T, F>
where
	T: Comparable,
	F: Fn(&HashRegistry, &T, &mut dyn Hasher) + Send + Sync + 'static,
{
	pub fn new(hash: F) -> Self {
		Self {
			hash,
			yields: true,
			_values: PhantomData,
		}
	}

	pub fn strict(mut self) -> Self {
		self.yields = false;
		self
	}
}

impl<T, F> HashRule for FnHashRule<T, F>
where
	T: Comparable,
	F: Fn(&HashRegistry, &T, &mut dyn Hasher) + Send + Sync + 'static,
{
	fn hash(&self, registry: &HashRegistry, value: &dyn Comparable, state: &mut dyn Hasher) {
		match downcast::<T>(value) {
			Some(value) => (self.hash)(registry, value, state),
			None => value.native_hash(state),
		}
	}

	fn yields_to_own_equality(&self) -> bool {
		self.yields
	}
}

pub fn hash_rule<T, F>(hash: F) -> Arc<dyn HashRule>
where
	T: Comparable,
	F: Fn(&T, &mut dyn Hasher) + Send + Sync + 'static,
{
	Arc::new(FnHashRule::new(move |_: &HashRegistry, value: &T, state: &mut dyn Hasher| {
		hash(value, state)
	}))
}

pub fn hash_rule_with<T, F>(hash: F) -> Arc<dyn HashRule>
where
	T: Comparable,
	F: Fn(&HashRegistry, &T, &mut dyn Hasher) + Send + Sync + 'static,
{
	Arc::new(FnHashRule::new(hash))
}

/// Element-wise hash for arrays with no scalar rule.
struct ElementwiseArrays;

impl HashRule for ElementwiseArrays {
	fn hash(&self, registry: &HashRegistry, value: &dyn Comparable, state: &mut dyn Hasher) {
		let Some(items) = value.shape().and_then(|shape| shape.items()) else {
			value.native_hash(state);
			return;
		};
		let mut len = 0usize;
		for item in items {
			registry.hash_into(item, state);
			len += 1;
		}
		state.write_usize(len);
	}
}

pub type HashRegistrar<'a> = Registrar<'a, dyn HashRule>;

impl Registrar<'_, dyn HashRule> {
	/// Registers a closure hashing values of type `T`.
	pub fn register_fn<T, F>(&self, hash: F) -> Result<RegisterOutcome, EqualityError>
	where
		T: Comparable,
		F: Fn(&T, &mut dyn Hasher) + Send + Sync + 'static,
	{
		self.register(TypeKey::class::<T>(), hash_rule(hash))
	}
}

/// Registry of hash rules keyed by runtime type.
pub struct HashRegistry {
	dispatch: Dispatch<dyn HashRule>,
	arrays: Arc<dyn HashRule>,
	config: RegistryConfig,
}

impl HashRegistry {
	pub(crate) const LABEL: &'static str = "hash";

	pub fn empty() -> Self {
		Self {
			dispatch: Dispatch::new(Self::LABEL),
			arrays: Arc::new(ElementwiseArrays),
			config: RegistryConfig::bare(),
		}
	}

	/// A registry with every builtin group and every discovered plugin.
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

	pub fn register(&self, key: TypeKey, rule: Arc<dyn HashRule>) -> Result<RegisterOutcome, EqualityError> {
		self.dispatch.register(key, rule)
	}

	pub fn register_fn<T, F>(&self, hash: F) -> Result<RegisterOutcome, EqualityError>
	where
		T: Comparable,
		F: Fn(&T, &mut dyn Hasher) + Send + Sync + 'static,
	{
		self.registrar().register_fn(hash)
	}

	pub fn register_array(&self, kind: ScalarKind, rule: Arc<dyn HashRule>) -> RegisterOutcome {
		self.dispatch.register_array(kind, rule)
	}

	pub fn unregister(&self, key: TypeKey) -> Change {
		self.dispatch.unregister(key)
	}

	pub fn lookup(&self, value: &dyn Comparable) -> Option<Arc<dyn HashRule>> {
		match self.dispatch.lookup(value) {
			Resolution::Rule(rule) => Some(rule),
			Resolution::Array(_) => Some(Arc::clone(&self.arrays)),
			Resolution::Direct => None,
		}
	}

	/// Hash code of a possibly-null value.
	pub fn hash_code(&self, item: Item<'_>) -> u64 {
		let mut state = FxHasher::default();
		self.hash_into(item, &mut state);
		state.finish()
	}

	/// Feeds a possibly-null value into `state`.
	pub fn hash_into(&self, item: Item<'_>, state: &mut dyn Hasher) {
		let Some(value) = item else {
			state.write_u8(0);
			return;
		};
		state.write_u8(1);
		match self.lookup(value) {
			Some(rule) => rule.hash(self, value, state),
			None => value.native_hash(state),
		}
	}

	pub fn reinitialize(&self) -> Result<(), EqualityError> {
		let staged = Dispatch::new(Self::LABEL);
		populate(&staged, &self.config, plugin::OnFailure::Abort)?;
		let rules = staged.len();
		self.dispatch.replace(staged);
		debug!(registry = Self::LABEL, rules, "reinitialized");
		Ok(())
	}

	pub fn len(&self) -> usize {
		self.dispatch.len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	pub fn is_registered(&self, key: TypeKey) -> bool {
		self.dispatch.is_registered(key)
	}

	pub fn has_array_rule(&self, kind: ScalarKind) -> bool {
		self.dispatch.has_array_rule(kind)
	}

	pub fn registrar(&self) -> HashRegistrar<'_> {
		Registrar::new(&self.dispatch)
	}
}

impl Default for HashRegistry {
	fn default() -> Self {
		Self::new()
	}
}

fn populate(dispatch: &Dispatch<dyn HashRule>, config: &RegistryConfig, on_failure: plugin::OnFailure) -> Result<(), EqualityError> {
	let registrar = Registrar::new(dispatch);
	builtins::install_hash(&registrar, config.enabled_groups())?;
	plugin::run_hash_plugins(&registrar, config, on_failure)
}

/// Builds one hash code from several values.
///
/// ```
/// use commons_equality::{HashCodeGenerator, HashRegistry};
///
/// let registry = HashRegistry::new();
/// let name = "ada".to_string();
/// let code = HashCodeGenerator::for_type::<(String, i32)>(&registry)
/// 	.append(Some(&name))
/// 	.append(Some(&36i32))
/// 	.finish();
/// assert_ne!(code, 0);
/// ```
pub struct HashCodeGenerator<'r> {
	registry: &'r HashRegistry,
	state: FxHasher,
}

impl<'r> HashCodeGenerator<'r> {
	pub fn new(registry: &'r HashRegistry) -> Self {
		Self {
			registry,
			state: FxHasher::default(),
		}
	}

	/// Seeds the generator with the composite's type, so composites of
	/// different types with the same fields hash differently.
	pub fn for_type<T: ?Sized + 'static>(registry: &'r HashRegistry) -> Self {
		let mut generator = Self::new(registry);
		std::hash::Hash::hash(&TypeKey::class::<T>(), &mut generator.state);
		generator
	}

	pub fn append(mut self, item: Item<'_>) -> Self {
		self.registry.hash_into(item, &mut self.state);
		self
	}

	/// Appends a field that is itself a composite.
	pub fn append_code(mut self, code: u64) -> Self {
		self.state.write_u64(code);
		self
	}

	pub fn finish(&self) -> u64 {
		self.state.finish()
	}
}

#[cfg(test)]
mod tests;
