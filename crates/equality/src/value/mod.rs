//! Runtime type model.
//!
//! # Role
//!
//! Rust has no class objects, so the registries work on a small explicit
//! model instead:
//!
//! - [`TypeKey`] identifies a concrete type or a marker interface.
//! - [`TypeDesc`] is the precomputed descriptor of a type: its supertype
//!   chain (most specific first), whether it defines its own equality, and
//!   the element category for arrays.
//! - [`Comparable`] is implemented by every value that takes part in
//!   registry dispatch.
//! - [`Element`] maps container elements to [`Item`]s, where `None` stands
//!   for a null element.
//!
//! # Invariants
//!
//! - Two values with different [`TypeKey`]s are never equal under registry
//!   dispatch.
//! - `native_eq` is only called with an `other` of the same [`TypeKey`].

use std::any::{Any, TypeId, type_name};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

#[macro_use]
mod macros;
mod impls;
pub mod markers;
pub mod shape;

pub use shape::{
	ArrayView, CollectionView, Component, ContainerKind, Entries, Items, MapView, ScalarKind,
	Scalars, SequenceView, Shape,
};

/// A possibly-null reference to a comparable value.
pub type Item<'a> = Option<&'a dyn Comparable>;

/// Shared, type-erased comparable value.
pub type Obj = Arc<dyn Comparable>;

/// Stable identifier of a runtime type or marker interface.
///
/// Equality and hashing consider only the underlying [`TypeId`].
#[derive(Clone, Copy)]
pub struct TypeKey {
	id: TypeId,
	name: &'static str,
	interface: bool,
}

impl TypeKey {
	/// Key of a concrete type.
	pub fn class<T: ?Sized + 'static>() -> Self {
		Self {
			id: TypeId::of::<T>(),
			name: type_name::<T>(),
			interface: false,
		}
	}

	/// Key of a marker interface.
	pub fn interface<M: ?Sized + 'static>() -> Self {
		Self {
			id: TypeId::of::<M>(),
			name: type_name::<M>(),
			interface: true,
		}
	}

	/// Key of the universal root type.
	pub fn root() -> Self {
		Self::interface::<markers::Object>()
	}

	pub fn is_root(&self) -> bool {
		self.id == TypeId::of::<markers::Object>()
	}

	pub fn is_interface(&self) -> bool {
		self.interface
	}

	/// Fully qualified type name, for diagnostics only.
	pub fn name(&self) -> &'static str {
		self.name
	}
}

impl PartialEq for TypeKey {
	fn eq(&self, other: &Self) -> bool {
		self.id == other.id
	}
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.id.hash(state);
	}
}

impl fmt::Debug for TypeKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name)
	}
}

impl fmt::Display for TypeKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name)
	}
}

/// Precomputed description of a runtime type.
#[derive(Debug, Clone)]
pub struct TypeDesc {
	key: TypeKey,
	supertypes: Vec<TypeKey>,
	own_equality: bool,
	array: Option<Component>,
}

impl TypeDesc {
	/// Describes a type with no supertypes, identity equality, not an array.
	pub fn new(key: TypeKey) -> Self {
		Self {
			key,
			supertypes: Vec::new(),
			own_equality: false,
			array: None,
		}
	}

	/// Appends supertypes, most specific first. The root type is skipped.
	pub fn with_supertypes(mut self, supertypes: &[TypeKey]) -> Self {
		self.supertypes
			.extend(supertypes.iter().filter(|key| !key.is_root() && **key != self.key));
		self
	}

	/// Marks the type as defining its own value equality.
	pub fn with_own_equality(mut self) -> Self {
		self.own_equality = true;
		self
	}

	/// Marks the type as an array with the given element category.
	pub fn with_array(mut self, component: Component) -> Self {
		self.array = Some(component);
		self
	}

	pub fn key(&self) -> TypeKey {
		self.key
	}

	/// Supertypes, most specific first.
	pub fn supertypes(&self) -> &[TypeKey] {
		&self.supertypes
	}

	/// Whether `native_eq` implements value equality rather than identity.
	pub fn own_equality(&self) -> bool {
		self.own_equality
	}

	/// The element category if this is an array type.
	pub fn array_component(&self) -> Option<Component> {
		self.array
	}
}

/// A value that takes part in registry dispatch.
///
/// The defaults give identity semantics: a type that does nothing but
/// implement this trait is equal only to itself. Types with value semantics
/// override [`Comparable::native_eq`] and [`Comparable::native_hash`] and
/// declare [`TypeDesc::with_own_equality`]; the [`comparable_value!`] macro
/// does all three for `PartialEq + Hash` types.
pub trait Comparable: Any + fmt::Debug + Send + Sync {
	fn type_key(&self) -> TypeKey {
		TypeKey::class::<Self>()
	}

	/// Builds the type descriptor. Called once per type and cached.
	fn describe(&self) -> TypeDesc {
		TypeDesc::new(self.type_key())
	}

	/// The type's own equality. `other` always has the same [`TypeKey`].
	fn native_eq(&self, other: &dyn Comparable) -> bool {
		std::ptr::addr_eq(self, other)
	}

	/// The type's own hash, consistent with [`Comparable::native_eq`].
	fn native_hash(&self, state: &mut dyn Hasher) {
		state.write_usize(std::ptr::from_ref(self).cast::<()>() as usize);
	}

	/// Container view, if this value is a container.
	fn shape(&self) -> Option<Shape<'_>> {
		None
	}
}

/// Downcasts a type-erased value to a concrete type.
pub fn downcast<T: Comparable>(value: &dyn Comparable) -> Option<&T> {
	let any: &dyn Any = value;
	any.downcast_ref::<T>()
}

/// Something that can be stored inside a container.
pub trait Element: fmt::Debug + Send + Sync + 'static {
	fn as_item(&self) -> Item<'_>;

	/// Array component category for arrays of this element type.
	fn component() -> Component
	where
		Self: Sized,
	{
		Component::Object
	}

	/// Typed storage for a slice of scalar elements.
	fn scalars(_slice: &[Self]) -> Option<Scalars<'_>>
	where
		Self: Sized,
	{
		None
	}
}

impl<T: Element> Element for Option<T> {
	fn as_item(&self) -> Item<'_> {
		self.as_ref().and_then(|inner| inner.as_item())
	}

	fn component() -> Component {
		match T::component() {
			Component::Container => Component::Container,
			_ => Component::Object,
		}
	}
}

impl Element for Arc<dyn Comparable> {
	fn as_item(&self) -> Item<'_> {
		Some(&**self)
	}
}

impl Element for Box<dyn Comparable> {
	fn as_item(&self) -> Item<'_> {
		Some(&**self)
	}
}

/// Returns the container view of an item, if it is a non-null container.
pub fn shape_of<'a>(item: Item<'a>) -> Option<Shape<'a>> {
	item.and_then(|value| value.shape())
}

#[cfg(test)]
mod tests;
