//! Model implementations for standard library, primitives and third-party
//! types.

use std::collections::{BTreeMap, BTreeSet, BinaryHeap, HashMap, HashSet, LinkedList, VecDeque};
use std::hash::Hasher;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicI32, AtomicI64, AtomicU32, AtomicU64, AtomicUsize};

use commons_primitives::{Decimal, Enumeration, Locale, Node};
use indexmap::{IndexMap, IndexSet};
use url::Url;

use super::markers::{self, CharSequence, Number};
use super::shape::{
	ArrayView, CollectionView, Component, Entries, Items, MapView, ScalarKind, Scalars,
	SequenceView, Shape,
};
use super::{Comparable, Element, Item, TypeDesc, TypeKey, downcast};

comparable_value! {
	bool => [] as Bool;
	char => [] as Char;
	i8 => [Number] as I8;
	i16 => [Number] as I16;
	i32 => [Number] as I32;
	i64 => [Number] as I64;
	isize => [Number] as Isize;
	u8 => [Number] as U8;
	u16 => [Number] as U16;
	u32 => [Number] as U32;
	u64 => [Number] as U64;
	usize => [Number] as Usize;
	String => [CharSequence];
	&'static str => [CharSequence];
	PathBuf => [];
	Url => [];
	Decimal => [Number];
	Locale => [];
}

comparable_identity! {
	AtomicBool => [];
	AtomicI32 => [Number];
	AtomicI64 => [Number];
	AtomicU32 => [Number];
	AtomicU64 => [Number];
	AtomicUsize => [Number];
	parking_lot::Mutex<String> => [CharSequence];
	parking_lot::RwLock<String> => [CharSequence];
	Node => [markers::Node];
}

/// Floats compare with `==` natively; the hash folds `-0.0` into `0.0` and
/// every NaN into one pattern so it never splits values `==` could join.
macro_rules! comparable_float {
	($($ty:ty => $kind:ident;)*) => {$(
		impl Comparable for $ty {
			fn describe(&self) -> TypeDesc {
				TypeDesc::new(TypeKey::class::<Self>())
					.with_supertypes(&[TypeKey::interface::<Number>()])
					.with_own_equality()
			}

			fn native_eq(&self, other: &dyn Comparable) -> bool {
				downcast::<Self>(other).is_some_and(|other| self == other)
			}

			fn native_hash(&self, state: &mut dyn Hasher) {
				let canonical = if *self == 0.0 {
					0.0
				} else if self.is_nan() {
					<$ty>::NAN
				} else {
					*self
				};
				state.write(&canonical.to_bits().to_ne_bytes());
			}
		}

		impl Element for $ty {
			fn as_item(&self) -> Item<'_> {
				Some(self)
			}

			fn component() -> Component {
				Component::Scalar(ScalarKind::$kind)
			}

			fn scalars(slice: &[Self]) -> Option<Scalars<'_>> {
				Some(Scalars::$kind(slice))
			}
		}
	)*};
}

comparable_float! {
	f32 => F32;
	f64 => F64;
}

fn list_supertypes() -> [TypeKey; 3] {
	[
		TypeKey::interface::<markers::List>(),
		TypeKey::interface::<markers::Collection>(),
		TypeKey::interface::<markers::Iterable>(),
	]
}

fn set_supertypes() -> [TypeKey; 3] {
	[
		TypeKey::interface::<markers::Set>(),
		TypeKey::interface::<markers::Collection>(),
		TypeKey::interface::<markers::Iterable>(),
	]
}

/// Sequence containers: identity native equality, structural equality comes
/// from the registered collection rules.
macro_rules! comparable_collection {
	($($container:ident => $variant:ident, $supertypes:ident;)*) => {$(
		impl<T: Element> Comparable for $container<T> {
			fn describe(&self) -> TypeDesc {
				TypeDesc::new(TypeKey::class::<Self>()).with_supertypes(&$supertypes())
			}

			fn shape(&self) -> Option<Shape<'_>> {
				Some(Shape::$variant(self))
			}
		}

		impl<T: Element> Element for $container<T> {
			fn as_item(&self) -> Item<'_> {
				Some(self)
			}

			fn component() -> Component {
				Component::Container
			}
		}

		impl<T: Element> SequenceView for $container<T> {
			fn items(&self) -> Items<'_> {
				Box::new(self.iter().map(|element| element.as_item()))
			}
		}

		impl<T: Element> CollectionView for $container<T> {
			fn len(&self) -> usize {
				$container::len(self)
			}
		}
	)*};
}

comparable_collection! {
	Vec => List, list_supertypes;
	VecDeque => List, list_supertypes;
	LinkedList => List, list_supertypes;
	HashSet => Set, set_supertypes;
	BTreeSet => Set, set_supertypes;
	IndexSet => Set, set_supertypes;
}

macro_rules! comparable_map {
	($($container:ident;)*) => {$(
		impl<K: Element, V: Element> Comparable for $container<K, V> {
			fn describe(&self) -> TypeDesc {
				TypeDesc::new(TypeKey::class::<Self>())
					.with_supertypes(&[TypeKey::interface::<markers::Map>()])
			}

			fn shape(&self) -> Option<Shape<'_>> {
				Some(Shape::Map(self))
			}
		}

		impl<K: Element, V: Element> Element for $container<K, V> {
			fn as_item(&self) -> Item<'_> {
				Some(self)
			}

			fn component() -> Component {
				Component::Container
			}
		}

		impl<K: Element, V: Element> MapView for $container<K, V> {
			fn len(&self) -> usize {
				$container::len(self)
			}

			fn entries(&self) -> Entries<'_> {
				Box::new(self.iter().map(|(key, value)| (key.as_item(), value.as_item())))
			}
		}
	)*};
}

comparable_map! {
	HashMap;
	BTreeMap;
	IndexMap;
}

/// Arrays: identity native equality, element-wise equality comes from the
/// registry's array handling.
macro_rules! comparable_array {
	($([$($generics:tt)*] $array:ty;)*) => {$(
		impl<$($generics)*> Comparable for $array {
			fn describe(&self) -> TypeDesc {
				TypeDesc::new(TypeKey::class::<Self>()).with_array(T::component())
			}

			fn shape(&self) -> Option<Shape<'_>> {
				Some(Shape::Array(self))
			}
		}

		impl<$($generics)*> Element for $array {
			fn as_item(&self) -> Item<'_> {
				Some(self)
			}

			fn component() -> Component {
				Component::Container
			}
		}

		impl<$($generics)*> SequenceView for $array {
			fn items(&self) -> Items<'_> {
				Box::new(self.iter().map(|element| element.as_item()))
			}
		}

		impl<$($generics)*> CollectionView for $array {
			fn len(&self) -> usize {
				<[T]>::len(&self[..])
			}
		}

		impl<$($generics)*> ArrayView for $array {
			fn component(&self) -> Component {
				T::component()
			}

			fn scalars(&self) -> Option<Scalars<'_>> {
				T::scalars(&self[..])
			}
		}
	)*};
}

comparable_array! {
	[T: Element] Box<[T]>;
	[T: Element, const N: usize] [T; N];
}

impl<T: Element> Comparable for std::vec::IntoIter<T> {
	fn describe(&self) -> TypeDesc {
		TypeDesc::new(TypeKey::class::<Self>())
			.with_supertypes(&[TypeKey::interface::<markers::Iterator>()])
	}

	fn shape(&self) -> Option<Shape<'_>> {
		Some(Shape::Iterator(self))
	}
}

impl<T: Element> Element for std::vec::IntoIter<T> {
	fn as_item(&self) -> Item<'_> {
		Some(self)
	}

	fn component() -> Component {
		Component::Container
	}
}

impl<T: Element> SequenceView for std::vec::IntoIter<T> {
	fn items(&self) -> Items<'_> {
		Box::new(self.as_slice().iter().map(|element| element.as_item()))
	}
}

/// Heaps are iterables: they walk their elements in internal layout order,
/// which depends on insertion history rather than on contents alone.
impl<T: Element> Comparable for BinaryHeap<T> {
	fn describe(&self) -> TypeDesc {
		TypeDesc::new(TypeKey::class::<Self>())
			.with_supertypes(&[TypeKey::interface::<markers::Iterable>()])
	}

	fn shape(&self) -> Option<Shape<'_>> {
		Some(Shape::Iterable(self))
	}
}

impl<T: Element> Element for BinaryHeap<T> {
	fn as_item(&self) -> Item<'_> {
		Some(self)
	}

	fn component() -> Component {
		Component::Container
	}
}

impl<T: Element> SequenceView for BinaryHeap<T> {
	fn items(&self) -> Items<'_> {
		Box::new(self.iter().map(|element| element.as_item()))
	}
}

impl<T: Element> Comparable for Enumeration<T> {
	fn describe(&self) -> TypeDesc {
		TypeDesc::new(TypeKey::class::<Self>())
			.with_supertypes(&[TypeKey::interface::<markers::Enumeration>()])
	}

	fn shape(&self) -> Option<Shape<'_>> {
		Some(Shape::Enumeration(self))
	}
}

impl<T: Element> Element for Enumeration<T> {
	fn as_item(&self) -> Item<'_> {
		Some(self)
	}

	fn component() -> Component {
		Component::Container
	}
}

impl<T: Element> SequenceView for Enumeration<T> {
	fn items(&self) -> Items<'_> {
		Box::new(self.remaining().iter().map(|element| element.as_item()))
	}
}
