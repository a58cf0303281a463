//! Container classification and element views.

use std::fmt;

use super::Item;

/// Boxed iterator over the elements of a container.
pub type Items<'a> = Box<dyn std::iter::Iterator<Item = Item<'a>> + 'a>;

/// Boxed iterator over the entries of a map.
pub type Entries<'a> = Box<dyn std::iter::Iterator<Item = (Item<'a>, Item<'a>)> + 'a>;

/// The container category a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerKind {
	List,
	Set,
	Map,
	Array,
	Iterator,
	Iterable,
	Enumeration,
}

impl fmt::Display for ContainerKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Self::List => "list",
			Self::Set => "set",
			Self::Map => "map",
			Self::Array => "array",
			Self::Iterator => "iterator",
			Self::Iterable => "iterable",
			Self::Enumeration => "enumeration",
		})
	}
}

/// Element kinds of scalar arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ScalarKind {
	Bool,
	Char,
	I8,
	I16,
	I32,
	I64,
	Isize,
	U8,
	U16,
	U32,
	U64,
	Usize,
	F32,
	F64,
}

impl ScalarKind {
	/// Every scalar kind, in declaration order.
	pub const ALL: [ScalarKind; 14] = [
		Self::Bool,
		Self::Char,
		Self::I8,
		Self::I16,
		Self::I32,
		Self::I64,
		Self::Isize,
		Self::U8,
		Self::U16,
		Self::U32,
		Self::U64,
		Self::Usize,
		Self::F32,
		Self::F64,
	];
}

/// A typed view of a scalar array's storage.
#[derive(Debug, Clone, Copy)]
pub enum Scalars<'a> {
	Bool(&'a [bool]),
	Char(&'a [char]),
	I8(&'a [i8]),
	I16(&'a [i16]),
	I32(&'a [i32]),
	I64(&'a [i64]),
	Isize(&'a [isize]),
	U8(&'a [u8]),
	U16(&'a [u16]),
	U32(&'a [u32]),
	U64(&'a [u64]),
	Usize(&'a [usize]),
	F32(&'a [f32]),
	F64(&'a [f64]),
}

impl Scalars<'_> {
	pub fn kind(&self) -> ScalarKind {
		match self {
			Self::Bool(_) => ScalarKind::Bool,
			Self::Char(_) => ScalarKind::Char,
			Self::I8(_) => ScalarKind::I8,
			Self::I16(_) => ScalarKind::I16,
			Self::I32(_) => ScalarKind::I32,
			Self::I64(_) => ScalarKind::I64,
			Self::Isize(_) => ScalarKind::Isize,
			Self::U8(_) => ScalarKind::U8,
			Self::U16(_) => ScalarKind::U16,
			Self::U32(_) => ScalarKind::U32,
			Self::U64(_) => ScalarKind::U64,
			Self::Usize(_) => ScalarKind::Usize,
			Self::F32(_) => ScalarKind::F32,
			Self::F64(_) => ScalarKind::F64,
		}
	}
}

/// The element category of an array type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Component {
	/// Elements are scalars of one kind.
	Scalar(ScalarKind),
	/// Elements are arbitrary (possibly null) values.
	Object,
	/// Elements are themselves containers.
	Container,
}

/// A container whose elements can be walked in order.
pub trait SequenceView {
	fn items(&self) -> Items<'_>;
}

/// A finite sequence with a known length.
pub trait CollectionView: SequenceView {
	fn len(&self) -> usize;

	fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

/// A key/value container.
pub trait MapView {
	fn len(&self) -> usize;

	fn entries(&self) -> Entries<'_>;

	fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

/// A fixed-length array.
pub trait ArrayView: CollectionView {
	fn component(&self) -> Component;

	/// Typed storage for scalar arrays; `None` for object arrays.
	fn scalars(&self) -> Option<Scalars<'_>>;
}

/// The container view of a value.
#[derive(Clone, Copy)]
pub enum Shape<'a> {
	List(&'a dyn CollectionView),
	Set(&'a dyn CollectionView),
	Map(&'a dyn MapView),
	Array(&'a dyn ArrayView),
	Iterator(&'a dyn SequenceView),
	Iterable(&'a dyn SequenceView),
	Enumeration(&'a dyn SequenceView),
}

impl<'a> Shape<'a> {
	pub fn kind(&self) -> ContainerKind {
		match self {
			Self::List(_) => ContainerKind::List,
			Self::Set(_) => ContainerKind::Set,
			Self::Map(_) => ContainerKind::Map,
			Self::Array(_) => ContainerKind::Array,
			Self::Iterator(_) => ContainerKind::Iterator,
			Self::Iterable(_) => ContainerKind::Iterable,
			Self::Enumeration(_) => ContainerKind::Enumeration,
		}
	}

	/// Element iterator for every kind except maps.
	pub fn items(&self) -> Option<Items<'a>> {
		match *self {
			Self::List(view) | Self::Set(view) => Some(view.items()),
			Self::Array(view) => Some(view.items()),
			Self::Iterator(view) | Self::Iterable(view) | Self::Enumeration(view) => Some(view.items()),
			Self::Map(_) => None,
		}
	}

	/// Element count, when the container knows it up front.
	pub fn len(&self) -> Option<usize> {
		match *self {
			Self::List(view) | Self::Set(view) => Some(view.len()),
			Self::Array(view) => Some(view.len()),
			Self::Map(view) => Some(view.len()),
			Self::Iterator(_) | Self::Iterable(_) | Self::Enumeration(_) => None,
		}
	}
}

impl fmt::Debug for Shape<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("Shape").field(&self.kind()).finish()
	}
}
