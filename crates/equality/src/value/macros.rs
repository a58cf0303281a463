//! Implementation macros for the runtime type model.

/// Implements [`Comparable`](crate::Comparable) and
/// [`Element`](crate::Element) for value types.
///
/// Each entry names a `PartialEq + Hash` type followed by the marker
/// interfaces it implements, most specific first. A trailing `as Kind`
/// declares the type a scalar of [`ScalarKind`](crate::ScalarKind) `Kind`,
/// which lets arrays of it use the scalar array rules.
///
/// ```
/// use commons_equality::{comparable_value, markers};
///
/// #[derive(Debug, PartialEq, Hash)]
/// struct Celsius(i64);
///
/// comparable_value! {
/// 	Celsius => [markers::Number];
/// }
/// ```
#[macro_export]
macro_rules! comparable_value {
	($($ty:ty => [$($iface:ty),* $(,)?] $(as $kind:ident)?;)*) => {$(
		impl $crate::Comparable for $ty {
			fn describe(&self) -> $crate::TypeDesc {
				$crate::TypeDesc::new($crate::TypeKey::class::<Self>())
					.with_supertypes(&[$($crate::TypeKey::interface::<$iface>()),*])
					.with_own_equality()
			}

			fn native_eq(&self, other: &dyn $crate::Comparable) -> bool {
				$crate::downcast::<Self>(other).is_some_and(|other| self == other)
			}

			fn native_hash(&self, mut state: &mut dyn ::std::hash::Hasher) {
				::std::hash::Hash::hash(self, &mut state);
			}
		}

		impl $crate::Element for $ty {
			fn as_item(&self) -> $crate::Item<'_> {
				Some(self)
			}

			$(
				fn component() -> $crate::Component {
					$crate::Component::Scalar($crate::ScalarKind::$kind)
				}

				fn scalars(slice: &[Self]) -> Option<$crate::Scalars<'_>> {
					Some($crate::Scalars::$kind(slice))
				}
			)?
		}
	)*};
}

/// Implements the identity-equality side of the model for a type: a
/// [`Comparable`](crate::Comparable) with default `native_eq`/`native_hash`
/// and the given marker interfaces, plus [`Element`](crate::Element).
#[macro_export]
macro_rules! comparable_identity {
	($($ty:ty => [$($iface:ty),* $(,)?];)*) => {$(
		impl $crate::Comparable for $ty {
			fn describe(&self) -> $crate::TypeDesc {
				$crate::TypeDesc::new($crate::TypeKey::class::<Self>())
					.with_supertypes(&[$($crate::TypeKey::interface::<$iface>()),*])
			}
		}

		impl $crate::Element for $ty {
			fn as_item(&self) -> $crate::Item<'_> {
				Some(self)
			}
		}
	)*};
}
