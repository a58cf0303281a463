//! Scalar and string comparison primitives.
//!
//! Object equality lives on [`EqualityRegistry::are_equal`]; this module holds
//! the leaf rules it and the builtin rules share.
//!
//! [`EqualityRegistry::are_equal`]: crate::EqualityRegistry::are_equal

/// Scalars with a single authoritative equality.
///
/// Integers, `bool` and `char` use `==`. Floats compare canonical bit
/// patterns: every NaN equals every other NaN, and `0.0` differs from `-0.0`.
pub trait ScalarEq: Copy {
	fn scalar_eq(self, other: Self) -> bool;
}

macro_rules! scalar_eq_native {
	($($ty:ty),* $(,)?) => {$(
		impl ScalarEq for $ty {
			#[inline]
			fn scalar_eq(self, other: Self) -> bool {
				self == other
			}
		}
	)*};
}

scalar_eq_native!(bool, char, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

macro_rules! scalar_eq_float {
	($($ty:ty),* $(,)?) => {$(
		impl ScalarEq for $ty {
			#[inline]
			fn scalar_eq(self, other: Self) -> bool {
				(self.is_nan() && other.is_nan()) || self.to_bits() == other.to_bits()
			}
		}
	)*};
}

scalar_eq_float!(f32, f64);

/// Equality of two scalars of the same kind.
#[inline]
pub fn equals<T: ScalarEq>(a: T, b: T) -> bool {
	a.scalar_eq(b)
}

/// Reference identity. The only identity comparison in the crate.
#[inline]
pub fn identity_equal<A: ?Sized, B: ?Sized>(a: &A, b: &B) -> bool {
	std::ptr::addr_eq(a, b)
}

#[inline]
pub fn identity_different<A: ?Sized, B: ?Sized>(a: &A, b: &B) -> bool {
	!identity_equal(a, b)
}

/// Null-safe case-insensitive string equality.
///
/// Characters match if they are equal, or equal after upper-casing, or equal
/// after lower-casing.
pub fn equals_ignore_case(a: Option<&str>, b: Option<&str>) -> bool {
	match (a, b) {
		(None, None) => true,
		(Some(a), Some(b)) => {
			if identity_equal(a, b) {
				return true;
			}
			a.chars().count() == b.chars().count()
				&& a.chars().zip(b.chars()).all(|(x, y)| chars_match_ignoring_case(x, y))
		}
		_ => false,
	}
}

fn chars_match_ignoring_case(x: char, y: char) -> bool {
	x == y || x.to_uppercase().eq(y.to_uppercase()) || x.to_lowercase().eq(y.to_lowercase())
}

/// Identity and null short-circuits, then `predicate`.
///
/// Used where a comparison must be overridden locally without touching a
/// registry.
pub fn equals_custom<T: ?Sized>(a: Option<&T>, b: Option<&T>, predicate: impl FnOnce(&T, &T) -> bool) -> bool {
	match (a, b) {
		(None, None) => true,
		(Some(a), Some(b)) => identity_equal(a, b) || predicate(a, b),
		_ => false,
	}
}
