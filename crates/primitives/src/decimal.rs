//! Fixed-point decimal numbers with an explicit scale.
//!
//! A [`Decimal`] keeps the representation it was created with: `5.5` and
//! `5.50` are different representations (and different under `==`) but the
//! same number under [`Decimal::numeric_eq`] and [`Ord`].

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Errors produced when parsing a [`Decimal`] from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseDecimalError {
	/// The input was empty or only a sign.
	#[error("empty decimal literal")]
	Empty,
	/// The input contained a character that is not a digit or a single point.
	#[error("invalid character {found:?} at byte {position}")]
	InvalidCharacter {
		/// The offending character.
		found: char,
		/// Byte offset of the offending character.
		position: usize,
	},
	/// The digits do not fit into the unscaled representation.
	#[error("decimal literal {0:?} is out of range")]
	Overflow(String),
}

/// A decimal number stored as `unscaled * 10^-scale`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Decimal {
	unscaled: i128,
	scale: u32,
}

impl Decimal {
	/// Zero with scale 0.
	pub const ZERO: Self = Self { unscaled: 0, scale: 0 };

	/// Creates a decimal from its unscaled value and scale.
	pub const fn new(unscaled: i128, scale: u32) -> Self {
		Self { unscaled, scale }
	}

	/// Returns the unscaled integer value.
	pub const fn unscaled(&self) -> i128 {
		self.unscaled
	}

	/// Returns the number of digits after the decimal point.
	pub const fn scale(&self) -> u32 {
		self.scale
	}

	/// Returns true if the value is zero, regardless of scale.
	pub const fn is_zero(&self) -> bool {
		self.unscaled == 0
	}

	/// Returns the canonical representation with trailing zeros stripped.
	///
	/// Zero always normalizes to scale 0.
	pub fn normalized(&self) -> Self {
		if self.unscaled == 0 {
			return Self::ZERO;
		}
		let mut unscaled = self.unscaled;
		let mut scale = self.scale;
		while scale > 0 && unscaled % 10 == 0 {
			unscaled /= 10;
			scale -= 1;
		}
		Self { unscaled, scale }
	}

	/// Compares the numeric values, ignoring representation.
	pub fn numeric_eq(&self, other: &Self) -> bool {
		self.normalized() == other.normalized()
	}

	/// Three-way numeric comparison that never overflows.
	pub fn cmp_numeric(&self, other: &Self) -> Ordering {
		let (a, b) = (self.normalized(), other.normalized());
		match a.scale.cmp(&b.scale) {
			Ordering::Equal => a.unscaled.cmp(&b.unscaled),
			Ordering::Less => cmp_rescaled(a.unscaled, b.scale - a.scale, b.unscaled),
			Ordering::Greater => cmp_rescaled(b.unscaled, a.scale - b.scale, a.unscaled).reverse(),
		}
	}
}

/// Compares `lhs * 10^shift` against `rhs`.
///
/// When the rescaled value does not fit in an `i128` its magnitude exceeds
/// any `rhs`, so only the sign of `lhs` matters.
fn cmp_rescaled(lhs: i128, shift: u32, rhs: i128) -> Ordering {
	if lhs == 0 {
		return 0.cmp(&rhs);
	}
	match 10i128.checked_pow(shift).and_then(|factor| lhs.checked_mul(factor)) {
		Some(rescaled) => rescaled.cmp(&rhs),
		None if lhs < 0 => Ordering::Less,
		None => Ordering::Greater,
	}
}

impl PartialOrd for Decimal {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

/// Orders numerically; ties between representations of the same number are
/// broken by scale so the ordering stays consistent with `==`.
impl Ord for Decimal {
	fn cmp(&self, other: &Self) -> Ordering {
		self.cmp_numeric(other).then_with(|| self.scale.cmp(&other.scale))
	}
}

impl FromStr for Decimal {
	type Err = ParseDecimalError;

	fn from_str(input: &str) -> Result<Self, Self::Err> {
		let (negative, body, offset) = match input.as_bytes().first() {
			Some(b'-') => (true, &input[1..], 1),
			Some(b'+') => (false, &input[1..], 1),
			_ => (false, input, 0),
		};
		if body.is_empty() || body == "." {
			return Err(ParseDecimalError::Empty);
		}

		let overflow = || ParseDecimalError::Overflow(input.to_string());
		let mut unscaled: i128 = 0;
		let mut scale: u32 = 0;
		let mut seen_point = false;
		for (index, ch) in body.char_indices() {
			match ch {
				'.' if !seen_point => seen_point = true,
				'0'..='9' => {
					// Accumulates toward the sign so `i128::MIN` stays in range.
					let digit = i128::from(ch as u8 - b'0');
					let digit = if negative { -digit } else { digit };
					unscaled = unscaled
						.checked_mul(10)
						.and_then(|v| v.checked_add(digit))
						.ok_or_else(overflow)?;
					if seen_point {
						scale += 1;
					}
				}
				found => {
					return Err(ParseDecimalError::InvalidCharacter {
						found,
						position: index + offset,
					});
				}
			}
		}

		Ok(Self { unscaled, scale })
	}
}

impl fmt::Display for Decimal {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let digits = self.unscaled.unsigned_abs().to_string();
		let sign = if self.unscaled < 0 { "-" } else { "" };
		let scale = self.scale as usize;
		if scale == 0 {
			return write!(f, "{sign}{digits}");
		}
		if digits.len() > scale {
			let (int, frac) = digits.split_at(digits.len() - scale);
			write!(f, "{sign}{int}.{frac}")
		} else {
			write!(f, "{sign}0.{}{digits}", "0".repeat(scale - digits.len()))
		}
	}
}

impl From<i64> for Decimal {
	fn from(value: i64) -> Self {
		Self::new(i128::from(value), 0)
	}
}
