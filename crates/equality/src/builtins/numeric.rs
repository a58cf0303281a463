//! Decimals compare numerically; floats compare canonical bit patterns.

use std::hash::{Hash, Hasher};

use commons_primitives::Decimal;

use crate::compare;
use crate::error::EqualityError;
use crate::hash::HashRegistrar;
use crate::registry::EqualityRegistrar;

/// `5.5` equals `5.50`.
pub(super) fn decimal_equality(registrar: &EqualityRegistrar<'_>) -> Result<(), EqualityError> {
	registrar.register_fn(|a: &Decimal, b: &Decimal| a.numeric_eq(b))?;
	Ok(())
}

pub(super) fn decimal_hash(registrar: &HashRegistrar<'_>) -> Result<(), EqualityError> {
	registrar.register_fn(|value: &Decimal, mut state: &mut dyn Hasher| value.normalized().hash(&mut state))?;
	Ok(())
}

/// Same semantic as [`compare::equals`]: NaN equals NaN, `0.0` differs from
/// `-0.0`.
pub(super) fn float_equality(registrar: &EqualityRegistrar<'_>) -> Result<(), EqualityError> {
	registrar.register_fn(|a: &f32, b: &f32| compare::equals(*a, *b))?;
	registrar.register_fn(|a: &f64, b: &f64| compare::equals(*a, *b))?;
	Ok(())
}

pub(super) fn float_hash(registrar: &HashRegistrar<'_>) -> Result<(), EqualityError> {
	registrar.register_fn(|value: &f32, state: &mut dyn Hasher| state.write_u32(canonical_f32(*value)))?;
	registrar.register_fn(|value: &f64, state: &mut dyn Hasher| state.write_u64(canonical_f64(*value)))?;
	Ok(())
}

/// Bit pattern with every NaN folded into one.
pub(super) fn canonical_f32(value: f32) -> u32 {
	if value.is_nan() { f32::NAN.to_bits() } else { value.to_bits() }
}

pub(super) fn canonical_f64(value: f64) -> u64 {
	if value.is_nan() { f64::NAN.to_bits() } else { value.to_bits() }
}
