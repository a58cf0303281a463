use std::hash::Hasher;
use std::sync::Arc;

use super::*;
use crate::markers::Number;

#[derive(Debug)]
struct Counter(u32);

crate::comparable_identity! {
	Counter => [Number];
}

#[test]
fn nulls_hash_alike_and_differ_from_values() {
	let registry = HashRegistry::empty();
	assert_eq!(registry.hash_code(None), registry.hash_code(None));
	assert_ne!(registry.hash_code(None), registry.hash_code(Some(&0u8)));
}

#[test]
fn native_hash_applies_without_rules() {
	let registry = HashRegistry::empty();
	let a = "text".to_string();
	let b = "text".to_string();
	assert_eq!(registry.hash_code(Some(&a)), registry.hash_code(Some(&b)));
	assert!(registry.lookup(&a).is_none());
}

#[test]
fn registered_rules_replace_identity_hashes() {
	let registry = HashRegistry::empty();
	let (a, b) = (Counter(4), Counter(4));
	assert_ne!(registry.hash_code(Some(&a)), registry.hash_code(Some(&b)));

	let registry = HashRegistry::empty();
	registry
		.register_fn(|counter: &Counter, state: &mut dyn Hasher| state.write_u32(counter.0))
		.unwrap();
	assert_eq!(registry.hash_code(Some(&a)), registry.hash_code(Some(&b)));
}

#[test]
fn interface_hash_rules_are_inherited() {
	let registry = HashRegistry::empty();
	let rule = hash_rule(|_: &Counter, state: &mut dyn Hasher| state.write_u8(7));
	registry.register(TypeKey::interface::<Number>(), rule).unwrap();

	assert_eq!(registry.hash_code(Some(&Counter(1))), registry.hash_code(Some(&Counter(2))));
	assert!(registry.is_registered(TypeKey::class::<Counter>()));
}

#[test]
fn object_arrays_hash_element_wise() {
	let registry = HashRegistry::empty();
	let a: Box<[Option<String>]> = vec![Some("x".to_string()), None].into_boxed_slice();
	let b = a.clone();
	let c: Box<[Option<String>]> = vec![None, Some("x".to_string())].into_boxed_slice();

	assert_eq!(registry.hash_code(Some(&a)), registry.hash_code(Some(&b)));
	assert_ne!(registry.hash_code(Some(&a)), registry.hash_code(Some(&c)));
}

#[test]
fn root_hash_rules_are_rejected() {
	let registry = HashRegistry::empty();
	let rule: Arc<dyn HashRule> = hash_rule(|_: &Counter, _: &mut dyn Hasher| {});
	assert!(matches!(
		registry.register(TypeKey::root(), rule),
		Err(EqualityError::RootRegistration { registry: "hash", .. })
	));
}

#[test]
fn generator_depends_on_type_and_order() {
	let registry = HashRegistry::empty();
	let (x, y) = (1i32, 2i32);

	let forward = HashCodeGenerator::for_type::<(i32, i32)>(&registry)
		.append(Some(&x))
		.append(Some(&y))
		.finish();
	let again = HashCodeGenerator::for_type::<(i32, i32)>(&registry)
		.append(Some(&x))
		.append(Some(&y))
		.finish();
	let backward = HashCodeGenerator::for_type::<(i32, i32)>(&registry)
		.append(Some(&y))
		.append(Some(&x))
		.finish();
	let other_type = HashCodeGenerator::for_type::<[i32; 2]>(&registry)
		.append(Some(&x))
		.append(Some(&y))
		.finish();

	assert_eq!(forward, again);
	assert_ne!(forward, backward);
	assert_ne!(forward, other_type);
}
