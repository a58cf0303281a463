use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize};

use commons_primitives::{Decimal, Locale, Node};
use parking_lot::{Mutex, RwLock};
use rstest::rstest;
use url::Url;

use crate::config::{RegistryConfig, RuleGroup, RuleGroups};
use crate::hash::HashRegistry;
use crate::registry::EqualityRegistry;
use crate::value::{Comparable, ScalarKind, TypeKey};

fn config(disabled: &[RuleGroup]) -> RegistryConfig {
	RegistryConfig {
		disabled_groups: disabled.to_vec(),
		discover_plugins: false,
		skip_plugins: Vec::new(),
	}
}

fn registries() -> (EqualityRegistry, HashRegistry) {
	(
		EqualityRegistry::with_config(config(&[])).unwrap(),
		HashRegistry::with_config(config(&[])).unwrap(),
	)
}

/// Asserts equality both ways, plus equal hash codes.
fn assert_equivalent(a: &dyn Comparable, b: &dyn Comparable) {
	let (equality, hashes) = registries();
	assert!(equality.equals(a, b), "{a:?} should equal {b:?}");
	assert!(equality.equals(b, a), "{b:?} should equal {a:?}");
	assert_eq!(hashes.hash_code(Some(a)), hashes.hash_code(Some(b)), "{a:?} and {b:?} hash apart");
}

fn assert_distinct(a: &dyn Comparable, b: &dyn Comparable) {
	let (equality, _) = registries();
	assert!(!equality.equals(a, b), "{a:?} should differ from {b:?}");
	assert!(!equality.equals(b, a), "{b:?} should differ from {a:?}");
}

fn dec(text: &str) -> Decimal {
	text.parse().unwrap()
}

#[rstest]
#[case("5.5", "5.50")]
#[case("0", "0.000")]
#[case("-12.300", "-12.3")]
fn decimals_ignore_scale(#[case] a: &str, #[case] b: &str) {
	assert_equivalent(&dec(a), &dec(b));
}

#[test]
fn decimals_still_compare_values() {
	assert_distinct(&dec("5.5"), &dec("5.51"));
}

#[test]
fn floats_compare_bit_patterns() {
	assert_equivalent(&f64::NAN, &f64::from_bits(0x7ff8_0000_0000_0001));
	assert_equivalent(&f32::NAN, &f32::NAN);
	assert_distinct(&0.0f64, &-0.0f64);
	assert_distinct(&0.0f32, &-0.0f32);
	assert_equivalent(&1.25f64, &1.25f64);
}

#[test]
fn native_float_equality_differs_without_the_group() {
	let registry = EqualityRegistry::with_config(config(&[RuleGroup::Floats])).unwrap();
	assert!(!registry.equals(&f64::NAN, &f64::NAN));
	assert!(registry.equals(&0.0f64, &-0.0f64));
}

#[test]
fn text_buffers_compare_content() {
	assert_equivalent(&Mutex::new("abc".to_string()), &Mutex::new("abc".to_string()));
	assert_equivalent(&RwLock::new("abc".to_string()), &RwLock::new("abc".to_string()));
	assert_distinct(&Mutex::new("abc".to_string()), &Mutex::new("abd".to_string()));
}

#[test]
fn text_buffers_compare_the_current_snapshot() {
	let (equality, _) = registries();
	let a = Mutex::new("abc".to_string());
	let b = Mutex::new("ab".to_string());
	assert!(!equality.equals(&a, &b));

	b.lock().push('c');
	assert!(equality.equals(&a, &b));
}

#[test]
fn urls_compare_serialized_form() {
	let a = Url::parse("HTTP://Example.com:80/a/../b").unwrap();
	let b = Url::parse("http://example.com/b").unwrap();
	assert_equivalent(&a, &b);
	assert_distinct(&b, &Url::parse("http://example.com/c").unwrap());
}

#[test]
fn atomics_compare_current_values() {
	assert_equivalent(&AtomicI64::new(9), &AtomicI64::new(9));
	assert_equivalent(&AtomicBool::new(true), &AtomicBool::new(true));
	assert_distinct(&AtomicUsize::new(1), &AtomicUsize::new(2));

	let registry = EqualityRegistry::with_config(config(&[RuleGroup::Atomics])).unwrap();
	assert!(!registry.equals(&AtomicI64::new(9), &AtomicI64::new(9)));
}

#[test]
fn scalar_arrays_compare_element_wise() {
	assert_equivalent(&[1i32, 2, 3], &[1i32, 2, 3]);
	assert_distinct(&[1i32, 2, 3], &[1i32, 2, 4]);
	assert_equivalent(&[f64::NAN], &[f64::NAN]);
	assert_distinct(&[0.0f32], &[-0.0f32]);

	let boxed: Box<[u8]> = vec![1, 2].into_boxed_slice();
	assert_equivalent(&boxed, &boxed.clone());
}

#[test]
fn every_scalar_kind_has_an_array_rule() {
	let (equality, hashes) = registries();
	for kind in ScalarKind::ALL {
		assert!(equality.has_array_rule(kind), "{kind:?}");
		assert!(hashes.has_array_rule(kind), "{kind:?}");
	}
}

#[test]
fn object_arrays_fall_back_to_element_dispatch() {
	let a: Box<[Option<Decimal>]> = vec![Some(dec("1.0")), None].into_boxed_slice();
	let b: Box<[Option<Decimal>]> = vec![Some(dec("1")), None].into_boxed_slice();
	assert_equivalent(&a, &b);
}

#[test]
fn containers_compare_structurally_within_a_type() {
	assert_equivalent(&vec![dec("1.0"), dec("2")], &vec![dec("1"), dec("2.00")]);
	assert_equivalent(
		&HashSet::from(["a".to_string(), "b".to_string()]),
		&HashSet::from(["b".to_string(), "a".to_string()]),
	);
	assert_equivalent(
		&HashMap::from([("k".to_string(), Some(1i32))]),
		&HashMap::from([("k".to_string(), Some(1i32))]),
	);
	assert_distinct(&vec![1i32, 2], &vec![2i32, 1]);
}

#[test]
fn containers_of_different_types_never_match() {
	let (equality, _) = registries();
	let list = vec![1i32];
	let deque = VecDeque::from([1i32]);
	let ordered = BTreeSet::from([1i32]);
	let hashed = HashSet::from([1i32]);

	assert!(!equality.equals(&list, &deque));
	assert!(!equality.equals(&ordered, &hashed));
}

#[test]
fn container_rules_are_promoted_to_concrete_types() {
	let (equality, _) = registries();
	assert!(equality.is_registered(TypeKey::interface::<crate::markers::Collection>()));
	assert!(!equality.is_registered(TypeKey::class::<Vec<u16>>()));

	assert!(equality.equals(&vec![1u16], &vec![1u16]));
	assert!(equality.is_registered(TypeKey::class::<Vec<u16>>()));
}

#[test]
fn paths_compare_resolved_locations() {
	let dir = tempfile::tempdir().unwrap();
	let file = dir.path().join("data.txt");
	std::fs::write(&file, "x").unwrap();

	let roundabout = dir.path().join(".").join("sub").join("..").join("data.txt");
	std::fs::create_dir(dir.path().join("sub")).unwrap();
	assert_equivalent(&file, &roundabout);
	assert_distinct(&file, &dir.path().join("other.txt"));
}

#[test]
fn missing_paths_compare_lexically() {
	let a = PathBuf::from("/definitely/not/here/./x");
	let b = PathBuf::from("/definitely/not/here/y/../x");
	assert_equivalent(&a, &b);
}

#[test]
fn locales_compare_normalized_tags() {
	assert_equivalent(&Locale::new("en-us"), &Locale::new("EN_US"));
	assert_distinct(&Locale::new("en_US"), &Locale::new("en_GB"));
}

#[test]
fn dom_nodes_compare_deeply() {
	let build = || {
		Node::element("list")
			.with_attribute("kind", "ordered")
			.with_child(Node::element("item").with_child(Node::text("one")))
	};
	assert_equivalent(&build(), &build());
	assert_distinct(&build(), &build().with_child(Node::element("item")));

	let registry = EqualityRegistry::with_config(config(&[RuleGroup::Dom])).unwrap();
	assert!(!registry.equals(&build(), &build()));
}

#[test]
fn disabled_groups_install_nothing() {
	let every = RuleGroup::ALL.to_vec();
	let equality = EqualityRegistry::with_config(config(&every)).unwrap();
	let hashes = HashRegistry::with_config(config(&every)).unwrap();

	assert!(equality.is_empty());
	assert!(hashes.is_empty());
	assert!(!equality.has_array_rule(ScalarKind::I32));
	assert_eq!(config(&every).enabled_groups(), RuleGroups::empty());
}
