use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::AtomicI32;

use pretty_assertions::assert_eq;

use super::markers::{self, Collection, List, Number};
use super::*;

#[test]
fn keys_compare_by_type_only() {
	assert_eq!(TypeKey::class::<i32>(), TypeKey::class::<i32>());
	assert_ne!(TypeKey::class::<i32>(), TypeKey::class::<i64>());
	assert_eq!(TypeKey::class::<List>(), TypeKey::interface::<List>());
	assert!(TypeKey::interface::<List>().is_interface());
	assert!(!TypeKey::class::<Vec<i32>>().is_interface());
	assert!(TypeKey::root().is_root());
	assert!(TypeKey::class::<markers::Object>().is_root());
}

#[test]
fn value_types_declare_own_equality_and_interfaces() {
	let desc = 5i32.describe();
	assert_eq!(desc.key(), TypeKey::class::<i32>());
	assert!(desc.own_equality());
	assert_eq!(desc.supertypes(), &[TypeKey::interface::<Number>()]);
	assert_eq!(desc.array_component(), None);
}

#[test]
fn collections_list_their_interfaces_most_specific_first() {
	let desc = vec![1i32].describe();
	assert!(!desc.own_equality());
	assert_eq!(
		desc.supertypes(),
		&[
			TypeKey::interface::<List>(),
			TypeKey::interface::<Collection>(),
			TypeKey::interface::<markers::Iterable>(),
		]
	);
}

#[test]
fn supertypes_skip_root_and_self() {
	let key = TypeKey::class::<u8>();
	let desc = TypeDesc::new(key).with_supertypes(&[key, TypeKey::root(), TypeKey::interface::<Number>()]);
	assert_eq!(desc.supertypes(), &[TypeKey::interface::<Number>()]);
}

#[test]
fn arrays_report_their_component() {
	let ints: Box<[i32]> = vec![1, 2].into_boxed_slice();
	assert_eq!(ints.describe().array_component(), Some(Component::Scalar(ScalarKind::I32)));

	let lists = [vec![1i32], vec![2]];
	assert_eq!(lists.describe().array_component(), Some(Component::Container));

	let objects: Box<[Option<String>]> = vec![None, Some("a".to_string())].into_boxed_slice();
	assert_eq!(objects.describe().array_component(), Some(Component::Object));
}

#[test]
fn shapes_classify_containers() {
	assert_eq!(vec![1i32].shape().map(|s| s.kind()), Some(ContainerKind::List));
	assert_eq!(HashSet::from([1i32]).shape().map(|s| s.kind()), Some(ContainerKind::Set));
	assert_eq!(BTreeMap::from([(1i32, 2i32)]).shape().map(|s| s.kind()), Some(ContainerKind::Map));
	assert_eq!([1u8, 2].shape().map(|s| s.kind()), Some(ContainerKind::Array));
	assert_eq!(vec![1i32].into_iter().shape().map(|s| s.kind()), Some(ContainerKind::Iterator));
	assert!(5i32.shape().is_none());
	assert!("text".to_string().shape().is_none());
}

#[test]
fn scalar_arrays_expose_typed_storage() {
	let floats = [1.5f64, 2.5];
	let Some(Shape::Array(view)) = floats.shape() else {
		panic!("expected an array shape");
	};
	assert_eq!(view.len(), 2);
	match view.scalars() {
		Some(Scalars::F64(values)) => assert_eq!(values, &[1.5, 2.5]),
		other => panic!("unexpected storage: {other:?}"),
	}
}

#[test]
fn null_elements_become_none() {
	let values: Vec<Option<i32>> = vec![Some(1), None];
	let items: Vec<Option<String>> = values
		.items()
		.map(|item| item.map(|value| format!("{value:?}")))
		.collect();
	assert_eq!(items, vec![Some("1".to_string()), None]);
}

#[test]
fn downcast_recovers_the_concrete_type() {
	let value: Obj = Arc::new(7i64);
	assert_eq!(downcast::<i64>(&*value), Some(&7));
	assert_eq!(downcast::<i32>(&*value), None);
}

#[test]
fn identity_types_are_only_equal_to_themselves() {
	let a = AtomicI32::new(1);
	let b = AtomicI32::new(1);
	assert!(a.native_eq(&a));
	assert!(!a.native_eq(&b));
	assert!(!a.describe().own_equality());
}

#[test]
fn value_types_compare_natively() {
	assert!(5i32.native_eq(&5i32));
	assert!(!5i32.native_eq(&6i32));
	assert!("a".to_string().native_eq(&"a".to_string()));
	assert!(!f64::NAN.native_eq(&f64::NAN));
	assert!(0.0f64.native_eq(&-0.0f64));
}
