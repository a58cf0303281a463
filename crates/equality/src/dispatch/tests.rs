use std::sync::Arc;
use std::sync::atomic::AtomicI32;

use pretty_assertions::assert_eq;

use super::*;
use crate::markers::{self, Number};
use crate::test_support::count_warnings;

#[derive(Debug)]
struct Tag {
	name: &'static str,
	yields: bool,
}

impl Overridable for Tag {
	fn yields_to_own_equality(&self) -> bool {
		self.yields
	}
}

fn tag(name: &'static str) -> Arc<Tag> {
	Arc::new(Tag { name, yields: true })
}

fn strict(name: &'static str) -> Arc<Tag> {
	Arc::new(Tag { name, yields: false })
}

fn resolve(dispatch: &Dispatch<Tag>, value: &dyn Comparable) -> String {
	match dispatch.lookup(value) {
		Resolution::Rule(rule) => rule.name.to_string(),
		Resolution::Array(component) => format!("array {component:?}"),
		Resolution::Direct => "direct".to_string(),
	}
}

#[derive(Debug, PartialEq, Hash)]
struct Meters(u32);

#[derive(Debug)]
struct Handle;

crate::comparable_value! {
	Meters => [Number];
}

crate::comparable_identity! {
	Handle => [Number];
}

#[test]
fn root_registration_is_rejected() {
	let dispatch = Dispatch::<Tag>::new("test");
	let err = dispatch.register(TypeKey::root(), tag("catch-all")).unwrap_err();
	assert!(matches!(err, EqualityError::RootRegistration { registry: "test", .. }));
	assert_eq!(dispatch.len(), 0);
}

#[test]
fn first_registration_wins() {
	let dispatch = Dispatch::<Tag>::new("test");
	let key = TypeKey::class::<Handle>();
	let first = tag("first");

	let (outcomes, warnings) = count_warnings(|| {
		[
			dispatch.register(key, Arc::clone(&first)).unwrap(),
			dispatch.register(key, Arc::clone(&first)).unwrap(),
		]
	});
	assert_eq!(outcomes, [RegisterOutcome::Inserted, RegisterOutcome::Unchanged]);
	assert_eq!(warnings, 0);

	let (outcome, warnings) = count_warnings(|| dispatch.register(key, tag("second")).unwrap());
	assert_eq!(outcome, RegisterOutcome::KeptExisting);
	assert_eq!(warnings, 1);
	assert_eq!(resolve(&dispatch, &Handle), "first");
}

#[test]
fn exact_registration_overrides_bypass() {
	let dispatch = Dispatch::<Tag>::new("test");
	assert_eq!(resolve(&dispatch, &Handle), "direct");

	dispatch.register(TypeKey::class::<Handle>(), tag("exact")).unwrap();
	assert_eq!(resolve(&dispatch, &Handle), "exact");
}

#[test]
fn interface_rules_are_inherited_and_promoted() {
	let dispatch = Dispatch::<Tag>::new("test");
	dispatch.register(TypeKey::interface::<Number>(), tag("numbers")).unwrap();
	assert!(!dispatch.is_registered(TypeKey::class::<Handle>()));

	assert_eq!(resolve(&dispatch, &Handle), "numbers");
	assert!(dispatch.is_registered(TypeKey::class::<Handle>()));
	assert_eq!(dispatch.len(), 2);
}

#[test]
fn own_equality_shadows_yielding_interface_rules() {
	let dispatch = Dispatch::<Tag>::new("test");
	dispatch.register(TypeKey::interface::<Number>(), tag("numbers")).unwrap();

	assert_eq!(resolve(&dispatch, &Meters(1)), "direct");
	assert!(!dispatch.is_registered(TypeKey::class::<Meters>()));
}

#[test]
fn strict_interface_rules_apply_despite_own_equality() {
	let dispatch = Dispatch::<Tag>::new("test");
	dispatch.register(TypeKey::interface::<Number>(), strict("numbers")).unwrap();

	assert_eq!(resolve(&dispatch, &Meters(1)), "numbers");
}

#[test]
fn exact_rules_apply_despite_own_equality() {
	let dispatch = Dispatch::<Tag>::new("test");
	dispatch.register(TypeKey::class::<Meters>(), tag("meters")).unwrap();

	assert_eq!(resolve(&dispatch, &Meters(1)), "meters");
}

#[test]
fn later_interface_rules_do_not_invalidate_bypass() {
	let dispatch = Dispatch::<Tag>::new("test");
	assert_eq!(resolve(&dispatch, &Handle), "direct");

	dispatch.register(TypeKey::interface::<Number>(), tag("numbers")).unwrap();
	assert_eq!(resolve(&dispatch, &Handle), "direct");
	assert_eq!(resolve(&dispatch, &AtomicI32::new(0)), "numbers");
}

#[test]
fn arrays_resolve_by_component_without_caching() {
	let dispatch = Dispatch::<Tag>::new("test");
	let ints = [1i32, 2];
	let names = [Some("a".to_string()), None];

	assert_eq!(resolve(&dispatch, &ints), "array Scalar(I32)");
	assert_eq!(resolve(&dispatch, &names), "array Object");
	assert_eq!(resolve(&dispatch, &[vec![1u8]]), "array Container");

	assert_eq!(dispatch.register_array(ScalarKind::I32, tag("ints")), RegisterOutcome::Inserted);
	assert_eq!(resolve(&dispatch, &ints), "ints");
	assert!(dispatch.has_array_rule(ScalarKind::I32));
	assert_eq!(dispatch.len(), 0);
}

#[test]
fn conflicting_array_rules_keep_the_first() {
	let dispatch = Dispatch::<Tag>::new("test");
	dispatch.register_array(ScalarKind::U8, tag("bytes"));

	let (outcome, warnings) = count_warnings(|| dispatch.register_array(ScalarKind::U8, tag("other")));
	assert_eq!(outcome, RegisterOutcome::KeptExisting);
	assert_eq!(warnings, 1);
	assert_eq!(resolve(&dispatch, &[1u8]), "bytes");
}

#[test]
fn unregister_removes_exact_entries_only() {
	let dispatch = Dispatch::<Tag>::new("test");
	dispatch.register(TypeKey::interface::<Number>(), tag("numbers")).unwrap();

	assert_eq!(dispatch.unregister(TypeKey::class::<Handle>()), Change::Unchanged);
	assert_eq!(dispatch.unregister(TypeKey::interface::<Number>()), Change::Changed);
	assert_eq!(dispatch.unregister(TypeKey::interface::<Number>()), Change::Unchanged);
	assert_eq!(resolve(&dispatch, &Handle), "direct");
}

#[test]
fn replace_discards_rules_and_caches() {
	let dispatch = Dispatch::<Tag>::new("test");
	dispatch.register(TypeKey::class::<Meters>(), tag("meters")).unwrap();
	assert_eq!(resolve(&dispatch, &Handle), "direct");

	let staged = Dispatch::<Tag>::new("test");
	staged.register(TypeKey::class::<Handle>(), tag("handles")).unwrap();
	dispatch.replace(staged);

	assert!(!dispatch.is_registered(TypeKey::class::<Meters>()));
	assert_eq!(resolve(&dispatch, &Meters(3)), "direct");
	assert_eq!(resolve(&dispatch, &Handle), "handles");
}

#[test]
fn concurrent_lookups_agree() {
	let dispatch = Dispatch::<Tag>::new("test");
	dispatch.register(TypeKey::interface::<markers::List>(), tag("lists")).unwrap();

	std::thread::scope(|scope| {
		for _ in 0..8 {
			scope.spawn(|| {
				for _ in 0..100 {
					assert_eq!(resolve(&dispatch, &vec![1i32]), "lists");
					assert_eq!(resolve(&dispatch, &Handle), "direct");
				}
			});
		}
	});
	assert!(dispatch.is_registered(TypeKey::class::<Vec<i32>>()));
}

#[test]
fn stale_bypass_never_hides_an_inherited_rule() {
	let dispatch = Dispatch::<Tag>::new("test");
	let desc = Handle.describe();
	dispatch.register(TypeKey::interface::<Number>(), tag("numbers")).unwrap();

	dispatch.bypass(&desc, "walked an older table");
	assert_eq!(resolve(&dispatch, &Handle), "numbers");
}

#[test]
fn stale_bypass_still_records_shadowed_types() {
	let dispatch = Dispatch::<Tag>::new("test");
	let desc = Meters(1).describe();
	dispatch.register(TypeKey::interface::<Number>(), tag("numbers")).unwrap();

	dispatch.bypass(&desc, "own equality");
	assert!(dispatch.state.read().direct.contains(&TypeKey::class::<Meters>()));
	assert_eq!(resolve(&dispatch, &Meters(1)), "direct");
}
