//! Deep comparison of DOM nodes.
//!
//! Two nodes are equal when their kind, name parts, namespace, prefix and
//! value match, their attributes match in any order, and their children
//! match pairwise in document order.

use std::hash::{Hash, Hasher};

use commons_primitives::Node;
use rustc_hash::FxHasher;

use crate::error::EqualityError;
use crate::hash::HashRegistrar;
use crate::registry::EqualityRegistrar;

pub(super) fn node_equality(registrar: &EqualityRegistrar<'_>) -> Result<(), EqualityError> {
	registrar.register_fn(nodes_equal)?;
	Ok(())
}

pub(super) fn node_hash(registrar: &HashRegistrar<'_>) -> Result<(), EqualityError> {
	registrar.register_fn(|node: &Node, mut state: &mut dyn Hasher| hash_node(node, &mut state))?;
	Ok(())
}

fn nodes_equal(a: &Node, b: &Node) -> bool {
	a.kind() == b.kind()
		&& a.node_name() == b.node_name()
		&& a.local_name() == b.local_name()
		&& a.namespace_uri() == b.namespace_uri()
		&& a.prefix() == b.prefix()
		&& a.value() == b.value()
		&& attributes_equal(a.attributes(), b.attributes())
		&& a.children().len() == b.children().len()
		&& a.children().iter().zip(b.children()).all(|(x, y)| nodes_equal(x, y))
}

fn attributes_equal(a: &[Node], b: &[Node]) -> bool {
	a.len() == b.len() && a.iter().all(|attribute| b.iter().any(|other| nodes_equal(attribute, other)))
}

fn hash_node<H: Hasher>(node: &Node, state: &mut H) {
	node.kind().hash(state);
	node.node_name().hash(state);
	node.local_name().hash(state);
	node.namespace_uri().hash(state);
	node.prefix().hash(state);
	node.value().hash(state);

	let attributes = node.attributes().iter().fold(0u64, |sum, attribute| {
		let mut hasher = FxHasher::default();
		hash_node(attribute, &mut hasher);
		sum.wrapping_add(hasher.finish())
	});
	state.write_u64(attributes);

	state.write_usize(node.children().len());
	for child in node.children() {
		hash_node(child, state);
	}
}
