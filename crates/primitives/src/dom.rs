//! Minimal DOM node tree.
//!
//! Nodes carry the data a reader produces (kind, qualified name parts,
//! value, attributes, children) and nothing else. `Node` has no `PartialEq`:
//! two nodes are distinct objects even when they describe the same markup.

/// The kind of a DOM node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
	Element,
	Attribute,
	Text,
	CData,
	Comment,
	ProcessingInstruction,
	EntityReference,
	DocumentType,
	DocumentFragment,
	Document,
}

/// A node in a DOM tree.
#[derive(Debug, Clone)]
pub struct Node {
	kind: NodeKind,
	namespace_uri: Option<String>,
	prefix: Option<String>,
	local_name: Option<String>,
	node_name: String,
	value: Option<String>,
	attributes: Vec<Node>,
	children: Vec<Node>,
}

impl Node {
	fn with_kind(kind: NodeKind, node_name: impl Into<String>) -> Self {
		Self {
			kind,
			namespace_uri: None,
			prefix: None,
			local_name: None,
			node_name: node_name.into(),
			value: None,
			attributes: Vec::new(),
			children: Vec::new(),
		}
	}

	/// Creates an element without namespace.
	pub fn element(name: impl Into<String>) -> Self {
		let name = name.into();
		let mut node = Self::with_kind(NodeKind::Element, name.clone());
		node.local_name = Some(name);
		node
	}

	/// Creates a namespaced element; `qualified_name` may carry a `prefix:`.
	pub fn element_ns(namespace_uri: impl Into<String>, qualified_name: impl Into<String>) -> Self {
		let qualified_name = qualified_name.into();
		let (prefix, local) = split_qualified(&qualified_name);
		let mut node = Self::with_kind(NodeKind::Element, qualified_name.clone());
		node.namespace_uri = Some(namespace_uri.into());
		node.prefix = prefix;
		node.local_name = Some(local);
		node
	}

	/// Creates an attribute node.
	pub fn attribute(name: impl Into<String>, value: impl Into<String>) -> Self {
		let name = name.into();
		let mut node = Self::with_kind(NodeKind::Attribute, name.clone());
		node.local_name = Some(name);
		node.value = Some(value.into());
		node
	}

	/// Creates a text node.
	pub fn text(content: impl Into<String>) -> Self {
		let mut node = Self::with_kind(NodeKind::Text, "#text");
		node.value = Some(content.into());
		node
	}

	/// Creates a CDATA section.
	pub fn cdata(content: impl Into<String>) -> Self {
		let mut node = Self::with_kind(NodeKind::CData, "#cdata-section");
		node.value = Some(content.into());
		node
	}

	/// Creates a comment node.
	pub fn comment(content: impl Into<String>) -> Self {
		let mut node = Self::with_kind(NodeKind::Comment, "#comment");
		node.value = Some(content.into());
		node
	}

	/// Creates a processing instruction.
	pub fn processing_instruction(target: impl Into<String>, data: impl Into<String>) -> Self {
		let mut node = Self::with_kind(NodeKind::ProcessingInstruction, target);
		node.value = Some(data.into());
		node
	}

	/// Creates an empty document node.
	pub fn document() -> Self {
		Self::with_kind(NodeKind::Document, "#document")
	}

	/// Adds an attribute, builder style.
	pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.attributes.push(Self::attribute(name, value));
		self
	}

	/// Appends a child, builder style.
	pub fn with_child(mut self, child: Node) -> Self {
		self.children.push(child);
		self
	}

	/// Appends a child in place.
	pub fn append_child(&mut self, child: Node) {
		self.children.push(child);
	}

	/// Sets the node value in place.
	pub fn set_value(&mut self, value: Option<String>) {
		self.value = value;
	}

	pub fn kind(&self) -> NodeKind {
		self.kind
	}

	pub fn namespace_uri(&self) -> Option<&str> {
		self.namespace_uri.as_deref()
	}

	pub fn prefix(&self) -> Option<&str> {
		self.prefix.as_deref()
	}

	pub fn local_name(&self) -> Option<&str> {
		self.local_name.as_deref()
	}

	/// Returns the qualified node name (`prefix:local`, or `#text` etc.).
	pub fn node_name(&self) -> &str {
		&self.node_name
	}

	pub fn value(&self) -> Option<&str> {
		self.value.as_deref()
	}

	pub fn attributes(&self) -> &[Node] {
		&self.attributes
	}

	pub fn children(&self) -> &[Node] {
		&self.children
	}
}

fn split_qualified(qualified_name: &str) -> (Option<String>, String) {
	match qualified_name.split_once(':') {
		Some((prefix, local)) => (Some(prefix.to_string()), local.to_string()),
		None => (None, qualified_name.to_string()),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn qualified_names_split() {
		let node = Node::element_ns("urn:x", "x:item");
		assert_eq!(node.prefix(), Some("x"));
		assert_eq!(node.local_name(), Some("item"));
		assert_eq!(node.node_name(), "x:item");
		assert_eq!(node.namespace_uri(), Some("urn:x"));
	}

	#[test]
	fn builder_collects_children_and_attributes() {
		let node = Node::element("root")
			.with_attribute("id", "1")
			.with_child(Node::text("hi"))
			.with_child(Node::comment("c"));
		assert_eq!(node.attributes().len(), 1);
		assert_eq!(node.attributes()[0].value(), Some("1"));
		assert_eq!(node.children().len(), 2);
		assert_eq!(node.children()[0].kind(), NodeKind::Text);
	}
}
