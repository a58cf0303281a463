//! Marker types naming the abstract interfaces of the runtime type model.
//!
//! Markers are uninhabited; only their [`TypeKey`](super::TypeKey) is used.
//! Downstream crates can declare further markers the same way.

/// The universal root type. Rules can never be registered against it.
pub enum Object {}

/// Any finite collection of elements.
pub enum Collection {}

/// An ordered collection.
pub enum List {}

/// A collection without duplicates.
pub enum Set {}

/// A key/value association.
pub enum Map {}

/// A partially consumed sequence.
pub enum Iterator {}

/// A type that can produce its elements repeatedly.
pub enum Iterable {}

/// A legacy cursor-style sequence.
pub enum Enumeration {}

/// A numeric value.
pub enum Number {}

/// A readable sequence of characters.
pub enum CharSequence {}

/// A node of a DOM tree.
pub enum Node {}
