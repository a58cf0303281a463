//! Cursor-based element sequences.

use std::sync::atomic::{AtomicUsize, Ordering};

/// A one-pass sequence over owned elements with a shared cursor.
///
/// Unlike [`Iterator`], advancing takes `&self`, so an enumeration can be
/// handed out by reference and drained by whoever holds it. Consumed
/// elements stay owned by the enumeration.
#[derive(Debug)]
pub struct Enumeration<T> {
	items: Vec<T>,
	cursor: AtomicUsize,
}

impl<T> Enumeration<T> {
	/// Creates an enumeration positioned before the first element.
	pub fn new(items: Vec<T>) -> Self {
		Self {
			items,
			cursor: AtomicUsize::new(0),
		}
	}

	/// Returns true if [`Enumeration::next_element`] would yield an element.
	pub fn has_more_elements(&self) -> bool {
		self.cursor.load(Ordering::Acquire) < self.items.len()
	}

	/// Advances the cursor and returns the element it passed over.
	pub fn next_element(&self) -> Option<&T> {
		let len = self.items.len();
		let index = self
			.cursor
			.fetch_update(Ordering::AcqRel, Ordering::Acquire, |at| (at < len).then_some(at + 1))
			.ok()?;
		self.items.get(index)
	}

	/// Returns the elements not yet consumed.
	pub fn remaining(&self) -> &[T] {
		let at = self.cursor.load(Ordering::Acquire).min(self.items.len());
		&self.items[at..]
	}
}

impl<T> FromIterator<T> for Enumeration<T> {
	fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
		Self::new(iter.into_iter().collect())
	}
}
