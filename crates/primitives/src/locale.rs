//! Locale identifiers.

use std::fmt;

/// A locale identifier as written by its producer, e.g. `en_US`, `de-at` or
/// `zh-hant-TW`.
///
/// Equality under `==` compares the raw tag. [`Locale::normalized`] yields
/// the canonical `language[_Script][_REGION][_variant...]` form used when
/// comparing locales by value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locale {
	tag: String,
}

impl Locale {
	/// Wraps a raw locale tag.
	pub fn new(tag: impl Into<String>) -> Self {
		Self { tag: tag.into() }
	}

	/// Returns the tag exactly as given.
	pub fn as_str(&self) -> &str {
		&self.tag
	}

	/// Returns the language subtag, lowercased.
	pub fn language(&self) -> String {
		self.subtags().next().unwrap_or_default().to_ascii_lowercase()
	}

	/// Returns the region subtag, uppercased, if present.
	pub fn region(&self) -> Option<String> {
		self.subtags()
			.skip(1)
			.find(|part| is_region(part))
			.map(str::to_ascii_uppercase)
	}

	/// Returns the canonical string form.
	pub fn normalized(&self) -> String {
		let mut parts = self.subtags();
		let mut out = parts.next().unwrap_or_default().to_ascii_lowercase();
		for part in parts {
			out.push('_');
			if is_script(part) {
				let mut chars = part.chars();
				if let Some(first) = chars.next() {
					out.push(first.to_ascii_uppercase());
					out.extend(chars.map(|c| c.to_ascii_lowercase()));
				}
			} else if is_region(part) {
				out.push_str(&part.to_ascii_uppercase());
			} else {
				out.push_str(part);
			}
		}
		out
	}

	fn subtags(&self) -> impl Iterator<Item = &str> {
		self.tag.split(['_', '-']).filter(|part| !part.is_empty())
	}
}

fn is_script(part: &str) -> bool {
	part.len() == 4 && part.chars().all(|c| c.is_ascii_alphabetic())
}

fn is_region(part: &str) -> bool {
	(part.len() == 2 && part.chars().all(|c| c.is_ascii_alphabetic()))
		|| (part.len() == 3 && part.chars().all(|c| c.is_ascii_digit()))
}

impl fmt::Display for Locale {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.tag)
	}
}

impl From<&str> for Locale {
	fn from(tag: &str) -> Self {
		Self::new(tag)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn normalizes_case_and_separators() {
		assert_eq!(Locale::new("en-us").normalized(), "en_US");
		assert_eq!(Locale::new("EN_US").normalized(), "en_US");
		assert_eq!(Locale::new("zh-hant-tw").normalized(), "zh_Hant_TW");
		assert_eq!(Locale::new("es-419").normalized(), "es_419");
		assert_eq!(Locale::new("de").normalized(), "de");
	}

	#[test]
	fn raw_equality_is_textual() {
		assert_ne!(Locale::new("en-us"), Locale::new("en_US"));
		assert_eq!(Locale::new("en_US"), Locale::from("en_US"));
	}

	#[test]
	fn parts() {
		let locale = Locale::new("pt-br");
		assert_eq!(locale.language(), "pt");
		assert_eq!(locale.region().as_deref(), Some("BR"));
		assert_eq!(Locale::new("fr").region(), None);
	}
}
