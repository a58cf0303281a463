//! Corrective rules for types whose native equality is unsuitable for value
//! comparison.
//!
//! Each [`RuleGroup`] installs an equality rule and a matching hash rule, so
//! the two registries stay consistent when configured alike.

mod arrays;
mod atomic;
mod containers;
mod dom;
mod locator;
mod numeric;
mod path;
mod text;

use crate::config::{RuleGroup, RuleGroups};
use crate::error::EqualityError;
use crate::hash::HashRegistrar;
use crate::registry::EqualityRegistrar;

type EqualityInstaller = fn(&EqualityRegistrar<'_>) -> Result<(), EqualityError>;
type HashInstaller = fn(&HashRegistrar<'_>) -> Result<(), EqualityError>;

/// The installers of one builtin group.
struct Group {
	group: RuleGroup,
	equality: EqualityInstaller,
	hash: HashInstaller,
}

const GROUPS: [Group; 10] = [
	Group {
		group: RuleGroup::Decimals,
		equality: numeric::decimal_equality,
		hash: numeric::decimal_hash,
	},
	Group {
		group: RuleGroup::Floats,
		equality: numeric::float_equality,
		hash: numeric::float_hash,
	},
	Group {
		group: RuleGroup::TextBuffers,
		equality: text::buffer_equality,
		hash: text::buffer_hash,
	},
	Group {
		group: RuleGroup::Urls,
		equality: locator::url_equality,
		hash: locator::url_hash,
	},
	Group {
		group: RuleGroup::Atomics,
		equality: atomic::atomic_equality,
		hash: atomic::atomic_hash,
	},
	Group {
		group: RuleGroup::Arrays,
		equality: arrays::array_equality,
		hash: arrays::array_hash,
	},
	Group {
		group: RuleGroup::Containers,
		equality: containers::container_equality,
		hash: containers::container_hash,
	},
	Group {
		group: RuleGroup::Paths,
		equality: path::path_equality,
		hash: path::path_hash,
	},
	Group {
		group: RuleGroup::Locales,
		equality: text::locale_equality,
		hash: text::locale_hash,
	},
	Group {
		group: RuleGroup::Dom,
		equality: dom::node_equality,
		hash: dom::node_hash,
	},
];

/// Installs the equality rules of every group in `groups`.
pub(crate) fn install_equality(registrar: &EqualityRegistrar<'_>, groups: RuleGroups) -> Result<(), EqualityError> {
	for entry in GROUPS.iter().filter(|entry| groups.contains(entry.group.as_set())) {
		(entry.equality)(registrar)?;
	}
	Ok(())
}

/// Installs the hash rules of every group in `groups`.
pub(crate) fn install_hash(registrar: &HashRegistrar<'_>, groups: RuleGroups) -> Result<(), EqualityError> {
	for entry in GROUPS.iter().filter(|entry| groups.contains(entry.group.as_set())) {
		(entry.hash)(registrar)?;
	}
	Ok(())
}

#[cfg(test)]
mod tests;
