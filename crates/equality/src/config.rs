//! Registry configuration.
//!
//! ```toml
//! disabled_groups = ["paths", "dom"]
//! discover_plugins = true
//! skip_plugins = ["legacy-money"]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// A builtin group of corrective rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleGroup {
	/// Numeric, scale-insensitive decimal comparison.
	Decimals,
	/// Canonical-bit comparison of `f32`/`f64`.
	Floats,
	/// Content comparison of lock-guarded string buffers.
	TextBuffers,
	/// URL comparison by serialized form.
	Urls,
	/// Atomic comparison by current value.
	Atomics,
	/// Element-wise comparison of scalar arrays.
	Arrays,
	/// Structural comparison of collections, maps, iterators and
	/// enumerations.
	Containers,
	/// Path comparison by canonical form.
	Paths,
	/// Locale comparison by normalized tag.
	Locales,
	/// Deep DOM node comparison.
	Dom,
}

impl RuleGroup {
	/// Every group, in installation order.
	pub const ALL: [RuleGroup; 10] = [
		Self::Decimals,
		Self::Floats,
		Self::TextBuffers,
		Self::Urls,
		Self::Atomics,
		Self::Arrays,
		Self::Containers,
		Self::Paths,
		Self::Locales,
		Self::Dom,
	];

	/// Returns the bitflag for this group.
	pub const fn as_set(self) -> RuleGroups {
		match self {
			Self::Decimals => RuleGroups::DECIMALS,
			Self::Floats => RuleGroups::FLOATS,
			Self::TextBuffers => RuleGroups::TEXT_BUFFERS,
			Self::Urls => RuleGroups::URLS,
			Self::Atomics => RuleGroups::ATOMICS,
			Self::Arrays => RuleGroups::ARRAYS,
			Self::Containers => RuleGroups::CONTAINERS,
			Self::Paths => RuleGroups::PATHS,
			Self::Locales => RuleGroups::LOCALES,
			Self::Dom => RuleGroups::DOM,
		}
	}
}

bitflags::bitflags! {
	/// A set of builtin rule groups.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
	pub struct RuleGroups: u16 {
		const DECIMALS = 1 << 0;
		const FLOATS = 1 << 1;
		const TEXT_BUFFERS = 1 << 2;
		const URLS = 1 << 3;
		const ATOMICS = 1 << 4;
		const ARRAYS = 1 << 5;
		const CONTAINERS = 1 << 6;
		const PATHS = 1 << 7;
		const LOCALES = 1 << 8;
		const DOM = 1 << 9;
	}
}

impl From<RuleGroup> for RuleGroups {
	fn from(group: RuleGroup) -> Self {
		group.as_set()
	}
}

impl FromIterator<RuleGroup> for RuleGroups {
	fn from_iter<I: IntoIterator<Item = RuleGroup>>(iter: I) -> Self {
		let mut set = RuleGroups::empty();
		for group in iter {
			set |= group.as_set();
		}
		set
	}
}

/// How a registry populates itself on construction and reinitialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegistryConfig {
	/// Builtin groups to leave out.
	pub disabled_groups: Vec<RuleGroup>,
	/// Whether plugins submitted through `inventory` are run.
	pub discover_plugins: bool,
	/// Names of discovered plugins to leave out.
	pub skip_plugins: Vec<String>,
}

impl Default for RegistryConfig {
	fn default() -> Self {
		Self {
			disabled_groups: Vec::new(),
			discover_plugins: true,
			skip_plugins: Vec::new(),
		}
	}
}

impl RegistryConfig {
	/// Configuration with no builtin groups and no plugin discovery.
	pub fn bare() -> Self {
		Self {
			disabled_groups: RuleGroup::ALL.to_vec(),
			discover_plugins: false,
			skip_plugins: Vec::new(),
		}
	}

	pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
		Ok(toml::from_str(source)?)
	}

	/// Reads and parses a TOML configuration file.
	pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let path = path.as_ref();
		let source = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		Self::from_toml_str(&source)
	}

	/// Builtin groups left enabled.
	pub fn enabled_groups(&self) -> RuleGroups {
		RuleGroups::all().difference(self.disabled_groups.iter().copied().collect())
	}

	/// Whether the discovered plugin `name` should run.
	pub fn runs_plugin(&self, name: &str) -> bool {
		self.discover_plugins && !self.skip_plugins.iter().any(|skipped| skipped == name)
	}
}
