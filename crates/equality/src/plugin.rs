//! Rule providers discovered at link time.
//!
//! Crates contribute rules without the registries knowing about them by
//! submitting a descriptor with [`equality_plugin!`](crate::equality_plugin)
//! or [`hash_plugin!`](crate::hash_plugin). Registries run every submitted
//! plugin after the builtin groups, ordered by priority and then name, each
//! with an additive [`Registrar`](crate::Registrar).

use tracing::{debug, warn};

use crate::config::RegistryConfig;
use crate::error::EqualityError;
use crate::hash::HashRegistrar;
use crate::registry::EqualityRegistrar;

/// A plugin contributing equality rules.
pub struct EqualityPlugin {
	/// Unique plugin name, matched against `skip_plugins`.
	pub name: &'static str,
	/// Lower priorities run first.
	pub priority: i32,
	pub register: fn(&EqualityRegistrar<'_>) -> Result<(), EqualityError>,
}

inventory::collect!(EqualityPlugin);

impl EqualityPlugin {
	pub const fn new(
		name: &'static str,
		priority: i32,
		register: fn(&EqualityRegistrar<'_>) -> Result<(), EqualityError>,
	) -> Self {
		Self {
			name,
			priority,
			register,
		}
	}
}

/// A plugin contributing hash rules.
pub struct HashPlugin {
	pub name: &'static str,
	pub priority: i32,
	pub register: fn(&HashRegistrar<'_>) -> Result<(), EqualityError>,
}

inventory::collect!(HashPlugin);

impl HashPlugin {
	pub const fn new(
		name: &'static str,
		priority: i32,
		register: fn(&HashRegistrar<'_>) -> Result<(), EqualityError>,
	) -> Self {
		Self {
			name,
			priority,
			register,
		}
	}
}

/// What to do when a plugin's registration fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OnFailure {
	/// Log the failure and continue with the next plugin.
	Skip,
	/// Stop and return the failure.
	Abort,
}

/// Submitted equality plugins in run order.
pub fn equality_plugins() -> Vec<&'static EqualityPlugin> {
	let mut plugins: Vec<&'static EqualityPlugin> = inventory::iter::<EqualityPlugin>.into_iter().collect();
	plugins.sort_by(|a, b| a.priority.cmp(&b.priority).then_with(|| a.name.cmp(b.name)));
	plugins
}

/// Submitted hash plugins in run order.
pub fn hash_plugins() -> Vec<&'static HashPlugin> {
	let mut plugins: Vec<&'static HashPlugin> = inventory::iter::<HashPlugin>.into_iter().collect();
	plugins.sort_by(|a, b| a.priority.cmp(&b.priority).then_with(|| a.name.cmp(b.name)));
	plugins
}

pub(crate) fn run_equality_plugins(
	registrar: &EqualityRegistrar<'_>,
	config: &RegistryConfig,
	on_failure: OnFailure,
) -> Result<(), EqualityError> {
	if !config.discover_plugins {
		return Ok(());
	}
	for plugin in equality_plugins() {
		run_one(registrar.registry(), plugin.name, config, on_failure, || (plugin.register)(registrar))?;
	}
	Ok(())
}

pub(crate) fn run_hash_plugins(
	registrar: &HashRegistrar<'_>,
	config: &RegistryConfig,
	on_failure: OnFailure,
) -> Result<(), EqualityError> {
	if !config.discover_plugins {
		return Ok(());
	}
	for plugin in hash_plugins() {
		run_one(registrar.registry(), plugin.name, config, on_failure, || (plugin.register)(registrar))?;
	}
	Ok(())
}

fn run_one(
	registry: &'static str,
	plugin: &'static str,
	config: &RegistryConfig,
	on_failure: OnFailure,
	register: impl FnOnce() -> Result<(), EqualityError>,
) -> Result<(), EqualityError> {
	if !config.runs_plugin(plugin) {
		debug!(registry, plugin, "plugin skipped by configuration");
		return Ok(());
	}
	match register() {
		Ok(()) => {
			debug!(registry, plugin, "plugin registered");
			Ok(())
		}
		Err(error) => match on_failure {
			OnFailure::Skip => {
				warn!(registry, plugin, %error, "plugin failed; skipping");
				Ok(())
			}
			OnFailure::Abort => Err(EqualityError::Plugin {
				plugin,
				source: Box::new(error),
			}),
		},
	}
}

/// Submits an [`EqualityPlugin`] for discovery.
///
/// ```
/// use commons_equality::{EqualityRegistrar, EqualityError, equality_plugin};
///
/// #[derive(Debug, PartialEq, Hash)]
/// struct Cents(i64);
///
/// commons_equality::comparable_value! {
/// 	Cents => [];
/// }
///
/// fn register(registrar: &EqualityRegistrar<'_>) -> Result<(), EqualityError> {
/// 	registrar.register_fn(|a: &Cents, b: &Cents| a.0 / 100 == b.0 / 100)?;
/// 	Ok(())
/// }
///
/// equality_plugin!("cents", register);
/// ```
#[macro_export]
macro_rules! equality_plugin {
	($name:literal, priority = $priority:expr, $register:expr $(,)?) => {
		$crate::inventory::submit! {
			$crate::EqualityPlugin::new($name, $priority, $register)
		}
	};
	($name:literal, $register:expr $(,)?) => {
		$crate::equality_plugin!($name, priority = 0, $register);
	};
}

/// Submits a [`HashPlugin`] for discovery.
#[macro_export]
macro_rules! hash_plugin {
	($name:literal, priority = $priority:expr, $register:expr $(,)?) => {
		$crate::inventory::submit! {
			$crate::HashPlugin::new($name, $priority, $register)
		}
	};
	($name:literal, $register:expr $(,)?) => {
		$crate::hash_plugin!($name, priority = 0, $register);
	};
}
