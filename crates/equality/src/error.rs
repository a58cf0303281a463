//! Error types for registration, structural comparison and configuration.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Which argument of a binary comparison an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
	First,
	Second,
}

impl fmt::Display for Operand {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::First => f.write_str("first"),
			Self::Second => f.write_str("second"),
		}
	}
}

/// Caller misuse of the equality and hash registries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EqualityError {
	/// A rule was registered against the universal root type.
	#[error("cannot register a {registry} rule for the root type `{type_name}`")]
	RootRegistration {
		/// Label of the registry that rejected the rule.
		registry: &'static str,
		/// Name of the rejected key.
		type_name: &'static str,
	},

	/// A non-container value reached the structural comparison path.
	#[error("{operand} operand of type `{type_name}` is not a container")]
	NotAContainer {
		operand: Operand,
		type_name: &'static str,
	},

	/// A discovered plugin failed while registering its rules.
	#[error("plugin `{plugin}` failed: {source}")]
	Plugin {
		plugin: &'static str,
		#[source]
		source: Box<EqualityError>,
	},
}

/// Result of a single registration attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterOutcome {
	/// The key was free; the rule is now active.
	Inserted,
	/// The identical rule was already registered for the key.
	Unchanged,
	/// A different rule already owns the key and stays active.
	KeptExisting,
}

/// Whether an operation modified state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
	Changed,
	Unchanged,
}

impl Change {
	pub fn is_changed(self) -> bool {
		self == Self::Changed
	}
}

/// Errors that can occur when loading registry configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error parsing TOML syntax or shape.
	#[error("TOML parse error: {0}")]
	Parse(#[from] toml::de::Error),

	/// Error reading a configuration file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},
}
