//! Type-directed value equality.
//!
//! Values take part through the [`Comparable`] model. Two registries
//! dispatch on a value's runtime type:
//!
//! - [`EqualityRegistry`] decides whether two values are equal, using
//!   registered [`EqualityRule`]s where a type's native equality falls short
//!   (decimals that differ only in scale, text buffers, atomics, arrays).
//! - [`HashRegistry`] produces hash codes consistent with it.
//!
//! [`CollectionEquality`] compares containers structurally across concrete
//! types, and [`compare`] holds the null-safe scalar helpers.
//!
//! Rules come from the builtin [`RuleGroup`]s, from plugins submitted with
//! [`equality_plugin!`] and [`hash_plugin!`], and from explicit registration.
//!
//! ```
//! use commons_equality::EqualityRegistry;
//! use commons_primitives::Decimal;
//!
//! let registry = EqualityRegistry::new();
//! let a: Decimal = "5.5".parse().unwrap();
//! let b: Decimal = "5.50".parse().unwrap();
//! assert!(registry.equals(&a, &b));
//! assert!(!registry.equals(&1i32, &1i64));
//! ```

mod builtins;
mod collections;
pub mod compare;
pub mod config;
mod dispatch;
mod error;
mod hash;
pub mod plugin;
mod registry;
#[cfg(test)]
mod test_support;
mod value;

pub use collections::CollectionEquality;
pub use config::{RegistryConfig, RuleGroup, RuleGroups};
pub use dispatch::Registrar;
pub use error::{Change, ConfigError, EqualityError, Operand, RegisterOutcome};
pub use hash::{
	FnHashRule, HashCodeGenerator, HashRegistrar, HashRegistry, HashRule, hash_rule, hash_rule_with,
};
pub use plugin::{EqualityPlugin, HashPlugin};
pub use registry::{
	EqualityRegistrar, EqualityRegistry, EqualityRule, FnRule, typed_rule, typed_rule_with,
};
pub use value::{
	ArrayView, CollectionView, Comparable, Component, ContainerKind, Element, Entries, Item, Items,
	MapView, Obj, ScalarKind, Scalars, SequenceView, Shape, TypeDesc, TypeKey, downcast, markers,
	shape_of,
};

#[doc(hidden)]
pub use inventory;
