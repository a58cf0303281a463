//! Value types shared across the commons crates: fixed-point decimals,
//! locale identifiers, cursor-based enumerations and a minimal DOM tree.

/// Fixed-point decimal numbers.
pub mod decimal;
/// Minimal DOM node tree.
pub mod dom;
/// Cursor-based element sequences.
pub mod enumeration;
/// Locale identifiers.
pub mod locale;

pub use decimal::{Decimal, ParseDecimalError};
pub use dom::{Node, NodeKind};
pub use enumeration::Enumeration;
pub use locale::Locale;
