//! Tree construction.

/// Caller-supplied subtree suppression rules.
pub mod suppression;
/// Recursive-descent tree builder.
pub mod tree_builder;

pub use suppression::{ParserConfig, SuppressionAction, SuppressionRule};
pub use tree_builder::{Parser, VOID_ELEMENTS, is_void_element};
