//! HTML parser module for tree construction.

/// Forgiving tree builder.
pub mod builder;
/// Debug dump of a parsed tree.
pub mod print;

pub use builder::{HTMLParser, ParseIssue, VOID_ELEMENTS};
pub use print::print_tree;
