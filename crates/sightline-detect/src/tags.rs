//! Tag classes shared by the pruner, the path collector and the analyzer.

use sightline_dom::{DomTree, NodeId};

/// Elements that never carry visible text of their own and are never
/// treated as content: metadata, embedded resources and line breaks.
pub const NON_STYLABLE_TAGS: [&str; 10] = [
    "script", "style", "meta", "link", "noscript", "svg", "img", "title", "br", "hr",
];

/// Whether `tag` is one of [`NON_STYLABLE_TAGS`].
#[must_use]
pub fn is_non_stylable(tag: &str) -> bool {
    NON_STYLABLE_TAGS.contains(&tag)
}

/// True for an element whose tag is not in [`NON_STYLABLE_TAGS`].
#[must_use]
pub fn is_stylable_element(tree: &DomTree, id: NodeId) -> bool {
    tree.tag_name(id).is_some_and(|tag| !is_non_stylable(tag))
}
