//! Leaf-path collection.
//!
//! A leaf is the smallest unit whose visibility is judged on its own: an
//! element with text of its own, or an element whose whole subtree holds
//! nothing stylable. A path runs from the content root down to such a leaf,
//! so the analyzer can replay the cascade along it.

use std::collections::VecDeque;

use sightline_dom::{DomTree, NodeId, NodeType};

use crate::tags::{is_non_stylable, is_stylable_element};

/// Nodes from the content root down to a leaf, root first.
pub type LeafPath = Vec<NodeId>;

/// Breadth-first walk from the content root collecting every leaf path.
///
/// Text, comments and non-stylable elements are never part of a path. A
/// leaf ends its path: nothing below it is visited, so nested elements
/// inside a node with text of its own are judged with that node. Paths are
/// in breadth-first discovery order.
#[must_use]
pub fn collect_leaf_paths(tree: &DomTree) -> Vec<LeafPath> {
    let root = tree.content_root();
    let mut paths = Vec::new();
    if !is_path_node(tree, root, root) {
        return paths;
    }
    let mut queue: VecDeque<NodeId> = VecDeque::from([root]);

    while let Some(id) = queue.pop_front() {
        if is_leaf(tree, id) {
            paths.push(path_to(tree, root, id));
            continue;
        }
        queue.extend(
            tree.children(id)
                .iter()
                .copied()
                .filter(|&child| is_stylable_element(tree, child)),
        );
    }

    log::debug!("collected {} leaf paths", paths.len());
    paths
}

/// Stylable elements, plus the document node when it is the content root.
fn is_path_node(tree: &DomTree, id: NodeId, root: NodeId) -> bool {
    match tree.get(id).map(|n| &n.node_type) {
        Some(NodeType::Element(data)) => !is_non_stylable(&data.tag_name),
        Some(NodeType::Document) => id == root,
        _ => false,
    }
}

/// Rebuild the path from `root` down to `leaf` through parent links.
fn path_to(tree: &DomTree, root: NodeId, leaf: NodeId) -> LeafPath {
    let mut path: LeafPath = std::iter::once(leaf)
        .chain(tree.ancestors(leaf).take_while(|&id| id != root))
        .collect();
    if leaf != root {
        path.push(root);
    }
    path.reverse();
    path
}

/// A node is a leaf if it has non-whitespace text of its own, or if every
/// child is a non-stylable element with nothing stylable below it.
///
/// Only subtrees under non-stylable children are scanned, and the walk in
/// [`collect_leaf_paths`] never enters those, so each node is looked at a
/// bounded number of times.
#[must_use]
pub fn is_leaf(tree: &DomTree, id: NodeId) -> bool {
    if tree.has_direct_text(id) {
        return true;
    }
    tree.children(id).iter().all(|&child| {
        tree.tag_name(child).is_some_and(is_non_stylable)
            && !tree.descendants(child).any(|d| is_stylable_element(tree, d))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(tree: &DomTree, path: &LeafPath) -> Vec<String> {
        path.iter()
            .map(|&id| tree.tag_name(id).unwrap_or("#document").to_string())
            .collect()
    }

    fn rendered_paths(html: &str) -> Vec<Vec<String>> {
        let tree = sightline_html::parse(html);
        collect_leaf_paths(&tree)
            .iter()
            .map(|p| tags(&tree, p))
            .collect()
    }

    #[test]
    fn test_leaf_with_text_ends_its_path() {
        assert_eq!(
            rendered_paths("<body><div>a<span>b</span></div></body>"),
            vec![vec!["body", "div"]]
        );
    }

    #[test]
    fn test_paths_descend_through_wrappers() {
        assert_eq!(
            rendered_paths("<body><div><p>a</p><table><tr><td>b</td></tr></table></div></body>"),
            vec![
                vec!["body", "div", "p"],
                vec!["body", "div", "table", "tr", "td"],
            ]
        );
    }

    #[test]
    fn test_deep_nesting_yields_one_long_path() {
        let depth = 50_000;
        let html = format!("<body>{}x</body>", "<b>".repeat(depth));
        let tree = sightline_html::parse(&html);
        let paths = collect_leaf_paths(&tree);
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].len(), depth + 1);
    }

    #[test]
    fn test_document_root_without_body() {
        let tree = sightline_html::parse("hello");
        let paths = collect_leaf_paths(&tree);
        assert_eq!(paths, vec![vec![NodeId::ROOT]]);
    }

    #[test]
    fn test_leaf_rule() {
        let tree = sightline_html::parse("<div><br></div><div> <br></div><div><noscript><p>x</p></noscript></div>");
        let divs: Vec<NodeId> = tree.children(NodeId::ROOT).to_vec();
        assert!(is_leaf(&tree, divs[0]));
        // A whitespace text child is not a non-stylable element
        assert!(!is_leaf(&tree, divs[1]));
        assert!(!is_leaf(&tree, divs[2]));
    }
}
