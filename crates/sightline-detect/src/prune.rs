//! Removal of empty subtrees before analysis.
//!
//! Spacer cells, empty wrappers and stray `<br>`s carry no text but would
//! still produce leaf paths. They are detached from the tree once, bottom-up,
//! starting at the content root.

use sightline_dom::{DomTree, ElementData, NodeId, NodeType};
use sightline_html::is_conditional_block;

use crate::tags::is_stylable_element;

/// Detach every element under the content root that has no rendered text
/// and no stylable child left. The content root itself is always kept.
///
/// Runs as one bottom-up pass over an explicit node list, so the depth of
/// the markup costs neither stack nor repeated subtree scans.
///
/// Returns the number of subtrees removed; running it again on the result
/// removes nothing.
pub fn prune_tree(tree: &mut DomTree) -> usize {
    let root = tree.content_root();
    let order: Vec<NodeId> = std::iter::once(root).chain(tree.descendants(root)).collect();

    // Indexed by node id. A node's flags are final once all its
    // descendants, which precede it in reverse pre-order, are settled.
    let mut has_text = vec![false; tree.len()];
    let mut empty = vec![false; tree.len()];
    let mut removed = 0;

    for &id in order.iter().rev() {
        let (text, is_container) = match tree.get(id).map(|n| &n.node_type) {
            Some(NodeType::Text(data)) => (is_rendered_text(tree, id, data), false),
            Some(NodeType::Element(_) | NodeType::Document) => (
                tree.children(id).iter().any(|c| has_text[c.0]),
                true,
            ),
            // Comments are never removed on their own.
            _ => (false, false),
        };
        has_text[id.0] = text;
        if !is_container {
            continue;
        }

        removed += tree.retain_children(id, |child| !empty[child.0]);
        empty[id.0] = !text && !has_meaningful_child(tree, id);
    }

    if removed > 0 {
        log::debug!("pruned {removed} empty subtrees");
    }
    removed
}

/// Non-whitespace text outside `script`/`style` source.
fn is_rendered_text(tree: &DomTree, id: NodeId, data: &str) -> bool {
    !data.trim().is_empty()
        && !tree
            .parent(id)
            .and_then(|p| tree.as_element(p))
            .is_some_and(ElementData::is_raw_text)
}

/// A stylable element child, or a merged conditional block whose content
/// is analyzed later.
fn has_meaningful_child(tree: &DomTree, id: NodeId) -> bool {
    tree.children(id).iter().any(|&child| {
        is_stylable_element(tree, child) || tree.as_comment(child).is_some_and(is_conditional_block)
    })
}
