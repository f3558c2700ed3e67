//! Tests for tree mutation and the text-gathering helpers used by analysis.

use sightline_dom::{DomTree, ElementData, NodeId, NodeType};

/// Helper to create an element node and return its NodeId.
fn alloc_element(tree: &mut DomTree, tag: &str) -> NodeId {
    tree.alloc(NodeType::Element(ElementData::new(tag)))
}

fn alloc_text(tree: &mut DomTree, text: &str) -> NodeId {
    tree.alloc(NodeType::Text(text.to_string()))
}

// ========== remove_child ==========

#[test]
fn test_remove_child_detaches_subtree() {
    let mut tree = DomTree::new();
    let parent = alloc_element(&mut tree, "div");
    tree.append_child(NodeId::ROOT, parent);

    let a = alloc_element(&mut tree, "a");
    let b = alloc_element(&mut tree, "b");
    let c = alloc_element(&mut tree, "c");
    tree.append_child(parent, a);
    tree.append_child(parent, b);
    tree.append_child(parent, c);
    let inner = alloc_text(&mut tree, "inside b");
    tree.append_child(b, inner);

    tree.remove_child(parent, b);

    assert_eq!(tree.children(parent), &[a, c]);
    assert_eq!(tree.parent(b), None);
    // Subtree stays intact but is no longer reachable from the root
    assert_eq!(tree.children(b), &[inner]);
    assert!(!tree.descendants(NodeId::ROOT).any(|id| id == inner));
}

#[test]
fn test_retain_children_detaches_in_one_pass() {
    let mut tree = DomTree::new();
    let parent = alloc_element(&mut tree, "tr");
    tree.append_child(NodeId::ROOT, parent);
    let cells: Vec<NodeId> = (0..5)
        .map(|_| {
            let td = alloc_element(&mut tree, "td");
            tree.append_child(parent, td);
            td
        })
        .collect();

    let removed = tree.retain_children(parent, |id| id == cells[1] || id == cells[3]);

    assert_eq!(removed, 3);
    assert_eq!(tree.children(parent), &[cells[1], cells[3]]);
    assert_eq!(tree.parent(cells[0]), None);
    assert_eq!(tree.parent(cells[1]), Some(parent));
}

#[test]
fn test_remove_child_not_a_child_is_noop() {
    let mut tree = DomTree::new();
    let p1 = alloc_element(&mut tree, "p");
    let p2 = alloc_element(&mut tree, "p");
    tree.append_child(NodeId::ROOT, p1);
    tree.append_child(NodeId::ROOT, p2);

    tree.remove_child(p1, p2);

    assert_eq!(tree.parent(p2), Some(NodeId::ROOT));
    assert_eq!(tree.children(NodeId::ROOT), &[p1, p2]);
}

// ========== traversal ==========

#[test]
fn test_descendants_are_preorder() {
    let mut tree = DomTree::new();
    let html = alloc_element(&mut tree, "html");
    let body = alloc_element(&mut tree, "body");
    let p = alloc_element(&mut tree, "p");
    let text = alloc_text(&mut tree, "hi");
    let span = alloc_element(&mut tree, "span");
    tree.append_child(NodeId::ROOT, html);
    tree.append_child(html, body);
    tree.append_child(body, p);
    tree.append_child(p, text);
    tree.append_child(body, span);

    let order: Vec<NodeId> = tree.descendants(NodeId::ROOT).collect();
    assert_eq!(order, vec![html, body, p, text, span]);

    let ancestors: Vec<NodeId> = tree.ancestors(text).collect();
    assert_eq!(ancestors, vec![p, body, html, NodeId::ROOT]);
}

#[test]
fn test_content_root_prefers_body() {
    let mut tree = DomTree::new();
    assert_eq!(tree.content_root(), NodeId::ROOT);

    let div = alloc_element(&mut tree, "div");
    tree.append_child(NodeId::ROOT, div);
    let body = alloc_element(&mut tree, "BODY");
    tree.append_child(div, body);

    assert_eq!(tree.body(), Some(body));
    assert_eq!(tree.content_root(), body);
}

// ========== text helpers ==========

#[test]
fn test_direct_text_ignores_child_elements() {
    let mut tree = DomTree::new();
    let p = alloc_element(&mut tree, "p");
    tree.append_child(NodeId::ROOT, p);
    let t1 = alloc_text(&mut tree, "  Hello ");
    let b = alloc_element(&mut tree, "b");
    let bold = alloc_text(&mut tree, "bold");
    let ws = alloc_text(&mut tree, " \n ");
    let t2 = alloc_text(&mut tree, "world");
    tree.append_child(p, t1);
    tree.append_child(p, b);
    tree.append_child(b, bold);
    tree.append_child(p, ws);
    tree.append_child(p, t2);

    assert!(tree.has_direct_text(p));
    assert_eq!(tree.direct_text(p), "Hello world");
    assert!(!tree.has_direct_text(NodeId::ROOT));
}

#[test]
fn test_stripped_strings_skips_script_and_comments() {
    let mut tree = DomTree::new();
    let a = tree.alloc(NodeType::Element(
        ElementData::new("a").with_attr("HREF", "https://example.com"),
    ));
    tree.append_child(NodeId::ROOT, a);
    let t1 = alloc_text(&mut tree, " Click ");
    let span = alloc_element(&mut tree, "span");
    let t2 = alloc_text(&mut tree, "here");
    let script = alloc_element(&mut tree, "script");
    let code = alloc_text(&mut tree, "var x = 1;");
    let comment = tree.alloc(NodeType::Comment("note".to_string()));
    tree.append_child(a, t1);
    tree.append_child(a, span);
    tree.append_child(span, t2);
    tree.append_child(a, script);
    tree.append_child(script, code);
    tree.append_child(a, comment);

    assert_eq!(tree.stripped_strings(a), vec!["Click", "here"]);
    assert_eq!(
        tree.as_element(a).and_then(|e| e.attr("href")),
        Some("https://example.com")
    );
    assert_eq!(tree.as_comment(comment), Some("note"));
}
