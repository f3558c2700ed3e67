//! Integration tests for the tree builder and the conditional-comment pre-pass.

use sightline_dom::{DomTree, NodeId, NodeType};
use sightline_html::{merge_split_conditionals, parse, parse_conditional_block, parse_with_issues, print_tree};

/// Helper to get element by tag name (first match, depth-first)
fn find_element(tree: &DomTree, from: NodeId, tag: &str) -> Option<NodeId> {
    if let Some(data) = tree.as_element(from)
        && data.tag_name == tag
    {
        return Some(from);
    }
    for &child_id in tree.children(from) {
        if let Some(found) = find_element(tree, child_id, tag) {
            return Some(found);
        }
    }
    None
}

fn child_tags(tree: &DomTree, id: NodeId) -> Vec<String> {
    tree.children(id)
        .iter()
        .map(|&c| match tree.get(c).map(|n| &n.node_type) {
            Some(NodeType::Element(data)) => data.tag_name.clone(),
            Some(NodeType::Text(_)) => "#text".to_string(),
            Some(NodeType::Comment(_)) => "#comment".to_string(),
            _ => "?".to_string(),
        })
        .collect()
}

#[test]
fn test_no_implied_elements() {
    let tree = parse("<p>hi</p>");
    assert_eq!(child_tags(&tree, NodeId::ROOT), vec!["p"]);
    let p = find_element(&tree, NodeId::ROOT, "p").unwrap();
    assert_eq!(tree.direct_text(p), "hi");
    assert_eq!(tree.body(), None);
    assert_eq!(tree.content_root(), NodeId::ROOT);
}

#[test]
fn test_doctype_is_dropped() {
    let tree = parse("<!DOCTYPE html><html><body>x</body></html>");
    assert_eq!(child_tags(&tree, NodeId::ROOT), vec!["html"]);
    let body = find_element(&tree, NodeId::ROOT, "body").unwrap();
    assert_eq!(tree.content_root(), body);
}

#[test]
fn test_void_elements_do_not_open_scope() {
    let tree = parse("<div><br><img src=x>text</div>");
    let div = find_element(&tree, NodeId::ROOT, "div").unwrap();
    assert_eq!(child_tags(&tree, div), vec!["br", "img", "#text"]);
}

#[test]
fn test_unmatched_end_tag_is_ignored_and_reported() {
    let (tree, issues) = parse_with_issues("<p>a</span>b</p>");
    let p = find_element(&tree, NodeId::ROOT, "p").unwrap();
    // The two text runs merge into one node
    assert_eq!(child_tags(&tree, p), vec!["#text"]);
    assert_eq!(tree.direct_text(p), "ab");
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].message, "unmatched end tag </span>");
}

#[test]
fn test_end_tag_pops_to_matching_element() {
    let tree = parse("<div><b>bold<i>it</div>after");
    assert_eq!(child_tags(&tree, NodeId::ROOT), vec!["div", "#text"]);
    let i = find_element(&tree, NodeId::ROOT, "i").unwrap();
    let b = find_element(&tree, NodeId::ROOT, "b").unwrap();
    assert_eq!(tree.parent(i), Some(b));
}

#[test]
fn test_duplicate_attribute_first_wins() {
    let tree = parse(r#"<td bgcolor="red" BGCOLOR="blue">x</td>"#);
    let td = find_element(&tree, NodeId::ROOT, "td").unwrap();
    assert_eq!(tree.as_element(td).and_then(|e| e.attr("bgcolor")), Some("red"));
}

#[test]
fn test_merged_conditional_becomes_one_comment() {
    let html = "<body><!--[if mso]><p>A</p><![endif]--><p>visible</p><!--[if mso]><p>B</p><![endif]--></body>";
    let merged = merge_split_conditionals(html);
    let tree = parse(&merged);
    let body = tree.body().unwrap();
    assert_eq!(child_tags(&tree, body), vec!["#comment", "p"]);

    let comment = tree.children(body)[0];
    let data = tree.as_comment(comment).unwrap();
    assert_eq!(parse_conditional_block(data), Some(("mso", "<p>A</p><p>B</p>")));
}

#[test]
fn test_print_tree() {
    let tree = parse(r#"<p class="a" id="b">hi there</p><!--c-->"#);
    let mut out = String::new();
    print_tree(&tree, NodeId::ROOT, 0, &mut out).unwrap();
    assert_eq!(
        out,
        "Document\n  <p class=\"a\" id=\"b\">\n    \"hi\u{b7}there\"\n  <!-- c -->\n"
    );
}

/// Counts lines without keeping the output.
#[derive(Default)]
struct LineCounter {
    lines: usize,
}

impl std::fmt::Write for LineCounter {
    fn write_str(&mut self, s: &str) -> std::fmt::Result {
        self.lines += s.matches('\n').count();
        Ok(())
    }
}

#[test]
fn test_deep_nesting_parses_and_prints() {
    let depth = 10_000;
    let tree = parse(&format!("{}x", "<span>".repeat(depth)));
    // Document, every span, and the text
    assert_eq!(tree.len(), depth + 2);

    let mut counter = LineCounter::default();
    print_tree(&tree, NodeId::ROOT, 0, &mut counter).unwrap();
    assert_eq!(counter.lines, depth + 2);
}
