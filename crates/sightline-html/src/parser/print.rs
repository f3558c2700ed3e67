use std::fmt::{self, Write};

use sightline_dom::{DomTree, NodeId, NodeType};

/// Write an indented dump of the subtree at `id` into `out`.
///
/// Attributes are sorted by name so that dumps are stable across runs.
/// The walk keeps its own stack, so arbitrarily deep trees print.
///
/// # Errors
///
/// Returns an error only if writing to `out` fails.
pub fn print_tree(tree: &DomTree, id: NodeId, indent: usize, out: &mut impl Write) -> fmt::Result {
    let mut stack = vec![(id, indent)];
    while let Some((id, indent)) = stack.pop() {
        print_node(tree, id, indent, out)?;
        stack.extend(
            tree.children(id)
                .iter()
                .rev()
                .map(|&child| (child, indent + 1)),
        );
    }
    Ok(())
}

fn print_node(tree: &DomTree, id: NodeId, indent: usize, out: &mut impl Write) -> fmt::Result {
    let prefix = "  ".repeat(indent);
    let Some(node) = tree.get(id) else {
        return Ok(());
    };
    match &node.node_type {
        NodeType::Document => writeln!(out, "{prefix}Document")?,
        NodeType::Element(data) => {
            if data.attrs.is_empty() {
                writeln!(out, "{prefix}<{}>", data.tag_name)?;
            } else {
                let mut attrs: Vec<(&String, &String)> = data.attrs.iter().collect();
                attrs.sort();
                let attrs: Vec<String> = attrs
                    .into_iter()
                    .map(|(k, v)| {
                        if v.is_empty() {
                            k.clone()
                        } else {
                            format!("{k}=\"{v}\"")
                        }
                    })
                    .collect();
                writeln!(out, "{prefix}<{} {}>", data.tag_name, attrs.join(" "))?;
            }
        }
        NodeType::Text(data) => {
            let display = data.replace('\n', "\\n").replace(' ', "\u{00B7}");
            writeln!(out, "{prefix}\"{display}\"")?;
        }
        NodeType::Comment(data) => writeln!(out, "{prefix}<!-- {data} -->")?,
    }
    Ok(())
}
