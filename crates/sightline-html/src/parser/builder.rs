use sightline_common::warning::warn_once;
use sightline_dom::{AttributesMap, DomTree, ElementData, NodeId, NodeType};

use crate::tokenizer::Token;

/// [§ 13.1.2 Elements](https://html.spec.whatwg.org/multipage/syntax.html#void-elements)
///
/// "Void elements: area, base, br, col, embed, hr, img, input, link, meta,
/// source, track, wbr"
///
/// `param` is obsolete but still turns up in old newsletters.
pub const VOID_ELEMENTS: [&str; 14] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

/// A recoverable problem found while building the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIssue {
    /// What went wrong.
    pub message: String,
    /// Index into the token stream where this issue was encountered.
    pub token_index: usize,
}

/// Forgiving tree builder.
///
/// Builds the tree exactly as written: no implied `html`/`head`/`body`, no
/// foster parenting, no adoption agency. A start tag opens a scope unless it
/// is void or self-closing, and an end tag closes the nearest open element
/// with the same name. Stray end tags are ignored.
pub struct HTMLParser {
    tree: DomTree,
    tokens: Vec<Token>,
    token_index: usize,

    /// [§ 13.2.4.2 The stack of open elements](https://html.spec.whatwg.org/multipage/parsing.html#the-stack-of-open-elements)
    stack_of_open_elements: Vec<NodeId>,

    issues: Vec<ParseIssue>,
}

impl HTMLParser {
    /// Create a parser over a token stream.
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        // DomTree::new() creates the Document node at NodeId::ROOT
        Self {
            tree: DomTree::new(),
            tokens,
            token_index: 0,
            stack_of_open_elements: Vec::new(),
            issues: Vec::new(),
        }
    }

    /// Run the parser and return the DOM tree.
    #[must_use]
    pub fn run(self) -> DomTree {
        self.run_with_issues().0
    }

    /// Run the parser and return both the `DomTree` and any parse issues.
    #[must_use]
    pub fn run_with_issues(mut self) -> (DomTree, Vec<ParseIssue>) {
        let tokens = std::mem::take(&mut self.tokens);
        for (index, token) in tokens.into_iter().enumerate() {
            self.token_index = index;
            if token.is_eof() {
                break;
            }
            self.process_token(token);
        }
        (self.tree, self.issues)
    }

    fn process_token(&mut self, token: Token) {
        match token {
            Token::Text { data } => self.insert_text(&data),
            Token::Comment { data } => {
                let comment = self.tree.alloc(NodeType::Comment(data));
                self.tree.append_child(self.current_node(), comment);
            }
            Token::StartTag {
                name,
                self_closing,
                attributes,
            } => {
                let mut attrs = AttributesMap::new();
                for attr in attributes {
                    if attr.name.is_empty() {
                        continue;
                    }
                    // First occurrence of a duplicated attribute wins.
                    let _ = attrs.entry(attr.name).or_insert(attr.value);
                }
                let is_void = VOID_ELEMENTS.contains(&name.as_str());
                let element = self.tree.alloc(NodeType::Element(ElementData {
                    tag_name: name,
                    attrs,
                }));
                self.tree.append_child(self.current_node(), element);
                if !is_void && !self_closing {
                    self.stack_of_open_elements.push(element);
                }
            }
            Token::EndTag { name } => self.close_element(&name),
            Token::Doctype { .. } | Token::EndOfFile => {}
        }
    }

    /// [§ 13.2.4.2](https://html.spec.whatwg.org/multipage/parsing.html#current-node)
    ///
    /// "The current node is the bottommost node in this stack of open elements."
    fn current_node(&self) -> NodeId {
        self.stack_of_open_elements
            .last()
            .copied()
            .unwrap_or(NodeId::ROOT)
    }

    /// Adjacent text merges into the previous text node.
    fn insert_text(&mut self, data: &str) {
        let parent = self.current_node();
        if let Some(&last) = self.tree.children(parent).last()
            && let Some(node) = self.tree.get_mut(last)
            && let NodeType::Text(existing) = &mut node.node_type
        {
            existing.push_str(data);
            return;
        }
        let text = self.tree.alloc(NodeType::Text(data.to_string()));
        self.tree.append_child(parent, text);
    }

    /// Pop elements until one named `name` has been popped. If none is open,
    /// the end tag is ignored.
    fn close_element(&mut self, name: &str) {
        if VOID_ELEMENTS.contains(&name) {
            return;
        }
        let position = self.stack_of_open_elements.iter().rposition(|&id| {
            self.tree
                .as_element(id)
                .is_some_and(|element| element.is(name))
        });
        match position {
            Some(index) => self.stack_of_open_elements.truncate(index),
            None => self.parse_issue(&format!("unmatched end tag </{name}>")),
        }
    }

    fn parse_issue(&mut self, message: &str) {
        warn_once("html", message);
        self.issues.push(ParseIssue {
            message: message.to_string(),
            token_index: self.token_index,
        });
    }
}
