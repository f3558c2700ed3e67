//! HTML front end for sightline.
//!
//! # Scope
//!
//! This crate implements:
//! - **HTML Tokenizer** ([WHATWG § 13.2.5](https://html.spec.whatwg.org/multipage/parsing.html#tokenization))
//!   - Data, RAWTEXT (`script`/`style`) and tag states
//!   - Comments, bogus comments, DOCTYPE
//!   - Named and numeric character references
//!
//! - **Tree builder**: a forgiving, non-restructuring builder that keeps the
//!   markup's own nesting, the way mail clients' lenient parsers do
//!
//! - **Conditional-comment normalizer**: merges `[if …]` fragments that share
//!   a condition into one sentinel comment ahead of parsing
//!
//! # Not Implemented
//!
//! - Insertion modes, implied `html`/`head`/`body`
//! - Table fixups, foster parenting, adoption agency algorithm
//! - RCDATA for `title`/`textarea`

/// Conditional-comment merging and merged-block parsing.
pub mod conditional;
/// HTML parser and tree construction.
pub mod parser;
/// HTML tokenizer for converting input into tokens.
pub mod tokenizer;

use sightline_dom::DomTree;

pub use conditional::{is_conditional_block, merge_split_conditionals, parse_conditional_block};
pub use parser::{HTMLParser, ParseIssue, print_tree};
pub use tokenizer::{Attribute, HTMLTokenizer, Token};

/// Tokenize and build a tree from `html`. Never fails.
#[must_use]
pub fn parse(html: &str) -> DomTree {
    parse_with_issues(html).0
}

/// Like [`parse`], also returning the recoverable problems that were found.
#[must_use]
pub fn parse_with_issues(html: &str) -> (DomTree, Vec<ParseIssue>) {
    let mut tokenizer = HTMLTokenizer::new(html);
    tokenizer.run();
    HTMLParser::new(tokenizer.into_tokens()).run_with_issues()
}
