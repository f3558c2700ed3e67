//! The document analyzer.
//!
//! Ties the pipeline together for one document:
//!
//! ```text
//! markup ─► merge conditionals ─► parse ─► prune ─► leaf paths
//!                                                      │
//!            report ◄─ comments ◄─ records ◄─ cascade + classify per path
//! ```
//!
//! Merged conditional blocks are analyzed as separate documents by a
//! recursive call on their inner markup, so no tree is ever shared between
//! the outer and inner passes.

use std::collections::HashSet;

use sightline_css::{Style, resolve_style};
use sightline_dom::{DomTree, NodeId};
use sightline_html::{merge_split_conditionals, parse_conditional_block};

use crate::config::DetectionConfig;
use crate::paths::{LeafPath, collect_leaf_paths};
use crate::prune::prune_tree;
use crate::record::{AnalysisRecord, DocumentReport};
use crate::visibility::VisibilityClassifier;

/// Analyzes documents with a fixed set of thresholds.
#[derive(Debug, Clone, Default)]
pub struct DocumentAnalyzer {
    classifier: VisibilityClassifier,
}

impl DocumentAnalyzer {
    /// An analyzer using `config`'s thresholds.
    #[must_use]
    pub const fn new(config: DetectionConfig) -> Self {
        Self {
            classifier: VisibilityClassifier::new(config),
        }
    }

    /// The classifier in use.
    #[must_use]
    pub const fn classifier(&self) -> &VisibilityClassifier {
        &self.classifier
    }

    /// Run the whole pipeline on `html`.
    #[must_use]
    pub fn analyze_html(&self, html: &str) -> DocumentReport {
        let tree = build_tree(html);
        self.analyze_tree(&tree)
    }

    /// Analyze an already prepared (merged, parsed and pruned) tree.
    #[must_use]
    pub fn analyze_tree(&self, tree: &DomTree) -> DocumentReport {
        let paths = collect_leaf_paths(tree);
        let mut records = self.analyze_paths(tree, &paths);
        records.extend(self.comment_records(tree));
        let report = DocumentReport::new(records);
        log::debug!(
            "{} records from {} paths, all visible: {}",
            report.records.len(),
            paths.len(),
            report.all_visible
        );
        report
    }

    /// Replay the cascade down each path. Only the leaf has text of its
    /// own; an anchor ends the path early and may be shared by several
    /// paths, so it is reported once.
    fn analyze_paths(&self, tree: &DomTree, paths: &[LeafPath]) -> Vec<AnalysisRecord> {
        let mut records = Vec::new();
        let mut seen_anchors: HashSet<NodeId> = HashSet::new();

        for path in paths {
            let mut inherited = Style::root_default();
            for &id in path {
                let element = tree.as_element(id);
                let style = resolve_style(element, &inherited);

                // An anchor covers all of its text; nothing below it gets a
                // record of its own.
                if let Some(anchor) = element.filter(|e| e.is("a")) {
                    let text = tree.stripped_strings(id).join(" ");
                    if !text.is_empty() && seen_anchors.insert(id) {
                        records.push(AnalysisRecord::Link {
                            node: id,
                            text,
                            url: anchor.attr("href").unwrap_or_default().to_string(),
                            hidden_reasons: self.classifier.classify(&style),
                            style,
                        });
                    }
                    break;
                }

                let snapshot = style.inheritable();
                let text = tree.direct_text(id);
                if !text.is_empty() {
                    records.push(AnalysisRecord::Text {
                        node: id,
                        text,
                        hidden_reasons: self.classifier.classify(&style),
                        style,
                    });
                }
                inherited = snapshot;
            }
        }

        records
    }

    /// Every comment in document order. Merged conditional blocks expand to
    /// the records of their inner markup.
    fn comment_records(&self, tree: &DomTree) -> Vec<AnalysisRecord> {
        let mut records = Vec::new();
        for id in tree.descendants(NodeId::ROOT) {
            let Some(data) = tree.as_comment(id) else {
                continue;
            };
            match parse_conditional_block(data) {
                Some((condition, inner_html)) => {
                    log::debug!("analyzing conditional block [if {condition}]");
                    let inner = self.analyze_html(inner_html);
                    records.extend(inner.records.into_iter().map(|record| {
                        AnalysisRecord::Conditional {
                            condition: condition.to_string(),
                            inner: Box::new(record),
                        }
                    }));
                }
                None => records.push(AnalysisRecord::Comment {
                    text: data.trim().to_string(),
                }),
            }
        }
        records
    }
}

/// Merge split conditionals, parse, and prune: the tree the analyzer walks.
#[must_use]
pub fn build_tree(html: &str) -> DomTree {
    let merged = merge_split_conditionals(html);
    let mut tree = sightline_html::parse(&merged);
    let _ = prune_tree(&mut tree);
    tree
}

/// Analyze `html` with the default thresholds.
#[must_use]
pub fn analyze_html(html: &str) -> DocumentReport {
    DocumentAnalyzer::default().analyze_html(html)
}
