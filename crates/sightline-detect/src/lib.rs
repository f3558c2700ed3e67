//! Hidden-text detection for HTML email.
//!
//! Reconstructs enough of the cascade to judge, for every run of text and
//! every link, whether a reader could see it:
//!
//! 1. [`build_tree`]: merge split conditional comments, parse, prune empty
//!    subtrees ([`prune`])
//! 2. [`collect_leaf_paths`]: find the indivisible content units
//! 3. [`DocumentAnalyzer`]: resolve styles along each path and run the
//!    [`VisibilityClassifier`]
//! 4. [`DocumentReport`]: the records plus the document verdict
//!
//! ```
//! let report = sightline_detect::analyze_html(
//!     r#"<body><p style="color:#fff">hidden</p></body>"#,
//! );
//! assert!(!report.all_visible);
//! ```

/// Pipeline orchestration.
pub mod analyzer;
/// Classifier thresholds and their TOML loader.
pub mod config;
/// Leaf-path collection.
pub mod paths;
/// Empty-subtree removal.
pub mod prune;
/// Analysis records and document reports.
pub mod record;
/// Tag classes.
pub mod tags;
/// Visibility checks.
pub mod visibility;

pub use analyzer::{DocumentAnalyzer, analyze_html, build_tree};
pub use config::{ConfigError, DetectionConfig};
pub use paths::{LeafPath, collect_leaf_paths};
pub use prune::prune_tree;
pub use record::{AnalysisRecord, DocumentReport, RecordKind};
pub use visibility::{HiddenReason, VisibilityClassifier};
