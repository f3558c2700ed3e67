//! Analysis output.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use sightline_css::Style;
use sightline_dom::NodeId;
use strum_macros::{AsRefStr, Display};

use crate::visibility::HiddenReason;

/// The `type` field of a serialized record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, Display)]
#[strum(serialize_all = "snake_case")]
pub enum RecordKind {
    /// A run of an element's own text.
    Text,
    /// An anchor and all of its text.
    Link,
    /// An ordinary HTML comment.
    HtmlComment,
    /// Anything found inside a merged conditional comment.
    ConditionalComment,
}

/// One analyzed fragment of a document.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisRecord {
    /// An element's direct text.
    Text {
        /// The element the text belongs to.
        node: NodeId,
        /// Direct text runs, trimmed and joined by spaces.
        text: String,
        /// The element's resolved style.
        style: Style,
        /// Why the text is hidden; empty when visible.
        hidden_reasons: Vec<HiddenReason>,
    },
    /// An `<a>` element.
    Link {
        /// The anchor element.
        node: NodeId,
        /// All rendered text inside the anchor, joined by spaces.
        text: String,
        /// The `href`, or empty.
        url: String,
        /// The anchor's resolved style.
        style: Style,
        /// Why the link is hidden; empty when visible.
        hidden_reasons: Vec<HiddenReason>,
    },
    /// An ordinary comment. Never visible.
    Comment {
        /// The comment text, trimmed.
        text: String,
    },
    /// A record produced by analyzing a merged conditional block as its own
    /// document. Never visible, whatever the inner record says.
    Conditional {
        /// The `[if …]` condition of the block.
        condition: String,
        /// The record from the sub-document.
        inner: Box<AnalysisRecord>,
    },
}

impl AnalysisRecord {
    /// The record's kind, as written to the `type` field.
    #[must_use]
    pub const fn kind(&self) -> RecordKind {
        match self {
            Self::Text { .. } => RecordKind::Text,
            Self::Link { .. } => RecordKind::Link,
            Self::Comment { .. } => RecordKind::HtmlComment,
            Self::Conditional { .. } => RecordKind::ConditionalComment,
        }
    }

    /// Text and links are visible when no check fired; comments never are.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        match self {
            Self::Text { hidden_reasons, .. } | Self::Link { hidden_reasons, .. } => {
                hidden_reasons.is_empty()
            }
            Self::Comment { .. } | Self::Conditional { .. } => false,
        }
    }

    /// Whether this record takes part in the document verdict.
    #[must_use]
    pub const fn affects_verdict(&self) -> bool {
        matches!(self, Self::Text { .. } | Self::Link { .. })
    }

    /// The text of the record, or of the wrapped record.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Text { text, .. } | Self::Link { text, .. } | Self::Comment { text } => text,
            Self::Conditional { inner, .. } => inner.text(),
        }
    }

    /// Write this record's fields into `map`. Inside a conditional block the
    /// type, visibility and condition are overridden.
    fn serialize_fields<M: SerializeMap>(
        &self,
        map: &mut M,
        condition: Option<&str>,
    ) -> Result<(), M::Error> {
        let kind = if condition.is_some() {
            RecordKind::ConditionalComment
        } else {
            self.kind()
        };
        let visible = condition.is_none() && self.is_visible();

        match self {
            Self::Text {
                text,
                style,
                hidden_reasons,
                ..
            } => {
                map.serialize_entry("text", text)?;
                map.serialize_entry("type", kind.as_ref())?;
                map.serialize_entry("style", style)?;
                map.serialize_entry("visible", &visible)?;
                map.serialize_entry("hidden_reasons", hidden_reasons)?;
            }
            Self::Link {
                text,
                url,
                style,
                hidden_reasons,
                ..
            } => {
                map.serialize_entry("text", text)?;
                map.serialize_entry("type", kind.as_ref())?;
                map.serialize_entry("url", url)?;
                map.serialize_entry("style", style)?;
                map.serialize_entry("visible", &visible)?;
                map.serialize_entry("hidden_reasons", hidden_reasons)?;
            }
            Self::Comment { text } => {
                map.serialize_entry("text", text)?;
                map.serialize_entry("type", kind.as_ref())?;
                map.serialize_entry("visible", &visible)?;
            }
            Self::Conditional {
                condition: own,
                inner,
            } => return inner.serialize_fields(map, Some(condition.unwrap_or(own))),
        }

        if let Some(condition) = condition {
            map.serialize_entry("condition", condition)?;
        }
        Ok(())
    }
}

impl Serialize for AnalysisRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        self.serialize_fields(&mut map, None)?;
        map.end()
    }
}

/// Everything found in one document.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentReport {
    /// Text and link records in path order, then comment records in
    /// document order.
    pub records: Vec<AnalysisRecord>,
    /// True iff every text and link record is visible.
    pub all_visible: bool,
}

impl DocumentReport {
    /// Build a report, deriving the verdict from `records`.
    #[must_use]
    pub fn new(records: Vec<AnalysisRecord>) -> Self {
        let all_visible = records
            .iter()
            .filter(|r| r.affects_verdict())
            .all(AnalysisRecord::is_visible);
        Self {
            records,
            all_visible,
        }
    }

    /// Records whose text is hidden from a reader.
    pub fn hidden(&self) -> impl Iterator<Item = &AnalysisRecord> {
        self.records
            .iter()
            .filter(|r| r.affects_verdict() && !r.is_visible())
    }

    /// One JSON object per line, each line terminated by `\n`.
    ///
    /// # Errors
    ///
    /// Returns the serializer error if a record can't be encoded.
    pub fn to_jsonl(&self) -> Result<String, serde_json::Error> {
        let mut out = String::new();
        for record in &self.records {
            out.push_str(&serde_json::to_string(record)?);
            out.push('\n');
        }
        Ok(out)
    }
}
