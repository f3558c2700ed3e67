//! Conditional-comment normalization.
//!
//! Outlook-targeted mail wraps content in legacy conditional comments such as
//! `<!--[if mso]> … <![endif]-->`. A tree parser sees those as opaque comments
//! (or bogus markup), and a single logical block is frequently split into
//! several fragments spread over the document. Before parsing, fragments that
//! share a condition are merged into one comment carrying a sentinel so the
//! analyzer can later re-parse the block as its own document.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

use crate::tokenizer::{MERGED_BLOCK_PREFIX, MERGED_BLOCK_TERMINATOR};

/// Matches one conditional fragment in any of its three spellings:
/// downlevel-hidden `<!--[if C]> … <![endif]-->`, downlevel-revealed
/// `<![if C]> … <![endif]>`, and fully commented `<!--[if C]--> … <!--[endif]-->`.
static CONDITIONAL_BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<!(?:--)?\[if\s+([^\]]+)\](?:--)?>([\s\S]*?)<!(?:--)?\[endif\](?:--)?>")
        .expect("CONDITIONAL_BLOCK_RE: hardcoded regex is valid")
});

/// Separates the condition from the body inside a merged block.
const CONDITION_END: &str = "]>";

struct Fragment<'a> {
    start: usize,
    end: usize,
    condition: &'a str,
    inner: &'a str,
}

/// Merge conditional fragments that share a condition.
///
/// Every group of two or more fragments with the same (trimmed) condition
/// becomes one `<!--[cond:C]>…<![endcond]-->` block at the position of the
/// first fragment, holding the concatenated bodies; the other fragments are
/// removed. Lone fragments are left as they are. Returns the input borrowed
/// when nothing was merged.
#[must_use]
pub fn merge_split_conditionals(html: &str) -> Cow<'_, str> {
    let fragments: Vec<Fragment<'_>> = CONDITIONAL_BLOCK_RE
        .captures_iter(html)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            Some(Fragment {
                start: whole.start(),
                end: whole.end(),
                condition: caps.get(1)?.as_str().trim(),
                inner: caps.get(2)?.as_str(),
            })
        })
        .collect();

    // Conditions in order of first appearance, with every fragment index.
    let mut groups: Vec<(&str, Vec<usize>)> = Vec::new();
    for (index, fragment) in fragments.iter().enumerate() {
        match groups.iter_mut().find(|(c, _)| *c == fragment.condition) {
            Some((_, members)) => members.push(index),
            None => groups.push((fragment.condition, vec![index])),
        }
    }
    if groups.iter().all(|(_, members)| members.len() < 2) {
        return Cow::Borrowed(html);
    }

    // fragment index -> Some(replacement) for merge heads, None for removals.
    let mut replacements: Vec<Option<Option<String>>> = vec![None; fragments.len()];
    for (condition, members) in groups.iter().filter(|(_, m)| m.len() >= 2) {
        let body: String = members.iter().map(|&i| fragments[i].inner).collect();
        log::debug!(
            "merging {} conditional fragments for [if {condition}]",
            members.len()
        );
        replacements[members[0]] = Some(Some(format!(
            "<!--{MERGED_BLOCK_PREFIX}{condition}{CONDITION_END}{body}{MERGED_BLOCK_TERMINATOR}"
        )));
        for &i in &members[1..] {
            replacements[i] = Some(None);
        }
    }

    let mut out = String::with_capacity(html.len());
    let mut cursor = 0;
    for (fragment, replacement) in fragments.iter().zip(replacements) {
        let Some(replacement) = replacement else {
            continue;
        };
        out.push_str(&html[cursor..fragment.start]);
        if let Some(merged) = replacement {
            out.push_str(&merged);
        }
        cursor = fragment.end;
    }
    out.push_str(&html[cursor..]);
    Cow::Owned(out)
}

/// Split the data of a merged block comment into `(condition, inner_html)`.
///
/// Returns `None` for any other comment.
#[must_use]
pub fn parse_conditional_block(comment: &str) -> Option<(&str, &str)> {
    let rest = comment.trim().strip_prefix(MERGED_BLOCK_PREFIX)?;
    let (condition, body) = rest.split_once(CONDITION_END)?;
    let terminator = MERGED_BLOCK_TERMINATOR.trim_end_matches("-->");
    let body = body.strip_suffix(terminator).unwrap_or(body);
    Some((condition.trim(), body))
}

/// True if `comment` is the data of a merged conditional block.
#[must_use]
pub fn is_conditional_block(comment: &str) -> bool {
    comment.trim_start().starts_with(MERGED_BLOCK_PREFIX)
}
