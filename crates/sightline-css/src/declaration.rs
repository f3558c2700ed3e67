//! Inline `style` attribute declarations.
//!
//! [CSS Style Attributes](https://www.w3.org/TR/css-style-attr/)
//!
//! "The value of the style attribute must match the syntax of the contents of
//! a CSS declaration block"
//!
//! Mail bodies routinely break that rule, so this is a plain split on `;` and
//! the first `:`, not a tokenizer-based parser.

/// [§ 5.4.4 Consume a declaration](https://www.w3.org/TR/css-syntax-3/#consume-a-declaration)
///
/// A single `name: value` pair from a style attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// Lowercased property name.
    pub name: String,
    /// Trimmed value, without any `!important` annotation.
    pub value: String,
    /// Whether the declaration had `!important`.
    pub important: bool,
}

/// Parse the contents of a `style` attribute.
///
/// Entries without a colon, or with an empty name or value, are skipped.
/// When a property repeats, the last value wins but keeps the position of
/// the first occurrence.
#[must_use]
pub fn parse_inline_style(style: &str) -> Vec<Declaration> {
    let mut declarations: Vec<Declaration> = Vec::new();

    for entry in style.split(';') {
        let Some((name, value)) = entry.split_once(':') else {
            continue;
        };
        let name = name.trim().to_ascii_lowercase();
        let (value, important) = trim_important(value.trim());
        if name.is_empty() || value.is_empty() {
            continue;
        }

        let declaration = Declaration {
            name,
            value: value.to_string(),
            important,
        };
        match declarations.iter_mut().find(|d| d.name == declaration.name) {
            Some(existing) => *existing = declaration,
            None => declarations.push(declaration),
        }
    }

    declarations
}

/// [§ 6.4.2 Important declarations](https://www.w3.org/TR/css-cascade-4/#importance)
///
/// "A declaration is important if it has a !important annotation"
///
/// Strip a trailing `! important` (any case, optional inner whitespace).
fn trim_important(value: &str) -> (&str, bool) {
    let lowered = value.to_ascii_lowercase();
    let Some(before) = lowered.strip_suffix("important") else {
        return (value, false);
    };
    let before = before.trim_end();
    match before.strip_suffix('!') {
        Some(rest) => (value[..rest.len()].trim_end(), true),
        None => (value, false),
    }
}
