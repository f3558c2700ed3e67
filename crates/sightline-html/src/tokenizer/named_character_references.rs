//! Named character reference lookup table.
//!
//! [§ 13.2.5.73 Named character reference state](https://html.spec.whatwg.org/multipage/parsing.html#named-character-reference-state)
//!
//! The full table defines 2,231 entities; this covers the ones that show up
//! in email markup in practice.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Maps entity names (without the leading '&') to their replacement strings.
///
/// Legacy entries without the trailing semicolon are matched only when the
/// input omits it.
static NAMED_ENTITIES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("amp;", "&"),
        ("amp", "&"),
        ("lt;", "<"),
        ("lt", "<"),
        ("gt;", ">"),
        ("gt", ">"),
        ("quot;", "\""),
        ("quot", "\""),
        ("apos;", "'"),
        ("nbsp;", "\u{00A0}"),
        ("nbsp", "\u{00A0}"),
        ("ensp;", "\u{2002}"),
        ("emsp;", "\u{2003}"),
        ("thinsp;", "\u{2009}"),
        ("zwnj;", "\u{200C}"),
        ("zwj;", "\u{200D}"),
        ("shy;", "\u{00AD}"),
        ("copy;", "\u{00A9}"),
        ("copy", "\u{00A9}"),
        ("reg;", "\u{00AE}"),
        ("reg", "\u{00AE}"),
        ("trade;", "\u{2122}"),
        ("mdash;", "\u{2014}"),
        ("ndash;", "\u{2013}"),
        ("hellip;", "\u{2026}"),
        ("bull;", "\u{2022}"),
        ("middot;", "\u{00B7}"),
        ("lsquo;", "\u{2018}"),
        ("rsquo;", "\u{2019}"),
        ("ldquo;", "\u{201C}"),
        ("rdquo;", "\u{201D}"),
        ("laquo;", "\u{00AB}"),
        ("raquo;", "\u{00BB}"),
        ("sbquo;", "\u{201A}"),
        ("bdquo;", "\u{201E}"),
        ("dagger;", "\u{2020}"),
        ("para;", "\u{00B6}"),
        ("sect;", "\u{00A7}"),
        ("deg;", "\u{00B0}"),
        ("plusmn;", "\u{00B1}"),
        ("times;", "\u{00D7}"),
        ("divide;", "\u{00F7}"),
        ("frac12;", "\u{00BD}"),
        ("frac14;", "\u{00BC}"),
        ("frac34;", "\u{00BE}"),
        ("micro;", "\u{00B5}"),
        ("cent;", "\u{00A2}"),
        ("pound;", "\u{00A3}"),
        ("yen;", "\u{00A5}"),
        ("euro;", "\u{20AC}"),
        ("curren;", "\u{00A4}"),
        ("iexcl;", "\u{00A1}"),
        ("iquest;", "\u{00BF}"),
        ("larr;", "\u{2190}"),
        ("rarr;", "\u{2192}"),
        ("uarr;", "\u{2191}"),
        ("darr;", "\u{2193}"),
        ("hearts;", "\u{2665}"),
        ("check;", "\u{2713}"),
        ("agrave;", "\u{00E0}"),
        ("aacute;", "\u{00E1}"),
        ("acirc;", "\u{00E2}"),
        ("auml;", "\u{00E4}"),
        ("aring;", "\u{00E5}"),
        ("ccedil;", "\u{00E7}"),
        ("egrave;", "\u{00E8}"),
        ("eacute;", "\u{00E9}"),
        ("ecirc;", "\u{00EA}"),
        ("euml;", "\u{00EB}"),
        ("iacute;", "\u{00ED}"),
        ("ntilde;", "\u{00F1}"),
        ("oacute;", "\u{00F3}"),
        ("ouml;", "\u{00F6}"),
        ("oslash;", "\u{00F8}"),
        ("uacute;", "\u{00FA}"),
        ("uuml;", "\u{00FC}"),
        ("szlig;", "\u{00DF}"),
        ("Agrave;", "\u{00C0}"),
        ("Aacute;", "\u{00C1}"),
        ("Auml;", "\u{00C4}"),
        ("Eacute;", "\u{00C9}"),
        ("Ntilde;", "\u{00D1}"),
        ("Ouml;", "\u{00D6}"),
        ("Uuml;", "\u{00DC}"),
    ])
});

/// Looks up a named character reference. `name` excludes the leading `&`
/// and includes the trailing `;` when the input had one.
#[must_use]
pub fn lookup_named_character_reference(name: &str) -> Option<&'static str> {
    NAMED_ENTITIES.get(name).copied()
}
