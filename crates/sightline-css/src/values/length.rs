//! Lengths, resolved against a fixed 16px font context.

use std::sync::LazyLock;

use regex::Regex;

/// A signed number with an optional unit, matched at the start of the value.
static LENGTH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([-+]?[\d.]+)(px|pt|em|rem|%)?")
        .expect("LENGTH_RE: hardcoded regex is valid")
});

/// Font size that `em` and `%` resolve against, and the root font size for `rem`.
pub const BASE_FONT_SIZE_PX: f64 = 16.0;

/// Points to pixels, as mail renderers approximate it.
pub const PX_PER_PT: f64 = 1.333;

/// A length as written, before resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Length {
    /// [§ 6.1 Absolute lengths](https://www.w3.org/TR/css-values-4/#absolute-lengths)
    ///
    /// "1px = 1/96th of 1in". Also used for unitless numbers.
    Px(f64),

    /// [§ 6.1 Absolute lengths](https://www.w3.org/TR/css-values-4/#absolute-lengths)
    ///
    /// "1pt = 1/72nd of 1in"
    Pt(f64),

    /// [§ 5.1.1 Font-relative lengths](https://www.w3.org/TR/css-values-4/#font-relative-lengths)
    ///
    /// "Equal to the computed value of the font-size property of the element
    /// on which it is used."
    Em(f64),

    /// [§ 5.1.1 Font-relative lengths](https://www.w3.org/TR/css-values-4/#font-relative-lengths)
    ///
    /// "Equal to the computed value of font-size on the root element."
    Rem(f64),

    /// Percentage of the base font size.
    Percent(f64),
}

impl Length {
    /// Parse the leading `<number><unit>?` of `value`.
    ///
    /// Anything after the match is ignored, so `"12px solid"` is `12px`.
    /// Returns `None` when the value doesn't start with a number.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let caps = LENGTH_RE.captures(value)?;
        let number: f64 = caps.get(1)?.as_str().parse().ok()?;
        Some(match caps.get(2).map(|m| m.as_str()) {
            Some("pt") => Self::Pt(number),
            Some("em") => Self::Em(number),
            Some("rem") => Self::Rem(number),
            Some("%") => Self::Percent(number),
            _ => Self::Px(number),
        })
    }

    /// Resolve to pixels with a 16px font context.
    #[must_use]
    pub fn to_px(self) -> f64 {
        match self {
            Self::Px(v) => v,
            Self::Pt(v) => v * PX_PER_PT,
            Self::Em(v) | Self::Rem(v) => v * BASE_FONT_SIZE_PX,
            Self::Percent(v) => v / 100.0 * BASE_FONT_SIZE_PX,
        }
    }
}

/// Parse a CSS length to pixels. `None` if the value has no leading number.
#[must_use]
pub fn parse_length(value: &str) -> Option<f64> {
    Length::parse(value).map(Length::to_px)
}
