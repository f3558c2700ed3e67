//! Font-size normalization.
//!
//! `font-size` reaches the cascade either from the legacy `<font size=N>`
//! attribute or from an inline declaration. Both are normalized to a single
//! string form so later stages only deal with `<number><unit>`.

use std::sync::LazyLock;

use regex::Regex;

use super::length::PX_PER_PT;

/// `<number><unit>` with the units font-size normalization understands.
static FONT_SIZE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([\d.]+)(px|pt|em|%)$").expect("FONT_SIZE_RE: hardcoded regex is valid")
});

/// [HTML § 15.3.4 Phrasing content](https://html.spec.whatwg.org/multipage/rendering.html#phrasing-content-3)
///
/// Pixel sizes for the legacy `<font size>` keywords 1 through 7.
const LEGACY_FONT_SIZES_PX: [u32; 7] = [10, 13, 16, 18, 24, 32, 48];

/// The initial `font-size`.
pub const DEFAULT_FONT_SIZE: &str = "16px";

/// Normalize a `font-size` value.
///
/// - `1`..=`7` map to the legacy table (`"2"` becomes `"13px"`).
/// - `pt` converts to whole pixels, rounding half to even.
/// - `px`, `em` and `%` keep their unit with the number printed as a float
///   (`"12px"` becomes `"12.0px"`).
/// - Anything else becomes `"16px"`.
#[must_use]
pub fn normalize_font_size(value: &str) -> String {
    let value = value.trim().to_ascii_lowercase();

    if !value.is_empty()
        && value.bytes().all(|b| b.is_ascii_digit())
        && let Ok(size) = value.parse::<usize>()
        && (1..=LEGACY_FONT_SIZES_PX.len()).contains(&size)
    {
        return format!("{}px", LEGACY_FONT_SIZES_PX[size - 1]);
    }

    if let Some(caps) = FONT_SIZE_RE.captures(&value)
        && let Some(number) = caps.get(1).and_then(|m| m.as_str().parse::<f64>().ok())
        && let Some(unit) = caps.get(2)
    {
        return match unit.as_str() {
            "pt" => format!("{}px", (number * PX_PER_PT).round_ties_even()),
            unit => format!("{number:?}{unit}"),
        };
    }

    DEFAULT_FONT_SIZE.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_sizes() {
        assert_eq!(normalize_font_size("1"), "10px");
        assert_eq!(normalize_font_size(" 3 "), "16px");
        assert_eq!(normalize_font_size("7"), "48px");
        // Out of range legacy numbers are not lengths either
        assert_eq!(normalize_font_size("8"), "16px");
        assert_eq!(normalize_font_size("0"), "16px");
    }

    #[test]
    fn test_units() {
        assert_eq!(normalize_font_size("12PX"), "12.0px");
        assert_eq!(normalize_font_size("1.5em"), "1.5em");
        assert_eq!(normalize_font_size("50%"), "50.0%");
        // 12 * 1.333 = 15.996
        assert_eq!(normalize_font_size("12pt"), "16px");
        assert_eq!(normalize_font_size("1pt"), "1px");
    }

    #[test]
    fn test_fallback() {
        assert_eq!(normalize_font_size("large"), "16px");
        assert_eq!(normalize_font_size("2rem"), "16px");
        assert_eq!(normalize_font_size("1.2.3px"), "16px");
        assert_eq!(normalize_font_size(""), "16px");
    }
}
