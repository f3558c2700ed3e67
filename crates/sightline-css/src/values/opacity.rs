//! Cumulative opacity.
//!
//! [CSS Color § 14.1 Transparency: the opacity property](https://www.w3.org/TR/css-color-4/#transparency)
//!
//! "Opacity can be thought of conceptually as a postprocessing operation.
//! [...] the element and its descendants are rendered as a group."
//!
//! An element's opacity therefore multiplies into its ancestors'. The running
//! product is carried through the cascade as a two-decimal string.

/// Initial opacity.
pub const OPAQUE: &str = "1.0";

/// Combine an element's own `opacity` with its parent's accumulated value.
///
/// `current` may be a number (`"0.5"`) or a percentage (`"50%"`); it is
/// clamped to `[0, 1]` and treated as `1` when unparsable. An unparsable
/// `parent` is also `1`. Returns the product formatted with two decimals.
#[must_use]
pub fn parse_opacity(current: &str, parent: &str) -> String {
    let parent_alpha = parent.trim().parse::<f64>().unwrap_or(1.0);
    let current_alpha = parse_alpha_value(current);
    format_opacity(parent_alpha * current_alpha)
}

/// Fold a color's alpha channel into the accumulated opacity.
#[must_use]
pub fn fold_alpha(alpha: f64, parent: &str) -> String {
    let parent_alpha = parent.trim().parse::<f64>().unwrap_or(1.0);
    format_opacity(parent_alpha * clamp_unit(alpha))
}

/// Read back an accumulated opacity string. Unparsable values are opaque.
#[must_use]
pub fn opacity_value(value: &str) -> f64 {
    value.trim().parse::<f64>().unwrap_or(1.0)
}

fn parse_alpha_value(value: &str) -> f64 {
    let is_percent = value.contains('%');
    let Ok(alpha) = value.trim().replace('%', "").parse::<f64>() else {
        return 1.0;
    };
    clamp_unit(if is_percent { alpha / 100.0 } else { alpha })
}

fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        1.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

fn format_opacity(value: f64) -> String {
    format!("{value:.2}")
}
