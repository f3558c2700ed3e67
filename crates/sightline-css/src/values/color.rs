//! Colors, compositing and contrast.
//!
//! [CSS Color Module Level 4](https://www.w3.org/TR/css-color-4/) and
//! [WCAG 2.1 contrast ratio](https://www.w3.org/TR/WCAG21/#dfn-contrast-ratio).

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use sightline_common::warning::warn_once;

use super::named_colors::lookup_named_color;

/// Legacy comma-separated `rgb()`/`rgba()` with integer channels.
static RGB_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^rgba?\(\s*(\d+)\s*,\s*(\d+)\s*,\s*(\d+)\s*,?\s*([\d.]+)?\s*\)")
        .expect("RGB_RE: hardcoded regex is valid")
});

/// Legacy comma-separated `hsl()`/`hsla()` with integer hue and percentages.
static HSL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^hsla?\(\s*(\d+)\s*,\s*(\d+)%\s*,\s*(\d+)%\s*,?\s*([\d.]+)?\s*\)")
        .expect("HSL_RE: hardcoded regex is valid")
});

/// An sRGB color with a separate floating-point alpha.
///
/// Serializes as `{"rgb": [r, g, b], "alpha": a}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red, green and blue channels.
    pub rgb: (u8, u8, u8),
    /// "the alpha channel", always within `[0, 1]`.
    pub alpha: f64,
}

/// Which default a failed parse falls back to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorRole {
    /// Text color. Defaults to opaque black.
    Foreground,
    /// Background color. Defaults to opaque white.
    Background,
}

impl ColorRole {
    /// The color used when an input cannot be interpreted.
    #[must_use]
    pub const fn default_color(self) -> Color {
        match self {
            Self::Foreground => Color::BLACK,
            Self::Background => Color::WHITE,
        }
    }
}

/// Every shape a color can arrive in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColorInput<'a> {
    /// A CSS/HTML color string: hex, `rgb()`/`rgba()`, `hsl()`/`hsla()`,
    /// a named color, or `transparent`.
    Css(&'a str),
    /// Three or four numeric components: `r, g, b[, alpha]`.
    Components(&'a [f64]),
    /// An already-built color.
    Prebuilt(Color),
}

impl Color {
    /// Opaque black, the default foreground.
    pub const BLACK: Self = Self {
        rgb: (0, 0, 0),
        alpha: 1.0,
    };

    /// Opaque white, the default background.
    pub const WHITE: Self = Self {
        rgb: (255, 255, 255),
        alpha: 1.0,
    };

    /// [§ 6.2 transparent](https://www.w3.org/TR/css-color-4/#transparent-color)
    ///
    /// "transparent black"
    pub const TRANSPARENT: Self = Self {
        rgb: (0, 0, 0),
        alpha: 0.0,
    };

    /// Build a color, clamping alpha into `[0, 1]`. A NaN alpha is opaque.
    #[must_use]
    pub fn new(r: u8, g: u8, b: u8, alpha: f64) -> Self {
        let alpha = if alpha.is_nan() {
            1.0
        } else {
            alpha.clamp(0.0, 1.0)
        };
        Self {
            rgb: (r, g, b),
            alpha,
        }
    }

    /// Interpret `input`, falling back to the role's default when it is
    /// malformed. Never fails.
    #[must_use]
    pub fn parse(input: ColorInput<'_>, role: ColorRole) -> Self {
        let parsed = match input {
            ColorInput::Css(value) => {
                let parsed = Self::from_css(value);
                if parsed.is_none() && !value.trim().is_empty() {
                    warn_once("css", &format!("unrecognized color '{}'", value.trim()));
                }
                parsed
            }
            ColorInput::Components(values) => Self::from_components(values),
            ColorInput::Prebuilt(color) => Some(Self::new(
                color.rgb.0,
                color.rgb.1,
                color.rgb.2,
                color.alpha,
            )),
        };
        parsed.unwrap_or_else(|| role.default_color())
    }

    /// Parse a CSS color string. Case and surrounding whitespace are ignored.
    #[must_use]
    pub fn from_css(value: &str) -> Option<Self> {
        let value = value.trim().to_ascii_lowercase();
        if value == "transparent" {
            return Some(Self::TRANSPARENT);
        }
        if let Some(hex) = value.strip_prefix('#') {
            return Self::from_hex(hex);
        }
        if let Some(caps) = RGB_RE.captures(&value) {
            let channel = |i: usize| -> Option<u8> {
                let n: u32 = caps.get(i)?.as_str().parse().ok()?;
                Some(n.min(255) as u8)
            };
            let alpha = parse_alpha(caps.get(4).map(|m| m.as_str()))?;
            return Some(Self::new(channel(1)?, channel(2)?, channel(3)?, alpha));
        }
        if let Some(caps) = HSL_RE.captures(&value) {
            let component = |i: usize| -> Option<f64> {
                let n: u32 = caps.get(i)?.as_str().parse().ok()?;
                Some(f64::from(n))
            };
            let alpha = parse_alpha(caps.get(4).map(|m| m.as_str()))?;
            let (r, g, b) = hsl_to_rgb(component(1)?, component(2)?, component(3)?);
            return Some(Self::new(r, g, b, alpha));
        }
        lookup_named_color(&value).map(|(r, g, b)| Self::new(r, g, b, 1.0))
    }

    /// [§ 4.2 The RGB hexadecimal notations](https://www.w3.org/TR/css-color-4/#hex-notation)
    ///
    /// "The syntax of a <hex-color> is a <hash-token> token whose value consists of
    /// 3, 4, 6, or 8 hexadecimal digits."
    ///
    /// `hex` excludes the leading `#`.
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        // "The three-digit RGB notation (#RGB) is converted into six-digit form
        // (#RRGGBB) by replicating digits, not by adding zeros."
        let expanded: String = match hex.len() {
            3 | 4 => hex.chars().flat_map(|c| [c, c]).collect(),
            6 | 8 => hex.to_string(),
            _ => return None,
        };
        let byte = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).ok();
        let alpha = if expanded.len() == 8 {
            f64::from(byte(6)?) / 255.0
        } else {
            1.0
        };
        Some(Self::new(byte(0)?, byte(2)?, byte(4)?, alpha))
    }

    /// Three or four numeric components; channels are rounded and clamped.
    #[must_use]
    pub fn from_components(values: &[f64]) -> Option<Self> {
        let channel = |v: f64| v.round().clamp(0.0, 255.0) as u8;
        match *values {
            [r, g, b] => Some(Self::new(channel(r), channel(g), channel(b), 1.0)),
            [r, g, b, a] => Some(Self::new(channel(r), channel(g), channel(b), a)),
            _ => None,
        }
    }

    /// True if alpha is exactly zero.
    #[must_use]
    pub fn is_fully_transparent(&self) -> bool {
        self.alpha <= 0.0
    }

    /// "Over" compositing of `self` onto `backdrop`.
    ///
    /// Result alpha is `fgA + bgA * (1 - fgA)`; each channel is
    /// `fgC * fgA + bgC * bgA * (1 - fgA)`, capped at 255 and truncated.
    /// A fully transparent foreground yields [`Color::TRANSPARENT`] whatever
    /// the backdrop.
    #[must_use]
    pub fn composite(self, backdrop: Self) -> Self {
        if self.is_fully_transparent() {
            return Self::TRANSPARENT;
        }
        let fg_alpha = self.alpha;
        let carried = backdrop.alpha * (1.0 - fg_alpha);
        let channel = |fg: u8, bg: u8| -> u8 {
            (f64::from(fg) * fg_alpha + f64::from(bg) * carried).min(255.0) as u8
        };
        Self::new(
            channel(self.rgb.0, backdrop.rgb.0),
            channel(self.rgb.1, backdrop.rgb.1),
            channel(self.rgb.2, backdrop.rgb.2),
            fg_alpha + carried,
        )
    }

    /// [WCAG 2.1 relative luminance](https://www.w3.org/TR/WCAG21/#dfn-relative-luminance)
    ///
    /// "the relative brightness of any point in a colorspace, normalized to 0
    /// for darkest black and 1 for lightest white"
    ///
    /// Alpha is ignored.
    #[must_use]
    pub fn relative_luminance(&self) -> f64 {
        let linearize = |c: u8| {
            let c = f64::from(c) / 255.0;
            if c <= 0.039_28 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        };
        0.2126 * linearize(self.rgb.0)
            + 0.7152 * linearize(self.rgb.1)
            + 0.0722 * linearize(self.rgb.2)
    }

    /// [WCAG 2.1 contrast ratio](https://www.w3.org/TR/WCAG21/#dfn-contrast-ratio)
    ///
    /// "(L1 + 0.05) / (L2 + 0.05), where L1 is the relative luminance of the
    /// lighter of the colors, and L2 is the relative luminance of the darker"
    ///
    /// Rounded to two decimals.
    #[must_use]
    pub fn contrast(&self, other: &Self) -> f64 {
        let a = self.relative_luminance() + 0.05;
        let b = other.relative_luminance() + 0.05;
        let ratio = a.max(b) / a.min(b);
        (ratio * 100.0).round() / 100.0
    }

    /// `#rrggbb`, or `#rrggbbaa` when not fully opaque.
    #[must_use]
    pub fn to_hex(&self) -> String {
        let (r, g, b) = self.rgb;
        if self.alpha >= 1.0 {
            format!("#{r:02x}{g:02x}{b:02x}")
        } else {
            let a = (self.alpha * 255.0).round() as u8;
            format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// A missing alpha is opaque; an unparsable one rejects the whole color.
fn parse_alpha(alpha: Option<&str>) -> Option<f64> {
    alpha.map_or(Some(1.0), |a| a.parse().ok())
}

/// HSL to RGB via the classic `p`/`q` hue ramp.
///
/// `hue` in degrees, `saturation` and `lightness` in percent.
fn hsl_to_rgb(hue: f64, saturation: f64, lightness: f64) -> (u8, u8, u8) {
    let h = hue / 360.0;
    let s = saturation / 100.0;
    let l = lightness / 100.0;

    let to_byte = |v: f64| (v * 255.0).round_ties_even().clamp(0.0, 255.0) as u8;
    if s <= 0.0 {
        let v = to_byte(l);
        return (v, v, v);
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    let hue_to_rgb = |t: f64| {
        let t = if t < 0.0 { t + 1.0 } else { t };
        let t = if t > 1.0 { t - 1.0 } else { t };
        if t < 1.0 / 6.0 {
            p + (q - p) * 6.0 * t
        } else if t < 0.5 {
            q
        } else if t < 2.0 / 3.0 {
            p + (q - p) * (2.0 / 3.0 - t) * 6.0
        } else {
            p
        }
    };
    (
        to_byte(hue_to_rgb(h + 1.0 / 3.0)),
        to_byte(hue_to_rgb(h)),
        to_byte(hue_to_rgb(h - 1.0 / 3.0)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_forms() {
        assert_eq!(Color::from_css("#fff"), Some(Color::WHITE));
        assert_eq!(Color::from_css("#000000"), Some(Color::BLACK));
        assert_eq!(
            Color::from_css("#ff000080"),
            Some(Color::new(255, 0, 0, 128.0 / 255.0))
        );
        assert_eq!(Color::from_css("#f008"), Color::from_css("#ff000088"));
        assert_eq!(Color::from_css("#12345"), None);
        assert_eq!(Color::from_css("#ggg"), None);
    }

    #[test]
    fn test_rgb_and_hsl_functions() {
        assert_eq!(
            Color::from_css("RGBA(10, 20, 300, 0.5)"),
            Some(Color::new(10, 20, 255, 0.5))
        );
        assert_eq!(Color::from_css("rgb(1,2,3)"), Some(Color::new(1, 2, 3, 1.0)));
        assert_eq!(Color::from_css("rgba(1,2,3,2)"), Some(Color::new(1, 2, 3, 1.0)));
        assert_eq!(Color::from_css("hsl(0, 100%, 50%)"), Some(Color::new(255, 0, 0, 1.0)));
        assert_eq!(Color::from_css("hsl(120, 0%, 100%)"), Some(Color::WHITE));
        assert_eq!(
            Color::from_css("hsla(240, 100%, 50%, 0.25)"),
            Some(Color::new(0, 0, 255, 0.25))
        );
    }

    #[test]
    fn test_hsl_to_rgb_matches_named_colors() {
        // hsl(39, 100%, 50%) is the classic "orange" approximation
        assert_eq!(hsl_to_rgb(39.0, 100.0, 50.0), (255, 166, 0));
        assert_eq!(hsl_to_rgb(0.0, 0.0, 50.0), (128, 128, 128));
    }

    #[test]
    fn test_named_and_transparent() {
        assert_eq!(Color::from_css(" Red "), Some(Color::new(255, 0, 0, 1.0)));
        assert_eq!(Color::from_css("transparent"), Some(Color::TRANSPARENT));
        assert_eq!(Color::from_css("bogus"), None);
    }

    #[test]
    fn test_role_defaults() {
        assert_eq!(
            Color::parse(ColorInput::Css("nonsense"), ColorRole::Foreground),
            Color::BLACK
        );
        assert_eq!(
            Color::parse(ColorInput::Css("nonsense"), ColorRole::Background),
            Color::WHITE
        );
        assert_eq!(
            Color::parse(ColorInput::Components(&[1.0, 2.0]), ColorRole::Background),
            Color::WHITE
        );
        assert_eq!(
            Color::parse(
                ColorInput::Components(&[300.0, -4.0, 12.4, 7.0]),
                ColorRole::Foreground
            ),
            Color::new(255, 0, 12, 1.0)
        );
    }

    #[test]
    fn test_prebuilt_alpha_is_clamped() {
        let raw = Color {
            rgb: (1, 2, 3),
            alpha: 3.0,
        };
        assert_eq!(
            Color::parse(ColorInput::Prebuilt(raw), ColorRole::Foreground),
            Color::new(1, 2, 3, 1.0)
        );
    }

    #[test]
    fn test_to_hex() {
        assert_eq!(Color::new(18, 52, 86, 1.0).to_hex(), "#123456");
        assert_eq!(Color::TRANSPARENT.to_hex(), "#00000000");
    }
}
