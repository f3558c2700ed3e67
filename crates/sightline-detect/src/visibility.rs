//! The visibility classifier.
//!
//! Given one resolved [`Style`], decide whether text rendered with it could
//! be perceived, and if not, why. Each check is independent; a style can
//! collect several reasons.

use std::fmt;

use serde::{Serialize, Serializer};
use sightline_css::values::{Color, ColorRole, opacity_value, parse_length};
use sightline_css::{Property, Style};

use crate::config::DetectionConfig;

/// Properties whose large values move text out of the viewport.
const OFFSET_PROPERTIES: [Property; 9] = [
    Property::Left,
    Property::Right,
    Property::Top,
    Property::Bottom,
    Property::MarginLeft,
    Property::MarginRight,
    Property::MarginTop,
    Property::MarginBottom,
    Property::TextIndent,
];

/// Properties that can clip text away.
const CLIP_PROPERTIES: [Property; 2] = [Property::ClipPath, Property::Clip];

/// Clip shapes that leave nothing visible, matched as lowercase prefixes
/// anywhere in the value.
const HIDING_CLIP_PATTERNS: [&str; 4] = ["inset(100%", "rect(0", "circle(0", "polygon(0 0"];

/// Why a piece of text was judged hidden.
///
/// Serializes as its display label, e.g. `"display:none"` or
/// `"low_contrast:1.01"`.
#[derive(Debug, Clone, PartialEq)]
pub enum HiddenReason {
    /// `visibility: hidden` or `collapse`.
    Visibility,
    /// `display: none`.
    DisplayNone,
    /// Accumulated opacity at or below the threshold.
    Opacity(f64),
    /// Text color identical to the effective background.
    SameColor,
    /// Contrast ratio below the threshold.
    LowContrast(f64),
    /// A positional property moves the text far off screen.
    PositionOffset,
    /// `clip`/`clip-path` cuts the text away.
    Clipping,
    /// Font size, in pixels, below the threshold.
    FontTooSmall(f64),
    /// A `filter` makes the text transparent or unreadably blurred.
    FilterEffect,
}

impl fmt::Display for HiddenReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Visibility => f.write_str("visibility"),
            Self::DisplayNone => f.write_str("display:none"),
            Self::Opacity(value) => write!(f, "opacity:{value:.2}"),
            Self::SameColor => f.write_str("same_color"),
            Self::LowContrast(ratio) => write!(f, "low_contrast:{ratio}"),
            Self::PositionOffset => f.write_str("position_offset"),
            Self::Clipping => f.write_str("clipping"),
            Self::FontTooSmall(px) => write!(f, "font_too_small:{px}px"),
            Self::FilterEffect => f.write_str("filter_effect"),
        }
    }
}

impl Serialize for HiddenReason {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Runs every visibility check against resolved styles.
#[derive(Debug, Clone, Default)]
pub struct VisibilityClassifier {
    config: DetectionConfig,
}

impl VisibilityClassifier {
    /// A classifier using `config`'s thresholds.
    #[must_use]
    pub const fn new(config: DetectionConfig) -> Self {
        Self { config }
    }

    /// The thresholds in use.
    #[must_use]
    pub const fn config(&self) -> &DetectionConfig {
        &self.config
    }

    /// Every reason `style` hides its text, in check order. Empty means
    /// visible.
    #[must_use]
    pub fn classify(&self, style: &Style) -> Vec<HiddenReason> {
        let mut reasons = Vec::new();

        // [CSS Display § 2.7 Visibility](https://www.w3.org/TR/css-display-3/#visibility)
        if style
            .get_str(&Property::Visibility)
            .is_some_and(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "hidden" | "collapse"))
        {
            reasons.push(HiddenReason::Visibility);
        }

        // [CSS Display § 2.5 Box Generation](https://www.w3.org/TR/css-display-3/#box-generation)
        //
        // "none: The element and its descendants generate no boxes or text runs."
        if style
            .get_str(&Property::Display)
            .is_some_and(|v| v.trim().eq_ignore_ascii_case("none"))
        {
            reasons.push(HiddenReason::DisplayNone);
        }

        let opacity = opacity_value(style.get_str(&Property::Opacity).unwrap_or("1"));
        if opacity <= self.config.min_opacity {
            reasons.push(HiddenReason::Opacity(opacity));
        }

        if let Some(reason) = self.check_contrast(style) {
            reasons.push(reason);
        }

        if self.has_large_offset(style) {
            reasons.push(HiddenReason::PositionOffset);
        }

        if has_hiding_clip(style) {
            reasons.push(HiddenReason::Clipping);
        }

        if let Some(px) = style.get_str(&Property::FontSize).map_or(Some(16.0), parse_length)
            && px < self.config.min_font_size_px
        {
            reasons.push(HiddenReason::FontTooSmall(px));
        }

        if style
            .get_str(&Property::Filter)
            .is_some_and(|filter| filter.split_whitespace().any(|f| self.is_hiding_filter(f)))
        {
            reasons.push(HiddenReason::FilterEffect);
        }

        reasons
    }

    /// Compare the text color against the background as painted on the
    /// white page.
    fn check_contrast(&self, style: &Style) -> Option<HiddenReason> {
        let foreground = style
            .color(&Property::Color, ColorRole::Foreground)
            .unwrap_or(Color::BLACK);
        let background = style
            .color(&Property::BackgroundColor, ColorRole::Background)
            .unwrap_or(Color::WHITE)
            .composite(Color::WHITE);

        if foreground == background {
            return Some(HiddenReason::SameColor);
        }
        let ratio = foreground.contrast(&background);
        (ratio < self.config.min_contrast).then_some(HiddenReason::LowContrast(ratio))
    }

    fn has_large_offset(&self, style: &Style) -> bool {
        OFFSET_PROPERTIES.iter().any(|property| {
            style
                .get_str(property)
                .and_then(parse_length)
                .is_some_and(|px| px.abs() > self.config.max_offset_px)
        })
    }

    /// [Filter Effects § 12 Supported Filter Functions](https://www.w3.org/TR/filter-effects-1/#supported-filter-functions)
    fn is_hiding_filter(&self, function: &str) -> bool {
        let function = function.to_ascii_lowercase();
        if let Some(argument) = function_argument(&function, "opacity(") {
            // "A value of 0% is completely transparent."
            let percent = match argument.strip_suffix('%') {
                Some(percent) => percent.trim().parse::<f64>().ok(),
                None => argument.trim().parse::<f64>().ok().map(|v| v * 100.0),
            };
            return percent.is_some_and(|p| p <= self.config.max_filter_opacity_percent);
        }
        if let Some(argument) = function_argument(&function, "blur(") {
            return parse_length(argument.trim()).is_some_and(|px| px > self.config.max_blur_px);
        }
        false
    }
}

fn has_hiding_clip(style: &Style) -> bool {
    CLIP_PROPERTIES.iter().any(|property| {
        style.get_str(property).is_some_and(|value| {
            let value = value.to_ascii_lowercase();
            HIDING_CLIP_PATTERNS.iter().any(|pattern| value.contains(pattern))
        })
    })
}

/// The text between `name(` and the closing parenthesis.
fn function_argument<'a>(function: &'a str, name: &str) -> Option<&'a str> {
    let rest = function.strip_prefix(name)?;
    Some(rest.strip_suffix(')').unwrap_or(rest))
}
