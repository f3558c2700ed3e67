//! Resolved styles.
//!
//! A [`Style`] maps property names to values. Only a handful of properties
//! are interpreted by the cascade; everything else declared inline is kept
//! verbatim so the classifier can look at it later.

use std::collections::BTreeMap;

use serde::Serialize;
use strum_macros::{AsRefStr, Display, EnumString};

use crate::values::color::{Color, ColorInput, ColorRole};
use crate::values::font::DEFAULT_FONT_SIZE;

/// Property names the detector reads or writes.
///
/// Any other inline property is stored under its lowercased name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum Property {
    /// `color`
    Color,
    /// `background-color`
    BackgroundColor,
    /// `bgcolor`, accepted inline as an alias of `background-color`
    Bgcolor,
    /// `font-family`
    FontFamily,
    /// `font-size`
    FontSize,
    /// `font-weight`
    FontWeight,
    /// `font-style`
    FontStyle,
    /// `line-height`
    LineHeight,
    /// `text-indent`
    TextIndent,
    /// `text-align`
    TextAlign,
    /// `visibility`
    Visibility,
    /// `display`
    Display,
    /// `opacity`, the accumulated product
    Opacity,
    /// `width`
    Width,
    /// `left`
    Left,
    /// `right`
    Right,
    /// `top`
    Top,
    /// `bottom`
    Bottom,
    /// `margin-left`
    MarginLeft,
    /// `margin-right`
    MarginRight,
    /// `margin-top`
    MarginTop,
    /// `margin-bottom`
    MarginBottom,
    /// `clip`
    Clip,
    /// `clip-path`
    ClipPath,
    /// `filter`
    Filter,
}

impl Property {
    /// [CSS Cascade § 7.2 Inherited Properties](https://www.w3.org/TR/css-cascade-4/#inheriting)
    ///
    /// The properties a node passes on to its children. Background color and
    /// opacity are included so stacked layers keep their effect on descendants.
    pub const INHERITABLE: [Self; 11] = [
        Self::Color,
        Self::FontFamily,
        Self::FontSize,
        Self::FontWeight,
        Self::FontStyle,
        Self::LineHeight,
        Self::TextIndent,
        Self::Visibility,
        Self::Opacity,
        Self::BackgroundColor,
        Self::Bgcolor,
    ];

    /// Whether `name` is one of [`Property::INHERITABLE`].
    #[must_use]
    pub fn is_inheritable(name: &str) -> bool {
        Self::INHERITABLE.iter().any(|p| p.as_ref() == name)
    }
}

/// A single resolved property value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StyleValue {
    /// A parsed color.
    Color(Color),
    /// A normalized `<number><unit>` string, e.g. `font-size` or `width`.
    Length(String),
    /// Anything else, as declared.
    Raw(String),
}

impl StyleValue {
    /// The string form, for non-color values.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Color(_) => None,
            Self::Length(s) | Self::Raw(s) => Some(s),
        }
    }
}

/// A resolved style. Serializes as a JSON object keyed by property name.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Style(BTreeMap<String, StyleValue>);

impl Style {
    /// An empty style.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The style every path starts from: black text on white, 16px, opaque.
    #[must_use]
    pub fn root_default() -> Self {
        let mut style = Self::new();
        style.set(Property::Color, StyleValue::Color(Color::BLACK));
        style.set(Property::BackgroundColor, StyleValue::Color(Color::WHITE));
        style.set(
            Property::FontSize,
            StyleValue::Length(DEFAULT_FONT_SIZE.to_string()),
        );
        style.set(Property::Opacity, StyleValue::Raw("1".to_string()));
        style
    }

    /// Look up a property.
    #[must_use]
    pub fn get<K: AsRef<str> + ?Sized>(&self, name: &K) -> Option<&StyleValue> {
        self.0.get(name.as_ref())
    }

    /// Look up a property's string value. `None` for colors and absent properties.
    #[must_use]
    pub fn get_str<K: AsRef<str> + ?Sized>(&self, name: &K) -> Option<&str> {
        self.get(name).and_then(StyleValue::as_str)
    }

    /// Look up a property as a color, parsing string values on the way.
    #[must_use]
    pub fn color<K: AsRef<str> + ?Sized>(&self, name: &K, role: ColorRole) -> Option<Color> {
        match self.get(name)? {
            StyleValue::Color(color) => Some(*color),
            StyleValue::Length(s) | StyleValue::Raw(s) => {
                Some(Color::parse(ColorInput::Css(s), role))
            }
        }
    }

    /// Whether the property is present.
    #[must_use]
    pub fn contains<K: AsRef<str> + ?Sized>(&self, name: &K) -> bool {
        self.0.contains_key(name.as_ref())
    }

    /// Set a property, replacing any previous value.
    pub fn set(&mut self, name: impl AsRef<str>, value: StyleValue) {
        let _ = self.0.insert(name.as_ref().to_string(), value);
    }

    /// The snapshot handed to children: only inheritable properties.
    #[must_use]
    pub fn inheritable(&self) -> Self {
        Self(
            self.0
                .iter()
                .filter(|(name, _)| Property::is_inheritable(name))
                .map(|(name, value)| (name.clone(), value.clone()))
                .collect(),
        )
    }

    /// Properties in name order.
    pub fn properties(&self) -> impl Iterator<Item = (&str, &StyleValue)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Number of properties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if no property is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_property_names() {
        assert_eq!(Property::BackgroundColor.as_ref(), "background-color");
        assert_eq!(Property::ClipPath.to_string(), "clip-path");
        assert_eq!(Property::from_str("margin-left"), Ok(Property::MarginLeft));
        assert!(Property::from_str("background").is_err());
    }

    #[test]
    fn test_inheritable_snapshot() {
        let mut style = Style::root_default();
        style.set(Property::Width, StyleValue::Length("10px".to_string()));
        style.set(Property::Visibility, StyleValue::Raw("hidden".to_string()));
        style.set("border", StyleValue::Raw("1px solid".to_string()));

        let snapshot = style.inheritable();
        assert!(!snapshot.contains(&Property::Width));
        assert!(!snapshot.contains("border"));
        assert_eq!(snapshot.get_str(&Property::Visibility), Some("hidden"));
        assert_eq!(snapshot.len(), 5);
    }

    #[test]
    fn test_color_lookup_parses_strings() {
        let mut style = Style::new();
        style.set("outline-color", StyleValue::Raw("red".to_string()));
        assert_eq!(
            style.color("outline-color", ColorRole::Foreground),
            Some(Color::new(255, 0, 0, 1.0))
        );
        assert_eq!(style.color(&Property::Color, ColorRole::Foreground), None);
    }

    #[test]
    fn test_serializes_as_flat_object() {
        let style = Style::root_default();
        let json = serde_json::to_value(&style).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "background-color": {"rgb": [255, 255, 255], "alpha": 1.0},
                "color": {"rgb": [0, 0, 0], "alpha": 1.0},
                "font-size": "16px",
                "opacity": "1",
            })
        );
    }
}
