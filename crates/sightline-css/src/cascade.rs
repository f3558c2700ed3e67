//! Style resolution for one node.
//!
//! The detector models a reduced cascade: the inherited snapshot, then the
//! legacy presentational attributes mail clients still honor, then the
//! inline `style` attribute. There are no stylesheets and no selectors.

use sightline_dom::ElementData;

use crate::declaration::parse_inline_style;
use crate::style::{Property, Style, StyleValue};
use crate::values::color::{Color, ColorInput, ColorRole};
use crate::values::font::normalize_font_size;
use crate::values::opacity::{OPAQUE, fold_alpha, parse_opacity};

/// Elements whose `bgcolor`, `text`, `align` and `width` attributes are
/// honored.
pub const PRESENTATIONAL_TAGS: [&str; 6] = ["table", "tr", "td", "th", "font", "body"];

/// Resolve the style of one node from its parent's inheritable snapshot.
///
/// `element` is `None` for the document node, which only carries the
/// inherited values forward. The returned style always has `opacity` set to
/// the accumulated product as a two-decimal string.
#[must_use]
pub fn resolve_style(element: Option<&ElementData>, inherited: &Style) -> Style {
    // [§ 7 Inheritance](https://www.w3.org/TR/css-cascade-4/#inheriting)
    // Start from a copy so siblings never see each other's declarations.
    let mut style = inherited.clone();
    let parent_opacity = inherited.get_str(&Property::Opacity).unwrap_or(OPAQUE);
    let own_opacity = element.and_then(|e| e.attr("opacity")).unwrap_or("1");
    let mut opacity = parse_opacity(own_opacity, parent_opacity);

    if let Some(element) = element {
        apply_font_attributes(element, &mut style, &mut opacity);
        apply_table_attributes(element, &mut style, &mut opacity);
        if let Some(inline) = element.attr("style") {
            apply_inline_style(inline, &mut style, &mut opacity);
        }
    }

    style.set(Property::Opacity, StyleValue::Raw(opacity));
    style
}

/// [HTML § 15.3.4 Phrasing content](https://html.spec.whatwg.org/multipage/rendering.html#phrasing-content-3)
///
/// "The font element is expected to override the color of any text inside
/// the element [...] When a font element has a size attribute, the user agent
/// is expected to use the following steps"
fn apply_font_attributes(element: &ElementData, style: &mut Style, opacity: &mut String) {
    if !element.is("font") {
        return;
    }
    if let Some(value) = element.attr("color") {
        set_foreground(style, opacity, Color::parse(ColorInput::Css(value), ColorRole::Foreground));
    }
    if let Some(value) = element.attr("size") {
        style.set(Property::FontSize, StyleValue::Length(normalize_font_size(value)));
    }
}

/// [HTML § 15.3.8 Tables](https://html.spec.whatwg.org/multipage/rendering.html#tables-2)
///
/// "The table, thead, tbody, tfoot, tr, td, and th elements, when they have a
/// bgcolor attribute set, [...] is expected to be used as the element's
/// 'background-color' property"
fn apply_table_attributes(element: &ElementData, style: &mut Style, opacity: &mut String) {
    if !PRESENTATIONAL_TAGS.contains(&element.tag_name.as_str()) {
        return;
    }

    if let Some(value) = element.attr("bgcolor") {
        let layer = Color::parse(ColorInput::Css(value), ColorRole::Background);
        // A nested bgcolor stacks over whatever background was already in
        // effect instead of replacing it.
        let background = match style.color(&Property::BackgroundColor, ColorRole::Background) {
            Some(existing) => layer.composite(existing),
            None => layer,
        };
        style.set(Property::BackgroundColor, StyleValue::Color(background));
    }

    if let Some(value) = element.attr("text") {
        set_foreground(style, opacity, Color::parse(ColorInput::Css(value), ColorRole::Foreground));
    }

    if let Some(value) = element.attr("align") {
        let align = match value.trim().to_ascii_lowercase().as_str() {
            "right" => "right",
            "center" | "middle" => "center",
            "justify" => "justify",
            _ => "left",
        };
        style.set(Property::TextAlign, StyleValue::Raw(align.to_string()));
    }

    if let Some(value) = element.attr("width") {
        let width = if !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()) {
            StyleValue::Length(format!("{value}px"))
        } else {
            StyleValue::Raw(value.to_string())
        };
        style.set(Property::Width, width);
    }
}

/// [CSS Style Attributes § 3](https://www.w3.org/TR/css-style-attr/#interpret)
///
/// "The declarations in a style attribute apply to the element to which the
/// attribute belongs."
fn apply_inline_style(inline: &str, style: &mut Style, opacity: &mut String) {
    for declaration in parse_inline_style(inline) {
        let value = declaration.value.as_str();
        match declaration.name.as_str() {
            "background-color" | "bgcolor" => {
                let color = Color::parse(ColorInput::Css(value), ColorRole::Background);
                style.set(Property::BackgroundColor, StyleValue::Color(color));
            }
            "color" => {
                set_foreground(style, opacity, Color::parse(ColorInput::Css(value), ColorRole::Foreground));
            }
            "font-size" => {
                style.set(Property::FontSize, StyleValue::Length(normalize_font_size(value)));
            }
            "opacity" => *opacity = parse_opacity(value, opacity),
            name => style.set(name, StyleValue::Raw(value.to_string())),
        }
    }
}

/// Set `color` and multiply its alpha into the opacity accumulator.
fn set_foreground(style: &mut Style, opacity: &mut String, color: Color) {
    *opacity = fold_alpha(color.alpha, opacity);
    style.set(Property::Color, StyleValue::Color(color));
}
