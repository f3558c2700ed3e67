//! CSS value types per [CSS Values and Units Level 4](https://www.w3.org/TR/css-values-4/)
//! and [CSS Color Level 4](https://www.w3.org/TR/css-color-4/).
//!
//! Everything here is total: malformed input resolves to a documented
//! default instead of an error, so one bad declaration never stops a
//! document from being analyzed.
//!
//! | Module | Values |
//! |--------|--------|
//! | [`color`] | `<color>`, compositing, WCAG contrast |
//! | [`length`] | `<length>` resolved to pixels |
//! | [`font`] | `font-size` normalization, legacy `<font size>` |
//! | [`opacity`] | accumulated `opacity` |

/// Colors, compositing and contrast.
pub mod color;
/// Font-size normalization.
pub mod font;
/// Lengths in pixels.
pub mod length;
/// The CSS named-color table.
pub mod named_colors;
/// Accumulated opacity.
pub mod opacity;

pub use color::{Color, ColorInput, ColorRole};
pub use font::normalize_font_size;
pub use length::{Length, parse_length};
pub use opacity::{fold_alpha, opacity_value, parse_opacity};
