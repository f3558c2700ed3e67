//! Style model for sightline.
//!
//! # Scope
//!
//! This crate implements:
//! - **Color model** ([CSS Color 4](https://www.w3.org/TR/css-color-4/)):
//!   hex, `rgb()`, `hsl()`, named colors, "over" compositing and the
//!   [WCAG 2.1 contrast ratio](https://www.w3.org/TR/WCAG21/#dfn-contrast-ratio)
//! - **Values**: lengths, `font-size` normalization, accumulated opacity
//! - **Inline declarations** from `style` attributes
//! - **Cascade**: inherited snapshot, legacy presentational attributes,
//!   inline style
//!
//! # Not Implemented
//!
//! - Stylesheets, selectors and specificity
//! - `@media` and other at-rules
//! - Computed values for anything the detector does not inspect

/// Resolving a node's style from its parent's.
pub mod cascade;
/// Inline `style` attribute parsing.
pub mod declaration;
/// Resolved style maps and the property vocabulary.
pub mod style;
/// CSS value types.
pub mod values;

pub use cascade::{PRESENTATIONAL_TAGS, resolve_style};
pub use declaration::{Declaration, parse_inline_style};
pub use style::{Property, Style, StyleValue};
pub use values::{Color, ColorInput, ColorRole};
