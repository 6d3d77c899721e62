//! Style attributes and color values.

mod attributes;
mod color;

pub use attributes::{Decoration, Display, StyleAttributes, TextAlign, Width};
pub use color::{ColorDef, ColorError};
