//! Console and export rendering helpers: colors, themes, inline markup,
//! value highlighting, message interpolation, type hints and the data table.

mod color;
mod format;
pub mod highlight;
pub mod style;
pub mod table;
mod theme;
mod type_hint;

pub use color::Color;
pub use format::{FormatSegment, FormatTemplate, interpolate};
pub use highlight::{Highlight, inject_tags};
pub use style::{Segment, parse, render, render_plain, strip_tags};
pub use theme::{Style, Theme};
pub use type_hint::type_of;
