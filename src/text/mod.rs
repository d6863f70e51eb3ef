//! Text styling, alignment, and the font seam.
//!
//! Real glyph shaping lives behind the [`Font`] trait so a host can plug
//! in a hardware-accelerated text stack. [`MonoFont`] is a fixed-advance
//! implementation good enough for layout math, culling, and tests.

mod font;
mod style;

pub use font::{Font, MonoFont, WrappedLine};
pub use style::{AlignMode, BoxMode, LabelStyle, StyleFlags, TextStyle};

pub(crate) use style::{HAlign, VAlign};
