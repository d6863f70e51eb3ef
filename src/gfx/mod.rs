//! Software graphics: colors, pixel surfaces, and shape rasterization.
//!
//! This module is the drawable-surface seam of the framework. Render
//! commands draw onto a [`Pixmap`] and never touch the scene tree, so a
//! host can copy the finished pixmap into a native window surface (or a
//! test can inspect it pixel by pixel).

mod color;
pub mod draw;
mod pixmap;

pub use color::{BlendMode, Rgba};
pub use draw::{CornerRadii, Quadrant};
pub use pixmap::Pixmap;
