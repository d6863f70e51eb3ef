//! Geometry primitives: points, vectors, and rectangles.

mod point;
mod rect;

pub use point::{Point, Vec2};
pub use rect::Rect;
