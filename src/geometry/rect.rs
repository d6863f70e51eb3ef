//! Rect: A rectangle primitive for layout and hit testing.

use super::point::Point;

/// A rectangle defined by position and size, in integer pixels.
///
/// Unlike a screen-space-only rectangle, coordinates may be negative:
/// layout code routinely positions children partially outside a parent
/// and relies on clipping at render time.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// X coordinate of the top-left corner.
    pub x: i32,
    /// Y coordinate of the top-left corner.
    pub y: i32,
    /// Width in pixels.
    pub w: i32,
    /// Height in pixels.
    pub h: i32,
}

impl Rect {
    /// Zero-sized rectangle at the origin.
    pub const ZERO: Self = Self::new(0, 0, 0, 0);

    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Create a rectangle from a size, positioned at the origin.
    #[inline]
    pub const fn from_size(w: i32, h: i32) -> Self {
        Self::new(0, 0, w, h)
    }

    /// Check if the rectangle has no area.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Left edge.
    #[inline]
    pub const fn left(&self) -> i32 {
        self.x
    }

    /// Top edge.
    #[inline]
    pub const fn top(&self) -> i32 {
        self.y
    }

    /// Right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> i32 {
        self.x + self.w
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Top-left corner.
    #[inline]
    pub const fn top_left(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Vertical center.
    #[inline]
    pub const fn center_y(&self) -> i32 {
        self.y + self.h / 2
    }

    /// Horizontal center.
    #[inline]
    pub const fn center_x(&self) -> i32 {
        self.x + self.w / 2
    }

    /// Size as a (width, height) pair.
    #[inline]
    pub const fn size(&self) -> (i32, i32) {
        (self.w, self.h)
    }

    /// Move the left edge, keeping the width.
    #[inline]
    pub const fn set_left(&mut self, left: i32) {
        self.x = left;
    }

    /// Move the right edge, keeping the width.
    #[inline]
    pub const fn set_right(&mut self, right: i32) {
        self.x = right - self.w;
    }

    /// Move the top edge, keeping the height.
    #[inline]
    pub const fn set_top(&mut self, top: i32) {
        self.y = top;
    }

    /// Move the bottom edge, keeping the height.
    #[inline]
    pub const fn set_bottom(&mut self, bottom: i32) {
        self.y = bottom - self.h;
    }

    /// Translate by a point offset.
    #[inline]
    #[must_use]
    pub const fn moved(&self, offset: Point) -> Self {
        Self::new(self.x + offset.x, self.y + offset.y, self.w, self.h)
    }

    /// Grow (or shrink, with negative amounts) around the center.
    #[inline]
    #[must_use]
    pub const fn inflated(&self, dw: i32, dh: i32) -> Self {
        Self::new(self.x - dw / 2, self.y - dh / 2, self.w + dw, self.h + dh)
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    pub const fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }

    /// Check if this rectangle intersects with another.
    #[inline]
    pub const fn intersects(&self, other: &Self) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Intersection with another rectangle; `ZERO` if they do not overlap.
    #[must_use]
    pub fn clip(&self, other: &Self) -> Self {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right <= x || bottom <= y {
            return Self::ZERO;
        }
        Self::new(x, y, right - x, bottom - y)
    }

    /// Smallest rectangle containing both; empty rects are ignored.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Self::new(x, y, right - x, bottom - y)
    }
}

impl std::fmt::Debug for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Rect({}, {} {}x{})", self.x, self.y, self.w, self.h)
    }
}
