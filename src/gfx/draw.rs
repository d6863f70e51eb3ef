//! Shape rasterization helpers: rounded rectangles and circle quadrants.
//!
//! Everything here draws with edge anti-aliasing directly onto a
//! [`Pixmap`]. Shapes clip to the surface automatically.

use crate::geometry::{Point, Rect};

use super::color::Rgba;
use super::pixmap::Pixmap;

/// Per-corner radii for a rounded rectangle.
///
/// A negative entry means "use the shared radius" and is resolved with
/// [`CornerRadii::resolve`] before drawing.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct CornerRadii {
    /// Top-left corner radius.
    pub top_left: i32,
    /// Top-right corner radius.
    pub top_right: i32,
    /// Bottom-right corner radius.
    pub bottom_right: i32,
    /// Bottom-left corner radius.
    pub bottom_left: i32,
}

impl CornerRadii {
    /// All four corners share one radius.
    #[inline]
    pub const fn uniform(radius: i32) -> Self {
        Self {
            top_left: radius,
            top_right: radius,
            bottom_right: radius,
            bottom_left: radius,
        }
    }

    /// Square corners.
    pub const NONE: Self = Self::uniform(0);

    /// Replace negative entries with `fallback` and clamp at zero.
    #[must_use]
    pub const fn resolve(&self, fallback: i32) -> Self {
        const fn pick(v: i32, fallback: i32) -> i32 {
            let v = if v < 0 { fallback } else { v };
            if v < 0 { 0 } else { v }
        }
        Self {
            top_left: pick(self.top_left, fallback),
            top_right: pick(self.top_right, fallback),
            bottom_right: pick(self.bottom_right, fallback),
            bottom_left: pick(self.bottom_left, fallback),
        }
    }

    /// Shrink every radius by `amount`, clamping at zero.
    #[must_use]
    pub const fn shrunk(&self, amount: i32) -> Self {
        const fn sub(v: i32, amount: i32) -> i32 {
            let v = v - amount;
            if v < 0 { 0 } else { v }
        }
        Self {
            top_left: sub(self.top_left, amount),
            top_right: sub(self.top_right, amount),
            bottom_right: sub(self.bottom_right, amount),
            bottom_left: sub(self.bottom_left, amount),
        }
    }
}

impl Default for CornerRadii {
    fn default() -> Self {
        Self::uniform(-1)
    }
}

/// One quadrant of a circle, in screen coordinates (y grows downward).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Quadrant {
    /// dx >= 0, dy <= 0
    TopRight,
    /// dx <= 0, dy <= 0
    TopLeft,
    /// dx <= 0, dy >= 0
    BottomLeft,
    /// dx >= 0, dy >= 0
    BottomRight,
}

impl Quadrant {
    /// Sign test for a delta from the circle center.
    ///
    /// Axis points belong to both adjacent quadrants.
    #[inline]
    pub const fn contains_delta(&self, dx: i32, dy: i32) -> bool {
        match self {
            Self::TopRight => dx >= 0 && dy <= 0,
            Self::TopLeft => dx <= 0 && dy <= 0,
            Self::BottomLeft => dx <= 0 && dy >= 0,
            Self::BottomRight => dx >= 0 && dy >= 0,
        }
    }
}

/// Signed coverage of a pixel center against a circular edge.
///
/// 1.0 well inside, 0.0 well outside, fractional within a pixel of the
/// edge.
#[inline]
fn edge_coverage(dist: f32, radius: f32) -> f32 {
    (radius + 0.5 - dist).clamp(0.0, 1.0)
}

/// Coverage of a point inside a rounded rectangle.
///
/// The rectangle is treated with half-open bounds. Only corner arcs are
/// anti-aliased; straight edges are pixel-exact.
#[allow(clippy::cast_precision_loss)]
fn rounded_coverage(rect: Rect, radii: &CornerRadii, x: i32, y: i32) -> f32 {
    if !rect.contains(Point::new(x, y)) {
        return 0.0;
    }
    // (corner center, radius) for whichever corner square the point is in
    let corner = if x < rect.left() + radii.top_left && y < rect.top() + radii.top_left {
        Some((
            rect.left() + radii.top_left - 1,
            rect.top() + radii.top_left - 1,
            radii.top_left,
        ))
    } else if x >= rect.right() - radii.top_right && y < rect.top() + radii.top_right {
        Some((
            rect.right() - radii.top_right,
            rect.top() + radii.top_right - 1,
            radii.top_right,
        ))
    } else if x >= rect.right() - radii.bottom_right && y >= rect.bottom() - radii.bottom_right {
        Some((
            rect.right() - radii.bottom_right,
            rect.bottom() - radii.bottom_right,
            radii.bottom_right,
        ))
    } else if x < rect.left() + radii.bottom_left && y >= rect.bottom() - radii.bottom_left {
        Some((
            rect.left() + radii.bottom_left - 1,
            rect.bottom() - radii.bottom_left,
            radii.bottom_left,
        ))
    } else {
        None
    };
    match corner {
        None => 1.0,
        Some((cx, cy, r)) => {
            let dx = (x - cx) as f32;
            let dy = (y - cy) as f32;
            edge_coverage(dx.hypot(dy), r as f32 - 0.5)
        }
    }
}

/// Fill a rounded rectangle, or stroke its border when `border_width > 0`.
///
/// Radii must already be resolved (no negative entries). A stroked
/// border uses an inner rounded rectangle deflated by the border width
/// with correspondingly shrunken radii, so the corner bands stay a
/// constant thickness.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn rounded_rect(
    target: &mut Pixmap,
    rect: Rect,
    color: Rgba,
    radii: CornerRadii,
    border_width: i32,
) {
    if rect.is_empty() {
        return;
    }
    let area = rect.clip(&target.bounds());
    if area.is_empty() {
        return;
    }
    let inner = if border_width > 0 {
        let deflated = rect.inflated(-2 * border_width, -2 * border_width);
        if deflated.is_empty() {
            None
        } else {
            Some((deflated, radii.shrunk(border_width)))
        }
    } else {
        None
    };
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            let mut cov = rounded_coverage(rect, &radii, x, y);
            if let Some((inner_rect, inner_radii)) = &inner {
                cov -= rounded_coverage(*inner_rect, inner_radii, x, y);
            }
            if cov <= 0.0 {
                continue;
            }
            let alpha = (f32::from(color.a) * cov).round() as u8;
            target.blend_pixel(x, y, Rgba::with_alpha(color.r, color.g, color.b, alpha));
        }
    }
}

/// Draw one quadrant of a circle around `center`.
///
/// `width == 0` fills the quarter disk; otherwise only an annular band
/// `width` pixels thick at the outer edge is drawn.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
pub fn circle_quadrant(
    target: &mut Pixmap,
    center: Point,
    radius: i32,
    width: i32,
    quadrant: Quadrant,
    color: Rgba,
) {
    if radius < 1 {
        return;
    }
    let bbox = Rect::new(center.x - radius, center.y - radius, 2 * radius + 1, 2 * radius + 1)
        .clip(&target.bounds());
    if bbox.is_empty() {
        return;
    }
    let inner = if width > 0 { (radius - width).max(0) } else { 0 };
    for y in bbox.top()..bbox.bottom() {
        for x in bbox.left()..bbox.right() {
            let dx = x - center.x;
            let dy = y - center.y;
            if !quadrant.contains_delta(dx, dy) {
                continue;
            }
            let dist = (dx as f32).hypot(dy as f32);
            let mut cov = edge_coverage(dist, radius as f32);
            if width > 0 {
                cov -= edge_coverage(dist, inner as f32);
            }
            if cov <= 0.0 {
                continue;
            }
            let alpha = (f32::from(color.a) * cov).round() as u8;
            target.blend_pixel(x, y, Rgba::with_alpha(color.r, color.g, color.b, alpha));
        }
    }
}
