//! Cached, incrementally generated linear-gradient bitmaps.

use std::time::Instant;

use crate::geometry::Vec2;
use crate::gfx::{BlendMode, Pixmap, Rgba};

/// Budget for one frame's worth of arbitrary-angle gradient work.
const COLUMN_BUDGET: std::time::Duration = std::time::Duration::from_millis(10);

/// Shared gradient bitmap cache.
///
/// Owned jointly by the gradient node and the queued command through an
/// `Rc<RefCell<_>>`, so an incomplete generation resumes on the next
/// frame and an explicit invalidation from the node reaches the command.
#[derive(Debug, Default, PartialEq)]
pub struct GradientCache {
    surface: Option<Pixmap>,
    dirty: bool,
    next_col: i32,
}

impl GradientCache {
    /// An empty cache that will generate on first render.
    #[must_use]
    pub fn new() -> Self {
        Self {
            surface: None,
            dirty: true,
            next_col: 0,
        }
    }

    /// Throw away progress and regenerate from the first column.
    pub fn invalidate(&mut self) {
        self.dirty = true;
        self.next_col = 0;
    }

    /// Whether the bitmap is incomplete or stale.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Bring the cached bitmap up to date for the given geometry.
    ///
    /// Returns the bitmap to blit; it may still be partially generated,
    /// in which case the cache stays dirty and the next call resumes.
    #[allow(clippy::cast_precision_loss)]
    pub(crate) fn generate(
        &mut self,
        width: i32,
        height: i32,
        start_color: Rgba,
        end_color: Rgba,
        start: Vec2,
        end: Vec2,
        rect_left: i32,
        rect_top: i32,
    ) -> Option<&Pixmap> {
        if width <= 0 || height <= 0 {
            return None;
        }
        let size_matches = self
            .surface
            .as_ref()
            .is_some_and(|s| s.bounds().size() == (width, height));
        if !size_matches {
            self.invalidate();
            #[allow(clippy::cast_sign_loss)]
            {
                self.surface = Some(Pixmap::new(width as u32, height as u32));
            }
        }
        if self.dirty {
            self.dirty = false;
            let surface = self.surface.as_mut()?;
            // dispatch keyed on which axis components coincide
            let same_y = (start.y - end.y).abs() < f32::EPSILON;
            let same_x = (start.x - end.x).abs() < f32::EPSILON;
            match (same_y, same_x) {
                (true, true) => {
                    surface.fill(start_color.lerp(end_color, 0.5), BlendMode::Replace);
                }
                (true, false) => {
                    horizontal(surface, start_color, end_color, start.x, end.x, rect_left);
                }
                (false, true) => {
                    vertical(surface, start_color, end_color, start.y, end.y, rect_top);
                }
                (false, false) => {
                    let done = any_angle(
                        surface,
                        start_color,
                        end_color,
                        start,
                        end,
                        rect_left,
                        rect_top,
                        &mut self.next_col,
                    );
                    if done {
                        self.next_col = 0;
                    } else {
                        self.dirty = true;
                    }
                }
            }
        }
        self.surface.as_ref()
    }
}

#[allow(clippy::cast_precision_loss)]
fn horizontal(surface: &mut Pixmap, start: Rgba, end: Rgba, sx: f32, ex: f32, rect_left: i32) {
    let (w, h) = surface.bounds().size();
    let span = ex - sx;
    for x in 0..w {
        let t = (((x + rect_left) as f32 - sx) / span).clamp(0.0, 1.0);
        surface.fill_rect(
            crate::geometry::Rect::new(x, 0, 1, h),
            start.lerp(end, t),
            BlendMode::Replace,
        );
    }
}

#[allow(clippy::cast_precision_loss)]
fn vertical(surface: &mut Pixmap, start: Rgba, end: Rgba, sy: f32, ey: f32, rect_top: i32) {
    let (w, h) = surface.bounds().size();
    let span = ey - sy;
    for y in 0..h {
        let t = (((y + rect_top) as f32 - sy) / span).clamp(0.0, 1.0);
        surface.fill_rect(
            crate::geometry::Rect::new(0, y, w, 1),
            start.lerp(end, t),
            BlendMode::Replace,
        );
    }
}

/// Column-by-column projection onto the gradient axis, resuming from
/// `next_col`. Returns `true` when the whole bitmap is done; otherwise
/// the time budget ran out and `next_col` points at the resume column.
#[allow(clippy::too_many_arguments, clippy::cast_precision_loss)]
fn any_angle(
    surface: &mut Pixmap,
    start_color: Rgba,
    end_color: Rgba,
    start: Vec2,
    end: Vec2,
    rect_left: i32,
    rect_top: i32,
    next_col: &mut i32,
) -> bool {
    let (w, h) = surface.bounds().size();
    let axis = end - start;
    let len = axis.length();
    let x_step = axis.x / len;
    let y_step = axis.y / len;
    let began = Instant::now();
    for x in *next_col..w {
        for y in 0..h {
            let t = (((x + rect_left) as f32 - start.x).mul_add(
                x_step,
                ((y + rect_top) as f32 - start.y) * y_step,
            ) / len)
                .clamp(0.0, 1.0);
            surface.set_pixel(x, y, start_color.lerp(end_color, t));
        }
        if began.elapsed() > COLUMN_BUDGET {
            *next_col = x + 1;
            if *next_col < w {
                return false;
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coincident_points_fill_mid_color() {
        let mut cache = GradientCache::new();
        let s = cache
            .generate(
                4,
                4,
                Rgba::new(0, 0, 0),
                Rgba::new(200, 200, 200),
                Vec2::new(2.0, 2.0),
                Vec2::new(2.0, 2.0),
                0,
                0,
            )
            .unwrap();
        assert_eq!(s.pixel(0, 0), Some(Rgba::new(100, 100, 100)));
        assert!(!cache.is_dirty());
    }

    #[test]
    fn test_horizontal_ramps_left_to_right() {
        let mut cache = GradientCache::new();
        let s = cache
            .generate(
                10,
                2,
                Rgba::new(0, 0, 0),
                Rgba::new(255, 255, 255),
                Vec2::new(0.0, 0.0),
                Vec2::new(9.0, 0.0),
                0,
                0,
            )
            .unwrap();
        assert_eq!(s.pixel(0, 0), Some(Rgba::new(0, 0, 0)));
        assert_eq!(s.pixel(9, 1), Some(Rgba::new(255, 255, 255)));
        let mid = s.pixel(5, 0).unwrap();
        assert!(mid.r > 0 && mid.r < 255);
        // rows identical
        assert_eq!(s.pixel(3, 0), s.pixel(3, 1));
    }

    #[test]
    fn test_vertical_ramps_top_to_bottom() {
        let mut cache = GradientCache::new();
        let s = cache
            .generate(
                2,
                10,
                Rgba::new(0, 0, 0),
                Rgba::new(255, 255, 255),
                Vec2::new(0.0, 0.0),
                Vec2::new(0.0, 9.0),
                0,
                0,
            )
            .unwrap();
        assert_eq!(s.pixel(0, 0), Some(Rgba::new(0, 0, 0)));
        assert_eq!(s.pixel(1, 9), Some(Rgba::new(255, 255, 255)));
    }

    #[test]
    fn test_any_angle_diagonal_endpoints() {
        let mut cache = GradientCache::new();
        let s = cache
            .generate(
                8,
                8,
                Rgba::new(0, 0, 0),
                Rgba::new(255, 255, 255),
                Vec2::new(0.0, 0.0),
                Vec2::new(7.0, 7.0),
                0,
                0,
            )
            .unwrap();
        assert_eq!(s.pixel(0, 0), Some(Rgba::new(0, 0, 0)));
        assert_eq!(s.pixel(7, 7), Some(Rgba::new(255, 255, 255)));
        assert!(!cache.is_dirty());
    }

    #[test]
    fn test_size_change_invalidates() {
        let mut cache = GradientCache::new();
        let black = Rgba::new(0, 0, 0);
        let white = Rgba::new(255, 255, 255);
        cache
            .generate(4, 4, black, white, Vec2::ZERO, Vec2::new(3.0, 0.0), 0, 0)
            .unwrap();
        assert!(!cache.is_dirty());
        let s = cache
            .generate(8, 8, black, white, Vec2::ZERO, Vec2::new(7.0, 0.0), 0, 0)
            .unwrap();
        assert_eq!(s.bounds().size(), (8, 8));
    }
}
