//! Pixmap: an owned 32-bit RGBA software surface.

use crate::geometry::{Point, Rect};

use super::color::{BlendMode, Rgba};

/// An owned RGBA pixel surface.
///
/// Row-major storage, top-left origin. All drawing clips against the
/// surface bounds; out-of-range coordinates are never an error.
#[derive(Clone, PartialEq, Eq)]
pub struct Pixmap {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
}

impl Pixmap {
    /// Create a fully transparent surface.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, Rgba::TRANSPARENT)
    }

    /// Create a surface filled with a single color.
    pub fn filled(width: u32, height: u32, color: Rgba) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; (width as usize) * (height as usize)],
        }
    }

    /// Surface width in pixels.
    #[inline]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Surface height in pixels.
    #[inline]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Full surface bounds as a rectangle at the origin.
    #[inline]
    #[allow(clippy::cast_possible_wrap)]
    pub const fn bounds(&self) -> Rect {
        Rect::from_size(self.width as i32, self.height as i32)
    }

    /// Read a pixel; `None` outside the surface.
    #[inline]
    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgba> {
        self.index_of(x, y).map(|i| self.pixels[i])
    }

    /// Write a pixel, replacing the destination. No-op outside the surface.
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Rgba) {
        if let Some(i) = self.index_of(x, y) {
            self.pixels[i] = color;
        }
    }

    /// Composite a pixel over the destination. No-op outside the surface.
    #[inline]
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: Rgba) {
        if let Some(i) = self.index_of(x, y) {
            self.pixels[i] = color.over(self.pixels[i]);
        }
    }

    #[inline]
    #[allow(clippy::cast_sign_loss, clippy::cast_possible_wrap)]
    fn index_of(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Fill the whole surface.
    pub fn fill(&mut self, color: Rgba, blend: BlendMode) {
        match blend {
            BlendMode::Replace => self.pixels.fill(color),
            BlendMode::Alpha => {
                for p in &mut self.pixels {
                    *p = color.over(*p);
                }
            }
        }
    }

    /// Fill a rectangle, clipped to the surface.
    ///
    /// Returns the region actually written, `Rect::ZERO` if fully clipped.
    #[allow(clippy::cast_sign_loss)]
    pub fn fill_rect(&mut self, rect: Rect, color: Rgba, blend: BlendMode) -> Rect {
        let area = rect.clip(&self.bounds());
        if area.is_empty() {
            return Rect::ZERO;
        }
        for y in area.top()..area.bottom() {
            let row = y as usize * self.width as usize;
            let span = &mut self.pixels[row + area.left() as usize..row + area.right() as usize];
            match blend {
                BlendMode::Replace => span.fill(color),
                BlendMode::Alpha => {
                    for p in span {
                        *p = color.over(*p);
                    }
                }
            }
        }
        area
    }

    /// Composite another surface onto this one at `pos`.
    ///
    /// `src_rect` restricts the source region (clipped to the source
    /// bounds first). Source pixels blend source-over. Returns the
    /// destination region actually written, `Rect::ZERO` if fully clipped.
    pub fn blit(&mut self, src: &Self, pos: Point, src_rect: Option<Rect>) -> Rect {
        let src_area = match src_rect {
            Some(r) => r.clip(&src.bounds()),
            None => src.bounds(),
        };
        if src_area.is_empty() {
            return Rect::ZERO;
        }
        let dst_area = src_area.moved(pos - src_area.top_left()).clip(&self.bounds());
        if dst_area.is_empty() {
            return Rect::ZERO;
        }
        let dx = src_area.left() + dst_area.left() - pos.x;
        let dy = src_area.top() + dst_area.top() - pos.y;
        for row in 0..dst_area.h {
            for col in 0..dst_area.w {
                let sx = dx + col;
                let sy = dy + row;
                if let Some(c) = src.pixel(sx, sy) {
                    self.blend_pixel(dst_area.left() + col, dst_area.top() + row, c);
                }
            }
        }
        dst_area
    }

    /// Nearest-neighbor scale to a new size.
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::cast_sign_loss,
        clippy::cast_possible_wrap
    )]
    pub fn scaled(&self, width: u32, height: u32) -> Self {
        let mut out = Self::new(width, height);
        if width == 0 || height == 0 || self.width == 0 || self.height == 0 {
            return out;
        }
        let sx = self.width as f32 / width as f32;
        let sy = self.height as f32 / height as f32;
        for y in 0..height {
            let src_y = ((y as f32 + 0.5) * sy) as i32;
            let src_y = src_y.min(self.height as i32 - 1);
            for x in 0..width {
                let src_x = ((x as f32 + 0.5) * sx) as i32;
                let src_x = src_x.min(self.width as i32 - 1);
                let i = y as usize * width as usize + x as usize;
                out.pixels[i] =
                    self.pixels[src_y as usize * self.width as usize + src_x as usize];
            }
        }
        out
    }

    /// Bilinear scale to a new size.
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::cast_sign_loss,
        clippy::cast_possible_wrap
    )]
    pub fn smooth_scaled(&self, width: u32, height: u32) -> Self {
        let mut out = Self::new(width, height);
        if width == 0 || height == 0 || self.width == 0 || self.height == 0 {
            return out;
        }
        let sx = self.width as f32 / width as f32;
        let sy = self.height as f32 / height as f32;
        let max_x = self.width as i32 - 1;
        let max_y = self.height as i32 - 1;
        for y in 0..height {
            let fy = ((y as f32 + 0.5) * sy - 0.5).max(0.0);
            let y0 = (fy as i32).min(max_y);
            let y1 = (y0 + 1).min(max_y);
            let ty = fy - y0 as f32;
            for x in 0..width {
                let fx = ((x as f32 + 0.5) * sx - 0.5).max(0.0);
                let x0 = (fx as i32).min(max_x);
                let x1 = (x0 + 1).min(max_x);
                let tx = fx - x0 as f32;
                let at = |px: i32, py: i32| -> Rgba {
                    self.pixels[py as usize * self.width as usize + px as usize]
                };
                let top = at(x0, y0).lerp(at(x1, y0), tx);
                let bottom = at(x0, y1).lerp(at(x1, y1), tx);
                out.pixels[y as usize * width as usize + x as usize] = top.lerp(bottom, ty);
            }
        }
        out
    }
}

impl std::fmt::Debug for Pixmap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Pixmap({}x{})", self.width, self.height)
    }
}
