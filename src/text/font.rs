//! The font seam: sized metrics, wrapping, and two render entry points.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::geometry::{Point, Rect};
use crate::gfx::{Pixmap, Rgba};

use super::style::StyleFlags;

/// One wrapped line of text with its measured pixel width.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct WrappedLine {
    /// Line content, newline excluded.
    pub text: String,
    /// Measured width in pixels.
    pub width: i32,
}

/// A sized font capable of measuring, wrapping, and rendering text.
///
/// All vertical positions are baseline-relative: `ascender` is the
/// distance from the baseline up to the top of the tallest glyph
/// (positive), `descender` the distance down to the lowest (negative).
pub trait Font {
    /// Distance from baseline to glyph top, positive.
    fn ascender(&self, size: u32) -> i32;

    /// Distance from baseline to glyph bottom, negative or zero.
    fn descender(&self, size: u32) -> i32;

    /// Nominal line height (baseline-to-baseline advance before spacing).
    fn line_height(&self, size: u32) -> i32;

    /// Pixel width of a single-line string.
    fn measure(&self, flags: StyleFlags, size: u32, text: &str) -> i32;

    /// Wrap text to fit `max_width` pixels per line.
    ///
    /// Explicit newlines always break. A word wider than `max_width` is
    /// split mid-word rather than overflowing.
    fn wrap(&self, flags: StyleFlags, size: u32, text: &str, max_width: i32) -> Vec<WrappedLine>;

    /// Render one line directly onto `target` with the pen at `origin`
    /// (a baseline position). Returns the affected rectangle, clipped to
    /// the target.
    fn render_to(
        &self,
        target: &mut Pixmap,
        origin: Point,
        text: &str,
        color: Rgba,
        flags: StyleFlags,
        size: u32,
    ) -> Rect;

    /// Render one line to a standalone surface.
    ///
    /// The rectangle positions the surface relative to a baseline pen:
    /// blit the surface at `pen + rect.top_left()`.
    fn render(
        &self,
        text: &str,
        color: Rgba,
        flags: StyleFlags,
        size: u32,
    ) -> (Pixmap, Rect);
}

/// A fixed-advance font with block glyphs.
///
/// Every terminal-width column advances by half the point size, doubled
/// under [`StyleFlags::WIDE`]. Glyphs render as filled cells, which is
/// enough for exact layout and hit-test assertions without a shaping
/// engine.
#[derive(Clone, Copy, Debug, Default)]
pub struct MonoFont;

impl MonoFont {
    #[inline]
    #[allow(clippy::cast_possible_wrap)]
    fn advance(flags: StyleFlags, size: u32) -> i32 {
        let base = (size / 2).max(1) as i32;
        if flags.contains(StyleFlags::WIDE) {
            base * 2
        } else {
            base
        }
    }

    #[inline]
    #[allow(clippy::cast_possible_wrap)]
    fn cell_width(text: &str) -> i32 {
        UnicodeWidthStr::width(text) as i32
    }
}

impl Font for MonoFont {
    #[inline]
    #[allow(clippy::cast_possible_wrap)]
    fn ascender(&self, size: u32) -> i32 {
        (size * 4 / 5) as i32
    }

    #[inline]
    #[allow(clippy::cast_possible_wrap)]
    fn descender(&self, size: u32) -> i32 {
        -((size / 5) as i32)
    }

    #[inline]
    #[allow(clippy::cast_possible_wrap)]
    fn line_height(&self, size: u32) -> i32 {
        size as i32
    }

    fn measure(&self, flags: StyleFlags, size: u32, text: &str) -> i32 {
        Self::cell_width(text) * Self::advance(flags, size)
    }

    fn wrap(&self, flags: StyleFlags, size: u32, text: &str, max_width: i32) -> Vec<WrappedLine> {
        let advance = Self::advance(flags, size);
        let mut lines = Vec::new();
        for raw_line in text.split('\n') {
            let mut current = String::new();
            let mut current_w = 0;
            for word in raw_line.split_word_bounds() {
                let word_w = Self::cell_width(word) * advance;
                if current_w + word_w <= max_width || current.is_empty() && word_w <= max_width {
                    current.push_str(word);
                    current_w += word_w;
                    continue;
                }
                if word.trim().is_empty() {
                    // a breaking space ends the line and is dropped
                    lines.push(WrappedLine {
                        text: std::mem::take(&mut current),
                        width: current_w,
                    });
                    current_w = 0;
                    continue;
                }
                if word_w <= max_width {
                    lines.push(WrappedLine {
                        text: std::mem::take(&mut current),
                        width: current_w,
                    });
                    current = word.to_owned();
                    current_w = word_w;
                    continue;
                }
                // word wider than the line: split per grapheme
                for g in word.graphemes(true) {
                    let gw = Self::cell_width(g) * advance;
                    if current_w + gw > max_width && !current.is_empty() {
                        lines.push(WrappedLine {
                            text: std::mem::take(&mut current),
                            width: current_w,
                        });
                        current_w = 0;
                    }
                    current.push_str(g);
                    current_w += gw;
                }
            }
            lines.push(WrappedLine {
                text: current,
                width: current_w,
            });
        }
        lines
    }

    fn render_to(
        &self,
        target: &mut Pixmap,
        origin: Point,
        text: &str,
        color: Rgba,
        flags: StyleFlags,
        size: u32,
    ) -> Rect {
        let advance = Self::advance(flags, size);
        let asc = self.ascender(size);
        let desc = self.descender(size);
        let mut affected = Rect::ZERO;
        let mut x = origin.x;
        for g in text.graphemes(true) {
            let gw = Self::cell_width(g) * advance;
            if !g.trim().is_empty() {
                let glyph = Rect::new(x, origin.y - asc, (gw - 1).max(1), asc - desc - 1);
                affected = affected.union(&target.fill_rect(glyph, color, crate::gfx::BlendMode::Alpha));
            }
            x += gw;
        }
        if flags.contains(StyleFlags::UNDERLINE) {
            let underline = Rect::new(origin.x, origin.y + 1, x - origin.x, 1);
            affected =
                affected.union(&target.fill_rect(underline, color, crate::gfx::BlendMode::Alpha));
        }
        affected
    }

    #[allow(clippy::cast_sign_loss)]
    fn render(
        &self,
        text: &str,
        color: Rgba,
        flags: StyleFlags,
        size: u32,
    ) -> (Pixmap, Rect) {
        let asc = self.ascender(size);
        let desc = self.descender(size);
        let width = self.measure(flags, size, text).max(0);
        let height = asc - desc;
        let mut surface = Pixmap::new(width as u32, height as u32);
        self.render_to(&mut surface, Point::new(0, asc), text, color, flags, size);
        (surface, Rect::new(0, -asc, width, height))
    }
}
