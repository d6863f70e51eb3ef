//! Render commands: self-contained draw primitives.
//!
//! A command is a snapshot taken at compile time. It renders and
//! hit-tests without consulting the scene tree, so node mutation after
//! compilation never retroactively changes an already-queued frame.

use std::cell::RefCell;
use std::rc::Rc;

use crate::geometry::{Point, Rect, Vec2};
use crate::gfx::{draw, BlendMode, Pixmap, Quadrant, Rgba};
use crate::scene::{FillMode, NodeId};
use crate::text::{AlignMode, HAlign, LabelStyle, TextStyle, VAlign};

use super::gradient::GradientCache;

/// A queued multi-line text draw.
///
/// `affected_rects` is rebuilt on every render and backs hit-testing,
/// so pointer targeting reflects actual glyph coverage rather than the
/// nominal rectangle.
pub struct TextCommand {
    /// Node that produced this command.
    pub creator: NodeId,
    /// Destination rectangle in target coordinates.
    pub rect: Rect,
    /// The string to lay out.
    pub text: String,
    /// Font, size, color, flags, and spacing.
    pub style: TextStyle,
    /// Nine-way alignment.
    pub align: AlignMode,
    /// Extra pixel offset for the text origin.
    pub offset: Point,
    /// Per-line rectangles written by the last render.
    pub affected_rects: Vec<Rect>,
}

impl TextCommand {
    fn render(&mut self, target: &mut Pixmap) {
        self.affected_rects.clear();
        if self.text.is_empty() {
            return;
        }
        let s = &self.style;
        let font = &s.font;
        let size = s.size;
        let ascender = font.ascender(size);
        let descender = font.descender(size);
        let line_height = font.line_height(size) + s.line_spacing;
        let wraps = font.wrap(s.flags, size, &self.text, self.rect.w);
        #[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
        let line_count = wraps.len() as i32;
        let (h_align, v_align) = self.align.split();
        let origin_x = self.rect.left() + self.offset.x;
        let mut origin_y = self.offset.y
            + ascender
            + match v_align {
                VAlign::Center => {
                    self.rect.center_y() - (line_count * line_height - s.line_spacing) / 2
                }
                VAlign::Top => self.rect.top(),
                VAlign::Bottom => self.rect.bottom() - line_count * line_height + s.line_spacing,
            };
        // a baseline in [full_min, full_max] means the whole line fits
        let full_min_y = self.rect.top() + ascender;
        let full_max_y = self.rect.bottom() + descender;
        let part_min_y = full_min_y - line_height;
        let part_max_y = full_max_y + line_height;
        for line in &wraps {
            let x = origin_x
                + match h_align {
                    HAlign::Left => 0,
                    HAlign::Center => (self.rect.w - line.width) / 2,
                    HAlign::Right => self.rect.w - line.width,
                };
            if (full_min_y..=full_max_y).contains(&origin_y) {
                let affected = font.render_to(
                    target,
                    Point::new(x, origin_y),
                    &line.text,
                    s.color,
                    s.flags,
                    size,
                );
                self.affected_rects.push(affected);
            } else if origin_y > part_min_y && origin_y < part_max_y {
                // partially visible: render standalone, clip, then blit
                let (surface, bounds) = font.render(&line.text, s.color, s.flags, size);
                let dest = bounds.moved(Point::new(x, origin_y));
                let visible = dest.clip(&self.rect);
                if !visible.is_empty() {
                    let src = visible.moved(Point::ZERO - dest.top_left());
                    let affected = target.blit(&surface, visible.top_left(), Some(src));
                    self.affected_rects.push(affected);
                }
            }
            origin_y += line_height;
        }
    }

    fn hit_test(&self, point: Point) -> bool {
        self.affected_rects.iter().any(|r| r.contains(point))
    }
}

/// A queued linear-gradient draw sharing its cache with the node.
pub struct GradientCommand {
    /// Node that produced this command.
    pub creator: NodeId,
    /// Destination rectangle in target coordinates.
    pub rect: Rect,
    /// Color at the start point.
    pub start_color: Rgba,
    /// Color at the end point.
    pub end_color: Rgba,
    /// Axis start in target coordinates.
    pub start_pos: Vec2,
    /// Axis end in target coordinates.
    pub end_pos: Vec2,
    pub(crate) cache: Rc<RefCell<GradientCache>>,
}

impl GradientCommand {
    fn render(&mut self, target: &mut Pixmap) {
        let mut cache = self.cache.borrow_mut();
        if let Some(surface) = cache.generate(
            self.rect.w,
            self.rect.h,
            self.start_color,
            self.end_color,
            self.start_pos,
            self.end_pos,
            self.rect.left(),
            self.rect.top(),
        ) {
            target.blit(surface, self.rect.top_left(), None);
        }
    }
}

/// One primitive draw operation in the frame queue.
pub enum RenderCommand {
    /// Fill the entire target surface with one color.
    Background {
        /// Node that produced this command.
        creator: NodeId,
        /// Fill color.
        color: Rgba,
    },
    /// Fill a rectangle, alpha-compositing onto the target.
    Fill {
        /// Node that produced this command.
        creator: NodeId,
        /// Destination rectangle.
        rect: Rect,
        /// Fill color.
        color: Rgba,
    },
    /// Rounded rectangle with optional border and fill.
    Label {
        /// Node that produced this command.
        creator: NodeId,
        /// Border-adjusted destination rectangle.
        rect: Rect,
        /// Border and fill style.
        style: LabelStyle,
    },
    /// A bitmap mapped onto a destination rectangle.
    Surface {
        /// Node that produced this command.
        creator: NodeId,
        /// Source surface.
        surface: Rc<Pixmap>,
        /// Destination rectangle.
        rect: Rect,
        /// Destination mapping.
        fill_mode: FillMode,
    },
    /// Multi-line text.
    Text(TextCommand),
    /// Linear gradient with a cached bitmap.
    Gradient(GradientCommand),
    /// One quadrant of a circle, filled or stroked.
    QuarterCircle {
        /// Node that produced this command.
        creator: NodeId,
        /// Color of the arc or disk.
        color: Rgba,
        /// Circle center in target coordinates.
        center: Point,
        /// Outer radius.
        radius: i32,
        /// Stroke thickness; `0` fills the quarter disk.
        width: i32,
        /// Which quadrant to draw.
        quadrant: Quadrant,
    },
}

impl RenderCommand {
    /// The node this command draws for.
    #[must_use]
    pub const fn creator(&self) -> NodeId {
        match self {
            Self::Background { creator, .. }
            | Self::Fill { creator, .. }
            | Self::Label { creator, .. }
            | Self::Surface { creator, .. }
            | Self::QuarterCircle { creator, .. } => *creator,
            Self::Text(t) => t.creator,
            Self::Gradient(g) => g.creator,
        }
    }

    /// Draw onto the target surface.
    pub fn render(&mut self, target: &mut Pixmap) {
        match self {
            Self::Background { color, .. } => target.fill(*color, BlendMode::Replace),
            Self::Fill { rect, color, .. } => {
                target.fill_rect(*rect, *color, BlendMode::Alpha);
            }
            Self::Label { rect, style, .. } => render_label(target, *rect, style),
            Self::Surface {
                surface,
                rect,
                fill_mode,
                ..
            } => render_surface(target, surface, *rect, *fill_mode),
            Self::Text(t) => t.render(target),
            Self::Gradient(g) => g.render(target),
            Self::QuarterCircle {
                color,
                center,
                radius,
                width,
                quadrant,
                ..
            } => draw::circle_quadrant(target, *center, *radius, *width, *quadrant, *color),
        }
    }

    /// Whether this command's drawn area contains `point`.
    #[must_use]
    pub fn hit_test(&self, point: Point) -> bool {
        match self {
            Self::Background { .. } => true,
            Self::Fill { rect, .. } | Self::Label { rect, .. } | Self::Surface { rect, .. } => {
                rect.contains(point)
            }
            Self::Text(t) => t.hit_test(point),
            Self::Gradient(g) => g.rect.contains(point),
            Self::QuarterCircle {
                center,
                radius,
                width,
                quadrant,
                ..
            } => {
                let dx = point.x - center.x;
                let dy = point.y - center.y;
                if !quadrant.contains_delta(dx, dy) {
                    return false;
                }
                let d2 = dx * dx + dy * dy;
                radius * radius >= d2 && d2 >= width * width
            }
        }
    }
}

fn render_label(target: &mut Pixmap, rect: Rect, style: &LabelStyle) {
    let bw = style.border_width;
    let radii = style.corners.resolve(style.radius);
    let mut inner = rect;
    if bw > 0 {
        draw::rounded_rect(target, rect, style.fg, radii, bw);
        inner = rect.inflated(-2 * bw, -2 * bw);
    }
    if let Some(bg) = style.bg {
        draw::rounded_rect(target, inner, bg, radii.shrunk(bw), 0);
    }
}

#[allow(clippy::cast_sign_loss)]
fn render_surface(target: &mut Pixmap, surface: &Pixmap, rect: Rect, fill_mode: FillMode) {
    match fill_mode {
        FillMode::Ignore => {
            target.blit(
                surface,
                rect.top_left(),
                Some(Rect::from_size(rect.w, rect.h)),
            );
        }
        FillMode::Scale => {
            if rect.w > 0 && rect.h > 0 {
                let scaled = surface.scaled(rect.w as u32, rect.h as u32);
                target.blit(&scaled, rect.top_left(), None);
            }
        }
        FillMode::SmoothScale => {
            if rect.w > 0 && rect.h > 0 {
                let scaled = surface.smooth_scaled(rect.w as u32, rect.h as u32);
                target.blit(&scaled, rect.top_left(), None);
            }
        }
        FillMode::Repeat => {
            let (sw, sh) = surface.bounds().size();
            if sw <= 0 || sh <= 0 {
                return;
            }
            let mut y = 0;
            while y < rect.h {
                let mut x = 0;
                while x < rect.w {
                    let src = Rect::from_size(sw.min(rect.w - x), sh.min(rect.h - y));
                    target.blit(
                        surface,
                        Point::new(rect.x + x, rect.y + y),
                        Some(src),
                    );
                    x += sw;
                }
                y += sh;
            }
        }
        FillMode::FitMin => blit_fitted(target, surface, rect, false),
        FillMode::FitMax => blit_fitted(target, surface, rect, true),
    }
}

/// Uniformly scale and center. `cover` picks the larger scale factor
/// (center-cropped to the rectangle); otherwise the smaller (letterbox).
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn blit_fitted(target: &mut Pixmap, surface: &Pixmap, rect: Rect, cover: bool) {
    let (sw, sh) = surface.bounds().size();
    if sw <= 0 || sh <= 0 || rect.is_empty() {
        return;
    }
    let fx = rect.w as f32 / sw as f32;
    let fy = rect.h as f32 / sh as f32;
    let factor = if cover { fx.max(fy) } else { fx.min(fy) };
    let dw = ((sw as f32 * factor).round() as i32).max(1);
    let dh = ((sh as f32 * factor).round() as i32).max(1);
    let scaled = surface.smooth_scaled(dw as u32, dh as u32);
    let dest = Rect::new(
        rect.center_x() - dw / 2,
        rect.center_y() - dh / 2,
        dw,
        dh,
    );
    let visible = dest.clip(&rect);
    if visible.is_empty() {
        return;
    }
    let src = visible.moved(Point::ZERO - dest.top_left());
    target.blit(&scaled, visible.top_left(), Some(src));
}

impl std::fmt::Debug for RenderCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Background { creator, color } => {
                write!(f, "Background({creator:?}, {color:?})")
            }
            Self::Fill { creator, rect, .. } => write!(f, "Fill({creator:?}, {rect:?})"),
            Self::Label { creator, rect, .. } => write!(f, "Label({creator:?}, {rect:?})"),
            Self::Surface { creator, rect, .. } => write!(f, "Surface({creator:?}, {rect:?})"),
            Self::Text(t) => write!(f, "Text({:?}, {:?}, {:?})", t.creator, t.rect, t.text),
            Self::Gradient(g) => write!(f, "Gradient({:?}, {:?})", g.creator, g.rect),
            Self::QuarterCircle {
                creator,
                center,
                radius,
                ..
            } => write!(f, "QuarterCircle({creator:?}, {center:?}, r={radius})"),
        }
    }
}
