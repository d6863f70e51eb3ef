//! Text and label styles, alignment modes, and box geometry modes.

use std::rc::Rc;

use bitflags::bitflags;

use crate::gfx::{CornerRadii, Rgba};

use super::font::Font;

bitflags! {
    /// Text style modifiers.
    ///
    /// These can be combined using bitwise OR.
    ///
    /// # Example
    /// ```
    /// use glimmer::StyleFlags;
    /// let style = StyleFlags::BOLD | StyleFlags::UNDERLINE;
    /// ```
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct StyleFlags: u8 {
        /// Bold text
        const BOLD = 0b0000_0001;
        /// Oblique/italic text
        const OBLIQUE = 0b0000_0010;
        /// Underlined text
        const UNDERLINE = 0b0000_0100;
        /// Struck-through text
        const STRONG = 0b0000_1000;
        /// Wide (double-advance) rendering
        const WIDE = 0b0001_0000;
    }
}

impl std::fmt::Debug for StyleFlags {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        bitflags::parser::to_writer(self, f)
    }
}

/// Nine-way alignment of multi-line text inside its rectangle.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum AlignMode {
    /// Left edge, vertically centered.
    Left,
    /// Right edge, vertically centered.
    Right,
    /// Centered both ways.
    #[default]
    Center,
    /// Top edge, horizontally centered.
    Top,
    /// Bottom edge, horizontally centered.
    Bottom,
    /// Top-left corner.
    TopLeft,
    /// Top-right corner.
    TopRight,
    /// Bottom-left corner.
    BottomLeft,
    /// Bottom-right corner.
    BottomRight,
}

/// Horizontal half of an [`AlignMode`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum HAlign {
    Left,
    Center,
    Right,
}

/// Vertical half of an [`AlignMode`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum VAlign {
    Top,
    Center,
    Bottom,
}

impl AlignMode {
    /// Decompose into independent horizontal and vertical alignments.
    #[inline]
    pub(crate) const fn split(self) -> (HAlign, VAlign) {
        match self {
            Self::Left => (HAlign::Left, VAlign::Center),
            Self::Right => (HAlign::Right, VAlign::Center),
            Self::Center => (HAlign::Center, VAlign::Center),
            Self::Top => (HAlign::Center, VAlign::Top),
            Self::Bottom => (HAlign::Center, VAlign::Bottom),
            Self::TopLeft => (HAlign::Left, VAlign::Top),
            Self::TopRight => (HAlign::Right, VAlign::Top),
            Self::BottomLeft => (HAlign::Left, VAlign::Bottom),
            Self::BottomRight => (HAlign::Right, VAlign::Bottom),
        }
    }
}

/// How a border relates to a node's nominal rectangle.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum BoxMode {
    /// Border drawn inside the rectangle; total size unchanged.
    #[default]
    Inside,
    /// Border added outside; total size grows by twice the border width.
    Outside,
    /// Border centered on the rectangle edge; grows by one border width.
    Straddle,
}

/// Style for rendering a run of text.
#[derive(Clone)]
pub struct TextStyle {
    /// Font used for metrics, wrapping, and rendering.
    pub font: Rc<dyn Font>,
    /// Point size.
    pub size: u32,
    /// Foreground color.
    pub color: Rgba,
    /// Style modifier flags.
    pub flags: StyleFlags,
    /// Extra pixels between lines (may be negative).
    pub line_spacing: i32,
}

impl TextStyle {
    /// A plain style at the given size.
    pub fn new(font: Rc<dyn Font>, size: u32) -> Self {
        Self {
            font,
            size,
            color: Rgba::BLACK,
            flags: StyleFlags::empty(),
            line_spacing: 0,
        }
    }

    /// Full line advance: font line height plus spacing.
    #[inline]
    pub fn line_height(&self) -> i32 {
        self.font.line_height(self.size) + self.line_spacing
    }
}

impl PartialEq for TextStyle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.font, &other.font)
            && self.size == other.size
            && self.color == other.color
            && self.flags == other.flags
            && self.line_spacing == other.line_spacing
    }
}

impl std::fmt::Debug for TextStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextStyle")
            .field("size", &self.size)
            .field("color", &self.color)
            .field("flags", &self.flags)
            .field("line_spacing", &self.line_spacing)
            .finish_non_exhaustive()
    }
}

/// Style for a bordered, optionally filled rectangle.
///
/// Corner radii entries of `-1` fall back to `radius`.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct LabelStyle {
    /// Border color.
    pub fg: Rgba,
    /// Background fill; `None` draws no fill.
    pub bg: Option<Rgba>,
    /// Border thickness; `0` draws no border.
    pub border_width: i32,
    /// Shared corner radius.
    pub radius: i32,
    /// Per-corner overrides, `-1` meaning "use `radius`".
    pub corners: CornerRadii,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            fg: Rgba::BLACK,
            bg: None,
            border_width: 0,
            radius: 0,
            corners: CornerRadii::default(),
        }
    }
}
