//! Node payloads: the closed set of visual and layout node kinds.

use std::cell::RefCell;
use std::rc::Rc;

use crate::geometry::{Point, Rect};
use crate::gfx::{Pixmap, Rgba};
use crate::layout::{DockLayout, GridLayout, RatioLayout, RelativeLayout};
use crate::render::GradientCache;
use crate::text::{AlignMode, BoxMode, LabelStyle, TextStyle};

use super::arena::NodeId;
use super::error::SceneError;

/// How an image (or animation frame) maps onto its destination rectangle.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum FillMode {
    /// Blit at the rectangle origin, clipped to the rectangle.
    #[default]
    Ignore,
    /// Nearest-neighbor scale to the rectangle.
    Scale,
    /// Bilinear scale to the rectangle.
    SmoothScale,
    /// Tile from the rectangle origin.
    Repeat,
    /// Uniform scale so the smaller dimension fits, centered.
    FitMin,
    /// Uniform scale so the larger dimension fits, center-cropped.
    FitMax,
}

/// Text content with its style, alignment, and pixel offset.
#[derive(Clone, Debug, PartialEq)]
pub struct TextContent {
    /// The string to display. Empty text emits no command.
    pub content: String,
    /// Font, size, color, and spacing.
    pub style: TextStyle,
    /// Nine-way alignment inside the node rectangle.
    pub align: AlignMode,
    /// Extra pixel offset applied to the text origin.
    pub offset: Point,
}

impl TextContent {
    /// New content with default alignment and no offset.
    pub fn new(content: impl Into<String>, style: TextStyle) -> Self {
        Self {
            content: content.into(),
            style,
            align: AlignMode::default(),
            offset: Point::ZERO,
        }
    }

    /// Full line advance including spacing.
    #[inline]
    pub fn line_height(&self) -> i32 {
        self.style.line_height()
    }

    /// Adjust line spacing so the full advance equals `line_height`.
    pub fn set_line_height(&mut self, line_height: i32) {
        self.style.line_spacing = line_height - self.style.font.line_height(self.style.size);
    }
}

/// A linear gradient between two colors along an axis.
///
/// The generated bitmap is cached and shared with the queued render
/// command; call [`Gradient::mark_dirty`] after changing any property.
#[derive(Clone, Debug, PartialEq)]
pub struct Gradient {
    /// Color at the start point.
    pub start_color: Rgba,
    /// Color at the end point.
    pub end_color: Rgba,
    /// Axis start, in the node's local coordinates.
    pub start_pos: Point,
    /// Axis end, in the node's local coordinates.
    pub end_pos: Point,
    pub(crate) cache: Rc<RefCell<GradientCache>>,
}

impl Gradient {
    /// Create a gradient with a fresh cache.
    pub fn new(start_color: Rgba, end_color: Rgba, start_pos: Point, end_pos: Point) -> Self {
        Self {
            start_color,
            end_color,
            start_pos,
            end_pos,
            cache: Rc::new(RefCell::new(GradientCache::new())),
        }
    }

    /// Invalidate the cached bitmap so it regenerates from scratch.
    pub fn mark_dirty(&self) {
        self.cache.borrow_mut().invalidate();
    }
}

/// Precomputed frame table for an [`Animation`] node.
///
/// `cumulative_ns[i]` is the start time of frame `i`; the final entry is
/// the total cycle duration. Built once, never recomputed per frame.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationFrames {
    frames: Vec<Rc<Pixmap>>,
    cumulative_ns: Vec<u64>,
}

impl AnimationFrames {
    /// Build the cumulative table from (frame, duration) pairs.
    pub fn from_frames(frames: impl IntoIterator<Item = (Pixmap, u64)>) -> Self {
        let mut out = Self {
            frames: Vec::new(),
            cumulative_ns: vec![0],
        };
        for (frame, duration_ns) in frames {
            out.frames.push(Rc::new(frame));
            let last = *out.cumulative_ns.last().unwrap_or(&0);
            out.cumulative_ns.push(last + duration_ns);
        }
        out
    }

    /// Number of frames.
    #[inline]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// True when the table holds no frames.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frame surface by index.
    #[inline]
    pub(crate) fn frame(&self, index: usize) -> &Rc<Pixmap> {
        &self.frames[index]
    }

    /// Total duration of one cycle in nanoseconds.
    #[inline]
    pub fn cycle_ns(&self) -> u64 {
        *self.cumulative_ns.last().unwrap_or(&0)
    }

    #[inline]
    fn start_of(&self, index: usize) -> u64 {
        self.cumulative_ns[index]
    }
}

/// Lazily-advanced playback state for an animation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Playback {
    pub(crate) playing: bool,
    pub(crate) last_ns: u64,
    pub(crate) cumulative_ns: u64,
    pub(crate) frame_index: usize,
    pub(crate) loops: u32,
}

/// A frame animation node: an image that swaps its surface over time.
#[derive(Clone, Debug, PartialEq)]
pub struct Animation {
    frames: Rc<AnimationFrames>,
    /// How each frame maps onto the node rectangle.
    pub fill_mode: FillMode,
    pub(crate) playback: Playback,
}

impl Animation {
    /// Create a stopped animation at frame zero.
    ///
    /// `loops` is the number of full cycles to play; `0` loops forever.
    pub fn new(frames: Rc<AnimationFrames>, fill_mode: FillMode, loops: u32) -> Self {
        Self {
            frames,
            fill_mode,
            playback: Playback {
                playing: false,
                last_ns: 0,
                cumulative_ns: 0,
                frame_index: 0,
                loops,
            },
        }
    }

    /// The shared frame table.
    #[inline]
    pub fn frames(&self) -> &Rc<AnimationFrames> {
        &self.frames
    }

    /// Start or resume playback.
    pub fn play(&mut self, now_ns: u64) {
        self.playback.playing = true;
        self.playback.last_ns = now_ns;
    }

    /// Pause playback, banking elapsed time.
    pub fn pause(&mut self, now_ns: u64) {
        if self.playback.playing {
            self.playback.cumulative_ns += now_ns.saturating_sub(self.playback.last_ns);
        }
        self.playback.playing = false;
    }

    /// Whether the animation is currently advancing.
    #[inline]
    pub fn is_playing(&self) -> bool {
        self.playback.playing
    }

    /// Currently displayed frame index.
    #[inline]
    pub fn current_frame(&self) -> usize {
        self.playback.frame_index
    }

    /// Jump to a frame, rewinding the elapsed clock to its start time.
    ///
    /// # Errors
    /// [`SceneError::FrameOutOfRange`] if `index` does not name a frame.
    pub fn set_frame(&mut self, index: usize) -> Result<(), SceneError> {
        if index >= self.frames.len() {
            return Err(SceneError::FrameOutOfRange {
                index,
                len: self.frames.len(),
            });
        }
        self.playback.frame_index = index;
        self.playback.cumulative_ns = self.frames.start_of(index);
        Ok(())
    }

    /// Advance playback to `now_ns`.
    ///
    /// Entering the last frame of the final cycle holds that frame and
    /// stops playback. `loops == 0` never stops.
    pub(crate) fn advance(&mut self, now_ns: u64) {
        let p = &mut self.playback;
        let n = self.frames.len();
        if !p.playing || n == 0 {
            return;
        }
        p.cumulative_ns += now_ns.saturating_sub(p.last_ns);
        p.last_ns = now_ns;
        let total = self.frames.cycle_ns();
        if total == 0 {
            return;
        }
        loop {
            if p.frame_index + 1 < n {
                if p.cumulative_ns < self.frames.start_of(p.frame_index + 1) {
                    break;
                }
                p.frame_index += 1;
                if p.frame_index == n - 1 && p.loops == 1 {
                    p.playing = false;
                    break;
                }
            } else if p.cumulative_ns >= total {
                if p.loops == 1 {
                    p.playing = false;
                    break;
                }
                p.cumulative_ns -= total;
                p.frame_index = 0;
                if p.loops != 0 {
                    p.loops -= 1;
                }
            } else {
                break;
            }
        }
    }
}

/// The closed set of node kinds.
///
/// Visual kinds emit render commands during the compile walk; layout
/// kinds rewrite their children's rectangles instead.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    /// Invisible container; children recurse with the node rectangle's
    /// origin added to the running offset.
    Blank,
    /// The window root. Its rectangle tracks the window size.
    Root,
    /// Fills the whole target surface with one color.
    ColorBackground {
        /// Fill color.
        color: Rgba,
    },
    /// Rounded rectangle with optional border and fill.
    Label {
        /// Border and fill style.
        style: LabelStyle,
        /// How the border relates to the node rectangle.
        box_mode: BoxMode,
    },
    /// A bitmap drawn into the node rectangle.
    Image {
        /// Source surface.
        surface: Rc<Pixmap>,
        /// Destination mapping.
        fill_mode: FillMode,
    },
    /// Multi-line text. Leaf kind: rejects children.
    Text(TextContent),
    /// A label with text inside it.
    TextLabel {
        /// Text content, style, alignment, and offset.
        text: TextContent,
        /// Border and fill style.
        label_style: LabelStyle,
        /// How the border relates to the node rectangle.
        box_mode: BoxMode,
    },
    /// Linear gradient fill with a cached bitmap.
    LinearGradient(Gradient),
    /// Frame animation.
    Animation(Animation),
    /// Margin-relative layout of children.
    Relative(RelativeLayout),
    /// Parent-fraction layout of children.
    Ratio(RatioLayout),
    /// Dock layout of children.
    Dock(DockLayout),
    /// Grid layout of children.
    Grid(GridLayout),
}

impl NodeKind {
    /// Layout kinds reject nothing but must purge per-child config when
    /// a child leaves.
    pub(crate) fn purge_child(&mut self, child: NodeId) {
        match self {
            Self::Relative(l) => l.purge(child),
            Self::Ratio(l) => l.purge(child),
            Self::Dock(l) => l.purge(child),
            Self::Grid(l) => l.purge(child),
            _ => {}
        }
    }

    /// Drop the entire per-child config table, for `clear`.
    pub(crate) fn clear_child_config(&mut self) {
        match self {
            Self::Relative(l) => l.clear_config(),
            Self::Ratio(l) => l.clear_config(),
            Self::Dock(l) => l.clear_config(),
            Self::Grid(l) => l.clear_config(),
            _ => {}
        }
    }

    /// Whether this kind refuses children entirely.
    #[inline]
    pub(crate) const fn is_leaf(&self) -> bool {
        matches!(self, Self::Text(_))
    }
}

/// A scene node: identity, tree links, geometry, and kind payload.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub(crate) id: NodeId,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    /// Node rectangle, in the parent's content coordinate space.
    pub rect: Rect,
    /// Kind payload.
    pub kind: NodeKind,
}

impl Node {
    /// This node's handle.
    #[inline]
    pub const fn id(&self) -> NodeId {
        self.id
    }

    /// The parent handle, absent for the root and detached nodes.
    #[inline]
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Child handles in insertion order.
    #[inline]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frames(durations_ms: &[u64]) -> Rc<AnimationFrames> {
        Rc::new(AnimationFrames::from_frames(
            durations_ms
                .iter()
                .map(|ms| (Pixmap::new(1, 1), ms * 1_000_000)),
        ))
    }

    const MS: u64 = 1_000_000;

    #[test]
    fn test_cumulative_table() {
        let f = frames(&[100, 100]);
        assert_eq!(f.len(), 2);
        assert_eq!(f.cycle_ns(), 200 * MS);
    }

    #[test]
    fn test_two_loops_revisit_first_frame_then_hold_last() {
        let mut anim = Animation::new(frames(&[100, 100]), FillMode::Ignore, 2);
        anim.play(0);
        anim.advance(50 * MS);
        assert_eq!(anim.current_frame(), 0);
        anim.advance(150 * MS);
        assert_eq!(anim.current_frame(), 1);
        // second cycle starts: frame 0 again
        anim.advance(200 * MS);
        assert_eq!(anim.current_frame(), 0);
        assert!(anim.is_playing());
        // entering the final frame of the final cycle stops playback
        anim.advance(300 * MS);
        assert_eq!(anim.current_frame(), 1);
        assert!(!anim.is_playing());
        // time keeps passing, frame holds
        anim.advance(900 * MS);
        assert_eq!(anim.current_frame(), 1);
    }

    #[test]
    fn test_zero_loops_never_stops() {
        let mut anim = Animation::new(frames(&[10, 10]), FillMode::Ignore, 0);
        anim.play(0);
        anim.advance(205 * MS);
        assert!(anim.is_playing());
        assert_eq!(anim.current_frame(), 0);
    }

    #[test]
    fn test_pause_banks_elapsed_time() {
        let mut anim = Animation::new(frames(&[100, 100]), FillMode::Ignore, 0);
        anim.play(0);
        anim.advance(60 * MS);
        anim.pause(80 * MS);
        // 20ms banked while paused; resume later
        anim.play(500 * MS);
        anim.advance(530 * MS);
        // 80 + 30 = 110ms into the cycle
        assert_eq!(anim.current_frame(), 1);
    }

    #[test]
    fn test_set_frame_bounds() {
        let mut anim = Animation::new(frames(&[10, 10]), FillMode::Ignore, 1);
        assert!(anim.set_frame(1).is_ok());
        assert_eq!(anim.current_frame(), 1);
        assert_eq!(
            anim.set_frame(2),
            Err(SceneError::FrameOutOfRange { index: 2, len: 2 })
        );
    }

    #[test]
    fn test_set_line_height_adjusts_spacing() {
        use crate::text::MonoFont;
        let style = TextStyle::new(Rc::new(MonoFont), 20);
        let mut tc = TextContent::new("hi", style);
        tc.set_line_height(26);
        assert_eq!(tc.style.line_spacing, 6);
        assert_eq!(tc.line_height(), 26);
    }
}
