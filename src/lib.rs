//! # Glimmer
//!
//! A retained-mode scene and UI framework over a software surface.
//!
//! Glimmer keeps a tree of visual nodes and compiles it once per frame
//! into a flat queue of drawing commands, dispatches input through the
//! tree with capture/bubble semantics, arranges children with pluggable
//! layout kinds, and drives property animation from a cooperative
//! per-frame scheduler.
//!
//! ## Core Concepts
//!
//! - **Scene tree**: a generational arena of nodes; handles stay cheap
//!   and go stale instead of dangling
//! - **Command queue**: each frame's snapshot of drawing primitives;
//!   painted front to back, hit-tested back to front
//! - **Capture/bubble dispatch**: listeners keyed by event type, node,
//!   and phase, with hover/active tracking and click synthesis
//! - **Frame scheduler**: keyframes, timers, and triggers polled once
//!   per frame against an injected clock
//!
//! ## Example
//!
//! ```rust
//! use glimmer::{NodeKind, Rect, Rgba, Window};
//!
//! let mut window = Window::new(320, 240);
//! let root = window.root();
//! let fill = window.scene_mut().create(
//!     NodeKind::ColorBackground { color: Rgba::WHITE },
//!     Rect::ZERO,
//! );
//! window.scene_mut().append(root, fill).unwrap();
//! window.pre_render(0);
//! window.render();
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod anim;
pub mod driver;
pub mod event;
pub mod geometry;
pub mod gfx;
pub mod layout;
pub mod render;
pub mod scene;
pub mod text;

// Re-exports for convenience
pub use anim::{Curve, FormulaCurve, Keyframe, Scheduler};
pub use driver::{FrameLoop, Window};
pub use event::{Dispatcher, Event, EventType, MouseButton};
pub use geometry::{Point, Rect, Vec2};
pub use gfx::{Pixmap, Rgba};
pub use render::{RenderCommand, Renderer};
pub use scene::{NodeId, NodeKind, Scene, SceneError};
pub use text::{AlignMode, BoxMode, LabelStyle, StyleFlags, TextStyle};
