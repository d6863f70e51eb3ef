//! Typed input and synthesized events.

use crate::geometry::Point;
use crate::scene::NodeId;

/// A mouse button.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum MouseButton {
    /// The primary button.
    Left,
    /// The wheel button.
    Middle,
    /// The secondary button.
    Right,
    /// Any other button, by raw index.
    Other(u8),
}

/// An event flowing through the dispatcher.
///
/// Raw window and pointer events come from the host input source;
/// enter/leave/click events are synthesized by the dispatcher itself.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Event {
    /// Pointer moved.
    MouseMotion {
        /// Pointer position in window pixels.
        pos: Point,
    },
    /// Button pressed.
    MouseButtonDown {
        /// Pointer position in window pixels.
        pos: Point,
        /// Which button.
        button: MouseButton,
    },
    /// Button released.
    MouseButtonUp {
        /// Pointer position in window pixels.
        pos: Point,
        /// Which button.
        button: MouseButton,
    },
    /// Synthesized: the pointer entered `target`'s subtree.
    MouseEntered {
        /// The node now hovered.
        target: NodeId,
    },
    /// Synthesized: the pointer left `target`'s subtree.
    MouseLeft {
        /// The node no longer hovered.
        target: NodeId,
    },
    /// Synthesized: press and release landed on the same node.
    Click {
        /// The clicked node.
        target: NodeId,
        /// Release position in window pixels.
        pos: Point,
    },
    /// The window was resized.
    WindowResized {
        /// New width in pixels.
        width: u32,
        /// New height in pixels.
        height: u32,
    },
    /// The window was asked to close.
    WindowClose,
    /// The pointer left the window entirely.
    WindowLeave,
}

/// Discriminant of an [`Event`], used as a listener registry key.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum EventType {
    /// [`Event::MouseMotion`].
    MouseMotion,
    /// [`Event::MouseButtonDown`].
    MouseButtonDown,
    /// [`Event::MouseButtonUp`].
    MouseButtonUp,
    /// [`Event::MouseEntered`].
    MouseEntered,
    /// [`Event::MouseLeft`].
    MouseLeft,
    /// [`Event::Click`].
    Click,
    /// [`Event::WindowResized`].
    WindowResized,
    /// [`Event::WindowClose`].
    WindowClose,
    /// [`Event::WindowLeave`].
    WindowLeave,
}

/// Which state pointer an event targets by default.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum EventCategory {
    /// Targets the hover node.
    Mouse,
    /// Targets the active node.
    Window,
}

impl Event {
    /// This event's registry key discriminant.
    #[must_use]
    pub const fn event_type(&self) -> EventType {
        match self {
            Self::MouseMotion { .. } => EventType::MouseMotion,
            Self::MouseButtonDown { .. } => EventType::MouseButtonDown,
            Self::MouseButtonUp { .. } => EventType::MouseButtonUp,
            Self::MouseEntered { .. } => EventType::MouseEntered,
            Self::MouseLeft { .. } => EventType::MouseLeft,
            Self::Click { .. } => EventType::Click,
            Self::WindowResized { .. } => EventType::WindowResized,
            Self::WindowClose => EventType::WindowClose,
            Self::WindowLeave => EventType::WindowLeave,
        }
    }

    /// Whether this event targets the hover node or the active node.
    #[must_use]
    pub const fn category(&self) -> EventCategory {
        match self.event_type() {
            EventType::MouseMotion
            | EventType::MouseButtonDown
            | EventType::MouseButtonUp
            | EventType::MouseEntered
            | EventType::MouseLeft
            | EventType::Click => EventCategory::Mouse,
            EventType::WindowResized | EventType::WindowClose | EventType::WindowLeave => {
                EventCategory::Window
            }
        }
    }
}
