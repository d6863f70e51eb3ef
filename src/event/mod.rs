//! Input events and capture/bubble dispatch.
//!
//! One [`Dispatcher`] per window. Raw events come in typed; the
//! dispatcher tracks hover and active nodes, synthesizes
//! enter/leave/click events, and walks listeners along the target's
//! ancestor chain in capture order (root first) then bubble order
//! (target first).

mod dispatcher;
#[allow(clippy::module_inception)]
mod event;

pub use dispatcher::{DispatchError, Dispatcher, Listener, ListenerId};
pub use event::{Event, EventCategory, EventType, MouseButton};
