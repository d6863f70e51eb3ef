//! Window ownership and the frame loop.

mod frame_loop;
mod window;

pub use frame_loop::{event_channel, FrameLoop, LoopConfig};
pub use window::Window;
