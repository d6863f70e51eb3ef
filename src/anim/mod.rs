//! Easing curves and the frame-driven animation scheduler.
//!
//! The [`Scheduler`] is an explicit context owned by the frame loop;
//! entries are [`FrameFunc`] values (keyframes, timers, triggers)
//! polled once per frame and removed the tick they report completion.

mod curve;
mod formula;
mod keyframe;
mod scheduler;

pub use curve::{Curve, Faster, Linear, Slower, Smooth};
pub use formula::{CurveError, FormulaCurve};
pub use keyframe::{FrameTrigger, Framer, Keyframe, TimeTrigger, Timer};
pub use scheduler::{FrameFunc, FuncId, Scheduler};
