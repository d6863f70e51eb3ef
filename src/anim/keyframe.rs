//! Scheduled entry kinds: keyframes, timers, and one-shot triggers.
//!
//! All of these are [`FrameFunc`]s; hand them to a
//! [`Scheduler`](super::Scheduler) to run. Callbacks receive mutable
//! scene access so they can drive node rectangles and payloads.

use crate::scene::Scene;

use super::curve::{Curve, Linear};
use super::scheduler::FrameFunc;

const NS_PER_US: u64 = 1_000;
const NS_PER_MS: u64 = 1_000_000;
const NS_PER_S: u64 = 1_000_000_000;

/// Interpolates one attribute from a start to an end value through a
/// curve, pushing each sample through a setter closure.
pub struct Keyframe {
    start_value: f32,
    end_value: f32,
    curve: Box<dyn Curve>,
    duration_ns: u64,
    start_ns: u64,
    frame_interval_ns: Option<u64>,
    apply: Box<dyn FnMut(&mut Scene, f32)>,
}

impl Keyframe {
    /// A linear keyframe; set a duration before scheduling it.
    pub fn new(start_value: f32, end_value: f32, apply: Box<dyn FnMut(&mut Scene, f32)>) -> Self {
        Self {
            start_value,
            end_value,
            curve: Box::new(Linear),
            duration_ns: 0,
            start_ns: 0,
            frame_interval_ns: None,
            apply,
        }
    }

    /// Replace the easing curve.
    #[must_use]
    pub fn with_curve(mut self, curve: Box<dyn Curve>) -> Self {
        self.curve = curve;
        self
    }

    /// Set the duration in nanoseconds.
    pub fn set_duration_ns(&mut self, ns: u64) {
        self.duration_ns = ns;
    }

    /// Set the duration in microseconds.
    pub fn set_duration_us(&mut self, us: u64) {
        self.duration_ns = us * NS_PER_US;
    }

    /// Set the duration in milliseconds.
    pub fn set_duration_ms(&mut self, ms: u64) {
        self.duration_ns = ms * NS_PER_MS;
    }

    /// Set the duration in seconds.
    pub fn set_duration_s(&mut self, s: u64) {
        self.duration_ns = s * NS_PER_S;
    }

    /// Hint the expected frame interval.
    ///
    /// When set, starting the keyframe backdates its clock by one
    /// interval so the first sample is already past zero instead of
    /// repeating the start value for a frame.
    pub fn set_frame_rate_hint(&mut self, fps: u64) {
        self.frame_interval_ns = (fps > 0).then(|| NS_PER_S / fps);
    }
}

impl FrameFunc for Keyframe {
    fn begin(&mut self, now_ns: u64) {
        self.start_ns = now_ns.saturating_sub(self.frame_interval_ns.unwrap_or(0));
    }

    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    fn call(&mut self, scene: &mut Scene, now_ns: u64) -> bool {
        if self.duration_ns == 0 {
            (self.apply)(scene, self.end_value);
            return true;
        }
        let elapsed = now_ns.saturating_sub(self.start_ns);
        let ratio = ((elapsed as f64 / self.duration_ns as f64) as f32).min(1.0);
        let eased = self.curve.value(ratio);
        let value = (self.end_value - self.start_value).mul_add(eased, self.start_value);
        (self.apply)(scene, value);
        ratio >= 1.0
    }
}

impl std::fmt::Debug for Keyframe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Keyframe")
            .field("start_value", &self.start_value)
            .field("end_value", &self.end_value)
            .field("duration_ns", &self.duration_ns)
            .finish_non_exhaustive()
    }
}

/// Fires a callback at a fixed interval, a bounded or unbounded number
/// of times.
pub struct Timer {
    interval_ns: u64,
    times: u32,
    fired: u32,
    next_ns: u64,
    callback: Box<dyn FnMut(&mut Scene)>,
}

impl Timer {
    /// Fire every `interval_ns`, `times` times; `0` means forever.
    pub fn new(interval_ns: u64, times: u32, callback: Box<dyn FnMut(&mut Scene)>) -> Self {
        Self {
            interval_ns,
            times,
            fired: 0,
            next_ns: 0,
            callback,
        }
    }
}

impl FrameFunc for Timer {
    fn begin(&mut self, now_ns: u64) {
        self.next_ns = now_ns + self.interval_ns;
    }

    fn call(&mut self, scene: &mut Scene, now_ns: u64) -> bool {
        // at most one firing per tick with a zero interval
        if self.interval_ns == 0 {
            (self.callback)(scene);
            self.fired += 1;
            return self.times > 0 && self.fired >= self.times;
        }
        while now_ns >= self.next_ns {
            (self.callback)(scene);
            self.fired += 1;
            self.next_ns += self.interval_ns;
            if self.times > 0 && self.fired >= self.times {
                return true;
            }
        }
        false
    }
}

/// Fires a callback every frame for a bounded or unbounded frame count.
pub struct Framer {
    frames: u32,
    elapsed: u32,
    callback: Box<dyn FnMut(&mut Scene)>,
}

impl Framer {
    /// Fire every frame for `frames` frames; `0` means until cancelled.
    pub fn new(frames: u32, callback: Box<dyn FnMut(&mut Scene)>) -> Self {
        Self {
            frames,
            elapsed: 0,
            callback,
        }
    }
}

impl FrameFunc for Framer {
    fn call(&mut self, scene: &mut Scene, _now_ns: u64) -> bool {
        (self.callback)(scene);
        self.elapsed += 1;
        self.frames > 0 && self.elapsed >= self.frames
    }
}

/// Fires a callback once after a wall-clock delay.
pub struct TimeTrigger {
    delay_ns: u64,
    fire_at_ns: u64,
    callback: Option<Box<dyn FnOnce(&mut Scene)>>,
}

impl TimeTrigger {
    /// Fire `callback` once, `delay_ns` after start.
    pub fn new(delay_ns: u64, callback: Box<dyn FnOnce(&mut Scene)>) -> Self {
        Self {
            delay_ns,
            fire_at_ns: 0,
            callback: Some(callback),
        }
    }
}

impl FrameFunc for TimeTrigger {
    fn begin(&mut self, now_ns: u64) {
        self.fire_at_ns = now_ns + self.delay_ns;
    }

    fn call(&mut self, scene: &mut Scene, now_ns: u64) -> bool {
        if now_ns < self.fire_at_ns {
            return false;
        }
        if let Some(callback) = self.callback.take() {
            callback(scene);
        }
        true
    }
}

/// Fires a callback once after a number of frames.
pub struct FrameTrigger {
    remaining: u32,
    callback: Option<Box<dyn FnOnce(&mut Scene)>>,
}

impl FrameTrigger {
    /// Fire `callback` on the `frames`-th tick after start.
    pub fn new(frames: u32, callback: Box<dyn FnOnce(&mut Scene)>) -> Self {
        Self {
            remaining: frames.max(1),
            callback: Some(callback),
        }
    }
}

impl FrameFunc for FrameTrigger {
    fn call(&mut self, scene: &mut Scene, _now_ns: u64) -> bool {
        self.remaining -= 1;
        if self.remaining > 0 {
            return false;
        }
        if let Some(callback) = self.callback.take() {
            callback(scene);
        }
        true
    }
}
