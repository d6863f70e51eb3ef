//! The frame loop: drain input, tick the scheduler, compile, paint.

use crossbeam_channel::{bounded, Receiver, Sender};
use std::time::{Duration, Instant};

use crate::anim::Scheduler;
use crate::event::Event;

use super::window::Window;

/// Capacity of the input event channel.
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Configuration for a [`FrameLoop`].
#[derive(Debug, Clone, Copy)]
pub struct LoopConfig {
    /// Target frames per second.
    pub target_fps: u32,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self { target_fps: 60 }
    }
}

/// Bounded channel for feeding input events from another thread.
#[must_use]
pub fn event_channel() -> (Sender<Event>, Receiver<Event>) {
    bounded(EVENT_CHANNEL_CAPACITY)
}

/// Drives a window at a target frame rate.
///
/// Each frame runs in a fixed order: drain and dispatch pending input,
/// tick the scheduler, compile the scene, paint. Animated properties
/// are therefore always current for the frame that renders them.
pub struct FrameLoop {
    window: Window,
    scheduler: Scheduler,
    events: Receiver<Event>,
    frame_duration: Duration,
    frame_count: u64,
    epoch: Instant,
    running: bool,
}

impl FrameLoop {
    /// A loop over `window` fed by `events`, at the default frame rate.
    #[must_use]
    pub fn new(window: Window, events: Receiver<Event>) -> Self {
        Self::with_config(window, events, LoopConfig::default())
    }

    /// A loop with an explicit configuration.
    #[must_use]
    pub fn with_config(window: Window, events: Receiver<Event>, config: LoopConfig) -> Self {
        Self {
            window,
            scheduler: Scheduler::new(),
            events,
            frame_duration: Duration::from_secs(1) / config.target_fps.max(1),
            frame_count: 0,
            epoch: Instant::now(),
            running: true,
        }
    }

    /// The driven window.
    #[inline]
    pub const fn window(&self) -> &Window {
        &self.window
    }

    /// The driven window, mutably, for scene and listener setup.
    #[inline]
    pub const fn window_mut(&mut self) -> &mut Window {
        &mut self.window
    }

    /// The animation scheduler.
    #[inline]
    pub const fn scheduler_mut(&mut self) -> &mut Scheduler {
        &mut self.scheduler
    }

    /// Frames completed so far.
    #[inline]
    #[must_use]
    pub const fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Whether the loop will run another frame.
    #[inline]
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Stop after the current frame.
    pub const fn stop(&mut self) {
        self.running = false;
    }

    /// Run one frame at the given timestamp.
    ///
    /// Timestamps are injected rather than read from a clock so tests
    /// can step deterministically.
    pub fn tick(&mut self, now_ns: u64) {
        while let Ok(event) = self.events.try_recv() {
            self.window.handle_event(event);
        }
        self.scheduler.tick(self.window.scene_mut(), now_ns);
        self.window.pre_render(now_ns);
        self.window.render();
        self.frame_count += 1;
        if self.window.close_requested() {
            tracing::debug!("close requested, stopping");
            self.running = false;
        }
    }

    /// Run until a close event arrives or [`FrameLoop::stop`] is called.
    ///
    /// Sleeps out the remainder of each frame to hold the target rate.
    pub fn run(&mut self) {
        while self.running {
            let frame_start = Instant::now();
            #[allow(clippy::cast_possible_truncation)]
            let now_ns = self.epoch.elapsed().as_nanos() as u64;
            self.tick(now_ns);
            let elapsed = frame_start.elapsed();
            if elapsed < self.frame_duration {
                std::thread::sleep(self.frame_duration - elapsed);
            }
        }
    }
}

impl std::fmt::Debug for FrameLoop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameLoop")
            .field("frame_count", &self.frame_count)
            .field("running", &self.running)
            .finish_non_exhaustive()
    }
}
