use crate::constants::{
    CURSOR_FPS, FIELD_FPS, FIELD_REDUCED_FPS, PARTICLES_FPS, SCROLL_SAMPLER_FPS,
};

/// Target frame rates for one subsystem.
///
/// `reduced_fps` is the rate used when the user prefers reduced motion;
/// `None` means the subsystem does not run at all in that case.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameProfile {
    pub target_fps: f64,
    pub reduced_fps: Option<f64>,
}

impl FrameProfile {
    pub const FIELD: FrameProfile = FrameProfile {
        target_fps: FIELD_FPS,
        reduced_fps: Some(FIELD_REDUCED_FPS),
    };
    pub const PARTICLES: FrameProfile = FrameProfile {
        target_fps: PARTICLES_FPS,
        reduced_fps: None,
    };
    pub const CURSOR: FrameProfile = FrameProfile {
        target_fps: CURSOR_FPS,
        reduced_fps: None,
    };
    /// Sampling is not animation; it keeps its rate under reduced motion.
    pub const SCROLL_SAMPLER: FrameProfile = FrameProfile {
        target_fps: SCROLL_SAMPLER_FPS,
        reduced_fps: Some(SCROLL_SAMPLER_FPS),
    };

    pub fn with_target_fps(mut self, fps: f64) -> Self {
        self.target_fps = fps;
        self
    }
}

/// Per-frame work driven by a [`FrameScheduler`].
pub trait FrameTask {
    /// `dt_ms` is the time since the previous frame that did work.
    fn frame(&mut self, timestamp_ms: f64, dt_ms: f64);
}

impl<F: FnMut(f64, f64)> FrameTask for F {
    fn frame(&mut self, timestamp_ms: f64, dt_ms: f64) {
        self(timestamp_ms, dt_ms)
    }
}

/// Timestamp-gated frame throttle.
///
/// The host calls [`FrameScheduler::tick`] on every animation callback; work
/// only runs once `1000 / fps` milliseconds have elapsed since the last frame
/// that ran. A dormant scheduler (reduced motion with no fallback rate) and a
/// cancelled one never run work.
#[derive(Clone, Debug)]
pub struct FrameScheduler {
    interval_ms: Option<f64>,
    last_ms: f64,
    active: bool,
    frames: u64,
}

impl FrameScheduler {
    pub fn new(profile: FrameProfile, reduced_motion: bool) -> Self {
        let fps = if reduced_motion {
            profile.reduced_fps
        } else {
            Some(profile.target_fps)
        };
        let interval_ms = fps.filter(|f| *f > 0.0).map(|f| 1000.0 / f);
        Self {
            interval_ms,
            last_ms: 0.0,
            active: interval_ms.is_some(),
            frames: 0,
        }
    }

    /// Dormant schedulers should not even register an animation callback.
    pub fn is_dormant(&self) -> bool {
        self.interval_ms.is_none()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn interval_ms(&self) -> Option<f64> {
        self.interval_ms
    }

    /// Number of frames that actually ran work.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn cancel(&mut self) {
        self.active = false;
    }

    /// Returns true when `task` ran for this timestamp.
    pub fn tick(&mut self, timestamp_ms: f64, task: &mut impl FrameTask) -> bool {
        if !self.active {
            return false;
        }
        let Some(interval) = self.interval_ms else {
            return false;
        };
        let elapsed = timestamp_ms - self.last_ms;
        if elapsed < interval {
            return false;
        }
        self.last_ms = timestamp_ms;
        self.frames += 1;
        task.frame(timestamp_ms, elapsed);
        true
    }
}
