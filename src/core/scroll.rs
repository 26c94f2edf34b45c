use crate::constants::{SCROLL_ACTIVE_SPEED, SCROLL_DIRECTION_DEADBAND, SCROLL_IDLE_MS};
use crate::core::smoothing::ExpSmoother;
use crate::core::store::Mergeable;

/// Derived scroll signal. Positive velocity means the page moves down.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollState {
    pub scroll_y: f32,
    pub progress: f32,
    pub velocity: f32,
    pub speed: f32,
    pub direction: i8,
    pub is_scrolling: bool,
    pub viewport_height: f32,
    pub document_height: f32,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ScrollPatch {
    pub scroll_y: Option<f32>,
    pub progress: Option<f32>,
    pub velocity: Option<f32>,
    pub speed: Option<f32>,
    pub direction: Option<i8>,
    pub is_scrolling: Option<bool>,
    pub viewport_height: Option<f32>,
    pub document_height: Option<f32>,
}

impl ScrollPatch {
    fn full(s: &ScrollState) -> Self {
        Self {
            scroll_y: Some(s.scroll_y),
            progress: Some(s.progress),
            velocity: Some(s.velocity),
            speed: Some(s.speed),
            direction: Some(s.direction),
            is_scrolling: Some(s.is_scrolling),
            viewport_height: Some(s.viewport_height),
            document_height: Some(s.document_height),
        }
    }

    /// The watchdog patch: motion fields only, position untouched.
    pub fn stopped() -> Self {
        Self {
            velocity: Some(0.0),
            speed: Some(0.0),
            direction: Some(0),
            is_scrolling: Some(false),
            ..Default::default()
        }
    }
}

impl Mergeable for ScrollState {
    type Patch = ScrollPatch;

    fn merge(&mut self, patch: ScrollPatch) {
        if let Some(v) = patch.scroll_y {
            self.scroll_y = v;
        }
        if let Some(v) = patch.progress {
            self.progress = v;
        }
        if let Some(v) = patch.velocity {
            self.velocity = v;
        }
        if let Some(v) = patch.speed {
            self.speed = v;
        }
        if let Some(v) = patch.direction {
            self.direction = v;
        }
        if let Some(v) = patch.is_scrolling {
            self.is_scrolling = v;
        }
        if let Some(v) = patch.viewport_height {
            self.viewport_height = v;
        }
        if let Some(v) = patch.document_height {
            self.document_height = v;
        }
    }
}

/// Raw page measurements read once per sampled frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScrollMetrics {
    pub scroll_y: f32,
    pub viewport_height: f32,
    pub document_height: f32,
}

#[inline]
pub fn scroll_direction(velocity: f32) -> i8 {
    if velocity > SCROLL_DIRECTION_DEADBAND {
        1
    } else if velocity < -SCROLL_DIRECTION_DEADBAND {
        -1
    } else {
        0
    }
}

#[inline]
pub fn scroll_progress(m: &ScrollMetrics) -> f32 {
    let range = (m.document_height - m.viewport_height).max(1.0);
    (m.scroll_y / range).clamp(0.0, 1.0)
}

/// Samples `scrollY` once per frame and derives the scroll signal.
///
/// The idle watchdog is armed every time the raw position changes; once it
/// expires, velocity, speed and direction read exactly zero. The browser glue
/// drives it with a real timer, tests with [`ScrollEngine::poll_idle`].
pub struct ScrollEngine {
    prev_y: Option<f32>,
    velocity: ExpSmoother,
    idle_deadline: Option<f64>,
    last: ScrollState,
}

impl Default for ScrollEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollEngine {
    pub fn new() -> Self {
        Self {
            prev_y: None,
            velocity: ExpSmoother::default(),
            idle_deadline: None,
            last: ScrollState::default(),
        }
    }

    /// Advance one frame. Returns a patch only when the derived state differs
    /// from what was last published, so idle pages do not wake subscribers.
    pub fn tick(&mut self, now_ms: f64, m: ScrollMetrics) -> Option<ScrollPatch> {
        let prev = self.prev_y.unwrap_or(m.scroll_y);
        let raw = m.scroll_y - prev;
        self.prev_y = Some(m.scroll_y);
        if raw != 0.0 {
            self.idle_deadline = Some(now_ms + SCROLL_IDLE_MS);
        }

        let velocity = self.velocity.push(raw);
        let speed = velocity.abs();
        let next = ScrollState {
            scroll_y: m.scroll_y,
            progress: scroll_progress(&m),
            velocity,
            speed,
            direction: scroll_direction(velocity),
            is_scrolling: speed > SCROLL_ACTIVE_SPEED,
            viewport_height: m.viewport_height,
            document_height: m.document_height,
        };
        self.publish(next)
    }

    /// Timestamp at which the watchdog expires, if armed.
    pub fn idle_deadline(&self) -> Option<f64> {
        self.idle_deadline
    }

    /// Force the stopped state regardless of residual smoothed velocity.
    pub fn stop(&mut self) -> ScrollPatch {
        self.idle_deadline = None;
        self.velocity.zero();
        self.last.merge(ScrollPatch::stopped());
        ScrollPatch::stopped()
    }

    /// Fire the watchdog if its deadline has passed.
    pub fn poll_idle(&mut self, now_ms: f64) -> Option<ScrollPatch> {
        match self.idle_deadline {
            Some(deadline) if now_ms >= deadline => Some(self.stop()),
            _ => None,
        }
    }

    fn publish(&mut self, next: ScrollState) -> Option<ScrollPatch> {
        if next == self.last {
            return None;
        }
        self.last = next;
        Some(ScrollPatch::full(&next))
    }
}
