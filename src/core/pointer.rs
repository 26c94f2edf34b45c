use crate::constants::POINTER_SENTINEL;
use crate::core::smoothing::ExpSmoother;
use crate::core::store::Mergeable;
use glam::Vec2;

/// Latest pointer sample as published to the pointer store.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerState {
    pub x: f32,
    pub y: f32,
    pub normalized_x: f32,
    pub normalized_y: f32,
    pub speed: f32,
    pub is_over_interactive: bool,
}

impl Default for PointerState {
    fn default() -> Self {
        Self {
            x: POINTER_SENTINEL,
            y: POINTER_SENTINEL,
            normalized_x: -1.0,
            normalized_y: -1.0,
            speed: 0.0,
            is_over_interactive: false,
        }
    }
}

impl PointerState {
    /// True once a real pointer sample replaced the off-screen sentinel.
    pub fn has_position(&self) -> bool {
        self.x != POINTER_SENTINEL || self.y != POINTER_SENTINEL
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn normalized(&self) -> Vec2 {
        Vec2::new(self.normalized_x, self.normalized_y)
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct PointerPatch {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub normalized_x: Option<f32>,
    pub normalized_y: Option<f32>,
    pub speed: Option<f32>,
    pub is_over_interactive: Option<bool>,
}

impl Mergeable for PointerState {
    type Patch = PointerPatch;

    fn merge(&mut self, patch: PointerPatch) {
        if let Some(v) = patch.x {
            self.x = v;
        }
        if let Some(v) = patch.y {
            self.y = v;
        }
        if let Some(v) = patch.normalized_x {
            self.normalized_x = v;
        }
        if let Some(v) = patch.normalized_y {
            self.normalized_y = v;
        }
        if let Some(v) = patch.speed {
            self.speed = v;
        }
        if let Some(v) = patch.is_over_interactive {
            self.is_over_interactive = v;
        }
    }
}

/// Minimal view of a DOM node for the interactive hit-test.
pub trait HitTarget: Sized {
    fn tag_name(&self) -> String;
    fn attribute(&self, name: &str) -> Option<String>;
    fn parent(&self) -> Option<Self>;
}

/// One entry of the interactive allow-list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InteractiveMatcher {
    Tag(&'static str),
    Role(&'static str),
    Attribute(&'static str),
}

pub const INTERACTIVE_MATCHERS: [InteractiveMatcher; 7] = [
    InteractiveMatcher::Tag("button"),
    InteractiveMatcher::Tag("a"),
    InteractiveMatcher::Role("button"),
    InteractiveMatcher::Tag("input"),
    InteractiveMatcher::Tag("select"),
    InteractiveMatcher::Tag("textarea"),
    InteractiveMatcher::Attribute("data-cursor-hover"),
];

impl InteractiveMatcher {
    pub fn matches<T: HitTarget>(&self, node: &T) -> bool {
        match self {
            InteractiveMatcher::Tag(tag) => node.tag_name().eq_ignore_ascii_case(tag),
            InteractiveMatcher::Role(role) => node
                .attribute("role")
                .map(|r| r.eq_ignore_ascii_case(role))
                .unwrap_or(false),
            InteractiveMatcher::Attribute(name) => node.attribute(name).is_some(),
        }
    }

    /// CSS selector equivalent, e.g. `[role="button"]`.
    pub fn selector(&self) -> String {
        match self {
            InteractiveMatcher::Tag(tag) => (*tag).to_string(),
            InteractiveMatcher::Role(role) => format!("[role=\"{}\"]", role),
            InteractiveMatcher::Attribute(name) => format!("[{}]", name),
        }
    }
}

/// Comma-joined selector list covering the whole allow-list.
pub fn interactive_selector() -> String {
    INTERACTIVE_MATCHERS
        .iter()
        .map(InteractiveMatcher::selector)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Walk from `target` up through its ancestors and report whether any node
/// matches the allow-list (the `closest()` semantics).
pub fn is_interactive<T: HitTarget>(target: Option<T>) -> bool {
    let mut node = target;
    while let Some(n) = node {
        if INTERACTIVE_MATCHERS.iter().any(|m| m.matches(&n)) {
            return true;
        }
        node = n.parent();
    }
    false
}

/// Turns raw `pointermove` samples into pointer store patches.
///
/// Coordinates are viewport pixels as delivered by the event; speed is the
/// smoothed per-event travel distance.
pub struct PointerEngine {
    prev: Option<Vec2>,
    speed: ExpSmoother,
    viewport: Vec2,
}

impl PointerEngine {
    pub fn new(viewport_width: f32, viewport_height: f32) -> Self {
        Self {
            prev: None,
            speed: ExpSmoother::default(),
            viewport: Vec2::new(viewport_width, viewport_height),
        }
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = Vec2::new(width, height);
    }

    pub fn speed(&self) -> f32 {
        self.speed.value()
    }

    /// Process one move event. The returned patch carries every field so it
    /// can be published with a single `set_state`.
    pub fn sample<T: HitTarget>(&mut self, x: f32, y: f32, target: Option<T>) -> PointerPatch {
        let pos = Vec2::new(x, y);
        if let Some(prev) = self.prev {
            let raw = (pos - prev).length();
            self.speed.push(raw);
        }
        self.prev = Some(pos);

        let w = self.viewport.x.max(1.0);
        let h = self.viewport.y.max(1.0);
        PointerPatch {
            x: Some(x),
            y: Some(y),
            normalized_x: Some((x / w).clamp(0.0, 1.0)),
            normalized_y: Some((y / h).clamp(0.0, 1.0)),
            speed: Some(self.speed.value()),
            is_over_interactive: Some(is_interactive(target)),
        }
    }
}
