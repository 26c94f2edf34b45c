use crate::constants::*;
use crate::core::pointer::PointerState;
use crate::core::spring::{Spring2, SpringConfig};
use glam::Vec2;

/// Named visual states the caller can put the cursor in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CursorVariant {
    #[default]
    Default,
    Hover,
    Pressed,
    Text,
    Drag,
    Loading,
}

impl CursorVariant {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "default" => Some(CursorVariant::Default),
            "hover" | "hovering" => Some(CursorVariant::Hover),
            "pressed" => Some(CursorVariant::Pressed),
            "text" => Some(CursorVariant::Text),
            "drag" => Some(CursorVariant::Drag),
            "loading" => Some(CursorVariant::Loading),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CursorVariant::Default => "default",
            CursorVariant::Hover => "hover",
            CursorVariant::Pressed => "pressed",
            CursorVariant::Text => "text",
            CursorVariant::Drag => "drag",
            CursorVariant::Loading => "loading",
        }
    }

    pub fn style(self) -> VariantStyle {
        match self {
            CursorVariant::Default => VariantStyle {
                dot_size: 8.0,
                ring_size: 36.0,
                ring_border: BorderStyle::Solid,
                dot_opacity: 1.0,
                ring_opacity: 0.5,
                glow_size: 220.0,
                glow_opacity: 0.18,
            },
            CursorVariant::Hover => VariantStyle {
                dot_size: 4.0,
                ring_size: 56.0,
                ring_border: BorderStyle::Solid,
                dot_opacity: 1.0,
                ring_opacity: 0.8,
                glow_size: 280.0,
                glow_opacity: 0.26,
            },
            CursorVariant::Pressed => VariantStyle {
                dot_size: 10.0,
                ring_size: 26.0,
                ring_border: BorderStyle::Solid,
                dot_opacity: 1.0,
                ring_opacity: 0.9,
                glow_size: 180.0,
                glow_opacity: 0.3,
            },
            CursorVariant::Text => VariantStyle {
                dot_size: 0.0,
                ring_size: 84.0,
                ring_border: BorderStyle::None,
                dot_opacity: 0.0,
                ring_opacity: 0.95,
                glow_size: 240.0,
                glow_opacity: 0.2,
            },
            CursorVariant::Drag => VariantStyle {
                dot_size: 6.0,
                ring_size: 64.0,
                ring_border: BorderStyle::Dashed,
                dot_opacity: 1.0,
                ring_opacity: 0.7,
                glow_size: 260.0,
                glow_opacity: 0.22,
            },
            CursorVariant::Loading => VariantStyle {
                dot_size: 6.0,
                ring_size: 40.0,
                ring_border: BorderStyle::Dashed,
                dot_opacity: 0.6,
                ring_opacity: 0.6,
                glow_size: 200.0,
                glow_opacity: 0.12,
            },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BorderStyle {
    Solid,
    Dashed,
    None,
}

impl BorderStyle {
    pub fn css(self) -> &'static str {
        match self {
            BorderStyle::Solid => "solid",
            BorderStyle::Dashed => "dashed",
            BorderStyle::None => "none",
        }
    }
}

/// Sizes are diameters in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VariantStyle {
    pub dot_size: f32,
    pub ring_size: f32,
    pub ring_border: BorderStyle,
    pub dot_opacity: f32,
    pub ring_opacity: f32,
    pub glow_size: f32,
    pub glow_opacity: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ElementFrame {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub opacity: f32,
}

/// Ring placement plus the velocity-driven "liquid" deformation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RingFrame {
    pub element: ElementFrame,
    pub rotate_deg: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    pub border: BorderStyle,
}

impl RingFrame {
    /// CSS transform centering the ring and stretching it along the motion.
    pub fn transform_css(&self) -> String {
        let half = self.element.size * 0.5;
        format!(
            "translate3d({:.2}px, {:.2}px, 0) rotate({:.2}deg) scale({:.3}, {:.3}) rotate({:.2}deg)",
            self.element.x - half,
            self.element.y - half,
            self.rotate_deg,
            self.scale_x,
            self.scale_y,
            -self.rotate_deg
        )
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CursorFrame {
    pub variant: CursorVariant,
    pub label: Option<String>,
    pub dot: ElementFrame,
    pub ring: RingFrame,
    pub glow: ElementFrame,
}

/// Stretch along the motion direction: `(rotate_deg, scale_x, scale_y)`.
/// Area is preserved (`scale_x * scale_y == 1`).
pub fn liquid_stretch(velocity: Vec2) -> (f32, f32, f32) {
    let speed = velocity.length();
    if speed <= f32::EPSILON {
        return (0.0, 1.0, 1.0);
    }
    let stretch = 1.0 + (speed * RING_STRETCH_PER_SPEED).min(RING_STRETCH_MAX);
    let angle = velocity.y.atan2(velocity.x).to_degrees();
    (angle, stretch, 1.0 / stretch)
}

/// Glow `(size, opacity)` grown by pointer speed.
pub fn glow_modulation(style: &VariantStyle, speed: f32) -> (f32, f32) {
    let size = style.glow_size * (1.0 + (speed * GLOW_RADIUS_PER_SPEED).min(GLOW_RADIUS_MAX_BOOST));
    let opacity = style.glow_opacity
        * ((1.0 - GLOW_OPACITY_MAX_BOOST) + (speed * GLOW_OPACITY_PER_SPEED).min(GLOW_OPACITY_MAX_BOOST));
    (size, opacity)
}

/// Pointer-following chrome: a fast dot, a slower ring and a still slower
/// glow, each on its own spring over the same raw pointer stream.
pub struct ReactiveCursor {
    dot: Spring2,
    ring: Spring2,
    glow: Spring2,
    variant: CursorVariant,
    label: Option<String>,
    pressed: bool,
    last_raw: Option<Vec2>,
    velocity: Vec2,
}

impl Default for ReactiveCursor {
    fn default() -> Self {
        Self::new()
    }
}

impl ReactiveCursor {
    pub fn new() -> Self {
        Self::with_springs(
            SpringConfig::from_tuple(DOT_SPRING),
            SpringConfig::from_tuple(RING_SPRING),
            SpringConfig::from_tuple(GLOW_SPRING),
        )
    }

    pub fn with_springs(dot: SpringConfig, ring: SpringConfig, glow: SpringConfig) -> Self {
        Self {
            dot: Spring2::new(dot),
            ring: Spring2::new(ring),
            glow: Spring2::new(glow),
            variant: CursorVariant::Default,
            label: None,
            pressed: false,
            last_raw: None,
            velocity: Vec2::ZERO,
        }
    }

    pub fn set_variant(&mut self, variant: CursorVariant) {
        self.variant = variant;
    }

    pub fn set_label(&mut self, label: Option<String>) {
        self.label = label;
    }

    pub fn set_pressed(&mut self, pressed: bool) {
        self.pressed = pressed;
    }

    /// An explicit variant wins; otherwise press, then hover, then default.
    pub fn effective_variant(&self, is_over_interactive: bool) -> CursorVariant {
        match self.variant {
            CursorVariant::Default if self.pressed => CursorVariant::Pressed,
            CursorVariant::Default if is_over_interactive => CursorVariant::Hover,
            v => v,
        }
    }

    /// Smoothed raw pointer velocity in pixels per 60 Hz frame.
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Advance the springs toward the latest pointer sample. Returns `None`
    /// until the pointer has a real position.
    pub fn frame(&mut self, pointer: &PointerState, dt_sec: f32) -> Option<CursorFrame> {
        if !pointer.has_position() {
            return None;
        }
        let raw = pointer.position();
        if let Some(last) = self.last_raw {
            let frames = (dt_sec * 60.0).max(1e-3);
            let delta = (raw - last) / frames;
            self.velocity = self.velocity * (1.0 - CURSOR_VELOCITY_BLEND) + delta * CURSOR_VELOCITY_BLEND;
        }
        self.last_raw = Some(raw);

        let dot = self.dot.step(raw, dt_sec);
        let ring = self.ring.step(raw, dt_sec);
        let glow = self.glow.step(raw, dt_sec);

        let variant = self.effective_variant(pointer.is_over_interactive);
        let style = variant.style();
        let speed = self.velocity.length();
        let (rotate_deg, scale_x, scale_y) = liquid_stretch(self.velocity);
        let (glow_size, glow_opacity) = glow_modulation(&style, speed);

        Some(CursorFrame {
            variant,
            label: if variant == CursorVariant::Text {
                self.label.clone()
            } else {
                None
            },
            dot: ElementFrame {
                x: dot.x,
                y: dot.y,
                size: style.dot_size,
                opacity: style.dot_opacity,
            },
            ring: RingFrame {
                element: ElementFrame {
                    x: ring.x,
                    y: ring.y,
                    size: style.ring_size,
                    opacity: style.ring_opacity,
                },
                rotate_deg,
                scale_x,
                scale_y,
                border: style.ring_border,
            },
            glow: ElementFrame {
                x: glow.x,
                y: glow.y,
                size: glow_size,
                opacity: glow_opacity,
            },
        })
    }
}
