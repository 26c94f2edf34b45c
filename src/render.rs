use crate::core::{Hsla, Surface2d};
use glam::Vec2;
use web_sys as web;

mod cursor;
mod field;
mod particles;

pub use cursor::CursorLayer;
pub use field::FieldLayer;
pub use particles::ParticleLayer;

/// Largest frame gap fed into time-based integration (seconds). Covers the
/// first frame and tabs coming back from the background.
const MAX_FRAME_DT_SEC: f32 = 0.25;

#[inline]
pub(crate) fn frame_dt_sec(dt_ms: f64) -> f32 {
    ((dt_ms / 1000.0) as f32).clamp(0.0, MAX_FRAME_DT_SEC)
}

/// [`Surface2d`] over a 2D canvas context in CSS-pixel space.
pub(crate) struct CanvasSurface {
    ctx: web::CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl CanvasSurface {
    pub fn new(ctx: web::CanvasRenderingContext2d) -> Self {
        Self {
            ctx,
            width: 0.0,
            height: 0.0,
        }
    }

    /// Map CSS pixels onto a backing store scaled by `dpr`.
    pub fn set_viewport(&mut self, width: f32, height: f32, dpr: f64) {
        self.width = width as f64;
        self.height = height as f64;
        _ = self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
    }
}

impl Surface2d for CanvasSurface {
    fn clear(&mut self) {
        self.ctx.clear_rect(0.0, 0.0, self.width, self.height);
    }

    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Hsla) {
        self.ctx.begin_path();
        _ = self.ctx.arc(
            x as f64,
            y as f64,
            radius.max(0.0) as f64,
            0.0,
            std::f64::consts::TAU,
        );
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill();
    }

    fn stroke_polyline(&mut self, points: &[Vec2], width: f32, color: Hsla) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        self.ctx.begin_path();
        self.ctx.move_to(first.x as f64, first.y as f64);
        for p in rest {
            self.ctx.line_to(p.x as f64, p.y as f64);
        }
        self.ctx.set_line_width(width as f64);
        self.ctx.set_line_cap("round");
        self.ctx.set_stroke_style_str(&color.to_css());
        self.ctx.stroke();
    }
}
