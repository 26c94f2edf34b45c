use crate::constants::Z_PARTICLES;
use crate::core::{
    FrameProfile, FrameScheduler, ParticleField, PointerState, ScrollState, SignalStore, SimInput,
};
use crate::dom;
use crate::error::MotionResult;
use crate::frame::AnimationLoop;
use crate::render::CanvasSurface;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

struct ParticlePainter {
    field: ParticleField,
    surface: CanvasSurface,
    canvas: web::HtmlCanvasElement,
    pointer: SignalStore<PointerState>,
    scroll: SignalStore<ScrollState>,
}

impl ParticlePainter {
    fn paint(&mut self) {
        let (pointer, pointer_speed) = self.pointer.with_state(|p| {
            (p.has_position().then(|| p.position()), p.speed)
        });
        let (scroll_velocity, scroll_speed) =
            self.scroll.with_state(|s| (s.velocity, s.speed));
        let input = SimInput {
            pointer,
            pointer_speed,
            scroll_velocity,
            scroll_speed,
        };
        self.field.step(&input);
        self.field.draw(&mut self.surface, scroll_speed);
    }

    fn resize(&mut self, width: f32, height: f32, dpr: f64) {
        dom::set_canvas_backing_size(
            &self.canvas,
            (width as f64 * dpr) as u32,
            (height as f64 * dpr) as u32,
        );
        self.surface.set_viewport(width, height, dpr);
        self.field.resize(width, height);
    }
}

/// Full-resolution canvas with the ambient particle pool.
pub struct ParticleLayer {
    canvas: web::HtmlCanvasElement,
    painter: Rc<RefCell<ParticlePainter>>,
    frame: Option<AnimationLoop>,
}

impl ParticleLayer {
    /// Returns `Ok(None)` under reduced motion: the pool is never created.
    pub fn mount(
        document: &web::Document,
        viewport: (f32, f32),
        dpr: f64,
        count: usize,
        pointer: SignalStore<PointerState>,
        scroll: SignalStore<ScrollState>,
        reduced_motion: bool,
    ) -> MotionResult<Option<Self>> {
        let scheduler = FrameScheduler::new(FrameProfile::PARTICLES, reduced_motion);
        if scheduler.is_dormant() {
            log::info!("[particles] reduced motion: skipped");
            return Ok(None);
        }
        let canvas = dom::create_overlay_canvas(document, "motion-particles", Z_PARTICLES, "")?;
        let ctx = match dom::context_2d(&canvas, "particles") {
            Ok(ctx) => ctx,
            Err(e) => {
                canvas.remove();
                return Err(e);
            }
        };

        let (width, height) = viewport;
        let mut painter = ParticlePainter {
            field: ParticleField::new(count, width, height, rand::random()),
            surface: CanvasSurface::new(ctx),
            canvas: canvas.clone(),
            pointer,
            scroll,
        };
        painter.resize(width, height, dpr);
        log::info!("[particles] pool of {}", painter.field.len());

        let painter = Rc::new(RefCell::new(painter));
        let painter_task = painter.clone();
        let frame = AnimationLoop::start("particles", scheduler, move |_ts: f64, _dt_ms: f64| {
            painter_task.borrow_mut().paint()
        });
        Ok(Some(Self {
            canvas,
            painter,
            frame,
        }))
    }

    pub fn resize(&self, width: f32, height: f32, dpr: f64) {
        self.painter.borrow_mut().resize(width, height, dpr);
    }
}

impl Drop for ParticleLayer {
    fn drop(&mut self) {
        if let Some(frame) = self.frame.take() {
            frame.cancel();
        }
        self.canvas.remove();
    }
}
