use crate::constants::{FIELD_BLUR_PX, FIELD_REDUCED_DOWNSCALE, Z_FIELD};
use crate::core::{
    low_res_size, palette_for_hour, FieldInput, FrameProfile, FrameScheduler, PointerState,
    ProceduralField, SignalStore,
};
use crate::dom;
use crate::error::MotionResult;
use crate::frame::AnimationLoop;
use crate::render::frame_dt_sec;
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::Clamped;
use web_sys as web;

struct FieldPainter {
    field: ProceduralField,
    ctx: web::CanvasRenderingContext2d,
    canvas: web::HtmlCanvasElement,
    pointer: SignalStore<PointerState>,
    downscale: u32,
}

impl FieldPainter {
    fn paint(&mut self, dt_ms: f64) {
        self.field.advance(frame_dt_sec(dt_ms));
        let pointer_uv = self.pointer.with_state(|p| {
            if p.has_position() {
                p.normalized()
            } else {
                Vec2::splat(-1.0)
            }
        });
        let input = FieldInput {
            pointer_uv,
            palette: palette_for_hour(dom::local_hour()),
        };
        self.field.render(&input);

        match web::ImageData::new_with_u8_clamped_array_and_sh(
            Clamped(self.field.as_bytes()),
            self.field.width(),
            self.field.height(),
        ) {
            Ok(img) => {
                _ = self.ctx.put_image_data(&img, 0.0, 0.0);
            }
            Err(e) => log::warn!("[field] image data: {:?}", e),
        }
    }

    fn resize(&mut self, viewport_width: f32, viewport_height: f32) {
        let (w, h) = low_res_size(viewport_width, viewport_height, self.downscale);
        self.field.resize(w, h);
        dom::set_canvas_backing_size(&self.canvas, w, h);
    }
}

/// Blurred, upscaled low-resolution noise background.
pub struct FieldLayer {
    canvas: web::HtmlCanvasElement,
    painter: Rc<RefCell<FieldPainter>>,
    frame: Option<AnimationLoop>,
}

impl FieldLayer {
    pub fn mount(
        document: &web::Document,
        viewport: (f32, f32),
        pointer: SignalStore<PointerState>,
        profile: FrameProfile,
        downscale: u32,
        reduced_motion: bool,
    ) -> MotionResult<Self> {
        let downscale = if reduced_motion {
            FIELD_REDUCED_DOWNSCALE
        } else {
            downscale
        };
        let canvas = dom::create_overlay_canvas(
            document,
            "motion-field",
            Z_FIELD,
            &format!(
                "filter:blur({}px);transform:scale(1.08);image-rendering:auto;",
                FIELD_BLUR_PX
            ),
        )?;
        let ctx = match dom::context_2d(&canvas, "field") {
            Ok(ctx) => ctx,
            Err(e) => {
                canvas.remove();
                return Err(e);
            }
        };

        let field = ProceduralField::for_viewport(viewport.0, viewport.1, downscale);
        dom::set_canvas_backing_size(&canvas, field.width(), field.height());
        log::info!(
            "[field] {}x{} (downscale {}, reduced motion {})",
            field.width(),
            field.height(),
            downscale,
            reduced_motion
        );

        let painter = Rc::new(RefCell::new(FieldPainter {
            field,
            ctx,
            canvas: canvas.clone(),
            pointer,
            downscale,
        }));
        let painter_task = painter.clone();
        let frame = AnimationLoop::start(
            "field",
            FrameScheduler::new(profile, reduced_motion),
            move |_ts: f64, dt_ms: f64| painter_task.borrow_mut().paint(dt_ms),
        );
        Ok(Self {
            canvas,
            painter,
            frame,
        })
    }

    pub fn resize(&self, viewport_width: f32, viewport_height: f32) {
        self.painter
            .borrow_mut()
            .resize(viewport_width, viewport_height);
    }
}

impl Drop for FieldLayer {
    fn drop(&mut self) {
        if let Some(frame) = self.frame.take() {
            frame.cancel();
        }
        self.canvas.remove();
    }
}
