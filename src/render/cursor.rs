use crate::constants::Z_CURSOR;
use crate::core::{
    CursorFrame, ElementFrame, FrameProfile, FrameScheduler, PointerState, ReactiveCursor,
    SignalStore,
};
use crate::dom;
use crate::error::MotionResult;
use crate::frame::AnimationLoop;
use crate::render::frame_dt_sec;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

const DOT_STYLE: &str = "border-radius:50%;background:#fff;mix-blend-mode:difference;will-change:transform;";
const RING_STYLE: &str = "border-radius:50%;border:1.5px solid rgba(255,255,255,0.85);box-sizing:border-box;\
display:flex;align-items:center;justify-content:center;font:600 11px system-ui;color:#fff;\
letter-spacing:0.04em;text-transform:uppercase;will-change:transform;";
const GLOW_STYLE: &str = "border-radius:50%;background:radial-gradient(circle, rgba(255,255,255,0.55) 0%, rgba(255,255,255,0) 70%);\
filter:blur(8px);will-change:transform;";

#[inline]
fn set_style(el: &web::HtmlElement, name: &str, value: &str) {
    _ = el.style().set_property(name, value);
}

fn place(el: &web::HtmlElement, f: &ElementFrame) {
    let half = f.size * 0.5;
    set_style(
        el,
        "transform",
        &format!("translate3d({:.2}px, {:.2}px, 0)", f.x - half, f.y - half),
    );
    set_style(el, "width", &format!("{:.1}px", f.size));
    set_style(el, "height", &format!("{:.1}px", f.size));
    set_style(el, "opacity", &format!("{:.3}", f.opacity));
}

struct CursorPainter {
    cursor: Rc<RefCell<ReactiveCursor>>,
    pointer: SignalStore<PointerState>,
    dot: web::HtmlElement,
    ring: web::HtmlElement,
    glow: web::HtmlElement,
    shown_label: Option<String>,
}

impl CursorPainter {
    fn paint(&mut self, dt_ms: f64) {
        let pointer = self.pointer.get_state();
        let frame = self
            .cursor
            .borrow_mut()
            .frame(&pointer, frame_dt_sec(dt_ms));
        if let Some(frame) = frame {
            self.apply(&frame);
        }
    }

    fn apply(&mut self, frame: &CursorFrame) {
        place(&self.dot, &frame.dot);
        place(&self.glow, &frame.glow);

        let ring = &frame.ring;
        set_style(&self.ring, "transform", &ring.transform_css());
        set_style(&self.ring, "width", &format!("{:.1}px", ring.element.size));
        set_style(&self.ring, "height", &format!("{:.1}px", ring.element.size));
        set_style(&self.ring, "opacity", &format!("{:.3}", ring.element.opacity));
        set_style(&self.ring, "border-style", ring.border.css());

        if self.shown_label != frame.label {
            self.ring
                .set_text_content(frame.label.as_deref());
            self.shown_label = frame.label.clone();
        }
        _ = self
            .ring
            .set_attribute("data-variant", frame.variant.name());
    }
}

/// DOM-element cursor chrome: dot, ring and glow.
pub struct CursorLayer {
    elements: [web::HtmlElement; 3],
    frame: Option<AnimationLoop>,
}

impl CursorLayer {
    /// Returns `Ok(None)` under reduced motion.
    pub fn mount(
        document: &web::Document,
        cursor: Rc<RefCell<ReactiveCursor>>,
        pointer: SignalStore<PointerState>,
        reduced_motion: bool,
    ) -> MotionResult<Option<Self>> {
        let scheduler = FrameScheduler::new(FrameProfile::CURSOR, reduced_motion);
        if scheduler.is_dormant() {
            log::info!("[cursor] reduced motion: skipped");
            return Ok(None);
        }
        let glow = dom::create_overlay(document, "div", "motion-cursor-glow", Z_CURSOR - 2, GLOW_STYLE)?;
        let ring = match dom::create_overlay(document, "div", "motion-cursor-ring", Z_CURSOR - 1, RING_STYLE) {
            Ok(el) => el,
            Err(e) => {
                glow.remove();
                return Err(e);
            }
        };
        let dot = match dom::create_overlay(document, "div", "motion-cursor-dot", Z_CURSOR, DOT_STYLE) {
            Ok(el) => el,
            Err(e) => {
                glow.remove();
                ring.remove();
                return Err(e);
            }
        };

        let mut painter = CursorPainter {
            cursor,
            pointer,
            dot: dot.clone(),
            ring: ring.clone(),
            glow: glow.clone(),
            shown_label: None,
        };
        let frame = AnimationLoop::start("cursor", scheduler, move |_ts: f64, dt_ms: f64| {
            painter.paint(dt_ms)
        });
        Ok(Some(Self {
            elements: [dot, ring, glow],
            frame,
        }))
    }
}

impl Drop for CursorLayer {
    fn drop(&mut self) {
        if let Some(frame) = self.frame.take() {
            frame.cancel();
        }
        for el in &self.elements {
            el.remove();
        }
    }
}
