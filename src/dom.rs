use crate::config::{ATTRIBUTE_PREFIX, OPTION_KEYS};
use crate::core::{HitTarget, ScrollMetrics};
use crate::error::{MotionError, MotionResult};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window() -> MotionResult<web::Window> {
    web::window().ok_or(MotionError::NoWindow)
}

#[inline]
pub fn window_document() -> MotionResult<web::Document> {
    window()?.document().ok_or(MotionError::NoDocument)
}

#[inline]
fn dom_err(e: wasm_bindgen::JsValue) -> MotionError {
    MotionError::Dom(format!("{:?}", e))
}

/// CSS-pixel viewport size.
pub fn viewport_size(window: &web::Window) -> (f32, f32) {
    let w = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let h = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    (w.max(1.0) as f32, h.max(1.0) as f32)
}

pub fn media_matches(window: &web::Window, query: &str) -> bool {
    window
        .match_media(query)
        .ok()
        .flatten()
        .map(|mql| mql.matches())
        .unwrap_or(false)
}

#[inline]
pub fn prefers_reduced_motion(window: &web::Window) -> bool {
    media_matches(window, "(prefers-reduced-motion: reduce)")
}

#[inline]
pub fn is_touch_primary(window: &web::Window) -> bool {
    media_matches(window, "(hover: none) and (pointer: coarse)")
}

/// Local wall-clock hour, 0..24.
#[inline]
pub fn local_hour() -> u32 {
    js_sys::Date::new_0().get_hours()
}

pub fn scroll_metrics(window: &web::Window, document: &web::Document) -> ScrollMetrics {
    let (_, viewport_height) = viewport_size(window);
    let document_height = document
        .document_element()
        .map(|el| el.scroll_height() as f32)
        .unwrap_or(viewport_height);
    ScrollMetrics {
        scroll_y: window.scroll_y().unwrap_or(0.0) as f32,
        viewport_height,
        document_height,
    }
}

/// `(option, value)` pairs from `data-motion-*` attributes on `<html>`.
pub fn root_overrides(document: &web::Document) -> Vec<(String, String)> {
    let Some(root) = document.document_element() else {
        return Vec::new();
    };
    OPTION_KEYS
        .iter()
        .filter_map(|key| {
            root.get_attribute(&format!("{}{}", ATTRIBUTE_PREFIX, key))
                .map(|v| ((*key).to_string(), v))
        })
        .collect()
}

/// Create a fixed, full-viewport element that never intercepts input and
/// append it to `<body>`.
pub fn create_overlay(
    document: &web::Document,
    tag: &str,
    class: &str,
    z_index: i32,
    extra_style: &str,
) -> MotionResult<web::HtmlElement> {
    let body = document.body().ok_or(MotionError::NoBody)?;
    let el = document.create_element(tag).map_err(dom_err)?;
    el.set_class_name(class);
    _ = el.set_attribute("aria-hidden", "true");
    let style = format!(
        "position:fixed;left:0;top:0;pointer-events:none;z-index:{};{}",
        z_index, extra_style
    );
    el.set_attribute("style", &style).map_err(dom_err)?;
    body.append_child(&el).map_err(dom_err)?;
    el.dyn_into::<web::HtmlElement>()
        .map_err(|e| MotionError::Dom(format!("{:?}", e)))
}

pub fn create_overlay_canvas(
    document: &web::Document,
    class: &str,
    z_index: i32,
    extra_style: &str,
) -> MotionResult<web::HtmlCanvasElement> {
    let el = create_overlay(
        document,
        "canvas",
        class,
        z_index,
        &format!("width:100vw;height:100vh;{}", extra_style),
    )?;
    el.dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| MotionError::Dom(format!("{:?}", e)))
}

pub fn context_2d(
    canvas: &web::HtmlCanvasElement,
    label: &'static str,
) -> MotionResult<web::CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|ctx| ctx.dyn_into::<web::CanvasRenderingContext2d>().ok())
        .ok_or(MotionError::NoContext2d(label))
}

#[inline]
pub fn set_canvas_backing_size(canvas: &web::HtmlCanvasElement, width: u32, height: u32) {
    if canvas.width() != width.max(1) {
        canvas.set_width(width.max(1));
    }
    if canvas.height() != height.max(1) {
        canvas.set_height(height.max(1));
    }
}

/// Event listener registration that unregisters itself on drop.
pub struct Listener {
    target: web::EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

impl Listener {
    pub fn new(
        target: &web::EventTarget,
        kind: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) -> Self {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        _ = target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
        Self {
            target: target.clone(),
            kind,
            closure,
        }
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref());
    }
}

/// One-shot `setTimeout`, cleared when dropped.
pub struct Timeout {
    handle: i32,
    _closure: Closure<dyn FnMut()>,
}

impl Timeout {
    pub fn new(millis: i32, callback: impl FnOnce() + 'static) -> Option<Self> {
        let window = web::window()?;
        let mut callback = Some(callback);
        let closure = Closure::wrap(Box::new(move || {
            if let Some(cb) = callback.take() {
                cb();
            }
        }) as Box<dyn FnMut()>);
        let handle = window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                millis,
            )
            .ok()?;
        Some(Self {
            handle,
            _closure: closure,
        })
    }
}

impl Drop for Timeout {
    fn drop(&mut self) {
        if let Some(w) = web::window() {
            w.clear_timeout_with_handle(self.handle);
        }
    }
}

impl HitTarget for web::Element {
    fn tag_name(&self) -> String {
        web::Element::tag_name(self)
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.get_attribute(name)
    }

    fn parent(&self) -> Option<Self> {
        self.parent_element()
    }
}
