use crate::config::MotionConfig;
use crate::core::{
    CursorVariant, FrameProfile, Mergeable, PointerEngine, PointerState, ReactiveCursor,
    ScrollState, SignalStore, Subscription, SyncedSignal,
};
use crate::dom::{self, Listener};
use crate::events::{self, ScrollSampler};
use crate::render::{CursorLayer, FieldLayer, ParticleLayer};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys as web;

/// Owns everything mounted for one motion scope: the signal stores, their
/// engines and listeners, and the three render layers.
///
/// Teardown order matters: loops stop first, then listeners go, then the
/// stores close so any straggling callback writes into a no-op.
pub struct MotionProvider {
    pointer: SignalStore<PointerState>,
    scroll: SignalStore<ScrollState>,
    cursor: Rc<RefCell<ReactiveCursor>>,
    listeners: Vec<Listener>,
    scroll_sampler: Option<ScrollSampler>,
    layers: Rc<RefCell<Layers>>,
}

#[derive(Default)]
struct Layers {
    field: Option<FieldLayer>,
    particles: Option<ParticleLayer>,
    cursor: Option<CursorLayer>,
}

impl Layers {
    fn resize(&self, width: f32, height: f32, dpr: f64) {
        if let Some(field) = &self.field {
            field.resize(width, height);
        }
        if let Some(particles) = &self.particles {
            particles.resize(width, height, dpr);
        }
    }
}

fn load_config(document: &web::Document) -> MotionConfig {
    let overrides = dom::root_overrides(document);
    let (config, errors) =
        MotionConfig::with_overrides(overrides.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    for e in errors {
        log::warn!("[config] {}", e);
    }
    config
}

impl MotionProvider {
    pub fn mount() -> anyhow::Result<Self> {
        let window = dom::window()?;
        let document = dom::window_document()?;
        let config = load_config(&document);
        let reduced_motion = dom::prefers_reduced_motion(&window);
        let touch_primary = dom::is_touch_primary(&window);
        let viewport = dom::viewport_size(&window);
        let dpr = window.device_pixel_ratio();
        log::info!(
            "[provider] mount {:.0}x{:.0} dpr={:.2} reduced_motion={} touch={}",
            viewport.0,
            viewport.1,
            dpr,
            reduced_motion,
            touch_primary
        );

        let pointer = SignalStore::new(PointerState::default());
        let scroll = SignalStore::new(ScrollState::default());
        let pointer_engine = Rc::new(RefCell::new(PointerEngine::new(viewport.0, viewport.1)));
        let cursor = Rc::new(RefCell::new(ReactiveCursor::new()));

        let mut listeners = vec![events::wire_pointermove(
            &window,
            pointer_engine.clone(),
            pointer.clone(),
        )];
        let scroll_sampler = ScrollSampler::start(window.clone(), document.clone(), scroll.clone());

        let mut layers = Layers::default();
        match FieldLayer::mount(
            &document,
            viewport,
            pointer.clone(),
            FrameProfile::FIELD.with_target_fps(config.field_fps),
            config.field_downscale,
            reduced_motion,
        ) {
            Ok(layer) => layers.field = Some(layer),
            Err(e) => log::warn!("[field] disabled: {}", e),
        }

        if config.particles_enabled {
            match ParticleLayer::mount(
                &document,
                viewport,
                dpr,
                config.particle_count,
                pointer.clone(),
                scroll.clone(),
                reduced_motion,
            ) {
                Ok(layer) => layers.particles = layer,
                Err(e) => log::warn!("[particles] disabled: {}", e),
            }
        }

        if !config.cursor_enabled {
            log::info!("[cursor] disabled by config");
        } else if touch_primary {
            log::info!("[cursor] touch-primary device: not mounted");
        } else {
            match CursorLayer::mount(&document, cursor.clone(), pointer.clone(), reduced_motion) {
                Ok(layer) => {
                    if layer.is_some() {
                        listeners.extend(events::wire_press(&window, cursor.clone()));
                    }
                    layers.cursor = layer;
                }
                Err(e) => log::warn!("[cursor] disabled: {}", e),
            }
        }

        let layers = Rc::new(RefCell::new(layers));
        let layers_resize = layers.clone();
        let window_resize = window.clone();
        listeners.push(Listener::new(&window, "resize", move |_ev: web::Event| {
            let (w, h) = dom::viewport_size(&window_resize);
            pointer_engine.borrow_mut().set_viewport(w, h);
            layers_resize
                .borrow()
                .resize(w, h, window_resize.device_pixel_ratio());
        }));

        Ok(Self {
            pointer,
            scroll,
            cursor,
            listeners,
            scroll_sampler: Some(scroll_sampler),
            layers,
        })
    }

    pub fn pointer(&self) -> &SignalStore<PointerState> {
        &self.pointer
    }

    pub fn scroll(&self) -> &SignalStore<ScrollState> {
        &self.scroll
    }

    pub fn set_cursor_variant(&self, variant: CursorVariant) {
        self.cursor.borrow_mut().set_variant(variant);
    }

    pub fn set_cursor_label(&self, label: Option<String>) {
        self.cursor.borrow_mut().set_label(label);
    }

    pub fn teardown(&mut self) {
        *self.layers.borrow_mut() = Layers::default();
        if let Some(mut sampler) = self.scroll_sampler.take() {
            sampler.stop();
        }
        self.listeners.clear();
        self.pointer.close();
        self.scroll.close();
        log::info!("[provider] unmounted");
    }
}

impl Drop for MotionProvider {
    fn drop(&mut self) {
        if !self.pointer.is_closed() {
            self.teardown();
        }
    }
}

fn pointer_to_js(p: &PointerState) -> JsValue {
    let obj = js_sys::Object::new();
    set_field(&obj, "x", p.x.into());
    set_field(&obj, "y", p.y.into());
    set_field(&obj, "normalizedX", p.normalized_x.into());
    set_field(&obj, "normalizedY", p.normalized_y.into());
    set_field(&obj, "speed", p.speed.into());
    set_field(&obj, "isOverInteractive", p.is_over_interactive.into());
    js_sys::Object::freeze(&obj).into()
}

fn scroll_to_js(s: &ScrollState) -> JsValue {
    let obj = js_sys::Object::new();
    set_field(&obj, "scrollY", s.scroll_y.into());
    set_field(&obj, "progress", s.progress.into());
    set_field(&obj, "velocity", s.velocity.into());
    set_field(&obj, "speed", s.speed.into());
    set_field(&obj, "direction", s.direction.into());
    set_field(&obj, "isScrolling", s.is_scrolling.into());
    set_field(&obj, "viewportHeight", s.viewport_height.into());
    set_field(&obj, "documentHeight", s.document_height.into());
    js_sys::Object::freeze(&obj).into()
}

#[inline]
fn set_field(obj: &js_sys::Object, key: &str, value: JsValue) {
    _ = js_sys::Reflect::set(obj, &JsValue::from_str(key), &value);
}

/// Snapshot that stays reference-stable until the store notifies, as
/// external-store hooks require.
struct SnapshotCache<S> {
    synced: SyncedSignal<S>,
    cached: RefCell<Option<JsValue>>,
    to_js: fn(&S) -> JsValue,
}

impl<S: Mergeable + 'static> SnapshotCache<S> {
    fn new(store: &SignalStore<S>, to_js: fn(&S) -> JsValue) -> Self {
        Self {
            synced: SyncedSignal::new(store),
            cached: RefCell::new(None),
            to_js,
        }
    }

    fn get(&self) -> JsValue {
        let changed = self.synced.take_changed();
        let mut cached = self.cached.borrow_mut();
        if changed || cached.is_none() {
            *cached = Some((self.to_js)(&self.synced.snapshot()));
        }
        cached.clone().unwrap_or(JsValue::UNDEFINED)
    }
}

/// JS-facing handle for a mounted motion scope.
#[wasm_bindgen]
pub struct MotionHandle {
    provider: Option<MotionProvider>,
    pointer_cache: Option<SnapshotCache<PointerState>>,
    scroll_cache: Option<SnapshotCache<ScrollState>>,
}

/// Subscription returned to JS; call `unsubscribe()` to detach.
#[wasm_bindgen]
pub struct JsSubscription {
    inner: Option<Subscription>,
}

#[wasm_bindgen]
impl JsSubscription {
    pub fn unsubscribe(&mut self) {
        if let Some(sub) = self.inner.take() {
            sub.unsubscribe();
        }
    }
}

fn subscribe_js<S: Mergeable + 'static>(
    store: &SignalStore<S>,
    callback: js_sys::Function,
) -> JsSubscription {
    let inner = store.subscribe(move |_s: &S| {
        if let Err(e) = callback.call0(&JsValue::NULL) {
            log::warn!("[provider] subscriber threw: {:?}", e);
        }
    });
    JsSubscription { inner: Some(inner) }
}

#[wasm_bindgen]
impl MotionHandle {
    /// Latest pointer snapshot; the same object until the pointer changes.
    #[wasm_bindgen(js_name = pointerSnapshot)]
    pub fn pointer_snapshot(&self) -> JsValue {
        self.pointer_cache
            .as_ref()
            .map(SnapshotCache::get)
            .unwrap_or(JsValue::UNDEFINED)
    }

    #[wasm_bindgen(js_name = scrollSnapshot)]
    pub fn scroll_snapshot(&self) -> JsValue {
        self.scroll_cache
            .as_ref()
            .map(SnapshotCache::get)
            .unwrap_or(JsValue::UNDEFINED)
    }

    #[wasm_bindgen(js_name = subscribePointer)]
    pub fn subscribe_pointer(&self, callback: js_sys::Function) -> JsSubscription {
        match &self.provider {
            Some(p) => subscribe_js(p.pointer(), callback),
            None => JsSubscription { inner: None },
        }
    }

    #[wasm_bindgen(js_name = subscribeScroll)]
    pub fn subscribe_scroll(&self, callback: js_sys::Function) -> JsSubscription {
        match &self.provider {
            Some(p) => subscribe_js(p.scroll(), callback),
            None => JsSubscription { inner: None },
        }
    }

    /// Unknown names fall back to `default`.
    #[wasm_bindgen(js_name = setCursorVariant)]
    pub fn set_cursor_variant(&self, name: &str) {
        let variant = CursorVariant::from_name(name).unwrap_or_else(|| {
            log::warn!("[cursor] unknown variant `{}`", name);
            CursorVariant::Default
        });
        if let Some(p) = &self.provider {
            p.set_cursor_variant(variant);
        }
    }

    #[wasm_bindgen(js_name = setCursorLabel)]
    pub fn set_cursor_label(&self, label: Option<String>) {
        if let Some(p) = &self.provider {
            p.set_cursor_label(label);
        }
    }

    pub fn unmount(&mut self) {
        if let Some(cache) = self.pointer_cache.take() {
            cache.synced.detach();
        }
        if let Some(cache) = self.scroll_cache.take() {
            cache.synced.detach();
        }
        if let Some(mut provider) = self.provider.take() {
            provider.teardown();
        }
    }
}

/// Mount the motion layers on the current page.
#[wasm_bindgen]
pub fn mount() -> Result<MotionHandle, JsValue> {
    let provider = MotionProvider::mount().map_err(|e| JsValue::from_str(&e.to_string()))?;
    let pointer_cache = SnapshotCache::new(provider.pointer(), pointer_to_js);
    let scroll_cache = SnapshotCache::new(provider.scroll(), scroll_to_js);
    Ok(MotionHandle {
        provider: Some(provider),
        pointer_cache: Some(pointer_cache),
        scroll_cache: Some(scroll_cache),
    })
}
