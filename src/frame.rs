use crate::core::{FrameScheduler, FrameTask};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type TickClosure = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// `requestAnimationFrame` loop around a [`FrameScheduler`].
///
/// The callback checks the active flag before doing anything, because a
/// frame that was already queued can still fire after `cancelAnimationFrame`.
/// Cancelling also drops the closure, which breaks the self-reference the
/// loop needs to re-schedule itself.
pub struct AnimationLoop {
    name: &'static str,
    active: Rc<Cell<bool>>,
    handle: Rc<Cell<Option<i32>>>,
    tick: TickClosure,
}

impl AnimationLoop {
    /// Start a loop for `task`. Returns `None` for a dormant scheduler: under
    /// reduced motion those subsystems never register a callback at all.
    pub fn start(
        name: &'static str,
        mut scheduler: FrameScheduler,
        mut task: impl FrameTask + 'static,
    ) -> Option<Self> {
        if scheduler.is_dormant() {
            log::info!("[{}] reduced motion: loop not scheduled", name);
            return None;
        }
        let window = web::window()?;
        let active = Rc::new(Cell::new(true));
        let handle = Rc::new(Cell::new(None::<i32>));
        let tick: TickClosure = Rc::new(RefCell::new(None));

        let tick_clone = tick.clone();
        let active_cb = active.clone();
        let handle_cb = handle.clone();
        *tick.borrow_mut() = Some(Closure::wrap(Box::new(move |timestamp: f64| {
            if !active_cb.get() {
                return;
            }
            scheduler.tick(timestamp, &mut task);
            if !active_cb.get() {
                return;
            }
            let next = tick_clone.borrow().as_ref().and_then(|cb| {
                web::window().and_then(|w| {
                    w.request_animation_frame(cb.as_ref().unchecked_ref())
                        .ok()
                })
            });
            handle_cb.set(next);
        }) as Box<dyn FnMut(f64)>));

        let first = tick
            .borrow()
            .as_ref()
            .and_then(|cb| window.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
        handle.set(first);
        log::info!("[{}] loop started", name);
        Some(Self {
            name,
            active,
            handle,
            tick,
        })
    }

    pub fn cancel(&self) {
        if !self.active.replace(false) {
            return;
        }
        if let (Some(h), Some(w)) = (self.handle.take(), web::window()) {
            _ = w.cancel_animation_frame(h);
        }
        self.tick.borrow_mut().take();
        log::info!("[{}] loop cancelled", self.name);
    }
}

impl Drop for AnimationLoop {
    fn drop(&mut self) {
        self.cancel();
    }
}
