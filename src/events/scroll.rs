use crate::constants::SCROLL_IDLE_MS;
use crate::core::{FrameProfile, FrameScheduler, ScrollEngine, ScrollState, SignalStore};
use crate::dom::{self, Timeout};
use crate::frame::AnimationLoop;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

/// Samples the scroll position on its own frame loop, decoupled from how
/// often the browser fires `scroll`, and owns the idle watchdog timer.
pub struct ScrollSampler {
    frame: Option<AnimationLoop>,
    watchdog: Rc<RefCell<Option<Timeout>>>,
}

impl ScrollSampler {
    pub fn start(
        window: web::Window,
        document: web::Document,
        store: SignalStore<ScrollState>,
    ) -> Self {
        let engine = Rc::new(RefCell::new(ScrollEngine::new()));
        let watchdog: Rc<RefCell<Option<Timeout>>> = Rc::new(RefCell::new(None));

        let watchdog_task = watchdog.clone();
        let task = move |timestamp: f64, _dt_ms: f64| {
            let metrics = dom::scroll_metrics(&window, &document);
            let (patch, rearm) = {
                let mut eng = engine.borrow_mut();
                let before = eng.idle_deadline();
                let patch = eng.tick(timestamp, metrics);
                (patch, eng.idle_deadline() != before)
            };
            if let Some(patch) = patch {
                store.set_state(patch);
            }
            if rearm {
                let engine_idle = engine.clone();
                let store_idle = store.clone();
                // replacing the previous timeout clears it
                *watchdog_task.borrow_mut() = Timeout::new(SCROLL_IDLE_MS as i32, move || {
                    let patch = engine_idle.borrow_mut().stop();
                    store_idle.set_state(patch);
                });
            }
        };

        // sampling keeps running under reduced motion
        let scheduler = FrameScheduler::new(FrameProfile::SCROLL_SAMPLER, false);
        Self {
            frame: AnimationLoop::start("scroll", scheduler, task),
            watchdog,
        }
    }

    pub fn stop(&mut self) {
        if let Some(frame) = self.frame.take() {
            frame.cancel();
        }
        self.watchdog.borrow_mut().take();
    }
}

impl Drop for ScrollSampler {
    fn drop(&mut self) {
        self.stop();
    }
}
