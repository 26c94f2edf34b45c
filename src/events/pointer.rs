use crate::core::{PointerEngine, PointerState, ReactiveCursor, SignalStore};
use crate::dom::Listener;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Feed `pointermove` into the pointer engine and publish one patch per
/// event. This path never paints.
pub fn wire_pointermove(
    window: &web::Window,
    engine: Rc<RefCell<PointerEngine>>,
    store: SignalStore<PointerState>,
) -> Listener {
    Listener::new(window, "pointermove", move |ev: web::Event| {
        let Some(pointer) = ev.dyn_ref::<web::PointerEvent>() else {
            return;
        };
        let target = ev
            .target()
            .and_then(|t| t.dyn_into::<web::Element>().ok());
        let patch = engine
            .borrow_mut()
            .sample(pointer.client_x() as f32, pointer.client_y() as f32, target);
        store.set_state(patch);
    })
}

/// Track the pressed state for the cursor's `Pressed` variant.
pub fn wire_press(window: &web::Window, cursor: Rc<RefCell<ReactiveCursor>>) -> [Listener; 2] {
    let down = cursor.clone();
    let up = cursor;
    [
        Listener::new(window, "pointerdown", move |_ev: web::Event| {
            down.borrow_mut().set_pressed(true);
        }),
        Listener::new(window, "pointerup", move |_ev: web::Event| {
            up.borrow_mut().set_pressed(false);
        }),
    ]
}
