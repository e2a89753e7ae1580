use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::input::MouseState;

/// Track the pointer over the whole window; the frame loop reads the shared
/// state to derive the camera offset.
pub fn wire_pointermove(mouse: Rc<RefCell<MouseState>>) {
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let mut ms = mouse.borrow_mut();
        ms.x = ev.client_x() as f32;
        ms.y = ev.client_y() as f32;
    }) as Box<dyn FnMut(_)>);
    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}
