use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsValue;
use web_sys as web;

use crate::core::{SceneState, TimelineStatus};
use crate::dom;
use crate::input::{self, MouseState};
use crate::render;

/// Everything one host-driven `render()` call needs.
pub struct FrameContext {
    pub scene: Rc<RefCell<SceneState>>,
    pub mouse: Rc<RefCell<MouseState>>,
    pub canvas: web::HtmlCanvasElement,
    pub gpu: Option<render::GpuState<'static>>,
    // Lazily created on the first frame so the initial dt is zero
    pub last_instant: Option<Instant>,
    // Resolver of the Promise returned by the in-flight transition, if any
    pub pending_resolve: Option<js_sys::Function>,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = match self.last_instant.replace(now) {
            Some(prev) => (now - prev).as_secs_f32(),
            None => 0.0,
        };

        let (win_w, win_h) = dom::window_inner_size();
        let ndc = input::mouse_ndc(win_w, win_h, &self.mouse.borrow());

        let width = self.canvas.width();
        let height = self.canvas.height();
        let status = {
            let mut scene = self.scene.borrow_mut();
            scene.set_aspect(width.max(1) as f32 / height.max(1) as f32);
            scene.advance(dt)
        };
        if status == TimelineStatus::Finished {
            if let Some(resolve) = self.pending_resolve.take() {
                _ = resolve.call1(&JsValue::UNDEFINED, &JsValue::TRUE);
            }
        }

        if let Some(g) = &mut self.gpu {
            g.resize_if_needed(width, height);
            let scene = self.scene.borrow();
            let camera = scene.camera(ndc);
            if let Err(e) = g.render(&scene, &camera) {
                log::error!("render error: {:?}", e);
            }
        }
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}
