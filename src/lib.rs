#![cfg(target_arch = "wasm32")]
//! Decorative 3D flyby scene for a web page: an accelerating starfield plus an
//! animated plane model, with camera/model tweens choreographing navigation
//! between the page's named sections.

use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

use crate::core::{SceneState, Section, StarSpeed};

mod constants;
mod core;
mod dom;
mod events;
mod frame;
mod input;
mod loader;
mod render;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("flyby-web starting");
    Ok(())
}

/// Handle exported to the host page.
///
/// Construct once with [`SceneApp::create`], call [`SceneApp::render`] every
/// animation frame and [`SceneApp::play_animation`] on section navigation.
#[wasm_bindgen]
pub struct SceneApp {
    ctx: Rc<RefCell<frame::FrameContext>>,
}

#[wasm_bindgen]
impl SceneApp {
    /// Async factory: initializes WebGPU on `canvas`, wires pointer/resize
    /// listeners and starts fetching the plane model in the background.
    pub async fn create(
        canvas: web::HtmlCanvasElement,
        model_url: String,
    ) -> Result<SceneApp, JsValue> {
        dom::wire_canvas_resize(&canvas);
        let aspect = canvas.width().max(1) as f32 / canvas.height().max(1) as f32;

        let scene = Rc::new(RefCell::new(SceneState::new(constants::SCENE_SEED, aspect)));
        let mouse = Rc::new(RefCell::new(input::MouseState::default()));
        events::wire_pointermove(mouse.clone());

        let gpu = frame::init_gpu(&canvas).await;

        {
            let scene = scene.clone();
            spawn_local(async move {
                match loader::load_model(&model_url).await {
                    Ok(model) => {
                        log::info!(
                            "model ready: {} nodes, {} meshes",
                            model.nodes.len(),
                            model.meshes.len()
                        );
                        scene.borrow_mut().plane.install_model(model);
                    }
                    // No retry; the scene keeps running without the plane.
                    Err(e) => log::error!("model load error: {:?}", e),
                }
            });
        }

        let ctx = Rc::new(RefCell::new(frame::FrameContext {
            scene,
            mouse,
            canvas,
            gpu,
            last_instant: None,
            pending_resolve: None,
        }));
        Ok(SceneApp { ctx })
    }

    /// Advance and draw one frame. Call once per host animation frame.
    pub fn render(&self) {
        self.ctx.borrow_mut().frame();
    }

    /// Start the transition choreography for a section change.
    ///
    /// Returns a Promise resolved with `true` when the timeline completes, or
    /// resolved immediately with `undefined` for pairs without authored
    /// choreography.
    pub fn play_animation(&self, from: &str, to: &str) -> js_sys::Promise {
        let ctx = self.ctx.clone();
        let pair = (Section::parse(from), Section::parse(to));
        js_sys::Promise::new(&mut move |resolve, _reject| {
            let started = match pair {
                (Some(f), Some(t)) => {
                    let scene = ctx.borrow().scene.clone();
                    let started = scene.borrow_mut().play(f, t);
                    started
                }
                _ => false,
            };
            if started {
                // A replaced in-flight transition settles its promise with
                // undefined; the new timeline takes over from the current pose.
                let displaced = ctx.borrow_mut().pending_resolve.replace(resolve.clone());
                if let Some(old) = displaced {
                    _ = old.call1(&JsValue::UNDEFINED, &JsValue::UNDEFINED);
                }
            } else {
                _ = resolve.call1(&JsValue::UNDEFINED, &JsValue::UNDEFINED);
            }
        })
    }

    /// Report the pointer position in window CSS pixels. Also fed by the
    /// internally wired `pointermove` listener.
    pub fn set_mouse_pos(&self, x: f32, y: f32) {
        let ctx = self.ctx.borrow();
        let mut mouse = ctx.mouse.borrow_mut();
        mouse.x = x;
        mouse.y = y;
    }

    /// Switch the star field acceleration: `"fast"` or `"slow"`.
    pub fn set_stars_speed(&self, speed: &str) {
        let speed = match speed {
            "fast" => StarSpeed::Fast,
            _ => StarSpeed::Slow,
        };
        self.ctx.borrow().scene.borrow_mut().set_stars_speed(speed);
    }

    /// Re-sync the canvas backing size after a window resize. The surface is
    /// reconfigured on the next `render`.
    pub fn on_window_resize(&self) {
        dom::sync_canvas_backing_size(&self.ctx.borrow().canvas);
    }

    /// True once the plane model has finished loading.
    pub fn is_ready(&self) -> bool {
        self.ctx.borrow().scene.borrow().plane.is_ready()
    }
}
