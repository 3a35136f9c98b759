use crate::dom;
use crate::render::WireRenderer;
use crate::WebApp;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

const STATS_INTERVAL_SECS: f32 = 10.0;

pub struct FrameContext {
    pub app: Rc<RefCell<WebApp>>,
    pub canvas: web::HtmlCanvasElement,
    pub renderer: WireRenderer,

    pub last_instant: Instant,
    pub stats_elapsed: f32,
    pub stats_frames: u32,
}

impl FrameContext {
    pub fn new(
        app: Rc<RefCell<WebApp>>,
        canvas: web::HtmlCanvasElement,
        renderer: WireRenderer,
    ) -> Self {
        Self {
            app,
            canvas,
            renderer,
            last_instant: Instant::now(),
            stats_elapsed: 0.0,
            stats_frames: 0,
        }
    }

    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant).as_secs_f32();
        self.last_instant = now;

        // Layout changes that do not fire `resize` (e.g. a toolbar wrapping).
        let css = dom::canvas_css_size(&self.canvas);
        let Ok(mut app) = self.app.try_borrow_mut() else {
            return;
        };
        let vp = app.viewport();
        if (css.x - vp.width).abs() > 0.5 || (css.y - vp.height).abs() > 0.5 {
            dom::sync_canvas_backing_size(&self.canvas);
            app.set_viewport(css.x, css.y);
        }
        self.renderer.draw(&self.canvas, &app);

        self.stats_elapsed += dt_sec;
        self.stats_frames += 1;
        if self.stats_elapsed >= STATS_INTERVAL_SECS {
            log::debug!(
                "[frame] {:.1} fps, {} entities, {} panels",
                self.stats_frames as f32 / self.stats_elapsed,
                app.scene.len(),
                app.panels().len()
            );
            self.stats_elapsed = 0.0;
            self.stats_frames = 0;
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        if let (Some(w), Some(cb)) = (web::window(), tick_clone.borrow().as_ref()) {
            let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut()>));
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
