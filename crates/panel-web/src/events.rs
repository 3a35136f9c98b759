use crate::dom;
use crate::input::{self, PointerMode};
use crate::ui;
use crate::WebApp;
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub app: Rc<RefCell<WebApp>>,
    pub pointer: Rc<RefCell<PointerMode>>,
}

fn listen<E: wasm_bindgen::convert::FromWasmAbi + 'static>(
    target: &web::EventTarget,
    event: &str,
    handler: impl FnMut(E) + 'static,
) {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    let _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();
}

pub fn handle_pointer_down(ev: &web::PointerEvent, w: &InputWiring) {
    let px = input::pointer_canvas_css(ev, &w.canvas);
    let mut app = w.app.borrow_mut();
    let mode = if ev.shift_key() && app.context().transform_enabled {
        match app.pick_panel(px) {
            Some(id) if app.begin_scale(id) => {
                let base = app
                    .panel(id)
                    .map(|p| p.placement().scale)
                    .unwrap_or(glam::Vec3::ONE);
                PointerMode::Scale { start: px, base }
            }
            _ => PointerMode::Orbit { last: px },
        }
    } else if app.pointer_down(px).is_some() {
        PointerMode::Panel
    } else {
        PointerMode::Orbit { last: px }
    };
    *w.pointer.borrow_mut() = mode;
    let _ = w.canvas.set_pointer_capture(ev.pointer_id());
}

pub fn handle_pointer_move(ev: &web::PointerEvent, w: &InputWiring) {
    let px = input::pointer_canvas_css(ev, &w.canvas);
    let mut pointer = w.pointer.borrow_mut();
    let mut app = w.app.borrow_mut();
    match *pointer {
        PointerMode::Idle => {}
        PointerMode::Panel => {
            app.pointer_move(px);
        }
        PointerMode::Scale { start, base } => {
            let factor = input::scale_factor(px.x - start.x);
            app.scale_to(input::scaled(base, factor));
        }
        PointerMode::Orbit { last } => {
            let d = px - last;
            app.orbit(-d.x * input::ORBIT_RAD_PER_PX, d.y * input::ORBIT_RAD_PER_PX);
            *pointer = PointerMode::Orbit { last: px };
        }
    }
}

pub fn handle_pointer_end(ev: &web::PointerEvent, w: &InputWiring, leave: bool) {
    let mode = std::mem::take(&mut *w.pointer.borrow_mut());
    let mut app = w.app.borrow_mut();
    match mode {
        PointerMode::Idle | PointerMode::Orbit { .. } => {}
        PointerMode::Panel if leave => {
            app.pointer_leave();
        }
        PointerMode::Panel => {
            app.pointer_up();
        }
        PointerMode::Scale { .. } => {
            app.end_scale();
        }
    }
    let _ = w.canvas.release_pointer_capture(ev.pointer_id());
}

pub fn wire_input_handlers(w: InputWiring) {
    let w = Rc::new(w);
    let target: &web::EventTarget = w.canvas.as_ref();

    let wd = w.clone();
    listen(target, "pointerdown", move |ev: web::PointerEvent| {
        handle_pointer_down(&ev, &wd);
    });
    let wm = w.clone();
    listen(target, "pointermove", move |ev: web::PointerEvent| {
        handle_pointer_move(&ev, &wm);
    });
    let wu = w.clone();
    listen(target, "pointerup", move |ev: web::PointerEvent| {
        handle_pointer_end(&ev, &wu, false);
    });
    let wl = w.clone();
    listen(target, "pointerleave", move |ev: web::PointerEvent| {
        handle_pointer_end(&ev, &wl, true);
    });
    let wz = w.clone();
    listen(target, "wheel", move |ev: web::WheelEvent| {
        wz.app.borrow_mut().zoom(input::wheel_factor(ev.delta_y()));
        ev.prevent_default();
    });
}

pub fn handle_global_keydown(
    ev: &web::KeyboardEvent,
    document: &web::Document,
    app: &Rc<RefCell<WebApp>>,
) {
    // Typing into the toolbar inputs must not trigger shortcuts.
    if ev
        .target()
        .and_then(|t| t.dyn_into::<web::HtmlInputElement>().ok())
        .is_some()
    {
        return;
    }
    let handled = {
        let mut app = app.borrow_mut();
        match ev.key().as_str() {
            "m" | "M" => {
                app.toggle_mode();
                true
            }
            "s" | "S" => {
                app.toggle_snap();
                true
            }
            "t" | "T" => {
                app.toggle_transform_controls();
                true
            }
            _ => false,
        }
    };
    if handled {
        ui::refresh(document, &app.borrow().context());
        ev.prevent_default();
    }
}

pub fn wire_global_keydown(document: web::Document, app: Rc<RefCell<WebApp>>) {
    if let Some(window) = web::window() {
        listen(window.as_ref(), "keydown", move |ev: web::KeyboardEvent| {
            handle_global_keydown(&ev, &document, &app);
        });
    }
}

pub fn wire_resize(canvas: web::HtmlCanvasElement, app: Rc<RefCell<WebApp>>) {
    if let Some(window) = web::window() {
        listen(window.as_ref(), "resize", move |_: web::Event| {
            dom::sync_canvas_backing_size(&canvas);
            let css: Vec2 = dom::canvas_css_size(&canvas);
            app.borrow_mut().set_viewport(css.x, css.y);
        });
    }
}
