#![cfg(target_arch = "wasm32")]
use panel_core::{Configurator, PanelId, SceneGraph, Tuning};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

mod dom;
mod events;
mod frame;
mod input;
mod overlay;
mod render;
mod ui;

pub(crate) type WebApp = Configurator<SceneGraph, overlay::DomLabels>;

thread_local! {
    static APP: RefCell<Option<Rc<RefCell<WebApp>>>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("panel-web starting");

    if let Err(e) = init() {
        log::error!("init error: {:?}", e);
    }
    Ok(())
}

fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id("app-canvas")
        .ok_or_else(|| anyhow::anyhow!("missing #app-canvas"))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    let labels_root: web::HtmlElement = document
        .get_element_by_id("dimension-labels")
        .ok_or_else(|| anyhow::anyhow!("missing #dimension-labels"))?
        .dyn_into::<web::HtmlElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    dom::sync_canvas_backing_size(&canvas);
    let labels = overlay::DomLabels::new(document.clone(), labels_root);
    let mut app = Configurator::new(SceneGraph::new(), labels, Tuning::default());
    let css = dom::canvas_css_size(&canvas);
    app.set_viewport(css.x, css.y);
    let app = Rc::new(RefCell::new(app));
    APP.with(|slot| *slot.borrow_mut() = Some(app.clone()));

    let renderer = render::WireRenderer::new(&canvas)?;
    events::wire_resize(canvas.clone(), app.clone());
    events::wire_input_handlers(events::InputWiring {
        canvas: canvas.clone(),
        app: app.clone(),
        pointer: Rc::new(RefCell::new(input::PointerMode::Idle)),
    });
    events::wire_global_keydown(document.clone(), app.clone());
    ui::wire_toolbar(&document);
    ui::refresh(&document, &app.borrow().context());

    frame::start_loop(Rc::new(RefCell::new(frame::FrameContext::new(
        app, canvas, renderer,
    ))));
    log::info!("[init] ready");
    Ok(())
}

// Runs `f` on the live configurator. Errors are surfaced with an alert and
// handed back to the caller as a JS exception.
fn with_app<R>(f: impl FnOnce(&mut WebApp) -> panel_core::Result<R>) -> Result<R, JsValue> {
    let app = APP
        .with(|slot| slot.borrow().clone())
        .ok_or_else(|| JsValue::from_str("configurator not initialised"))?;
    let result = f(&mut app.borrow_mut());
    if let Some(document) = dom::window_document() {
        ui::refresh(&document, &app.borrow().context());
    }
    result.map_err(|e| {
        let msg = e.to_string();
        log::warn!("[ui] {}", msg);
        dom::alert(&msg);
        JsValue::from_str(&msg)
    })
}

#[wasm_bindgen(js_name = createFrame)]
pub fn create_frame(width: f64, height: f64, depth: f64) -> Result<(), JsValue> {
    with_app(|app| app.create_frame(width as f32, height as f32, depth as f32))
}

#[wasm_bindgen(js_name = addPanel)]
pub fn add_panel(
    width: f64,
    height: f64,
    depth: f64,
    kind: Option<String>,
) -> Result<u32, JsValue> {
    with_app(|app| {
        let kind = kind.as_deref().filter(|k| !k.trim().is_empty()).unwrap_or("panel");
        app.add_panel_with_type(width as f32, height as f32, depth as f32, kind)
            .map(|id| id.0)
    })
}

#[wasm_bindgen(js_name = removePanel)]
pub fn remove_panel(id: u32) -> Result<(), JsValue> {
    with_app(|app| app.remove_panel(PanelId(id)))
}

/// Returns the new mode label, "3D" or "2D".
#[wasm_bindgen(js_name = toggleMode)]
pub fn toggle_mode() -> Result<String, JsValue> {
    with_app(|app| Ok(app.toggle_mode().label().to_string()))
}

#[wasm_bindgen(js_name = toggleSnap)]
pub fn toggle_snap() -> Result<bool, JsValue> {
    with_app(|app| Ok(app.toggle_snap()))
}

#[wasm_bindgen(js_name = toggleTransformControls)]
pub fn toggle_transform_controls() -> Result<bool, JsValue> {
    with_app(|app| Ok(app.toggle_transform_controls()))
}
