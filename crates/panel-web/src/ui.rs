use crate::dom;
use panel_core::{EditContext, ViewMode};
use web_sys as web;

/// Hook the toolbar buttons to the exported operations. Failures are already
/// reported by an alert inside those operations.
pub fn wire_toolbar(document: &web::Document) {
    let doc = document.clone();
    dom::add_click_listener(document, "create-frame", move || {
        let _ = crate::create_frame(
            dom::read_number(&doc, "frame-width"),
            dom::read_number(&doc, "frame-height"),
            dom::read_number(&doc, "frame-depth"),
        );
    });
    let doc = document.clone();
    dom::add_click_listener(document, "add-panel", move || {
        let _ = crate::add_panel(
            dom::read_number(&doc, "panel-width"),
            dom::read_number(&doc, "panel-height"),
            dom::read_number(&doc, "panel-depth"),
            dom::read_text(&doc, "panel-type"),
        );
    });
    dom::add_click_listener(document, "toggle-mode", || {
        let _ = crate::toggle_mode();
    });
    dom::add_click_listener(document, "toggle-snap", || {
        let _ = crate::toggle_snap();
    });
    dom::add_click_listener(document, "toggle-transform", || {
        let _ = crate::toggle_transform_controls();
    });
}

/// Reflect the edit context on the toolbar.
pub fn refresh(document: &web::Document, ctx: &EditContext) {
    let target = ctx.mode.toggled().label();
    dom::set_text(document, "toggle-mode", &format!("Switch to {}", target));
    dom::set_text(
        document,
        "toggle-snap",
        if ctx.snap_enabled { "Snap: on" } else { "Snap: off" },
    );
    dom::set_text(
        document,
        "toggle-transform",
        if ctx.transform_enabled { "Scale: on" } else { "Scale: off" },
    );
    dom::set_class(document, "toggle-snap", "active", ctx.snap_enabled);
    dom::set_class(document, "toggle-transform", "active", ctx.transform_enabled);
    dom::set_class(document, "app-canvas", "sheet", ctx.mode == ViewMode::Sheet);
}
