use glam::Vec2;
use panel_core::LabelOverlay;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Dimension labels as absolutely positioned `<div>`s inside a container that
/// sits on top of the canvas.
pub struct DomLabels {
    document: web::Document,
    root: web::HtmlElement,
    nodes: Vec<web::HtmlElement>,
}

impl DomLabels {
    pub fn new(document: web::Document, root: web::HtmlElement) -> Self {
        Self {
            document,
            root,
            nodes: Vec::new(),
        }
    }

    fn node(&mut self, slot: usize) -> Option<&web::HtmlElement> {
        while self.nodes.len() <= slot {
            let el = self
                .document
                .create_element("div")
                .ok()?
                .dyn_into::<web::HtmlElement>()
                .ok()?;
            el.set_class_name("dimension-label");
            self.root.append_child(&el).ok()?;
            self.nodes.push(el);
        }
        self.nodes.get(slot)
    }
}

impl LabelOverlay for DomLabels {
    fn place(&mut self, slot: usize, text: &str, pixel: Option<Vec2>) {
        let Some(el) = self.node(slot) else {
            log::warn!("[dims] could not create label node {}", slot);
            return;
        };
        el.set_text_content(Some(text));
        let style = el.style();
        match pixel {
            Some(px) => {
                let _ = style.set_property("display", "");
                let _ = style.set_property("left", &format!("{:.1}px", px.x));
                let _ = style.set_property("top", &format!("{:.1}px", px.y));
            }
            None => {
                let _ = style.set_property("display", "none");
            }
        }
    }

    fn clear(&mut self) {
        for el in self.nodes.drain(..) {
            el.remove();
        }
    }
}
