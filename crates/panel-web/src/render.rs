use crate::dom;
use crate::WebApp;
use glam::{Vec2, Vec3};
use panel_core::{Camera, EntityKind, ViewMode, Viewport};
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

const BACKGROUND: &str = "#f7f7f5";
const FRAME_STROKE: &str = "#8a8a8a";
const PANEL_STROKE: &str = "#2f6fb5";
const OUTLINE_STROKE: &str = "#1c1c1c";
const OUTLINE_FILL: &str = "rgba(47, 111, 181, 0.12)";
const DIMENSION_STROKE: &str = "#c0392b";
const GRID_DOT: &str = "#b9b9b9";
const ARROW_PX: f32 = 8.0;

/// Canvas2D wireframe of the configurator's scene graph.
pub struct WireRenderer {
    ctx: web::CanvasRenderingContext2d,
    // Reused per entity.
    edges: Vec<[Vec3; 2]>,
}

impl WireRenderer {
    pub fn new(canvas: &web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?
            .ok_or_else(|| anyhow::anyhow!("no 2d context"))?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
        Ok(Self {
            ctx,
            edges: Vec::with_capacity(16),
        })
    }

    pub fn draw(&mut self, canvas: &web::HtmlCanvasElement, app: &WebApp) {
        let ctx = &self.ctx;
        let dpr = dom::device_pixel_ratio();
        let _ = ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
        ctx.set_fill_style_str(BACKGROUND);
        ctx.fill_rect(0.0, 0.0, canvas.width() as f64, canvas.height() as f64);
        // Everything below is in CSS pixels.
        let _ = ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);

        let camera = app.camera();
        let viewport = app.viewport();
        if app.context().mode == ViewMode::Sheet {
            self.draw_grid(app, camera, viewport);
        }
        for (_, entity) in app.scene.iter().filter(|(_, e)| e.visible) {
            self.edges.clear();
            entity.world_edges(&mut self.edges);
            match &entity.kind {
                EntityKind::Frame { .. } => {
                    self.stroke_edges(camera, viewport, FRAME_STROKE, 1.0);
                }
                EntityKind::Mesh { .. } => {
                    self.stroke_edges(camera, viewport, PANEL_STROKE, 1.5);
                }
                EntityKind::Outline { .. } => {
                    self.fill_outline(camera, viewport);
                    self.stroke_edges(camera, viewport, OUTLINE_STROKE, 1.5);
                }
                EntityKind::DimensionLine { start, end } => {
                    self.draw_dimension(camera, viewport, *start, *end);
                }
            }
        }
    }

    fn stroke_edges(&self, camera: &Camera, viewport: Viewport, color: &str, width: f64) {
        let ctx = &self.ctx;
        ctx.set_stroke_style_str(color);
        ctx.set_line_width(width);
        ctx.begin_path();
        for [a, b] in &self.edges {
            if let (Some(pa), Some(pb)) = (
                camera.world_to_pixel(*a, viewport),
                camera.world_to_pixel(*b, viewport),
            ) {
                ctx.move_to(pa.x as f64, pa.y as f64);
                ctx.line_to(pb.x as f64, pb.y as f64);
            }
        }
        ctx.stroke();
    }

    // Outline edges are emitted in polygon order, so their starts trace the fill.
    fn fill_outline(&self, camera: &Camera, viewport: Viewport) {
        let ctx = &self.ctx;
        ctx.set_fill_style_str(OUTLINE_FILL);
        ctx.begin_path();
        let mut first = true;
        for [a, _] in &self.edges {
            let Some(p) = camera.world_to_pixel(*a, viewport) else {
                return;
            };
            if first {
                ctx.move_to(p.x as f64, p.y as f64);
                first = false;
            } else {
                ctx.line_to(p.x as f64, p.y as f64);
            }
        }
        ctx.close_path();
        ctx.fill();
    }

    fn draw_dimension(&self, camera: &Camera, viewport: Viewport, start: Vec3, end: Vec3) {
        let (Some(a), Some(b)) = (
            camera.world_to_pixel(start, viewport),
            camera.world_to_pixel(end, viewport),
        ) else {
            return;
        };
        let ctx = &self.ctx;
        ctx.set_stroke_style_str(DIMENSION_STROKE);
        ctx.set_fill_style_str(DIMENSION_STROKE);
        ctx.set_line_width(1.0);
        let dash = js_sys::Array::of2(&JsValue::from_f64(4.0), &JsValue::from_f64(3.0));
        let _ = ctx.set_line_dash(&dash);
        ctx.begin_path();
        ctx.move_to(a.x as f64, a.y as f64);
        ctx.line_to(b.x as f64, b.y as f64);
        ctx.stroke();
        let _ = ctx.set_line_dash(&js_sys::Array::new());
        self.arrow_head(b, a);
        self.arrow_head(a, b);
    }

    // Filled triangle at `tip`, pointing away from `from`.
    fn arrow_head(&self, from: Vec2, tip: Vec2) {
        let dir = (tip - from).normalize_or_zero();
        if dir == Vec2::ZERO {
            return;
        }
        let side = dir.perp() * (ARROW_PX * 0.5);
        let base = tip - dir * ARROW_PX;
        let ctx = &self.ctx;
        ctx.begin_path();
        ctx.move_to(tip.x as f64, tip.y as f64);
        ctx.line_to((base + side).x as f64, (base + side).y as f64);
        ctx.line_to((base - side).x as f64, (base - side).y as f64);
        ctx.close_path();
        ctx.fill();
    }

    fn draw_grid(&self, app: &WebApp, camera: &Camera, viewport: Viewport) {
        let ctx = &self.ctx;
        ctx.set_fill_style_str(GRID_DOT);
        for point in app.snaps().points().filter(|p| p.owner.is_none()) {
            if let Some(px) = camera.world_to_pixel(point.position, viewport) {
                ctx.fill_rect(px.x as f64 - 1.5, px.y as f64 - 1.5, 3.0, 3.0);
            }
        }
    }
}
