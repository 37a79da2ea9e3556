//! Canvas 2D painter for the scene.
//!
//! Only reads the scene; every mutation goes through the editor.

use std::collections::HashMap;
use std::f64::consts::TAU;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement, Path2d};

use crate::error::EditorError;
use crate::scene::{SceneGraph, Shape, ShapeGeometry, HANDLE_SIZE};
use crate::surface::Surface;

pub const TEXT_FONT_SIZE: f64 = 40.0;
pub const TEXT_FONT_FAMILY: &str = "Times New Roman";
pub const TEXT_LINE_HEIGHT: f64 = 1.16;

const SELECTION_COLOR: &str = "#3b82f6";

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
    /// Decoded bitmaps by source URL
    images: HashMap<String, HtmlImageElement>,
}

impl CanvasRenderer {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, EditorError> {
        let ctx = canvas
            .get_context("2d")
            .map_err(EditorError::canvas)?
            .ok_or_else(|| EditorError::Canvas("2d context unavailable".to_string()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| EditorError::Canvas("unexpected context type".to_string()))?;

        Ok(Self {
            ctx,
            width: canvas.width() as f64,
            height: canvas.height() as f64,
            images: HashMap::new(),
        })
    }

    /// Make a decoded bitmap available to image shapes with this URL
    pub fn register_image(&mut self, url: &str, element: HtmlImageElement) {
        self.images.insert(url.to_string(), element);
    }

    /// Repaint the whole scene, then the selection chrome on top
    pub fn draw(&self, scene: &SceneGraph) -> Result<(), EditorError> {
        self.ctx.clear_rect(0.0, 0.0, self.width, self.height);

        for shape in scene.shapes() {
            self.ctx.save();
            let result = self.draw_shape(shape);
            self.ctx.restore();
            result.map_err(EditorError::canvas)?;
        }

        if let Some(shape) = scene.selected().and_then(|id| scene.shape(id)) {
            self.draw_selection(shape, scene);
        }

        Ok(())
    }

    fn draw_shape(&self, shape: &Shape) -> Result<(), wasm_bindgen::JsValue> {
        let ctx = &self.ctx;
        ctx.translate(shape.left(), shape.top())?;
        ctx.scale(shape.scale.x, shape.scale.y)?;
        if let Some(fill) = &shape.fill {
            ctx.set_fill_style_str(fill);
        }

        match &shape.geometry {
            ShapeGeometry::Rectangle { width, height } => {
                ctx.fill_rect(0.0, 0.0, *width, *height);
            }
            ShapeGeometry::Circle { radius } => {
                ctx.begin_path();
                ctx.arc(*radius, *radius, *radius, 0.0, TAU)?;
                ctx.fill();
            }
            ShapeGeometry::TextBox { text, width, .. } => {
                ctx.set_font(&format!("{TEXT_FONT_SIZE}px {TEXT_FONT_FAMILY}"));
                ctx.set_text_baseline("top");
                let measure = |s: &str| {
                    ctx.measure_text(s)
                        .map(|m| m.width())
                        .unwrap_or(s.len() as f64 * TEXT_FONT_SIZE * 0.5)
                };
                for (i, line) in wrap_text(text, *width, measure).iter().enumerate() {
                    ctx.fill_text(line, 0.0, i as f64 * TEXT_FONT_SIZE * TEXT_LINE_HEIGHT)?;
                }
            }
            ShapeGeometry::Path { data, origin, .. } => {
                ctx.translate(-origin.x, -origin.y)?;
                let path = Path2d::new_with_path_string(data)?;
                ctx.fill_with_path_2d(&path);
            }
            ShapeGeometry::Image { url, width, height } => match self.images.get(url) {
                Some(element) => {
                    ctx.draw_image_with_html_image_element_and_dw_and_dh(
                        element, 0.0, 0.0, *width, *height,
                    )?;
                }
                None => log::warn!("image {url} not loaded; skipping"),
            },
        }

        Ok(())
    }

    fn draw_selection(&self, shape: &Shape, scene: &SceneGraph) {
        let ctx = &self.ctx;
        let coords = shape.coords();

        ctx.set_stroke_style_str(SELECTION_COLOR);
        ctx.set_line_width(1.0);
        ctx.stroke_rect(coords.min.x, coords.min.y, coords.width(), coords.height());

        if let Some(handle) = scene.scale_handle() {
            ctx.set_fill_style_str("white");
            ctx.fill_rect(handle.min.x, handle.min.y, HANDLE_SIZE, HANDLE_SIZE);
            ctx.stroke_rect(handle.min.x, handle.min.y, HANDLE_SIZE, HANDLE_SIZE);
        }
    }
}

/// Greedy word wrap. Words wider than `max_width` get a line of their own.
pub fn wrap_text(text: &str, max_width: f64, measure: impl Fn(&str) -> f64) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }

        let candidate = format!("{current} {word}");
        if measure(&candidate) <= max_width {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
