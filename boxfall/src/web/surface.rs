//! Canvas-2D rendering surface with the four lane sprites.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::entity::Lane;
use crate::surface::Surface;

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    // Indexed by column - 1. Images load in the background; drawing an
    // image that has not finished loading is a browser-level no-op.
    sprites: [HtmlImageElement; 4],
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("no 2d context"))?
            .dyn_into()?;
        let sprites = [
            load_sprite("/img/box-red.png")?,
            load_sprite("/img/box-blue.png")?,
            load_sprite("/img/box-yellow.png")?,
            load_sprite("/img/box-green.png")?,
        ];
        Ok(Self {
            canvas,
            ctx,
            sprites,
        })
    }
}

fn load_sprite(src: &str) -> Result<HtmlImageElement, JsValue> {
    let image = HtmlImageElement::new()?;
    image.set_src(src);
    Ok(image)
}

impl Surface for CanvasSurface {
    fn clear(&mut self) {
        self.ctx.clear_rect(
            0.0,
            0.0,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );
    }

    fn fill_rect(&mut self, color: &str, x: f64, y: f64, w: f64, h: f64) {
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(x, y, w, h);
    }

    fn draw_sprite(&mut self, lane: Lane, x: f64, y: f64, w: f64, h: f64) {
        let image = &self.sprites[lane.column() as usize - 1];
        self.ctx
            .draw_image_with_html_image_element_and_dw_and_dh(image, x, y, w, h)
            .ok();
    }

    fn set_alpha(&mut self, alpha: f64) {
        self.ctx.set_global_alpha(alpha);
    }
}
