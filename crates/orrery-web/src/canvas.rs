//! Replays core draw lists and pixel buffers onto a 2D canvas.

use glam::Vec2;
use orrery::{DrawCommand, DrawList, PixelBuffer, TextAlign};
use wasm_bindgen::{Clamped, JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, ImageData};

const TAU: f64 = std::f64::consts::TAU;

/// A canvas element and its 2D context.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Look up a canvas by element id and acquire its 2D context.
    pub fn acquire(document: &Document, id: &str) -> Result<Self, JsValue> {
        let canvas = document
            .get_element_by_id(id)
            .ok_or_else(|| JsValue::from_str(&format!("missing canvas #{id}")))?
            .dyn_into::<HtmlCanvasElement>()?;
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str(&format!("2d context unavailable on #{id}")))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { canvas, ctx })
    }

    /// Match the backing store to the element's layout size and return it.
    pub fn fit_to_client(&self) -> Vec2 {
        let (cw, ch) = (self.canvas.client_width(), self.canvas.client_height());
        if cw > 0 && ch > 0 && (cw as u32 != self.canvas.width() || ch as u32 != self.canvas.height()) {
            self.canvas.set_width(cw as u32);
            self.canvas.set_height(ch as u32);
        }
        Vec2::new(self.canvas.width() as f32, self.canvas.height() as f32)
    }

    pub fn paint(&self, list: &DrawList) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        for command in list.commands() {
            match command {
                DrawCommand::Clear { color } => {
                    ctx.save();
                    ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)?;
                    ctx.set_fill_style_str(&color.to_css());
                    ctx.fill_rect(0.0, 0.0, self.canvas.width() as f64, self.canvas.height() as f64);
                    ctx.restore();
                }
                DrawCommand::PushTransform { translate, scale } => {
                    ctx.save();
                    ctx.translate(translate.x as f64, translate.y as f64)?;
                    ctx.scale(*scale as f64, *scale as f64)?;
                }
                DrawCommand::PopTransform => ctx.restore(),
                DrawCommand::Polyline {
                    points,
                    closed,
                    width,
                    color,
                } => {
                    let Some((first, rest)) = points.split_first() else {
                        continue;
                    };
                    ctx.begin_path();
                    ctx.move_to(first.x as f64, first.y as f64);
                    for p in rest {
                        ctx.line_to(p.x as f64, p.y as f64);
                    }
                    if *closed {
                        ctx.close_path();
                    }
                    ctx.set_stroke_style_str(&color.to_css());
                    ctx.set_line_width(*width as f64);
                    ctx.stroke();
                }
                DrawCommand::FillCircle {
                    center,
                    radius,
                    color,
                    glow,
                } => {
                    let css = color.to_css();
                    ctx.begin_path();
                    ctx.arc(center.x as f64, center.y as f64, radius.max(0.0) as f64, 0.0, TAU)?;
                    ctx.set_fill_style_str(&css);
                    if *glow > 0.0 {
                        ctx.set_shadow_blur(*glow as f64);
                        ctx.set_shadow_color(&css);
                    }
                    ctx.fill();
                    ctx.set_shadow_blur(0.0);
                }
                DrawCommand::StrokeCircle {
                    center,
                    radius,
                    width,
                    color,
                } => {
                    ctx.begin_path();
                    ctx.arc(center.x as f64, center.y as f64, radius.max(0.0) as f64, 0.0, TAU)?;
                    ctx.set_stroke_style_str(&color.to_css());
                    ctx.set_line_width(*width as f64);
                    ctx.stroke();
                }
                DrawCommand::Text {
                    pos,
                    text,
                    size,
                    color,
                    align,
                } => {
                    ctx.set_fill_style_str(&color.to_css());
                    ctx.set_font(&format!("{size}px sans-serif"));
                    ctx.set_text_align(match align {
                        TextAlign::Left => "left",
                        TextAlign::Center => "center",
                        TextAlign::Right => "right",
                    });
                    ctx.fill_text(text, pos.x as f64, pos.y as f64)?;
                }
            }
        }
        Ok(())
    }

    /// Blit a pixel buffer at the canvas origin.
    pub fn put_pixels(&self, buffer: &PixelBuffer) -> Result<(), JsValue> {
        if buffer.width() == 0 || buffer.height() == 0 {
            return Ok(());
        }
        let image =
            ImageData::new_with_u8_clamped_array_and_sh(Clamped(buffer.as_bytes()), buffer.width(), buffer.height())?;
        self.ctx.put_image_data(&image, 0.0, 0.0)
    }
}
