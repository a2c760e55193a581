//! Rotatable sphere view: orthographic projection of an equirectangular
//! texture onto a disc, one texture column slice per screen column.

use std::f32::consts::{PI, TAU};

use crate::core::scene::CelestialBody;
use crate::renderer::color::Color;
use crate::renderer::pixels::PixelBuffer;

/// Gap between the disc and the canvas edge, in pixels.
const SPHERE_MARGIN: f32 = 10.0;

/// Accumulated drag rotation of the sphere view. Persists across frames.
#[derive(Debug, Clone, PartialEq)]
pub struct SphereView {
    rotation: f32,
    sensitivity: f32,
    last_x: Option<f32>,
}

impl SphereView {
    pub fn new(sensitivity: f32) -> Self {
        Self {
            rotation: 0.0,
            sensitivity,
            last_x: None,
        }
    }

    /// Rotation in radians, always within (-2π, 2π).
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    /// Rotate by a horizontal pointer delta in pixels.
    pub fn drag(&mut self, dx: f32) {
        if dx.is_finite() {
            self.rotation = (self.rotation + dx * self.sensitivity) % TAU;
        }
    }

    pub fn press(&mut self, x: f32) {
        self.last_x = Some(x);
    }

    pub fn move_to(&mut self, x: f32) {
        if let Some(last) = self.last_x {
            self.drag(x - last);
            self.last_x = Some(x);
        }
    }

    pub fn release(&mut self) {
        self.last_x = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.last_x.is_some()
    }
}

/// Disc radius for a canvas of the given size.
pub fn sphere_radius(width: u32, height: u32) -> f32 {
    (width.min(height) as f32 / 2.0 - SPHERE_MARGIN).max(0.0)
}

/// Texture column offset for a rotation, quantized to whole texels.
///
/// `r` and `r + 2π` give the same shift for every `r` in (-2π, 2π), the range
/// [`SphereView`] keeps. Outside it `r + 2π` loses low bits in f32 and the two
/// can still land on opposite sides of a texel boundary.
pub fn rotation_shift(rotation: f32, texture_width: u32) -> i64 {
    if texture_width == 0 {
        return 0;
    }
    // Re-adding a full turn rounds the wrapped value onto the same f32 grid
    // that `r + 2π` was rounded onto.
    let wrapped = (rotation.rem_euclid(TAU) + TAU) - TAU;
    let pos = wrapped as f64 / TAU as f64 * texture_width as f64;
    (pos.round() as i64).rem_euclid(texture_width as i64)
}

/// Rasterize the sphere view. Without a body the canvas is just background.
pub fn render_sphere(
    width: u32,
    height: u32,
    body: Option<CelestialBody<'_>>,
    texture: Option<&PixelBuffer>,
    rotation: f32,
    background: Color,
) -> PixelBuffer {
    let mut out = PixelBuffer::filled(width, height, background.to_rgba8());
    let radius = sphere_radius(width, height);
    if radius <= 0.0 {
        return out;
    }
    match (body, texture) {
        (Some(CelestialBody::Star(star)), _) => paint_glow(&mut out, radius, star.color),
        (Some(_), Some(tex)) => paint_textured(&mut out, radius, tex, rotation),
        _ => {}
    }
    out
}

fn paint_glow(out: &mut PixelBuffer, radius: f32, color: Color) {
    let (cx, cy) = (out.width() as f32 / 2.0, out.height() as f32 / 2.0);
    for y in 0..out.height() {
        for x in 0..out.width() {
            let d = ((x as f32 + 0.5 - cx).powi(2) + (y as f32 + 0.5 - cy).powi(2)).sqrt() / radius;
            if d > 1.0 {
                continue;
            }
            // White core, body color mid-way, fading out at the rim.
            let tint = if d < 0.3 {
                Color::WHITE.mix(color, d / 0.3)
            } else {
                color.with_alpha(1.0 - (d - 0.3) / 0.7)
            };
            out.blend(x, y, tint.to_rgba8());
        }
    }
}

fn paint_textured(out: &mut PixelBuffer, radius: f32, tex: &PixelBuffer, rotation: f32) {
    let (tw, th) = (tex.width(), tex.height());
    if tw == 0 || th == 0 {
        return;
    }
    let (cx, cy) = (out.width() as f32 / 2.0, out.height() as f32 / 2.0);
    let shift = rotation_shift(rotation, tw);
    let span = radius.ceil() as i64;

    for i in -span..span {
        let x_off = i as f32 + 0.5;
        let x_norm = x_off / radius;
        if x_norm.abs() >= 1.0 {
            continue;
        }
        let screen_x = (cx + x_off).floor();
        if screen_x < 0.0 || screen_x >= out.width() as f32 {
            continue;
        }

        let z = (1.0 - x_norm * x_norm).sqrt();
        let longitude = x_norm.atan2(z);
        let base = ((longitude + PI) / TAU * tw as f32).floor() as i64;
        let u = (base - shift).rem_euclid(tw as i64) as u32;

        let half = radius * z;
        let top = cy - half;
        let y_start = top.ceil().max(0.0) as u32;
        let y_end = (cy + half).floor().min(out.height() as f32 - 1.0);
        if y_end < 0.0 {
            continue;
        }
        for y in y_start..=y_end as u32 {
            let v_norm = ((y as f32 + 0.5 - top) / (2.0 * half)).clamp(0.0, 1.0);
            let v = ((v_norm * th as f32) as u32).min(th - 1);
            if let Some(px) = tex.get(u, v) {
                out.set(screen_x as u32, y, px);
            }
        }
    }
}
