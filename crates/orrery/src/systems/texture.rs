//! Procedural equirectangular surface textures.
//!
//! Column x maps linearly to longitude, row y to latitude (north at row 0).
//! Generation is seeded from the body name, so the same body always yields
//! the same pixels.

use glam::Vec2;
use lyon::math::point;
use lyon::path::iterator::PathIterator;
use lyon::path::{Path, PathEvent};

use crate::core::scene::{BodyKind, BodyRef, CelestialBody, StarSystem, SurfaceStyle};
use crate::renderer::color::Color;
use crate::renderer::pixels::PixelBuffer;
use crate::systems::rng::Rng;

/// Flattening tolerance for the split boundary, in texels.
const BOUNDARY_TOLERANCE: f32 = 0.25;
const SPECKLES_PER_REGION: usize = 220;
const CLOUD_COUNT: usize = 24;
const CRATER_COUNT: usize = 18;

fn vegetation() -> Color {
    Color::rgb8(0x2E, 0x8B, 0x57)
}

/// Generate the texture for a body. Stars have none.
pub fn generate(body: CelestialBody<'_>, width: u32, height: u32) -> Option<PixelBuffer> {
    let style = body.surface()?;
    let mut tex = PixelBuffer::filled(width, height, body.color().to_rgba8());
    if width == 0 || height == 0 {
        return Some(tex);
    }
    let mut rng = Rng::from_name(body.name());

    match resolve_style(style, body.kind()) {
        SurfaceStyle::Split { north, south } => paint_split(&mut tex, &mut rng, *north, *south),
        SurfaceStyle::Clouds => paint_blotches(&mut tex, &mut rng, CLOUD_COUNT, Color::WHITE, 0.35),
        SurfaceStyle::Craters => paint_blotches(&mut tex, &mut rng, CRATER_COUNT, Color::BLACK, 0.5),
        SurfaceStyle::Flat | SurfaceStyle::Auto => {}
    }
    Some(tex)
}

/// Replace `Auto` with the kind's default look.
fn resolve_style(style: &SurfaceStyle, kind: BodyKind) -> &SurfaceStyle {
    match (style, kind) {
        (SurfaceStyle::Auto, BodyKind::Planet) => &SurfaceStyle::Clouds,
        (SurfaceStyle::Auto, BodyKind::Moon) => &SurfaceStyle::Craters,
        (other, _) => other,
    }
}

/// Row of the north/south boundary at every column, sampled from a
/// flattened cubic bezier spanning the full width.
pub fn split_boundary(width: u32, height: u32) -> Vec<f32> {
    let (w, h) = (width as f32, height as f32);
    let mut builder = Path::builder();
    builder.begin(point(0.0, h * 0.5));
    builder.cubic_bezier_to(point(w * 0.3, h * 0.25), point(w * 0.7, h * 0.75), point(w, h * 0.5));
    builder.end(false);
    let path = builder.build();

    let mut polyline = Vec::new();
    for event in path.iter().flattened(BOUNDARY_TOLERANCE) {
        match event {
            PathEvent::Begin { at } => polyline.push(Vec2::new(at.x, at.y)),
            PathEvent::Line { to, .. } => polyline.push(Vec2::new(to.x, to.y)),
            _ => {}
        }
    }

    (0..width)
        .map(|x| {
            let cx = x as f32 + 0.5;
            polyline
                .windows(2)
                .find(|seg| cx >= seg[0].x && cx <= seg[1].x)
                .map(|seg| {
                    let span = seg[1].x - seg[0].x;
                    let t = if span > 0.0 { (cx - seg[0].x) / span } else { 0.0 };
                    seg[0].y + (seg[1].y - seg[0].y) * t
                })
                .unwrap_or(h * 0.5)
        })
        .collect()
}

fn paint_split(tex: &mut PixelBuffer, rng: &mut Rng, north: Color, south: Color) {
    let (w, h) = (tex.width(), tex.height());
    let boundary = split_boundary(w, h);
    let (north_px, south_px) = (north.to_rgba8(), south.to_rgba8());

    for x in 0..w {
        let edge = boundary[x as usize];
        for y in 0..h {
            let fill = if (y as f32 + 0.5) < edge { north_px } else { south_px };
            tex.set(x, y, fill);
        }
    }

    let speckle_north = north.mix(vegetation(), 0.6);
    let speckle_south = south.scaled(1.5);
    for north_region in [true, false] {
        let tint = if north_region { speckle_north } else { speckle_south };
        let mut placed = 0;
        let mut attempts = 0;
        while placed < SPECKLES_PER_REGION && attempts < SPECKLES_PER_REGION * 8 {
            attempts += 1;
            let x = rng.next_int(w);
            let y = rng.next_int(h);
            let in_north = (y as f32 + 0.5) < boundary[x as usize];
            if in_north != north_region {
                continue;
            }
            let radius = rng.range(0.8, 2.2);
            dab(tex, Vec2::new(x as f32, y as f32), radius, tint, 0.9, |px, py| {
                ((py as f32 + 0.5) < boundary[px as usize]) == north_region
            });
            placed += 1;
        }
    }
}

/// Soft round blotches with a linear radial falloff, wrapped horizontally.
fn paint_blotches(tex: &mut PixelBuffer, rng: &mut Rng, count: usize, tint: Color, strength: f32) {
    let (w, h) = (tex.width() as f32, tex.height() as f32);
    for _ in 0..count {
        let center = Vec2::new(rng.range(0.0, w), rng.range(h * 0.1, h * 0.9));
        let radius = rng.range(h * 0.03, h * 0.12);
        dab(tex, center, radius, tint, strength, |_, _| true);
    }
}

/// Blend a radial-falloff disc into the texture. Columns wrap around the
/// seam; rows clip. `keep` masks individual texels.
fn dab(
    tex: &mut PixelBuffer,
    center: Vec2,
    radius: f32,
    tint: Color,
    strength: f32,
    keep: impl Fn(u32, u32) -> bool,
) {
    let (w, h) = (tex.width() as i64, tex.height() as i64);
    let reach = radius.ceil() as i64;
    let (cx, cy) = (center.x.floor() as i64, center.y.floor() as i64);

    for dy in -reach..=reach {
        let y = cy + dy;
        if y < 0 || y >= h {
            continue;
        }
        for dx in -reach..=reach {
            let d = Vec2::new(dx as f32, dy as f32).length();
            if d > radius {
                continue;
            }
            let x = (cx + dx).rem_euclid(w);
            let (px, py) = (x as u32, y as u32);
            if !keep(px, py) {
                continue;
            }
            let alpha = strength * (1.0 - d / radius.max(f32::EPSILON));
            tex.blend(px, py, tint.with_alpha(alpha).to_rgba8());
        }
    }
}

/// Last generated texture, keyed by system, body and size. Regenerated only
/// when the key changes.
#[derive(Debug, Default)]
pub struct TextureCache {
    key: Option<(String, BodyRef, u32, u32)>,
    texture: Option<PixelBuffer>,
    generation: u64,
}

impl TextureCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Texture of `body` in `system`, generating it on a key change.
    /// `None` for stars and unresolvable handles.
    pub fn get_or_generate(
        &mut self,
        system: &StarSystem,
        body: BodyRef,
        width: u32,
        height: u32,
    ) -> Option<&PixelBuffer> {
        let fresh = matches!(
            &self.key,
            Some((name, b, w, h)) if name == &system.name && *b == body && *w == width && *h == height
        );
        if !fresh {
            self.texture = system.body(body).and_then(|b| generate(b, width, height));
            self.key = Some((system.name.clone(), body, width, height));
            self.generation += 1;
            log::debug!("Generated texture for {:?} in '{}'", body, system.name);
        }
        self.texture.as_ref()
    }

    pub fn invalidate(&mut self) {
        self.key = None;
        self.texture = None;
    }

    /// Number of generations so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}
