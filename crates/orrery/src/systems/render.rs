//! Orbit-canvas frame builder.
//!
//! Reads the scene, the frame layout and the camera; writes one `DrawList`.
//! Never mutates camera or selection.

use std::cmp::Ordering;

use glam::Vec2;

use crate::api::config::OrreryConfig;
use crate::core::orbit;
use crate::core::scene::{BodyRef, StarSystem};
use crate::renderer::camera::OrbitCamera;
use crate::renderer::color::Color;
use crate::renderer::draw_list::{DrawList, TextAlign};
use crate::renderer::projection::{apparent_size, Projector};
use crate::systems::layout::SceneLayout;

/// Orbit path alpha of the innermost planet.
pub const ORBIT_ALPHA_NEAR: f32 = 0.35;
/// Orbit path alpha of the outermost planet.
pub const ORBIT_ALPHA_FAR: f32 = 0.08;

const STAR_GLOW: f32 = 20.0;
const PLANET_GLOW: f32 = 10.0;
const STAR_LABEL_GAP: f32 = 15.0;
const BODY_LABEL_GAP: f32 = 5.0;
const STAR_FONT: f32 = 12.0;
const PLANET_FONT: f32 = 12.0;
const MOON_FONT: f32 = 10.0;
/// Highlight ring radius relative to the body's drawn radius.
const HIGHLIGHT_SCALE: f32 = 1.6;
const HIGHLIGHT_WIDTH: f32 = 1.5;

/// Orbit alpha for a planet, fading from near to far across the system's
/// `(min, max)` orbit scale. A single-scale system draws every path at the
/// near alpha.
pub fn orbit_alpha(range: (f32, f32), orbit_scale: f32) -> f32 {
    let (lo, hi) = range;
    if hi - lo <= f32::EPSILON {
        return ORBIT_ALPHA_NEAR;
    }
    let t = ((orbit_scale - lo) / (hi - lo)).clamp(0.0, 1.0);
    ORBIT_ALPHA_NEAR + (ORBIT_ALPHA_FAR - ORBIT_ALPHA_NEAR) * t
}

/// Top-level drawables after z-sorting. Moons ride along with their planet.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Drawable {
    Star(usize),
    Planet(usize),
}

/// Drawn center and radius of a body, in canvas space before the camera.
pub fn drawn_disc(
    system: &StarSystem,
    layout: &SceneLayout,
    body: BodyRef,
    zoom: f32,
    planet_radius: f32,
) -> Option<(Vec2, f32)> {
    let placed = layout.placement(body)?;
    let base = match body {
        BodyRef::Star(i) => system.stars.get(i)?.radius,
        BodyRef::Planet(_) => planet_radius,
        BodyRef::Moon { planet, moon } => system.planets.get(planet)?.moons.get(moon)?.radius,
    };
    Some((
        placed.projected.pos,
        apparent_size(base, placed.projected.scale, zoom),
    ))
}

/// Build the orbit canvas for one frame.
#[allow(clippy::too_many_arguments)]
pub fn build_orbit_frame(
    list: &mut DrawList,
    system: &StarSystem,
    layout: &SceneLayout,
    projector: &Projector,
    camera: &OrbitCamera,
    viewport: Vec2,
    selection: Option<BodyRef>,
    config: &OrreryConfig,
) {
    let zoom = camera.zoom();

    list.clear(config.background);
    list.push_transform(camera.origin(viewport), zoom);

    // Orbit paths
    if let Some(range) = system.orbit_scale_range() {
        for planet in &system.planets {
            let scale = orbit::viewport_scale(planet.orbit_scale, viewport);
            let points = orbit::orbit_path(scale, config.orbit_samples)
                .into_iter()
                .map(|p| projector.project(p).pos)
                .collect();
            let alpha = orbit_alpha(range, planet.orbit_scale);
            list.stroke_polygon(points, 1.0 / zoom, Color::WHITE.with_alpha(alpha));
        }
    }

    let order = z_order(layout);

    for drawable in &order {
        match *drawable {
            Drawable::Star(i) => {
                let star = &system.stars[i];
                if let Some((pos, r)) = drawn_disc(system, layout, BodyRef::Star(i), zoom, config.planet_radius) {
                    list.fill_circle(pos, r, star.color, STAR_GLOW);
                }
            }
            Drawable::Planet(pi) => {
                let planet = &system.planets[pi];
                if let Some((pos, r)) = drawn_disc(system, layout, BodyRef::Planet(pi), zoom, config.planet_radius) {
                    list.fill_circle(pos, r, planet.color, PLANET_GLOW);
                }
                for (mi, moon) in planet.moons.iter().enumerate() {
                    let body = BodyRef::Moon { planet: pi, moon: mi };
                    if let Some((pos, r)) = drawn_disc(system, layout, body, zoom, config.planet_radius) {
                        list.fill_circle(pos, r, moon.color, 0.0);
                    }
                }
            }
        }
    }

    if let Some(body) = selection {
        if let Some((pos, r)) = drawn_disc(system, layout, body, zoom, config.planet_radius) {
            list.stroke_circle(pos, r * HIGHLIGHT_SCALE, HIGHLIGHT_WIDTH / zoom, Color::WHITE);
        }
    }

    // Labels
    for drawable in &order {
        match *drawable {
            Drawable::Star(i) => {
                let star = &system.stars[i];
                let scale = layout.stars[i].projected.scale;
                if let Some((pos, r)) = drawn_disc(system, layout, BodyRef::Star(i), zoom, config.planet_radius) {
                    let gap = apparent_size(STAR_LABEL_GAP, scale, zoom);
                    list.text(
                        pos + Vec2::new(0.0, r + gap),
                        star.name.as_str(),
                        apparent_size(STAR_FONT, scale, zoom),
                        Color::WHITE,
                        TextAlign::Center,
                    );
                }
            }
            Drawable::Planet(pi) => {
                let planet = &system.planets[pi];
                let placed = &layout.planets[pi];
                if let Some((pos, r)) = drawn_disc(system, layout, BodyRef::Planet(pi), zoom, config.planet_radius) {
                    label_above(list, pos, r, &planet.name, PLANET_FONT, placed.planet.projected.scale, zoom);
                }
                for (mi, moon) in planet.moons.iter().enumerate() {
                    let body = BodyRef::Moon { planet: pi, moon: mi };
                    if let Some((pos, r)) = drawn_disc(system, layout, body, zoom, config.planet_radius) {
                        let scale = placed.moons[mi].projected.scale;
                        label_above(list, pos, r, &moon.name, MOON_FONT, scale, zoom);
                    }
                }
            }
        }
    }

    list.pop_transform();
}

fn label_above(list: &mut DrawList, pos: Vec2, radius: f32, name: &str, font: f32, scale: f32, zoom: f32) {
    let gap = apparent_size(BODY_LABEL_GAP, scale, zoom);
    list.text(
        pos - Vec2::new(0.0, radius + gap),
        name,
        apparent_size(font, scale, zoom),
        Color::WHITE,
        TextAlign::Center,
    );
}

/// Stars and planets sorted by projected y ascending. Stable, so ties keep
/// stars before planets and declaration order within each.
fn z_order(layout: &SceneLayout) -> Vec<Drawable> {
    let mut keyed: Vec<(Drawable, f32)> = layout
        .stars
        .iter()
        .enumerate()
        .map(|(i, s)| (Drawable::Star(i), s.projected.pos.y))
        .chain(
            layout
                .planets
                .iter()
                .enumerate()
                .map(|(i, p)| (Drawable::Planet(i), p.planet.projected.pos.y)),
        )
        .collect();
    keyed.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));
    keyed.into_iter().map(|(d, _)| d).collect()
}
