//! Lemniscate orbit geometry — pure math, no engine dependencies.
//!
//! Simulation time stays in f64 (wall-clock milliseconds times the time scale
//! is a large number); phases are reduced modulo 2π before dropping to f32.

use std::f64::consts::TAU;

use glam::Vec2;

use crate::core::scene::Planet;

/// Viewport extent at which `orbit_scale` maps 1:1 to canvas pixels.
pub const REFERENCE_VIEWPORT: f32 = 800.0;

/// Normalize an orbit scale to the current viewport.
pub fn viewport_scale(orbit_scale: f32, viewport: Vec2) -> f32 {
    orbit_scale * viewport.x.min(viewport.y) / REFERENCE_VIEWPORT
}

/// Curve parameter `t = time * speed + offset`, reduced into [0, 2π).
pub fn orbital_phase(time: f64, orbit_speed: f32, phase_offset: f32) -> f32 {
    (time * orbit_speed as f64 + phase_offset as f64).rem_euclid(TAU) as f32
}

/// Point on the figure-eight track: `x = a·sin t`, `y = a·sin t·cos t`.
pub fn lemniscate(scale: f32, t: f32) -> Vec2 {
    let s = t.sin();
    Vec2::new(scale * s, scale * s * t.cos())
}

/// Current orbital-plane position of a planet.
pub fn planet_position(planet: &Planet, time: f64, viewport: Vec2) -> Vec2 {
    let scale = viewport_scale(planet.orbit_scale, viewport);
    let t = orbital_phase(time, planet.orbit_speed, planet.phase_offset());
    lemniscate(scale, t)
}

/// Circular moon orbit around the parent's current position, moons evenly
/// phase-spaced: `angle = time·2 + index·(2π / count)`.
pub fn moon_position(parent: Vec2, orbit_radius: f32, index: usize, count: usize, time: f64) -> Vec2 {
    let spacing = if count == 0 { 0.0 } else { TAU / count as f64 };
    let angle = (time * 2.0 + index as f64 * spacing).rem_euclid(TAU) as f32;
    parent + orbit_radius * Vec2::new(angle.cos(), angle.sin())
}

/// Sample one full period of the track. Returns `samples + 1` points; the
/// last repeats the parameter 2π so the path closes on its first point.
pub fn orbit_path(scale: f32, samples: usize) -> Vec<Vec2> {
    let samples = samples.max(1);
    (0..=samples)
        .map(|i| {
            let t = (i as f64 / samples as f64 * TAU) as f32;
            lemniscate(scale, t)
        })
        .collect()
}
