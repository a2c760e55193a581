//! Per-frame placement of every body: orbital-plane position plus its
//! projection. Shared by the render loop and the hit-tester so clicks are
//! tested against exactly what was drawn.

use glam::Vec2;

use crate::core::orbit;
use crate::core::scene::{BodyRef, StarSystem};
use crate::renderer::projection::{Projected, Projector};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Orbital-plane position.
    pub orbital: Vec2,
    /// Canvas-space projection, before the camera transform.
    pub projected: Projected,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlanetPlacement {
    pub planet: Placement,
    pub moons: Vec<Placement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneLayout {
    pub stars: Vec<Placement>,
    pub planets: Vec<PlanetPlacement>,
}

impl SceneLayout {
    pub fn compute(
        system: &StarSystem,
        time: f64,
        viewport: Vec2,
        projector: &Projector,
        moon_orbit_radius: f32,
    ) -> Self {
        let place = |orbital: Vec2| Placement {
            orbital,
            projected: projector.project(orbital),
        };

        let stars = system.stars.iter().map(|s| place(s.offset())).collect();

        let planets = system
            .planets
            .iter()
            .map(|p| {
                let center = orbit::planet_position(p, time, viewport);
                let count = p.moons.len();
                let moons = (0..count)
                    .map(|i| place(orbit::moon_position(center, moon_orbit_radius, i, count, time)))
                    .collect();
                PlanetPlacement {
                    planet: place(center),
                    moons,
                }
            })
            .collect();

        Self { stars, planets }
    }

    pub fn placement(&self, body: BodyRef) -> Option<&Placement> {
        match body {
            BodyRef::Star(i) => self.stars.get(i),
            BodyRef::Planet(i) => self.planets.get(i).map(|p| &p.planet),
            BodyRef::Moon { planet, moon } => self.planets.get(planet).and_then(|p| p.moons.get(moon)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::registry::SystemRegistry;
    use crate::renderer::projection::ViewMode;

    #[test]
    fn redo_at_time_zero_puts_zan_at_origin() {
        let reg = SystemRegistry::builtin().unwrap();
        let viewport = Vec2::new(800.0, 600.0);
        let proj = Projector::new(ViewMode::Top, viewport);
        let layout = SceneLayout::compute(reg.default_system(), 0.0, viewport, &proj, 15.0);

        assert!(layout.planets[0].planet.orbital.length() < 1e-5);
        assert_eq!(layout.stars[0].projected.pos, Vec2::new(-50.0, 0.0));
        assert_eq!(layout.planets[0].moons.len(), 4);
        for moon in &layout.planets[0].moons {
            assert!((moon.orbital.length() - 15.0).abs() < 1e-3);
        }
    }

    #[test]
    fn placement_matches_body_ref() {
        let reg = SystemRegistry::builtin().unwrap();
        let viewport = Vec2::new(800.0, 600.0);
        let proj = Projector::new(ViewMode::Perspective, viewport);
        let layout = SceneLayout::compute(reg.default_system(), 12.0, viewport, &proj, 15.0);

        let moon = layout.placement(BodyRef::Moon { planet: 1, moon: 2 }).unwrap();
        assert_eq!(*moon, layout.planets[1].moons[2]);
        assert!(layout.placement(BodyRef::Star(9)).is_none());
    }
}
