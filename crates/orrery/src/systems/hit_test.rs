//! Pointer picking against the frame layout.
//!
//! The click is brought into canvas space by inverting the camera, then
//! compared with each candidate's forward-projected position. Under the
//! perspective view this is a nearest-match test, not an analytic inverse.

use glam::Vec2;

use crate::core::scene::{BodyRef, StarSystem};
use crate::renderer::projection::apparent_size;
use crate::systems::layout::SceneLayout;

/// Click acceptance radii in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRadii {
    pub planet: f32,
    pub moon: f32,
}

/// Pick the body under `point` (canvas space, camera already inverted).
///
/// Moons win over planets, planets over stars. Planets are tried in reverse
/// declaration order so the one drawn on top wins an overlap. `None` means
/// the click hit empty space.
pub fn pick(
    system: &StarSystem,
    layout: &SceneLayout,
    point: Vec2,
    zoom: f32,
    radii: HitRadii,
) -> Option<BodyRef> {
    let within = |pos: Vec2, base: f32, scale: f32| point.distance(pos) < apparent_size(base, scale, zoom);

    for (pi, planet) in layout.planets.iter().enumerate() {
        for (mi, moon) in planet.moons.iter().enumerate() {
            if within(moon.projected.pos, radii.moon, moon.projected.scale) {
                return Some(BodyRef::Moon { planet: pi, moon: mi });
            }
        }
    }

    for (pi, planet) in layout.planets.iter().enumerate().rev() {
        if within(planet.planet.projected.pos, radii.planet, planet.planet.projected.scale) {
            return Some(BodyRef::Planet(pi));
        }
    }

    system
        .stars
        .iter()
        .zip(&layout.stars)
        .position(|(star, placed)| within(placed.projected.pos, star.radius, placed.projected.scale))
        .map(BodyRef::Star)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::registry::SystemRegistry;
    use crate::renderer::projection::{Projector, ViewMode};

    const VIEWPORT: Vec2 = Vec2::new(800.0, 600.0);
    const RADII: HitRadii = HitRadii {
        planet: 15.0,
        moon: 10.0,
    };

    fn layout_at(system: &StarSystem, mode: ViewMode, time: f64) -> SceneLayout {
        SceneLayout::compute(system, time, VIEWPORT, &Projector::new(mode, VIEWPORT), 15.0)
    }

    #[test]
    fn moon_beats_parent_when_equidistant() {
        let reg = SystemRegistry::builtin().unwrap();
        let sys = reg.default_system();
        let layout = layout_at(sys, ViewMode::Top, 0.0);
        // Zan at the origin, Agape at (15, 0).
        let hit = pick(sys, &layout, Vec2::new(7.5, 0.0), 1.0, RADII);
        assert_eq!(hit, Some(BodyRef::Moon { planet: 0, moon: 0 }));
    }

    #[test]
    fn center_click_selects_primary_planet() {
        let reg = SystemRegistry::builtin().unwrap();
        let sys = reg.default_system();
        let layout = layout_at(sys, ViewMode::Top, 0.0);
        assert_eq!(pick(sys, &layout, Vec2::ZERO, 1.0, RADII), Some(BodyRef::Planet(0)));
    }

    #[test]
    fn empty_space_selects_nothing() {
        let reg = SystemRegistry::builtin().unwrap();
        let sys = reg.default_system();
        let layout = layout_at(sys, ViewMode::Top, 0.0);
        assert_eq!(pick(sys, &layout, Vec2::new(0.0, 250.0), 1.0, RADII), None);
    }

    #[test]
    fn stars_are_hit_by_their_own_radius() {
        let reg = SystemRegistry::builtin().unwrap();
        let sys = reg.default_system();
        let layout = layout_at(sys, ViewMode::Top, 0.0);
        assert_eq!(pick(sys, &layout, Vec2::new(-50.0, 18.0), 1.0, RADII), Some(BodyRef::Star(0)));
        assert_eq!(pick(sys, &layout, Vec2::new(50.0, -22.0), 1.0, RADII), None);
    }

    #[test]
    fn zoom_shrinks_click_radius() {
        let reg = SystemRegistry::builtin().unwrap();
        let sys = reg.default_system();
        let layout = layout_at(sys, ViewMode::Top, 0.0);
        let point = Vec2::new(4.0, 0.0);
        assert_eq!(pick(sys, &layout, point, 1.0, RADII), Some(BodyRef::Planet(0)));
        assert_eq!(pick(sys, &layout, point, 5.0, RADII), None);
    }

    #[test]
    fn later_planet_wins_overlap() {
        let json = r##"{ "systems": [ { "name": "S", "planets": [
            { "name": "Under", "color": "#FFFFFF", "orbitScale": 100, "orbitSpeed": 1 },
            { "name": "Over", "color": "#FFFFFF", "orbitScale": 300, "orbitSpeed": 1 }
        ] } ] }"##;
        let reg = SystemRegistry::from_json(json).unwrap();
        let sys = reg.default_system();
        // Both tracks pass through the origin at t = 0.
        let layout = layout_at(sys, ViewMode::Top, 0.0);
        assert_eq!(pick(sys, &layout, Vec2::new(1.0, 1.0), 1.0, RADII), Some(BodyRef::Planet(1)));
    }

    #[test]
    fn perspective_picks_forward_projected_position() {
        let json = r##"{ "systems": [ { "name": "S", "planets": [
            { "name": "Lone", "color": "#FFFFFF", "orbitScale": 300, "orbitSpeed": 1 }
        ] } ] }"##;
        let reg = SystemRegistry::from_json(json).unwrap();
        let sys = reg.default_system();
        let layout = layout_at(sys, ViewMode::Perspective, 1.0);
        let placed = layout.planets[0].planet;
        // The tilt moves the drawn planet away from its orbital-plane position.
        assert!(placed.projected.pos.distance(placed.orbital) > 20.0);
        assert_eq!(pick(sys, &layout, placed.projected.pos, 1.0, RADII), Some(BodyRef::Planet(0)));
        assert_eq!(pick(sys, &layout, placed.orbital, 1.0, RADII), None);
    }
}
