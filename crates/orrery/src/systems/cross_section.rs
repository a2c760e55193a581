//! Cut-away view of a planet's concentric layers.

use glam::Vec2;

use crate::core::scene::{BodyRef, Planet, StarSystem};
use crate::renderer::color::Color;
use crate::renderer::draw_list::{DrawList, TextAlign};

const EDGE_MARGIN: f32 = 20.0;
const LABEL_SIZE: f32 = 14.0;

/// Planet the cross-section depicts: the selected planet (or a selected
/// moon's parent) when it has layers, else the system's primary layered planet.
pub fn depicted_planet(system: &StarSystem, selection: Option<BodyRef>) -> Option<usize> {
    let selected = match selection {
        Some(BodyRef::Planet(i)) => Some(i),
        Some(BodyRef::Moon { planet, .. }) => Some(planet),
        _ => None,
    };
    selected
        .filter(|&i| system.planets.get(i).is_some_and(|p| !p.layers.is_empty()))
        .or_else(|| system.primary_layered_planet())
}

/// Draw the layers of `planet` centered in a canvas of `viewport` size.
/// Layers are drawn outermost first, each labelled, then outlined.
pub fn build_cross_section(list: &mut DrawList, planet: Option<&Planet>, viewport: Vec2, background: Color) {
    list.clear(background);
    let Some(planet) = planet else {
        return;
    };
    let center = viewport / 2.0;
    let outer = (viewport.x.min(viewport.y) / 2.0 - EDGE_MARGIN).max(0.0);
    if outer <= 0.0 || planet.layers.is_empty() {
        return;
    }

    let last = planet.layers.len() - 1;
    for (i, layer) in planet.layers.iter().enumerate() {
        let radius = outer * layer.radius;
        list.fill_circle(center, radius, layer.color, 0.0);
        // Innermost label sits at the center; outer ones step down inside their shell.
        let drop = if i == last { 0.0 } else { radius / (2.0 + 0.5 * i as f32) };
        list.text(
            center + Vec2::new(0.0, drop),
            layer.name.as_str(),
            LABEL_SIZE,
            Color::WHITE,
            TextAlign::Center,
        );
    }
    list.stroke_circle(center, outer, 1.0, Color::WHITE);
}

/// Cross-section canvas, rebuilt only when the depicted planet or the canvas
/// size changes.
#[derive(Debug, Default)]
pub struct CrossSection {
    key: Option<(String, Option<usize>, u32, u32)>,
    list: DrawList,
}

impl CrossSection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild if stale. Returns the new list when it was rebuilt.
    pub fn refresh(
        &mut self,
        system: &StarSystem,
        selection: Option<BodyRef>,
        viewport: Vec2,
        background: Color,
    ) -> Option<&DrawList> {
        let planet = depicted_planet(system, selection);
        let (w, h) = (viewport.x.max(0.0) as u32, viewport.y.max(0.0) as u32);
        let fresh = matches!(
            &self.key,
            Some((name, p, kw, kh)) if name == &system.name && *p == planet && *kw == w && *kh == h
        );
        if fresh {
            return None;
        }
        self.list = DrawList::new();
        build_cross_section(&mut self.list, planet.and_then(|i| system.planets.get(i)), viewport, background);
        self.key = Some((system.name.clone(), planet, w, h));
        Some(&self.list)
    }

    pub fn invalidate(&mut self) {
        self.key = None;
    }

    pub fn list(&self) -> &DrawList {
        &self.list
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::registry::SystemRegistry;
    use crate::renderer::draw_list::DrawCommand;

    #[test]
    fn falls_back_to_primary_planet() {
        let reg = SystemRegistry::builtin().unwrap();
        let sys = reg.default_system();
        assert_eq!(depicted_planet(sys, None), Some(0));
        assert_eq!(depicted_planet(sys, Some(BodyRef::Planet(2))), Some(0));
        assert_eq!(depicted_planet(sys, Some(BodyRef::Star(0))), Some(0));
        assert_eq!(depicted_planet(sys, Some(BodyRef::Moon { planet: 0, moon: 3 })), Some(0));
    }

    #[test]
    fn draws_every_layer_with_label_and_outline() {
        let reg = SystemRegistry::builtin().unwrap();
        let zan = &reg.default_system().planets[0];
        let mut list = DrawList::new();
        build_cross_section(&mut list, Some(zan), Vec2::new(400.0, 300.0), Color::BACKGROUND);

        let labels: Vec<&str> = list.texts().collect();
        assert_eq!(labels, ["Hades Ocean", "Death Region", "Zan Region"]);

        let radii: Vec<f32> = list
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillCircle { radius, .. } => Some(*radius),
                _ => None,
            })
            .collect();
        assert_eq!(radii.len(), 3);
        assert!((radii[0] - 130.0).abs() < 1e-4);
        assert!((radii[1] - 117.0).abs() < 1e-3);
        assert!((radii[2] - 78.0).abs() < 1e-3);
        assert!(matches!(list.commands().last(), Some(DrawCommand::StrokeCircle { .. })));
    }

    #[test]
    fn rebuilds_only_on_change() {
        let reg = SystemRegistry::builtin().unwrap();
        let sys = reg.default_system();
        let mut section = CrossSection::new();
        let size = Vec2::new(300.0, 300.0);

        assert!(section.refresh(sys, None, size, Color::BACKGROUND).is_some());
        assert!(section.refresh(sys, Some(BodyRef::Planet(0)), size, Color::BACKGROUND).is_none());
        assert!(section.refresh(sys, None, Vec2::new(320.0, 300.0), Color::BACKGROUND).is_some());

        let vela = reg.get("Vela Survey").unwrap();
        let rebuilt = section.refresh(vela, None, Vec2::new(320.0, 300.0), Color::BACKGROUND).unwrap();
        // No layered planet there: background only.
        assert_eq!(rebuilt.len(), 1);
    }
}
