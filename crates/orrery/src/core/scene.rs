//! Scene model: stars, planets and moons of one planetary system.
//!
//! Pure data, loaded once from the catalog and never mutated by viewing.

use std::fmt;
use std::str::FromStr;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::renderer::color::Color;

/// Ordered (label, value) pair shown by the details panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detail {
    pub label: String,
    pub value: String,
}

/// How the procedural texture of a body is painted.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "style", rename_all = "lowercase")]
pub enum SurfaceStyle {
    /// Pick by body kind: clouds for planets, craters for moons.
    #[default]
    Auto,
    /// Hand-authored two-region split along a bezier boundary, each region
    /// speckled with its own vegetation tint.
    Split { north: Color, south: Color },
    /// Flat fill plus soft cloud blotches.
    Clouds,
    /// Flat fill plus dark crater spots.
    Craters,
    /// Flat fill of the body color.
    Flat,
}

/// One concentric shell of a planet's cross-section, outermost first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub name: String,
    pub color: Color,
    /// Outer radius as a fraction of the planet radius (0, 1].
    pub radius: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Star {
    pub name: String,
    pub color: Color,
    /// Offset from the system center in orbital-plane units.
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub details: Vec<Detail>,
}

impl Star {
    pub fn offset(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Moon {
    pub name: String,
    /// Name of the owning planet. Display only; filled in from the owner when
    /// the catalog omits it.
    #[serde(default)]
    pub parent_planet: String,
    pub color: Color,
    pub radius: f32,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub details: Vec<Detail>,
    #[serde(default)]
    pub surface: SurfaceStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Planet {
    pub name: String,
    pub color: Color,
    /// Size of the lemniscate track, before viewport normalization.
    pub orbit_scale: f32,
    /// Angular rate multiplier.
    pub orbit_speed: f32,
    /// Phase offset separating planets that share a track.
    #[serde(default)]
    pub twin_offset: Option<f32>,
    #[serde(default)]
    pub moons: Vec<Moon>,
    #[serde(default)]
    pub moon_scale: f32,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub details: Vec<Detail>,
    #[serde(default)]
    pub surface: SurfaceStyle,
    #[serde(default)]
    pub layers: Vec<Layer>,
}

impl Planet {
    pub fn phase_offset(&self) -> f32 {
        self.twin_offset.unwrap_or(0.0)
    }
}

/// A named bundle of stars and planets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarSystem {
    pub name: String,
    #[serde(default)]
    pub stars: Vec<Star>,
    #[serde(default)]
    pub planets: Vec<Planet>,
}

/// Discriminant of [`CelestialBody`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyKind {
    Star,
    Planet,
    Moon,
}

impl BodyKind {
    pub fn as_str(self) -> &'static str {
        match self {
            BodyKind::Star => "star",
            BodyKind::Planet => "planet",
            BodyKind::Moon => "moon",
        }
    }
}

impl fmt::Display for BodyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BodyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "star" => Ok(BodyKind::Star),
            "planet" => Ok(BodyKind::Planet),
            "moon" => Ok(BodyKind::Moon),
            other => Err(format!("unknown body type '{other}'")),
        }
    }
}

/// Index-based handle to a body inside one [`StarSystem`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyRef {
    Star(usize),
    Planet(usize),
    Moon { planet: usize, moon: usize },
}

impl BodyRef {
    pub fn kind(self) -> BodyKind {
        match self {
            BodyRef::Star(_) => BodyKind::Star,
            BodyRef::Planet(_) => BodyKind::Planet,
            BodyRef::Moon { .. } => BodyKind::Moon,
        }
    }
}

/// A borrowed star, planet or moon. The type of the selection and of
/// hit-test results once resolved against a system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CelestialBody<'a> {
    Star(&'a Star),
    Planet(&'a Planet),
    Moon(&'a Moon),
}

impl<'a> CelestialBody<'a> {
    pub fn kind(&self) -> BodyKind {
        match self {
            CelestialBody::Star(_) => BodyKind::Star,
            CelestialBody::Planet(_) => BodyKind::Planet,
            CelestialBody::Moon(_) => BodyKind::Moon,
        }
    }

    pub fn name(&self) -> &'a str {
        match self {
            CelestialBody::Star(s) => &s.name,
            CelestialBody::Planet(p) => &p.name,
            CelestialBody::Moon(m) => &m.name,
        }
    }

    pub fn color(&self) -> Color {
        match self {
            CelestialBody::Star(s) => s.color,
            CelestialBody::Planet(p) => p.color,
            CelestialBody::Moon(m) => m.color,
        }
    }

    pub fn description(&self) -> &'a str {
        match self {
            CelestialBody::Star(s) => &s.description,
            CelestialBody::Planet(p) => &p.description,
            CelestialBody::Moon(m) => &m.description,
        }
    }

    pub fn details(&self) -> &'a [Detail] {
        match self {
            CelestialBody::Star(s) => &s.details,
            CelestialBody::Planet(p) => &p.details,
            CelestialBody::Moon(m) => &m.details,
        }
    }

    /// Owning planet's name, for moons only.
    pub fn parent_planet(&self) -> Option<&'a str> {
        match self {
            CelestialBody::Moon(m) => Some(&m.parent_planet),
            _ => None,
        }
    }

    pub fn surface(&self) -> Option<&'a SurfaceStyle> {
        match self {
            CelestialBody::Star(_) => None,
            CelestialBody::Planet(p) => Some(&p.surface),
            CelestialBody::Moon(m) => Some(&m.surface),
        }
    }
}

impl StarSystem {
    /// Resolve a handle. `None` if the indices do not exist in this system.
    pub fn body(&self, body: BodyRef) -> Option<CelestialBody<'_>> {
        match body {
            BodyRef::Star(i) => self.stars.get(i).map(CelestialBody::Star),
            BodyRef::Planet(i) => self.planets.get(i).map(CelestialBody::Planet),
            BodyRef::Moon { planet, moon } => self
                .planets
                .get(planet)
                .and_then(|p| p.moons.get(moon))
                .map(CelestialBody::Moon),
        }
    }

    /// Find a body by `(kind, name)`. First match in declaration order.
    pub fn find(&self, kind: BodyKind, name: &str) -> Option<BodyRef> {
        match kind {
            BodyKind::Star => self.stars.iter().position(|s| s.name == name).map(BodyRef::Star),
            BodyKind::Planet => self
                .planets
                .iter()
                .position(|p| p.name == name)
                .map(BodyRef::Planet),
            BodyKind::Moon => self.planets.iter().enumerate().find_map(|(pi, p)| {
                p.moons
                    .iter()
                    .position(|m| m.name == name)
                    .map(|mi| BodyRef::Moon { planet: pi, moon: mi })
            }),
        }
    }

    /// Planet whose layers the cross-section shows when nothing layered is selected.
    pub fn primary_layered_planet(&self) -> Option<usize> {
        self.planets.iter().position(|p| !p.layers.is_empty())
    }

    /// (min, max) orbit scale across all planets, or `None` without planets.
    pub fn orbit_scale_range(&self) -> Option<(f32, f32)> {
        self.planets.iter().map(|p| p.orbit_scale).fold(None, |acc, s| match acc {
            None => Some((s, s)),
            Some((lo, hi)) => Some((lo.min(s), hi.max(s))),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn moon(name: &str, parent: &str) -> Moon {
        Moon {
            name: name.into(),
            parent_planet: parent.into(),
            color: Color::WHITE,
            radius: 3.0,
            description: String::new(),
            details: Vec::new(),
            surface: SurfaceStyle::Auto,
        }
    }

    fn planet(name: &str, scale: f32, moons: Vec<Moon>) -> Planet {
        Planet {
            name: name.into(),
            color: Color::WHITE,
            orbit_scale: scale,
            orbit_speed: 1.0,
            twin_offset: None,
            moons,
            moon_scale: 0.0,
            description: String::new(),
            details: Vec::new(),
            surface: SurfaceStyle::Auto,
            layers: Vec::new(),
        }
    }

    fn sample() -> StarSystem {
        StarSystem {
            name: "Test".into(),
            stars: vec![Star {
                name: "Sol".into(),
                color: Color::WHITE,
                x: 0.0,
                y: 0.0,
                radius: 10.0,
                description: String::new(),
                details: Vec::new(),
            }],
            planets: vec![
                planet("Inner", 100.0, vec![moon("A", "Inner"), moon("B", "Inner")]),
                planet("Outer", 300.0, vec![moon("C", "Outer")]),
            ],
        }
    }

    #[test]
    fn find_resolves_each_kind() {
        let sys = sample();
        assert_eq!(sys.find(BodyKind::Star, "Sol"), Some(BodyRef::Star(0)));
        assert_eq!(sys.find(BodyKind::Planet, "Outer"), Some(BodyRef::Planet(1)));
        assert_eq!(
            sys.find(BodyKind::Moon, "C"),
            Some(BodyRef::Moon { planet: 1, moon: 0 })
        );
    }

    #[test]
    fn find_is_kind_sensitive() {
        let sys = sample();
        assert_eq!(sys.find(BodyKind::Moon, "Sol"), None);
        assert_eq!(sys.find(BodyKind::Planet, "Nowhere"), None);
    }

    #[test]
    fn resolved_moon_reports_parent() {
        let sys = sample();
        let body = sys.body(BodyRef::Moon { planet: 0, moon: 1 }).unwrap();
        assert_eq!(body.kind(), BodyKind::Moon);
        assert_eq!(body.name(), "B");
        assert_eq!(body.parent_planet(), Some("Inner"));
    }

    #[test]
    fn stale_handle_resolves_to_none() {
        let sys = sample();
        assert!(sys.body(BodyRef::Planet(7)).is_none());
        assert!(sys.body(BodyRef::Moon { planet: 1, moon: 4 }).is_none());
    }

    #[test]
    fn orbit_scale_range_spans_planets() {
        assert_eq!(sample().orbit_scale_range(), Some((100.0, 300.0)));
    }

    #[test]
    fn body_kind_parses_wire_names() {
        assert_eq!("moon".parse::<BodyKind>(), Ok(BodyKind::Moon));
        assert!("comet".parse::<BodyKind>().is_err());
        assert_eq!(serde_json::to_string(&BodyKind::Planet).unwrap(), "\"planet\"");
    }
}
