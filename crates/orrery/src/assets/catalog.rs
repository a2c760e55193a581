use std::collections::HashSet;

use serde::Deserialize;

use crate::api::error::{OrreryError, Result};
use crate::core::scene::StarSystem;

/// The catalog shipped with the crate.
pub const BUILTIN_CATALOG_JSON: &str = include_str!("../../data/systems.json");

/// Catalog of planetary systems. Loaded from JSON.
#[derive(Debug, Clone, Deserialize)]
pub struct SystemCatalog {
    /// Name of the system shown first. Defaults to the first listed.
    #[serde(default)]
    pub default: Option<String>,
    pub systems: Vec<StarSystem>,
}

impl SystemCatalog {
    /// Parse and validate a catalog from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let mut catalog: SystemCatalog = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Enforce the data-model invariants and fill in each moon's parent name.
    fn validate(&mut self) -> Result<()> {
        if self.systems.is_empty() {
            return Err(OrreryError::InvalidCatalog("no systems".into()));
        }

        let mut seen = HashSet::new();
        for system in &mut self.systems {
            if !seen.insert(system.name.clone()) {
                return Err(OrreryError::InvalidCatalog(format!(
                    "duplicate system '{}'",
                    system.name
                )));
            }
            for planet in &mut system.planets {
                if !(planet.orbit_scale.is_finite() && planet.orbit_scale >= 0.0) {
                    return Err(OrreryError::InvalidCatalog(format!(
                        "{}: orbitScale must be a non-negative number, got {}",
                        planet.name, planet.orbit_scale
                    )));
                }
                for moon in &mut planet.moons {
                    if moon.parent_planet.is_empty() {
                        moon.parent_planet = planet.name.clone();
                    } else if moon.parent_planet != planet.name {
                        return Err(OrreryError::InvalidCatalog(format!(
                            "moon '{}' lists parent '{}' but belongs to '{}'",
                            moon.name, moon.parent_planet, planet.name
                        )));
                    }
                }
            }
        }

        if let Some(default) = &self.default {
            if !seen.contains(default) {
                return Err(OrreryError::InvalidCatalog(format!(
                    "default system '{default}' is not listed"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scene::SurfaceStyle;

    #[test]
    fn builtin_catalog_parses() {
        let catalog = SystemCatalog::from_json(BUILTIN_CATALOG_JSON).unwrap();
        assert_eq!(catalog.default.as_deref(), Some("Redo"));
        let redo = &catalog.systems[0];
        assert_eq!(redo.stars.len(), 2);
        assert_eq!(redo.planets.len(), 4);
        assert_eq!(redo.planets[0].moons.len(), 4);
        assert!(matches!(redo.planets[0].surface, SurfaceStyle::Split { .. }));
        assert_eq!(redo.planets[0].layers.len(), 3);
    }

    #[test]
    fn moon_parent_is_filled_from_owner() {
        let catalog = SystemCatalog::from_json(BUILTIN_CATALOG_JSON).unwrap();
        for system in &catalog.systems {
            for planet in &system.planets {
                for moon in &planet.moons {
                    assert_eq!(moon.parent_planet, planet.name);
                }
            }
        }
    }

    #[test]
    fn mismatched_moon_parent_is_rejected() {
        let json = r##"{ "systems": [ { "name": "S", "planets": [
            { "name": "A", "color": "#FFFFFF", "orbitScale": 1, "orbitSpeed": 1,
              "moons": [ { "name": "m", "parentPlanet": "B", "color": "#FFFFFF", "radius": 2 } ] }
        ] } ] }"##;
        let err = SystemCatalog::from_json(json).unwrap_err();
        assert!(matches!(err, OrreryError::InvalidCatalog(_)), "{err}");
    }

    #[test]
    fn negative_orbit_scale_is_rejected() {
        let json = r##"{ "systems": [ { "name": "S", "planets": [
            { "name": "A", "color": "#FFFFFF", "orbitScale": -5, "orbitSpeed": 1 }
        ] } ] }"##;
        assert!(matches!(
            SystemCatalog::from_json(json),
            Err(OrreryError::InvalidCatalog(_))
        ));
    }

    #[test]
    fn duplicate_system_names_are_rejected() {
        let json = r#"{ "systems": [ { "name": "S" }, { "name": "S" } ] }"#;
        assert!(SystemCatalog::from_json(json).is_err());
    }

    #[test]
    fn unknown_default_is_rejected() {
        let json = r#"{ "default": "T", "systems": [ { "name": "S" } ] }"#;
        assert!(SystemCatalog::from_json(json).is_err());
    }

    #[test]
    fn bad_color_is_a_parse_error() {
        let json = r#"{ "systems": [ { "name": "S", "stars": [
            { "name": "X", "color": "blue", "x": 0, "y": 0, "radius": 4 }
        ] } ] }"#;
        assert!(matches!(
            SystemCatalog::from_json(json),
            Err(OrreryError::Catalog(_))
        ));
    }
}
