use serde::Deserialize;

use crate::api::error::{OrreryError, Result};
use crate::renderer::camera::ZoomLimits;
use crate::renderer::color::Color;

/// Tunables for the orrery, provided by the host (all fields optional in JSON).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OrreryConfig {
    /// Lower zoom bound (default: 0.5).
    pub zoom_min: f32,
    /// Upper zoom bound (default: 5.0).
    pub zoom_max: f32,
    /// Multiplicative zoom per step or wheel tick (default: 1.2).
    pub zoom_step: f32,
    /// Simulation units per wall-clock millisecond (default: 0.0005).
    pub time_scale: f64,
    /// Pointer travel in pixels before a press becomes a drag (default: 5).
    pub drag_threshold: f32,
    /// Sphere rotation in radians per dragged pixel (default: 0.01).
    pub sphere_sensitivity: f32,
    /// Planet disc radius in pixels (default: 8).
    pub planet_radius: f32,
    /// Planet click acceptance radius in pixels (default: 15).
    pub planet_click_radius: f32,
    /// Moon click acceptance radius in pixels (default: 10).
    pub moon_click_radius: f32,
    /// Moon orbit radius around its planet, orbital-plane units (default: 15).
    pub moon_orbit_radius: f32,
    /// Orbit path samples per period (default: 628, a 0.01 rad step).
    pub orbit_samples: usize,
    /// Equirectangular texture width (default: 512).
    pub texture_width: u32,
    /// Equirectangular texture height (default: 256).
    pub texture_height: u32,
    /// Canvas clear color (default: #0f172a).
    pub background: Color,
}

impl Default for OrreryConfig {
    fn default() -> Self {
        Self {
            zoom_min: 0.5,
            zoom_max: 5.0,
            zoom_step: 1.2,
            time_scale: 0.0005,
            drag_threshold: 5.0,
            sphere_sensitivity: 0.01,
            planet_radius: 8.0,
            planet_click_radius: 15.0,
            moon_click_radius: 10.0,
            moon_orbit_radius: 15.0,
            orbit_samples: 628,
            texture_width: 512,
            texture_height: 256,
            background: Color::BACKGROUND,
        }
    }
}

impl OrreryConfig {
    /// Parse overrides from JSON. Blank input yields the defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the camera, clock and texture generator cannot work with.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| -> Result<()> { Err(OrreryError::InvalidConfig(msg)) };
        let floats = [
            ("zoomMin", self.zoom_min),
            ("zoomMax", self.zoom_max),
            ("zoomStep", self.zoom_step),
            ("dragThreshold", self.drag_threshold),
            ("sphereSensitivity", self.sphere_sensitivity),
            ("planetRadius", self.planet_radius),
            ("planetClickRadius", self.planet_click_radius),
            ("moonClickRadius", self.moon_click_radius),
            ("moonOrbitRadius", self.moon_orbit_radius),
        ];
        if let Some((name, value)) = floats.iter().find(|(_, v)| !v.is_finite()) {
            return invalid(format!("{name} must be finite, got {value}"));
        }
        if !self.time_scale.is_finite() {
            return invalid(format!("timeScale must be finite, got {}", self.time_scale));
        }
        if !(self.zoom_min > 0.0 && self.zoom_min <= self.zoom_max) {
            return invalid(format!(
                "zoom bounds must satisfy 0 < zoomMin <= zoomMax, got [{}, {}]",
                self.zoom_min, self.zoom_max
            ));
        }
        if self.zoom_step <= 1.0 {
            return invalid(format!("zoomStep must be greater than 1, got {}", self.zoom_step));
        }
        if self.texture_width == 0 || self.texture_height == 0 {
            return invalid(format!(
                "texture size must be non-zero, got {}x{}",
                self.texture_width, self.texture_height
            ));
        }
        Ok(())
    }

    pub fn zoom_limits(&self) -> ZoomLimits {
        ZoomLimits {
            min: self.zoom_min,
            max: self.zoom_max,
            step: self.zoom_step,
        }
    }
}
