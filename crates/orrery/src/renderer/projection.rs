//! Pseudo-3D projection of orbital-plane points.
//!
//! Camera pan/zoom are not applied here; the render loop applies them as a
//! canvas transform so that the projection of the origin is always the origin.

use std::f32::consts::FRAC_PI_4;
use std::fmt;
use std::str::FromStr;

use glam::{Mat3, Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Fixed tilt of the perspective view around the x-axis.
pub const PERSPECTIVE_TILT: f32 = FRAC_PI_4;

/// Smallest allowed `fov + depth` before the pinhole divide.
const MIN_DEPTH: f32 = 1e-3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Looking straight down on the orbital plane.
    #[default]
    Top,
    /// Plane tilted 45° away from the viewer with a pinhole divide.
    Perspective,
    /// Edge-on: screen Y is the out-of-plane axis. Every body currently has
    /// z = 0, so everything lands on one horizontal line.
    Side,
}

impl ViewMode {
    pub const ALL: [ViewMode; 3] = [ViewMode::Top, ViewMode::Perspective, ViewMode::Side];

    pub fn as_str(self) -> &'static str {
        match self {
            ViewMode::Top => "top",
            ViewMode::Perspective => "perspective",
            ViewMode::Side => "side",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top" => Ok(ViewMode::Top),
            "perspective" => Ok(ViewMode::Perspective),
            "side" => Ok(ViewMode::Side),
            other => Err(format!("unknown view mode '{other}'")),
        }
    }
}

/// A projected point: canvas-space position (before camera transform) and
/// the apparent-size factor at that point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    pub pos: Vec2,
    pub scale: f32,
}

/// Projects orbital-plane points for one view mode and viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projector {
    mode: ViewMode,
    /// Focal length; the canvas width.
    fov: f32,
    tilt: Mat3,
}

impl Projector {
    pub fn new(mode: ViewMode, viewport: Vec2) -> Self {
        Self {
            mode,
            fov: viewport.x.max(1.0),
            tilt: Mat3::from_rotation_x(PERSPECTIVE_TILT),
        }
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    /// Project an orbital-plane point (z = 0).
    pub fn project(&self, point: Vec2) -> Projected {
        self.project3(point.extend(0.0))
    }

    pub fn project3(&self, point: Vec3) -> Projected {
        match self.mode {
            ViewMode::Top => Projected {
                pos: point.truncate(),
                scale: 1.0,
            },
            ViewMode::Side => Projected {
                pos: Vec2::new(point.x, point.z),
                scale: 1.0,
            },
            ViewMode::Perspective => {
                let rotated = self.tilt * point;
                let perspective = self.fov / (self.fov + rotated.z).max(MIN_DEPTH);
                Projected {
                    pos: Vec2::new(point.x * perspective, rotated.y * perspective),
                    scale: perspective,
                }
            }
        }
    }
}

/// On-screen size of something `base` pixels large at projected `scale`,
/// compensated for camera zoom so its apparent weight stays constant.
pub fn apparent_size(base: f32, scale: f32, zoom: f32) -> f32 {
    base * scale / zoom
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Vec2 = Vec2::new(800.0, 600.0);

    #[test]
    fn top_is_identity() {
        let proj = Projector::new(ViewMode::Top, VIEWPORT);
        for p in [Vec2::new(12.5, -40.0), Vec2::ZERO, Vec2::new(-300.0, 7.0)] {
            let out = proj.project(p);
            assert_eq!(out.pos, p);
            assert_eq!(out.scale, 1.0);
        }
    }

    #[test]
    fn side_collapses_plane_onto_one_line() {
        let proj = Projector::new(ViewMode::Side, VIEWPORT);
        let a = proj.project(Vec2::new(30.0, 90.0));
        let b = proj.project(Vec2::new(-10.0, -45.0));
        assert_eq!(a.pos, Vec2::new(30.0, 0.0));
        assert_eq!(b.pos.y, 0.0);
    }

    #[test]
    fn perspective_fixes_origin() {
        let proj = Projector::new(ViewMode::Perspective, VIEWPORT);
        let out = proj.project(Vec2::ZERO);
        assert!(out.pos.length() < 1e-6);
        assert!((out.scale - 1.0).abs() < 1e-6);
    }

    #[test]
    fn perspective_foreshortens_and_shrinks_far_side() {
        let proj = Projector::new(ViewMode::Perspective, VIEWPORT);
        let near = proj.project(Vec2::new(0.0, -100.0));
        let far = proj.project(Vec2::new(0.0, 100.0));
        // Tilt compresses the plane vertically.
        assert!(far.pos.y.abs() < 100.0);
        // Points rotated away from the viewer shrink.
        assert!(far.scale < 1.0);
        assert!(near.scale > 1.0);
    }

    #[test]
    fn perspective_keeps_x_on_axis() {
        let proj = Projector::new(ViewMode::Perspective, VIEWPORT);
        let out = proj.project(Vec2::new(120.0, 0.0));
        assert!((out.pos.x - 120.0).abs() < 1e-4);
        assert!(out.pos.y.abs() < 1e-4);
    }

    #[test]
    fn apparent_size_compensates_zoom() {
        assert_eq!(apparent_size(8.0, 1.0, 2.0), 4.0);
        assert_eq!(apparent_size(8.0, 0.5, 1.0), 4.0);
    }

    #[test]
    fn view_mode_round_trips_names() {
        for mode in ViewMode::ALL {
            assert_eq!(mode.as_str().parse::<ViewMode>(), Ok(mode));
        }
        assert!("iso".parse::<ViewMode>().is_err());
    }
}
