use glam::Vec2;

use crate::renderer::projection::ViewMode;

/// Zoom bounds and step for the orbit camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomLimits {
    pub min: f32,
    pub max: f32,
    /// Multiplicative factor per zoom step.
    pub step: f32,
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self {
            min: 0.5,
            max: 5.0,
            step: 1.2,
        }
    }
}

impl ZoomLimits {
    /// Clamp into `[min, max]`. Never panics; inverted bounds resolve to `max`.
    pub fn clamp(&self, zoom: f32) -> f32 {
        zoom.max(self.min).min(self.max)
    }
}

/// Camera over the orbit canvas: zoom, pan and view mode.
///
/// Canvas transform: `screen = viewport / 2 + pan + zoom * world`.
/// Mutated only by input handlers; read by the render loop and hit-tester.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    zoom: f32,
    /// Pan offset in screen pixels. Unclamped.
    pan: Vec2,
    view_mode: ViewMode,
    limits: ZoomLimits,
    /// Pointer position and pan at the start of the current pan gesture.
    pan_anchor: Option<(Vec2, Vec2)>,
}

impl OrbitCamera {
    pub fn new(limits: ZoomLimits) -> Self {
        Self {
            zoom: limits.clamp(1.0),
            pan: Vec2::ZERO,
            view_mode: ViewMode::Top,
            limits,
            pan_anchor: None,
        }
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn pan(&self) -> Vec2 {
        self.pan
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn limits(&self) -> ZoomLimits {
        self.limits
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
    }

    /// Set zoom directly, clamped to the limits.
    pub fn set_zoom(&mut self, zoom: f32) {
        if zoom.is_finite() {
            self.zoom = self.limits.clamp(zoom);
        }
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom * self.limits.step);
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom / self.limits.step);
    }

    /// Wheel scroll: negative `delta_y` (scroll up) zooms in, positive zooms out.
    pub fn wheel(&mut self, delta_y: f32) {
        if delta_y < 0.0 {
            self.zoom_in();
        } else if delta_y > 0.0 {
            self.zoom_out();
        }
    }

    pub fn begin_pan(&mut self, pointer: Vec2) {
        self.pan_anchor = Some((pointer, self.pan));
    }

    /// Move the pan by the pointer's displacement since `begin_pan`.
    pub fn drag_pan(&mut self, pointer: Vec2) {
        if let Some((start, pan_start)) = self.pan_anchor {
            self.pan = pan_start + (pointer - start);
        }
    }

    pub fn end_pan(&mut self) {
        self.pan_anchor = None;
    }

    pub fn is_panning(&self) -> bool {
        self.pan_anchor.is_some()
    }

    /// Zoom → 1, pan → origin, view mode → top.
    pub fn reset_view(&mut self) {
        self.zoom = self.limits.clamp(1.0);
        self.pan = Vec2::ZERO;
        self.view_mode = ViewMode::Top;
        self.pan_anchor = None;
    }

    /// Screen-space origin of the world after centering and panning.
    pub fn origin(&self, viewport: Vec2) -> Vec2 {
        viewport / 2.0 + self.pan
    }

    pub fn world_to_screen(&self, world: Vec2, viewport: Vec2) -> Vec2 {
        self.origin(viewport) + world * self.zoom
    }

    /// Invert the canvas transform.
    pub fn screen_to_world(&self, screen: Vec2, viewport: Vec2) -> Vec2 {
        (screen - self.origin(viewport)) / self.zoom
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new(ZoomLimits::default())
    }
}
