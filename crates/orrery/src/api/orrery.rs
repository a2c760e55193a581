use glam::Vec2;

use crate::api::config::OrreryConfig;
use crate::api::error::{OrreryError, Result};
use crate::assets::registry::SystemRegistry;
use crate::bridge::panel::{SelectionSnapshot, SystemList, ViewSnapshot};
use crate::core::scene::{BodyKind, BodyRef, CelestialBody, StarSystem};
use crate::core::time::SimClock;
use crate::input::gesture::{DragGesture, GestureEnd};
use crate::input::queue::{InputEvent, InputQueue};
use crate::renderer::camera::OrbitCamera;
use crate::renderer::draw_list::DrawList;
use crate::renderer::pixels::PixelBuffer;
use crate::renderer::projection::{Projector, ViewMode};
use crate::systems::cross_section::CrossSection;
use crate::systems::hit_test::{self, HitRadii};
use crate::systems::layout::SceneLayout;
use crate::systems::render;
use crate::systems::sphere::{self, SphereView};
use crate::systems::texture::TextureCache;

/// Canvas sizes in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewports {
    pub orbit: Vec2,
    pub sphere: Vec2,
    pub cross_section: Vec2,
}

impl Default for Viewports {
    fn default() -> Self {
        Self {
            orbit: Vec2::new(800.0, 600.0),
            sphere: Vec2::new(300.0, 300.0),
            cross_section: Vec2::new(300.0, 300.0),
        }
    }
}

/// Output of one frame.
#[derive(Debug, Clone)]
pub struct Frame {
    /// Simulation time the frame was drawn at.
    pub time: f64,
    pub orbit: DrawList,
    pub sphere: PixelBuffer,
    /// Present only when the cross-section had to be rebuilt.
    pub cross_section: Option<DrawList>,
}

/// Complete viewer state: active system, camera, selection and sphere
/// rotation. Input handlers mutate it between frames; `render` only reads
/// camera and selection.
pub struct Orrery {
    config: OrreryConfig,
    registry: SystemRegistry,
    active: String,
    camera: OrbitCamera,
    selection: Option<BodyRef>,
    orbit_gesture: DragGesture,
    sphere: SphereView,
    textures: TextureCache,
    cross_section: CrossSection,
    clock: SimClock,
    viewports: Viewports,
    /// Simulation time of the last rendered frame; clicks are tested against it.
    last_time: f64,
}

fn active_system<'r>(registry: &'r SystemRegistry, name: &str) -> &'r StarSystem {
    registry.get(name).unwrap_or_else(|| registry.default_system())
}

impl Orrery {
    pub fn new(registry: SystemRegistry, config: OrreryConfig) -> Self {
        let active = registry.default_system().name.clone();
        log::info!("Orrery ready: {} systems, showing '{}'", registry.len(), active);
        Self {
            camera: OrbitCamera::new(config.zoom_limits()),
            orbit_gesture: DragGesture::new(config.drag_threshold),
            sphere: SphereView::new(config.sphere_sensitivity),
            clock: SimClock::new(config.time_scale),
            registry,
            active,
            selection: None,
            textures: TextureCache::new(),
            cross_section: CrossSection::new(),
            viewports: Viewports::default(),
            last_time: 0.0,
            config,
        }
    }

    /// Orrery over the embedded catalog. Rejects out-of-range config.
    pub fn builtin(config: OrreryConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(SystemRegistry::builtin()?, config))
    }

    pub fn config(&self) -> &OrreryConfig {
        &self.config
    }

    pub fn registry(&self) -> &SystemRegistry {
        &self.registry
    }

    pub fn system(&self) -> &StarSystem {
        active_system(&self.registry, &self.active)
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn viewports(&self) -> Viewports {
        self.viewports
    }

    pub fn sphere_rotation(&self) -> f32 {
        self.sphere.rotation()
    }

    pub fn selection(&self) -> Option<BodyRef> {
        self.selection
    }

    /// The selected body, resolved against the active system.
    pub fn selected(&self) -> Option<CelestialBody<'_>> {
        self.selection.and_then(|b| self.system().body(b))
    }

    fn hit_radii(&self) -> HitRadii {
        HitRadii {
            planet: self.config.planet_click_radius,
            moon: self.config.moon_click_radius,
        }
    }

    fn set_selection(&mut self, selection: Option<BodyRef>) {
        if selection == self.selection {
            return;
        }
        self.selection = selection;
        if matches!(selection, Some(BodyRef::Star(_)) | None) {
            self.sphere.release();
        }
        match self.selected() {
            Some(body) => log::info!("Selected {} '{}'", body.kind(), body.name()),
            None => log::info!("Selection cleared"),
        }
    }

    /// Select by `(type, name)`, the path used by external body lists.
    /// An unknown pair clears the selection.
    pub fn select(&mut self, kind: BodyKind, name: &str) -> Option<CelestialBody<'_>> {
        let found = self.system().find(kind, name);
        if found.is_none() {
            log::warn!("No {kind} named '{name}' in '{}'", self.active);
        }
        self.set_selection(found);
        self.selected()
    }

    pub fn deselect(&mut self) {
        self.set_selection(None);
    }

    /// Make another system active. The selection carries over when a body of
    /// the same kind and name exists there, otherwise it is cleared.
    pub fn switch_system(&mut self, name: &str) -> Result<()> {
        let next = self
            .registry
            .get(name)
            .ok_or_else(|| OrreryError::UnknownSystem(name.to_string()))?;
        let carried = self
            .selected()
            .and_then(|body| next.find(body.kind(), body.name()));

        self.active = next.name.clone();
        self.selection = carried;
        self.sphere.release();
        self.orbit_gesture.cancel();
        self.camera.end_pan();
        self.textures.invalidate();
        self.cross_section.invalidate();
        log::info!("Switched to system '{}'", self.active);
        Ok(())
    }

    /// Body under a pointer position on the orbit canvas, as of the last frame.
    pub fn pick(&self, screen: Vec2) -> Option<BodyRef> {
        let viewport = self.viewports.orbit;
        let system = self.system();
        let projector = Projector::new(self.camera.view_mode(), viewport);
        let layout = SceneLayout::compute(system, self.last_time, viewport, &projector, self.config.moon_orbit_radius);
        let point = self.camera.screen_to_world(screen, viewport);
        hit_test::pick(system, &layout, point, self.camera.zoom(), self.hit_radii())
    }

    /// Apply one input event.
    pub fn handle(&mut self, event: InputEvent) {
        match event {
            InputEvent::OrbitPointerDown { x, y } => {
                let p = Vec2::new(x, y);
                self.orbit_gesture.press(p);
                self.camera.begin_pan(p);
            }
            InputEvent::OrbitPointerMove { x, y } => {
                let p = Vec2::new(x, y);
                if self.orbit_gesture.moved_to(p) {
                    self.camera.drag_pan(p);
                }
            }
            InputEvent::OrbitPointerUp { x, y } => {
                self.camera.end_pan();
                if let GestureEnd::Click(p) = self.orbit_gesture.release(Vec2::new(x, y)) {
                    let hit = self.pick(p);
                    self.set_selection(hit);
                }
            }
            InputEvent::OrbitPointerLeave => {
                self.orbit_gesture.cancel();
                self.camera.end_pan();
            }
            InputEvent::Wheel { delta_y } => self.camera.wheel(delta_y),
            InputEvent::SpherePointerDown { x } => {
                // No rotation for stars.
                if matches!(self.selection, Some(BodyRef::Planet(_)) | Some(BodyRef::Moon { .. })) {
                    self.sphere.press(x);
                }
            }
            InputEvent::SpherePointerMove { x } => self.sphere.move_to(x),
            InputEvent::SpherePointerUp | InputEvent::SpherePointerLeave => self.sphere.release(),
            InputEvent::ZoomIn => self.camera.zoom_in(),
            InputEvent::ZoomOut => self.camera.zoom_out(),
            InputEvent::ResetView => self.camera.reset_view(),
            InputEvent::SetViewMode(mode) => self.camera.set_view_mode(mode),
            InputEvent::Select { kind, name } => {
                self.select(kind, &name);
            }
            InputEvent::Deselect => self.deselect(),
            InputEvent::SwitchSystem { name } => {
                if let Err(e) = self.switch_system(&name) {
                    log::warn!("{e}");
                }
            }
            InputEvent::ResizeOrbit { width, height } => self.viewports.orbit = Vec2::new(width, height),
            InputEvent::ResizeSphere { width, height } => self.viewports.sphere = Vec2::new(width, height),
            InputEvent::ResizeCrossSection { width, height } => {
                self.viewports.cross_section = Vec2::new(width, height)
            }
        }
    }

    /// Drain and apply all queued events.
    pub fn update(&mut self, input: &mut InputQueue) {
        for event in input.drain() {
            self.handle(event);
        }
    }

    /// Draw one frame at wall-clock `now_ms`.
    pub fn render(&mut self, now_ms: f64, viewports: Viewports) -> Frame {
        self.viewports = viewports;
        let time = self.clock.sim_time(now_ms);
        self.last_time = time;

        let system = active_system(&self.registry, &self.active);
        let projector = Projector::new(self.camera.view_mode(), viewports.orbit);
        let layout = SceneLayout::compute(system, time, viewports.orbit, &projector, self.config.moon_orbit_radius);

        let mut orbit = DrawList::new();
        render::build_orbit_frame(
            &mut orbit,
            system,
            &layout,
            &projector,
            &self.camera,
            viewports.orbit,
            self.selection,
            &self.config,
        );

        let body = self.selection.and_then(|b| system.body(b));
        let texture = match self.selection {
            Some(b) => self
                .textures
                .get_or_generate(system, b, self.config.texture_width, self.config.texture_height),
            None => None,
        };
        let sphere = sphere::render_sphere(
            viewports.sphere.x.max(0.0) as u32,
            viewports.sphere.y.max(0.0) as u32,
            body,
            texture,
            self.sphere.rotation(),
            self.config.background,
        );

        let cross_section = self
            .cross_section
            .refresh(system, self.selection, viewports.cross_section, self.config.background)
            .cloned();

        Frame {
            time,
            orbit,
            sphere,
            cross_section,
        }
    }

    /// Full cross-section list, regardless of whether the last frame rebuilt it.
    pub fn cross_section(&self) -> &DrawList {
        self.cross_section.list()
    }

    /// Selected body for the details panel; `null` when nothing is selected.
    pub fn selection_json(&self) -> Result<String> {
        let snapshot = self.selected().map(SelectionSnapshot::from);
        Ok(serde_json::to_string(&snapshot)?)
    }

    pub fn view_json(&self) -> Result<String> {
        let snapshot = ViewSnapshot {
            view_mode: self.camera.view_mode(),
            zoom: self.camera.zoom(),
            system: &self.active,
        };
        Ok(serde_json::to_string(&snapshot)?)
    }

    pub fn system_names_json(&self) -> Result<String> {
        let list = SystemList {
            systems: self.registry.names().collect(),
            active: &self.active,
        };
        Ok(serde_json::to_string(&list)?)
    }

    pub fn view_mode(&self) -> ViewMode {
        self.camera.view_mode()
    }

    pub fn zoom(&self) -> f32 {
        self.camera.zoom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::draw_list::DrawCommand;

    fn orrery() -> Orrery {
        Orrery::builtin(OrreryConfig::default()).unwrap()
    }

    fn click(o: &mut Orrery, x: f32, y: f32) {
        let mut q = InputQueue::new();
        q.push(InputEvent::OrbitPointerDown { x, y });
        q.push(InputEvent::OrbitPointerUp { x, y });
        o.update(&mut q);
    }

    #[test]
    fn center_click_at_time_zero_selects_primary_planet() {
        let mut o = orrery();
        o.render(0.0, Viewports::default());
        assert_eq!(o.view_mode(), ViewMode::Top);
        assert_eq!(o.zoom(), 1.0);

        click(&mut o, 400.0, 300.0);
        let body = o.selected().unwrap();
        assert_eq!(body.kind(), BodyKind::Planet);
        assert_eq!(body.name(), "Zan");
    }

    #[test]
    fn empty_space_click_deselects() {
        let mut o = orrery();
        o.render(0.0, Viewports::default());
        o.select(BodyKind::Planet, "Casa");
        assert!(o.selected().is_some());

        click(&mut o, 400.0, 550.0);
        assert!(o.selected().is_none());
    }

    #[test]
    fn drag_suppresses_selection() {
        let mut o = orrery();
        o.render(0.0, Viewports::default());
        let mut q = InputQueue::new();
        q.push(InputEvent::OrbitPointerDown { x: 100.0, y: 100.0 });
        q.push(InputEvent::OrbitPointerMove { x: 250.0, y: 200.0 });
        q.push(InputEvent::OrbitPointerMove { x: 400.0, y: 300.0 });
        q.push(InputEvent::OrbitPointerUp { x: 400.0, y: 300.0 });
        o.update(&mut q);

        assert!(o.selected().is_none());
        assert_eq!(o.camera().pan(), Vec2::new(300.0, 200.0));
    }

    #[test]
    fn jitter_below_threshold_still_clicks() {
        let mut o = orrery();
        o.render(0.0, Viewports::default());
        let mut q = InputQueue::new();
        q.push(InputEvent::OrbitPointerDown { x: 398.0, y: 300.0 });
        q.push(InputEvent::OrbitPointerMove { x: 401.0, y: 301.0 });
        q.push(InputEvent::OrbitPointerUp { x: 401.0, y: 301.0 });
        o.update(&mut q);

        assert_eq!(o.selection(), Some(BodyRef::Planet(0)));
        assert_eq!(o.camera().pan(), Vec2::ZERO);
    }

    #[test]
    fn moon_lookup_reports_parent() {
        let mut o = orrery();
        let body = o.select(BodyKind::Moon, "Ales").unwrap();
        assert_eq!(body.kind(), BodyKind::Moon);
        assert_eq!(body.parent_planet(), Some("Zan"));

        assert!(o.select(BodyKind::Moon, "Zan").is_none());
        assert!(o.selection().is_none());
    }

    #[test]
    fn system_round_trip_restores_bodies() {
        let mut o = orrery();
        let before = o.system().clone();
        o.switch_system("Vela Survey").unwrap();
        assert_eq!(o.system().name, "Vela Survey");
        o.switch_system("Redo").unwrap();
        assert_eq!(*o.system(), before);
    }

    #[test]
    fn switch_revalidates_selection() {
        let mut o = orrery();
        o.select(BodyKind::Planet, "Zan");
        o.switch_system("Vela Survey").unwrap();
        assert!(o.selection().is_none());

        o.select(BodyKind::Star, "Vela");
        assert_eq!(o.selection(), Some(BodyRef::Star(0)));
        o.switch_system("Redo").unwrap();
        assert!(o.selection().is_none());
    }

    #[test]
    fn unknown_system_leaves_state_alone() {
        let mut o = orrery();
        o.select(BodyKind::Planet, "Judo");
        let err = o.switch_system("Nowhere").unwrap_err();
        assert!(matches!(err, OrreryError::UnknownSystem(ref n) if n == "Nowhere"));
        assert_eq!(o.system().name, "Redo");
        assert_eq!(o.selection(), Some(BodyRef::Planet(2)));
    }

    #[test]
    fn zoom_stays_clamped() {
        let mut o = orrery();
        let mut q = InputQueue::new();
        for _ in 0..50 {
            q.push(InputEvent::ZoomIn);
        }
        o.update(&mut q);
        assert_eq!(o.zoom(), 5.0);

        for _ in 0..50 {
            q.push(InputEvent::Wheel { delta_y: 120.0 });
        }
        o.update(&mut q);
        assert_eq!(o.zoom(), 0.5);

        q.push(InputEvent::SetViewMode(ViewMode::Side));
        q.push(InputEvent::ResetView);
        o.update(&mut q);
        assert_eq!(o.zoom(), 1.0);
        assert_eq!(o.view_mode(), ViewMode::Top);
    }

    #[test]
    fn bad_host_config_is_an_error() {
        let config = OrreryConfig {
            zoom_min: 6.0,
            ..OrreryConfig::default()
        };
        assert!(matches!(Orrery::builtin(config), Err(OrreryError::InvalidConfig(_))));
    }

    #[test]
    fn sphere_drag_ignored_for_stars() {
        let mut o = orrery();
        o.select(BodyKind::Star, "Spica");
        let mut q = InputQueue::new();
        q.push(InputEvent::SpherePointerDown { x: 0.0 });
        q.push(InputEvent::SpherePointerMove { x: 80.0 });
        q.push(InputEvent::SpherePointerUp);
        o.update(&mut q);
        assert_eq!(o.sphere_rotation(), 0.0);

        o.select(BodyKind::Planet, "Zan");
        q.push(InputEvent::SpherePointerDown { x: 0.0 });
        q.push(InputEvent::SpherePointerMove { x: 80.0 });
        q.push(InputEvent::SpherePointerUp);
        o.update(&mut q);
        assert!((o.sphere_rotation() - 0.8).abs() < 1e-5);
    }

    #[test]
    fn frame_carries_all_canvases() {
        let mut o = orrery();
        o.select(BodyKind::Planet, "Casa");
        let viewports = Viewports {
            orbit: Vec2::new(640.0, 480.0),
            sphere: Vec2::new(120.0, 100.0),
            cross_section: Vec2::new(200.0, 200.0),
        };
        let frame = o.render(1000.0, viewports);
        assert!((frame.time - 0.5).abs() < 1e-12);
        assert_eq!(frame.sphere.width(), 120);
        assert_eq!(frame.sphere.height(), 100);
        assert!(matches!(frame.orbit.commands()[0], DrawCommand::Clear { .. }));
        assert!(frame.cross_section.is_some());

        // Same planet, same size: nothing to rebuild.
        let again = o.render(1016.0, viewports);
        assert!(again.cross_section.is_none());
        assert_eq!(o.cross_section().texts().count(), 3);
    }

    #[test]
    fn render_leaves_camera_and_selection_alone() {
        let mut o = orrery();
        o.select(BodyKind::Moon, "Moon 2");
        let camera = o.camera().clone();
        o.render(123_456.0, Viewports::default());
        assert_eq!(*o.camera(), camera);
        assert_eq!(o.selection(), Some(BodyRef::Moon { planet: 1, moon: 1 }));
    }

    #[test]
    fn json_snapshots() {
        let mut o = orrery();
        assert_eq!(o.selection_json().unwrap(), "null");
        o.select(BodyKind::Moon, "Agape");
        let sel: serde_json::Value = serde_json::from_str(&o.selection_json().unwrap()).unwrap();
        assert_eq!(sel["type"], "moon");
        assert_eq!(sel["parentPlanet"], "Zan");

        let view: serde_json::Value = serde_json::from_str(&o.view_json().unwrap()).unwrap();
        assert_eq!(view["viewMode"], "top");
        assert_eq!(view["system"], "Redo");

        let names: serde_json::Value = serde_json::from_str(&o.system_names_json().unwrap()).unwrap();
        assert_eq!(names["systems"][1], "Vela Survey");
        assert_eq!(names["active"], "Redo");
    }
}
