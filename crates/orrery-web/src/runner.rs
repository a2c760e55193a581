use orrery::{InputEvent, InputQueue, Orrery, Viewports};
use wasm_bindgen::JsValue;
use web_sys::Document;

use crate::canvas::CanvasSurface;

/// Wires the orrery core to its three canvases.
///
/// Input is queued by the exported handlers and applied before each frame,
/// or before any state is read back by the host page.
pub struct WebRunner {
    orrery: Orrery,
    input: InputQueue,
    orbit: CanvasSurface,
    sphere: CanvasSurface,
    cross_section: CanvasSurface,
}

impl WebRunner {
    pub fn new(
        orrery: Orrery,
        document: &Document,
        orbit_id: &str,
        sphere_id: &str,
        cross_section_id: &str,
    ) -> Result<Self, JsValue> {
        Ok(Self {
            orrery,
            input: InputQueue::new(),
            orbit: CanvasSurface::acquire(document, orbit_id)?,
            sphere: CanvasSurface::acquire(document, sphere_id)?,
            cross_section: CanvasSurface::acquire(document, cross_section_id)?,
        })
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Apply queued input now.
    pub fn flush(&mut self) -> &mut Orrery {
        self.orrery.update(&mut self.input);
        &mut self.orrery
    }

    /// Apply input, render at wall-clock `now_ms` and paint every canvas.
    pub fn frame(&mut self, now_ms: f64) -> Result<(), JsValue> {
        self.orrery.update(&mut self.input);

        let viewports = Viewports {
            orbit: self.orbit.fit_to_client(),
            sphere: self.sphere.fit_to_client(),
            cross_section: self.cross_section.fit_to_client(),
        };
        let frame = self.orrery.render(now_ms, viewports);

        self.orbit.paint(&frame.orbit)?;
        self.sphere.put_pixels(&frame.sphere)?;
        if let Some(section) = &frame.cross_section {
            self.cross_section.paint(section)?;
        }
        Ok(())
    }
}
